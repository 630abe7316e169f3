//! Bordered card showing one headline number

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct StatCard<'a> {
    label: &'a str,
    value: &'a str,
    style: Style,
}

impl<'a> StatCard<'a> {
    pub fn new(label: &'a str, value: &'a str) -> Self {
        Self {
            label,
            value,
            style: Style::default().fg(Color::White),
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl<'a> Widget for StatCard<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 || area.height < 3 {
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(Line::styled(
                format!(" {} ", self.label),
                Style::default().fg(Color::Gray),
            ));
        let inner = block.inner(area);
        block.render(area, buf);

        // vertically centre the value
        let mut value_area = inner;
        if inner.height > 1 {
            value_area.y += (inner.height - 1) / 2;
            value_area.height = 1;
        }

        Paragraph::new(Line::from(self.value.to_string()))
            .style(self.style.add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .render(value_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(area: Rect, card: StatCard) -> String {
        let mut buf = Buffer::empty(area);
        card.render(area, &mut buf);
        buf.content.iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn renders_label_and_value() {
        let text = rendered(Rect::new(0, 0, 24, 5), StatCard::new("Total Leads", "1,234"));
        assert!(text.contains("Total Leads"));
        assert!(text.contains("1,234"));
    }

    #[test]
    fn too_small_area_renders_nothing() {
        let text = rendered(Rect::new(0, 0, 2, 2), StatCard::new("Total Leads", "1,234"));
        assert!(!text.contains('1'));
    }
}
