//! Tab bar and spam sub-tab strip

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Tabs as RataTabs};
use ratatui::Frame;

use crate::app::App;
use crate::domain::backoffice::{SpamTab, Tab};

const DIVIDER: &str = " │ ";

fn tab_label(shortcut: char, title: &str) -> String {
    format!("{}:{}", shortcut, title)
}

/// Draw the tab bar at the top
pub fn draw_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .map(|tab| {
            Line::from(vec![
                Span::styled(
                    format!("{}:", tab.shortcut()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(tab.title()),
            ])
        })
        .collect();

    let selected = Tab::ALL
        .iter()
        .position(|t| app.view.is_active(*t))
        .unwrap_or(0);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " Backoffice ",
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        ));

    let tabs = RataTabs::new(titles)
        .block(block)
        .select(selected)
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .divider(DIVIDER);

    f.render_widget(tabs, area);
}

/// Draw the Activities / Users strip above the spam table
pub fn draw_spam_tabs(f: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = SpamTab::ALL
        .iter()
        .map(|sub| {
            Line::from(vec![
                Span::styled(
                    format!("{}:", sub.shortcut()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(sub.title()),
            ])
        })
        .collect();

    let selected = SpamTab::ALL
        .iter()
        .position(|s| *s == app.view.spam_tab())
        .unwrap_or(0);

    let tabs = RataTabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider(DIVIDER);

    f.render_widget(tabs, area);
}

/// Index of the title under column `col`, given where the titles start
fn title_at(start: u16, col: u16, labels: &[String]) -> Option<usize> {
    let divider = DIVIDER.chars().count() as u16;
    let mut x = start;
    for (idx, label) in labels.iter().enumerate() {
        // one cell of padding on each side
        let width = label.chars().count() as u16 + 2;
        if col >= x && col < x + width {
            return Some(idx);
        }
        x += width + divider;
    }
    None
}

/// Top-level tab under a click in the header
pub fn tab_at(header: Rect, col: u16, row: u16) -> Option<Tab> {
    if row != header.y + 1 {
        return None;
    }
    let labels: Vec<String> = Tab::ALL
        .iter()
        .map(|tab| tab_label(tab.shortcut(), tab.title()))
        .collect();
    title_at(header.x + 1, col, &labels).map(|idx| Tab::ALL[idx])
}

/// Spam sub-tab under a click on the sub-tab strip
pub fn spam_tab_at(strip: Rect, col: u16, row: u16) -> Option<SpamTab> {
    if row != strip.y {
        return None;
    }
    let labels: Vec<String> = SpamTab::ALL
        .iter()
        .map(|sub| tab_label(sub.shortcut(), sub.title()))
        .collect();
    title_at(strip.x, col, &labels).map(|idx| SpamTab::ALL[idx])
}
