//! Terminal rendering of renderer panels

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell as TableCell, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

use crate::render::{format, Cell, LeadView, NoticeKind, Panel, TableView, Tone};

const MAX_CELL_CHARS: usize = 120;

pub fn tone_style(tone: Tone) -> Style {
    match tone {
        Tone::Plain => Style::default().fg(Color::White),
        Tone::Muted => Style::default().fg(Color::DarkGray),
        Tone::Inbound => Style::default().fg(Color::Green),
        Tone::Outbound => Style::default().fg(Color::Blue),
        Tone::Danger => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        Tone::Warning => Style::default().fg(Color::Yellow),
    }
}

fn panel_block(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" {} ", title))
}

pub fn draw_panel(f: &mut Frame, area: Rect, title: &str, panel: &Panel, scroll: usize) {
    match panel {
        Panel::Notice { kind, text } => draw_notice(f, area, title, *kind, text),
        Panel::Table(table) => draw_table(f, area, title, table, scroll),
        Panel::Lead(lead) => draw_lead(f, area, lead, scroll),
    }
}

pub fn draw_notice(f: &mut Frame, area: Rect, title: &str, kind: NoticeKind, text: &str) {
    let style = match kind {
        NoticeKind::Loading => Style::default().fg(Color::Yellow),
        NoticeKind::Empty | NoticeKind::Hint => Style::default().fg(Color::DarkGray),
        NoticeKind::Error => Style::default().fg(Color::Red),
    };
    let paragraph = Paragraph::new(Line::from(Span::styled(text.to_string(), style)))
        .block(panel_block(title))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn to_row(cells: &[Cell]) -> Row<'static> {
    Row::new(
        cells
            .iter()
            .map(|cell| {
                TableCell::from(Span::styled(
                    format::truncate(&cell.text, MAX_CELL_CHARS),
                    tone_style(cell.tone),
                ))
            })
            .collect::<Vec<_>>(),
    )
}

/// Draw a table, skipping the first `scroll` rows
pub fn draw_table(f: &mut Frame, area: Rect, title: &str, table: &TableView, scroll: usize) {
    let columns = table.headers.len().max(1) as u32;
    let widths: Vec<Constraint> = table
        .headers
        .iter()
        .map(|_| Constraint::Ratio(1, columns))
        .collect();

    let header = Row::new(
        table
            .headers
            .iter()
            .map(|h| TableCell::from(*h))
            .collect::<Vec<_>>(),
    )
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let skip = scroll.min(table.rows.len().saturating_sub(1));
    let rows: Vec<Row> = table.rows.iter().skip(skip).map(|r| to_row(r)).collect();

    let title = if table.rows.is_empty() {
        title.to_string()
    } else {
        format!("{} ({}/{})", title, skip + 1, table.rows.len())
    };

    let widget = Table::new(rows, widths)
        .header(header)
        .block(panel_block(&title))
        .column_spacing(1);
    f.render_widget(widget, area);
}

pub fn draw_lead(f: &mut Frame, area: Rect, lead: &LeadView, scroll: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(area);

    let label = Style::default().fg(Color::DarkGray);
    let lines = vec![
        Line::from(vec![
            Span::styled("Name     ", label),
            Span::styled(
                lead.name.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Created  ", label),
            Span::raw(lead.created.clone()),
        ]),
        Line::from(vec![
            Span::styled("Phone    ", label),
            Span::raw(lead.phone.clone()),
        ]),
        Line::from(vec![
            Span::styled("Email    ", label),
            Span::raw(lead.email.clone()),
        ]),
    ];
    f.render_widget(
        Paragraph::new(lines).block(panel_block("Lead Information")),
        chunks[0],
    );

    let title = format!("Recent Messages ({})", lead.activity_count);
    if lead.activities.rows.is_empty() {
        draw_notice(f, chunks[1], &title, NoticeKind::Empty, "No messages.");
    } else {
        draw_table(f, chunks[1], &title, &lead.activities, scroll);
    }
}
