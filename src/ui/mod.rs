use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

pub mod layout;
pub mod tabs;
pub mod widgets;

use crate::app::{App, InputMode, PanelState};
use crate::core::{Notification, NotifyLevel};
use crate::domain::backoffice::{SpamTab, View};
use crate::render::{self, SummaryView};
use widgets::StatCard;

pub fn draw(f: &mut Frame, app: &App) {
    let areas = layout::areas(f.size());

    tabs::draw_tab_bar(f, areas.header, app);
    match app.current_view() {
        View::Overview => draw_overview(f, areas.main, app),
        View::Search => draw_search(f, areas.main, app),
        View::Spam(sub) => draw_spam(f, areas.main, app, sub),
    }
    draw_status_line(f, areas.status_line, app);
    draw_command_line(f, areas.command_line, app);

    draw_notifications(f, areas.main, app);

    if app.show_help {
        draw_help_popup(f, areas.size);
    }
    if app.show_settings {
        draw_settings_popup(f, areas.size, app);
    }
}

fn draw_overview(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(area);

    let view = match &app.summary {
        PanelState::Loaded(summary) => render::summary_view(summary),
        _ => render::summary_placeholder(),
    };
    match render::summary_panel(&app.summary) {
        Some(panel) => widgets::draw_panel(f, chunks[0], "Dashboard", &panel, 0),
        None => draw_stat_cards(f, chunks[0], &view),
    }

    let updated = if app.summary.is_loading() {
        Span::styled("Loading...", Style::default().fg(Color::Yellow))
    } else {
        Span::raw(view.last_updated.clone())
    };
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(" Last updated: ", Style::default().fg(Color::DarkGray)),
            updated,
        ])),
        chunks[1],
    );

    let lines = vec![
        Line::from(Span::styled(
            " Quick access",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        hint_line("2 or /", "Search a lead by ID"),
        hint_line("3", "Spam activities and users"),
        hint_line("r", "Refresh the current view"),
        hint_line("e", "Export the current view (CSV)"),
        hint_line(":", "Command line (:help for the list)"),
    ];
    f.render_widget(Paragraph::new(lines), chunks[2]);
}

fn hint_line(key: &str, text: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<8}", key), Style::default().fg(Color::Yellow)),
        Span::raw(text.to_string()),
    ])
}

fn draw_stat_cards(f: &mut Frame, area: Rect, view: &SummaryView) {
    let mut cards: Vec<(&str, &str, Color)> = vec![
        ("Total Leads", view.total_leads.as_str(), Color::White),
        ("Messages Today", view.messages_today.as_str(), Color::White),
        ("Spam Rate", view.spam_percentage.as_str(), Color::Yellow),
        ("Spam Users (30d)", view.spam_users.as_str(), Color::Red),
    ];
    if let Some(spam_today) = view.spam_today.as_deref() {
        cards.push(("Spam Today", spam_today, Color::Red));
    }

    let count = cards.len() as u32;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            cards
                .iter()
                .map(|_| Constraint::Ratio(1, count))
                .collect::<Vec<_>>(),
        )
        .split(area);

    for ((label, value, color), chunk) in cards.into_iter().zip(chunks.iter()) {
        f.render_widget(
            StatCard::new(label, value).style(Style::default().fg(color)),
            *chunk,
        );
    }
}

fn draw_search(f: &mut Frame, area: Rect, app: &App) {
    let (input_area, results_area) = layout::search_areas(area);

    let editing = app.input_mode == InputMode::Search;
    let border = if editing { Color::Yellow } else { Color::DarkGray };
    let input = if app.search_input.is_empty() && !editing {
        Span::styled("press / to enter a lead ID", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(render::format::display_text(&app.search_input))
    };
    let mut spans = vec![input];
    if editing {
        spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(" Lead ID "),
        ),
        input_area,
    );

    let panel = render::lead_panel(&app.lead);
    widgets::draw_panel(f, results_area, "Lead Details", &panel, app.scroll);
}

fn draw_spam(f: &mut Frame, area: Rect, app: &App, sub: SpamTab) {
    let (strip, body) = layout::spam_areas(area);
    tabs::draw_spam_tabs(f, strip, app);

    match sub {
        SpamTab::Activities => {
            let panel = render::flagged_events_panel(&app.flagged_events);
            widgets::draw_panel(f, body, "Spam Activities (7 days)", &panel, app.scroll);
        }
        SpamTab::Users => {
            let panel = render::flagged_subjects_panel(&app.flagged_subjects);
            widgets::draw_panel(f, body, "Spam Users (30 days)", &panel, app.scroll);
        }
    }
}

fn draw_status_line(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled("View ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{}  ", app.current_view().breadcrumb())),
        Span::styled("API ", Style::default().fg(Color::DarkGray)),
        Span::raw(app.settings.api_base_url.clone()),
    ];
    if let Some(status) = app.status_text() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(status, Style::default().fg(Color::Yellow)));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Left);
    f.render_widget(paragraph, area);
}

/// Get command hint for autocompletion
fn command_hint(input: &str) -> Option<&'static str> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return None;
    }

    let commands: &[(&str, &str)] = &[
        ("overview", "overview - daily summary"),
        ("search", "search <lead id>"),
        ("spam", "spam [activities|users]"),
        ("refresh", "refresh - reload the current view"),
        ("export", "export <summary|lead|spam-activities|spam-users> [csv|json|html]"),
        ("help", "help - key bindings"),
        ("settings", "settings - resolved configuration"),
        ("quit", "quit"),
    ];

    let word = input.split_whitespace().next().unwrap_or("");
    commands
        .iter()
        .find(|(cmd, _)| cmd.starts_with(word))
        .map(|(_, hint)| *hint)
}

fn draw_command_line(f: &mut Frame, area: Rect, app: &App) {
    let content = match app.input_mode {
        InputMode::Command => {
            let hint = command_hint(&app.command_input).unwrap_or("overview | search | spam | export | quit");
            Line::from(vec![
                Span::styled(": ", Style::default().fg(Color::Yellow)),
                Span::raw(app.command_input.clone()),
                Span::styled(format!("  {}", hint), Style::default().fg(Color::DarkGray)),
            ])
        }
        InputMode::Search => Line::from(vec![
            Span::styled("> lead ", Style::default().fg(Color::LightCyan)),
            Span::raw(render::format::display_text(&app.search_input)),
            Span::styled("  (Enter=search Esc=cancel)", Style::default().fg(Color::DarkGray)),
        ]),
        InputMode::Normal => Line::from(Span::styled(
            "1-3 tabs  a/u spam  / search  r refresh  e export  : command  ? help  q quit",
            Style::default().fg(Color::DarkGray),
        )),
    };
    f.render_widget(Paragraph::new(content), area);
}

fn notification_style(level: NotifyLevel) -> (Style, &'static str) {
    match level {
        NotifyLevel::Info => (Style::default().fg(Color::Cyan), "i"),
        NotifyLevel::Success => (Style::default().fg(Color::Green), "✓"),
        NotifyLevel::Error => (Style::default().fg(Color::Red), "✗"),
    }
}

/// Stack notifications in the bottom-right corner, newest at the bottom.
/// When space runs out the oldest are left undrawn.
fn draw_notifications(f: &mut Frame, area: Rect, app: &App) {
    if app.notifications.is_empty() || area.width < 20 {
        return;
    }
    let width = (area.width / 2).clamp(20, 60);
    let x = area.x + area.width - width;

    let fits = (area.height / 3) as usize;
    let shown = app.notifications.len().min(fits);
    let skip = app.notifications.len() - shown;
    let mut y = area.y + area.height - (shown as u16) * 3;

    for notification in app.notifications.iter().skip(skip) {
        let rect = Rect::new(x, y, width, 3);
        draw_notification(f, rect, notification);
        y += 3;
    }
}

fn draw_notification(f: &mut Frame, rect: Rect, notification: &Notification) {
    let (style, icon) = notification_style(notification.level);
    f.render_widget(Clear, rect);
    let paragraph = Paragraph::new(Line::from(vec![
        Span::styled(format!("{} ", icon), style),
        Span::raw(render::format::display_text(&notification.text)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(style),
    );
    f.render_widget(paragraph, rect);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = layout::centered_rect(64, 70, area);
    f.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from("Navigation"),
        Line::from("  1 / 2 / 3    Overview / Lead Search / Spam"),
        Line::from("  Tab / S-Tab  Next / previous tab"),
        Line::from("  a / u        Spam activities / users"),
        Line::from("  ← / →        Switch spam sub-tab"),
        Line::from("  j / k        Scroll tables"),
        Line::from("  Mouse        Click tabs"),
        Line::from(""),
        Line::from("Actions"),
        Line::from("  /            Search lead by ID"),
        Line::from("  r            Refresh current view"),
        Line::from("  e            Export current view as CSV"),
        Line::from("  :            Command line"),
        Line::from("  s            Settings"),
        Line::from("  Esc          Close popup / dismiss notifications"),
        Line::from("  ?            Toggle help"),
        Line::from("  q            Quit"),
        Line::from(""),
        Line::from("Commands"),
        Line::from("  :overview  :search <id>  :spam [activities|users]"),
        Line::from("  :refresh   :export <category> [csv|json|html]"),
        Line::from("  :settings  :help  :quit"),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, popup_area);
}

fn draw_settings_popup(f: &mut Frame, area: Rect, app: &App) {
    let popup_area = layout::centered_rect(76, 50, area);
    f.render_widget(Clear, popup_area);

    let settings = &app.settings;
    let path_or_unknown = |path: Option<&std::path::Path>| {
        path.map(|p| p.display().to_string())
            .unwrap_or_else(|| "(unknown)".to_string())
    };
    let timeout = settings
        .request_timeout
        .map(|t| format!("{}s", t.as_secs()))
        .unwrap_or_else(|| "none".to_string());

    let lines = vec![
        Line::from(Span::styled(
            "Settings",
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("API:           {}", settings.api_base_url)),
        Line::from(format!(
            "Config:        {}",
            path_or_unknown(settings.config_path.as_deref())
        )),
        Line::from(format!(
            "Log file:      {}",
            path_or_unknown(settings.log_path.as_deref())
        )),
        Line::from(format!("Exports:       {}", settings.export_dir.display())),
        Line::from(format!("Timeout:       {}", timeout)),
        Line::from(format!(
            "Notifications: {} max, {}s",
            settings.max_notifications,
            settings.notification_ttl.as_secs()
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Esc or s to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(Text::from(lines)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Settings "),
    );
    f.render_widget(paragraph, popup_area);
}
