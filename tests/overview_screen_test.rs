//! Overview drawn to an in-memory terminal

use backoffice::app::App;
use backoffice::domain::backoffice::{DashboardSummary, FetchError, FetchOutcome};
use backoffice::ui;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

const WIDTH: u16 = 140;
const HEIGHT: u16 = 30;

/// Rows of the rendered screen as plain text
fn screen(app: &App) -> Vec<String> {
    let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap();
    terminal.draw(|f| ui::draw(f, app)).unwrap();
    let buffer = terminal.backend().buffer();
    (0..HEIGHT)
        .map(|y| (0..WIDTH).map(|x| buffer.get(x, y).symbol()).collect())
        .collect()
}

fn started() -> (App, u64) {
    let mut app = App::default();
    app.start();
    let (ticket, _) = app.take_requests().remove(0);
    (app, ticket)
}

#[test]
fn failed_summary_shows_server_text_inline() {
    let (mut app, ticket) = started();
    app.apply_outcome(
        ticket,
        FetchOutcome::Summary(Err(FetchError::Application {
            status: 500,
            message: "db down".to_string(),
        })),
    );

    let rows = screen(&app);
    assert!(
        rows.iter()
            .any(|row| row.contains("Failed to load dashboard data: db down")),
        "{rows:#?}"
    );
}

#[test]
fn transport_failure_shows_error_text_inline() {
    let (mut app, ticket) = started();
    app.apply_outcome(
        ticket,
        FetchOutcome::Summary(Err(FetchError::Transport(
            "connection refused".to_string(),
        ))),
    );

    let rows = screen(&app);
    assert!(rows
        .iter()
        .any(|row| row.contains("Error loading dashboard: connection refused")));
}

#[test]
fn notifications_leave_stat_cards_visible() {
    let (mut app, ticket) = started();
    app.apply_outcome(
        ticket,
        FetchOutcome::Summary(Ok(DashboardSummary {
            total_leads: 1234,
            messages_today: 5,
            spam_percentage: 12.5,
            spam_users: 3,
            last_updated: String::new(),
            spam_today: None,
        })),
    );
    app.notify(
        backoffice::core::NotifyLevel::Error,
        "Error loading spam users: offline",
    );

    let rows = screen(&app);
    // header takes rows 0-2, the cards the next five
    let cards = &rows[3..8];
    assert!(cards.iter().any(|row| row.contains("12.5%")));
    assert!(cards.iter().any(|row| row.contains("Spam Users (30d)")));
    assert!(!cards.iter().any(|row| row.contains("offline")));

    let note_row = rows
        .iter()
        .position(|row| row.contains("Error loading spam users: offline"))
        .unwrap();
    assert!(note_row >= 8);
}
