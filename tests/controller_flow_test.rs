//! Drive the dashboard controller without a terminal or network

use backoffice::app::{App, InputMode, PanelState};
use backoffice::core::{parse_command, NotifyLevel};
use backoffice::domain::backoffice::{
    FetchError, FetchOutcome, FetchRequest, FlaggedEvent, LeadDetail, SpamTab, Tab, View,
};
use backoffice::infrastructure::runtime::RuntimeEvent;

fn lead(name: &str) -> LeadDetail {
    serde_json::from_value(serde_json::json!({
        "lead": { "name": name, "created_at": "2024-05-01T10:00:00" },
        "contact_methods": [],
        "activities": []
    }))
    .unwrap()
}

fn active_tabs(app: &App) -> usize {
    Tab::ALL.iter().filter(|t| app.view.is_active(**t)).count()
}

#[test]
fn exactly_one_tab_active_for_any_sequence() {
    let mut app = App::default();
    let steps: [fn(&mut App); 8] = [
        |a| a.select_tab(Tab::Spam),
        |a| a.select_spam_tab(SpamTab::Users),
        |a| a.select_tab(Tab::Search),
        |a| a.cycle_tab(true),
        |a| a.cycle_tab(false),
        |a| a.toggle_spam_tab(),
        |a| a.select_tab(Tab::Overview),
        |a| a.select_tab(Tab::Overview),
    ];
    for _ in 0..3 {
        for step in steps.iter() {
            step(&mut app);
            assert_eq!(active_tabs(&app), 1);
        }
    }
}

#[test]
fn each_switch_issues_one_fetch_for_tabs_with_a_source() {
    let mut app = App::default();
    for tab in [Tab::Spam, Tab::Overview, Tab::Spam, Tab::Spam, Tab::Search] {
        app.select_tab(tab);
        let requests = app.take_requests();
        let expected = match app.current_view() {
            View::Search => 0,
            _ => 1,
        };
        assert_eq!(requests.len(), expected, "after selecting {tab:?}");
    }
}

#[test]
fn spam_tab_loads_the_visible_sub_tab() {
    let mut app = App::default();
    app.select_spam_tab(SpamTab::Users);
    assert_eq!(app.take_requests()[0].1, FetchRequest::FlaggedSubjects);

    app.select_tab(Tab::Overview);
    app.take_requests();
    app.select_tab(Tab::Spam);
    assert_eq!(app.current_view(), View::Spam(SpamTab::Users));
    assert_eq!(app.take_requests()[0].1, FetchRequest::FlaggedSubjects);
}

#[test]
fn empty_search_is_rejected_locally() {
    let mut app = App::default();
    app.enter_search();
    assert_eq!(app.input_mode, InputMode::Search);
    app.search_input = "   ".to_string();
    app.submit_search();

    assert!(app.take_requests().is_empty());
    assert_eq!(app.lead, PanelState::Idle);
    let latest = app.notifications.latest().unwrap();
    assert_eq!(latest.level, NotifyLevel::Error);
    assert_eq!(latest.text, "Please enter a lead ID");
}

#[test]
fn last_resolving_response_wins() {
    let mut app = App::default();
    let first = app.search("a").unwrap();
    let second = app.search("b").unwrap();
    assert!(second > first);
    assert_eq!(app.take_requests().len(), 2);

    // the second request resolves first, the first one last
    app.apply_runtime_event(RuntimeEvent::Fetched {
        ticket: second,
        outcome: FetchOutcome::Lead {
            lead_id: "b".to_string(),
            result: Ok(lead("Bea")),
        },
    });
    app.apply_runtime_event(RuntimeEvent::Fetched {
        ticket: first,
        outcome: FetchOutcome::Lead {
            lead_id: "a".to_string(),
            result: Ok(lead("Ada")),
        },
    });

    assert_eq!(app.lead.loaded().map(|l| l.lead.name.as_str()), Some("Ada"));
}

#[test]
fn results_for_hidden_panels_still_land() {
    let mut app = App::default();
    app.select_tab(Tab::Spam);
    let (ticket, _) = app.take_requests().remove(0);
    app.select_tab(Tab::Overview);

    app.apply_runtime_event(RuntimeEvent::Fetched {
        ticket,
        outcome: FetchOutcome::FlaggedEvents(Ok(Vec::<FlaggedEvent>::new())),
    });
    assert_eq!(app.flagged_events, PanelState::Loaded(vec![]));
}

#[test]
fn lead_errors_stay_inline() {
    let mut app = App::default();
    let ticket = app.search("42").unwrap();
    app.apply_runtime_event(RuntimeEvent::Fetched {
        ticket,
        outcome: FetchOutcome::Lead {
            lead_id: "42".to_string(),
            result: Err(FetchError::Application {
                status: 404,
                message: "not found".to_string(),
            }),
        },
    });
    assert!(app.lead.failed().is_some());
    assert!(app.notifications.is_empty());
}

#[test]
fn summary_application_error_notifies() {
    let mut app = App::default();
    app.start();
    let (ticket, _) = app.take_requests().remove(0);
    app.apply_runtime_event(RuntimeEvent::Fetched {
        ticket,
        outcome: FetchOutcome::Summary(Err(FetchError::Application {
            status: 500,
            message: "db down".to_string(),
        })),
    });
    assert_eq!(
        app.notifications.latest().map(|n| n.text.as_str()),
        Some("Failed to load dashboard data")
    );
}

#[test]
fn worker_failure_becomes_notification() {
    let mut app = App::default();
    app.apply_runtime_event(RuntimeEvent::Error {
        message: "Worker exited: boom".to_string(),
    });
    assert_eq!(app.notifications.len(), 1);
}

#[test]
fn command_line_drives_navigation_and_search() {
    let mut app = App::default();

    app.enter_command();
    app.command_input = "spam users".to_string();
    app.apply_command();
    assert_eq!(app.current_view(), View::Spam(SpamTab::Users));
    assert_eq!(app.input_mode, InputMode::Normal);

    app.enter_command();
    app.command_input = "search  lead-7 ".to_string();
    app.apply_command();
    assert_eq!(app.current_view(), View::Search);
    let requests = app.take_requests();
    assert_eq!(
        requests.last().map(|(_, r)| r.clone()),
        Some(FetchRequest::Lead("lead-7".to_string()))
    );

    let action = app.execute_command(&parse_command("quit"));
    app.apply_action(action);
    assert!(app.should_quit);
}

#[test]
fn unknown_command_is_reported() {
    let mut app = App::default();
    app.command_input = "frobnicate".to_string();
    app.apply_command();
    let latest = app.notifications.latest().unwrap();
    assert_eq!(latest.text, "Unknown command: frobnicate");
}

#[test]
fn refresh_in_search_repeats_last_lookup() {
    let mut app = App::default();
    app.select_tab(Tab::Search);
    app.refresh();
    assert!(app.take_requests().is_empty());

    app.search("abc");
    app.take_requests();
    app.refresh();
    assert!(app.is_refreshing());
    assert_eq!(
        app.take_requests()[0].1,
        FetchRequest::Lead("abc".to_string())
    );
}

#[test]
fn escape_closes_popups_before_notifications() {
    let mut app = App::default();
    app.notify(NotifyLevel::Info, "hello");
    app.show_help = true;
    app.dismiss();
    assert!(!app.show_help);
    assert_eq!(app.notifications.len(), 1);
    app.dismiss();
    assert!(app.notifications.is_empty());
}
