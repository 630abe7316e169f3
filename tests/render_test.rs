//! Renderer properties over payloads shaped like the backend's

use backoffice::app::PanelState;
use backoffice::domain::backoffice::{DashboardSummary, FetchError, FlaggedEvent, LeadDetail};
use backoffice::render::{self, html, NoticeKind, Panel, Tone, EMPTY_EVENTS_MESSAGE};

fn lead_payload() -> LeadDetail {
    serde_json::from_str(
        r#"{
            "lead": {"name": "<b>Eve</b>", "created_at": "2024-05-01T10:00:00"},
            "contact_methods": [
                {"type": "email", "value": "eve@example.com"},
                {"type": "phone", "value": "+1 555 0100"},
                {"type": "phone", "value": "+1 555 0199"}
            ],
            "activities": [
                {"created_at": "2024-05-01T10:01:00", "direction": "inbound",
                 "content": {"leadMessage": "hi\u001b[2J", "assistantMessage": "hello"}},
                {"created_at": "2024-05-01T10:02:00", "direction": "outbound"}
            ]
        }"#,
    )
    .unwrap()
}

#[test]
fn total_leads_is_grouped() {
    let summary: DashboardSummary = serde_json::from_str(
        r#"{"total_leads":1234,"messages_today":0,"spam_percentage":0,"spam_users":0,"last_updated":""}"#,
    )
    .unwrap();
    let view = render::summary_view(&summary);
    assert_eq!(view.total_leads, "1,234");
    assert_eq!(view.spam_today, None);
}

#[test]
fn lead_view_uses_first_contact_of_each_type() {
    let view = render::lead_view(&lead_payload());
    assert_eq!(view.phone, "+1 555 0100");
    assert_eq!(view.email, "eve@example.com");
    assert_eq!(view.activity_count, 2);

    let rows = &view.activities.rows;
    assert_eq!(rows[0][1].text, "In");
    assert_eq!(rows[0][1].tone, Tone::Inbound);
    assert_eq!(rows[1][1].text, "Out");
    // missing content renders N/A in both columns
    assert_eq!(rows[1][2].text, "N/A");
    assert_eq!(rows[1][3].text, "N/A");
}

#[test]
fn terminal_text_has_no_escape_sequences() {
    let view = render::lead_view(&lead_payload());
    let message = &view.activities.rows[0][2].text;
    assert_eq!(message, "hi[2J");
    assert!(!message.contains('\u{1b}'));
}

#[test]
fn html_lead_is_escaped() {
    let fragment = html::lead_to_html(&render::lead_view(&lead_payload()));
    assert!(fragment.contains("&lt;b&gt;Eve&lt;/b&gt;"));
    assert!(!fragment.contains("<b>Eve</b>"));
    assert!(fragment.contains("Recent Messages (2)"));
}

#[test]
fn empty_events_show_message_not_table() {
    let events: Vec<FlaggedEvent> = serde_json::from_str("[]").unwrap();
    let panel = render::flagged_events_panel(&PanelState::Loaded(events));
    assert_eq!(
        panel,
        Panel::Notice {
            kind: NoticeKind::Empty,
            text: EMPTY_EVENTS_MESSAGE.to_string()
        }
    );
    assert_eq!(
        html::panel_to_html(&panel),
        "<div class=\"loading\">No spam activities found in the last 7 days.</div>"
    );
}

#[test]
fn loading_and_idle_notices() {
    assert_eq!(
        render::flagged_subjects_panel(&PanelState::Loading),
        Panel::Notice {
            kind: NoticeKind::Loading,
            text: "Loading spam users...".to_string()
        }
    );
    assert!(matches!(
        render::lead_panel(&PanelState::Idle),
        Panel::Notice {
            kind: NoticeKind::Hint,
            ..
        }
    ));
}

#[test]
fn summary_failure_is_an_inline_notice() {
    let failed = PanelState::<DashboardSummary>::Failed(FetchError::Application {
        status: 503,
        message: "maintenance <b>".to_string(),
    });
    let panel = render::summary_panel(&failed).unwrap();
    assert_eq!(
        panel,
        Panel::Notice {
            kind: NoticeKind::Error,
            text: "Failed to load dashboard data: maintenance <b>".to_string()
        }
    );
    assert!(html::panel_to_html(&panel).contains("maintenance &lt;b&gt;"));

    assert_eq!(render::summary_panel(&PanelState::Loading), None);
}
