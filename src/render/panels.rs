use crate::app::PanelState;
use crate::domain::backoffice::{
    Activity, DashboardSummary, FetchError, FlaggedEvent, FlaggedSubject, LeadDetail,
};

use super::format::{self, display_text, or_na};

pub const EMPTY_EVENTS_MESSAGE: &str = "No spam activities found in the last 7 days.";
pub const EMPTY_SUBJECTS_MESSAGE: &str = "No spam users found in the last 30 days.";

/// Visual emphasis of a cell; each surface maps it to its own styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Muted,
    Inbound,
    Outbound,
    Danger,
    Warning,
}

impl Tone {
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            Tone::Plain => None,
            Tone::Muted => Some("muted"),
            Tone::Inbound => Some("inbound"),
            Tone::Outbound => Some("outbound"),
            Tone::Danger => Some("danger"),
            Tone::Warning => Some("warning"),
        }
    }
}

/// Already-sanitized cell text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub tone: Tone,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Plain,
        }
    }

    pub fn toned(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Loading,
    Empty,
    Error,
    Hint,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadView {
    pub name: String,
    pub created: String,
    pub phone: String,
    pub email: String,
    pub activity_count: usize,
    pub activities: TableView,
}

/// What a result area shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Panel {
    Notice { kind: NoticeKind, text: String },
    Table(TableView),
    Lead(LeadView),
}

impl Panel {
    fn notice(kind: NoticeKind, text: impl Into<String>) -> Self {
        Panel::Notice {
            kind,
            text: text.into(),
        }
    }

    fn error(prefix: &str, err: &FetchError) -> Self {
        Panel::notice(
            NoticeKind::Error,
            format!("{prefix}: {}", display_text(&err.to_string())),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    pub total_leads: String,
    pub messages_today: String,
    pub spam_percentage: String,
    pub spam_users: String,
    pub spam_today: Option<String>,
    pub last_updated: String,
}

pub fn summary_view(summary: &DashboardSummary) -> SummaryView {
    SummaryView {
        total_leads: format::group_thousands(summary.total_leads),
        messages_today: format::group_thousands(summary.messages_today),
        spam_percentage: format::percentage(summary.spam_percentage),
        spam_users: format::group_thousands(summary.spam_users),
        spam_today: summary.spam_today.map(format::group_thousands),
        last_updated: format::optional_timestamp(Some(summary.last_updated.as_str())),
    }
}

/// Stat cards before the first summary arrives or after a failed load
pub fn summary_placeholder() -> SummaryView {
    SummaryView {
        total_leads: "--".to_string(),
        messages_today: "--".to_string(),
        spam_percentage: "--".to_string(),
        spam_users: "--".to_string(),
        spam_today: None,
        last_updated: "--".to_string(),
    }
}

/// Inline error shown in place of the stat cards after a failed load
pub fn summary_panel(state: &PanelState<DashboardSummary>) -> Option<Panel> {
    match state {
        PanelState::Failed(err) if err.is_application() => {
            Some(Panel::error("Failed to load dashboard data", err))
        }
        PanelState::Failed(err) => Some(Panel::error("Error loading dashboard", err)),
        _ => None,
    }
}

pub fn lead_panel(state: &PanelState<LeadDetail>) -> Panel {
    match state {
        PanelState::Idle => Panel::notice(
            NoticeKind::Hint,
            "Enter a lead ID and press Enter to search.",
        ),
        PanelState::Loading => Panel::notice(NoticeKind::Loading, "Searching lead..."),
        PanelState::Failed(err) if err.is_application() => Panel::error("Lead not found", err),
        PanelState::Failed(err) => Panel::error("Error searching lead", err),
        PanelState::Loaded(detail) => Panel::Lead(lead_view(detail)),
    }
}

pub fn lead_view(detail: &LeadDetail) -> LeadView {
    let rows = detail.activities.iter().map(activity_row).collect();
    LeadView {
        name: or_na(Some(detail.lead.name.as_str())),
        created: format::optional_timestamp(detail.lead.created_at.as_deref()),
        phone: or_na(detail.phone()),
        email: or_na(detail.email()),
        activity_count: detail.activities.len(),
        activities: TableView {
            headers: vec!["Date", "Direction", "Message", "Response"],
            rows,
        },
    }
}

fn activity_row(activity: &Activity) -> Vec<Cell> {
    let direction = if activity.is_inbound() {
        Cell::toned("In", Tone::Inbound)
    } else {
        Cell::toned("Out", Tone::Outbound)
    };
    vec![
        Cell::toned(
            format::optional_timestamp(activity.created_at.as_deref()),
            Tone::Muted,
        ),
        direction,
        Cell::plain(or_na(activity.lead_message())),
        Cell::plain(or_na(activity.assistant_message())),
    ]
}

pub fn flagged_events_panel(state: &PanelState<Vec<FlaggedEvent>>) -> Panel {
    match state {
        PanelState::Idle => Panel::notice(NoticeKind::Hint, "Press r to load spam activities."),
        PanelState::Loading => Panel::notice(NoticeKind::Loading, "Loading spam activities..."),
        PanelState::Failed(err) if err.is_application() => {
            Panel::error("Failed to load spam activities", err)
        }
        PanelState::Failed(err) => Panel::error("Error loading spam activities", err),
        PanelState::Loaded(events) => flagged_events_table(events),
    }
}

/// Table of flagged events, or the no-records notice when empty
pub fn flagged_events_table(events: &[FlaggedEvent]) -> Panel {
    if events.is_empty() {
        return Panel::notice(NoticeKind::Empty, EMPTY_EVENTS_MESSAGE);
    }
    let rows = events
        .iter()
        .map(|event| {
            vec![
                Cell::toned(format::timestamp(&event.spam_date), Tone::Muted),
                Cell::plain(display_text(&event.lead_name)),
                Cell::plain(display_text(&event.phone)),
                Cell::plain(or_na(event.message.as_deref())),
                Cell::toned(display_text(&event.spam_reason), Tone::Danger),
                Cell::plain(display_text(&event.flagged_by)),
            ]
        })
        .collect();
    Panel::Table(TableView {
        headers: vec!["Date", "Lead", "Phone", "Message", "Reason", "Flagged By"],
        rows,
    })
}

pub fn flagged_subjects_panel(state: &PanelState<Vec<FlaggedSubject>>) -> Panel {
    match state {
        PanelState::Idle => Panel::notice(NoticeKind::Hint, "Press r to load spam users."),
        PanelState::Loading => Panel::notice(NoticeKind::Loading, "Loading spam users..."),
        PanelState::Failed(err) if err.is_application() => {
            Panel::error("Failed to load spam users", err)
        }
        PanelState::Failed(err) => Panel::error("Error loading spam users", err),
        PanelState::Loaded(subjects) => flagged_subjects_table(subjects),
    }
}

/// Table of flagged subjects, or the no-records notice when empty
pub fn flagged_subjects_table(subjects: &[FlaggedSubject]) -> Panel {
    if subjects.is_empty() {
        return Panel::notice(NoticeKind::Empty, EMPTY_SUBJECTS_MESSAGE);
    }
    let rows = subjects
        .iter()
        .map(|subject| {
            let count_tone = if subject.is_severe() {
                Tone::Danger
            } else {
                Tone::Warning
            };
            let status = if subject.is_blocked {
                Cell::toned("Blocked", Tone::Danger)
            } else {
                Cell::toned("Warning", Tone::Warning)
            };
            vec![
                Cell::plain(display_text(&subject.lead_name)),
                Cell::plain(display_text(&subject.phone)),
                Cell::toned(
                    format::group_thousands(subject.spam_count_30_days),
                    count_tone,
                ),
                Cell::toned(format::date(subject.first_spam.as_deref()), Tone::Muted),
                Cell::toned(format::date(subject.last_spam.as_deref()), Tone::Muted),
                status,
            ]
        })
        .collect();
    Panel::Table(TableView {
        headers: vec![
            "Lead Name",
            "Phone",
            "Spam Count (30 days)",
            "First Spam",
            "Last Spam",
            "Status",
        ],
        rows,
    })
}
