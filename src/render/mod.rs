//! Pure renderer
//!
//! Turns fetched data (or the state of a pending fetch) into display models.
//! The terminal UI draws these models and the HTML exporter serializes them,
//! so both surfaces show the same text.

pub mod format;
pub mod html;
mod panels;

pub use panels::{
    flagged_events_panel, flagged_events_table, flagged_subjects_panel, flagged_subjects_table,
    lead_panel, lead_view, summary_panel, summary_placeholder, summary_view, Cell, LeadView, NoticeKind, Panel,
    SummaryView, TableView, Tone, EMPTY_EVENTS_MESSAGE, EMPTY_SUBJECTS_MESSAGE,
};
