//! Backoffice domain models and contracts
//!
//! This module defines the payloads served by the backoffice API, the
//! dashboard view state machine, and the request/outcome types exchanged
//! with the runtime worker. Nothing here knows about HTTP or the terminal.

mod fetch;
mod models;
mod view;

pub use fetch::{FetchError, FetchOutcome, FetchRequest, Ticket};
pub use models::{
    Activity, ActivityContent, ApiErrorBody, ContactMethod, DashboardSummary, FlaggedEvent,
    FlaggedSubject, Lead, LeadDetail, BLOCK_THRESHOLD,
};
pub use view::{DataSource, SpamTab, Tab, View, ViewState};
