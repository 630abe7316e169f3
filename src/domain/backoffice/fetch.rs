//! Requests sent to the backoffice API and their outcomes

use thiserror::Error;

use super::models::{DashboardSummary, FlaggedEvent, FlaggedSubject, LeadDetail};
use super::view::DataSource;

/// Monotonic id attached to every request, used for logging and for the
/// refresh indicator. Tickets never discard a result.
pub type Ticket = u64;

/// Failure of a single request. Neither kind is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Non-2xx response carrying a server-supplied message
    #[error("{message}")]
    Application { status: u16, message: String },

    /// Network failure or unreadable response body
    #[error("{0}")]
    Transport(String),
}

impl FetchError {
    pub fn is_application(&self) -> bool {
        matches!(self, FetchError::Application { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    Summary,
    Lead(String),
    FlaggedEvents,
    FlaggedSubjects,
}

impl FetchRequest {
    pub fn label(&self) -> &'static str {
        match self {
            FetchRequest::Summary => "summary",
            FetchRequest::Lead(_) => "lead",
            FetchRequest::FlaggedEvents => "spam-activities",
            FetchRequest::FlaggedSubjects => "spam-users",
        }
    }
}

impl From<DataSource> for FetchRequest {
    fn from(source: DataSource) -> Self {
        match source {
            DataSource::Summary => FetchRequest::Summary,
            DataSource::FlaggedEvents => FetchRequest::FlaggedEvents,
            DataSource::FlaggedSubjects => FetchRequest::FlaggedSubjects,
        }
    }
}

#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Summary(Result<DashboardSummary, FetchError>),
    Lead {
        lead_id: String,
        result: Result<LeadDetail, FetchError>,
    },
    FlaggedEvents(Result<Vec<FlaggedEvent>, FetchError>),
    FlaggedSubjects(Result<Vec<FlaggedSubject>, FetchError>),
}

impl FetchOutcome {
    pub fn is_ok(&self) -> bool {
        match self {
            FetchOutcome::Summary(result) => result.is_ok(),
            FetchOutcome::Lead { result, .. } => result.is_ok(),
            FetchOutcome::FlaggedEvents(result) => result.is_ok(),
            FetchOutcome::FlaggedSubjects(result) => result.is_ok(),
        }
    }
}
