//! Actions produced by key handlers and commands, applied by the app

use crate::domain::backoffice::{SpamTab, Tab};
use crate::modules::export::{ExportCategory, ExportFormat};

/// State changes requested from the dashboard controller
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No action needed
    None,

    /// Switch to a view
    Navigate(NavigateTarget),

    /// Look up a lead by id
    Search(String),

    /// Reload the active view
    Refresh,

    /// Write loaded data of a category to disk
    Export {
        category: ExportCategory,
        format: ExportFormat,
    },

    /// Show a transient notification
    Notify(String, NotifyLevel),

    ToggleHelp,

    ToggleSettings,

    /// Request quit
    Quit,
}

/// Navigation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigateTarget {
    Tab(Tab),
    Spam(SpamTab),
}

/// Notification levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Success,
    Error,
}

impl NotifyLevel {
    pub fn label(&self) -> &'static str {
        match self {
            NotifyLevel::Info => "info",
            NotifyLevel::Success => "success",
            NotifyLevel::Error => "error",
        }
    }
}
