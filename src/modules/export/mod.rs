//! Export Module
//!
//! Writes the currently loaded data of a category to disk.
//!
//! - 'e' key exports the active view as CSV
//! - `:export <category> [csv|json|html]` picks category and format
//! - Files are saved to the configured export directory with a timestamp

mod csv_export;
mod html_export;
mod json_export;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Local};
use thiserror::Error;
use tracing::{info, warn};

use crate::app::App;
use crate::core::{Action, NotifyLevel};
use crate::domain::backoffice::{
    DashboardSummary, FlaggedEvent, FlaggedSubject, LeadDetail, SpamTab, View,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportCategory {
    Summary,
    Lead,
    SpamActivities,
    SpamUsers,
}

impl ExportCategory {
    pub fn name(&self) -> &'static str {
        match self {
            ExportCategory::Summary => "summary",
            ExportCategory::Lead => "lead",
            ExportCategory::SpamActivities => "spam-activities",
            ExportCategory::SpamUsers => "spam-users",
        }
    }

    /// Category backing the given view
    pub fn for_view(view: View) -> ExportCategory {
        match view {
            View::Overview => ExportCategory::Summary,
            View::Search => ExportCategory::Lead,
            View::Spam(SpamTab::Activities) => ExportCategory::SpamActivities,
            View::Spam(SpamTab::Users) => ExportCategory::SpamUsers,
        }
    }
}

impl fmt::Display for ExportCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExportCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "summary" | "overview" | "analytics" => Ok(ExportCategory::Summary),
            "lead" => Ok(ExportCategory::Lead),
            "spam-activities" | "activities" | "spam" => Ok(ExportCategory::SpamActivities),
            "spam-users" | "users" => Ok(ExportCategory::SpamUsers),
            other => Err(format!(
                "Unknown export category '{other}' (use summary, lead, spam-activities, spam-users)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
    Html,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Html => "html",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "html" | "htm" => Ok(ExportFormat::Html),
            other => Err(format!("Unknown export format '{other}' (use csv, json, html)")),
        }
    }
}

/// Borrowed view of the loaded data to write
#[derive(Debug, Clone, Copy)]
pub enum ExportData<'a> {
    Summary(&'a DashboardSummary),
    Lead(&'a LeadDetail),
    SpamActivities(&'a [FlaggedEvent]),
    SpamUsers(&'a [FlaggedSubject]),
}

impl ExportData<'_> {
    pub fn category(&self) -> ExportCategory {
        match self {
            ExportData::Summary(_) => ExportCategory::Summary,
            ExportData::Lead(_) => ExportCategory::Lead,
            ExportData::SpamActivities(_) => ExportCategory::SpamActivities,
            ExportData::SpamUsers(_) => ExportCategory::SpamUsers,
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to create export directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub path: PathBuf,
    pub records: usize,
}

/// Generate a timestamped filename
fn generate_filename(prefix: &str, extension: &str, now: DateTime<Local>) -> String {
    let timestamp = now.format("%Y-%m-%d-%H%M%S");
    format!("{}-{}.{}", prefix, timestamp, extension)
}

/// Write `data` into `dir` (created if needed) in the given format
pub fn export_to_dir(
    dir: &Path,
    data: ExportData<'_>,
    format: ExportFormat,
    now: DateTime<Local>,
) -> Result<ExportReport, ExportError> {
    fs::create_dir_all(dir).map_err(|source| ExportError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let filename = generate_filename(data.category().name(), format.extension(), now);
    let path = dir.join(filename);

    let records = match format {
        ExportFormat::Csv => csv_export::write(&path, data)?,
        ExportFormat::Json => json_export::write(&path, data)?,
        ExportFormat::Html => html_export::write(&path, data)?,
    };

    Ok(ExportReport { path, records })
}

/// Loaded data for a category, if any
pub fn loaded_data(app: &App, category: ExportCategory) -> Option<ExportData<'_>> {
    match category {
        ExportCategory::Summary => app.summary.loaded().map(ExportData::Summary),
        ExportCategory::Lead => app.lead.loaded().map(ExportData::Lead),
        ExportCategory::SpamActivities => app
            .flagged_events
            .loaded()
            .map(|events| ExportData::SpamActivities(events.as_slice())),
        ExportCategory::SpamUsers => app
            .flagged_subjects
            .loaded()
            .map(|subjects| ExportData::SpamUsers(subjects.as_slice())),
    }
}

/// Export loaded data of `category` into the app's export directory
pub fn export_category(app: &App, category: ExportCategory, format: ExportFormat) -> Action {
    let Some(data) = loaded_data(app, category) else {
        return Action::Notify(
            format!("No {category} data loaded to export"),
            NotifyLevel::Error,
        );
    };

    match export_to_dir(&app.settings.export_dir, data, format, Local::now()) {
        Ok(report) => {
            info!(
                category = category.name(),
                records = report.records,
                path = %report.path.display(),
                "export written"
            );
            Action::Notify(
                format!(
                    "{category} data export completed: {}",
                    report.path.display()
                ),
                NotifyLevel::Success,
            )
        }
        Err(err) => {
            warn!(category = category.name(), error = %err, "export failed");
            Action::Notify(format!("Export failed: {err}"), NotifyLevel::Error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_categories_and_formats() {
        assert_eq!("users".parse(), Ok(ExportCategory::SpamUsers));
        assert_eq!("Spam-Activities".parse(), Ok(ExportCategory::SpamActivities));
        assert!("everything".parse::<ExportCategory>().is_err());
        assert_eq!("HTML".parse(), Ok(ExportFormat::Html));
        assert!("xml".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn filename_is_timestamped() {
        let now = Local.with_ymd_and_hms(2024, 5, 1, 9, 8, 7).unwrap();
        assert_eq!(
            generate_filename("spam-users", "csv", now),
            "spam-users-2024-05-01-090807.csv"
        );
    }

    #[test]
    fn view_maps_to_category() {
        assert_eq!(ExportCategory::for_view(View::Overview), ExportCategory::Summary);
        assert_eq!(
            ExportCategory::for_view(View::Spam(SpamTab::Users)),
            ExportCategory::SpamUsers
        );
    }
}
