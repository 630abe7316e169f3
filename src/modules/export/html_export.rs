//! HTML Export
//!
//! Renders the same panels the terminal shows into a standalone page.

use std::fs;
use std::path::Path;

use super::{ExportData, ExportError};
use crate::render::{self, html};

pub fn write(path: &Path, data: ExportData<'_>) -> Result<usize, ExportError> {
    let (title, body, records) = match data {
        ExportData::Summary(summary) => (
            "Daily Summary",
            html::summary_to_html(&render::summary_view(summary)),
            1,
        ),
        ExportData::Lead(detail) => (
            "Lead Details",
            html::lead_to_html(&render::lead_view(detail)),
            detail.activities.len(),
        ),
        ExportData::SpamActivities(events) => (
            "Spam Activities (7 days)",
            html::panel_to_html(&render::flagged_events_table(events)),
            events.len(),
        ),
        ExportData::SpamUsers(subjects) => (
            "Spam Users (30 days)",
            html::panel_to_html(&render::flagged_subjects_table(subjects)),
            subjects.len(),
        ),
    };

    fs::write(path, html::document(title, &body))?;
    Ok(records)
}
