//! CSV Export
//!
//! Writes the summary, a lead's activity history, and spam records to CSV files.

use std::path::Path;

use super::{ExportData, ExportError};
use crate::domain::backoffice::{DashboardSummary, FlaggedEvent, FlaggedSubject, LeadDetail};

pub fn write(path: &Path, data: ExportData<'_>) -> Result<usize, ExportError> {
    let mut wtr = csv::Writer::from_path(path)?;
    let records = match data {
        ExportData::Summary(summary) => write_summary(&mut wtr, summary)?,
        ExportData::Lead(detail) => write_lead(&mut wtr, detail)?,
        ExportData::SpamActivities(events) => write_events(&mut wtr, events)?,
        ExportData::SpamUsers(subjects) => write_subjects(&mut wtr, subjects)?,
    };
    wtr.flush()?;
    Ok(records)
}

fn write_summary<W: std::io::Write>(
    wtr: &mut csv::Writer<W>,
    summary: &DashboardSummary,
) -> Result<usize, ExportError> {
    wtr.write_record([
        "total_leads",
        "messages_today",
        "spam_percentage",
        "spam_users",
        "spam_today",
        "last_updated",
    ])?;
    wtr.write_record([
        summary.total_leads.to_string(),
        summary.messages_today.to_string(),
        summary.spam_percentage.to_string(),
        summary.spam_users.to_string(),
        summary
            .spam_today
            .map(|n| n.to_string())
            .unwrap_or_default(),
        summary.last_updated.clone(),
    ])?;
    Ok(1)
}

/// One row per activity, with the lead's identity repeated on each row
fn write_lead<W: std::io::Write>(
    wtr: &mut csv::Writer<W>,
    detail: &LeadDetail,
) -> Result<usize, ExportError> {
    wtr.write_record([
        "lead_name",
        "phone",
        "email",
        "created_at",
        "direction",
        "lead_message",
        "assistant_message",
    ])?;

    let name = detail.lead.name.as_str();
    let phone = detail.phone().unwrap_or_default();
    let email = detail.email().unwrap_or_default();

    for activity in &detail.activities {
        let direction = if activity.is_inbound() { "in" } else { "out" };
        wtr.write_record([
            name,
            phone,
            email,
            activity.created_at.as_deref().unwrap_or_default(),
            direction,
            activity.lead_message().unwrap_or_default(),
            activity.assistant_message().unwrap_or_default(),
        ])?;
    }
    Ok(detail.activities.len())
}

fn write_events<W: std::io::Write>(
    wtr: &mut csv::Writer<W>,
    events: &[FlaggedEvent],
) -> Result<usize, ExportError> {
    wtr.write_record([
        "spam_date",
        "lead_name",
        "phone",
        "message",
        "spam_reason",
        "flagged_by",
    ])?;

    for event in events {
        wtr.write_record([
            event.spam_date.as_str(),
            event.lead_name.as_str(),
            event.phone.as_str(),
            event.message.as_deref().unwrap_or_default(),
            event.spam_reason.as_str(),
            event.flagged_by.as_str(),
        ])?;
    }
    Ok(events.len())
}

fn write_subjects<W: std::io::Write>(
    wtr: &mut csv::Writer<W>,
    subjects: &[FlaggedSubject],
) -> Result<usize, ExportError> {
    wtr.write_record([
        "lead_name",
        "phone",
        "spam_count_30_days",
        "first_spam",
        "last_spam",
        "is_blocked",
    ])?;

    for subject in subjects {
        wtr.write_record([
            subject.lead_name.clone(),
            subject.phone.clone(),
            subject.spam_count_30_days.to_string(),
            subject.first_spam.clone().unwrap_or_default(),
            subject.last_spam.clone().unwrap_or_default(),
            subject.is_blocked.to_string(),
        ])?;
    }
    Ok(subjects.len())
}
