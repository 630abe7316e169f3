//! JSON Export
//!
//! Writes loaded records as pretty-printed JSON, in the shape the backend returned them.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use super::{ExportData, ExportError};

#[derive(Serialize)]
struct Exportable<'a, T: Serialize + ?Sized> {
    category: &'static str,
    records: usize,
    data: &'a T,
}

pub fn write(path: &Path, data: ExportData<'_>) -> Result<usize, ExportError> {
    let category = data.category().name();
    let (json, records) = match data {
        ExportData::Summary(summary) => (to_json(category, 1, summary)?, 1),
        ExportData::Lead(detail) => {
            let records = detail.activities.len();
            (to_json(category, records, detail)?, records)
        }
        ExportData::SpamActivities(events) => (to_json(category, events.len(), events)?, events.len()),
        ExportData::SpamUsers(subjects) => {
            (to_json(category, subjects.len(), subjects)?, subjects.len())
        }
    };

    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;

    Ok(records)
}

fn to_json<T: Serialize + ?Sized>(
    category: &'static str,
    records: usize,
    data: &T,
) -> Result<String, ExportError> {
    let exportable = Exportable {
        category,
        records,
        data,
    };
    Ok(serde_json::to_string_pretty(&exportable)?)
}
