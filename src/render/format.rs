//! Text formatting helpers shared by the renderer

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

pub const NOT_AVAILABLE: &str = "N/A";

/// Group digits in threes with commas: `1234567` -> `"1,234,567"`
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// One decimal place followed by `%`
pub fn percentage(value: f64) -> String {
    if value.is_finite() {
        format!("{:.1}%", value)
    } else {
        "--".to_string()
    }
}

/// Backend timestamps in local time, `YYYY-MM-DD HH:MM:SS`.
///
/// Values without an offset are taken as local time. Anything unparseable is
/// shown as received.
pub fn timestamp(raw: &str) -> String {
    match parse_local(raw) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => display_text(raw),
    }
}

pub fn optional_timestamp(raw: Option<&str>) -> String {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => timestamp(raw),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Local calendar date, `YYYY-MM-DD`, or `N/A` when absent
pub fn date(raw: Option<&str>) -> String {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => match parse_local(raw) {
            Some(dt) => dt.format("%Y-%m-%d").to_string(),
            None => display_text(raw),
        },
        None => NOT_AVAILABLE.to_string(),
    }
}

fn parse_local(raw: &str) -> Option<DateTime<Local>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Local.from_local_datetime(&naive).earliest();
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
}

/// Untrusted text made safe for a terminal cell.
///
/// Control characters (including ESC, which would start an ANSI sequence)
/// are dropped; line breaks and tabs collapse to a space.
pub fn display_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\n' | '\r' | '\t' => out.push(' '),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

/// Display text, or `N/A` for a missing or empty value
pub fn or_na(raw: Option<&str>) -> String {
    match raw.filter(|s| !s.trim().is_empty()) {
        Some(raw) => display_text(raw),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    value.chars().take(max).collect::<String>() + "…"
}
