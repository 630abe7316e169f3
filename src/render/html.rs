//! HTML serialization of rendered panels
//!
//! Every piece of dynamic text goes through [`escape`]. Names, phone numbers
//! and message bodies come from leads and must never be interpreted as markup.

use std::fmt::Write;

use super::panels::{Cell, LeadView, NoticeKind, Panel, SummaryView, TableView};

/// Escape text for use in element content and quoted attribute values
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

pub fn panel_to_html(panel: &Panel) -> String {
    match panel {
        Panel::Notice { kind, text } => {
            let class = match kind {
                NoticeKind::Loading | NoticeKind::Empty | NoticeKind::Hint => "loading",
                NoticeKind::Error => "error",
            };
            format!("<div class=\"{class}\">{}</div>", escape(text))
        }
        Panel::Table(table) => table_to_html(table),
        Panel::Lead(lead) => lead_to_html(lead),
    }
}

pub fn table_to_html(table: &TableView) -> String {
    let mut out = String::from("<table class=\"table\">\n<thead><tr>");
    for header in &table.headers {
        let _ = write!(out, "<th>{}</th>", escape(header));
    }
    out.push_str("</tr></thead>\n<tbody>\n");
    for row in &table.rows {
        out.push_str("<tr>");
        for cell in row {
            out.push_str(&cell_to_html(cell));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>");
    out
}

fn cell_to_html(cell: &Cell) -> String {
    let text = escape(&cell.text);
    match cell.tone.css_class() {
        Some(class) => format!("<td><span class=\"{class}\">{text}</span></td>"),
        None => format!("<td>{text}</td>"),
    }
}

pub fn lead_to_html(lead: &LeadView) -> String {
    let mut out = String::from("<div class=\"section\">\n<h3>Lead Information</h3>\n");
    for (label, value) in [
        ("Name", &lead.name),
        ("Created", &lead.created),
        ("Phone", &lead.phone),
        ("Email", &lead.email),
    ] {
        let _ = writeln!(
            out,
            "<div><strong>{label}:</strong> {}</div>",
            escape(value)
        );
    }
    let _ = writeln!(out, "<h4>Recent Messages ({})</h4>", lead.activity_count);
    out.push_str(&table_to_html(&lead.activities));
    out.push_str("\n</div>");
    out
}

pub fn summary_to_html(summary: &SummaryView) -> String {
    let mut cards = vec![
        ("Total Leads", &summary.total_leads),
        ("Messages Today", &summary.messages_today),
        ("Spam Rate", &summary.spam_percentage),
        ("Spam Users (30 days)", &summary.spam_users),
    ];
    if let Some(spam_today) = summary.spam_today.as_ref() {
        cards.push(("Spam Today", spam_today));
    }

    let mut out = String::from("<div class=\"stats\">\n");
    for (label, value) in cards {
        let _ = writeln!(
            out,
            "<div class=\"stat\"><span class=\"label\">{label}</span> <span class=\"value\">{}</span></div>",
            escape(value)
        );
    }
    let _ = write!(
        out,
        "<p class=\"muted\">Last updated: {}</p>\n</div>",
        escape(&summary.last_updated)
    );
    out
}

/// Standalone document around a rendered fragment
pub fn document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n<h1>{}</h1>\n{}\n</body>\n</html>\n",
        escape(title),
        escape(title),
        body
    )
}
