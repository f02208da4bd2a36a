//! Pure renderers turning backend data into panel markup.
//!
//! Every server-sourced string passes through [`escape_html`] before it is
//! placed into markup.

use std::fmt::Write as _;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime, Timelike, Utc};
use shared::domain::{HistoryRecord, ModelOption};

pub const DEFAULT_MARKER: &str = " (기본)";
pub const NO_HISTORY_MARKUP: &str = r#"<p class="no-history">저장된 이력이 없습니다.</p>"#;
pub const HISTORY_COLUMNS: [&str; 5] = ["ID", "시간 (UTC)", "모델", "파일명", "라벨"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSettings {
    pub output_prefix: String,
    pub display_offset: FixedOffset,
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

pub fn render_model_options(names: &[String], default_name: &str) -> Vec<ModelOption> {
    names
        .iter()
        .map(|name| ModelOption {
            value: name.clone(),
            label: if name == default_name {
                format!("{name}{DEFAULT_MARKER}")
            } else {
                name.clone()
            },
        })
        .collect()
}

pub fn output_image_src(output_prefix: &str, output_image: &str) -> String {
    format!("{}/{}", output_prefix.trim_end_matches('/'), output_image)
}

pub fn render_result(labels: &[String], output_image: &str, output_prefix: &str) -> String {
    let mut html = format!("<h2>감지된 객체 ({}개)</h2>\n", labels.len());
    html.push_str(r#"<ul class="label-list">"#);
    for label in labels {
        let _ = write!(html, "<li>{}</li>", escape_html(label));
    }
    html.push_str("</ul>\n");
    let _ = write!(
        html,
        r#"<img src="{}" class="result-img"/>"#,
        escape_html(&output_image_src(output_prefix, output_image))
    );
    html
}

pub fn render_history(records: &[HistoryRecord], display_offset: FixedOffset) -> String {
    if records.is_empty() {
        return NO_HISTORY_MARKUP.to_string();
    }

    let mut html = String::from("<table class=\"history-table\">\n<thead>\n<tr>");
    for column in HISTORY_COLUMNS {
        let _ = write!(html, "<th>{column}</th>");
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for record in records {
        let timestamp = format_timestamp(&record.timestamp, display_offset)
            .unwrap_or_else(|| record.timestamp.clone());
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td><ul class=\"history-label-list\">",
            record.id,
            escape_html(&timestamp),
            escape_html(&record.model),
            escape_html(&record.filename),
        );
        for label in &record.labels {
            let _ = write!(html, "<li>{}</li>", escape_html(label));
        }
        html.push_str("</ul></td></tr>\n");
    }

    html.push_str("</tbody>\n</table>");
    html
}

/// Accepts RFC 3339 timestamps and offset-less ISO-8601 date-times, the
/// latter read as UTC.
pub fn parse_utc_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    raw.parse::<NaiveDateTime>().ok().map(|naive| naive.and_utc())
}

/// Korean locale presentation, e.g. `2024. 5. 1. 오후 9:30:00`.
pub fn format_timestamp(raw: &str, display_offset: FixedOffset) -> Option<String> {
    let local = parse_utc_timestamp(raw)?.with_timezone(&display_offset);
    let (is_pm, hour) = local.hour12();
    let meridiem = if is_pm { "오후" } else { "오전" };
    Some(format!(
        "{}. {}. {}. {} {}:{:02}:{:02}",
        local.year(),
        local.month(),
        local.day(),
        meridiem,
        hour,
        local.minute(),
        local.second()
    ))
}
