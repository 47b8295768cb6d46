//! Human-readable diagnostics for incoming uploads
//!
//! Everything here is best-effort logging; nothing is validated.

use axum::http::HeaderMap;
use chrono::{DateTime, Local};

use super::storage::StoredPhoto;

/// Characters of the Authorization header kept in logs
const AUTH_VISIBLE_CHARS: usize = 20;

const RULE_WIDTH: usize = 60;

/// Render a header value for logging, truncating credentials
pub fn display_header_value(name: &str, value: &str) -> String {
    if name.eq_ignore_ascii_case("authorization") && value.chars().count() > AUTH_VISIBLE_CHARS {
        let visible: String = value.chars().take(AUTH_VISIBLE_CHARS).collect();
        format!("{}...", visible)
    } else {
        value.to_string()
    }
}

/// Format a byte count as `1,234 bytes (1.2 KB)`
pub fn format_size(bytes: u64) -> String {
    format!(
        "{} bytes ({:.1} KB)",
        group_thousands(bytes),
        bytes as f64 / 1024.0
    )
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Log the arrival of an upload together with its headers
pub fn log_upload_received(at: &DateTime<Local>, headers: &HeaderMap) {
    let rule = "=".repeat(RULE_WIDTH);
    tracing::info!("{}", rule);
    tracing::info!(
        "Photo upload received at {}",
        at.format("%Y-%m-%d %H:%M:%S")
    );
    tracing::info!("{}", rule);

    tracing::info!("Headers:");
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes());
        tracing::info!("  {}: {}", name, display_header_value(name.as_str(), &value));
    }
}

/// Log the plain (non-file) form fields of an upload
pub fn log_form_fields(fields: &[(String, String)]) {
    tracing::info!("Form data:");
    for (name, value) in fields {
        tracing::info!("  {}: {}", name, value);
    }
}

/// Log a successfully stored photo
pub fn log_saved(photo: &StoredPhoto) {
    tracing::info!("Photo saved successfully");
    tracing::info!("  Filename: {}", photo.filename);
    tracing::info!("  Size: {}", format_size(photo.size));
    tracing::info!("  Path: {}", photo.path.display());
    tracing::info!("{}", "=".repeat(RULE_WIDTH));
}
