//! Shared reqwest plumbing for the HTTP adapters.

use std::time::Duration;

use reqwest::{Client, StatusCode};

const PREVIEW_CHAR_LIMIT: usize = 160;

/// Build the client shared by every adapter.
///
/// `timeout` of `None` leaves requests unbounded.
///
/// # Errors
///
/// Returns an error when the reqwest client cannot be constructed.
pub fn build_client(user_agent: &str, timeout: Option<Duration>) -> Result<Client, reqwest::Error> {
    let builder = Client::builder().user_agent(user_agent);
    match timeout {
        Some(timeout) => builder.timeout(timeout).build(),
        None => builder.build(),
    }
}

/// Human-readable summary of a non-success response.
pub(crate) fn status_message(status: StatusCode, body: &[u8]) -> String {
    let preview = body_preview(body);
    if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {preview}", status.as_u16())
    }
}

/// Whitespace-collapsed, truncated view of a response body.
pub(crate) fn body_preview(body: &[u8]) -> String {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
