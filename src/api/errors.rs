//! Turns failed upstream responses and caught errors into one readable line.

use reqwest::{Response, StatusCode};
use serde_json::Value;

/// Fields checked for an error detail, in order of precedence.
const DETAIL_FIELDS: [&str; 3] = ["error", "message", "name"];

/// Describe a failed response as `"<fallback> (<status>): <detail>"`.
///
/// Never fails: an unreadable body degrades to the status text.
pub async fn error_message(response: Response, fallback: &str) -> String {
    let status = response.status();
    let body = response.text().await.ok();
    describe_failure(status, body.as_deref(), fallback)
}

/// Body-level half of [`error_message`], split out so it can run on captured data.
pub fn describe_failure(status: StatusCode, body: Option<&str>, fallback: &str) -> String {
    let detail = body
        .and_then(detail_from_body)
        .unwrap_or_else(|| status_text(status).to_string());
    format!("{} ({}): {}", fallback, status.as_u16(), detail)
}

/// Describe a caught error as `"<context>: <message>"`.
pub fn exception_message(error: &dyn std::fmt::Display, context: &str) -> String {
    format!("{}: {}", context, error)
}

fn status_text(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("")
}

fn detail_from_body(body: &str) -> Option<String> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => DETAIL_FIELDS
            .iter()
            .find_map(|field| map.get(*field).filter(|v| !v.is_null()))
            .filter(|detail| is_truthy(detail))
            .map(render_detail),
        // `null` has no fields to read, so it is reported like unparsable text.
        Ok(Value::Null) | Err(_) => (!body.is_empty()).then(|| body.to_string()),
        // Other valid JSON without a usable detail reports the status text.
        Ok(_) => None,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn render_detail(detail: &Value) -> String {
    match detail {
        Value::Array(items) => items
            .iter()
            .map(render_item)
            .collect::<Vec<_>>()
            .join("; "),
        other => render_item(other),
    }
}

fn render_item(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
