//! Uniform tool replies: one text block, optionally flagged as an error.

use reqwest::Response;
use rmcp::model::{CallToolResult, Content};
use serde_json::Value;

use crate::api::{error_message, exception_message, format_data};

pub fn success_response(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

/// Success reply carrying `data` through the response formatter.
pub fn data_response(data: Value) -> CallToolResult {
    success_response(format_data(data))
}

pub fn error_response(text: impl Into<String>) -> CallToolResult {
    CallToolResult::error(vec![Content::text(text.into())])
}

/// Error reply for a non-2xx upstream response.
pub async fn api_error_response(response: Response, fallback: &str) -> CallToolResult {
    error_response(error_message(response, fallback).await)
}

/// Error reply for a failure raised while handling the call.
pub fn catch_error(error: &dyn std::fmt::Display, context: &str) -> CallToolResult {
    error_response(exception_message(error, context))
}

/// First text block of a reply, if any.
pub fn reply_text(result: &CallToolResult) -> Option<&str> {
    result
        .content
        .iter()
        .find_map(|content| content.as_text().map(|t| t.text.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_response_formats_payload() {
        let result = data_response(json!({"id": 1, "notes": null}));
        assert_eq!(result.is_error, Some(false));
        assert_eq!(reply_text(&result), Some(r#"{"id":1}"#));
    }

    #[test]
    fn test_error_response_is_flagged() {
        let result = error_response("Failed to get tags (500): boom");
        assert_eq!(result.is_error, Some(true));
        assert_eq!(reply_text(&result), Some("Failed to get tags (500): boom"));
    }

    #[test]
    fn test_catch_error_prefixes_context() {
        let result = catch_error(&"connection reset", "Failed to get user");
        assert_eq!(reply_text(&result), Some("Failed to get user: connection reset"));
    }
}
