//! End-to-end tool calls: registry, handler, dispatcher and a stub upstream.

#![cfg(test)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use rmcp::model::JsonObject;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::api::ApiClient;
use crate::config::Config;
use crate::tools::envelope::reply_text;
use crate::tools::{ToolRegistry, register_all};

fn registry_for(server: &MockServer) -> ToolRegistry {
    let config = Config::new(Some("integration-token".to_string()))
        .unwrap()
        .with_base_url(server.uri());
    register_all(Arc::new(ApiClient::new(Arc::new(config))))
}

fn args(value: Value) -> JsonObject {
    match value {
        Value::Object(map) => map,
        other => panic!("arguments must be an object, got {other}"),
    }
}

#[tokio::test]
async fn test_rate_limited_call_is_retried_after_retry_after() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "1"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("authorization", "Bearer integration-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let started = Instant::now();
    let result = registry_for(&server)
        .call_tool("get_user", JsonObject::new())
        .await
        .unwrap();

    assert!(started.elapsed() >= Duration::from_millis(900));
    assert_eq!(result.is_error, Some(false));
    assert_eq!(reply_text(&result), Some(r#"{"ok":true}"#));
}

#[tokio::test]
async fn test_upstream_error_detail_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/budgets"))
        .and(query_param("start_date", "2024-04-01"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({"error": "Invalid date"})))
        .mount(&server)
        .await;

    let result = registry_for(&server)
        .call_tool(
            "get_budget_summary",
            args(json!({"start_date": "2024-04-01", "end_date": "2024-04-30"})),
        )
        .await
        .unwrap();

    assert_eq!(result.is_error, Some(true));
    assert_eq!(
        reply_text(&result),
        Some("Failed to get budget summary (422): Invalid date")
    );
}

#[tokio::test]
async fn test_empty_error_body_falls_back_to_status_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tags"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let result = registry_for(&server)
        .call_tool("get_all_tags", JsonObject::new())
        .await
        .unwrap();

    assert_eq!(result.is_error, Some(true));
    assert_eq!(
        reply_text(&result),
        Some("Failed to get tags (500): Internal Server Error")
    );
}

#[tokio::test]
async fn test_transport_failure_becomes_error_reply() {
    let config = Config::new(Some("tok".to_string()))
        .unwrap()
        .with_base_url("http://127.0.0.1:1");
    let registry = register_all(Arc::new(ApiClient::new(Arc::new(config))));

    let result = registry
        .call_tool("get_all_crypto", JsonObject::new())
        .await
        .unwrap();

    assert_eq!(result.is_error, Some(true));
    let text = reply_text(&result).unwrap();
    assert!(text.starts_with("Failed to get crypto assets: "), "{text}");
}

#[tokio::test]
async fn test_invalid_arguments_never_reach_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let registry = registry_for(&server);

    let bad_date = registry
        .call_tool(
            "get_transactions",
            args(json!({"start_date": "2024/01/01", "end_date": "2024-01-31"})),
        )
        .await
        .unwrap();
    assert_eq!(bad_date.is_error, Some(true));
    assert_eq!(
        reply_text(&bad_date),
        Some("Invalid arguments: start_date must be YYYY-MM-DD format")
    );

    let missing_field = registry
        .call_tool("get_single_transaction", JsonObject::new())
        .await
        .unwrap();
    assert_eq!(missing_field.is_error, Some(true));
    assert!(
        reply_text(&missing_field)
            .unwrap()
            .starts_with("Invalid arguments: ")
    );
}

#[tokio::test]
async fn test_single_field_is_extracted_and_nulls_dropped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/crypto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "crypto": [{"id": 1, "balance": "0.5", "institution_name": null}]
        })))
        .mount(&server)
        .await;

    let result = registry_for(&server)
        .call_tool("get_all_crypto", JsonObject::new())
        .await
        .unwrap();

    assert_eq!(result.is_error, Some(false));
    assert_eq!(reply_text(&result), Some(r#"[{"balance":"0.5","id":1}]"#));
}

#[tokio::test]
async fn test_transactions_reply_keeps_listing_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/transactions"))
        .and(query_param("start_date", "2024-01-01"))
        .and(query_param("end_date", "2024-01-31"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "transactions": [{"id": 9, "payee": "Cafe"}],
            "has_more": false,
            "debug": "dropped"
        })))
        .mount(&server)
        .await;

    let result = registry_for(&server)
        .call_tool(
            "get_transactions",
            args(json!({"start_date": "2024-01-01", "end_date": "2024-01-31"})),
        )
        .await
        .unwrap();

    assert_eq!(
        reply_text(&result),
        Some(r#"{"has_more":false,"transactions":[{"id":9,"payee":"Cafe"}]}"#)
    );
}

#[tokio::test]
async fn test_confirmation_message_ignores_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/transactions/split/55"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([56, 57])))
        .expect(1)
        .mount(&server)
        .await;

    let result = registry_for(&server)
        .call_tool("unsplit_transaction", args(json!({"transaction_id": 55})))
        .await
        .unwrap();

    assert_eq!(result.is_error, Some(false));
    assert_eq!(reply_text(&result), Some("Transaction unsplit successfully"));
}

#[tokio::test]
async fn test_write_sends_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/crypto/manual/3"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"balance": "1.25"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 3, "balance": "1.25"})))
        .expect(1)
        .mount(&server)
        .await;

    let result = registry_for(&server)
        .call_tool(
            "update_manual_crypto",
            args(json!({"crypto_id": 3, "balance": 1.25})),
        )
        .await
        .unwrap();

    assert_eq!(reply_text(&result), Some(r#"{"balance":"1.25","id":3}"#));
}

#[tokio::test]
async fn test_catalog_is_complete_and_sorted() {
    let server = MockServer::start().await;
    let registry = registry_for(&server);

    assert_eq!(registry.len(), 33);
    let names: Vec<String> = registry
        .list_tools()
        .into_iter()
        .map(|tool| tool.name.to_string())
        .collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);

    for name in [
        "get_user",
        "get_all_categories",
        "force_delete_category",
        "get_all_tags",
        "bulk_delete_transactions",
        "get_recurring_items",
        "remove_budget",
        "update_asset",
        "trigger_plaid_fetch",
        "update_manual_crypto",
    ] {
        assert!(registry.contains(name), "missing {name}");
    }
}

#[tokio::test]
async fn test_listed_tools_carry_schema_and_hints() {
    let server = MockServer::start().await;
    let tools = registry_for(&server).list_tools();

    let get_user = tools.iter().find(|t| t.name == "get_user").unwrap();
    assert_eq!(
        get_user.annotations.as_ref().and_then(|a| a.read_only_hint),
        Some(true)
    );

    let delete = tools.iter().find(|t| t.name == "delete_transaction").unwrap();
    assert_eq!(
        delete.annotations.as_ref().and_then(|a| a.destructive_hint),
        Some(true)
    );
    let properties = delete.input_schema.get("properties").unwrap();
    assert!(properties.get("transaction_id").is_some());
}
