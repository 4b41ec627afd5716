//! Generic tool handler for one upstream API operation.
//!
//! Each tool is an input type implementing [`Endpoint`]. The type carries the
//! tool's name, description and hints, checks its own fields, and says which
//! request to send and how to shape a successful reply. [`EndpointTool`] turns
//! any such type into a registered [`ToolHandler`].

use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;

use chrono::NaiveDate;
use reqwest::Response;
use rmcp::model::{CallToolResult, JsonObject, ToolAnnotations};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serializer;
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::api::{ApiClient, ApiError, ApiRequest};
use crate::tools::envelope::{
    api_error_response, catch_error, data_response, error_response, success_response,
};
use crate::tools::ToolHandler;

/// How a successful upstream response becomes the tool reply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reply {
    /// The whole JSON body.
    Body,
    /// One top-level field of the body, e.g. `crypto`.
    Field(&'static str),
    /// A subset of top-level fields, kept as an object.
    Fields(&'static [&'static str]),
    /// A fixed confirmation; the body is not read.
    Message(&'static str),
}

impl Reply {
    fn select(self, body: Value) -> Value {
        match self {
            Reply::Body | Reply::Message(_) => body,
            Reply::Field(field) => match body {
                Value::Object(mut map) => map.remove(field).unwrap_or(Value::Null),
                _ => Value::Null,
            },
            Reply::Fields(fields) => {
                let mut selected = Map::new();
                if let Value::Object(mut map) = body {
                    for field in fields {
                        if let Some(value) = map.remove(*field) {
                            selected.insert((*field).to_string(), value);
                        }
                    }
                }
                Value::Object(selected)
            }
        }
    }
}

/// One upstream operation exposed as a tool.
pub trait Endpoint: DeserializeOwned + JsonSchema + Send + 'static {
    const NAME: &'static str;
    const DESCRIPTION: &'static str;
    /// Prefix of every error reply, e.g. "Failed to get user".
    const FAILURE: &'static str;

    fn annotations() -> ToolAnnotations {
        ToolAnnotations::new()
    }

    /// Field checks that run before anything is sent upstream.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }

    fn request(&self) -> ApiRequest;

    fn reply() -> Reply {
        Reply::Body
    }
}

/// [`ToolHandler`] backed by an [`Endpoint`] input type.
pub struct EndpointTool<E> {
    client: Arc<ApiClient>,
    _endpoint: PhantomData<fn() -> E>,
}

impl<E: Endpoint> EndpointTool<E> {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            _endpoint: PhantomData,
        }
    }
}

impl<E: Endpoint> ToolHandler for EndpointTool<E> {
    fn name(&self) -> &str {
        E::NAME
    }

    fn description(&self) -> &str {
        E::DESCRIPTION
    }

    fn input_schema(&self) -> JsonObject {
        match serde_json::to_value(schemars::schema_for!(E)) {
            Ok(Value::Object(schema)) => schema,
            _ => {
                let mut schema = JsonObject::new();
                schema.insert("type".to_string(), json!("object"));
                schema
            }
        }
    }

    fn annotations(&self) -> Option<ToolAnnotations> {
        Some(E::annotations())
    }

    fn execute(
        &self,
        args: JsonObject,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<CallToolResult>> + Send + '_>> {
        Box::pin(async move { Ok(invoke::<E>(&self.client, args).await) })
    }
}

/// Run one tool call end to end. Always produces exactly one reply.
pub async fn invoke<E: Endpoint>(client: &ApiClient, args: JsonObject) -> CallToolResult {
    let input: E = match serde_json::from_value(Value::Object(args)) {
        Ok(input) => input,
        Err(e) => return error_response(format!("Invalid arguments: {}", e)),
    };
    if let Err(reason) = input.validate() {
        return error_response(format!("Invalid arguments: {}", reason));
    }

    let request = input.request();
    let response = match client.send(&request).await {
        Ok(response) => response,
        Err(e) => return catch_error(&e, E::FAILURE),
    };

    if !response.status().is_success() {
        debug!(
            tool = E::NAME,
            status = response.status().as_u16(),
            "upstream rejected tool call"
        );
        return api_error_response(response, E::FAILURE).await;
    }

    match E::reply() {
        Reply::Message(text) => success_response(text),
        reply => match read_json(response).await {
            Ok(body) => data_response(reply.select(body)),
            Err(e) => catch_error(&e, E::FAILURE),
        },
    }
}

async fn read_json(response: Response) -> Result<Value, ApiError> {
    let text = response.text().await?;
    Ok(serde_json::from_str(&text)?)
}

/// Query string builder that skips unset values.
#[derive(Debug, Default)]
pub struct Query {
    pairs: Vec<(&'static str, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, key: &'static str, value: impl ToString) -> Self {
        self.pairs.push((key, value.to_string()));
        self
    }

    pub fn push_opt<T: ToString>(self, key: &'static str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.push(key, value),
            None => self,
        }
    }

    /// `path` with the encoded query appended, or `path` alone when empty.
    pub fn to_path(&self, path: &str) -> String {
        if self.pairs.is_empty() {
            return path.to_string();
        }
        let encoded = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.pairs)
            .finish();
        format!("{}?{}", path, encoded)
    }
}

/// `YYYY-MM-DD` and a real calendar date.
pub fn check_date(field: &str, value: &str) -> Result<(), String> {
    let shaped = value.len() == 10
        && value.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if shaped && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok() {
        Ok(())
    } else {
        Err(format!("{} must be YYYY-MM-DD format", field))
    }
}

pub fn check_optional_date(field: &str, value: Option<&str>) -> Result<(), String> {
    value.map_or(Ok(()), |v| check_date(field, v))
}

/// Three-letter currency code.
pub fn check_currency(field: &str, value: Option<&str>) -> Result<(), String> {
    match value {
        Some(code) if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) => {
            Err(format!("{} must be a three-letter currency code", field))
        }
        _ => Ok(()),
    }
}

pub fn check_not_empty<T>(field: &str, values: &[T]) -> Result<(), String> {
    if values.is_empty() {
        Err(format!("{} must not be empty", field))
    } else {
        Ok(())
    }
}

/// Serialize a number as the decimal string the API expects for balances.
pub fn decimal_string<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_string())
}

pub fn optional_decimal_string<S: Serializer>(
    value: &Option<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => decimal_string(v, serializer),
        None => serializer.serialize_none(),
    }
}

/// Serialize `value` into a JSON body. Input types are plain data, so this cannot fail.
pub fn to_body<T: serde::Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_else(|_| Value::Object(Map::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_encoding() {
        let path = Query::new()
            .push("start_date", "2024-01-01")
            .push_opt("tag_id", Some(5))
            .push_opt::<bool>("is_group", None)
            .push_opt("status", Some("un reviewed"))
            .to_path("/transactions");
        assert_eq!(
            path,
            "/transactions?start_date=2024-01-01&tag_id=5&status=un+reviewed"
        );
    }

    #[test]
    fn test_empty_query_keeps_bare_path() {
        assert_eq!(Query::new().to_path("/recurring_items"), "/recurring_items");
    }

    #[test]
    fn test_check_date() {
        assert!(check_date("start_date", "2024-02-29").is_ok());
        assert!(check_date("start_date", "2023-02-29").is_err());
        assert!(check_date("start_date", "2024-2-01").is_err());
        assert!(check_date("start_date", "01/02/2024").is_err());
        assert_eq!(
            check_date("end_date", "soon").unwrap_err(),
            "end_date must be YYYY-MM-DD format"
        );
    }

    #[test]
    fn test_check_currency() {
        assert!(check_currency("currency", None).is_ok());
        assert!(check_currency("currency", Some("usd")).is_ok());
        assert!(check_currency("currency", Some("us")).is_err());
        assert!(check_currency("currency", Some("u$d")).is_err());
    }

    #[test]
    fn test_reply_selection() {
        let body = json!({"crypto": [1], "has_more": false, "transactions": []});
        assert_eq!(Reply::Field("crypto").select(body.clone()), json!([1]));
        assert_eq!(Reply::Field("missing").select(body.clone()), Value::Null);
        assert_eq!(
            Reply::Fields(&["transactions", "has_more"]).select(body.clone()),
            json!({"transactions": [], "has_more": false})
        );
        assert_eq!(Reply::Body.select(body.clone()), body);
    }
}
