use rmcp::model::ToolAnnotations;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::api::ApiRequest;
use crate::tools::endpoint::Endpoint;

/// `get_user`: the account owner behind the API token.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetUser {}

impl Endpoint for GetUser {
    const NAME: &'static str = "get_user";
    const DESCRIPTION: &'static str = "Get details on the current user";
    const FAILURE: &'static str = "Failed to get user";

    fn annotations() -> ToolAnnotations {
        ToolAnnotations::new().read_only(true)
    }

    fn request(&self) -> ApiRequest {
        ApiRequest::get("/me")
    }
}
