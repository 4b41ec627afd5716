use rmcp::model::ToolAnnotations;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::api::ApiRequest;
use crate::tools::endpoint::Endpoint;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetAllTags {}

impl Endpoint for GetAllTags {
    const NAME: &'static str = "get_all_tags";
    const DESCRIPTION: &'static str =
        "Get a list of all tags associated with the user's account.";
    const FAILURE: &'static str = "Failed to get tags";

    fn annotations() -> ToolAnnotations {
        ToolAnnotations::new().read_only(true)
    }

    fn request(&self) -> ApiRequest {
        ApiRequest::get("/tags")
    }
}
