use rmcp::model::ToolAnnotations;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::api::ApiRequest;
use crate::tools::endpoint::{Endpoint, Reply};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetAllPlaidAccounts {}

impl Endpoint for GetAllPlaidAccounts {
    const NAME: &'static str = "get_all_plaid_accounts";
    const DESCRIPTION: &'static str = "Get a list of all Plaid accounts associated with the user";
    const FAILURE: &'static str = "Failed to get Plaid accounts";

    fn annotations() -> ToolAnnotations {
        ToolAnnotations::new().read_only(true)
    }

    fn request(&self) -> ApiRequest {
        ApiRequest::get("/plaid_accounts")
    }

    fn reply() -> Reply {
        Reply::Field("plaid_accounts")
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct TriggerPlaidFetch {}

impl Endpoint for TriggerPlaidFetch {
    const NAME: &'static str = "trigger_plaid_fetch";
    const DESCRIPTION: &'static str = "Trigger a fetch of latest data from Plaid (Experimental). Note that fetching may take up to 5 minutes.";
    const FAILURE: &'static str = "Failed to trigger Plaid fetch";

    fn annotations() -> ToolAnnotations {
        ToolAnnotations::new().open_world(true)
    }

    fn request(&self) -> ApiRequest {
        ApiRequest::new(reqwest::Method::POST, "/plaid_accounts/fetch", None)
    }

    fn reply() -> Reply {
        Reply::Message("Plaid fetch triggered successfully. Fetching may take up to 5 minutes.")
    }
}
