use rmcp::model::ToolAnnotations;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::api::ApiRequest;
use crate::tools::endpoint::{Endpoint, Query, check_optional_date};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetRecurringItems {
    /// Start date in YYYY-MM-DD format. Defaults to first day of current month
    #[serde(default)]
    pub start_date: Option<String>,
    /// End date in YYYY-MM-DD format
    #[serde(default)]
    pub end_date: Option<String>,
    /// Pass true to return debit amounts as negative
    #[serde(default)]
    pub debit_as_negative: Option<bool>,
}

impl Endpoint for GetRecurringItems {
    const NAME: &'static str = "get_recurring_items";
    const DESCRIPTION: &'static str =
        "Retrieve a list of recurring items to expect for a specified month";
    const FAILURE: &'static str = "Failed to get recurring items";

    fn annotations() -> ToolAnnotations {
        ToolAnnotations::new().read_only(true)
    }

    fn validate(&self) -> Result<(), String> {
        check_optional_date("start_date", self.start_date.as_deref())?;
        check_optional_date("end_date", self.end_date.as_deref())
    }

    fn request(&self) -> ApiRequest {
        let path = Query::new()
            .push_opt("start_date", self.start_date.as_ref())
            .push_opt("end_date", self.end_date.as_ref())
            .push_opt("debit_as_negative", self.debit_as_negative)
            .to_path("/recurring_items");
        ApiRequest::get(path)
    }
}
