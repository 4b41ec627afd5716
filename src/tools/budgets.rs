use rmcp::model::ToolAnnotations;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::api::ApiRequest;
use crate::tools::endpoint::{Endpoint, Query, Reply, check_currency, check_date, to_body};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetBudgetSummary {
    /// Start date in YYYY-MM-DD format. Lunch Money currently only supports monthly budgets,
    /// so your date should be the start of a month (eg. 2021-04-01)
    pub start_date: String,
    /// End date in YYYY-MM-DD format. Lunch Money currently only supports monthly budgets,
    /// so your date should be the end of a month (eg. 2021-04-30)
    pub end_date: String,
    /// Currency for budget (defaults to primary currency)
    #[serde(default)]
    pub currency: Option<String>,
}

impl Endpoint for GetBudgetSummary {
    const NAME: &'static str = "get_budget_summary";
    const DESCRIPTION: &'static str = "Get budget summary for a specific date range. The budgeted and spending amounts will be broken down by month.";
    const FAILURE: &'static str = "Failed to get budget summary";

    fn annotations() -> ToolAnnotations {
        ToolAnnotations::new().read_only(true)
    }

    fn validate(&self) -> Result<(), String> {
        check_date("start_date", &self.start_date)?;
        check_date("end_date", &self.end_date)?;
        check_currency("currency", self.currency.as_deref())
    }

    fn request(&self) -> ApiRequest {
        let path = Query::new()
            .push("start_date", &self.start_date)
            .push("end_date", &self.end_date)
            .push_opt("currency", self.currency.as_ref())
            .to_path("/budgets");
        ApiRequest::get(path)
    }
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct UpsertBudget {
    /// Budget month start date in YYYY-MM-DD format
    pub start_date: String,
    /// Category ID for the budget
    pub category_id: i64,
    /// Budget amount
    pub amount: f64,
    /// Currency for budget (defaults to primary currency)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl Endpoint for UpsertBudget {
    const NAME: &'static str = "upsert_budget";
    const DESCRIPTION: &'static str =
        "Create or update a budget for a specific category and month";
    const FAILURE: &'static str = "Failed to upsert budget";

    fn annotations() -> ToolAnnotations {
        ToolAnnotations::new().idempotent(true)
    }

    fn validate(&self) -> Result<(), String> {
        check_date("start_date", &self.start_date)?;
        check_currency("currency", self.currency.as_deref())
    }

    fn request(&self) -> ApiRequest {
        ApiRequest::put("/budgets", to_body(self))
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct RemoveBudget {
    /// Budget month start date in YYYY-MM-DD format
    pub start_date: String,
    /// Category ID for the budget to remove
    pub category_id: i64,
}

impl Endpoint for RemoveBudget {
    const NAME: &'static str = "remove_budget";
    const DESCRIPTION: &'static str = "Remove a budget for a specific category and month";
    const FAILURE: &'static str = "Failed to remove budget";

    fn annotations() -> ToolAnnotations {
        ToolAnnotations::new().destructive(true)
    }

    fn validate(&self) -> Result<(), String> {
        check_date("start_date", &self.start_date)
    }

    fn request(&self) -> ApiRequest {
        let path = Query::new()
            .push("start_date", &self.start_date)
            .push("category_id", self.category_id)
            .to_path("/budgets");
        ApiRequest::delete(path)
    }

    fn reply() -> Reply {
        Reply::Message("Budget removed successfully")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;
    use serde_json::json;

    #[test]
    fn test_summary_query() {
        let input: GetBudgetSummary = serde_json::from_value(json!({
            "start_date": "2024-04-01",
            "end_date": "2024-04-30",
            "currency": "eur"
        }))
        .unwrap();
        assert!(input.validate().is_ok());
        assert_eq!(
            input.request().path,
            "/budgets?start_date=2024-04-01&end_date=2024-04-30&currency=eur"
        );
    }

    #[test]
    fn test_summary_rejects_bad_currency() {
        let input: GetBudgetSummary = serde_json::from_value(json!({
            "start_date": "2024-04-01",
            "end_date": "2024-04-30",
            "currency": "euro"
        }))
        .unwrap();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_upsert_body() {
        let input: UpsertBudget = serde_json::from_value(json!({
            "start_date": "2024-04-01",
            "category_id": 8,
            "amount": 250.5
        }))
        .unwrap();
        let request = input.request();
        assert_eq!(request.method, Method::PUT);
        assert_eq!(
            request.body,
            Some(json!({"start_date": "2024-04-01", "category_id": 8, "amount": 250.5}))
        );
    }

    #[test]
    fn test_remove_uses_query_not_body() {
        let input: RemoveBudget = serde_json::from_value(json!({
            "start_date": "2024-04-01",
            "category_id": 8
        }))
        .unwrap();
        let request = input.request();
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(request.path, "/budgets?start_date=2024-04-01&category_id=8");
        assert!(request.body.is_none());
    }
}
