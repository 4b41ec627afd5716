use rmcp::model::ToolAnnotations;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::api::ApiRequest;
use crate::tools::endpoint::{
    Endpoint, Reply, check_currency, check_optional_date, decimal_string, optional_decimal_string,
    to_body,
};

/// Primary type of a manually-managed asset.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    Cash,
    Credit,
    Investment,
    #[serde(rename = "real estate")]
    RealEstate,
    Loan,
    Vehicle,
    Cryptocurrency,
    #[serde(rename = "employee compensation")]
    EmployeeCompensation,
    #[serde(rename = "other liability")]
    OtherLiability,
    #[serde(rename = "other asset")]
    OtherAsset,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetAllAssets {}

impl Endpoint for GetAllAssets {
    const NAME: &'static str = "get_all_assets";
    const DESCRIPTION: &'static str =
        "Get a list of all manually-managed assets associated with the user";
    const FAILURE: &'static str = "Failed to get assets";

    fn annotations() -> ToolAnnotations {
        ToolAnnotations::new().read_only(true)
    }

    fn request(&self) -> ApiRequest {
        ApiRequest::get("/assets")
    }

    fn reply() -> Reply {
        Reply::Field("assets")
    }
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct CreateAsset {
    /// Primary type of the asset
    pub type_name: AssetType,
    /// Optional asset subtype. Examples include: retirement, checking, savings, prepaid credit card
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype_name: Option<String>,
    /// Name of the asset
    pub name: String,
    /// Display name of the asset (defaults to name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Current balance of the asset in numeric format to 4 decimal places
    #[serde(serialize_with = "decimal_string")]
    pub balance: f64,
    /// Date/time the balance was last updated in ISO 8601 extended format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance_as_of: Option<String>,
    /// Three-letter lowercase currency code in ISO 4217 format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Name of the institution holding the asset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution_name: Option<String>,
    /// Date the asset was closed in YYYY-MM-DD format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_on: Option<String>,
    /// If true, this asset will not show up as an option for assignment when creating transactions manually
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_transactions: Option<bool>,
}

impl Endpoint for CreateAsset {
    const NAME: &'static str = "create_asset";
    const DESCRIPTION: &'static str = "Create a single (manually-managed) asset";
    const FAILURE: &'static str = "Failed to create asset";

    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        check_currency("currency", self.currency.as_deref())?;
        check_optional_date("closed_on", self.closed_on.as_deref())
    }

    fn request(&self) -> ApiRequest {
        ApiRequest::post("/assets", to_body(self))
    }
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct UpdateAsset {
    /// ID of the asset to update
    #[serde(skip_serializing)]
    pub asset_id: i64,
    /// Primary type of the asset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<AssetType>,
    /// Optional asset subtype
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype_name: Option<String>,
    /// Name of the asset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Display name of the asset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Current balance of the asset in numeric format to 4 decimal places
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "optional_decimal_string"
    )]
    pub balance: Option<f64>,
    /// Date/time the balance was last updated in ISO 8601 extended format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance_as_of: Option<String>,
    /// Three-letter lowercase currency code in ISO 4217 format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Name of the institution holding the asset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution_name: Option<String>,
    /// Date the asset was closed in YYYY-MM-DD format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_on: Option<String>,
    /// If true, this asset will not show up as an option for assignment when creating transactions manually
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_transactions: Option<bool>,
}

impl Endpoint for UpdateAsset {
    const NAME: &'static str = "update_asset";
    const DESCRIPTION: &'static str = "Update a single asset";
    const FAILURE: &'static str = "Failed to update asset";

    fn annotations() -> ToolAnnotations {
        ToolAnnotations::new().idempotent(true)
    }

    fn validate(&self) -> Result<(), String> {
        check_currency("currency", self.currency.as_deref())?;
        check_optional_date("closed_on", self.closed_on.as_deref())
    }

    fn request(&self) -> ApiRequest {
        ApiRequest::put(format!("/assets/{}", self.asset_id), to_body(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;
    use serde_json::json;

    #[test]
    fn test_create_body() {
        let input: CreateAsset = serde_json::from_value(json!({
            "type_name": "real estate",
            "name": "Flat",
            "balance": 125000.5,
            "currency": "usd"
        }))
        .unwrap();
        assert!(input.validate().is_ok());
        let request = input.request();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path, "/assets");
        assert_eq!(
            request.body,
            Some(json!({
                "type_name": "real estate",
                "name": "Flat",
                "balance": "125000.5",
                "currency": "usd"
            }))
        );
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let parsed = serde_json::from_value::<CreateAsset>(json!({
            "type_name": "stocks",
            "name": "Brokerage",
            "balance": 1.0
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_update_sends_only_given_fields() {
        let input: UpdateAsset = serde_json::from_value(json!({
            "asset_id": 77,
            "balance": 10.0,
            "closed_on": "2024-03-31"
        }))
        .unwrap();
        assert!(input.validate().is_ok());
        let request = input.request();
        assert_eq!(request.path, "/assets/77");
        assert_eq!(
            request.body,
            Some(json!({"balance": "10", "closed_on": "2024-03-31"}))
        );
    }
}
