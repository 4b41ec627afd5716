use rmcp::model::ToolAnnotations;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::api::ApiRequest;
use crate::tools::endpoint::{Endpoint, Reply, optional_decimal_string, to_body};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetAllCrypto {}

impl Endpoint for GetAllCrypto {
    const NAME: &'static str = "get_all_crypto";
    const DESCRIPTION: &'static str =
        "Get a list of all cryptocurrency assets associated with the user";
    const FAILURE: &'static str = "Failed to get crypto assets";

    fn annotations() -> ToolAnnotations {
        ToolAnnotations::new().read_only(true)
    }

    fn request(&self) -> ApiRequest {
        ApiRequest::get("/crypto")
    }

    fn reply() -> Reply {
        Reply::Field("crypto")
    }
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct UpdateManualCrypto {
    /// ID of the crypto asset to update
    #[serde(skip_serializing)]
    pub crypto_id: i64,
    /// Updated balance of the crypto asset
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "optional_decimal_string"
    )]
    pub balance: Option<f64>,
}

impl Endpoint for UpdateManualCrypto {
    const NAME: &'static str = "update_manual_crypto";
    const DESCRIPTION: &'static str = "Update a manually-managed cryptocurrency asset balance";
    const FAILURE: &'static str = "Failed to update crypto asset";

    fn annotations() -> ToolAnnotations {
        ToolAnnotations::new().idempotent(true)
    }

    fn request(&self) -> ApiRequest {
        ApiRequest::put(format!("/crypto/manual/{}", self.crypto_id), to_body(self))
    }
}
