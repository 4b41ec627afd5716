//! Transaction tools: queries, single and bulk edits, splits and groups.

use rmcp::model::ToolAnnotations;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::api::ApiRequest;
use crate::tools::endpoint::{
    Endpoint, Query, Reply, check_currency, check_date, check_not_empty, check_optional_date,
    to_body,
};

const MAX_PAGE_SIZE: u32 = 500;
const MAX_EXTERNAL_ID_CHARS: usize = 75;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Reviewed,
    Unreviewed,
    Pending,
}

impl TransactionStatus {
    fn as_str(self) -> &'static str {
        match self {
            TransactionStatus::Reviewed => "reviewed",
            TransactionStatus::Unreviewed => "unreviewed",
            TransactionStatus::Pending => "pending",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum GroupStatus {
    Reviewed,
    Unreviewed,
}

fn check_external_id(external_id: Option<&str>) -> Result<(), String> {
    match external_id {
        Some(id) if id.chars().count() > MAX_EXTERNAL_ID_CHARS => Err(format!(
            "external_id must be at most {} characters",
            MAX_EXTERNAL_ID_CHARS
        )),
        _ => Ok(()),
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetTransactions {
    /// Start date in YYYY-MM-DD format
    pub start_date: String,
    /// End date in YYYY-MM-DD format
    pub end_date: String,
    /// Filter by tag ID
    #[serde(default)]
    pub tag_id: Option<i64>,
    /// Filter by recurring expense ID
    #[serde(default)]
    pub recurring_id: Option<i64>,
    /// Filter by Plaid account ID
    #[serde(default)]
    pub plaid_account_id: Option<i64>,
    /// Filter by category ID
    #[serde(default)]
    pub category_id: Option<i64>,
    /// Filter by manual account ID
    #[serde(default)]
    pub manual_account_id: Option<i64>,
    /// Filter by transaction groups
    #[serde(default)]
    pub is_group: Option<bool>,
    /// Filter by status: reviewed, unreviewed, pending
    #[serde(default)]
    pub status: Option<TransactionStatus>,
    /// Number of transactions to skip
    #[serde(default)]
    pub offset: Option<u32>,
    /// Maximum number of transactions to return (max 500)
    #[serde(default)]
    pub limit: Option<u32>,
    /// Include pending transactions
    #[serde(default)]
    pub include_pending: Option<bool>,
    /// Include transaction metadata
    #[serde(default)]
    pub include_metadata: Option<bool>,
    /// Include attached files
    #[serde(default)]
    pub include_files: Option<bool>,
    /// Include child transactions (for splits/groups)
    #[serde(default)]
    pub include_children: Option<bool>,
    /// Include split parent transactions
    #[serde(default)]
    pub include_split_parents: Option<bool>,
    /// Filter transactions created since this date (ISO date format)
    #[serde(default)]
    pub created_since: Option<String>,
    /// Filter transactions updated since this datetime (ISO datetime format)
    #[serde(default)]
    pub updated_since: Option<String>,
}

impl Endpoint for GetTransactions {
    const NAME: &'static str = "get_transactions";
    const DESCRIPTION: &'static str =
        "Retrieve transactions within a date range with optional filters";
    const FAILURE: &'static str = "Failed to get transactions";

    fn annotations() -> ToolAnnotations {
        ToolAnnotations::new().read_only(true)
    }

    fn validate(&self) -> Result<(), String> {
        check_date("start_date", &self.start_date)?;
        check_date("end_date", &self.end_date)?;
        match self.limit {
            Some(limit) if limit > MAX_PAGE_SIZE => {
                Err(format!("limit must be at most {}", MAX_PAGE_SIZE))
            }
            _ => Ok(()),
        }
    }

    fn request(&self) -> ApiRequest {
        let path = Query::new()
            .push("start_date", &self.start_date)
            .push("end_date", &self.end_date)
            .push_opt("tag_id", self.tag_id)
            .push_opt("recurring_id", self.recurring_id)
            .push_opt("plaid_account_id", self.plaid_account_id)
            .push_opt("category_id", self.category_id)
            .push_opt("manual_account_id", self.manual_account_id)
            .push_opt("is_group", self.is_group)
            .push_opt("status", self.status.map(TransactionStatus::as_str))
            .push_opt("offset", self.offset)
            .push_opt("limit", self.limit)
            .push_opt("include_pending", self.include_pending)
            .push_opt("include_metadata", self.include_metadata)
            .push_opt("include_files", self.include_files)
            .push_opt("include_children", self.include_children)
            .push_opt("include_split_parents", self.include_split_parents)
            .push_opt("created_since", self.created_since.as_ref())
            .push_opt("updated_since", self.updated_since.as_ref())
            .to_path("/transactions");
        ApiRequest::get(path)
    }

    fn reply() -> Reply {
        Reply::Fields(&["transactions", "has_more"])
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetSingleTransaction {
    /// ID of the transaction to retrieve
    pub transaction_id: i64,
}

impl Endpoint for GetSingleTransaction {
    const NAME: &'static str = "get_single_transaction";
    const DESCRIPTION: &'static str = "Get details of a specific transaction";
    const FAILURE: &'static str = "Failed to get transaction";

    fn annotations() -> ToolAnnotations {
        ToolAnnotations::new().read_only(true)
    }

    fn request(&self) -> ApiRequest {
        ApiRequest::get(format!("/transactions/{}", self.transaction_id))
    }
}

/// One transaction to insert.
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct NewTransaction {
    /// Date in YYYY-MM-DD format
    pub date: String,
    /// Payee name
    pub payee: String,
    /// Amount as string with up to 4 decimal places
    pub amount: String,
    /// Three-letter lowercase currency code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Category ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    /// Manual account ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_account_id: Option<i64>,
    /// Recurring expense ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_id: Option<i64>,
    /// Transaction notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Transaction status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TransactionStatus>,
    /// External ID (max 75 characters)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Array of tag IDs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_ids: Option<Vec<i64>>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct CreateTransactions {
    /// Array of transactions to create
    pub transactions: Vec<NewTransaction>,
    /// Apply account's rules to transactions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apply_rules: Option<bool>,
    /// Skip transactions that are potential duplicates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_duplicates: Option<bool>,
    /// Check if transactions are part of recurring expenses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_for_recurring: Option<bool>,
    /// Skip updating balance for assets/accounts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_balance_update: Option<bool>,
}

impl Endpoint for CreateTransactions {
    const NAME: &'static str = "create_transactions";
    const DESCRIPTION: &'static str = "Insert one or more transactions";
    const FAILURE: &'static str = "Failed to create transactions";

    fn annotations() -> ToolAnnotations {
        ToolAnnotations::new().idempotent(false)
    }

    fn validate(&self) -> Result<(), String> {
        check_not_empty("transactions", &self.transactions)?;
        for tx in &self.transactions {
            check_date("date", &tx.date)?;
            check_currency("currency", tx.currency.as_deref())?;
            check_external_id(tx.external_id.as_deref())?;
        }
        Ok(())
    }

    fn request(&self) -> ApiRequest {
        ApiRequest::post("/transactions", to_body(self))
    }
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct UpdateTransaction {
    /// ID of the transaction to update
    #[serde(skip_serializing)]
    pub transaction_id: i64,
    /// Date in YYYY-MM-DD format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Payee name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payee: Option<String>,
    /// Amount as string with up to 4 decimal places
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    /// Three-letter lowercase currency code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Category ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    /// Manual account ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_account_id: Option<i64>,
    /// Recurring expense ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_id: Option<i64>,
    /// Transaction notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Transaction status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TransactionStatus>,
    /// External ID (max 75 characters)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Array of tag IDs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_ids: Option<Vec<i64>>,
    /// Skip updating balance for assets/accounts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_balance_update: Option<bool>,
}

impl Endpoint for UpdateTransaction {
    const NAME: &'static str = "update_transaction";
    const DESCRIPTION: &'static str = "Update an existing transaction";
    const FAILURE: &'static str = "Failed to update transaction";

    fn annotations() -> ToolAnnotations {
        ToolAnnotations::new().idempotent(true)
    }

    fn validate(&self) -> Result<(), String> {
        check_optional_date("date", self.date.as_deref())?;
        check_currency("currency", self.currency.as_deref())?;
        check_external_id(self.external_id.as_deref())
    }

    fn request(&self) -> ApiRequest {
        ApiRequest::put(
            format!("/transactions/{}", self.transaction_id),
            to_body(self),
        )
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeleteTransaction {
    /// ID of the transaction to delete
    pub transaction_id: i64,
}

impl Endpoint for DeleteTransaction {
    const NAME: &'static str = "delete_transaction";
    const DESCRIPTION: &'static str = "Delete a single transaction";
    const FAILURE: &'static str = "Failed to delete transaction";

    fn annotations() -> ToolAnnotations {
        ToolAnnotations::new().destructive(true)
    }

    fn request(&self) -> ApiRequest {
        ApiRequest::delete(format!("/transactions/{}", self.transaction_id))
    }

    fn reply() -> Reply {
        Reply::Message("Transaction deleted successfully")
    }
}

/// One part of a split.
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct SplitPart {
    /// Payee name for this split
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payee: Option<String>,
    /// Amount for this split
    pub amount: String,
    /// Category ID for this split
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    /// Notes for this split
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SplitTransaction {
    /// ID of the transaction to split
    pub transaction_id: i64,
    /// Array of split transactions
    pub splits: Vec<SplitPart>,
}

impl Endpoint for SplitTransaction {
    const NAME: &'static str = "split_transaction";
    const DESCRIPTION: &'static str = "Split a transaction into multiple parts";
    const FAILURE: &'static str = "Failed to split transaction";

    fn annotations() -> ToolAnnotations {
        ToolAnnotations::new().idempotent(false)
    }

    fn validate(&self) -> Result<(), String> {
        check_not_empty("splits", &self.splits)
    }

    fn request(&self) -> ApiRequest {
        ApiRequest::post(
            format!("/transactions/split/{}", self.transaction_id),
            json!({ "splits": to_body(&self.splits) }),
        )
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UnsplitTransaction {
    /// ID of the split parent transaction to unsplit
    pub transaction_id: i64,
}

impl Endpoint for UnsplitTransaction {
    const NAME: &'static str = "unsplit_transaction";
    const DESCRIPTION: &'static str = "Remove a transaction from a split (unsplit operation)";
    const FAILURE: &'static str = "Failed to unsplit transactions";

    fn annotations() -> ToolAnnotations {
        ToolAnnotations::new().destructive(true)
    }

    fn request(&self) -> ApiRequest {
        ApiRequest::delete(format!("/transactions/split/{}", self.transaction_id))
    }

    fn reply() -> Reply {
        Reply::Message("Transaction unsplit successfully")
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetTransactionGroup {
    /// ID of the transaction group
    pub transaction_id: i64,
}

impl Endpoint for GetTransactionGroup {
    const NAME: &'static str = "get_transaction_group";
    const DESCRIPTION: &'static str = "Get details of a transaction group";
    const FAILURE: &'static str = "Failed to get transaction group";

    fn annotations() -> ToolAnnotations {
        ToolAnnotations::new().read_only(true)
    }

    fn request(&self) -> ApiRequest {
        ApiRequest::get(format!("/transactions/group/{}", self.transaction_id))
    }
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct CreateTransactionGroup {
    /// Array of transaction IDs to group
    pub ids: Vec<i64>,
    /// Date in YYYY-MM-DD format
    pub date: String,
    /// Payee name for the group
    pub payee: String,
    /// Category ID for the group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    /// Notes for the group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Transaction status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<GroupStatus>,
    /// Array of tag IDs for the group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_ids: Option<Vec<i64>>,
}

impl Endpoint for CreateTransactionGroup {
    const NAME: &'static str = "create_transaction_group";
    const DESCRIPTION: &'static str = "Create a transaction group";
    const FAILURE: &'static str = "Failed to create transaction group";

    fn annotations() -> ToolAnnotations {
        ToolAnnotations::new().idempotent(false)
    }

    fn validate(&self) -> Result<(), String> {
        check_not_empty("ids", &self.ids)?;
        check_date("date", &self.date)
    }

    fn request(&self) -> ApiRequest {
        ApiRequest::post("/transactions/group", to_body(self))
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UngroupTransaction {
    /// ID of the transaction group to ungroup
    pub transaction_id: i64,
}

impl Endpoint for UngroupTransaction {
    const NAME: &'static str = "ungroup_transaction";
    const DESCRIPTION: &'static str = "Remove a transaction group (ungroup operation)";
    const FAILURE: &'static str = "Failed to ungroup transaction";

    fn annotations() -> ToolAnnotations {
        ToolAnnotations::new().destructive(true)
    }

    fn request(&self) -> ApiRequest {
        ApiRequest::delete(format!("/transactions/group/{}", self.transaction_id))
    }

    fn reply() -> Reply {
        Reply::Message("Transaction ungrouped successfully")
    }
}

/// One transaction in a bulk update.
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct TransactionPatch {
    /// Transaction ID to update
    pub id: i64,
    /// Date in YYYY-MM-DD format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Payee name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payee: Option<String>,
    /// Amount as string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    /// Three-letter currency code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Category ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    /// Transaction notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Transaction status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TransactionStatus>,
    /// Array of tag IDs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_ids: Option<Vec<i64>>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct BulkUpdateTransactions {
    /// Array of transactions to update
    pub transactions: Vec<TransactionPatch>,
}

impl Endpoint for BulkUpdateTransactions {
    const NAME: &'static str = "bulk_update_transactions";
    const DESCRIPTION: &'static str = "Update multiple transactions at once";
    const FAILURE: &'static str = "Failed to update transactions";

    fn annotations() -> ToolAnnotations {
        ToolAnnotations::new().idempotent(true)
    }

    fn validate(&self) -> Result<(), String> {
        check_not_empty("transactions", &self.transactions)?;
        for patch in &self.transactions {
            check_optional_date("date", patch.date.as_deref())?;
            check_currency("currency", patch.currency.as_deref())?;
        }
        Ok(())
    }

    fn request(&self) -> ApiRequest {
        ApiRequest::put("/transactions", to_body(&self.transactions))
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct BulkDeleteTransactions {
    /// Array of transaction IDs to delete
    pub ids: Vec<i64>,
}

impl Endpoint for BulkDeleteTransactions {
    const NAME: &'static str = "bulk_delete_transactions";
    const DESCRIPTION: &'static str = "Delete multiple transactions at once";
    const FAILURE: &'static str = "Failed to delete transactions";

    fn annotations() -> ToolAnnotations {
        ToolAnnotations::new().destructive(true)
    }

    fn validate(&self) -> Result<(), String> {
        check_not_empty("ids", &self.ids)
    }

    fn request(&self) -> ApiRequest {
        ApiRequest::new(
            reqwest::Method::DELETE,
            "/transactions",
            Some(json!({ "ids": self.ids })),
        )
    }
}
