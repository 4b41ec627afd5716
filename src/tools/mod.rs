//! Tool handler registry and the Lunch Money tool catalog.
//!
//! Every tool is an [`Endpoint`] input type wrapped in an [`EndpointTool`], so
//! adding a tool means adding a type to one of the area modules below and a
//! line to [`register_all`].

mod registry;

pub use registry::{ToolHandler, ToolRegistry};

pub mod endpoint;
pub mod envelope;

pub mod assets;
pub mod budgets;
pub mod categories;
pub mod crypto;
pub mod plaid;
pub mod recurring;
pub mod tags;
pub mod transactions;
pub mod user;

#[cfg(test)]
mod integration_tests;

use std::sync::Arc;

pub use endpoint::{Endpoint, EndpointTool, Reply};

use crate::api::ApiClient;

/// Build a registry holding every Lunch Money tool, all sharing `client`.
pub fn register_all(client: Arc<ApiClient>) -> ToolRegistry {
    ToolRegistry::new()
        // user
        .register_handler(EndpointTool::<user::GetUser>::new(client.clone()))
        // categories
        .register_handler(EndpointTool::<categories::GetAllCategories>::new(client.clone()))
        .register_handler(EndpointTool::<categories::GetSingleCategory>::new(client.clone()))
        .register_handler(EndpointTool::<categories::CreateCategory>::new(client.clone()))
        .register_handler(EndpointTool::<categories::CreateCategoryGroup>::new(client.clone()))
        .register_handler(EndpointTool::<categories::UpdateCategory>::new(client.clone()))
        .register_handler(EndpointTool::<categories::AddToCategoryGroup>::new(client.clone()))
        .register_handler(EndpointTool::<categories::DeleteCategory>::new(client.clone()))
        .register_handler(EndpointTool::<categories::ForceDeleteCategory>::new(client.clone()))
        // tags
        .register_handler(EndpointTool::<tags::GetAllTags>::new(client.clone()))
        // transactions
        .register_handler(EndpointTool::<transactions::GetTransactions>::new(client.clone()))
        .register_handler(EndpointTool::<transactions::GetSingleTransaction>::new(client.clone()))
        .register_handler(EndpointTool::<transactions::CreateTransactions>::new(client.clone()))
        .register_handler(EndpointTool::<transactions::UpdateTransaction>::new(client.clone()))
        .register_handler(EndpointTool::<transactions::DeleteTransaction>::new(client.clone()))
        .register_handler(EndpointTool::<transactions::SplitTransaction>::new(client.clone()))
        .register_handler(EndpointTool::<transactions::UnsplitTransaction>::new(client.clone()))
        .register_handler(EndpointTool::<transactions::GetTransactionGroup>::new(client.clone()))
        .register_handler(EndpointTool::<transactions::CreateTransactionGroup>::new(client.clone()))
        .register_handler(EndpointTool::<transactions::UngroupTransaction>::new(client.clone()))
        .register_handler(EndpointTool::<transactions::BulkUpdateTransactions>::new(client.clone()))
        .register_handler(EndpointTool::<transactions::BulkDeleteTransactions>::new(client.clone()))
        // recurring items
        .register_handler(EndpointTool::<recurring::GetRecurringItems>::new(client.clone()))
        // budgets
        .register_handler(EndpointTool::<budgets::GetBudgetSummary>::new(client.clone()))
        .register_handler(EndpointTool::<budgets::UpsertBudget>::new(client.clone()))
        .register_handler(EndpointTool::<budgets::RemoveBudget>::new(client.clone()))
        // assets
        .register_handler(EndpointTool::<assets::GetAllAssets>::new(client.clone()))
        .register_handler(EndpointTool::<assets::CreateAsset>::new(client.clone()))
        .register_handler(EndpointTool::<assets::UpdateAsset>::new(client.clone()))
        // plaid
        .register_handler(EndpointTool::<plaid::GetAllPlaidAccounts>::new(client.clone()))
        .register_handler(EndpointTool::<plaid::TriggerPlaidFetch>::new(client.clone()))
        // crypto
        .register_handler(EndpointTool::<crypto::GetAllCrypto>::new(client.clone()))
        .register_handler(EndpointTool::<crypto::UpdateManualCrypto>::new(client))
}
