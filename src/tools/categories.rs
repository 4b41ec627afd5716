//! Category and category-group tools.

use rmcp::model::ToolAnnotations;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::api::ApiRequest;
use crate::tools::endpoint::{Endpoint, Query, to_body};

const MAX_NAME_CHARS: usize = 40;
const MAX_DESCRIPTION_CHARS: usize = 139;

fn is_none_or_empty<T>(values: &Option<Vec<T>>) -> bool {
    values.as_ref().is_none_or(|v| v.is_empty())
}

fn check_name(name: Option<&str>) -> Result<(), String> {
    match name.map(|n| n.chars().count()) {
        Some(0) => Err("name must not be empty".to_string()),
        Some(n) if n > MAX_NAME_CHARS => Err(format!(
            "name must be between 1 and {} characters",
            MAX_NAME_CHARS
        )),
        _ => Ok(()),
    }
}

fn check_description(description: Option<&str>) -> Result<(), String> {
    match description {
        Some(d) if d.chars().count() > MAX_DESCRIPTION_CHARS => {
            Err("description must be less than 140 characters".to_string())
        }
        _ => Ok(()),
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetAllCategories {
    /// Can either flattened or nested. If flattened, returns a singular array of categories,
    /// ordered alphabetically. If nested, returns top-level categories (either category groups
    /// or categories not part of a category group) in an array. Subcategories are nested within
    /// the category group under the property children.
    #[serde(default)]
    pub format: Option<String>,
}

impl Endpoint for GetAllCategories {
    const NAME: &'static str = "get_all_categories";
    const DESCRIPTION: &'static str = "Get a flattened list of all categories in alphabetical order associated with the user's account.";
    const FAILURE: &'static str = "Failed to get all categories";

    fn annotations() -> ToolAnnotations {
        ToolAnnotations::new().read_only(true)
    }

    fn validate(&self) -> Result<(), String> {
        match self.format.as_deref() {
            None | Some("") | Some("flattened") | Some("nested") => Ok(()),
            Some(other) => Err(format!(
                "format must be flattened or nested, got {}",
                other
            )),
        }
    }

    fn request(&self) -> ApiRequest {
        let format = self
            .format
            .as_deref()
            .filter(|f| !f.is_empty())
            .unwrap_or("flattened");
        ApiRequest::get(Query::new().push("format", format).to_path("/categories"))
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetSingleCategory {
    /// Id of the category to query. Should call the get_all_categories tool first to get the ids.
    #[serde(rename = "categoryId")]
    pub category_id: i64,
}

impl Endpoint for GetSingleCategory {
    const NAME: &'static str = "get_single_category";
    const DESCRIPTION: &'static str = "Get hydrated details on a single category. Note that if this category is part of a category group, its properties (is_income, exclude_from_budget, exclude_from_totals) will inherit from the category group.";
    const FAILURE: &'static str = "Failed to get single category";

    fn annotations() -> ToolAnnotations {
        ToolAnnotations::new().read_only(true)
    }

    fn request(&self) -> ApiRequest {
        ApiRequest::get(format!("/categories/{}", self.category_id))
    }
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct CreateCategory {
    /// Name of category. Must be between 1 and 40 characters.
    pub name: String,
    /// Description of category. Must be less than 140 characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether or not transactions in this category should be treated as income.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_income: Option<bool>,
    /// Whether or not transactions in this category should be excluded from budgets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_from_budget: Option<bool>,
    /// Whether or not transactions in this category should be excluded from calculated totals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_from_totals: Option<bool>,
    /// Whether or not category should be archived.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    /// Assigns the newly-created category to an existing category group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<i64>,
}

impl Endpoint for CreateCategory {
    const NAME: &'static str = "create_category";
    const DESCRIPTION: &'static str = "Create a single category.";
    const FAILURE: &'static str = "Failed to create category";

    fn annotations() -> ToolAnnotations {
        ToolAnnotations::new().idempotent(false)
    }

    fn validate(&self) -> Result<(), String> {
        check_name(Some(&self.name))?;
        check_description(self.description.as_deref())
    }

    fn request(&self) -> ApiRequest {
        ApiRequest::post("/categories", to_body(self))
    }
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct CreateCategoryGroup {
    /// Name of category group. Must be between 1 and 40 characters.
    pub name: String,
    /// Description of category group. Must be less than 140 characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether or not transactions in this category group should be treated as income.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_income: Option<bool>,
    /// Whether or not transactions in this category group should be excluded from budgets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_from_budget: Option<bool>,
    /// Whether or not transactions in this category group should be excluded from calculated totals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_from_totals: Option<bool>,
    /// Array of category_id to include in the category group.
    #[serde(default, skip_serializing_if = "is_none_or_empty")]
    pub category_ids: Option<Vec<i64>>,
    /// Array of strings representing new categories to create and subsequently include in the category group.
    #[serde(default, skip_serializing_if = "is_none_or_empty")]
    pub new_categories: Option<Vec<String>>,
}

impl Endpoint for CreateCategoryGroup {
    const NAME: &'static str = "create_category_group";
    const DESCRIPTION: &'static str = "Create a single category group.";
    const FAILURE: &'static str = "Failed to create category group";

    fn annotations() -> ToolAnnotations {
        ToolAnnotations::new().idempotent(false)
    }

    fn validate(&self) -> Result<(), String> {
        check_name(Some(&self.name))?;
        check_description(self.description.as_deref())
    }

    fn request(&self) -> ApiRequest {
        ApiRequest::post("/categories/group", to_body(self))
    }
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct UpdateCategory {
    /// Id of the category or category group to update. Execute the get_all_categories tool
    /// first, to get the category ids.
    #[serde(rename = "categoryId", skip_serializing)]
    pub category_id: i64,
    /// Name of category. Must be between 1 and 40 characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Description of category. Must be less than 140 characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether or not transactions in this category should be treated as income.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_income: Option<bool>,
    /// Whether or not transactions in this category should be excluded from budgets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_from_budget: Option<bool>,
    /// Whether or not transactions in this category should be excluded from calculated totals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_from_totals: Option<bool>,
    /// Whether or not category should be archived.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    /// Assigns the category to an existing category group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<i64>,
}

impl Endpoint for UpdateCategory {
    const NAME: &'static str = "update_category";
    const DESCRIPTION: &'static str =
        "Update the properties for a single category or category group.";
    const FAILURE: &'static str = "Failed to update category";

    fn annotations() -> ToolAnnotations {
        ToolAnnotations::new().idempotent(true)
    }

    fn validate(&self) -> Result<(), String> {
        check_name(self.name.as_deref())?;
        check_description(self.description.as_deref())
    }

    fn request(&self) -> ApiRequest {
        ApiRequest::put(format!("/categories/{}", self.category_id), to_body(self))
    }
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct AddToCategoryGroup {
    /// Id of the parent group to add to.
    #[serde(skip_serializing)]
    pub group_id: i64,
    /// Array of category_id to include in the category group.
    #[serde(default, skip_serializing_if = "is_none_or_empty")]
    pub category_ids: Option<Vec<i64>>,
    /// Array of strings representing new categories to create and subsequently include in the category group.
    #[serde(default, skip_serializing_if = "is_none_or_empty")]
    pub new_categories: Option<Vec<String>>,
}

impl Endpoint for AddToCategoryGroup {
    const NAME: &'static str = "add_to_category_group";
    const DESCRIPTION: &'static str =
        "Add categories (either existing or new) to a single category group.";
    const FAILURE: &'static str = "Failed to add to category group";

    fn annotations() -> ToolAnnotations {
        ToolAnnotations::new().idempotent(false)
    }

    fn request(&self) -> ApiRequest {
        ApiRequest::post(
            format!("/categories/group/{}/add", self.group_id),
            to_body(self),
        )
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeleteCategory {
    /// Id of the category or the category group to delete.
    pub category_id: i64,
}

impl Endpoint for DeleteCategory {
    const NAME: &'static str = "delete_category";
    const DESCRIPTION: &'static str = "Delete a single category or category group. This will only work if there are no dependencies, such as existing budgets for the category, categorized transactions, categorized recurring items, etc. If there are dependents, this endpoint will return what the dependents are and how many there are.";
    const FAILURE: &'static str = "Failed to delete category";

    fn annotations() -> ToolAnnotations {
        ToolAnnotations::new().destructive(true)
    }

    fn request(&self) -> ApiRequest {
        ApiRequest::delete(format!("/categories/{}", self.category_id))
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ForceDeleteCategory {
    /// Id of the category or the category group to delete.
    pub category_id: i64,
}

impl Endpoint for ForceDeleteCategory {
    const NAME: &'static str = "force_delete_category";
    const DESCRIPTION: &'static str = "Delete a single category or category group and along with it, disassociate the category from any transactions, recurring items, budgets, etc. Note: it is best practice to first try the Delete Category endpoint to ensure you don't accidentally delete any data. Disassociation/deletion of the data arising from this endpoint is irreversible!";
    const FAILURE: &'static str = "Failed to force delete category";

    fn annotations() -> ToolAnnotations {
        ToolAnnotations::new().destructive(true)
    }

    fn request(&self) -> ApiRequest {
        ApiRequest::delete(format!("/categories/{}/force", self.category_id))
    }
}
