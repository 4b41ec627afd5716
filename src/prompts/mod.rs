//! Prompt templates for common Lunch Money workflows.
//!
//! Each prompt renders to a single user message that walks the agent through
//! the tool calls needed for the analysis. Month arguments (`YYYY-MM`) and
//! omitted date ranges resolve against the date passed in by the caller,
//! which is today's local date when served.

use chrono::{Datelike, Months, NaiveDate};
use rmcp::model::{
    GetPromptResult, JsonObject, ListPromptsResult, Prompt as McpPrompt,
    PromptArgument as McpPromptArgument, PromptMessage, PromptMessageRole,
};
use serde_json::Value;

use crate::tools::endpoint::{check_currency, check_date};

/// Error types for prompt operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PromptError {
    /// Prompt name not found.
    #[error("Prompt not found: {0}")]
    NotFound(String),
    /// An argument is not a string or has the wrong format.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

struct ArgumentSpec {
    name: &'static str,
    description: &'static str,
}

struct PromptSpec {
    name: &'static str,
    description: &'static str,
    arguments: &'static [ArgumentSpec],
}

const PROMPTS: &[PromptSpec] = &[
    PromptSpec {
        name: "monthly_spending_breakdown",
        description: "Analyze spending by category for a given month, combining transaction data with budget targets",
        arguments: &[
            ArgumentSpec {
                name: "month",
                description: "Month to analyze in YYYY-MM format. Defaults to current month.",
            },
            ArgumentSpec {
                name: "currency",
                description: "Currency code to filter by (e.g. 'usd'). Defaults to all currencies.",
            },
        ],
    },
    PromptSpec {
        name: "subscription_audit",
        description: "Review recurring items for a given month to audit subscriptions and recurring costs",
        arguments: &[ArgumentSpec {
            name: "month",
            description: "Month to audit in YYYY-MM format. Defaults to current month.",
        }],
    },
    PromptSpec {
        name: "net_worth_snapshot",
        description: "Calculate total net worth by combining manual assets, Plaid accounts, and crypto holdings",
        arguments: &[],
    },
    PromptSpec {
        name: "uncategorized_cleanup",
        description: "Find uncategorized transactions in a date range and suggest categories for them",
        arguments: &[
            ArgumentSpec {
                name: "start_date",
                description: "Start date in YYYY-MM-DD format. Defaults to first day of current month.",
            },
            ArgumentSpec {
                name: "end_date",
                description: "End date in YYYY-MM-DD format. Defaults to last day of current month.",
            },
        ],
    },
];

/// A calendar month with its first and last day.
#[derive(Debug, Clone, Copy, PartialEq)]
struct MonthRange {
    first: NaiveDate,
    last: NaiveDate,
}

impl MonthRange {
    fn containing(date: NaiveDate) -> Self {
        // Day 1 exists in every month.
        let first = date.with_day(1).unwrap_or(date);
        Self::starting(first)
    }

    fn starting(first: NaiveDate) -> Self {
        let last = first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(first);
        Self { first, last }
    }

    /// Parse `YYYY-MM`.
    fn parse(value: &str) -> Option<Self> {
        let (year, month) = value.split_once('-')?;
        if year.len() != 4 || month.len() != 2 {
            return None;
        }
        if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
            return None;
        }
        let first = NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)?;
        Some(Self::starting(first))
    }

    fn label(&self) -> String {
        self.first.format("%Y-%m").to_string()
    }

    fn start_date(&self) -> String {
        self.first.format("%Y-%m-%d").to_string()
    }

    fn end_date(&self) -> String {
        self.last.format("%Y-%m-%d").to_string()
    }
}

/// The fixed set of prompts this server offers.
#[derive(Debug, Clone, Default)]
pub struct PromptCatalog;

impl PromptCatalog {
    pub fn new() -> Self {
        Self
    }

    pub fn names(&self) -> Vec<&'static str> {
        PROMPTS.iter().map(|p| p.name).collect()
    }

    pub fn list_prompts(&self) -> ListPromptsResult {
        let prompts = PROMPTS
            .iter()
            .map(|spec| McpPrompt {
                name: spec.name.into(),
                title: None,
                description: Some(spec.description.into()),
                arguments: (!spec.arguments.is_empty()).then(|| {
                    spec.arguments
                        .iter()
                        .map(|arg| McpPromptArgument {
                            name: arg.name.to_string(),
                            title: None,
                            description: Some(arg.description.to_string()),
                            required: Some(false),
                        })
                        .collect()
                }),
                icons: None,
                meta: None,
            })
            .collect();

        ListPromptsResult {
            meta: None,
            prompts,
            next_cursor: None,
        }
    }

    /// Render prompt `name`, resolving relative dates against `today`.
    pub fn get_prompt(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
        today: NaiveDate,
    ) -> Result<GetPromptResult, PromptError> {
        let spec = PROMPTS
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| PromptError::NotFound(name.to_string()))?;
        let args = arguments.unwrap_or_default();
        let current = MonthRange::containing(today);

        let lines = match spec.name {
            "monthly_spending_breakdown" => {
                let month = month_arg(&args, "month")?.unwrap_or(current);
                let currency = string_arg(&args, "currency")?;
                check_currency("currency", currency)
                    .map_err(PromptError::InvalidArguments)?;
                monthly_spending_breakdown(month, currency)
            }
            "subscription_audit" => {
                let month = month_arg(&args, "month")?.unwrap_or(current);
                subscription_audit(month)
            }
            "net_worth_snapshot" => net_worth_snapshot(),
            "uncategorized_cleanup" => {
                let start = date_arg(&args, "start_date")?.unwrap_or_else(|| current.start_date());
                let end = date_arg(&args, "end_date")?.unwrap_or_else(|| current.end_date());
                uncategorized_cleanup(&start, &end)
            }
            other => return Err(PromptError::NotFound(other.to_string())),
        };

        Ok(GetPromptResult {
            description: Some(spec.description.to_string()),
            messages: vec![PromptMessage::new_text(
                PromptMessageRole::User,
                lines.join("\n"),
            )],
        })
    }
}

/// A string argument. Empty strings count as absent.
fn string_arg<'a>(args: &'a JsonObject, name: &str) -> Result<Option<&'a str>, PromptError> {
    match args.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(PromptError::InvalidArguments(format!(
            "{} must be a string",
            name
        ))),
    }
}

fn month_arg(args: &JsonObject, name: &str) -> Result<Option<MonthRange>, PromptError> {
    string_arg(args, name)?
        .map(|value| {
            MonthRange::parse(value).ok_or_else(|| {
                PromptError::InvalidArguments(format!("{} must be YYYY-MM format", name))
            })
        })
        .transpose()
}

fn date_arg(args: &JsonObject, name: &str) -> Result<Option<String>, PromptError> {
    match string_arg(args, name)? {
        Some(value) => {
            check_date(name, value).map_err(PromptError::InvalidArguments)?;
            Ok(Some(value.to_string()))
        }
        None => Ok(None),
    }
}

fn monthly_spending_breakdown(month: MonthRange, currency: Option<&str>) -> Vec<String> {
    let (start, end) = (month.start_date(), month.end_date());
    let mut fetch = format!(
        "1. Call get_transactions with start_date=\"{}\" and end_date=\"{}\".",
        start, end
    );
    if let Some(currency) = currency {
        fetch.push_str(&format!(
            " Use the currency filter \"{}\" when fetching transactions.",
            currency
        ));
    }
    vec![
        format!("Analyze my spending for {}.", month.label()),
        String::new(),
        "Steps:".to_string(),
        fetch,
        format!(
            "2. Call get_budget_summary with start_date=\"{}\" and end_date=\"{}\".",
            start, end
        ),
        "3. Group transactions by category and sum the amounts.".to_string(),
        "4. Compare actual spending against budgeted amounts where budgets exist.".to_string(),
        "5. Present a table with columns: Category, Spent, Budgeted, Remaining.".to_string(),
        "6. Highlight categories that are over budget.".to_string(),
        "7. Show total spent and total budgeted at the bottom.".to_string(),
    ]
}

fn subscription_audit(month: MonthRange) -> Vec<String> {
    vec![
        format!(
            "Audit my subscriptions and recurring costs for {}.",
            month.label()
        ),
        String::new(),
        "Steps:".to_string(),
        format!(
            "1. Call get_recurring_items with start_date=\"{}\" and end_date=\"{}\".",
            month.start_date(),
            month.end_date()
        ),
        "2. List each recurring item with its name, amount, cadence, and category.".to_string(),
        "3. Sort by amount descending (most expensive first).".to_string(),
        "4. Calculate the total monthly cost of all recurring items.".to_string(),
        "5. Flag any items that seem duplicated or unusually expensive.".to_string(),
    ]
}

fn net_worth_snapshot() -> Vec<String> {
    [
        "Give me a snapshot of my current net worth.",
        "",
        "Steps:",
        "1. Call get_all_assets to fetch manually-managed assets.",
        "2. Call get_all_plaid_accounts to fetch linked bank accounts.",
        "3. Call get_all_crypto to fetch cryptocurrency holdings.",
        "4. Group accounts by type (cash, investment, property, crypto, debt, etc.).",
        "5. Present a table with columns: Account Name, Type, Balance.",
        "6. Show subtotals for each type.",
        "7. Calculate total assets, total liabilities, and net worth.",
    ]
    .iter()
    .map(|line| line.to_string())
    .collect()
}

fn uncategorized_cleanup(start: &str, end: &str) -> Vec<String> {
    vec![
        format!(
            "Find and help me categorize uncategorized transactions from {} to {}.",
            start, end
        ),
        String::new(),
        "Steps:".to_string(),
        "1. Call get_all_categories to get the list of available categories.".to_string(),
        format!(
            "2. Call get_transactions with start_date=\"{}\" and end_date=\"{}\".",
            start, end
        ),
        "3. Filter to only transactions that have no category assigned.".to_string(),
        "4. For each uncategorized transaction, suggest a category based on the payee name and amount.".to_string(),
        "5. Present the uncategorized transactions in a table with columns: Date, Payee, Amount, Suggested Category.".to_string(),
        "6. Ask me which suggestions to apply before calling update_transaction for each one.".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::PromptMessageContent;
    use serde_json::json;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn args(value: Value) -> Option<JsonObject> {
        match value {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    fn text_of(result: &GetPromptResult) -> String {
        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.messages[0].role, PromptMessageRole::User);
        match &result.messages[0].content {
            PromptMessageContent::Text { text } => text.clone(),
            other => panic!("expected text content, got {other:?}"),
        }
    }

    #[test]
    fn test_lists_four_prompts() {
        let listed = PromptCatalog::new().list_prompts();
        let names: Vec<&str> = listed.prompts.iter().map(|p| &*p.name).collect();
        assert_eq!(
            names,
            vec![
                "monthly_spending_breakdown",
                "subscription_audit",
                "net_worth_snapshot",
                "uncategorized_cleanup"
            ]
        );
        let snapshot = &listed.prompts[2];
        assert!(snapshot.arguments.is_none());
        let breakdown_args = listed.prompts[0].arguments.as_ref().unwrap();
        assert_eq!(breakdown_args.len(), 2);
        assert!(breakdown_args.iter().all(|a| a.required == Some(false)));
    }

    #[test]
    fn test_month_defaults_to_current_month() {
        let result = PromptCatalog::new()
            .get_prompt("subscription_audit", None, day(2025, 11, 17))
            .unwrap();
        let text = text_of(&result);
        assert!(text.starts_with("Audit my subscriptions and recurring costs for 2025-11."));
        assert!(text.contains(
            "1. Call get_recurring_items with start_date=\"2025-11-01\" and end_date=\"2025-11-30\"."
        ));
    }

    #[test]
    fn test_leap_year_february() {
        let catalog = PromptCatalog::new();
        let leap = catalog
            .get_prompt(
                "monthly_spending_breakdown",
                args(json!({"month": "2024-02"})),
                day(2025, 1, 1),
            )
            .unwrap();
        assert!(text_of(&leap).contains("end_date=\"2024-02-29\""));

        let common = catalog
            .get_prompt(
                "monthly_spending_breakdown",
                args(json!({"month": "2023-02"})),
                day(2025, 1, 1),
            )
            .unwrap();
        assert!(text_of(&common).contains("end_date=\"2023-02-28\""));
    }

    #[test]
    fn test_currency_line_is_appended_to_first_step() {
        let result = PromptCatalog::new()
            .get_prompt(
                "monthly_spending_breakdown",
                args(json!({"month": "2024-12", "currency": "usd"})),
                day(2025, 1, 1),
            )
            .unwrap();
        let text = text_of(&result);
        assert!(text.contains(
            "1. Call get_transactions with start_date=\"2024-12-01\" and end_date=\"2024-12-31\". \
             Use the currency filter \"usd\" when fetching transactions."
        ));
        assert!(text.ends_with("7. Show total spent and total budgeted at the bottom."));
    }

    #[test]
    fn test_cleanup_defaults_each_bound_separately() {
        let result = PromptCatalog::new()
            .get_prompt(
                "uncategorized_cleanup",
                args(json!({"start_date": "2024-06-10"})),
                day(2024, 6, 20),
            )
            .unwrap();
        assert!(text_of(&result).starts_with(
            "Find and help me categorize uncategorized transactions from 2024-06-10 to 2024-06-30."
        ));
    }

    #[test]
    fn test_net_worth_ignores_arguments() {
        let result = PromptCatalog::new()
            .get_prompt("net_worth_snapshot", args(json!({"x": 1})), day(2024, 1, 1))
            .unwrap();
        assert!(text_of(&result).contains("3. Call get_all_crypto"));
    }

    #[test]
    fn test_malformed_arguments_are_rejected() {
        let catalog = PromptCatalog::new();
        let today = day(2024, 1, 1);
        assert_eq!(
            catalog
                .get_prompt("subscription_audit", args(json!({"month": "2024-13"})), today)
                .unwrap_err(),
            PromptError::InvalidArguments("month must be YYYY-MM format".to_string())
        );
        assert!(matches!(
            catalog.get_prompt("subscription_audit", args(json!({"month": 202401})), today),
            Err(PromptError::InvalidArguments(_))
        ));
        assert!(matches!(
            catalog.get_prompt(
                "uncategorized_cleanup",
                args(json!({"end_date": "2024-02-30"})),
                today
            ),
            Err(PromptError::InvalidArguments(_))
        ));
    }

    #[test]
    fn test_empty_month_means_default() {
        let result = PromptCatalog::new()
            .get_prompt(
                "subscription_audit",
                args(json!({"month": ""})),
                day(2024, 3, 5),
            )
            .unwrap();
        assert!(text_of(&result).contains("end_date=\"2024-03-31\""));
    }

    #[test]
    fn test_unknown_prompt() {
        assert_eq!(
            PromptCatalog::new()
                .get_prompt("weekly_digest", None, day(2024, 1, 1))
                .unwrap_err(),
            PromptError::NotFound("weekly_digest".to_string())
        );
    }
}
