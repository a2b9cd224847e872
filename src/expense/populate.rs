use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::category::Category;
use super::expense::Expense;
use super::frequency::Frequency;
use super::recurring::RecurringDefinition;

/// Category fields carried alongside a row for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategorySummary {
    pub name: String,
    pub color: String,
}

/// Originating-rule fields carried alongside an expense for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecurringSummary {
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

/// An expense joined with its category and originating rule, when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulatedExpense {
    #[serde(flatten)]
    pub expense: Expense,
    pub category: Option<CategorySummary>,
    pub recurring: Option<RecurringSummary>,
}

/// A recurring definition joined with its category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulatedDefinition {
    #[serde(flatten)]
    pub definition: RecurringDefinition,
    pub category: Option<CategorySummary>,
}

/// Joins expenses with their categories and originating rules. Dangling
/// references resolve to `None` rather than failing the whole batch.
pub fn populate_expenses(
    expenses: &[Expense],
    categories: &[Category],
    definitions: &[RecurringDefinition],
) -> Vec<PopulatedExpense> {
    expenses
        .iter()
        .map(|expense| {
            let category = expense
                .category_id
                .and_then(|id| categories.iter().find(|category| category.id == id))
                .map(|category| CategorySummary {
                    name: category.name.clone(),
                    color: category.color.clone(),
                });
            let recurring = expense
                .recurring_id
                .and_then(|id| definitions.iter().find(|definition| definition.id == id))
                .map(|definition| RecurringSummary {
                    frequency: definition.frequency,
                    start_date: definition.start_date,
                    end_date: definition.end_date,
                });
            PopulatedExpense {
                expense: expense.clone(),
                category,
                recurring,
            }
        })
        .collect()
}

/// Joins recurring definitions with their categories.
pub fn populate_definitions(
    definitions: &[RecurringDefinition],
    categories: &[Category],
) -> Vec<PopulatedDefinition> {
    definitions
        .iter()
        .map(|definition| {
            let category = definition
                .category_id
                .and_then(|id| categories.iter().find(|category| category.id == id))
                .map(|category| CategorySummary {
                    name: category.name.clone(),
                    color: category.color.clone(),
                });
            PopulatedDefinition {
                definition: definition.clone(),
                category,
            }
        })
        .collect()
}
