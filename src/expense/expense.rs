use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::recurring::RecurringDefinition;

/// A booked expense. Rows materialized from a recurring definition carry its id
/// in `recurring_id`; manually entered rows leave it empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Option<Uuid>,
    pub name: String,
    pub amount: f64,
    pub expense_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Turns a creation request into a stored row with fresh identity.
    pub fn from_request(request: NewExpense) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: request.user_id,
            category_id: request.category_id,
            name: request.name,
            amount: request.amount,
            expense_date: request.expense_date,
            recurring_id: request.recurring_id,
            created_at: Utc::now(),
        }
    }
}

/// Payload for creating an expense. Identity and timestamps are assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExpense {
    pub user_id: Uuid,
    pub category_id: Option<Uuid>,
    pub name: String,
    pub amount: f64,
    pub expense_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_id: Option<Uuid>,
}

impl NewExpense {
    /// Request for one occurrence of a recurring definition, copying its
    /// name, amount and category as they stand today.
    pub fn for_occurrence(definition: &RecurringDefinition, date: NaiveDate) -> Self {
        Self {
            user_id: definition.user_id,
            category_id: definition.category_id,
            name: definition.name.clone(),
            amount: definition.amount,
            expense_date: date,
            recurring_id: Some(definition.id),
        }
    }

    /// Request for a one-off expense entered by hand.
    pub fn manual(
        user_id: Uuid,
        category_id: Option<Uuid>,
        name: impl Into<String>,
        amount: f64,
        expense_date: NaiveDate,
    ) -> Self {
        Self {
            user_id,
            category_id,
            name: name.into(),
            amount,
            expense_date,
            recurring_id: None,
        }
    }
}
