//! Abstractions over the expense and recurring-rule backends.

pub mod memory;

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::expense::{Expense, NewExpense, RecurringDefinition};

pub type Result<T> = std::result::Result<T, StoreError>;

/// Failures reported by a backend. `DuplicateOccurrence` is the backend
/// refusing a second expense for the same rule and day; callers treat it as
/// already-done rather than as a fault.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    #[error("Store rejected the request: {0}")]
    Rejected(String),
    #[error("Occurrence of `{recurring_id}` on {date} already exists")]
    DuplicateOccurrence { recurring_id: Uuid, date: NaiveDate },
}

/// Read side for recurring definitions.
pub trait RecurringStore: Send + Sync {
    /// Definitions owned by `user_id` to consider for materialization.
    fn list_active(&self, user_id: Uuid) -> Result<Vec<RecurringDefinition>>;
}

/// Backend holding booked expenses.
pub trait ExpenseStore: Send + Sync {
    /// Dates on which an expense for `recurring_id` is already booked.
    fn occurrence_dates(&self, recurring_id: Uuid) -> Result<Vec<NaiveDate>>;

    /// Books a single expense.
    fn create(&self, request: NewExpense) -> Result<Expense>;
}

pub use memory::MemoryStore;
