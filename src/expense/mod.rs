//! Expense domain models, scheduling rules, and display helpers.

pub mod category;
#[allow(clippy::module_inception)]
pub mod expense;
pub mod filter;
pub mod frequency;
pub mod populate;
pub mod recurring;

pub use category::Category;
pub use expense::{Expense, NewExpense};
pub use filter::{filter_expenses, search_expenses, DateWindow, ExpenseFilter};
pub use frequency::Frequency;
pub use populate::{
    populate_definitions, populate_expenses, CategorySummary, PopulatedDefinition,
    PopulatedExpense, RecurringSummary,
};
pub use recurring::{missing_occurrences, RecurringDefinition};
