use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::frequency::days_in_month;
use super::populate::PopulatedExpense;
use crate::errors::ExpenseError;

/// Inclusive date range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ExpenseError> {
        if end < start {
            return Err(ExpenseError::Validation(format!(
                "Window end {end} precedes start {start}"
            )));
        }
        Ok(Self { start, end })
    }

    /// First through last day of the given month.
    pub fn month(year: i32, month: u32) -> Result<Self, ExpenseError> {
        let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            ExpenseError::Validation(format!("Month {month} of year {year} is out of range"))
        })?;
        let end = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month)).unwrap();
        Ok(Self { start, end })
    }

    /// The month window containing `date`.
    pub fn month_of(date: NaiveDate) -> Self {
        let start = date.with_day(1).unwrap();
        let end = date
            .with_day(days_in_month(date.year(), date.month()))
            .unwrap();
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// How an expense list is narrowed for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseFilter {
    /// Rows falling inside the given calendar month.
    Month { year: i32, month: u32 },
    /// Rows inside a custom window.
    Range(DateWindow),
    /// Every row.
    All,
}

/// Narrows a populated list by date. An out-of-range month yields no rows
/// rather than an error.
pub fn filter_expenses(
    expenses: &[PopulatedExpense],
    filter: ExpenseFilter,
) -> Vec<&PopulatedExpense> {
    let window = match filter {
        ExpenseFilter::All => return expenses.iter().collect(),
        ExpenseFilter::Month { year, month } => match DateWindow::month(year, month) {
            Ok(window) => window,
            Err(_) => return Vec::new(),
        },
        ExpenseFilter::Range(window) => window,
    };
    expenses
        .iter()
        .filter(|populated| window.contains(populated.expense.expense_date))
        .collect()
}

/// Case-insensitive match on the expense name or its category name.
/// A blank term matches everything.
pub fn search_expenses<'a>(
    expenses: &'a [PopulatedExpense],
    term: &str,
) -> Vec<&'a PopulatedExpense> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return expenses.iter().collect();
    }
    expenses
        .iter()
        .filter(|populated| {
            populated.expense.name.to_lowercase().contains(&needle)
                || populated
                    .category
                    .as_ref()
                    .is_some_and(|category| category.name.to_lowercase().contains(&needle))
        })
        .collect()
}
