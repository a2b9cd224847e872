//! In-memory backend used by tests and single-process embedders.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use uuid::Uuid;

use super::{ExpenseStore, RecurringStore, Result, StoreError};
use crate::expense::{Category, Expense, NewExpense, RecurringDefinition};

#[derive(Debug, Default)]
struct Tables {
    definitions: Vec<RecurringDefinition>,
    expenses: Vec<Expense>,
    categories: Vec<Category>,
}

/// Shared tables behind both store traits. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> RwLockReadGuard<'_, Tables> {
        self.inner.read().expect("Tables lock poisoned")
    }

    fn tables_mut(&self) -> RwLockWriteGuard<'_, Tables> {
        self.inner.write().expect("Tables lock poisoned")
    }

    pub fn insert_definition(&self, definition: RecurringDefinition) {
        self.tables_mut().definitions.push(definition);
    }

    /// Replaces a definition in place. Expenses already booked from it keep
    /// the values they were created with.
    pub fn update_definition(&self, definition: RecurringDefinition) -> bool {
        let mut tables = self.tables_mut();
        match tables
            .definitions
            .iter_mut()
            .find(|existing| existing.id == definition.id)
        {
            Some(existing) => {
                *existing = definition;
                true
            }
            None => false,
        }
    }

    /// Removes a definition. Expenses booked from it stay untouched.
    pub fn delete_definition(&self, id: Uuid) -> bool {
        let mut tables = self.tables_mut();
        let before = tables.definitions.len();
        tables.definitions.retain(|definition| definition.id != id);
        tables.definitions.len() != before
    }

    pub fn insert_category(&self, category: Category) {
        self.tables_mut().categories.push(category);
    }

    pub fn definitions_for_user(&self, user_id: Uuid) -> Vec<RecurringDefinition> {
        self.tables()
            .definitions
            .iter()
            .filter(|definition| definition.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn categories_for_user(&self, user_id: Uuid) -> Vec<Category> {
        self.tables()
            .categories
            .iter()
            .filter(|category| category.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Expenses for a user, newest first.
    pub fn expenses_for_user(&self, user_id: Uuid) -> Vec<Expense> {
        let mut rows: Vec<Expense> = self
            .tables()
            .expenses
            .iter()
            .filter(|expense| expense.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.expense_date.cmp(&a.expense_date));
        rows
    }

    pub fn expense_count(&self) -> usize {
        self.tables().expenses.len()
    }
}

impl RecurringStore for MemoryStore {
    fn list_active(&self, user_id: Uuid) -> Result<Vec<RecurringDefinition>> {
        Ok(self.definitions_for_user(user_id))
    }
}

impl ExpenseStore for MemoryStore {
    fn occurrence_dates(&self, recurring_id: Uuid) -> Result<Vec<NaiveDate>> {
        Ok(self
            .tables()
            .expenses
            .iter()
            .filter(|expense| expense.recurring_id == Some(recurring_id))
            .map(|expense| expense.expense_date)
            .collect())
    }

    fn create(&self, request: NewExpense) -> Result<Expense> {
        let mut tables = self.tables_mut();
        // One expense per rule and day. Manual rows are unconstrained.
        if let Some(recurring_id) = request.recurring_id {
            let duplicate = tables.expenses.iter().any(|existing| {
                existing.recurring_id == Some(recurring_id)
                    && existing.expense_date == request.expense_date
            });
            if duplicate {
                return Err(StoreError::DuplicateOccurrence {
                    recurring_id,
                    date: request.expense_date,
                });
            }
        }
        let expense = Expense::from_request(request);
        tables.expenses.push(expense.clone());
        Ok(expense)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expense::Frequency;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn sample_definition(user_id: Uuid) -> RecurringDefinition {
        RecurringDefinition::new(
            user_id,
            None,
            "Rent",
            1200.0,
            Frequency::Monthly,
            date(2025, 1, 1),
            None,
        )
        .expect("valid definition")
    }

    #[test]
    fn create_rejects_second_occurrence_for_same_day() {
        let store = MemoryStore::new();
        let definition = sample_definition(Uuid::new_v4());

        store
            .create(NewExpense::for_occurrence(&definition, date(2025, 1, 1)))
            .expect("first booking succeeds");
        let err = store
            .create(NewExpense::for_occurrence(&definition, date(2025, 1, 1)))
            .expect_err("second booking fails");
        assert!(
            matches!(err, StoreError::DuplicateOccurrence { recurring_id, .. } if recurring_id == definition.id),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn manual_expenses_may_share_a_day() {
        let store = MemoryStore::new();
        let user_id = Uuid::new_v4();
        let request = NewExpense::manual(user_id, None, "Coffee", 4.5, date(2025, 1, 1));

        store.create(request.clone()).expect("first manual row");
        store.create(request).expect("second manual row");
        assert_eq!(store.expense_count(), 2);
    }

    #[test]
    fn delete_definition_keeps_booked_expenses() {
        let store = MemoryStore::new();
        let user_id = Uuid::new_v4();
        let definition = sample_definition(user_id);
        store.insert_definition(definition.clone());
        store
            .create(NewExpense::for_occurrence(&definition, date(2025, 1, 1)))
            .expect("booking succeeds");

        assert!(store.delete_definition(definition.id));
        assert!(store.definitions_for_user(user_id).is_empty());
        assert_eq!(store.expenses_for_user(user_id).len(), 1);
    }

    #[test]
    fn stored_categories_feed_display_joins() {
        let store = MemoryStore::new();
        let user_id = Uuid::new_v4();
        let category = Category::new(user_id, "Food", "#00aa00");
        store.insert_category(category.clone());
        let definition = RecurringDefinition::new(
            user_id,
            Some(category.id),
            "Groceries",
            80.0,
            Frequency::Weekly,
            date(2025, 1, 6),
            None,
        )
        .expect("valid definition");
        store.insert_definition(definition.clone());
        store
            .create(NewExpense::for_occurrence(&definition, date(2025, 1, 6)))
            .expect("booking succeeds");

        let populated = crate::expense::populate_expenses(
            &store.expenses_for_user(user_id),
            &store.categories_for_user(user_id),
            &store.definitions_for_user(user_id),
        );
        assert_eq!(populated.len(), 1);
        assert_eq!(
            populated[0].category.as_ref().map(|c| c.name.as_str()),
            Some("Food")
        );
        assert_eq!(
            populated[0].recurring.as_ref().map(|r| r.frequency),
            Some(Frequency::Weekly)
        );
    }

    #[test]
    fn expenses_for_user_sorts_newest_first() {
        let store = MemoryStore::new();
        let user_id = Uuid::new_v4();
        for day in [3, 1, 2] {
            store
                .create(NewExpense::manual(user_id, None, "Row", 1.0, date(2025, 5, day)))
                .expect("manual row");
        }

        let dates: Vec<NaiveDate> = store
            .expenses_for_user(user_id)
            .iter()
            .map(|expense| expense.expense_date)
            .collect();
        assert_eq!(dates, vec![date(2025, 5, 3), date(2025, 5, 2), date(2025, 5, 1)]);
    }
}
