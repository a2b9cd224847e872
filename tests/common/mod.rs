use chrono::NaiveDate;
use uuid::Uuid;

use expense_core::expense::{Expense, Frequency, NewExpense, RecurringDefinition};
use expense_core::store::{ExpenseStore, MemoryStore, RecurringStore, Result, StoreError};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn monthly_definition(user_id: Uuid, name: &str, start: NaiveDate) -> RecurringDefinition {
    RecurringDefinition::new(user_id, None, name, 100.0, Frequency::Monthly, start, None)
        .expect("valid definition")
}

/// Refuses to book the configured dates; everything else passes through.
pub struct RejectingStore {
    pub inner: MemoryStore,
    pub reject_dates: Vec<NaiveDate>,
}

impl ExpenseStore for RejectingStore {
    fn occurrence_dates(&self, recurring_id: Uuid) -> Result<Vec<NaiveDate>> {
        self.inner.occurrence_dates(recurring_id)
    }

    fn create(&self, request: NewExpense) -> Result<Expense> {
        if self.reject_dates.contains(&request.expense_date) {
            return Err(StoreError::Rejected(format!(
                "constraint violation on {}",
                request.expense_date
            )));
        }
        self.inner.create(request)
    }
}

/// Cannot read booked dates for one definition; writes still work.
pub struct BrokenReads {
    pub inner: MemoryStore,
    pub broken_id: Uuid,
}

impl ExpenseStore for BrokenReads {
    fn occurrence_dates(&self, recurring_id: Uuid) -> Result<Vec<NaiveDate>> {
        if recurring_id == self.broken_id {
            return Err(StoreError::Unavailable("read timeout".into()));
        }
        self.inner.occurrence_dates(recurring_id)
    }

    fn create(&self, request: NewExpense) -> Result<Expense> {
        self.inner.create(request)
    }
}

/// Reports no booked dates even when rows exist, so repeat bookings reach
/// the backend's uniqueness constraint.
pub struct StaleReads {
    pub inner: MemoryStore,
}

impl ExpenseStore for StaleReads {
    fn occurrence_dates(&self, _recurring_id: Uuid) -> Result<Vec<NaiveDate>> {
        Ok(Vec::new())
    }

    fn create(&self, request: NewExpense) -> Result<Expense> {
        self.inner.create(request)
    }
}

/// Definition source whose listing always fails.
pub struct UnavailableDefinitions;

impl RecurringStore for UnavailableDefinitions {
    fn list_active(&self, _user_id: Uuid) -> Result<Vec<RecurringDefinition>> {
        Err(StoreError::Unavailable("definitions offline".into()))
    }
}
