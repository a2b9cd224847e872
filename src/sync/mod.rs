//! Brings booked expenses in line with their recurring definitions.

use chrono::NaiveDate;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::ExpenseError;
use crate::expense::{missing_occurrences, Expense, NewExpense, RecurringDefinition};
use crate::store::{ExpenseStore, RecurringStore, StoreError};
use crate::time::{Clock, SystemClock};

/// A single occurrence the backend refused to book.
#[derive(Debug, Clone)]
pub struct OccurrenceFailure {
    pub recurring_id: Uuid,
    pub date: NaiveDate,
    pub error: StoreError,
}

/// A definition skipped wholesale because its booked dates could not be read.
#[derive(Debug, Clone)]
pub struct DefinitionFailure {
    pub recurring_id: Uuid,
    pub error: StoreError,
}

/// What a sync run did.
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    pub created: Vec<Expense>,
    pub write_failures: Vec<OccurrenceFailure>,
    pub read_failures: Vec<DefinitionFailure>,
    pub definitions_seen: usize,
    pub already_booked: usize,
}

impl SyncReport {
    pub fn is_clean(&self) -> bool {
        self.write_failures.is_empty() && self.read_failures.is_empty()
    }

    fn merge(&mut self, outcome: MaterializeOutcome) {
        self.created.extend(outcome.created);
        self.write_failures.extend(outcome.failures);
        self.already_booked += outcome.already_booked;
    }
}

/// Result of booking one definition's missing occurrences.
#[derive(Debug, Clone, Default)]
pub struct MaterializeOutcome {
    pub created: Vec<Expense>,
    pub failures: Vec<OccurrenceFailure>,
    pub already_booked: usize,
}

/// Books the given occurrences one at a time, oldest first. A refused date is
/// recorded and the remaining dates still go through; a duplicate counts as
/// already booked, not as a failure.
pub fn materialize(
    store: &dyn ExpenseStore,
    definition: &RecurringDefinition,
    missing: &[NaiveDate],
) -> MaterializeOutcome {
    let mut outcome = MaterializeOutcome::default();
    for &date in missing {
        let request = NewExpense::for_occurrence(definition, date);
        match store.create(request) {
            Ok(expense) => outcome.created.push(expense),
            Err(StoreError::DuplicateOccurrence { .. }) => {
                debug!(
                    "occurrence of `{}` on {} already booked",
                    definition.name, date
                );
                outcome.already_booked += 1;
            }
            Err(err) => {
                warn!("failed to book `{}` on {}: {}", definition.name, date, err);
                outcome.failures.push(OccurrenceFailure {
                    recurring_id: definition.id,
                    date,
                    error: err,
                });
            }
        }
    }
    outcome
}

/// Walks a user's recurring definitions and books whatever is missing
/// through the clock's current date.
pub struct SyncEngine {
    definitions: Box<dyn RecurringStore>,
    expenses: Box<dyn ExpenseStore>,
    clock: Box<dyn Clock>,
}

impl SyncEngine {
    pub fn new(definitions: Box<dyn RecurringStore>, expenses: Box<dyn ExpenseStore>) -> Self {
        Self {
            definitions,
            expenses,
            clock: Box::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Materializes every due occurrence for the user. One definition's
    /// failure never blocks the others; listing failures abort the run.
    pub fn sync_user(&self, user_id: Uuid) -> Result<SyncReport, ExpenseError> {
        let definitions = self
            .definitions
            .list_active(user_id)
            .map_err(ExpenseError::StoreRead)?;
        let today = self.clock.today();

        let mut report = SyncReport::default();
        report.definitions_seen = definitions.len();
        for definition in &definitions {
            self.sync_one(definition, today, &mut report);
        }
        info!(
            "synced {} definition(s) for user {}: {} created, {} failed",
            report.definitions_seen,
            user_id,
            report.created.len(),
            report.write_failures.len()
        );
        Ok(report)
    }

    /// Backfills a single definition, typically right after it was created.
    pub fn sync_definition(&self, definition: &RecurringDefinition) -> SyncReport {
        let today = self.clock.today();
        let mut report = SyncReport::default();
        report.definitions_seen = 1;
        self.sync_one(definition, today, &mut report);
        report
    }

    fn sync_one(
        &self,
        definition: &RecurringDefinition,
        today: NaiveDate,
        report: &mut SyncReport,
    ) {
        let existing = match self.expenses.occurrence_dates(definition.id) {
            Ok(dates) => dates,
            Err(err) => {
                warn!(
                    "skipping `{}`: booked dates unavailable: {}",
                    definition.name, err
                );
                report.read_failures.push(DefinitionFailure {
                    recurring_id: definition.id,
                    error: err,
                });
                return;
            }
        };
        let missing = missing_occurrences(definition, &existing, today);
        debug!(
            "`{}` is missing {} occurrence(s) through {}",
            definition.name,
            missing.len(),
            today
        );
        let outcome = materialize(self.expenses.as_ref(), definition, &missing);
        report.merge(outcome);
    }
}
