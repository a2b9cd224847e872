use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::frequency::Frequency;
use crate::errors::ExpenseError;

/// Rule from which concrete expenses are materialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringDefinition {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Option<Uuid>,
    pub name: String,
    pub amount: f64,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl RecurringDefinition {
    pub fn new(
        user_id: Uuid,
        category_id: Option<Uuid>,
        name: impl Into<String>,
        amount: f64,
        frequency: Frequency,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> Result<Self, ExpenseError> {
        let definition = Self {
            id: Uuid::new_v4(),
            user_id,
            category_id,
            name: name.into(),
            amount,
            frequency,
            start_date,
            end_date,
            created_at: Utc::now(),
        };
        definition.validate()?;
        Ok(definition)
    }

    pub fn validate(&self) -> Result<(), ExpenseError> {
        if self.name.trim().is_empty() {
            return Err(ExpenseError::Validation("Name must not be blank".into()));
        }
        if self.amount.is_nan() || self.amount <= 0.0 {
            return Err(ExpenseError::Validation(format!(
                "Amount must be positive, got {}",
                self.amount
            )));
        }
        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(ExpenseError::Validation(format!(
                    "End date {} precedes start date {}",
                    end, self.start_date
                )));
            }
        }
        Ok(())
    }

    /// Last date an occurrence may fall on: the earlier of the definition's
    /// own end and the caller's horizon.
    fn occurrence_limit(&self, horizon: NaiveDate) -> NaiveDate {
        match self.end_date {
            Some(end) if end < horizon => end,
            _ => horizon,
        }
    }

    /// Every date this definition is due, from its start through `horizon`
    /// inclusive. Strictly increasing; empty when the start lies beyond the
    /// limit.
    pub fn expected_occurrences(&self, horizon: NaiveDate) -> Vec<NaiveDate> {
        let limit = self.occurrence_limit(horizon);
        let mut dates = Vec::new();
        let mut current = self.start_date;
        while current <= limit {
            dates.push(current);
            current = self.frequency.next_date(current);
        }
        dates
    }
}

/// Expected occurrences through `horizon` that have no booked expense yet,
/// in schedule order. Booked dates are matched by calendar day alone.
pub fn missing_occurrences(
    definition: &RecurringDefinition,
    existing: &[NaiveDate],
    horizon: NaiveDate,
) -> Vec<NaiveDate> {
    let booked: HashSet<NaiveDate> = existing.iter().copied().collect();
    definition
        .expected_occurrences(horizon)
        .into_iter()
        .filter(|date| !booked.contains(date))
        .collect()
}
