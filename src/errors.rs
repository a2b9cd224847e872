use thiserror::Error;

use crate::store::StoreError;

/// Error type that captures scheduling and synchronization failures.
#[derive(Debug, Error)]
pub enum ExpenseError {
    #[error("Invalid frequency: {0}")]
    InvalidFrequency(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Store read error: {0}")]
    StoreRead(#[source] StoreError),
}
