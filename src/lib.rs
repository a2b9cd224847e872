#![doc(test(attr(deny(warnings))))]

//! Expense Core materializes recurring expense definitions into concrete
//! booked expenses and offers the scheduling, reconciliation, and display
//! primitives behind that flow.

pub mod errors;
pub mod expense;
pub mod store;
pub mod sync;
pub mod time;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Expense Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
