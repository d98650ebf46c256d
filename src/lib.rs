#![doc(test(attr(deny(warnings))))]

//! Finance Tracker records income and expense transactions and savings goals,
//! derives dashboards and yearly reports from them, and exports CSV files.
//!
//! The record model and aggregation services live in the `ftrack-*` crates; this
//! crate wires them to on-disk storage, configuration and the command shell.

pub mod cli;
pub mod currency;
pub mod errors;
pub mod export;
pub mod utils;

pub use errors::TrackerError;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Finance Tracker tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
