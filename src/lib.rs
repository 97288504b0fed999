#![doc(test(attr(deny(warnings))))]

//! Zeni Core provides the domain logic behind a personal-finance tracker:
//! keyword-based transaction categorization, recurring-transaction
//! materialization, daily balance classification, and the supporting
//! category/budget/user services.

pub mod categorizer;
pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod store;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Zeni Core tracing initialized.");
    });
}
