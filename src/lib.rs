#![doc(test(attr(deny(warnings))))]

//! Finview turns backend finance records (categories, expenses, budgets)
//! into display-ready view models: category trees, budget utilization,
//! spending breakdowns, alerts, and trends.

pub mod cli;
pub mod engine;
pub mod errors;
pub mod snapshot;
pub mod utils;

pub use engine::{
    session_from_config, BudgetsView, CategoriesView, ExpensesView, ReportsView, ViewModelEngine,
};
pub use errors::{FinviewError, Result};
pub use snapshot::Snapshot;

pub use finview_config;
pub use finview_core;
pub use finview_domain;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("finview tracing initialized");
    });
}
