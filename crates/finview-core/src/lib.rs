//! finview-core
//!
//! View-model services for the finance tracker: boundary validation, the
//! category tree, budget period resolution, and spending aggregation.
//! Depends on finview-domain. No I/O, no terminal output, no storage.

pub mod category_tree;
pub mod dashboard_service;
pub mod error;
pub mod expense_service;
pub mod filters;
pub mod intake;
pub mod period_resolver;
pub mod report_service;
pub mod summary_aggregator;
pub mod time;


pub use category_tree::*;
pub use dashboard_service::*;
pub use error::{CoreError, CoreResult};
pub use expense_service::*;
pub use filters::*;
pub use intake::*;
pub use period_resolver::*;
pub use report_service::*;
pub use summary_aggregator::*;
pub use time::*;
