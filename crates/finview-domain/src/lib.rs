//! finview-domain
//!
//! Pure data types for the finance view-model engine: identifiers, backend
//! payload shapes, validated entities, and the derived view structs handed to
//! the presentation layer. No I/O, no services.

pub mod budget;
pub mod category;
pub mod common;
pub mod expense;
pub mod session;
pub mod views;

pub use budget::*;
pub use category::*;
pub use common::*;
pub use expense::*;
pub use session::*;
pub use views::*;
