//! spread-domain
//!
//! Pure budgeting data types (periods, budget years, entries, stats matrices).
//! No I/O, no storage. Only data types and core enums.

pub mod budget_year;
pub mod category;
pub mod common;
pub mod entry;
pub mod error;
pub mod period;
pub mod stats;

pub use budget_year::*;
pub use category::*;
pub use common::*;
pub use entry::*;
pub use error::DomainError;
pub use period::*;
pub use stats::*;
