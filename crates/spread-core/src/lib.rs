//! spread-core
//!
//! Budget allocation logic: estimates, month distribution, and budget-year copies.
//! Depends on spread-domain. Collaborators (categories, budget years, records,
//! options) are reached through the traits in [`registry`].

pub mod allocator;
pub mod error;
pub mod estimate;
pub mod memory;
pub mod registry;
pub mod stats;

pub use allocator::*;
pub use error::CoreError;
pub use estimate::*;
pub use memory::{BudgetBook, InMemoryBudgetBook};
pub use registry::*;
