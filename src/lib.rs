#![doc(test(attr(deny(warnings))))]

//! Budget Spread turns periodic budget declarations into month-by-month
//! estimates and copies budget years between annual and monthly breakdowns.

pub mod errors;
pub mod utils;
pub mod workspace;

pub use spread_config as config;
pub use spread_core as allocation;
pub use spread_domain as domain;
pub use spread_storage_json as storage;

pub use errors::{BudgetError, Result};
pub use workspace::BudgetWorkspace;

use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes global tracing and logs the build this process runs.
pub fn init() {
    INIT.call_once(|| {
        utils::init_tracing();
        let build = utils::build_info::current();
        tracing::info!(
            version = build.version,
            git = build.git_hash,
            profile = build.profile,
            "Budget Spread tracing initialized."
        );
    });
}
