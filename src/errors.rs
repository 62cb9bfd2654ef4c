use std::result::Result as StdResult;

use spread_config::ConfigError;
use spread_core::CoreError;
use spread_domain::DomainError;
use thiserror::Error;

/// Unified error type for the domain, allocation, storage and config layers.
#[derive(Error, Debug)]
pub enum BudgetError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = StdResult<T, BudgetError>;

impl From<DomainError> for BudgetError {
    fn from(err: DomainError) -> Self {
        BudgetError::Core(CoreError::from(err))
    }
}
