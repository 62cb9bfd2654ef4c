use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Invalid budget period: {0}")]
    InvalidPeriod(String),
    #[error("Invalid budget year label: {0}")]
    InvalidBudgetYear(String),
    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
}
