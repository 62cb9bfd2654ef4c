//! Annual and month-scoped budget years.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{common::BudgetYearId, DomainError};

/// Distinguishes a whole-year budget from one scoped to a single month.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase", try_from = "StoredBudgetYearKind")]
pub enum BudgetYearKind {
    Annual { year: i32 },
    /// `month` is 1-based.
    Monthly { year: i32, month: u32 },
}

/// Unchecked wire form, validated through [`BudgetYearKind::monthly`] on load.
#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum StoredBudgetYearKind {
    Annual { year: i32 },
    Monthly { year: i32, month: u32 },
}

impl TryFrom<StoredBudgetYearKind> for BudgetYearKind {
    type Error = DomainError;

    fn try_from(stored: StoredBudgetYearKind) -> Result<Self, Self::Error> {
        match stored {
            StoredBudgetYearKind::Annual { year } => Ok(BudgetYearKind::annual(year)),
            StoredBudgetYearKind::Monthly { year, month } => BudgetYearKind::monthly(year, month),
        }
    }
}

impl BudgetYearKind {
    pub fn annual(year: i32) -> Self {
        BudgetYearKind::Annual { year }
    }

    /// Builds a month-scoped kind, rejecting months outside 1..=12.
    pub fn monthly(year: i32, month: u32) -> Result<Self, DomainError> {
        if !(1..=12).contains(&month) {
            return Err(DomainError::InvalidBudgetYear(format!("{year:04}-{month:02}")));
        }
        Ok(BudgetYearKind::Monthly { year, month })
    }

    pub fn year(&self) -> i32 {
        match self {
            BudgetYearKind::Annual { year } | BudgetYearKind::Monthly { year, .. } => *year,
        }
    }

    pub fn is_annual(&self) -> bool {
        matches!(self, BudgetYearKind::Annual { .. })
    }

    pub fn is_monthly(&self) -> bool {
        matches!(self, BudgetYearKind::Monthly { .. })
    }

    /// Label in the `YYYY` / `YYYY-MM` form.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for BudgetYearKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetYearKind::Annual { year } => write!(f, "{year:04}"),
            BudgetYearKind::Monthly { year, month } => write!(f, "{year:04}-{month:02}"),
        }
    }
}

impl FromStr for BudgetYearKind {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidBudgetYear(value.to_string());
        let trimmed = value.trim();
        let digits = |part: &str, len: usize| {
            part.len() == len && part.chars().all(|c| c.is_ascii_digit())
        };
        match trimmed.split_once('-') {
            None if digits(trimmed, 4) => {
                let year = trimmed.parse().map_err(|_| invalid())?;
                Ok(BudgetYearKind::Annual { year })
            }
            Some((year, month)) if digits(year, 4) && digits(month, 2) => {
                let year = year.parse().map_err(|_| invalid())?;
                let month = month.parse().map_err(|_| invalid())?;
                BudgetYearKind::monthly(year, month).map_err(|_| invalid())
            }
            _ => Err(invalid()),
        }
    }
}

/// A registered budget year.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetYear {
    pub id: BudgetYearId,
    pub kind: BudgetYearKind,
}

impl BudgetYear {
    pub fn new(id: BudgetYearId, kind: BudgetYearKind) -> Self {
        Self { id, kind }
    }

    pub fn name(&self) -> String {
        self.kind.label()
    }
}
