//! Stored budget declarations.

use serde::{Deserialize, Serialize};

use crate::{
    common::{BudgetEntryId, BudgetYearId, CategoryId},
    period::BudgetPeriod,
};

/// A (budget year, category) declaration of an amount recurring at `period`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetEntry {
    /// `None` until the entry has been saved by a record store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<BudgetEntryId>,
    pub budget_year_id: BudgetYearId,
    pub category_id: CategoryId,
    #[serde(default)]
    pub period: BudgetPeriod,
    pub amount: f64,
    #[serde(default)]
    pub notes: String,
}

impl BudgetEntry {
    pub fn new(
        budget_year_id: BudgetYearId,
        category_id: CategoryId,
        period: BudgetPeriod,
        amount: f64,
    ) -> Self {
        Self {
            id: None,
            budget_year_id,
            category_id,
            period,
            amount,
            notes: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Unsaved copy of this entry reassigned to another budget year.
    pub fn duplicate_into(&self, budget_year_id: BudgetYearId) -> Self {
        Self {
            id: None,
            budget_year_id,
            ..self.clone()
        }
    }
}
