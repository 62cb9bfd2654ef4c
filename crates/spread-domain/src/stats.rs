//! Category by month estimate matrix.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::common::CategoryId;

pub const MONTHS_PER_YEAR: usize = 12;
/// Slot holding the yearly estimate of the annual budget. Slots 0..12 are months.
pub const ANNUAL_SLOT: usize = MONTHS_PER_YEAR;

/// Estimated spend per category, keyed by slot (month index or [`ANNUAL_SLOT`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatsMatrix(BTreeMap<CategoryId, BTreeMap<usize, f64>>);

impl BudgetStatsMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category_id: CategoryId, slot: usize) -> Option<f64> {
        self.0.get(&category_id)?.get(&slot).copied()
    }

    /// Value at `slot`, treating absent cells as zero.
    pub fn value(&self, category_id: CategoryId, slot: usize) -> f64 {
        self.get(category_id, slot).unwrap_or(0.0)
    }

    pub fn set(&mut self, category_id: CategoryId, slot: usize, amount: f64) {
        self.0.entry(category_id).or_default().insert(slot, amount);
    }

    pub fn add(&mut self, category_id: CategoryId, slot: usize, amount: f64) {
        *self
            .0
            .entry(category_id)
            .or_default()
            .entry(slot)
            .or_insert(0.0) += amount;
    }

    pub fn row(&self, category_id: CategoryId) -> Option<&BTreeMap<usize, f64>> {
        self.0.get(&category_id)
    }

    pub fn categories(&self) -> impl Iterator<Item = CategoryId> + '_ {
        self.0.keys().copied()
    }

    pub fn contains_category(&self, category_id: CategoryId) -> bool {
        self.0.contains_key(&category_id)
    }

    /// Sum of the twelve month slots for a category.
    pub fn month_total(&self, category_id: CategoryId) -> f64 {
        (0..MONTHS_PER_YEAR)
            .map(|month| self.value(category_id, month))
            .sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
