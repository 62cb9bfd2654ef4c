//! Stages of the month distribution behind [`crate::BudgetAllocator::budget_stats`].
//!
//! Each stage takes the previous stage's output and returns a fresh value.

use std::collections::{BTreeMap, BTreeSet};

use spread_domain::{
    BudgetEntry, BudgetStatsMatrix, CategoryId, ANNUAL_SLOT, MONTHS_PER_YEAR,
};

use crate::estimate::{monthly_estimate, yearly_estimate};

/// How yearly amounts combine with explicit monthly budgets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocationPolicy {
    /// Explicit monthly budgets replace the yearly share instead of adding to it.
    pub override_monthly: bool,
    /// Explicit monthly budgets are subtracted from the yearly amount first.
    pub deduct_monthly: bool,
}

/// Monthly and yearly equivalents of the annual budget-year entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnualEstimates {
    pub monthly: BTreeMap<CategoryId, f64>,
    pub yearly: BTreeMap<CategoryId, f64>,
}

/// Explicit per-month budgets for one calendar year.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExplicitMonths {
    pub values: BTreeMap<CategoryId, [Option<f64>; MONTHS_PER_YEAR]>,
    /// A month is budgeted once any category has an entry in it.
    pub budgeted: [bool; MONTHS_PER_YEAR],
    pub budgeted_months: usize,
    /// Running total of explicit monthly estimates per category.
    pub deduction: BTreeMap<CategoryId, f64>,
}

impl ExplicitMonths {
    pub fn deduction_for(&self, category_id: CategoryId) -> f64 {
        self.deduction.get(&category_id).copied().unwrap_or(0.0)
    }

    fn unbudgeted_months(&self) -> usize {
        MONTHS_PER_YEAR.saturating_sub(self.budgeted_months)
    }
}

/// Matrix with every known category at zero for each month slot.
pub fn zeroed_matrix(categories: &BTreeSet<CategoryId>) -> BudgetStatsMatrix {
    let mut matrix = BudgetStatsMatrix::new();
    for category_id in categories {
        for month in 0..MONTHS_PER_YEAR {
            matrix.set(*category_id, month, 0.0);
        }
    }
    matrix
}

/// Folds annual entries into estimates. Later entries for a category win.
pub fn annual_estimates<'a, I>(entries: I) -> AnnualEstimates
where
    I: IntoIterator<Item = &'a BudgetEntry>,
{
    let mut estimates = AnnualEstimates::default();
    for entry in entries {
        estimates.monthly.insert(
            entry.category_id,
            monthly_estimate(entry.period, entry.amount),
        );
        estimates
            .yearly
            .insert(entry.category_id, yearly_estimate(entry.period, entry.amount));
    }
    estimates
}

/// Writes yearly estimates into [`ANNUAL_SLOT`].
pub fn with_annual_slot(
    mut matrix: BudgetStatsMatrix,
    estimates: &AnnualEstimates,
) -> BudgetStatsMatrix {
    for (category_id, yearly) in &estimates.yearly {
        matrix.set(*category_id, ANNUAL_SLOT, *yearly);
    }
    matrix
}

/// Collects the explicit budgets of the twelve month-scoped budget years.
pub fn explicit_months(months: &[Vec<BudgetEntry>; MONTHS_PER_YEAR]) -> ExplicitMonths {
    let mut explicit = ExplicitMonths::default();
    for (month, entries) in months.iter().enumerate() {
        for entry in entries {
            if !explicit.budgeted[month] {
                explicit.budgeted[month] = true;
                explicit.budgeted_months += 1;
            }
            let value = monthly_estimate(entry.period, entry.amount);
            explicit.values.entry(entry.category_id).or_default()[month] = Some(value);
            *explicit.deduction.entry(entry.category_id).or_insert(0.0) += value;
        }
    }
    explicit
}

/// Writes explicit monthly values over the month slots of categories already in `matrix`.
///
/// Values of other categories are dropped, but their months stay budgeted.
pub fn with_explicit_months(
    mut matrix: BudgetStatsMatrix,
    explicit: &ExplicitMonths,
) -> BudgetStatsMatrix {
    for (category_id, months) in &explicit.values {
        if !matrix.contains_category(*category_id) {
            continue;
        }
        for (month, value) in months.iter().enumerate() {
            if let Some(value) = value {
                matrix.set(*category_id, month, *value);
            }
        }
    }
    matrix
}

/// Spreads the annual budget across the month slots according to `policy`.
pub fn distribute(
    mut matrix: BudgetStatsMatrix,
    annual: &AnnualEstimates,
    explicit: &ExplicitMonths,
    policy: AllocationPolicy,
) -> BudgetStatsMatrix {
    for month in 0..MONTHS_PER_YEAR {
        let month_is_budgeted = explicit.budgeted[month];
        if policy.deduct_monthly {
            for (category_id, yearly) in &annual.yearly {
                let Some(shortfall) = shortfall(*yearly, explicit.deduction_for(*category_id))
                else {
                    continue;
                };
                if !policy.override_monthly {
                    matrix.add(*category_id, month, shortfall / MONTHS_PER_YEAR as f64);
                } else if !month_is_budgeted {
                    // A month only stays unbudgeted while fewer than twelve are budgeted.
                    let open_months = explicit.unbudgeted_months();
                    if open_months > 0 {
                        matrix.set(*category_id, month, shortfall / open_months as f64);
                    }
                }
            }
        } else {
            for (category_id, monthly) in &annual.monthly {
                if !policy.override_monthly {
                    matrix.add(*category_id, month, *monthly);
                } else if !month_is_budgeted {
                    matrix.set(*category_id, month, *monthly);
                }
            }
        }
    }
    matrix
}

/// Remaining yearly amount once explicit monthly budgets are deducted.
///
/// `None` when the monthly budgets already cover the yearly amount, including
/// a yearly amount of zero.
pub fn shortfall(yearly: f64, deduction: f64) -> Option<f64> {
    if yearly == 0.0 || deduction / yearly >= 1.0 {
        return None;
    }
    Some(yearly - deduction)
}

/// Sums the month slots of each category into slot 0, dropping every other slot.
pub fn collapse(matrix: &BudgetStatsMatrix) -> BudgetStatsMatrix {
    let mut collapsed = BudgetStatsMatrix::new();
    for category_id in matrix.categories() {
        collapsed.set(category_id, 0, matrix.month_total(category_id));
    }
    collapsed
}
