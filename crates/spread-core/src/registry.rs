use spread_domain::{BudgetEntry, BudgetYear, BudgetYearId, BudgetYearKind, Category};

use crate::CoreError;

/// Enumerates the categories budgets may be declared for.
pub trait CategoryRegistry: Send + Sync {
    fn categories(&self) -> Result<Vec<Category>, CoreError>;
}

/// Maps budget-year kinds to identifiers and back.
pub trait BudgetYearRegistry: Send + Sync {
    /// Returns `None` when no budget year of that kind has been registered.
    fn resolve(&self, kind: &BudgetYearKind) -> Result<Option<BudgetYearId>, CoreError>;
    fn budget_year(&self, id: BudgetYearId) -> Result<Option<BudgetYear>, CoreError>;
}

/// Persists budget entries keyed by budget year.
pub trait BudgetRecordStore: Send + Sync {
    /// Entries for a year in store iteration order.
    fn find_by_year(&self, budget_year_id: BudgetYearId) -> Result<Vec<BudgetEntry>, CoreError>;
    /// Inserts unsaved entries (assigning an id) or replaces saved ones.
    fn save(&self, entry: BudgetEntry) -> Result<BudgetEntry, CoreError>;
}

/// User preferences steering how yearly amounts meet monthly overrides.
pub trait OptionsProvider: Send + Sync {
    fn budget_override(&self) -> bool;
    fn budget_deduct_monthly(&self) -> bool;
}

/// Fixed option values, handy when no configuration layer is involved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaticOptions {
    pub budget_override: bool,
    pub budget_deduct_monthly: bool,
}

impl StaticOptions {
    pub fn new(budget_override: bool, budget_deduct_monthly: bool) -> Self {
        Self {
            budget_override,
            budget_deduct_monthly,
        }
    }
}

impl OptionsProvider for StaticOptions {
    fn budget_override(&self) -> bool {
        self.budget_override
    }

    fn budget_deduct_monthly(&self) -> bool {
        self.budget_deduct_monthly
    }
}
