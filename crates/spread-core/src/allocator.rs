//! Budget entry lookup, month distribution and budget-year copies.

use std::collections::{BTreeMap, BTreeSet};

use spread_domain::{
    BudgetEntry, BudgetPeriod, BudgetStatsMatrix, BudgetYear, BudgetYearId, BudgetYearKind,
    CategoryId, DateRange, MONTHS_PER_YEAR,
};
use tracing::{debug, info};

use crate::{
    estimate::{monthly_estimate, yearly_estimate},
    registry::{BudgetRecordStore, BudgetYearRegistry, CategoryRegistry, OptionsProvider},
    stats::{self, AllocationPolicy},
    CoreError,
};

/// Per-category view of one budget year, with defaults for unbudgeted categories.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetEntrySheet {
    pub periods: BTreeMap<CategoryId, BudgetPeriod>,
    pub amounts: BTreeMap<CategoryId, f64>,
    /// Only categories with a stored entry carry notes.
    pub notes: BTreeMap<CategoryId, String>,
}

/// Computes budget estimates over injected collaborators.
pub struct BudgetAllocator<'a> {
    categories: &'a dyn CategoryRegistry,
    years: &'a dyn BudgetYearRegistry,
    records: &'a dyn BudgetRecordStore,
    options: &'a dyn OptionsProvider,
}

impl<'a> BudgetAllocator<'a> {
    pub fn new(
        categories: &'a dyn CategoryRegistry,
        years: &'a dyn BudgetYearRegistry,
        records: &'a dyn BudgetRecordStore,
        options: &'a dyn OptionsProvider,
    ) -> Self {
        Self {
            categories,
            years,
            records,
            options,
        }
    }

    /// Registered period/amount/notes per category for the given budget year.
    pub fn budget_entries(
        &self,
        budget_year_id: BudgetYearId,
    ) -> Result<BudgetEntrySheet, CoreError> {
        let known = self.known_categories()?;
        let mut sheet = BudgetEntrySheet::default();
        for category_id in &known {
            sheet.periods.insert(*category_id, BudgetPeriod::None);
            sheet.amounts.insert(*category_id, 0.0);
        }
        for entry in self.entries_for(budget_year_id, &known)? {
            sheet.periods.insert(entry.category_id, entry.period);
            sheet.amounts.insert(entry.category_id, entry.amount);
            sheet.notes.insert(entry.category_id, entry.notes);
        }
        Ok(sheet)
    }

    /// Estimated spend per category and month for the year `range` starts in.
    ///
    /// With `group_by_month` the matrix holds slots 0..12 plus the annual slot for
    /// categories with an annual budget; without it each category has slot 0 only.
    pub fn budget_stats(
        &self,
        range: &DateRange,
        group_by_month: bool,
    ) -> Result<BudgetStatsMatrix, CoreError> {
        let known = self.known_categories()?;
        let year = range.start_year();

        let annual_entries = self.entries_for_kind(&BudgetYearKind::annual(year), &known)?;
        let annual = stats::annual_estimates(&annual_entries);

        // Every stored entry marks its month budgeted, registered category or not.
        let mut months: [Vec<BudgetEntry>; MONTHS_PER_YEAR] = Default::default();
        for (index, slot) in months.iter_mut().enumerate() {
            let kind = BudgetYearKind::monthly(year, index as u32 + 1)?;
            if let Some(id) = self.years.resolve(&kind)? {
                *slot = self.records.find_by_year(id)?;
            }
        }
        let explicit = stats::explicit_months(&months);

        let policy = self.policy();
        debug!(
            year,
            annual = annual_entries.len(),
            budgeted_months = explicit.budgeted_months,
            ?policy,
            "computing budget stats"
        );

        let matrix = stats::zeroed_matrix(&known);
        let matrix = stats::with_annual_slot(matrix, &annual);
        let matrix = stats::with_explicit_months(matrix, &explicit);
        let matrix = stats::distribute(matrix, &annual, &explicit, policy);

        if group_by_month {
            Ok(matrix)
        } else {
            Ok(stats::collapse(&matrix))
        }
    }

    /// Copies every entry of `base_year_id` into `new_year_id` and returns the saved copies.
    ///
    /// When an annual budget seeds a monthly one and deduct-monthly is on, the copies
    /// become Monthly entries carrying what is left of the yearly amount once the
    /// months already budgeted in that year are accounted for.
    pub fn copy_budget_year(
        &self,
        new_year_id: BudgetYearId,
        base_year_id: BudgetYearId,
    ) -> Result<Vec<BudgetEntry>, CoreError> {
        let base = self.require_year(base_year_id)?;
        let target = self.require_year(new_year_id)?;

        let deduct = self.options.budget_deduct_monthly()
            && base.kind.is_annual()
            && target.kind.is_monthly();

        let mut deduction: BTreeMap<CategoryId, f64> = BTreeMap::new();
        let mut budgeted_months = 0usize;
        if deduct {
            let year = target.kind.year();
            for month in 1..=MONTHS_PER_YEAR as u32 {
                let kind = BudgetYearKind::monthly(year, month)?;
                let Some(id) = self.years.resolve(&kind)? else {
                    continue;
                };
                let entries = self.records.find_by_year(id)?;
                if !entries.is_empty() {
                    budgeted_months += 1;
                }
                for entry in entries {
                    *deduction.entry(entry.category_id).or_insert(0.0) +=
                        monthly_estimate(entry.period, entry.amount);
                }
            }
        }

        let mut saved = Vec::new();
        for source in self.records.find_by_year(base_year_id)? {
            let mut copy = source.duplicate_into(new_year_id);
            if deduct && budgeted_months > 0 {
                let year_amount = yearly_estimate(source.period, source.amount);
                let already = deduction.get(&source.category_id).copied().unwrap_or(0.0);
                copy.period = BudgetPeriod::Monthly;
                copy.amount = remaining_per_open_month(year_amount, already, budgeted_months);
            }
            saved.push(self.records.save(copy)?);
        }
        info!(
            from = %base.name(),
            to = %target.name(),
            copied = saved.len(),
            deduct,
            "copied budget year"
        );
        Ok(saved)
    }

    /// Persists a budget entry after validating its amount.
    pub fn save_entry(&self, entry: BudgetEntry) -> Result<BudgetEntry, CoreError> {
        if !entry.amount.is_finite() {
            return Err(CoreError::Validation(format!(
                "budget amount for category {} must be finite",
                entry.category_id
            )));
        }
        self.require_year(entry.budget_year_id)?;
        let saved = self.records.save(entry)?;
        info!(
            entry = ?saved.id,
            category = saved.category_id,
            budget_year = saved.budget_year_id,
            "saved budget entry"
        );
        Ok(saved)
    }

    fn policy(&self) -> AllocationPolicy {
        AllocationPolicy {
            override_monthly: self.options.budget_override(),
            deduct_monthly: self.options.budget_deduct_monthly(),
        }
    }

    fn known_categories(&self) -> Result<BTreeSet<CategoryId>, CoreError> {
        Ok(self
            .categories
            .categories()?
            .into_iter()
            .map(|category| category.id)
            .collect())
    }

    fn require_year(&self, id: BudgetYearId) -> Result<BudgetYear, CoreError> {
        self.years
            .budget_year(id)?
            .ok_or(CoreError::BudgetYearNotFound(id))
    }

    fn entries_for_kind(
        &self,
        kind: &BudgetYearKind,
        known: &BTreeSet<CategoryId>,
    ) -> Result<Vec<BudgetEntry>, CoreError> {
        match self.years.resolve(kind)? {
            Some(id) => self.entries_for(id, known),
            None => Ok(Vec::new()),
        }
    }

    fn entries_for(
        &self,
        budget_year_id: BudgetYearId,
        known: &BTreeSet<CategoryId>,
    ) -> Result<Vec<BudgetEntry>, CoreError> {
        let (kept, ignored): (Vec<_>, Vec<_>) = self
            .records
            .find_by_year(budget_year_id)?
            .into_iter()
            .partition(|entry| known.contains(&entry.category_id));
        for entry in &ignored {
            debug!(
                category = entry.category_id,
                budget_year = budget_year_id,
                "ignoring budget entry for unknown category"
            );
        }
        Ok(kept)
    }
}

/// Yearly amount left after `already` is budgeted, spread over the open months.
fn remaining_per_open_month(year_amount: f64, already: f64, budgeted_months: usize) -> f64 {
    let open_months = MONTHS_PER_YEAR.saturating_sub(budgeted_months);
    match stats::shortfall(year_amount, already) {
        Some(remaining) if open_months > 0 => remaining / open_months as f64,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use spread_domain::{Category, ANNUAL_SLOT};

    use super::*;
    use crate::{memory::InMemoryBudgetBook, registry::StaticOptions};

    fn book_with_categories(ids: &[CategoryId]) -> InMemoryBudgetBook {
        let book = InMemoryBudgetBook::default();
        for id in ids {
            book.add_category(Category::new(*id, format!("Category {id}")))
                .unwrap();
        }
        book
    }

    fn calendar(year: i32) -> DateRange {
        DateRange::calendar_year(year).unwrap()
    }

    #[test]
    fn entry_sheet_defaults_unbudgeted_categories() {
        let book = book_with_categories(&[1, 2]);
        let year = book.add_year(BudgetYearKind::annual(2024)).unwrap();
        book.save(BudgetEntry::new(year, 1, BudgetPeriod::Weekly, 15.0).with_notes("lunch"))
            .unwrap();
        let options = StaticOptions::default();
        let allocator = BudgetAllocator::new(&book, &book, &book, &options);

        let sheet = allocator.budget_entries(year).unwrap();
        assert_eq!(sheet.periods[&1], BudgetPeriod::Weekly);
        assert_eq!(sheet.amounts[&1], 15.0);
        assert_eq!(sheet.notes[&1], "lunch");
        assert_eq!(sheet.periods[&2], BudgetPeriod::None);
        assert_eq!(sheet.amounts[&2], 0.0);
        assert!(!sheet.notes.contains_key(&2));
    }

    #[test]
    fn entry_sheet_ignores_unknown_categories_and_keeps_last_write() {
        let book = book_with_categories(&[1]);
        let year = book.add_year(BudgetYearKind::annual(2024)).unwrap();
        book.save(BudgetEntry::new(year, 1, BudgetPeriod::Monthly, 10.0)).unwrap();
        book.save(BudgetEntry::new(year, 1, BudgetPeriod::Yearly, 300.0)).unwrap();
        book.save(BudgetEntry::new(year, 99, BudgetPeriod::Monthly, 10.0)).unwrap();
        let options = StaticOptions::default();
        let allocator = BudgetAllocator::new(&book, &book, &book, &options);

        let sheet = allocator.budget_entries(year).unwrap();
        assert_eq!(sheet.periods.len(), 1);
        assert_eq!(sheet.periods[&1], BudgetPeriod::Yearly);
        assert_eq!(sheet.amounts[&1], 300.0);
    }

    #[test]
    fn stats_without_budgets_are_zero() {
        let book = book_with_categories(&[1, 2]);
        let options = StaticOptions::new(true, true);
        let allocator = BudgetAllocator::new(&book, &book, &book, &options);

        let matrix = allocator.budget_stats(&calendar(2024), true).unwrap();
        assert_eq!(matrix.len(), 2);
        for month in 0..MONTHS_PER_YEAR {
            assert_eq!(matrix.get(1, month), Some(0.0));
        }
        assert_eq!(matrix.get(1, ANNUAL_SLOT), None);
    }

    #[test]
    fn stats_record_yearly_estimate_in_annual_slot() {
        let book = book_with_categories(&[1]);
        let year = book.add_year(BudgetYearKind::annual(2024)).unwrap();
        book.save(BudgetEntry::new(year, 1, BudgetPeriod::Quarterly, 300.0)).unwrap();
        let options = StaticOptions::default();
        let allocator = BudgetAllocator::new(&book, &book, &book, &options);

        let matrix = allocator.budget_stats(&calendar(2024), true).unwrap();
        assert_eq!(matrix.get(1, ANNUAL_SLOT), Some(1200.0));
        assert_eq!(matrix.get(1, 6), Some(100.0));
    }

    #[test]
    fn save_entry_rejects_non_finite_amounts_and_unknown_years() {
        let book = book_with_categories(&[1]);
        let year = book.add_year(BudgetYearKind::annual(2024)).unwrap();
        let options = StaticOptions::default();
        let allocator = BudgetAllocator::new(&book, &book, &book, &options);

        let err = allocator
            .save_entry(BudgetEntry::new(year, 1, BudgetPeriod::Monthly, f64::NAN))
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        let err = allocator
            .save_entry(BudgetEntry::new(year + 100, 1, BudgetPeriod::Monthly, 5.0))
            .unwrap_err();
        assert!(matches!(err, CoreError::BudgetYearNotFound(_)));

        let saved = allocator
            .save_entry(BudgetEntry::new(year, 1, BudgetPeriod::Monthly, 5.0))
            .unwrap();
        assert!(saved.id.is_some());
    }

    #[test]
    fn copy_requires_registered_years() {
        let book = book_with_categories(&[1]);
        let year = book.add_year(BudgetYearKind::annual(2024)).unwrap();
        let options = StaticOptions::default();
        let allocator = BudgetAllocator::new(&book, &book, &book, &options);

        let err = allocator.copy_budget_year(year + 1, year).unwrap_err();
        assert!(matches!(err, CoreError::BudgetYearNotFound(id) if id == year + 1));
    }

    #[test]
    fn remaining_amount_guards_zero_and_full_years() {
        assert_eq!(remaining_per_open_month(0.0, 0.0, 3), 0.0);
        assert_eq!(remaining_per_open_month(1200.0, 1300.0, 3), 0.0);
        assert_eq!(remaining_per_open_month(1200.0, 0.0, 12), 0.0);
        assert_eq!(remaining_per_open_month(1200.0, 200.0, 2), 100.0);
    }
}
