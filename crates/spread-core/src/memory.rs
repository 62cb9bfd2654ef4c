//! In-memory record keeping shared by the test fakes and the JSON backend.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use spread_domain::{BudgetEntry, BudgetYear, BudgetYearId, BudgetYearKind, Category};

use crate::{
    registry::{BudgetRecordStore, BudgetYearRegistry, CategoryRegistry},
    CoreError,
};

/// Serializable snapshot of categories, budget years and entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetBook {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub years: Vec<BudgetYear>,
    #[serde(default)]
    pub entries: Vec<BudgetEntry>,
    #[serde(default = "BudgetBook::first_id")]
    pub next_entry_id: i64,
    #[serde(default = "BudgetBook::first_id")]
    pub next_year_id: i64,
}

impl Default for BudgetBook {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            years: Vec::new(),
            entries: Vec::new(),
            next_entry_id: Self::first_id(),
            next_year_id: Self::first_id(),
        }
    }
}

impl BudgetBook {
    fn first_id() -> i64 {
        1
    }

    /// Registers a category, replacing one with the same id.
    pub fn add_category(&mut self, category: Category) {
        match self.categories.iter_mut().find(|c| c.id == category.id) {
            Some(existing) => *existing = category,
            None => self.categories.push(category),
        }
    }

    /// Returns the id of the budget year of `kind`, registering it when missing.
    pub fn add_year(&mut self, kind: BudgetYearKind) -> BudgetYearId {
        if let Some(id) = self.resolve_year(&kind) {
            return id;
        }
        let id = self.next_year_id;
        self.next_year_id += 1;
        self.years.push(BudgetYear::new(id, kind));
        id
    }

    pub fn resolve_year(&self, kind: &BudgetYearKind) -> Option<BudgetYearId> {
        self.years.iter().find(|year| year.kind == *kind).map(|year| year.id)
    }

    pub fn year(&self, id: BudgetYearId) -> Option<&BudgetYear> {
        self.years.iter().find(|year| year.id == id)
    }

    pub fn entries_for(&self, budget_year_id: BudgetYearId) -> Vec<BudgetEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.budget_year_id == budget_year_id)
            .cloned()
            .collect()
    }

    /// Appends unsaved entries with a fresh id; saved ones replace their stored row.
    pub fn insert_entry(&mut self, mut entry: BudgetEntry) -> BudgetEntry {
        if let Some(id) = entry.id {
            if let Some(existing) = self.entries.iter_mut().find(|e| e.id == Some(id)) {
                *existing = entry.clone();
                return entry;
            }
            self.next_entry_id = self.next_entry_id.max(id + 1);
        } else {
            entry.id = Some(self.next_entry_id);
            self.next_entry_id += 1;
        }
        self.entries.push(entry.clone());
        entry
    }
}

/// Thread-safe [`BudgetBook`] implementing every record collaborator.
#[derive(Debug, Default)]
pub struct InMemoryBudgetBook {
    book: RwLock<BudgetBook>,
}

impl InMemoryBudgetBook {
    pub fn new(book: BudgetBook) -> Self {
        Self {
            book: RwLock::new(book),
        }
    }

    pub fn add_category(&self, category: Category) -> Result<(), CoreError> {
        self.write()?.add_category(category);
        Ok(())
    }

    pub fn add_year(&self, kind: BudgetYearKind) -> Result<BudgetYearId, CoreError> {
        Ok(self.write()?.add_year(kind))
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BudgetBook>, CoreError> {
        self.book.read().map_err(|_| poisoned())
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BudgetBook>, CoreError> {
        self.book.write().map_err(|_| poisoned())
    }
}

fn poisoned() -> CoreError {
    CoreError::Storage("budget book lock poisoned".into())
}

impl CategoryRegistry for InMemoryBudgetBook {
    fn categories(&self) -> Result<Vec<Category>, CoreError> {
        Ok(self.read()?.categories.clone())
    }
}

impl BudgetYearRegistry for InMemoryBudgetBook {
    fn resolve(&self, kind: &BudgetYearKind) -> Result<Option<BudgetYearId>, CoreError> {
        Ok(self.read()?.resolve_year(kind))
    }

    fn budget_year(&self, id: BudgetYearId) -> Result<Option<BudgetYear>, CoreError> {
        Ok(self.read()?.year(id).cloned())
    }
}

impl BudgetRecordStore for InMemoryBudgetBook {
    fn find_by_year(&self, budget_year_id: BudgetYearId) -> Result<Vec<BudgetEntry>, CoreError> {
        Ok(self.read()?.entries_for(budget_year_id))
    }

    fn save(&self, entry: BudgetEntry) -> Result<BudgetEntry, CoreError> {
        Ok(self.write()?.insert_entry(entry))
    }
}
