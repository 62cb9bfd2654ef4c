#![allow(dead_code)]

use std::sync::Mutex;

use budget_spread::{
    allocation::{BudgetRecordStore, InMemoryBudgetBook, StaticOptions},
    domain::{BudgetEntry, BudgetPeriod, BudgetYearId, BudgetYearKind, Category, CategoryId},
    BudgetWorkspace,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

pub const EPSILON: f64 = 1e-9;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

/// In-memory book with the given categories registered.
pub fn book_with_categories(ids: &[CategoryId]) -> InMemoryBudgetBook {
    let book = InMemoryBudgetBook::default();
    for id in ids {
        book.add_category(Category::new(*id, format!("Category {id}")))
            .expect("add category");
    }
    book
}

pub fn annual_year(book: &InMemoryBudgetBook, year: i32) -> BudgetYearId {
    book.add_year(BudgetYearKind::annual(year)).expect("add year")
}

/// `month` is 1-based.
pub fn monthly_year(book: &InMemoryBudgetBook, year: i32, month: u32) -> BudgetYearId {
    let kind = BudgetYearKind::monthly(year, month).expect("valid month");
    book.add_year(kind).expect("add year")
}

pub fn budget(
    book: &InMemoryBudgetBook,
    year_id: BudgetYearId,
    category_id: CategoryId,
    period: BudgetPeriod,
    amount: f64,
) -> BudgetEntry {
    book.save(BudgetEntry::new(year_id, category_id, period, amount))
        .expect("save entry")
}

pub fn options(budget_override: bool, budget_deduct_monthly: bool) -> StaticOptions {
    StaticOptions::new(budget_override, budget_deduct_monthly)
}

/// Creates an isolated workspace backed by a unique directory for each test.
pub fn setup_workspace() -> BudgetWorkspace {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    BudgetWorkspace::open(base).expect("open workspace")
}
