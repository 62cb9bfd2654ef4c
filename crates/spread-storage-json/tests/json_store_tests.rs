use std::fs;

use spread_core::{BudgetRecordStore, BudgetYearRegistry, CategoryRegistry, CoreError};
use spread_domain::{BudgetEntry, BudgetPeriod, BudgetYearKind, Category};
use spread_storage_json::JsonBudgetStore;
use tempfile::tempdir;

#[test]
fn json_store_persists_across_reopen() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path().join("data");

    let year = {
        let store = JsonBudgetStore::open(root.clone()).expect("open store");
        store
            .add_category(Category::new(1, "Groceries"))
            .expect("add category");
        let year = store
            .add_year(BudgetYearKind::annual(2024))
            .expect("add year");
        store
            .save(BudgetEntry::new(year, 1, BudgetPeriod::Weekly, 80.0).with_notes("market"))
            .expect("save entry");
        year
    };

    let reopened = JsonBudgetStore::open(root).expect("reopen store");
    assert_eq!(reopened.categories().expect("categories").len(), 1);
    assert_eq!(
        reopened.resolve(&BudgetYearKind::annual(2024)).expect("resolve"),
        Some(year)
    );
    let entries = reopened.find_by_year(year).expect("entries");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].period, BudgetPeriod::Weekly);
    assert_eq!(entries[0].notes, "market");
    assert!(entries[0].id.is_some());
}

#[test]
fn json_store_starts_empty_without_file() {
    let dir = tempdir().expect("tempdir");
    let store = JsonBudgetStore::open(dir.path().to_path_buf()).expect("open store");

    assert!(store.categories().expect("categories").is_empty());
    assert!(!store.path().exists());
    assert_eq!(
        store.resolve(&BudgetYearKind::annual(2030)).expect("resolve"),
        None
    );
}

#[test]
fn json_store_writes_period_labels() {
    let dir = tempdir().expect("tempdir");
    let store = JsonBudgetStore::open(dir.path().to_path_buf()).expect("open store");
    let year = store
        .add_year(BudgetYearKind::monthly(2024, 2).expect("month"))
        .expect("add year");
    store
        .save(BudgetEntry::new(year, 3, BudgetPeriod::HalfYearly, 600.0))
        .expect("save entry");

    let raw = fs::read_to_string(store.path()).expect("read book");
    assert!(raw.contains("\"Half-Yearly\""));
    assert!(!store.path().with_extension("json.tmp").exists());
}

#[test]
fn json_store_rejects_unknown_period_labels() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("budget.json");
    fs::write(
        &path,
        r#"{
            "categories": [{ "id": 1, "name": "Rent" }],
            "years": [{ "id": 1, "kind": { "kind": "annual", "year": 2024 } }],
            "entries": [{ "budget_year_id": 1, "category_id": 1, "period": "Hourly", "amount": 5.0 }]
        }"#,
    )
    .expect("write book");

    let err = JsonBudgetStore::open(dir.path().to_path_buf()).unwrap_err();
    assert!(matches!(err, CoreError::Serde(message) if message.contains("Hourly")));
}

#[test]
fn json_store_reload_discards_unsaved_view() {
    let dir = tempdir().expect("tempdir");
    let first = JsonBudgetStore::open(dir.path().to_path_buf()).expect("open store");
    let second = JsonBudgetStore::open(dir.path().to_path_buf()).expect("open store");

    first
        .add_category(Category::new(7, "Travel"))
        .expect("add category");
    assert!(second.categories().expect("categories").is_empty());

    second.reload().expect("reload");
    assert_eq!(second.categories().expect("categories")[0].name, "Travel");
}

#[test]
fn json_store_rejects_out_of_range_months() {
    let dir = tempdir().expect("tempdir");
    fs::write(
        dir.path().join("budget.json"),
        r#"{ "years": [{ "id": 1, "kind": { "kind": "monthly", "year": 2024, "month": 13 } }] }"#,
    )
    .expect("write book");

    let err = JsonBudgetStore::open(dir.path().to_path_buf()).unwrap_err();
    assert!(matches!(err, CoreError::Serde(message) if message.contains("2024-13")));
}

#[test]
fn json_store_snapshot_matches_saved_book() {
    let dir = tempdir().expect("tempdir");
    let store = JsonBudgetStore::open(dir.path().to_path_buf()).expect("open store");
    store
        .add_category(Category::new(2, "Utilities"))
        .expect("add category");
    let year = store
        .add_year(BudgetYearKind::monthly(2024, 9).expect("month"))
        .expect("add year");
    store
        .save(BudgetEntry::new(year, 2, BudgetPeriod::Monthly, 45.0))
        .expect("save entry");

    let snapshot = store.snapshot().expect("snapshot");
    assert_eq!(snapshot.entries.len(), 1);
    assert_eq!(snapshot.years[0].name(), "2024-09");
    let on_disk = spread_storage_json::load_book_from_path(store.path()).expect("load");
    assert_eq!(snapshot, on_disk);
}
