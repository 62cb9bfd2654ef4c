use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use spread_core::{BudgetBook, BudgetRecordStore, BudgetYearRegistry, CategoryRegistry, CoreError};
use spread_domain::{BudgetEntry, BudgetYear, BudgetYearId, BudgetYearKind, Category};
use tracing::debug;

const BOOK_FILE: &str = "budget.json";
const TMP_SUFFIX: &str = "tmp";

/// Filesystem-backed JSON persistence of a [`BudgetBook`].
///
/// Every mutation rewrites the whole file through a temporary sibling.
#[derive(Debug)]
pub struct JsonBudgetStore {
    path: PathBuf,
    book: RwLock<BudgetBook>,
}

impl JsonBudgetStore {
    /// Opens (or starts) the book stored under `root`.
    pub fn open(root: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&root)?;
        let path = root.join(BOOK_FILE);
        let book = load_book_from_path(&path)?;
        debug!(
            path = %path.display(),
            entries = book.entries.len(),
            "opened budget book"
        );
        Ok(Self {
            path,
            book: RwLock::new(book),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn add_category(&self, category: Category) -> Result<(), CoreError> {
        self.mutate(|book| book.add_category(category))
    }

    pub fn add_year(&self, kind: BudgetYearKind) -> Result<BudgetYearId, CoreError> {
        self.mutate(|book| book.add_year(kind))
    }

    /// Discards in-memory state in favour of what is on disk.
    pub fn reload(&self) -> Result<(), CoreError> {
        let book = load_book_from_path(&self.path)?;
        *self.write()? = book;
        Ok(())
    }

    pub fn snapshot(&self) -> Result<BudgetBook, CoreError> {
        Ok(self.read()?.clone())
    }

    fn mutate<T>(&self, apply: impl FnOnce(&mut BudgetBook) -> T) -> Result<T, CoreError> {
        let mut book = self.write()?;
        let mut staged = book.clone();
        let result = apply(&mut staged);
        save_book_to_path(&staged, &self.path)?;
        *book = staged;
        Ok(result)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BudgetBook>, CoreError> {
        self.book.read().map_err(|_| poisoned())
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BudgetBook>, CoreError> {
        self.book.write().map_err(|_| poisoned())
    }
}

impl CategoryRegistry for JsonBudgetStore {
    fn categories(&self) -> Result<Vec<Category>, CoreError> {
        Ok(self.read()?.categories.clone())
    }
}

impl BudgetYearRegistry for JsonBudgetStore {
    fn resolve(&self, kind: &BudgetYearKind) -> Result<Option<BudgetYearId>, CoreError> {
        Ok(self.read()?.resolve_year(kind))
    }

    fn budget_year(&self, id: BudgetYearId) -> Result<Option<BudgetYear>, CoreError> {
        Ok(self.read()?.year(id).cloned())
    }
}

impl BudgetRecordStore for JsonBudgetStore {
    fn find_by_year(&self, budget_year_id: BudgetYearId) -> Result<Vec<BudgetEntry>, CoreError> {
        Ok(self.read()?.entries_for(budget_year_id))
    }

    fn save(&self, entry: BudgetEntry) -> Result<BudgetEntry, CoreError> {
        self.mutate(|book| book.insert_entry(entry))
    }
}

/// Saves a book to an arbitrary path on disk.
pub fn save_book_to_path(book: &BudgetBook, path: &Path) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json =
        serde_json::to_string_pretty(book).map_err(|err| CoreError::Serde(err.to_string()))?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Loads a book from `path`; a missing file is an empty book.
pub fn load_book_from_path(path: &Path) -> Result<BudgetBook, CoreError> {
    if !path.exists() {
        return Ok(BudgetBook::default());
    }
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))
}

fn poisoned() -> CoreError {
    CoreError::Storage("budget store lock poisoned".into())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
