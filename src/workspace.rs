use std::path::{Path, PathBuf};

use spread_config::{Config, ConfigManager};
use spread_core::BudgetAllocator;
use spread_storage_json::JsonBudgetStore;
use tracing::info;

use crate::errors::Result;

/// A budget data directory: persisted options plus the JSON budget book.
pub struct BudgetWorkspace {
    base_dir: PathBuf,
    config_manager: ConfigManager,
    config: Config,
    store: JsonBudgetStore,
}

impl BudgetWorkspace {
    /// Opens `<base>/config/config.json` and the budget book under `<base>/data`.
    pub fn open(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        let config_manager = ConfigManager::with_base_dir(base_dir.clone())?;
        let config = config_manager.load_or_default();
        let store = JsonBudgetStore::open(base_dir.join("data"))?;
        info!(
            base = %base_dir.display(),
            currency = %config.currency,
            "opened budget workspace"
        );
        Ok(Self {
            base_dir,
            config_manager,
            config,
            store,
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Updates and persists the allocation options.
    pub fn set_options(&mut self, budget_override: bool, budget_deduct_monthly: bool) -> Result<()> {
        let mut updated = self.config.clone();
        updated.budget_override = budget_override;
        updated.budget_deduct_monthly = budget_deduct_monthly;
        self.config_manager.save(&updated)?;
        self.config = updated;
        Ok(())
    }

    pub fn store(&self) -> &JsonBudgetStore {
        &self.store
    }

    /// Allocator reading from this workspace's book with its current options.
    pub fn allocator(&self) -> BudgetAllocator<'_> {
        BudgetAllocator::new(&self.store, &self.store, &self.store, &self.config)
    }
}
