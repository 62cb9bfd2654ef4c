use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use spread_core::OptionsProvider;

/// Stores user budgeting preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Explicit monthly budgets replace the yearly share for their month.
    #[serde(default)]
    pub budget_override: bool,
    /// Explicit monthly budgets are deducted from the yearly amount before spreading.
    #[serde(default)]
    pub budget_deduct_monthly: bool,
    #[serde(default = "Config::default_currency")]
    pub currency: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom root directory for budget data. Defaults to `~/Documents/Budgets`.
    pub default_data_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            budget_override: false,
            budget_deduct_monthly: false,
            currency: Self::default_currency(),
            default_data_root: None,
        }
    }
}

impl Config {
    pub fn default_currency() -> String {
        "USD".into()
    }

    pub fn resolve_default_data_root(&self) -> PathBuf {
        if let Some(path) = &self.default_data_root {
            return path.clone();
        }

        let base = dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("Budgets")
    }
}

impl OptionsProvider for Config {
    fn budget_override(&self) -> bool {
        self.budget_override
    }

    fn budget_deduct_monthly(&self) -> bool {
        self.budget_deduct_monthly
    }
}
