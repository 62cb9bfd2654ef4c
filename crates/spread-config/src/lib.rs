//! spread-config
//!
//! Persistent budgeting preferences. Owns the Config data structure plus disk
//! persistence helpers, and exposes the options the allocator consults.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::Config;
