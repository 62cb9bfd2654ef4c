//! Budget categories as seen by the allocator.

use serde::{Deserialize, Serialize};

use crate::common::CategoryId;

/// A spending category. Allocation only relies on `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
