//! Storage area contract
//!
//! Mirrors the `get`/`set` surface of browser extension storage areas.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaName {
    /// Synchronized across the user's signed-in browsers
    Sync,
    /// Local to this browser profile
    Local,
}

impl AreaName {
    pub fn as_str(&self) -> &'static str {
        match self {
            AreaName::Sync => "sync",
            AreaName::Local => "local",
        }
    }
}

impl std::fmt::Display for AreaName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A key-value storage area
///
/// Values are arbitrary JSON. Writing a key that does not exist creates it.
#[async_trait::async_trait]
pub trait StorageArea: Send + Sync {
    /// Which area this is
    fn name(&self) -> AreaName;

    /// Read the value stored under `key`
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Write every item in `items`, replacing existing values
    async fn set(&self, items: Map<String, Value>) -> Result<()>;

    /// Remove a single key
    async fn remove(&self, key: &str) -> Result<()>;

    /// Remove every key in this area
    async fn clear(&self) -> Result<()>;
}

/// Pick the synchronized area when the host provides one, else the local area.
pub fn select_area(
    sync: Option<Arc<dyn StorageArea>>,
    local: Arc<dyn StorageArea>,
) -> Arc<dyn StorageArea> {
    match sync {
        Some(area) => {
            tracing::debug!(area = %area.name(), "Using synchronized storage area");
            area
        }
        None => {
            tracing::info!(area = %local.name(), "Synchronized storage unavailable, falling back");
            local
        }
    }
}
