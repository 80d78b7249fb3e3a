//! In-memory storage area

use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

use crate::area::{AreaName, StorageArea};
use crate::Result;

/// Process-local storage area. Clones share the same items.
#[derive(Debug, Clone)]
pub struct MemoryStorageArea {
    name: AreaName,
    items: Arc<RwLock<HashMap<String, Value>>>,
}

impl MemoryStorageArea {
    pub fn new(name: AreaName) -> Self {
        Self {
            name,
            items: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

#[async_trait::async_trait]
impl StorageArea for MemoryStorageArea {
    fn name(&self) -> AreaName {
        self.name
    }

    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.items.read().get(key).cloned())
    }

    async fn set(&self, items: Map<String, Value>) -> Result<()> {
        let mut guard = self.items.write();
        for (key, value) in items {
            guard.insert(key, value);
        }
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.items.write().remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.items.write().clear();
        Ok(())
    }
}
