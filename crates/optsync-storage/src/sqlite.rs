//! SQLite-backed storage area
//!
//! Items live in the `storage_items` table as JSON text. Several areas can
//! share one database; rows are partitioned by area name.

use serde_json::{Map, Value};

use crate::area::{AreaName, StorageArea};
use crate::database::Database;
use crate::Result;

#[derive(Clone)]
pub struct SqliteStorageArea {
    name: AreaName,
    db: Database,
}

impl SqliteStorageArea {
    pub fn new(db: Database, name: AreaName) -> Self {
        Self { name, db }
    }
}

#[async_trait::async_trait]
impl StorageArea for SqliteStorageArea {
    fn name(&self) -> AreaName {
        self.name
    }

    async fn get(&self, key: &str) -> Result<Option<Value>> {
        match self.db.get_item(self.name, key)? {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    async fn set(&self, items: Map<String, Value>) -> Result<()> {
        let rows = items
            .into_iter()
            .map(|(key, value)| Ok((key, serde_json::to_string(&value)?)))
            .collect::<Result<Vec<_>>>()?;

        self.db.set_items(self.name, &rows)?;
        tracing::debug!(area = %self.name, count = rows.len(), "Stored items");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.db.remove_item(self.name, key)
    }

    async fn clear(&self) -> Result<()> {
        let removed = self.db.clear_area(self.name)?;
        tracing::debug!(area = %self.name, removed, "Cleared storage area");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_roundtrip_json_values() {
        let db = Database::open_in_memory().unwrap();
        let area = SqliteStorageArea::new(db, AreaName::Sync);

        let mut items = Map::new();
        items.insert(
            "options".to_string(),
            json!({ "theme": "dark", "notify": true, "limit": 10 }),
        );
        area.set(items).await.unwrap();

        assert_eq!(
            area.get("options").await.unwrap(),
            Some(json!({ "theme": "dark", "notify": true, "limit": 10 }))
        );
    }

    #[tokio::test]
    async fn test_sync_and_local_share_database() {
        let db = Database::open_in_memory().unwrap();
        let sync = SqliteStorageArea::new(db.clone(), AreaName::Sync);
        let local = SqliteStorageArea::new(db, AreaName::Local);

        let mut items = Map::new();
        items.insert("options".to_string(), json!({ "a": 1 }));
        local.set(items).await.unwrap();

        assert!(sync.get("options").await.unwrap().is_none());

        local.clear().await.unwrap();
        assert!(local.get("options").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_overwrite_replaces_value() {
        let db = Database::open_in_memory().unwrap();
        let area = SqliteStorageArea::new(db, AreaName::Local);

        for value in [json!({ "a": 1 }), json!({ "b": 2 })] {
            let mut items = Map::new();
            items.insert("options".to_string(), value);
            area.set(items).await.unwrap();
        }

        assert_eq!(area.get("options").await.unwrap(), Some(json!({ "b": 2 })));
        area.remove("options").await.unwrap();
        assert!(area.get("options").await.unwrap().is_none());
    }
}
