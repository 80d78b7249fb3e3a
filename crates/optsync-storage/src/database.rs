//! Database connection and operations

use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;

use crate::area::AreaName;
use crate::migrations::run_migrations;
use crate::Result;

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;

        // WAL mode for better concurrent performance
        let _: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;

        run_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        run_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock();
        f(&conn)
    }

    pub fn transaction<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        let result = f(&tx)?;
        tx.commit()?;
        Ok(result)
    }

    /// Raw JSON text stored under `key` in `area`
    pub fn get_item(&self, area: AreaName, key: &str) -> Result<Option<String>> {
        self.with_connection(|conn| {
            let value = conn
                .query_row(
                    "SELECT value FROM storage_items WHERE area = ?1 AND key = ?2",
                    [area.as_str(), key],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(value)
        })
    }

    /// Write several items atomically
    pub fn set_items(&self, area: AreaName, items: &[(String, String)]) -> Result<()> {
        let updated_at = Utc::now().to_rfc3339();
        self.transaction(|conn| {
            for (key, value) in items {
                conn.execute(
                    "INSERT OR REPLACE INTO storage_items (area, key, value, updated_at)
                     VALUES (?1, ?2, ?3, ?4)",
                    rusqlite::params![area.as_str(), key, value, updated_at],
                )?;
            }
            Ok(())
        })
    }

    pub fn remove_item(&self, area: AreaName, key: &str) -> Result<()> {
        self.with_connection(|conn| {
            conn.execute(
                "DELETE FROM storage_items WHERE area = ?1 AND key = ?2",
                [area.as_str(), key],
            )?;
            Ok(())
        })
    }

    pub fn clear_area(&self, area: AreaName) -> Result<usize> {
        self.with_connection(|conn| {
            let removed = conn.execute(
                "DELETE FROM storage_items WHERE area = ?1",
                [area.as_str()],
            )?;
            Ok(removed)
        })
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
        }
    }
}
