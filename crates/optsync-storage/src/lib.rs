//! OptSync Storage Layer
//!
//! Key-value storage areas mirroring the browser extension storage API.
//! Each area maps string keys to JSON values; `sync` and `local` areas
//! present the same contract.

mod area;
mod database;
mod error;
mod memory;
mod migrations;
mod sqlite;

pub use area::{select_area, AreaName, StorageArea};
pub use database::Database;
pub use error::StorageError;
pub use memory::MemoryStorageArea;
pub use sqlite::SqliteStorageArea;

pub type Result<T> = std::result::Result<T, StorageError>;
