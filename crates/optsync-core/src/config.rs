//! Options store configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::sync::DEFAULT_STORAGE_NAME;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Storage key the options record lives under
    pub storage_name: String,
    /// Path to the database file backing both storage areas
    pub database_path: PathBuf,
    /// Use the synchronized area; `false` pins the store to the local area
    pub prefer_sync: bool,
}

impl SyncConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            storage_name: DEFAULT_STORAGE_NAME.to_string(),
            database_path: data_dir.join("options.db"),
            prefer_sync: true,
        }
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("optsync"))
            .unwrap_or_else(|| PathBuf::from(".optsync"))
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

mod dirs {
    use std::path::PathBuf;

    pub fn data_local_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("LOCALAPPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".local/share"))
                })
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }
}
