//! OptSync Core
//!
//! Keeps an extension's options record consistent between a storage area
//! and the forms that edit it. Defaults and migrations are applied once per
//! install or update; forms are filled from storage and write edits back.

mod binder;
mod config;
mod definition;
mod error;
mod lifecycle;
pub mod migrations;
mod sync;
mod value;

pub use binder::{apply_to_form, read_field, write_field, FormSyncReport};
pub use config::SyncConfig;
pub use definition::{Definition, Migration};
pub use error::SyncError;
pub use lifecycle::{
    InstallEvents, InstallReason, InstalledDetails, InstalledListener, LifecycleEvents,
};
pub use sync::{OptionsSync, DEFAULT_STORAGE_NAME};
pub use value::{OptionValue, Options};

// Re-export the collaborators hosts plug in
pub use optsync_forms::{
    ControlType, Form, FormEvent, FormEventKind, FormField, FormListener, HeadlessForm,
};
pub use optsync_storage::{
    select_area, AreaName, Database, MemoryStorageArea, SqliteStorageArea, StorageArea,
    StorageError,
};

pub type Result<T> = std::result::Result<T, SyncError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
