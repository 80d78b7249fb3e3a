//! Options store
//!
//! `OptionsSync` reads and writes one options record in a storage area,
//! applies a `Definition` on install/update, and keeps forms in sync with
//! the record.
//!
//! `set` is a read-modify-write with no lock held across the two steps:
//! two concurrent `set` calls can both read the same record and the later
//! write drops the earlier one's change. Callers that need both updates must
//! serialize their writes.

use futures_util::FutureExt;
use serde_json::{Map, Value};
use std::sync::Arc;

use optsync_forms::{Form, FormEvent, FormEventKind, FormListener};
use optsync_storage::{select_area, AreaName, Database, SqliteStorageArea, StorageArea};

use crate::binder::{apply_to_form, read_field, FormSyncReport};
use crate::config::SyncConfig;
use crate::definition::Definition;
use crate::error::SyncError;
use crate::lifecycle::{InstalledDetails, LifecycleEvents};
use crate::value::Options;
use crate::Result;

pub const DEFAULT_STORAGE_NAME: &str = "options";

#[derive(Clone)]
pub struct OptionsSync {
    /// Storage key of the options record
    storage_name: String,
    storage: Arc<dyn StorageArea>,
    /// Install/update trigger; `None` applies definitions immediately
    lifecycle: Option<Arc<dyn LifecycleEvents>>,
}

impl OptionsSync {
    /// Store the record under the default `"options"` key
    pub fn new(storage: Arc<dyn StorageArea>) -> Self {
        Self::with_storage_name(DEFAULT_STORAGE_NAME, storage)
    }

    pub fn with_storage_name(storage_name: impl Into<String>, storage: Arc<dyn StorageArea>) -> Self {
        Self {
            storage_name: storage_name.into(),
            storage,
            lifecycle: None,
        }
    }

    /// Defer definition application to the host's install/update events
    pub fn with_lifecycle(mut self, lifecycle: Arc<dyn LifecycleEvents>) -> Self {
        self.lifecycle = Some(lifecycle);
        self
    }

    /// Open the configured database and pick its sync or local area
    pub fn from_config(config: &SyncConfig) -> Result<Self> {
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::open(&config.database_path)?;

        let local: Arc<dyn StorageArea> = Arc::new(SqliteStorageArea::new(db.clone(), AreaName::Local));
        let sync: Option<Arc<dyn StorageArea>> = if config.prefer_sync {
            Some(Arc::new(SqliteStorageArea::new(db, AreaName::Sync)))
        } else {
            None
        };

        Ok(Self::with_storage_name(
            config.storage_name.clone(),
            select_area(sync, local),
        ))
    }

    pub fn storage_name(&self) -> &str {
        &self.storage_name
    }

    pub fn storage(&self) -> &Arc<dyn StorageArea> {
        &self.storage
    }

    // === Definition ===

    /// Declare defaults and migrations.
    ///
    /// With a lifecycle source the definition is applied every time an
    /// install/update event fires and this returns right away. Without one
    /// it is applied now.
    pub async fn define(&self, definition: Definition) -> Result<()> {
        match &self.lifecycle {
            Some(lifecycle) => {
                // The listener keeps this store (and through it the hub) alive
                // for as long as the hub lives; hubs are process-wide.
                let sync = self.clone();
                let definition = Arc::new(definition);
                lifecycle.on_installed(Arc::new(move |details: InstalledDetails| {
                    let sync = sync.clone();
                    let definition = Arc::clone(&definition);
                    async move {
                        if let Err(e) = sync.apply_definition(&definition).await {
                            tracing::error!(
                                storage = %sync.storage_name,
                                reason = ?details.reason,
                                error = %e,
                                "Failed to apply options definition"
                            );
                        }
                    }
                    .boxed()
                }));
                tracing::debug!(storage = %self.storage_name, "Definition deferred to install event");
                Ok(())
            }
            None => self.apply_definition(&definition).await,
        }
    }

    async fn apply_definition(&self, definition: &Definition) -> Result<()> {
        let options = self.get_all().await?;
        tracing::info!(storage = %self.storage_name, existing = ?options, "Existing options");

        let merged = definition.apply(options);
        self.set_all(&merged).await
    }

    // === Record access ===

    /// The stored record, empty when nothing has been written yet
    pub async fn get_all(&self) -> Result<Options> {
        match self.storage.get(&self.storage_name).await? {
            None | Some(Value::Null) => Ok(Options::new()),
            Some(value @ Value::Object(_)) => Ok(serde_json::from_value(value)?),
            Some(other) => Err(SyncError::InvalidRecord {
                storage_name: self.storage_name.clone(),
                found: json_kind(&other),
            }),
        }
    }

    /// Replace the stored record
    pub async fn set_all(&self, options: &Options) -> Result<()> {
        let mut items = Map::new();
        items.insert(self.storage_name.clone(), serde_json::to_value(options)?);
        self.storage.set(items).await?;
        tracing::debug!(storage = %self.storage_name, count = options.len(), "Options saved");
        Ok(())
    }

    /// Merge `partial` over the stored record, last write wins per key
    pub async fn set(&self, partial: Options) -> Result<()> {
        let mut options = self.get_all().await?;
        options.extend(partial);
        self.set_all(&options).await
    }

    // === Forms ===

    /// Fill `form` from the stored record and save every later edit.
    pub async fn sync_form<F: Form + ?Sized>(&self, form: &F) -> Result<FormSyncReport> {
        let options = self.get_all().await?;
        let report = apply_to_form(&options, form);

        let listener: FormListener = {
            let sync = self.clone();
            Arc::new(move |event: FormEvent| {
                let sync = sync.clone();
                async move { sync.handle_form_update(event).await }.boxed()
            })
        };
        form.add_event_listener(FormEventKind::Input, Arc::clone(&listener));
        form.add_event_listener(FormEventKind::Change, listener);

        Ok(report)
    }

    async fn handle_form_update(&self, event: FormEvent) {
        let name = event.target.name();
        if name.is_empty() {
            return;
        }

        let Some(value) = read_field(event.target.as_ref()) else {
            tracing::warn!(option = %name, "Field has no selected option, not saving");
            return;
        };

        tracing::info!(option = %name, value = %value, event = event.kind.as_str(), "Saving option");
        let mut partial = Options::new();
        partial.insert(name.clone(), value);

        if let Err(e) = self.set(partial).await {
            tracing::error!(option = %name, error = %e, "Failed to save option");
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
