//! Install/update lifecycle events
//!
//! Hosts that know when the extension is installed or updated expose that
//! through `LifecycleEvents`. `InstallEvents` is a ready-made hub the host
//! fires itself.

use futures_util::future::BoxFuture;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallReason {
    Install,
    Update,
    BrowserUpdate,
    SharedModuleUpdate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledDetails {
    pub reason: InstallReason,
    /// Version before an `Update`
    pub previous_version: Option<String>,
}

impl InstalledDetails {
    pub fn install() -> Self {
        Self {
            reason: InstallReason::Install,
            previous_version: None,
        }
    }

    pub fn update(previous_version: impl Into<String>) -> Self {
        Self {
            reason: InstallReason::Update,
            previous_version: Some(previous_version.into()),
        }
    }
}

pub type InstalledListener =
    Arc<dyn Fn(InstalledDetails) -> BoxFuture<'static, ()> + Send + Sync>;

pub trait LifecycleEvents: Send + Sync {
    /// Register a listener for install and update notifications
    fn on_installed(&self, listener: InstalledListener);
}

#[derive(Clone, Default)]
pub struct InstallEvents {
    listeners: Arc<RwLock<Vec<InstalledListener>>>,
}

impl InstallEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    /// Run every listener in registration order
    pub async fn fire_installed(&self, details: InstalledDetails) {
        let listeners: Vec<InstalledListener> = self.listeners.read().clone();
        tracing::info!(
            reason = ?details.reason,
            previous_version = ?details.previous_version,
            listeners = listeners.len(),
            "Extension installed"
        );

        for listener in listeners {
            listener(details.clone()).await;
        }
    }
}

impl LifecycleEvents for InstallEvents {
    fn on_installed(&self, listener: InstalledListener) {
        self.listeners.write().push(listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::FutureExt;

    #[tokio::test]
    async fn test_listeners_run_in_order() {
        let events = InstallEvents::new();
        let seen = Arc::new(RwLock::new(Vec::new()));

        for id in 0..3 {
            let seen = Arc::clone(&seen);
            events.on_installed(Arc::new(move |details: InstalledDetails| {
                seen.write().push((id, details.reason));
                async {}.boxed()
            }));
        }
        assert_eq!(events.listener_count(), 3);

        events.fire_installed(InstalledDetails::update("1.2.0")).await;

        assert_eq!(
            seen.read().as_slice(),
            &[
                (0, InstallReason::Update),
                (1, InstallReason::Update),
                (2, InstallReason::Update),
            ]
        );
    }

    #[test]
    fn test_reason_serialization() {
        assert_eq!(
            serde_json::to_string(&InstallReason::BrowserUpdate).unwrap(),
            "\"browser_update\""
        );
    }
}
