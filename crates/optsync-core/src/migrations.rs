//! Reusable migrations for `Definition::with_migration`

use crate::value::Options;

/// Drop every stored option that is no longer declared in `defaults`.
/// Never adds keys.
pub fn remove_unused(options: &mut Options, defaults: &Options) {
    options.retain(|name, _| {
        let keep = defaults.contains_key(name);
        if !keep {
            tracing::debug!(option = %name, "Removing unused option");
        }
        keep
    });
}
