//! Options definition: declared defaults plus ordered migrations

use std::fmt;
use std::sync::Arc;

use crate::value::{OptionValue, Options};

/// Transforms the stored record in place, given the declared defaults
pub type Migration = Arc<dyn Fn(&mut Options, &Options) + Send + Sync>;

#[derive(Clone, Default)]
pub struct Definition {
    defaults: Options,
    migrations: Vec<Migration>,
}

impl Definition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults(mut self, defaults: Options) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_default(mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.defaults.insert(name.into(), value.into());
        self
    }

    /// Append a migration; migrations run in the order they were added
    pub fn with_migration<F>(mut self, migration: F) -> Self
    where
        F: Fn(&mut Options, &Options) + Send + Sync + 'static,
    {
        self.migrations.push(Arc::new(migration));
        self
    }

    pub fn defaults(&self) -> &Options {
        &self.defaults
    }

    pub fn migration_count(&self) -> usize {
        self.migrations.len()
    }

    pub fn run_migrations(&self, options: &mut Options) {
        for migrate in &self.migrations {
            migrate(options, &self.defaults);
        }
    }

    /// Fill in every default missing from `options`; stored values win
    pub fn merge_defaults(&self, options: Options) -> Options {
        let mut merged = self.defaults.clone();
        merged.extend(options);
        merged
    }

    /// Migrate `options` and merge the defaults under the result
    pub fn apply(&self, mut options: Options) -> Options {
        if !self.migrations.is_empty() {
            tracing::info!(count = self.migration_count(), "Running migrations");
            self.run_migrations(&mut options);
        }
        self.merge_defaults(options)
    }
}

impl fmt::Debug for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Definition")
            .field("defaults", &self.defaults)
            .field("migrations", &self.migrations.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations::remove_unused;
    use crate::options;

    #[test]
    fn test_empty_record_becomes_defaults() {
        let definition = Definition::new()
            .with_default("theme", "light")
            .with_default("notify", false);

        assert_eq!(definition.apply(Options::new()), *definition.defaults());
    }

    #[test]
    fn test_stored_values_win_over_defaults() {
        let definition = Definition::new().with_defaults(options! {
            "theme" => "light",
            "notify" => false,
        });

        let merged = definition.apply(options! {
            "theme" => "dark",
            "extra" => 1,
        });

        assert_eq!(
            merged,
            options! {
                "theme" => "dark",
                "notify" => false,
                "extra" => 1,
            }
        );
    }

    #[test]
    fn test_migrations_run_in_order_before_merge() {
        let definition = Definition::new()
            .with_default("color", "red")
            .with_migration(|options, _| {
                if let Some(old) = options.remove("colour") {
                    options.insert("color".to_string(), old);
                }
            })
            .with_migration(remove_unused);

        let merged = definition.apply(options! {
            "colour" => "blue",
            "stale" => true,
        });

        assert_eq!(merged, options! { "color" => "blue" });
        assert_eq!(definition.migration_count(), 2);
    }

    #[test]
    fn test_stored_values_are_not_coerced() {
        let definition = Definition::new().with_default("limit", 10);
        let merged = definition.apply(options! { "limit" => "ten" });

        assert_eq!(merged["limit"], OptionValue::from("ten"));
    }
}
