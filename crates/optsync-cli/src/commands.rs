//! Command handlers

use std::path::Path;

use anyhow::{bail, Context};
use optsync_core::{migrations, Definition, OptionValue, Options, OptionsSync};
use serde::Deserialize;

/// On-disk form of a `Definition`; migrations are referenced by name
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DefinitionFile {
    pub defaults: Options,
    pub migrations: Vec<String>,
}

impl DefinitionFile {
    pub fn into_definition(self) -> anyhow::Result<Definition> {
        let mut definition = Definition::new().with_defaults(self.defaults);
        for name in &self.migrations {
            definition = match name.as_str() {
                "remove_unused" => definition.with_migration(migrations::remove_unused),
                other => bail!("Unknown migration: {other}"),
            };
        }
        Ok(definition)
    }
}

/// Interpret a command-line value the way a JSON literal would read
pub fn parse_value(raw: &str, force_text: bool) -> OptionValue {
    if force_text {
        return OptionValue::from(raw);
    }
    match raw {
        "true" => OptionValue::Bool(true),
        "false" => OptionValue::Bool(false),
        _ => serde_json::from_str::<serde_json::Number>(raw)
            .map(OptionValue::Number)
            .unwrap_or_else(|_| OptionValue::from(raw)),
    }
}

pub async fn show(sync: &OptionsSync) -> anyhow::Result<()> {
    let options = sync.get_all().await?;
    println!("{}", serde_json::to_string_pretty(&options)?);
    Ok(())
}

pub async fn set(sync: &OptionsSync, name: String, raw: &str, force_text: bool) -> anyhow::Result<()> {
    let value = parse_value(raw, force_text);
    tracing::info!(option = %name, value = %value, "Saving option");

    let mut partial = Options::new();
    partial.insert(name, value);
    sync.set(partial).await?;
    Ok(())
}

pub async fn define(sync: &OptionsSync, file: &Path) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("reading {}", file.display()))?;
    let parsed: DefinitionFile = serde_json::from_str(&text)
        .with_context(|| format!("parsing {}", file.display()))?;

    sync.define(parsed.into_definition()?).await?;
    show(sync).await
}

pub async fn reset(sync: &OptionsSync) -> anyhow::Result<()> {
    sync.set_all(&Options::new()).await?;
    tracing::info!(storage = %sync.storage_name(), "Options reset");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use optsync_core::{options, AreaName, MemoryStorageArea};
    use std::sync::Arc;

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("true", false), OptionValue::from(true));
        assert_eq!(parse_value("12", false), OptionValue::from(12));
        assert_eq!(parse_value("12", true), OptionValue::from("12"));
        assert_eq!(parse_value("dark", false), OptionValue::from("dark"));
    }

    #[test]
    fn test_unknown_migration_is_rejected() {
        let file: DefinitionFile =
            serde_json::from_str(r#"{ "migrations": ["rename_everything"] }"#).unwrap();
        assert!(file.into_definition().is_err());
    }

    #[tokio::test]
    async fn test_definition_file_applies() {
        let sync = OptionsSync::new(Arc::new(MemoryStorageArea::new(AreaName::Local)));
        sync.set_all(&options! { "old" => 1, "theme" => "dark" })
            .await
            .unwrap();

        let file: DefinitionFile = serde_json::from_str(
            r#"{ "defaults": { "theme": "light", "notify": true }, "migrations": ["remove_unused"] }"#,
        )
        .unwrap();
        sync.define(file.into_definition().unwrap()).await.unwrap();

        assert_eq!(
            sync.get_all().await.unwrap(),
            options! { "theme" => "dark", "notify" => true }
        );

        set(&sync, "limit".to_string(), "5", false).await.unwrap();
        reset(&sync).await.unwrap();
        assert!(sync.get_all().await.unwrap().is_empty());
    }
}
