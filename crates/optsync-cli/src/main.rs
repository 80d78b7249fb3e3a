//! OptSync CLI
//!
//! Host-side tool for the SQLite options store: print the record, edit
//! single options, and apply a definition file the way an install event
//! would.

mod commands;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use optsync_core::{OptionsSync, SyncConfig};

#[derive(Parser)]
#[command(name = "optsync")]
#[command(about = "Inspect and edit a stored extension options record")]
#[command(version)]
struct Cli {
    /// Database file (defaults to the platform data directory)
    #[arg(long, global = true, env = "OPTSYNC_DB")]
    db: Option<PathBuf>,

    /// Storage key of the options record
    #[arg(long, global = true, default_value = optsync_core::DEFAULT_STORAGE_NAME)]
    storage_name: String,

    /// Use the local area instead of the synchronized one
    #[arg(long, global = true)]
    local: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the stored options as JSON
    Show,

    /// Set one option, merging it into the stored record
    Set {
        name: String,
        /// `true`/`false` and numbers are stored typed unless --text is given
        value: String,
        #[arg(long)]
        text: bool,
    },

    /// Apply a definition file (defaults plus named migrations)
    Define { file: PathBuf },

    /// Replace the stored record with an empty one
    Reset,
}

impl Cli {
    fn config(&self) -> SyncConfig {
        let mut config = SyncConfig::default();
        if let Some(db) = &self.db {
            config.database_path = db.clone();
        }
        config.storage_name = self.storage_name.clone();
        config.prefer_sync = !self.local;
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    optsync_core::init_logging();

    let cli = Cli::parse();
    let config = cli.config();
    let sync = OptionsSync::from_config(&config)
        .with_context(|| format!("opening {}", config.database_path.display()))?;

    match cli.command {
        Commands::Show => commands::show(&sync).await,
        Commands::Set { name, value, text } => commands::set(&sync, name, &value, text).await,
        Commands::Define { file } => commands::define(&sync, &file).await,
        Commands::Reset => commands::reset(&sync).await,
    }
}
