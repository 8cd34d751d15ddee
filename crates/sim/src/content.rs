//! Content sources shared by the commands.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use combat_content::{ActionLoader, ActorLoader, ActorTemplate, ConfigLoader};
use combat_core::{ActionCatalog, CombatConfig};

/// Data file overrides; anything left out uses the embedded content.
#[derive(Args, Clone, Debug, Default)]
pub struct ContentArgs {
    /// Combat configuration (TOML)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Extra action files (RON), layered over the embedded actions
    #[arg(long = "actions", value_name = "FILE")]
    pub actions: Vec<PathBuf>,

    /// Roster file (RON) replacing the embedded roster
    #[arg(long, value_name = "FILE")]
    pub roster: Option<PathBuf>,
}

/// Everything a battle needs.
pub struct Content {
    pub config: CombatConfig,
    pub catalog: ActionCatalog,
    pub roster: Vec<(String, ActorTemplate)>,
}

impl ContentArgs {
    pub fn load(&self) -> Result<Content> {
        let config = match &self.config {
            Some(path) => ConfigLoader::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => ConfigLoader::load_embedded()?,
        };

        let catalog = ActionLoader::load_with_overrides(self.actions.as_slice())
            .context("Failed to load actions")?;

        let roster = match &self.roster {
            Some(path) => ActorLoader::load(path)
                .with_context(|| format!("Failed to load roster {}", path.display()))?,
            None => ActorLoader::load_embedded()?,
        };

        tracing::debug!(
            actions = catalog.len(),
            actors = roster.len(),
            "content loaded"
        );

        Ok(Content {
            config,
            catalog,
            roster,
        })
    }
}
