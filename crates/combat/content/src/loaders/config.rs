//! Combat configuration loader.

use std::path::Path;

use combat_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

const EMBEDDED: &str = include_str!("../../data/combat.toml");

/// Loader for combat configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Keys the file leaves out keep their defaults.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// The configuration shipped with the crate.
    pub fn load_embedded() -> LoadResult<CombatConfig> {
        Self::parse(EMBEDDED)
    }

    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if let Err(error) = config.thresholds.validate() {
            tracing::warn!(%error, "configured thresholds are out of order");
        }
        if config.max_explosions > CombatConfig::MAX_EXPLOSIONS_HARD_CAP {
            tracing::warn!(
                max_explosions = config.max_explosions,
                cap = CombatConfig::MAX_EXPLOSIONS_HARD_CAP,
                "explosion limit above the hard cap; clamped"
            );
        }

        Ok(config)
    }
}
