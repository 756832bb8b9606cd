//! Configuration loading and management.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use replay_core::AbilityCatalog;
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// JSON file replacing the built-in ability catalog.
    pub ability_catalog: Option<PathBuf>,
    /// Worker threads for batch analysis; rayon's default when unset.
    pub threads: Option<usize>,
    /// Emit one record per line instead of a JSON array.
    pub json_lines: bool,
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // REPLAY_STATS_* overrides
        figment = figment.merge(Env::prefixed("REPLAY_STATS_"));

        figment.extract()
    }

    /// The configured ability catalog, or the built-in one.
    pub fn catalog(&self) -> Result<AbilityCatalog> {
        let Some(path) = &self.ability_catalog else {
            return Ok(AbilityCatalog::default());
        };

        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read ability catalog: {}", path.display()))?;
        AbilityCatalog::from_json(&json)
            .with_context(|| format!("failed to parse ability catalog: {}", path.display()))
    }
}

/// Returns the platform-specific config directory for replay-stats.
///
/// On Linux: `~/.config/replay-stats`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("replay-stats"))
}
