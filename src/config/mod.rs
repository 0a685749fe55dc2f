// kamisama-rs: Sparking! ZERO Mod Manager
//
// SPDX-FileCopyrightText: 2026 Kamisama Loader Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Application configuration.
//!
//! This is the tool's own TOML configuration; the player's game path and
//! launch options live in `settings.json` (see [`crate::library`]).
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. kamisama.toml in the data dir
//! 3. kamisama.toml in cwd
//! 4. --config FILE (repeatable)
//! 5. KAMI_* env vars
//! 6. --set overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! KAMI_NETWORK__CONCURRENCY=3      → network.concurrency = 3
//! KAMI_PATHS__DATA_DIR=/srv/kami   → paths.data_dir = "/srv/kami"
//! KAMI_NETWORK__USER_AGENT=foo     → network.user_agent = "foo"
//! ```

pub mod loader;
pub mod paths;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::Result;

use loader::ConfigLoader;
use paths::PathsConfig;
use types::{GameConfig, GlobalConfig, NetworkConfig};

/// File name looked up in the data dir and the current directory.
pub const CONFIG_FILE_NAME: &str = "kamisama.toml";

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Storage paths.
    pub paths: PathsConfig,
    /// Remote catalog and download settings.
    pub network: NetworkConfig,
    /// Target game identifiers.
    pub game: GameConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use kamisama_rs::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("kamisama.toml")
    ///     .with_env_prefix("KAMI")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Resolve all paths and validate configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if path resolution fails or a value is out of range.
    pub fn resolve_and_validate(&mut self) -> Result<()> {
        self.paths.resolve()?;
        if self.network.concurrency == 0 {
            return Err(crate::error::ConfigError::InvalidValue {
                section: "network".to_string(),
                key: "concurrency".to_string(),
                message: "must be at least 1".to_string(),
            }
            .into());
        }
        if self.network.rate_limit_capacity == 0 || self.network.rate_limit_per_second <= 0.0 {
            return Err(crate::error::ConfigError::InvalidValue {
                section: "network".to_string(),
                key: "rate_limit_capacity".to_string(),
                message: "rate limit capacity and refill rate must be positive".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Format configuration options for display, sorted by key.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let fmt = |p: &Option<PathBuf>| {
            p.as_ref()
                .map_or_else(String::new, |p| p.display().to_string())
        };

        let mut options = BTreeMap::new();
        options.insert(
            "global.output_log_level",
            u8::from(self.global.output_log_level).to_string(),
        );
        options.insert(
            "global.file_log_level",
            u8::from(self.global.file_log_level).to_string(),
        );
        options.insert("global.log_file", fmt(&self.global.log_file));
        options.insert("paths.data_dir", fmt(&self.paths.data_dir));
        options.insert("paths.library_dir", fmt(&self.paths.library_dir));
        options.insert("paths.temp_dir", fmt(&self.paths.temp_dir));
        options.insert("network.concurrency", self.network.concurrency.to_string());
        options.insert("network.user_agent", self.network.user_agent.clone());
        options.insert("network.gamebanana_url", self.network.gamebanana_url.clone());
        options.insert("network.github_url", self.network.github_url.clone());
        options.insert(
            "network.rate_limit_capacity",
            self.network.rate_limit_capacity.to_string(),
        );
        options.insert(
            "network.rate_limit_per_second",
            self.network.rate_limit_per_second.to_string(),
        );
        options.insert("network.cache_ttl_secs", self.network.cache_ttl_secs.to_string());
        options.insert("game.game_id", self.game.game_id.to_string());
        options.insert("game.loader_repo", self.game.loader_repo.clone());

        let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}
