// kamisama-rs: Sparking! ZERO Mod Manager
//
// SPDX-FileCopyrightText: 2026 Kamisama Loader Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration sections.
//!
//! ```text
//! Config: GlobalConfig, PathsConfig, NetworkConfig, GameConfig
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::logging::LogLevel;

/// Global configuration options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file. No file logging when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: None,
        }
    }
}

/// Remote catalog and download settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkConfig {
    /// Maximum remote requests in flight for batch operations.
    pub concurrency: usize,
    /// User-Agent sent with every request.
    pub user_agent: String,
    /// GameBanana API base URL.
    pub gamebanana_url: String,
    /// GitHub API base URL.
    pub github_url: String,
    /// Token bucket size for catalog requests.
    pub rate_limit_capacity: u32,
    /// Token refill rate (tokens per second).
    pub rate_limit_per_second: f64,
    /// Response cache time-to-live in seconds.
    pub cache_ttl_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            concurrency: 5,
            user_agent: format!("kamisama-rs/{}", env!("CARGO_PKG_VERSION")),
            gamebanana_url: "https://gamebanana.com/apiv11".to_string(),
            github_url: "https://api.github.com".to_string(),
            rate_limit_capacity: 10,
            rate_limit_per_second: 2.0,
            cache_ttl_secs: 300,
        }
    }
}

/// Target game identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Game id on the remote catalog.
    pub game_id: u64,
    /// Repository (`owner/repo`) publishing the script loader.
    pub loader_repo: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            game_id: 21179,
            loader_repo: "UE4SS-RE/RE-UE4SS".to_string(),
        }
    }
}

impl GameConfig {
    /// Split `loader_repo` into owner and repository name.
    #[must_use]
    pub fn loader_owner_repo(&self) -> Option<(&str, &str)> {
        self.loader_repo
            .split_once('/')
            .filter(|(owner, repo)| !owner.is_empty() && !repo.is_empty())
    }
}
