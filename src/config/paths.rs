// kamisama-rs: Sparking! ZERO Mod Manager
//
// SPDX-FileCopyrightText: 2026 Kamisama Loader Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Path configuration.
//!
//! ```text
//! data_dir/
//!   mods.json
//!   profiles.json
//!   settings.json
//!   api-cache.json
//!   Mods/          (library_dir, overridable by settings.modDownloadPath)
//! temp_dir/        (downloads in flight)
//! ```
//!
//! All paths are optional and resolved from `data_dir` if not set.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Directory name of the default mod library inside `data_dir`.
pub const LIBRARY_DIR_NAME: &str = "Mods";

/// Storage locations for the library and its documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Directory holding the JSON documents (default: platform data dir).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Mod storage directory (default: `data_dir/Mods`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library_dir: Option<PathBuf>,
    /// Scratch directory for downloads (default: system temp/kamisama).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_dir: Option<PathBuf>,
}

impl PathsConfig {
    /// Resolve relative paths against `data_dir` and fill in defaults.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if no `data_dir` is set and the
    /// platform has no per-user data directory.
    pub fn resolve(&mut self) -> Result<()> {
        if self.data_dir.is_none() {
            self.data_dir = default_data_dir();
        }
        let data_dir = self.data_dir()?.to_path_buf();

        match &self.library_dir {
            Some(p) if p.is_relative() => self.library_dir = Some(data_dir.join(p)),
            None => self.library_dir = Some(data_dir.join(LIBRARY_DIR_NAME)),
            _ => {}
        }

        if self.temp_dir.is_none() {
            self.temp_dir = Some(std::env::temp_dir().join("kamisama"));
        }

        Ok(())
    }

    /// Get the data directory, returning an error if not set.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if `data_dir` is not set.
    pub fn data_dir(&self) -> Result<&Path> {
        required(self.data_dir.as_deref(), "data_dir")
    }

    /// Get the library directory, returning an error if not resolved.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if `library_dir` is not set.
    pub fn library_dir(&self) -> Result<&Path> {
        required(self.library_dir.as_deref(), "library_dir")
    }

    /// Get the temp directory, returning an error if not resolved.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if `temp_dir` is not set.
    pub fn temp_dir(&self) -> Result<&Path> {
        required(self.temp_dir.as_deref(), "temp_dir")
    }
}

fn required<'a>(path: Option<&'a Path>, key: &str) -> Result<&'a Path> {
    path.ok_or_else(|| {
        ConfigError::MissingKey {
            section: "paths".to_string(),
            key: key.to_string(),
        }
        .into()
    })
}

/// Per-user data directory for the platform, if it has one.
#[must_use]
pub fn default_data_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "KamisamaLoader")
        .map(|dirs| dirs.data_dir().to_path_buf())
}
