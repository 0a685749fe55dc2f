// kamisama-rs: Sparking! ZERO Mod Manager
//
// SPDX-FileCopyrightText: 2026 Kamisama Loader Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Layered configuration sources.
//!
//! ```text
//! ConfigLoader::new()
//!   .add_toml_file_optional(data_dir/kamisama.toml)
//!   .add_toml_file_optional(./kamisama.toml)
//!   .add_toml_file(--config ...)        must exist
//!   .with_env_prefix("KAMI")            KAMI_SECTION__KEY
//!   .set_override_str("section.key=v")  --set, highest
//!        |
//!        v
//!    build() --> deserialize --> resolve_and_validate --> Config
//! ```

use std::path::{Path, PathBuf};

use config::{ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};

use super::Config;
use crate::error::{ConfigError, Result};

/// Accumulates sources; later sources win.
#[derive(Default)]
pub struct ConfigLoader {
    builder: ConfigBuilder<DefaultState>,
    env_prefix: Option<String>,
    files: Vec<PathBuf>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A file that must exist when `build()` runs.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(self, path: P) -> Self {
        self.add_file(path.as_ref(), true)
    }

    /// A file that is skipped when absent. Only files present now are
    /// reported by [`loaded_files`](Self::loaded_files).
    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(self, path: P) -> Self {
        self.add_file(path.as_ref(), false)
    }

    fn add_file(mut self, path: &Path, required: bool) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(required));
        if required || path.exists() {
            self.files.push(path.to_path_buf());
        }
        self
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self
    }

    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Apply a `section.key=value` override. `section/key` is accepted too.
    ///
    /// # Errors
    ///
    /// Returns an error if the string has no `=` or the key is rejected.
    pub fn set_override_str(mut self, option: &str) -> Result<Self> {
        let (key, value) = option.split_once('=').ok_or_else(|| ConfigError::InvalidValue {
            section: "override".to_string(),
            key: option.to_string(),
            message: "expected section.key=value".to_string(),
        })?;
        let key = key.trim().replace('/', ".");
        self.builder = self.builder.set_override(key.as_str(), value.trim())?;
        Ok(self)
    }

    /// TOML files registered so far, in load order.
    #[must_use]
    pub fn loaded_files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Merge every source and validate the result.
    ///
    /// # Errors
    ///
    /// Returns an error if a required file is missing, a source does not
    /// parse, or the merged values are invalid.
    pub fn build(self) -> Result<Config> {
        let builder = match &self.env_prefix {
            Some(prefix) => self.builder.add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            ),
            None => self.builder,
        };
        let mut config: Config = builder.build()?.try_deserialize()?;
        config.resolve_and_validate()?;
        Ok(config)
    }
}
