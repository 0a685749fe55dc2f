// kamisama-rs: Sparking! ZERO Mod Manager
//
// SPDX-FileCopyrightText: 2026 Kamisama Loader Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! JSON persistence for the library documents.
//!
//! A missing document loads as its default. A document that exists but
//! does not parse is an error, so a damaged `mods.json` is never silently
//! replaced with an empty list. Writes go through a temp file in the same
//! directory and are renamed into place.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{LocalMod, Profile, Settings};
use crate::error::LibraryError;
use crate::utility::fs::atomic::write_atomic;

pub const MODS_FILE: &str = "mods.json";
pub const PROFILES_FILE: &str = "profiles.json";
pub const SETTINGS_FILE: &str = "settings.json";

/// Reads and writes the library documents under one data directory.
#[derive(Debug, Clone)]
pub struct LibraryStore {
    data_dir: PathBuf,
}

impl LibraryStore {
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// # Errors
    ///
    /// Returns [`LibraryError`] if `mods.json` exists but cannot be read or parsed.
    pub fn load_mods(&self) -> Result<Vec<LocalMod>, LibraryError> {
        read_json(&self.data_dir.join(MODS_FILE))
    }

    /// # Errors
    ///
    /// Returns [`LibraryError::Write`] on I/O failure.
    pub fn save_mods(&self, mods: &[LocalMod]) -> Result<(), LibraryError> {
        write_json(&self.data_dir.join(MODS_FILE), &mods)
    }

    /// # Errors
    ///
    /// Returns [`LibraryError`] if `profiles.json` exists but cannot be read or parsed.
    pub fn load_profiles(&self) -> Result<Vec<Profile>, LibraryError> {
        read_json(&self.data_dir.join(PROFILES_FILE))
    }

    /// # Errors
    ///
    /// Returns [`LibraryError::Write`] on I/O failure.
    pub fn save_profiles(&self, profiles: &[Profile]) -> Result<(), LibraryError> {
        write_json(&self.data_dir.join(PROFILES_FILE), &profiles)
    }

    /// # Errors
    ///
    /// Returns [`LibraryError`] if `settings.json` exists but cannot be read or parsed.
    pub fn load_settings(&self) -> Result<Settings, LibraryError> {
        read_json(&self.data_dir.join(SETTINGS_FILE))
    }

    /// Persist `settings`.
    ///
    /// When the library override moves to a new folder, that folder is
    /// created and receives its own copy of `settings.json`.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::Write`] if either copy cannot be written.
    pub fn save_settings(&self, settings: &Settings) -> Result<(), LibraryError> {
        let previous = self.load_settings().unwrap_or_default();
        write_json(&self.data_dir.join(SETTINGS_FILE), settings)?;

        if let Some(dir) = settings.mod_download_path()
            && previous.mod_download_path() != Some(dir)
        {
            let mirror = dir.join(SETTINGS_FILE);
            write_json(&mirror, settings)?;
            debug!(path = %mirror.display(), "mirrored settings into library folder");
        }
        Ok(())
    }
}

fn read_json<T: DeserializeOwned + Default>(path: &Path) -> Result<T, LibraryError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
        Err(source) => {
            return Err(LibraryError::Read {
                path: path.display().to_string(),
                source,
            });
        }
    };
    if raw.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(&raw).map_err(|e| LibraryError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), LibraryError> {
    let write_err = |source: std::io::Error| LibraryError::Write {
        path: path.display().to_string(),
        source,
    };

    let raw = serde_json::to_string_pretty(value).map_err(|e| write_err(e.into()))?;
    write_atomic(path, raw.as_bytes()).map_err(write_err)?;
    debug!(path = %path.display(), "saved");
    Ok(())
}
