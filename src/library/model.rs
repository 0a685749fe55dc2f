// kamisama-rs: Sparking! ZERO Mod Manager
//
// SPDX-FileCopyrightText: 2026 Kamisama Loader Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Persisted records: mods, profiles and user settings.
//!
//! Field names follow the camelCase JSON written by earlier releases so
//! existing `mods.json` files load unchanged.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::remote::RemoteCatalogEntry;

/// A mod stored in the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalMod {
    /// Opaque stable identifier.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_enabled: bool,
    /// Storage folder owned by the library. Never inside the game tree.
    pub folder_path: PathBuf,
    /// Load order. Higher values get later filename prefixes and win.
    #[serde(default)]
    pub priority: u32,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_banana_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_file_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_file_url: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub has_update: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    /// Destination paths currently materialized in the game tree.
    #[serde(default)]
    pub deployed_files: Vec<PathBuf>,
    /// Entry this mod owns in the script loader's `mods.txt`.
    #[serde(
        rename = "ue4ssModName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub loader_registry_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<i64>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_nsfw: bool,
}

impl LocalMod {
    /// New local record with the defaults used for manually installed files.
    #[must_use]
    pub fn new_local(
        id: impl Into<String>,
        name: impl Into<String>,
        folder_path: PathBuf,
        priority: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            author: "Local".to_string(),
            version: "1.0".to_string(),
            description: "Locally installed mod".to_string(),
            is_enabled: true,
            folder_path,
            priority,
            file_size: 0,
            game_banana_id: None,
            latest_version: None,
            latest_file_id: None,
            latest_file_url: None,
            has_update: false,
            icon_url: None,
            deployed_files: Vec::new(),
            loader_registry_name: None,
            category: None,
            images: Vec::new(),
            date_added: None,
            is_nsfw: false,
        }
    }

    /// Build a library record from a catalog entry at the install boundary.
    #[must_use]
    pub fn from_remote(
        id: impl Into<String>,
        entry: &RemoteCatalogEntry,
        folder_path: PathBuf,
        file_id: Option<u64>,
        priority: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: entry.name.clone(),
            author: entry.author.clone(),
            version: entry.version.clone(),
            description: entry.description.clone(),
            is_enabled: true,
            folder_path,
            priority,
            file_size: 0,
            game_banana_id: Some(entry.remote_id),
            latest_version: Some(entry.version.clone()),
            latest_file_id: file_id,
            latest_file_url: None,
            has_update: false,
            icon_url: entry.icon_url.clone(),
            deployed_files: Vec::new(),
            loader_registry_name: None,
            category: entry.category.clone(),
            images: entry.images.clone(),
            date_added: entry.date_added,
            is_nsfw: entry.is_nsfw,
        }
    }

    /// Refresh catalog metadata on an existing record, keeping local state
    /// (id, priority, enabled flag, deployment bookkeeping).
    pub fn apply_remote(&mut self, entry: &RemoteCatalogEntry, file_id: Option<u64>) {
        self.name.clone_from(&entry.name);
        self.author.clone_from(&entry.author);
        self.version.clone_from(&entry.version);
        self.description.clone_from(&entry.description);
        self.latest_version = Some(entry.version.clone());
        self.latest_file_id = file_id;
        self.latest_file_url = None;
        self.has_update = false;
        self.icon_url.clone_from(&entry.icon_url);
        self.category.clone_from(&entry.category);
        self.images.clone_from(&entry.images);
        self.is_nsfw = entry.is_nsfw;
    }

    /// Non-empty category, if any.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.trim().is_empty())
    }
}

/// A named set of mods that should be enabled together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub mod_ids: Vec<String>,
}

impl Profile {
    /// Whether the profile enables `mod_id`.
    #[must_use]
    pub fn contains(&self, mod_id: &str) -> bool {
        self.mod_ids.iter().any(|id| id == mod_id)
    }

    /// Add or remove `mod_id`. Returns true if membership changed.
    pub fn set_member(&mut self, mod_id: &str, member: bool) -> bool {
        let present = self.contains(mod_id);
        if member && !present {
            self.mod_ids.push(mod_id.to_string());
            true
        } else if !member && present {
            self.mod_ids.retain(|id| id != mod_id);
            true
        } else {
            false
        }
    }
}

/// User settings (singleton document).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Game executable or install directory. Empty when unset.
    #[serde(default)]
    pub game_path: PathBuf,
    /// Library folder override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mod_download_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_profile_id: Option<String>,
    /// Extra arguments appended when launching the game.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launch_args: Option<String>,
}

impl Settings {
    /// Configured game path, or `None` when blank.
    #[must_use]
    pub fn game_path(&self) -> Option<&Path> {
        (!self.game_path.as_os_str().is_empty()).then_some(self.game_path.as_path())
    }

    /// Library override, or `None` when blank.
    #[must_use]
    pub fn mod_download_path(&self) -> Option<&Path> {
        self.mod_download_path
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }

    /// Launch arguments split on whitespace.
    #[must_use]
    pub fn launch_args(&self) -> Vec<String> {
        self.launch_args
            .as_deref()
            .map(|a| a.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }
}
