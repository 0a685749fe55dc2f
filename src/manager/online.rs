// kamisama-rs: Sparking! ZERO Mod Manager
//
// SPDX-FileCopyrightText: 2026 Kamisama Loader Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Catalog-backed operations: update checks, updates, online installs and
//! the script loader.
//!
//! ```text
//! check_for_updates   JoinSet, one fetch_profile per linked mod,
//!                     at most `concurrency` in flight (Semaphore)
//! update_all          downloads overlap (Semaphore), then extract +
//!                     redeploy one mod at a time
//! install_online      profile -> first file -> DownloadHandle::wait
//!                     -> extract into <library>/<folder_name> -> upsert
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use futures_util::future::join_all;
use regex::Regex;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use super::{ModManager, position, unique_id};
use crate::archive;
use crate::deploy::targets::TargetPaths;
use crate::error::{ConfigError, DeployError, KamiResult, LibraryError, NetworkError, Result};
use crate::library::priority;
use crate::library::LocalMod;
use crate::remote::RemoteCatalogEntry;
use crate::utility::fs::walk::folder_size;

/// Record a pending update on `m` if `entry` is newer.
///
/// Newer means the remote's first file id is above the stored one, or,
/// when no file id was stored, that the version strings differ.
pub fn detect_update(m: &mut LocalMod, entry: &RemoteCatalogEntry) -> bool {
    let latest = entry.latest_file();
    let newer = match (latest.map(|f| f.id), m.latest_file_id) {
        (Some(remote), Some(stored)) => remote > stored,
        (None, Some(_)) => false,
        (_, None) => entry.version != m.version,
    };

    if newer {
        m.has_update = true;
        m.latest_version = Some(entry.version.clone());
        m.latest_file_id = latest.map(|f| f.id);
        m.latest_file_url = latest.map(|f| f.download_url.clone());
    }
    newer
}

/// Library folder name for a catalog entry: every character outside
/// `[A-Za-z0-9]` becomes `_`.
///
/// # Errors
///
/// Returns an error if the pattern fails to compile.
pub fn folder_name(name: &str, remote_id: u64) -> Result<String> {
    let regex = Regex::new("[^A-Za-z0-9]").context("failed to compile folder name regex")?;
    let sanitized = regex.replace_all(name.trim(), "_").into_owned();
    if sanitized.trim_matches('_').is_empty() {
        return Ok(format!("mod_{remote_id}"));
    }
    Ok(sanitized)
}

impl ModManager {
    /// Check every catalog-linked mod for a newer release.
    ///
    /// Returns the ids of mods that now have a pending update. A failed
    /// lookup is logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if `mods.json` cannot be read or written.
    pub async fn check_for_updates(&self) -> Result<Vec<String>> {
        let mut mods = self.store.load_mods()?;
        let semaphore = Arc::new(Semaphore::new(self.concurrency.max(1)));
        let mut set = JoinSet::new();

        for (i, remote_id) in mods
            .iter()
            .enumerate()
            .filter_map(|(i, m)| m.game_banana_id.map(|r| (i, r)))
        {
            let catalog = Arc::clone(&self.catalog);
            let semaphore = Arc::clone(&semaphore);
            set.spawn(async move {
                let _permit = semaphore.acquire_owned().await;
                (i, remote_id, catalog.fetch_profile(remote_id).await)
            });
        }

        let mut updated = Vec::new();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((i, _, Ok(entry))) => {
                    if detect_update(&mut mods[i], &entry) {
                        updated.push(i);
                    }
                }
                Ok((_, remote_id, Err(e))) => {
                    warn!(remote_id, error = %e, "update check failed");
                }
                Err(e) => warn!(error = %e, "update check task panicked"),
            }
        }

        updated.sort_unstable();
        self.store.save_mods(&mods)?;
        let ids: Vec<String> = updated.into_iter().map(|i| mods[i].id.clone()).collect();
        info!(updates = ids.len(), "update check finished");
        Ok(ids)
    }

    /// Download and apply the pending update of one mod.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::NoUpdate`] when nothing is pending, or an
    /// error if the download, extraction or persistence fails.
    pub async fn update_mod(&self, id: &str) -> Result<()> {
        let mods = self.store.load_mods()?;
        let url = pending_url(&mods[position(&mods, id)?])?;

        let archive = self.download(&url, &format!("{id}-update.zip")).await?;
        let result = self.apply_downloaded_update(id, &archive).await;
        discard(&archive).await;
        result
    }

    /// Apply every pending update. Returns each mod's id and whether its
    /// update succeeded.
    ///
    /// # Errors
    ///
    /// Returns an error if `mods.json` cannot be read.
    pub async fn update_all(&self) -> Result<Vec<(String, bool)>> {
        let mods = self.store.load_mods()?;
        let pending: Vec<(String, String)> = mods
            .iter()
            .filter_map(|m| pending_url(m).ok().map(|url| (m.id.clone(), url)))
            .collect();

        let semaphore = Semaphore::new(self.concurrency.max(1));
        let downloads = join_all(pending.iter().map(|(id, url)| {
            let semaphore = &semaphore;
            async move {
                let _permit = semaphore.acquire().await;
                self.download(url, &format!("{id}-update.zip")).await
            }
        }))
        .await;

        let mut results = Vec::with_capacity(pending.len());
        for ((id, _), downloaded) in pending.into_iter().zip(downloads) {
            let ok = match downloaded {
                Ok(archive) => {
                    let applied = self.apply_downloaded_update(&id, &archive).await;
                    discard(&archive).await;
                    applied
                        .inspect_err(|e| warn!(id = %id, error = %e, "update failed"))
                        .is_ok()
                }
                Err(e) => {
                    warn!(id = %id, error = %e, "update download failed");
                    false
                }
            };
            results.push((id, ok));
        }
        Ok(results)
    }

    /// Install a catalog mod by its remote id, or refresh an installed one.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::NoFiles`] when the entry has nothing to
    /// download, or an error if the download, extraction or persistence
    /// fails.
    pub async fn install_online(&self, remote_id: u64) -> Result<LocalMod> {
        let entry = self.catalog.fetch_profile(remote_id).await?;
        let file = entry
            .latest_file()
            .ok_or(NetworkError::NoFiles { remote_id })?
            .clone();

        let archive = self
            .download(&file.download_url, &format!("remote-{remote_id}-{}.zip", file.id))
            .await?;
        let installed = self.install_downloaded(&entry, file.id, &archive).await;
        discard(&archive).await;
        installed
    }

    /// One page of the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog request fails.
    pub async fn search_online(&self, page: u32) -> Result<Vec<RemoteCatalogEntry>> {
        Ok(self.catalog.search(page).await?)
    }

    /// Download the latest script loader release into the game binaries.
    ///
    /// Returns the folder it was extracted into.
    ///
    /// # Errors
    ///
    /// Returns [`DeployError::GamePathNotSet`] without a game path, or an
    /// error if the release lookup, download or extraction fails.
    pub async fn install_ue4ss(&self) -> Result<PathBuf> {
        let settings = self.store.load_settings()?;
        let game = settings.game_path().ok_or(DeployError::GamePathNotSet)?;
        let (owner, repo) = self
            .game
            .loader_owner_repo()
            .ok_or_else(|| ConfigError::InvalidValue {
                section: "game".to_string(),
                key: "loader_repo".to_string(),
                message: format!("expected owner/repo, got '{}'", self.game.loader_repo),
            })?;

        let url = self.catalog.fetch_latest_release(owner, repo).await?;
        let binaries = TargetPaths::resolve(game).binaries().to_path_buf();

        let archive = self.download(&url, "ue4ss.zip").await?;
        let extracted = archive::extract_all(&archive, &binaries).await;
        discard(&archive).await;
        let files = extracted?;

        info!(files, dest = %binaries.display(), "script loader installed");
        Ok(binaries)
    }

    async fn download(&self, url: &str, file_name: &str) -> KamiResult<PathBuf> {
        debug!(url, file_name, "queueing download");
        self.downloads
            .start(url, &self.temp_dir, file_name)
            .wait()
            .await
    }

    /// Extract a downloaded update over its mod and redeploy.
    async fn apply_downloaded_update(&self, id: &str, archive: &Path) -> Result<()> {
        let settings = self.store.load_settings()?;
        let game = settings.game_path();
        let mut mods = self.store.load_mods()?;
        let idx = position(&mods, id)?;
        let m = &mut mods[idx];

        if m.is_enabled {
            self.deployer.undeploy_mod(game, m);
        }
        let extracted = archive::extract_all(archive, &m.folder_path).await;
        if extracted.is_ok() {
            if let Some(version) = m.latest_version.clone() {
                m.version = version;
            }
            m.has_update = false;
            m.file_size = folder_size(&m.folder_path);
        }
        if m.is_enabled {
            self.deploy_logged(game, m);
        }
        self.store.save_mods(&mods)?;

        extracted.with_context(|| format!("failed to update mod {id}"))?;
        info!(id, "updated");
        Ok(())
    }

    /// Extract a downloaded catalog archive and upsert its record.
    async fn install_downloaded(
        &self,
        entry: &RemoteCatalogEntry,
        file_id: u64,
        archive: &Path,
    ) -> Result<LocalMod> {
        let settings = self.store.load_settings()?;
        let game = settings.game_path();
        let mut mods = self.store.load_mods()?;
        let folder = self
            .library_dir(&settings)
            .join(folder_name(&entry.name, entry.remote_id)?);

        let existing = mods
            .iter()
            .position(|m| m.game_banana_id == Some(entry.remote_id));
        if let Some(i) = existing
            && mods[i].is_enabled
        {
            self.deployer.undeploy_mod(game, &mut mods[i]);
        }

        if let Err(e) = archive::extract_all(archive, &folder).await {
            self.restore_after_failed_refill(game, &mut mods, existing)?;
            return Err(e.into());
        }

        let idx = if let Some(i) = existing {
            mods[i].apply_remote(entry, Some(file_id));
            i
        } else {
            let id = unique_id(mods.iter().map(|m| m.id.as_str()));
            let priority = priority::next_priority(&mods);
            mods.push(LocalMod::from_remote(
                id,
                entry,
                folder.clone(),
                Some(file_id),
                priority,
            ));
            mods.len() - 1
        };

        let m = &mut mods[idx];
        m.folder_path = folder;
        m.file_size = folder_size(&m.folder_path);
        m.is_enabled = true;
        self.deploy_logged(game, m);
        let installed = m.clone();

        self.store.save_mods(&mods)?;
        info!(id = %installed.id, remote_id = entry.remote_id, "installed {}", installed.name);
        Ok(installed)
    }
}

fn pending_url(m: &LocalMod) -> Result<String> {
    m.latest_file_url
        .clone()
        .filter(|_| m.has_update)
        .ok_or_else(|| LibraryError::NoUpdate(m.id.clone()).into())
}

async fn discard(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await
        && e.kind() != std::io::ErrorKind::NotFound
    {
        warn!(path = %path.display(), error = %e, "failed to remove temp file");
    }
}
