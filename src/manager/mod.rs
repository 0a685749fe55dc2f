// kamisama-rs: Sparking! ZERO Mod Manager
//
// SPDX-FileCopyrightText: 2026 Kamisama Loader Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mod manager facade.
//!
//! ```text
//! ModManager::from_config(config)
//!   store      mods.json / profiles.json / settings.json
//!   deployer   game tree footprints
//!   catalog    CatalogClient (GameBanana + GitHub releases)
//!   downloads  DownloadManager (temp_dir)
//!
//! every operation:  load documents -> mutate -> deploy/undeploy -> save
//!
//! priority change:  undeploy all changed enabled mods
//!                   then deploy them again        (prefix embeds priority)
//! profile load:     undeploy to_disable, then deploy to_enable
//! ```
//!
//! The manager holds no library state between calls, so the JSON documents
//! are the single source of truth.

mod online;


pub use online::{detect_update, folder_name};

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::Context;
use bon::Builder;
use tracing::{info, warn};

use crate::archive;
use crate::config::Config;
use crate::config::types::GameConfig;
use crate::deploy::{DeployReport, Deployer};
use crate::error::{DeployError, LibraryError, NetworkError, Result};
use crate::launch;
use crate::library::priority::{self, Conflict, Direction};
use crate::library::profile::{self, ProfileDiff};
use crate::library::{LibraryStore, LocalMod, Profile, Settings};
use crate::net::{DownloadManager, ProgressDisplay};
use crate::remote::cache::CACHE_FILE;
use crate::remote::{CatalogClient, GameBananaClient, ResponseCache};
use crate::utility::fs::walk::folder_size;

/// Result of enabling or disabling a mod.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToggleOutcome {
    /// Another enabled mod in the same category, when enabling.
    pub conflict: Option<Conflict>,
    /// Deployment summary, when the mod was deployed.
    pub deployed: Option<DeployReport>,
}

/// Summary of [`ModManager::deploy_all`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeployAllReport {
    pub mods: usize,
    pub files: usize,
    pub failed: usize,
}

/// Library operations over the persisted documents.
#[derive(Builder)]
pub struct ModManager {
    #[builder(setters(name = with_store))]
    store: LibraryStore,
    /// Library folder used when `settings.modDownloadPath` is unset.
    #[builder(setters(name = with_library_dir))]
    library_dir: PathBuf,
    #[builder(setters(name = with_temp_dir))]
    temp_dir: PathBuf,
    #[builder(setters(name = with_catalog))]
    catalog: Arc<dyn CatalogClient>,
    #[builder(setters(name = with_downloads), default)]
    downloads: DownloadManager,
    #[builder(setters(name = with_deployer), default)]
    deployer: Deployer,
    #[builder(setters(name = with_concurrency), default = 5)]
    concurrency: usize,
    #[builder(setters(name = with_game), default)]
    game: GameConfig,
    #[builder(setters(name = with_cache))]
    cache: Option<Arc<ResponseCache>>,
}

impl std::fmt::Debug for ModManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModManager")
            .field("data_dir", &self.store.data_dir())
            .field("library_dir", &self.library_dir)
            .field("temp_dir", &self.temp_dir)
            .field("concurrency", &self.concurrency)
            .finish_non_exhaustive()
    }
}

impl ModManager {
    /// Wire up the production collaborators from resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a path is unresolved or the HTTP client cannot be
    /// built.
    pub fn from_config(config: &Config) -> Result<Self> {
        let data_dir = config.paths.data_dir()?;
        let cache = Arc::new(ResponseCache::open(
            data_dir.join(CACHE_FILE),
            Duration::from_secs(config.network.cache_ttl_secs),
        ));
        let catalog =
            GameBananaClient::from_config(&config.network, &config.game, Some(Arc::clone(&cache)))?;
        let http = reqwest::Client::builder()
            .user_agent(config.network.user_agent.as_str())
            .build()
            .map_err(NetworkError::Reqwest)?;

        Ok(Self::builder()
            .with_store(LibraryStore::new(data_dir))
            .with_library_dir(config.paths.library_dir()?.to_path_buf())
            .with_temp_dir(config.paths.temp_dir()?.to_path_buf())
            .with_catalog(Arc::new(catalog))
            .with_downloads(DownloadManager::new(http, ProgressDisplay::Bar))
            .with_concurrency(config.network.concurrency)
            .with_game(config.game.clone())
            .with_cache(cache)
            .build())
    }

    #[must_use]
    pub const fn store(&self) -> &LibraryStore {
        &self.store
    }

    /// Effective library folder: the settings override, else the configured one.
    #[must_use]
    pub fn library_dir(&self, settings: &Settings) -> PathBuf {
        settings
            .mod_download_path()
            .map_or_else(|| self.library_dir.clone(), Path::to_path_buf)
    }

    /// Cancel in-flight downloads and flush the response cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache file cannot be written.
    pub async fn shutdown(&self) -> Result<()> {
        self.downloads.cancel_all();
        self.downloads.shutdown().await;
        if let Some(cache) = &self.cache {
            cache.flush()?;
        }
        Ok(())
    }

    // --- Library ---

    /// # Errors
    ///
    /// Returns an error if `mods.json` cannot be read.
    pub fn list_mods(&self) -> Result<Vec<LocalMod>> {
        let mods = self.store.load_mods()?;
        Ok(priority::sorted_order(&mods)
            .into_iter()
            .map(|i| mods[i].clone())
            .collect())
    }

    /// # Errors
    ///
    /// Returns an error if `settings.json` cannot be read.
    pub fn settings(&self) -> Result<Settings> {
        Ok(self.store.load_settings()?)
    }

    /// # Errors
    ///
    /// Returns an error if `settings.json` cannot be written.
    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        Ok(self.store.save_settings(settings)?)
    }

    /// Install a local archive or file into the library and deploy it.
    ///
    /// A `.zip` is extracted into `<library>/<stem>`; any other file is
    /// copied there. A mod with the same name is updated in place and keeps
    /// its id and priority.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be unpacked or the library
    /// cannot be persisted. A missing game path only skips deployment.
    pub async fn install_mod(&self, source: &Path) -> Result<LocalMod> {
        let name = source
            .file_stem()
            .and_then(OsStr::to_str)
            .filter(|s| !s.trim().is_empty())
            .with_context(|| format!("cannot derive a mod name from {}", source.display()))?
            .to_string();

        let settings = self.store.load_settings()?;
        let game = settings.game_path();
        let mut mods = self.store.load_mods()?;
        let folder = self.library_dir(&settings).join(&name);

        let existing = mods.iter().position(|m| m.name == name);
        if let Some(i) = existing
            && mods[i].is_enabled
        {
            self.deployer.undeploy_mod(game, &mut mods[i]);
        }

        if let Err(e) = fill_folder(source, &folder).await {
            self.restore_after_failed_refill(game, &mut mods, existing)?;
            return Err(e);
        }

        let idx = if let Some(i) = existing {
            i
        } else {
            let id = unique_id(mods.iter().map(|m| m.id.as_str()));
            let priority = priority::next_priority(&mods);
            mods.push(LocalMod::new_local(id, &name, folder.clone(), priority));
            mods.len() - 1
        };

        let m = &mut mods[idx];
        m.folder_path = folder;
        m.file_size = folder_size(&m.folder_path);
        m.is_enabled = true;
        self.deploy_logged(game, m);
        let installed = m.clone();

        self.store.save_mods(&mods)?;
        info!(id = %installed.id, priority = installed.priority, "installed {}", installed.name);
        Ok(installed)
    }

    /// Remove a mod from the game tree, the library and every profile.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::ModNotFound`] for an unknown id, or an error if
    /// the documents or the storage folder cannot be updated.
    pub fn uninstall_mod(&self, id: &str) -> Result<LocalMod> {
        let settings = self.store.load_settings()?;
        let mut mods = self.store.load_mods()?;
        let idx = position(&mods, id)?;

        let mut removed = mods.remove(idx);
        self.deployer.undeploy_mod(settings.game_path(), &mut removed);
        self.store.save_mods(&mods)?;

        match std::fs::remove_dir_all(&removed.folder_path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("failed to remove {}", removed.folder_path.display())
                });
            }
        }

        let mut profiles = self.store.load_profiles()?;
        let mut touched = false;
        for p in &mut profiles {
            touched |= p.set_member(id, false);
        }
        if touched {
            self.store.save_profiles(&profiles)?;
        }

        info!(id, "uninstalled {}", removed.name);
        Ok(removed)
    }

    // --- Enable, priority, deployment ---

    /// Enable or disable a mod, deploying or undeploying it.
    ///
    /// A category conflict never blocks enabling; it is logged and returned.
    /// The active profile follows the new state.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::ModNotFound`] for an unknown id, or an error if
    /// the documents cannot be read or written.
    pub fn toggle_mod(&self, id: &str, enabled: bool) -> Result<ToggleOutcome> {
        let settings = self.store.load_settings()?;
        let game = settings.game_path();
        let mut mods = self.store.load_mods()?;
        let idx = position(&mods, id)?;

        let mut outcome = ToggleOutcome::default();
        if enabled {
            outcome.conflict = priority::find_conflict(&mods, id);
            if let Some(conflict) = &outcome.conflict {
                warn!(id, other = %conflict.mod_id, "{conflict}");
            }
        }

        let m = &mut mods[idx];
        m.is_enabled = enabled;
        if enabled {
            outcome.deployed = self.deploy_logged(game, m);
        } else {
            self.deployer.undeploy_mod(game, m);
        }
        self.store.save_mods(&mods)?;

        if let Some(active) = settings.active_profile_id.as_deref() {
            let mut profiles = self.store.load_profiles()?;
            if let Some(p) = profiles.iter_mut().find(|p| p.id == active)
                && p.set_member(id, enabled)
            {
                self.store.save_profiles(&profiles)?;
            }
        }

        Ok(outcome)
    }

    /// Move a mod one step up or down the load order.
    ///
    /// Returns `false`, changing nothing, when the mod is already at that
    /// edge.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::ModNotFound`] for an unknown id, or an error if
    /// the documents cannot be read or written.
    pub fn set_mod_priority(&self, id: &str, direction: Direction) -> Result<bool> {
        let settings = self.store.load_settings()?;
        let mut mods = self.store.load_mods()?;
        position(&mods, id)?;

        let Some(changes) = priority::move_mod(&mut mods, id, direction) else {
            return Ok(false);
        };

        let changed: Vec<usize> = mods
            .iter()
            .enumerate()
            .filter(|(_, m)| m.is_enabled && changes.iter().any(|c| c.id == m.id))
            .map(|(i, _)| i)
            .collect();
        self.redeploy(settings.game_path(), &mut mods, &changed);

        self.store.save_mods(&mods)?;
        Ok(true)
    }

    /// Renumber the library to `1..=N`, redeploying enabled mods when
    /// anything moved. Returns how many priorities changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the documents cannot be read or written.
    pub fn fix_priorities(&self) -> Result<usize> {
        let settings = self.store.load_settings()?;
        let mut mods = self.store.load_mods()?;

        let changes = priority::normalize(&mut mods);
        if changes.is_empty() {
            return Ok(0);
        }

        let enabled = enabled_indices(&mods);
        self.redeploy(settings.game_path(), &mut mods, &enabled);
        self.store.save_mods(&mods)?;
        info!(changed = changes.len(), "priorities normalized");
        Ok(changes.len())
    }

    /// Undeploy and deploy every enabled mod again.
    ///
    /// # Errors
    ///
    /// Returns [`DeployError::GamePathNotSet`] when no game path is
    /// configured, or an error if the documents cannot be read or written.
    pub fn deploy_all(&self) -> Result<DeployAllReport> {
        let settings = self.store.load_settings()?;
        let game = settings.game_path().ok_or(DeployError::GamePathNotSet)?;
        let mut mods = self.store.load_mods()?;

        let enabled = enabled_indices(&mods);
        for &i in &enabled {
            self.deployer.undeploy_mod(Some(game), &mut mods[i]);
        }

        let mut report = DeployAllReport::default();
        for &i in &enabled {
            if let Some(r) = self.deploy_logged(Some(game), &mut mods[i]) {
                report.mods += 1;
                report.files += r.deployed;
                report.failed += r.failed;
            }
        }

        self.store.save_mods(&mods)?;
        Ok(report)
    }

    // --- Profiles ---

    /// # Errors
    ///
    /// Returns an error if `profiles.json` cannot be read.
    pub fn list_profiles(&self) -> Result<Vec<Profile>> {
        Ok(self.store.load_profiles()?)
    }

    /// Save the currently enabled mods as a new profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the documents cannot be read or written.
    pub fn create_profile(&self, name: &str) -> Result<Profile> {
        let mods = self.store.load_mods()?;
        let mut profiles = self.store.load_profiles()?;

        let id = unique_id(profiles.iter().map(|p| p.id.as_str()));
        let created = profile::snapshot(id, name, &mods);
        profiles.push(created.clone());
        self.store.save_profiles(&profiles)?;
        Ok(created)
    }

    /// Delete a profile, clearing it as the active one if needed.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::ProfileNotFound`] for an unknown id, or an
    /// error if the documents cannot be read or written.
    pub fn delete_profile(&self, id: &str) -> Result<()> {
        let mut profiles = self.store.load_profiles()?;
        let before = profiles.len();
        profiles.retain(|p| p.id != id);
        if profiles.len() == before {
            return Err(LibraryError::ProfileNotFound(id.to_string()).into());
        }
        self.store.save_profiles(&profiles)?;

        let mut settings = self.store.load_settings()?;
        if settings.active_profile_id.as_deref() == Some(id) {
            settings.active_profile_id = None;
            self.store.save_settings(&settings)?;
        }
        Ok(())
    }

    /// Switch the library to a profile and mark it active.
    ///
    /// Every mod leaving the set is undeployed before any mod joining it is
    /// deployed.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::ProfileNotFound`] for an unknown id, or an
    /// error if the documents cannot be read or written.
    pub fn load_profile(&self, id: &str) -> Result<ProfileDiff> {
        let mut settings = self.store.load_settings()?;
        let game = settings.game_path();
        let mut mods = self.store.load_mods()?;
        let profiles = self.store.load_profiles()?;
        let target = profiles
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| LibraryError::ProfileNotFound(id.to_string()))?;

        let diff = profile::diff(&mods, target);
        for m in mods.iter_mut().filter(|m| diff.to_disable.contains(&m.id)) {
            self.deployer.undeploy_mod(game, m);
            m.is_enabled = false;
        }
        for m in mods.iter_mut().filter(|m| diff.to_enable.contains(&m.id)) {
            self.deploy_logged(game, m);
            m.is_enabled = true;
        }
        self.store.save_mods(&mods)?;

        settings.active_profile_id = Some(id.to_string());
        self.store.save_settings(&settings)?;
        info!(
            profile = %target.name,
            disabled = diff.to_disable.len(),
            enabled = diff.to_enable.len(),
            "profile loaded"
        );
        Ok(diff)
    }

    // --- Game ---

    /// Start the game with the configured launch arguments.
    ///
    /// Returns the process id when the platform reports one.
    ///
    /// # Errors
    ///
    /// Returns [`DeployError::GamePathNotSet`] without a game path, or a
    /// process error if no executable is found or it cannot be spawned.
    pub fn launch_game(&self) -> Result<Option<u32>> {
        let settings = self.store.load_settings()?;
        let game = settings.game_path().ok_or(DeployError::GamePathNotSet)?;
        let exe = launch::resolve_executable(game)?;
        let args = launch::launch_args(&settings.launch_args());
        Ok(launch::launch(&exe, &args)?)
    }

    // --- Helpers ---

    /// Deploy `m`, logging instead of failing when deployment is impossible.
    fn deploy_logged(&self, game: Option<&Path>, m: &mut LocalMod) -> Option<DeployReport> {
        match self.deployer.deploy_mod(game, m) {
            Ok(report) => Some(report),
            Err(e) => {
                warn!(mod_name = %m.name, error = %e, "deploy skipped");
                None
            }
        }
    }

    /// Put a reinstalled mod back into the game tree from its current folder
    /// when new content could not be unpacked, so an enabled record keeps
    /// matching what is deployed.
    fn restore_after_failed_refill(
        &self,
        game: Option<&Path>,
        mods: &mut [LocalMod],
        existing: Option<usize>,
    ) -> Result<()> {
        let Some(i) = existing.filter(|&i| mods[i].is_enabled) else {
            return Ok(());
        };
        warn!(mod_name = %mods[i].name, "new content not unpacked, redeploying current files");
        self.deploy_logged(game, &mut mods[i]);
        self.store.save_mods(mods)?;
        Ok(())
    }

    /// Undeploy every listed mod, then deploy them all again.
    fn redeploy(&self, game: Option<&Path>, mods: &mut [LocalMod], indices: &[usize]) {
        if game.is_none() {
            if !indices.is_empty() {
                warn!(count = indices.len(), "game path not set, redeploy skipped");
            }
            return;
        }
        for &i in indices {
            self.deployer.undeploy_mod(game, &mut mods[i]);
        }
        for &i in indices {
            self.deploy_logged(game, &mut mods[i]);
        }
    }
}

fn position(mods: &[LocalMod], id: &str) -> Result<usize> {
    mods.iter()
        .position(|m| m.id == id)
        .ok_or_else(|| LibraryError::ModNotFound(id.to_string()).into())
}

fn enabled_indices(mods: &[LocalMod]) -> Vec<usize> {
    mods.iter()
        .enumerate()
        .filter(|(_, m)| m.is_enabled)
        .map(|(i, _)| i)
        .collect()
}

/// Millisecond timestamp, bumped until it collides with none of `taken`.
fn unique_id<'a>(taken: impl Iterator<Item = &'a str>) -> String {
    let taken: Vec<&str> = taken.collect();
    let mut candidate = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX));
    loop {
        let id = candidate.to_string();
        if !taken.contains(&id.as_str()) {
            return id;
        }
        candidate = candidate.wrapping_add(1);
    }
}

/// Unpack or copy `source` into `folder`.
async fn fill_folder(source: &Path, folder: &Path) -> Result<()> {
    if archive::is_zip(source) {
        archive::extract_all(source, folder).await?;
        return Ok(());
    }

    let file_name = source
        .file_name()
        .with_context(|| format!("not a file: {}", source.display()))?;
    tokio::fs::create_dir_all(folder)
        .await
        .with_context(|| format!("failed to create {}", folder.display()))?;
    tokio::fs::copy(source, folder.join(file_name))
        .await
        .with_context(|| format!("failed to copy {}", source.display()))?;
    Ok(())
}
