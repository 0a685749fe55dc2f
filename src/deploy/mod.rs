// kamisama-rs: Sparking! ZERO Mod Manager
//
// SPDX-FileCopyrightText: 2026 Kamisama Loader Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Deployment of library mods into the game tree.
//!
//! ```text
//! deploy_mod(game_path, mod)
//!   TargetPaths::resolve   (pure)
//!   mkdir paks root        (structural: abort on failure)
//!   classify_mod           (walk + bucket)
//!   FileDeployer::deploy   per file, failures logged + skipped
//!   LoaderRegistry         name : 1
//!   mod.deployed_files  =  what actually landed
//!
//! undeploy_mod(game_path?, mod)
//!   LoaderRegistry         name : 0   (best effort)
//!   rm mod.deployed_files  (NotFound ignored)
//! ```
//!
//! Only paths recorded on the mod are ever removed from the game tree,
//! and nothing under the mod's own folder is modified.

pub mod classify;
pub mod link;
pub mod registry;
pub mod targets;


use std::path::{Path, PathBuf};

use tracing::{info, info_span, warn};

use crate::error::DeployError;
use crate::library::LocalMod;

use classify::classify_mod;
use link::{FileDeployer, remove_if_present};
use registry::LoaderRegistry;
use targets::TargetPaths;

/// Outcome of a successful `deploy_mod`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployReport {
    /// Files placed in the game tree.
    pub deployed: usize,
    /// Files that could not be placed and were skipped.
    pub failed: usize,
}

/// Outcome of `undeploy_mod`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UndeployReport {
    pub removed: usize,
    pub failed: usize,
}

/// Materializes and removes mod footprints in the game tree.
#[derive(Debug, Default)]
pub struct Deployer {
    files: FileDeployer,
    registry: LoaderRegistry,
}

impl Deployer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific file placement strategy.
    #[must_use]
    pub fn with_file_deployer(files: FileDeployer) -> Self {
        Self {
            files,
            registry: LoaderRegistry::new(),
        }
    }

    /// Deploy every file of `m` into the game tree.
    ///
    /// Replaces `m.deployed_files` with the destinations that were actually
    /// placed. Callers changing a mod's priority undeploy it first so the
    /// old prefixed names do not linger.
    ///
    /// # Errors
    ///
    /// Returns a [`DeployError`] when no game path is configured or the pak
    /// root cannot be created. Per-file failures are logged and counted in
    /// the report instead.
    pub fn deploy_mod(
        &self,
        game_path: Option<&Path>,
        m: &mut LocalMod,
    ) -> Result<DeployReport, DeployError> {
        let _span = info_span!("deploy", mod_name = %m.name).entered();

        let game_path = game_path.ok_or(DeployError::GamePathNotSet)?;
        let targets = TargetPaths::resolve(game_path);

        std::fs::create_dir_all(targets.paks()).map_err(|source| DeployError::RootCreation {
            path: targets.paks().display().to_string(),
            source,
        })?;

        let classification = match classify_mod(&m.folder_path, m.priority, &targets) {
            Ok(c) => c,
            Err(e) => {
                warn!(folder = %m.folder_path.display(), error = %e, "mod folder unreadable");
                classify::Classification::default()
            }
        };

        let mut report = DeployReport::default();
        let mut placed: Vec<PathBuf> = Vec::with_capacity(classification.mappings.len());
        for mapping in &classification.mappings {
            if self.files.deploy(&mapping.src, &mapping.dest) {
                placed.push(mapping.dest.clone());
                report.deployed += 1;
            } else {
                report.failed += 1;
            }
        }

        if let Some(name) = classification.loader_registry_name {
            let registry = targets.registry_file();
            if let Err(source) = self.registry.set_entry(&registry, &name, true) {
                let e = DeployError::Registry {
                    path: registry.display().to_string(),
                    source,
                };
                warn!(error = %e, "loader entry not enabled");
            }
            m.loader_registry_name = Some(name);
        }

        m.deployed_files = placed;
        info!(
            deployed = report.deployed,
            failed = report.failed,
            "deployed {}",
            m.name
        );
        Ok(report)
    }

    /// Remove every recorded destination of `m` from the game tree.
    ///
    /// Works without a game path: recorded files are still removed, only
    /// the registry entry is left untouched.
    pub fn undeploy_mod(&self, game_path: Option<&Path>, m: &mut LocalMod) -> UndeployReport {
        let _span = info_span!("undeploy", mod_name = %m.name).entered();

        if let Some(name) = &m.loader_registry_name {
            match game_path {
                Some(game_path) => {
                    let registry = TargetPaths::resolve(game_path).registry_file();
                    if let Err(e) = self.registry.set_entry(&registry, name, false) {
                        warn!(registry = %registry.display(), error = %e, "failed to disable loader entry");
                    }
                }
                None => warn!(name = %name, "game path not set, loader entry left enabled"),
            }
        }

        let mut report = UndeployReport::default();
        for path in m.deployed_files.drain(..) {
            match remove_if_present(&path) {
                Ok(()) => report.removed += 1,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to remove deployed file");
                    report.failed += 1;
                }
            }
        }

        info!(removed = report.removed, "undeployed {}", m.name);
        report
    }
}
