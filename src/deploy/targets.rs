// kamisama-rs: Sparking! ZERO Mod Manager
//
// SPDX-FileCopyrightText: 2026 Kamisama Loader Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Game-side target directories.
//!
//! ```text
//! <root>/SparkingZERO/
//!   Content/Paks/~mods/       generic paks (priority-prefixed)
//!   Content/Paks/LogicMods/   logic paks
//!   Content/Movies/           movie overrides
//!   Binaries/Win64/           script loader (UE4SS)
//!     Mods/mods.txt           loader registry
//! ```
//!
//! Pure path arithmetic: nothing here touches the filesystem.

use std::path::{Component, Path, PathBuf};

/// Project directory under the install root.
pub const PROJECT_DIR: &str = "SparkingZERO";

/// Registry file name inside `Binaries/Win64/Mods`.
pub const REGISTRY_FILE: &str = "mods.txt";

/// Absolute target roots derived from a game path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetPaths {
    install_root: PathBuf,
    paks: PathBuf,
    logic_mods: PathBuf,
    movies: PathBuf,
    binaries: PathBuf,
}

impl TargetPaths {
    /// Derive every target root from a user-supplied game path.
    ///
    /// The path may name the game executable, the install root, or the
    /// `Binaries/Win64` directory (or an executable inside it).
    #[must_use]
    pub fn resolve(game_path: &Path) -> Self {
        Self::from_install_root(install_root(game_path))
    }

    /// Build targets from an already known install root.
    #[must_use]
    pub fn from_install_root(root: PathBuf) -> Self {
        let project = root.join(PROJECT_DIR);
        let paks_parent = project.join("Content").join("Paks");
        Self {
            paks: paks_parent.join("~mods"),
            logic_mods: paks_parent.join("LogicMods"),
            movies: project.join("Content").join("Movies"),
            binaries: project.join("Binaries").join("Win64"),
            install_root: root,
        }
    }

    #[must_use]
    pub fn install_root(&self) -> &Path {
        &self.install_root
    }

    /// Generic pak folder (`~mods`).
    #[must_use]
    pub fn paks(&self) -> &Path {
        &self.paks
    }

    #[must_use]
    pub fn logic_mods(&self) -> &Path {
        &self.logic_mods
    }

    #[must_use]
    pub fn movies(&self) -> &Path {
        &self.movies
    }

    /// Script loader binaries folder (`Binaries/Win64`).
    #[must_use]
    pub fn binaries(&self) -> &Path {
        &self.binaries
    }

    /// Location of the loader registry file.
    #[must_use]
    pub fn registry_file(&self) -> PathBuf {
        self.binaries.join("Mods").join(REGISTRY_FILE)
    }
}

/// Whether `path` looks like a file rather than a directory.
///
/// Decided from the extension alone so resolution stays I/O free; game
/// install directories never carry one.
fn looks_like_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| !ext.is_empty())
}

/// Walk a game path up to the install root.
fn install_root(game_path: &Path) -> PathBuf {
    let dir = if looks_like_file(game_path) {
        game_path.parent().unwrap_or(game_path)
    } else {
        game_path
    };

    let names: Vec<&str> = dir
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => name.to_str(),
            _ => None,
        })
        .collect();

    let in_binaries = names.len() >= 2
        && names[names.len() - 2].eq_ignore_ascii_case("Binaries")
        && names[names.len() - 1].eq_ignore_ascii_case("Win64");

    if in_binaries {
        // Win64 -> Binaries -> SparkingZERO -> install root
        if let Some(root) = dir.ancestors().nth(3) {
            return root.to_path_buf();
        }
    }

    dir.to_path_buf()
}
