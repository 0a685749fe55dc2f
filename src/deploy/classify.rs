// kamisama-rs: Sparking! ZERO Mod Manager
//
// SPDX-FileCopyrightText: 2026 Kamisama Loader Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Buckets a mod's files into game-side destinations.
//!
//! ```text
//! rel path                      first match wins
//! .../ue4ss/<rest>          --> binaries/<rest>      (Mods/<name>/.. => registry name)
//! .../LogicMods/<rest>      --> logic_mods/<rest>
//! .../Movies/<rest>         --> movies/<rest>
//! *.pak|*.sig|*.utoc|*.ucas --> paks/NNN_<file name>
//! anything else             --> skipped
//! ```
//!
//! Folder markers match case-insensitively at any depth, so archives that
//! wrap everything in a top-level folder still classify correctly.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::utility::fs::walk::{WalkOptions, walk_files};

use super::targets::TargetPaths;

/// Extensions loaded from the generic pak folder.
pub const PAK_EXTENSIONS: &[&str] = &["pak", "sig", "utoc", "ucas"];

const LOADER_DIR: &str = "ue4ss";
const LOGIC_DIR: &str = "LogicMods";
const MOVIES_DIR: &str = "Movies";

/// Destination category of a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Script loader content under `Binaries/Win64`.
    Loader,
    /// Logic pak, no priority prefix.
    Logic,
    /// Movie override, no priority prefix.
    Movie,
    /// Generic pak, priority-prefixed file name.
    Pak,
}

/// One file to materialize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMapping {
    pub src: PathBuf,
    pub dest: PathBuf,
    pub category: Category,
}

/// Result of classifying one mod folder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub mappings: Vec<FileMapping>,
    /// Sub-mod name found under `ue4ss/Mods/<name>/`, first occurrence.
    pub loader_registry_name: Option<String>,
}

/// File name prefix encoding load order.
#[must_use]
pub fn priority_prefix(priority: u32) -> String {
    format!("{priority:03}_")
}

/// Walk `mod_root` and classify every file.
///
/// # Errors
///
/// Returns an error if `mod_root` does not exist.
pub fn classify_mod(mod_root: &Path, priority: u32, targets: &TargetPaths) -> Result<Classification> {
    let files = walk_files(mod_root, &WalkOptions::default())?;
    Ok(classify_files(mod_root, &files, priority, targets))
}

/// Classify an explicit file list. Files outside `mod_root` are skipped.
#[must_use]
pub fn classify_files(
    mod_root: &Path,
    files: &[PathBuf],
    priority: u32,
    targets: &TargetPaths,
) -> Classification {
    let mut result = Classification::default();

    for src in files {
        let Ok(rel) = src.strip_prefix(mod_root) else {
            continue;
        };
        let parts: Vec<&str> = rel.iter().filter_map(|p| p.to_str()).collect();

        if let Some(rest) = after_marker(&parts, LOADER_DIR) {
            if result.loader_registry_name.is_none()
                && rest.len() > 2
                && rest[0].eq_ignore_ascii_case("Mods")
            {
                result.loader_registry_name = Some(rest[1].to_string());
            }
            result.mappings.push(FileMapping {
                src: src.clone(),
                dest: join_all(targets.binaries(), rest),
                category: Category::Loader,
            });
        } else if let Some(rest) = after_marker(&parts, LOGIC_DIR) {
            result.mappings.push(FileMapping {
                src: src.clone(),
                dest: join_all(targets.logic_mods(), rest),
                category: Category::Logic,
            });
        } else if let Some(rest) = after_marker(&parts, MOVIES_DIR) {
            result.mappings.push(FileMapping {
                src: src.clone(),
                dest: join_all(targets.movies(), rest),
                category: Category::Movie,
            });
        } else if is_pak_family(src)
            && let Some(name) = src.file_name().and_then(|n| n.to_str())
        {
            result.mappings.push(FileMapping {
                src: src.clone(),
                dest: targets
                    .paks()
                    .join(format!("{}{name}", priority_prefix(priority))),
                category: Category::Pak,
            });
        }
    }

    result
}

/// Components following the first directory named `marker`.
///
/// The marker must be a directory, so at least one component follows it.
fn after_marker<'a>(parts: &'a [&'a str], marker: &str) -> Option<&'a [&'a str]> {
    let dirs = parts.len().checked_sub(1)?;
    let idx = parts[..dirs]
        .iter()
        .position(|p| p.eq_ignore_ascii_case(marker))?;
    Some(&parts[idx + 1..])
}

fn join_all(base: &Path, parts: &[&str]) -> PathBuf {
    parts.iter().fold(base.to_path_buf(), |acc, p| acc.join(p))
}

fn is_pak_family(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| PAK_EXTENSIONS.iter().any(|p| ext.eq_ignore_ascii_case(p)))
}
