// kamisama-rs: Sparking! ZERO Mod Manager
//
// SPDX-FileCopyrightText: 2026 Kamisama Loader Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::Result;
use bon::Builder;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::warn;

/// Options for directory traversal.
///
/// Defaults see every file: mod archives routinely ship dotfiles and
/// `.gitignore`s that must not hide content from deployment.
#[derive(Debug, Clone, Builder)]
pub struct WalkOptions {
    /// Maximum depth to traverse (None = unlimited)
    #[builder(setters(name = with_max_depth))]
    max_depth: Option<usize>,
    /// Follow symbolic links
    #[builder(setters(name = with_follow_links), default = false)]
    follow_links: bool,
    /// Include hidden files/directories
    #[builder(setters(name = with_include_hidden), default = true)]
    include_hidden: bool,
    /// Respect .gitignore files
    #[builder(setters(name = with_respect_gitignore), default = false)]
    respect_gitignore: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl WalkOptions {
    /// Returns the maximum depth to traverse.
    #[must_use]
    pub const fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Returns whether to follow symbolic links.
    #[must_use]
    pub const fn follow_links(&self) -> bool {
        self.follow_links
    }

    /// Returns whether to include hidden files/directories.
    #[must_use]
    pub const fn include_hidden(&self) -> bool {
        self.include_hidden
    }

    /// Returns whether to respect .gitignore files.
    #[must_use]
    pub const fn respect_gitignore(&self) -> bool {
        self.respect_gitignore
    }
}

/// Builds a `WalkBuilder` with the given options.
fn build_walker(root: &Path, options: &WalkOptions) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);

    if let Some(depth) = options.max_depth() {
        builder.max_depth(Some(depth));
    }

    builder.follow_links(options.follow_links());
    builder.hidden(!options.include_hidden());

    builder.git_ignore(options.respect_gitignore());
    builder.git_global(options.respect_gitignore());
    builder.git_exclude(options.respect_gitignore());
    builder.ignore(options.respect_gitignore());
    builder.parents(options.respect_gitignore());

    builder
}

/// Lists every regular file under `root`, sorted by path.
///
/// Sorting makes classification and deployment order reproducible across
/// platforms. Unreadable entries are logged and skipped.
///
/// # Errors
///
/// Returns an error if `root` does not exist.
///
/// # Example
/// ```no_run
/// use kamisama_rs::utility::fs::walk::{walk_files, WalkOptions};
///
/// let files = walk_files("/mods/MyMod", &WalkOptions::default())?;
/// println!("Found {} files", files.len());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn walk_files<P: AsRef<Path>>(root: P, options: &WalkOptions) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();

    if !root.exists() {
        anyhow::bail!("root directory does not exist: {}", root.display());
    }

    let mut files = Vec::new();
    for entry in build_walker(root, options).build() {
        match entry {
            Ok(entry) if entry.file_type().is_some_and(|ft| ft.is_file()) => {
                files.push(entry.into_path());
            }
            Ok(_) => {}
            Err(e) => warn!(error = %e, root = %root.display(), "walk error"),
        }
    }

    files.sort();
    Ok(files)
}

/// Total size in bytes of every file under `root`.
///
/// Runs on `ignore::WalkParallel`. A missing root yields 0.
#[must_use]
pub fn folder_size<P: AsRef<Path>>(root: P) -> u64 {
    let root = root.as_ref();
    if !root.exists() {
        return 0;
    }

    let total = Arc::new(AtomicU64::new(0));
    build_walker(root, &WalkOptions::default())
        .build_parallel()
        .run(|| {
            let total = Arc::clone(&total);
            Box::new(move |entry| {
                match entry {
                    Ok(entry) if entry.file_type().is_some_and(|ft| ft.is_file()) => {
                        if let Ok(meta) = entry.metadata() {
                            total.fetch_add(meta.len(), Ordering::Relaxed);
                        }
                    }
                    Ok(_) => {}
                    Err(e) => warn!(error = %e, "walk error"),
                }
                ignore::WalkState::Continue
            })
        });

    total.load(Ordering::Relaxed)
}
