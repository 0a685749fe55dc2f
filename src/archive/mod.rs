// kamisama-rs: Sparking! ZERO Mod Manager
//
// SPDX-FileCopyrightText: 2026 Kamisama Loader Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Zip extraction for mod and loader archives.
//!
//! ```text
//! extract_all(archive, dest)          tokio::task::spawn_blocking
//!   for entry in zip:
//!     enclosed_name()? else skip      (no `..`, no absolute paths)
//!     dir  -> mkdir -p
//!     file -> rm old, create, copy    (never writes through a hard link)
//! ```
//!
//! Any error fails the whole call; callers treat the result as
//! all-or-nothing.


use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{ArchiveError, KamiError, KamiResult};

/// Whether `path` has a `.zip` extension.
#[must_use]
pub fn is_zip(path: &Path) -> bool {
    path.extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("zip"))
}

/// Extract every entry of `archive` into `dest`, overwriting existing files.
///
/// Returns the number of files written.
///
/// # Errors
///
/// Returns an [`ArchiveError`] if the archive cannot be opened or read, or
/// an entry cannot be written.
pub async fn extract_all(archive: &Path, dest: &Path) -> KamiResult<usize> {
    let archive = archive.to_path_buf();
    let dest = dest.to_path_buf();
    tokio::task::spawn_blocking(move || extract_blocking(&archive, &dest))
        .await
        .map_err(|e| KamiError::other(format!("extraction task failed: {e}")))?
}

fn extract_blocking(archive: &Path, dest: &Path) -> KamiResult<usize> {
    let file = fs::File::open(archive).map_err(|source| ArchiveError::Open {
        path: archive.display().to_string(),
        source,
    })?;
    let zip_err = |e: zip::result::ZipError| ArchiveError::Zip {
        path: archive.display().to_string(),
        message: e.to_string(),
    };
    let mut zip = zip::ZipArchive::new(file).map_err(zip_err)?;

    fs::create_dir_all(dest).map_err(|source| io_err(dest, source))?;

    let mut written = 0usize;
    for i in 0..zip.len() {
        let mut entry = zip.by_index(i).map_err(zip_err)?;
        let Some(rel) = entry.enclosed_name() else {
            warn!(entry = entry.name(), "skipping archive entry outside destination");
            continue;
        };
        let out_path: PathBuf = dest.join(rel);

        if entry.is_dir() {
            fs::create_dir_all(&out_path).map_err(|source| io_err(&out_path, source))?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent).map_err(|source| io_err(parent, source))?;
        }
        match fs::remove_file(&out_path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => return Err(io_err(&out_path, e).into()),
            _ => {}
        }

        let mut out = fs::File::create(&out_path).map_err(|source| io_err(&out_path, source))?;
        io::copy(&mut entry, &mut out).map_err(|source| io_err(&out_path, source))?;
        written += 1;
    }

    debug!(archive = %archive.display(), dest = %dest.display(), files = written, "extracted");
    Ok(written)
}

fn io_err(path: &Path, source: io::Error) -> ArchiveError {
    ArchiveError::Io {
        path: path.display().to_string(),
        source,
    }
}
