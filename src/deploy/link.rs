// kamisama-rs: Sparking! ZERO Mod Manager
//
// SPDX-FileCopyrightText: 2026 Kamisama Loader Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Non-destructive single-file placement.
//!
//! ```text
//! place(src, dest)
//!   mkdir -p dest.parent
//!   rm dest            (NotFound ignored)
//!   hard_link(src, dest)
//!     ok                          --> HardLinked
//!     cross-device / permission   --> copy --> Copied
//!     other                       --> Err
//! ```
//!
//! The source is only ever read.

use std::io;
use std::path::Path;

use tracing::{debug, warn};

/// Signature of the link primitive, swappable for tests.
pub type LinkFn = fn(&Path, &Path) -> io::Result<()>;

/// How a file ended up at its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    HardLinked,
    Copied,
}

/// Places files using a hard link with a byte-copy fallback.
#[derive(Debug, Clone, Copy)]
pub struct FileDeployer {
    link: LinkFn,
}

impl Default for FileDeployer {
    fn default() -> Self {
        Self { link: hard_link }
    }
}

impl FileDeployer {
    /// Use a custom link primitive instead of `std::fs::hard_link`.
    #[must_use]
    pub const fn with_link_fn(link: LinkFn) -> Self {
        Self { link }
    }

    /// Place `src` at `dest`, reporting success as a boolean.
    ///
    /// Failures are logged and never propagated.
    pub fn deploy(&self, src: &Path, dest: &Path) -> bool {
        match self.place(src, dest) {
            Ok(placement) => {
                debug!(src = %src.display(), dest = %dest.display(), ?placement, "deployed file");
                true
            }
            Err(e) => {
                warn!(src = %src.display(), dest = %dest.display(), error = %e, "failed to deploy file");
                false
            }
        }
    }

    /// Place `src` at `dest` and report how.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the parent directory cannot be created, the
    /// link fails for a reason other than a device or permission boundary,
    /// or the fallback copy fails.
    pub fn place(&self, src: &Path, dest: &Path) -> io::Result<Placement> {
        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        remove_if_present(dest)?;

        match (self.link)(src, dest) {
            Ok(()) => Ok(Placement::HardLinked),
            Err(e) if should_copy_instead(&e) => {
                debug!(error = %e, "hard link unavailable, copying");
                std::fs::copy(src, dest)?;
                Ok(Placement::Copied)
            }
            Err(e) => Err(e),
        }
    }
}

fn hard_link(src: &Path, dest: &Path) -> io::Result<()> {
    std::fs::hard_link(src, dest)
}

/// Remove `path`, treating "not found" as success.
///
/// # Errors
///
/// Returns any other I/O error from the removal.
pub fn remove_if_present(path: &Path) -> io::Result<()> {
    match std::fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

/// Link errors that a plain copy can work around.
fn should_copy_instead(err: &io::Error) -> bool {
    if matches!(
        err.kind(),
        io::ErrorKind::CrossesDevices | io::ErrorKind::PermissionDenied | io::ErrorKind::Unsupported
    ) {
        return true;
    }
    // EXDEV on unix, ERROR_NOT_SAME_DEVICE on windows
    let cross_device = if cfg!(windows) { 17 } else { 18 };
    err.raw_os_error() == Some(cross_device)
}

#[cfg(test)]
pub(crate) fn cross_device_link(_src: &Path, _dest: &Path) -> io::Result<()> {
    Err(io::Error::from(io::ErrorKind::CrossesDevices))
}

#[cfg(test)]
pub(crate) fn broken_link(_src: &Path, _dest: &Path) -> io::Result<()> {
    Err(io::Error::other("link table corrupted"))
}
