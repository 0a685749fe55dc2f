// kamisama-rs: Sparking! ZERO Mod Manager
//
// SPDX-FileCopyrightText: 2026 Kamisama Loader Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Game executable lookup and detached launch.
//!
//! ```text
//! game_path = *.exe                          -> as is
//! <root>/SparkingZERO.exe exists             -> that
//! <root>/SparkingZERO/Binaries/Win64/
//!        SparkingZERO-Win64-Shipping.exe     -> that
//!
//! argv = -fileopenlog <launchArgs split on whitespace>
//! cwd  = executable's directory
//! ```

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::deploy::targets::TargetPaths;
use crate::error::{KamiResult, ProcessError};

/// Always passed first so the game logs file opens.
pub const LAUNCH_FLAG: &str = "-fileopenlog";

const LAUNCHER_EXE: &str = "SparkingZERO.exe";
const SHIPPING_EXE: &str = "SparkingZERO/Binaries/Win64/SparkingZERO-Win64-Shipping.exe";

/// Find the executable to start for `game_path`.
///
/// # Errors
///
/// Returns [`ProcessError::ExecutableNotFound`] when no candidate exists.
pub fn resolve_executable(game_path: &Path) -> KamiResult<PathBuf> {
    if game_path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("exe"))
    {
        return Ok(game_path.to_path_buf());
    }

    let root = TargetPaths::resolve(game_path).install_root().to_path_buf();
    let launcher = root.join(LAUNCHER_EXE);
    if launcher.is_file() {
        return Ok(launcher);
    }

    let shipping = root.join(SHIPPING_EXE);
    if shipping.is_file() {
        return Ok(shipping);
    }

    Err(ProcessError::ExecutableNotFound {
        path: shipping.display().to_string(),
    }
    .into())
}

/// Full argument list: the fixed flag followed by the user's extras.
#[must_use]
pub fn launch_args(extra: &[String]) -> Vec<String> {
    std::iter::once(LAUNCH_FLAG.to_string())
        .chain(extra.iter().cloned())
        .collect()
}

/// Start `exe` detached and return its process id when the OS reports one.
///
/// The exit status is logged from a background task. Must be called from
/// within a tokio runtime.
///
/// # Errors
///
/// Returns [`ProcessError::SpawnFailed`] if the process cannot be started.
pub fn launch(exe: &Path, args: &[String]) -> KamiResult<Option<u32>> {
    let mut command = Command::new(exe);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    if let Some(dir) = exe.parent().filter(|d| !d.as_os_str().is_empty()) {
        command.current_dir(dir);
    }

    debug!(exe = %exe.display(), ?args, "spawning game");
    let mut child = command.spawn().map_err(|source| ProcessError::SpawnFailed {
        command: exe.display().to_string(),
        source,
    })?;
    let pid = child.id();
    info!(pid, "game launched");

    tokio::spawn(async move {
        match child.wait().await {
            Ok(status) => debug!(%status, "game exited"),
            Err(e) => warn!(error = %e, "lost track of game process"),
        }
    });

    Ok(pid)
}
