// kamisama-rs: Sparking! ZERO Mod Manager
//
// SPDX-FileCopyrightText: 2026 Kamisama Loader Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;

use super::{launch, launch_args, resolve_executable};
use crate::error::{KamiError, ProcessError};

fn touch(path: &Path) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, "").unwrap();
}

#[test]
fn test_resolve_exe_path_used_directly() {
    let exe = Path::new("/games/DBSZ/Custom.EXE");
    assert_eq!(resolve_executable(exe).unwrap(), exe);
}

#[test]
fn test_resolve_prefers_root_launcher() {
    let temp = tempfile::tempdir().unwrap();
    touch(&temp.path().join("SparkingZERO.exe"));
    touch(
        &temp
            .path()
            .join("SparkingZERO/Binaries/Win64/SparkingZERO-Win64-Shipping.exe"),
    );

    let exe = resolve_executable(temp.path()).unwrap();
    assert_eq!(exe, temp.path().join("SparkingZERO.exe"));
}

#[test]
fn test_resolve_falls_back_to_shipping_from_win64_dir() {
    let temp = tempfile::tempdir().unwrap();
    let shipping = temp
        .path()
        .join("SparkingZERO/Binaries/Win64/SparkingZERO-Win64-Shipping.exe");
    touch(&shipping);

    let exe = resolve_executable(&temp.path().join("SparkingZERO/Binaries/Win64")).unwrap();
    assert_eq!(exe, shipping);
}

#[test]
fn test_resolve_nothing_found() {
    let temp = tempfile::tempdir().unwrap();
    let err = resolve_executable(temp.path()).unwrap_err();
    match err {
        KamiError::Process(boxed) => {
            assert!(matches!(*boxed, ProcessError::ExecutableNotFound { .. }));
        }
        other => panic!("expected process error, got {other:?}"),
    }
}

#[test]
fn test_launch_args_order() {
    let args = launch_args(&["-dx11".to_string(), "-windowed".to_string()]);
    assert_eq!(args, vec!["-fileopenlog", "-dx11", "-windowed"]);
    assert_eq!(launch_args(&[]), vec!["-fileopenlog"]);
}

#[tokio::test]
async fn test_launch_missing_binary_reports_spawn_failure() {
    let temp = tempfile::tempdir().unwrap();
    let err = launch(&temp.path().join("missing.exe"), &[]).unwrap_err();
    assert!(err.to_string().contains("failed to spawn process"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_launch_detached_process() {
    let pid = launch(Path::new("/bin/sh"), &["-c".to_string(), "exit 0".to_string()]).unwrap();
    assert!(pid.is_some());
}
