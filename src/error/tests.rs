// kamisama-rs: Sparking! ZERO Mod Manager
//
// SPDX-FileCopyrightText: 2026 Kamisama Loader Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;

use super::{DeployError, FsError, KamiError, KamiResult, LibraryError, NetworkError};

#[test]
fn test_deploy_error_display() {
    let err = KamiError::from(DeployError::GamePathNotSet);
    insta::assert_snapshot!(err.to_string(), @"deploy error: game path is not set");
}

#[test]
fn test_library_error_display() {
    let err = LibraryError::ModNotFound("1700000000000".to_string());
    insta::assert_snapshot!(err.to_string(), @"mod '1700000000000' not found");
}

#[test]
fn test_no_files_message() {
    let err = NetworkError::NoFiles { remote_id: 42 };
    assert!(err.to_string().starts_with("No download files found"));
}

#[test]
fn test_fs_error_from_io_classifies_kind() {
    let path = Path::new("/missing/file.pak");
    let not_found = FsError::from_io(path, std::io::Error::from(std::io::ErrorKind::NotFound));
    assert!(matches!(not_found, FsError::NotFound(_)));

    let denied = FsError::from_io(
        path,
        std::io::Error::from(std::io::ErrorKind::PermissionDenied),
    );
    assert!(matches!(denied, FsError::PermissionDenied(_)));

    let other = FsError::from_io(path, std::io::Error::other("boom"));
    assert!(matches!(other, FsError::IoError { .. }));
}

#[test]
fn test_kami_error_size() {
    // Box<str> variants are 16 bytes (ptr + len); discriminant + alignment = 24
    let size = std::mem::size_of::<KamiError>();
    assert!(size <= 24, "KamiError is {size} bytes, expected <= 24");
}

#[test]
fn test_kami_result_size() {
    let size = std::mem::size_of::<KamiResult<()>>();
    assert!(size <= 24, "KamiResult<()> is {size} bytes, expected <= 24");
}
