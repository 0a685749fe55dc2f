// kamisama-rs: Sparking! ZERO Mod Manager
//
// SPDX-FileCopyrightText: 2026 Kamisama Loader Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::walk::{WalkOptions, folder_size, walk_files};
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn relative_names(root: &std::path::Path, files: &[std::path::PathBuf]) -> Vec<String> {
    files
        .iter()
        .map(|p| {
            p.strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect()
}

#[test]
fn test_walk_files_sorted_and_recursive() {
    let temp = temp_dir();
    std::fs::create_dir_all(temp.path().join("b/nested")).unwrap();
    std::fs::write(temp.path().join("z.pak"), "").unwrap();
    std::fs::write(temp.path().join("b/nested/a.pak"), "").unwrap();
    std::fs::write(temp.path().join("a.txt"), "").unwrap();

    let files = walk_files(temp.path(), &WalkOptions::default()).unwrap();

    insta::assert_debug_snapshot!(relative_names(temp.path(), &files), @r#"
    [
        "a.txt",
        "b/nested/a.pak",
        "z.pak",
    ]
    "#);
}

#[test]
fn test_walk_files_sees_hidden_and_gitignored() {
    let temp = temp_dir();
    std::fs::write(temp.path().join(".gitignore"), "*.pak\n").unwrap();
    std::fs::write(temp.path().join("mod.pak"), "").unwrap();
    std::fs::write(temp.path().join(".hidden.utoc"), "").unwrap();

    let files = walk_files(temp.path(), &WalkOptions::default()).unwrap();
    let names = relative_names(temp.path(), &files);

    assert!(names.contains(&"mod.pak".to_string()));
    assert!(names.contains(&".hidden.utoc".to_string()));
}

#[test]
fn test_walk_files_respects_max_depth() {
    let temp = temp_dir();
    std::fs::create_dir_all(temp.path().join("deep/deeper")).unwrap();
    std::fs::write(temp.path().join("top.pak"), "").unwrap();
    std::fs::write(temp.path().join("deep/deeper/low.pak"), "").unwrap();

    let options = WalkOptions::builder().with_max_depth(1).build();
    let files = walk_files(temp.path(), &options).unwrap();

    assert_eq!(relative_names(temp.path(), &files), vec!["top.pak"]);
}

#[test]
fn test_walk_files_missing_root() {
    let temp = temp_dir();
    let result = walk_files(temp.path().join("nope"), &WalkOptions::default());
    assert!(result.is_err());
}

#[test]
fn test_folder_size() {
    let temp = temp_dir();
    std::fs::create_dir_all(temp.path().join("sub")).unwrap();
    std::fs::write(temp.path().join("one.pak"), vec![0u8; 100]).unwrap();
    std::fs::write(temp.path().join("sub/two.pak"), vec![0u8; 28]).unwrap();

    assert_eq!(folder_size(temp.path()), 128);
    assert_eq!(folder_size(temp.path().join("missing")), 0);
}

#[test]
fn test_write_atomic_creates_and_replaces() {
    let temp = temp_dir();
    let path = temp.path().join("deep/dir/doc.json");

    super::atomic::write_atomic(&path, b"first").unwrap();
    super::atomic::write_atomic(&path, b"second").unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), b"second");
    let leftovers = std::fs::read_dir(path.parent().unwrap()).unwrap().count();
    assert_eq!(leftovers, 1);
}
