// kamisama-rs: Sparking! ZERO Mod Manager
//
// SPDX-FileCopyrightText: 2026 Kamisama Loader Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Script loader registry (`Mods/mods.txt`).
//!
//! ```text
//! ; comment lines and blanks are kept verbatim
//! CheatManagerEnablerMod : 1
//! MyMod : 0
//! ```
//!
//! Several mods share the file, so every update is a full
//! read-modify-write under one lock.

use std::io;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use tracing::debug;

/// Serializes all registry rewrites made through one deployer.
#[derive(Debug, Default)]
pub struct LoaderRegistry {
    lock: Mutex<()>,
}

impl LoaderRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to enabled or disabled in the registry at `path`.
    ///
    /// A missing file is treated as empty and created.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the file cannot be read or written.
    pub fn set_entry(&self, path: &Path, name: &str, enabled: bool) -> io::Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e),
        };

        let updated = apply_entry(&content, name, enabled);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, updated)?;
        debug!(registry = %path.display(), name, enabled, "updated loader registry");
        Ok(())
    }
}

/// Parsed `name : value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    pub name: String,
    pub enabled: bool,
}

/// Split a line on its first `:` or `=`. Comments and blanks yield `None`.
#[must_use]
pub fn parse_line(line: &str) -> Option<RegistryEntry> {
    let trimmed = line.trim();
    if trimmed.is_empty() || is_comment(trimmed) {
        return None;
    }
    let sep = trimmed.find([':', '='])?;
    let name = trimmed[..sep].trim();
    if name.is_empty() {
        return None;
    }
    Some(RegistryEntry {
        name: name.to_string(),
        enabled: trimmed[sep + 1..].trim() == "1",
    })
}

/// Every entry in registry text, in file order.
#[must_use]
pub fn parse_entries(content: &str) -> Vec<RegistryEntry> {
    content.lines().filter_map(parse_line).collect()
}

/// Rewrite registry text so `name` carries `enabled`.
///
/// Matching is case-insensitive and keeps the spelling already in the
/// file. Unknown names are appended.
#[must_use]
pub fn apply_entry(content: &str, name: &str, enabled: bool) -> String {
    let value = u8::from(enabled);
    let mut found = false;

    let mut lines: Vec<String> = content
        .lines()
        .map(|line| match parse_line(line) {
            Some(entry) if entry.name.eq_ignore_ascii_case(name) => {
                found = true;
                format!("{} : {value}", entry.name)
            }
            _ => line.to_string(),
        })
        .collect();

    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }

    if !found {
        lines.push(format!("{name} : {value}"));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn is_comment(trimmed: &str) -> bool {
    trimmed.starts_with(';') || trimmed.starts_with('#') || trimmed.starts_with("//")
}
