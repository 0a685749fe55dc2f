// kamisama-rs: Sparking! ZERO Mod Manager
//
// SPDX-FileCopyrightText: 2026 Kamisama Loader Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Profile activation diffs.

use super::{LocalMod, Profile};

/// Mods to flip when switching to a profile.
///
/// Callers undeploy every `to_disable` entry before deploying any
/// `to_enable` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDiff {
    pub to_disable: Vec<String>,
    pub to_enable: Vec<String>,
}

impl ProfileDiff {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_disable.is_empty() && self.to_enable.is_empty()
    }
}

/// Enabled mods outside `profile` go off, disabled mods inside it come on.
#[must_use]
pub fn diff(mods: &[LocalMod], profile: &Profile) -> ProfileDiff {
    let mut out = ProfileDiff::default();
    for m in mods {
        match (m.is_enabled, profile.contains(&m.id)) {
            (true, false) => out.to_disable.push(m.id.clone()),
            (false, true) => out.to_enable.push(m.id.clone()),
            _ => {}
        }
    }
    out
}

/// Snapshot of the currently enabled mods.
#[must_use]
pub fn snapshot(id: impl Into<String>, name: impl Into<String>, mods: &[LocalMod]) -> Profile {
    Profile {
        id: id.into(),
        name: name.into(),
        mod_ids: mods
            .iter()
            .filter(|m| m.is_enabled)
            .map(|m| m.id.clone())
            .collect(),
    }
}
