// kamisama-rs: Sparking! ZERO Mod Manager
//
// SPDX-FileCopyrightText: 2026 Kamisama Loader Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Load order and category conflicts.
//!
//! ```text
//! order:  priority desc, name asc
//! assign: order[i].priority = N - i        => dense 1..=N
//!
//!   idx  name   prio          idx  name   prio
//!    0   B      7      up      0   A      3
//!    1   A      5     ---->    1   B      2
//!    2   C      5   (A, idx1)  2   C      1
//! ```
//!
//! Higher priority gets a later `NNN_` pak prefix, loads later and wins.
//! Every function here is pure; callers redeploy the ids returned in
//! [`PriorityChange`] lists.

use std::fmt;

use super::LocalMod;

/// Categories shared by too many unrelated mods to warn about.
pub const GENERIC_CATEGORIES: &[&str] = &["UI", "Misc", "Sounds", "Music", "Other"];

/// One mod whose priority value moved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityChange {
    pub id: String,
    pub old: u32,
    pub new: u32,
}

/// Direction of a single-step reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward the front of the order (higher priority).
    Up,
    /// Toward the back of the order (lower priority).
    Down,
}

/// Indices of `mods` in load-order precedence: priority descending, ties by
/// ascending name.
#[must_use]
pub fn sorted_order(mods: &[LocalMod]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..mods.len()).collect();
    order.sort_by(|&a, &b| {
        mods[b]
            .priority
            .cmp(&mods[a].priority)
            .then_with(|| mods[a].name.cmp(&mods[b].name))
    });
    order
}

/// Rewrite priorities to a dense `1..=N`, keeping relative order.
///
/// Returns the mods whose value actually changed.
pub fn normalize(mods: &mut [LocalMod]) -> Vec<PriorityChange> {
    let order = sorted_order(mods);
    assign(mods, &order)
}

/// Move `id` one step in `direction` and renumber the whole library.
///
/// Returns `None` when `id` is unknown or already at the edge, in which
/// case nothing is modified.
pub fn move_mod(
    mods: &mut [LocalMod],
    id: &str,
    direction: Direction,
) -> Option<Vec<PriorityChange>> {
    let mut order = sorted_order(mods);
    let pos = order.iter().position(|&i| mods[i].id == id)?;

    let target = match direction {
        Direction::Up => pos.checked_sub(1)?,
        Direction::Down => pos + 1,
    };
    if target >= order.len() {
        return None;
    }

    order.swap(pos, target);
    Some(assign(mods, &order))
}

/// Priority for a newly added mod: one above the current maximum.
#[must_use]
pub fn next_priority(mods: &[LocalMod]) -> u32 {
    mods.iter().map(|m| m.priority).max().map_or(1, |p| p.saturating_add(1))
}

fn assign(mods: &mut [LocalMod], order: &[usize]) -> Vec<PriorityChange> {
    let n = u32::try_from(order.len()).unwrap_or(u32::MAX);
    let mut changes = Vec::new();

    for (rank, &i) in (0u32..).zip(order) {
        let new = n - rank;
        let m = &mut mods[i];
        if m.priority != new {
            changes.push(PriorityChange {
                id: m.id.clone(),
                old: m.priority,
                new,
            });
            m.priority = new;
        }
    }
    changes
}

/// Another enabled mod occupying the same category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub mod_id: String,
    pub mod_name: String,
    pub category: String,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Warning: This mod conflicts with \"{}\" (category: {}). Higher priority mod will take precedence.",
            self.mod_name, self.category
        )
    }
}

/// Whether `category` is in the generic exclusion set.
#[must_use]
pub fn is_generic_category(category: &str) -> bool {
    GENERIC_CATEGORIES
        .iter()
        .any(|g| g.eq_ignore_ascii_case(category.trim()))
}

/// First other enabled mod sharing the non-generic category of `target_id`.
///
/// Categories match ignoring ASCII case and surrounding whitespace.
#[must_use]
pub fn find_conflict(mods: &[LocalMod], target_id: &str) -> Option<Conflict> {
    let target = mods.iter().find(|m| m.id == target_id)?;
    let category = target.category()?.trim();
    if is_generic_category(category) {
        return None;
    }

    mods.iter()
        .filter(|m| m.id != target_id && m.is_enabled)
        .find(|m| {
            m.category()
                .is_some_and(|c| c.trim().eq_ignore_ascii_case(category))
        })
        .map(|m| Conflict {
            mod_id: m.id.clone(),
            mod_name: m.name.clone(),
            category: category.to_string(),
        })
}
