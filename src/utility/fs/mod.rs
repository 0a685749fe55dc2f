// kamisama-rs: Sparking! ZERO Mod Manager
//
// SPDX-FileCopyrightText: 2026 Kamisama Loader Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem utilities built on the `ignore` walker.
//!
//! ```text
//! walk:  walk_files()    sorted, sequential (deterministic deploy order)
//!        folder_size()   ignore::WalkParallel byte total
//!        WalkOptions     max_depth, hidden, gitignore
//!
//! atomic: write_atomic() temp file + rename
//! ```

pub mod atomic;
pub mod walk;

#[cfg(test)]
mod tests;
