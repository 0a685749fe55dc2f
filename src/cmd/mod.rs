// kamisama-rs: Sparking! ZERO Mod Manager
//
// SPDX-FileCopyrightText: 2026 Kamisama Loader Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers --> ModManager
//!   config, library, profile, online
//! ```
//!
//! Handlers print results to stdout and warnings to stderr; errors are
//! returned to `main`, which turns them into the exit code.

pub mod config;
pub mod library;
pub mod online;
pub mod profile;

#[cfg(test)]
mod tests;
