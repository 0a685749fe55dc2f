// kamisama-rs: Sparking! ZERO Mod Manager
//
// SPDX-FileCopyrightText: 2026 Kamisama Loader Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Online catalog command arguments.

use clap::Args;

/// Arguments for the `search` command.
#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    /// Catalog page, starting at 1.
    #[arg(short = 'p', long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,
}

/// Arguments for the `install-online` command.
#[derive(Debug, Clone, Args)]
pub struct InstallOnlineArgs {
    /// Catalog id of the mod.
    #[arg(value_name = "REMOTE_ID")]
    pub remote_id: u64,
}
