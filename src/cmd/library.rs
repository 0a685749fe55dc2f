// kamisama-rs: Sparking! ZERO Mod Manager
//
// SPDX-FileCopyrightText: 2026 Kamisama Loader Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library commands: listing, install, enable state, load order, launch.

use crate::cli::library::{DirectionArg, InstallArgs, ModIdArgs, PriorityArgs};
use crate::error::Result;
use crate::library::LocalMod;
use crate::manager::ModManager;

/// One `list` line: priority, state, name, version and id.
#[must_use]
pub fn format_mod_line(m: &LocalMod) -> String {
    let state = if m.is_enabled { "x" } else { " " };
    let update = if m.has_update {
        m.latest_version
            .as_deref()
            .map_or_else(|| "  (update available)".to_string(), |v| format!("  (update: v{v})"))
    } else {
        String::new()
    };
    format!(
        "{:>3} [{state}] {} v{}  id={}{update}",
        m.priority, m.name, m.version, m.id
    )
}

/// # Errors
///
/// Returns an error if the library cannot be read.
pub fn run_list_command(manager: &ModManager) -> Result<()> {
    let mods = manager.list_mods()?;
    if mods.is_empty() {
        println!("No mods installed");
    } else {
        for m in &mods {
            println!("{}", format_mod_line(m));
        }
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the file cannot be installed.
pub async fn run_install_command(args: &InstallArgs, manager: &ModManager) -> Result<()> {
    let installed = manager.install_mod(&args.file).await?;
    println!(
        "Installed {} (id {}, priority {})",
        installed.name, installed.id, installed.priority
    );
    if installed.deployed_files.is_empty() {
        eprintln!("Nothing deployed; check the game path with `kamisama settings show`");
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the mod is unknown or cannot be removed.
pub fn run_uninstall_command(args: &ModIdArgs, manager: &ModManager) -> Result<()> {
    let removed = manager.uninstall_mod(&args.id)?;
    println!("Uninstalled {}", removed.name);
    Ok(())
}

/// Handler for `enable` and `disable`.
///
/// # Errors
///
/// Returns an error if the mod is unknown or the library cannot be saved.
pub fn run_toggle_command(args: &ModIdArgs, manager: &ModManager, enabled: bool) -> Result<()> {
    let outcome = manager.toggle_mod(&args.id, enabled)?;
    if let Some(conflict) = &outcome.conflict {
        eprintln!("{conflict}");
    }
    match (enabled, outcome.deployed) {
        (true, Some(report)) => println!("Enabled {} ({} files deployed)", args.id, report.deployed),
        (true, None) => println!("Enabled {} (not deployed)", args.id),
        (false, _) => println!("Disabled {}", args.id),
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the mod is unknown, already at that edge of the load
/// order, or the library cannot be saved.
pub fn run_priority_command(args: &PriorityArgs, manager: &ModManager) -> Result<()> {
    if !manager.set_mod_priority(&args.id, args.direction.into())? {
        let edge = match args.direction {
            DirectionArg::Up => "top",
            DirectionArg::Down => "bottom",
        };
        anyhow::bail!("mod {} is already at the {edge} of the load order", args.id);
    }
    run_list_command(manager)
}

/// # Errors
///
/// Returns an error if the library cannot be read or saved.
pub fn run_fix_priorities_command(manager: &ModManager) -> Result<()> {
    match manager.fix_priorities()? {
        0 => println!("Priorities already normalized"),
        n => println!("Renumbered {n} mods"),
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if no game path is set or the library cannot be saved.
pub fn run_deploy_all_command(manager: &ModManager) -> Result<()> {
    let report = manager.deploy_all()?;
    println!(
        "Deployed {} mods ({} files, {} failed)",
        report.mods, report.files, report.failed
    );
    Ok(())
}

/// # Errors
///
/// Returns an error if the game cannot be found or started.
pub fn run_launch_command(manager: &ModManager) -> Result<()> {
    match manager.launch_game()? {
        Some(pid) => println!("Game started (pid {pid})"),
        None => println!("Game started"),
    }
    Ok(())
}
