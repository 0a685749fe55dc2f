// kamisama-rs: Sparking! ZERO Mod Manager
//
// SPDX-FileCopyrightText: 2026 Kamisama Loader Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Catalog commands: updates, search, online installs.

use crate::cli::library::ModIdArgs;
use crate::cli::online::{InstallOnlineArgs, SearchArgs};
use crate::error::Result;
use crate::manager::ModManager;
use crate::remote::RemoteCatalogEntry;

/// One `search` result line.
#[must_use]
pub fn format_entry_line(entry: &RemoteCatalogEntry) -> String {
    let category = entry.category.as_deref().unwrap_or("-");
    let nsfw = if entry.is_nsfw { " [nsfw]" } else { "" };
    format!(
        "{:>8}  {} v{} by {} [{category}]{nsfw}",
        entry.remote_id, entry.name, entry.version, entry.author
    )
}

/// # Errors
///
/// Returns an error if the library cannot be read or saved.
pub async fn run_check_updates_command(manager: &ModManager) -> Result<()> {
    let updated = manager.check_for_updates().await?;
    if updated.is_empty() {
        println!("All mods are up to date");
        return Ok(());
    }
    let mods = manager.list_mods()?;
    for m in mods.iter().filter(|m| updated.contains(&m.id)) {
        println!(
            "{} v{} -> v{}  id={}",
            m.name,
            m.version,
            m.latest_version.as_deref().unwrap_or("?"),
            m.id
        );
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the mod has no pending update or applying it fails.
pub async fn run_update_command(args: &ModIdArgs, manager: &ModManager) -> Result<()> {
    manager.update_mod(&args.id).await?;
    println!("Updated {}", args.id);
    Ok(())
}

/// # Errors
///
/// Returns an error if the library cannot be read or any update failed.
pub async fn run_update_all_command(manager: &ModManager) -> Result<()> {
    let results = manager.update_all().await?;
    if results.is_empty() {
        println!("No pending updates");
        return Ok(());
    }

    let mut failed = 0usize;
    for (id, ok) in &results {
        if *ok {
            println!("Updated {id}");
        } else {
            eprintln!("Failed to update {id}");
            failed += 1;
        }
    }
    if failed > 0 {
        anyhow::bail!("{failed} of {} updates failed", results.len());
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the catalog request fails.
pub async fn run_search_command(args: &SearchArgs, manager: &ModManager) -> Result<()> {
    let entries = manager.search_online(args.page).await?;
    if entries.is_empty() {
        println!("No results on page {}", args.page);
    }
    for entry in &entries {
        println!("{}", format_entry_line(entry));
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the catalog entry cannot be downloaded or installed.
pub async fn run_install_online_command(
    args: &InstallOnlineArgs,
    manager: &ModManager,
) -> Result<()> {
    let installed = manager.install_online(args.remote_id).await?;
    println!(
        "Installed {} v{} (id {}, priority {})",
        installed.name, installed.version, installed.id, installed.priority
    );
    Ok(())
}

/// # Errors
///
/// Returns an error if no game path is set or the release cannot be
/// installed.
pub async fn run_install_ue4ss_command(manager: &ModManager) -> Result<()> {
    let dest = manager.install_ue4ss().await?;
    println!("UE4SS installed into {}", dest.display());
    Ok(())
}
