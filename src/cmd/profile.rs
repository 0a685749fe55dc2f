// kamisama-rs: Sparking! ZERO Mod Manager
//
// SPDX-FileCopyrightText: 2026 Kamisama Loader Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Profile and settings commands.

use std::path::Path;

use crate::cli::library::{
    ProfileArgs, ProfileSubcommand, SetSettingsArgs, SettingsArgs, SettingsSubcommand,
};
use crate::error::Result;
use crate::library::Settings;
use crate::manager::ModManager;

/// # Errors
///
/// Returns an error if the profile is unknown or the documents cannot be
/// read or saved.
pub fn run_profile_command(args: &ProfileArgs, manager: &ModManager) -> Result<()> {
    match &args.subcommand {
        ProfileSubcommand::List => {
            let active = manager.settings()?.active_profile_id;
            let profiles = manager.list_profiles()?;
            if profiles.is_empty() {
                println!("No profiles saved");
            }
            for p in &profiles {
                let marker = if active.as_deref() == Some(p.id.as_str()) { "*" } else { " " };
                println!("{marker} {} ({} mods)  id={}", p.name, p.mod_ids.len(), p.id);
            }
        }
        ProfileSubcommand::Create { name } => {
            let created = manager.create_profile(name)?;
            println!(
                "Created profile {} with {} mods (id {})",
                created.name,
                created.mod_ids.len(),
                created.id
            );
        }
        ProfileSubcommand::Delete { id } => {
            manager.delete_profile(id)?;
            println!("Deleted profile {id}");
        }
        ProfileSubcommand::Load { id } => {
            let diff = manager.load_profile(id)?;
            println!(
                "Loaded profile {id}: {} disabled, {} enabled",
                diff.to_disable.len(),
                diff.to_enable.len()
            );
        }
    }
    Ok(())
}

/// Settings as `key = value` lines.
#[must_use]
pub fn format_settings(settings: &Settings) -> Vec<String> {
    let opt = |v: Option<&str>| v.unwrap_or("").to_string();
    vec![
        format!("gamePath = {}", settings.game_path.display()),
        format!(
            "modDownloadPath = {}",
            opt(settings.mod_download_path().and_then(Path::to_str))
        ),
        format!("launchArgs = {}", opt(settings.launch_args.as_deref())),
        format!("activeProfileId = {}", opt(settings.active_profile_id.as_deref())),
    ]
}

/// Apply `settings set` options. An empty value clears an optional field.
pub fn apply_settings(settings: &mut Settings, args: &SetSettingsArgs) {
    if let Some(path) = &args.game_path {
        settings.game_path.clone_from(path);
    }
    if let Some(path) = &args.mod_download_path {
        settings.mod_download_path = (!path.as_os_str().is_empty()).then(|| path.clone());
    }
    if let Some(launch_args) = &args.launch_args {
        settings.launch_args = (!launch_args.trim().is_empty()).then(|| launch_args.clone());
    }
}

/// # Errors
///
/// Returns an error if no option was given or the settings cannot be read
/// or saved.
pub fn run_settings_command(args: &SettingsArgs, manager: &ModManager) -> Result<()> {
    match &args.subcommand {
        SettingsSubcommand::Show => {
            for line in format_settings(&manager.settings()?) {
                println!("{line}");
            }
        }
        SettingsSubcommand::Set(set) => {
            if set.is_empty() {
                anyhow::bail!("nothing to set; see `kamisama settings set --help`");
            }
            let mut settings = manager.settings()?;
            apply_settings(&mut settings, set);
            manager.save_settings(&settings)?;
            for line in format_settings(&settings) {
                println!("{line}");
            }
        }
    }
    Ok(())
}
