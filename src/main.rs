// kamisama-rs: Sparking! ZERO Mod Manager
//
// SPDX-FileCopyrightText: 2026 Kamisama Loader Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> Config --> ModManager --> Command Dispatch
//!   List | Install | Enable | Priority | Profile | Update | Search | Launch
//! ```

use std::process::ExitCode;

use kamisama_rs::cli::global::GlobalOptions;
use kamisama_rs::cli::{self, Command};
use kamisama_rs::cmd::config::{run_options_command, run_version_command};
use kamisama_rs::cmd::library::{
    run_deploy_all_command, run_fix_priorities_command, run_install_command, run_launch_command,
    run_list_command, run_priority_command, run_toggle_command, run_uninstall_command,
};
use kamisama_rs::cmd::online::{
    run_check_updates_command, run_install_online_command, run_install_ue4ss_command,
    run_search_command, run_update_all_command, run_update_command,
};
use kamisama_rs::cmd::profile::{run_profile_command, run_settings_command};
use kamisama_rs::config::loader::ConfigLoader;
use kamisama_rs::config::paths::default_data_dir;
use kamisama_rs::config::{CONFIG_FILE_NAME, Config};
use kamisama_rs::error::Result;
use kamisama_rs::logging::init_logging;
use kamisama_rs::logging::{LogConfig, LogLevel};
use kamisama_rs::manager::ModManager;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let log_config = build_log_config(&cli.global);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = match &cli.command {
        Some(Command::Version) => {
            run_version_command();
            Ok(())
        }
        Some(Command::Options) => load_config(&cli.global).map(|config| run_options_command(&config)),
        Some(command) => run_with_manager(command, &cli.global).await,
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn build_log_config(global: &GlobalOptions) -> LogConfig {
    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::INFO);

    let file_level = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(console_level);

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(global.log_file.clone())
        .build()
}

async fn run_with_manager(command: &Command, global: &GlobalOptions) -> Result<()> {
    let config = load_config(global)?;
    let manager = ModManager::from_config(&config)?;

    let result = dispatch_command(command, &manager).await;
    if let Err(e) = manager.shutdown().await {
        tracing::warn!("shutdown incomplete: {e:#}");
    }
    result
}

async fn dispatch_command(command: &Command, manager: &ModManager) -> Result<()> {
    match command {
        Command::List => run_list_command(manager),
        Command::Install(args) => run_install_command(args, manager).await,
        Command::Uninstall(args) => run_uninstall_command(args, manager),
        Command::Enable(args) => run_toggle_command(args, manager, true),
        Command::Disable(args) => run_toggle_command(args, manager, false),
        Command::Priority(args) => run_priority_command(args, manager),
        Command::FixPriorities => run_fix_priorities_command(manager),
        Command::DeployAll => run_deploy_all_command(manager),
        Command::Profile(args) => run_profile_command(args, manager),
        Command::Settings(args) => run_settings_command(args, manager),
        Command::CheckUpdates => run_check_updates_command(manager).await,
        Command::Update(args) => run_update_command(args, manager).await,
        Command::UpdateAll => run_update_all_command(manager).await,
        Command::Search(args) => run_search_command(args, manager).await,
        Command::InstallOnline(args) => run_install_online_command(args, manager).await,
        Command::InstallUe4ss => run_install_ue4ss_command(manager).await,
        Command::Launch => run_launch_command(manager),
        Command::Version | Command::Options => Ok(()),
    }
}

fn build_config_loader(global: &GlobalOptions) -> Result<ConfigLoader> {
    let mut loader = ConfigLoader::new();
    let data_dir = global.data_dir.clone().or_else(default_data_dir);
    if let Some(dir) = data_dir {
        loader = loader.add_toml_file_optional(dir.join(CONFIG_FILE_NAME));
    }
    loader = loader.add_toml_file_optional(CONFIG_FILE_NAME);
    for path in &global.configs {
        loader = loader.add_toml_file(path);
    }
    loader = loader.with_env_prefix("KAMI");
    for option in global.to_config_overrides() {
        loader = loader.set_override_str(&option)?;
    }
    Ok(loader)
}

fn load_config(global: &GlobalOptions) -> Result<Config> {
    let loader = build_config_loader(global)?;
    for path in loader.loaded_files() {
        tracing::debug!(path = %path.display(), "config file");
    }
    loader.build().map_err(|e| {
        eprintln!("Failed to load config: {e}");
        e
    })
}
