//! Command handler implementations
//!
//! This module contains the implementation of all CLI commands. Every photo
//! command composes one screen controller over the configured store, plays
//! the matching intent and prints the resulting screen.

use crate::capture::{
    AutoConfirmer, Confirmation, FilePhotoPicker, PromptPhotoPicker, RemovalConfirmer,
    TerminalConfirmer,
};
use crate::cli::output::{print_notice, print_screen};
use crate::cli::{Args, Commands, TestCommands};
use crate::core::config::{get_config_path, init_config, Config, StoreBackend};
use crate::store::{open_store, PhotoReference};
use crate::testdb::{ScenarioLibrary, TestRunner, TestRunnerConfig};
use crate::ui::{Notice, ProfileRoute, ScreenController};
use anyhow::{bail, Result};
use dialoguer::Select;
use log::{debug, info, warn};
use std::path::PathBuf;
use std::sync::Arc;

/// Run the appropriate command based on CLI arguments
pub async fn run_command(args: &Args, config: &Config) -> Result<()> {
    match &args.command {
        Some(Commands::Config { path, reset }) => handle_config_command(*path, *reset)?,
        Some(Commands::GenerateConfig { output }) => generate_config_file(output.clone())?,
        Some(Commands::ShowConfig) => show_config(config),
        Some(Commands::Test { test_command }) => handle_test_command(test_command).await?,
        Some(Commands::Session) => run_session(config).await?,
        Some(command) => run_photo_command(command, config).await?,
        None => {
            let mut controller = open_controller(config)?;
            let notice = controller.open(ProfileRoute::default()).await;
            finish(&controller, notice)?;
        }
    }

    Ok(())
}

/// Build a controller over the configured store
fn open_controller(config: &Config) -> Result<ScreenController> {
    let store = open_store(&config.store)?;
    debug!("Using {} photo store", store.backend_name());
    Ok(ScreenController::new(store))
}

/// Pick the confirmation dialog for removals
fn removal_confirmer(config: &Config, yes: bool) -> Arc<dyn RemovalConfirmer> {
    if yes || !config.prompts.confirm_removal {
        Arc::new(AutoConfirmer)
    } else {
        Arc::new(TerminalConfirmer)
    }
}

/// Ask for confirmation on a blocking thread, then resolve the removal
///
/// Terminal prompts block until the user answers, so they never run on the
/// async workers.
async fn remove_confirmed(
    controller: &mut ScreenController,
    photo: PhotoReference,
    confirmer: &Arc<dyn RemovalConfirmer>,
) -> Result<Notice> {
    controller.request_removal(photo.clone());

    let confirmer = Arc::clone(confirmer);
    let answer = tokio::task::spawn_blocking(move || confirmer.confirm(&photo)).await?;

    let notice = match answer {
        Ok(decision) => controller.resolve_removal(decision).await,
        Err(e) => {
            controller.resolve_removal(Confirmation::Cancelled).await;
            Notice::failure("Could not remove photo", e)
        }
    };
    Ok(notice)
}

/// Print the screen and turn an error notice into a failed command
fn finish(controller: &ScreenController, notice: Notice) -> Result<()> {
    if notice.is_error() {
        bail!("{}", notice);
    }
    print_notice(&notice);
    print_screen(controller.display(), controller.photos());
    Ok(())
}

/// One-shot photo commands
async fn run_photo_command(command: &Commands, config: &Config) -> Result<()> {
    if config.store.backend == StoreBackend::Memory {
        warn!("The memory store is emptied when this command exits; use 'session' to keep it");
    }

    let mut controller = open_controller(config)?;

    let notice = match command {
        Commands::List => controller.refresh().await,
        Commands::Show { incoming } => {
            let route = ProfileRoute {
                photo_ref: incoming.as_deref().map(PhotoReference::parse).transpose()?,
            };
            controller.open(route).await
        }
        Commands::Pick { path, dry_run } => {
            let picker = FilePhotoPicker::new(path.clone());
            let notice = controller.pick_new(&picker).await;
            if *dry_run || notice.is_error() || !controller.can_save() {
                notice
            } else {
                controller.save().await
            }
        }
        Commands::Save { photo } => {
            let photo = PhotoReference::parse(photo)?;
            let notice = controller.receive_candidate(photo).await;
            if notice.is_error() {
                notice
            } else {
                controller.save().await
            }
        }
        Commands::Select { photo } => {
            let photo = PhotoReference::parse(photo)?;
            controller.select(&photo).await
        }
        Commands::Remove { photo, yes } => {
            let photo = PhotoReference::parse(photo)?;
            let loaded = controller.refresh().await;
            if loaded.is_error() {
                loaded
            } else {
                let confirmer = removal_confirmer(config, *yes);
                remove_confirmed(&mut controller, photo, &confirmer).await?
            }
        }
        other => {
            debug!("{:?} is not a photo command", other);
            return Ok(());
        }
    };

    finish(&controller, notice)
}

// =========================================================================
// INTERACTIVE SESSION
// =========================================================================

const SESSION_ACTIONS: &[&str] = &[
    "Pick a new photo",
    "Save the new photo",
    "Select a saved photo",
    "Remove the shown photo",
    "Refresh",
    "Quit",
];

/// Interactive profile screen over one controller
pub async fn run_session(config: &Config) -> Result<()> {
    let mut controller = open_controller(config)?;
    let confirmer = removal_confirmer(config, false);

    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                     PROFILE PHOTO SESSION                    ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    info!("Session started with the {} store", controller.store().backend_name());

    let notice = controller.open(ProfileRoute::default()).await;
    print_notice(&notice);

    loop {
        print_screen(controller.display(), controller.photos());
        println!();

        let choice = tokio::task::spawn_blocking(|| {
            Select::new()
                .with_prompt("What would you like to do?")
                .items(SESSION_ACTIONS)
                .default(0)
                .interact()
        })
        .await??;

        let notice = match choice {
            0 => controller.pick_new(&PromptPhotoPicker).await,
            1 => controller.save().await,
            2 => match choose_saved_photo(&controller).await? {
                Some(photo) => controller.select(&photo).await,
                None => continue,
            },
            3 => match controller.display().shown_photo.clone() {
                Some(photo) => remove_confirmed(&mut controller, photo, &confirmer).await?,
                None => Notice::info("Nothing to remove", "No photo is shown."),
            },
            4 => controller.refresh().await,
            _ => break,
        };

        print_notice(&notice);
        if notice.is_retryable() {
            println!("  You can try again.");
        }
    }

    info!("Session ended");
    Ok(())
}

/// Let the user pick one of the saved photos
async fn choose_saved_photo(controller: &ScreenController) -> Result<Option<PhotoReference>> {
    let photos = controller.photos();
    if photos.is_empty() {
        println!("No saved photos to choose from.");
        return Ok(None);
    }

    let labels: Vec<String> = photos
        .iter()
        .map(|photo| {
            if controller.display().is_highlighted(photo) {
                format!("{} (shown)", photo)
            } else {
                photo.to_string()
            }
        })
        .collect();

    let choice = tokio::task::spawn_blocking(move || {
        Select::new()
            .with_prompt("Select a photo (Esc to go back)")
            .items(&labels)
            .default(0)
            .interact_opt()
    })
    .await??;

    Ok(choice.and_then(|i| photos.get(i).cloned()))
}

// =========================================================================
// CONFIGURATION COMMANDS
// =========================================================================

/// Handle the `config` command - show path or reset the config file
pub fn handle_config_command(show_path: bool, reset: bool) -> Result<()> {
    if reset {
        if let Some(config_path) = get_config_path() {
            if config_path.exists() {
                std::fs::remove_file(&config_path)?;
                info!("Removed existing config file");
            }
        }
        let path = init_config()?;
        println!("Created fresh config file at: {}", path.display());
        return Ok(());
    }

    let path = Config::get_active_config_path();
    if show_path {
        println!("{}", path.display());
        return Ok(());
    }

    if path.exists() {
        println!("Config file: {}", path.display());
    } else {
        let created = init_config()?;
        println!("Created default config file at: {}", created.display());
    }
    println!("Edit this file to customize the store, logging and prompts.");
    println!("Run 'photo-profile show-config' to verify your settings.");

    Ok(())
}

/// Generate a configuration file at the specified or default location
pub fn generate_config_file(output: Option<PathBuf>) -> Result<()> {
    let output_path = match output {
        Some(path) => {
            std::fs::write(&path, Config::generate_default_config())?;
            path
        }
        None => init_config()?,
    };

    println!("Configuration file: {}", output_path.display());
    println!("Edit this file to customize the store, logging and prompts.");

    Ok(())
}

/// Show the current configuration settings
pub fn show_config(config: &Config) {
    let config_path = Config::get_active_config_path();
    println!("Configuration file: {}", config_path.display());
    if !config_path.exists() {
        println!("(Using default settings - no config file found)");
    }
    println!();
    println!("[store]");
    println!("  backend = \"{}\"", config.store.backend);
    println!("  path = \"{}\"", config.store.effective_path().display());
    println!();
    println!("[logging]");
    println!("  level = \"{}\"", config.logging.level);
    println!("  log_to_file = {}", config.logging.log_to_file);
    println!("  log_file = \"{}\"", config.logging.log_file.display());
    println!();
    println!("[prompts]");
    println!("  confirm_removal = {}", config.prompts.confirm_removal);
}

// =========================================================================
// TEST COMMAND IMPLEMENTATIONS
// =========================================================================

/// Handle test subcommands
pub async fn handle_test_command(test_command: &TestCommands) -> Result<()> {
    match test_command {
        TestCommands::RunAll { output, fail_fast } => {
            let config = TestRunnerConfig {
                verbose: true,
                fail_fast: *fail_fast,
                report_dir: output.as_ref().map(|p| p.to_string_lossy().into_owned()),
                ..Default::default()
            };
            let summary = TestRunner::with_config(config).run_all().await;
            if !summary.all_passed() {
                bail!("{} of {} scenario(s) failed", summary.failed, summary.total);
            }
        }
        TestCommands::RunTag { tag, verbose } => {
            let config = TestRunnerConfig {
                verbose: *verbose,
                ..Default::default()
            };
            let summary = TestRunner::with_config(config).run_by_tag(tag).await;

            println!(
                "\n✓ Tests with tag '{}' complete: {}/{} passed",
                tag, summary.passed, summary.total
            );
            if !summary.all_passed() {
                bail!("{} of {} scenario(s) failed", summary.failed, summary.total);
            }
        }
        TestCommands::ListScenarios { tag, detailed } => {
            list_scenarios(tag.as_deref(), *detailed);
        }
    }
    Ok(())
}

/// List all available test scenarios
fn list_scenarios(tag_filter: Option<&str>, detailed: bool) {
    let scenarios = match tag_filter {
        Some(tag) => ScenarioLibrary::scenarios_by_tag(tag),
        None => ScenarioLibrary::all_scenarios(),
    };

    if scenarios.is_empty() {
        match tag_filter {
            Some(tag) => println!("No scenarios found with tag '{}'", tag),
            None => println!("No scenarios available"),
        }
        return;
    }

    println!("\nAvailable test scenarios:\n");
    for scenario in &scenarios {
        println!(
            "  • {} - {} [{}]",
            scenario.name,
            scenario.description,
            scenario.tags.join(", ")
        );
        if detailed {
            for (i, step) in scenario.steps.iter().enumerate() {
                println!("      {}. {:?}", i + 1, step);
            }
        }
    }
    println!();
    println!("Total: {} scenarios", scenarios.len());
    println!("Tags: {}", ScenarioLibrary::all_tags().join(", "));
}
