//! Command-line argument definitions
//!
//! This module defines all CLI arguments and subcommands using clap.

use crate::core::config::StoreBackend;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Manage a profile photo collection and the photo it currently shows
#[derive(Parser, Debug)]
#[command(name = "photo-profile")]
#[command(version)]
#[command(about = "Manage a profile photo collection: add, select and remove photos", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Store backend: memory or json (overrides config)
    #[arg(long, global = true, value_name = "BACKEND")]
    pub store: Option<StoreBackend>,

    /// Path of the JSON store file (overrides config)
    #[arg(long, global = true, value_name = "FILE")]
    pub store_path: Option<PathBuf>,

    /// Log level: error, warn, info, debug, trace (overrides config)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List saved photos, marking the current one
    List,

    /// Show what the profile screen displays
    Show {
        /// Photo handed over by the camera or picker
        #[arg(long, value_name = "REF")]
        incoming: Option<String>,
    },

    /// Pick an image file and save it as the current photo
    Pick {
        /// Image file to pick
        path: PathBuf,

        /// Only show the picked photo, do not save it
        #[arg(long)]
        dry_run: bool,
    },

    /// Save a photo reference and make it current
    Save {
        /// Photo reference to save
        photo: String,
    },

    /// Make a saved photo the current one
    Select {
        /// Photo reference to select
        photo: String,
    },

    /// Remove a saved photo
    Remove {
        /// Photo reference to remove
        photo: String,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Interactive profile screen session
    ///
    /// Keeps one screen open so unsaved photos can be reviewed, saved or
    /// discarded. Works with every store backend, including `memory`.
    Session,

    /// Show or reset the configuration file
    ///
    /// The config file is stored at:
    /// - Windows: %APPDATA%\photo_profile\config.toml
    /// - Linux/macOS: ~/.config/photo_profile/config.toml
    ///
    /// If no config file exists, a default one will be created.
    Config {
        /// Show the config file path
        #[arg(long)]
        path: bool,

        /// Reset config to defaults (creates a fresh config file)
        #[arg(long)]
        reset: bool,
    },

    /// Generate a configuration file at a specific location
    GenerateConfig {
        /// Output path for the config file (defaults to standard location)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show current configuration
    ShowConfig,

    /// Run the built-in screen scenarios against a mock store
    Test {
        #[command(subcommand)]
        test_command: TestCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum TestCommands {
    /// Run all available test scenarios
    RunAll {
        /// Directory for a JSON report
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Stop on first failure
        #[arg(long)]
        fail_fast: bool,
    },

    /// Run tests filtered by tag
    RunTag {
        /// Tag to filter scenarios by
        /// Available tags: display, save, select, remove, capture, error, quick
        tag: String,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// List all available test scenarios
    ListScenarios {
        /// Filter by tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Show the steps of each scenario
        #[arg(short, long)]
        detailed: bool,
    },
}
