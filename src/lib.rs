//! Photo Profile Library
//!
//! Manages a user's collection of profile photos and which one is currently
//! shown. A photo arriving from the camera or the gallery is previewed as
//! unsaved until the user saves it; saved photos can be selected or removed,
//! and the screen always derives what it shows from the store contents.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - [`core`] - Configuration, error handling and the reconciliation rules
//!   deriving the display state
//! - [`store`] - The `PhotoStore` contract with in-memory and JSON file
//!   backends
//! - [`capture`] - Photo sources (file picker, terminal prompt) and removal
//!   confirmation
//! - [`ui`] - Screen controller turning intents into store calls, plus its
//!   events
//! - [`cli`] - Command-line interface (only used by the binary)
//! - [`testdb`] - Mock store, scripted collaborators and scenarios for testing
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use photo_profile::capture::TerminalConfirmer;
//! use photo_profile::core::config::Config;
//! use photo_profile::store::{open_store, PhotoReference};
//! use photo_profile::ui::{ProfileRoute, ScreenController};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let config = Config::load_default()?;
//! let store = open_store(&config.store)?;
//! let mut controller = ScreenController::new(store);
//!
//! // The camera hands a fresh photo to the profile screen
//! let route = ProfileRoute::with_photo(PhotoReference::parse("file:///tmp/me.jpg")?);
//! controller.open(route).await;
//! assert!(controller.display().is_unsaved);
//!
//! let notice = controller.save().await;
//! println!("{}", notice);
//!
//! // Removal asks before anything is deleted
//! controller.remove_shown(&TerminalConfirmer).await;
//! # Ok(())
//! # }
//! ```
//!
//! # Testing Without a Camera or Store
//!
//! ```rust,no_run
//! use photo_profile::testdb::TestRunner;
//!
//! # async fn demo() {
//! let mut runner = TestRunner::new();
//! let summary = runner.run_all().await;
//! println!("Passed: {}/{}", summary.passed, summary.total);
//! # }
//! ```

pub mod capture;
pub mod cli;
pub mod core;
pub mod store;
pub mod testdb;
pub mod ui;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
