//! Test Database Module
//!
//! Testing framework for the profile photo screen that runs every flow
//! without a real camera, gallery or storage medium.
//!
//! # Features
//!
//! - **Mock Store**: A photo store whose operations can be made to fail
//!   individually, with a log of every call in issue order
//! - **Scripted Collaborators**: Photo sources and removal confirmers that
//!   replay fixed outcomes
//! - **Test Scenarios**: Pre-built flows covering display derivation, save,
//!   select, removal and failure handling
//! - **Test Runner**: Execute scenarios and write a JSON report
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use photo_profile::testdb::{TestRunner, TestRunnerConfig};
//!
//! # async fn demo() {
//! let mut runner = TestRunner::with_config(TestRunnerConfig {
//!     verbose: true,
//!     ..Default::default()
//! });
//! let summary = runner.run_by_tag("remove").await;
//! println!("Passed: {}/{}", summary.passed, summary.total);
//! # }
//! ```
//!
//! # Available Scenarios
//!
//! ## Display
//! - `empty_store_new_photo` - New photo on an empty store
//! - `current_photo_shown` - Stored current photo is shown
//! - `first_photo_fallback` - First saved photo without a current photo
//! - `incoming_overrides_current` - New photo wins until saved
//! - `already_saved_candidate` - Picked photo that is already saved
//! - `cancelled_capture` - Camera or picker closed without a photo
//!
//! ## Save / Select
//! - `save_unsaved_candidate`, `save_twice`, `select_saved_photo`
//!
//! ## Removal
//! - `remove_current_reselects`, `remove_last_photo`, `cancelled_removal`,
//!   `remove_unsaved_candidate`
//!
//! ## Error Conditions
//! - `save_rollback` - Save undone when the photo cannot be made current
//! - `store_unavailable` - Store gone between intents
//! - `select_missing_photo` - Selecting a photo that is no longer saved

pub mod mock_capture;
pub mod mock_store;
pub mod runner;
pub mod scenarios;

pub use mock_capture::{ScriptedConfirmer, ScriptedPhotoSource};
pub use mock_store::{MockPhotoStore, StoreOperation};
pub use runner::{ScenarioResult, TestRunner, TestRunnerConfig, TestSummary};
pub use scenarios::{ExpectedResults, ScenarioLibrary, ScenarioStep, TestScenario};
