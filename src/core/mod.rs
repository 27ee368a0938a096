//! Core functionality module
//!
//! This module contains the core business logic for the photo profile flow,
//! including configuration management, error handling and the reconciliation
//! rules that derive what the profile screen shows.
//!
//! # Submodules
//!
//! - `config` - Configuration loading, saving, and management
//! - `error` - Error types and result aliases
//! - `reconcile` - Display state derivation from store contents

pub mod config;
pub mod error;
pub mod reconcile;

pub use reconcile::{reconcile, DisplayState};
