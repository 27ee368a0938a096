//! Capture and confirmation collaborators
//!
//! The screen controller never talks to a camera, a gallery or a dialog
//! directly. It consumes the traits defined here, and the front end picks
//! the implementations.
//!
//! # Submodules
//!
//! - `traits` - `PhotoSource` and `RemovalConfirmer` contracts
//! - `picker` - Filesystem-backed photo picker
//! - `prompt` - Terminal prompts built on dialoguer

pub mod picker;
pub mod prompt;
pub mod traits;

pub use picker::FilePhotoPicker;
pub use prompt::{AutoConfirmer, PromptPhotoPicker, TerminalConfirmer};
pub use traits::{Confirmation, PhotoSource, RemovalConfirmer};
