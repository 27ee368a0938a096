//! UI Support Module
//!
//! Framework-agnostic building blocks for the profile photo screen. Any
//! shell (terminal session, desktop window, stack/tab/drawer navigation)
//! drives the same [`ScreenController`] and renders its [`DisplayState`];
//! none of them re-derives the reconciliation rules.
//!
//! # Submodules
//!
//! - [`controller`] - Screen controller turning intents into store calls
//! - [`events`] - Notices, screen events and the route payload
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use photo_profile::capture::AutoConfirmer;
//! use photo_profile::store::{InMemoryPhotoStore, PhotoReference};
//! use photo_profile::ui::{ProfileRoute, ScreenController, ScreenEvent};
//! use std::sync::Arc;
//!
//! # async fn demo() {
//! let store = Arc::new(InMemoryPhotoStore::new());
//! let mut controller = ScreenController::new(store);
//!
//! // The camera screen hands over a fresh photo
//! let route = ProfileRoute::with_photo(PhotoReference::from("file:///tmp/me.jpg"));
//! controller.open(route).await;
//!
//! if controller.can_save() {
//!     let notice = controller.save().await;
//!     println!("{}", notice);
//! }
//!
//! // Poll events in the view loop
//! for event in controller.drain_events() {
//!     if let ScreenEvent::DisplayChanged { display, .. } = event {
//!         println!("showing {:?}", display.shown_photo);
//!     }
//! }
//!
//! controller.remove_shown(&AutoConfirmer).await;
//! # }
//! ```
//!
//! [`DisplayState`]: crate::core::reconcile::DisplayState

pub mod controller;
pub mod events;

pub use controller::ScreenController;
pub use events::{Notice, NoticeLevel, ProfileRoute, ScreenEvent};
