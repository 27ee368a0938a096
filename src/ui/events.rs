//! Screen Events Module
//!
//! Defines the values the screen controller hands back to a front end: the
//! notice returned by each intent, the events queued for the view to poll,
//! and the route payload delivered by the capture screen.

use serde::{Deserialize, Serialize};

use crate::core::error::ProfileError;
use crate::core::reconcile::DisplayState;
use crate::store::PhotoReference;

// =============================================================================
// Route Payload
// =============================================================================

/// Parameters the profile screen is opened with
///
/// The capture screen navigates here with `{ "photo_ref": "<ref>" }`; plain
/// navigation carries no photo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRoute {
    /// Freshly captured or picked photo, if any
    #[serde(default)]
    pub photo_ref: Option<PhotoReference>,
}

impl ProfileRoute {
    /// Route carrying a new candidate photo
    pub fn with_photo(photo: PhotoReference) -> Self {
        Self {
            photo_ref: Some(photo),
        }
    }
}

// =============================================================================
// Notices
// =============================================================================

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// The intent was applied
    Success,
    /// Nothing changed, but nothing went wrong either
    Info,
    /// The intent failed; display state was left as it was
    Error,
}

/// User-facing outcome of one intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity
    pub level: NoticeLevel,
    /// Short title, e.g. "Saved"
    pub title: String,
    /// Message to show the user
    pub message: String,
    /// Underlying error for failed intents
    pub error: Option<ProfileError>,
}

impl Notice {
    /// The intent was applied
    pub fn success(title: &str, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: title.to_string(),
            message: message.into(),
            error: None,
        }
    }

    /// Nothing changed
    pub fn info(title: &str, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.to_string(),
            message: message.into(),
            error: None,
        }
    }

    /// The intent failed
    pub fn failure(title: &str, error: ProfileError) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.to_string(),
            message: error.user_message(),
            error: Some(error),
        }
    }

    /// Check if the intent was applied
    pub fn is_success(&self) -> bool {
        self.level == NoticeLevel::Success
    }

    /// Check if the intent failed
    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }

    /// Whether the failed intent may succeed if retried
    pub fn is_retryable(&self) -> bool {
        self.error.as_ref().is_some_and(|e| e.is_retryable())
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

// =============================================================================
// Screen Events
// =============================================================================

/// Events queued by the controller for the view to poll
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenEvent {
    /// The display state was recomputed
    DisplayChanged {
        /// New display state
        display: DisplayState,
        /// Saved photos, in order, for the collection strip
        photos: Vec<PhotoReference>,
    },

    /// A removal is waiting for the user to confirm or cancel
    ConfirmationRequested {
        /// Photo that would be removed
        photo: PhotoReference,
    },

    /// An intent finished
    Notice(Notice),
}
