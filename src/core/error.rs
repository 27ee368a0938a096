//! Error types for the photo profile flow
//!
//! This module defines the error type shared by the photo store, the screen
//! controller and the capture collaborators.

use crate::store::PhotoReference;
use thiserror::Error;

/// Main error type for the photo profile flow
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    /// The storage medium could not be read or written
    #[error("Photo store unavailable: {0}")]
    StoreUnavailable(String),

    /// A photo reference is no longer part of the collection
    #[error("Photo not found: {0}")]
    NotFound(PhotoReference),

    /// Camera or gallery access was refused
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// The capture/pick collaborator failed for a reason other than permissions
    #[error("Capture failed: {0}")]
    CaptureFailed(String),

    /// A photo reference was blank or otherwise unusable
    #[error("Invalid photo reference: '{0}'")]
    InvalidReference(String),

    /// General I/O error
    #[error("IO error: {0}")]
    IoError(String),
}

impl ProfileError {
    /// Message shown to the user when an intent fails with this error
    pub fn user_message(&self) -> String {
        match self {
            ProfileError::StoreUnavailable(_) => {
                "Your photos could not be accessed right now. Please try again.".to_string()
            }
            ProfileError::NotFound(photo) => {
                format!("The photo '{}' is no longer in your collection.", photo)
            }
            ProfileError::PermissionDenied(_) => {
                "Permission is required to access your photos.".to_string()
            }
            ProfileError::CaptureFailed(reason) => {
                format!("The photo could not be captured: {}", reason)
            }
            ProfileError::InvalidReference(_) => "That photo cannot be used.".to_string(),
            ProfileError::IoError(_) => "Something went wrong. Please try again.".to_string(),
        }
    }

    /// Whether retrying the same intent may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ProfileError::StoreUnavailable(_) | ProfileError::IoError(_)
        )
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ProfileError>;

impl From<std::io::Error> for ProfileError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => ProfileError::PermissionDenied(err.to_string()),
            _ => ProfileError::IoError(err.to_string()),
        }
    }
}
