//! Collection reconciliation
//!
//! Derives what the profile screen shows from the store contents and an
//! optional incoming candidate. The precedence is fixed:
//!
//! 1. an incoming candidate (from the camera or the gallery)
//! 2. the current photo recorded in the store
//! 3. the first saved photo
//! 4. nothing
//!
//! An incoming candidate always wins over a previously stored current photo
//! until it is saved or replaced.

use crate::store::PhotoReference;
use serde::{Deserialize, Serialize};

/// What the profile screen displays, derived and never persisted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayState {
    /// Photo shown in the main frame
    pub shown_photo: Option<PhotoReference>,
    /// The shown photo is an incoming candidate that is not in the collection
    pub is_unsaved: bool,
    /// The "save this photo" action applies
    pub show_save_action: bool,
    /// The "delete current photo" action applies
    pub show_delete_action: bool,
}

impl DisplayState {
    /// Whether a saved photo should be highlighted in the collection strip
    pub fn is_highlighted(&self, photo: &PhotoReference) -> bool {
        !self.is_unsaved && self.shown_photo.as_ref() == Some(photo)
    }

    /// Whether the screen has anything to show
    pub fn is_empty(&self) -> bool {
        self.shown_photo.is_none()
    }
}

/// Derive the display state from store contents and an optional candidate
pub fn reconcile(
    all_photos: &[PhotoReference],
    current_from_store: Option<&PhotoReference>,
    incoming: Option<&PhotoReference>,
) -> DisplayState {
    let (shown_photo, is_unsaved) = match (incoming, current_from_store) {
        (Some(candidate), _) => (Some(candidate.clone()), !all_photos.contains(candidate)),
        (None, Some(current)) => (Some(current.clone()), false),
        (None, None) => (all_photos.first().cloned(), false),
    };

    let show_save_action = is_unsaved && shown_photo.as_ref() == incoming;
    let show_delete_action = match &shown_photo {
        Some(photo) => !is_unsaved && all_photos.contains(photo),
        None => false,
    };

    DisplayState {
        shown_photo,
        is_unsaved,
        show_save_action,
        show_delete_action,
    }
}
