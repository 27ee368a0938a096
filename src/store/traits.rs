//! Photo store abstraction
//!
//! This module defines the contract every photo store implements, allowing
//! the in-memory store, the JSON file store and the mock store used in tests
//! to be swapped without touching the screen controller.
//!
//! # Architecture
//!
//! - `PhotoReference` - Opaque handle identifying one image
//! - `PhotoCollection` - The ordered, duplicate-free collection plus the
//!   current pointer, shared by the concrete stores
//! - `PhotoStore` - Async capability the controller depends on
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use photo_profile::store::{InMemoryPhotoStore, PhotoReference, PhotoStore};
//!
//! # async fn demo() -> photo_profile::core::error::Result<()> {
//! let store = InMemoryPhotoStore::new();
//! let photo = PhotoReference::from("file:///photos/me.jpg");
//! store.add_photo(&photo).await?;
//! store.set_current_photo(&photo).await?;
//! assert_eq!(store.load_current_photo().await?, Some(photo));
//! # Ok(())
//! # }
//! ```

use crate::core::error::{ProfileError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Opaque handle identifying one image, compared by value
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoReference(String);

impl PhotoReference {
    /// Parse user or collaborator input, rejecting blank handles
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ProfileError::InvalidReference(value.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the underlying locator string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the reference and return the locator string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for PhotoReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PhotoReference {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PhotoReference {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for PhotoReference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Collection contents shared by the concrete stores
///
/// Insertion order is preserved and a reference appears at most once. The
/// current pointer is allowed to name a photo outside the collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoCollection {
    photos: Vec<PhotoReference>,
    current_photo: Option<PhotoReference>,
}

impl PhotoCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a collection from stored parts, collapsing duplicates
    pub fn from_parts(photos: Vec<PhotoReference>, current_photo: Option<PhotoReference>) -> Self {
        let mut collection = Self {
            photos: Vec::with_capacity(photos.len()),
            current_photo,
        };
        for photo in photos {
            collection.add(photo);
        }
        collection
    }

    /// Append a photo unless it is already present; returns whether it was added
    pub fn add(&mut self, photo: PhotoReference) -> bool {
        if self.photos.contains(&photo) {
            return false;
        }
        self.photos.push(photo);
        true
    }

    /// Remove a photo, clearing the current pointer if it named it
    ///
    /// Returns whether the photo was present.
    pub fn remove(&mut self, photo: &PhotoReference) -> bool {
        let before = self.photos.len();
        self.photos.retain(|p| p != photo);
        if self.current_photo.as_ref() == Some(photo) {
            self.current_photo = None;
        }
        self.photos.len() != before
    }

    /// Point the current photo at any reference, saved or not
    pub fn set_current(&mut self, photo: PhotoReference) {
        self.current_photo = Some(photo);
    }

    /// Clear the current pointer
    pub fn clear_current(&mut self) {
        self.current_photo = None;
    }

    /// Saved photos in insertion order
    pub fn photos(&self) -> &[PhotoReference] {
        &self.photos
    }

    /// The current photo, if any
    pub fn current(&self) -> Option<&PhotoReference> {
        self.current_photo.as_ref()
    }

    /// Check whether a photo is saved
    pub fn contains(&self, photo: &PhotoReference) -> bool {
        self.photos.contains(photo)
    }

    /// Number of saved photos
    pub fn len(&self) -> usize {
        self.photos.len()
    }

    /// Whether no photo is saved
    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }
}

/// Storage for the photo collection and the current-photo pointer
///
/// All operations are async so a durable backing can be swapped in without
/// changing callers. Callers must await each call before reading derived
/// state.
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Append a photo to the collection; a duplicate is a no-op
    async fn add_photo(&self, photo: &PhotoReference) -> Result<()>;

    /// Snapshot of the collection in insertion order
    async fn load_all_photos(&self) -> Result<Vec<PhotoReference>>;

    /// Set the current photo, whether or not it is in the collection
    async fn set_current_photo(&self, photo: &PhotoReference) -> Result<()>;

    /// Record that no photo is current
    async fn clear_current_photo(&self) -> Result<()>;

    /// Load the current photo, if one is set
    async fn load_current_photo(&self) -> Result<Option<PhotoReference>>;

    /// Remove a photo; clears the current pointer if it named the photo
    async fn remove_photo(&self, photo: &PhotoReference) -> Result<()>;

    /// Short backend name for logs and the CLI
    fn backend_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_blank() {
        assert!(matches!(
            PhotoReference::parse("   "),
            Err(ProfileError::InvalidReference(_))
        ));
        assert_eq!(
            PhotoReference::parse("  img1 ").unwrap(),
            PhotoReference::from("img1")
        );
    }

    #[test]
    fn test_collection_add_is_idempotent() {
        let mut once = PhotoCollection::new();
        once.add("x".into());

        let mut twice = PhotoCollection::new();
        assert!(twice.add("x".into()));
        assert!(!twice.add("x".into()));

        assert_eq!(once, twice);
        assert_eq!(twice.len(), 1);
    }

    #[test]
    fn test_collection_remove_clears_matching_pointer() {
        let mut collection = PhotoCollection::new();
        collection.add("a".into());
        collection.add("b".into());
        collection.set_current("b".into());

        assert!(collection.remove(&"a".into()));
        assert_eq!(collection.current(), Some(&PhotoReference::from("b")));

        assert!(collection.remove(&"b".into()));
        assert_eq!(collection.current(), None);
        assert!(collection.is_empty());
    }

    #[test]
    fn test_collection_remove_absent_is_noop() {
        let mut collection = PhotoCollection::new();
        collection.add("a".into());
        collection.set_current("a".into());

        assert!(!collection.remove(&"zzz".into()));
        assert_eq!(collection.photos(), &[PhotoReference::from("a")]);
        assert_eq!(collection.current(), Some(&PhotoReference::from("a")));
    }

    #[test]
    fn test_from_parts_collapses_duplicates() {
        let collection = PhotoCollection::from_parts(
            vec!["a".into(), "b".into(), "a".into()],
            Some("b".into()),
        );
        assert_eq!(
            collection.photos(),
            &[PhotoReference::from("a"), PhotoReference::from("b")]
        );
        assert_eq!(collection.current(), Some(&PhotoReference::from("b")));
    }

    #[test]
    fn test_reference_serializes_as_plain_string() {
        let json = serde_json::to_string(&PhotoReference::from("img1")).unwrap();
        assert_eq!(json, "\"img1\"");
    }
}
