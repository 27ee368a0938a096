//! Volatile in-process photo store
//!
//! The reference store: contents live as long as the store object and are
//! lost at process exit. Each instance is independent, so tests can build as
//! many isolated stores as they need.

use super::traits::{PhotoCollection, PhotoReference, PhotoStore};
use crate::core::error::{ProfileError, Result};
use async_trait::async_trait;
use log::debug;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// In-memory photo store
#[derive(Debug, Default)]
pub struct InMemoryPhotoStore {
    collection: RwLock<PhotoCollection>,
}

impl InMemoryPhotoStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with saved photos and a current pointer
    pub fn with_photos(photos: Vec<PhotoReference>, current: Option<PhotoReference>) -> Self {
        Self {
            collection: RwLock::new(PhotoCollection::from_parts(photos, current)),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, PhotoCollection>> {
        self.collection
            .read()
            .map_err(|_| ProfileError::StoreUnavailable("in-memory store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, PhotoCollection>> {
        self.collection
            .write()
            .map_err(|_| ProfileError::StoreUnavailable("in-memory store lock poisoned".into()))
    }
}

#[async_trait]
impl PhotoStore for InMemoryPhotoStore {
    async fn add_photo(&self, photo: &PhotoReference) -> Result<()> {
        debug!("[store:memory] Adding photo: {}", photo);
        self.write()?.add(photo.clone());
        Ok(())
    }

    async fn load_all_photos(&self) -> Result<Vec<PhotoReference>> {
        let photos = self.read()?.photos().to_vec();
        debug!("[store:memory] Loaded {} photo(s)", photos.len());
        Ok(photos)
    }

    async fn set_current_photo(&self, photo: &PhotoReference) -> Result<()> {
        debug!("[store:memory] Setting current photo: {}", photo);
        self.write()?.set_current(photo.clone());
        Ok(())
    }

    async fn clear_current_photo(&self) -> Result<()> {
        debug!("[store:memory] Clearing current photo");
        self.write()?.clear_current();
        Ok(())
    }

    async fn load_current_photo(&self) -> Result<Option<PhotoReference>> {
        let current = self.read()?.current().cloned();
        debug!("[store:memory] Current photo: {:?}", current);
        Ok(current)
    }

    async fn remove_photo(&self, photo: &PhotoReference) -> Result<()> {
        debug!("[store:memory] Removing photo: {}", photo);
        self.write()?.remove(photo);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
