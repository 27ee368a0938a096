//! Mock photo store for testing failure handling
//!
//! Wraps an [`InMemoryPhotoStore`] and lets tests make individual operations
//! fail, or the whole medium unavailable, while recording every call in
//! issue order.

use crate::core::error::{ProfileError, Result};
use crate::store::{InMemoryPhotoStore, PhotoReference, PhotoStore};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Store operations, as recorded by the mock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    /// `add_photo`
    Add,
    /// `load_all_photos`
    LoadAll,
    /// `set_current_photo`
    SetCurrent,
    /// `clear_current_photo`
    ClearCurrent,
    /// `load_current_photo`
    LoadCurrent,
    /// `remove_photo`
    Remove,
}

impl StoreOperation {
    /// Check if the operation mutates the store
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            StoreOperation::Add
                | StoreOperation::SetCurrent
                | StoreOperation::ClearCurrent
                | StoreOperation::Remove
        )
    }
}

/// Photo store with switchable failures
#[derive(Debug, Default)]
pub struct MockPhotoStore {
    /// Backing store holding the actual contents
    inner: InMemoryPhotoStore,
    /// Every operation fails while set
    unavailable: AtomicBool,
    /// Operations that fail while listed
    failing: Mutex<HashSet<StoreOperation>>,
    /// Operations in issue order
    log: Mutex<Vec<StoreOperation>>,
}

impl MockPhotoStore {
    /// Create an empty mock store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock store pre-filled with photos and a current pointer
    pub fn with_photos(photos: Vec<PhotoReference>, current: Option<PhotoReference>) -> Self {
        Self {
            inner: InMemoryPhotoStore::with_photos(photos, current),
            ..Default::default()
        }
    }

    /// Make every operation fail (or succeed again)
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Make one kind of operation fail (or succeed again)
    pub fn fail_on(&self, operation: StoreOperation, fail: bool) {
        if let Ok(mut failing) = self.failing.lock() {
            if fail {
                failing.insert(operation);
            } else {
                failing.remove(&operation);
            }
        }
    }

    /// Operations issued so far
    pub fn operations(&self) -> Vec<StoreOperation> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    /// Forget the recorded operations
    pub fn clear_operations(&self) {
        if let Ok(mut log) = self.log.lock() {
            log.clear();
        }
    }

    fn check(&self, operation: StoreOperation) -> Result<()> {
        if let Ok(mut log) = self.log.lock() {
            log.push(operation);
        }

        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ProfileError::StoreUnavailable(
                "mock store is unavailable".into(),
            ));
        }

        let fails = self
            .failing
            .lock()
            .map(|failing| failing.contains(&operation))
            .unwrap_or(false);
        if fails {
            return Err(ProfileError::StoreUnavailable(format!(
                "simulated failure of {:?}",
                operation
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl PhotoStore for MockPhotoStore {
    async fn add_photo(&self, photo: &PhotoReference) -> Result<()> {
        self.check(StoreOperation::Add)?;
        self.inner.add_photo(photo).await
    }

    async fn load_all_photos(&self) -> Result<Vec<PhotoReference>> {
        self.check(StoreOperation::LoadAll)?;
        self.inner.load_all_photos().await
    }

    async fn set_current_photo(&self, photo: &PhotoReference) -> Result<()> {
        self.check(StoreOperation::SetCurrent)?;
        self.inner.set_current_photo(photo).await
    }

    async fn clear_current_photo(&self) -> Result<()> {
        self.check(StoreOperation::ClearCurrent)?;
        self.inner.clear_current_photo().await
    }

    async fn load_current_photo(&self) -> Result<Option<PhotoReference>> {
        self.check(StoreOperation::LoadCurrent)?;
        self.inner.load_current_photo().await
    }

    async fn remove_photo(&self, photo: &PhotoReference) -> Result<()> {
        self.check(StoreOperation::Remove)?;
        self.inner.remove_photo(photo).await
    }

    fn backend_name(&self) -> &'static str {
        "mock"
    }
}
