//! Photo store module
//!
//! This module holds the photo collection and the "current photo" pointer
//! behind an async trait, so the screen controller works the same against a
//! volatile in-memory store or a JSON file on disk.
//!
//! # Submodules
//!
//! - `traits` - The `PhotoStore` contract and the `PhotoReference` handle
//! - `memory` - Volatile in-process store
//! - `json` - Store persisted as a JSON document

pub mod json;
pub mod memory;
pub mod traits;

pub use json::JsonFilePhotoStore;
pub use memory::InMemoryPhotoStore;
pub use traits::{PhotoCollection, PhotoReference, PhotoStore};

use crate::core::config::{StoreBackend, StoreConfig};
use crate::core::error::Result;
use std::sync::Arc;

/// Build the store selected in the configuration
pub fn open_store(config: &StoreConfig) -> Result<Arc<dyn PhotoStore>> {
    match config.backend {
        StoreBackend::Memory => Ok(Arc::new(InMemoryPhotoStore::new())),
        StoreBackend::Json => {
            let path = config.effective_path();
            Ok(Arc::new(JsonFilePhotoStore::open(path)?))
        }
    }
}
