//! Photo store persisted as a JSON document
//!
//! The document holds the saved photos in insertion order and the current
//! photo, with absence written as `null`:
//!
//! ```json
//! {
//!   "version": 1,
//!   "photos": ["file:///photos/a.jpg", "file:///photos/b.jpg"],
//!   "current_photo": null
//! }
//! ```
//!
//! Every mutation is applied to a copy of the collection, written to a
//! temporary file that replaces the document by rename, and only then
//! committed in memory. A failed write leaves both the file and the
//! in-memory state as they were.

use super::traits::{PhotoCollection, PhotoReference, PhotoStore};
use crate::core::error::{ProfileError, Result};
use async_trait::async_trait;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tempfile::NamedTempFile;

/// Version of the store document format
const STORE_FORMAT_VERSION: u32 = 1;

/// On-disk layout of the store
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreDocument {
    /// Version of the document format
    version: u32,

    /// Saved photos in insertion order
    #[serde(default)]
    photos: Vec<PhotoReference>,

    /// Current photo, `null` when none is set
    #[serde(default)]
    current_photo: Option<PhotoReference>,
}

impl From<&PhotoCollection> for StoreDocument {
    fn from(collection: &PhotoCollection) -> Self {
        Self {
            version: STORE_FORMAT_VERSION,
            photos: collection.photos().to_vec(),
            current_photo: collection.current().cloned(),
        }
    }
}

/// Photo store backed by a JSON file
#[derive(Debug)]
pub struct JsonFilePhotoStore {
    path: PathBuf,
    collection: RwLock<PhotoCollection>,
}

impl JsonFilePhotoStore {
    /// Open the store at `path`, starting empty if the file does not exist
    ///
    /// A file that exists but cannot be read or parsed is reported as
    /// `StoreUnavailable` instead of being replaced.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let collection = if path.exists() {
            let collection = Self::load_document(&path)?;
            info!(
                "Loaded photo store from {} ({} photo(s))",
                path.display(),
                collection.len()
            );
            collection
        } else {
            debug!(
                "No photo store at {}, starting with an empty collection",
                path.display()
            );
            PhotoCollection::new()
        };

        Ok(Self {
            path,
            collection: RwLock::new(collection),
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_document(path: &Path) -> Result<PhotoCollection> {
        let file = File::open(path).map_err(|e| {
            ProfileError::StoreUnavailable(format!("Failed to open photo store: {}", e))
        })?;

        let document: StoreDocument =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| {
                ProfileError::StoreUnavailable(format!("Failed to parse photo store: {}", e))
            })?;

        if document.version != STORE_FORMAT_VERSION {
            warn!(
                "Photo store {} has format version {}, expected {}",
                path.display(),
                document.version,
                STORE_FORMAT_VERSION
            );
        }

        Ok(PhotoCollection::from_parts(
            document.photos,
            document.current_photo,
        ))
    }

    fn write_document(&self, collection: &PhotoCollection) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    ProfileError::StoreUnavailable(format!(
                        "Failed to create photo store directory: {}",
                        e
                    ))
                })?;
            }
        }

        let document = StoreDocument::from(collection);
        replace_file(&self.path, |writer| {
            serde_json::to_writer_pretty(writer, &document).map_err(io::Error::from)
        })
        .map_err(|e| {
            ProfileError::StoreUnavailable(format!("Failed to write photo store: {}", e))
        })?;

        debug!("Saved photo store to: {}", self.path.display());
        Ok(())
    }

    fn snapshot(&self) -> Result<PhotoCollection> {
        self.collection
            .read()
            .map(|c| c.clone())
            .map_err(|_| ProfileError::StoreUnavailable("photo store lock poisoned".into()))
    }

    /// Apply `change` to a copy, persist it, then commit
    fn mutate<F>(&self, change: F) -> Result<()>
    where
        F: FnOnce(&mut PhotoCollection),
    {
        let mut guard = self
            .collection
            .write()
            .map_err(|_| ProfileError::StoreUnavailable("photo store lock poisoned".into()))?;

        let mut next = guard.clone();
        change(&mut next);
        if next == *guard {
            return Ok(());
        }

        self.write_document(&next)?;
        *guard = next;
        Ok(())
    }
}

/// Replace `path` with the bytes produced by `write`
///
/// The bytes go to a temporary file in the same directory, which is flushed,
/// synced and then renamed over `path`. On any error the temporary file is
/// dropped and `path` keeps its previous contents.
fn replace_file<F>(path: &Path, write: F) -> io::Result<()>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        write(&mut writer)?;
        writer.flush()?;
    }
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[async_trait]
impl PhotoStore for JsonFilePhotoStore {
    async fn add_photo(&self, photo: &PhotoReference) -> Result<()> {
        debug!("[store:json] Adding photo: {}", photo);
        self.mutate(|c| {
            c.add(photo.clone());
        })
    }

    async fn load_all_photos(&self) -> Result<Vec<PhotoReference>> {
        Ok(self.snapshot()?.photos().to_vec())
    }

    async fn set_current_photo(&self, photo: &PhotoReference) -> Result<()> {
        debug!("[store:json] Setting current photo: {}", photo);
        self.mutate(|c| c.set_current(photo.clone()))
    }

    async fn clear_current_photo(&self) -> Result<()> {
        debug!("[store:json] Clearing current photo");
        self.mutate(|c| c.clear_current())
    }

    async fn load_current_photo(&self) -> Result<Option<PhotoReference>> {
        Ok(self.snapshot()?.current().cloned())
    }

    async fn remove_photo(&self, photo: &PhotoReference) -> Result<()> {
        debug!("[store:json] Removing photo: {}", photo);
        self.mutate(|c| {
            c.remove(photo);
        })
    }

    fn backend_name(&self) -> &'static str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_opens_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFilePhotoStore::open(temp_dir.path().join("photos.json")).unwrap();

        assert!(store.load_all_photos().await.unwrap().is_empty());
        assert_eq!(store.load_current_photo().await.unwrap(), None);
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_contents_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("photos.json");

        {
            let store = JsonFilePhotoStore::open(&path).unwrap();
            store.add_photo(&"img1".into()).await.unwrap();
            store.add_photo(&"img2".into()).await.unwrap();
            store.set_current_photo(&"img2".into()).await.unwrap();
        }

        let reopened = JsonFilePhotoStore::open(&path).unwrap();
        assert_eq!(
            reopened.load_all_photos().await.unwrap(),
            vec![PhotoReference::from("img1"), PhotoReference::from("img2")]
        );
        assert_eq!(
            reopened.load_current_photo().await.unwrap(),
            Some(PhotoReference::from("img2"))
        );
    }

    #[tokio::test]
    async fn test_absence_is_written_as_null() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("photos.json");
        let store = JsonFilePhotoStore::open(&path).unwrap();

        store.add_photo(&"img1".into()).await.unwrap();
        store.set_current_photo(&"img1".into()).await.unwrap();
        store.clear_current_photo().await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(raw["current_photo"].is_null());
        assert_eq!(raw["photos"][0], "img1");
        assert_eq!(raw["version"], 1);
    }

    #[tokio::test]
    async fn test_remove_clears_pointer_on_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("photos.json");
        let store = JsonFilePhotoStore::open(&path).unwrap();

        store.add_photo(&"x".into()).await.unwrap();
        store.set_current_photo(&"x".into()).await.unwrap();
        store.remove_photo(&"x".into()).await.unwrap();

        let reopened = JsonFilePhotoStore::open(&path).unwrap();
        assert_eq!(reopened.load_current_photo().await.unwrap(), None);
        assert!(reopened.load_all_photos().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupted_file_is_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("photos.json");
        let mut file = File::create(&path).unwrap();
        file.write_all(b"{ not json").unwrap();

        assert!(matches!(
            JsonFilePhotoStore::open(&path),
            Err(ProfileError::StoreUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_failed_write_leaves_state_untouched() {
        let temp_dir = TempDir::new().unwrap();
        // A directory where the file should be makes every write fail.
        let path = temp_dir.path().join("photos.json");
        fs::create_dir(&path).unwrap();
        let store = JsonFilePhotoStore {
            path: path.clone(),
            collection: RwLock::new(PhotoCollection::new()),
        };

        let result = store.add_photo(&"img1".into()).await;

        assert!(matches!(result, Err(ProfileError::StoreUnavailable(_))));
        assert!(store.load_all_photos().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_interrupted_write_keeps_previous_bytes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("photos.json");
        let store = JsonFilePhotoStore::open(&path).unwrap();
        store.add_photo(&"img1".into()).await.unwrap();
        store.set_current_photo(&"img1".into()).await.unwrap();
        let before = fs::read(&path).unwrap();

        // Half a document reaches the temporary file before the writer fails.
        let result = replace_file(&path, |writer| {
            writer.write_all(b"{\"version\": 1, \"photos\": [")?;
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        });

        assert!(result.is_err());
        assert_eq!(fs::read(&path).unwrap(), before);
        let entries: Vec<_> = fs::read_dir(temp_dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);

        let reopened = JsonFilePhotoStore::open(&path).unwrap();
        assert_eq!(
            reopened.load_current_photo().await.unwrap(),
            Some("img1".into())
        );
    }

    #[tokio::test]
    async fn test_successful_write_leaves_no_temp_files() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("photos.json");
        let store = JsonFilePhotoStore::open(&path).unwrap();

        store.add_photo(&"img1".into()).await.unwrap();
        store.add_photo(&"img2".into()).await.unwrap();

        let names: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("photos.json")]);
    }

    #[tokio::test]
    async fn test_duplicate_entries_collapse_on_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("photos.json");
        fs::write(
            &path,
            r#"{"version":1,"photos":["a","b","a"],"current_photo":"b"}"#,
        )
        .unwrap();

        let store = JsonFilePhotoStore::open(&path).unwrap();
        assert_eq!(
            store.load_all_photos().await.unwrap(),
            vec![PhotoReference::from("a"), PhotoReference::from("b")]
        );
    }
}
