//! Filesystem-backed photo picker
//!
//! Stands in for the gallery picker: the "selection" is a path on disk. The
//! picked file must exist and carry an image extension; the resulting
//! reference is the canonical path.

use super::traits::PhotoSource;
use crate::core::error::{ProfileError, Result};
use crate::store::PhotoReference;
use async_trait::async_trait;
use log::{debug, warn};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File extensions accepted as photos
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "heic", "heif", "webp", "gif"];

/// Check if a path has an accepted image extension
pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let lower = e.to_lowercase();
            IMAGE_EXTENSIONS.contains(&lower.as_str())
        })
        .unwrap_or(false)
}

/// Picks a photo from a path selected by the user
#[derive(Debug, Clone)]
pub struct FilePhotoPicker {
    selection: Option<PathBuf>,
}

impl FilePhotoPicker {
    /// Picker that returns the given path
    ///
    /// A blank path counts as the user closing the picker.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        let selection = if path.as_os_str().is_empty() {
            None
        } else {
            Some(path)
        };
        Self { selection }
    }

    /// Picker whose user backed out without choosing
    pub fn cancelled() -> Self {
        Self { selection: None }
    }

    /// Resolve a path into a photo reference
    pub fn resolve(path: &Path) -> Result<PhotoReference> {
        let canonical = path.canonicalize().map_err(|e| match e.kind() {
            ErrorKind::PermissionDenied => {
                ProfileError::PermissionDenied(format!("{}: {}", path.display(), e))
            }
            _ => ProfileError::CaptureFailed(format!("{}: {}", path.display(), e)),
        })?;

        if !canonical.is_file() {
            return Err(ProfileError::CaptureFailed(format!(
                "{} is not a file",
                canonical.display()
            )));
        }

        if !is_image_path(&canonical) {
            return Err(ProfileError::CaptureFailed(format!(
                "{} is not a supported image ({})",
                canonical.display(),
                IMAGE_EXTENSIONS.join(", ")
            )));
        }

        // Opening proves read access before the reference reaches the store.
        std::fs::File::open(&canonical)?;

        PhotoReference::parse(&canonical.to_string_lossy())
    }
}

#[async_trait]
impl PhotoSource for FilePhotoPicker {
    async fn acquire(&self) -> Result<Option<PhotoReference>> {
        let Some(path) = &self.selection else {
            debug!("Picker closed without a selection");
            return Ok(None);
        };

        match Self::resolve(path) {
            Ok(photo) => {
                debug!("Picked photo: {}", photo);
                Ok(Some(photo))
            }
            Err(e) => {
                warn!("Could not pick {}: {}", path.display(), e);
                Err(e)
            }
        }
    }

    fn source_name(&self) -> &'static str {
        "file-picker"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_is_image_path() {
        assert!(is_image_path(Path::new("me.jpg")));
        assert!(is_image_path(Path::new("ME.JPEG")));
        assert!(is_image_path(Path::new("/a/b/c.heic")));
        assert!(!is_image_path(Path::new("notes.txt")));
        assert!(!is_image_path(Path::new("no_extension")));
    }

    #[tokio::test]
    async fn test_picks_existing_image() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("selfie.jpg");
        fs::write(&path, b"\xFF\xD8\xFF").unwrap();

        let photo = FilePhotoPicker::new(&path).acquire().await.unwrap().unwrap();
        assert_eq!(
            photo.as_str(),
            path.canonicalize().unwrap().to_string_lossy()
        );
    }

    #[tokio::test]
    async fn test_blank_selection_is_cancellation() {
        assert_eq!(FilePhotoPicker::new("").acquire().await.unwrap(), None);
        assert_eq!(FilePhotoPicker::cancelled().acquire().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_missing_file_is_capture_failure() {
        let temp_dir = TempDir::new().unwrap();
        let result = FilePhotoPicker::new(temp_dir.path().join("gone.png"))
            .acquire()
            .await;
        assert!(matches!(result, Err(ProfileError::CaptureFailed(_))));
    }

    #[tokio::test]
    async fn test_non_image_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.txt");
        fs::write(&path, "hello").unwrap();

        let result = FilePhotoPicker::new(&path).acquire().await;
        assert!(matches!(result, Err(ProfileError::CaptureFailed(_))));
    }

    #[tokio::test]
    async fn test_directory_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("album.jpg");
        fs::create_dir(&dir).unwrap();

        let result = FilePhotoPicker::new(&dir).acquire().await;
        assert!(matches!(result, Err(ProfileError::CaptureFailed(_))));
    }
}
