use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::api::error;

/// Descriptor for a freshly written upload. Paths are relative to the store's
/// base directory so relocating the storage root does not invalidate
/// persisted references.
#[derive(Debug, Clone)]
pub struct StoredMedia {
    pub file_name: String,
    pub relative_path: String,
    pub size: u64,
}

/// A stored file opened for reading, plus the metadata the HTTP layer needs
/// to perform range negotiation.
#[derive(Debug)]
pub struct OpenMedia {
    pub file: std::fs::File,
    pub path: PathBuf,
    pub file_name: String,
    pub content_type: mime_guess::Mime,
    pub size: u64,
}

/// Owns the on-disk upload tree beneath `base_dir/relative_root`. No other
/// component writes files under that root.
#[derive(Debug, Clone)]
pub struct MediaStore {
    base_dir: PathBuf,
    relative_root: String,
}

impl MediaStore {
    pub fn new(base_dir: impl Into<PathBuf>, relative_root: impl Into<String>) -> Self {
        Self { base_dir: base_dir.into(), relative_root: relative_root.into() }
    }

    pub fn root(&self) -> PathBuf {
        self.base_dir.join(&self.relative_root)
    }

    /// Writes the upload under a token-prefixed name and returns its path
    /// relative to the base directory. A partial file left behind by a failed
    /// write is removed, best-effort, before the error is returned.
    pub async fn write(
        &self,
        sanitized_name: &str,
        bytes: &[u8],
    ) -> Result<StoredMedia, error::SystemError> {
        let root = self.root();
        tokio::fs::create_dir_all(&root).await?;

        let file_name = format!("{}_{}", Uuid::now_v7(), sanitized_name);
        let full_path = root.join(&file_name);

        let mut file = tokio::fs::File::create(&full_path).await?;
        let written = async {
            file.write_all(bytes).await?;
            file.flush().await
        }
        .await;

        if let Err(err) = written {
            drop(file);
            let _ = tokio::fs::remove_file(&full_path).await;
            return Err(err.into());
        }

        let relative_path = format!("{}/{}", self.relative_root, file_name);
        log::info!("Video file saved: {}", relative_path);

        Ok(StoredMedia { file_name, relative_path, size: bytes.len() as u64 })
    }

    /// Resolves a stored relative path and opens it for reading. The handle
    /// is positioned at offset 0; the content type is derived from the file
    /// extension only.
    pub async fn open(&self, relative_path: &str) -> Result<OpenMedia, error::SystemError> {
        let full_path = self.base_dir.join(relative_path);

        let metadata = match tokio::fs::metadata(&full_path).await {
            Ok(metadata) if metadata.is_file() => metadata,
            _ => {
                log::warn!("Video file not found: {}", full_path.display());
                return Err(error::SystemError::not_found("Video file not found"));
            }
        };

        let file = tokio::fs::File::open(&full_path).await?.into_std().await;
        let file_name = Path::new(relative_path)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
            .to_string();

        Ok(OpenMedia {
            file,
            content_type: content_type_for(&full_path),
            file_name,
            size: metadata.len(),
            path: full_path,
        })
    }
}

/// Best-effort content type from the file extension: mp4, avi and mov map to
/// their video types, everything else to a generic binary type.
pub fn content_type_for(path: &Path) -> mime_guess::Mime {
    mime_guess::from_path(path).first_or_octet_stream()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn write_persists_bytes_under_token_prefixed_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = MediaStore::new(dir.path(), "uploads/videos");

        let stored = store.write("clip.mp4", b"not really a video").await.unwrap();

        assert!(stored.relative_path.starts_with("uploads/videos/"));
        assert!(stored.file_name.ends_with("_clip.mp4"));
        assert_eq!(stored.size, 18);

        let on_disk = dir.path().join(&stored.relative_path);
        assert_eq!(std::fs::read(on_disk).unwrap(), b"not really a video");
    }

    #[tokio::test]
    async fn two_writes_of_the_same_name_never_collide() {
        let dir = tempfile::tempdir().unwrap();
        let store = MediaStore::new(dir.path(), "uploads/videos");

        let first = store.write("clip.mp4", b"a").await.unwrap();
        let second = store.write("clip.mp4", b"b").await.unwrap();

        assert_ne!(first.relative_path, second.relative_path);
        assert_eq!(std::fs::read_dir(store.root()).unwrap().count(), 2);
    }

    #[tokio::test]
    async fn open_round_trips_a_written_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = MediaStore::new(dir.path(), "uploads/videos");

        let stored = store.write("clip.mp4", b"payload").await.unwrap();
        let open = store.open(&stored.relative_path).await.unwrap();

        assert_eq!(open.size, 7);
        assert_eq!(open.content_type.essence_str(), "video/mp4");
        assert_eq!(open.file_name, stored.file_name);
    }

    #[tokio::test]
    async fn write_failure_leaves_storage_root_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        // Block directory creation with a plain file at the root path.
        std::fs::create_dir_all(dir.path().join("uploads")).unwrap();
        std::fs::write(dir.path().join("uploads/videos"), b"not a directory").unwrap();
        let store = MediaStore::new(dir.path(), "uploads/videos");

        let err = store.write("clip.mp4", b"payload").await.unwrap_err();
        assert!(matches!(err, crate::api::error::SystemError::IoError(_)));

        // Only the blocking entry remains; no partial file was created.
        assert_eq!(std::fs::read_dir(dir.path().join("uploads")).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn open_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = MediaStore::new(dir.path(), "uploads/videos");

        let err = store.open("uploads/videos/gone.mp4").await.unwrap_err();
        assert!(matches!(err, crate::api::error::SystemError::NotFound(_)));
    }

    #[tokio::test]
    async fn open_deleted_out_of_band_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = MediaStore::new(dir.path(), "uploads/videos");

        let stored = store.write("clip.mp4", b"payload").await.unwrap();
        std::fs::remove_file(dir.path().join(&stored.relative_path)).unwrap();

        let err = store.open(&stored.relative_path).await.unwrap_err();
        assert!(matches!(err, crate::api::error::SystemError::NotFound(_)));
    }

    #[test]
    fn content_type_mapping_matches_the_allow_list() {
        assert_eq!(content_type_for(Path::new("a.mp4")).essence_str(), "video/mp4");
        assert_eq!(content_type_for(Path::new("a.avi")).essence_str(), "video/x-msvideo");
        assert_eq!(content_type_for(Path::new("a.mov")).essence_str(), "video/quicktime");
        assert_eq!(
            content_type_for(Path::new("a.unknownext")).essence_str(),
            "application/octet-stream"
        );
    }
}
