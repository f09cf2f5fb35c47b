//! Storage module for per-video metadata documents.
//!
//! Each video's annotations live in a single JSON document named
//! `{video_id}.json` under the library directory. Saves replace the whole
//! document; there is no partial update.

mod error;

pub use error::StorageError;

use crate::metadata::VideoMetadata;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Persistence collaborator for metadata documents.
///
/// The engine itself never performs I/O; only the approval boundary talks
/// to a store, and always with a full replacement document.
pub trait MetadataStore {
    fn load(&self, video_id: &str) -> Result<VideoMetadata, StorageError>;
    fn save(&self, video_id: &str, metadata: &VideoMetadata) -> Result<(), StorageError>;
}

/// Get the default library directory, `~/.local/share/filmroom/videos/`.
pub fn default_library_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("filmroom")
        .join("videos")
}

/// Filesystem-backed JSON store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    library_dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(library_dir: impl Into<PathBuf>) -> Self {
        Self {
            library_dir: library_dir.into(),
        }
    }

    pub fn library_dir(&self) -> &Path {
        &self.library_dir
    }

    fn document_path(&self, video_id: &str) -> Result<PathBuf, StorageError> {
        // Ids become file names; reject anything that would escape the
        // library directory.
        if video_id.is_empty() || video_id.contains(['/', '\\']) || video_id.contains("..") {
            return Err(StorageError::InvalidVideoId {
                id: video_id.to_string(),
            });
        }
        Ok(self.library_dir.join(format!("{video_id}.json")))
    }
}

impl MetadataStore for JsonFileStore {
    fn load(&self, video_id: &str) -> Result<VideoMetadata, StorageError> {
        let path = self.document_path(video_id)?;
        let content =
            std::fs::read_to_string(&path).map_err(|source| StorageError::ReadDocument {
                path: path.clone(),
                source,
            })?;
        serde_json::from_str(&content)
            .map_err(|source| StorageError::ParseDocument { path, source })
    }

    fn save(&self, video_id: &str, metadata: &VideoMetadata) -> Result<(), StorageError> {
        let path = self.document_path(video_id)?;
        std::fs::create_dir_all(&self.library_dir).map_err(|source| StorageError::CreateDir {
            path: self.library_dir.clone(),
            source,
        })?;

        let content = serde_json::to_string_pretty(metadata)?;
        std::fs::write(&path, content).map_err(|source| StorageError::WriteDocument {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), tags = metadata.tags.len(), "Metadata document saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filmroom_types::Tag;

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        let doc = VideoMetadata::from_tags(vec![Tag::point("score", 42)]);
        store.save("match_01", &doc).unwrap();

        let loaded = store.load("match_01").unwrap();
        assert_eq!(loaded, doc);
    }

    #[test]
    fn missing_document_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(matches!(
            store.load("nope"),
            Err(StorageError::ReadDocument { .. })
        ));
    }

    #[test]
    fn path_escapes_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(matches!(
            store.load("../outside"),
            Err(StorageError::InvalidVideoId { .. })
        ));
        assert!(matches!(
            store.load(""),
            Err(StorageError::InvalidVideoId { .. })
        ));
    }
}
