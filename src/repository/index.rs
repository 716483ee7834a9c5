use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::error::RepoError;

/// One entry of the metadata index.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    /// Unique identifier and relative path of the original in the blob store.
    pub filename: String,
    /// Name of the derived preview; by convention identical to `filename`.
    pub thumbnail: String,
}

/// The persisted list of known images, stored as a single JSON array.
///
/// Not internally synchronized: callers must serialize the whole
/// load-append-rewrite cycle. The repository facade holds the lock.
#[derive(Debug)]
pub struct MetadataIndex {
    path: PathBuf,
}

impl MetadataIndex {
    /// Opens the index document, creating an empty one if absent.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        if !path.exists() {
            fs::write(&path, "[]")?;
        }
        Ok(Self { path })
    }

    /// Reads every record. The full document is parsed on each call.
    pub fn load(&self) -> Result<Vec<ImageRecord>, RepoError> {
        let raw = fs::read(&self.path)
            .map_err(|e| RepoError::Index(format!("failed to read index: {}", e)))?;
        serde_json::from_slice(&raw)
            .map_err(|e| RepoError::Index(format!("index document is corrupt: {}", e)))
    }

    /// Appends a record and rewrites the whole document.
    ///
    /// On error the on-disk state may predate the record; callers must
    /// treat the append as not having happened. Duplicate filenames are
    /// appended as-is, never deduplicated.
    pub fn append(&self, record: ImageRecord) -> Result<(), RepoError> {
        let mut records = self.load()?;
        records.push(record);
        let doc = serde_json::to_vec_pretty(&records)
            .map_err(|e| RepoError::Index(format!("failed to serialize index: {}", e)))?;

        // Write to a staging file and rename over the document, so a crash
        // mid-write can never truncate the index.
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, doc)
            .map_err(|e| RepoError::Index(format!("failed to persist index: {}", e)))?;
        fs::rename(&staging, &self.path)
            .map_err(|e| RepoError::Index(format!("failed to persist index: {}", e)))
    }

    /// Projection of [`Self::load`] onto the original filenames.
    pub fn list_filenames(&self) -> Result<Vec<String>, RepoError> {
        Ok(self.load()?.into_iter().map(|r| r.filename).collect())
    }
}
