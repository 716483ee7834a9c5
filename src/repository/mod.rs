// Image repository core: blob store, preview generation, and the
// metadata index coordinated into atomic-looking operations.

mod blob_store;
mod error;
mod index;
mod sanitize;
mod thumbnail;

pub use error::RepoError;
pub use index::ImageRecord;
pub use sanitize::sanitize_filename;
pub use thumbnail::THUMBNAIL_MAX_DIM;

use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use blob_store::BlobStore;
use index::MetadataIndex;

/// File extensions accepted for upload, matched case-insensitively.
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

/// Suggested filename for bulk zip downloads.
pub const EXPORT_ARCHIVE_NAME: &str = "selected_images.zip";

/// A raw upload as handed over by the HTTP layer.
#[derive(Debug)]
pub struct Upload {
    /// Filename claimed by the client; sanitized before any use.
    pub filename: String,
    /// Declared content type, e.g. `image/png`.
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Outcome of a successful ingest.
#[derive(Debug)]
pub struct IngestReceipt {
    /// Sanitized name the image was stored and indexed under.
    pub filename: String,
    /// Name of the generated preview.
    pub thumbnail: String,
}

/// Coordinates the blob store, preview generation, and the metadata index.
///
/// All file I/O is synchronous. The index mutex turns every
/// load-append-rewrite cycle into a single critical section, so concurrent
/// ingests never lose records to interleaved whole-document rewrites.
pub struct ImageRepository {
    originals: BlobStore,
    previews: BlobStore,
    index: Mutex<MetadataIndex>,
}

impl ImageRepository {
    /// Opens (and on first run creates) the on-disk layout under `data_dir`:
    /// `uploads/`, `preview/`, and `images_info.json`.
    pub fn open(data_dir: impl AsRef<Path>) -> io::Result<Self> {
        let data_dir = data_dir.as_ref();
        std::fs::create_dir_all(data_dir)?;
        let originals = BlobStore::open(data_dir.join("uploads"))?;
        let previews = BlobStore::open(data_dir.join("preview"))?;
        let index = MetadataIndex::open(data_dir.join("images_info.json"))?;
        Ok(Self {
            originals,
            previews,
            index: Mutex::new(index),
        })
    }

    /// Runs the full ingest sequence: validate, store the original,
    /// generate the preview, then register the pair in the index.
    ///
    /// There is no rollback. A preview failure leaves the stored blob in
    /// place, and an index failure leaves both files orphaned on disk;
    /// each step reports its own error instead of downgrading. Re-ingesting
    /// an existing filename overwrites both files and appends a duplicate
    /// index entry.
    pub fn ingest(&self, upload: Upload) -> Result<IngestReceipt, RepoError> {
        let filename = validate_upload(&upload)?;

        self.originals
            .put(&filename, &upload.bytes)
            .map_err(|e| RepoError::Storage(format!("failed to store '{}': {}", filename, e)))?;

        let preview_bytes = thumbnail::generate_thumbnail(&upload.bytes)?;
        self.previews.put(&filename, &preview_bytes).map_err(|e| {
            RepoError::Derivative(format!("failed to store preview '{}': {}", filename, e))
        })?;

        {
            let index = self
                .index
                .lock()
                .map_err(|e| RepoError::Index(format!("index lock poisoned: {}", e)))?;
            index.append(ImageRecord {
                filename: filename.clone(),
                thumbnail: filename.clone(),
            })?;
        }

        Ok(IngestReceipt {
            thumbnail: filename.clone(),
            filename,
        })
    }

    /// Every indexed filename, in insertion order. No pagination.
    pub fn list_filenames(&self) -> Result<Vec<String>, RepoError> {
        let index = self
            .index
            .lock()
            .map_err(|e| RepoError::Index(format!("index lock poisoned: {}", e)))?;
        index.list_filenames()
    }

    /// Reads preview bytes directly from the preview store.
    ///
    /// Deliberately does not consult the index, so a preview orphaned by a
    /// failed index append stays fetchable.
    pub fn read_preview(&self, filename: &str) -> Result<Vec<u8>, RepoError> {
        read_from(&self.previews, filename)
    }

    /// Reads original bytes, with the same direct-store semantics as
    /// [`Self::read_preview`].
    pub fn read_original(&self, filename: &str) -> Result<Vec<u8>, RepoError> {
        read_from(&self.originals, filename)
    }

    /// Packs the requested originals into a deflate zip archive, in
    /// request order.
    ///
    /// All-or-nothing: if any requested name is absent from the blob
    /// store, every missing name is reported and no archive is produced.
    pub fn export_zip(&self, filenames: &[String]) -> Result<Vec<u8>, RepoError> {
        let mut resolved = Vec::with_capacity(filenames.len());
        let mut missing = Vec::new();
        for requested in filenames {
            match sanitize_filename(requested) {
                Some(safe) if self.originals.exists(&safe) => resolved.push(safe),
                _ => missing.push(requested.clone()),
            }
        }
        if !missing.is_empty() {
            return Err(RepoError::MissingFiles(missing));
        }

        let mut writer = zip::ZipWriter::new(io::Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);
        for name in &resolved {
            let bytes = self
                .originals
                .read(name)
                .map_err(|e| RepoError::Storage(format!("failed to read '{}': {}", name, e)))?;
            writer
                .start_file(name.as_str(), options)
                .map_err(|e| RepoError::Storage(format!("zip entry '{}' failed: {}", name, e)))?;
            writer
                .write_all(&bytes)
                .map_err(|e| RepoError::Storage(format!("zip write '{}' failed: {}", name, e)))?;
        }
        let cursor = writer
            .finish()
            .map_err(|e| RepoError::Storage(format!("failed to finalize zip: {}", e)))?;
        Ok(cursor.into_inner())
    }
}

fn read_from(store: &BlobStore, filename: &str) -> Result<Vec<u8>, RepoError> {
    let safe = match sanitize_filename(filename) {
        Some(safe) => safe,
        None => return Err(RepoError::NotFound(filename.to_string())),
    };
    if !store.exists(&safe) {
        return Err(RepoError::NotFound(safe));
    }
    store
        .read(&safe)
        .map_err(|e| RepoError::Storage(format!("failed to read '{}': {}", safe, e)))
}

/// Defense-in-depth metadata checks for the Validated ingest step: the
/// claimed filename must be non-empty with an allowed extension and the
/// declared content type's primary type must be `image`. File contents are
/// not inspected here; an undecodable body fails later at preview time.
fn validate_upload(upload: &Upload) -> Result<String, RepoError> {
    if upload.filename.trim().is_empty() {
        return Err(RepoError::InvalidInput("no filename provided".to_string()));
    }

    let extension_allowed = upload
        .filename
        .rsplit_once('.')
        .map(|(_, ext)| ALLOWED_EXTENSIONS.iter().any(|a| ext.eq_ignore_ascii_case(a)))
        .unwrap_or(false);
    if !extension_allowed {
        return Err(RepoError::InvalidInput(format!(
            "file type of '{}' is not supported",
            upload.filename
        )));
    }

    let declared = upload.content_type.as_deref().unwrap_or("");
    let is_image = declared
        .parse::<mime::Mime>()
        .map(|m| m.type_() == mime::IMAGE)
        .unwrap_or(false);
    if !is_image {
        return Err(RepoError::InvalidInput(format!(
            "content type '{}' is not an image",
            declared
        )));
    }

    sanitize_filename(&upload.filename).ok_or_else(|| {
        RepoError::InvalidInput(format!("filename '{}' is not usable", upload.filename))
    })
}
