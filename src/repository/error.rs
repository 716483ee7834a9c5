// Error types for the image repository core.
// Every operation returns one of these instead of panicking past the
// crate boundary; the web layer owns the mapping to HTTP status codes.

use std::fmt;

#[derive(Debug)]
pub enum RepoError {
    /// Client-supplied data failed validation. Never retried.
    InvalidInput(String),
    /// The requested blob or preview does not exist.
    NotFound(String),
    /// Bulk export precondition failed; carries every missing name.
    MissingFiles(Vec<String>),
    /// Writing or reading the original in the blob store failed.
    Storage(String),
    /// Decoding, resampling, or encoding the preview failed.
    Derivative(String),
    /// Persisting the metadata index failed; the append did not happen.
    Index(String),
}

impl fmt::Display for RepoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
            Self::NotFound(name) => write!(f, "not found: {}", name),
            Self::MissingFiles(names) => {
                write!(f, "files do not exist: {}", names.join(", "))
            }
            Self::Storage(msg) => write!(f, "storage error: {}", msg),
            Self::Derivative(msg) => write!(f, "preview generation error: {}", msg),
            Self::Index(msg) => write!(f, "index error: {}", msg),
        }
    }
}

impl std::error::Error for RepoError {}
