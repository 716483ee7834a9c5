// Defines data structures for API request and response bodies,
// using Serde for JSON serialization and deserialization.

use serde::{Deserialize, Serialize};

// Confirmation body for POST /upload.
#[derive(Serialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

// Response body for GET /list.
#[derive(Serialize, Debug)]
pub struct ListFilesResponse {
    // Every indexed original filename, in insertion order.
    pub files: Vec<String>,
}

// Request body for POST /download_multi.
#[derive(Deserialize, Debug)]
pub struct DownloadMultiRequest {
    // Filenames to pack, in the order they should appear in the archive.
    // An absent or empty list is rejected by the handler, not by serde.
    #[serde(default)]
    pub images: Vec<String>,
}

// Request body for POST /download_single.
#[derive(Deserialize, Debug)]
pub struct DownloadSingleRequest {
    // Optional so a missing field maps to a 400 rather than a
    // deserialization rejection.
    #[serde(default)]
    pub filename: Option<String>,
}
