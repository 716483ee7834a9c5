// API handlers for the image hosting endpoints. Each handler maps 1:1 to
// a repository operation; blocking file and image work runs on the
// blocking thread pool.

use super::{
    SharedImageRepository,
    error::ApiError,
    extract_request_data::extract_upload,
    models::*,
};
use crate::repository::{EXPORT_ARCHIVE_NAME, Upload};
use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use tracing::{debug, info};
use uuid::Uuid;

// --- POST /upload ---
// Accepts a multipart image upload and runs the full ingest sequence.
pub async fn upload_image(
    State(repository): State<SharedImageRepository>,
    multipart: Multipart,
) -> Result<Json<MessageResponse>, ApiError> {
    let part = extract_upload(multipart).await?;

    let request_id = Uuid::new_v4();
    info!(
        "Upload request: filename={:?}, content_type={:?}, size={} bytes, request_id={}",
        part.filename,
        part.content_type,
        part.bytes.len(),
        request_id
    );

    let upload = Upload {
        filename: part.filename.unwrap_or_default(),
        content_type: part.content_type,
        bytes: part.bytes,
    };

    let receipt = tokio::task::spawn_blocking(move || repository.ingest(upload))
        .await
        .map_err(|e| ApiError::InternalServerError(format!("Ingest task failed: {}", e)))??;

    debug!(
        "Stored '{}' with preview '{}' (request_id={})",
        receipt.filename, receipt.thumbnail, request_id
    );

    Ok(Json(MessageResponse {
        message: "File uploaded successfully".to_string(),
    }))
}

// --- GET /preview/{filename} ---
// Serves the generated JPEG preview inline.
pub async fn preview_image(
    State(repository): State<SharedImageRepository>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    let bytes = tokio::task::spawn_blocking(move || repository.read_preview(&filename))
        .await
        .map_err(|e| ApiError::InternalServerError(format!("Preview read task failed: {}", e)))??;

    Ok(([(header::CONTENT_TYPE, "image/jpeg")], bytes).into_response())
}

// --- GET /list ---
// Lists every indexed filename.
pub async fn list_images(
    State(repository): State<SharedImageRepository>,
) -> Result<Json<ListFilesResponse>, ApiError> {
    let files = tokio::task::spawn_blocking(move || repository.list_filenames())
        .await
        .map_err(|e| ApiError::InternalServerError(format!("List task failed: {}", e)))??;

    debug!("Returning {} indexed filenames.", files.len());
    Ok(Json(ListFilesResponse { files }))
}

// --- POST /download_multi ---
// Packs the requested originals into a zip archive, all-or-nothing.
pub async fn download_multiple(
    State(repository): State<SharedImageRepository>,
    Json(payload): Json<DownloadMultiRequest>,
) -> Result<Response, ApiError> {
    if payload.images.is_empty() {
        return Err(ApiError::BadRequest(
            "No images selected for download".to_string(),
        ));
    }

    info!("Bulk download request for {} file(s)", payload.images.len());

    let archive = tokio::task::spawn_blocking(move || repository.export_zip(&payload.images))
        .await
        .map_err(|e| ApiError::InternalServerError(format!("Export task failed: {}", e)))??;

    Ok((
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_ARCHIVE_NAME),
            ),
        ],
        archive,
    )
        .into_response())
}

// --- POST /download_single ---
// Serves one original as an attachment.
pub async fn download_single(
    State(repository): State<SharedImageRepository>,
    Json(payload): Json<DownloadSingleRequest>,
) -> Result<Response, ApiError> {
    let filename = payload
        .filename
        .filter(|f| !f.is_empty())
        .ok_or_else(|| ApiError::BadRequest("No filename provided".to_string()))?;

    let requested = filename.clone();
    let bytes = tokio::task::spawn_blocking(move || repository.read_original(&requested))
        .await
        .map_err(|e| ApiError::InternalServerError(format!("Download task failed: {}", e)))??;

    Ok((
        [
            (
                header::CONTENT_TYPE,
                "application/octet-stream".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response())
}
