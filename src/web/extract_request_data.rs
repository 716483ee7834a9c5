use axum::extract::Multipart;
use tracing::{debug, warn};

use super::error::ApiError;

/// The `file` field of a multipart upload.
#[derive(Debug)]
pub struct UploadPart {
    /// Filename as claimed by the client, if any was sent.
    pub filename: Option<String>,
    /// Declared content type of the field, if any.
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Pulls the `file` field out of a multipart request.
///
/// Other fields are ignored; if several `file` fields are present the
/// last one wins.
pub async fn extract_upload(mut multipart: Multipart) -> Result<UploadPart, ApiError> {
    let mut part: Option<UploadPart> = None;
    let mut ignored_fields = 0;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to process multipart field: {}", e)))?
    {
        if field.name() == Some("file") {
            if part.is_some() {
                warn!("Multiple 'file' fields found in multipart request, using the last one");
            }

            let filename = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            debug!(
                "Received file {:?} with content type: {:?}",
                filename, content_type
            );

            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Failed to read file data: {}", e)))?
                .to_vec();

            if bytes.is_empty() {
                return Err(ApiError::BadRequest(
                    "Uploaded 'file' field is empty.".to_string(),
                ));
            }

            part = Some(UploadPart {
                filename,
                content_type,
                bytes,
            });
        } else {
            let field_name = field.name().unwrap_or("unnamed").to_string();
            debug!("Ignoring multipart field: {}", field_name);
            ignored_fields += 1;
        }
    }

    if ignored_fields > 0 {
        debug!(
            "Ignored {} non-file fields in multipart request",
            ignored_fields
        );
    }

    part.ok_or_else(|| ApiError::BadRequest("No file part in the request".to_string()))
}
