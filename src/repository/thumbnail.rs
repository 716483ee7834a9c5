use std::io::Cursor;

use super::error::RepoError;

/// Longest allowed edge of a generated preview.
pub const THUMBNAIL_MAX_DIM: u32 = 128;

const JPEG_QUALITY: u8 = 85;

/// Produces JPEG preview bytes for an uploaded image.
///
/// The preview fits within 128x128 with the aspect ratio preserved and is
/// never upscaled past the source dimensions. Animated or paletted inputs
/// are flattened to their first frame and alpha is dropped for the JPEG
/// encode. The result is built fully in memory so a failure never leaves
/// a partial file behind.
pub fn generate_thumbnail(source: &[u8]) -> Result<Vec<u8>, RepoError> {
    let img = image::load_from_memory(source)
        .map_err(|e| RepoError::Derivative(format!("failed to decode image: {}", e)))?;

    let scaled = if img.width() <= THUMBNAIL_MAX_DIM && img.height() <= THUMBNAIL_MAX_DIM {
        img
    } else {
        img.thumbnail(THUMBNAIL_MAX_DIM, THUMBNAIL_MAX_DIM)
    };
    let rgb = scaled.to_rgb8();

    let mut buffer = Cursor::new(Vec::new());
    let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY);
    encoder
        .encode(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| RepoError::Derivative(format!("JPEG encoding failed: {}", e)))?;

    Ok(buffer.into_inner())
}
