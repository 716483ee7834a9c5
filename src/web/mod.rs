// Web server module: HTTP endpoints over the image repository.

mod app;
mod error;
mod extract_request_data;
mod handlers;
mod listeners;
mod models;

pub use app::create_app;
pub use listeners::create_listener;

use crate::repository::ImageRepository;
use std::sync::Arc;

// Maximum allowed size for upload request bodies
pub const MAX_UPLOAD_SIZE_BYTES: usize = 100 * 1024 * 1024; // 100MB

pub type SharedImageRepository = Arc<ImageRepository>;
