//! API routes for the ingestion server

pub mod content;
pub mod files;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::server::state::AppState;

/// Room for multipart boundaries and part headers on top of the file itself
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Build all API routes
pub fn api_routes(max_file_size: u64) -> Router<AppState> {
    let body_limit = usize::try_from(max_file_size)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        .route(
            "/upload-file",
            post(files::upload_file).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route("/file-info/:file_id", get(files::get_file_info))
        .route("/delete-file/:file_id", delete(files::delete_file))
        .route("/file-content/:file_id", get(content::get_file_content))
        .route("/supported-file-types", get(files::supported_file_types))
}

/// Parse a path identifier
///
/// Nothing is ever stored under a name that is not a UUID, so a malformed
/// identifier is reported the same way as an unknown one.
pub(crate) fn parse_file_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| Error::not_found(format!("File {}", raw)))
}
