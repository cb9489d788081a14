//! Upload, lookup and deletion endpoints

use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use bytes::BytesMut;

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{
    DeleteFileResponse, FileInfoResponse, FileType, FileUploadResponse, SupportedFileType,
    SupportedFileTypesResponse,
};

use super::parse_file_id;

/// Multipart field carrying the upload
const FILE_FIELD: &str = "file";

/// POST /api/v1/upload-file - Store a file and extract its text
///
/// The body is read chunk by chunk and rejected as soon as it passes the
/// size limit, so oversize uploads never reach the disk.
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<FileUploadResponse>> {
    let validator = state.pipeline().validator();
    let max = validator.max_file_size();

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max, 0))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .filter(|name| !name.is_empty())
            .map(|name| name.to_string())
            .ok_or_else(|| Error::BadRequest("No filename provided".to_string()))?;

        // Reject unsupported types before reading the body
        validator.validate(&filename, 0)?;

        let mut data = BytesMut::new();
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| multipart_error(e, max, data.len() as u64))?
        {
            validator.check_size((data.len() + chunk.len()) as u64)?;
            data.extend_from_slice(&chunk);
        }

        let data = data.freeze();
        let outcome = state
            .pipeline()
            .ingest(&filename, data.len() as u64, data)
            .await?;

        return Ok(Json(FileUploadResponse::from_outcome(
            &outcome,
            state.config().display.upload_preview_chars,
        )));
    }

    Err(Error::BadRequest(format!(
        "Missing multipart field '{}'",
        FILE_FIELD
    )))
}

/// Map a multipart read failure, keeping body-limit hits as 413
fn multipart_error(e: MultipartError, max: u64, received: u64) -> Error {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        Error::PayloadTooLarge {
            size: received.max(max.saturating_add(1)),
            max,
        }
    } else {
        Error::BadRequest(format!("Failed to read multipart body: {}", e.body_text()))
    }
}

/// GET /api/v1/file-info/:file_id - Stored file metadata
pub async fn get_file_info(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
) -> Result<Json<FileInfoResponse>> {
    let id = parse_file_id(&file_id)?;
    let info = state.store().find(&id).await?;
    Ok(Json(FileInfoResponse::from(info)))
}

/// DELETE /api/v1/delete-file/:file_id - Remove a stored file
///
/// Extracted text stays in the content registry.
pub async fn delete_file(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
) -> Result<Json<DeleteFileResponse>> {
    let id = parse_file_id(&file_id)?;
    state.store().delete(&id).await?;

    Ok(Json(DeleteFileResponse {
        success: true,
        message: format!("File {} deleted successfully", id),
    }))
}

/// GET /api/v1/supported-file-types - Accepted extensions and size limit
pub async fn supported_file_types(
    State(state): State<AppState>,
) -> Json<SupportedFileTypesResponse> {
    let validator = state.pipeline().validator();
    let supported_types = validator
        .allowed_extensions()
        .iter()
        .map(|ext| FileType::from_extension(ext))
        .filter(FileType::is_supported)
        .map(SupportedFileType::from)
        .collect();

    let max_file_size = validator.max_file_size();
    Json(SupportedFileTypesResponse {
        supported_types,
        max_file_size,
        max_file_size_mb: max_file_size as f64 / 1024.0 / 1024.0,
    })
}
