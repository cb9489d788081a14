//! Stored-content endpoint for the Q&A side

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::FileContentResponse;

use super::parse_file_id;

/// GET /api/v1/file-content/:file_id - Preview of the extracted text
pub async fn get_file_content(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
) -> Result<Json<FileContentResponse>> {
    let id = parse_file_id(&file_id)?;
    let text = state.registry().get(&id).await?;

    Ok(Json(FileContentResponse::new(
        id,
        &text,
        state.config().display.content_preview_chars,
    )))
}
