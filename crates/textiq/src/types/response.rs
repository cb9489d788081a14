//! Response types for the HTTP layer

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::document::{FileType, StoredFileInfo};
use crate::ingestion::IngestOutcome;

/// Marker appended to truncated previews
pub const ELLIPSIS: &str = "...";

/// Cut `text` to `max_chars` characters, appending `...` when shortened
///
/// Display only; stored content is never truncated.
pub fn truncate_for_display(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{}", &text[..byte_idx], ELLIPSIS),
        None => text.to_string(),
    }
}

/// Response for POST /upload-file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileUploadResponse {
    pub file_id: Uuid,
    pub filename: String,
    pub file_type: String,
    pub file_size: u64,
    pub extracted_text: Option<String>,
    pub success: bool,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FileUploadResponse {
    /// Build from a finished ingestion, truncating the preview
    pub fn from_outcome(outcome: &IngestOutcome, preview_chars: usize) -> Self {
        Self {
            file_id: outcome.id(),
            filename: outcome.file.filename.clone(),
            file_type: outcome.extension().to_string(),
            file_size: outcome.size(),
            extracted_text: Some(truncate_for_display(&outcome.text, preview_chars)),
            success: true,
            uploaded_at: outcome.file.uploaded_at,
            message: None,
        }
    }
}

/// Response for GET /file-info/:id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileInfoResponse {
    pub file_id: Uuid,
    pub filename: String,
    pub file_type: String,
    pub file_size: u64,
    pub exists: bool,
}

impl From<StoredFileInfo> for FileInfoResponse {
    fn from(info: StoredFileInfo) -> Self {
        Self {
            file_id: info.file_id,
            filename: info.filename,
            file_type: info.extension,
            file_size: info.size,
            exists: info.exists,
        }
    }
}

/// Response for DELETE /delete-file/:id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteFileResponse {
    pub success: bool,
    pub message: String,
}

/// Response for GET /file-content/:id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileContentResponse {
    pub file_id: Uuid,
    pub content: String,
    /// Length of the stored text in characters
    pub full_length: usize,
}

impl FileContentResponse {
    pub fn new(file_id: Uuid, text: &str, preview_chars: usize) -> Self {
        Self {
            file_id,
            content: truncate_for_display(text, preview_chars),
            full_length: text.chars().count(),
        }
    }
}

/// One entry of GET /supported-file-types
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportedFileType {
    pub extension: String,
    pub description: String,
    pub mime_type: String,
}

impl From<FileType> for SupportedFileType {
    fn from(file_type: FileType) -> Self {
        Self {
            extension: file_type.extension().to_string(),
            description: file_type.display_name().to_string(),
            mime_type: file_type.mime_type().to_string(),
        }
    }
}

/// Response for GET /supported-file-types
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportedFileTypesResponse {
    pub supported_types: Vec<SupportedFileType>,
    pub max_file_size: u64,
    pub max_file_size_mb: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_untouched() {
        assert_eq!(truncate_for_display("Hello", 5), "Hello");
        assert_eq!(truncate_for_display("", 10), "");
    }

    #[test]
    fn test_truncate_long_text() {
        let text = "a".repeat(1001);
        let preview = truncate_for_display(&text, 1000);
        assert_eq!(preview.len(), 1003);
        assert!(preview.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        let text = "é".repeat(6);
        assert_eq!(truncate_for_display(&text, 5), format!("{}...", "é".repeat(5)));
    }

    #[test]
    fn test_content_response_full_length() {
        let id = Uuid::new_v4();
        let text = "x".repeat(600);
        let resp = FileContentResponse::new(id, &text, 500);
        assert_eq!(resp.full_length, 600);
        assert_eq!(resp.content.chars().count(), 503);
    }
}
