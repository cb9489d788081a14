//! File types and upload records

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Supported file types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// PDF document
    Pdf,
    /// Microsoft Word document (.docx)
    Docx,
    /// Plain text file
    Txt,
    /// Unknown file type
    Unknown,
}

impl FileType {
    /// Every type with an extraction strategy
    pub const EXTRACTABLE: [FileType; 3] = [Self::Pdf, Self::Docx, Self::Txt];

    /// Detect file type from an extension, with or without the leading dot
    pub fn from_extension(ext: &str) -> Self {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "pdf" => Self::Pdf,
            "docx" => Self::Docx,
            "txt" => Self::Txt,
            _ => Self::Unknown,
        }
    }

    /// Check if this is a supported file type
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Dotted lowercase extension, empty for unknown
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => ".pdf",
            Self::Docx => ".docx",
            Self::Txt => ".txt",
            Self::Unknown => "",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF documents",
            Self::Docx => "Microsoft Word documents",
            Self::Txt => "Plain text files",
            Self::Unknown => "Unknown",
        }
    }

    /// MIME type for the extension
    pub fn mime_type(&self) -> &'static str {
        mime_guess::from_ext(self.extension().trim_start_matches('.'))
            .first_raw()
            .unwrap_or("application/octet-stream")
    }
}

/// Dotted, lowercased extension of a filename
///
/// Everything after the last `.`; empty when the name has no dot.
pub fn extension_of(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((_, ext)) => format!(".{}", ext.to_lowercase()),
        None => String::new(),
    }
}

/// A file that has been written to the upload directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedFile {
    /// Identifier, also the on-disk filename prefix
    pub id: Uuid,
    /// Original filename as uploaded by the user
    pub filename: String,
    /// File type
    pub file_type: FileType,
    /// Dotted lowercase extension
    pub extension: String,
    /// File size in bytes
    pub size: u64,
    /// Location inside the upload directory
    pub path: PathBuf,
    /// SHA-256 of the stored bytes
    pub content_hash: String,
    /// Upload timestamp
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}

impl UploadedFile {
    /// On-disk name: `{id}{extension}`
    pub fn stored_name(&self) -> String {
        format!("{}{}", self.id, self.extension)
    }
}

/// Lookup result for a stored file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredFileInfo {
    /// Identifier
    pub file_id: Uuid,
    /// On-disk filename
    pub filename: String,
    /// Full path
    #[serde(skip)]
    pub path: PathBuf,
    /// Dotted lowercase extension
    pub extension: String,
    /// Size in bytes
    pub size: u64,
    /// Whether the file was present at lookup time
    pub exists: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(FileType::from_extension(".PDF"), FileType::Pdf);
        assert_eq!(FileType::from_extension("docx"), FileType::Docx);
        assert_eq!(FileType::from_extension(".txt"), FileType::Txt);
        assert_eq!(FileType::from_extension(".csv"), FileType::Unknown);
        assert_eq!(FileType::from_extension(""), FileType::Unknown);
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("notes.TXT"), ".txt");
        assert_eq!(extension_of("report.final.Docx"), ".docx");
        assert_eq!(extension_of("README"), "");
        assert_eq!(extension_of("trailing."), ".");
    }

    #[test]
    fn test_mime_types() {
        assert_eq!(FileType::Pdf.mime_type(), "application/pdf");
        assert_eq!(FileType::Txt.mime_type(), "text/plain");
        assert_eq!(
            FileType::Docx.mime_type(),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
    }
}
