//! Core types for the ingestion service

pub mod document;
pub mod response;

pub use document::{extension_of, FileType, StoredFileInfo, UploadedFile};
pub use response::{
    truncate_for_display, DeleteFileResponse, FileContentResponse, FileInfoResponse,
    FileUploadResponse, SupportedFileType, SupportedFileTypesResponse,
};
