//! textiq: file ingestion and text extraction service
//!
//! Uploaded PDF, DOCX and plain-text files are validated, stored under a
//! generated identifier, and have their text extracted into a content
//! registry that the question-answering side reads from. A failed
//! extraction removes the stored file again.

pub mod config;
pub mod error;
pub mod ingestion;
pub mod registry;
pub mod server;
pub mod storage;
pub mod types;

pub use config::TextIqConfig;
pub use error::{Error, Result};
pub use ingestion::{FileParser, IngestOutcome, IngestPipeline, UploadValidator};
pub use registry::{ContentStore, InMemoryContentRegistry};
pub use storage::UploadStore;
pub use types::{FileType, StoredFileInfo, UploadedFile};
