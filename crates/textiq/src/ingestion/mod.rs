//! Document ingestion: validation, text extraction and the pipeline tying
//! them to storage and the content registry

mod parser;
mod processor;
mod validator;

pub use parser::FileParser;
pub use processor::{IngestOutcome, IngestPipeline};
pub use validator::{UploadValidator, ValidatedUpload};
