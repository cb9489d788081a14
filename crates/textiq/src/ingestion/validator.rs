//! Upload validation, run before anything touches the disk

use crate::config::UploadConfig;
use crate::error::{Error, Result};
use crate::types::{extension_of, FileType};

/// Outcome of a successful validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUpload {
    /// Detected file type
    pub file_type: FileType,
    /// Dotted lowercase extension
    pub extension: String,
}

/// Size and extension checks for incoming uploads
#[derive(Debug, Clone)]
pub struct UploadValidator {
    max_file_size: u64,
    allowed_extensions: Vec<String>,
}

impl UploadValidator {
    /// Create a validator from an explicit limit and allow-list
    pub fn new(max_file_size: u64, allowed_extensions: Vec<String>) -> Self {
        Self {
            max_file_size,
            allowed_extensions,
        }
    }

    /// Create from upload configuration
    pub fn from_config(config: &UploadConfig) -> Self {
        Self::new(config.max_file_size, config.normalized_file_types())
    }

    /// Configured size limit in bytes
    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Allow-listed extensions
    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    /// Check declared size, then the extension
    pub fn validate(&self, filename: &str, declared_size: u64) -> Result<ValidatedUpload> {
        self.check_size(declared_size)?;

        let extension = extension_of(filename);
        if !self.allowed_extensions.iter().any(|allowed| *allowed == extension) {
            return Err(Error::UnsupportedFileType(format!(
                "'{}'. Supported types: {}",
                extension,
                self.allowed_extensions.join(", ")
            )));
        }

        let file_type = FileType::from_extension(&extension);
        if !file_type.is_supported() {
            return Err(Error::UnsupportedFileType(extension));
        }

        Ok(ValidatedUpload {
            file_type,
            extension,
        })
    }

    /// Fail with `PayloadTooLarge` once `size` is over the limit
    pub fn check_size(&self, size: u64) -> Result<()> {
        if size > self.max_file_size {
            return Err(Error::PayloadTooLarge {
                size,
                max: self.max_file_size,
            });
        }
        Ok(())
    }
}
