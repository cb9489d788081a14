//! Configuration for the ingestion service

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::FileType;

/// Environment variable naming a TOML config file
pub const CONFIG_PATH_ENV: &str = "TEXTIQ_CONFIG";

/// Main service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextIqConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Upload storage and validation
    #[serde(default)]
    pub upload: UploadConfig,
    /// Response truncation thresholds
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allowed CORS origins (empty allows any origin)
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8000 }
fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://localhost:3000".to_string(),
    ]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

/// Upload configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Directory holding every uploaded file
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,
    /// Maximum file size in bytes (default: 10MB)
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    /// Allow-listed extensions, dotted and lowercase
    #[serde(default = "default_supported_file_types")]
    pub supported_file_types: Vec<String>,
}

fn default_upload_dir() -> PathBuf { PathBuf::from("uploads") }
fn default_max_file_size() -> u64 { 10 * 1024 * 1024 } // 10MB
fn default_supported_file_types() -> Vec<String> {
    vec![".pdf".to_string(), ".docx".to_string(), ".txt".to_string()]
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            max_file_size: default_max_file_size(),
            supported_file_types: default_supported_file_types(),
        }
    }
}

impl UploadConfig {
    /// Allow-list with every entry lowercased and dotted
    pub fn normalized_file_types(&self) -> Vec<String> {
        self.supported_file_types
            .iter()
            .map(|ext| {
                let ext = ext.trim().to_lowercase();
                if ext.starts_with('.') {
                    ext
                } else {
                    format!(".{}", ext)
                }
            })
            .collect()
    }
}

/// Display truncation thresholds, in characters
///
/// The upload response and the stored-content query use different limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Preview length in the upload response (default: 1000)
    #[serde(default = "default_upload_preview_chars")]
    pub upload_preview_chars: usize,
    /// Preview length in the stored-content query (default: 500)
    #[serde(default = "default_content_preview_chars")]
    pub content_preview_chars: usize,
}

fn default_upload_preview_chars() -> usize { 1000 }
fn default_content_preview_chars() -> usize { 500 }

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            upload_preview_chars: default_upload_preview_chars(),
            content_preview_chars: default_content_preview_chars(),
        }
    }
}

impl TextIqConfig {
    /// Parse a TOML config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&raw)
    }

    /// Parse TOML text
    pub fn from_toml(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| Error::Config(format!("Invalid config: {}", e)))
    }

    /// Load from `TEXTIQ_CONFIG` (if set) and apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (usually the process environment)
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("UPLOAD_DIR") {
            self.upload.upload_dir = PathBuf::from(dir);
        }
        if let Some(size) = lookup("MAX_FILE_SIZE") {
            self.upload.max_file_size = size
                .trim()
                .parse()
                .map_err(|e| Error::Config(format!("Invalid MAX_FILE_SIZE '{}': {}", size, e)))?;
        }
        if let Some(origins) = lookup("CORS_ORIGINS") {
            self.server.cors_origins = origins
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
        }
        if let Some(host) = lookup("TEXTIQ_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("TEXTIQ_PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|e| Error::Config(format!("Invalid TEXTIQ_PORT '{}': {}", port, e)))?;
        }
        Ok(())
    }

    /// Reject settings the pipeline cannot honor
    pub fn validate(&self) -> Result<()> {
        if self.upload.max_file_size == 0 {
            return Err(Error::Config("max_file_size must be greater than zero".to_string()));
        }

        let file_types = self.upload.normalized_file_types();
        if file_types.is_empty() {
            return Err(Error::Config("supported_file_types must not be empty".to_string()));
        }

        for ext in &file_types {
            if !FileType::from_extension(ext).is_supported() {
                return Err(Error::Config(format!("No extractor available for '{}'", ext)));
            }
        }

        Ok(())
    }
}
