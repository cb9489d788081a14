//! Flat upload directory with an in-memory identifier index
//!
//! Files are stored as `{uuid}{extension}`. The index maps identifiers to
//! paths so lookups do not scan the directory; the scan survives only as a
//! fallback for files the index has not seen.

use dashmap::DashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::types::{extension_of, FileType, StoredFileInfo};

/// Length of a hyphenated UUID string
const ID_LEN: usize = 36;

/// Upload directory owner
pub struct UploadStore {
    upload_dir: PathBuf,
    index: DashMap<Uuid, PathBuf>,
}

impl UploadStore {
    /// Open the upload directory, creating it if needed, and index its files
    pub fn open(upload_dir: impl Into<PathBuf>) -> Result<Self> {
        let upload_dir = upload_dir.into();
        std::fs::create_dir_all(&upload_dir).map_err(|e| {
            Error::Config(format!(
                "Failed to create upload directory {}: {}",
                upload_dir.display(),
                e
            ))
        })?;

        let store = Self {
            upload_dir,
            index: DashMap::new(),
        };
        let indexed = store.rebuild_index()?;
        tracing::info!(
            "Upload store opened at {} ({} files indexed)",
            store.upload_dir.display(),
            indexed
        );

        Ok(store)
    }

    /// Upload directory path
    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Number of indexed files
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether no files are indexed
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Whether an identifier is indexed
    pub fn contains(&self, id: &Uuid) -> bool {
        self.index.contains_key(id)
    }

    /// Generate a fresh identifier and its storage path
    ///
    /// Pure path computation; nothing is created on disk.
    pub fn resolve(&self, extension: &str) -> (Uuid, PathBuf) {
        let id = Uuid::new_v4();
        let path = self
            .upload_dir
            .join(format!("{}{}", id, extension.to_lowercase()));
        (id, path)
    }

    /// Write `data` to `path` through a temp file in the upload directory
    ///
    /// The final name only appears once the content is complete. The
    /// identifier is indexed on success.
    pub fn persist(&self, id: Uuid, path: &Path, data: &[u8]) -> Result<()> {
        let mut tmp = tempfile::Builder::new()
            .prefix(".upload-")
            .suffix(".part")
            .tempfile_in(&self.upload_dir)
            .map_err(|e| {
                Error::persistence(format!(
                    "Failed to create temp file in {}: {}",
                    self.upload_dir.display(),
                    e
                ))
            })?;

        tmp.write_all(data)
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| Error::persistence(format!("Failed to write upload {}: {}", id, e)))?;

        tmp.persist(path).map_err(|e| {
            Error::persistence(format!(
                "Failed to move upload into place at {}: {}",
                path.display(),
                e.error
            ))
        })?;

        self.index.insert(id, path.to_path_buf());
        tracing::debug!("Persisted {} ({} bytes)", path.display(), data.len());
        Ok(())
    }

    /// Remove a file written by this store and drop it from the index
    pub async fn remove(&self, id: &Uuid, path: &Path) -> Result<()> {
        self.index.remove(id);
        tokio::fs::remove_file(path).await?;
        Ok(())
    }

    /// Locate a stored file by identifier
    pub async fn find(&self, id: &Uuid) -> Result<StoredFileInfo> {
        let indexed = self.index.get(id).map(|entry| entry.value().clone());
        let path = match indexed {
            Some(path) => path,
            None => {
                let path = self
                    .scan_for(id)
                    .await?
                    .ok_or_else(|| Error::not_found(format!("File {}", id)))?;
                tracing::debug!("Indexed {} from directory scan", path.display());
                self.index.insert(*id, path.clone());
                path
            }
        };

        match tokio::fs::metadata(&path).await {
            Ok(meta) => Ok(Self::file_info(*id, path, meta.len())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                self.index.remove(id);
                Err(Error::not_found(format!("File {}", id)))
            }
            Err(e) => Err(Error::Io(e)),
        }
    }

    /// Delete a stored file by identifier
    pub async fn delete(&self, id: &Uuid) -> Result<StoredFileInfo> {
        let info = self.find(id).await?;
        match tokio::fs::remove_file(&info.path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                self.index.remove(id);
                return Err(Error::not_found(format!("File {}", id)));
            }
            Err(e) => return Err(Error::Io(e)),
        }
        self.index.remove(id);

        tracing::info!("File deleted: {}", info.path.display());
        Ok(StoredFileInfo {
            exists: false,
            ..info
        })
    }

    /// First directory entry whose name starts with the identifier
    async fn scan_for(&self, id: &Uuid) -> Result<Option<PathBuf>> {
        let prefix = id.to_string();
        let mut entries = tokio::fs::read_dir(&self.upload_dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            if entry.file_name().to_string_lossy().starts_with(&prefix)
                && entry.file_type().await?.is_file()
            {
                return Ok(Some(entry.path()));
            }
        }

        Ok(None)
    }

    fn rebuild_index(&self) -> Result<usize> {
        for entry in std::fs::read_dir(&self.upload_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(id) = parse_stored_name(&entry.file_name().to_string_lossy()) {
                self.index.insert(id, entry.path());
            }
        }
        Ok(self.index.len())
    }

    fn file_info(id: Uuid, path: PathBuf, size: u64) -> StoredFileInfo {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        StoredFileInfo {
            file_id: id,
            extension: extension_of(&filename),
            filename,
            path,
            size,
            exists: true,
        }
    }
}

/// Identifier of a `{uuid}{extension}` name with a supported extension
fn parse_stored_name(name: &str) -> Option<Uuid> {
    let (id, extension) = (name.get(..ID_LEN)?, name.get(ID_LEN..)?);
    if !extension.starts_with('.') || !FileType::from_extension(extension).is_supported() {
        return None;
    }
    Uuid::parse_str(id).ok()
}
