//! Media ingestion store.
//!
//! One [`MediaStore`] is constructed at startup from configuration; callers
//! hand it an uploaded file and get back a [`MediaRef`] without knowing which
//! backend is active. The three backends are mutually exclusive per
//! deployment:
//!
//! - `inline`: bytes travel with the entity row, nothing touches disk.
//! - `disk`: bytes land under `<root>/<namespace>/` with a generated
//!   timestamp-based filename.
//! - `blob`: bytes land in the same layout under a content-addressed
//!   (SHA-256) key, so duplicate uploads dedupe.
//!
//! A failed write aborts the whole request before any entity row is
//! inserted, so a stored entity never references bytes that were not
//! persisted. The reverse (bytes persisted, row insert fails) can leak a
//! file; see DESIGN.md.

use std::path::PathBuf;
use std::str::FromStr;

use bulletin_core::error::CoreError;
use bulletin_core::media::{blob_key, disk_key, MediaRef};

/// Which storage backend a deployment runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaBackendKind {
    Inline,
    Disk,
    Blob,
}

impl FromStr for MediaBackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inline" => Ok(Self::Inline),
            "disk" => Ok(Self::Disk),
            "blob" => Ok(Self::Blob),
            other => Err(format!(
                "unknown media backend '{other}', expected inline, disk, or blob"
            )),
        }
    }
}

/// A single file pulled out of a multipart request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Original filename as declared by the client (extension source only).
    pub filename: String,
    /// Declared MIME type. Never sniffed; any type is accepted.
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Persists uploaded files via the configured backend.
pub struct MediaStore {
    backend: MediaBackendKind,
    root: PathBuf,
}

impl MediaStore {
    pub fn new(backend: MediaBackendKind, root: PathBuf) -> Self {
        Self { backend, root }
    }

    pub fn backend(&self) -> MediaBackendKind {
        self.backend
    }

    /// Persist one uploaded file under the given namespace (e.g.
    /// `notification_images`) and return its stable reference.
    ///
    /// Returns `CoreError::Storage` when the backend cannot write; callers
    /// must abort entity creation on that error.
    pub async fn ingest(
        &self,
        namespace: &str,
        file: UploadedFile,
    ) -> Result<MediaRef, CoreError> {
        match self.backend {
            MediaBackendKind::Inline => Ok(MediaRef::Inline {
                data: file.bytes,
                mime: file.mime,
            }),
            MediaBackendKind::Disk => {
                let key = disk_key(namespace, &file.filename);
                self.write_bytes(&key, &file.bytes).await?;
                Ok(MediaRef::Stored { key })
            }
            MediaBackendKind::Blob => {
                let key = blob_key(namespace, &file.bytes, &file.filename);
                self.write_bytes(&key, &file.bytes).await?;
                Ok(MediaRef::Stored { key })
            }
        }
    }

    /// Write bytes to `<root>/<key>`, creating the namespace directory on
    /// first use.
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<(), CoreError> {
        let dest = self.root.join(key);
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| CoreError::Storage(format!("create {}: {e}", parent.display())))?;
        }
        tokio::fs::write(&dest, bytes)
            .await
            .map_err(|e| CoreError::Storage(format!("write {}: {e}", dest.display())))?;
        Ok(())
    }
}
