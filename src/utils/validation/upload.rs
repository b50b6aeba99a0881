//! The uploaded file as seen by the validator: bytes already received by the
//! transport layer, plus what the client told us about them.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::warn;

/// Capability the transport layer provides for one received file. The
/// validator only reads from it, except for `save`.
pub trait UploadHandle {
    /// Where the received bytes currently live.
    fn temp_path(&self) -> &Path;

    /// File name as sent by the client.
    fn original_name(&self) -> &str;

    /// Size in bytes as reported by the transport layer.
    fn declared_size(&self) -> u64;

    /// Client-supplied content type. Untrusted.
    fn declared_mime_type(&self) -> &str;

    /// Writes the received bytes to `destination`. Returns `false` when the
    /// copy failed.
    fn save(&self, destination: &Path) -> bool;
}

/// An upload whose bytes are already in a file on the local disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalUpload {
    temp_path: PathBuf,
    original_name: String,
    declared_size: u64,
    declared_mime_type: String,
}

impl LocalUpload {
    pub fn new(
        temp_path: impl Into<PathBuf>,
        original_name: impl Into<String>,
        declared_mime_type: impl Into<String>,
        declared_size: u64,
    ) -> Self {
        Self {
            temp_path: temp_path.into(),
            original_name: original_name.into(),
            declared_size,
            declared_mime_type: declared_mime_type.into(),
        }
    }

    /// Builds an upload for an existing file, taking the size from its
    /// metadata.
    pub fn from_path(
        temp_path: impl Into<PathBuf>,
        original_name: impl Into<String>,
        declared_mime_type: impl Into<String>,
    ) -> io::Result<Self> {
        let temp_path = temp_path.into();
        let declared_size = fs::metadata(&temp_path)?.len();
        Ok(Self::new(temp_path, original_name, declared_mime_type, declared_size))
    }
}

impl UploadHandle for LocalUpload {
    fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    fn original_name(&self) -> &str {
        &self.original_name
    }

    fn declared_size(&self) -> u64 {
        self.declared_size
    }

    fn declared_mime_type(&self) -> &str {
        &self.declared_mime_type
    }

    fn save(&self, destination: &Path) -> bool {
        match fs::copy(&self.temp_path, destination) {
            Ok(_) => true,
            Err(e) => {
                warn!(
                    "Failed to copy {} to {}: {}",
                    self.temp_path.display(),
                    destination.display(),
                    e
                );
                false
            }
        }
    }
}
