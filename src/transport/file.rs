//! Local file system transport

use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::debug;

use crate::discovery::error::TransportError;
use crate::transport::ResourceTransport;
use crate::transport::walk::{self, DirectoryAccess};

/// Transport for repositories on the local file system
///
/// Locations are plain paths or `file://` URLs.
#[derive(Debug, Clone, Default)]
pub struct FileTransport;

impl FileTransport {
    pub fn new() -> Self {
        Self
    }

    fn to_path(location: &str) -> PathBuf {
        let path = location.strip_prefix("file://").unwrap_or(location);
        if path.is_empty() {
            PathBuf::from(".")
        } else {
            PathBuf::from(path)
        }
    }

    fn io_error(location: &str, source: std::io::Error) -> TransportError {
        TransportError::Io {
            location: location.to_string(),
            source,
        }
    }
}

#[async_trait::async_trait]
impl DirectoryAccess for FileTransport {
    async fn list_directory(&self, directory: &str) -> Result<Vec<String>, TransportError> {
        let path = Self::to_path(directory);
        let mut read_dir = match tokio::fs::read_dir(&path).await {
            Ok(read_dir) => read_dir,
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
                return Ok(Vec::new());
            }
            Err(e) => return Err(Self::io_error(directory, e)),
        };

        let mut names = Vec::new();
        while let Some(entry) = read_dir
            .next_entry()
            .await
            .map_err(|e| Self::io_error(directory, e))?
        {
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        // read_dir order is platform dependent
        names.sort();
        Ok(names)
    }

    async fn exists(&self, location: &str) -> Result<bool, TransportError> {
        tokio::fs::try_exists(Self::to_path(location))
            .await
            .map_err(|e| Self::io_error(location, e))
    }
}

#[async_trait::async_trait]
impl ResourceTransport for FileTransport {
    async fn fetch(&self, location: &str) -> Result<Option<Vec<u8>>, TransportError> {
        debug!("Reading {}", location);
        match tokio::fs::read(Self::to_path(location)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_error(location, e)),
        }
    }

    async fn list(&self, partial_location: &str) -> Result<Vec<String>, TransportError> {
        debug!("Listing {}", partial_location);
        walk::expand(self, partial_location).await
    }
}
