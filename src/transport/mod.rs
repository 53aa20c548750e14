//! Resource access for repositories
//!
//! Listers never touch the network or the file system themselves; they go
//! through a [`ResourceTransport`]. Two implementations are provided:
//!
//! - [`HttpTransport`]: `http(s)://` repositories, directory listings parsed
//!   from HTML index pages
//! - [`FileTransport`]: local directories and `file://` URLs

pub mod file;
pub mod http;
mod walk;

use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

use crate::config::HttpConfig;
use crate::discovery::error::TransportError;

pub use file::FileTransport;
pub use http::HttpTransport;

/// Reads resources from a repository
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ResourceTransport: Send + Sync {
    /// Fetches the resource at `location`
    ///
    /// # Returns
    /// * `Ok(Some(bytes))` - The resource content
    /// * `Ok(None)` - The resource does not exist
    /// * `Err(TransportError)` - The repository could not be read
    async fn fetch(&self, location: &str) -> Result<Option<Vec<u8>>, TransportError>;

    /// Enumerates resources matching a partial location
    ///
    /// Each `*` in `partial_location` matches any run of characters within
    /// one path segment. Returned names are relative to the deepest directory
    /// that precedes the first wildcard, e.g. listing
    /// `repo/com/acme/widget/*/widget-*.jar` yields `1.0/widget-1.0.jar`.
    /// A missing directory yields an empty listing.
    async fn list(&self, partial_location: &str) -> Result<Vec<String>, TransportError>;
}

/// Picks a transport for a repository URL
///
/// `http://` and `https://` URLs use [`HttpTransport`]; anything else is
/// treated as a file system location.
pub fn for_url(url: &str, config: &HttpConfig) -> Result<Arc<dyn ResourceTransport>, TransportError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(Arc::new(HttpTransport::new(config)?))
    } else {
        Ok(Arc::new(FileTransport::new()))
    }
}
