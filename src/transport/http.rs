//! HTTP transport

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use reqwest::{StatusCode, Url};
use tracing::{debug, warn};

use crate::config::HttpConfig;
use crate::discovery::error::TransportError;
use crate::transport::ResourceTransport;
use crate::transport::walk::{self, DirectoryAccess};

static HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<a\s[^>]*?href\s*=\s*["']([^"']*)["']"#).expect("valid href pattern")
});

/// Transport for repositories served over HTTP(S)
///
/// Directory listings are read from the HTML index page a server renders
/// for a directory URL (Apache, Nexus and Artifactory style listings).
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &HttpConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self { client })
    }

    fn is_missing(status: StatusCode) -> bool {
        status == StatusCode::NOT_FOUND || status == StatusCode::GONE
    }
}

#[async_trait::async_trait]
impl DirectoryAccess for HttpTransport {
    async fn list_directory(&self, directory: &str) -> Result<Vec<String>, TransportError> {
        let url = format!("{}/", directory.trim_end_matches('/'));
        debug!("Fetching directory listing {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if Self::is_missing(status) {
            return Ok(Vec::new());
        }

        if !status.is_success() {
            warn!("Directory listing returned status {}: {}", status, url);
            return Err(TransportError::Status {
                location: url,
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        parse_directory_listing(&url, &body)
    }

    async fn exists(&self, location: &str) -> Result<bool, TransportError> {
        let response = self.client.head(location).send().await?;
        let status = response.status();

        if Self::is_missing(status) {
            return Ok(false);
        }

        if !status.is_success() {
            return Err(TransportError::Status {
                location: location.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(true)
    }
}

#[async_trait::async_trait]
impl ResourceTransport for HttpTransport {
    async fn fetch(&self, location: &str) -> Result<Option<Vec<u8>>, TransportError> {
        debug!("Fetching {}", location);

        let response = self.client.get(location).send().await?;
        let status = response.status();

        if Self::is_missing(status) {
            debug!("Resource not found: {}", location);
            return Ok(None);
        }

        if !status.is_success() {
            warn!("Repository returned status {}: {}", status, location);
            return Err(TransportError::Status {
                location: location.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(Some(response.bytes().await?.to_vec()))
    }

    async fn list(&self, partial_location: &str) -> Result<Vec<String>, TransportError> {
        walk::expand(self, partial_location).await
    }
}

/// Extracts the direct children of `directory_url` from an HTML listing
///
/// Links are resolved against the directory URL; parent links, query links
/// and links outside the directory are dropped. Trailing slashes of
/// sub-directory links are removed.
pub fn parse_directory_listing(
    directory_url: &str,
    body: &str,
) -> Result<Vec<String>, TransportError> {
    let base = Url::parse(directory_url)
        .map_err(|e| TransportError::InvalidLocation(format!("{}: {}", directory_url, e)))?;
    let base_path = base.path();

    let mut names = Vec::new();
    for captures in HREF.captures_iter(body) {
        let href = &captures[1];
        if href.is_empty() || href.starts_with('?') || href.starts_with('#') {
            continue;
        }
        let Ok(resolved) = base.join(href) else {
            continue;
        };
        if resolved.host_str() != base.host_str() || resolved.port() != base.port() {
            continue;
        }
        let Some(child) = resolved.path().strip_prefix(base_path) else {
            continue;
        };
        let child = child.trim_end_matches('/');
        if child.is_empty() || child.contains('/') {
            continue;
        }
        let child = child.to_string();
        if !names.contains(&child) {
            names.push(child);
        }
    }

    Ok(names)
}
