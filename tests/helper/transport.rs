//! Transport test utilities

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use version_discovery::discovery::TransportError;
use version_discovery::transport::ResourceTransport;

/// In-memory transport recording every request it receives
#[derive(Default)]
pub struct MockTransport {
    resources: HashMap<String, Vec<u8>>,
    listings: HashMap<String, Vec<String>>,
    failing: HashMap<String, u16>,
    requests: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resource(mut self, location: &str, content: &str) -> Self {
        self.resources
            .insert(location.to_string(), content.as_bytes().to_vec());
        self
    }

    pub fn with_listing(mut self, partial_location: &str, entries: Vec<&str>) -> Self {
        self.listings.insert(
            partial_location.to_string(),
            entries.into_iter().map(|e| e.to_string()).collect(),
        );
        self
    }

    pub fn with_failure(mut self, location: &str, status: u16) -> Self {
        self.failing.insert(location.to_string(), status);
        self
    }

    /// Locations requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, location: &str) -> Result<(), TransportError> {
        self.requests.lock().unwrap().push(location.to_string());
        match self.failing.get(location) {
            Some(status) => Err(TransportError::Status {
                location: location.to_string(),
                status: *status,
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ResourceTransport for MockTransport {
    async fn fetch(&self, location: &str) -> Result<Option<Vec<u8>>, TransportError> {
        self.record(location)?;
        Ok(self.resources.get(location).cloned())
    }

    async fn list(&self, partial_location: &str) -> Result<Vec<String>, TransportError> {
        self.record(partial_location)?;
        Ok(self
            .listings
            .get(partial_location)
            .cloned()
            .unwrap_or_default())
    }
}
