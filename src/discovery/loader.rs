//! Loads `maven-metadata.xml` documents through a transport

use std::sync::Arc;

use tracing::debug;

use crate::discovery::error::DiscoveryError;
use crate::discovery::metadata::MetadataDocument;
use crate::transport::ResourceTransport;

/// Outcome of a metadata lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataLookup {
    Found(MetadataDocument),
    /// No metadata is published at the location
    NotFound { location: String },
}

/// Fetches and parses metadata documents
#[derive(Clone)]
pub struct MetadataLoader {
    transport: Arc<dyn ResourceTransport>,
}

impl MetadataLoader {
    pub fn new(transport: Arc<dyn ResourceTransport>) -> Self {
        Self { transport }
    }

    pub async fn load(&self, location: &str) -> Result<MetadataLookup, DiscoveryError> {
        let bytes = self
            .transport
            .fetch(location)
            .await
            .map_err(|e| DiscoveryError::transport(location, e))?;

        let Some(bytes) = bytes else {
            return Ok(MetadataLookup::NotFound {
                location: location.to_string(),
            });
        };

        let document =
            MetadataDocument::parse(&bytes).map_err(|source| DiscoveryError::Parse {
                location: location.to_string(),
                source,
            })?;

        debug!(
            "Loaded {} versions of {}:{} from {}",
            document.versions().len(),
            document.organisation(),
            document.module(),
            location
        );

        Ok(MetadataLookup::Found(document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::error::TransportError;
    use crate::transport::MockResourceTransport;

    const LOCATION: &str = "https://repo.example.com/com/acme/widget/maven-metadata.xml";

    fn loader_returning(
        result: impl Fn() -> Result<Option<Vec<u8>>, TransportError> + Send + Sync + 'static,
    ) -> MetadataLoader {
        let mut transport = MockResourceTransport::new();
        transport
            .expect_fetch()
            .times(1)
            .returning(move |location| {
                assert_eq!(location, LOCATION);
                result()
            });
        MetadataLoader::new(Arc::new(transport))
    }

    #[tokio::test]
    async fn load_returns_parsed_document() {
        let loader = loader_returning(|| {
            Ok(Some(
                br#"<metadata>
  <groupId>com.acme</groupId>
  <artifactId>widget</artifactId>
  <versioning>
    <latest>1.1</latest>
    <versions><version>1.0</version><version>1.1</version></versions>
  </versioning>
</metadata>"#
                    .to_vec(),
            ))
        });

        let result = loader.load(LOCATION).await.unwrap();

        let MetadataLookup::Found(document) = result else {
            panic!("expected a document");
        };
        assert_eq!(document.versions(), ["1.0", "1.1"]);
        assert_eq!(document.latest(), Some("1.1"));
    }

    #[tokio::test]
    async fn load_reports_not_found_as_value() {
        let loader = loader_returning(|| Ok(None));

        let result = loader.load(LOCATION).await.unwrap();

        assert_eq!(
            result,
            MetadataLookup::NotFound {
                location: LOCATION.to_string()
            }
        );
    }

    #[tokio::test]
    async fn load_wraps_transport_failure_with_location() {
        let loader = loader_returning(|| {
            Err(TransportError::Status {
                location: LOCATION.to_string(),
                status: 500,
            })
        });

        let result = loader.load(LOCATION).await;

        assert!(matches!(
            result,
            Err(DiscoveryError::Transport { location, source: TransportError::Status { status: 500, .. } })
                if location == LOCATION
        ));
    }

    #[tokio::test]
    async fn load_wraps_parse_failure_with_location() {
        let loader = loader_returning(|| Ok(Some(b"<metadata><groupId>".to_vec())));

        let result = loader.load(LOCATION).await;

        assert!(matches!(
            result,
            Err(DiscoveryError::Parse { location, .. }) if location == LOCATION
        ));
    }
}
