//! Directory listing based version lister

use std::sync::Arc;

use tracing::debug;

use crate::discovery::coordinate::{ArtifactDescriptor, ModuleCoordinate};
use crate::discovery::error::DiscoveryError;
use crate::discovery::lister::{RepositoryLayout, VersionLister};
use crate::discovery::pattern::{self, PatternToken};
use crate::discovery::types::VersionList;
use crate::transport::ResourceTransport;

/// Lists versions by enumerating the resources a pattern can resolve to
///
/// Every token but `[revision]` is substituted, the repository is asked for
/// the resources matching the remaining wildcard, and the revision is read
/// back out of each resource name. Names that do not fit the pattern are
/// skipped. Duplicates are kept: a revision matched by two listing entries
/// is reported twice.
pub struct DirectoryVersionLister {
    transport: Arc<dyn ResourceTransport>,
    m2_compatible: bool,
}

impl DirectoryVersionLister {
    pub fn new(transport: Arc<dyn ResourceTransport>) -> Self {
        Self {
            transport,
            m2_compatible: false,
        }
    }

    /// Controls whether dots in the organisation become path separators, as
    /// in Maven 2 repositories. Off by default.
    pub fn with_m2_compatible(mut self, m2_compatible: bool) -> Self {
        self.m2_compatible = m2_compatible;
        self
    }
}

#[async_trait::async_trait]
impl VersionLister for DirectoryVersionLister {
    fn layout(&self) -> RepositoryLayout {
        RepositoryLayout::Pattern
    }

    async fn get_version_list(
        &self,
        coordinate: &ModuleCoordinate,
        pattern: &str,
        artifact: Option<&ArtifactDescriptor>,
    ) -> Result<VersionList, DiscoveryError> {
        let mut attributes = coordinate.attributes_with(artifact);
        if self.m2_compatible {
            attributes.insert(
                PatternToken::Organisation.as_str().to_string(),
                coordinate.m2_organisation(),
            );
        }
        let partial = pattern::substitute_partial(pattern, &attributes)?;

        if !partial.has_revision() {
            return Err(DiscoveryError::NotApplicable {
                layout: self.layout(),
                template: pattern.to_string(),
            });
        }

        let location = partial.render();
        let entries = self
            .transport
            .list(&location)
            .await
            .map_err(|e| DiscoveryError::transport(location.as_str(), e))?;

        let matcher = partial.revision_matcher();
        let versions: Vec<String> = entries
            .iter()
            .filter_map(|entry| matcher.extract(entry))
            .collect();

        debug!(
            "Found {} versions of {} among {} entries at {}",
            versions.len(),
            coordinate,
            entries.len(),
            location
        );

        Ok(VersionList::new(versions))
    }
}
