//! Maven metadata based version lister

use std::sync::Arc;

use tracing::debug;

use crate::discovery::coordinate::{ArtifactDescriptor, Attributes, ModuleCoordinate};
use crate::discovery::error::DiscoveryError;
use crate::discovery::lister::{RepositoryLayout, VersionLister};
use crate::discovery::loader::{MetadataLoader, MetadataLookup};
use crate::discovery::metadata::MAVEN_METADATA_FILE;
use crate::discovery::pattern::{self, PatternToken};
use crate::discovery::types::VersionList;
use crate::transport::ResourceTransport;

/// Standard Maven 2 artifact pattern
pub const M2_PATTERN: &str =
    "[organisation]/[module]/[revision]/[artifact]-[revision](-[classifier]).[ext]";

/// Pattern suffixes that identify a Maven 2 layout
const M2_PATTERN_SUFFIXES: &[&str] = &[
    M2_PATTERN,
    "[organisation]/[module]/[revision]/[artifact]-[revision].[ext]",
    "[organisation]/[module]/maven-metadata.xml",
];

/// Lists versions from the `maven-metadata.xml` a Maven repository publishes
/// for each module
///
/// Patterns that do not follow the Maven 2 layout produce an empty list
/// without touching the repository.
pub struct MavenVersionLister {
    loader: MetadataLoader,
    root: String,
    m2_compatible: bool,
}

impl MavenVersionLister {
    /// Creates a lister for the repository rooted at `root`
    pub fn new(transport: Arc<dyn ResourceTransport>, root: &str) -> Self {
        Self {
            loader: MetadataLoader::new(transport),
            root: root.to_string(),
            m2_compatible: true,
        }
    }

    /// Controls whether dots in the organisation become path separators
    /// (`com.acme` -> `com/acme`), as Maven 2 repositories lay out group ids
    pub fn with_m2_compatible(mut self, m2_compatible: bool) -> Self {
        self.m2_compatible = m2_compatible;
        self
    }

    /// Returns true if `pattern` follows the Maven 2 layout
    pub fn is_applicable(pattern: &str) -> bool {
        M2_PATTERN_SUFFIXES
            .iter()
            .any(|suffix| pattern.ends_with(suffix))
    }

    /// Location of the metadata document for a module
    pub fn metadata_location(&self, coordinate: &ModuleCoordinate) -> Result<String, DiscoveryError> {
        let organisation = if self.m2_compatible {
            coordinate.m2_organisation()
        } else {
            coordinate.organisation().to_string()
        };

        let mut attributes = Attributes::new();
        attributes.insert(PatternToken::Organisation.as_str().to_string(), organisation);
        attributes.insert(
            PatternToken::Module.as_str().to_string(),
            coordinate.module().to_string(),
        );

        let template = format!(
            "{}[organisation]/[module]/{}",
            self.root, MAVEN_METADATA_FILE
        );
        Ok(pattern::substitute(&template, &attributes)?)
    }
}

#[async_trait::async_trait]
impl VersionLister for MavenVersionLister {
    fn layout(&self) -> RepositoryLayout {
        RepositoryLayout::Maven
    }

    async fn get_version_list(
        &self,
        coordinate: &ModuleCoordinate,
        pattern: &str,
        _artifact: Option<&ArtifactDescriptor>,
    ) -> Result<VersionList, DiscoveryError> {
        if !Self::is_applicable(pattern) {
            debug!("Pattern '{}' is not a Maven 2 pattern, skipping metadata", pattern);
            return Ok(VersionList::empty());
        }

        let location = self.metadata_location(coordinate)?;

        match self.loader.load(&location).await? {
            MetadataLookup::Found(document) => Ok(VersionList::new(document.into_versions())),
            MetadataLookup::NotFound { location } => {
                debug!("No Maven metadata for {} at {}", coordinate, location);
                Ok(VersionList::empty())
            }
        }
    }
}
