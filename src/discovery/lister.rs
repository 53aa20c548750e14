//! Version lister trait for discovering the versions a repository holds

use serde::Deserialize;

use crate::discovery::coordinate::{ArtifactDescriptor, ModuleCoordinate};
use crate::discovery::error::DiscoveryError;
use crate::discovery::types::VersionList;

/// Repository layout convention a lister understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryLayout {
    /// Maven 2 layout, publishing `maven-metadata.xml` per module
    Maven,
    /// Arbitrary artifact patterns, discovered by directory listing
    Pattern,
}

impl RepositoryLayout {
    /// Returns the string representation of the layout
    pub fn as_str(&self) -> &'static str {
        match self {
            RepositoryLayout::Maven => "maven",
            RepositoryLayout::Pattern => "pattern",
        }
    }
}

impl std::fmt::Display for RepositoryLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait for listing the versions of a module under a layout convention
///
/// Implementations hold no per-lookup state and may be shared across tasks.
#[async_trait::async_trait]
pub trait VersionLister: Send + Sync {
    /// Returns the layout this implementation handles
    fn layout(&self) -> RepositoryLayout;

    /// Lists the versions of a module available under `pattern`
    ///
    /// # Arguments
    /// * `coordinate` - The module whose versions are wanted
    /// * `pattern` - The artifact location pattern of the repository
    /// * `artifact` - The artifact the pattern is resolved for, if any
    ///
    /// # Returns
    /// * `Ok(VersionList)` - Versions in discovery order; empty if none
    /// * `Err(DiscoveryError)` - If the repository could not be read
    async fn get_version_list(
        &self,
        coordinate: &ModuleCoordinate,
        pattern: &str,
        artifact: Option<&ArtifactDescriptor>,
    ) -> Result<VersionList, DiscoveryError>;
}
