//! Version lister that consults several listers for one repository

use std::sync::Arc;

use tracing::debug;

use crate::discovery::coordinate::{ArtifactDescriptor, ModuleCoordinate};
use crate::discovery::error::DiscoveryError;
use crate::discovery::lister::{RepositoryLayout, VersionLister};
use crate::discovery::types::VersionList;

/// Runs a prioritized list of listers one after another
///
/// Listers are asked in priority order and the first non-empty result wins;
/// later listers are not consulted. An empty result or a layout that does
/// not apply moves on to the next lister. Any other failure stops the chain
/// and is reported, so a broken index is never masked by a fallback.
pub struct ChainedVersionLister {
    listers: Vec<Arc<dyn VersionLister>>,
}

impl ChainedVersionLister {
    pub fn new(listers: Vec<Arc<dyn VersionLister>>) -> Self {
        Self { listers }
    }

    pub fn listers(&self) -> &[Arc<dyn VersionLister>] {
        &self.listers
    }
}

#[async_trait::async_trait]
impl VersionLister for ChainedVersionLister {
    /// Layout of the highest-priority lister
    fn layout(&self) -> RepositoryLayout {
        self.listers
            .first()
            .map(|lister| lister.layout())
            .unwrap_or(RepositoryLayout::Pattern)
    }

    async fn get_version_list(
        &self,
        coordinate: &ModuleCoordinate,
        pattern: &str,
        artifact: Option<&ArtifactDescriptor>,
    ) -> Result<VersionList, DiscoveryError> {
        for lister in &self.listers {
            match lister.get_version_list(coordinate, pattern, artifact).await {
                Ok(versions) if !versions.is_empty() => {
                    debug!(
                        "{} lister found {} versions of {}",
                        lister.layout().as_str(),
                        versions.len(),
                        coordinate
                    );
                    return Ok(versions);
                }
                Ok(_) => {
                    debug!(
                        "{} lister found no versions of {}",
                        lister.layout().as_str(),
                        coordinate
                    );
                }
                Err(e) if e.is_not_applicable() => {
                    debug!("{}", e);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(VersionList::empty())
    }
}
