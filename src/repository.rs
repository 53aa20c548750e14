//! Repository-level version discovery
//!
//! Wires the listers and transport for one configured repository and runs
//! discovery over each of its artifact patterns.

use std::sync::Arc;

use indexmap::IndexSet;
use tracing::info;

use crate::config::{HttpConfig, RepositoryConfig};
use crate::discovery::coordinate::{ArtifactDescriptor, ModuleCoordinate};
use crate::discovery::error::DiscoveryError;
use crate::discovery::lister::{RepositoryLayout, VersionLister};
use crate::discovery::listers::{
    ChainedVersionLister, DirectoryVersionLister, M2_PATTERN, MavenVersionLister,
};
use crate::discovery::pattern::{self, PatternToken};
use crate::discovery::types::VersionList;
use crate::transport::{self, ResourceTransport};

/// Error building a repository from configuration
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Repository '{0}' has no url")]
    MissingUrl(String),

    #[error("Repository '{0}' uses the pattern layout but has no artifact patterns")]
    MissingPatterns(String),

    #[error("Pattern '{pattern}' of repository '{name}' has no [revision] token")]
    PatternWithoutRevision { name: String, pattern: String },

    #[error("Repository '{name}': {source}")]
    Transport {
        name: String,
        #[source]
        source: crate::discovery::error::TransportError,
    },
}

/// A configured repository ready for version discovery
pub struct Repository {
    name: String,
    layout: RepositoryLayout,
    patterns: Vec<String>,
    lister: ChainedVersionLister,
}

impl Repository {
    /// Builds a repository, choosing a transport from the URL scheme
    pub fn from_config(config: &RepositoryConfig, http: &HttpConfig) -> Result<Self, RepositoryError> {
        let transport = transport::for_url(&config.url, http).map_err(|source| {
            RepositoryError::Transport {
                name: config.name.clone(),
                source,
            }
        })?;
        Self::with_transport(config, transport)
    }

    /// Builds a repository on top of an existing transport
    pub fn with_transport(
        config: &RepositoryConfig,
        transport: Arc<dyn ResourceTransport>,
    ) -> Result<Self, RepositoryError> {
        if config.url.is_empty() {
            return Err(RepositoryError::MissingUrl(config.name.clone()));
        }

        let root = if config.url.ends_with('/') {
            config.url.clone()
        } else {
            format!("{}/", config.url)
        };

        let relative_patterns = match (config.layout, config.artifact_patterns.is_empty()) {
            (RepositoryLayout::Maven, true) => vec![M2_PATTERN.to_string()],
            (RepositoryLayout::Pattern, true) => {
                return Err(RepositoryError::MissingPatterns(config.name.clone()));
            }
            (_, false) => config.artifact_patterns.clone(),
        };

        if let Some(pattern) = relative_patterns
            .iter()
            .find(|pattern| !pattern::contains_token(pattern, PatternToken::Revision))
        {
            return Err(RepositoryError::PatternWithoutRevision {
                name: config.name.clone(),
                pattern: pattern.clone(),
            });
        }

        let patterns = relative_patterns
            .iter()
            .map(|pattern| format!("{}{}", root, pattern.trim_start_matches('/')))
            .collect();

        let maven = config.layout == RepositoryLayout::Maven;
        let mut listers: Vec<Arc<dyn VersionLister>> = Vec::new();
        if maven {
            listers.push(Arc::new(MavenVersionLister::new(transport.clone(), &root)));
        }
        listers.push(Arc::new(
            DirectoryVersionLister::new(transport).with_m2_compatible(maven),
        ));

        Ok(Self {
            name: config.name.clone(),
            layout: config.layout,
            patterns,
            lister: ChainedVersionLister::new(listers),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Absolute artifact patterns searched by this repository
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Lists the versions of a module across all patterns
    ///
    /// Results of later patterns are appended; a version already reported
    /// by an earlier pattern is not repeated. Maven repositories look for the
    /// module's jar when no artifact is given.
    pub async fn list_versions(
        &self,
        coordinate: &ModuleCoordinate,
        artifact: Option<&ArtifactDescriptor>,
    ) -> Result<VersionList, DiscoveryError> {
        let default_artifact;
        let artifact = match artifact {
            None if self.layout == RepositoryLayout::Maven => {
                default_artifact = ArtifactDescriptor::new(coordinate.module(), "jar");
                Some(&default_artifact)
            }
            artifact => artifact,
        };

        let mut versions = IndexSet::new();
        for pattern in &self.patterns {
            let found = self
                .lister
                .get_version_list(coordinate, pattern, artifact)
                .await?;
            versions.extend(found);
        }

        info!(
            "Repository '{}' has {} versions of {}",
            self.name,
            versions.len(),
            coordinate
        );

        Ok(VersionList::new(versions.into_iter().collect()))
    }
}
