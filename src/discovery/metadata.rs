//! `maven-metadata.xml` parsing
//!
//! Only the parts of the format needed for version discovery are read:
//! module identity, the `<versioning>` block and its version list. Unknown
//! elements and attributes are ignored.

use serde::Deserialize;

/// File name of the structured version index published per module
pub const MAVEN_METADATA_FILE: &str = "maven-metadata.xml";

/// Parsed version index of a single module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataDocument {
    organisation: String,
    module: String,
    versions: Vec<String>,
    latest: Option<String>,
    release: Option<String>,
    last_updated: Option<String>,
}

impl MetadataDocument {
    /// Parses a metadata document.
    ///
    /// Fails on malformed XML or when `groupId`/`artifactId` are missing. An
    /// absent or blank version list is valid and yields no versions. Every
    /// `<version>` element yields one entry, with surrounding whitespace
    /// removed.
    pub fn parse(bytes: &[u8]) -> Result<Self, quick_xml::DeError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| quick_xml::DeError::Custom(format!("invalid UTF-8: {}", e)))?;
        let raw: RawMetadata = quick_xml::de::from_str(text)?;

        let versioning = raw.versioning.unwrap_or_default();
        let versions = versioning
            .versions
            .map(|versions| versions.version)
            .unwrap_or_default()
            .into_iter()
            .map(|version| version.trim().to_string())
            .collect();

        Ok(Self {
            organisation: raw.group_id.trim().to_string(),
            module: raw.artifact_id.trim().to_string(),
            versions,
            latest: non_blank(versioning.latest),
            release: non_blank(versioning.release),
            last_updated: non_blank(versioning.last_updated),
        })
    }

    pub fn organisation(&self) -> &str {
        &self.organisation
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    /// Versions in document order, duplicates included
    pub fn versions(&self) -> &[String] {
        &self.versions
    }

    pub fn into_versions(self) -> Vec<String> {
        self.versions
    }

    pub fn latest(&self) -> Option<&str> {
        self.latest.as_deref()
    }

    pub fn release(&self) -> Option<&str> {
        self.release.as_deref()
    }

    pub fn last_updated(&self) -> Option<&str> {
        self.last_updated.as_deref()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[derive(Debug, Deserialize)]
struct RawMetadata {
    #[serde(rename = "groupId")]
    group_id: String,
    #[serde(rename = "artifactId")]
    artifact_id: String,
    versioning: Option<RawVersioning>,
}

#[derive(Debug, Default, Deserialize)]
struct RawVersioning {
    latest: Option<String>,
    release: Option<String>,
    versions: Option<RawVersions>,
    #[serde(rename = "lastUpdated")]
    last_updated: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawVersions {
    #[serde(default)]
    version: Vec<String>,
}
