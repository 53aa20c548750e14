use serde::Serialize;

/// Versions discovered for a module, in discovery order
///
/// An empty list means no versions were found; it is not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VersionList {
    versions: Vec<String>,
}

impl VersionList {
    pub fn new(versions: Vec<String>) -> Self {
        Self { versions }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.versions.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.versions
    }

    pub fn into_vec(self) -> Vec<String> {
        self.versions
    }
}

impl From<Vec<String>> for VersionList {
    fn from(versions: Vec<String>) -> Self {
        Self::new(versions)
    }
}

impl IntoIterator for VersionList {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.versions.into_iter()
    }
}

impl<'a> IntoIterator for &'a VersionList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.versions.iter()
    }
}
