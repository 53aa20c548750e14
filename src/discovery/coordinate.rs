//! Module coordinates and artifact descriptors used for pattern substitution

use indexmap::IndexMap;

use crate::discovery::pattern::PatternToken;

/// Attribute values keyed by token name, as consumed by the pattern substitutor
pub type Attributes = IndexMap<String, String>;

/// Identity of a module whose versions are being discovered
///
/// The attribute map always carries `organisation` and `module`; callers may
/// add further attributes (for example `revision`) for substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleCoordinate {
    organisation: String,
    module: String,
    attributes: Attributes,
}

impl ModuleCoordinate {
    pub fn new(organisation: impl Into<String>, module: impl Into<String>) -> Self {
        let organisation = organisation.into();
        let module = module.into();
        let mut attributes = Attributes::new();
        attributes.insert(
            PatternToken::Organisation.as_str().to_string(),
            organisation.clone(),
        );
        attributes.insert(PatternToken::Module.as_str().to_string(), module.clone());
        Self {
            organisation,
            module,
            attributes,
        }
    }

    /// Adds an extra substitution attribute.
    ///
    /// `organisation` and `module` are fixed by the coordinate's identity and
    /// cannot be overridden here.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        if key != PatternToken::Organisation.as_str() && key != PatternToken::Module.as_str() {
            self.attributes.insert(key, value.into());
        }
        self
    }

    pub fn organisation(&self) -> &str {
        &self.organisation
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    /// Organisation as a Maven 2 repository lays it out (`com.acme` -> `com/acme`)
    pub fn m2_organisation(&self) -> String {
        self.organisation.replace('.', "/")
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Attributes for this coordinate merged with those of an artifact.
    ///
    /// Artifact attributes win over coordinate attributes of the same name,
    /// except for the identity pair.
    pub fn attributes_with(&self, artifact: Option<&ArtifactDescriptor>) -> Attributes {
        let mut attributes = self.attributes.clone();
        if let Some(artifact) = artifact {
            for (key, value) in artifact.attributes() {
                attributes.insert(key.to_string(), value.to_string());
            }
        }
        attributes
    }
}

impl std::fmt::Display for ModuleCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.organisation, self.module)
    }
}

impl std::str::FromStr for ModuleCoordinate {
    type Err = String;

    /// Parses `organisation:module`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((organisation, module))
                if !organisation.is_empty() && !module.is_empty() && !module.contains(':') =>
            {
                Ok(ModuleCoordinate::new(organisation, module))
            }
            _ => Err(format!(
                "Invalid module coordinate '{}': expected <organisation>:<module>",
                s
            )),
        }
    }
}

/// The artifact a pattern lookup is made for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactDescriptor {
    pub name: String,
    pub ext: String,
    pub classifier: Option<String>,
}

impl ArtifactDescriptor {
    pub fn new(name: impl Into<String>, ext: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ext: ext.into(),
            classifier: None,
        }
    }

    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }

    fn attributes(&self) -> Vec<(&'static str, &str)> {
        let mut attributes = vec![
            (PatternToken::Artifact.as_str(), self.name.as_str()),
            (PatternToken::Ext.as_str(), self.ext.as_str()),
        ];
        if let Some(classifier) = &self.classifier {
            attributes.push((PatternToken::Classifier.as_str(), classifier.as_str()));
        }
        attributes
    }
}
