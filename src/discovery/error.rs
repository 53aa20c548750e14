use thiserror::Error;

use crate::discovery::lister::RepositoryLayout;

/// Error raised while expanding a location template
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("Unknown token [{token}] in pattern '{template}'")]
    UnknownToken { token: String, template: String },

    #[error("Unresolved token [{token}] in pattern '{template}': no value supplied")]
    MissingAttribute { token: String, template: String },

    #[error("Unterminated token starting at offset {offset} in pattern '{template}'")]
    Unterminated { offset: usize, template: String },
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected status {status} for {location}")]
    Status { location: String, status: u16 },

    #[error("I/O error for {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid location: {0}")]
    InvalidLocation(String),
}

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("Unable to load {location}: {source}")]
    Transport {
        location: String,
        #[source]
        source: TransportError,
    },

    #[error("Unable to parse Maven metadata at {location}: {source}")]
    Parse {
        location: String,
        #[source]
        source: quick_xml::DeError,
    },

    #[error("{} layout does not apply to pattern '{template}'", .layout.as_str())]
    NotApplicable {
        layout: RepositoryLayout,
        template: String,
    },
}

impl DiscoveryError {
    /// Wraps a transport failure together with the location that was requested
    pub fn transport(location: impl Into<String>, source: TransportError) -> Self {
        DiscoveryError::Transport {
            location: location.into(),
            source,
        }
    }

    /// Returns true for errors that only mean "this lister has nothing to say"
    pub fn is_not_applicable(&self) -> bool {
        matches!(self, DiscoveryError::NotApplicable { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_error_message_includes_location_and_cause() {
        let error = DiscoveryError::transport(
            "https://repo.example.com/com/acme/widget/maven-metadata.xml",
            TransportError::Status {
                location: "https://repo.example.com/com/acme/widget/maven-metadata.xml"
                    .to_string(),
                status: 503,
            },
        );

        let message = error.to_string();
        assert!(message.starts_with(
            "Unable to load https://repo.example.com/com/acme/widget/maven-metadata.xml"
        ));
        assert!(message.contains("Unexpected status 503"));
    }

    #[test]
    fn not_applicable_message_names_layout_and_pattern() {
        let error = DiscoveryError::NotApplicable {
            layout: RepositoryLayout::Pattern,
            template: "repo/[module].jar".to_string(),
        };

        assert!(error.is_not_applicable());
        assert_eq!(
            error.to_string(),
            "pattern layout does not apply to pattern 'repo/[module].jar'"
        );
    }

    #[test]
    fn template_error_names_unresolved_token() {
        let error: DiscoveryError = TemplateError::MissingAttribute {
            token: "classifier".to_string(),
            template: "[module]-[classifier].jar".to_string(),
        }
        .into();

        assert!(error.to_string().contains("[classifier]"));
        assert!(!error.is_not_applicable());
    }
}
