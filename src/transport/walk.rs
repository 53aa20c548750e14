//! Wildcard expansion shared by the transports

use regex::Regex;
use tracing::debug;

use crate::discovery::error::TransportError;
use crate::discovery::pattern::REVISION_WILDCARD;

/// Directory-level access a transport provides to the walker
#[async_trait::async_trait]
pub(crate) trait DirectoryAccess: Send + Sync {
    /// Names of the direct children of `directory`; empty if it does not exist
    async fn list_directory(&self, directory: &str) -> Result<Vec<String>, TransportError>;

    async fn exists(&self, location: &str) -> Result<bool, TransportError>;
}

/// Expands every wildcard segment of `partial_location`
///
/// Returns paths relative to the directory preceding the first wildcard, in
/// listing order.
pub(crate) async fn expand<A: DirectoryAccess + ?Sized>(
    access: &A,
    partial_location: &str,
) -> Result<Vec<String>, TransportError> {
    let Some(wildcard) = partial_location.find(REVISION_WILDCARD) else {
        return Err(TransportError::InvalidLocation(format!(
            "no wildcard in '{}'",
            partial_location
        )));
    };
    let (root, pattern) = match partial_location[..wildcard].rfind('/') {
        Some(slash) => (
            &partial_location[..slash],
            &partial_location[slash + 1..],
        ),
        None => ("", partial_location),
    };
    let segments: Vec<&str> = pattern
        .trim_end_matches('/')
        .split('/')
        .collect();

    // (absolute location, path relative to root)
    let mut candidates = vec![(root.to_string(), String::new())];

    for segment in &segments {
        let mut next = Vec::new();
        if segment.contains(REVISION_WILDCARD) {
            let matcher = segment_matcher(segment);
            for (location, relative) in &candidates {
                for name in access.list_directory(location).await? {
                    if matcher.as_ref().is_some_and(|m| m.is_match(&name)) {
                        next.push((join(location, &name), join(relative, &name)));
                    }
                }
            }
        } else {
            for (location, relative) in &candidates {
                next.push((join(location, segment), join(relative, segment)));
            }
        }
        debug!(
            "Expanded segment '{}' of {}: {} candidates",
            segment,
            partial_location,
            next.len()
        );
        candidates = next;
        if candidates.is_empty() {
            break;
        }
    }

    let ends_with_literal = segments
        .last()
        .is_some_and(|segment| !segment.contains(REVISION_WILDCARD));
    let mut entries = Vec::with_capacity(candidates.len());
    for (location, relative) in candidates {
        if ends_with_literal && !access.exists(&location).await? {
            continue;
        }
        entries.push(relative);
    }

    Ok(entries)
}

fn segment_matcher(segment: &str) -> Option<Regex> {
    let expression = segment
        .split(REVISION_WILDCARD)
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("[^/]*");
    Regex::new(&format!("^{}$", expression)).ok()
}

fn join(base: &str, name: &str) -> String {
    if base.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", base.trim_end_matches('/'), name)
    }
}
