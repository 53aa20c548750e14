//! Location pattern substitution
//!
//! A pattern is literal text interspersed with bracketed tokens such as
//! `[organisation]` or `[revision]`. A parenthesised group that contains a
//! token, e.g. `(-[classifier])`, is optional: it is emitted (without the
//! parentheses) only when every token inside it has a non-empty value.
//!
//! Besides full substitution, a pattern can be resolved partially, leaving
//! the revision open. The resulting [`PartialLocation`] renders with
//! [`REVISION_WILDCARD`] in place of the revision and can recover the
//! revision from a listed resource name.

use regex::Regex;

use crate::discovery::coordinate::Attributes;
use crate::discovery::error::TemplateError;

/// Marker standing in for the revision in a partially resolved location
pub const REVISION_WILDCARD: char = '*';

/// Tokens understood in location patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternToken {
    Organisation,
    Module,
    Revision,
    Artifact,
    Classifier,
    Ext,
}

impl PatternToken {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternToken::Organisation => "organisation",
            PatternToken::Module => "module",
            PatternToken::Revision => "revision",
            PatternToken::Artifact => "artifact",
            PatternToken::Classifier => "classifier",
            PatternToken::Ext => "ext",
        }
    }

    /// The token as written in a pattern, e.g. `[revision]`
    pub fn placeholder(&self) -> String {
        format!("[{}]", self.as_str())
    }
}

impl std::str::FromStr for PatternToken {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "organisation" => Ok(PatternToken::Organisation),
            "module" => Ok(PatternToken::Module),
            "revision" => Ok(PatternToken::Revision),
            "artifact" => Ok(PatternToken::Artifact),
            "classifier" => Ok(PatternToken::Classifier),
            "ext" => Ok(PatternToken::Ext),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Literal(String),
    Token(PatternToken),
    Optional(Vec<Part>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Revision,
}

/// Substitutes every token of `template` from `attributes`
pub fn substitute(template: &str, attributes: &Attributes) -> Result<String, TemplateError> {
    let parts = parse(template)?;
    let pieces = resolve(&parts, attributes, template, false)?;

    Ok(pieces
        .into_iter()
        .map(|piece| match piece {
            Piece::Literal(text) => text,
            // resolve() only emits Revision pieces when asked to keep them open
            Piece::Revision => String::new(),
        })
        .collect())
}

/// Substitutes every token of `template` except `[revision]`
pub fn substitute_partial(
    template: &str,
    attributes: &Attributes,
) -> Result<PartialLocation, TemplateError> {
    let parts = parse(template)?;
    let pieces = resolve(&parts, attributes, template, true)?;
    Ok(PartialLocation { pieces })
}

/// Returns true if the pattern mentions the given token outside of any literal text
pub fn contains_token(template: &str, token: PatternToken) -> bool {
    template.contains(&token.placeholder())
}

fn parse(template: &str) -> Result<Vec<Part>, TemplateError> {
    parse_parts(template, template, 0)
}

fn parse_parts(template: &str, source: &str, base: usize) -> Result<Vec<Part>, TemplateError> {
    let mut parts = Vec::new();
    let mut literal = String::new();
    let mut position = 0;

    while let Some(c) = source[position..].chars().next() {
        let rest = &source[position..];
        match c {
            '[' => {
                let Some(end) = rest.find(']') else {
                    return Err(TemplateError::Unterminated {
                        offset: base + position,
                        template: template.to_string(),
                    });
                };
                let name = &rest[1..end];
                let token = name
                    .parse::<PatternToken>()
                    .map_err(|_| TemplateError::UnknownToken {
                        token: name.to_string(),
                        template: template.to_string(),
                    })?;
                flush_literal(&mut parts, &mut literal);
                parts.push(Part::Token(token));
                position += end + 1;
            }
            '(' if rest.find(')').is_some_and(|end| rest[..end].contains('[')) => {
                let end = rest.find(')').unwrap_or(rest.len());
                let inner = parse_parts(template, &rest[1..end], base + position + 1)?;
                flush_literal(&mut parts, &mut literal);
                parts.push(Part::Optional(inner));
                position += end + 1;
            }
            _ => {
                literal.push(c);
                position += c.len_utf8();
            }
        }
    }

    flush_literal(&mut parts, &mut literal);
    Ok(parts)
}

fn flush_literal(parts: &mut Vec<Part>, literal: &mut String) {
    if !literal.is_empty() {
        parts.push(Part::Literal(std::mem::take(literal)));
    }
}

fn resolve(
    parts: &[Part],
    attributes: &Attributes,
    template: &str,
    keep_revision_open: bool,
) -> Result<Vec<Piece>, TemplateError> {
    let mut pieces = Vec::new();

    for part in parts {
        match part {
            Part::Literal(text) => pieces.push(Piece::Literal(text.clone())),
            Part::Token(PatternToken::Revision) if keep_revision_open => {
                pieces.push(Piece::Revision)
            }
            Part::Token(token) => {
                let value = attributes.get(token.as_str()).ok_or_else(|| {
                    TemplateError::MissingAttribute {
                        token: token.as_str().to_string(),
                        template: template.to_string(),
                    }
                })?;
                pieces.push(Piece::Literal(value.clone()));
            }
            Part::Optional(inner) => {
                let present = inner.iter().all(|part| match part {
                    Part::Token(PatternToken::Revision) if keep_revision_open => true,
                    Part::Token(token) => attributes
                        .get(token.as_str())
                        .is_some_and(|value| !value.is_empty()),
                    _ => true,
                });
                if present {
                    pieces.extend(resolve(inner, attributes, template, keep_revision_open)?);
                }
            }
        }
    }

    Ok(pieces)
}

/// A location whose revision is still open
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialLocation {
    pieces: Vec<Piece>,
}

impl PartialLocation {
    /// Renders the location with [`REVISION_WILDCARD`] in place of each revision
    pub fn render(&self) -> String {
        let mut rendered = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => rendered.push_str(text),
                Piece::Revision => rendered.push(REVISION_WILDCARD),
            }
        }
        rendered
    }

    pub fn has_revision(&self) -> bool {
        self.pieces.iter().any(|piece| *piece == Piece::Revision)
    }

    /// Builds the reverse matcher that recovers revisions from listed names
    pub fn revision_matcher(&self) -> RevisionMatcher {
        let segments = self.segments();
        let tails = (1..=segments.len())
            .map(|count| {
                let tail = &segments[segments.len() - count..];
                if !tail.iter().flatten().any(|piece| *piece == Piece::Revision) {
                    return None;
                }
                let expression = tail
                    .iter()
                    .map(|segment| {
                        segment
                            .iter()
                            .map(|piece| match piece {
                                Piece::Literal(text) => regex::escape(text),
                                Piece::Revision => "([^/]+?)".to_string(),
                            })
                            .collect::<String>()
                    })
                    .collect::<Vec<_>>()
                    .join("/");
                Regex::new(&format!("^{}$", expression)).ok()
            })
            .collect();
        RevisionMatcher { tails }
    }

    /// Splits the pieces into `/`-separated path segments
    fn segments(&self) -> Vec<Vec<Piece>> {
        let mut segments = vec![Vec::new()];
        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => {
                    let mut split = text.split('/');
                    if let Some(first) = split.next()
                        && !first.is_empty()
                        && let Some(current) = segments.last_mut()
                    {
                        current.push(Piece::Literal(first.to_string()));
                    }
                    for next in split {
                        let mut segment = Vec::new();
                        if !next.is_empty() {
                            segment.push(Piece::Literal(next.to_string()));
                        }
                        segments.push(segment);
                    }
                }
                Piece::Revision => {
                    if let Some(current) = segments.last_mut() {
                        current.push(Piece::Revision);
                    }
                }
            }
        }
        if segments.len() > 1 && segments.last().is_some_and(|segment| segment.is_empty()) {
            segments.pop();
        }
        segments
    }
}

impl std::fmt::Display for PartialLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

/// Recovers the revision from resource names by inverse substitution
///
/// A name with `k` path segments is matched against the last `k` segments of
/// the partial location. Literal text around each revision must match
/// exactly; when the revision occurs several times, all occurrences must
/// agree. Captures are lazy, so with ambiguous separators the first literal
/// match wins.
#[derive(Debug, Clone)]
pub struct RevisionMatcher {
    tails: Vec<Option<Regex>>,
}

impl RevisionMatcher {
    pub fn extract(&self, name: &str) -> Option<String> {
        let name = name.trim_end_matches('/');
        if name.is_empty() {
            return None;
        }

        let segment_count = name.split('/').count();
        let regex = self.tails.get(segment_count - 1)?.as_ref()?;
        let captures = regex.captures(name)?;

        let mut revisions = captures.iter().skip(1).flatten().map(|m| m.as_str());
        let revision = revisions.next()?;
        if revisions.all(|other| other == revision) {
            Some(revision.to_string())
        } else {
            None
        }
    }
}
