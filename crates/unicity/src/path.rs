//! Search path expressions and concrete document positions.
//!
//! A [`SearchPath`] is the dotted expression a rule is configured with
//! (`records.[].altIds.[]`). A [`Position`] is the concrete location of one
//! value inside a document (`records.0.altIds.1`).

use core::convert::Infallible;
use core::fmt::{self, Display};
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thisisplural::Plural;

/// Separator between path segments.
pub const SEPARATOR: char = '.';

/// Segment token meaning "every element of the array at this position".
pub const WILDCARD: &str = "[]";

// =============================================================================
// SearchPath
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Object member name, or a decimal index when the node is an array
    Key(String),
    /// Fan out over every array element
    Wildcard,
}

impl Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => write!(f, "{key}"),
            Segment::Wildcard => write!(f, "{WILDCARD}"),
        }
    }
}

/// A parsed path expression (e.g. `"records.[].id"` -> [records, [], id]).
///
/// Parsing never fails: empty segments are discarded, so leading, trailing
/// and doubled separators are tolerated. An expression with no segments
/// addresses the node it is evaluated against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct SearchPath(Vec<Segment>);

impl SearchPath {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self(segments)
    }

    /// The empty path, addressing the node itself.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn parse(s: &str) -> Self {
        Self(
            s.split(SEPARATOR)
                .filter(|chunk| !chunk.is_empty())
                .map(|chunk| {
                    if chunk == WILDCARD {
                        Segment::Wildcard
                    } else {
                        Segment::Key(chunk.to_string())
                    }
                })
                .collect(),
        )
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    /// Whether any segment fans out over an array.
    pub fn has_wildcard(&self) -> bool {
        self.0.iter().any(|segment| matches!(segment, Segment::Wildcard))
    }
}

impl FromStr for SearchPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for SearchPath {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for SearchPath {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<SearchPath> for String {
    fn from(path: SearchPath) -> Self {
        path.to_string()
    }
}

impl Display for SearchPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "{SEPARATOR}")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

// =============================================================================
// SearchPaths
// =============================================================================

/// Ordered alternates searched by one rule.
///
/// Deserializes from either a single expression or a list of expressions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Plural)]
#[plural(len, is_empty, iter, into_iter)]
#[serde(from = "OneOrMany")]
pub struct SearchPaths(pub Vec<SearchPath>);

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(SearchPath),
    Many(Vec<SearchPath>),
}

impl From<OneOrMany> for SearchPaths {
    fn from(value: OneOrMany) -> Self {
        match value {
            OneOrMany::One(path) => SearchPaths(vec![path]),
            OneOrMany::Many(paths) => SearchPaths(paths),
        }
    }
}

impl SearchPaths {
    pub fn single(path: impl Into<SearchPath>) -> Self {
        SearchPaths(vec![path.into()])
    }

    pub fn as_slice(&self) -> &[SearchPath] {
        &self.0
    }
}

impl<P: Into<SearchPath>> FromIterator<P> for SearchPaths {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        SearchPaths(iter.into_iter().map(Into::into).collect())
    }
}

impl Display for SearchPaths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, path) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{path}")?;
        }
        Ok(())
    }
}

// =============================================================================
// Position
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PositionSegment {
    Key(String),
    Index(usize),
}

/// Concrete location of a value inside a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Plural)]
#[plural(len, is_empty, iter, into_iter)]
pub struct Position(pub Vec<PositionSegment>);

impl Position {
    /// Create an empty position representing the document root
    pub fn root() -> Self {
        Position(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push_key(&mut self, key: impl Into<String>) {
        self.0.push(PositionSegment::Key(key.into()));
    }

    pub fn push_index(&mut self, index: usize) {
        self.0.push(PositionSegment::Index(index));
    }

    /// Builder form of [`Position::push_key`].
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.push_key(key);
        self
    }

    /// Builder form of [`Position::push_index`].
    pub fn index(mut self, index: usize) -> Self {
        self.push_index(index);
        self
    }

    pub fn segments(&self) -> &[PositionSegment] {
        &self.0
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "(root)");
        }
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "{SEPARATOR}")?;
            }
            match segment {
                PositionSegment::Key(key) => write!(f, "{key}")?,
                PositionSegment::Index(index) => write!(f, "{index}")?,
            }
        }
        Ok(())
    }
}
