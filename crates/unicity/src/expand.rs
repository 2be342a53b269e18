//! Path expansion
//!
//! Evaluates a [`SearchPath`] against a document and yields every value it
//! reaches, in a fixed order: array elements in index order, keys in the
//! order the path names them.
//!
//! Structural mismatches are not errors. A wildcard over a non-array, or a
//! key that is absent (including any key on a scalar), contributes nothing
//! and the walk continues with the remaining branches.
//!
//! The walk is an explicit depth-first traversal over a stack, so very deep
//! or very wide documents do not grow the call stack.

use serde_json::Value;

use crate::path::{Position, SearchPath, SearchPaths, Segment};

// =============================================================================
// Public API
// =============================================================================

/// Collect every value reached by `path`.
///
/// An empty path yields `document` itself as the single match.
pub fn expand<'doc>(path: &SearchPath, document: &'doc Value) -> Vec<&'doc Value> {
    Walk::new(path, document, ()).map(|(_, value)| value).collect()
}

/// Collect the values reached by every path, concatenated in declaration order.
pub fn expand_all<'doc>(paths: &SearchPaths, document: &'doc Value) -> Vec<&'doc Value> {
    paths
        .iter()
        .flat_map(|path| Walk::new(path, document, ()).map(|(_, value)| value))
        .collect()
}

/// Lazily yield `(position, value)` for every value reached by `path`.
pub fn matches<'p, 'doc>(
    path: &'p SearchPath,
    document: &'doc Value,
) -> Walk<'p, 'doc, Position> {
    Walk::new(path, document, Position::root())
}

// =============================================================================
// Trail
// =============================================================================

/// Breadcrumbs carried along a walk.
///
/// `()` discards them; [`Position`] records the concrete location.
pub trait Trail: Sized {
    fn key(&self, key: &str) -> Self;
    fn index(&self, index: usize) -> Self;
}

impl Trail for () {
    fn key(&self, _key: &str) -> Self {}

    fn index(&self, _index: usize) -> Self {}
}

impl Trail for Position {
    fn key(&self, key: &str) -> Self {
        self.clone().key(key)
    }

    fn index(&self, index: usize) -> Self {
        self.clone().index(index)
    }
}

// =============================================================================
// Walk
// =============================================================================

struct Frame<'doc, T> {
    depth: usize,
    node: &'doc Value,
    trail: T,
}

/// Depth-first iterator over the matches of one path.
pub struct Walk<'p, 'doc, T> {
    segments: &'p [Segment],
    stack: Vec<Frame<'doc, T>>,
}

impl<'p, 'doc, T: Trail> Walk<'p, 'doc, T> {
    pub fn new(path: &'p SearchPath, document: &'doc Value, trail: T) -> Self {
        Self {
            segments: path.segments(),
            stack: vec![Frame {
                depth: 0,
                node: document,
                trail,
            }],
        }
    }
}

impl<'doc, T: Trail> Iterator for Walk<'_, 'doc, T> {
    type Item = (T, &'doc Value);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(Frame { depth, node, trail }) = self.stack.pop() {
            match self.segments.get(depth) {
                None => return Some((trail, node)),
                Some(Segment::Wildcard) => {
                    let Value::Array(items) = node else {
                        continue;
                    };
                    // Reversed so the lowest index is popped first.
                    for (index, item) in items.iter().enumerate().rev() {
                        self.stack.push(Frame {
                            depth: depth + 1,
                            node: item,
                            trail: trail.index(index),
                        });
                    }
                }
                Some(Segment::Key(key)) => match node {
                    Value::Object(map) => {
                        if let Some(child) = map.get(key) {
                            self.stack.push(Frame {
                                depth: depth + 1,
                                node: child,
                                trail: trail.key(key),
                            });
                        }
                    }
                    Value::Array(items) => {
                        if let Some((index, child)) =
                            parse_index(key).and_then(|i| items.get(i).map(|c| (i, c)))
                        {
                            self.stack.push(Frame {
                                depth: depth + 1,
                                node: child,
                                trail: trail.index(index),
                            });
                        }
                    }
                    _ => {}
                },
            }
        }
        None
    }
}

/// Canonical decimal array index: no sign, no leading zeros.
fn parse_index(key: &str) -> Option<usize> {
    let index = key.parse::<usize>().ok()?;
    (index.to_string() == key).then_some(index)
}
