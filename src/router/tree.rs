//! Compressed trie (radix tree) mapping route paths to handlers.
//!
//! Routes are written with three kinds of segments:
//!
//! - static bytes, matched literally (`/users/new`)
//! - `:name`, matching one path segment up to the next `/` (`/users/:id`)
//! - `*name`, matching everything that remains, `/` included (`/files/*filepath`)
//!
//! ## Insertion
//!
//! Insertion walks from the root consuming the route. A static child whose
//! fragment only partially overlaps the remaining route is split at the
//! longest common prefix: the child keeps the shared bytes and a new node
//! below it inherits the old suffix, kind, children, handler and visit count.
//! Wildcards occupy a dedicated child slot; once a wildcard is registered at a
//! position every other route through that position must spell it the same
//! way.
//!
//! ## Lookup
//!
//! Lookup consumes the request path against node fragments. At every node the
//! static child is tried before the wildcard child, so `/users/new` wins over
//! `/users/:id`. If the static branch dead-ends further down, the wildcard
//! branch is tried with any parameters from the failed branch discarded.
//! Matching is byte-exact: no trailing-slash or case folding.
//!
//! ## Concurrency
//!
//! `Tree` has no interior mutability. Build it once, then share it (for
//! example behind an `Arc`) and call [`Tree::lookup`] from any number of
//! threads; the borrow checker rules out an `insert` racing a `lookup`.
//!
//! ```rust
//! use pathtree::router::Tree;
//!
//! let mut tree = Tree::new();
//! tree.insert("/users/:id", "get_user").unwrap();
//! tree.insert("/users/new", "new_user").unwrap();
//!
//! let hit = tree.lookup("/users/42");
//! assert_eq!(hit.handler, Some(&"get_user"));
//! assert_eq!(hit.params.get("id"), Some("42"));
//!
//! assert_eq!(tree.lookup("/users/new").handler, Some(&"new_user"));
//! ```

use std::fmt;

use super::error::InsertError;
use super::node::{Node, NodeKind};
use super::params::Params;

/// Radix tree of routes for a single HTTP method
///
/// `T` is the caller's handler payload (a function, an index into a handler
/// table, ...). The tree stores it and hands back references; it never calls
/// or inspects it.
#[derive(Clone)]
pub struct Tree<T> {
    root: Node<T>,
    len: usize,
}

/// Result of [`Tree::lookup`]
#[derive(Debug)]
pub struct Lookup<'a, T> {
    /// Handler of the matched route, `None` when nothing matched
    pub handler: Option<&'a T>,
    /// Captured parameters; always empty when nothing matched
    pub params: Params<'a>,
}

impl<T> Lookup<'_, T> {
    /// Whether a route matched
    #[inline]
    #[must_use]
    pub fn found(&self) -> bool {
        self.handler.is_some()
    }
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Tree<T> {
    /// Create an empty tree
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: Node::root(),
            len: 0,
        }
    }

    /// Number of registered routes
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Register `handler` for `path`.
    ///
    /// The path is validated before the tree is touched. A rejected route
    /// leaves every existing route resolving exactly as before, so callers may
    /// log the error and carry on registering the rest of their routes.
    ///
    /// # Errors
    ///
    /// See [`InsertError`] for the rejected shapes: empty or relative paths,
    /// unnamed or doubled wildcards, a catch-all that is not last, a path that
    /// is already registered, or a wildcard whose name differs from the one
    /// already registered at the same position.
    pub fn insert(&mut self, path: &str, handler: T) -> Result<(), InsertError> {
        validate(path)?;

        let bytes = path.as_bytes();
        // Child positions walked from the root; visits are only counted once
        // the route is committed.
        let mut trail: Vec<usize> = Vec::new();
        let mut node = &mut self.root;
        // The bare "/" route lives on the root itself.
        let mut pos = if path == "/" { 1 } else { 0 };

        loop {
            let Some(&first) = bytes.get(pos) else {
                if node.handler.is_some() {
                    return Err(InsertError::DuplicateRoute {
                        path: path.to_string(),
                    });
                }
                node.handler = Some(handler);
                node.full_path = Some(path.into());
                self.len += 1;
                self.record_visits(&trail);
                return Ok(());
            };

            if first == b':' || first == b'*' {
                let end = segment_end(bytes, pos);
                let wildcard = &path[pos..end];
                let idx = match node.wild_child_index() {
                    Some(i) => {
                        let existing = &node.children[i];
                        if existing.fragment != wildcard.as_bytes() {
                            return Err(InsertError::WildcardConflict {
                                path: path.to_string(),
                                wildcard: wildcard.to_string(),
                                existing: existing.fragment_lossy().into_owned(),
                            });
                        }
                        i
                    }
                    None => node.add_child(Node::new_wildcard(wildcard)),
                };
                trail.push(idx);
                node = &mut node.children[idx];
                pos = end;
                continue;
            }

            match node.find_child(first) {
                Some(i) => {
                    let child = &mut node.children[i];
                    let common = longest_common_prefix(&bytes[pos..], &child.fragment);
                    if common == 0 {
                        return Err(InsertError::InvariantViolation {
                            path: path.to_string(),
                        });
                    }
                    if common < child.fragment.len() {
                        child.split_at(common);
                    }
                    trail.push(i);
                    pos += common;
                    node = child;
                }
                None => {
                    // A new static leaf runs up to the next wildcard, if any.
                    let end = bytes[pos..]
                        .iter()
                        .position(|&b| b == b':' || b == b'*')
                        .map_or(bytes.len(), |i| pos + i);
                    let idx = node.add_child(Node::new_static(&bytes[pos..end]));
                    trail.push(idx);
                    node = &mut node.children[idx];
                    pos = end;
                }
            }
        }
    }

    /// Count one insertion on the root and on every node along `trail`
    fn record_visits(&mut self, trail: &[usize]) {
        let mut node = &mut self.root;
        node.visits += 1;
        for &i in trail {
            node = &mut node.children[i];
            node.visits += 1;
        }
    }

    /// Resolve `path` to its handler and parameters.
    ///
    /// Never fails; a miss is reported through [`Lookup::found`].
    #[must_use]
    pub fn lookup<'a>(&'a self, path: &'a str) -> Lookup<'a, T> {
        let mut params = Params::new();
        let handler = self.lookup_into(path, &mut params);
        Lookup { handler, params }
    }

    /// Resolve `path`, appending captured parameters to `params`.
    ///
    /// On a miss `params` is left at the length it had on entry, which lets a
    /// caller reuse one container across lookups.
    pub fn lookup_into<'a>(&'a self, path: &'a str, params: &mut Params<'a>) -> Option<&'a T> {
        if path.is_empty() {
            return None;
        }
        if path == "/" {
            return self.root.handler.as_ref();
        }

        let mark = params.len();
        let found = walk(&self.root, path, 0, params);
        if found.is_none() {
            params.truncate(mark);
        }
        found
    }

    /// Registered routes, in tree order
    #[must_use]
    pub fn routes(&self) -> Vec<&str> {
        let mut out = Vec::with_capacity(self.len);
        self.root.collect_routes(&mut out);
        out
    }

    /// Indented rendering of the trie, one node per line
    #[must_use]
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.root.render(0, &mut out).map(|()| out).unwrap_or_default()
    }
}

impl<T> fmt::Debug for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("len", &self.len)
            .field("routes", &self.routes())
            .finish()
    }
}

/// Match the remainder of `path` (from `pos`) below `node`.
///
/// `node`'s own fragment has already been consumed.
fn walk<'a, T>(
    node: &'a Node<T>,
    path: &'a str,
    pos: usize,
    params: &mut Params<'a>,
) -> Option<&'a T> {
    let rest = &path.as_bytes()[pos..];
    let Some(&first) = rest.first() else {
        return node.handler.as_ref();
    };

    if let Some(child) = node.static_child(first) {
        if rest.starts_with(&child.fragment) {
            if let Some(handler) = walk(child, path, pos + child.fragment.len(), params) {
                return Some(handler);
            }
        }
    }

    let wild = node.get_wild_child()?;
    let name = wild.param_name.as_deref()?;

    match wild.kind {
        NodeKind::CatchAll => {
            let handler = wild.handler.as_ref()?;
            params.push(name, &path[pos..]);
            Some(handler)
        }
        _ => {
            let end = rest
                .iter()
                .position(|&b| b == b'/')
                .map_or(path.len(), |i| pos + i);
            if end == pos {
                return None;
            }

            let mark = params.len();
            params.push(name, &path[pos..end]);
            let found = walk(wild, path, end, params);
            if found.is_none() {
                params.truncate(mark);
            }
            found
        }
    }
}

/// Reject malformed routes before any mutation.
fn validate(path: &str) -> Result<(), InsertError> {
    if path.is_empty() {
        return Err(InsertError::EmptyPath);
    }
    if !path.starts_with('/') {
        return Err(InsertError::MissingLeadingSlash {
            path: path.to_string(),
        });
    }

    let bytes = path.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let sigil = bytes[i];
        if sigil != b':' && sigil != b'*' {
            i += 1;
            continue;
        }

        let end = segment_end(bytes, i);
        let name = &bytes[i + 1..end];
        if name.is_empty() {
            return Err(InsertError::EmptyWildcardName {
                path: path.to_string(),
            });
        }
        if name.iter().any(|&b| b == b':' || b == b'*') {
            return Err(InsertError::MultipleWildcards {
                path: path.to_string(),
            });
        }
        if sigil == b'*' && end != bytes.len() {
            return Err(InsertError::CatchAllNotLast {
                path: path.to_string(),
            });
        }
        i = end;
    }

    Ok(())
}

/// Index of the next `/` after `start`, or the end of `bytes`
fn segment_end(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .position(|&b| b == b'/')
        .map_or(bytes.len(), |i| start + i)
}

fn longest_common_prefix(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}
