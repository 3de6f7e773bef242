//! Trie vertex for the path tree.
//!
//! A node owns one edge fragment plus its children. Static children are
//! indexed by the first byte of their fragment in `indices`, which runs
//! parallel to the front of `children`. A wildcard child (`:name` or `*name`)
//! is never indexed; when present it is always the last element of
//! `children` and `wild_child` is set.

use std::fmt::{self, Write};
use std::sync::Arc;

/// Classification of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeKind {
    /// Literal fragment matched byte for byte
    Static,
    /// The single root of a tree; its fragment is always empty
    Root,
    /// `:name`, matches one path segment
    Param,
    /// `*name`, matches the rest of the path
    CatchAll,
}

impl NodeKind {
    pub(crate) fn is_wildcard(self) -> bool {
        matches!(self, NodeKind::Param | NodeKind::CatchAll)
    }

    fn label(self) -> &'static str {
        match self {
            NodeKind::Static => "static",
            NodeKind::Root => "root",
            NodeKind::Param => "param",
            NodeKind::CatchAll => "catch-all",
        }
    }
}

#[derive(Clone)]
pub(crate) struct Node<T> {
    /// Bytes consumed by this edge. Kept as bytes because a prefix split may
    /// fall inside a multi-byte character.
    pub(crate) fragment: Vec<u8>,
    pub(crate) kind: NodeKind,
    /// Wildcard name without its sigil, set for `Param` and `CatchAll` nodes
    pub(crate) param_name: Option<Arc<str>>,
    /// First byte of each static child, same order as `children`
    indices: Vec<u8>,
    pub(crate) children: Vec<Node<T>>,
    wild_child: bool,
    pub(crate) handler: Option<T>,
    /// Route that terminates here, kept for diagnostics and error messages
    pub(crate) full_path: Option<Box<str>>,
    /// Number of insertions that walked through this node
    pub(crate) visits: u32,
}

impl<T> Node<T> {
    pub(crate) fn root() -> Self {
        Self::with_kind(Vec::new(), NodeKind::Root, None)
    }

    pub(crate) fn new_static(fragment: &[u8]) -> Self {
        Self::with_kind(fragment.to_vec(), NodeKind::Static, None)
    }

    /// Build a wildcard node from its full fragment, sigil included
    pub(crate) fn new_wildcard(fragment: &str) -> Self {
        let kind = if fragment.starts_with('*') {
            NodeKind::CatchAll
        } else {
            NodeKind::Param
        };
        let name: Arc<str> = Arc::from(&fragment[1..]);
        Self::with_kind(fragment.as_bytes().to_vec(), kind, Some(name))
    }

    fn with_kind(fragment: Vec<u8>, kind: NodeKind, param_name: Option<Arc<str>>) -> Self {
        Self {
            fragment,
            kind,
            param_name,
            indices: Vec::new(),
            children: Vec::new(),
            wild_child: false,
            handler: None,
            full_path: None,
            visits: 0,
        }
    }

    /// Attach a child and return its position in `children`.
    ///
    /// Static children are placed ahead of the wildcard child so the wildcard
    /// stays last. Callers guarantee the child's first byte is not already
    /// indexed and that at most one wildcard child is added.
    pub(crate) fn add_child(&mut self, child: Node<T>) -> usize {
        if child.kind.is_wildcard() {
            self.wild_child = true;
            self.children.push(child);
            return self.children.len() - 1;
        }

        let first = child.fragment.first().copied().unwrap_or_default();
        let pos = self.indices.len();
        self.indices.push(first);
        self.children.insert(pos, child);
        pos
    }

    /// Position of the static child whose fragment starts with `first`
    pub(crate) fn find_child(&self, first: u8) -> Option<usize> {
        self.indices.iter().position(|&b| b == first)
    }

    pub(crate) fn static_child(&self, first: u8) -> Option<&Node<T>> {
        self.find_child(first).map(|i| &self.children[i])
    }

    /// Position of the wildcard child, if any
    pub(crate) fn wild_child_index(&self) -> Option<usize> {
        if self.wild_child {
            Some(self.children.len() - 1)
        } else {
            None
        }
    }

    pub(crate) fn get_wild_child(&self) -> Option<&Node<T>> {
        if self.wild_child {
            self.children.last()
        } else {
            None
        }
    }

    #[cfg(test)]
    pub(crate) fn has_wild_child(&self) -> bool {
        self.wild_child
    }

    /// Split this edge at byte offset `at`.
    ///
    /// The node keeps `fragment[..at]` and becomes static; a single new child
    /// takes over the suffix together with the original kind, children,
    /// handler, route and visit count.
    pub(crate) fn split_at(&mut self, at: usize) {
        let suffix = Node {
            fragment: self.fragment.split_off(at),
            kind: self.kind,
            param_name: self.param_name.take(),
            indices: std::mem::take(&mut self.indices),
            children: std::mem::take(&mut self.children),
            wild_child: std::mem::replace(&mut self.wild_child, false),
            handler: self.handler.take(),
            full_path: self.full_path.take(),
            visits: self.visits,
        };

        self.kind = NodeKind::Static;
        self.add_child(suffix);
    }

    pub(crate) fn fragment_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.fragment)
    }

    /// Append an indented rendering of this subtree to `out`
    pub(crate) fn render(&self, depth: usize, out: &mut impl Write) -> fmt::Result {
        write!(
            out,
            "{:indent$}{:?} [{}] visits={}",
            "",
            self.fragment_lossy(),
            self.kind.label(),
            self.visits,
            indent = depth * 2
        )?;
        if let Some(route) = &self.full_path {
            write!(out, " => {route}")?;
        }
        out.write_char('\n')?;
        for child in &self.children {
            child.render(depth + 1, out)?;
        }
        Ok(())
    }

    /// Collect the routes that terminate in this subtree
    pub(crate) fn collect_routes<'a>(&'a self, out: &mut Vec<&'a str>) {
        if let Some(route) = &self.full_path {
            out.push(route);
        }
        for child in &self.children {
            child.collect_routes(out);
        }
    }
}
