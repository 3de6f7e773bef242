//! Ordered path parameters captured by a lookup.

use smallvec::SmallVec;
use std::collections::HashMap;

/// Maximum number of path parameters before heap allocation.
/// Most REST APIs have ≤4 path params (e.g., /users/:id/posts/:post_id).
pub const MAX_INLINE_PARAMS: usize = 8;

/// One captured parameter.
///
/// `name` borrows from the tree, `value` from the request path, so capturing
/// a parameter never copies string data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

/// Parameters in the order their wildcards appear in the route.
///
/// Stack-allocated for up to [`MAX_INLINE_PARAMS`] entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params<'a> {
    inner: SmallVec<[Param<'a>; MAX_INLINE_PARAMS]>,
}

impl<'a> Params<'a> {
    /// Create an empty list
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Get a parameter value by name
    ///
    /// Uses "last write wins" semantics: if the same name is bound at several
    /// depths (e.g. `/org/:id/user/:id`), the deepest binding is returned.
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.inner
            .iter()
            .rfind(|p| p.name == name)
            .map(|p| p.value)
    }

    /// Iterate in capture order
    pub fn iter(&self) -> std::slice::Iter<'_, Param<'a>> {
        self.inner.iter()
    }

    /// Drop all entries, keeping the inline buffer for reuse
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Convert to an owned map
    /// Note: This allocates - use get() in hot paths instead
    #[must_use]
    pub fn to_map(&self) -> HashMap<String, String> {
        self.inner
            .iter()
            .map(|p| (p.name.to_string(), p.value.to_string()))
            .collect()
    }

    pub(crate) fn push(&mut self, name: &'a str, value: &'a str) {
        self.inner.push(Param { name, value });
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.inner.truncate(len);
    }
}

impl<'p, 'a> IntoIterator for &'p Params<'a> {
    type Item = &'p Param<'a>;
    type IntoIter = std::slice::Iter<'p, Param<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}
