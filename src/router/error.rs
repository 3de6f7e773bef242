use std::fmt;

/// Route registration error
///
/// Returned by [`Tree::insert`](super::Tree::insert) and
/// [`Router::insert`](super::Router::insert). Every variant describes a static
/// configuration mistake; the tree stays usable and later routes can still be
/// registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertError {
    /// The route path is empty
    EmptyPath,
    /// The route path does not start with `/`
    MissingLeadingSlash {
        /// The rejected route
        path: String,
    },
    /// `:` or `*` directly followed by `/` or the end of the path
    EmptyWildcardName {
        /// The rejected route
        path: String,
    },
    /// More than one wildcard inside a single path segment (e.g. `/:a:b`)
    MultipleWildcards {
        /// The rejected route
        path: String,
    },
    /// A catch-all segment is followed by more path
    CatchAllNotLast {
        /// The rejected route
        path: String,
    },
    /// A route with the same path is already registered
    DuplicateRoute {
        /// The rejected route
        path: String,
    },
    /// A different wildcard is already registered at the same position
    WildcardConflict {
        /// The rejected route
        path: String,
        /// Wildcard the rejected route wanted at this position
        wildcard: String,
        /// Wildcard already registered at this position
        existing: String,
    },
    /// The tree reached a state that insertion never produces
    InvariantViolation {
        /// The route being inserted when the violation was found
        path: String,
    },
}

impl fmt::Display for InsertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsertError::EmptyPath => write!(f, "route path must not be empty"),
            InsertError::MissingLeadingSlash { path } => {
                write!(f, "route path '{}' must start with '/'", path)
            }
            InsertError::EmptyWildcardName { path } => {
                write!(
                    f,
                    "wildcard in route '{}' must be named (e.g. ':id' or '*path')",
                    path
                )
            }
            InsertError::MultipleWildcards { path } => {
                write!(
                    f,
                    "route '{}' has more than one wildcard in a single segment",
                    path
                )
            }
            InsertError::CatchAllNotLast { path } => {
                write!(
                    f,
                    "catch-all must be the last segment of route '{}'",
                    path
                )
            }
            InsertError::DuplicateRoute { path } => {
                write!(f, "route '{}' is already registered", path)
            }
            InsertError::WildcardConflict {
                path,
                wildcard,
                existing,
            } => {
                write!(
                    f,
                    "wildcard '{}' in route '{}' conflicts with existing wildcard '{}' at the same position",
                    wildcard, path, existing
                )
            }
            InsertError::InvariantViolation { path } => {
                write!(
                    f,
                    "internal tree invariant violated while inserting route '{}'",
                    path
                )
            }
        }
    }
}

impl std::error::Error for InsertError {}
