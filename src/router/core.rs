//! Router core module - per-method dispatch over path trees.
//!
//! One [`Tree`] is kept per HTTP method. A request is resolved with exactly
//! one tree lookup; nothing else on this path allocates except the parameter
//! spill past [`MAX_INLINE_PARAMS`](super::MAX_INLINE_PARAMS).

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]
#![deny(clippy::unnecessary_to_owned)]

use http::Method;
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, warn};

use super::error::InsertError;
use super::params::Params;
use super::tree::Tree;
use crate::runtime_config::RuntimeConfig;

/// Result of successfully matching a request to a route
#[derive(Debug)]
pub struct RouteMatch<'a, T> {
    /// Handler registered for the matched route
    pub handler: &'a T,
    /// Path parameters in route order
    pub path_params: Params<'a>,
}

impl<'a, T> RouteMatch<'a, T> {
    /// Get a path parameter by name
    ///
    /// Uses "last write wins" semantics, see [`Params::get`].
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&'a str> {
        self.path_params.get(name)
    }
}

/// Router that keeps one radix tree per HTTP method
///
/// Build it during startup with [`Router::insert`], then share it read-only
/// between request handlers.
#[derive(Clone)]
pub struct Router<T> {
    trees: HashMap<Method, Tree<T>>,
    config: RuntimeConfig,
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Router<T> {
    /// Create an empty router configured from the environment
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::from_env())
    }

    /// Create an empty router with explicit configuration
    #[must_use]
    pub fn with_config(config: RuntimeConfig) -> Self {
        Self {
            trees: HashMap::new(),
            config,
        }
    }

    /// Register `handler` for `method` and `path`
    ///
    /// # Errors
    ///
    /// Returns the [`InsertError`] produced by the method's tree. The router
    /// is left unchanged for every previously registered route.
    pub fn insert(&mut self, method: Method, path: &str, handler: T) -> Result<(), InsertError> {
        let tree = self.trees.entry(method.clone()).or_default();
        let result = tree.insert(path, handler);
        if result.is_err() && tree.is_empty() {
            self.trees.remove(&method);
        }

        match &result {
            Ok(()) => debug!(method = %method, path = %path, "Route registered"),
            Err(err) => warn!(
                method = %method,
                path = %path,
                error = %err,
                "Route registration rejected"
            ),
        }
        result
    }

    /// Match a request to a route
    ///
    /// # Returns
    ///
    /// * `Some(RouteMatch)` - If a matching route is found
    /// * `None` - If no route matches (results in 404 or 405)
    #[must_use]
    pub fn route<'a>(&'a self, method: &Method, path: &'a str) -> Option<RouteMatch<'a, T>> {
        let tree = self.trees.get(method)?;

        let match_start = Instant::now();
        let lookup = tree.lookup(path);
        let match_duration = match_start.elapsed();

        let Some(handler) = lookup.handler else {
            debug!(
                method = %method,
                path = %path,
                duration_us = match_duration.as_micros(),
                "No route matched"
            );
            return None;
        };

        if match_duration >= self.config.slow_lookup {
            warn!(
                method = %method,
                path = %path,
                path_params = ?lookup.params,
                duration_us = match_duration.as_micros(),
                "Slow route matching detected"
            );
        } else {
            debug!(
                method = %method,
                path = %path,
                path_params = ?lookup.params,
                duration_us = match_duration.as_micros(),
                "Route matched"
            );
        }

        Some(RouteMatch {
            handler,
            path_params: lookup.params,
        })
    }

    /// Methods whose tree resolves `path`, for building a 405 `Allow` header
    #[must_use]
    pub fn allowed_methods(&self, path: &str) -> Vec<Method> {
        let mut methods: Vec<Method> = self
            .trees
            .iter()
            .filter(|(_, tree)| tree.lookup(path).found())
            .map(|(method, _)| method.clone())
            .collect();
        methods.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        methods
    }

    /// Total number of registered routes across all methods
    #[must_use]
    pub fn route_count(&self) -> usize {
        self.trees.values().map(Tree::len).sum()
    }

    /// Tree for a single method, if any route was registered for it
    #[must_use]
    pub fn tree(&self, method: &Method) -> Option<&Tree<T>> {
        self.trees.get(method)
    }

    /// All registered `(method, path)` pairs, sorted by method then path
    #[must_use]
    pub fn route_patterns(&self) -> Vec<(Method, String)> {
        let mut patterns: Vec<(Method, String)> = self
            .trees
            .iter()
            .flat_map(|(method, tree)| {
                tree.routes()
                    .into_iter()
                    .map(move |path| (method.clone(), path.to_owned()))
            })
            .collect();
        patterns.sort_by(|a, b| (a.0.as_str(), &a.1).cmp(&(b.0.as_str(), &b.1)));
        patterns
    }

    /// Log the shape of every tree at `debug`
    pub fn dump_routes(&self) {
        for (method, tree) in &self.trees {
            debug!(
                method = %method,
                routes_count = tree.len(),
                tree = %tree.dump(),
                "Routing tree"
            );
        }
    }
}
