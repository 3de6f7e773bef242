//! # Route Table Module
//!
//! Declarative route tables loaded from YAML or JSON and compiled into a
//! [`Router`].
//!
//! ## Format
//!
//! ```yaml
//! routes:
//!   - method: GET
//!     path: /users/:id
//!     handler: get_user
//!   - method: GET
//!     path: /files/*filepath
//!     handler: serve_file
//! ```
//!
//! The router built from a table stores each route's position in
//! [`RouteTable::routes`] as its handler, so the table stays the owner of the
//! handler names and the router only hands back indices.
//!
//! ## Rejected routes
//!
//! A route with an unsupported method or a path the tree rejects is logged at
//! `warn` and skipped, and the rest of the table still loads. With
//! [`RuntimeConfig::strict_routes`] set the first rejection fails the build
//! instead.

use anyhow::{bail, Context, Result};
use http::Method;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::{info, warn};

use crate::router::{InsertError, Router};
use crate::runtime_config::RuntimeConfig;

/// Methods a route table may register
const SUPPORTED_METHODS: [Method; 8] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::PATCH,
    Method::OPTIONS,
    Method::HEAD,
    Method::TRACE,
];

/// One declared route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSpec {
    /// HTTP method, case-insensitive (`GET`, `post`, ...)
    pub method: String,
    /// Route path, e.g. `/users/:id`
    pub path: String,
    /// Caller-defined handler name
    pub handler: String,
}

/// Ordered list of declared routes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTable {
    #[serde(default)]
    pub routes: Vec<RouteSpec>,
}

/// Why a declared route was not registered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// The method is not one of the supported HTTP methods
    UnsupportedMethod(String),
    /// The tree refused the path
    Insert(InsertError),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::UnsupportedMethod(method) => {
                write!(f, "unsupported HTTP method '{}'", method)
            }
            RejectReason::Insert(err) => write!(f, "{}", err),
        }
    }
}

/// A declared route that was skipped while building the router
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRoute {
    /// Position of the route in [`RouteTable::routes`]
    pub index: usize,
    pub method: String,
    pub path: String,
    pub reason: RejectReason,
}

/// Router compiled from a [`RouteTable`]
#[derive(Clone)]
pub struct BuiltRouter {
    /// Handlers are indices into [`RouteTable::routes`]
    pub router: Router<usize>,
    /// Routes that were logged and skipped
    pub rejected: Vec<RejectedRoute>,
}

impl RouteTable {
    /// Parse a YAML route table
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse YAML route table")
    }

    /// Parse a JSON route table
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse JSON route table")
    }

    /// Declared route for a handler index returned by the router
    #[must_use]
    pub fn route_spec(&self, index: usize) -> Option<&RouteSpec> {
        self.routes.get(index)
    }

    /// Register every declared route, in order, into a fresh router.
    ///
    /// # Errors
    ///
    /// Only fails when `config.strict_routes` is set and a route is rejected.
    pub fn build_router(&self, config: &RuntimeConfig) -> Result<BuiltRouter> {
        let mut router = Router::with_config(*config);
        let mut rejected = Vec::new();

        for (index, spec) in self.routes.iter().enumerate() {
            let outcome = match parse_method(&spec.method) {
                Some(method) => router
                    .insert(method, &spec.path, index)
                    .map_err(RejectReason::Insert),
                None => Err(RejectReason::UnsupportedMethod(spec.method.clone())),
            };

            let Err(reason) = outcome else {
                continue;
            };

            if config.strict_routes {
                bail!(
                    "route #{} {} {} rejected: {}",
                    index,
                    spec.method,
                    spec.path,
                    reason
                );
            }

            warn!(
                index,
                method = %spec.method,
                path = %spec.path,
                handler = %spec.handler,
                reason = %reason,
                "Skipping rejected route"
            );
            rejected.push(RejectedRoute {
                index,
                method: spec.method.clone(),
                path: spec.path.clone(),
                reason,
            });
        }

        info!(
            routes_count = router.route_count(),
            rejected_count = rejected.len(),
            "Routing table loaded"
        );

        Ok(BuiltRouter { router, rejected })
    }
}

/// Load a route table from disk; `.yaml`/`.yml` files are read as YAML,
/// everything else as JSON.
pub fn load_route_table(file_path: impl AsRef<Path>) -> Result<RouteTable> {
    let file_path = file_path.as_ref();
    let content = std::fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read route table {}", file_path.display()))?;

    let is_yaml = matches!(
        file_path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let table = if is_yaml {
        RouteTable::from_yaml_str(&content)
    } else {
        RouteTable::from_json_str(&content)
    };
    table.with_context(|| format!("Invalid route table {}", file_path.display()))
}

fn parse_method(raw: &str) -> Option<Method> {
    let method = Method::from_bytes(raw.trim().to_ascii_uppercase().as_bytes()).ok()?;
    SUPPORTED_METHODS.contains(&method).then_some(method)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = r#"
routes:
  - method: GET
    path: /users/:id
    handler: get_user
  - method: get
    path: /users/new
    handler: new_user_form
  - method: POST
    path: /users
    handler: create_user
  - method: GET
    path: /users/:name
    handler: conflicting
  - method: BREW
    path: /coffee
    handler: teapot
"#;

    #[test]
    fn test_parse_method() {
        assert_eq!(parse_method("get"), Some(Method::GET));
        assert_eq!(parse_method(" Delete "), Some(Method::DELETE));
        assert_eq!(parse_method("CONNECT"), None);
        assert_eq!(parse_method("BREW"), None);
        assert_eq!(parse_method("not a method"), None);
    }

    #[test]
    fn test_build_router_skips_rejected_routes() {
        let table = RouteTable::from_yaml_str(TABLE).unwrap();
        assert_eq!(table.routes.len(), 5);

        let built = table.build_router(&RuntimeConfig::default()).unwrap();
        assert_eq!(built.router.route_count(), 3);
        assert_eq!(built.rejected.len(), 2);

        assert_eq!(built.rejected[0].index, 3);
        assert!(matches!(
            built.rejected[0].reason,
            RejectReason::Insert(InsertError::WildcardConflict { .. })
        ));
        assert_eq!(built.rejected[1].index, 4);
        assert_eq!(
            built.rejected[1].reason,
            RejectReason::UnsupportedMethod("BREW".to_string())
        );

        let m = built.router.route(&Method::GET, "/users/new").unwrap();
        assert_eq!(table.route_spec(*m.handler).map(|r| r.handler.as_str()), Some("new_user_form"));

        let m = built.router.route(&Method::GET, "/users/9").unwrap();
        assert_eq!(table.route_spec(*m.handler).map(|r| r.handler.as_str()), Some("get_user"));
        assert_eq!(m.get_path_param("id"), Some("9"));
    }

    #[test]
    fn test_strict_build_fails_on_first_rejection() {
        let table = RouteTable::from_yaml_str(TABLE).unwrap();
        let config = RuntimeConfig {
            strict_routes: true,
            ..RuntimeConfig::default()
        };
        let err = table.build_router(&config).err().unwrap();
        let msg = err.to_string();
        assert!(msg.contains("route #3"), "{msg}");
        assert!(msg.contains("/users/:name"), "{msg}");
    }

    #[test]
    fn test_json_table() {
        let table = RouteTable::from_json_str(
            r#"{"routes":[{"method":"GET","path":"/files/*filepath","handler":"serve"}]}"#,
        )
        .unwrap();
        let built = table.build_router(&RuntimeConfig::default()).unwrap();
        let m = built.router.route(&Method::GET, "/files/a/b.txt").unwrap();
        assert_eq!(*m.handler, 0);
        assert_eq!(m.get_path_param("filepath"), Some("a/b.txt"));
    }

    #[test]
    fn test_empty_and_malformed_tables() {
        assert_eq!(RouteTable::from_yaml_str("{}").unwrap(), RouteTable::default());
        assert!(RouteTable::from_yaml_str("routes: [ { method: GET } ]").is_err());
        assert!(RouteTable::from_json_str("not json").is_err());
    }
}
