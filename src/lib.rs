//! # pathtree
//!
//! **pathtree** maps request paths to handlers with a compressed trie (radix
//! tree). Routes are made of literal segments, named parameters (`:id`) and
//! catch-all suffixes (`*path`); lookup cost grows with the length of the
//! path, not with the number of routes.
//!
//! ## Architecture
//!
//! - **[`router`]** - the path tree, the per-method [`Router`] and parameter capture
//! - **[`route_table`]** - YAML/JSON route tables compiled into a `Router`
//! - **[`runtime_config`]** - environment-driven tuning
//! - **[`logging`]** - optional `tracing` subscriber setup
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Startup
//!     participant Router
//!     participant Tree as Tree (per method)
//!     participant Server as Dispatcher (caller)
//!
//!     Startup->>Router: insert(GET, "/users/:id", handler)
//!     Router->>Tree: insert("/users/:id", handler)
//!     Tree-->>Router: Ok / InsertError
//!
//!     Server->>Router: route(GET, "/users/42")
//!     Router->>Tree: lookup("/users/42")
//!     Tree->>Tree: static child first,<br/>then wildcard child
//!     Tree-->>Router: handler + [(id, "42")]
//!     Router-->>Server: RouteMatch
//! ```
//!
//! ## Matching Rules
//!
//! - A literal segment beats a parameter at the same position:
//!   `/users/new` wins over `/users/:id`.
//! - `:name` captures one segment (up to the next `/`); `*name` captures the
//!   rest of the path including `/`. Both need at least one byte.
//! - Matching is exact: `/users/` and `/users` are different routes, and case
//!   matters.
//! - Registering a route twice, or two different wildcard names at the same
//!   position, is rejected at registration time.
//!
//! ## Quick Start
//!
//! ```rust
//! use http::Method;
//! use pathtree::{Router, RuntimeConfig};
//!
//! let mut router = Router::with_config(RuntimeConfig::default());
//! router.insert(Method::GET, "/users/:id", "get_user").unwrap();
//! router.insert(Method::GET, "/users/new", "new_user").unwrap();
//!
//! let m = router.route(&Method::GET, "/users/42").unwrap();
//! assert_eq!(*m.handler, "get_user");
//! assert_eq!(m.get_path_param("id"), Some("42"));
//! ```
//!
//! ## Concurrency
//!
//! Trees and routers are plain data. Build them during startup, then share
//! them immutably (e.g. in an `Arc`) across request threads; lookups take
//! `&self`, never lock and never allocate for up to
//! [`MAX_INLINE_PARAMS`](router::MAX_INLINE_PARAMS) parameters.

pub mod logging;
pub mod route_table;
pub mod router;
pub mod runtime_config;

pub use route_table::{load_route_table, BuiltRouter, RejectReason, RejectedRoute, RouteSpec, RouteTable};
pub use router::{InsertError, Lookup, Param, Params, RouteMatch, Router, Tree};
pub use runtime_config::RuntimeConfig;
