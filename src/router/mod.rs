//! # Router Module
//!
//! Path matching and route resolution built on a compressed trie.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Registering routes with static, `:param` and `*catch_all` segments
//! - Rejecting ambiguous or malformed routes at registration time
//! - Resolving a request path to its handler in time proportional to the path
//! - Extracting path parameters in declaration order
//!
//! ## Architecture
//!
//! - [`Tree`] - one radix tree; `insert` at startup, `lookup` per request
//! - [`Router`] - one `Tree` per HTTP method
//! - [`Params`] - ordered `(name, value)` pairs borrowed from the tree and path
//! - [`InsertError`] - why a route was rejected
//!
//! ## Example
//!
//! ```rust
//! use http::Method;
//! use pathtree::router::Router;
//! use pathtree::runtime_config::RuntimeConfig;
//!
//! let mut router = Router::with_config(RuntimeConfig::default());
//! router.insert(Method::GET, "/posts/:category/:id", 1).unwrap();
//! router.insert(Method::GET, "/files/*filepath", 2).unwrap();
//!
//! let m = router.route(&Method::GET, "/posts/tech/42").unwrap();
//! assert_eq!(*m.handler, 1);
//! assert_eq!(m.get_path_param("category"), Some("tech"));
//! assert_eq!(m.get_path_param("id"), Some("42"));
//!
//! let m = router.route(&Method::GET, "/files/a/b/c.txt").unwrap();
//! assert_eq!(m.get_path_param("filepath"), Some("a/b/c.txt"));
//! ```

mod core;
mod error;
mod node;
mod params;
mod tree;

pub use core::{RouteMatch, Router};
pub use error::InsertError;
pub use params::{Param, Params, MAX_INLINE_PARAMS};
pub use tree::{Lookup, Tree};
