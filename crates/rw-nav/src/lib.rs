//! Navigation route tree model for RW.
//!
//! This crate provides:
//! - [`RouteNode`]: one entry of the sidebar navigation tree
//! - [`RouteTree`]: loading route trees from YAML or JSON files
//! - [`RouteMetaResolver`]: breadcrumbs and current/previous/next route lookup
//! - [`path`]: helpers for comparing route paths with the current location
//!
//! # Example
//!
//! ```
//! use rw_nav::{Location, RouteMetaResolver, RouteTree, TreeRouteMeta};
//!
//! let tree = RouteTree::from_yaml_str(
//!     "title: Root\nroutes:\n  - title: Learn\n    path: /learn\n    routes:\n      - title: Install\n        path: /learn/install\n",
//! )
//! .unwrap();
//!
//! let meta = TreeRouteMeta.route_meta(&Location::new("/learn/install#setup"), tree.root());
//! assert_eq!(meta.route.unwrap().title, "Install");
//! assert_eq!(meta.breadcrumbs.len(), 2);
//! ```

mod error;
mod meta;
pub mod path;
mod route;

pub use error::NavError;
pub use meta::{Location, NOT_FOUND_PATH, RouteLink, RouteMeta, RouteMetaResolver, TreeRouteMeta};
pub use route::{RouteNode, RouteTree};
