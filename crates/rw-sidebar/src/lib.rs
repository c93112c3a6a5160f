//! Collapsible sidebar route tree rendering for RW.
//!
//! This crate provides:
//! - [`SidebarRouteTree`]: recursive renderer turning a [`RouteNode`](rw_nav::RouteNode)
//!   tree into [`SidebarItem`]s, expanding the branch that contains the current page
//! - [`CollapseWrapper`]: per-branch expand/collapse animation state with a
//!   pointer-event guard while the region moves
//! - [`Scheduler`]: timer capability injected at construction
//! - [`render_html`]: HTML output with a pluggable [`LinkRenderer`]
//!
//! # Quick Start
//!
//! ```
//! use rw_nav::RouteTree;
//! use rw_sidebar::{HtmlLinkRenderer, RenderContext, SidebarRouteTree, render_html};
//!
//! let tree = RouteTree::from_yaml_str(
//!     "title: Root\nroutes:\n  - title: Guide\n    path: /guide.md\n",
//! )
//! .unwrap();
//!
//! let mut sidebar = SidebarRouteTree::default();
//! let items = sidebar.render(&RenderContext::new("/guide"), false, tree.root());
//! let html = render_html(&items, &HtmlLinkRenderer);
//!
//! assert!(html.contains("aria-current=\"page\""));
//! ```

mod animator;
mod collapse;
mod html;
mod item;
mod link;
mod renderer;
mod scheduler;

pub use animator::{
    CollapseView, CollapseWrapper, DEFAULT_COLLAPSE_DURATION, DEFAULT_POINTER_GUARD_MARGIN,
};
pub use collapse::{CollapseProps, collapse_props};
pub use html::render_html;
pub use item::{SidebarItem, count_links, links};
pub use link::{HtmlLinkRenderer, LinkRenderer, SidebarLink};
pub use renderer::{RenderContext, SidebarOptions, SidebarRouteTree};
pub use scheduler::{
    ManualScheduler, NoopScheduler, Scheduler, SchedulerError, Task, TimerHandle, TokioScheduler,
};
