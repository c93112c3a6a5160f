//! Recursive sidebar route tree renderer.
//!
//! # Architecture
//!
//! Each nesting level is rendered from scratch on every pass:
//! - the current pathname and the breadcrumbs of the level decide which
//!   single child branch is expanded (first match wins)
//! - each child becomes a heading group, an expandable branch or a leaf
//! - branches keep a [`CollapseWrapper`] across passes, keyed by title,
//!   path and level under their parent, so expansion changes animate
//!
//! Wrappers of branches that disappear from a pass are dropped, which
//! cancels their pending timers.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use rw_nav::path::{EXTERNAL_LINK_PREFIX, SUFFIX_DELIMITER, is_external};
use rw_nav::{Location, RouteMetaResolver, RouteNode, TreeRouteMeta};

use crate::animator::{CollapseWrapper, DEFAULT_COLLAPSE_DURATION, DEFAULT_POINTER_GUARD_MARGIN};
use crate::item::SidebarItem;
use crate::link::SidebarLink;
use crate::scheduler::{NoopScheduler, Scheduler};

/// Rendering options of a sidebar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SidebarOptions {
    /// Expand/collapse animation duration.
    pub collapse_duration: Duration,
    /// Extra time pointer events stay disabled after an animation.
    pub pointer_guard_margin: Duration,
    /// Paths starting with this prefix are linked unchanged.
    pub external_link_prefix: String,
    /// Delimiter whose last occurrence starts the strippable path suffix.
    pub suffix_delimiter: String,
}

impl Default for SidebarOptions {
    fn default() -> Self {
        Self {
            collapse_duration: DEFAULT_COLLAPSE_DURATION,
            pointer_guard_margin: DEFAULT_POINTER_GUARD_MARGIN,
            external_link_prefix: EXTERNAL_LINK_PREFIX.to_owned(),
            suffix_delimiter: SUFFIX_DELIMITER.to_owned(),
        }
    }
}

/// Inputs supplied by the host for one render pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderContext {
    /// Current location.
    pub location: Location,
    /// Path of a navigation in flight, if any.
    pub pending_route: Option<String>,
}

impl RenderContext {
    /// Create a context for the given address-bar path.
    #[must_use]
    pub fn new(as_path: impl Into<String>) -> Self {
        Self {
            location: Location::new(as_path),
            pending_route: None,
        }
    }

    /// Set the in-flight navigation target.
    #[must_use]
    pub fn with_pending_route(mut self, pending_route: impl Into<String>) -> Self {
        self.pending_route = Some(pending_route.into());
        self
    }
}

/// Collapsible, nested sidebar navigation.
///
/// Owns the per-branch animation state, so the same instance should be
/// reused across renders of the same sidebar.
///
/// # Example
///
/// ```
/// use rw_nav::RouteNode;
/// use rw_sidebar::{RenderContext, SidebarItem, SidebarRouteTree};
///
/// let tree = RouteNode::branch(
///     "Root",
///     None,
///     vec![RouteNode::branch(
///         "A",
///         Some("/a/index"),
///         vec![RouteNode::leaf("B", "/a/b")],
///     )],
/// );
///
/// let mut sidebar = SidebarRouteTree::default();
/// let items = sidebar.render(&RenderContext::new("/a/b"), false, &tree);
///
/// let SidebarItem::Branch { collapse, children, .. } = &items[0] else {
///     panic!("expected a branch");
/// };
/// assert!(collapse.is_expanded);
/// assert!(children[0].link().unwrap().selected);
/// ```
pub struct SidebarRouteTree {
    options: SidebarOptions,
    resolver: Box<dyn RouteMetaResolver>,
    scheduler: Arc<dyn Scheduler>,
    regions: HashMap<String, CollapseWrapper>,
}

impl Default for SidebarRouteTree {
    fn default() -> Self {
        Self::new(SidebarOptions::default())
    }
}

/// Per-pass state shared by all levels.
struct Pass<'a> {
    ctx: &'a RenderContext,
    is_force_expanded: bool,
    mounted: HashSet<String>,
}

impl SidebarRouteTree {
    /// Create a non-interactive sidebar with the default route metadata resolver.
    #[must_use]
    pub fn new(options: SidebarOptions) -> Self {
        Self {
            options,
            resolver: Box::new(TreeRouteMeta),
            scheduler: Arc::new(NoopScheduler),
            regions: HashMap::new(),
        }
    }

    /// Use `scheduler` for pointer-guard timers.
    ///
    /// Only affects branches first rendered after this call.
    #[must_use]
    pub fn with_scheduler(mut self, scheduler: Arc<dyn Scheduler>) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// Use `resolver` for breadcrumb lookup.
    #[must_use]
    pub fn with_resolver(mut self, resolver: impl RouteMetaResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    /// Rendering options.
    pub fn options(&self) -> &SidebarOptions {
        &self.options
    }

    /// Number of collapsible regions kept from the last pass.
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// Whether any collapsible region currently blocks pointer input.
    pub fn is_animating(&self) -> bool {
        self.regions
            .values()
            .any(|region| !region.pointer_events_enabled())
    }

    /// Render the top level of `route_tree`.
    pub fn render(
        &mut self,
        ctx: &RenderContext,
        is_force_expanded: bool,
        route_tree: &RouteNode,
    ) -> Vec<SidebarItem> {
        self.render_level(ctx, is_force_expanded, route_tree, 0)
    }

    /// Render `route_tree` with its children at nesting `level`.
    pub fn render_level(
        &mut self,
        ctx: &RenderContext,
        is_force_expanded: bool,
        route_tree: &RouteNode,
        level: usize,
    ) -> Vec<SidebarItem> {
        let mut pass = Pass {
            ctx,
            is_force_expanded,
            mounted: HashSet::new(),
        };

        let items = self.render_routes(&mut pass, route_tree, level, "");

        let before = self.regions.len();
        self.regions.retain(|key, _| pass.mounted.contains(key));
        let unmounted = before - self.regions.len();
        if unmounted > 0 {
            tracing::debug!(unmounted, "Dropped collapsible regions no longer rendered");
        }

        items
    }

    fn render_routes(
        &mut self,
        pass: &mut Pass<'_>,
        route_tree: &RouteNode,
        level: usize,
        parent_key: &str,
    ) -> Vec<SidebarItem> {
        let ctx = pass.ctx;
        let location = &ctx.location;
        let slug = location.pathname();
        let meta = self.resolver.route_meta(location, route_tree);

        let expanded_path = route_tree.children().iter().find_map(|route| {
            let path = route.path.as_deref().filter(|path| !path.is_empty())?;
            (meta.is_breadcrumb(path) || path == slug).then_some(path)
        });
        tracing::trace!(level, expanded_path, "Selected expanded route");

        let delimiter = self.options.suffix_delimiter.clone();
        let mut items = Vec::with_capacity(route_tree.children().len());

        for (index, route) in route_tree.children().iter().enumerate() {
            if route.has_separator {
                items.push(SidebarItem::Separator);
            }

            let (Some(path), Some(page_path), false) = (
                route.path.as_deref(),
                route.page_path(&delimiter),
                route.heading,
            ) else {
                let key = format!("{parent_key}/#{index}");
                let nested = self.render_routes(pass, &route.subtree(), level + 1, &key);
                items.push(SidebarItem::Group {
                    level: level + 1,
                    items: nested,
                });
                continue;
            };

            let selected = slug == page_path;
            let is_pending = ctx.pending_route.as_deref() == Some(page_path);

            if route.has_children() {
                let is_expanded = pass.is_force_expanded || expanded_path == Some(path);
                let key = format!("{parent_key}/{}-{path}-{level}", route.title);

                let link = SidebarLink {
                    href: page_path.to_owned(),
                    is_pending,
                    selected,
                    level,
                    title: route.title.clone(),
                    wip: route.wip,
                    is_expanded: Some(is_expanded),
                    is_breadcrumb: expanded_path == Some(path),
                    hide_arrow: pass.is_force_expanded,
                };

                let collapse = self.mount_region(pass, &key, is_expanded).view();
                let children = self.render_routes(pass, &route.subtree(), level + 1, &key);

                items.push(SidebarItem::Branch {
                    link,
                    collapse,
                    children,
                });
            } else {
                let href = if is_external(path, &self.options.external_link_prefix) {
                    path
                } else {
                    page_path
                };

                items.push(SidebarItem::Link(SidebarLink {
                    href: href.to_owned(),
                    is_pending,
                    selected,
                    level,
                    title: route.title.clone(),
                    wip: route.wip,
                    is_expanded: None,
                    is_breadcrumb: false,
                    hide_arrow: false,
                }));
            }
        }

        items
    }

    /// Get or create the region for `key` and apply this pass's state.
    fn mount_region(&mut self, pass: &mut Pass<'_>, key: &str, is_expanded: bool) -> &CollapseWrapper {
        pass.mounted.insert(key.to_owned());

        let duration = self.options.collapse_duration;
        let margin = self.options.pointer_guard_margin;
        let scheduler = &self.scheduler;

        let region = self.regions.entry(key.to_owned()).or_insert_with(|| {
            CollapseWrapper::new(is_expanded, duration, Arc::clone(scheduler))
                .with_pointer_guard_margin(margin)
        });
        if region.update(is_expanded) {
            tracing::debug!(key, is_expanded, "Sidebar branch toggled");
        }
        region
    }
}
