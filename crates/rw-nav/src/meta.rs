//! Route metadata: breadcrumbs and current/previous/next route.
//!
//! Metadata is always resolved relative to the tree it is asked about. The
//! sidebar renderer asks once per nesting level, passing the subtree of
//! that level, so breadcrumbs are local to the subtree.

use serde::Serialize;

use crate::path::clean_path;
use crate::route::RouteNode;

/// Pathname of the not-found page. No route metadata is resolved there.
pub const NOT_FOUND_PATH: &str = "/404";

/// Current browser location.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Location {
    as_path: String,
}

impl Location {
    /// Create a location from the path as shown in the address bar.
    #[must_use]
    pub fn new(as_path: impl Into<String>) -> Self {
        Self {
            as_path: as_path.into(),
        }
    }

    /// Path as shown in the address bar, including query and fragment.
    pub fn as_path(&self) -> &str {
        &self.as_path
    }

    /// Path without query string and fragment.
    pub fn pathname(&self) -> &str {
        clean_path(&self.as_path)
    }

    /// Whether this location is the not-found page.
    pub fn is_not_found(&self) -> bool {
        self.pathname() == NOT_FOUND_PATH
    }
}

/// Title and path of a route, detached from its children.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RouteLink {
    /// Display title.
    pub title: String,
    /// Link target path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl From<&RouteNode> for RouteLink {
    fn from(node: &RouteNode) -> Self {
        Self {
            title: node.title.clone(),
            path: node.path.clone(),
        }
    }
}

/// Metadata of the current location within a route tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMeta {
    /// Route matching the current location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<RouteLink>,
    /// Route visited just before the current one in tree order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_route: Option<RouteLink>,
    /// Route visited just after the current one in tree order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_route: Option<RouteLink>,
    /// Ancestors of the current route, root first.
    pub breadcrumbs: Vec<RouteLink>,
}

impl RouteMeta {
    /// Whether `path` is the path of one of the breadcrumbs.
    pub fn is_breadcrumb(&self, path: &str) -> bool {
        self.breadcrumbs
            .iter()
            .any(|crumb| crumb.path.as_deref() == Some(path))
    }
}

/// Resolves route metadata for the current location.
pub trait RouteMetaResolver: Send + Sync {
    /// Resolve metadata for `location` within `tree`.
    fn route_meta(&self, location: &Location, tree: &RouteNode) -> RouteMeta;
}

/// Resolver that walks the route tree.
///
/// - Breadcrumbs are the ancestors (tree root included) of the first route
///   whose path equals the current pathname. When nothing matches, the
///   tree root alone is the breadcrumb chain.
/// - Previous and next routes follow pre-order traversal of the tree.
#[derive(Clone, Copy, Debug, Default)]
pub struct TreeRouteMeta;

impl RouteMetaResolver for TreeRouteMeta {
    fn route_meta(&self, location: &Location, tree: &RouteNode) -> RouteMeta {
        if location.is_not_found() {
            return RouteMeta::default();
        }

        let pathname = location.pathname();

        let mut ancestors = Vec::new();
        let breadcrumbs = match find_ancestors(pathname, tree, &mut ancestors) {
            Some(chain) if !chain.is_empty() => chain.into_iter().map(RouteLink::from).collect(),
            _ => vec![RouteLink::from(tree)],
        };

        let mut traversal = Traversal::default();
        traversal.visit(pathname, tree);

        RouteMeta {
            route: traversal.route.map(RouteLink::from),
            prev_route: traversal.prev_route.map(RouteLink::from),
            next_route: traversal.next_route.map(RouteLink::from),
            breadcrumbs,
        }
    }
}

/// Find the ancestor chain of the first route (pre-order) whose path is `pathname`.
///
/// Returns `Some(chain)` once found; the chain is empty when `node` itself matches.
fn find_ancestors<'a>(
    pathname: &str,
    node: &'a RouteNode,
    chain: &mut Vec<&'a RouteNode>,
) -> Option<Vec<&'a RouteNode>> {
    if node.path.as_deref() == Some(pathname) {
        return Some(chain.clone());
    }

    chain.push(node);
    for child in node.children() {
        if let Some(found) = find_ancestors(pathname, child, chain)
            && !found.is_empty()
        {
            return Some(found);
        }
    }
    chain.pop();

    None
}

/// Pre-order traversal state for current/previous/next lookup.
#[derive(Default)]
struct Traversal<'a> {
    route: Option<&'a RouteNode>,
    prev_route: Option<&'a RouteNode>,
    next_route: Option<&'a RouteNode>,
}

impl<'a> Traversal<'a> {
    fn visit(&mut self, pathname: &str, node: &'a RouteNode) {
        if self.route.is_some() && self.next_route.is_none() {
            self.next_route = Some(node);
        }
        if node.path.as_deref() == Some(pathname) {
            self.route = Some(node);
        }
        if self.route.is_none() {
            self.prev_route = Some(node);
        }
        for child in node.children() {
            self.visit(pathname, child);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn link(title: &str, path: Option<&str>) -> RouteLink {
        RouteLink {
            title: title.to_owned(),
            path: path.map(str::to_owned),
        }
    }

    fn sample_tree() -> RouteNode {
        RouteNode::branch(
            "Root",
            None,
            vec![
                RouteNode::branch(
                    "Learn",
                    Some("/learn"),
                    vec![
                        RouteNode::leaf("Install", "/learn/install"),
                        RouteNode::branch(
                            "Describing UI",
                            Some("/learn/describing-ui"),
                            vec![RouteNode::leaf("JSX", "/learn/jsx")],
                        ),
                    ],
                ),
                RouteNode::leaf("Reference", "/reference"),
            ],
        )
    }

    #[test]
    fn test_location_pathname_strips_query_and_fragment() {
        let location = Location::new("/learn/install?x=1#step-2");
        assert_eq!(location.pathname(), "/learn/install");
        assert_eq!(location.as_path(), "/learn/install?x=1#step-2");
    }

    #[test]
    fn test_breadcrumbs_for_nested_route() {
        let tree = sample_tree();

        let meta = TreeRouteMeta.route_meta(&Location::new("/learn/jsx"), &tree);

        assert_eq!(
            meta.breadcrumbs,
            vec![
                link("Root", None),
                link("Learn", Some("/learn")),
                link("Describing UI", Some("/learn/describing-ui")),
            ]
        );
        assert!(meta.is_breadcrumb("/learn"));
        assert!(!meta.is_breadcrumb("/reference"));
    }

    #[test]
    fn test_breadcrumbs_for_top_level_route_is_root() {
        let tree = sample_tree();

        let meta = TreeRouteMeta.route_meta(&Location::new("/reference"), &tree);

        assert_eq!(meta.breadcrumbs, vec![link("Root", None)]);
    }

    #[test]
    fn test_breadcrumbs_for_unknown_route_is_root() {
        let tree = sample_tree();

        let meta = TreeRouteMeta.route_meta(&Location::new("/missing"), &tree);

        assert_eq!(meta.breadcrumbs, vec![link("Root", None)]);
        assert_eq!(meta.route, None);
    }

    #[test]
    fn test_breadcrumbs_relative_to_subtree() {
        let tree = sample_tree();
        let learn = tree.children()[0].subtree();

        let meta = TreeRouteMeta.route_meta(&Location::new("/learn/jsx"), &learn);

        assert_eq!(
            meta.breadcrumbs,
            vec![
                link("Learn", None),
                link("Describing UI", Some("/learn/describing-ui")),
            ]
        );
    }

    #[test]
    fn test_prev_and_next_route() {
        let tree = sample_tree();

        let meta = TreeRouteMeta.route_meta(&Location::new("/learn/install"), &tree);

        assert_eq!(meta.route, Some(link("Install", Some("/learn/install"))));
        assert_eq!(meta.prev_route, Some(link("Learn", Some("/learn"))));
        assert_eq!(
            meta.next_route,
            Some(link("Describing UI", Some("/learn/describing-ui")))
        );
    }

    #[test]
    fn test_last_route_has_no_next() {
        let tree = sample_tree();

        let meta = TreeRouteMeta.route_meta(&Location::new("/reference"), &tree);

        assert_eq!(meta.prev_route, Some(link("JSX", Some("/learn/jsx"))));
        assert_eq!(meta.next_route, None);
    }

    #[test]
    fn test_not_found_location_has_no_meta() {
        let tree = sample_tree();

        let meta = TreeRouteMeta.route_meta(&Location::new("/404"), &tree);

        assert_eq!(meta, RouteMeta::default());
    }

    #[test]
    fn test_route_meta_serialization() {
        let tree = sample_tree();

        let meta = TreeRouteMeta.route_meta(&Location::new("/learn/install"), &tree);
        let json = serde_json::to_value(&meta).unwrap();

        assert_eq!(json["route"]["title"], "Install");
        assert_eq!(json["prevRoute"]["path"], "/learn");
        assert_eq!(json["breadcrumbs"][0]["title"], "Root");
        assert!(json["breadcrumbs"][0].get("path").is_none());
    }
}
