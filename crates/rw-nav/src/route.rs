//! Route tree model.
//!
//! A route tree is the hierarchical description of the sidebar. Each
//! [`RouteNode`] is a heading, an expandable branch, or a leaf link,
//! depending on which fields are set.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::NavError;
use crate::path::remove_from_last;

/// One entry of the navigation tree.
///
/// Absent fields deserialize to their falsy defaults, so partial or
/// malformed entries still load.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RouteNode {
    /// Link target. `None` for pure grouping headings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Display title.
    pub title: String,
    /// Child routes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routes: Option<Vec<RouteNode>>,
    /// Work in progress marker.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub wip: bool,
    /// Force heading treatment even when a path is set.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub heading: bool,
    /// Draw a divider before this entry.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub has_separator: bool,
}

impl RouteNode {
    /// Create a leaf route.
    #[must_use]
    pub fn leaf(title: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Create a route with children.
    #[must_use]
    pub fn branch(title: impl Into<String>, path: Option<&str>, routes: Vec<RouteNode>) -> Self {
        Self {
            path: path.map(str::to_owned),
            title: title.into(),
            routes: Some(routes),
            ..Self::default()
        }
    }

    /// Child routes, empty when none are set.
    pub fn children(&self) -> &[RouteNode] {
        self.routes.as_deref().unwrap_or_default()
    }

    /// Whether this route has at least one child.
    pub fn has_children(&self) -> bool {
        !self.children().is_empty()
    }

    /// Path with the suffix after the last `delimiter` removed.
    ///
    /// Returns `None` when the path is missing or reduces to an empty string.
    pub fn page_path(&self, delimiter: &str) -> Option<&str> {
        self.path
            .as_deref()
            .map(|path| remove_from_last(path, delimiter))
            .filter(|path| !path.is_empty())
    }

    /// Whether this route only groups its children.
    pub fn is_heading(&self, delimiter: &str) -> bool {
        self.heading || self.page_path(delimiter).is_none()
    }

    /// Copy of this route with only title and children, as used for nested levels.
    #[must_use]
    pub fn subtree(&self) -> Self {
        Self {
            title: self.title.clone(),
            routes: self.routes.clone(),
            ..Self::default()
        }
    }
}

/// A loaded route tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteTree {
    root: RouteNode,
}

impl RouteTree {
    /// Wrap an existing root node.
    #[must_use]
    pub fn new(root: RouteNode) -> Self {
        Self { root }
    }

    /// Root route of the tree.
    pub fn root(&self) -> &RouteNode {
        &self.root
    }

    /// Consume the tree, returning its root.
    #[must_use]
    pub fn into_root(self) -> RouteNode {
        self.root
    }

    /// Parse a route tree from YAML.
    ///
    /// Empty content yields an empty tree.
    pub fn from_yaml_str(content: &str) -> Result<Self, NavError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(Self::new(RouteNode::default()));
        }
        Ok(Self::new(serde_yaml::from_str(trimmed)?))
    }

    /// Parse a route tree from JSON.
    pub fn from_json_str(content: &str) -> Result<Self, NavError> {
        Ok(Self::new(serde_json::from_str(content)?))
    }

    /// Load a route tree from a `.yaml`, `.yml` or `.json` file.
    pub fn load(path: &Path) -> Result<Self, NavError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let content = std::fs::read_to_string(path).map_err(|source| NavError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let tree = match extension.as_deref() {
            Some("yaml" | "yml") => Self::from_yaml_str(&content)?,
            Some("json") => Self::from_json_str(&content)?,
            _ => {
                tracing::warn!(path = %path.display(), "Route file has no YAML or JSON extension");
                return Err(NavError::UnsupportedFormat(path.to_path_buf()));
            }
        };

        tracing::debug!(
            path = %path.display(),
            routes = tree.root.children().len(),
            "Loaded route tree"
        );
        Ok(tree)
    }
}
