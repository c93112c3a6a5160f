//! Rendered sidebar items.

use serde::Serialize;

use crate::animator::CollapseView;
use crate::link::SidebarLink;

/// One rendered row (or group of rows) of the sidebar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SidebarItem {
    /// Non-interactive divider row.
    Separator,
    /// Leaf link.
    Link(SidebarLink),
    /// Expandable link with its collapsible children.
    Branch {
        /// Link control of the branch itself.
        link: SidebarLink,
        /// State of the collapsible region.
        collapse: CollapseView,
        /// Items rendered inside the region.
        children: Vec<SidebarItem>,
    },
    /// Children of a heading, contributed without a row of their own.
    Group {
        /// Nesting level of the contained items.
        level: usize,
        /// Contained items.
        items: Vec<SidebarItem>,
    },
}

impl SidebarItem {
    /// Link control of this item, if it has one.
    pub fn link(&self) -> Option<&SidebarLink> {
        match self {
            Self::Link(link) | Self::Branch { link, .. } => Some(link),
            Self::Separator | Self::Group { .. } => None,
        }
    }

    /// Count links in this item and below. Headings are transparent.
    pub fn link_count(&self) -> usize {
        match self {
            Self::Separator => 0,
            Self::Link(_) => 1,
            Self::Branch { children, .. } => 1 + count_links(children),
            Self::Group { items, .. } => count_links(items),
        }
    }

    /// Items contributed at the same level as this item.
    ///
    /// A group contributes its items; every other item contributes itself.
    pub fn flatten_level(&self) -> Vec<&SidebarItem> {
        match self {
            Self::Group { items, .. } => items.iter().flat_map(SidebarItem::flatten_level).collect(),
            other => vec![other],
        }
    }
}

/// Count links across `items`, recursing into branches and groups.
pub fn count_links(items: &[SidebarItem]) -> usize {
    items.iter().map(SidebarItem::link_count).sum()
}

/// Every link control in `items`, depth first.
pub fn links(items: &[SidebarItem]) -> Vec<&SidebarLink> {
    let mut out = Vec::new();
    collect_links(items, &mut out);
    out
}

fn collect_links<'a>(items: &'a [SidebarItem], out: &mut Vec<&'a SidebarLink>) {
    for item in items {
        match item {
            SidebarItem::Separator => {}
            SidebarItem::Link(link) => out.push(link),
            SidebarItem::Branch { link, children, .. } => {
                out.push(link);
                collect_links(children, out);
            }
            SidebarItem::Group { items, .. } => collect_links(items, out),
        }
    }
}
