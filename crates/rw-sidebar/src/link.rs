//! Sidebar link control.

use std::fmt::Write;

use serde::Serialize;

use crate::html::escape_html;

/// Everything the link control needs to draw one sidebar entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarLink {
    /// Link target.
    pub href: String,
    /// A navigation to this link is in flight.
    pub is_pending: bool,
    /// Link points to the current page.
    pub selected: bool,
    /// Nesting level, zero at the top.
    pub level: usize,
    /// Display title.
    pub title: String,
    /// Work in progress marker.
    pub wip: bool,
    /// Expansion state, set for expandable branches only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_expanded: Option<bool>,
    /// Link lies on the path to the current page.
    pub is_breadcrumb: bool,
    /// Suppress the expand arrow.
    pub hide_arrow: bool,
}

/// Renders a [`SidebarLink`] into markup.
pub trait LinkRenderer {
    /// Append the markup for `link` to `out`.
    fn render_link(&self, link: &SidebarLink, out: &mut String);
}

/// Chevron drawn next to expandable links.
const ARROW_PATH: &str = "M7.293 14.707a1 1 0 010-1.414L10.586 10 7.293 6.707a1 1 0 \
                          011.414-1.414l4 4a1 1 0 010 1.414l-4 4a1 1 0 01-1.414 0z";

/// Default HTML anchor for sidebar links.
#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlLinkRenderer;

impl HtmlLinkRenderer {
    fn classes(link: &SidebarLink) -> String {
        let mut classes = vec!["flex w-full items-center justify-between py-1.5 pr-2 rounded-r-2xl"];

        classes.push(match link.level {
            0 => "pl-5 text-base font-bold",
            1 => "pl-5 text-sm",
            _ => "pl-6 text-sm",
        });

        if link.selected {
            classes.push("text-blue-700 font-medium bg-blue-50");
        } else if link.is_breadcrumb {
            classes.push("text-gray-900");
        } else {
            classes.push("text-gray-700 hover:text-gray-900");
        }

        if link.is_pending {
            classes.push("bg-gray-100");
        }

        classes.join(" ")
    }
}

impl LinkRenderer for HtmlLinkRenderer {
    fn render_link(&self, link: &SidebarLink, out: &mut String) {
        let title = escape_html(&link.title);
        let _ = write!(
            out,
            "<a href=\"{}\" class=\"{}\" title=\"{}\" data-level=\"{}\"",
            escape_html(&link.href),
            Self::classes(link),
            title,
            link.level,
        );
        if link.selected {
            out.push_str(" aria-current=\"page\"");
        }
        if link.is_pending {
            out.push_str(" data-pending=\"true\"");
        }
        if let Some(is_expanded) = link.is_expanded {
            let _ = write!(out, " aria-expanded=\"{is_expanded}\"");
        }
        out.push('>');

        out.push_str(&title);
        if link.wip {
            out.push_str(
                "<span class=\"ml-2 text-xs\" title=\"This is a work in progress.\">WIP</span>",
            );
        }

        if let Some(is_expanded) = link.is_expanded
            && !link.hide_arrow
        {
            let rotation = if is_expanded { " rotate-90" } else { "" };
            let _ = write!(
                out,
                "<span class=\"pr-1 text-gray-500\"><svg class=\"w-3.5 h-3.5{rotation}\" \
                 fill=\"currentColor\" viewBox=\"0 0 20 20\"><path fill-rule=\"evenodd\" \
                 d=\"{ARROW_PATH}\" clip-rule=\"evenodd\"/></svg></span>"
            );
        }

        out.push_str("</a>\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(title: &str, href: &str) -> SidebarLink {
        SidebarLink {
            href: href.to_owned(),
            is_pending: false,
            selected: false,
            level: 0,
            title: title.to_owned(),
            wip: false,
            is_expanded: None,
            is_breadcrumb: false,
            hide_arrow: false,
        }
    }

    fn render(link: &SidebarLink) -> String {
        let mut out = String::new();
        HtmlLinkRenderer.render_link(link, &mut out);
        out
    }

    #[test]
    fn test_leaf_link_has_no_arrow() {
        let html = render(&leaf("Guide", "/guide"));

        assert!(html.starts_with("<a href=\"/guide\""));
        assert!(html.contains(">Guide</a>"));
        assert!(!html.contains("<svg"));
        assert!(!html.contains("aria-expanded"));
    }

    #[test]
    fn test_selected_link_marks_current_page() {
        let html = render(&SidebarLink {
            selected: true,
            ..leaf("Guide", "/guide")
        });

        assert!(html.contains("aria-current=\"page\""));
        assert!(html.contains("text-blue-700 font-medium"));
    }

    #[test]
    fn test_pending_link_is_flagged() {
        let html = render(&SidebarLink {
            is_pending: true,
            ..leaf("Guide", "/guide")
        });

        assert!(html.contains("data-pending=\"true\""));
        assert!(html.contains("bg-gray-100"));
    }

    #[test]
    fn test_expanded_branch_rotates_arrow() {
        let html = render(&SidebarLink {
            is_expanded: Some(true),
            ..leaf("Learn", "/learn")
        });

        assert!(html.contains("aria-expanded=\"true\""));
        assert!(html.contains("w-3.5 h-3.5 rotate-90"));
    }

    #[test]
    fn test_collapsed_branch_arrow_points_right() {
        let html = render(&SidebarLink {
            is_expanded: Some(false),
            ..leaf("Learn", "/learn")
        });

        assert!(html.contains("aria-expanded=\"false\""));
        assert!(html.contains("<svg class=\"w-3.5 h-3.5\""));
    }

    #[test]
    fn test_hide_arrow_suppresses_arrow() {
        let html = render(&SidebarLink {
            is_expanded: Some(true),
            hide_arrow: true,
            ..leaf("Learn", "/learn")
        });

        assert!(html.contains("aria-expanded=\"true\""));
        assert!(!html.contains("<svg"));
    }

    #[test]
    fn test_wip_marker() {
        let html = render(&SidebarLink {
            wip: true,
            ..leaf("Drafts", "/drafts")
        });

        assert!(html.contains("This is a work in progress."));
    }

    #[test]
    fn test_nested_levels_indent() {
        let html = render(&SidebarLink {
            level: 2,
            ..leaf("Deep", "/a/b/c")
        });

        assert!(html.contains("pl-6 text-sm"));
        assert!(html.contains("data-level=\"2\""));
    }

    #[test]
    fn test_title_and_href_escaped() {
        let html = render(&leaf("<Fragment>", "/a?x=1&y=\"2\""));

        assert!(html.contains("&lt;Fragment&gt;"));
        assert!(html.contains("href=\"/a?x=1&amp;y=&quot;2&quot;\""));
    }
}
