//! HTML output for rendered sidebar items.

use crate::animator::CollapseView;
use crate::item::SidebarItem;
use crate::link::LinkRenderer;

/// Classes of the separator row.
const SEPARATOR_CLASSES: &str = "my-2 ml-5 border-b border-gray-200";

/// Render items as nested HTML lists.
///
/// Each level becomes a `<ul>`. Heading groups are emitted as a nested
/// `<ul>` in place, without a list item of their own.
pub fn render_html(items: &[SidebarItem], links: &dyn LinkRenderer) -> String {
    let mut html = String::with_capacity(4096);
    render_list(&mut html, items, links);
    html
}

fn render_list(html: &mut String, items: &[SidebarItem], links: &dyn LinkRenderer) {
    html.push_str("<ul>\n");
    for item in items {
        render_item(html, item, links);
    }
    html.push_str("</ul>\n");
}

fn render_item(html: &mut String, item: &SidebarItem, links: &dyn LinkRenderer) {
    match item {
        SidebarItem::Separator => {
            html.push_str("<li role=\"separator\" class=\"");
            html.push_str(SEPARATOR_CLASSES);
            html.push_str("\"></li>\n");
        }
        SidebarItem::Link(link) => {
            html.push_str("<li>\n");
            links.render_link(link, html);
            html.push_str("</li>\n");
        }
        SidebarItem::Branch {
            link,
            collapse,
            children,
        } => {
            html.push_str("<li>\n");
            links.render_link(link, html);
            render_collapse(html, collapse, children, links);
            html.push_str("</li>\n");
        }
        SidebarItem::Group { items, .. } => render_list(html, items, links),
    }
}

/// Outer div fades opacity and carries the pointer guard; inner div collapses.
fn render_collapse(
    html: &mut String,
    collapse: &CollapseView,
    children: &[SidebarItem],
    links: &dyn LinkRenderer,
) {
    html.push_str("<div class=\"");
    html.push_str(collapse.opacity_class());
    html.push_str("\" style=\"");
    html.push_str(&collapse.style_attr());
    html.push_str("\">\n<div");
    if collapse.props.aria_hidden {
        html.push_str(" aria-hidden=\"true\"");
    }
    html.push_str(" style=\"");
    html.push_str(&escape_html(&collapse.props.style_attr()));
    html.push_str("\">\n");
    render_list(html, children, links);
    html.push_str("</div>\n</div>\n");
}

/// Escape HTML special characters.
pub(crate) fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
