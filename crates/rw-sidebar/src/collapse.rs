//! Collapse geometry for expandable regions.
//!
//! Produces the attributes that animate a region's height between zero and
//! its natural size. The region stays in the document when collapsed so
//! that expanding it never needs a re-render of its children.

use std::time::Duration;

use serde::Serialize;

/// Easing used for height transitions.
const HEIGHT_EASING: &str = "cubic-bezier(0.4, 0, 0.2, 1)";

/// Attributes for a collapsible region.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollapseProps {
    /// Hidden from assistive technology while collapsed.
    pub aria_hidden: bool,
    /// Inline style declarations, in output order.
    pub style: Vec<(&'static str, String)>,
}

impl CollapseProps {
    /// Style declarations joined into a `style` attribute value.
    pub fn style_attr(&self) -> String {
        self.style
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Compute collapse attributes for the given state.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use rw_sidebar::collapse_props;
///
/// let props = collapse_props(false, Duration::from_millis(250));
/// assert!(props.aria_hidden);
/// assert!(props.style_attr().starts_with("display: none"));
/// ```
pub fn collapse_props(is_expanded: bool, duration: Duration) -> CollapseProps {
    let transition = format!("height {}ms {HEIGHT_EASING}", duration.as_millis());

    let style = if is_expanded {
        vec![
            ("height", "auto".to_owned()),
            ("overflow", "visible".to_owned()),
            ("transition", transition),
        ]
    } else {
        vec![
            ("display", "none".to_owned()),
            ("height", "0px".to_owned()),
            ("overflow", "hidden".to_owned()),
            ("transition", transition),
        ]
    };

    CollapseProps {
        aria_hidden: !is_expanded,
        style,
    }
}
