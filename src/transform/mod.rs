//! Placeholder substitution over SVG documents
//!
//! Two walks share the lookup tables below: [`export`] turns literal style
//! attributes on shapes into QGIS `param(...)` placeholders, and [`preview`]
//! swaps placeholders for concrete values so the result can be displayed.

pub mod export;
pub mod preview;

pub use export::process_svg;
pub use preview::apply_params_to_svg;

/// Tags whose style attributes are rewritten on export
pub const SHAPE_ELEMENTS: [&str; 8] = [
    "path", "rect", "circle", "ellipse", "polygon", "polyline", "line", "text",
];

/// A presentation attribute and the QGIS placeholder that stands in for it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleAttribute {
    pub name: &'static str,
    pub placeholder: &'static str,
}

/// The rewritten attributes, in the order they are applied
pub const STYLE_ATTRIBUTES: [StyleAttribute; 5] = [
    StyleAttribute {
        name: "fill",
        placeholder: "param(fill)",
    },
    StyleAttribute {
        name: "fill-opacity",
        placeholder: "param(fill-opacity)",
    },
    StyleAttribute {
        name: "stroke",
        placeholder: "param(outline)",
    },
    StyleAttribute {
        name: "stroke-opacity",
        placeholder: "param(outline-opacity)",
    },
    StyleAttribute {
        name: "stroke-width",
        placeholder: "param(outline-width)",
    },
];

/// Whether a tag (local name, prefix ignored) is a paintable shape
pub fn is_shape(local_name: &str) -> bool {
    SHAPE_ELEMENTS.contains(&local_name)
}

/// Whether an original attribute value is worth keeping after its placeholder.
///
/// Only absent, empty and `none` values are dropped.
pub fn is_preservable(value: Option<&str>) -> bool {
    matches!(value, Some(v) if !v.is_empty() && v != "none")
}

/// Whether an attribute value carries the given placeholder anywhere in it
pub fn contains_placeholder(value: Option<&str>, placeholder: &str) -> bool {
    value.is_some_and(|v| v.contains(placeholder))
}
