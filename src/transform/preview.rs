//! QGIS placeholders → live parameter values

use tracing::{debug, warn};

use crate::document::{Document, Element};
use crate::params::SvgParams;

use super::{contains_placeholder, STYLE_ATTRIBUTES};

/// Substitute placeholder-bearing attributes with the given parameters.
///
/// Every element under the svg root is visited; an attribute is replaced
/// only when its value contains the matching placeholder, so a combined
/// `param(fill) #ff0000` value also becomes the live fill. Any failure
/// returns the input unchanged.
///
/// # Example
///
/// ```rust
/// use qgis_svg_param::{apply_params_to_svg, SvgParams};
///
/// let params = SvgParams::default().with_fill("#00ff00");
/// let svg = apply_params_to_svg(r#"<svg><rect fill="param(fill) #ff0000"/></svg>"#, &params);
/// assert!(svg.contains(r##"fill="#00ff00""##));
/// ```
pub fn apply_params_to_svg(svg_text: &str, params: &SvgParams) -> String {
    let mut doc = match Document::parse(svg_text) {
        Ok(doc) => doc,
        Err(e) => {
            warn!("failed to apply params to SVG: {e}");
            return svg_text.to_string();
        }
    };
    let Some(root) = doc.svg_root_mut() else {
        debug!("no svg element, preview left unchanged");
        return svg_text.to_string();
    };

    let values = params.attribute_values();
    let mut replaced = 0usize;
    root.walk_mut(&mut |el| replaced += apply_params(el, &values));
    debug!(replaced, "applied params to svg");

    match doc.to_xml_string() {
        Ok(svg) => svg,
        Err(e) => {
            warn!("failed to apply params to SVG: {e}");
            svg_text.to_string()
        }
    }
}

/// Replace placeholders on one element, returning how many attributes changed
fn apply_params(element: &mut Element, values: &[String; 5]) -> usize {
    let mut replaced = 0;
    for (attr, value) in STYLE_ATTRIBUTES.iter().zip(values) {
        if contains_placeholder(element.attribute(attr.name), attr.placeholder) {
            element.set_attribute(attr.name, value.as_str());
            replaced += 1;
        }
    }
    replaced
}
