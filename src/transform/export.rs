//! Literal style attributes → QGIS placeholders

use tracing::debug;

use crate::document::{Document, Element};
use crate::error::ExportError;

use super::{is_preservable, is_shape, STYLE_ATTRIBUTES};

/// Rewrite the style attributes of every shape element into placeholders.
///
/// Each shape ends up with all five mapped attributes. With
/// `preserve_original`, a preservable literal is kept after its placeholder,
/// separated by a single space (`param(fill) #ff0000`).
///
/// # Example
///
/// ```rust
/// use qgis_svg_param::process_svg;
///
/// let svg = process_svg(r##"<svg><rect fill="#ff0000"/></svg>"##, true).unwrap();
/// assert!(svg.contains(r##"fill="param(fill) #ff0000""##));
/// assert!(svg.contains(r#"stroke="param(outline)""#));
/// ```
pub fn process_svg(svg_text: &str, preserve_original: bool) -> Result<String, ExportError> {
    let mut doc = Document::parse(svg_text)?;
    let root = doc.svg_root_mut().ok_or(ExportError::MissingSvgRoot)?;

    let mut shapes = 0usize;
    root.walk_mut(&mut |el| {
        if is_shape(el.local_name()) {
            replace_attributes(el, preserve_original);
            shapes += 1;
        }
    });
    debug!(shapes, preserve_original, "exported svg");

    Ok(doc.to_xml_string()?)
}

fn replace_attributes(element: &mut Element, preserve_original: bool) {
    for attr in &STYLE_ATTRIBUTES {
        let value = match element.attribute(attr.name) {
            Some(original) if preserve_original && is_preservable(Some(original)) => {
                format!("{} {}", attr.placeholder, original)
            }
            _ => attr.placeholder.to_string(),
        };
        element.set_attribute(attr.name, value);
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;

    #[test]
    fn test_export_replaces_shape_attributes() {
        let svg = process_svg(
            r##"<svg><rect fill="#ff0000" stroke="none"/></svg>"##,
            true,
        )
        .unwrap();
        assert_snapshot!(svg, @r##"<svg><rect fill="param(fill) #ff0000" stroke="param(outline)" fill-opacity="param(fill-opacity)" stroke-opacity="param(outline-opacity)" stroke-width="param(outline-width)"/></svg>"##);
    }

    #[test]
    fn test_export_without_preserve_drops_literals() {
        let svg = process_svg(
            r##"<svg><circle r="4" fill="#00f" stroke-width="3"/></svg>"##,
            false,
        )
        .unwrap();
        assert_snapshot!(svg, @r#"<svg><circle r="4" fill="param(fill)" stroke-width="param(outline-width)" fill-opacity="param(fill-opacity)" stroke="param(outline)" stroke-opacity="param(outline-opacity)"/></svg>"#);
    }

    #[test]
    fn test_export_empty_value_not_preserved() {
        let svg = process_svg(r#"<svg><path d="M0 0" fill=""/></svg>"#, true).unwrap();
        assert!(svg.contains(r#"fill="param(fill)""#));
    }

    #[test]
    fn test_export_leaves_group_attributes_alone() {
        let svg = process_svg(
            r##"<svg fill="#123"><g stroke="red"><line x1="0"/></g></svg>"##,
            true,
        )
        .unwrap();
        assert!(svg.starts_with(r##"<svg fill="#123"><g stroke="red">"##));
        assert!(svg.contains(r#"<line x1="0" fill="param(fill)""#));
    }

    #[test]
    fn test_export_matches_prefixed_shapes() {
        let svg = process_svg(
            r#"<svg:svg xmlns:svg="http://www.w3.org/2000/svg"><svg:rect/></svg:svg>"#,
            false,
        )
        .unwrap();
        assert!(svg.contains(r#"<svg:rect fill="param(fill)""#));
    }

    #[test]
    fn test_export_missing_svg_root() {
        let err = process_svg("<html/>", false).unwrap_err();
        assert!(matches!(err, ExportError::MissingSvgRoot));
        assert_eq!(
            err.to_string(),
            "failed to process SVG: invalid SVG: no svg element found"
        );
    }

    #[test]
    fn test_export_malformed_xml() {
        let err = process_svg("<svg><rect></svg>", false).unwrap_err();
        assert!(matches!(err, ExportError::Parse(_)));
        assert!(err.to_string().starts_with("failed to process SVG: "));
    }
}
