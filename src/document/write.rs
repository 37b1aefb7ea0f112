//! Serialize a [`Document`] with `quick-xml`

use std::borrow::Cow;

use quick_xml::escape::escape;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::QName;
use quick_xml::Writer;

use super::{Document, Element, Node, SerializeError};

pub(super) fn write_document(doc: &Document) -> Result<String, SerializeError> {
    let mut writer = Writer::new(Vec::new());
    for node in &doc.nodes {
        write_node(&mut writer, node)?;
    }
    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &Node) -> Result<(), SerializeError> {
    match node {
        Node::Element(el) => write_element(writer, el)?,
        Node::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
        Node::CData(text) => writer.write_event(Event::CData(BytesCData::new(text.as_str())))?,
        Node::Comment(text) => {
            writer.write_event(Event::Comment(BytesText::from_escaped(text.as_str())))?
        }
        Node::ProcessingInstruction(text) => {
            writer.write_event(Event::PI(BytesText::from_escaped(text.as_str())))?
        }
        Node::DocType(text) => {
            writer.write_event(Event::DocType(BytesText::from_escaped(text.as_str())))?
        }
        Node::Declaration(decl) => writer.write_event(Event::Decl(BytesDecl::new(
            &decl.version,
            decl.encoding.as_deref(),
            decl.standalone.as_deref(),
        )))?,
    }
    Ok(())
}

fn write_element(writer: &mut Writer<Vec<u8>>, el: &Element) -> Result<(), SerializeError> {
    let mut start = BytesStart::new(el.name.as_str());
    for attr in &el.attributes {
        start.push_attribute(Attribute {
            key: QName(attr.name.as_bytes()),
            value: Cow::Owned(escape_attribute_value(&attr.value).into_bytes()),
        });
    }

    if el.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in &el.children {
        write_node(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(el.name.as_str())))?;
    Ok(())
}

/// Escape markup characters plus the whitespace that attribute-value
/// normalization would otherwise turn into plain spaces
fn escape_attribute_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in escape(value).chars() {
        match c {
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            '\t' => escaped.push_str("&#9;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::super::Document;

    fn round_trip(text: &str) -> String {
        Document::parse(text)
            .expect("should parse")
            .to_xml_string()
            .expect("should serialize")
    }

    #[test]
    fn test_round_trip_preserves_structure() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10"><g id="a"><rect x="1" fill="#000"/></g></svg>"##;
        assert_eq!(round_trip(svg), svg);
    }

    #[test]
    fn test_round_trip_escapes_values() {
        let svg = r#"<svg data-x="a &amp; &quot;b&quot;"><text>1 &lt; 2</text></svg>"#;
        assert_eq!(round_trip(svg), svg);
    }

    #[test]
    fn test_round_trip_keeps_whitespace_in_attribute_values() {
        let svg = r#"<svg data-x="a&#10;b&#13;c&#9;d"><text>line
break</text></svg>"#;
        assert_eq!(round_trip(svg), svg);

        let reparsed = Document::parse(&round_trip(svg)).unwrap();
        assert_eq!(reparsed.root().unwrap().attribute("data-x"), Some("a\nb\rc\td"));
    }

    #[test]
    fn test_round_trip_keeps_prolog_and_comments() {
        let svg = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!-- drawn by hand -->\n<svg><![CDATA[raw <data>]]></svg>";
        assert_eq!(round_trip(svg), svg);
    }

    #[test]
    fn test_round_trip_keeps_namespaced_names() {
        let svg = r##"<svg:svg xmlns:svg="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink"><svg:use xlink:href="#a"/></svg:svg>"##;
        assert_eq!(round_trip(svg), svg);
    }
}
