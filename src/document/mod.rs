//! Owned XML document tree for SVG input
//!
//! Parsing and serialization delegate tokenizing and escaping to `quick-xml`.
//! The tree itself is a plain ownership hierarchy: every element owns its
//! attributes (in source order) and its child nodes.

mod error;
mod parse;
mod write;

pub use error::{ParseError, SerializeError};

/// A parsed XML document
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Top-level nodes: declaration, comments, whitespace and the root element
    pub nodes: Vec<Node>,
}

/// A node in the document tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    /// Unescaped character data
    Text(String),
    CData(String),
    /// Raw comment body (between `<!--` and `-->`)
    Comment(String),
    /// Raw processing instruction body (between `<?` and `?>`)
    ProcessingInstruction(String),
    /// Raw doctype body (after `<!DOCTYPE `)
    DocType(String),
    Declaration(Declaration),
}

/// The `<?xml ...?>` declaration
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub version: String,
    pub encoding: Option<String>,
    pub standalone: Option<String>,
}

/// A single attribute with its unescaped value
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// Qualified name as written in the source (e.g. `xlink:href`)
    pub name: String,
    pub value: String,
}

/// An XML element
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Qualified name as written in the source (e.g. `svg:rect`)
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element with no attributes or children
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Tag name with any namespace prefix removed
    pub fn local_name(&self) -> &str {
        match self.name.rsplit_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }

    /// Value of the attribute with the given qualified name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Set an attribute, replacing an existing value in place or appending a
    /// new attribute after the existing ones.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.value = value,
            None => self.attributes.push(Attribute {
                name: name.to_string(),
                value,
            }),
        }
    }

    /// Iterate over child elements, skipping text and other node kinds
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            _ => None,
        })
    }

    /// Mutable counterpart of [`Element::child_elements`]
    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            _ => None,
        })
    }

    /// Visit this element and all descendants in depth-first pre-order
    pub fn walk_mut(&mut self, visit: &mut impl FnMut(&mut Element)) {
        visit(self);
        for child in self.child_elements_mut() {
            child.walk_mut(visit);
        }
    }
}

impl Document {
    /// Parse XML text into a document tree
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        parse::parse_document(text)
    }

    /// Serialize the document back to XML text
    pub fn to_xml_string(&self) -> Result<String, SerializeError> {
        write::write_document(self)
    }

    /// The document element
    pub fn root(&self) -> Option<&Element> {
        self.nodes.iter().find_map(|node| match node {
            Node::Element(el) => Some(el),
            _ => None,
        })
    }

    /// The outermost `svg` element: the document element when it is `svg`,
    /// otherwise the first `svg` element in document order.
    pub fn svg_root_mut(&mut self) -> Option<&mut Element> {
        find_svg_mut(&mut self.nodes)
    }
}

fn find_svg_mut(nodes: &mut [Node]) -> Option<&mut Element> {
    for node in nodes {
        if let Node::Element(el) = node {
            if el.local_name() == "svg" {
                return Some(el);
            }
            if let Some(found) = find_svg_mut(&mut el.children) {
                return Some(found);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_name_strips_prefix() {
        assert_eq!(Element::new("svg:rect").local_name(), "rect");
        assert_eq!(Element::new("rect").local_name(), "rect");
    }

    #[test]
    fn test_set_attribute_replaces_in_place() {
        let mut el = Element::new("rect");
        el.set_attribute("x", "1");
        el.set_attribute("fill", "red");
        el.set_attribute("x", "2");

        let names: Vec<&str> = el.attributes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["x", "fill"]);
        assert_eq!(el.attribute("x"), Some("2"));
        assert_eq!(el.attribute("y"), None);
    }

    #[test]
    fn test_walk_visits_in_preorder() {
        let doc = Document::parse("<svg><g><rect/><circle/></g><path/></svg>").unwrap();
        let mut root = doc.root().unwrap().clone();
        let mut seen = Vec::new();
        root.walk_mut(&mut |el| seen.push(el.name.clone()));
        assert_eq!(seen, vec!["svg", "g", "rect", "circle", "path"]);
    }

    #[test]
    fn test_svg_root_is_document_element() {
        let mut doc = Document::parse(r#"<svg id="outer"><svg id="inner"/></svg>"#).unwrap();
        let root = doc.svg_root_mut().unwrap();
        assert_eq!(root.attribute("id"), Some("outer"));
    }

    #[test]
    fn test_svg_root_found_below_foreign_root() {
        let mut doc =
            Document::parse(r#"<html><body><svg:svg id="icon"/></body></html>"#).unwrap();
        let root = doc.svg_root_mut().unwrap();
        assert_eq!(root.attribute("id"), Some("icon"));
    }

    #[test]
    fn test_svg_root_missing() {
        let mut doc = Document::parse("<html><body/></html>").unwrap();
        assert!(doc.svg_root_mut().is_none());
    }
}
