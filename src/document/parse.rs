//! Build a [`Document`] from the `quick-xml` event stream

use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::{Attribute, Declaration, Document, Element, Node, ParseError};

pub(super) fn parse_document(text: &str) -> Result<Document, ParseError> {
    let mut reader = Reader::from_str(text);
    let mut builder = TreeBuilder::default();
    // general entities declared in the internal DTD subset
    let mut entities: HashMap<String, String> = HashMap::new();

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => {
                let element = element_from_start(e, &entities)?;
                builder.open.push(element);
            }
            Event::Empty(ref e) => {
                let element = element_from_start(e, &entities)?;
                builder.append(Node::Element(element))?;
            }
            Event::End(ref e) => {
                let name = utf8(e.name().as_ref(), "closing tag")?;
                match builder.open.pop() {
                    Some(element) => builder.append(Node::Element(element))?,
                    None => return Err(ParseError::UnexpectedEnd { name }),
                }
            }
            Event::Text(ref e) => {
                let text = e
                    .unescape_with(|name| entities.get(name).map(String::as_str))?
                    .into_owned();
                builder.append(Node::Text(text))?;
            }
            Event::CData(e) => {
                let text = utf8(&e, "CDATA section")?;
                builder.append(Node::CData(text))?;
            }
            Event::Comment(e) => {
                let text = utf8(&e, "comment")?;
                builder.append(Node::Comment(text))?;
            }
            Event::PI(e) => {
                let text = utf8(&e, "processing instruction")?;
                builder.append(Node::ProcessingInstruction(text))?;
            }
            Event::DocType(e) => {
                let text = utf8(&e, "doctype")?;
                entities.extend(entity_declarations(&text));
                builder.append(Node::DocType(text))?;
            }
            Event::Decl(ref e) => {
                let version = utf8(&e.version()?, "declaration")?;
                let encoding = match e.encoding() {
                    Some(value) => Some(utf8(&value?, "declaration")?),
                    None => None,
                };
                let standalone = match e.standalone() {
                    Some(value) => Some(utf8(&value?, "declaration")?),
                    None => None,
                };
                builder.append(Node::Declaration(Declaration {
                    version,
                    encoding,
                    standalone,
                }))?;
            }
            Event::Eof => break,
        }
    }

    builder.finish()
}

/// Accumulates nodes while the reader walks the input
#[derive(Default)]
struct TreeBuilder {
    /// Elements whose start tag has been seen but not the end tag
    open: Vec<Element>,
    nodes: Vec<Node>,
    has_root: bool,
}

impl TreeBuilder {
    fn append(&mut self, node: Node) -> Result<(), ParseError> {
        if let Some(parent) = self.open.last_mut() {
            parent.children.push(node);
            return Ok(());
        }

        match &node {
            Node::Element(el) if self.has_root => {
                return Err(ParseError::outside_root(format!(
                    "second top-level element '{}'",
                    el.name
                )));
            }
            Node::Element(_) => self.has_root = true,
            Node::Text(text) if !text.trim().is_empty() => {
                return Err(ParseError::outside_root("character data"));
            }
            Node::CData(_) => return Err(ParseError::outside_root("CDATA section")),
            _ => {}
        }
        self.nodes.push(node);
        Ok(())
    }

    fn finish(self) -> Result<Document, ParseError> {
        if let Some(unclosed) = self.open.into_iter().next() {
            return Err(ParseError::Unclosed {
                name: unclosed.name,
            });
        }
        if !self.has_root {
            return Err(ParseError::Empty);
        }
        Ok(Document { nodes: self.nodes })
    }
}

fn element_from_start(
    start: &BytesStart<'_>,
    entities: &HashMap<String, String>,
) -> Result<Element, ParseError> {
    let mut element = Element::new(utf8(start.name().as_ref(), "tag name")?);
    for attr in start.attributes() {
        let attr = attr?;
        element.attributes.push(Attribute {
            name: utf8(attr.key.as_ref(), "attribute name")?,
            value: attr
                .unescape_value_with(|name| entities.get(name).map(String::as_str))?
                .into_owned(),
        });
    }
    Ok(element)
}

/// Collect `<!ENTITY name "value">` declarations from a doctype body.
///
/// Parameter entities and external (`SYSTEM`/`PUBLIC`) entities are skipped.
fn entity_declarations(doctype: &str) -> HashMap<String, String> {
    const KEYWORD: &str = "<!ENTITY";

    let mut entities = HashMap::new();
    let mut rest = doctype;
    while let Some(start) = rest.find(KEYWORD) {
        rest = rest[start + KEYWORD.len()..].trim_start();
        if rest.starts_with('%') {
            continue;
        }
        let name_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let name = &rest[..name_end];
        rest = rest[name_end..].trim_start();

        let Some(quote) = rest.chars().next().filter(|c| *c == '"' || *c == '\'') else {
            continue;
        };
        let body = &rest[1..];
        let Some(value_end) = body.find(quote) else {
            break;
        };
        entities.insert(name.to_string(), body[..value_end].to_string());
        rest = &body[value_end + 1..];
    }
    entities
}

fn utf8(bytes: &[u8], context: &'static str) -> Result<String, ParseError> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|_| ParseError::Utf8 { context })
}
