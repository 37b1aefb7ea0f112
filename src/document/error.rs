//! Error types for the XML boundary

use quick_xml::events::attributes::AttrError;
use thiserror::Error;

/// Errors that can occur while parsing XML text
#[derive(Debug, Error)]
pub enum ParseError {
    /// Tokenizer-level syntax error
    #[error("{0}")]
    Syntax(#[from] quick_xml::Error),

    /// Malformed attribute list
    #[error("malformed attribute: {0}")]
    Attribute(#[from] AttrError),

    /// Element still open at end of input
    #[error("element '{name}' is never closed")]
    Unclosed { name: String },

    /// End tag with no matching start tag
    #[error("unexpected closing tag '{name}'")]
    UnexpectedEnd { name: String },

    /// Character data or a second element outside the document element
    #[error("content outside the root element: {reason}")]
    OutsideRoot { reason: String },

    /// Input contains no element at all
    #[error("document is empty")]
    Empty,

    /// Names and raw content must be valid UTF-8
    #[error("invalid UTF-8 in {context}")]
    Utf8 { context: &'static str },
}

/// Errors that can occur while writing a document back to text
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("{0}")]
    Writer(#[from] quick_xml::Error),

    #[error("serialized output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl ParseError {
    pub(crate) fn outside_root(reason: impl Into<String>) -> Self {
        Self::OutsideRoot {
            reason: reason.into(),
        }
    }
}
