//! Error types for the export pipeline

use thiserror::Error;

use crate::document::{ParseError, SerializeError};

/// Errors surfaced by the exporter.
///
/// The previewer never returns these; it falls back to its input instead.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Input is not well-formed XML
    #[error("failed to process SVG: {0}")]
    Parse(#[from] ParseError),

    /// Input is XML but holds no `svg` element
    #[error("failed to process SVG: invalid SVG: no svg element found")]
    MissingSvgRoot,

    /// The rewritten tree could not be written back out
    #[error("failed to process SVG: {0}")]
    Serialize(#[from] SerializeError),
}
