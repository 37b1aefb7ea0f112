//! Named SVG artifacts ready to be saved

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

/// MIME type of every artifact produced by this crate
pub const SVG_MIME_TYPE: &str = "image/svg+xml";

/// Suffix inserted before `.svg` in exported file names
pub const EXPORT_SUFFIX: &str = "-qgis";

/// Whether a file name looks like an SVG file (case-insensitive extension)
pub fn is_svg_file_name(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(".svg")
}

/// Derive the exported file name: `icon.svg` → `icon-qgis.svg`.
///
/// Names without a `.svg` extension are returned unchanged.
pub fn exported_file_name(name: &str) -> String {
    if !is_svg_file_name(name) {
        return name.to_string();
    }
    let stem = &name[..name.len() - ".svg".len()];
    format!("{stem}{EXPORT_SUFFIX}.svg")
}

/// A transformed document paired with the name it should be saved under
#[derive(Debug, Clone, PartialEq)]
pub struct SvgArtifact {
    pub file_name: String,
    pub content: String,
}

impl SvgArtifact {
    pub fn new(file_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
        }
    }

    pub fn mime_type(&self) -> &'static str {
        SVG_MIME_TYPE
    }

    /// Write the artifact into `dir` and return the written path
    pub fn write_to_dir(&self, dir: &Path) -> std::io::Result<PathBuf> {
        let path = dir.join(&self.file_name);
        let mut file = File::create(&path)?;
        file.write_all(self.content.as_bytes())?;
        file.flush()?;
        info!(path = %path.display(), bytes = self.content.len(), "wrote svg artifact");
        Ok(path)
    }
}
