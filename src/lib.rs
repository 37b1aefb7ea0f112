//! QGIS SVG parametrizer
//!
//! Converts plain SVG images into QGIS-parametrized symbols, where style
//! attributes become `param(...)` placeholders that QGIS fills in at render
//! time, and previews such symbols with concrete parameter values.
//!
//! # Example
//!
//! ```rust
//! use qgis_svg_param::{apply_params_to_svg, process_svg, SvgParams};
//!
//! let exported = process_svg(r##"<svg><circle r="5" fill="#f00"/></svg>"##, false).unwrap();
//! assert!(exported.contains(r#"fill="param(fill)""#));
//!
//! let preview = apply_params_to_svg(&exported, &SvgParams::default());
//! assert!(preview.contains(r##"fill="#667eea""##));
//! ```

pub mod document;
pub mod download;
pub mod error;
pub mod params;
pub mod session;
pub mod transform;

pub use download::{exported_file_name, is_svg_file_name, SvgArtifact};
pub use error::ExportError;
pub use params::{ParamPreset, ParamsError, SvgParams};
pub use session::{EditSession, SessionError};
pub use transform::{apply_params_to_svg, process_svg};

/// Configuration for the complete export pipeline
#[derive(Debug, Clone, Default)]
pub struct ProcessConfig {
    /// Keep original literal values after their placeholders
    pub preserve_original: bool,
    /// Substitute `params` into the export instead of returning placeholders
    pub preview: bool,
    /// Parameters used when `preview` is set
    pub params: SvgParams,
}

impl ProcessConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable preserving original values
    pub fn with_preserve_original(mut self, preserve: bool) -> Self {
        self.preserve_original = preserve;
        self
    }

    /// Enable or disable preview output
    pub fn with_preview(mut self, preview: bool) -> Self {
        self.preview = preview;
        self
    }

    /// Set the preview parameters
    pub fn with_params(mut self, params: SvgParams) -> Self {
        self.params = params;
        self
    }
}

/// Export SVG text and optionally preview it
///
/// # Example
///
/// ```rust
/// use qgis_svg_param::{process_with_config, ProcessConfig, SvgParams};
///
/// let config = ProcessConfig::new()
///     .with_preview(true)
///     .with_params(SvgParams::default().with_stroke_width(4.0));
///
/// let svg = process_with_config(r#"<svg><line x2="10"/></svg>"#, &config).unwrap();
/// assert!(svg.contains(r#"stroke-width="4""#));
/// ```
pub fn process_with_config(svg: &str, config: &ProcessConfig) -> Result<String, ExportError> {
    let exported = process_svg(svg, config.preserve_original)?;
    if config.preview {
        Ok(apply_params_to_svg(&exported, &config.params))
    } else {
        Ok(exported)
    }
}
