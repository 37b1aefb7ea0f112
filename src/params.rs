//! Live style parameters for previews
//!
//! A [`SvgParams`] record holds the five values substituted for the QGIS
//! placeholders. Records are never edited in place: every `with_*` method
//! returns a new record, so a cached preview can be keyed on the record value.
//! Records can also be loaded from TOML files:
//!
//! ```toml
//! [metadata]
//! name = "Water"
//!
//! [params]
//! fill = "#3388ff"
//! fill-opacity = 0.5
//! stroke-width = 1.5
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading parameter files
#[derive(Error, Debug)]
pub enum ParamsError {
    #[error("Failed to read params file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse params TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

pub const OPACITY_RANGE: (f64, f64) = (0.0, 1.0);
pub const STROKE_WIDTH_RANGE: (f64, f64) = (0.0, 10.0);

/// The values substituted for `param(...)` placeholders
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct SvgParams {
    /// Fill color, used verbatim
    pub fill: String,
    pub fill_opacity: f64,
    /// Outline color, used verbatim
    pub stroke: String,
    pub stroke_opacity: f64,
    pub stroke_width: f64,
}

impl Default for SvgParams {
    fn default() -> Self {
        Self {
            fill: "#667eea".to_string(),
            fill_opacity: 0.8,
            stroke: "#764ba2".to_string(),
            stroke_opacity: 1.0,
            stroke_width: 2.0,
        }
    }
}

/// A named parameter set loaded from a params file
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParamPreset {
    /// Optional name for the preset
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    pub params: SvgParams,
}

/// TOML structure for deserializing params files
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlParams {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    params: SvgParams,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

impl ParamPreset {
    /// Load a preset from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ParamsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load a preset from a TOML string; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ParamsError> {
        let parsed: TomlParams = toml::from_str(content)?;
        parsed.params.validate()?;

        Ok(ParamPreset {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            params: parsed.params,
        })
    }
}

impl SvgParams {
    /// Load parameters from a TOML file, ignoring any `[metadata]`
    pub fn from_file(path: &Path) -> Result<Self, ParamsError> {
        ParamPreset::from_file(path).map(|preset| preset.params)
    }

    /// Load parameters from a TOML string; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ParamsError> {
        ParamPreset::from_toml_str(content).map(|preset| preset.params)
    }

    /// Check that the numeric fields are inside their slider ranges
    pub fn validate(&self) -> Result<(), ParamsError> {
        check_range("fill-opacity", self.fill_opacity, OPACITY_RANGE)?;
        check_range("stroke-opacity", self.stroke_opacity, OPACITY_RANGE)?;
        check_range("stroke-width", self.stroke_width, STROKE_WIDTH_RANGE)
    }

    pub fn with_fill(self, fill: impl Into<String>) -> Self {
        Self {
            fill: fill.into(),
            ..self
        }
    }

    /// Set the fill opacity, clamped to `0..=1`
    pub fn with_fill_opacity(self, opacity: f64) -> Self {
        Self {
            fill_opacity: clamp(opacity, OPACITY_RANGE),
            ..self
        }
    }

    pub fn with_stroke(self, stroke: impl Into<String>) -> Self {
        Self {
            stroke: stroke.into(),
            ..self
        }
    }

    /// Set the stroke opacity, clamped to `0..=1`
    pub fn with_stroke_opacity(self, opacity: f64) -> Self {
        Self {
            stroke_opacity: clamp(opacity, OPACITY_RANGE),
            ..self
        }
    }

    /// Set the stroke width, clamped to `0..=10`
    pub fn with_stroke_width(self, width: f64) -> Self {
        Self {
            stroke_width: clamp(width, STROKE_WIDTH_RANGE),
            ..self
        }
    }

    /// Canonical attribute strings, in the order of
    /// [`STYLE_ATTRIBUTES`](crate::transform::STYLE_ATTRIBUTES)
    pub fn attribute_values(&self) -> [String; 5] {
        [
            self.fill.clone(),
            self.fill_opacity.to_string(),
            self.stroke.clone(),
            self.stroke_opacity.to_string(),
            self.stroke_width.to_string(),
        ]
    }
}

fn clamp(value: f64, (min, max): (f64, f64)) -> f64 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}

fn check_range(field: &'static str, value: f64, (min, max): (f64, f64)) -> Result<(), ParamsError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ParamsError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = SvgParams::default();
        assert_eq!(params.fill, "#667eea");
        assert_eq!(params.fill_opacity, 0.8);
        assert_eq!(params.stroke, "#764ba2");
        assert_eq!(params.stroke_opacity, 1.0);
        assert_eq!(params.stroke_width, 2.0);
    }

    #[test]
    fn test_attribute_values_canonical_form() {
        let values = SvgParams::default().with_stroke_width(2.5).attribute_values();
        assert_eq!(values, ["#667eea", "0.8", "#764ba2", "1", "2.5"].map(String::from));
    }

    #[test]
    fn test_builders_replace_single_field() {
        let original = SvgParams::default();
        let edited = original.clone().with_fill("#000000");
        assert_eq!(edited.fill, "#000000");
        assert_eq!(edited.stroke, original.stroke);
        assert_ne!(edited, original);
    }

    #[test]
    fn test_builders_clamp_ranges() {
        let params = SvgParams::default()
            .with_fill_opacity(1.5)
            .with_stroke_opacity(-0.2)
            .with_stroke_width(42.0);
        assert_eq!(params.fill_opacity, 1.0);
        assert_eq!(params.stroke_opacity, 0.0);
        assert_eq!(params.stroke_width, 10.0);
        assert_eq!(SvgParams::default().with_fill_opacity(f64::NAN).fill_opacity, 0.0);
    }

    #[test]
    fn test_parse_toml_partial() {
        let toml_str = r##"
[params]
fill = "#3388ff"
stroke-width = 3
"##;
        let params = SvgParams::from_toml_str(toml_str).expect("Should parse");
        assert_eq!(params.fill, "#3388ff");
        assert_eq!(params.stroke_width, 3.0);
        assert_eq!(params.fill_opacity, 0.8);
    }

    #[test]
    fn test_parse_toml_without_params_table() {
        let params = SvgParams::from_toml_str("").expect("Should parse");
        assert_eq!(params, SvgParams::default());
    }

    #[test]
    fn test_parse_toml_out_of_range() {
        let result = SvgParams::from_toml_str("[params]\nfill-opacity = 2.0\n");
        assert!(matches!(
            result,
            Err(ParamsError::OutOfRange {
                field: "fill-opacity",
                ..
            })
        ));
    }

    #[test]
    fn test_parse_toml_unknown_key() {
        assert!(SvgParams::from_toml_str("[params]\nopacity = 1.0\n").is_err());
    }

    #[test]
    fn test_parse_toml_with_metadata() {
        let toml_str = r##"
[metadata]
name = "Water"
description = "Lakes and rivers"

[params]
fill = "#3388ff"
"##;
        let preset = ParamPreset::from_toml_str(toml_str).expect("Should parse");
        assert_eq!(preset.name.as_deref(), Some("Water"));
        assert_eq!(preset.description.as_deref(), Some("Lakes and rivers"));
        assert_eq!(preset.params.fill, "#3388ff");

        let params = SvgParams::from_toml_str(toml_str).expect("Should parse");
        assert_eq!(params, preset.params);
    }

    #[test]
    fn test_parse_toml_without_metadata() {
        let preset = ParamPreset::from_toml_str("[params]\nstroke-width = 1\n").unwrap();
        assert_eq!(preset.name, None);
        assert_eq!(preset.description, None);
        assert_eq!(preset.params.stroke_width, 1.0);
    }

    #[test]
    fn test_parse_toml_unknown_table() {
        assert!(ParamPreset::from_toml_str("[colors]\nfill = \"#000\"\n").is_err());
        assert!(ParamPreset::from_toml_str("[metadata]\nauthor = \"me\"\n").is_err());
    }

    #[test]
    fn test_invalid_toml_error() {
        let result = SvgParams::from_toml_str("this is not valid toml {{{{");
        assert!(matches!(result, Err(ParamsError::ParseError(_))));
    }
}
