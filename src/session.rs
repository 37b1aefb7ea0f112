//! Editing session state
//!
//! An [`EditSession`] holds what an interactive front end keeps between user
//! actions: the uploaded document, its export, the live parameters and the
//! memoized preview.

use thiserror::Error;
use tracing::debug;

use crate::download::{exported_file_name, is_svg_file_name, SvgArtifact};
use crate::error::ExportError;
use crate::params::SvgParams;
use crate::transform::{apply_params_to_svg, process_svg};

/// Errors surfaced to the user by session actions
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Please upload a valid SVG file (got '{name}')")]
    NotSvgFile { name: String },

    #[error("no SVG document loaded")]
    NoDocument,

    #[error(transparent)]
    Export(#[from] ExportError),
}

#[derive(Debug, Clone)]
struct LoadedSvg {
    file_name: String,
    original: String,
    exported: String,
}

#[derive(Debug, Clone)]
struct CachedPreview {
    params: SvgParams,
    svg: String,
}

/// State of one editing session
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    loaded: Option<LoadedSvg>,
    params: SvgParams,
    preserve_original: bool,
    preview: Option<CachedPreview>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an uploaded file and export it with the current preserve setting.
    ///
    /// Any previously loaded document is dropped first, so a rejected upload
    /// leaves the session ready for another one.
    pub fn load(&mut self, file_name: &str, content: &str) -> Result<(), SessionError> {
        self.loaded = None;
        self.preview = None;

        if !is_svg_file_name(file_name) {
            return Err(SessionError::NotSvgFile {
                name: file_name.to_string(),
            });
        }

        let exported = process_svg(content, self.preserve_original)?;
        debug!(file_name, "loaded svg");
        self.loaded = Some(LoadedSvg {
            file_name: file_name.to_string(),
            original: content.to_string(),
            exported,
        });
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.loaded.as_ref().map(|l| l.file_name.as_str())
    }

    pub fn original(&self) -> Option<&str> {
        self.loaded.as_ref().map(|l| l.original.as_str())
    }

    pub fn exported(&self) -> Option<&str> {
        self.loaded.as_ref().map(|l| l.exported.as_str())
    }

    pub fn params(&self) -> &SvgParams {
        &self.params
    }

    /// Replace the parameter record
    pub fn set_params(&mut self, params: SvgParams) {
        self.params = params;
    }

    /// Replace the parameter record with one derived from the current record
    pub fn update_params(&mut self, edit: impl FnOnce(&SvgParams) -> SvgParams) {
        self.params = edit(&self.params);
    }

    pub fn reset_params(&mut self) {
        self.params = SvgParams::default();
    }

    pub fn preserve_original(&self) -> bool {
        self.preserve_original
    }

    /// Toggle preserve mode; affects later loads and downloads
    pub fn set_preserve_original(&mut self, preserve: bool) {
        self.preserve_original = preserve;
    }

    /// Live preview of the exported document under the current parameters.
    ///
    /// Recomputed only when the parameters changed since the last call.
    pub fn preview(&mut self) -> Option<&str> {
        let loaded = self.loaded.as_ref()?;
        let stale = match &self.preview {
            Some(cached) => cached.params != self.params,
            None => true,
        };
        if stale {
            debug!("recomputing preview");
            self.preview = Some(CachedPreview {
                params: self.params.clone(),
                svg: apply_params_to_svg(&loaded.exported, &self.params),
            });
        }
        self.preview.as_ref().map(|p| p.svg.as_str())
    }

    /// Build the artifact to save.
    ///
    /// In preserve mode the original text is exported again with the original
    /// values kept; otherwise the existing export is reused.
    pub fn download(&self) -> Result<SvgArtifact, SessionError> {
        let loaded = self.loaded.as_ref().ok_or(SessionError::NoDocument)?;
        let content = if self.preserve_original {
            process_svg(&loaded.original, true)?
        } else {
            loaded.exported.clone()
        };
        Ok(SvgArtifact::new(
            exported_file_name(&loaded.file_name),
            content,
        ))
    }

    /// Return to the initial, upload-ready state
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
