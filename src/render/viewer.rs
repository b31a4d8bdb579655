//! Opening finished documents

use crate::error::RenderError;
use std::path::Path;

/// Something that can show a written document to the user
pub trait Viewer {
    /// Open the document at `path`
    fn open(&self, path: &Path) -> Result<(), RenderError>;
}

/// Opens documents in the system's default browser
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemViewer;

impl Viewer for SystemViewer {
    fn open(&self, path: &Path) -> Result<(), RenderError> {
        let absolute = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        let url = format!("file://{}", absolute.display());

        log::debug!("Opening {}", url);
        webbrowser::open(&url).map_err(|e| RenderError::Viewer {
            path: absolute.display().to_string(),
            reason: e.to_string(),
        })
    }
}
