//! Render error types.

use std::path::PathBuf;

/// Error produced while loading or evaluating a template.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Template file does not exist.
    #[error("Template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    /// Template file exists but could not be read.
    #[error("Failed to read template {}: {source}", path.display())]
    Io {
        /// Template file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Template syntax or evaluation error.
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}
