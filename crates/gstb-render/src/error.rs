//! Error types for rendering and sharing.

use thiserror::Error;

/// Failure to produce a print view.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The HTML template failed to render.
    #[error("failed to render invoice template: {0}")]
    Template(#[from] askama::Error),
}

/// A share request the host could not fulfil.
///
/// Not fatal: callers report it as a notice and fall back to showing the
/// message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShareError {
    #[error("sharing is not supported on this device")]
    Unsupported,
}
