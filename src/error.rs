//! Error types for the render pipeline

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for render operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while rendering a template to an image
#[derive(Error, Debug)]
pub enum Error {
    /// The template path did not resolve to a readable file
    #[error("Template not found: {}: {message}", .path.display())]
    TemplateNotFound { path: PathBuf, message: String },

    /// The template file was read but could not be rendered
    #[error("Template rendering failed: {}: {message}", .path.display())]
    TemplateSyntax { path: PathBuf, message: String },

    /// The browser process could not be started or attached to
    #[error("Browser launch failed: {0}")]
    BrowserLaunch(String),

    /// The page did not finish loading in time
    #[error("Page load timed out: {0}")]
    RenderTimeout(String),

    /// The screenshot could not be taken or decoded
    #[error("Screenshot capture failed: {0}")]
    Capture(String),

    /// The rendered image could not be written to disk
    #[error("Failed to write image: {}: {message}", .path.display())]
    Write { path: PathBuf, message: String },
}
