//! Template loading and interpolation.
//!
//! Templates are plain HTML files with `{{ variable }}` placeholders and the
//! usual block constructs. Rendering is strict: referencing a variable that
//! the data does not provide is an error rather than silent empty output.
//! Interpolated values are HTML-escaped.

use std::path::Path;

use log::debug;
use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde::Serialize;

use crate::error::{Error, Result};

/// Render the template file at `path` against `data`.
///
/// The path is resolved to an absolute path up front so that `{% include %}`
/// and `{% extends %}` inside the template resolve against the template's
/// own directory, regardless of the process working directory.
pub(crate) async fn render_file<S: Serialize>(path: &Path, data: S) -> Result<String> {
    let abs = std::path::absolute(path).map_err(|e| Error::TemplateNotFound {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let source = tokio::fs::read_to_string(&abs)
        .await
        .map_err(|e| Error::TemplateNotFound {
            path: abs.clone(),
            message: e.to_string(),
        })?;

    debug!("rendering template {}", abs.display());
    render_source(&abs, &source, data)
}

/// Interpolate `source` (the text of the template at `abs`) with `data`.
fn render_source<S: Serialize>(abs: &Path, source: &str, data: S) -> Result<String> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    // Values are HTML-escaped in the root template and in includes alike,
    // whatever the file extension.
    env.set_auto_escape_callback(|_| AutoEscape::Html);

    // Sibling templates are loadable so includes work file-relative.
    if let Some(dir) = abs.parent() {
        env.set_loader(minijinja::path_loader(dir));
    }

    env.render_str(source, data).map_err(|e| Error::TemplateSyntax {
        path: abs.to_path_buf(),
        message: match e.line() {
            Some(line) => format!("{} (line {})", e, line),
            None => e.to_string(),
        },
    })
}
