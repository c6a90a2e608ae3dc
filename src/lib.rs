//! Cardshot
//!
//! Renders an HTML template into a PNG or JPEG image. Data is interpolated
//! into the template, the resulting HTML is loaded in a headless Chrome
//! session, and a screenshot of the page is returned as the image.
//!
//! # Features
//!
//! - **Strict templating**: HTML-escaped `{{ placeholder }}` substitution
//!   with file-relative includes; referencing missing data is an error
//! - **Isolated captures**: every render launches its own browser session
//!   and closes it before returning
//! - **PNG and JPEG output**: with transparency, JPEG quality, and
//!   full-page capture options
//!
//! # Example
//!
//! ```no_run
//! use cardshot::{ImageFormat, RenderOptions};
//!
//! # #[tokio::main]
//! # async fn main() -> cardshot::Result<()> {
//! let written = cardshot::render_template_to_image_file(
//!     "templates/card.html",
//!     serde_json::json!({ "title": "Hello World" }),
//!     "out/card.jpg",
//!     RenderOptions {
//!         format: ImageFormat::Jpeg,
//!         quality: 85,
//!         ..Default::default()
//!     },
//! )
//! .await?;
//! println!("wrote {}", written.display());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use log::debug;
use serde::Serialize;

pub mod error;
pub use error::{Error, Result};

mod capture;
mod template;

// Re-exported so callers can fill `RenderOptions::browser_launch` without
// depending on headless_chrome themselves.
pub use headless_chrome::LaunchOptions;

/// Encoding of the captured image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl Default for ImageFormat {
    fn default() -> Self {
        ImageFormat::Png
    }
}

/// Options for a single image render
///
/// The defaults produce a 1200x630 opaque PNG of the viewport, sized for
/// social-media preview cards.
///
/// ```
/// let options = cardshot::RenderOptions::default();
/// assert_eq!(options.width, 1200);
/// assert_eq!(options.height, 630);
/// assert_eq!(options.format, cardshot::ImageFormat::Png);
/// ```
pub struct RenderOptions {
    /// Viewport width in pixels
    pub width: u32,
    /// Viewport height in pixels
    pub height: u32,
    /// Capture the page's full scrollable extent instead of the viewport
    pub full_page: bool,
    /// Keep the page background transparent instead of white (PNG only)
    pub transparent: bool,
    /// Output encoding
    pub format: ImageFormat,
    /// JPEG compression quality, 0-100 (ignored for PNG)
    pub quality: u8,
    /// Browser launch configuration for the capture session. `None` uses
    /// the built-in defaults: headless, sandbox disabled, window sized to
    /// `width` x `height`. Custom options are forwarded as-is, except that
    /// the window size always follows the requested dimensions.
    pub browser_launch: Option<LaunchOptions<'static>>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 630,
            full_page: false,
            transparent: false,
            format: ImageFormat::default(),
            quality: 80,
            browser_launch: None,
        }
    }
}

/// Render the template at `template_path` against `data` and return the
/// resulting HTML.
///
/// Substitution is strict: a `{{ placeholder }}` with no matching entry in
/// `data` fails with [`Error::TemplateSyntax`] rather than rendering empty.
/// Interpolated values are HTML-escaped; pass trusted markup through the
/// `safe` filter to inject it raw. `{% include %}` paths resolve relative
/// to the template's own directory.
pub async fn render_template_to_html<P, S>(template_path: P, data: S) -> Result<String>
where
    P: AsRef<Path>,
    S: Serialize,
{
    template::render_file(template_path.as_ref(), data).await
}

/// Render the template at `template_path` against `data` and capture it as
/// an encoded image, returned in memory.
///
/// Template problems surface before any browser process is spawned. The
/// browser session used for the capture is closed before this returns,
/// whether the capture succeeded or not.
pub async fn render_template_to_image_buffer<P, S>(
    template_path: P,
    data: S,
    options: RenderOptions,
) -> Result<Vec<u8>>
where
    P: AsRef<Path>,
    S: Serialize,
{
    let html = template::render_file(template_path.as_ref(), data).await?;
    debug!(
        "rendered {} into {} bytes of html",
        template_path.as_ref().display(),
        html.len()
    );

    capture::capture(html, options).await
}

/// Render the template at `template_path` against `data` and write the
/// captured image to `out_path`.
///
/// Missing parent directories of `out_path` are created and an existing
/// file is overwritten. Returns the absolute path of the written file.
pub async fn render_template_to_image_file<P, S, Q>(
    template_path: P,
    data: S,
    out_path: Q,
    options: RenderOptions,
) -> Result<PathBuf>
where
    P: AsRef<Path>,
    S: Serialize,
    Q: AsRef<Path>,
{
    let buffer = render_template_to_image_buffer(template_path, data, options).await?;

    let out = out_path.as_ref();
    let abs = std::path::absolute(out).map_err(|e| Error::Write {
        path: out.to_path_buf(),
        message: e.to_string(),
    })?;

    if let Some(parent) = abs.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::Write {
                path: abs.clone(),
                message: format!("Failed to create {}: {}", parent.display(), e),
            })?;
    }

    tokio::fs::write(&abs, &buffer)
        .await
        .map_err(|e| Error::Write {
            path: abs.clone(),
            message: e.to_string(),
        })?;

    debug!("wrote {} byte image to {}", buffer.len(), abs.display());
    Ok(abs)
}
