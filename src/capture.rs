//! Headless Chrome capture backend.
//!
//! Every capture runs in its own browser session: launch, load the rendered
//! HTML, screenshot, close. Sessions are never shared between renders, so
//! concurrent callers each get an isolated browser process.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use base64::Engine as Base64Engine;
use headless_chrome::browser::tab::Tab;
use headless_chrome::protocol::cdp::{Emulation, Page, DOM};
use headless_chrome::{Browser, LaunchOptions};
use log::debug;
use tokio::sync::oneshot;

use crate::error::{Error, Result};
use crate::{ImageFormat, RenderOptions};

/// Grace period after the navigation event so that images, fonts and other
/// assets referenced by the page have a chance to finish loading.
const SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Capture `html` as an encoded image.
///
/// The blocking browser work runs on a dedicated worker thread that owns the
/// session for its whole lifetime, so async callers never block the runtime
/// and the browser process is shut down even if the returned future is
/// dropped before completion.
pub(crate) async fn capture(html: String, options: RenderOptions) -> Result<Vec<u8>> {
    let (tx, rx) = oneshot::channel();

    thread::spawn(move || {
        let _ = tx.send(capture_blocking(&html, options));
    });

    rx.await
        .map_err(|e| Error::Capture(format!("Capture worker exited early: {}", e)))?
}

/// Synchronous capture pipeline: launch, load, screenshot, close.
fn capture_blocking(html: &str, mut options: RenderOptions) -> Result<Vec<u8>> {
    let launch = launch_options(
        options.browser_launch.take(),
        options.width,
        options.height,
    )?;

    let session = CaptureSession::launch(launch)?;

    // The session is closed on every exit path before the outcome surfaces.
    let result = session
        .load_html(html)
        .and_then(|_| session.screenshot(&options));
    session.close();

    result
}

/// Build the launch configuration for a capture.
///
/// Caller-supplied options are forwarded as-is except for the window size,
/// which always follows the requested image dimensions: in headless Chrome
/// the window is the viewport.
fn launch_options(
    custom: Option<LaunchOptions<'static>>,
    width: u32,
    height: u32,
) -> Result<LaunchOptions<'static>> {
    match custom {
        Some(mut launch) => {
            launch.window_size = Some((width, height));
            Ok(launch)
        }
        None => LaunchOptions::default_builder()
            .headless(true)
            .sandbox(false)
            .window_size(Some((width, height)))
            .build()
            .map_err(|e| Error::BrowserLaunch(format!("Failed to build launch options: {}", e))),
    }
}

/// Encode raw HTML as a navigable `data:` URL.
fn data_url(html: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(html);
    format!("data:text/html;charset=utf-8;base64,{}", encoded)
}

/// Quality as sent to the browser: JPEG only, clamped to the 0-100 range
/// the protocol accepts. Zero is the lowest quality, not a missing value.
fn capture_quality(format: ImageFormat, quality: u8) -> Option<u32> {
    match format {
        ImageFormat::Jpeg => Some(u32::from(quality.min(100))),
        // Chrome rejects quality on PNG captures.
        ImageFormat::Png => None,
    }
}

/// A headless Chrome process and the single tab used for one capture.
struct CaptureSession {
    browser: Browser,
    tab: Arc<Tab>,
}

impl CaptureSession {
    fn launch(launch: LaunchOptions<'static>) -> Result<Self> {
        debug!("launching headless browser");

        let browser = Browser::new(launch)
            .map_err(|e| Error::BrowserLaunch(format!("Failed to launch browser: {}", e)))?;

        let tab = browser
            .new_tab()
            .map_err(|e| Error::BrowserLaunch(format!("Failed to create tab: {}", e)))?;

        Ok(Self { browser, tab })
    }

    fn load_html(&self, html: &str) -> Result<()> {
        self.tab
            .navigate_to(&data_url(html))
            .map_err(|e| Error::RenderTimeout(format!("Navigation failed: {}", e)))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| Error::RenderTimeout(format!("Wait for navigation failed: {}", e)))?;

        // Wait for the page to stabilize
        thread::sleep(SETTLE_DELAY);

        Ok(())
    }

    fn screenshot(&self, options: &RenderOptions) -> Result<Vec<u8>> {
        // Alpha only survives in PNG output; Chrome paints a white page
        // background unless it is overridden first.
        if options.transparent && options.format == ImageFormat::Png {
            self.tab
                .call_method(Emulation::SetDefaultBackgroundColorOverride {
                    color: Some(DOM::RGBA {
                        r: 0,
                        g: 0,
                        b: 0,
                        a: Some(0.),
                    }),
                })
                .map_err(|e| {
                    Error::Capture(format!("Failed to clear page background: {}", e))
                })?;
        }

        let format = match options.format {
            ImageFormat::Png => Page::CaptureScreenshotFormatOption::Png,
            ImageFormat::Jpeg => Page::CaptureScreenshotFormatOption::Jpeg,
        };

        let reply = self
            .tab
            .call_method(Page::CaptureScreenshot {
                format: Some(format),
                quality: capture_quality(options.format, options.quality),
                clip: None,
                from_surface: Some(true),
                capture_beyond_viewport: Some(options.full_page),
                optimize_for_speed: None,
            })
            .map_err(|e| Error::Capture(format!("Screenshot failed: {}", e)))?;

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(reply.data)
            .map_err(|e| Error::Capture(format!("Screenshot payload was not base64: {}", e)))?;

        debug!("captured {} byte {:?} image", bytes.len(), options.format);
        Ok(bytes)
    }

    /// Drop the tab and browser explicitly so the child process terminates
    /// promptly.
    fn close(self) {
        drop(self.tab);
        drop(self.browser);
    }
}
