//! Browser session management on top of chromiumoxide.
//!
//! One session per run: launch, hand out a page driver, tear down. Teardown
//! is unconditional on every exit path; the orchestrator owns that
//! guarantee.

use std::path::PathBuf;
use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;

use crate::driver::ChromiumDriver;
use crate::error::BrowserError;

/// Matches the desktop Chrome the booking site expects to see.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Grace delay before teardown in interactive mode, for manual inspection.
const INTERACTIVE_CLOSE_DELAY: Duration = Duration::from_secs(5);

/// Find a Chrome binary on this machine.
///
/// Order: explicit path from config, `google-chrome` / `chromium` /
/// `chromium-browser` on `PATH`, then the common macOS app location.
#[must_use]
pub fn find_chrome(explicit: Option<&PathBuf>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        if path.exists() {
            return Some(path.clone());
        }
    }

    for name in ["google-chrome", "chromium", "chromium-browser"] {
        if let Ok(path) = which::which(name) {
            return Some(path);
        }
    }

    if cfg!(target_os = "macos") {
        let common = PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome");
        if common.exists() {
            return Some(common);
        }
    }

    None
}

/// How to launch the browser for a run. Fixed at process start.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub headless: bool,
    /// Explicit Chrome binary; discovery runs when `None`.
    pub chrome_path: Option<PathBuf>,
}

/// A live browser with one page, plus the CDP event-handler task.
pub struct BrowserSession {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
    headless: bool,
}

impl BrowserSession {
    /// Launch Chrome and open a blank page.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::ChromeNotFound`] if no binary can be located,
    /// or [`BrowserError::Launch`] if the process fails to start.
    pub async fn launch(opts: &SessionOptions) -> Result<Self, BrowserError> {
        let chrome_path =
            find_chrome(opts.chrome_path.as_ref()).ok_or(BrowserError::ChromeNotFound)?;

        tracing::info!(path = %chrome_path.display(), headless = opts.headless, "launching browser");

        let mut builder = BrowserConfig::builder()
            .chrome_executable(chrome_path)
            .window_size(1920, 1080)
            .arg("--no-sandbox")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg(format!("--user-agent={USER_AGENT}"));
        if opts.headless {
            builder = builder.arg("--headless=new");
        } else {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(BrowserError::Launch)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| BrowserError::Launch(e.to_string()))?;

        // Drain CDP events for the life of the session.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::Cdp(e.to_string()))?;

        Ok(Self {
            browser,
            page,
            handler_task,
            headless: opts.headless,
        })
    }

    /// A driver bound to this session's page.
    #[must_use]
    pub fn driver(&self) -> ChromiumDriver {
        ChromiumDriver::new(self.page.clone())
    }

    /// Close the page and kill the browser process.
    ///
    /// In interactive mode a fixed grace delay runs first so the operator
    /// can inspect the final page. Teardown errors are logged, never
    /// surfaced.
    pub async fn close(mut self) {
        if !self.headless {
            tracing::info!(
                delay_secs = INTERACTIVE_CLOSE_DELAY.as_secs(),
                "interactive mode: delaying browser close"
            );
            tokio::time::sleep(INTERACTIVE_CLOSE_DELAY).await;
        }

        if let Err(e) = self.page.close().await {
            tracing::debug!(error = %e, "page close failed during teardown");
        }
        if let Err(e) = self.browser.close().await {
            tracing::debug!(error = %e, "browser close failed during teardown");
        }
        if let Err(e) = self.browser.wait().await {
            tracing::debug!(error = %e, "browser process wait failed during teardown");
        }
        self.handler_task.abort();
        tracing::info!("browser session closed");
    }
}
