//! The seam between the navigation flow and a real browser.
//!
//! [`PageDriver`] carries exactly the operations the booking flow needs, so
//! every transition is unit-testable against a scripted mock while
//! production runs on a chromiumoxide page.

use std::path::Path;

use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::{Page, ScreenshotParams};

use crate::error::BrowserError;

#[async_trait]
pub trait PageDriver: Send + Sync {
    async fn goto(&self, url: &str) -> Result<(), BrowserError>;

    async fn current_url(&self) -> Result<String, BrowserError>;

    /// Whether an element matching the CSS selector exists in the document.
    async fn element_present(&self, selector: &str) -> Result<bool, BrowserError>;

    /// Whether the element exists, is enabled, and has a nonzero box.
    async fn element_clickable(&self, selector: &str) -> Result<bool, BrowserError>;

    async fn scroll_into_view(&self, selector: &str) -> Result<(), BrowserError>;

    async fn click(&self, selector: &str) -> Result<(), BrowserError>;

    /// The element's outer HTML, or `None` when it is absent.
    async fn outer_html(&self, selector: &str) -> Result<Option<String>, BrowserError>;

    async fn screenshot(&self, path: &Path) -> Result<(), BrowserError>;
}

/// Production driver over a chromiumoxide [`Page`].
pub struct ChromiumDriver {
    page: Page,
}

impl ChromiumDriver {
    #[must_use]
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// Evaluate a JS expression and deserialize its value.
    async fn eval<T: serde::de::DeserializeOwned>(&self, expr: String) -> Result<T, BrowserError> {
        let result = self
            .page
            .evaluate(expr)
            .await
            .map_err(|e| BrowserError::Cdp(e.to_string()))?;
        result
            .into_value()
            .map_err(|e| BrowserError::Cdp(format!("unexpected JS result: {e:?}")))
    }
}

/// Quote a CSS selector as a JS string literal.
fn js_quote(selector: &str) -> String {
    serde_json::Value::String(selector.to_owned()).to_string()
}

#[async_trait]
impl PageDriver for ChromiumDriver {
    async fn goto(&self, url: &str) -> Result<(), BrowserError> {
        self.page
            .goto(url)
            .await
            .map_err(|e| BrowserError::Cdp(e.to_string()))?;
        Ok(())
    }

    async fn current_url(&self) -> Result<String, BrowserError> {
        let url = self
            .page
            .url()
            .await
            .map_err(|e| BrowserError::Cdp(e.to_string()))?;
        Ok(url.map(|u| u.to_string()).unwrap_or_default())
    }

    async fn element_present(&self, selector: &str) -> Result<bool, BrowserError> {
        let sel = js_quote(selector);
        self.eval(format!("document.querySelector({sel}) !== null"))
            .await
    }

    async fn element_clickable(&self, selector: &str) -> Result<bool, BrowserError> {
        let sel = js_quote(selector);
        self.eval(format!(
            "(() => {{ \
               const el = document.querySelector({sel}); \
               if (el === null || el.disabled) return false; \
               const r = el.getBoundingClientRect(); \
               return r.width > 0 && r.height > 0; \
             }})()"
        ))
        .await
    }

    async fn scroll_into_view(&self, selector: &str) -> Result<(), BrowserError> {
        let sel = js_quote(selector);
        // block: center, matching how a human would bring the control into
        // the viewport before clicking.
        self.eval::<bool>(format!(
            "(() => {{ \
               const el = document.querySelector({sel}); \
               if (el === null) return false; \
               el.scrollIntoView({{block: 'center'}}); \
               return true; \
             }})()"
        ))
        .await?;
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<(), BrowserError> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|e| BrowserError::Cdp(e.to_string()))?;
        element
            .click()
            .await
            .map_err(|e| BrowserError::Cdp(e.to_string()))?;
        Ok(())
    }

    async fn outer_html(&self, selector: &str) -> Result<Option<String>, BrowserError> {
        let sel = js_quote(selector);
        self.eval(format!(
            "(() => {{ \
               const el = document.querySelector({sel}); \
               return el === null ? null : el.outerHTML; \
             }})()"
        ))
        .await
    }

    async fn screenshot(&self, path: &Path) -> Result<(), BrowserError> {
        self.page
            .save_screenshot(
                ScreenshotParams::builder()
                    .format(CaptureScreenshotFormat::Png)
                    .build(),
                path,
            )
            .await
            .map_err(|e| BrowserError::Cdp(e.to_string()))?;
        Ok(())
    }
}
