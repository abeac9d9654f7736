use std::path::Path;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig, BrowserConfigBuilder};
use chromiumoxide::error::CdpError;
use chromiumoxide::Page;
use futures::StreamExt;
use tempfile::TempDir;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::app::{GleanerError, Result};
use crate::driver::config::BrowserSettings;
use crate::driver::{BestEffort, ClickOutcome, DriverFactory, PageDriver};

/// Chrome-backed page driver using chromiumoxide.
///
/// Each driver owns its own browser process with a single page and a
/// throwaway profile directory, so concurrent drivers never share a profile.
pub struct ChromeDriver {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    closed: bool,
    // Dropped after the browser so Chrome has released its profile lock
    profile: TempDir,
}

impl ChromeDriver {
    /// Launch a browser and open a blank page
    pub async fn launch(settings: &BrowserSettings) -> Result<Self> {
        let profile = profile_dir()?;
        debug!("Launching browser with profile {}", profile.path().display());

        let browser_config = browser_config(settings, profile.path())
            .build()
            .map_err(|e| GleanerError::Config(format!("Failed to build browser config: {}", e)))?;

        let (browser, mut handler) = Browser::launch(browser_config).await.map_err(|e| {
            GleanerError::SessionUnavailable(format!(
                "Failed to launch browser: {}. Is Chrome or Chromium installed and in PATH?",
                e
            ))
        })?;

        let handler = tokio::spawn(async move {
            while let Some(_event) = handler.next().await {}
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| session_lost("Failed to create page", e))?;

        if let Some(ref ua) = settings.user_agent {
            page.set_user_agent(ua)
                .await
                .map_err(|e| session_lost("Failed to set user agent", e))?;
        }

        Ok(Self {
            browser,
            page,
            handler,
            closed: false,
            profile,
        })
    }

    async fn eval(&self, script: String) -> Result<serde_json::Value> {
        self.page
            .evaluate(script)
            .await
            .map_err(|e| session_lost("Script execution failed", e))?
            .into_value()
            .map_err(|e| GleanerError::SessionUnavailable(format!("Failed to parse result: {:?}", e)))
    }
}

impl Drop for ChromeDriver {
    fn drop(&mut self) {
        self.handler.abort();
    }
}

fn profile_dir() -> Result<TempDir> {
    Ok(tempfile::Builder::new()
        .prefix("gleaner-profile-")
        .tempdir()?)
}

fn browser_config(settings: &BrowserSettings, profile: &Path) -> BrowserConfigBuilder {
    let mut builder = BrowserConfig::builder().user_data_dir(profile);
    for arg in &settings.extra_args {
        builder = builder.arg(arg.as_str());
    }

    if !settings.headless {
        builder = builder.with_head();
    }

    builder
}

/// Errors meaning the browser connection itself is gone.
fn is_connection_error(e: &CdpError) -> bool {
    matches!(
        e,
        CdpError::Ws(_) | CdpError::ChannelSendError(_) | CdpError::NoResponse | CdpError::Io(_)
    )
}

fn session_lost(context: &str, e: CdpError) -> GleanerError {
    GleanerError::SessionUnavailable(format!("{}: {}", context, e))
}

/// A dropped connection while loading is a lost session, anything else a
/// failed navigation.
fn navigation_failed(url: &str, e: CdpError) -> GleanerError {
    if is_connection_error(&e) {
        session_lost("Navigation aborted", e)
    } else {
        GleanerError::Navigation {
            url: url.to_string(),
            reason: e.to_string(),
        }
    }
}

#[async_trait]
impl PageDriver for ChromeDriver {
    async fn navigate(&self, url: &str) -> Result<()> {
        self.page
            .goto(url)
            .await
            .map_err(|e| navigation_failed(url, e))?;
        self.page
            .wait_for_navigation()
            .await
            .map_err(|e| navigation_failed(url, e))?;
        Ok(())
    }

    async fn scroll_to(&self, offset: i64) -> Result<()> {
        self.eval(format!("window.scrollTo(0, {}); true", offset))
            .await
            .map(|_| ())
    }

    async fn current_offset(&self) -> Result<i64> {
        let value = self.eval("window.pageYOffset".to_string()).await?;
        let offset = value.as_f64().ok_or_else(|| {
            GleanerError::SessionUnavailable(format!("Unexpected scroll offset: {}", value))
        })?;
        Ok(offset.round() as i64)
    }

    async fn click_if_present(&self, locator: &str) -> Result<ClickOutcome> {
        let element = match self.page.find_element(locator).await {
            Ok(element) => element,
            Err(e) if is_connection_error(&e) => return Err(session_lost("Lookup failed", e)),
            Err(e) => {
                debug!("No element for {}: {}", locator, e);
                return Ok(ClickOutcome::Absent);
            }
        };

        match element.click().await {
            Ok(_) => Ok(ClickOutcome::Clicked),
            Err(e) if is_connection_error(&e) => Err(session_lost("Click failed", e)),
            Err(e) => {
                debug!("Element {} not clickable: {}", locator, e);
                Ok(ClickOutcome::NotInteractable)
            }
        }
    }

    async fn click_all(&self, locator: &str) -> Result<BestEffort> {
        let elements = match self.page.find_elements(locator).await {
            Ok(elements) => elements,
            Err(e) if is_connection_error(&e) => return Err(session_lost("Lookup failed", e)),
            Err(e) => {
                debug!("No elements for {}: {}", locator, e);
                return Ok(BestEffort::default());
            }
        };

        let mut tally = BestEffort::default();
        for element in elements {
            let outcome = match element.click().await {
                Ok(_) => ClickOutcome::Clicked,
                Err(e) if is_connection_error(&e) => return Err(session_lost("Click failed", e)),
                Err(_) => ClickOutcome::NotInteractable,
            };
            tally.record(outcome);
        }

        Ok(tally)
    }

    async fn capture_document(&self) -> Result<String> {
        self.page
            .content()
            .await
            .map_err(|e| session_lost("Failed to read page content", e))
    }

    async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        let result = self.browser.close().await;
        let _ = self.browser.wait().await;
        self.handler.abort();
        debug!("Released browser profile {}", self.profile.path().display());

        result
            .map(|_| ())
            .map_err(|e| session_lost("Failed to close browser", e))
    }
}

/// Opens one [`ChromeDriver`] per target.
#[derive(Debug, Clone, Default)]
pub struct ChromeLauncher {
    settings: BrowserSettings,
}

impl ChromeLauncher {
    pub fn new(settings: BrowserSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl DriverFactory for ChromeLauncher {
    type Driver = ChromeDriver;

    async fn open(&self) -> Result<ChromeDriver> {
        ChromeDriver::launch(&self.settings).await
    }
}
