//! Page driver adapter.
//!
//! A [`PageDriver`] wraps one live browser page and exposes the handful of
//! primitives the scroll loop and extraction need. Every call may fail with
//! [`GleanerError::SessionUnavailable`](crate::app::GleanerError) once the
//! underlying browser is gone.
//!
//! ```text
//! DriverFactory::open → PageDriver → Session (owned, one per target)
//! ```

mod chrome;
mod config;
#[cfg(test)]
pub(crate) mod fake;

pub use chrome::{ChromeDriver, ChromeLauncher};
pub use config::BrowserSettings;

use async_trait::async_trait;

use crate::app::Result;

/// Outcome of a single best-effort click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Clicked,
    /// No element matched the locator
    Absent,
    /// An element matched but could not be clicked (hidden, detached, covered)
    NotInteractable,
}

/// Tally of a best-effort click over every element matching a locator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BestEffort {
    pub attempted: usize,
    pub succeeded: usize,
}

impl BestEffort {
    pub fn record(&mut self, outcome: ClickOutcome) {
        match outcome {
            ClickOutcome::Absent => {}
            ClickOutcome::Clicked => {
                self.attempted += 1;
                self.succeeded += 1;
            }
            ClickOutcome::NotInteractable => self.attempted += 1,
        }
    }

    pub fn skipped(&self) -> usize {
        self.attempted - self.succeeded
    }
}

/// Primitives over one browser page.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Load a URL and wait for the navigation to settle
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Scroll the window to an absolute vertical pixel offset
    async fn scroll_to(&self, offset: i64) -> Result<()>;

    /// Read the live vertical scroll position
    async fn current_offset(&self) -> Result<i64>;

    /// Click the first element matching `locator`, if there is one
    async fn click_if_present(&self, locator: &str) -> Result<ClickOutcome>;

    /// Click every element matching `locator`, skipping ones that refuse
    async fn click_all(&self, locator: &str) -> Result<BestEffort>;

    /// Serialized markup of the current rendered document
    async fn capture_document(&self) -> Result<String>;

    /// Tear down the browser session
    async fn close(&mut self) -> Result<()>;
}

/// Opens a fresh, exclusively owned driver per target.
#[async_trait]
pub trait DriverFactory: Send + Sync {
    type Driver: PageDriver + 'static;

    async fn open(&self) -> Result<Self::Driver>;
}
