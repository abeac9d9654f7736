use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::app::{GleanerError, Result};

/// One review listing to scrape, with its scroll tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub url: String,
    /// Number of scroll/load-more steps to perform
    pub max_steps: usize,
    /// Pause after each step so asynchronously loaded content can render
    pub delay: Duration,
}

impl Target {
    pub fn new(url: impl Into<String>, max_steps: usize, delay: Duration) -> Self {
        Self {
            url: url.into(),
            max_steps,
            delay,
        }
    }

    /// Build a target from the CLI form where the delay is in seconds.
    ///
    /// Negative, NaN and infinite delays are rejected.
    pub fn with_delay_secs(
        url: impl Into<String>,
        max_steps: usize,
        delay_secs: f64,
    ) -> Result<Self> {
        let delay = Duration::try_from_secs_f64(delay_secs).map_err(|_| {
            GleanerError::Config(format!("Invalid step delay: {} seconds", delay_secs))
        })?;
        Ok(Self::new(url, max_steps, delay))
    }

    pub fn parsed_url(&self) -> Result<Url> {
        Ok(Url::parse(&self.url)?)
    }
}
