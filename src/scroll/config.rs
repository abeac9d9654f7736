use serde::{Deserialize, Serialize};

use crate::app::{GleanerError, Result};

/// Configuration for the incremental scroll loop
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Pixels scrolled forward when no "load more" control is present (default: 10000)
    pub offset_delta: i64,

    /// Consecutive equal offsets that count as a stall (default: 5)
    pub stall_window: usize,

    /// Abort the loop on a stall instead of running every step (default: true)
    pub detect_stall: bool,

    /// CSS selector of the "load more" control
    pub load_more_locator: String,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            offset_delta: 10000,
            stall_window: 5,
            detect_stall: true,
            load_more_locator: r#"div[jsname="i3y3Ic"]"#.to_string(),
        }
    }
}

impl ScrollConfig {
    pub fn validate(&self) -> Result<()> {
        if self.stall_window < 2 {
            return Err(GleanerError::Config(format!(
                "stall_window must be at least 2, got {}",
                self.stall_window
            )));
        }
        if self.offset_delta <= 0 {
            return Err(GleanerError::Config(format!(
                "offset_delta must be positive, got {}",
                self.offset_delta
            )));
        }
        scraper::Selector::parse(&self.load_more_locator).map_err(|e| {
            GleanerError::Config(format!(
                "Invalid load_more_locator {:?}: {}",
                self.load_more_locator, e
            ))
        })?;
        Ok(())
    }
}
