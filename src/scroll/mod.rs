//! Incremental scroll loop for infinite-scroll listings.
//!
//! Each step prefers the listing's "load more" control and falls back to
//! scrolling a fixed distance past the last known offset. After the step the
//! live offset is read back into the session's [`OffsetHistory`]; when the
//! whole window holds one value the feed has stopped producing content.

mod config;
mod history;

pub use config::ScrollConfig;
pub use history::OffsetHistory;

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::app::{GleanerError, Result};
use crate::driver::{ClickOutcome, PageDriver};
use crate::session::Session;

/// How a single step advanced the feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    LoadMore,
    Scrolled,
}

/// Summary of a finished scroll loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollReport {
    pub steps: usize,
    pub load_more_clicks: usize,
    pub scrolls: usize,
    pub final_offset: i64,
}

#[derive(Debug, Clone)]
pub struct ScrollController {
    config: ScrollConfig,
}

impl ScrollController {
    pub fn new(config: ScrollConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    /// Advance the feed once.
    ///
    /// `from` overrides the offset the fallback scroll starts at; `None`
    /// scrolls from the session's last known offset.
    pub async fn step<D: PageDriver>(
        &self,
        session: &mut Session<D>,
        from: Option<i64>,
    ) -> Result<StepKind> {
        let kind = match session
            .driver()
            .click_if_present(&self.config.load_more_locator)
            .await?
        {
            ClickOutcome::Clicked => StepKind::LoadMore,
            ClickOutcome::Absent | ClickOutcome::NotInteractable => {
                let start = from.unwrap_or(session.position());
                session
                    .driver()
                    .scroll_to(start + self.config.offset_delta)
                    .await?;
                StepKind::Scrolled
            }
        };

        let offset = session.driver().current_offset().await?;
        session.set_position(offset);
        Ok(kind)
    }

    /// Record the current offset and fail if the window shows no movement.
    pub fn check_movement<D: PageDriver>(&self, session: &mut Session<D>, step: usize) -> Result<()> {
        let offset = session.position();
        let history = session.history_mut();
        history.push(offset);
        if history.is_stalled() {
            warn!(
                "Scroll stalled at offset {} after {} steps ({} equal readings)",
                offset,
                step,
                history.window()
            );
            return Err(GleanerError::StalledScroll { step, offset });
        }
        Ok(())
    }

    /// Run up to `max_steps` steps, pausing `delay` after each.
    pub async fn run<D: PageDriver>(
        &self,
        session: &mut Session<D>,
        max_steps: usize,
        delay: Duration,
    ) -> Result<ScrollReport> {
        let mut report = ScrollReport::default();

        for step in 1..=max_steps {
            match self.step(session, None).await? {
                StepKind::LoadMore => report.load_more_clicks += 1,
                StepKind::Scrolled => report.scrolls += 1,
            }
            report.steps = step;
            debug!("Scroll step {}/{} at offset {}", step, max_steps, session.position());

            if self.config.detect_stall {
                self.check_movement(session, step)?;
            }

            tokio::time::sleep(delay).await;
        }

        report.final_offset = session.position();
        info!(
            "Scrolled {} steps ({} load-more clicks) to offset {}",
            report.steps, report.load_more_clicks, report.final_offset
        );
        Ok(report)
    }
}
