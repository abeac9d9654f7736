use tracing::debug;

use crate::app::Result;
use crate::driver::{BestEffort, PageDriver};
use crate::session::Session;

/// Expands truncated reviews before the page is captured.
#[derive(Debug, Clone)]
pub struct ContentUnwrapper {
    expand_locator: String,
}

impl ContentUnwrapper {
    pub fn new(expand_locator: impl Into<String>) -> Self {
        Self {
            expand_locator: expand_locator.into(),
        }
    }

    /// Return to the top and click every "show full review" control.
    ///
    /// Controls that cannot be clicked are skipped; only a dead session fails.
    pub async fn expand_all<D: PageDriver>(&self, session: &mut Session<D>) -> Result<BestEffort> {
        session.driver().scroll_to(0).await?;
        session.set_position(0);

        let tally = session.driver().click_all(&self.expand_locator).await?;
        debug!(
            "Expanded {} of {} reviews ({} skipped)",
            tally.succeeded,
            tally.attempted,
            tally.skipped()
        );
        Ok(tally)
    }
}
