use std::time::Duration;

use tracing::{info, warn};

use crate::app::Result;
use crate::config::Config;
use crate::domain::{Locale, ReviewTable, Target};
use crate::driver::PageDriver;
use crate::extract::DocumentParser;
use crate::scroll::ScrollController;
use crate::session::{Session, SessionState};
use crate::unwrap::ContentUnwrapper;

/// Composes one full run: navigate, scroll, expand, capture, extract.
///
/// The orchestrator is stateless between runs; every run gets its own
/// [`Session`] around a driver it owns, and that driver is closed on every
/// exit path before the result is returned.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    scroll: ScrollController,
    unwrapper: ContentUnwrapper,
    parser: DocumentParser,
}

impl Orchestrator {
    /// Build from configuration, rejecting invalid selectors up front
    pub fn new(config: &Config) -> Result<Self> {
        config.scroll.validate()?;
        config.extract.validate()?;

        Ok(Self {
            scroll: ScrollController::new(config.scroll.clone()),
            unwrapper: ContentUnwrapper::new(config.extract.expand_locator.clone()),
            parser: DocumentParser::new(&config.extract)?,
        })
    }

    /// Run against `url` with a locale tag that must be `en` or `cs`.
    pub async fn run<D: PageDriver>(
        &self,
        mut driver: D,
        url: &str,
        locale_tag: &str,
        max_steps: usize,
        delay: Duration,
    ) -> Result<ReviewTable> {
        let locale = match locale_tag.parse::<Locale>() {
            Ok(locale) => locale,
            Err(e) => {
                if let Err(close_err) = driver.close().await {
                    warn!("Failed to release session for {}: {}", url, close_err);
                }
                return Err(e);
            }
        };

        self.run_session(driver, url, locale, max_steps, delay).await
    }

    pub async fn run_target<D: PageDriver>(
        &self,
        driver: D,
        target: &Target,
        locale: Locale,
    ) -> Result<ReviewTable> {
        self.run_session(driver, &target.url, locale, target.max_steps, target.delay)
            .await
    }

    async fn run_session<D: PageDriver>(
        &self,
        driver: D,
        url: &str,
        locale: Locale,
        max_steps: usize,
        delay: Duration,
    ) -> Result<ReviewTable> {
        info!("Scraping {} ({} steps, locale {})", url, max_steps, locale);

        let stall_window = self.scroll.config().stall_window;
        let mut session = Session::new(driver, url, locale, stall_window);

        let result = self.drive(&mut session, max_steps, delay).await;

        if let Err(ref e) = result {
            session.transition(SessionState::Failed(e.kind()));
            warn!("Run for {} failed: {}", url, e);
        }

        if let Err(e) = session.release().await {
            warn!("Failed to release session for {}: {}", url, e);
        }

        result
    }

    async fn drive<D: PageDriver>(
        &self,
        session: &mut Session<D>,
        max_steps: usize,
        delay: Duration,
    ) -> Result<ReviewTable> {
        session.navigate().await?;

        session.transition(SessionState::Scrolling);
        self.scroll.run(session, max_steps, delay).await?;

        session.transition(SessionState::Unwrapping);
        self.unwrapper.expand_all(session).await?;

        session.capture().await?;

        let table = session.extract_table(&self.parser)?;
        session.transition(SessionState::Extracted);
        Ok(table)
    }
}
