//! Browser session bound to one target, and the orchestrator that drives it.

mod orchestrator;

pub use orchestrator::Orchestrator;

use std::fmt;

use tracing::debug;
use url::Url;

use crate::app::{ErrorKind, GleanerError, Result};
use crate::domain::Locale;
use crate::driver::PageDriver;
use crate::domain::ReviewTable;
use crate::extract::{build_table, DocumentParser, DocumentSnapshot};
use crate::scroll::OffsetHistory;

/// Lifecycle of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Created,
    Navigated,
    Scrolling,
    Unwrapping,
    Captured,
    Extracted,
    Failed(ErrorKind),
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Failed(kind) => write!(f, "Failed({:?})", kind),
            other => write!(f, "{:?}", other),
        }
    }
}

/// One browser context bound to one target URL.
pub struct Session<D: PageDriver> {
    driver: D,
    url: String,
    locale: Locale,
    position: i64,
    history: OffsetHistory,
    snapshot: Option<DocumentSnapshot>,
    state: SessionState,
    released: bool,
}

impl<D: PageDriver> Session<D> {
    pub fn new(driver: D, url: impl Into<String>, locale: Locale, stall_window: usize) -> Self {
        Self {
            driver,
            url: url.into(),
            locale,
            position: 0,
            history: OffsetHistory::new(stall_window),
            snapshot: None,
            state: SessionState::Created,
            released: false,
        }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn position(&self) -> i64 {
        self.position
    }

    pub fn set_position(&mut self, offset: i64) {
        self.position = offset;
    }

    pub fn history(&self) -> &OffsetHistory {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut OffsetHistory {
        &mut self.history
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn transition(&mut self, next: SessionState) {
        debug!("Session {}: {} -> {}", self.url, self.state, next);
        self.state = next;
    }

    /// Load the target and forget everything learned about the previous page.
    pub async fn navigate(&mut self) -> Result<()> {
        Url::parse(&self.url)?;
        self.driver.navigate(&self.url).await?;

        self.position = 0;
        self.history.reset();
        self.snapshot = None;
        self.transition(SessionState::Navigated);
        Ok(())
    }

    /// Replace the stored snapshot with the page as it is rendered now.
    pub async fn capture(&mut self) -> Result<&DocumentSnapshot> {
        self.snapshot = None;
        let html = self.driver.capture_document().await?;
        self.transition(SessionState::Captured);
        Ok(&*self.snapshot.insert(DocumentSnapshot::new(html)))
    }

    pub fn snapshot(&self) -> Result<&DocumentSnapshot> {
        self.snapshot.as_ref().ok_or(GleanerError::NoSnapshot)
    }

    pub fn extract_short(&self, parser: &DocumentParser) -> Result<Vec<String>> {
        let document = self.snapshot()?.parse();
        Ok(parser.short_reviews(&document))
    }

    pub fn extract_long(&self, parser: &DocumentParser) -> Result<Vec<String>> {
        let document = self.snapshot()?.parse();
        Ok(parser.long_reviews(&document))
    }

    pub fn extract_ratings(&self, parser: &DocumentParser) -> Result<Vec<u32>> {
        let document = self.snapshot()?.parse();
        parser.ratings(&document, self.locale)
    }

    pub fn extract_support(&self, parser: &DocumentParser) -> Result<Vec<String>> {
        let document = self.snapshot()?.parse();
        Ok(parser.supports(&document))
    }

    /// Extract all four columns from the stored snapshot and assemble them.
    pub fn extract_table(&self, parser: &DocumentParser) -> Result<ReviewTable> {
        let short = self.extract_short(parser)?;
        let long = self.extract_long(parser)?;
        let ratings = self.extract_ratings(parser)?;
        let supports = self.extract_support(parser)?;
        build_table(short, long, ratings, supports, self.locale)
    }

    /// Close the browser. Later calls are no-ops.
    pub async fn release(&mut self) -> Result<()> {
        if self.released {
            return Ok(());
        }
        self.released = true;
        self.driver.close().await
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::fake::FakeDriver;
    use crate::extract::ExtractConfig;

    const PAGE: &str = r#"<html><body>
        <span jsname="bN97Pc">short one</span>
        <span jsname="fbQN7e"></span>
    </body></html>"#;

    fn parser() -> DocumentParser {
        DocumentParser::new(&ExtractConfig::default()).unwrap()
    }

    #[test]
    fn test_extraction_without_snapshot_fails() {
        let session = Session::new(FakeDriver::new(PAGE), "https://example.com", Locale::En, 5);
        let parser = parser();

        assert!(matches!(session.snapshot(), Err(GleanerError::NoSnapshot)));
        assert!(matches!(
            session.extract_short(&parser),
            Err(GleanerError::NoSnapshot)
        ));
        assert!(matches!(
            session.extract_long(&parser),
            Err(GleanerError::NoSnapshot)
        ));
        assert!(matches!(
            session.extract_ratings(&parser),
            Err(GleanerError::NoSnapshot)
        ));
        assert!(matches!(
            session.extract_support(&parser),
            Err(GleanerError::NoSnapshot)
        ));
        assert!(matches!(
            session.extract_table(&parser),
            Err(GleanerError::NoSnapshot)
        ));
    }

    #[tokio::test]
    async fn test_capture_enables_extraction() {
        let mut session =
            Session::new(FakeDriver::new(PAGE), "https://example.com", Locale::En, 5);
        session.capture().await.unwrap();

        assert_eq!(session.state(), SessionState::Captured);
        assert_eq!(session.extract_short(&parser()).unwrap(), vec!["short one"]);
        assert_eq!(session.extract_long(&parser()).unwrap(), vec![""]);
    }

    #[tokio::test]
    async fn test_extract_table_from_capture() {
        let page = r#"<html><body>
          <span class="nt2C1d"><div class="pf5lIe"><div aria-label="Rated 4 stars out of five stars"></div></div></span>
          <span jsname="bN97Pc">Solid</span><span jsname="fbQN7e"></span>
          <div class="jUL89d y92BAb">12</div>
        </body></html>"#;
        let mut session = Session::new(FakeDriver::new(page), "https://example.com", Locale::En, 5);
        session.capture().await.unwrap();

        let table = session.extract_table(&parser()).unwrap();

        assert_eq!(
            table,
            ReviewTable::Records(vec![crate::domain::ReviewRecord {
                review: "Solid".into(),
                rating: 4,
                support: "12".into(),
            }])
        );
    }

    #[test]
    fn test_czech_session_misses_english_ratings() {
        let page = r#"<html><body>
          <span class="nt2C1d"><div class="pf5lIe"><div aria-label="Rated 5 stars out of five stars"></div></div></span>
          <span jsname="bN97Pc">Great</span>
          <div class="jUL89d y92BAb">3</div>
        </body></html>"#;
        let mut session = Session::new(FakeDriver::new(page), "https://example.com", Locale::Cs, 5);
        session.snapshot = Some(DocumentSnapshot::new(page.to_string()));

        let err = session.extract_table(&parser()).unwrap_err();
        assert!(matches!(err, GleanerError::LocatorNotFound(what) if what.contains("cs")));
    }

    #[tokio::test]
    async fn test_navigate_resets_page_state() {
        let mut session =
            Session::new(FakeDriver::new(PAGE), "https://example.com", Locale::En, 2);
        session.capture().await.unwrap();
        session.set_position(4200);
        session.history_mut().push(4200);

        session.navigate().await.unwrap();

        assert_eq!(session.position(), 0);
        assert_eq!(session.history().recent().count(), 0);
        assert!(matches!(session.snapshot(), Err(GleanerError::NoSnapshot)));
        assert_eq!(session.state(), SessionState::Navigated);
    }

    #[tokio::test]
    async fn test_navigate_rejects_invalid_url() {
        let driver = FakeDriver::new(PAGE);
        let probe = driver.probe.clone();
        let mut session = Session::new(driver, "play store", Locale::En, 5);

        let err = session.navigate().await.unwrap_err();

        assert!(matches!(err, GleanerError::InvalidUrl(_)));
        assert_eq!(probe.navigations.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_release_closes_once() {
        let driver = FakeDriver::new(PAGE);
        let probe = driver.probe.clone();
        let mut session = Session::new(driver, "https://example.com", Locale::En, 5);

        session.release().await.unwrap();
        session.release().await.unwrap();

        assert!(session.is_released());
        assert_eq!(probe.closes(), 1);
    }
}
