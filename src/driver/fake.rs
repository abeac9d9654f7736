//! Scripted in-memory driver used by unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::app::{GleanerError, Result};
use crate::driver::{BestEffort, ClickOutcome, DriverFactory, PageDriver};

/// Observations shared between a test and the driver it handed away.
#[derive(Debug, Default)]
pub struct Probe {
    pub closes: AtomicUsize,
    pub navigations: AtomicUsize,
    pub captures: AtomicUsize,
    pub load_more_clicks: AtomicUsize,
    pub scrolls: Mutex<Vec<i64>>,
}

impl Probe {
    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn captures(&self) -> usize {
        self.captures.load(Ordering::SeqCst)
    }

    pub fn scrolls(&self) -> Vec<i64> {
        self.scrolls.lock().unwrap().clone()
    }
}

pub struct FakeDriver {
    pub probe: Arc<Probe>,
    /// Offsets reported by `current_offset`, in order; the last one repeats.
    /// When empty, the driver reports wherever it was last scrolled to.
    offsets: Mutex<VecDeque<i64>>,
    last_offset: Mutex<i64>,
    load_more_available: Mutex<usize>,
    expand: BestEffort,
    html: String,
    unreachable: bool,
    /// Fail every call after this many driver calls
    dies_after: Option<usize>,
    calls: AtomicUsize,
}

impl FakeDriver {
    pub fn new(html: &str) -> Self {
        Self {
            probe: Arc::new(Probe::default()),
            offsets: Mutex::new(VecDeque::new()),
            last_offset: Mutex::new(0),
            load_more_available: Mutex::new(0),
            expand: BestEffort::default(),
            html: html.to_string(),
            unreachable: false,
            dies_after: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_offsets(mut self, offsets: &[i64]) -> Self {
        self.offsets = Mutex::new(offsets.iter().copied().collect());
        self
    }

    pub fn with_load_more(self, clicks: usize) -> Self {
        *self.load_more_available.lock().unwrap() = clicks;
        self
    }

    pub fn with_expand(mut self, attempted: usize, succeeded: usize) -> Self {
        self.expand = BestEffort {
            attempted,
            succeeded,
        };
        self
    }

    pub fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    pub fn dies_after(mut self, calls: usize) -> Self {
        self.dies_after = Some(calls);
        self
    }

    fn tick(&self) -> Result<()> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        match self.dies_after {
            Some(limit) if n >= limit => Err(GleanerError::SessionUnavailable(
                "browser went away".into(),
            )),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl PageDriver for FakeDriver {
    async fn navigate(&self, url: &str) -> Result<()> {
        self.tick()?;
        self.probe.navigations.fetch_add(1, Ordering::SeqCst);
        if self.unreachable {
            return Err(GleanerError::Navigation {
                url: url.to_string(),
                reason: "net::ERR_NAME_NOT_RESOLVED".into(),
            });
        }
        *self.last_offset.lock().unwrap() = 0;
        Ok(())
    }

    async fn scroll_to(&self, offset: i64) -> Result<()> {
        self.tick()?;
        self.probe.scrolls.lock().unwrap().push(offset);
        *self.last_offset.lock().unwrap() = offset;
        Ok(())
    }

    async fn current_offset(&self) -> Result<i64> {
        self.tick()?;
        let mut offsets = self.offsets.lock().unwrap();
        let offset = match offsets.len() {
            0 => *self.last_offset.lock().unwrap(),
            1 => offsets[0],
            _ => offsets.pop_front().unwrap_or_default(),
        };
        Ok(offset)
    }

    async fn click_if_present(&self, _locator: &str) -> Result<ClickOutcome> {
        self.tick()?;
        let mut available = self.load_more_available.lock().unwrap();
        if *available == 0 {
            return Ok(ClickOutcome::Absent);
        }
        *available -= 1;
        self.probe.load_more_clicks.fetch_add(1, Ordering::SeqCst);
        Ok(ClickOutcome::Clicked)
    }

    async fn click_all(&self, _locator: &str) -> Result<BestEffort> {
        self.tick()?;
        Ok(self.expand)
    }

    async fn capture_document(&self) -> Result<String> {
        self.tick()?;
        self.probe.captures.fetch_add(1, Ordering::SeqCst);
        Ok(self.html.clone())
    }

    async fn close(&mut self) -> Result<()> {
        self.probe.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Hands out fake drivers; URLs containing "unreachable" fail navigation.
pub struct FakeFactory {
    pub probe: Arc<Probe>,
    html: String,
}

impl FakeFactory {
    pub fn new(html: &str) -> Self {
        Self {
            probe: Arc::new(Probe::default()),
            html: html.to_string(),
        }
    }
}

/// Driver whose navigation outcome depends on the URL it is sent to.
pub struct RoutedDriver {
    inner: FakeDriver,
}

#[async_trait]
impl PageDriver for RoutedDriver {
    async fn navigate(&self, url: &str) -> Result<()> {
        if url.contains("unreachable") {
            self.inner.probe.navigations.fetch_add(1, Ordering::SeqCst);
            return Err(GleanerError::Navigation {
                url: url.to_string(),
                reason: "net::ERR_CONNECTION_REFUSED".into(),
            });
        }
        if url.contains("panic") {
            panic!("driver blew up on {}", url);
        }
        self.inner.navigate(url).await
    }

    async fn scroll_to(&self, offset: i64) -> Result<()> {
        self.inner.scroll_to(offset).await
    }

    async fn current_offset(&self) -> Result<i64> {
        self.inner.current_offset().await
    }

    async fn click_if_present(&self, locator: &str) -> Result<ClickOutcome> {
        self.inner.click_if_present(locator).await
    }

    async fn click_all(&self, locator: &str) -> Result<BestEffort> {
        self.inner.click_all(locator).await
    }

    async fn capture_document(&self) -> Result<String> {
        self.inner.capture_document().await
    }

    async fn close(&mut self) -> Result<()> {
        self.inner.close().await
    }
}

#[async_trait]
impl DriverFactory for FakeFactory {
    type Driver = RoutedDriver;

    async fn open(&self) -> Result<RoutedDriver> {
        let mut inner = FakeDriver::new(&self.html);
        inner.probe = self.probe.clone();
        Ok(RoutedDriver { inner })
    }
}
