use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;

use crate::app::{GleanerError, Result};
use crate::domain::{Locale, ReviewTable, Target};
use crate::driver::DriverFactory;
use crate::session::Orchestrator;

pub const DEFAULT_WORKERS: usize = 3;

/// Defaults for a batch of targets
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Concurrent browser sessions (default: 3)
    pub workers: usize,

    /// Session locale for every target (default: en)
    pub locale: Locale,

    /// Scroll steps per target (default: 1000)
    pub max_steps: usize,

    /// Pause between scroll steps in milliseconds (default: 1000)
    pub delay_ms: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            locale: Locale::En,
            max_steps: 1000,
            delay_ms: 1000,
        }
    }
}

impl BatchConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Result for one target of a batch.
#[derive(Debug)]
pub struct TargetOutcome {
    pub target: Target,
    pub result: Result<ReviewTable>,
}

impl TargetOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Runs targets on a bounded pool of independent browser sessions.
///
/// Outcomes come back in input order, and a failing or panicking target
/// only affects its own outcome.
pub struct BatchRunner<F: DriverFactory> {
    factory: Arc<F>,
    orchestrator: Arc<Orchestrator>,
    semaphore: Arc<Semaphore>,
    locale: Locale,
}

impl<F: DriverFactory + 'static> BatchRunner<F> {
    pub fn new(factory: F, orchestrator: Orchestrator, locale: Locale) -> Self {
        Self::with_workers(factory, orchestrator, locale, DEFAULT_WORKERS)
    }

    pub fn with_workers(
        factory: F,
        orchestrator: Orchestrator,
        locale: Locale,
        workers: usize,
    ) -> Self {
        Self {
            factory: Arc::new(factory),
            orchestrator: Arc::new(orchestrator),
            semaphore: Arc::new(Semaphore::new(workers.max(1))),
            locale,
        }
    }

    pub async fn run_all(&self, targets: Vec<Target>) -> Vec<TargetOutcome> {
        let mut handles = Vec::new();

        for target in targets {
            let factory = self.factory.clone();
            let orchestrator = self.orchestrator.clone();
            let semaphore = self.semaphore.clone();
            let locale = self.locale;
            let task_target = target.clone();

            let handle = tokio::spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| GleanerError::Worker(format!("Semaphore error: {}", e)))?;

                scrape_single_target(&*factory, &orchestrator, &task_target, locale).await
            });

            handles.push((target, handle));
        }

        let mut outcomes = Vec::with_capacity(handles.len());
        for (target, handle) in handles {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!("Task join error for {}: {}", target.url, e);
                    Err(GleanerError::Worker(e.to_string()))
                }
            };

            if let Err(ref e) = result {
                tracing::warn!("Target {} failed: {}", target.url, e);
            }
            outcomes.push(TargetOutcome { target, result });
        }

        outcomes
    }
}

async fn scrape_single_target<F: DriverFactory>(
    factory: &F,
    orchestrator: &Orchestrator,
    target: &Target,
    locale: Locale,
) -> Result<ReviewTable> {
    let driver: F::Driver = factory.open().await?;
    let table = orchestrator.run_target(driver, target, locale).await?;
    tracing::info!("Collected {} reviews from {}", table.len(), target.url);
    Ok(table)
}
