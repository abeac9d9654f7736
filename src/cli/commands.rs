use std::path::{Path, PathBuf};
use std::time::Duration;

use serde_json::json;

use crate::app::Result;
use crate::batch::{BatchRunner, TargetOutcome};
use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::domain::{Locale, ReviewTable, Target};
use crate::driver::ChromeLauncher;
use crate::session::Orchestrator;

/// Counts printed at the end of a scrape
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrapeSummary {
    pub succeeded: usize,
    pub failed: usize,
}

/// Load the config file and apply command line overrides.
pub fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(workers) = cli.workers {
        config.batch.workers = workers;
    }
    if let Some(ref tag) = cli.locale {
        config.batch.locale = tag.parse::<Locale>()?;
    }
    if cli.headed {
        config.browser.headless = false;
    }

    Ok(config)
}

pub async fn scrape(
    config: &Config,
    urls: &[String],
    steps: Option<usize>,
    delay_secs: Option<f64>,
    format: OutputFormat,
) -> Result<ScrapeSummary> {
    let max_steps = steps.unwrap_or(config.batch.max_steps);
    let targets = build_targets(urls, max_steps, delay_secs, config.batch.delay())?;

    let orchestrator = Orchestrator::new(config)?;
    let launcher = ChromeLauncher::new(config.browser.clone());
    let runner = BatchRunner::with_workers(
        launcher,
        orchestrator,
        config.batch.locale,
        config.batch.workers,
    );

    eprintln!(
        "Scraping {} listings with {} workers...",
        targets.len(),
        config.batch.workers
    );

    let outcomes = runner.run_all(targets).await;
    let mut summary = ScrapeSummary::default();

    for outcome in &outcomes {
        match outcome.result {
            Ok(_) => summary.succeeded += 1,
            Err(ref e) => {
                summary.failed += 1;
                eprintln!("  Error scraping {}: {}", outcome.target.url, e);
            }
        }

        let rendered = match format {
            OutputFormat::Json => render_json(outcome),
            OutputFormat::Tsv => render_tsv(outcome),
        };
        println!("{}", rendered);
    }

    eprintln!(
        "Scrape complete: {} succeeded, {} failed",
        summary.succeeded, summary.failed
    );
    Ok(summary)
}

/// Targets for every URL; a `--delay` override wins over the config delay.
pub fn build_targets(
    urls: &[String],
    max_steps: usize,
    delay_secs: Option<f64>,
    default_delay: Duration,
) -> Result<Vec<Target>> {
    urls.iter()
        .map(|url| match delay_secs {
            Some(secs) => Target::with_delay_secs(url.as_str(), max_steps, secs),
            None => Ok(Target::new(url.as_str(), max_steps, default_delay)),
        })
        .collect()
}

pub fn config_path(cli: &Cli) -> Result<PathBuf> {
    match cli.config {
        Some(ref path) => Ok(path.clone()),
        None => Ok(Config::default_config_path()?),
    }
}

pub fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        println!("Config already exists: {}", path.display());
        return Ok(());
    }

    Config::write_default_config(path)?;
    println!("Wrote default config: {}", path.display());
    Ok(())
}

/// One JSON object per target, tagged with its status.
pub fn render_json(outcome: &TargetOutcome) -> String {
    let value = match outcome.result {
        Ok(ref table) => json!({
            "url": outcome.target.url,
            "status": "ok",
            "table": table,
        }),
        Err(ref e) => json!({
            "url": outcome.target.url,
            "status": "failed",
            "kind": format!("{:?}", e.kind()),
            "error": e.to_string(),
        }),
    };
    value.to_string()
}

/// Tab separated rows preceded by a `#` line naming the target.
pub fn render_tsv(outcome: &TargetOutcome) -> String {
    let mut lines = vec![format!("# {}", outcome.target.url)];

    match outcome.result {
        Err(ref e) => lines.push(format!("# failed ({:?}): {}", e.kind(), e)),
        Ok(ReviewTable::Records(ref rows)) => {
            lines.push("review\trating\tsupport".to_string());
            for row in rows {
                lines.push(format!(
                    "{}\t{}\t{}",
                    tsv_field(&row.review),
                    row.rating,
                    tsv_field(&row.support)
                ));
            }
        }
        Ok(ReviewTable::Unreconciled(ref cols)) => {
            lines.push(format!(
                "# unreconciled: {} short, {} long reviews",
                cols.short.len(),
                cols.long.len()
            ));
            lines.push("short\tlong\trating\tsupport".to_string());
            let rows = cols
                .short
                .len()
                .max(cols.long.len())
                .max(cols.rating.len());
            for i in 0..rows {
                lines.push(format!(
                    "{}\t{}\t{}\t{}",
                    cols.short.get(i).map(|s| tsv_field(s)).unwrap_or_default(),
                    cols.long.get(i).map(|s| tsv_field(s)).unwrap_or_default(),
                    cols.rating.get(i).map(u32::to_string).unwrap_or_default(),
                    cols.support.get(i).map(|s| tsv_field(s)).unwrap_or_default(),
                ));
            }
        }
    }

    lines.join("\n")
}

fn tsv_field(value: &str) -> String {
    value
        .chars()
        .map(|c| if matches!(c, '\t' | '\n' | '\r') { ' ' } else { c })
        .collect()
}
