//! # Gleaner
//!
//! Collects user reviews, ratings and helpfulness counts from app listings
//! that load their reviews through infinite scrolling.
//!
//! ## Architecture
//!
//! Each target runs through one browser session:
//!
//! ```text
//! navigate → scroll loop → expand reviews → snapshot → extract → ReviewTable
//! ```
//!
//! - [`driver`]: browser page primitives over chromiumoxide
//! - [`scroll`]: load-more/scroll loop with stall detection
//! - [`unwrap`]: best-effort expansion of truncated reviews
//! - [`extract`]: snapshot parsing and short/long review reconciliation
//! - [`session`]: per-target session and the orchestrator driving it
//! - [`batch`]: bounded worker pool over many targets
//!
//! ## Quick Start
//!
//! ```bash
//! # Scrape two listings, 20 steps each, 0.8s between steps
//! gleaner scrape --steps 20 --delay 0.8 \
//!     "https://play.google.com/store/apps/details?id=com.whatsapp&showAllReviews=true" \
//!     "https://play.google.com/store/apps/details?id=com.facebook.katana&showAllReviews=true"
//!
//! # Czech listing, visible browser, tab separated output
//! gleaner --locale cs --headed scrape --format tsv <URL>
//! ```

/// Error type and result alias.
pub mod app;

/// Batch fan-out over a bounded pool of browser sessions.
///
/// - [`BatchRunner`](batch::BatchRunner): order-preserving worker pool
/// - [`TargetOutcome`](batch::TargetOutcome): per-target result
pub mod batch;

/// Command-line interface using clap.
///
/// - `scrape <url>...` - Scrape listings and print their tables
/// - `config path` - Show the config file location
/// - `config init` - Write the default config file
pub mod cli;

/// Configuration loaded from `~/.config/gleaner/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`Locale`](domain::Locale): supported session languages
/// - [`Target`](domain::Target): one listing plus scroll tuning
/// - [`ReviewTable`](domain::ReviewTable): merged records or unreconciled columns
pub mod domain;

/// Browser page adapter.
///
/// - [`PageDriver`](driver::PageDriver): async trait over one page
/// - [`ChromeDriver`](driver::ChromeDriver): chromiumoxide implementation
pub mod driver;

/// Snapshot parsing and review reconciliation.
pub mod extract;

/// Incremental scrolling with stall detection.
pub mod scroll;

/// Session entity and run orchestration.
pub mod session;

/// Expansion of truncated review text.
pub mod unwrap;
