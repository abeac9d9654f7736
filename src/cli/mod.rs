pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "gleaner")]
#[command(about = "Collect reviews from infinite-scroll app listings", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/gleaner/config.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of concurrent browser sessions
    #[arg(short, long, global = true)]
    pub workers: Option<usize>,

    /// Session locale: en or cs
    #[arg(short, long, global = true)]
    pub locale: Option<String>,

    /// Show the browser window
    #[arg(long, global = true)]
    pub headed: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scroll each listing, expand reviews and print the extracted table
    Scrape {
        /// Review listing URLs
        #[arg(required = true)]
        urls: Vec<String>,

        /// Scroll/load-more steps per listing
        #[arg(short, long)]
        steps: Option<usize>,

        /// Seconds to wait after each step
        #[arg(short, long)]
        delay: Option<f64>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the config file location
    Path,
    /// Write the commented default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One JSON object per listing
    Json,
    /// Tab separated rows
    Tsv,
}
