use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gleaner::cli::{commands, Cli, Commands, ConfigAction};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scrape {
            ref urls,
            steps,
            delay,
            format,
        } => {
            let config = commands::resolve_config(&cli)?;
            let summary = commands::scrape(&config, urls, steps, delay, format).await?;
            if summary.succeeded == 0 && summary.failed > 0 {
                anyhow::bail!("all {} listings failed", summary.failed);
            }
        }
        Commands::Config { ref action } => {
            let path = commands::config_path(&cli)?;
            match action {
                ConfigAction::Path => println!("{}", path.display()),
                ConfigAction::Init { force } => commands::init_config(&path, *force)?,
            }
        }
    }

    Ok(())
}
