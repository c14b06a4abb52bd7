//! # sf-console
//!
//! Terminal driver for the storefront console sync engine.
//!
//! ```bash
//! sf-console login --username admin
//! sf-console list products --page 2
//! sf-console submit suppliers ./supplier.json
//! ```
//!
//! Log verbosity is read from `SF_LOG` (default `info`).

use anyhow::{Context, Result};
use clap::Parser;
use console_runtime::cli::{self, Cli};
use console_runtime::{ConsoleConfig, ConsoleContainer};
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn load_config(cli: &Cli) -> Result<ConsoleConfig> {
    let config = match &cli.config {
        Some(path) => ConsoleConfig::load(path)?,
        None => {
            let mut config = ConsoleConfig::default();
            config.apply_env();
            config
        }
    };
    debug!(?config, "Effective configuration");
    Ok(config)
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_env("SF_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build the async runtime")?;

    runtime.block_on(async {
        let container =
            ConsoleContainer::from_config(&config).context("failed to initialize components")?;
        let engine = container.start()?;

        let result = cli::execute(cli.command, &engine, &config).await;
        engine.shutdown().await;

        let view = result?;
        println!("{}", serde_json::to_string_pretty(&view)?);
        Ok(())
    })
}
