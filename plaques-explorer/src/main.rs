//! plaques-explorer - command-line explorer for London plaque datasets
//!
//! Prints one JSON report per invocation on stdout. Logs go to stderr so the
//! output stays machine-readable.

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use plaques_common::config::TomlConfig;
use plaques_explorer::cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    // Config is read before tracing so its [logging] level can apply;
    // a broken file is reported once the subscriber is up
    let (config, config_error) = TomlConfig::load_or_default();

    let level = &config.logging.level;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "plaques_explorer={0},plaques_core={0},plaques_common={0}",
                    level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!(
        "Starting plaques-explorer v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    if let Some(e) = config_error {
        warn!("{}; using default configuration", e);
    }

    let report = plaques_explorer::run(&args, &config)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
