// src/main.rs

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use securecheck::core::config::ScanConfig;
use securecheck::core::models::{Finding, ScanProfile};
use securecheck::core::scanner::perform_scan;
use securecheck::core::summary::ScanSummary;
use securecheck::logging;

/// Probe a web origin for transport, header and TLS misconfigurations.
#[derive(Parser, Debug)]
#[command(name = "securecheck", version, about)]
struct Cli {
    /// URL or domain to scan. A missing scheme defaults to https.
    target: String,

    /// Which probes to run: basic, headers, ssl or full.
    #[arg(short, long, default_value = "basic")]
    profile: ScanProfile,

    /// JSON config file. Defaults to config.json in the platform config dir.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Serialize)]
struct Report<'a> {
    target: &'a str,
    profile: ScanProfile,
    findings: &'a [Finding],
    summary: ScanSummary,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let log_path = logging::initialize_logging()?;
    info!(log = %log_path.display(), "Logging initialized.");

    let config = match &cli.config {
        Some(path) => ScanConfig::from_file(path)?,
        None => ScanConfig::load()?,
    };

    let findings = perform_scan(&cli.target, cli.profile, &config)
        .await
        .wrap_err("scan failed")?;

    let report = Report {
        target: &cli.target,
        profile: cli.profile,
        findings: &findings,
        summary: ScanSummary::from_findings(&findings),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
