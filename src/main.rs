use chrono::Utc;
use price_sniper::batch::Batch;
use price_sniper::config::{AppConfig, load_config};
use std::env;
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Config path from the first argument, config.json by default
    let config_path = env::args().nth(1).unwrap_or_else(|| "config.json".to_string());
    let config: AppConfig = match load_config(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error ({}): {}", config_path, e);
            return ExitCode::FAILURE;
        }
    };

    info!("Validating catalog {}...", config.catalog_path);
    let batch = match Batch::prepare(&config) {
        Ok(b) => b,
        Err(e) => {
            error!("Cannot start batch: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if config.inputs.is_empty() {
        error!("No input files configured");
        return ExitCode::FAILURE;
    }

    let started = Utc::now();
    info!("Processing {} file(s)...", config.inputs.len());
    let summary = batch.run(&config.inputs).await;

    let elapsed = Utc::now() - started;
    info!(
        "Finished in {} ms: {} succeeded, {} failed",
        elapsed.num_milliseconds(),
        summary.succeeded(),
        summary.failed()
    );
    for report in &summary.reports {
        info!(
            "  {} -> {} ({} of {} rows priced at {})",
            report.input.display(),
            report.output.display(),
            report.summary.matched,
            report.summary.rows,
            report.processed_at.to_rfc3339()
        );
    }
    for (input, e) in &summary.failures {
        error!("  {}: {}", input, e);
    }

    if summary.failed() > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
