use anyhow::Context;
use std::process::ExitCode;
use tracing::{error, info};

use foody_suite::config::SuiteConfig;
use foody_suite::logging;
use foody_suite::scenario::{Scenario, SuiteReport};
use foody_suite::services::FoodyClient;

const EXIT_CASE_FAILED: u8 = 1;
const EXIT_SETUP_FAILED: u8 = 2;

async fn setup() -> anyhow::Result<FoodyClient> {
    let config = SuiteConfig::new().context(
        "Failed to load configuration. Please check your FOODY_* environment variables",
    )?;

    logging::init(&config.log);
    info!("Starting foody-check v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Config loaded: base_url={}, timeout={}s",
        config.api.base_url, config.api.timeout_secs
    );

    FoodyClient::connect(&config)
        .await
        .context("Failed to set up authenticated client")
}

/// `None` means setup (config or authentication) never produced a report.
fn exit_code(report: Option<&SuiteReport>) -> u8 {
    match report {
        None => EXIT_SETUP_FAILED,
        Some(report) if report.is_success() => 0,
        Some(_) => EXIT_CASE_FAILED,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let client = match setup().await {
        Ok(ready) => ready,
        Err(e) => {
            error!("{e:#}");
            eprintln!("foody-check: {e:#}");
            return ExitCode::from(exit_code(None));
        }
    };

    let report: SuiteReport = Scenario::new(&client).run().await;
    drop(client);

    println!("{report}");

    ExitCode::from(exit_code(Some(&report)))
}
