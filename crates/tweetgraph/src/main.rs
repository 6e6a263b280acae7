//! Main entry point for tweetgraph.

use std::process::ExitCode;
use tracing::{error, info};
use tweetgraph::run;
use tweetgraph_common::{init_logging, LoggingConfig};
use tweetgraph_config::ConfigLoader;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match ConfigLoader::discover().load() {
        Ok(config) => config,
        Err(e) => {
            // Logging settings live in the config, so fall back to defaults.
            if init_logging(LoggingConfig::default()).is_err() {
                eprintln!("{e}");
            }
            error!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(config.logging_config()) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    info!("Starting tweetgraph {}", env!("CARGO_PKG_VERSION"));

    match run(&config).await {
        Ok(summary) => {
            info!("Wrote {} charts", summary.succeeded.len());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
