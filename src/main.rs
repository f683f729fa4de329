use anyhow::Context;
use clap::Parser;
use number_classifier::core::ConfigProvider;
use number_classifier::utils::{logger, validation::Validate};
use number_classifier::{CliConfig, Server, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let file_config = cli
        .config
        .as_ref()
        .map(TomlConfig::from_file)
        .transpose()
        .context("Failed to load configuration file")?;

    let (verbose, json_logs) = match &file_config {
        Some(file) => (cli.verbose || file.logging.verbose, cli.json_logs || file.logging.json),
        None => (cli.verbose, cli.json_logs),
    };

    if json_logs {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting number-classifier");

    match file_config {
        Some(file) => {
            tracing::info!(path = ?cli.config, "Using configuration file");
            serve(file).await
        }
        None => {
            tracing::debug!("CLI config: {:?}", cli);
            serve(cli).await
        }
    }
}

async fn serve<C: ConfigProvider + Validate>(config: C) -> anyhow::Result<()> {
    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{}", e.user_friendly_message());
        std::process::exit(1);
    }

    Server::bind(&config)
        .await
        .context("Failed to initialize server")?
        .run()
        .await
        .context("HTTP server failed")
}
