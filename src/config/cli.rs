use crate::adapters::http::DEFAULT_ROUTE;
use crate::core::fact_fetcher::NUMBERS_API_BASE;
use crate::core::retry::RetryPolicy;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "number-classifier")]
#[command(about = "HTTP service that classifies integers and attaches a math fun fact")]
pub struct CliConfig {
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, default_value = "8000")]
    pub port: u16,

    #[arg(long, default_value = DEFAULT_ROUTE)]
    pub route: String,

    #[arg(long, default_value = NUMBERS_API_BASE)]
    pub numbers_api: String,

    #[arg(long, default_value = "3")]
    pub timeout_seconds: u64,

    #[arg(long, default_value = "3")]
    pub retry_attempts: u32,

    #[arg(long, default_value = "1000")]
    pub backoff_factor_ms: u64,

    #[arg(long, help = "Load settings from a TOML file instead of flags")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl ConfigProvider for CliConfig {
    fn host(&self) -> &str {
        &self.host
    }

    fn port(&self) -> u16 {
        self.port
    }

    fn route(&self) -> &str {
        &self.route
    }

    fn numbers_api_base(&self) -> &str {
        &self.numbers_api
    }

    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::default()
            .max_retries(self.retry_attempts)
            .timeout(Duration::from_secs(self.timeout_seconds))
            .backoff_factor(Duration::from_millis(self.backoff_factor_ms))
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("host", &self.host)?;
        validation::validate_route("route", &self.route)?;
        validation::validate_url("numbers_api", &self.numbers_api)?;
        validation::validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;
        validation::validate_range("retry_attempts", self.retry_attempts, 0, 10)?;
        validation::validate_range("backoff_factor_ms", self.backoff_factor_ms, 0, 60_000)?;

        tracing::debug!("CLI configuration validation passed");
        Ok(())
    }
}
