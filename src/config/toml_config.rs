use crate::adapters::http::DEFAULT_ROUTE;
use crate::core::fact_fetcher::NUMBERS_API_BASE;
use crate::core::retry::{RetryPolicy, DEFAULT_RETRY_STATUSES};
use crate::core::ConfigProvider;
use crate::utils::error::{Result, ServiceError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// File-based configuration. Every table and key is optional.
///
/// ```toml
/// [server]
/// host = "0.0.0.0"
/// port = 8000
/// route = "/api/classify-number"
///
/// [numbers_api]
/// base_url = "${NUMBERS_API_URL}"
/// timeout_seconds = 3
///
/// [retry]
/// attempts = 3
/// backoff_factor_ms = 1000
/// statuses = [500, 502, 503, 504]
///
/// [logging]
/// json = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub server: ServerConfig,
    pub numbers_api: NumbersApiConfig,
    pub retry: RetrySettings,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub route: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            route: DEFAULT_ROUTE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumbersApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for NumbersApiConfig {
    fn default() -> Self {
        Self {
            base_url: NUMBERS_API_BASE.to_string(),
            timeout_seconds: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    pub attempts: u32,
    pub backoff_factor_ms: u64,
    pub backoff_max_seconds: u64,
    pub statuses: Vec<u16>,
    pub retry_transport_errors: bool,
    pub respect_retry_after: bool,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            attempts: 3,
            backoff_factor_ms: 1000,
            backoff_max_seconds: 120,
            statuses: DEFAULT_RETRY_STATUSES.to_vec(),
            retry_transport_errors: true,
            respect_retry_after: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub verbose: bool,
    pub json: bool,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ServiceError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ServiceError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ServiceError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }
}

impl ConfigProvider for TomlConfig {
    fn host(&self) -> &str {
        &self.server.host
    }

    fn port(&self) -> u16 {
        self.server.port
    }

    fn route(&self) -> &str {
        &self.server.route
    }

    fn numbers_api_base(&self) -> &str {
        &self.numbers_api.base_url
    }

    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::default()
            .max_retries(self.retry.attempts)
            .timeout(Duration::from_secs(self.numbers_api.timeout_seconds))
            .backoff_factor(Duration::from_millis(self.retry.backoff_factor_ms))
            .backoff_max(Duration::from_secs(self.retry.backoff_max_seconds))
            .retry_statuses(self.retry.statuses.clone())
            .retry_on_transport_error(self.retry.retry_transport_errors)
            .respect_retry_after(self.retry.respect_retry_after)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("server.host", &self.server.host)?;
        validation::validate_route("server.route", &self.server.route)?;
        validation::validate_url("numbers_api.base_url", &self.numbers_api.base_url)?;
        validation::validate_positive_number(
            "numbers_api.timeout_seconds",
            self.numbers_api.timeout_seconds,
            1,
        )?;
        validation::validate_range("retry.attempts", self.retry.attempts, 0, 10)?;
        validation::validate_range(
            "retry.backoff_factor_ms",
            self.retry.backoff_factor_ms,
            0,
            60_000,
        )?;

        for status in &self.retry.statuses {
            validation::validate_range("retry.statuses", *status, 500, 599)?;
        }

        tracing::debug!("TOML configuration validation passed");
        Ok(())
    }
}
