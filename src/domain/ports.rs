use crate::core::retry::RetryPolicy;
use crate::domain::model::{FactOutcome, ValidatedNumber};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// What the fetcher needs from a single HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub retry_after: Option<Duration>,
    pub body: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("transport error: {0}")]
    Other(String),
}

/// One outbound GET with a per-attempt timeout. Retrying is the caller's job.
pub trait FactTransport: Send + Sync {
    fn get(
        &self,
        url: &str,
        timeout: Duration,
    ) -> impl std::future::Future<Output = Result<TransportResponse, TransportError>> + Send;
}

#[async_trait]
pub trait FactSource: Send + Sync {
    async fn fetch(&self, number: ValidatedNumber) -> FactOutcome;
}

pub trait ConfigProvider: Send + Sync {
    fn host(&self) -> &str;
    fn port(&self) -> u16;
    fn route(&self) -> &str;
    fn numbers_api_base(&self) -> &str;
    fn retry_policy(&self) -> RetryPolicy;
}
