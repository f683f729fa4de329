use crate::core::retry::RetryPolicy;
use crate::domain::model::{FactOutcome, ValidatedNumber};
use crate::domain::ports::{FactSource, FactTransport, TransportError, TransportResponse};
use crate::utils::error::Result;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::Client;
use std::time::Duration;

pub const NUMBERS_API_BASE: &str = "http://numbersapi.com";

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            TransportError::Timeout
        } else if error.is_connect() {
            TransportError::Connect(error.to_string())
        } else {
            TransportError::Other(error.to_string())
        }
    }
}

/// `FactTransport` over a shared `reqwest::Client`.
///
/// Cloning is cheap and every clone uses the same connection pool, so build
/// one per process and hand it out.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("number-classifier/", env!("CARGO_PKG_VERSION")))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;
        Ok(Self { client })
    }
}

fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

impl FactTransport for ReqwestTransport {
    async fn get(
        &self,
        url: &str,
        timeout: Duration,
    ) -> std::result::Result<TransportResponse, TransportError> {
        let response = self.client.get(url).timeout(timeout).send().await?;

        let status = response.status().as_u16();
        let retry_after = parse_retry_after(response.headers());
        let body = response.text().await?;

        Ok(TransportResponse {
            status,
            retry_after,
            body,
        })
    }
}

/// Fetches math facts from the Numbers API, retrying transient failures
/// according to its [`RetryPolicy`].
#[derive(Debug, Clone)]
pub struct FactFetcher<T: FactTransport = ReqwestTransport> {
    transport: T,
    base_url: String,
    policy: RetryPolicy,
}

impl<T: FactTransport> FactFetcher<T> {
    pub fn new(transport: T, base_url: impl Into<String>, policy: RetryPolicy) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            policy,
        }
    }

    pub fn fact_url(&self, number: ValidatedNumber) -> String {
        format!("{}/{}/math", self.base_url.trim_end_matches('/'), number)
    }

    pub async fn fetch_fact(&self, number: ValidatedNumber) -> FactOutcome {
        let url = self.fact_url(number);
        let attempts = self.policy.max_attempts();

        for attempt in 0..attempts {
            let is_last = attempt + 1 == attempts;
            tracing::debug!(%url, attempt = attempt + 1, attempts, "Requesting fun fact");

            let (status, retry_after) = match self.transport.get(&url, self.policy.timeout).await {
                Ok(response) if response.status == 200 => {
                    return FactOutcome::Fact(response.body);
                }
                Ok(response) if !is_last && self.policy.is_retryable_status(response.status) => {
                    tracing::warn!(
                        status = response.status,
                        attempt = attempt + 1,
                        "Numbers API returned a retryable status"
                    );
                    (Some(response.status), response.retry_after)
                }
                Ok(response) => {
                    tracing::warn!(status = response.status, %url, "Numbers API request failed");
                    return FactOutcome::Unavailable;
                }
                Err(error) if !is_last && self.policy.retry_on_transport_error => {
                    tracing::warn!(%error, attempt = attempt + 1, "Numbers API transport error");
                    (None, None)
                }
                Err(error) => {
                    tracing::warn!(%error, %url, "Numbers API unreachable");
                    return FactOutcome::Unavailable;
                }
            };

            let delay = self.policy.delay_for(attempt, status, retry_after);
            if !delay.is_zero() {
                tracing::debug!(?delay, "Backing off before retry");
                tokio::time::sleep(delay).await;
            }
        }

        FactOutcome::Unavailable
    }
}

#[async_trait::async_trait]
impl<T: FactTransport> FactSource for FactFetcher<T> {
    async fn fetch(&self, number: ValidatedNumber) -> FactOutcome {
        self.fetch_fact(number).await
    }
}
