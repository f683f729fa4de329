use crate::core::{classifier, validator};
use crate::domain::model::{ClassificationResult, ClassifyError};
use crate::domain::ports::FactSource;

/// Runs one classification request: validate, fetch the fun fact, classify.
///
/// A missing fact aborts the request even though the classification itself
/// could still be computed.
pub struct ClassifierEngine<F: FactSource> {
    facts: F,
}

impl<F: FactSource> ClassifierEngine<F> {
    pub fn new(facts: F) -> Self {
        Self { facts }
    }

    pub fn facts(&self) -> &F {
        &self.facts
    }

    pub async fn classify(&self, raw: Option<&str>) -> Result<ClassificationResult, ClassifyError> {
        let number = validator::validate(raw).inspect_err(|e| {
            tracing::debug!(error = %e, "Rejected classification input");
        })?;

        let fun_fact = self
            .facts
            .fetch(number)
            .await
            .into_fact()
            .ok_or(ClassifyError::FactUnavailable)?;

        // Trial division is CPU bound: a prime near 2^62 holds a blocking-pool
        // thread for several seconds, and the task keeps running if the
        // client disconnects.
        let task = tokio::task::spawn_blocking(move || classifier::classify(number, fun_fact));
        let result = match task.await {
            Ok(result) => result,
            Err(join_error) => std::panic::resume_unwind(join_error.into_panic()),
        };

        tracing::debug!(
            number = result.number,
            is_prime = result.is_prime,
            is_perfect = result.is_perfect,
            "Classified number"
        );
        Ok(result)
    }
}
