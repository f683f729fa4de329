use serde::Serialize;
use thiserror::Error;

/// Raw query input for one classification request.
#[derive(Debug, Clone, Default)]
pub struct ClassificationRequest {
    pub number: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ValidatedNumber(i64);

impl ValidatedNumber {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ValidatedNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("number parameter is required")]
    MissingParameter,

    #[error("'{raw}' is not a valid integer")]
    NotANumber { raw: String, is_alphabetic: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Property {
    Even,
    Odd,
    Armstrong,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    pub number: i64,
    pub is_prime: bool,
    pub is_perfect: bool,
    pub properties: Vec<Property>,
    pub digit_sum: u64,
    pub fun_fact: String,
}

/// Result of asking the trivia service for a fact. A non-success status and
/// a transport failure both end up as `Unavailable`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FactOutcome {
    Fact(String),
    Unavailable,
}

impl FactOutcome {
    pub fn into_fact(self) -> Option<String> {
        match self {
            FactOutcome::Fact(text) => Some(text),
            FactOutcome::Unavailable => None,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("fun fact unavailable from Numbers API")]
    FactUnavailable,
}
