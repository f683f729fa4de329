pub mod classifier;
pub mod engine;
pub mod fact_fetcher;
pub mod retry;
pub mod validator;

pub use crate::domain::model::{ClassificationResult, ClassifyError, FactOutcome, ValidatedNumber};
pub use crate::domain::ports::{ConfigProvider, FactSource, FactTransport};
pub use crate::utils::error::Result;
