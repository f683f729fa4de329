pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::TomlConfig;

pub use crate::adapters::{http::router, server::Server};
pub use crate::core::{
    engine::ClassifierEngine,
    fact_fetcher::{FactFetcher, ReqwestTransport},
    retry::RetryPolicy,
};
pub use crate::utils::error::{Result, ServiceError};
