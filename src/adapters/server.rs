use crate::adapters::http;
use crate::core::engine::ClassifierEngine;
use crate::core::fact_fetcher::{FactFetcher, ReqwestTransport};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use axum::Router;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

/// A bound listener plus the fully wired router, ready to serve.
#[must_use = "call .run().await to start the server"]
#[derive(Debug)]
pub struct Server {
    listener: TcpListener,
    router: Router,
}

impl Server {
    /// Builds the shared HTTP client, the fact fetcher and the engine, then
    /// binds the configured address.
    ///
    /// # Errors
    /// Fails if the HTTP client cannot be constructed or the address cannot
    /// be bound.
    pub async fn bind<C: ConfigProvider>(config: &C) -> Result<Self> {
        let transport = ReqwestTransport::new()?;
        let fetcher = FactFetcher::new(transport, config.numbers_api_base(), config.retry_policy());
        let engine = Arc::new(ClassifierEngine::new(fetcher));

        let listener = TcpListener::bind((config.host(), config.port())).await?;
        tracing::info!(
            address = %listener.local_addr()?,
            route = config.route(),
            numbers_api = config.numbers_api_base(),
            "Initialized server"
        );

        Ok(Self {
            listener,
            router: http::router(engine, config.route()),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serves until Ctrl+C or SIGTERM.
    pub async fn run(self) -> Result<()> {
        self.run_until(shutdown_signal()).await
    }

    pub async fn run_until<S>(self, shutdown: S) -> Result<()>
    where
        S: Future<Output = ()> + Send + 'static,
    {
        tracing::info!(address = %self.listener.local_addr()?, "Starting HTTP server");

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Ctrl+C received, shutting down"),
        _ = terminate => tracing::info!("SIGTERM received, shutting down"),
    }
}
