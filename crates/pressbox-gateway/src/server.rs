use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use pressbox_llm::LlmProvider;
use tokio::sync::watch;

use crate::error::GatewayError;
use crate::pipeline::Pipeline;
use crate::router::build_router;
use crate::session::{SessionStore, new_store};

pub(crate) struct AppState<P> {
    pub provider: Arc<P>,
    pub sessions: SessionStore,
    pub pipeline: Arc<Pipeline>,
    pub started_at: Instant,
}

impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            sessions: Arc::clone(&self.sessions),
            pipeline: Arc::clone(&self.pipeline),
            started_at: self.started_at,
        }
    }
}

impl<P> AppState<P> {
    pub(crate) fn new(provider: P, pipeline: Pipeline) -> Self {
        Self {
            provider: Arc::new(provider),
            sessions: new_store(),
            pipeline: Arc::new(pipeline),
            started_at: Instant::now(),
        }
    }
}

pub struct GatewayServer<P> {
    addr: SocketAddr,
    max_body_size: usize,
    provider: P,
    pipeline: Pipeline,
    shutdown_rx: watch::Receiver<bool>,
}

impl<P: LlmProvider + 'static> GatewayServer<P> {
    #[must_use]
    pub fn new(
        bind: &str,
        port: u16,
        provider: P,
        pipeline: Pipeline,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        let addr: SocketAddr = format!("{bind}:{port}").parse().unwrap_or_else(|e| {
            tracing::warn!("invalid bind '{bind}': {e}, falling back to 127.0.0.1:{port}");
            SocketAddr::from(([127, 0, 0, 1], port))
        });

        Self {
            addr,
            max_body_size: 16 * 1024 * 1024,
            provider,
            pipeline,
            shutdown_rx,
        }
    }

    #[must_use]
    pub fn with_max_body_size(mut self, size: usize) -> Self {
        self.max_body_size = size;
        self
    }

    /// Start the HTTP server.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind or encounters a fatal
    /// I/O error.
    pub async fn serve(self) -> Result<(), GatewayError> {
        let state = AppState::new(self.provider, self.pipeline);
        let router = build_router(state, self.max_body_size);

        let listener = tokio::net::TcpListener::bind(self.addr)
            .await
            .map_err(|e| GatewayError::Bind(self.addr.to_string(), e))?;
        tracing::info!("listening on {}", self.addr);

        let mut shutdown_rx = self.shutdown_rx;
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                while !*shutdown_rx.borrow_and_update() {
                    if shutdown_rx.changed().await.is_err() {
                        std::future::pending::<()>().await;
                    }
                }
                tracing::info!("shutting down");
            })
            .await
            .map_err(|e| GatewayError::Server(format!("{e}")))?;

        Ok(())
    }
}
