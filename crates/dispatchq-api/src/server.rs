//! HTTP server implementation.
//!
//! Binds the delivery routes to a TCP listener and serves them until the
//! supplied shutdown future resolves.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use dispatchq_queue::PriorityQueueStore;
use tokio::net::TcpListener;
use tracing::info;

use crate::http::routes::create_router;
use crate::state::AppState;

/// Server bind configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

impl ApiConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// The delivery queue HTTP server.
pub struct ApiServer {
    config: ApiConfig,
    state: Arc<AppState>,
}

impl ApiServer {
    /// Create a server around an existing store.
    pub fn new(config: ApiConfig, store: Arc<PriorityQueueStore>) -> Self {
        Self {
            config,
            state: Arc::new(AppState::new(store)),
        }
    }

    /// Get the server address.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Shared state handed to every handler.
    pub fn state(&self) -> Arc<AppState> {
        self.state.clone()
    }

    pub fn router(&self) -> Router {
        create_router(self.state.clone())
    }

    /// Bind the configured address.
    pub async fn bind(&self) -> Result<TcpListener, Box<dyn std::error::Error>> {
        let addr: SocketAddr = self.addr().parse()?;
        Ok(TcpListener::bind(addr).await?)
    }

    /// Serve on an already bound listener until `shutdown` completes.
    pub async fn serve<F>(
        &self,
        listener: TcpListener,
        shutdown: F,
    ) -> Result<(), Box<dyn std::error::Error>>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local = listener.local_addr()?;
        info!("dispatchq listening on {}", local);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("dispatchq server stopped");
        Ok(())
    }

    /// Bind and serve.
    pub async fn run<F>(&self, shutdown: F) -> Result<(), Box<dyn std::error::Error>>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = self.bind().await?;
        self.serve(listener, shutdown).await
    }
}
