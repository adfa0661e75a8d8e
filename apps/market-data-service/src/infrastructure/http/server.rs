//! HTTP server lifecycle.

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

/// Market data HTTP server.
pub struct HttpServer {
    addr: SocketAddr,
    router: Router,
    cancel: CancellationToken,
}

impl HttpServer {
    /// Create a new server for an already-built router.
    #[must_use]
    pub const fn new(addr: SocketAddr, router: Router, cancel: CancellationToken) -> Self {
        Self {
            addr,
            router,
            cancel,
        }
    }

    /// Run the server until cancelled.
    ///
    /// In-flight requests are allowed to finish after cancellation.
    ///
    /// # Errors
    ///
    /// Returns `HttpServerError` if binding fails or the HTTP server
    /// encounters a fatal error while running.
    pub async fn run(self) -> Result<(), HttpServerError> {
        let listener = TcpListener::bind(self.addr)
            .await
            .map_err(|e| HttpServerError::BindFailed(self.addr, e.to_string()))?;

        tracing::info!(addr = %self.addr, "HTTP server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(self.cancel.cancelled_owned())
            .await
            .map_err(|e| HttpServerError::ServerFailed(e.to_string()))?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// HTTP server errors.
#[derive(Debug, thiserror::Error)]
pub enum HttpServerError {
    /// Failed to bind to the address.
    #[error("failed to bind to {0}: {1}")]
    BindFailed(SocketAddr, String),

    /// Server encountered a fatal error.
    #[error("server failed: {0}")]
    ServerFailed(String),
}
