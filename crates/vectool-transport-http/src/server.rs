//! HTTP server that binds the axum router to a TCP socket.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::cors::CorsLayer;

use vectool_runtime::Dispatcher;

use crate::error::HttpTransportError;
use crate::router::{build_router, AppState};

/// Axum-based HTTP server for the tool catalog.
pub struct HttpServer {
    pub(crate) addr: SocketAddr,
    pub(crate) state: AppState,
    pub(crate) cors: Option<CorsLayer>,
}

impl HttpServer {
    /// Creates a new HTTP server listening on `addr`.
    pub fn new(dispatcher: Arc<Dispatcher>, addr: SocketAddr, cors: Option<CorsLayer>) -> Self {
        Self {
            addr,
            state: AppState { dispatcher },
            cors,
        }
    }

    /// Serves until `shutdown` resolves, then stops accepting and gives
    /// in-flight requests up to `grace` to finish before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if the TCP bind fails or the server crashes.
    pub async fn run(
        self,
        shutdown: impl Future<Output = ()> + Send + 'static,
        grace: Duration,
    ) -> Result<(), HttpTransportError> {
        let listener = TcpListener::bind(self.addr)
            .await
            .map_err(|e| HttpTransportError::Bind {
                addr: self.addr.to_string(),
                source: e,
            })?;
        self.serve(listener, shutdown, grace).await
    }

    /// Serves on an already-bound listener.
    pub async fn serve(
        self,
        listener: TcpListener,
        shutdown: impl Future<Output = ()> + Send + 'static,
        grace: Duration,
    ) -> Result<(), HttpTransportError> {
        let local = listener.local_addr().unwrap_or(self.addr);
        tracing::info!(addr = %local, "vectool HTTP server ready");

        let (signalled_tx, signalled_rx) = watch::channel(false);
        let mut graceful_rx = signalled_rx.clone();
        let router = build_router(self.state, self.cors);
        let server = axum::serve(listener, router).with_graceful_shutdown(async move {
            let _ = graceful_rx.wait_for(|fired| *fired).await;
        });

        let deadline = async move {
            shutdown.await;
            tracing::info!(grace_ms = grace.as_millis() as u64, "shutdown requested, draining");
            let _ = signalled_tx.send(true);
            tokio::time::sleep(grace).await;
        };

        tokio::select! {
            result = server => {
                result.map_err(|e| HttpTransportError::Serve(e.to_string()))?;
                tracing::info!("HTTP server stopped");
            }
            () = deadline => {
                tracing::warn!("grace period elapsed, abandoning in-flight requests");
            }
        }
        Ok(())
    }
}
