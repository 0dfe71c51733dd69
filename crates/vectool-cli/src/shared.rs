//! Composition root shared by all commands.
//!
//! Turns a loaded `VectoolConfig` into a connected store and a `Dispatcher`
//! over the full tool catalog.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::time::Instant;

use vectool_config::VectoolConfig;
use vectool_runtime::{
    build_registry, AssistCommand, CatalogOptions, CollectionPreset, Dispatcher, RuntimeConfig,
};
use vectool_store::{CallContext, VectorStore};
use vectool_store_memory::{MemoryStore, MemoryStoreOptions};

/// Deadline for connecting to / closing the backend.
const LIFECYCLE_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds and connects the configured backend.
///
/// # Errors
///
/// Returns an error if the default backend is unknown, disabled or of an
/// unsupported kind, or if connecting fails.
pub async fn connect_store(config: &VectoolConfig) -> anyhow::Result<Arc<dyn VectorStore>> {
    let backend = config.resolve_backend()?;
    let store = MemoryStore::with_options(MemoryStoreOptions {
        latency: backend.latency(),
        embedding_dimensions: backend.embeddings.simulated_dimensions(),
    });

    let ctx = CallContext::new("connect", 0, LIFECYCLE_TIMEOUT);
    store
        .connect(&ctx)
        .await
        .map_err(|e| anyhow::anyhow!("backend '{}' failed to connect: {e}", backend.name))?;
    tracing::info!(backend = %backend.name, kind = %backend.kind, "backend connected");
    Ok(Arc::new(store))
}

/// Closes the backend, logging rather than failing.
pub async fn close_store(store: &dyn VectorStore) {
    let ctx = CallContext::new("close", 0, LIFECYCLE_TIMEOUT);
    if let Err(e) = store.close(&ctx).await {
        tracing::warn!(error = %e, "backend close failed");
    }
}

/// Catalog options from the `presets` and `assist` sections.
pub fn catalog_options(config: &VectoolConfig) -> CatalogOptions {
    let presets = config
        .presets
        .iter()
        .map(|(name, p)| {
            (
                name.clone(),
                CollectionPreset {
                    kind: p.kind.clone(),
                    description: p.description.clone(),
                },
            )
        })
        .collect();
    CatalogOptions {
        presets,
        assist: AssistCommand {
            program: config.assist.command.clone(),
            args: config.assist.args.clone(),
        },
    }
}

/// Dispatcher limits from the `timeouts` section.
pub fn runtime_config(config: &VectoolConfig) -> RuntimeConfig {
    RuntimeConfig {
        default_timeout: config.timeouts.default_timeout(),
        per_tool_timeouts: config.timeouts.per_tool_timeouts(),
        max_concurrent: config.timeouts.max_concurrent,
    }
}

/// Builds the dispatcher over the full catalog.
///
/// # Errors
///
/// Returns an error if the catalog fails to register.
pub fn build_dispatcher(
    store: Arc<dyn VectorStore>,
    config: &VectoolConfig,
) -> anyhow::Result<Arc<Dispatcher>> {
    let registry = build_registry(store, &catalog_options(config))
        .map_err(|e| anyhow::anyhow!("tool registration failed: {e}"))?;
    tracing::debug!(tools = registry.len(), "tool catalog registered");
    Ok(Arc::new(Dispatcher::new(registry, &runtime_config(config))))
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "ctrl-c handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}

/// [`shutdown_signal`] that also reports when it fired.
pub fn recorded_shutdown_signal() -> (
    impl Future<Output = ()> + Send + 'static,
    oneshot::Receiver<Instant>,
) {
    let (tx, rx) = oneshot::channel();
    let signal = async move {
        shutdown_signal().await;
        let _ = tx.send(Instant::now());
    };
    (signal, rx)
}

/// What is left of `grace` since the signal fired; the full `grace` if it
/// never did (input closed instead).
pub fn remaining_grace(mut signalled: oneshot::Receiver<Instant>, grace: Duration) -> Duration {
    match signalled.try_recv() {
        Ok(at) => grace.saturating_sub(at.elapsed()),
        Err(_) => grace,
    }
}

/// Waits for in-flight calls, then logs the final counters.
pub async fn drain(dispatcher: &Dispatcher, grace: Duration) {
    if !dispatcher.shutdown(grace).await {
        tracing::warn!(
            in_flight = dispatcher.in_flight(),
            grace_secs = grace.as_secs(),
            "grace period elapsed with calls still running"
        );
    }
    let snapshot = dispatcher.metrics().snapshot();
    tracing::info!(
        total = snapshot.total_calls,
        succeeded = snapshot.successful_calls,
        failed = snapshot.failed_calls,
        timed_out = snapshot.timed_out_calls,
        panicked = snapshot.panicked_calls,
        "dispatcher stopped"
    );
}
