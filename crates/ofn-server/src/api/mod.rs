//! HTTP API assembly and serving

pub mod response;

use axum::{routing::get, Router};
use ofn_ingest::{DedupeStore, Janitor, Normalizer};
use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tower_http::compression::CompressionLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::features::{self, FeatureState};
use crate::middleware;

/// Build the application router with all routes and middleware
pub fn create_router(state: FeatureState, config: &Config) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(features::router(state))
        // Apply layers from innermost to outermost
        .layer(CompressionLayer::new())
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(&config.cors))
}

/// Health check handler
async fn health_check() -> &'static str {
    "ok"
}

/// Run the server until Ctrl+C or SIGTERM.
///
/// The dedupe store and its janitor live exactly as long as the server; the
/// janitor is stopped once the listener has drained.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let store_config = config.dedupe.store_config();
    let store = Arc::new(DedupeStore::new(store_config.retention));
    let janitor = Janitor::start(Arc::clone(&store), store_config.sweep_interval);

    let normalizer = Normalizer::default();
    info!(schemas = ?normalizer.schema_ids(), "Normalizer ready");

    let state = FeatureState::new(normalizer, store);
    let app = create_router(state, &config);

    let addr: SocketAddr = config.bind_address().parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!("Offer normalizer listening on {}", addr);

    run_until_shutdown(
        listener,
        app,
        shutdown_signal(),
        Duration::from_secs(config.server.shutdown_timeout_secs),
    )
    .await?;

    janitor.shutdown().await;
    info!("Server shut down gracefully");

    Ok(())
}

/// Serve `app` until `signal` resolves, then drain for at most `drain_timeout`.
///
/// The listener stops accepting as soon as the signal fires. Connections
/// still open when the timeout elapses are dropped.
pub async fn run_until_shutdown<F>(
    listener: TcpListener,
    app: Router,
    signal: F,
    drain_timeout: Duration,
) -> anyhow::Result<()>
where
    F: Future<Output = ()>,
{
    let stop = CancellationToken::new();
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(stop.clone().cancelled_owned())
        .into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => return Ok(result?),
        _ = signal => stop.cancel(),
    }

    info!("Waiting up to {} seconds for connections to close", drain_timeout.as_secs());
    match tokio::time::timeout(drain_timeout, &mut server).await {
        Ok(result) => result?,
        Err(_) => warn!(
            "Connections still open after {} seconds, shutting down anyway",
            drain_timeout.as_secs()
        ),
    }

    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::time::Instant;
    use tokio::io::AsyncWriteExt;
    use tokio::net::TcpStream;
    use tokio::sync::oneshot;

    async fn local_listener() -> (TcpListener, SocketAddr) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        (listener, addr)
    }

    #[tokio::test]
    async fn test_signal_stops_accepting_immediately() {
        let (listener, addr) = local_listener().await;
        let app = Router::new().route("/health", get(health_check));

        let started = Instant::now();
        run_until_shutdown(listener, app, async {}, Duration::from_secs(30))
            .await
            .unwrap();

        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(TcpStream::connect(addr).await.is_err());
    }

    #[tokio::test]
    async fn test_drain_is_bounded_by_timeout() {
        let (listener, addr) = local_listener().await;
        let app = Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                "done"
            }),
        );
        let (fire, fired) = oneshot::channel::<()>();

        let server = tokio::spawn(run_until_shutdown(
            listener,
            app,
            async {
                let _ = fired.await;
            },
            Duration::from_millis(200),
        ));

        let mut client = TcpStream::connect(addr).await.unwrap();
        client
            .write_all(b"GET /slow HTTP/1.1\r\nHost: localhost\r\n\r\n")
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
        fire.send(()).unwrap();

        let result = tokio::time::timeout(Duration::from_secs(10), server)
            .await
            .expect("drain was not bounded")
            .unwrap();
        assert!(result.is_ok());
    }
}
