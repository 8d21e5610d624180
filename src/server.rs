//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, cache setup, worker spawning, and Axum server lifecycle.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use tokio::sync::mpsc;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;

use crate::config::Config;
use crate::domain::publisher::EventPublisher;
use crate::domain::visit_worker::run_visit_worker;
use crate::infrastructure::cache::{CacheService, MemoryCache, RedisCache};
use crate::infrastructure::events::{NullPublisher, RedisStreamPublisher};
use crate::infrastructure::persistence::PgUrlRepository;
use crate::routes::app_router;
use crate::state::AppState;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Redis cache (or in-memory fallback)
/// - Redis Streams visit publisher (when configured)
/// - Background visit worker
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let cache: Arc<dyn CacheService> = match &config.redis_url {
        Some(redis_url) => {
            match RedisCache::connect(
                redis_url,
                config.cache_ttl_seconds,
                config.cache_op_timeout_ms,
            )
            .await
            {
                Ok(redis) => {
                    tracing::info!("Cache enabled (Redis)");
                    Arc::new(redis)
                }
                Err(e) => {
                    tracing::warn!("Failed to connect to Redis: {}. Using in-memory cache.", e);
                    Arc::new(MemoryCache::new())
                }
            }
        }
        None => {
            tracing::info!("Cache enabled (in-memory)");
            Arc::new(MemoryCache::new())
        }
    };

    let publisher: Arc<dyn EventPublisher> = match (&config.redis_url, &config.event_stream) {
        (Some(redis_url), Some(stream)) => {
            match RedisStreamPublisher::connect(redis_url, stream).await {
                Ok(publisher) => {
                    tracing::info!(stream = %stream, "Visit publishing enabled");
                    Arc::new(publisher)
                }
                Err(e) => {
                    tracing::warn!("Failed to connect publisher: {}. Publishing disabled.", e);
                    Arc::new(NullPublisher::new())
                }
            }
        }
        _ => Arc::new(NullPublisher::new()),
    };

    let repository = Arc::new(PgUrlRepository::new(Arc::new(pool)));

    let (visit_tx, visit_rx) = mpsc::channel(config.visit_queue_capacity);
    let worker = tokio::spawn(run_visit_worker(visit_rx, repository.clone(), publisher));
    tracing::info!("Visit worker started");

    let state = AppState::new(
        repository,
        cache,
        visit_tx.clone(),
        config.base_url.clone(),
        config.behind_proxy,
    );

    // Path normalization must wrap the whole router so `/abc/` is rewritten
    // before route matching.
    let app = NormalizePathLayer::trim_trailing_slash().layer(app_router(state));

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    // All sender clones are gone once the server and our handle drop, which
    // closes the channel and lets the worker drain buffered events.
    drop(visit_tx);
    worker.await?;
    tracing::info!("Visit worker drained");

    Ok(())
}

/// Resolves when SIGINT (Ctrl+C) or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
