//! HTTP server initialization and runtime setup.
//!
//! Wires the durable store, the cache tier and the code generator into the
//! engine, then serves the router until Ctrl-C / SIGTERM.

use crate::application::generators::build_generator;
use crate::application::services::LinkService;
use crate::config::{Config, mask_connection_string};
use crate::domain::repositories::UrlRepository;
use crate::infrastructure::cache::{CacheService, InMemoryCache, RedisCache};
use crate::infrastructure::persistence::PgUrlRepository;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{info, warn};

/// Connection attempts made at startup for each backend.
const STARTUP_CONNECT_ATTEMPTS: usize = 5;

fn startup_backoff() -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(2)
        .factor(100)
        .max_delay(Duration::from_secs(5))
        .map(jitter)
        .take(STARTUP_CONNECT_ATTEMPTS - 1)
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and schema migrations
/// - Redis cache (in-memory cache when `REDIS_URL` is unset)
/// - Code generator for the configured strategy
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database or Redis connection fails after retries
/// - Migrations fail
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_database(&config).await?;
    info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let cache = connect_cache(&config).await?;

    let repository: Arc<dyn UrlRepository> = Arc::new(PgUrlRepository::new(Arc::new(pool)));
    let generator = build_generator(
        config.code_strategy,
        config.short_code_length,
        cache.clone(),
    );

    let link_service = Arc::new(LinkService::new(
        repository.clone(),
        cache.clone(),
        generator,
        &config.base_url,
        config.cache_ttl_seconds,
    ));

    let state = AppState::new(link_service, repository, cache);
    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn connect_database(config: &Config) -> Result<PgPool> {
    let options = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_acquire_timeout));

    let url = config.database_url.clone();

    Retry::spawn(startup_backoff(), || {
        let options = options.clone();
        let url = url.clone();
        async move {
            options.connect(&url).await.inspect_err(|e| {
                warn!(
                    "Database connection to {} failed: {}",
                    mask_connection_string(&url),
                    e
                )
            })
        }
    })
    .await
    .context("Failed to connect to database")
}

async fn connect_cache(config: &Config) -> Result<Arc<dyn CacheService>> {
    // Sequential mode without Redis is rejected by `Config::validate`.
    let Some(redis_url) = config.redis_url.clone() else {
        info!("Cache: in-memory");
        return Ok(Arc::new(InMemoryCache::new()));
    };

    let redis = Retry::spawn(startup_backoff(), || {
        let url = redis_url.clone();
        async move {
            RedisCache::connect(&url).await.inspect_err(|e| {
                warn!("Redis connection to {} failed: {}", mask_connection_string(&url), e)
            })
        }
    })
    .await
    .context("Failed to connect to Redis")?;

    info!("Cache: Redis");
    Ok(Arc::new(redis))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
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
                warn!("Failed to install SIGTERM handler: {}", e);
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

    info!("Shutdown signal received");
}
