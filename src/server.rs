use crate::config::Config;
use crate::handlers::{
    create_wheel, get_spins, get_wheel, health_check, readiness_check, record_spin, spin_wheel,
    wheel_page, AppState,
};
use crate::kv::{KvStore, MemoryStore};
use crate::middleware::logging_middleware;
use crate::redis::RedisStore;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::{middleware, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_app(state: AppState) -> Router {
    let body_limit = state.config.max_body_bytes;

    Router::new()
        .route("/", get(wheel_page))
        // Wheel endpoints
        .route("/api/wheel", post(create_wheel))
        .route("/api/wheel/:id", get(get_wheel))
        .route("/api/wheel/:id/spin", post(spin_wheel))
        .route("/api/spins", get(get_spins).post(record_spin))
        // Health and readiness endpoints
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(body_limit))
                .layer(middleware::from_fn(logging_middleware)),
        )
}

/// Pick the store named by `config`. A Redis that cannot be reached at
/// startup leaves the service running without a store.
pub async fn connect_store(config: &Config) -> Option<Arc<dyn KvStore>> {
    if config.memory_store {
        tracing::warn!("Using in-memory store; wheels will not survive a restart");
        return Some(Arc::new(MemoryStore::new()));
    }

    let Some(url) = config.redis_url.as_deref() else {
        tracing::warn!("No key-value store configured; wheel writes will fail");
        return None;
    };

    match RedisStore::connect(url).await {
        Ok(store) => {
            tracing::info!("Connected to Redis");
            Some(Arc::new(store))
        }
        Err(e) => {
            tracing::error!(error = %e, "Redis unavailable; running without a store");
            None
        }
    }
}

pub struct Server {
    app: Router,
    addr: SocketAddr,
}

impl Server {
    pub async fn new(config: Config) -> Self {
        let addr = config.bind_addr;
        let store = connect_store(&config).await;
        let app = create_app(AppState::new(config, store));

        Self { app, addr }
    }

    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let listener = tokio::net::TcpListener::bind(self.addr).await?;

        tracing::info!("Wheelshare server listening on {}", self.addr);
        tracing::info!("Health check available at /health");
        tracing::info!("Readiness check available at /ready");

        // Run server with graceful shutdown
        axum::serve(
            listener,
            self.app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        },
    }
}
