mod response;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::post;
use axum::Router;
use seatlock_cache::{CacheInvalidationHook, HttpInvalidationHook, NoopInvalidationHook};
use seatlock_core::BookingCommitCoordinator;
use seatlock_lock::{RedisSeatLockRegistry, SeatLockRegistry};
use seatlock_types::Config;
use state::AppState;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seatlock_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting seatlock API server...");

    let config = Config::from_env()?;
    let port = std::env::var("API_PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse::<u16>()?;

    let db = seatlock_db::create_pool(&config).await?;
    tracing::info!("database connection established");

    let registry: Arc<dyn SeatLockRegistry> = Arc::new(
        RedisSeatLockRegistry::connect_with_deadline(
            &config.registry_url,
            config.lock_table.clone(),
            config.lock_ttl,
            config.registry_deadline,
        )
        .await?,
    );
    tracing::info!("lock registry connection established");

    let cache: Arc<dyn CacheInvalidationHook> = match &config.cache_invalidation_url {
        Some(url) => Arc::new(HttpInvalidationHook::new(url.clone())),
        None => {
            tracing::warn!("CACHE_INVALIDATION_URL not set, cache invalidation is a no-op");
            Arc::new(NoopInvalidationHook)
        }
    };

    let coordinator = Arc::new(BookingCommitCoordinator::new(registry.clone(), db.clone(), cache.clone()));

    let state = AppState {
        db,
        registry,
        coordinator,
        cache,
    };

    let app = Router::new()
        .route("/health", axum::routing::get(health_check))
        .route("/locks/:seat_id/acquire", post(routes::locks::acquire))
        .route("/locks/:seat_id/extend", post(routes::locks::extend))
        .route("/locks/:seat_id/release", post(routes::locks::release))
        .route("/bookings", post(routes::bookings::create))
        .route("/bookings/:id/confirm", post(routes::bookings::confirm))
        .route("/bookings/:id/cancel", post(routes::bookings::cancel))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
