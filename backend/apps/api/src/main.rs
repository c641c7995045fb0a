//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use axum::{
    Router, http,
    http::{Method, header},
};
use chrono::Utc;
use ingest::application::admit_request::AdmitRequestUseCase;
use ingest::application::config::DATABASE_URL_VAR;
use ingest::{IngestConfig, PgIngestRepository, ingest_router};
use platform::client::API_KEY_HEADER;
use platform::config::{env_lookup, optional_var, parse_var};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer, ExposeHeaders};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

const BIND_ADDR_VAR: &str = "BIND_ADDR";
const FRONTEND_ORIGINS_VAR: &str = "FRONTEND_ORIGINS";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,ingest=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = IngestConfig::from_env()?;
    tracing::info!(
        max_requests = config.rate_limit.max_requests,
        window_secs = config.rate_limit.window.as_secs(),
        retention_days = config.retention.as_secs() / 86_400,
        store_timeout_ms = config.store_timeout.as_millis() as u64,
        "Ingest configuration loaded"
    );

    // Database connection; without it only deduplication is served
    let repo = match optional_var(&env_lookup, DATABASE_URL_VAR) {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .acquire_timeout(config.store_timeout)
                .connect(&database_url)
                .await?;

            tracing::info!("Connected to database");

            // Run migrations
            sqlx::migrate!("../../../database/migrations")
                .run(&pool)
                .await?;

            tracing::info!("Migrations completed");

            Some(PgIngestRepository::new(pool))
        }
        None => {
            tracing::warn!(
                variable = DATABASE_URL_VAR,
                "Store is not configured; admission and retention routes will fail"
            );
            None
        }
    };

    // Startup cleanup: remove counters of finished windows
    // Errors here should not prevent server startup
    if let Some(repo) = &repo {
        let admission = AdmitRequestUseCase::new(Arc::new(repo.clone()), Arc::new(config.clone()));
        if let Err(e) = admission.purge_stale_windows(Utc::now()).await {
            tracing::warn!(
                error = %e,
                "Rate limit window cleanup failed, continuing anyway"
            );
        }
    }

    // CORS configuration
    let frontend_origins = optional_var(&env_lookup, FRONTEND_ORIGINS_VAR)
        .unwrap_or_else(|| "http://localhost:40922,http://127.0.0.1:40922".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            API_KEY_HEADER,
        ]))
        .expose_headers(ExposeHeaders::list([
            platform::rate_limit::LIMIT_HEADER,
            platform::rate_limit::REMAINING_HEADER,
            platform::rate_limit::RESET_HEADER,
            header::RETRY_AFTER,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .nest("/api/ingest", ingest_router(repo, config))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr: SocketAddr = parse_var(
        &env_lookup,
        BIND_ADDR_VAR,
        SocketAddr::from(([0, 0, 0, 0], 31114)),
    )?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
