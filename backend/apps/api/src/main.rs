//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but request-level
//! errors go through `accounts::AccountError`.

use accounts::{
    AccountsConfig, InMemoryAccountRepository, PgAccountRepository, accounts_router,
    accounts_router_generic,
};
use anyhow::Context;
use axum::{
    Router, http,
    http::{Method, header},
};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,accounts=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AccountsConfig::default();
    let resource_path = config.resource_path.clone();

    // Account store: PostgreSQL when configured, in-memory otherwise
    let accounts = match env::var("DATABASE_URL") {
        Ok(database_url) => {
            let max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
                Ok(raw) => raw
                    .parse()
                    .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?,
                Err(_) => DEFAULT_MAX_CONNECTIONS,
            };

            let pool = PgPoolOptions::new()
                .max_connections(max_connections)
                .connect(&database_url)
                .await
                .context("failed to connect to DATABASE_URL")?;

            tracing::info!(max_connections, "Connected to database");

            // Run migrations
            sqlx::migrate!("../../../database/migrations")
                .run(&pool)
                .await?;

            tracing::info!("Migrations completed");

            accounts_router(PgAccountRepository::new(pool), config)
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set, accounts are kept in memory");
            accounts_router_generic(InMemoryAccountRepository::new(), config)
        }
    };

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:40922,http://127.0.0.1:40922".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([Method::POST, Method::OPTIONS]))
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]))
        .expose_headers([header::LOCATION]);

    // Build router
    let app = Router::new()
        .nest(&resource_path, accounts)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse()
        .context("BIND_ADDR must be a socket address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
