//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Startup failures surface through `anyhow`; request errors are rendered
//! by the `auth` crate.

mod config;
mod mailer;

use std::time::Duration;

use auth::{PgAuthRepository, auth_router};
use axum::{
    Router, http,
    http::{Method, header},
};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tokio::time::MissedTickBehavior;
use tower::ServiceBuilder;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;
use crate::mailer::AppMailer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,platform=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    tracing::debug!(?config, "Loaded configuration");

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Startup cleanup: errors here should not prevent server startup
    let auth_repo = PgAuthRepository::new(pool.clone());
    sweep_expired(&auth_repo).await;
    spawn_expiry_sweeper(auth_repo.clone(), config.sweep_interval);

    let mailer = AppMailer::from_config(config.mail.as_ref());
    if matches!(mailer, AppMailer::Log(_)) {
        tracing::warn!("MAIL_API_URL not set, outgoing mail will only be logged");
    }

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
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
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .nest("/api/auth", auth_router(auth_repo, config.auth, mailer))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        );

    // Start server
    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn sweep_expired(repo: &PgAuthRepository) {
    match repo.cleanup_expired().await {
        Ok(report) => {
            tracing::info!(
                refresh_tokens_deleted = report.refresh_tokens,
                email_codes_deleted = report.email_codes,
                "Auth expiry sweep completed"
            );
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Auth expiry sweep failed, continuing anyway"
            );
        }
    }
}

/// Periodic sweep of expired refresh tokens and e-mail codes
fn spawn_expiry_sweeper(repo: PgAuthRepository, every: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; startup already swept
        ticker.tick().await;

        loop {
            ticker.tick().await;
            sweep_expired(&repo).await;
        }
    });
}
