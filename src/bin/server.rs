//! Fest registration server.
//!
//! Binds the HTTP API over a `PostgreSQL` store and the configured
//! payment gateway.
//!
//! # Usage
//!
//! ```bash
//! # Start infrastructure
//! docker compose up -d
//!
//! # Run server
//! cargo run --bin server
//! ```

use festreg::payment::{HttpPaymentGateway, PaymentService, PaymentVerifier};
use festreg::registration::RegistrationService;
use festreg::server::{serve, AppState};
use festreg::store::PostgresStore;
use festreg::Config;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,festreg=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!(
        postgres = %config.postgres.url,
        gateway = %config.gateway.base_url,
        "Configuration loaded"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.postgres.max_connections)
        .acquire_timeout(Duration::from_secs(config.postgres.connect_timeout))
        .connect(&config.postgres.url)
        .await?;

    let store = Arc::new(PostgresStore::new(pool));
    store.migrate().await?;
    tracing::info!("Database ready");

    let gateway = Arc::new(HttpPaymentGateway::new(
        config.gateway.base_url.clone(),
        config.gateway.key_id.clone(),
        config.gateway.key_secret.clone(),
    ));
    let verifier = PaymentVerifier::new(config.gateway.key_secret.clone());

    let registrations = Arc::new(RegistrationService::new(store.clone(), store.clone()));
    let payments = Arc::new(PaymentService::new(store.clone(), gateway, verifier));
    let state = AppState::new(store, registrations, payments);

    serve(state, &config.server).await
}
