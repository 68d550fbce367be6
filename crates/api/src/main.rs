use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::app::build_router;
use api::gql::build_schema;
use api::{AppConfig, AppState};
use infra::Persistence;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    // Refuse to serve without a store.
    let store = Arc::new(
        Persistence::connect(&config.store)
            .await
            .context("failed to connect to store")?,
    );

    let addr = format!("0.0.0.0:{}", config.port);
    let state = AppState::new(store.clone(), config);

    // Build GraphQL schema from the gql module
    let schema = build_schema(state.clone());
    let app = build_router(state, schema);

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Server ready at http://{}/graphql", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.disconnect();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        return;
    }
    tracing::info!("Shutdown signal received");
}
