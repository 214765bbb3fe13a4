//! # Doable API Server
//!
//! Multi-user task-tracking service: users register, authenticate, and
//! manage personal todos organized into categories; categories can be
//! shared with other users.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/doable \
//! JWT_SECRET=$(openssl rand -hex 32) \
//! cargo run -p doable-api
//! ```

use doable_api::{
    app::{build_router, AppState},
    config::Config,
    mailer::TracingMailer,
};
use doable_shared::db::{
    migrations::run_migrations,
    pool::{create_pool, PoolConfig},
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "doable_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Doable API v{} starting", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;

    let pool = create_pool(PoolConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    run_migrations(&pool).await?;

    let mailer = Arc::new(TracingMailer::new(config.api.public_base_url.clone()));
    let bind_address = config.bind_address();

    let state = AppState::new(pool, config, mailer);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
