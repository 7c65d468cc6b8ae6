use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mergington::config::AppConfig;
use mergington::database;
use mergington::services::seed_service;
use mergington::web;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Config + logging
    let config = AppConfig::from_env();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // 2. Database: connect, migrate, seed
    let pool = database::connect(&config)
        .await
        .with_context(|| format!("cannot connect to database {}", config.database_url))?;
    database::migrate(&pool)
        .await
        .context("cannot apply database migrations")?;

    if config.seed_default_activities {
        seed_service::seed_default_activities(&pool)
            .await
            .context("cannot seed default activities")?;
    }

    // 3. Bind, with a fallback port
    let listener = match TcpListener::bind(config.bind_addr()).await {
        Ok(l) => l,
        Err(e) => {
            warn!(
                addr = %config.bind_addr(),
                fallback = %config.fallback_bind_addr(),
                error = %e,
                "bind failed, trying fallback port"
            );
            TcpListener::bind(config.fallback_bind_addr())
                .await
                .with_context(|| format!("cannot bind {}", config.fallback_bind_addr()))?
        }
    };

    let bound_addr = listener.local_addr()?;
    info!("Server listening on http://{}", bound_addr);

    axum::serve(listener, web::router(pool))
        .await
        .context("server error")?;
    Ok(())
}
