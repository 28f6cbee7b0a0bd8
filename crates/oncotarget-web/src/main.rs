//! Oncotarget Web Server
//!
//! Run with: cargo run -p oncotarget-web

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use oncotarget_common::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("oncotarget=debug,info")),
        )
        .init();

    info!("Starting Oncotarget Web Server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = Config::load_or_default()?;

    // Create app state
    let state = Arc::new(oncotarget_web::state::AppState::from_config(&config)?);
    info!("{} targets loaded", state.seeds.len());

    if config.enrichment.enrich_on_startup {
        state.spawn_enrichment();
    } else {
        info!("Startup enrichment disabled; POST /api/refresh to populate the table");
    }

    // Build router
    let app = oncotarget_web::router::build_router(state, &config.server.static_dir);

    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("invalid server.bind address: {}", config.server.bind))?;
    info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
