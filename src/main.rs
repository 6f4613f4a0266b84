// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc};

use production_kpi::build_state;
use production_kpi::infrastructure::config::load_app_config;
use production_kpi::infrastructure::memory_repository::MemoryRepository;
use production_kpi::presentation::router;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_app_config()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(MemoryRepository::new());

    // Create services and state (application layer)
    let state = build_state(&config, repository)?;

    // Build router (presentation layer)
    let app = router(state);

    let addr: SocketAddr = config.server.bind_addr.parse()?;
    tracing::info!(%addr, "Starting production-kpi service");

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

    Ok(())
}
