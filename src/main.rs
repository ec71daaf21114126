use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use vaultdock::agent::{AgentConfig, AgentService, SessionStore, REAP_INTERVAL};
use vaultdock::config::AppConfig;
use vaultdock::dashboard::{create_router, DashboardState};
use vaultdock::docker::SystemRunner;
use vaultdock::tools::ToolRegistry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = AppConfig::from_env()?;
    vaultdock::tracing::init_tracing("vaultdock", config.otlp_endpoint.as_deref())?;

    match &config.provider {
        Some(p) => info!(provider = %p.provider, model = %p.model, "LLM provider configured"),
        None => warn!("No LLM provider configured; investigations will fail until a key is set"),
    }

    let store = Arc::new(SessionStore::new());
    let reaper = store.spawn_reaper(REAP_INTERVAL);

    let tools = Arc::new(ToolRegistry::new(Arc::new(SystemRunner::new())));
    let agent = AgentService::new(
        Arc::clone(&store),
        tools,
        config.provider.clone(),
        AgentConfig::default(),
    );
    let app = create_router(DashboardState {
        agent: Arc::new(agent),
    });

    let addr = config.listen_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Dashboard API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    reaper.shutdown().await;
    vaultdock::tracing::shutdown_tracing();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
