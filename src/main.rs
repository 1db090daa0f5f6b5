//! LLM Gateway Server
//!
//! Authenticated HTTP gateway that forwards requests to OpenAI-style and
//! Gemini-style upstream APIs

use anyhow::{Context, Result};
use llmgate::utils::logging::init_logging;
use llmgate::{create_router, version_info, Settings};
use std::net::SocketAddr;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Settings first: the log sink comes from them
    let settings = Settings::new().context("Failed to load server settings")?;

    init_logging(&settings.logging).context("Failed to initialize logging")?;
    info!("{}", version_info());

    let addr = settings.listen_addr();

    // Create router
    let app = create_router(settings).context("Failed to create router")?;

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("🚀 LLM gateway started on http://{}", addr);
    info!("🔄 OpenAI proxy: http://{}/api/openai", addr);
    info!("🔄 Gemini proxy: http://{}/v1/generate", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| anyhow::anyhow!("Failed to start server: {}", e))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
