use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use formbuilder::{cli::Cli, config::AppConfig, router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up PB_URL, PB_TOKEN, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("formbuilder=info,tower_http=info")),
        )
        .init();

    let config = Cli::parse().apply(AppConfig::from_env());
    tracing::info!(
        environment = ?config.environment,
        backend = %config.backend.base_url,
        collection = %config.backend.collection,
        authenticated = config.backend.token.is_some(),
        "starting formbuilder"
    );
    if config.backend.token.is_none() {
        tracing::warn!("PB_TOKEN not set; schema reads are unauthenticated");
    }

    let bind_addr = config.server.bind_addr();
    let state = AppState::new(config).context("invalid backend configuration")?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("🚀 サービスを http://{} で起動中...", bind_addr);

    axum::serve(listener, app).await.context("server")?;
    Ok(())
}
