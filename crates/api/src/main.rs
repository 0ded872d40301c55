use std::sync::Arc;

use anyhow::Context;

use infoco_api::app::{build_app, Dashboard};
use infoco_api::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    infoco_observability::init(config.log_format);
    for warning in config.warnings() {
        tracing::warn!("{warning}");
    }

    let dashboard = Arc::new(Dashboard::from_config(&config)?);
    let app = build_app(dashboard);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
