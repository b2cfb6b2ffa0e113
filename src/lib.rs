pub mod api; // HTTP surface for patient and doctor clients
pub mod assistant; // Text-generation oracle + prompt building
pub mod auth; // Mock login + bearer sessions
pub mod config;
pub mod consultation; // Report consultation lifecycle
pub mod models;
pub mod scoring; // Risk score estimators
pub mod service;
pub mod store; // Replace-on-write in-memory store
pub mod suggestions; // Rule-based suggestion engine

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

/// Start the Health Buddy API and serve until Ctrl-C.
pub async fn run() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let app_config = config::AppConfig::from_env().map_err(|e| e.to_string())?;
    tracing::debug!(
        bind = %app_config.bind_addr,
        score_mode = app_config.score_mode.as_str(),
        oracle_configured = app_config.ollama_url.is_some(),
        "Configuration loaded"
    );

    let service = Arc::new(service::HealthService::from_config(&app_config));
    let mut server = api::server::start_api_server(service, app_config.bind_addr).await?;

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| format!("Failed to listen for shutdown signal: {e}"))?;

    server.shutdown();
    server.wait().await;
    Ok(())
}
