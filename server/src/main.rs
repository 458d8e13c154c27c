mod error;
mod routes;
mod state;

use schain_core::config::ValidatorConfig;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_PORT: u16 = 5000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("schain_server=info,schain_core=info,tower_http=info")
        }))
        .init();

    let config_path = std::env::var("SCHAIN_CONFIG").ok().map(PathBuf::from);
    let config = ValidatorConfig::load(config_path.as_deref())?;
    info!(
        timeout_ms = config.fetch_timeout_ms,
        max_concurrency = config.max_concurrency,
        reseller_domain = %config.reseller_domain,
        "validator configured"
    );

    let port = match std::env::var("PORT") {
        Ok(p) => p
            .trim()
            .parse::<u16>()
            .map_err(|_| anyhow::anyhow!("PORT is not a valid port number: {}", p))?,
        Err(_) => DEFAULT_PORT,
    };
    let bind = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string());
    let addr = format!("{}:{}", bind, port);

    let app = routes::router(state::AppState::new(config));

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
