use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wheelshare::config::Config;
use wheelshare::config_validator::ConfigValidator;
use wheelshare::server::Server;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let config = Config::from_env();
    ConfigValidator::validate(&config)
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("wheelshare={},tower_http=debug", config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting wheelshare service");
    tracing::info!(
        bind_addr = %config.bind_addr,
        redis = config.redis_url.is_some(),
        memory_store = config.memory_store,
        wheel_ttl_secs = config.wheel_ttl_secs,
        "Configuration loaded"
    );

    let server = Server::new(config).await;

    server
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
