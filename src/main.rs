// Posts & comments API server

use tracing::info;
use tracing_subscriber::EnvFilter;

use posts_api::{app_state::AppState, config::Config, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize application state
    let state = AppState::new(&config).await?;

    server::run(&config, state).await?;

    info!("App stopped");
    Ok(())
}
