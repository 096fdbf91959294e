//! Binary entrypoint for the AURA API server.
use aura_api::{config::ServerConfig, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().init();

    let config = ServerConfig::from_env()?;
    run(config).await;
    Ok(())
}
