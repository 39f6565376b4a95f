use clap::Parser;
use moltenflake::{
    IdGenerator, SystemClock,
    config::{CliArgs, ServerConfig},
    http,
};
use std::sync::Arc;
use tokio::{net::TcpListener, signal};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("moltenflake=info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();
    let config = ServerConfig::try_from(args)?;

    let generator = Arc::new(IdGenerator::new(SystemClock, i64::from(config.machine_id))?);
    let app = http::router(generator);

    let listener = TcpListener::bind(config.server_addr).await?;
    info!(
        addr = %config.server_addr,
        machine_id = config.machine_id,
        "moltenflake listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("moltenflake stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
