use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use iss_tracker::{
    config::TrackerConfig,
    env_state::TrackerEnv,
    server::{serve, AppState},
    EpochStore,
};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("iss_tracker=info,tower_http=info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = TrackerConfig::parse();
    init_logging();

    let env = TrackerEnv::new(&config.oem_url, &config.geocoder_url, config.http_timeout())?;
    let store = Arc::new(EpochStore::new());

    if config.skip_initial_load {
        tracing::info!("initial load skipped, store is empty");
    } else {
        match env.fetch_ephemeris().await {
            Ok(ephemeris) => {
                store.load(ephemeris);
            }
            Err(e) => tracing::warn!("initial load failed, starting with an empty store: {e}"),
        }
    }

    let listener = TcpListener::bind(config.bind).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);

    serve(listener, AppState::new(store, env), shutdown_signal()).await?;
    Ok(())
}
