//! Fair Casino Service

use fair_casino_server::{create_router, spawn_ledger_logger, AppState, Config};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    info!(
        bankroll = config.house_bankroll,
        recent_limit = config.recent_rounds_limit,
        "Loaded configuration"
    );

    let state = AppState::new(&config);
    spawn_ledger_logger(&state);
    let app = create_router(state);

    let addr = config.socket_addr();
    info!("Fair casino starting on http://{}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
