//! Fair Casino Server
//!
//! HTTP service that issues seed commitments, settles bets against them and
//! lets anyone verify the settled rounds.

pub mod config;
pub mod error;
pub mod handlers;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

pub use config::{Config, ConfigError};
pub use error::AppError;
pub use state::AppState;

use handlers::*;

/// Create the router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Games
        .route("/api/games/types", get(list_game_types))
        .route("/api/games/seed", get(get_seed))
        .route("/api/games/verify", post(verify_inputs))
        .route("/api/games/play", post(play))
        .route("/api/games/recent", get(recent_rounds))
        .route("/api/games/wins", get(recent_wins))
        // Rounds
        .route("/api/rounds/verify", post(verify_record))
        .route("/api/rounds/:id", get(get_round))
        .route("/api/rounds/:id/verify", get(verify_round))
        // System
        .route("/api/house", get(house))
        .route("/api/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Log every house ledger change until the ledger goes away
pub fn spawn_ledger_logger(state: &AppState) -> JoinHandle<()> {
    let mut events = state.ledger().subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => info!(
                    bet = event.bet,
                    payout = event.settlement.winnings,
                    balance = event.snapshot.balance,
                    profit_loss = event.snapshot.profit_loss,
                    "House ledger updated"
                ),
                Err(RecvError::Lagged(missed)) => {
                    warn!(missed, "Ledger logger fell behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}
