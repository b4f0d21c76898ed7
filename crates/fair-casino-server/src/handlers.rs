//! HTTP API handlers.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use fair_casino_core::{
    audit, derive,
    ledger::LedgerSnapshot,
    protocol::{PlayRequest, PlayResponse, SeedCommitmentMessage, VerifyRequest, VerifyResponse},
    GameType, RevealedRound, RoundId, VerificationReport,
};
use tracing::info;

use crate::error::AppError;
use crate::state::AppState;

// ============ Games ============

pub async fn list_game_types() -> Json<Vec<GameType>> {
    Json(GameType::ALL.to_vec())
}

/// Issue a commitment for the next round. The seed stays on the server.
pub async fn get_seed(
    State(state): State<AppState>,
) -> Result<Json<SeedCommitmentMessage>, AppError> {
    let server_seed_hash = state.issue_commitment()?;
    Ok(Json(SeedCommitmentMessage { server_seed_hash }))
}

/// Recompute an outcome from caller-supplied inputs
pub async fn verify_inputs(
    payload: Result<Json<VerifyRequest>, JsonRejection>,
) -> Result<Json<VerifyResponse>, AppError> {
    let Json(req) = payload?;
    let input = req.into_input()?;
    let derivation = derive(&input);

    info!(
        game = %input.game_type,
        nonce = input.nonce,
        "Recomputed round outcome"
    );
    Ok(Json(VerifyResponse::new(
        input,
        derivation.digest,
        derivation.outcome,
    )))
}

pub async fn play(
    State(state): State<AppState>,
    payload: Result<Json<PlayRequest>, JsonRejection>,
) -> Result<Json<PlayResponse>, AppError> {
    let Json(req) = payload?;
    let params = req.validate()?;
    Ok(Json(state.play(params)?))
}

pub async fn recent_rounds(State(state): State<AppState>) -> Json<Vec<PlayResponse>> {
    Json(state.recent_rounds())
}

/// Latest winning rounds, newest first
pub async fn recent_wins(State(state): State<AppState>) -> Json<Vec<PlayResponse>> {
    Json(state.recent_wins())
}

// ============ Rounds ============

pub async fn get_round(
    State(state): State<AppState>,
    path: Result<Path<RoundId>, PathRejection>,
) -> Result<Json<PlayResponse>, AppError> {
    let Path(id) = path?;
    Ok(Json(state.round(id)?))
}

pub async fn verify_round(
    State(state): State<AppState>,
    path: Result<Path<RoundId>, PathRejection>,
) -> Result<Json<VerificationReport>, AppError> {
    let Path(id) = path?;
    let played = state.round(id)?;
    let report = audit(&played.round.round);

    info!(round = %id, valid = report.valid, "Verified stored round");
    Ok(Json(report))
}

/// Audit a record supplied by a third party. Server state is not consulted.
pub async fn verify_record(
    payload: Result<Json<RevealedRound>, JsonRejection>,
) -> Result<Json<VerificationReport>, AppError> {
    let Json(round) = payload?;
    let report = audit(&round);

    info!(
        game = %round.game_type,
        valid = report.valid,
        failures = ?report.failures(),
        "Verified submitted round"
    );
    Ok(Json(report))
}

// ============ System ============

pub async fn house(State(state): State<AppState>) -> Json<LedgerSnapshot> {
    Json(state.ledger().snapshot())
}

pub async fn health() -> &'static str {
    "ok"
}
