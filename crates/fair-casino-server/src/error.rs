//! HTTP error mapping.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fair_casino_core::{FairnessError, RoundId, ServerSeedHash};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Fairness(#[from] FairnessError),

    #[error("No commitment {0} was issued")]
    UnknownCommitment(ServerSeedHash),

    #[error("Commitment {0} has already been played")]
    CommitmentConsumed(ServerSeedHash),

    #[error("Round {0} not found")]
    RoundNotFound(RoundId),

    #[error("Malformed request: {0}")]
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Fairness(FairnessError::Entropy(_) | FairnessError::LedgerOverflow(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Fairness(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::UnknownCommitment(_) | AppError::RoundNotFound(_) => StatusCode::NOT_FOUND,
            AppError::CommitmentConsumed(_) => StatusCode::CONFLICT,
        }
    }

    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Fairness(FairnessError::Entropy(_)) => "entropy_failure",
            AppError::Fairness(FairnessError::InvalidGameType(_)) => "invalid_game_type",
            AppError::Fairness(FairnessError::InvalidField { .. }) => "invalid_field",
            AppError::Fairness(FairnessError::InvalidWager(_)) => "invalid_wager",
            AppError::Fairness(FairnessError::LedgerOverflow(_)) => "ledger_overflow",
            AppError::UnknownCommitment(_) => "unknown_commitment",
            AppError::CommitmentConsumed(_) => "commitment_consumed",
            AppError::RoundNotFound(_) => "round_not_found",
            AppError::BadRequest(_) => "bad_request",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("{}", self);
        } else {
            warn!(code = self.code(), "{}", self);
        }

        let field = match &self {
            AppError::Fairness(FairnessError::InvalidField { field, .. }) => Some(*field),
            _ => None,
        };
        let body = ErrorBody {
            error: self.code(),
            message: self.to_string(),
            field,
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
