//! Error types for the fairness core.

use thiserror::Error;

/// Errors from commitment issuance, derivation and settlement.
///
/// Verification failures are not errors; see [`crate::verify::VerificationReport`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FairnessError {
    /// The OS random source could not be read. Never retried with a weaker generator.
    #[error("Secure entropy unavailable: {0}")]
    Entropy(String),

    #[error("Invalid game type: {0}")]
    InvalidGameType(String),

    /// Malformed round input, rejected before any hashing happens
    #[error("Invalid {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },

    #[error("Invalid wager: {0}")]
    InvalidWager(String),

    /// Booking a bet would push a ledger total out of range. Nothing is booked.
    #[error("House ledger overflow in {0}")]
    LedgerOverflow(&'static str),
}

impl FairnessError {
    pub(crate) fn field(field: &'static str, reason: impl Into<String>) -> Self {
        FairnessError::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}
