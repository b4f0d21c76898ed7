//! Protocol types and messages.

mod messages;
mod types;

pub use messages::{
    parse_nonce, PlayParams, PlayRequest, PlayResponse, SeedCommitmentMessage, VerifyRequest,
    VerifyResponse,
};
pub use types::{RevealedRound, RoundId, RoundInput, RoundRecord};
