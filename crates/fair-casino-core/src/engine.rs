//! Outcome derivation: round inputs -> digest -> game outcome.

use crate::crypto::RoundDigest;
use crate::error::FairnessError;
use crate::games::{GameType, Outcome};
use crate::protocol::RoundInput;

/// Digest of a round together with the outcome read from it
#[derive(Clone, Debug, PartialEq)]
pub struct Derivation {
    pub digest: RoundDigest,
    pub outcome: Outcome,
}

/// Derive a round's outcome. Pure: the same input always yields the same result.
pub fn derive(input: &RoundInput) -> Derivation {
    let digest = RoundDigest::compute(
        &input.client_seed,
        input.server_seed.as_str(),
        input.nonce,
    );
    let outcome = input.game_type.derive(&digest);
    Derivation { digest, outcome }
}

/// Derive from raw parts, skipping input validation
pub fn derive_outcome(
    client_seed: &str,
    server_seed: &str,
    nonce: u64,
    game_type: GameType,
) -> Outcome {
    game_type.derive(&RoundDigest::compute(client_seed, server_seed, nonce))
}

/// Derive with the game named by string, as received from a client
pub fn derive_named(
    client_seed: &str,
    server_seed: &str,
    nonce: u64,
    game_type: &str,
) -> Result<Outcome, FairnessError> {
    let game_type = game_type.parse::<GameType>()?;
    Ok(derive_outcome(client_seed, server_seed, nonce, game_type))
}
