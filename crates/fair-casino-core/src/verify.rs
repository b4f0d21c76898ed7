//! Verification of settled rounds.
//!
//! A failed check is a normal answer, reported through [`VerificationReport`]
//! rather than an error.

use crate::crypto::RoundDigest;
use crate::protocol::RevealedRound;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Outcome of auditing one round
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReport {
    /// SHA256(serverSeed) equals the published commitment
    pub hash_matches: bool,
    /// Recomputed outcome equals the recorded result
    pub result_matches: bool,
    /// Digest the outcome was recomputed from
    pub hash: String,
    pub valid: bool,
}

impl VerificationReport {
    /// Names of the failed checks, for display
    pub fn failures(&self) -> Vec<&'static str> {
        let mut failures = Vec::new();
        if !self.hash_matches {
            failures.push("hash_mismatch");
        }
        if !self.result_matches {
            failures.push("result_mismatch");
        }
        failures
    }
}

/// Recompute both the commitment and the outcome of a round
pub fn audit(round: &RevealedRound) -> VerificationReport {
    let hash_matches = round.server_seed_hash.verify(&round.server_seed);

    let digest = RoundDigest::compute(
        &round.client_seed,
        round.server_seed.as_str(),
        round.nonce,
    );
    let result_matches = round.game_type.derive(&digest) == round.result;

    let report = VerificationReport {
        hash_matches,
        result_matches,
        hash: digest.to_hex(),
        valid: hash_matches && result_matches,
    };
    if !report.valid {
        debug!(failures = ?report.failures(), "round failed verification");
    }
    report
}

/// True only if the seed matches its commitment and the result matches the seeds
pub fn verify(round: &RevealedRound) -> bool {
    audit(round).valid
}
