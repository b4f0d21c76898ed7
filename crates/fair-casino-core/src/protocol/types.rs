//! Protocol types.

use crate::crypto::{ServerSeed, ServerSeedHash};
use crate::error::FairnessError;
use crate::games::{GameType, Outcome};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifier assigned to a round when it settles
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoundId(Uuid);

impl RoundId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RoundId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for RoundId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Debug for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "round:{}", self.0.simple())
    }
}

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Validated inputs to the outcome derivation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundInput {
    pub client_seed: String,
    pub server_seed: ServerSeed,
    pub nonce: u64,
    pub game_type: GameType,
}

impl RoundInput {
    /// Check round inputs before any hashing happens
    pub fn new(
        client_seed: impl Into<String>,
        server_seed: ServerSeed,
        nonce: u64,
        game_type: GameType,
    ) -> Result<Self, FairnessError> {
        let client_seed = client_seed.into();
        if client_seed.is_empty() {
            return Err(FairnessError::field("clientSeed", "must not be empty"));
        }
        if server_seed.as_str().is_empty() {
            return Err(FairnessError::field("serverSeed", "must not be empty"));
        }
        Ok(Self {
            client_seed,
            server_seed,
            nonce,
            game_type,
        })
    }
}

/// The published values of a settled round plus its claimed result.
///
/// This is everything a third party needs to audit the round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealedRound {
    pub client_seed: String,
    pub server_seed: ServerSeed,
    pub server_seed_hash: ServerSeedHash,
    pub nonce: u64,
    pub game_type: GameType,
    pub result: Outcome,
}

/// Immutable audit record written when a round settles
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundRecord {
    pub id: RoundId,
    #[serde(flatten)]
    pub round: RevealedRound,
    pub timestamp: DateTime<Utc>,
}

impl RoundRecord {
    pub fn new(round: RevealedRound) -> Self {
        Self {
            id: RoundId::new(),
            round,
            timestamp: Utc::now(),
        }
    }

    /// Run the fairness check on this record
    pub fn verify(&self) -> bool {
        crate::verify::verify(&self.round)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_id_generation() {
        let id1 = RoundId::new();
        let id2 = RoundId::new();
        assert_ne!(id1, id2);
        assert_eq!(id1.to_string().parse::<RoundId>().unwrap(), id1);
    }

    #[test]
    fn test_empty_client_seed_rejected() {
        let err = RoundInput::new("", ServerSeed::new("s"), 0, GameType::Dice).unwrap_err();
        assert_eq!(
            err,
            FairnessError::InvalidField {
                field: "clientSeed",
                reason: "must not be empty".to_string()
            }
        );
    }

    #[test]
    fn test_empty_server_seed_rejected() {
        assert!(matches!(
            RoundInput::new("c", ServerSeed::new(""), 0, GameType::Dice),
            Err(FairnessError::InvalidField {
                field: "serverSeed",
                ..
            })
        ));
    }

    #[test]
    fn test_record_json_is_flat_camel_case() {
        let server_seed = ServerSeed::new("def");
        let record = RoundRecord::new(RevealedRound {
            client_seed: "abc".to_string(),
            server_seed_hash: server_seed.commitment(),
            server_seed,
            nonce: 1,
            game_type: GameType::CoinFlip,
            result: Outcome::CoinFlip {
                side: crate::games::CoinSide::Tails,
            },
        });

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["clientSeed"], "abc");
        assert_eq!(json["serverSeed"], "def");
        assert_eq!(json["nonce"], 1);
        assert_eq!(json["gameType"], "coinflip");
        assert_eq!(json["result"]["side"], "tails");
        assert!(json["timestamp"].is_string());

        let back: RoundRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
