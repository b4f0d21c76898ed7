//! Protocol messages.

use crate::crypto::{RoundDigest, ServerSeed, ServerSeedHash};
use crate::error::FairnessError;
use crate::games::{check_bet, GameType, Outcome, Settlement, Wager};
use crate::protocol::{RoundInput, RoundRecord};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Commitment published before a bet. The seed itself is withheld.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedCommitmentMessage {
    pub server_seed_hash: ServerSeedHash,
}

/// Request to recompute a round from its published inputs.
///
/// Fields arrive loosely typed so validation can name the offending field.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    pub client_seed: String,
    pub server_seed: String,
    pub nonce: Value,
    pub game_type: String,
}

impl VerifyRequest {
    pub fn into_input(self) -> Result<RoundInput, FairnessError> {
        let nonce = parse_nonce(&self.nonce)?;
        let game_type = self.game_type.parse::<GameType>()?;
        RoundInput::new(
            self.client_seed,
            ServerSeed::new(self.server_seed),
            nonce,
            game_type,
        )
    }
}

/// Recomputed round, echoing the inputs alongside the digest
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub client_seed: String,
    pub server_seed: ServerSeed,
    pub nonce: u64,
    pub hash: String,
    pub game_type: GameType,
    pub result: Outcome,
}

impl VerifyResponse {
    pub fn new(input: RoundInput, digest: RoundDigest, result: Outcome) -> Self {
        Self {
            client_seed: input.client_seed,
            server_seed: input.server_seed,
            nonce: input.nonce,
            hash: digest.to_hex(),
            game_type: input.game_type,
            result,
        }
    }
}

/// Bet placed against a previously issued commitment
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayRequest {
    pub game_type: String,
    pub bet: u64,
    pub client_seed: String,
    pub server_seed_hash: String,
    pub nonce: Value,
    pub wager: Wager,
}

/// Checked form of [`PlayRequest`]
#[derive(Clone, Debug, PartialEq)]
pub struct PlayParams {
    pub game_type: GameType,
    pub bet: u64,
    pub client_seed: String,
    pub server_seed_hash: ServerSeedHash,
    pub nonce: u64,
    pub wager: Wager,
}

impl PlayRequest {
    pub fn validate(self) -> Result<PlayParams, FairnessError> {
        let game_type = self.game_type.parse::<GameType>()?;
        check_bet(self.bet)?;
        if self.client_seed.is_empty() {
            return Err(FairnessError::field("clientSeed", "must not be empty"));
        }
        let server_seed_hash = self.server_seed_hash.parse::<ServerSeedHash>()?;
        let nonce = parse_nonce(&self.nonce)?;
        if self.wager.game_type() != game_type {
            return Err(FairnessError::InvalidWager(format!(
                "{} wager sent for a {} round",
                self.wager.game_type(),
                game_type
            )));
        }
        self.wager.validate()?;
        Ok(PlayParams {
            game_type,
            bet: self.bet,
            client_seed: self.client_seed,
            server_seed_hash,
            nonce,
            wager: self.wager,
        })
    }
}

/// Settled round with the revealed seed
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayResponse {
    pub round: RoundRecord,
    pub bet: u64,
    pub wager: Wager,
    pub settlement: Settlement,
}

/// Accept only non-negative JSON integers
pub fn parse_nonce(value: &Value) -> Result<u64, FairnessError> {
    value.as_u64().ok_or_else(|| {
        FairnessError::field(
            "nonce",
            format!("expected a non-negative integer, got {}", value),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn verify_request(nonce: Value, game_type: &str) -> VerifyRequest {
        serde_json::from_value(json!({
            "clientSeed": "abc",
            "serverSeed": "def",
            "nonce": nonce,
            "gameType": game_type,
        }))
        .unwrap()
    }

    #[test]
    fn test_verify_request_into_input() {
        let input = verify_request(json!(1), "coinflip").into_input().unwrap();
        assert_eq!(input.client_seed, "abc");
        assert_eq!(input.server_seed.as_str(), "def");
        assert_eq!(input.nonce, 1);
        assert_eq!(input.game_type, GameType::CoinFlip);
    }

    #[test]
    fn test_non_numeric_nonce_names_field() {
        for bad in [json!("7"), json!(-1), json!(1.5), json!(null)] {
            let err = verify_request(bad, "dice").into_input().unwrap_err();
            assert!(
                matches!(err, FairnessError::InvalidField { field: "nonce", .. }),
                "{:?}",
                err
            );
        }
    }

    #[test]
    fn test_unknown_game_type_in_request() {
        let err = verify_request(json!(0), "roulette").into_input().unwrap_err();
        assert_eq!(err, FairnessError::InvalidGameType("roulette".to_string()));
    }

    #[test]
    fn test_seed_commitment_message_has_no_seed() {
        let msg = SeedCommitmentMessage {
            server_seed_hash: ServerSeed::new("secret").commitment(),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert!(json.get("serverSeed").is_none());
        assert_eq!(json["serverSeedHash"].as_str().unwrap().len(), 64);
    }

    #[test]
    fn test_play_request_validation() {
        let hash = ServerSeed::new("s").commitment().to_hex();
        let request: PlayRequest = serde_json::from_value(json!({
            "gameType": "dice",
            "bet": 10,
            "clientSeed": "lucky",
            "serverSeedHash": hash,
            "nonce": 3,
            "wager": { "game": "dice", "target": 50, "mode": "under" },
        }))
        .unwrap();
        let params = request.clone().validate().unwrap();
        assert_eq!(params.game_type, GameType::Dice);
        assert_eq!(params.nonce, 3);

        let mut wrong_game = request.clone();
        wrong_game.game_type = "slots".to_string();
        assert!(matches!(
            wrong_game.validate(),
            Err(FairnessError::InvalidWager(_))
        ));

        let mut zero_bet = request.clone();
        zero_bet.bet = 0;
        assert!(matches!(
            zero_bet.validate(),
            Err(FairnessError::InvalidField { field: "bet", .. })
        ));

        let mut huge_bet = request;
        huge_bet.bet = u64::MAX;
        assert!(matches!(
            huge_bet.validate(),
            Err(FairnessError::InvalidField { field: "bet", .. })
        ));
    }
}
