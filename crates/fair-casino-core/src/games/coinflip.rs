//! Coin flip.

use super::traits::{mismatch, CoinSide, GameRules, GameType, Outcome, Settlement, Wager};
use crate::crypto::RoundDigest;
use crate::error::FairnessError;

/// Fixed payout on a correct call
pub const COINFLIP_MULTIPLIER: f64 = 1.98;

/// Coin flip game
pub struct CoinFlipGame;

impl GameRules for CoinFlipGame {
    const GAME_TYPE: GameType = GameType::CoinFlip;

    fn derive(digest: &RoundDigest) -> Outcome {
        let side = if digest.hex_slice(0, 1) % 2 == 0 {
            CoinSide::Tails
        } else {
            CoinSide::Heads
        };
        Outcome::CoinFlip { side }
    }

    fn settle(outcome: &Outcome, wager: &Wager, bet: u64) -> Result<Settlement, FairnessError> {
        match (outcome, wager) {
            (Outcome::CoinFlip { side }, Wager::CoinFlip { prediction }) => {
                Ok(if side == prediction {
                    Settlement::win(bet, COINFLIP_MULTIPLIER)
                } else {
                    Settlement::loss(0.0)
                })
            }
            _ => Err(mismatch(Self::GAME_TYPE)),
        }
    }
}
