//! Three-reel slots, each reel 0..=9.

use super::traits::{mismatch, GameRules, GameType, Outcome, Settlement, Wager};
use crate::crypto::RoundDigest;
use crate::error::FairnessError;

/// Payout when exactly two reels match
pub const PAIR_MULTIPLIER: f64 = 1.5;
/// Base payout for three of a kind; the symbol value is added on top
pub const TRIPLE_BASE_MULTIPLIER: f64 = 10.0;

/// Slots game
pub struct SlotsGame;

impl GameRules for SlotsGame {
    const GAME_TYPE: GameType = GameType::Slots;

    fn derive(digest: &RoundDigest) -> Outcome {
        let reel = |start: usize| (digest.hex_slice(start, start + 2) % 10) as u8;
        Outcome::Slots {
            reels: [reel(0), reel(2), reel(4)],
        }
    }

    fn settle(outcome: &Outcome, wager: &Wager, bet: u64) -> Result<Settlement, FairnessError> {
        let [a, b, c] = match (outcome, wager) {
            (Outcome::Slots { reels }, Wager::Slots) => *reels,
            _ => return Err(mismatch(Self::GAME_TYPE)),
        };

        Ok(if a == b && b == c {
            Settlement::win(bet, TRIPLE_BASE_MULTIPLIER + f64::from(a))
        } else if a == b || b == c || a == c {
            Settlement::win(bet, PAIR_MULTIPLIER)
        } else {
            Settlement::loss(0.0)
        })
    }
}
