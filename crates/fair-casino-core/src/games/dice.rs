//! Dice: a roll in 0..=100.

use super::traits::{mismatch, round2, DiceMode, GameRules, GameType, Outcome, Settlement, Wager};
use crate::crypto::RoundDigest;
use crate::error::FairnessError;

/// Number of distinct rolls
pub const DICE_SIDES: u64 = 101;

/// Dice game
pub struct DiceGame;

impl DiceGame {
    /// Payout multiplier for a target and direction, rounded to cents
    pub fn multiplier(target: u8, mode: DiceMode) -> Result<f64, FairnessError> {
        let target = f64::from(target);
        match mode {
            DiceMode::Over if target < 99.0 => Ok(round2(99.0 / (99.0 - target))),
            DiceMode::Under if target > 0.0 && target <= 100.0 => Ok(round2(99.0 / target)),
            _ => Err(FairnessError::InvalidWager(format!(
                "dice target {} cannot be played {:?}",
                target, mode
            ))),
        }
    }
}

impl GameRules for DiceGame {
    const GAME_TYPE: GameType = GameType::Dice;

    fn derive(digest: &RoundDigest) -> Outcome {
        Outcome::Dice {
            roll: (digest.hex_slice(0, 8) % DICE_SIDES) as u8,
        }
    }

    fn settle(outcome: &Outcome, wager: &Wager, bet: u64) -> Result<Settlement, FairnessError> {
        let (roll, target, mode) = match (outcome, wager) {
            (Outcome::Dice { roll }, Wager::Dice { target, mode }) => (*roll, *target, *mode),
            _ => return Err(mismatch(Self::GAME_TYPE)),
        };

        let multiplier = Self::multiplier(target, mode)?;
        let is_win = match mode {
            DiceMode::Over => roll > target,
            DiceMode::Under => roll < target,
        };

        Ok(if is_win {
            Settlement::win(bet, multiplier)
        } else {
            Settlement::loss(multiplier)
        })
    }
}
