//! Crash: a multiplier at which the round busts.

use super::traits::{mismatch, GameRules, GameType, Outcome, Settlement, Wager};
use crate::crypto::RoundDigest;
use crate::error::FairnessError;

/// Largest value of 13 hex characters, 16^13 - 1
pub const CRASH_HEX_MAX: u64 = 0xF_FFFF_FFFF_FFFF;
/// Rounds drawing below this bust immediately at 1x
pub const INSTANT_CRASH_THRESHOLD: f64 = 0.04;

/// Crash game
pub struct CrashGame;

impl CrashGame {
    /// First 13 hex characters of the digest scaled into [0, 1]
    pub fn unit_interval(digest: &RoundDigest) -> f64 {
        digest.hex_slice(0, 13) as f64 / CRASH_HEX_MAX as f64
    }

    /// Crash point for a draw in [0, 1].
    ///
    /// The floor over `100 * x / 100` keeps only the integer part, so every
    /// draw currently lands on 1x. Kept bit-compatible with rounds already
    /// recorded under this formula.
    pub fn crash_point(draw: f64) -> f64 {
        if draw < INSTANT_CRASH_THRESHOLD {
            1.0
        } else {
            ((100.0 * (1.0 / (1.0 - draw / 25.0))) / 100.0).floor()
        }
    }

    pub fn check_cashout(cashout: f64) -> Result<(), FairnessError> {
        if cashout.is_finite() && cashout >= 1.0 {
            Ok(())
        } else {
            Err(FairnessError::InvalidWager(format!(
                "crash cashout must be at least 1x, got {}",
                cashout
            )))
        }
    }
}

impl GameRules for CrashGame {
    const GAME_TYPE: GameType = GameType::Crash;

    fn derive(digest: &RoundDigest) -> Outcome {
        Outcome::Crash {
            crash_point: Self::crash_point(Self::unit_interval(digest)),
        }
    }

    fn settle(outcome: &Outcome, wager: &Wager, bet: u64) -> Result<Settlement, FairnessError> {
        let (crash_point, cashout) = match (outcome, wager) {
            (Outcome::Crash { crash_point }, Wager::Crash { cashout }) => (*crash_point, *cashout),
            _ => return Err(mismatch(Self::GAME_TYPE)),
        };

        Self::check_cashout(cashout)?;

        Ok(if cashout <= crash_point {
            Settlement::win(bet, cashout)
        } else {
            Settlement::loss(0.0)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crash_unit_interval_bounds() {
        assert_eq!(CrashGame::unit_interval(&RoundDigest::from_bytes([0u8; 32])), 0.0);
        assert_eq!(CrashGame::unit_interval(&RoundDigest::from_bytes([0xff; 32])), 1.0);
    }

    #[test]
    fn test_crash_low_draw_busts_at_one() {
        // SHA256("héllo-seed-3") draws ~0.0352
        let digest = RoundDigest::compute("héllo", "seed", 3);
        assert!(CrashGame::unit_interval(&digest) < INSTANT_CRASH_THRESHOLD);
        assert_eq!(CrashGame::derive(&digest), Outcome::Crash { crash_point: 1.0 });
    }

    #[test]
    fn test_crash_formula_floors_to_integer() {
        for draw in [0.04, 0.25, 0.5, 0.99, 1.0] {
            let point = CrashGame::crash_point(draw);
            assert_eq!(point, point.floor());
            assert!(point >= 1.0);
        }
    }

    #[test]
    fn test_crash_point_never_below_one() {
        for nonce in 0..2_000 {
            let digest = RoundDigest::compute("crash", "range", nonce);
            match CrashGame::derive(&digest) {
                Outcome::Crash { crash_point } => assert!(crash_point >= 1.0),
                other => panic!("unexpected outcome {:?}", other),
            }
        }
    }

    #[test]
    fn test_crash_cashout_settlement() {
        let outcome = Outcome::Crash { crash_point: 1.0 };
        let win = CrashGame::settle(&outcome, &Wager::Crash { cashout: 1.0 }, 40).unwrap();
        assert!(win.is_win);
        assert_eq!(win.winnings, 40);

        let loss = CrashGame::settle(&outcome, &Wager::Crash { cashout: 2.5 }, 40).unwrap();
        assert!(!loss.is_win);
        assert_eq!(loss.multiplier, 0.0);
    }

    #[test]
    fn test_crash_cashout_below_one_rejected() {
        let outcome = Outcome::Crash { crash_point: 3.0 };
        assert!(CrashGame::settle(&outcome, &Wager::Crash { cashout: 0.5 }, 1).is_err());
        assert!(CrashGame::settle(&outcome, &Wager::Crash { cashout: f64::NAN }, 1).is_err());
    }
}
