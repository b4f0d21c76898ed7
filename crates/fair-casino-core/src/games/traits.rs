//! Game traits and types.

use crate::crypto::RoundDigest;
use crate::error::FairnessError;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::{CoinFlipGame, CrashGame, DiceGame, SlotsGame};

/// Largest stake any game settles. With the highest payout multiplier
/// (99x) winnings stay well inside both `i64` and exact `f64` integers.
pub const MAX_BET: u64 = 1 << 40;

/// Check a stake against the absolute bounds every game shares
pub fn check_bet(bet: u64) -> Result<(), FairnessError> {
    if bet == 0 {
        return Err(FairnessError::field("bet", "must be greater than zero"));
    }
    if bet > MAX_BET {
        return Err(FairnessError::field(
            "bet",
            format!("must not exceed {}", MAX_BET),
        ));
    }
    Ok(())
}

/// Type of game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameType {
    Slots,
    Dice,
    CoinFlip,
    Crash,
}

impl GameType {
    /// Every supported game, in catalogue order
    pub const ALL: [GameType; 4] = [
        GameType::Slots,
        GameType::Dice,
        GameType::CoinFlip,
        GameType::Crash,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameType::Slots => "slots",
            GameType::Dice => "dice",
            GameType::CoinFlip => "coinflip",
            GameType::Crash => "crash",
        }
    }

    /// Map a round digest to this game's outcome
    pub fn derive(&self, digest: &RoundDigest) -> Outcome {
        match self {
            GameType::Slots => SlotsGame::derive(digest),
            GameType::Dice => DiceGame::derive(digest),
            GameType::CoinFlip => CoinFlipGame::derive(digest),
            GameType::Crash => CrashGame::derive(digest),
        }
    }

    /// Apply an outcome of this game to a wager
    pub fn settle(
        &self,
        outcome: &Outcome,
        wager: &Wager,
        bet: u64,
    ) -> Result<Settlement, FairnessError> {
        check_bet(bet)?;
        if outcome.game_type() != *self || wager.game_type() != *self {
            return Err(FairnessError::InvalidWager(format!(
                "{} wager cannot settle a {} round",
                wager.game_type(),
                self
            )));
        }

        match self {
            GameType::Slots => SlotsGame::settle(outcome, wager, bet),
            GameType::Dice => DiceGame::settle(outcome, wager, bet),
            GameType::CoinFlip => CoinFlipGame::settle(outcome, wager, bet),
            GameType::Crash => CrashGame::settle(outcome, wager, bet),
        }
    }
}

impl FromStr for GameType {
    type Err = FairnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameType::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| FairnessError::InvalidGameType(s.to_string()))
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side of a coin
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoinSide {
    Heads,
    Tails,
}

/// Derived round outcome.
///
/// Serialized without a tag; the game type travels alongside it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Outcome {
    Dice {
        roll: u8,
    },
    CoinFlip {
        side: CoinSide,
    },
    Slots {
        reels: [u8; 3],
    },
    Crash {
        #[serde(rename = "crashPoint", serialize_with = "serialize_crash_point")]
        crash_point: f64,
    },
}

/// Whole crash points go out as JSON integers (`1`, not `1.0`)
fn serialize_crash_point<S: Serializer>(point: &f64, s: S) -> Result<S::Ok, S::Error> {
    // 2^53: beyond this not every integer is representable
    if point.fract() == 0.0 && point.abs() < 9_007_199_254_740_992.0 {
        s.serialize_i64(*point as i64)
    } else {
        s.serialize_f64(*point)
    }
}

impl Outcome {
    pub fn game_type(&self) -> GameType {
        match self {
            Outcome::Dice { .. } => GameType::Dice,
            Outcome::CoinFlip { .. } => GameType::CoinFlip,
            Outcome::Slots { .. } => GameType::Slots,
            Outcome::Crash { .. } => GameType::Crash,
        }
    }
}

/// Direction of a dice bet
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiceMode {
    Over,
    Under,
}

/// Player's stake-independent choice for a round
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "game", rename_all = "lowercase")]
pub enum Wager {
    Dice { target: u8, mode: DiceMode },
    CoinFlip { prediction: CoinSide },
    Slots,
    Crash { cashout: f64 },
}

impl Wager {
    pub fn game_type(&self) -> GameType {
        match self {
            Wager::Dice { .. } => GameType::Dice,
            Wager::CoinFlip { .. } => GameType::CoinFlip,
            Wager::Slots => GameType::Slots,
            Wager::Crash { .. } => GameType::Crash,
        }
    }

    /// Reject wagers that could never be settled, before a seed is spent on them
    pub fn validate(&self) -> Result<(), FairnessError> {
        match self {
            Wager::Dice { target, mode } => DiceGame::multiplier(*target, *mode).map(|_| ()),
            Wager::Crash { cashout } => CrashGame::check_cashout(*cashout),
            Wager::CoinFlip { .. } | Wager::Slots => Ok(()),
        }
    }
}

/// Result of applying an outcome to a wager
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    pub is_win: bool,
    pub multiplier: f64,
    pub winnings: u64,
}

impl Settlement {
    pub fn win(bet: u64, multiplier: f64) -> Self {
        Self {
            is_win: true,
            multiplier,
            winnings: (bet as f64 * multiplier).floor() as u64,
        }
    }

    pub fn loss(multiplier: f64) -> Self {
        Self {
            is_win: false,
            multiplier,
            winnings: 0,
        }
    }
}

/// Round a payout multiplier to two decimal places
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Per-game rules. Dispatch goes through [`GameType`], so the set of games
/// is closed.
pub trait GameRules {
    const GAME_TYPE: GameType;

    /// Read this game's outcome from a round digest
    fn derive(digest: &RoundDigest) -> Outcome;

    /// Pay out a wager. Callers guarantee outcome and wager belong to this game.
    fn settle(outcome: &Outcome, wager: &Wager, bet: u64) -> Result<Settlement, FairnessError>;
}

/// Shared error for the unreachable mismatch arm of [`GameRules::settle`]
pub(crate) fn mismatch(game: GameType) -> FairnessError {
    FairnessError::InvalidWager(format!("outcome or wager is not a {} round", game))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_type_names_round_trip() {
        for game in GameType::ALL {
            assert_eq!(game.as_str().parse::<GameType>().unwrap(), game);
            let json = serde_json::to_string(&game).unwrap();
            assert_eq!(json, format!("\"{}\"", game.as_str()));
        }
    }

    #[test]
    fn test_unknown_game_type_rejected() {
        assert_eq!(
            "roulette".parse::<GameType>(),
            Err(FairnessError::InvalidGameType("roulette".to_string()))
        );
        assert!("Dice".parse::<GameType>().is_err());
        assert!("".parse::<GameType>().is_err());
    }

    #[test]
    fn test_outcome_json_shapes() {
        let cases = [
            (Outcome::Dice { roll: 33 }, r#"{"roll":33}"#),
            (
                Outcome::CoinFlip {
                    side: CoinSide::Tails,
                },
                r#"{"side":"tails"}"#,
            ),
            (Outcome::Slots { reels: [5, 3, 0] }, r#"{"reels":[5,3,0]}"#),
            (Outcome::Crash { crash_point: 1.0 }, r#"{"crashPoint":1}"#),
            (Outcome::Crash { crash_point: 2.5 }, r#"{"crashPoint":2.5}"#),
        ];
        for (outcome, json) in cases {
            assert_eq!(serde_json::to_string(&outcome).unwrap(), json);
            let back: Outcome = serde_json::from_str(json).unwrap();
            assert_eq!(back, outcome);
        }
    }

    #[test]
    fn test_crash_point_accepts_float_json() {
        let outcome: Outcome = serde_json::from_str(r#"{"crashPoint":1.0}"#).unwrap();
        assert_eq!(outcome, Outcome::Crash { crash_point: 1.0 });
    }

    #[test]
    fn test_wager_is_tagged_by_game() {
        let wager: Wager =
            serde_json::from_str(r#"{"game":"dice","target":50,"mode":"over"}"#).unwrap();
        assert_eq!(
            wager,
            Wager::Dice {
                target: 50,
                mode: DiceMode::Over
            }
        );
        let slots: Wager = serde_json::from_str(r#"{"game":"slots"}"#).unwrap();
        assert_eq!(slots.game_type(), GameType::Slots);
        assert!(serde_json::from_str::<Wager>(r#"{"game":"roulette"}"#).is_err());
    }

    #[test]
    fn test_settle_rejects_mismatched_wager() {
        let outcome = Outcome::Dice { roll: 10 };
        let wager = Wager::CoinFlip {
            prediction: CoinSide::Heads,
        };
        assert!(matches!(
            GameType::Dice.settle(&outcome, &wager, 100),
            Err(FairnessError::InvalidWager(_))
        ));
    }

    #[test]
    fn test_wager_validation() {
        assert!(Wager::Slots.validate().is_ok());
        assert!(Wager::Dice {
            target: 99,
            mode: DiceMode::Over
        }
        .validate()
        .is_err());
        assert!(Wager::Crash { cashout: 0.9 }.validate().is_err());
        assert!(Wager::Crash { cashout: 2.0 }.validate().is_ok());
    }

    #[test]
    fn test_settle_rejects_zero_bet() {
        assert!(matches!(
            GameType::Slots.settle(&Outcome::Slots { reels: [1, 1, 1] }, &Wager::Slots, 0),
            Err(FairnessError::InvalidField { field: "bet", .. })
        ));
    }

    #[test]
    fn test_settle_rejects_bet_above_ceiling() {
        let outcome = Outcome::Slots { reels: [9, 9, 9] };
        assert!(GameType::Slots.settle(&outcome, &Wager::Slots, MAX_BET).is_ok());
        assert!(matches!(
            GameType::Slots.settle(&outcome, &Wager::Slots, MAX_BET + 1),
            Err(FairnessError::InvalidField { field: "bet", .. })
        ));
        assert!(GameType::Slots.settle(&outcome, &Wager::Slots, u64::MAX).is_err());
    }

    #[test]
    fn test_winnings_are_floored() {
        let settlement = Settlement::win(3, 1.5);
        assert_eq!(settlement.winnings, 4);
        assert!(settlement.is_win);
    }
}
