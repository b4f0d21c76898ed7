//! Game definitions: outcome derivation and payout rules.

mod coinflip;
mod crash;
mod dice;
mod slots;
mod traits;

pub use coinflip::{CoinFlipGame, COINFLIP_MULTIPLIER};
pub use crash::{CrashGame, CRASH_HEX_MAX, INSTANT_CRASH_THRESHOLD};
pub use dice::{DiceGame, DICE_SIDES};
pub use slots::{SlotsGame, PAIR_MULTIPLIER, TRIPLE_BASE_MULTIPLIER};
pub use traits::{
    check_bet, CoinSide, DiceMode, GameRules, GameType, Outcome, Settlement, Wager, MAX_BET,
};
