//! Fair Casino Core Library
//!
//! This crate provides the provably-fair round protocol: server seed
//! commitments, deterministic outcome derivation for each game, verification
//! of settled rounds, and the house ledger that settlement books against.

pub mod crypto;
pub mod engine;
pub mod error;
pub mod games;
pub mod ledger;
pub mod protocol;
pub mod verify;

pub use crypto::{issue_commitment, RoundDigest, SeedPair, ServerSeed, ServerSeedHash};
pub use engine::{derive, derive_named, derive_outcome, Derivation};
pub use error::FairnessError;
pub use games::{CoinSide, DiceMode, GameType, Outcome, Settlement, Wager, MAX_BET};
pub use ledger::{HouseLedger, LedgerEvent, LedgerSnapshot};
pub use protocol::{RevealedRound, RoundId, RoundInput, RoundRecord};
pub use verify::{audit, verify, VerificationReport};
