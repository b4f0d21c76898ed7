//! Cryptographic primitives for provably-fair rounds.
//!
//! This module provides:
//! - ServerSeed and ServerSeedHash for the commit-reveal scheme
//! - RoundDigest, the hash every game outcome is read from

mod digest;
mod seed;

pub use digest::RoundDigest;
pub use seed::{generate_seed, issue_commitment, SeedPair, ServerSeed, ServerSeedHash, SEED_BYTES};
