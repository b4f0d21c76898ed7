//! Server seeds and their SHA-256 commitments.

use crate::error::FairnessError;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Number of entropy bytes behind every server seed
pub const SEED_BYTES: usize = 32;

/// Read fresh bytes from the operating system's CSPRNG.
pub fn generate_seed() -> Result<[u8; SEED_BYTES], FairnessError> {
    let mut bytes = [0u8; SEED_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| FairnessError::Entropy(e.to_string()))?;
    Ok(bytes)
}

/// Server seed, kept private until the round it backs has settled.
///
/// Seeds issued by this crate are the lowercase hex rendering of
/// [`SEED_BYTES`] random bytes. Seeds received for verification may be any
/// string, since the commitment is taken over the UTF-8 text.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServerSeed(String);

impl ServerSeed {
    /// Create a new random seed
    pub fn generate() -> Result<Self, FairnessError> {
        Ok(Self(hex::encode(generate_seed()?)))
    }

    /// Wrap a seed revealed by someone else
    pub fn new(seed: impl Into<String>) -> Self {
        Self(seed.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Commitment = SHA256(seed text)
    pub fn commitment(&self) -> ServerSeedHash {
        let mut hasher = Sha256::new();
        hasher.update(self.0.as_bytes());
        ServerSeedHash(hasher.finalize().into())
    }
}

impl fmt::Debug for ServerSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ServerSeed(<{} chars>)", self.0.len())
    }
}

impl fmt::Display for ServerSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Public commitment to a server seed, rendered as 64 lowercase hex chars
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServerSeedHash([u8; 32]);

impl ServerSeedHash {
    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Verify that a revealed seed matches this commitment
    pub fn verify(&self, seed: &ServerSeed) -> bool {
        seed.commitment() == *self
    }
}

impl FromStr for ServerSeedHash {
    type Err = FairnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 64 {
            return Err(FairnessError::field(
                "serverSeedHash",
                format!("expected 64 hex characters, got {}", s.len()),
            ));
        }
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|e| FairnessError::field("serverSeedHash", e.to_string()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Debug for ServerSeedHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ServerSeedHash({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for ServerSeedHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl Serialize for ServerSeedHash {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        self.to_hex().serialize(s)
    }
}

impl<'de> Deserialize<'de> for ServerSeedHash {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let hex_str = String::deserialize(d)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// A freshly issued seed and the commitment published for it
#[derive(Clone, Debug)]
pub struct SeedPair {
    pub server_seed: ServerSeed,
    pub server_seed_hash: ServerSeedHash,
}

/// Generate a seed and commit to it.
///
/// Stateless: the caller owns the pair and must keep the seed private until
/// the round it backs is settled.
pub fn issue_commitment() -> Result<SeedPair, FairnessError> {
    let server_seed = ServerSeed::generate()?;
    let server_seed_hash = server_seed.commitment();
    Ok(SeedPair {
        server_seed,
        server_seed_hash,
    })
}
