//! Round digest: SHA256("{client_seed}-{server_seed}-{nonce}").

use sha2::{Digest, Sha256};
use std::fmt;

/// SHA-256 of the hyphen-joined round inputs.
///
/// Game outcomes are read from leading hex characters of the digest. Slices
/// are taken nibble-wise from the raw bytes, which is equivalent to parsing
/// the corresponding characters of the lowercase hex string.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoundDigest([u8; 32]);

impl RoundDigest {
    /// Number of hex characters in a rendered digest
    pub const HEX_LEN: usize = 64;

    pub fn compute(client_seed: &str, server_seed: &str, nonce: u64) -> Self {
        let combined = format!("{}-{}-{}", client_seed, server_seed, nonce);
        let mut hasher = Sha256::new();
        hasher.update(combined.as_bytes());
        Self(hasher.finalize().into())
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Value of hex characters `start..end`, read as one unsigned integer.
    ///
    /// At most 16 characters fit in the result.
    pub fn hex_slice(&self, start: usize, end: usize) -> u64 {
        debug_assert!(start <= end && end <= Self::HEX_LEN && end - start <= 16);
        (start..end).fold(0u64, |acc, i| (acc << 4) | u64::from(self.nibble(i)))
    }

    fn nibble(&self, index: usize) -> u8 {
        let byte = self.0[index / 2];
        if index % 2 == 0 {
            byte >> 4
        } else {
            byte & 0x0f
        }
    }
}

impl fmt::Debug for RoundDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RoundDigest({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for RoundDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
