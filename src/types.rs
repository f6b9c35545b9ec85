//! Shared types for KeySweep
//!
//! The per-lane walk state, search-mode selector, raw match records as the
//! kernel emits them, and resolved (verified) matches.

use crate::math::field::FieldElement;
use crate::math::scalar::Scalar;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which serializations each emitted point is hashed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SearchMode {
    /// Compressed keys only; runs the fused-parity fast path.
    #[default]
    Compressed,
    /// Uncompressed keys only.
    Uncompressed,
    /// Both serializations per point.
    Both,
}

impl FromStr for SearchMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "compressed" => Ok(SearchMode::Compressed),
            "uncompressed" => Ok(SearchMode::Uncompressed),
            "both" => Ok(SearchMode::Both),
            _ => Err(anyhow!("unknown search mode: {} (compressed|uncompressed|both)", s)),
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Compressed => write!(f, "compressed"),
            SearchMode::Uncompressed => write!(f, "uncompressed"),
            SearchMode::Both => write!(f, "both"),
        }
    }
}

/// Per-lane walk state: the affine coordinates of the current group center.
/// Owned exclusively by one lane; the engine stores one per lane and the
/// kernel writes the advanced center back after each launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkState {
    pub x: FieldElement,
    pub y: FieldElement,
}

/// Raw match record as decoded from the output buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Lane that produced the match.
    pub lane: u32,
    /// Signed key offset from the lane's launch-base key. Negative means
    /// the digest belongs to the negated point.
    pub incr: i32,
    /// Compressed (true) or uncompressed (false) serialization.
    pub compressed: bool,
    /// Endomorphism index 0..=2: digest of x, beta*x or beta^2*x.
    pub endo: u8,
    /// HASH160 digest, five little-endian u32 words.
    pub digest: [u32; 5],
}

impl MatchRecord {
    pub fn digest_bytes(&self) -> [u8; 20] {
        crate::hash160::words_to_digest(&self.digest)
    }
}

/// A resolved, re-verified match: the private key really does hash to the
/// target digest under the recorded serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub private_key: Scalar,
    pub digest: [u8; 20],
    pub compressed: bool,
    pub lane: u32,
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "key {} -> hash160 {} ({})",
            self.private_key.to_hex(),
            hex::encode(self.digest),
            if self.compressed { "compressed" } else { "uncompressed" },
        )
    }
}
