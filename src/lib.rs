//! KeySweep - batched secp256k1 HASH160 search engine
//!
//! Brute-force search for private keys whose Bitcoin address digest
//! (HASH160 of the serialized public key) falls in a target set. Each
//! worker lane walks a point along the curve in groups, sharing one batched
//! modular inversion across a whole group of chord additions, then fans
//! every derived point out through the GLV endomorphism and both
//! y-parities: six candidate digests per point for one point addition's
//! work. Matching digests land in a lock-free output buffer and are
//! resolved back to verified private keys host-side.
//!
//! The crate splits into the math stack (`math`), the digest pipeline
//! (`hash160`, `bloom`, `targets`) and the compute kernel (`kernel`), with
//! `config` and `utils` carrying the host plumbing.

#![deny(unsafe_code)]

pub mod bloom;
pub mod config;
pub mod hash160;
pub mod kernel;
pub mod math;
pub mod targets;
pub mod types;
pub mod utils;

// Re-export the main library surface.
pub use config::Config;
pub use kernel::driver::{LaunchResult, SearchEngine};
pub use targets::TargetSet;
pub use types::{Match, MatchRecord, SearchMode, WalkState};
