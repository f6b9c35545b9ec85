//! Configuration for KeySweep
//!
//! clap::Parser struct with defaults and validation. The walk-shape
//! parameters (group size, step size) are negotiated here and checked
//! before any engine is built.

use crate::types::SearchMode;
use anyhow::{anyhow, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// KeySweep - batched secp256k1 HASH160 search engine
#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Serializations to hash: compressed, uncompressed or both
    #[arg(long, default_value = "compressed")]
    pub mode: SearchMode,

    /// File of HASH160 targets, one 40-hex-digit line each
    #[arg(long)]
    pub targets_file: Option<PathBuf>,

    /// Single HASH160 target (40 hex digits)
    #[arg(long)]
    pub target: Option<String>,

    /// Base private key in hex; random when omitted
    #[arg(long)]
    pub start_key: Option<String>,

    /// Number of worker lanes, each owning a walk state
    #[arg(long, default_value = "512")]
    pub lanes: usize,

    /// Points per walk group (even, batch-inversion unit)
    #[arg(long, default_value = "1024")]
    pub grp_size: u32,

    /// Points per lane per launch (multiple of grp-size, at most 32767)
    #[arg(long, default_value = "2048")]
    pub step_size: u32,

    /// Match-slot capacity of the output buffer
    #[arg(long, default_value = "4096")]
    pub max_found: u32,

    /// Key spacing between lanes
    #[arg(long, default_value = "4294967296")]
    pub lane_stride: u64,

    /// Bloom filter false-positive rate for multi-target runs
    #[arg(long, default_value = "1e-8")]
    pub bloom_fp_rate: f64,

    /// File verified keys are appended to
    #[arg(long, default_value = "found.txt")]
    pub found_file: PathBuf,

    /// Stop after this many launches (run forever when omitted)
    #[arg(long)]
    pub max_launches: Option<u64>,
}

impl Config {
    /// Parse command line arguments.
    pub fn parse_args() -> Result<Self> {
        let config = <Self as Parser>::parse();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validate_walk_shape(self.grp_size, self.step_size)?;

        if self.lanes == 0 {
            return Err(anyhow!("lanes must be > 0"));
        }
        if self.max_found == 0 {
            return Err(anyhow!("max-found must be > 0"));
        }
        if self.lane_stride < self.step_size as u64 {
            return Err(anyhow!(
                "lane-stride {} smaller than step-size {}; lanes would overlap after one launch",
                self.lane_stride,
                self.step_size
            ));
        }
        if !(self.bloom_fp_rate > 0.0 && self.bloom_fp_rate < 0.5) {
            return Err(anyhow!("bloom-fp-rate must be in (0, 0.5)"));
        }
        if self.target.is_some() && self.targets_file.is_some() {
            return Err(anyhow!("give either --target or --targets-file, not both"));
        }
        Ok(())
    }
}

/// Shared walk-shape checks, also applied when engines are built directly.
pub fn validate_walk_shape(grp_size: u32, step_size: u32) -> Result<()> {
    if grp_size < 4 || grp_size % 2 != 0 {
        return Err(anyhow!("grp-size must be even and >= 4, got {}", grp_size));
    }
    if step_size == 0 || step_size % grp_size != 0 {
        return Err(anyhow!(
            "step-size {} must be a positive multiple of grp-size {}",
            step_size,
            grp_size
        ));
    }
    // Increments are packed into 16 signed bits of the match meta word.
    if step_size > i16::MAX as u32 {
        return Err(anyhow!("step-size {} exceeds {}", step_size, i16::MAX));
    }
    Ok(())
}
