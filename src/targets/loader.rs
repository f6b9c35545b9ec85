//! Target list loading
//!
//! Reads HASH160 targets as 40-hex-digit lines. Blank lines and `#`
//! comments are skipped; anything else that fails to parse aborts the load
//! so a truncated file never silently shrinks the search.

use crate::targets::TargetSet;
use anyhow::{anyhow, Context, Result};
use log::info;
use std::fs;
use std::path::Path;

/// Parse one 40-hex-digit HASH160.
pub fn parse_hash160(s: &str) -> Result<[u8; 20]> {
    let s = s.trim().trim_start_matches("0x");
    if s.len() != 40 {
        return Err(anyhow!("expected 40 hex digits, got {} in {:?}", s.len(), s));
    }
    let bytes = hex::decode(s).with_context(|| format!("invalid hex in {:?}", s))?;
    let mut h = [0u8; 20];
    h.copy_from_slice(&bytes);
    Ok(h)
}

/// Load a HASH160-per-line target file.
pub fn load_hash160_file(path: &Path) -> Result<Vec<[u8; 20]>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading target file {}", path.display()))?;

    let mut hashes = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let h = parse_hash160(line)
            .with_context(|| format!("{}:{}", path.display(), lineno + 1))?;
        hashes.push(h);
    }
    if hashes.is_empty() {
        return Err(anyhow!("no targets in {}", path.display()));
    }
    Ok(hashes)
}

/// Load a target file and build the matching set shape.
pub fn load_target_set(path: &Path, fp_rate: f64) -> Result<TargetSet> {
    let hashes = load_hash160_file(path)?;
    info!("loaded {} HASH160 targets from {}", hashes.len(), path.display());
    Ok(TargetSet::from_hashes(hashes, fp_rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_plain_and_prefixed() {
        let h = parse_hash160("751e76e8199196d454941c45d1b3a323f1433bd6").unwrap();
        assert_eq!(h[0], 0x75);
        assert_eq!(h[19], 0xd6);
        assert_eq!(parse_hash160("0x751e76e8199196d454941c45d1b3a323f1433bd6").unwrap(), h);
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(parse_hash160("deadbeef").is_err());
        assert!(parse_hash160("zz1e76e8199196d454941c45d1b3a323f1433bd6").is_err());
        assert!(parse_hash160("").is_err());
    }

    #[test]
    fn file_round_trip() {
        let dir = std::env::temp_dir();
        let path = dir.join("keysweep_targets_test.txt");
        std::fs::write(
            &path,
            "# comment\n751e76e8199196d454941c45d1b3a323f1433bd6\n\n91b24bf9f5288532960ac687abb035127b1d28a5\n",
        )
        .unwrap();
        let hashes = load_hash160_file(&path).unwrap();
        assert_eq!(hashes.len(), 2);
        std::fs::remove_file(&path).ok();
    }
}
