//! KeySweep CLI entry point
//!
//! Wires config to engine: load targets, seed the lanes, then launch in a
//! loop, logging throughput and appending verified keys to the found file.

use anyhow::{anyhow, Context, Result};
use keysweep::config::Config;
use keysweep::targets::{loader, TargetSet};
use keysweep::utils::logging::{setup_logging, Throughput};
use keysweep::SearchEngine;
use log::{info, warn};
use std::fs::OpenOptions;
use std::io::Write;

fn main() -> Result<()> {
    setup_logging();
    let config = Config::parse_args()?;

    let targets = load_targets(&config)?;
    let single_target = matches!(targets, TargetSet::Single(_));
    info!(
        "searching {} target(s), mode {}, {} lanes x {} keys/launch",
        targets.len(),
        config.mode,
        config.lanes,
        config.step_size
    );

    let mut engine = SearchEngine::new(&config, targets)?;
    let mut found_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.found_file)
        .with_context(|| format!("opening {}", config.found_file.display()))?;

    let mut meter = Throughput::new(10);
    let mut total_matches = 0u64;

    loop {
        let result = engine.launch();
        if result.truncated() {
            warn!(
                "output buffer overflow: {} candidates, {} slots; reduce step-size or raise max-found",
                result.found,
                result.records.len()
            );
        }

        for m in &result.matches {
            info!("MATCH {}", m);
            writeln!(
                found_file,
                "{} {} {}",
                m.private_key.to_hex(),
                hex::encode(m.digest),
                if m.compressed { "compressed" } else { "uncompressed" }
            )?;
            total_matches += 1;
        }

        meter.record(engine.keys_per_launch());

        if single_target && total_matches > 0 {
            info!("target found after {} launches", engine.launches());
            break;
        }
        if let Some(max) = config.max_launches {
            if engine.launches() >= max {
                info!(
                    "stopping after {} launches, {} keys, {} matches",
                    engine.launches(),
                    meter.keys_total(),
                    total_matches
                );
                break;
            }
        }
    }

    Ok(())
}

fn load_targets(config: &Config) -> Result<TargetSet> {
    if let Some(hex) = &config.target {
        let h = loader::parse_hash160(hex)?;
        return Ok(TargetSet::from_hashes(vec![h], config.bloom_fp_rate));
    }
    if let Some(path) = &config.targets_file {
        return loader::load_target_set(path, config.bloom_fp_rate);
    }
    Err(anyhow!("no targets: give --target or --targets-file"))
}
