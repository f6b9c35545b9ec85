//! Launch driver and search engine
//!
//! A launch is one parallel sweep: every lane loads its walk state, runs
//! STEP_SIZE/GRP_SIZE groups through the hash fan-out, and stores the
//! advanced center back. The rayon join at the end of the sweep is the
//! barrier that makes all state writes and match records visible to the
//! host before anything is read.
//!
//! The (mode, target-shape) pair is resolved to a concrete scheme/matcher
//! instantiation once per launch; nothing dispatches inside the walk.

use crate::config::{validate_walk_shape, Config};
use crate::hash160::{hash160_compressed, hash160_uncompressed};
use crate::kernel::hasher::{
    BothScheme, FusedCompressedScheme, HashScheme, SchemeVisitor, UncompressedScheme,
};
use crate::kernel::output::OutputSink;
use crate::kernel::table::GeneratorTable;
use crate::kernel::walk::GroupWalker;
use crate::math::constants::{LAMBDA, LAMBDA2};
use crate::math::curve::mul_generator;
use crate::math::scalar::Scalar;
use crate::targets::{BloomMatcher, ExactMatcher, Matcher, TargetSet};
use crate::types::{Match, MatchRecord, SearchMode, WalkState};
use anyhow::Result;
use log::debug;
use rand::RngCore;
use rayon::prelude::*;

/// Everything one launch produced.
pub struct LaunchResult {
    /// Raw match counter; may exceed the number of stored records.
    pub found: u32,
    /// Decoded records, at most the sink capacity.
    pub records: Vec<MatchRecord>,
    /// Records that survived key recovery and re-verification.
    pub matches: Vec<Match>,
}

impl LaunchResult {
    /// Candidates were dropped because the output buffer filled up.
    pub fn truncated(&self) -> bool {
        self.found as usize > self.records.len()
    }
}

/// Per-lane step loop: walk `groups` consecutive groups, emitting into the
/// scheme fan-out, leaving the advanced center in `state`.
fn compute_keys<S: HashScheme, M: Matcher>(
    states: &mut [WalkState],
    table: &GeneratorTable,
    sink: &OutputSink,
    matcher: &M,
    grp_size: u32,
    groups: u32,
) {
    states.par_iter_mut().enumerate().for_each(|(lane, state)| {
        let mut walker = GroupWalker::new(table);
        let mut visitor = SchemeVisitor::<S, M>::new(matcher, sink, lane as u32);
        for j in 0..groups {
            walker.step(state, (j * grp_size) as i32, &mut visitor);
        }
    });
}

pub struct SearchEngine {
    mode: SearchMode,
    grp_size: u32,
    step_size: u32,
    table: GeneratorTable,
    targets: TargetSet,
    states: Vec<WalkState>,
    start_keys: Vec<Scalar>,
    /// Keys already swept per lane: launches * step_size, as a scalar.
    base_offset: Scalar,
    launches: u64,
    sink: OutputSink,
}

impl SearchEngine {
    /// Build an engine from a validated config. Lane t starts at
    /// base + t * lane_stride.
    pub fn new(config: &Config, targets: TargetSet) -> Result<Self> {
        config.validate()?;
        let base = match &config.start_key {
            Some(hex) => Scalar::from_hex(hex)?,
            None => random_start_key(),
        };
        let start_keys = (0..config.lanes)
            .map(|t| base.add(&Scalar::from_u128(t as u128 * config.lane_stride as u128)))
            .collect();
        Self::from_start_keys(
            config.mode,
            config.grp_size,
            config.step_size,
            config.max_found,
            start_keys,
            targets,
        )
    }

    /// Build an engine with explicit per-lane base keys. Lane t's launch L
    /// covers keys base[t] + L*step .. base[t] + (L+1)*step; the stored
    /// walk state is the group center, half a group above the base.
    pub fn from_start_keys(
        mode: SearchMode,
        grp_size: u32,
        step_size: u32,
        max_found: u32,
        start_keys: Vec<Scalar>,
        targets: TargetSet,
    ) -> Result<Self> {
        validate_walk_shape(grp_size, step_size)?;
        let table = GeneratorTable::new(grp_size as usize);

        let half = Scalar::from_u64(grp_size as u64 / 2);
        let states: Vec<WalkState> = start_keys
            .par_iter()
            .map(|key| {
                let center = mul_generator(&key.add(&half));
                WalkState { x: center.x, y: center.y }
            })
            .collect();
        debug!("initialized {} lane states, group size {}", states.len(), grp_size);

        Ok(SearchEngine {
            mode,
            grp_size,
            step_size,
            table,
            targets,
            states,
            start_keys,
            base_offset: Scalar::ZERO,
            launches: 0,
            sink: OutputSink::new(max_found),
        })
    }

    /// Run one launch: sweep every lane, then decode and resolve matches.
    pub fn launch(&mut self) -> LaunchResult {
        self.sink.reset();
        let groups = self.step_size / self.grp_size;
        let (states, table, sink) = (&mut self.states, &self.table, &self.sink);

        match (self.mode, &self.targets) {
            (SearchMode::Compressed, TargetSet::Bloom { filter, .. }) => {
                compute_keys::<FusedCompressedScheme, _>(
                    states, table, sink, &BloomMatcher::new(filter), self.grp_size, groups,
                )
            }
            (SearchMode::Compressed, TargetSet::Single(h)) => {
                compute_keys::<FusedCompressedScheme, _>(
                    states, table, sink, &ExactMatcher::new(h), self.grp_size, groups,
                )
            }
            (SearchMode::Uncompressed, TargetSet::Bloom { filter, .. }) => {
                compute_keys::<UncompressedScheme, _>(
                    states, table, sink, &BloomMatcher::new(filter), self.grp_size, groups,
                )
            }
            (SearchMode::Uncompressed, TargetSet::Single(h)) => {
                compute_keys::<UncompressedScheme, _>(
                    states, table, sink, &ExactMatcher::new(h), self.grp_size, groups,
                )
            }
            (SearchMode::Both, TargetSet::Bloom { filter, .. }) => {
                compute_keys::<BothScheme, _>(
                    states, table, sink, &BloomMatcher::new(filter), self.grp_size, groups,
                )
            }
            (SearchMode::Both, TargetSet::Single(h)) => {
                compute_keys::<BothScheme, _>(
                    states, table, sink, &ExactMatcher::new(h), self.grp_size, groups,
                )
            }
        }

        let records = self.sink.records();
        let matches = records.iter().filter_map(|r| self.resolve(r)).collect();
        let result = LaunchResult { found: self.sink.match_count(), records, matches };

        self.base_offset = self.base_offset.add(&Scalar::from_u64(self.step_size as u64));
        self.launches += 1;
        result
    }

    /// Recover and verify the private key behind a raw record. The digest
    /// must be in the authoritative target set (this is where Bloom false
    /// positives die). The candidate key is lambda^endo * (base + |incr|);
    /// both it and its negation are re-hashed through the crate's own
    /// pipeline and only an exact digest match is reported.
    pub fn resolve(&self, record: &MatchRecord) -> Option<Match> {
        let digest = record.digest_bytes();
        if !self.targets.contains(&digest) {
            return None;
        }
        let base = self.start_keys.get(record.lane as usize)?.add(&self.base_offset);
        let k0 = base.add(&Scalar::from_u64(record.incr.unsigned_abs() as u64));
        let k1 = match record.endo {
            0 => k0,
            1 => k0.mul(&LAMBDA),
            2 => k0.mul(&LAMBDA2),
            _ => return None,
        };

        for key in [k1, k1.neg()] {
            let point = mul_generator(&key);
            let candidate = if record.compressed {
                hash160_compressed(&point.x, point.y.is_odd())
            } else {
                hash160_uncompressed(&point.x, &point.y)
            };
            if candidate == digest {
                return Some(Match {
                    private_key: key,
                    digest,
                    compressed: record.compressed,
                    lane: record.lane,
                });
            }
        }
        None
    }

    pub fn launches(&self) -> u64 {
        self.launches
    }

    /// Keys walked per launch across all lanes.
    pub fn keys_per_launch(&self) -> u64 {
        self.states.len() as u64 * self.step_size as u64
    }

    pub fn states(&self) -> &[WalkState] {
        &self.states
    }

    pub fn targets(&self) -> &TargetSet {
        &self.targets
    }
}

/// Random 255-bit base key, never zero. This is a search tool: uniformity
/// is all that matters, not unpredictability.
fn random_start_key() -> Scalar {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes[0] &= 0x7F;
    if bytes.iter().all(|&b| b == 0) {
        bytes[31] = 1;
    }
    Scalar::from_bytes_be(&bytes)
}
