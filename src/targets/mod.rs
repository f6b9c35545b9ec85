//! Target sets and digest matching
//!
//! Two shapes: a single exact HASH160, or a Bloom filter over many targets
//! with the authoritative set kept alongside for resolution. The matcher
//! trait is what the walk kernel is generic over, so the membership test
//! monomorphizes into the hash fan-out with no dispatch in the hot loop.

pub mod loader;

use crate::bloom::BloomFilter;
use std::collections::HashSet;

/// Digest membership test used inside the kernel.
pub trait Matcher: Sync {
    fn matches(&self, digest: &[u8; 20]) -> bool;
}

/// Exact 160-bit comparison for single-target searches.
pub struct ExactMatcher {
    target: [u8; 20],
}

impl ExactMatcher {
    pub fn new(target: &[u8; 20]) -> Self {
        ExactMatcher { target: *target }
    }
}

impl Matcher for ExactMatcher {
    #[inline]
    fn matches(&self, digest: &[u8; 20]) -> bool {
        *digest == self.target
    }
}

/// Bloom probe for multi-target searches; false positives are expected and
/// culled during resolution.
pub struct BloomMatcher<'a> {
    filter: &'a BloomFilter,
}

impl<'a> BloomMatcher<'a> {
    pub fn new(filter: &'a BloomFilter) -> Self {
        BloomMatcher { filter }
    }
}

impl Matcher for BloomMatcher<'_> {
    #[inline]
    fn matches(&self, digest: &[u8; 20]) -> bool {
        self.filter.contains(digest)
    }
}

/// The full target description handed to the engine.
pub enum TargetSet {
    /// One exact digest.
    Single([u8; 20]),
    /// Bloom filter plus the authoritative member set.
    Bloom {
        filter: BloomFilter,
        members: HashSet<[u8; 20]>,
    },
}

impl TargetSet {
    /// Build the right shape for a target list: one entry gets the exact
    /// matcher, more get a Bloom filter sized for `fp_rate`.
    pub fn from_hashes(hashes: Vec<[u8; 20]>, fp_rate: f64) -> Self {
        if hashes.len() == 1 {
            return TargetSet::Single(hashes[0]);
        }
        let mut filter = BloomFilter::with_rate(hashes.len(), fp_rate);
        let mut members = HashSet::with_capacity(hashes.len());
        for h in hashes {
            filter.insert(&h);
            members.insert(h);
        }
        TargetSet::Bloom { filter, members }
    }

    pub fn len(&self) -> usize {
        match self {
            TargetSet::Single(_) => 1,
            TargetSet::Bloom { members, .. } => members.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Authoritative membership, used when resolving raw match records.
    pub fn contains(&self, digest: &[u8; 20]) -> bool {
        match self {
            TargetSet::Single(h) => h == digest,
            TargetSet::Bloom { members, .. } => members.contains(digest),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_target_shape() {
        let h = [0xABu8; 20];
        let set = TargetSet::from_hashes(vec![h], 0.01);
        assert!(matches!(set, TargetSet::Single(_)));
        assert!(set.contains(&h));
        assert!(!set.contains(&[0u8; 20]));

        let m = ExactMatcher::new(&h);
        assert!(m.matches(&h));
        assert!(!m.matches(&[0u8; 20]));
    }

    #[test]
    fn multi_target_shape() {
        let hashes: Vec<[u8; 20]> = (0u8..5).map(|i| [i; 20]).collect();
        let set = TargetSet::from_hashes(hashes.clone(), 0.001);
        assert_eq!(set.len(), 5);
        match &set {
            TargetSet::Bloom { filter, members } => {
                let m = BloomMatcher::new(filter);
                for h in &hashes {
                    assert!(m.matches(h));
                    assert!(members.contains(h));
                }
            }
            TargetSet::Single(_) => panic!("expected bloom shape"),
        }
    }
}
