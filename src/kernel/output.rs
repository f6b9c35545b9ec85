//! Lock-free match output buffer
//!
//! A flat array of u32 words shared by every lane. Word 0 is the match
//! counter; each record occupies ITEM_SIZE32 words. A lane reserves a slot
//! with a fetch-add on the counter and then writes it alone, so no two
//! lanes touch the same slot. Reservations past capacity are dropped but
//! still counted, letting the host detect overflow from the final counter.
//!
//! Record ordering inside the buffer is whatever the counter race produced;
//! consumers must not assume any.

use crate::hash160::words_to_digest;
use crate::types::MatchRecord;
use std::sync::atomic::{AtomicU32, Ordering};

/// Words per match slot: lane id, meta, five digest words, one pad word.
pub const ITEM_SIZE32: usize = 8;

/// Meta layout: bits 31..16 signed increment, bit 15 compressed flag,
/// bits 14..0 endomorphism index.
pub fn pack_meta(incr: i32, compressed: bool, endo: u8) -> u32 {
    ((incr as u32) << 16) | ((compressed as u32) << 15) | (endo as u32 & 0x7FFF)
}

pub fn unpack_meta(meta: u32) -> (i32, bool, u8) {
    let incr = (meta >> 16) as u16 as i16 as i32;
    let compressed = meta & 0x8000 != 0;
    let endo = (meta & 0x7FFF) as u8;
    (incr, compressed, endo)
}

pub struct OutputSink {
    words: Box<[AtomicU32]>,
    max_found: u32,
}

impl OutputSink {
    pub fn new(max_found: u32) -> Self {
        let len = 1 + max_found as usize * ITEM_SIZE32;
        let words = (0..len).map(|_| AtomicU32::new(0)).collect();
        OutputSink { words, max_found }
    }

    /// Zero the counter before a launch. Slot contents are left stale; the
    /// counter gates which slots are read back.
    pub fn reset(&self) {
        self.words[0].store(0, Ordering::Relaxed);
    }

    /// Record a match. The counter increment reserves the slot; the host
    /// only reads after the launch joins, so relaxed ordering suffices.
    pub fn report(&self, lane: u32, meta: u32, digest: &[u32; 5]) {
        let pos = self.words[0].fetch_add(1, Ordering::Relaxed);
        if pos < self.max_found {
            let base = 1 + pos as usize * ITEM_SIZE32;
            self.words[base].store(lane, Ordering::Relaxed);
            self.words[base + 1].store(meta, Ordering::Relaxed);
            for (i, &w) in digest.iter().enumerate() {
                self.words[base + 2 + i].store(w, Ordering::Relaxed);
            }
        }
    }

    /// Raw counter value; may exceed capacity.
    pub fn match_count(&self) -> u32 {
        self.words[0].load(Ordering::Relaxed)
    }

    pub fn capacity(&self) -> u32 {
        self.max_found
    }

    /// More matches were produced than the buffer could hold.
    pub fn overflowed(&self) -> bool {
        self.match_count() > self.max_found
    }

    /// Decode the populated slots.
    pub fn records(&self) -> Vec<MatchRecord> {
        let stored = self.match_count().min(self.max_found);
        (0..stored as usize)
            .map(|slot| {
                let base = 1 + slot * ITEM_SIZE32;
                let lane = self.words[base].load(Ordering::Relaxed);
                let meta = self.words[base + 1].load(Ordering::Relaxed);
                let (incr, compressed, endo) = unpack_meta(meta);
                let mut digest = [0u32; 5];
                for (i, w) in digest.iter_mut().enumerate() {
                    *w = self.words[base + 2 + i].load(Ordering::Relaxed);
                }
                MatchRecord { lane, incr, compressed, endo, digest }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash160::digest_words;

    #[test]
    fn meta_round_trip() {
        for incr in [-2048i32, -1, 0, 1, 513, 32767] {
            for compressed in [false, true] {
                for endo in [0u8, 1, 2] {
                    let meta = pack_meta(incr, compressed, endo);
                    assert_eq!(unpack_meta(meta), (incr, compressed, endo));
                }
            }
        }
    }

    #[test]
    fn meta_bit_positions() {
        // incr 1, compressed, endo 2 -> 0x0001_8002.
        assert_eq!(pack_meta(1, true, 2), 0x0001_8002);
        assert_eq!(pack_meta(-1, false, 0), 0xFFFF_0000);
    }

    #[test]
    fn report_and_decode() {
        let sink = OutputSink::new(4);
        let digest = digest_words(&[7u8; 20]);
        sink.report(3, pack_meta(-5, true, 1), &digest);
        let recs = sink.records();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].lane, 3);
        assert_eq!(recs[0].incr, -5);
        assert!(recs[0].compressed);
        assert_eq!(recs[0].endo, 1);
        assert_eq!(recs[0].digest_bytes(), [7u8; 20]);
    }

    #[test]
    fn overflow_counts_but_drops() {
        let sink = OutputSink::new(2);
        let digest = [0u32; 5];
        for i in 0..5 {
            sink.report(i, pack_meta(i as i32, false, 0), &digest);
        }
        assert_eq!(sink.match_count(), 5);
        assert!(sink.overflowed());
        assert_eq!(sink.records().len(), 2);

        sink.reset();
        assert_eq!(sink.match_count(), 0);
        assert!(!sink.overflowed());
        assert!(sink.records().is_empty());
    }
}
