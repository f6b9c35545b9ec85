//! HASH160 pipeline
//!
//! Serialize a public key point (33-byte compressed or 65-byte
//! uncompressed), SHA-256 it, then RIPEMD-160 the digest. The paired
//! variant produces both parity digests from one serialization, which the
//! compressed fast path uses: the 0x02 and 0x03 encodings of the same x are
//! the digests of a key and its negation, so one call covers +k and -k.

use crate::math::field::FieldElement;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// RIPEMD-160(SHA-256(data)).
pub fn hash160(data: &[u8]) -> [u8; 20] {
    let sha = Sha256::digest(data);
    Ripemd160::digest(sha).into()
}

/// HASH160 of the compressed encoding of (x, y) given y's parity.
pub fn hash160_compressed(x: &FieldElement, y_is_odd: bool) -> [u8; 20] {
    let mut buf = [0u8; 33];
    buf[0] = if y_is_odd { 0x03 } else { 0x02 };
    buf[1..].copy_from_slice(&x.to_bytes_be());
    hash160(&buf)
}

/// HASH160 of the uncompressed encoding of (x, y).
pub fn hash160_uncompressed(x: &FieldElement, y: &FieldElement) -> [u8; 20] {
    let mut buf = [0u8; 65];
    buf[0] = 0x04;
    buf[1..33].copy_from_slice(&x.to_bytes_be());
    buf[33..].copy_from_slice(&y.to_bytes_be());
    hash160(&buf)
}

/// Both compressed digests sharing one x serialization: (even-y, odd-y).
/// One of the pair belongs to the point, the other to its negation; the
/// caller reports them with opposite increment signs and lets key recovery
/// sort out which is which.
pub fn hash160_compressed_pair(x: &FieldElement) -> ([u8; 20], [u8; 20]) {
    let mut buf = [0u8; 33];
    buf[0] = 0x02;
    buf[1..].copy_from_slice(&x.to_bytes_be());
    let even = hash160(&buf);
    buf[0] = 0x03;
    let odd = hash160(&buf);
    (even, odd)
}

/// View a digest as five little-endian u32 words, the match-record layout.
pub fn digest_words(h: &[u8; 20]) -> [u32; 5] {
    let mut w = [0u32; 5];
    for i in 0..5 {
        w[i] = u32::from_le_bytes([h[i * 4], h[i * 4 + 1], h[i * 4 + 2], h[i * 4 + 3]]);
    }
    w
}

/// Inverse of [`digest_words`].
pub fn words_to_digest(w: &[u32; 5]) -> [u8; 20] {
    let mut h = [0u8; 20];
    for i in 0..5 {
        h[i * 4..(i + 1) * 4].copy_from_slice(&w[i].to_le_bytes());
    }
    h
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::curve::AffinePoint;
    use hex_literal::hex;

    #[test]
    fn key_one_digests() {
        // Private key 1: the generator itself, both classic digests.
        let g = AffinePoint::generator();
        assert_eq!(
            hash160_compressed(&g.x, g.y.is_odd()),
            hex!("751e76e8199196d454941c45d1b3a323f1433bd6")
        );
        assert_eq!(
            hash160_uncompressed(&g.x, &g.y),
            hex!("91b24bf9f5288532960ac687abb035127b1d28a5")
        );
    }

    #[test]
    fn pair_matches_singles() {
        let g = AffinePoint::generator();
        let (even, odd) = hash160_compressed_pair(&g.x);
        assert_eq!(even, hash160_compressed(&g.x, false));
        assert_eq!(odd, hash160_compressed(&g.x, true));
        assert_ne!(even, odd);
    }

    #[test]
    fn negation_flips_parity_digest() {
        // hash(-P) compressed is the opposite-parity digest of P.
        let g = AffinePoint::generator();
        let neg = g.negate();
        assert_eq!(
            hash160_compressed(&neg.x, neg.y.is_odd()),
            hash160_compressed(&g.x, !g.y.is_odd())
        );
    }

    #[test]
    fn words_round_trip() {
        let h = hex!("91b24bf9f5288532960ac687abb035127b1d28a5");
        assert_eq!(words_to_digest(&digest_words(&h)), h);
        // Little-endian word packing, as stored in match records.
        assert_eq!(digest_words(&h)[0], u32::from_le_bytes([0x91, 0xb2, 0x4b, 0xf9]));
    }
}
