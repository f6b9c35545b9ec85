//! 256-bit arithmetic modulo the secp256k1 field prime
//!
//! Elements are four u64 limbs, little-endian, always reduced to [0, p).
//! Multiplication is a 256x256 -> 512-bit schoolbook product followed by a
//! fast reduction exploiting p = 2^256 - c with c = 2^32 + 977: the high
//! half is folded back by a single multiply by c. Inversion is Fermat
//! (a^(p-2)) with a 4-bit window; it costs ~100x a multiplication, which is
//! why callers batch inversions (see `math::batch`).

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// p = 2^256 - 2^32 - 977, little-endian limbs.
pub const P: [u64; 4] = [
    0xFFFFFFFEFFFFFC2F,
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
];

/// c = 2^256 - p = 2^32 + 977. Fits in 33 bits, so hi*c is at most 289 bits.
const C: u64 = 0x1000003D1;

/// p - 2, the Fermat inversion exponent.
const P_MINUS_2: [u64; 4] = [
    0xFFFFFFFEFFFFFC2D,
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
];

/// Field element in [0, p), four u64 limbs little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldElement(pub [u64; 4]);

impl FieldElement {
    pub const ZERO: FieldElement = FieldElement([0; 4]);
    pub const ONE: FieldElement = FieldElement([1, 0, 0, 0]);

    pub fn from_u64(v: u64) -> Self {
        FieldElement([v, 0, 0, 0])
    }

    /// Parse a big-endian hex string (up to 64 digits). The value must be
    /// below p.
    pub fn from_hex(s: &str) -> Result<Self> {
        let limbs = limbs_from_hex(s)?;
        if ge(&limbs, &P) {
            return Err(anyhow!("field element out of range: {}", s));
        }
        Ok(FieldElement(limbs))
    }

    /// Interpret 32 big-endian bytes. The caller guarantees the value is
    /// below p (curve coordinates always are).
    pub fn from_bytes_be(bytes: &[u8; 32]) -> Self {
        FieldElement(limbs_from_bytes_be(bytes))
    }

    pub fn to_bytes_be(&self) -> [u8; 32] {
        limbs_to_bytes_be(&self.0)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes_be())
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0; 4]
    }

    pub fn is_odd(&self) -> bool {
        self.0[0] & 1 == 1
    }

    pub fn add(&self, rhs: &Self) -> Self {
        let (sum, carry) = add_u256(&self.0, &rhs.0);
        if carry != 0 || ge(&sum, &P) {
            FieldElement(sub_u256(&sum, &P).0)
        } else {
            FieldElement(sum)
        }
    }

    pub fn sub(&self, rhs: &Self) -> Self {
        let (diff, borrow) = sub_u256(&self.0, &rhs.0);
        if borrow != 0 {
            FieldElement(add_u256(&diff, &P).0)
        } else {
            FieldElement(diff)
        }
    }

    pub fn neg(&self) -> Self {
        if self.is_zero() {
            *self
        } else {
            FieldElement(sub_u256(&P, &self.0).0)
        }
    }

    pub fn mul(&self, rhs: &Self) -> Self {
        FieldElement(reduce_wide(mul_wide(&self.0, &rhs.0)))
    }

    pub fn sqr(&self) -> Self {
        FieldElement(reduce_wide(mul_wide(&self.0, &self.0)))
    }

    /// Modular inverse via a^(p-2). Undefined for zero.
    pub fn inv(&self) -> Self {
        debug_assert!(!self.is_zero(), "inverse of zero");
        self.pow(&P_MINUS_2)
    }

    /// 4-bit windowed exponentiation.
    fn pow(&self, exp: &[u64; 4]) -> Self {
        let mut table = [Self::ONE; 16];
        table[1] = *self;
        for i in 2..16 {
            table[i] = table[i - 1].mul(self);
        }

        let mut acc = Self::ONE;
        let mut started = false;
        for limb in exp.iter().rev() {
            for nibble in (0..16).rev() {
                let w = ((limb >> (nibble * 4)) & 0xF) as usize;
                if started {
                    acc = acc.sqr().sqr().sqr().sqr();
                    if w != 0 {
                        acc = acc.mul(&table[w]);
                    }
                } else if w != 0 {
                    acc = table[w];
                    started = true;
                }
            }
        }
        acc
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

/// Reduce a 512-bit product modulo p by folding the high half down twice.
fn reduce_wide(t: [u64; 8]) -> [u64; 4] {
    // First fold: r = lo + hi * c, at most 290 bits.
    let mut r = [0u64; 5];
    let mut carry: u128 = 0;
    for i in 0..4 {
        let v = t[i] as u128 + t[i + 4] as u128 * C as u128 + carry;
        r[i] = v as u64;
        carry = v >> 64;
    }
    r[4] = carry as u64;

    // Second fold: out = r[0..4] + r[4] * c; r[4] < 2^34 so the product fits
    // comfortably and the carry-out is at most one bit.
    let mut out = [0u64; 4];
    let mut carry = r[4] as u128 * C as u128;
    for i in 0..4 {
        let v = r[i] as u128 + (carry & u64::MAX as u128);
        out[i] = v as u64;
        carry = (carry >> 64) + (v >> 64);
    }

    // A wrap past 2^256 is congruent to adding c once more; the remaining
    // value is tiny so this cannot carry again.
    if carry != 0 {
        let mut c2 = C as u128;
        for limb in out.iter_mut() {
            let v = *limb as u128 + (c2 & u64::MAX as u128);
            *limb = v as u64;
            c2 = (c2 >> 64) + (v >> 64);
            if c2 == 0 {
                break;
            }
        }
    }

    if ge(&out, &P) {
        sub_u256(&out, &P).0
    } else {
        out
    }
}

// ---------------------------------------------------------------------------
// Raw limb helpers, shared with the scalar field.
// ---------------------------------------------------------------------------

/// 256x256 -> 512-bit schoolbook multiply.
pub(crate) fn mul_wide(a: &[u64; 4], b: &[u64; 4]) -> [u64; 8] {
    let mut t = [0u64; 8];
    for i in 0..4 {
        let mut carry: u128 = 0;
        for j in 0..4 {
            let v = t[i + j] as u128 + a[i] as u128 * b[j] as u128 + carry;
            t[i + j] = v as u64;
            carry = v >> 64;
        }
        t[i + 4] = carry as u64;
    }
    t
}

/// a + b, returning (sum, carry).
pub(crate) fn add_u256(a: &[u64; 4], b: &[u64; 4]) -> ([u64; 4], u64) {
    let mut r = [0u64; 4];
    let mut carry: u128 = 0;
    for i in 0..4 {
        let v = a[i] as u128 + b[i] as u128 + carry;
        r[i] = v as u64;
        carry = v >> 64;
    }
    (r, carry as u64)
}

/// a - b, returning (difference, borrow), wrapping mod 2^256.
pub(crate) fn sub_u256(a: &[u64; 4], b: &[u64; 4]) -> ([u64; 4], u64) {
    let mut r = [0u64; 4];
    let mut borrow: u64 = 0;
    for i in 0..4 {
        let (d, b1) = a[i].overflowing_sub(b[i]);
        let (d, b2) = d.overflowing_sub(borrow);
        r[i] = d;
        borrow = (b1 as u64) + (b2 as u64);
    }
    (r, borrow)
}

/// a >= b on raw limbs.
pub(crate) fn ge(a: &[u64; 4], b: &[u64; 4]) -> bool {
    for i in (0..4).rev() {
        if a[i] != b[i] {
            return a[i] > b[i];
        }
    }
    true
}

pub(crate) fn limbs_from_bytes_be(bytes: &[u8; 32]) -> [u64; 4] {
    let mut limbs = [0u64; 4];
    for i in 0..4 {
        let off = (3 - i) * 8;
        limbs[i] = u64::from_be_bytes([
            bytes[off],
            bytes[off + 1],
            bytes[off + 2],
            bytes[off + 3],
            bytes[off + 4],
            bytes[off + 5],
            bytes[off + 6],
            bytes[off + 7],
        ]);
    }
    limbs
}

pub(crate) fn limbs_to_bytes_be(limbs: &[u64; 4]) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    for i in 0..4 {
        bytes[i * 8..(i + 1) * 8].copy_from_slice(&limbs[3 - i].to_be_bytes());
    }
    bytes
}

/// Parse up to 64 hex digits, big-endian, left-padded with zeros.
pub(crate) fn limbs_from_hex(s: &str) -> Result<[u64; 4]> {
    let s = s.trim().trim_start_matches("0x");
    if s.is_empty() || s.len() > 64 {
        return Err(anyhow!("expected 1..=64 hex digits, got {}", s.len()));
    }
    let mut padded = String::with_capacity(64);
    for _ in 0..64 - s.len() {
        padded.push('0');
    }
    padded.push_str(s);
    let bytes = hex::decode(&padded)?;
    let mut arr = [0u8; 32];
    arr.copy_from_slice(&bytes);
    Ok(limbs_from_bytes_be(&arr))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        let a = FieldElement::from_hex(
            "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
        )
        .unwrap();
        assert_eq!(
            a.to_hex(),
            "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
        assert!(FieldElement::from_hex(super::super::constants::FIELD_PRIME).is_err());
        assert!(FieldElement::from_hex("").is_err());
    }

    #[test]
    fn add_sub_neg() {
        let a = FieldElement::from_u64(1000);
        let b = FieldElement::from_u64(999);
        assert_eq!(a.sub(&b), FieldElement::ONE);
        assert_eq!(b.sub(&a), FieldElement::ONE.neg());
        assert_eq!(a.add(&a.neg()), FieldElement::ZERO);
        // Wrap across p: (p - 1) + 2 == 1.
        let pm1 = FieldElement::ZERO.sub(&FieldElement::ONE);
        assert_eq!(pm1.add(&FieldElement::from_u64(2)), FieldElement::ONE);
    }

    #[test]
    fn mul_small() {
        // 0xFFFFFFFF * (2^32 + 1) = 0xFFFFFFFFFFFFFFFF
        let a = FieldElement::from_u64(0xFFFF_FFFF);
        let b = FieldElement::from_u64(0x1_0000_0001);
        assert_eq!(a.mul(&b), FieldElement([u64::MAX, 0, 0, 0]));
        assert_eq!(a.mul(&FieldElement::ONE), a);
        assert_eq!(a.mul(&FieldElement::ZERO), FieldElement::ZERO);
    }

    #[test]
    fn mul_wraps_at_prime() {
        // (p - 1)^2 == 1 mod p since p - 1 == -1.
        let pm1 = FieldElement::ZERO.sub(&FieldElement::ONE);
        assert_eq!(pm1.sqr(), FieldElement::ONE);
        assert_eq!(pm1.mul(&pm1), FieldElement::ONE);
    }

    #[test]
    fn inverse_round_trip() {
        for v in [1u64, 2, 3, 977, 0xDEADBEEF] {
            let a = FieldElement::from_u64(v);
            assert_eq!(a.inv().mul(&a), FieldElement::ONE);
        }
        let g = FieldElement::from_hex(super::super::constants::GENERATOR_X).unwrap();
        assert_eq!(g.inv().mul(&g), FieldElement::ONE);
        assert_eq!(g.inv().inv(), g);
    }

    #[test]
    fn parity() {
        assert!(FieldElement::ONE.is_odd());
        assert!(!FieldElement::from_u64(4).is_odd());
    }
}
