//! Arithmetic modulo the secp256k1 group order
//!
//! Private-key bookkeeping: walk-state setup, increment application and the
//! lambda multiplications of endomorphism key recovery. Same limb layout as
//! the field; reduction folds with c_n = 2^256 - n (129 bits), iterating
//! until the high half clears.

use crate::math::field::{add_u256, ge, limbs_from_bytes_be, limbs_from_hex, limbs_to_bytes_be, mul_wide, sub_u256};
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// n, little-endian limbs.
pub const N: [u64; 4] = [
    0xBFD25E8CD0364141,
    0xBAAEDCE6AF48A03B,
    0xFFFFFFFFFFFFFFFE,
    0xFFFFFFFFFFFFFFFF,
];

/// c_n = 2^256 - n.
const C_N: [u64; 3] = [0x402DA1732FC9BEBF, 0x4551231950B75FC3, 0x0000000000000001];

/// Scalar in [0, n), four u64 limbs little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scalar(pub [u64; 4]);

impl Scalar {
    pub const ZERO: Scalar = Scalar([0; 4]);
    pub const ONE: Scalar = Scalar([1, 0, 0, 0]);

    pub fn from_u64(v: u64) -> Self {
        Scalar([v, 0, 0, 0])
    }

    pub fn from_u128(v: u128) -> Self {
        Scalar([v as u64, (v >> 64) as u64, 0, 0])
    }

    /// Parse a big-endian hex string (up to 64 digits), value below n.
    pub fn from_hex(s: &str) -> Result<Self> {
        let limbs = limbs_from_hex(s)?;
        if ge(&limbs, &N) {
            return Err(anyhow!("scalar out of range: {}", s));
        }
        Ok(Scalar(limbs))
    }

    /// Interpret 32 big-endian bytes, reducing mod n.
    pub fn from_bytes_be(bytes: &[u8; 32]) -> Self {
        let mut limbs = limbs_from_bytes_be(bytes);
        while ge(&limbs, &N) {
            limbs = sub_u256(&limbs, &N).0;
        }
        Scalar(limbs)
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

    /// Bit i, little-endian.
    pub fn bit(&self, i: usize) -> bool {
        (self.0[i / 64] >> (i % 64)) & 1 == 1
    }

    pub fn add(&self, rhs: &Self) -> Self {
        let (sum, carry) = add_u256(&self.0, &rhs.0);
        if carry != 0 || ge(&sum, &N) {
            Scalar(sub_u256(&sum, &N).0)
        } else {
            Scalar(sum)
        }
    }

    pub fn sub(&self, rhs: &Self) -> Self {
        let (diff, borrow) = sub_u256(&self.0, &rhs.0);
        if borrow != 0 {
            Scalar(add_u256(&diff, &N).0)
        } else {
            Scalar(diff)
        }
    }

    pub fn neg(&self) -> Self {
        if self.is_zero() {
            *self
        } else {
            Scalar(sub_u256(&N, &self.0).0)
        }
    }

    /// Apply a signed offset, as carried in match records.
    pub fn add_signed(&self, offset: i64) -> Self {
        if offset >= 0 {
            self.add(&Scalar::from_u64(offset as u64))
        } else {
            self.sub(&Scalar::from_u64(offset.unsigned_abs()))
        }
    }

    pub fn mul(&self, rhs: &Self) -> Self {
        Scalar(reduce_wide(mul_wide(&self.0, &rhs.0)))
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

/// Reduce a 512-bit product modulo n. Each pass rewrites the value as
/// lo + hi * c_n; c_n is 129 bits so the high half shrinks fast and the
/// loop settles within four passes.
fn reduce_wide(mut t: [u64; 8]) -> [u64; 4] {
    while t[4] != 0 || t[5] != 0 || t[6] != 0 || t[7] != 0 {
        let hi = [t[4], t[5], t[6], t[7]];
        let mut wide = [t[0], t[1], t[2], t[3], 0, 0, 0, 0];
        for (j, &c) in C_N.iter().enumerate() {
            let mut carry: u128 = 0;
            for i in 0..4 {
                let v = wide[i + j] as u128 + hi[i] as u128 * c as u128 + carry;
                wide[i + j] = v as u64;
                carry = v >> 64;
            }
            let mut k = j + 4;
            while carry != 0 && k < 8 {
                let v = wide[k] as u128 + carry;
                wide[k] = v as u64;
                carry = v >> 64;
                k += 1;
            }
        }
        t = wide;
    }

    let mut r = [t[0], t[1], t[2], t[3]];
    while ge(&r, &N) {
        r = sub_u256(&r, &N).0;
    }
    r
}
