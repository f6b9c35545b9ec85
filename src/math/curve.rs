//! secp256k1 affine point operations
//!
//! Host-side curve utilities: generator-table construction, walk-state
//! initialization and match verification. The hot path never calls these --
//! the walk kernel works on raw coordinates with batched inverses.
//!
//! Points stay affine throughout; a one-inversion chord addition is cheap
//! enough for setup and verification work.

use crate::math::constants::{GENERATOR_X, GENERATOR_Y};
use crate::math::field::FieldElement;
use crate::math::scalar::Scalar;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Affine secp256k1 point, plus the group identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffinePoint {
    pub x: FieldElement,
    pub y: FieldElement,
    pub infinity: bool,
}

/// The generator point G.
pub static GENERATOR: LazyLock<AffinePoint> = LazyLock::new(|| AffinePoint {
    x: FieldElement::from_hex(GENERATOR_X).expect("valid generator x"),
    y: FieldElement::from_hex(GENERATOR_Y).expect("valid generator y"),
    infinity: false,
});

impl AffinePoint {
    pub const INFINITY: AffinePoint = AffinePoint {
        x: FieldElement::ZERO,
        y: FieldElement::ZERO,
        infinity: true,
    };

    pub fn new(x: FieldElement, y: FieldElement) -> Self {
        AffinePoint { x, y, infinity: false }
    }

    pub fn generator() -> Self {
        *GENERATOR
    }

    pub fn is_infinity(&self) -> bool {
        self.infinity
    }

    pub fn negate(&self) -> Self {
        if self.infinity {
            *self
        } else {
            AffinePoint::new(self.x, self.y.neg())
        }
    }

    /// y^2 == x^3 + 7.
    pub fn is_on_curve(&self) -> bool {
        if self.infinity {
            return true;
        }
        let rhs = self.x.sqr().mul(&self.x).add(&FieldElement::from_u64(7));
        self.y.sqr() == rhs
    }

    pub fn double(&self) -> Self {
        if self.infinity {
            return *self;
        }
        // s = 3x^2 / 2y
        let x2 = self.x.sqr();
        let num = x2.add(&x2).add(&x2);
        let den = self.y.add(&self.y);
        let s = num.mul(&den.inv());
        let x3 = s.sqr().sub(&self.x).sub(&self.x);
        let y3 = s.mul(&self.x.sub(&x3)).sub(&self.y);
        AffinePoint::new(x3, y3)
    }

    pub fn add(&self, other: &Self) -> Self {
        if self.infinity {
            return *other;
        }
        if other.infinity {
            return *self;
        }
        if self.x == other.x {
            if self.y == other.y {
                return self.double();
            }
            return AffinePoint::INFINITY;
        }
        // s = (y2 - y1) / (x2 - x1)
        let s = other.y.sub(&self.y).mul(&other.x.sub(&self.x).inv());
        let x3 = s.sqr().sub(&self.x).sub(&other.x);
        let y3 = s.mul(&self.x.sub(&x3)).sub(&self.y);
        AffinePoint::new(x3, y3)
    }

    /// Double-and-add scalar multiplication, MSB first.
    pub fn mul(&self, k: &Scalar) -> Self {
        let mut acc = AffinePoint::INFINITY;
        for i in (0..256).rev() {
            acc = acc.double();
            if k.bit(i) {
                acc = acc.add(self);
            }
        }
        acc
    }

    /// 33-byte SEC1 compressed encoding.
    pub fn serialize_compressed(&self) -> [u8; 33] {
        let mut out = [0u8; 33];
        out[0] = if self.y.is_odd() { 0x03 } else { 0x02 };
        out[1..].copy_from_slice(&self.x.to_bytes_be());
        out
    }

    /// 65-byte SEC1 uncompressed encoding.
    pub fn serialize_uncompressed(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[0] = 0x04;
        out[1..33].copy_from_slice(&self.x.to_bytes_be());
        out[33..].copy_from_slice(&self.y.to_bytes_be());
        out
    }
}

/// k * G.
pub fn mul_generator(k: &Scalar) -> AffinePoint {
    AffinePoint::generator().mul(k)
}
