//! Math stack for KeySweep
//!
//! Limb-based 256-bit arithmetic over the secp256k1 field and group order,
//! affine curve operations, grouped modular inversion and the curve/GLV
//! constants.

pub mod batch;
pub mod constants;
pub mod curve;
pub mod field;
pub mod scalar;

#[cfg(test)]
mod tests;

pub use batch::batch_invert;
pub use curve::AffinePoint;
pub use field::FieldElement;
pub use scalar::Scalar;
