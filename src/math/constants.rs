//! secp256k1 constants for KeySweep
//!
//! Curve parameters plus the GLV endomorphism constants used by the hash
//! fan-out and by host-side key recovery.

use crate::math::field::FieldElement;
use crate::math::scalar::Scalar;
use std::sync::LazyLock;

/// Field prime p = 2^256 - 2^32 - 977.
pub const FIELD_PRIME: &str = "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f";

/// Group order n.
pub const CURVE_ORDER: &str = "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141";

pub const GENERATOR_X: &str = "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
pub const GENERATOR_Y: &str = "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";

// GLV endomorphism: phi(x, y) = (beta * x, y) with beta a nontrivial cube
// root of unity mod p. phi(P) = lambda * P, lambda the matching cube root of
// unity mod n. Applying beta and beta^2 yields two extra public keys per
// point whose private keys are lambda * k and lambda^2 * k.
pub const BETA_HEX: &str = "7ae96a2b657c07106e64479eac3434e99cf0497512f58995c1396c28719501ee";
pub const BETA2_HEX: &str = "851695d49a83f8ef919bb86153cbcb16630fb68aed0a766a3ec693d68e6afa40";
pub const LAMBDA_HEX: &str = "5363ad4cc05c30e0a5261c028812645a122e22ea20816678df02967c1b23bd72";
pub const LAMBDA2_HEX: &str = "ac9c52b33fa3cf1f5ad9e3fd77ed9ba4a880b9fc8ec739c2e0cfc810b51283ce";

pub static BETA: LazyLock<FieldElement> =
    LazyLock::new(|| FieldElement::from_hex(BETA_HEX).expect("valid beta"));

pub static BETA2: LazyLock<FieldElement> =
    LazyLock::new(|| FieldElement::from_hex(BETA2_HEX).expect("valid beta^2"));

pub static LAMBDA: LazyLock<Scalar> =
    LazyLock::new(|| Scalar::from_hex(LAMBDA_HEX).expect("valid lambda"));

pub static LAMBDA2: LazyLock<Scalar> =
    LazyLock::new(|| Scalar::from_hex(LAMBDA2_HEX).expect("valid lambda^2"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn beta_is_cube_root_of_unity() {
        let b3 = BETA.mul(&BETA).mul(&BETA);
        assert_eq!(b3, FieldElement::ONE);
        assert_eq!(BETA.mul(&BETA), *BETA2);
    }

    #[test]
    fn lambda_is_cube_root_of_unity() {
        let l3 = LAMBDA.mul(&LAMBDA).mul(&LAMBDA);
        assert_eq!(l3, Scalar::from_u64(1));
        assert_eq!(LAMBDA.mul(&LAMBDA), *LAMBDA2);
    }
}
