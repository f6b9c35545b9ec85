//! Cross-validation of the math stack against independent implementations
//!
//! num-bigint is the reference for limb arithmetic, k256 for curve
//! arithmetic. Anything that diverges here poisons every digest the engine
//! produces, so these run wide with seeded randomness.

use crate::math::constants::{BETA, FIELD_PRIME, LAMBDA};
use crate::math::curve::{mul_generator, AffinePoint};
use crate::math::field::FieldElement;
use crate::math::scalar::Scalar;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::elliptic_curve::PrimeField;
use k256::{ProjectivePoint, Scalar as K256Scalar};
use num_bigint::BigUint;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn prime() -> BigUint {
    BigUint::parse_bytes(FIELD_PRIME.as_bytes(), 16).expect("prime parses")
}

fn order() -> BigUint {
    BigUint::parse_bytes(crate::math::constants::CURVE_ORDER.as_bytes(), 16).expect("order parses")
}

/// Random 255-bit value: below both p and n, valid for either field.
fn random_bytes(rng: &mut StdRng) -> [u8; 32] {
    let mut b = [0u8; 32];
    rng.fill(&mut b[..]);
    b[0] &= 0x7F;
    b
}

#[test]
fn field_mul_matches_bigint() {
    let p = prime();
    let mut rng = StdRng::seed_from_u64(0xFEED_0001);
    for _ in 0..64 {
        let ab = random_bytes(&mut rng);
        let bb = random_bytes(&mut rng);
        let a = FieldElement::from_bytes_be(&ab);
        let b = FieldElement::from_bytes_be(&bb);

        let expect = (BigUint::from_bytes_be(&ab) * BigUint::from_bytes_be(&bb)) % &p;
        assert_eq!(BigUint::from_bytes_be(&a.mul(&b).to_bytes_be()), expect);

        let expect_add = (BigUint::from_bytes_be(&ab) + BigUint::from_bytes_be(&bb)) % &p;
        assert_eq!(BigUint::from_bytes_be(&a.add(&b).to_bytes_be()), expect_add);

        let expect_sqr = (BigUint::from_bytes_be(&ab) * BigUint::from_bytes_be(&ab)) % &p;
        assert_eq!(BigUint::from_bytes_be(&a.sqr().to_bytes_be()), expect_sqr);
    }
}

#[test]
fn field_inverse_matches_bigint() {
    let p = prime();
    let two = BigUint::from(2u32);
    let mut rng = StdRng::seed_from_u64(0xFEED_0002);
    for _ in 0..16 {
        let ab = random_bytes(&mut rng);
        let a = FieldElement::from_bytes_be(&ab);
        if a.is_zero() {
            continue;
        }
        assert_eq!(a.inv().mul(&a), FieldElement::ONE);
        let expect = BigUint::from_bytes_be(&ab).modpow(&(&p - &two), &p);
        assert_eq!(BigUint::from_bytes_be(&a.inv().to_bytes_be()), expect);
    }
}

#[test]
fn scalar_mul_matches_bigint() {
    let n = order();
    let mut rng = StdRng::seed_from_u64(0xFEED_0003);
    for _ in 0..64 {
        let ab = random_bytes(&mut rng);
        let bb = random_bytes(&mut rng);
        let a = Scalar::from_bytes_be(&ab);
        let b = Scalar::from_bytes_be(&bb);
        let expect = (BigUint::from_bytes_be(&ab) * BigUint::from_bytes_be(&bb)) % &n;
        assert_eq!(BigUint::from_bytes_be(&a.mul(&b).to_bytes_be()), expect);
        let expect_add = (BigUint::from_bytes_be(&ab) + BigUint::from_bytes_be(&bb)) % &n;
        assert_eq!(BigUint::from_bytes_be(&a.add(&b).to_bytes_be()), expect_add);
    }
}

fn k256_point(k: &Scalar) -> (Vec<u8>, Vec<u8>) {
    let repr = k.to_bytes_be();
    let ks = Option::<K256Scalar>::from(K256Scalar::from_repr(repr.into()))
        .expect("scalar in range");
    let point = (ProjectivePoint::GENERATOR * ks).to_affine();
    let enc = point.to_encoded_point(false);
    (
        enc.x().expect("finite point").to_vec(),
        enc.y().expect("finite point").to_vec(),
    )
}

#[test]
fn generator_multiples_match_k256() {
    let mut rng = StdRng::seed_from_u64(0xFEED_0004);
    let mut scalars: Vec<Scalar> = [1u64, 2, 3, 7, 0xFFFF_FFFF]
        .iter()
        .map(|&v| Scalar::from_u64(v))
        .collect();
    scalars.push(Scalar::ZERO.sub(&Scalar::ONE)); // n - 1
    for _ in 0..8 {
        scalars.push(Scalar::from_bytes_be(&random_bytes(&mut rng)));
    }

    for k in scalars {
        let ours = mul_generator(&k);
        let (kx, ky) = k256_point(&k);
        assert_eq!(ours.x.to_bytes_be().to_vec(), kx, "x mismatch for k={}", k);
        assert_eq!(ours.y.to_bytes_be().to_vec(), ky, "y mismatch for k={}", k);
    }
}

#[test]
fn endomorphism_fixes_y() {
    // phi(G) = (beta * Gx, Gy) must equal lambda * G exactly: the
    // endomorphism scales x and leaves y untouched.
    let g = AffinePoint::generator();
    let phi = mul_generator(&LAMBDA);
    assert_eq!(phi.x, g.x.mul(&BETA));
    assert_eq!(phi.y, g.y);
    assert!(AffinePoint::new(g.x.mul(&BETA), g.y).is_on_curve());
}
