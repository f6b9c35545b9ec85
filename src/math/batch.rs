//! Grouped modular inversion (Montgomery's trick)
//!
//! Replaces N inversions with one inversion plus 3(N-1) multiplications:
//! forward prefix products, invert the total, then walk backwards peeling
//! one inverse off per step. The walk kernel batches every delta-x of a
//! group through here, which is what makes one-inversion-per-point
//! affordable.

use crate::math::field::FieldElement;

/// Invert every element of `vals` in place. `prefix` is caller-provided
/// scratch of the same length, reused across calls to avoid allocation in
/// the walk loop.
///
/// Every input must be non-zero; a zero poisons the whole batch.
pub fn batch_invert(vals: &mut [FieldElement], prefix: &mut [FieldElement]) {
    let n = vals.len();
    debug_assert_eq!(prefix.len(), n);
    if n == 0 {
        return;
    }
    debug_assert!(vals.iter().all(|v| !v.is_zero()), "zero in inversion batch");
    if n == 1 {
        vals[0] = vals[0].inv();
        return;
    }

    prefix[0] = vals[0];
    for i in 1..n {
        prefix[i] = prefix[i - 1].mul(&vals[i]);
    }

    let mut inv_all = prefix[n - 1].inv();

    for i in (1..n).rev() {
        let v = vals[i];
        vals[i] = inv_all.mul(&prefix[i - 1]);
        inv_all = inv_all.mul(&v);
    }
    vals[0] = inv_all;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(vals: &mut [FieldElement]) {
        let mut scratch = vec![FieldElement::ZERO; vals.len()];
        batch_invert(vals, &mut scratch);
    }

    #[test]
    fn matches_single_inversions() {
        let mut vals: Vec<FieldElement> = (1u64..=17)
            .map(|v| FieldElement::from_u64(v * 0x1234_5678_9ABC))
            .collect();
        let expect: Vec<FieldElement> = vals.iter().map(|v| v.inv()).collect();
        batch(&mut vals);
        assert_eq!(vals, expect);
    }

    #[test]
    fn involution() {
        let mut vals: Vec<FieldElement> =
            (3u64..40).step_by(5).map(FieldElement::from_u64).collect();
        let original = vals.clone();
        batch(&mut vals);
        batch(&mut vals);
        assert_eq!(vals, original);
    }

    #[test]
    fn single_and_empty() {
        let mut one = [FieldElement::from_u64(42)];
        batch(&mut one);
        assert_eq!(one[0], FieldElement::from_u64(42).inv());
        let mut empty: [FieldElement; 0] = [];
        batch(&mut empty);
    }
}
