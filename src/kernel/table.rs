//! Precomputed generator multiples for the group walk
//!
//! Read-only, built once per engine: (i+1)*G for i below GRP_SIZE/2, plus
//! GRP_SIZE*G as the jump that advances a group center to the next group.
//! Shared by reference across all worker lanes.

use crate::math::curve::AffinePoint;
use crate::math::field::FieldElement;

pub struct GeneratorTable {
    half: usize,
    gx: Vec<FieldElement>,
    gy: Vec<FieldElement>,
    jump: AffinePoint,
}

impl GeneratorTable {
    /// Build the table for an even group size >= 4.
    pub fn new(grp_size: usize) -> Self {
        debug_assert!(grp_size >= 4 && grp_size % 2 == 0);
        let half = grp_size / 2;
        let mut gx = Vec::with_capacity(half);
        let mut gy = Vec::with_capacity(half);

        let g = AffinePoint::generator();
        let mut p = g;
        for _ in 0..half {
            gx.push(p.x);
            gy.push(p.y);
            p = p.add(&g);
        }
        // p has walked to (half+1)G; keep adding up to GRP_SIZE*G.
        for _ in half + 1..grp_size {
            p = p.add(&g);
        }

        GeneratorTable { half, gx, gy, jump: p }
    }

    /// Half the group size; the table holds G through half*G.
    pub fn half(&self) -> usize {
        self.half
    }

    /// x of (i+1)*G.
    #[inline]
    pub fn gx(&self, i: usize) -> &FieldElement {
        &self.gx[i]
    }

    /// y of (i+1)*G.
    #[inline]
    pub fn gy(&self, i: usize) -> &FieldElement {
        &self.gy[i]
    }

    /// GRP_SIZE * G, the center-to-center jump.
    pub fn jump(&self) -> &AffinePoint {
        &self.jump
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::curve::mul_generator;
    use crate::math::scalar::Scalar;

    #[test]
    fn table_entries_are_multiples() {
        let table = GeneratorTable::new(8);
        assert_eq!(table.half(), 4);
        for i in 0..4 {
            let expect = mul_generator(&Scalar::from_u64(i as u64 + 1));
            assert_eq!(table.gx(i), &expect.x);
            assert_eq!(table.gy(i), &expect.y);
        }
        assert_eq!(*table.jump(), mul_generator(&Scalar::from_u64(8)));
    }
}
