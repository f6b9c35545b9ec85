//! The batched point walk
//!
//! One `step` emits a whole group of points around the current center
//! C = P: the center itself, C + iG and C - iG for i below half, and the
//! low endpoint C - half*G, covering GRP_SIZE consecutive keys. It then
//! advances the center by GRP_SIZE*G so consecutive groups tile the
//! keyspace without gaps.
//!
//! C + iG and C - iG share the same delta-x against the table entry
//! (negating a point only flips y), so one inverse serves both chords, and
//! every delta-x of the group goes through one batched inversion. That
//! amortizes the inversion to roughly three multiplications per emitted
//! point.
//!
//! Increments passed to the visitor are offsets from the lane's launch-base
//! key: the center sits at `base_incr + half`, the group spans
//! `base_incr .. base_incr + GRP_SIZE`.

use crate::kernel::table::GeneratorTable;
use crate::math::batch::batch_invert;
use crate::math::field::FieldElement;
use crate::types::WalkState;

/// Receives every derived point of a group.
pub trait PointVisitor {
    /// When false, the walk skips the y-coordinate of emitted points and
    /// passes zero instead; the compressed fast path never reads it.
    const NEEDS_Y: bool = true;

    fn visit(&mut self, x: &FieldElement, y: &FieldElement, incr: i32);
}

/// Reusable per-lane walk scratch: the delta-x array and the batch-inverse
/// prefix buffer, sized half+1 for the half pair deltas, the low endpoint
/// and the next-center jump.
pub struct GroupWalker<'a> {
    table: &'a GeneratorTable,
    dx: Vec<FieldElement>,
    prefix: Vec<FieldElement>,
}

impl<'a> GroupWalker<'a> {
    pub fn new(table: &'a GeneratorTable) -> Self {
        let len = table.half() + 1;
        GroupWalker {
            table,
            dx: vec![FieldElement::ZERO; len],
            prefix: vec![FieldElement::ZERO; len],
        }
    }

    /// Emit one group centered on `state` and advance `state` to the next
    /// center.
    pub fn step<V: PointVisitor>(&mut self, state: &mut WalkState, base_incr: i32, visitor: &mut V) {
        let table = self.table;
        let half = table.half();
        let hsize = half - 1;
        let (sx, sy) = (state.x, state.y);

        // Delta-x for every chord of the group: the pair additions, the low
        // endpoint (index hsize) and the next-center jump (index half).
        for i in 0..half {
            self.dx[i] = table.gx(i).sub(&sx);
        }
        self.dx[half] = table.jump().x.sub(&sx);
        batch_invert(&mut self.dx, &mut self.prefix);

        // The center point is the state itself.
        visitor.visit(&sx, &sy, base_incr + half as i32);

        let syn = sy.neg();

        for i in 0..hsize {
            let gx = table.gx(i);
            let gy = table.gy(i);

            // C + (i+1)G: chord slope (gy - sy) / (gx - sx).
            let s = gy.sub(&sy).mul(&self.dx[i]);
            let px = s.sqr().sub(&sx).sub(gx);
            if V::NEEDS_Y {
                let py = s.mul(&gx.sub(&px)).sub(gy);
                visitor.visit(&px, &py, base_incr + (half + i + 1) as i32);
            } else {
                visitor.visit(&px, &FieldElement::ZERO, base_incr + (half + i + 1) as i32);
            }

            // C - (i+1)G: -(i+1)G is (gx, -gy), same delta-x, same inverse.
            let s = syn.sub(gy).mul(&self.dx[i]);
            let px = s.sqr().sub(&sx).sub(gx);
            if V::NEEDS_Y {
                let py = gy.sub(&s.mul(&px.sub(gx)));
                visitor.visit(&px, &py, base_incr + (half - i - 1) as i32);
            } else {
                visitor.visit(&px, &FieldElement::ZERO, base_incr + (half - i - 1) as i32);
            }
        }

        // Low endpoint C - half*G, through (gx[hsize], -gy[hsize]).
        let gx = table.gx(hsize);
        let gy = table.gy(hsize);
        let s = gy.neg().sub(&sy).mul(&self.dx[hsize]);
        let px = s.sqr().sub(&sx).sub(gx);
        if V::NEEDS_Y {
            let py = gy.sub(&s.mul(&px.sub(gx)));
            visitor.visit(&px, &py, base_incr);
        } else {
            visitor.visit(&px, &FieldElement::ZERO, base_incr);
        }

        // Next center C + GRP_SIZE*G; this one always needs y since it
        // becomes the walk state.
        let jump = table.jump();
        let s = jump.y.sub(&sy).mul(&self.dx[half]);
        let px = s.sqr().sub(&sx).sub(&jump.x);
        let py = s.mul(&jump.x.sub(&px)).sub(&jump.y);
        state.x = px;
        state.y = py;
    }
}
