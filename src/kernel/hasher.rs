//! Hash fan-out schemes
//!
//! Each emitted point fans out to six digests: the GLV triple (x, beta*x,
//! beta^2*x) times both y-parities, the negated parity reported with the
//! increment sign flipped since it belongs to the negated key. The scheme
//! decides which serializations fire; the matcher decides membership. Both
//! are resolved per launch, so the whole fan-out monomorphizes with no
//! dispatch inside the walk.

use crate::hash160::{
    digest_words, hash160_compressed, hash160_compressed_pair, hash160_uncompressed,
};
use crate::kernel::output::{pack_meta, OutputSink};
use crate::kernel::walk::PointVisitor;
use crate::math::constants::{BETA, BETA2};
use crate::math::field::FieldElement;
use crate::targets::Matcher;
use std::marker::PhantomData;

/// Shared check context: matcher, sink and the reporting lane.
pub struct CheckCtx<'a, M: Matcher> {
    matcher: &'a M,
    sink: &'a OutputSink,
    lane: u32,
}

impl<'a, M: Matcher> CheckCtx<'a, M> {
    #[inline]
    fn check(&self, digest: &[u8; 20], incr: i32, endo: u8, compressed: bool) {
        if self.matcher.matches(digest) {
            self.sink
                .report(self.lane, pack_meta(incr, compressed, endo), &digest_words(digest));
        }
    }
}

/// A hashing strategy over one emitted point.
pub trait HashScheme {
    /// Whether the scheme reads the point's y coordinate.
    const NEEDS_Y: bool;

    fn check_point<M: Matcher>(ctx: &CheckCtx<'_, M>, x: &FieldElement, y: &FieldElement, incr: i32);
}

/// Compressed serialization, explicit parity; six digests per point.
pub struct CompressedScheme;

impl HashScheme for CompressedScheme {
    const NEEDS_Y: bool = true;

    #[inline]
    fn check_point<M: Matcher>(ctx: &CheckCtx<'_, M>, x: &FieldElement, y: &FieldElement, incr: i32) {
        let odd = y.is_odd();
        let e1x = x.mul(&BETA);
        let e2x = x.mul(&BETA2);

        ctx.check(&hash160_compressed(x, odd), incr, 0, true);
        ctx.check(&hash160_compressed(&e1x, odd), incr, 1, true);
        ctx.check(&hash160_compressed(&e2x, odd), incr, 2, true);

        ctx.check(&hash160_compressed(x, !odd), -incr, 0, true);
        ctx.check(&hash160_compressed(&e1x, !odd), -incr, 1, true);
        ctx.check(&hash160_compressed(&e2x, !odd), -incr, 2, true);
    }
}

/// Uncompressed serialization; the endomorphism keeps y, the negated key
/// takes -y.
pub struct UncompressedScheme;

impl HashScheme for UncompressedScheme {
    const NEEDS_Y: bool = true;

    #[inline]
    fn check_point<M: Matcher>(ctx: &CheckCtx<'_, M>, x: &FieldElement, y: &FieldElement, incr: i32) {
        let e1x = x.mul(&BETA);
        let e2x = x.mul(&BETA2);

        ctx.check(&hash160_uncompressed(x, y), incr, 0, false);
        ctx.check(&hash160_uncompressed(&e1x, y), incr, 1, false);
        ctx.check(&hash160_uncompressed(&e2x, y), incr, 2, false);

        let yn = y.neg();
        ctx.check(&hash160_uncompressed(x, &yn), -incr, 0, false);
        ctx.check(&hash160_uncompressed(&e1x, &yn), -incr, 1, false);
        ctx.check(&hash160_uncompressed(&e2x, &yn), -incr, 2, false);
    }
}

/// Both serializations per point.
pub struct BothScheme;

impl HashScheme for BothScheme {
    const NEEDS_Y: bool = true;

    #[inline]
    fn check_point<M: Matcher>(ctx: &CheckCtx<'_, M>, x: &FieldElement, y: &FieldElement, incr: i32) {
        CompressedScheme::check_point(ctx, x, y, incr);
        UncompressedScheme::check_point(ctx, x, y, incr);
    }
}

/// Compressed fast path: both parity digests from one serialization per x,
/// never touching y. Which of the pair is +incr and which is -incr is
/// settled by key recovery, which tries both signs anyway.
pub struct FusedCompressedScheme;

impl HashScheme for FusedCompressedScheme {
    const NEEDS_Y: bool = false;

    #[inline]
    fn check_point<M: Matcher>(ctx: &CheckCtx<'_, M>, x: &FieldElement, _y: &FieldElement, incr: i32) {
        let (even, odd) = hash160_compressed_pair(x);
        ctx.check(&even, incr, 0, true);
        ctx.check(&odd, -incr, 0, true);

        let e1x = x.mul(&BETA);
        let (even, odd) = hash160_compressed_pair(&e1x);
        ctx.check(&even, incr, 1, true);
        ctx.check(&odd, -incr, 1, true);

        let e2x = x.mul(&BETA2);
        let (even, odd) = hash160_compressed_pair(&e2x);
        ctx.check(&even, incr, 2, true);
        ctx.check(&odd, -incr, 2, true);
    }
}

/// Adapter binding a scheme to walk emission.
pub struct SchemeVisitor<'a, S: HashScheme, M: Matcher> {
    ctx: CheckCtx<'a, M>,
    _scheme: PhantomData<S>,
}

impl<'a, S: HashScheme, M: Matcher> SchemeVisitor<'a, S, M> {
    pub fn new(matcher: &'a M, sink: &'a OutputSink, lane: u32) -> Self {
        SchemeVisitor {
            ctx: CheckCtx { matcher, sink, lane },
            _scheme: PhantomData,
        }
    }
}

impl<S: HashScheme, M: Matcher> PointVisitor for SchemeVisitor<'_, S, M> {
    const NEEDS_Y: bool = S::NEEDS_Y;

    #[inline]
    fn visit(&mut self, x: &FieldElement, y: &FieldElement, incr: i32) {
        S::check_point(&self.ctx, x, y, incr);
    }
}
