//! The cast dispatch surface.
//!
//! A cast descriptor - (source representation, destination representation,
//! optional lane offset) - is a trait implementation. The set of
//! implementations is the complete dispatch table: requesting a combination
//! that has no implementation fails to compile, which is the only failure
//! mode the engine has. Nothing is resolved at run time.

/// Converts one or more source registers into exactly one destination
/// register.
///
/// Implemented for:
/// - single registers (element type change within or across widths),
/// - tuples of 2 or 4 identical registers (gather casts: the sources'
///   lanes are concatenated, then converted/packed into the destination),
/// - arrays `[Scalar<T>; N]` with `N` at most the destination lane count
///   (scalar gathers: input `i` lands in lane `i`, the rest is zero).
///
/// Lane `i` of source register `k` always maps to destination lane
/// `k * source_lanes + i`; no implementation may interleave or reverse.
pub trait SimdCast<To> {
    /// Performs the conversion. Pure, by value, no side effects.
    fn simd_cast(self) -> To;
}

/// Converts a register while selecting which contiguous sub-range of the
/// source lanes feeds the (narrower) destination.
///
/// `OFFSET` counts in units of the destination lane count: offset 0 reads
/// source lanes `0..dst_lanes`, offset 1 reads `dst_lanes..2 * dst_lanes`,
/// and so on. The bound `(OFFSET + 1) * dst_lanes <= src_lanes` is checked
/// at monomorphization time; an out-of-range offset does not compile.
pub trait SimdCastOffset<To> {
    /// Performs the conversion of the selected lane range.
    fn simd_cast_offset<const OFFSET: usize>(self) -> To;
}

/// Free-function form of [`SimdCast`], for call sites that read better with
/// the destination named as a type parameter:
/// `simd_cast::<I16x8, _>((a, b))`.
#[inline(always)]
pub fn simd_cast<To, From: SimdCast<To>>(from: From) -> To {
    from.simd_cast()
}

/// Monomorphization-time validation of a lane offset.
///
/// Referencing `VALID` forces the assertion to be evaluated while the
/// generic arguments are known, turning an out-of-range offset into a build
/// failure at the offending call site.
pub(crate) struct LaneOffset<const OFFSET: usize, const SRC_LANES: usize, const DST_LANES: usize>;

impl<const OFFSET: usize, const SRC_LANES: usize, const DST_LANES: usize>
    LaneOffset<OFFSET, SRC_LANES, DST_LANES>
{
    pub(crate) const VALID: () = assert!(
        (OFFSET + 1) * DST_LANES <= SRC_LANES,
        "lane offset selects lanes outside the source register"
    );
}

/// Monomorphization-time validation of a scalar-gather arity: at least one
/// input, at most one per destination lane.
pub(crate) struct GatherArity<const N: usize, const DST_LANES: usize>;

impl<const N: usize, const DST_LANES: usize> GatherArity<N, DST_LANES> {
    pub(crate) const VALID: () = assert!(
        N >= 1 && N <= DST_LANES,
        "scalar gather arity exceeds the destination lane count"
    );
}
