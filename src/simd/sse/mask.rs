//! 128-bit comparison-result masks and their cast table.
//!
//! A mask lane is all-ones or all-zeros; there is nothing numeric to
//! convert, only the lane geometry to redistribute. The saturating pack
//! instructions are used purely for their byte-shuffling effect (on ±0/-1
//! lanes saturation can never trigger), unpacks replicate lanes when
//! widening. Mask types are distinct from the value registers, so a numeric
//! convert instruction can never be applied to a mask by construction.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::simd::scalar::ScalarMask;
use crate::simd::traits::{GatherArity, LaneOffset, SimdCast, SimdCastOffset};

macro_rules! mask_type {
    (
        $(#[$doc:meta])*
        $name:ident, $lane:ty, $lanes:expr
    ) => {
        $(#[$doc])*
        #[derive(Copy, Clone, Debug)]
        pub struct $name {
            pub(crate) elements: __m128i,
        }

        impl $name {
            /// Number of lanes in the mask.
            pub const LANES: usize = $lanes;

            #[inline(always)]
            pub(crate) fn from_raw(elements: __m128i) -> Self {
                Self { elements }
            }

            /// Builds a mask from per-lane truth values.
            #[inline(always)]
            pub fn from_array(values: [bool; $lanes]) -> Self {
                let lanes = values.map(|b| if b { -1 as $lane } else { 0 });
                Self {
                    elements: unsafe { _mm_loadu_si128(lanes.as_ptr() as *const __m128i) },
                }
            }

            /// Returns the per-lane truth values.
            #[inline(always)]
            pub fn to_array(self) -> [bool; $lanes] {
                let mut lanes = [0 as $lane; $lanes];
                unsafe {
                    _mm_storeu_si128(lanes.as_mut_ptr() as *mut __m128i, self.elements)
                };
                lanes.map(|l| l != 0)
            }

            /// Broadcasts one truth value to every lane.
            #[inline(always)]
            pub fn splat(value: bool) -> Self {
                Self::from_array([value; $lanes])
            }

            #[inline(always)]
            pub(crate) fn shift_lanes_down(self, lane_count: usize) -> Self {
                let elements = unsafe {
                    match lane_count * core::mem::size_of::<$lane>() {
                        0 => self.elements,
                        4 => _mm_srli_si128::<4>(self.elements),
                        8 => _mm_srli_si128::<8>(self.elements),
                        12 => _mm_srli_si128::<12>(self.elements),
                        _ => unreachable!("unsupported lane shift"),
                    }
                };
                Self { elements }
            }
        }
    };
}

mask_type!(
    /// Mask over 2 lanes of 64-bit width (the `F64x2` geometry).
    M64x2, i64, 2
);

mask_type!(
    /// Mask over 4 lanes of 32-bit width (the `F32x4`/`I32x4`/`U32x4` geometry).
    M32x4, i32, 4
);

mask_type!(
    /// Mask over 8 lanes of 16-bit width (the `I16x8`/`U16x8` geometry).
    M16x8, i16, 8
);

macro_rules! impl_mask_cast_1 {
    ($($src:ty => $dst:ty, |$k:ident| $body:expr;)*) => {$(
        impl SimdCast<$dst> for $src {
            #[inline(always)]
            fn simd_cast(self) -> $dst {
                let $k = self.elements;
                <$dst>::from_raw($body)
            }
        }
    )*};
}

// 1 mask to 1 mask {{{1

impl_mask_cast_1! {
    // identity
    M64x2 => M64x2, |k| k;
    M32x4 => M32x4, |k| k;
    M16x8 => M16x8, |k| k;

    // narrowing: a saturating pack halves the lane width and leaves the
    // upper destination lanes false
    M64x2 => M32x4, |k| unsafe { _mm_packs_epi16(k, _mm_setzero_si128()) };
    M64x2 => M16x8, |k| unsafe {
        _mm_packs_epi16(
            _mm_packs_epi16(k, _mm_setzero_si128()),
            _mm_setzero_si128(),
        )
    };
    M32x4 => M16x8, |k| unsafe { _mm_packs_epi16(k, _mm_setzero_si128()) };

    // widening: unpacking a register against itself doubles each lane
    M32x4 => M64x2, |k| unsafe { _mm_unpacklo_epi32(k, k) };
    M16x8 => M32x4, |k| unsafe { _mm_unpacklo_epi16(k, k) };
    M16x8 => M64x2, |k| unsafe {
        let doubled = _mm_unpacklo_epi16(k, k);
        _mm_unpacklo_epi32(doubled, doubled)
    };
}

// 2 masks to 1 mask {{{1

impl SimdCast<M32x4> for (M64x2, M64x2) {
    #[inline(always)]
    fn simd_cast(self) -> M32x4 {
        M32x4::from_raw(unsafe { _mm_packs_epi16(self.0.elements, self.1.elements) })
    }
}

impl SimdCast<M16x8> for (M32x4, M32x4) {
    #[inline(always)]
    fn simd_cast(self) -> M16x8 {
        M16x8::from_raw(unsafe { _mm_packs_epi16(self.0.elements, self.1.elements) })
    }
}

impl SimdCast<M16x8> for (M64x2, M64x2) {
    #[inline(always)]
    fn simd_cast(self) -> M16x8 {
        M16x8::from_raw(unsafe {
            _mm_packs_epi16(
                _mm_packs_epi16(self.0.elements, self.1.elements),
                _mm_setzero_si128(),
            )
        })
    }
}

// 4 masks to 1 mask {{{1

impl SimdCast<M16x8> for (M64x2, M64x2, M64x2, M64x2) {
    #[inline(always)]
    fn simd_cast(self) -> M16x8 {
        M16x8::from_raw(unsafe {
            _mm_packs_epi16(
                _mm_packs_epi16(self.0.elements, self.1.elements),
                _mm_packs_epi16(self.2.elements, self.3.elements),
            )
        })
    }
}

// Scalar bridge {{{1

macro_rules! impl_scalar_mask_bridge {
    ($($mask:ty, $lanes:expr;)*) => {$(
        impl<const N: usize> SimdCast<$mask> for [ScalarMask; N] {
            #[inline(always)]
            fn simd_cast(self) -> $mask {
                let () = GatherArity::<N, $lanes>::VALID;
                let mut lanes = [false; $lanes];
                for (lane, mask) in lanes.iter_mut().zip(self) {
                    *lane = mask.value;
                }
                <$mask>::from_array(lanes)
            }
        }

        impl SimdCast<$mask> for ScalarMask {
            #[inline(always)]
            fn simd_cast(self) -> $mask {
                [self].simd_cast()
            }
        }

        impl SimdCast<ScalarMask> for $mask {
            #[inline(always)]
            fn simd_cast(self) -> ScalarMask {
                ScalarMask::new(self.to_array()[0])
            }
        }

        impl SimdCastOffset<ScalarMask> for $mask {
            #[inline(always)]
            fn simd_cast_offset<const OFFSET: usize>(self) -> ScalarMask {
                let () = LaneOffset::<OFFSET, $lanes, 1>::VALID;
                ScalarMask::new(self.to_array()[OFFSET])
            }
        }
    )*};
}

impl_scalar_mask_bridge! {
    M64x2, 2;
    M32x4, 4;
    M16x8, 8;
}

// Offset casts {{{1

macro_rules! impl_mask_cast_offset {
    ($($src:ty, $src_lanes:expr => $dst:ty, $dst_lanes:expr;)*) => {$(
        impl SimdCastOffset<$dst> for $src {
            #[inline(always)]
            fn simd_cast_offset<const OFFSET: usize>(self) -> $dst {
                let () = LaneOffset::<OFFSET, $src_lanes, $dst_lanes>::VALID;
                self.shift_lanes_down(OFFSET * $dst_lanes).simd_cast()
            }
        }
    )*};
}

impl_mask_cast_offset! {
    M16x8, 8 => M32x4, 4;
    M16x8, 8 => M64x2, 2;
    M32x4, 4 => M64x2, 2;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrow_preserves_truth_values() {
        let m = M32x4::from_array([true, false, true, false]);
        let narrow: M16x8 = m.simd_cast();
        assert_eq!(
            narrow.to_array(),
            [true, false, true, false, false, false, false, false]
        );
    }

    #[test]
    fn test_narrow_then_widen_round_trip() {
        let pattern = [true, false, true, false];
        let m = M32x4::from_array(pattern);
        let narrow: M16x8 = m.simd_cast();
        let wide: M32x4 = narrow.simd_cast();
        assert_eq!(wide.to_array(), pattern);
    }

    #[test]
    fn test_wide_lane_round_trip() {
        let m = M64x2::from_array([true, false]);
        let narrow: M16x8 = m.simd_cast();
        assert_eq!(&narrow.to_array()[..2], &[true, false]);
        let wide: M64x2 = narrow.simd_cast();
        assert_eq!(wide.to_array(), [true, false]);
    }

    #[test]
    fn test_mask_gather_order() {
        let a = M64x2::from_array([true, false]);
        let b = M64x2::from_array([false, true]);
        let c = M64x2::from_array([true, true]);
        let d = M64x2::from_array([false, false]);
        let gathered: M16x8 = (a, b, c, d).simd_cast();
        assert_eq!(
            gathered.to_array(),
            [true, false, false, true, true, true, false, false]
        );
    }

    #[test]
    fn test_mask_offset() {
        let m = M16x8::from_array([true, true, false, false, true, false, true, false]);
        let high: M32x4 = m.simd_cast_offset::<1>();
        assert_eq!(high.to_array(), [true, false, true, false]);
    }

    #[test]
    fn test_scalar_mask_bridge() {
        let gathered: M32x4 = [ScalarMask::new(true), ScalarMask::new(false)].simd_cast();
        assert_eq!(gathered.to_array(), [true, false, false, false]);

        let back: ScalarMask = gathered.simd_cast();
        assert!(back.value());

        let third: ScalarMask = gathered.simd_cast_offset::<2>();
        assert!(!third.value());
    }
}
