//! 256-bit comparison-result masks and their cast table.
//!
//! Same rules as the 128-bit mask table: packs and unpacks move all-ones /
//! all-zeros lanes between geometries, numeric converts are unreachable by
//! construction. The 256-bit packs need the usual 64-bit lane permute to
//! restore ascending order; widening from 16 lanes flips the halves first
//! for the same reason.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::simd::avx2::{concat_si, hi128_si, lo128_si, zero_extend_si};
use crate::simd::scalar::ScalarMask;
use crate::simd::sse::{M16x8, M32x4, M64x2};
use crate::simd::traits::{GatherArity, LaneOffset, SimdCast, SimdCastOffset};

macro_rules! mask_type {
    (
        $(#[$doc:meta])*
        $name:ident, $lane:ty, $lanes:expr, $half:ty
    ) => {
        $(#[$doc])*
        #[derive(Copy, Clone, Debug)]
        pub struct $name {
            pub(crate) elements: __m256i,
        }

        impl $name {
            /// Number of lanes in the mask.
            pub const LANES: usize = $lanes;

            #[inline(always)]
            pub(crate) fn from_raw(elements: __m256i) -> Self {
                Self { elements }
            }

            /// Builds a mask from per-lane truth values.
            #[inline(always)]
            pub fn from_array(values: [bool; $lanes]) -> Self {
                let lanes = values.map(|b| if b { -1 as $lane } else { 0 });
                Self {
                    elements: unsafe {
                        _mm256_loadu_si256(lanes.as_ptr() as *const __m256i)
                    },
                }
            }

            /// Returns the per-lane truth values.
            #[inline(always)]
            pub fn to_array(self) -> [bool; $lanes] {
                let mut lanes = [0 as $lane; $lanes];
                unsafe {
                    _mm256_storeu_si256(lanes.as_mut_ptr() as *mut __m256i, self.elements)
                };
                lanes.map(|l| l != 0)
            }

            /// Broadcasts one truth value to every lane.
            #[inline(always)]
            pub fn splat(value: bool) -> Self {
                Self::from_array([value; $lanes])
            }

            #[inline(always)]
            pub(crate) fn low_shifted(self, lane_offset: usize) -> $half {
                let lo = lo128_si(self.elements);
                let hi = hi128_si(self.elements);
                let shifted = unsafe {
                    match lane_offset * core::mem::size_of::<$lane>() {
                        0 => lo,
                        4 => _mm_alignr_epi8::<4>(hi, lo),
                        8 => _mm_alignr_epi8::<8>(hi, lo),
                        12 => _mm_alignr_epi8::<12>(hi, lo),
                        16 => hi,
                        20 => _mm_srli_si128::<4>(hi),
                        24 => _mm_srli_si128::<8>(hi),
                        28 => _mm_srli_si128::<12>(hi),
                        _ => unreachable!("unsupported lane shift"),
                    }
                };
                <$half>::from_raw(shifted)
            }
        }
    };
}

mask_type!(
    /// Mask over 4 lanes of 64-bit width (the `F64x4` geometry).
    M64x4, i64, 4, M64x2
);

mask_type!(
    /// Mask over 8 lanes of 32-bit width (the `F32x8`/`I32x8`/`U32x8` geometry).
    M32x8, i32, 8, M32x4
);

mask_type!(
    /// Mask over 16 lanes of 16-bit width (the `I16x16`/`U16x16` geometry).
    M16x16, i16, 16, M16x8
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

// 1 AVX mask to 1 AVX mask {{{1

impl_mask_cast_1! {
    // identity
    M64x4 => M64x4, |k| k;
    M32x8 => M32x8, |k| k;
    M16x16 => M16x16, |k| k;

    // narrowing: pack the halves, upper destination lanes become false
    M64x4 => M32x8, |k| zero_extend_si(unsafe {
        _mm_packs_epi32(lo128_si(k), hi128_si(k))
    });
    M64x4 => M16x16, |k| zero_extend_si(unsafe {
        _mm_packs_epi16(
            _mm_packs_epi32(lo128_si(k), hi128_si(k)),
            _mm_setzero_si128(),
        )
    });
    M32x8 => M16x16, |k| zero_extend_si(unsafe {
        _mm_packs_epi16(lo128_si(k), hi128_si(k))
    });

    // widening: double the low lanes
    M32x8 => M64x4, |k| {
        let low = lo128_si(k);
        concat_si(
            unsafe { _mm_unpacklo_epi32(low, low) },
            unsafe { _mm_unpackhi_epi32(low, low) },
        )
    };
    M16x16 => M32x8, |k| {
        let flipped = unsafe { _mm256_permute4x64_epi64::<0b1101_1000>(k) };
        unsafe { _mm256_unpacklo_epi16(flipped, flipped) }
    };
    M16x16 => M64x4, |k| {
        let doubled = unsafe { _mm_unpacklo_epi16(lo128_si(k), lo128_si(k)) };
        concat_si(
            unsafe { _mm_unpacklo_epi32(doubled, doubled) },
            unsafe { _mm_unpackhi_epi32(doubled, doubled) },
        )
    };
}

// 2 AVX masks to 1 AVX mask {{{1

impl SimdCast<M32x8> for (M64x4, M64x4) {
    #[inline(always)]
    fn simd_cast(self) -> M32x8 {
        M32x8::from_raw(unsafe {
            _mm256_permute4x64_epi64::<0b1101_1000>(_mm256_packs_epi32(
                self.0.elements,
                self.1.elements,
            ))
        })
    }
}

impl SimdCast<M16x16> for (M32x8, M32x8) {
    #[inline(always)]
    fn simd_cast(self) -> M16x16 {
        M16x16::from_raw(unsafe {
            _mm256_permute4x64_epi64::<0b1101_1000>(_mm256_packs_epi16(
                self.0.elements,
                self.1.elements,
            ))
        })
    }
}

impl SimdCast<M16x16> for (M64x4, M64x4) {
    #[inline(always)]
    fn simd_cast(self) -> M16x16 {
        M16x16::from_raw(zero_extend_si(unsafe {
            _mm_packs_epi16(
                _mm_packs_epi32(lo128_si(self.0.elements), hi128_si(self.0.elements)),
                _mm_packs_epi32(lo128_si(self.1.elements), hi128_si(self.1.elements)),
            )
        }))
    }
}

// 4 AVX masks to 1 AVX mask {{{1

impl SimdCast<M16x16> for (M64x4, M64x4, M64x4, M64x4) {
    #[inline(always)]
    fn simd_cast(self) -> M16x16 {
        // Per-half packs leave the quarters as [a0 a1 b0 b1 | a2 a3 b2 b3];
        // the unpacks put each source mask's lanes back together.
        let packed = unsafe {
            _mm256_packs_epi32(
                _mm256_packs_epi32(self.0.elements, self.1.elements),
                _mm256_packs_epi32(self.2.elements, self.3.elements),
            )
        };
        let low = lo128_si(packed);
        let high = hi128_si(packed);
        M16x16::from_raw(concat_si(
            unsafe { _mm_unpacklo_epi32(low, high) },
            unsafe { _mm_unpackhi_epi32(low, high) },
        ))
    }
}

// 1 SSE mask to 1 AVX mask {{{1

impl_mask_cast_1! {
    M64x2 => M64x4, |k| zero_extend_si(k);
    M32x4 => M32x8, |k| zero_extend_si(k);
    M16x8 => M16x16, |k| zero_extend_si(k);

    M32x4 => M64x4, |k| concat_si(
        unsafe { _mm_unpacklo_epi32(k, k) },
        unsafe { _mm_unpackhi_epi32(k, k) },
    );
    M16x8 => M64x4, |k| {
        let doubled = unsafe { _mm_unpacklo_epi16(k, k) };
        concat_si(
            unsafe { _mm_unpacklo_epi32(doubled, doubled) },
            unsafe { _mm_unpackhi_epi32(doubled, doubled) },
        )
    };
    M16x8 => M32x8, |k| concat_si(
        unsafe { _mm_unpacklo_epi16(k, k) },
        unsafe { _mm_unpackhi_epi16(k, k) },
    );

    M64x2 => M32x8, |k| zero_extend_si(unsafe {
        _mm_packs_epi16(k, _mm_setzero_si128())
    });
    M64x2 => M16x16, |k| zero_extend_si(unsafe {
        _mm_packs_epi16(
            _mm_packs_epi16(k, _mm_setzero_si128()),
            _mm_setzero_si128(),
        )
    });
    M32x4 => M16x16, |k| zero_extend_si(unsafe {
        _mm_packs_epi16(k, _mm_setzero_si128())
    });
}

// 2 SSE masks to 1 AVX mask {{{1

macro_rules! impl_mask_cast_2 {
    ($($src:ty => $dst:ty, |$k0:ident, $k1:ident| $body:expr;)*) => {$(
        impl SimdCast<$dst> for ($src, $src) {
            #[inline(always)]
            fn simd_cast(self) -> $dst {
                let ($k0, $k1) = (self.0.elements, self.1.elements);
                <$dst>::from_raw($body)
            }
        }
    )*};
}

impl_mask_cast_2! {
    M64x2 => M64x4, |k0, k1| concat_si(k0, k1);
    M32x4 => M32x8, |k0, k1| concat_si(k0, k1);
    M16x8 => M16x16, |k0, k1| concat_si(k0, k1);

    M64x2 => M32x8, |k0, k1| zero_extend_si(unsafe { _mm_packs_epi16(k0, k1) });
    M32x4 => M16x16, |k0, k1| zero_extend_si(unsafe { _mm_packs_epi16(k0, k1) });
}

// 4 SSE masks to 1 AVX mask {{{1

impl SimdCast<M32x8> for (M64x2, M64x2, M64x2, M64x2) {
    #[inline(always)]
    fn simd_cast(self) -> M32x8 {
        M32x8::from_raw(concat_si(
            unsafe { _mm_packs_epi16(self.0.elements, self.1.elements) },
            unsafe { _mm_packs_epi16(self.2.elements, self.3.elements) },
        ))
    }
}

impl SimdCast<M16x16> for (M32x4, M32x4, M32x4, M32x4) {
    #[inline(always)]
    fn simd_cast(self) -> M16x16 {
        M16x16::from_raw(concat_si(
            unsafe { _mm_packs_epi16(self.0.elements, self.1.elements) },
            unsafe { _mm_packs_epi16(self.2.elements, self.3.elements) },
        ))
    }
}

// 1 AVX mask to 1 SSE mask {{{1

impl_mask_cast_1! {
    M64x4 => M64x2, |k| lo128_si(k);
    M64x4 => M32x4, |k| unsafe { _mm_packs_epi32(lo128_si(k), hi128_si(k)) };
    M64x4 => M16x8, |k| unsafe {
        _mm_packs_epi16(
            _mm_packs_epi32(lo128_si(k), hi128_si(k)),
            _mm_setzero_si128(),
        )
    };

    M32x8 => M32x4, |k| lo128_si(k);
    M32x8 => M16x8, |k| unsafe { _mm_packs_epi16(lo128_si(k), hi128_si(k)) };
    M32x8 => M64x2, |k| unsafe { _mm_unpacklo_epi32(lo128_si(k), lo128_si(k)) };

    M16x16 => M16x8, |k| lo128_si(k);
    M16x16 => M32x4, |k| unsafe { _mm_unpacklo_epi16(lo128_si(k), lo128_si(k)) };
    M16x16 => M64x2, |k| {
        let doubled = unsafe { _mm_unpacklo_epi16(lo128_si(k), lo128_si(k)) };
        unsafe { _mm_unpacklo_epi32(doubled, doubled) }
    };
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
    M64x4, 4;
    M32x8, 8;
    M16x16, 16;
}

// Offset casts {{{1

macro_rules! impl_mask_cast_offset_256 {
    ($($src:ty, $src_lanes:expr => $dst:ty, $dst_lanes:expr;)*) => {$(
        impl SimdCastOffset<$dst> for $src {
            #[inline(always)]
            fn simd_cast_offset<const OFFSET: usize>(self) -> $dst {
                let () = LaneOffset::<OFFSET, $src_lanes, $dst_lanes>::VALID;
                self.low_shifted(OFFSET * $dst_lanes).simd_cast()
            }
        }
    )*};
}

impl_mask_cast_offset_256! {
    // same-geometry truncation
    M64x4, 4 => M64x2, 2;
    M32x8, 8 => M32x4, 4;
    M16x16, 16 => M16x8, 8;

    // widening selection
    M32x8, 8 => M64x4, 4;
    M16x16, 16 => M32x8, 8;
    M16x16, 16 => M64x4, 4;
}

// 128-bit mask source widening with an offset.
macro_rules! impl_mask_cast_offset_128 {
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

impl_mask_cast_offset_128! {
    M16x8, 8 => M64x4, 4;
    M32x4, 4 => M64x4, 4;
}
