//! 256-bit register wrappers.
//!
//! Same shape as the 128-bit wrappers: one raw AVX register, element type
//! and lane count in the type, construction and extraction only.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::simd::avx2::{hi128_pd, hi128_ps, hi128_si, lo128_pd, lo128_ps, lo128_si};
use crate::simd::sse;

macro_rules! float_register {
    (
        $(#[$doc:meta])*
        $name:ident, $elem:ty, $lanes:expr, $raw:ty,
        $load:ident, $store:ident, $set1:ident
    ) => {
        $(#[$doc])*
        #[derive(Copy, Clone, Debug)]
        pub struct $name {
            pub(crate) elements: $raw,
        }

        impl $name {
            /// Number of lanes in the register.
            pub const LANES: usize = $lanes;

            #[inline(always)]
            pub(crate) fn from_raw(elements: $raw) -> Self {
                Self { elements }
            }

            /// Builds a register from `LANES` values in lane order.
            #[inline(always)]
            pub fn from_array(values: [$elem; $lanes]) -> Self {
                unsafe { Self::load(values.as_ptr()) }
            }

            /// Returns the lanes in lane order.
            #[inline(always)]
            pub fn to_array(self) -> [$elem; $lanes] {
                let mut out = [0.0; $lanes];
                unsafe { self.store_at(out.as_mut_ptr()) };
                out
            }

            /// Broadcasts one value to every lane.
            #[inline(always)]
            pub fn splat(value: $elem) -> Self {
                Self {
                    elements: unsafe { $set1(value) },
                }
            }

            /// Loads `LANES` elements from memory (no alignment requirement).
            ///
            /// # Safety
            ///
            /// `ptr` must point to at least `LANES` readable elements.
            #[inline(always)]
            pub unsafe fn load(ptr: *const $elem) -> Self {
                Self {
                    elements: $load(ptr),
                }
            }

            /// Stores `LANES` elements to memory (no alignment requirement).
            ///
            /// # Safety
            ///
            /// `ptr` must point to at least `LANES` writable elements.
            #[inline(always)]
            pub unsafe fn store_at(self, ptr: *mut $elem) {
                $store(ptr, self.elements)
            }
        }
    };
}

macro_rules! int_register {
    (
        $(#[$doc:meta])*
        $name:ident, $elem:ty, $lanes:expr, $set1:ident, $set1_elem:ty
    ) => {
        $(#[$doc])*
        #[derive(Copy, Clone, Debug)]
        pub struct $name {
            pub(crate) elements: __m256i,
        }

        impl $name {
            /// Number of lanes in the register.
            pub const LANES: usize = $lanes;

            #[inline(always)]
            pub(crate) fn from_raw(elements: __m256i) -> Self {
                Self { elements }
            }

            /// Builds a register from `LANES` values in lane order.
            #[inline(always)]
            pub fn from_array(values: [$elem; $lanes]) -> Self {
                unsafe { Self::load(values.as_ptr()) }
            }

            /// Returns the lanes in lane order.
            #[inline(always)]
            pub fn to_array(self) -> [$elem; $lanes] {
                let mut out = [0; $lanes];
                unsafe { self.store_at(out.as_mut_ptr()) };
                out
            }

            /// Broadcasts one value to every lane.
            #[inline(always)]
            pub fn splat(value: $elem) -> Self {
                Self {
                    elements: unsafe { $set1(value as $set1_elem) },
                }
            }

            /// Loads `LANES` elements from memory (no alignment requirement).
            ///
            /// # Safety
            ///
            /// `ptr` must point to at least `LANES` readable elements.
            #[inline(always)]
            pub unsafe fn load(ptr: *const $elem) -> Self {
                Self {
                    elements: _mm256_loadu_si256(ptr as *const __m256i),
                }
            }

            /// Stores `LANES` elements to memory (no alignment requirement).
            ///
            /// # Safety
            ///
            /// `ptr` must point to at least `LANES` writable elements.
            #[inline(always)]
            pub unsafe fn store_at(self, ptr: *mut $elem) {
                _mm256_storeu_si256(ptr as *mut __m256i, self.elements)
            }
        }
    };
}

float_register!(
    /// 256-bit register holding 8 packed `f32` lanes.
    F32x8, f32, 8, __m256, _mm256_loadu_ps, _mm256_storeu_ps, _mm256_set1_ps
);

float_register!(
    /// 256-bit register holding 4 packed `f64` lanes.
    F64x4, f64, 4, __m256d, _mm256_loadu_pd, _mm256_storeu_pd, _mm256_set1_pd
);

int_register!(
    /// 256-bit register holding 8 packed `i32` lanes.
    I32x8, i32, 8, _mm256_set1_epi32, i32
);

int_register!(
    /// 256-bit register holding 8 packed `u32` lanes.
    U32x8, u32, 8, _mm256_set1_epi32, i32
);

int_register!(
    /// 256-bit register holding 16 packed `i16` lanes.
    I16x16, i16, 16, _mm256_set1_epi16, i16
);

int_register!(
    /// 256-bit register holding 16 packed `u16` lanes.
    U16x16, u16, 16, _mm256_set1_epi16, i16
);

// Brings a selected lane range down to the bottom of a 128-bit register.
// Offsets inside a half use alignr across the half boundary; offsets at or
// past the half boundary reduce to the high half. Shift distances are
// multiples of a lane, validated by the caller.
#[inline(always)]
fn low_shifted_si(lo: __m128i, hi: __m128i, byte_offset: usize) -> __m128i {
    unsafe {
        match byte_offset {
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
    }
}

macro_rules! impl_low_shifted {
    ($($name:ident, $elem:ty, $half:ty, to_si: |$v:ident| ($lo:expr, $hi:expr), from_si: |$k:ident| $back:expr;)*) => {$(
        impl $name {
            // The `lane_offset` lowest-discarded lane becomes lane 0 of the
            // 128-bit result.
            #[inline(always)]
            pub(crate) fn low_shifted(self, lane_offset: usize) -> $half {
                let $v = self;
                let (lo, hi) = ($lo, $hi);
                let $k = low_shifted_si(lo, hi, lane_offset * core::mem::size_of::<$elem>());
                <$half>::from_raw($back)
            }
        }
    )*};
}

impl_low_shifted! {
    F32x8, f32, sse::F32x4,
        to_si: |v| (
            unsafe { _mm_castps_si128(lo128_ps(v.elements)) },
            unsafe { _mm_castps_si128(hi128_ps(v.elements)) }
        ),
        from_si: |k| unsafe { _mm_castsi128_ps(k) };
    F64x4, f64, sse::F64x2,
        to_si: |v| (
            unsafe { _mm_castpd_si128(lo128_pd(v.elements)) },
            unsafe { _mm_castpd_si128(hi128_pd(v.elements)) }
        ),
        from_si: |k| unsafe { _mm_castsi128_pd(k) };
    I32x8, i32, sse::I32x4,
        to_si: |v| (lo128_si(v.elements), hi128_si(v.elements)),
        from_si: |k| k;
    U32x8, u32, sse::U32x4,
        to_si: |v| (lo128_si(v.elements), hi128_si(v.elements)),
        from_si: |k| k;
    I16x16, i16, sse::I16x8,
        to_si: |v| (lo128_si(v.elements), hi128_si(v.elements)),
        from_si: |k| k;
    U16x16, u16, sse::U16x8,
        to_si: |v| (lo128_si(v.elements), hi128_si(v.elements)),
        from_si: |k| k;
}
