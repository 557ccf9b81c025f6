//! 128-bit register wrappers.
//!
//! These types are thin, typed carriers of one raw SSE register each: the
//! element type and lane count live in the type, the bits live in the
//! register. They exist so the cast tables can dispatch on (element type,
//! width) pairs; arithmetic, gather/scatter and the rest of a full vector
//! API are deliberately not here.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

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
            pub(crate) elements: __m128i,
        }

        impl $name {
            /// Number of lanes in the register.
            pub const LANES: usize = $lanes;

            #[inline(always)]
            pub(crate) fn from_raw(elements: __m128i) -> Self {
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
                    elements: _mm_loadu_si128(ptr as *const __m128i),
                }
            }

            /// Stores `LANES` elements to memory (no alignment requirement).
            ///
            /// # Safety
            ///
            /// `ptr` must point to at least `LANES` writable elements.
            #[inline(always)]
            pub unsafe fn store_at(self, ptr: *mut $elem) {
                _mm_storeu_si128(ptr as *mut __m128i, self.elements)
            }
        }
    };
}

float_register!(
    /// 128-bit register holding 4 packed `f32` lanes.
    F32x4, f32, 4, __m128, _mm_loadu_ps, _mm_storeu_ps, _mm_set1_ps
);

float_register!(
    /// 128-bit register holding 2 packed `f64` lanes.
    F64x2, f64, 2, __m128d, _mm_loadu_pd, _mm_storeu_pd, _mm_set1_pd
);

int_register!(
    /// 128-bit register holding 4 packed `i32` lanes.
    I32x4, i32, 4, _mm_set1_epi32, i32
);

int_register!(
    /// 128-bit register holding 4 packed `u32` lanes.
    U32x4, u32, 4, _mm_set1_epi32, i32
);

int_register!(
    /// 128-bit register holding 8 packed `i16` lanes.
    I16x8, i16, 8, _mm_set1_epi16, i16
);

int_register!(
    /// 128-bit register holding 8 packed `u16` lanes.
    U16x8, u16, 8, _mm_set1_epi16, i16
);

// Byte-granularity right shift, used by the offset casts to bring a selected
// lane range down to the bottom of the register. The shift distance is
// always a multiple of a lane and validated by the caller.
macro_rules! impl_shift_lanes {
    ($($name:ident, $elem:ty, to_int: |$v:ident| $to_int:expr, from_int: |$k:ident| $from_int:expr;)*) => {$(
        impl $name {
            #[inline(always)]
            pub(crate) fn shift_lanes_down(self, lane_count: usize) -> Self {
                let $v = self.elements;
                let shifted = unsafe {
                    let int_view = $to_int;
                    let $k = match lane_count * core::mem::size_of::<$elem>() {
                        0 => int_view,
                        2 => _mm_srli_si128::<2>(int_view),
                        4 => _mm_srli_si128::<4>(int_view),
                        6 => _mm_srli_si128::<6>(int_view),
                        8 => _mm_srli_si128::<8>(int_view),
                        12 => _mm_srli_si128::<12>(int_view),
                        _ => unreachable!("unsupported lane shift"),
                    };
                    $from_int
                };
                Self::from_raw(shifted)
            }
        }
    )*};
}

impl_shift_lanes! {
    F32x4, f32, to_int: |v| _mm_castps_si128(v), from_int: |k| _mm_castsi128_ps(k);
    F64x2, f64, to_int: |v| _mm_castpd_si128(v), from_int: |k| _mm_castsi128_pd(k);
    I32x4, i32, to_int: |v| v, from_int: |k| k;
    U32x4, u32, to_int: |v| v, from_int: |k| k;
    I16x8, i16, to_int: |v| v, from_int: |k| k;
    U16x8, u16, to_int: |v| v, from_int: |k| k;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_round_trip() {
        let v = I32x4::from_array([1, -2, 3, -4]);
        assert_eq!(v.to_array(), [1, -2, 3, -4]);

        let f = F64x2::from_array([1.5, -2.5]);
        assert_eq!(f.to_array(), [1.5, -2.5]);

        let s = U16x8::from_array([0, 1, 2, 3, 4, 5, 0xFFFF, 7]);
        assert_eq!(s.to_array(), [0, 1, 2, 3, 4, 5, 0xFFFF, 7]);
    }

    #[test]
    fn test_splat() {
        assert_eq!(F32x4::splat(2.5).to_array(), [2.5; 4]);
        assert_eq!(U32x4::splat(u32::MAX).to_array(), [u32::MAX; 4]);
        assert_eq!(I16x8::splat(-7).to_array(), [-7; 8]);
    }

    #[test]
    fn test_shift_lanes_down() {
        let v = I16x8::from_array([1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(v.shift_lanes_down(0).to_array(), [1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(v.shift_lanes_down(4).to_array(), [5, 6, 7, 8, 0, 0, 0, 0]);
        assert_eq!(v.shift_lanes_down(6).to_array(), [7, 8, 0, 0, 0, 0, 0, 0]);
    }
}
