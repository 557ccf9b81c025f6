//! The 128-bit cast dispatch table.
//!
//! Every legal (source, destination) combination at this width is one trait
//! implementation below, grouped the way the table grows: single registers
//! first, then the 2- and 4-register gathers, then the scalar bridge, then
//! the offset casts. Multi-register gathers reduce to pairs: the 4-register
//! double gathers are two 2-register gathers whose results are
//! pack-combined, never a flat re-enumeration.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::simd::scalar::Scalar;
use crate::simd::sse::convert;
use crate::simd::sse::{F32x4, F64x2, I16x8, I32x4, U16x8, U32x4};
use crate::simd::traits::{GatherArity, LaneOffset, SimdCast, SimdCastOffset};

// One source register to one destination register.
macro_rules! impl_cast_1 {
    ($($src:ty => $dst:ty, |$x:ident| $body:expr;)*) => {$(
        impl SimdCast<$dst> for $src {
            #[inline(always)]
            fn simd_cast(self) -> $dst {
                let $x = self;
                <$dst>::from_raw($body)
            }
        }
    )*};
}

// Two source registers to one destination register.
macro_rules! impl_cast_2 {
    ($($src:ty => $dst:ty, |$x0:ident, $x1:ident| $body:expr;)*) => {$(
        impl SimdCast<$dst> for ($src, $src) {
            #[inline(always)]
            fn simd_cast(self) -> $dst {
                let ($x0, $x1) = self;
                <$dst>::from_raw($body)
            }
        }
    )*};
}

// Four source registers to one destination register.
macro_rules! impl_cast_4 {
    ($($src:ty => $dst:ty, |$x0:ident, $x1:ident, $x2:ident, $x3:ident| $body:expr;)*) => {$(
        impl SimdCast<$dst> for ($src, $src, $src, $src) {
            #[inline(always)]
            fn simd_cast(self) -> $dst {
                let ($x0, $x1, $x2, $x3) = self;
                <$dst>::from_raw($body)
            }
        }
    )*};
}

// 1 register to 1 register {{{1

impl_cast_1! {
    // identity
    F32x4 => F32x4, |x| x.elements;
    F64x2 => F64x2, |x| x.elements;
    I32x4 => I32x4, |x| x.elements;
    U32x4 => U32x4, |x| x.elements;
    I16x8 => I16x8, |x| x.elements;
    U16x8 => U16x8, |x| x.elements;

    // to I32x4
    F32x4 => I32x4, |x| convert::cvt_f32_i32(x.elements);
    F64x2 => I32x4, |x| convert::cvt_f64_i32(x.elements);
    U32x4 => I32x4, |x| x.elements;
    I16x8 => I32x4, |x| convert::cvt_i16_i32(x.elements);
    U16x8 => I32x4, |x| convert::cvt_u16_i32(x.elements);

    // to U32x4
    F32x4 => U32x4, |x| convert::cvt_f32_u32(x.elements);
    F64x2 => U32x4, |x| convert::cvt_f64_u32(x.elements);
    I32x4 => U32x4, |x| x.elements;
    I16x8 => U32x4, |x| convert::cvt_i16_i32(x.elements);
    U16x8 => U32x4, |x| convert::cvt_u16_i32(x.elements);

    // to F32x4
    F64x2 => F32x4, |x| convert::cvt_f64_f32(x.elements);
    I32x4 => F32x4, |x| convert::cvt_i32_f32(x.elements);
    U32x4 => F32x4, |x| convert::cvt_u32_f32(x.elements);
    I16x8 => F32x4, |x| convert::cvt_i32_f32(convert::cvt_i16_i32(x.elements));
    U16x8 => F32x4, |x| convert::cvt_i32_f32(convert::cvt_u16_i32(x.elements));

    // to F64x2
    F32x4 => F64x2, |x| convert::cvt_f32_f64(x.elements);
    I32x4 => F64x2, |x| convert::cvt_i32_f64(x.elements);
    U32x4 => F64x2, |x| convert::cvt_u32_f64(x.elements);
    I16x8 => F64x2, |x| convert::cvt_i32_f64(convert::cvt_i16_i32(x.elements));
    U16x8 => F64x2, |x| convert::cvt_i32_f64(convert::cvt_u16_i32(x.elements));

    // to I16x8 (narrowing saturates, lanes past the sources' are zero)
    I32x4 => I16x8, |x| convert::pack_i32_i16(x.elements, unsafe { _mm_setzero_si128() });
    U32x4 => I16x8, |x| convert::pack_u32_i16(x.elements, unsafe { _mm_setzero_si128() });
    F32x4 => I16x8, |x| convert::pack_i32_i16(convert::cvt_f32_i32(x.elements), unsafe { _mm_setzero_si128() });
    F64x2 => I16x8, |x| convert::pack_i32_i16(convert::cvt_f64_i32(x.elements), unsafe { _mm_setzero_si128() });
    U16x8 => I16x8, |x| x.elements;

    // to U16x8
    I32x4 => U16x8, |x| convert::pack_i32_u16(x.elements, unsafe { _mm_setzero_si128() });
    U32x4 => U16x8, |x| convert::pack_u32_u16(x.elements, unsafe { _mm_setzero_si128() });
    F32x4 => U16x8, |x| convert::pack_i32_u16(convert::cvt_f32_i32(x.elements), unsafe { _mm_setzero_si128() });
    F64x2 => U16x8, |x| convert::pack_i32_u16(convert::cvt_f64_i32(x.elements), unsafe { _mm_setzero_si128() });
    I16x8 => U16x8, |x| x.elements;
}

// 2 registers to 1 register {{{1

impl_cast_2! {
    F64x2 => I32x4, |x0, x1| unsafe {
        _mm_unpacklo_epi64(
            convert::cvt_f64_i32(x0.elements),
            convert::cvt_f64_i32(x1.elements),
        )
    };
    F64x2 => U32x4, |x0, x1| unsafe {
        _mm_unpacklo_epi64(
            convert::cvt_f64_u32(x0.elements),
            convert::cvt_f64_u32(x1.elements),
        )
    };
    F64x2 => F32x4, |x0, x1| unsafe {
        _mm_movelh_ps(
            convert::cvt_f64_f32(x0.elements),
            convert::cvt_f64_f32(x1.elements),
        )
    };

    I32x4 => I16x8, |x0, x1| convert::pack_i32_i16(x0.elements, x1.elements);
    U32x4 => I16x8, |x0, x1| convert::pack_u32_i16(x0.elements, x1.elements);
    F32x4 => I16x8, |x0, x1| convert::pack_i32_i16(
        convert::cvt_f32_i32(x0.elements),
        convert::cvt_f32_i32(x1.elements),
    );

    I32x4 => U16x8, |x0, x1| convert::pack_i32_u16(x0.elements, x1.elements);
    U32x4 => U16x8, |x0, x1| convert::pack_u32_u16(x0.elements, x1.elements);
    F32x4 => U16x8, |x0, x1| convert::pack_i32_u16(
        convert::cvt_f32_i32(x0.elements),
        convert::cvt_f32_i32(x1.elements),
    );
}

impl SimdCast<I16x8> for (F64x2, F64x2) {
    #[inline(always)]
    fn simd_cast(self) -> I16x8 {
        let gathered: I32x4 = self.simd_cast();
        gathered.simd_cast()
    }
}

impl SimdCast<U16x8> for (F64x2, F64x2) {
    #[inline(always)]
    fn simd_cast(self) -> U16x8 {
        let gathered: I32x4 = self.simd_cast();
        gathered.simd_cast()
    }
}

// 4 registers to 1 register {{{1

impl_cast_4! {
    F64x2 => I16x8, |x0, x1, x2, x3| {
        let low: I32x4 = (x0, x1).simd_cast();
        let high: I32x4 = (x2, x3).simd_cast();
        convert::pack_i32_i16(low.elements, high.elements)
    };
    F64x2 => U16x8, |x0, x1, x2, x3| {
        let low: I32x4 = (x0, x1).simd_cast();
        let high: I32x4 = (x2, x3).simd_cast();
        convert::pack_i32_u16(low.elements, high.elements)
    };
}

// Scalar bridge {{{1

// N scalars to 1 register: input i lands in lane i, the rest is zero.
macro_rules! impl_scalar_gather {
    ($($dst:ty, $elem:ty, $lanes:expr;)*) => {$(
        impl<T: Copy, const N: usize> SimdCast<$dst> for [Scalar<T>; N]
        where
            Scalar<T>: SimdCast<Scalar<$elem>>,
        {
            #[inline(always)]
            fn simd_cast(self) -> $dst {
                let () = GatherArity::<N, $lanes>::VALID;
                let mut lanes = [<$elem as num::Zero>::zero(); $lanes];
                for (lane, value) in lanes.iter_mut().zip(self) {
                    *lane = <Scalar<T> as SimdCast<Scalar<$elem>>>::simd_cast(value).value;
                }
                <$dst>::from_array(lanes)
            }
        }

        impl<T: Copy> SimdCast<$dst> for Scalar<T>
        where
            Scalar<T>: SimdCast<Scalar<$elem>>,
        {
            #[inline(always)]
            fn simd_cast(self) -> $dst {
                [self].simd_cast()
            }
        }
    )*};
}

impl_scalar_gather! {
    F32x4, f32, 4;
    F64x2, f64, 2;
    I32x4, i32, 4;
    U32x4, u32, 4;
    I16x8, i16, 8;
    U16x8, u16, 8;
}

// 1 register to 1 scalar: lane 0, the other lanes are discarded by design.
macro_rules! impl_scalar_extract {
    ($($src:ty, $elem:ty, $lanes:expr;)*) => {$(
        impl<T: Copy> SimdCast<Scalar<T>> for $src
        where
            Scalar<$elem>: SimdCast<Scalar<T>>,
        {
            #[inline(always)]
            fn simd_cast(self) -> Scalar<T> {
                Scalar::new(self.to_array()[0]).simd_cast()
            }
        }

        // Offset form reads the selected lane instead of lane 0.
        impl<T: Copy> SimdCastOffset<Scalar<T>> for $src
        where
            Scalar<$elem>: SimdCast<Scalar<T>>,
        {
            #[inline(always)]
            fn simd_cast_offset<const OFFSET: usize>(self) -> Scalar<T> {
                let () = LaneOffset::<OFFSET, $lanes, 1>::VALID;
                Scalar::new(self.to_array()[OFFSET]).simd_cast()
            }
        }
    )*};
}

impl_scalar_extract! {
    F32x4, f32, 4;
    F64x2, f64, 2;
    I32x4, i32, 4;
    U32x4, u32, 4;
    I16x8, i16, 8;
    U16x8, u16, 8;
}

// Offset casts {{{1

// Offset selects which contiguous source lane range feeds the narrower
// destination: shift the selected lanes to the bottom, then run the plain
// cast.
macro_rules! impl_cast_offset {
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

impl_cast_offset! {
    I16x8, 8 => I32x4, 4;
    I16x8, 8 => U32x4, 4;
    I16x8, 8 => F32x4, 4;
    I16x8, 8 => F64x2, 2;
    U16x8, 8 => I32x4, 4;
    U16x8, 8 => U32x4, 4;
    U16x8, 8 => F32x4, 4;
    U16x8, 8 => F64x2, 2;
    I32x4, 4 => F64x2, 2;
    U32x4, 4 => F64x2, 2;
    F32x4, 4 => F64x2, 2;
}
