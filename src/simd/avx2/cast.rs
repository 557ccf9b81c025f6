//! The 256-bit cast dispatch table.
//!
//! Grouped by direction: within the 256-bit width first, then 128 -> 256
//! (extend/convert), 256 -> 128 (truncate/convert), the scalar bridge, and
//! the offset casts. The gather arities follow the same recursive pairwise
//! scheme as the 128-bit table: a 4-register gather is two 2-register
//! gathers pack-combined, an 8-register gather is two 4-register results
//! concatenated.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::simd::avx2::convert;
use crate::simd::avx2::{
    concat_pd, concat_ps, concat_si, hi128_si, lo128_ps, lo128_si, zero_extend_pd,
    zero_extend_ps, zero_extend_si,
};
use crate::simd::avx2::{F32x8, F64x4, I16x16, I32x8, U16x16, U32x8};
use crate::simd::scalar::Scalar;
use crate::simd::sse::convert as sse_convert;
use crate::simd::sse::{F32x4, F64x2, I16x8, I32x4, U16x8, U32x4};
use crate::simd::traits::{GatherArity, LaneOffset, SimdCast, SimdCastOffset};

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

// 1 AVX register to 1 AVX register {{{1

impl_cast_1! {
    // identity
    F32x8 => F32x8, |x| x.elements;
    F64x4 => F64x4, |x| x.elements;
    I32x8 => I32x8, |x| x.elements;
    U32x8 => U32x8, |x| x.elements;
    I16x16 => I16x16, |x| x.elements;
    U16x16 => U16x16, |x| x.elements;

    // to F64x4: the low 4 source lanes widen
    F32x8 => F64x4, |x| convert::cvt_f32_f64(lo128_ps(x.elements));
    I32x8 => F64x4, |x| convert::cvt_i32_f64(lo128_si(x.elements));
    U32x8 => F64x4, |x| convert::cvt_u32_f64(lo128_si(x.elements));
    I16x16 => F64x4, |x| convert::cvt_i32_f64(sse_convert::cvt_i16_i32(lo128_si(x.elements)));
    U16x16 => F64x4, |x| convert::cvt_i32_f64(sse_convert::cvt_u16_i32(lo128_si(x.elements)));

    // to F32x8
    F64x4 => F32x8, |x| zero_extend_ps(convert::cvt_f64_f32(x.elements));
    I32x8 => F32x8, |x| convert::cvt_i32_f32(x.elements);
    U32x8 => F32x8, |x| convert::cvt_u32_f32(x.elements);
    I16x16 => F32x8, |x| convert::cvt_i32_f32(convert::cvt_i16_i32(lo128_si(x.elements)));
    U16x16 => F32x8, |x| convert::cvt_i32_f32(convert::cvt_u16_i32(lo128_si(x.elements)));

    // to I32x8
    F64x4 => I32x8, |x| zero_extend_si(convert::cvt_f64_i32(x.elements));
    F32x8 => I32x8, |x| convert::cvt_f32_i32(x.elements);
    U32x8 => I32x8, |x| x.elements;
    I16x16 => I32x8, |x| convert::cvt_i16_i32(lo128_si(x.elements));
    U16x16 => I32x8, |x| convert::cvt_u16_i32(lo128_si(x.elements));

    // to U32x8
    F64x4 => U32x8, |x| zero_extend_si(convert::cvt_f64_u32(x.elements));
    F32x8 => U32x8, |x| convert::cvt_f32_u32(x.elements);
    I32x8 => U32x8, |x| x.elements;
    I16x16 => U32x8, |x| convert::cvt_i16_i32(lo128_si(x.elements));
    U16x16 => U32x8, |x| convert::cvt_u16_i32(lo128_si(x.elements));

    // to I16x16 (narrowing saturates; lanes past the sources' are zero)
    F64x4 => I16x16, |x| zero_extend_si(sse_convert::pack_i32_i16(
        convert::cvt_f64_i32(x.elements),
        unsafe { _mm_setzero_si128() },
    ));
    F32x8 => I16x16, |x| {
        let truncated = convert::cvt_f32_i32(x.elements);
        zero_extend_si(sse_convert::pack_i32_i16(
            lo128_si(truncated),
            hi128_si(truncated),
        ))
    };
    I32x8 => I16x16, |x| zero_extend_si(sse_convert::pack_i32_i16(
        lo128_si(x.elements),
        hi128_si(x.elements),
    ));
    U32x8 => I16x16, |x| zero_extend_si(sse_convert::pack_u32_i16(
        lo128_si(x.elements),
        hi128_si(x.elements),
    ));
    U16x16 => I16x16, |x| x.elements;

    // to U16x16
    F64x4 => U16x16, |x| zero_extend_si(sse_convert::pack_i32_u16(
        convert::cvt_f64_i32(x.elements),
        unsafe { _mm_setzero_si128() },
    ));
    F32x8 => U16x16, |x| {
        let truncated = convert::cvt_f32_i32(x.elements);
        zero_extend_si(sse_convert::pack_i32_u16(
            lo128_si(truncated),
            hi128_si(truncated),
        ))
    };
    I32x8 => U16x16, |x| zero_extend_si(sse_convert::pack_i32_u16(
        lo128_si(x.elements),
        hi128_si(x.elements),
    ));
    U32x8 => U16x16, |x| zero_extend_si(sse_convert::pack_u32_u16(
        lo128_si(x.elements),
        hi128_si(x.elements),
    ));
    I16x16 => U16x16, |x| x.elements;
}

// 2 AVX registers to 1 AVX register {{{1

impl_cast_2! {
    F64x4 => F32x8, |x0, x1| concat_ps(
        convert::cvt_f64_f32(x0.elements),
        convert::cvt_f64_f32(x1.elements),
    );
    F64x4 => I32x8, |x0, x1| concat_si(
        convert::cvt_f64_i32(x0.elements),
        convert::cvt_f64_i32(x1.elements),
    );
    F64x4 => U32x8, |x0, x1| concat_si(
        convert::cvt_f64_u32(x0.elements),
        convert::cvt_f64_u32(x1.elements),
    );
    F64x4 => I16x16, |x0, x1| zero_extend_si(sse_convert::pack_i32_i16(
        convert::cvt_f64_i32(x0.elements),
        convert::cvt_f64_i32(x1.elements),
    ));
    F64x4 => U16x16, |x0, x1| zero_extend_si(sse_convert::pack_i32_u16(
        convert::cvt_f64_i32(x0.elements),
        convert::cvt_f64_i32(x1.elements),
    ));

    I32x8 => I16x16, |x0, x1| convert::pack_i32_i16(x0.elements, x1.elements);
    U32x8 => I16x16, |x0, x1| convert::pack_u32_i16(x0.elements, x1.elements);
    I32x8 => U16x16, |x0, x1| convert::pack_i32_u16(x0.elements, x1.elements);
    U32x8 => U16x16, |x0, x1| convert::pack_u32_u16(x0.elements, x1.elements);

    F32x8 => I16x16, |x0, x1| convert::pack_i32_i16(
        convert::cvt_f32_i32(x0.elements),
        convert::cvt_f32_i32(x1.elements),
    );
    F32x8 => U16x16, |x0, x1| convert::pack_i32_u16(
        convert::cvt_f32_i32(x0.elements),
        convert::cvt_f32_i32(x1.elements),
    );
}

// 4 AVX registers to 1 AVX register {{{1

impl_cast_4! {
    F64x4 => I16x16, |x0, x1, x2, x3| {
        let low: I32x8 = (x0, x1).simd_cast();
        let high: I32x8 = (x2, x3).simd_cast();
        convert::pack_i32_i16(low.elements, high.elements)
    };
    F64x4 => U16x16, |x0, x1, x2, x3| {
        let low: I32x8 = (x0, x1).simd_cast();
        let high: I32x8 = (x2, x3).simd_cast();
        convert::pack_i32_u16(low.elements, high.elements)
    };
}

// 1 SSE register to 1 AVX register {{{1

impl_cast_1! {
    // to F64x4
    F64x2 => F64x4, |x| zero_extend_pd(x.elements);
    F32x4 => F64x4, |x| convert::cvt_f32_f64(x.elements);
    I32x4 => F64x4, |x| convert::cvt_i32_f64(x.elements);
    U32x4 => F64x4, |x| convert::cvt_u32_f64(x.elements);
    I16x8 => F64x4, |x| convert::cvt_i32_f64(sse_convert::cvt_i16_i32(x.elements));
    U16x8 => F64x4, |x| convert::cvt_i32_f64(sse_convert::cvt_u16_i32(x.elements));

    // to F32x8
    F64x2 => F32x8, |x| zero_extend_ps(sse_convert::cvt_f64_f32(x.elements));
    F32x4 => F32x8, |x| zero_extend_ps(x.elements);
    I32x4 => F32x8, |x| zero_extend_ps(sse_convert::cvt_i32_f32(x.elements));
    U32x4 => F32x8, |x| zero_extend_ps(sse_convert::cvt_u32_f32(x.elements));
    I16x8 => F32x8, |x| convert::cvt_i32_f32(convert::cvt_i16_i32(x.elements));
    U16x8 => F32x8, |x| convert::cvt_i32_f32(convert::cvt_u16_i32(x.elements));

    // to I32x8
    F64x2 => I32x8, |x| zero_extend_si(sse_convert::cvt_f64_i32(x.elements));
    F32x4 => I32x8, |x| zero_extend_si(sse_convert::cvt_f32_i32(x.elements));
    I32x4 => I32x8, |x| zero_extend_si(x.elements);
    U32x4 => I32x8, |x| zero_extend_si(x.elements);
    I16x8 => I32x8, |x| convert::cvt_i16_i32(x.elements);
    U16x8 => I32x8, |x| convert::cvt_u16_i32(x.elements);

    // to U32x8
    F64x2 => U32x8, |x| zero_extend_si(sse_convert::cvt_f64_u32(x.elements));
    F32x4 => U32x8, |x| zero_extend_si(sse_convert::cvt_f32_u32(x.elements));
    I32x4 => U32x8, |x| zero_extend_si(x.elements);
    U32x4 => U32x8, |x| zero_extend_si(x.elements);
    I16x8 => U32x8, |x| convert::cvt_i16_i32(x.elements);
    U16x8 => U32x8, |x| convert::cvt_u16_i32(x.elements);

    // to I16x16
    F64x2 => I16x16, |x| zero_extend_si(sse_convert::pack_i32_i16(
        sse_convert::cvt_f64_i32(x.elements),
        unsafe { _mm_setzero_si128() },
    ));
    F32x4 => I16x16, |x| zero_extend_si(sse_convert::pack_i32_i16(
        sse_convert::cvt_f32_i32(x.elements),
        unsafe { _mm_setzero_si128() },
    ));
    I32x4 => I16x16, |x| zero_extend_si(sse_convert::pack_i32_i16(
        x.elements,
        unsafe { _mm_setzero_si128() },
    ));
    U32x4 => I16x16, |x| zero_extend_si(sse_convert::pack_u32_i16(
        x.elements,
        unsafe { _mm_setzero_si128() },
    ));
    I16x8 => I16x16, |x| zero_extend_si(x.elements);
    U16x8 => I16x16, |x| zero_extend_si(x.elements);

    // to U16x16
    F64x2 => U16x16, |x| zero_extend_si(sse_convert::pack_i32_u16(
        sse_convert::cvt_f64_i32(x.elements),
        unsafe { _mm_setzero_si128() },
    ));
    F32x4 => U16x16, |x| zero_extend_si(sse_convert::pack_i32_u16(
        sse_convert::cvt_f32_i32(x.elements),
        unsafe { _mm_setzero_si128() },
    ));
    I32x4 => U16x16, |x| zero_extend_si(sse_convert::pack_i32_u16(
        x.elements,
        unsafe { _mm_setzero_si128() },
    ));
    U32x4 => U16x16, |x| zero_extend_si(sse_convert::pack_u32_u16(
        x.elements,
        unsafe { _mm_setzero_si128() },
    ));
    I16x8 => U16x16, |x| zero_extend_si(x.elements);
    U16x8 => U16x16, |x| zero_extend_si(x.elements);
}

// 2 SSE registers to 1 AVX register {{{1

impl_cast_2! {
    F64x2 => F64x4, |x0, x1| concat_pd(x0.elements, x1.elements);
    F32x4 => F32x8, |x0, x1| concat_ps(x0.elements, x1.elements);
    I32x4 => I32x8, |x0, x1| concat_si(x0.elements, x1.elements);
    U32x4 => I32x8, |x0, x1| concat_si(x0.elements, x1.elements);
    I32x4 => U32x8, |x0, x1| concat_si(x0.elements, x1.elements);
    U32x4 => U32x8, |x0, x1| concat_si(x0.elements, x1.elements);
    I16x8 => I16x16, |x0, x1| concat_si(x0.elements, x1.elements);
    U16x8 => I16x16, |x0, x1| concat_si(x0.elements, x1.elements);
    I16x8 => U16x16, |x0, x1| concat_si(x0.elements, x1.elements);
    U16x8 => U16x16, |x0, x1| concat_si(x0.elements, x1.elements);

    I32x4 => F32x8, |x0, x1| convert::cvt_i32_f32(concat_si(x0.elements, x1.elements));
    U32x4 => F32x8, |x0, x1| convert::cvt_u32_f32(concat_si(x0.elements, x1.elements));
    F32x4 => I32x8, |x0, x1| convert::cvt_f32_i32(concat_ps(x0.elements, x1.elements));
    F32x4 => U32x8, |x0, x1| convert::cvt_f32_u32(concat_ps(x0.elements, x1.elements));
}

impl SimdCast<F32x8> for (F64x2, F64x2) {
    #[inline(always)]
    fn simd_cast(self) -> F32x8 {
        let narrowed: F32x4 = self.simd_cast();
        F32x8::from_raw(zero_extend_ps(narrowed.elements))
    }
}

impl SimdCast<I32x8> for (F64x2, F64x2) {
    #[inline(always)]
    fn simd_cast(self) -> I32x8 {
        let narrowed: I32x4 = self.simd_cast();
        I32x8::from_raw(zero_extend_si(narrowed.elements))
    }
}

impl SimdCast<U32x8> for (F64x2, F64x2) {
    #[inline(always)]
    fn simd_cast(self) -> U32x8 {
        let narrowed: U32x4 = self.simd_cast();
        U32x8::from_raw(zero_extend_si(narrowed.elements))
    }
}

macro_rules! impl_sse_pair_via_128 {
    ($($src:ty => $dst:ty, via $mid:ty;)*) => {$(
        impl SimdCast<$dst> for ($src, $src) {
            #[inline(always)]
            fn simd_cast(self) -> $dst {
                let narrowed: $mid = self.simd_cast();
                <$dst>::from_raw(zero_extend_si(narrowed.elements))
            }
        }
    )*};
}

impl_sse_pair_via_128! {
    F64x2 => I16x16, via I16x8;
    F64x2 => U16x16, via U16x8;
    F32x4 => I16x16, via I16x8;
    F32x4 => U16x16, via U16x8;
    I32x4 => I16x16, via I16x8;
    I32x4 => U16x16, via U16x8;
    U32x4 => I16x16, via I16x8;
    U32x4 => U16x16, via U16x8;
}

// 4 SSE registers to 1 AVX register {{{1

macro_rules! impl_sse_quad_via_pairs {
    ($($src:ty => $dst:ty, via $mid:ty;)*) => {$(
        impl SimdCast<$dst> for ($src, $src, $src, $src) {
            #[inline(always)]
            fn simd_cast(self) -> $dst {
                let (x0, x1, x2, x3) = self;
                let low: $mid = (x0, x1).simd_cast();
                let high: $mid = (x2, x3).simd_cast();
                (low, high).simd_cast()
            }
        }
    )*};
}

impl_sse_quad_via_pairs! {
    // pairs concatenate to 256-bit intermediates, the final pack combines
    F64x2 => F32x8, via F64x4;
    F64x2 => I32x8, via F64x4;
    F64x2 => U32x8, via F64x4;
    I32x4 => I16x16, via I32x8;
    I32x4 => U16x16, via I32x8;
    U32x4 => I16x16, via U32x8;
    U32x4 => U16x16, via U32x8;
    F32x4 => I16x16, via F32x8;
    F32x4 => U16x16, via F32x8;
}

impl SimdCast<I16x16> for (F64x2, F64x2, F64x2, F64x2) {
    #[inline(always)]
    fn simd_cast(self) -> I16x16 {
        let narrowed: I16x8 = self.simd_cast();
        I16x16::from_raw(zero_extend_si(narrowed.elements))
    }
}

impl SimdCast<U16x16> for (F64x2, F64x2, F64x2, F64x2) {
    #[inline(always)]
    fn simd_cast(self) -> U16x16 {
        let narrowed: U16x8 = self.simd_cast();
        U16x16::from_raw(zero_extend_si(narrowed.elements))
    }
}

// 8 SSE registers to 1 AVX register {{{1

impl SimdCast<I16x16> for (F64x2, F64x2, F64x2, F64x2, F64x2, F64x2, F64x2, F64x2) {
    #[inline(always)]
    fn simd_cast(self) -> I16x16 {
        let (x0, x1, x2, x3, x4, x5, x6, x7) = self;
        let low: I16x8 = (x0, x1, x2, x3).simd_cast();
        let high: I16x8 = (x4, x5, x6, x7).simd_cast();
        I16x16::from_raw(concat_si(low.elements, high.elements))
    }
}

impl SimdCast<U16x16> for (F64x2, F64x2, F64x2, F64x2, F64x2, F64x2, F64x2, F64x2) {
    #[inline(always)]
    fn simd_cast(self) -> U16x16 {
        let (x0, x1, x2, x3, x4, x5, x6, x7) = self;
        let low: U16x8 = (x0, x1, x2, x3).simd_cast();
        let high: U16x8 = (x4, x5, x6, x7).simd_cast();
        U16x16::from_raw(concat_si(low.elements, high.elements))
    }
}

// 1 AVX register to 1 SSE register {{{1

// Full-register conversions: every source lane lands in the destination.
impl_cast_1! {
    F64x4 => F32x4, |x| convert::cvt_f64_f32(x.elements);
    F64x4 => I32x4, |x| convert::cvt_f64_i32(x.elements);
    F64x4 => U32x4, |x| convert::cvt_f64_u32(x.elements);
    F64x4 => I16x8, |x| sse_convert::pack_i32_i16(
        convert::cvt_f64_i32(x.elements),
        unsafe { _mm_setzero_si128() },
    );
    F64x4 => U16x8, |x| sse_convert::pack_i32_u16(
        convert::cvt_f64_i32(x.elements),
        unsafe { _mm_setzero_si128() },
    );
    F32x8 => I16x8, |x| {
        let truncated = convert::cvt_f32_i32(x.elements);
        sse_convert::pack_i32_i16(lo128_si(truncated), hi128_si(truncated))
    };
    F32x8 => U16x8, |x| {
        let truncated = convert::cvt_f32_i32(x.elements);
        sse_convert::pack_i32_u16(lo128_si(truncated), hi128_si(truncated))
    };
    I32x8 => I16x8, |x| sse_convert::pack_i32_i16(lo128_si(x.elements), hi128_si(x.elements));
    I32x8 => U16x8, |x| sse_convert::pack_i32_u16(lo128_si(x.elements), hi128_si(x.elements));
    U32x8 => I16x8, |x| sse_convert::pack_u32_i16(lo128_si(x.elements), hi128_si(x.elements));
    U32x8 => U16x8, |x| sse_convert::pack_u32_u16(lo128_si(x.elements), hi128_si(x.elements));
}

// Truncating conversions: the low half feeds the 128-bit table.
macro_rules! impl_avx_to_sse_via_low {
    ($($src:ty => $dst:ty;)*) => {$(
        impl SimdCast<$dst> for $src {
            #[inline(always)]
            fn simd_cast(self) -> $dst {
                self.low_shifted(0).simd_cast()
            }
        }
    )*};
}

impl_avx_to_sse_via_low! {
    F64x4 => F64x2;
    F32x8 => F32x4;
    F32x8 => F64x2;
    F32x8 => I32x4;
    F32x8 => U32x4;
    I32x8 => I32x4;
    I32x8 => U32x4;
    I32x8 => F32x4;
    I32x8 => F64x2;
    U32x8 => I32x4;
    U32x8 => U32x4;
    U32x8 => F32x4;
    U32x8 => F64x2;
    I16x16 => I16x8;
    I16x16 => U16x8;
    I16x16 => I32x4;
    I16x16 => U32x4;
    I16x16 => F32x4;
    I16x16 => F64x2;
    U16x16 => I16x8;
    U16x16 => U16x8;
    U16x16 => I32x4;
    U16x16 => U32x4;
    U16x16 => F32x4;
    U16x16 => F64x2;
}

// Scalar bridge {{{1

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
    F32x8, f32, 8;
    F64x4, f64, 4;
    I32x8, i32, 8;
    U32x8, u32, 8;
    I16x16, i16, 16;
    U16x16, u16, 16;
}

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
    F32x8, f32, 8;
    F64x4, f64, 4;
    I32x8, i32, 8;
    U32x8, u32, 8;
    I16x16, i16, 16;
    U16x16, u16, 16;
}

// Offset casts {{{1

// 256-bit source: shift the selected lanes down into a 128-bit register,
// then run the plain cast on that.
macro_rules! impl_cast_offset_256 {
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

impl_cast_offset_256! {
    // same-type truncation
    F32x8, 8 => F32x4, 4;
    F64x4, 4 => F64x2, 2;
    I32x8, 8 => I32x4, 4;
    U32x8, 8 => U32x4, 4;
    I16x16, 16 => I16x8, 8;
    U16x16, 16 => U16x8, 8;

    // converting truncation to 128-bit destinations
    I16x16, 16 => I32x4, 4;
    I16x16, 16 => U32x4, 4;
    I16x16, 16 => F32x4, 4;
    I16x16, 16 => F64x2, 2;
    U16x16, 16 => I32x4, 4;
    U16x16, 16 => U32x4, 4;
    U16x16, 16 => F32x4, 4;
    U16x16, 16 => F64x2, 2;
    I32x8, 8 => F64x2, 2;
    U32x8, 8 => F64x2, 2;
    F32x8, 8 => F64x2, 2;

    // converting selection with a 256-bit destination
    I16x16, 16 => I32x8, 8;
    I16x16, 16 => U32x8, 8;
    I16x16, 16 => F32x8, 8;
    I16x16, 16 => F64x4, 4;
    U16x16, 16 => I32x8, 8;
    U16x16, 16 => U32x8, 8;
    U16x16, 16 => F32x8, 8;
    U16x16, 16 => F64x4, 4;
    I32x8, 8 => F64x4, 4;
    U32x8, 8 => F64x4, 4;
    F32x8, 8 => F64x4, 4;
}

// 128-bit source widening into a 256-bit destination with an offset.
macro_rules! impl_cast_offset_128_to_256 {
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

impl_cast_offset_128_to_256! {
    I16x8, 8 => F64x4, 4;
    U16x8, 8 => F64x4, 4;
    I16x8, 8 => I32x8, 8;
    U16x8, 8 => U32x8, 8;
    U16x8, 8 => I32x8, 8;
    I16x8, 8 => U32x8, 8;
    I16x8, 8 => F32x8, 8;
    U16x8, 8 => F32x8, 8;
}

#[cfg(test)]
mod tests {
    use super::*;

    mod within_avx {
        use super::*;

        #[test]
        fn test_i32_to_i16_saturates_into_low_half() {
            let x = I32x8::from_array([40_000, -40_000, 1, 2, 3, 4, 5, 6]);
            let packed: I16x16 = x.simd_cast();
            assert_eq!(
                packed.to_array(),
                [i16::MAX, i16::MIN, 1, 2, 3, 4, 5, 6, 0, 0, 0, 0, 0, 0, 0, 0]
            );
        }

        #[test]
        fn test_two_i32x8_to_i16x16_order() {
            let a = I32x8::from_array([0, 1, 2, 3, 4, 5, 6, 7]);
            let b = I32x8::from_array([8, 9, 10, 11, 12, 13, 14, 15]);
            let out: I16x16 = (a, b).simd_cast();
            assert_eq!(
                out.to_array(),
                [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]
            );
        }

        #[test]
        fn test_four_f64x4_to_i16x16_order() {
            let a = F64x4::from_array([1.0, 2.0, 3.0, 4.0]);
            let b = F64x4::from_array([5.0, 6.0, 7.0, 8.0]);
            let c = F64x4::from_array([9.0, 10.0, 11.0, 12.0]);
            let d = F64x4::from_array([13.0, 14.0, 15.0, 16.0]);
            let out: I16x16 = (a, b, c, d).simd_cast();
            assert_eq!(
                out.to_array(),
                [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16]
            );
        }

        #[test]
        fn test_u32_to_f32_full_register() {
            let x = U32x8::from_array([0, 1, 0x8000_0000, u32::MAX, 2, 3, 4, 5]);
            let out: F32x8 = x.simd_cast();
            assert_eq!(
                out.to_array(),
                [0.0, 1.0, 2_147_483_648.0, 4_294_967_296.0, 2.0, 3.0, 4.0, 5.0]
            );
        }
    }

    mod across_widths {
        use super::*;

        #[test]
        fn test_extend_zeroes_upper_half() {
            let x = I32x4::from_array([1, 2, 3, 4]);
            let wide: I32x8 = x.simd_cast();
            assert_eq!(wide.to_array(), [1, 2, 3, 4, 0, 0, 0, 0]);
        }

        #[test]
        fn test_extend_then_truncate_identity() {
            let x = F32x4::from_array([1.5, -2.5, 3.5, -4.5]);
            let wide: F32x8 = x.simd_cast();
            let back: F32x4 = wide.simd_cast_offset::<0>();
            assert_eq!(back.to_array(), x.to_array());

            let upper: F32x4 = wide.simd_cast_offset::<1>();
            assert_eq!(upper.to_array(), [0.0; 4]);
        }

        #[test]
        fn test_concat_pairs() {
            let a = I16x8::from_array([0, 1, 2, 3, 4, 5, 6, 7]);
            let b = I16x8::from_array([8, 9, 10, 11, 12, 13, 14, 15]);
            let wide: I16x16 = (a, b).simd_cast();
            assert_eq!(
                wide.to_array(),
                [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]
            );
        }

        #[test]
        fn test_eight_f64x2_to_i16x16() {
            let regs: Vec<F64x2> =
                (0..8).map(|i| F64x2::from_array([(2 * i) as f64, (2 * i + 1) as f64])).collect();
            let out: I16x16 = (
                regs[0], regs[1], regs[2], regs[3], regs[4], regs[5], regs[6], regs[7],
            )
                .simd_cast();
            assert_eq!(
                out.to_array(),
                [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]
            );
        }

        #[test]
        fn test_four_i32x4_to_u16x16_saturates() {
            let a = I32x4::from_array([-1, 0x1_0000, 1, 2]);
            let b = I32x4::from_array([3, 4, 5, 6]);
            let c = I32x4::from_array([7, 8, 9, 10]);
            let d = I32x4::from_array([11, 12, 13, 14]);
            let out: U16x16 = (a, b, c, d).simd_cast();
            assert_eq!(
                out.to_array(),
                [0, 0xFFFF, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14]
            );
        }

        #[test]
        fn test_avx_to_sse_full_width_pack() {
            let x = I32x8::from_array([40_000, -40_000, 1, 2, 3, 4, 5, 6]);
            let out: I16x8 = x.simd_cast();
            assert_eq!(out.to_array(), [i16::MAX, i16::MIN, 1, 2, 3, 4, 5, 6]);
        }
    }

    mod offsets {
        use super::*;

        #[test]
        fn test_i16x16_quarters_to_f64x4() {
            let x = I16x16::from_array([0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]);
            let q0: F64x4 = x.simd_cast_offset::<0>();
            let q1: F64x4 = x.simd_cast_offset::<1>();
            let q3: F64x4 = x.simd_cast_offset::<3>();
            assert_eq!(q0.to_array(), [0.0, 1.0, 2.0, 3.0]);
            assert_eq!(q1.to_array(), [4.0, 5.0, 6.0, 7.0]);
            assert_eq!(q3.to_array(), [12.0, 13.0, 14.0, 15.0]);
        }

        #[test]
        fn test_u16x16_halves_to_u32x8() {
            let values: [u16; 16] = core::array::from_fn(|i| (i as u16) * 1000);
            let x = U16x16::from_array(values);
            let low: U32x8 = x.simd_cast_offset::<0>();
            let high: U32x8 = x.simd_cast_offset::<1>();
            assert_eq!(low.to_array(), core::array::from_fn(|i| (i as u32) * 1000));
            assert_eq!(
                high.to_array(),
                core::array::from_fn(|i| ((i + 8) as u32) * 1000)
            );
        }

        #[test]
        fn test_f32x8_halves_to_f64x4() {
            let x = F32x8::from_array([0.5, 1.5, 2.5, 3.5, 4.5, 5.5, 6.5, 7.5]);
            let low: F64x4 = x.simd_cast_offset::<0>();
            let high: F64x4 = x.simd_cast_offset::<1>();
            assert_eq!(low.to_array(), [0.5, 1.5, 2.5, 3.5]);
            assert_eq!(high.to_array(), [4.5, 5.5, 6.5, 7.5]);
        }

        #[test]
        fn test_sse_source_offset_into_avx() {
            let x = I16x8::from_array([1, 2, 3, 4, 5, 6, 7, 8]);
            let high: F64x4 = x.simd_cast_offset::<1>();
            assert_eq!(high.to_array(), [5.0, 6.0, 7.0, 8.0]);
        }
    }

    mod scalar_bridge {
        use super::*;

        #[test]
        fn test_scalar_gather_sixteen() {
            let scalars: [Scalar<i32>; 16] = core::array::from_fn(|i| Scalar::new(i as i32));
            let out: I16x16 = scalars.simd_cast();
            assert_eq!(out.to_array(), core::array::from_fn(|i| i as i16));
        }

        #[test]
        fn test_scalar_gather_partial_zero_fills() {
            let out: F32x8 = [Scalar::new(1u16), Scalar::new(2), Scalar::new(3)].simd_cast();
            assert_eq!(out.to_array(), [1.0, 2.0, 3.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        }

        #[test]
        fn test_extract_offset_lane() {
            let x = U32x8::from_array([0, 10, 20, 30, 40, 50, 60, 0x8000_0001]);
            let lane: Scalar<f64> = x.simd_cast_offset::<7>();
            assert_eq!(lane.value(), 2_147_483_649.0);
        }
    }
}
