//! AVX2 slice conversion.
//!
//! The 256-bit counterpart of the SSE slice tier: full registers in a tight
//! loop, scalar tail, rayon chunks past the parallel threshold. Same
//! function names as the SSE module, twice the lanes per step.

use rayon::prelude::*;

use crate::error::{length_mismatch, Result};
use crate::simd::avx2::{F32x8, F64x4, I16x16, I32x8, U16x16, U32x8};
use crate::simd::scalar::Scalar;
use crate::simd::traits::{SimdCast, SimdCastOffset};
use crate::utils::alloc_uninit_vec;
use crate::PARALLEL_CHUNK_SIZE;

/// AVX memory alignment for output allocations, in bytes.
pub(crate) const AVX_ALIGNMENT: usize = 32;

macro_rules! convert_slice_fns {
    (
        $(#[$doc:meta])*
        $kernel:ident, $simd_name:ident, $par_name:ident, $into_name:ident,
        $src:ty => $dst:ty, step $step:expr,
        |$sp:ident, $dp:ident| $chunk:expr
    ) => {
        fn $kernel(src: &[$src], dst: &mut [$dst]) {
            let full = src.len() - src.len() % $step;
            for i in (0..full).step_by($step) {
                unsafe {
                    let $sp = src.as_ptr().add(i);
                    let $dp = dst.as_mut_ptr().add(i);
                    $chunk
                }
            }
            for i in full..src.len() {
                let converted: Scalar<$dst> = Scalar::new(src[i]).simd_cast();
                dst[i] = converted.value();
            }
        }

        $(#[$doc])*
        pub fn $simd_name(a: &[$src]) -> Vec<$dst> {
            let mut out = alloc_uninit_vec::<$dst>(a.len(), AVX_ALIGNMENT);
            $kernel(a, &mut out);
            out
        }

        /// Multi-threaded variant: fixed-size chunks are converted on the
        /// rayon pool. Worth it only for inputs past the parallel threshold.
        pub fn $par_name(a: &[$src]) -> Vec<$dst> {
            let mut out = alloc_uninit_vec::<$dst>(a.len(), AVX_ALIGNMENT);
            out.par_chunks_mut(PARALLEL_CHUNK_SIZE)
                .zip(a.par_chunks(PARALLEL_CHUNK_SIZE))
                .for_each(|(dst_chunk, src_chunk)| $kernel(src_chunk, dst_chunk));
            out
        }

        /// In-place variant writing into a caller-provided buffer.
        ///
        /// # Errors
        ///
        /// Returns a length-mismatch error when the buffer length differs
        /// from the input length.
        pub fn $into_name(a: &[$src], out: &mut [$dst]) -> Result<()> {
            if a.len() != out.len() {
                return Err(length_mismatch(a.len(), out.len()));
            }
            $kernel(a, out);
            Ok(())
        }
    };
}

convert_slice_fns!(
    /// Converts `f32` to `i32`, truncating toward zero, 8 lanes per step.
    f32_to_i32_chunk, simd_f32_to_i32, par_simd_f32_to_i32, simd_f32_to_i32_into,
    f32 => i32, step 8,
    |sp, dp| {
        let v: I32x8 = F32x8::load(sp).simd_cast();
        v.store_at(dp);
    }
);

convert_slice_fns!(
    /// Converts `i32` to `f32`, round to nearest, 8 lanes per step.
    i32_to_f32_chunk, simd_i32_to_f32, par_simd_i32_to_f32, simd_i32_to_f32_into,
    i32 => f32, step 8,
    |sp, dp| {
        let v: F32x8 = I32x8::load(sp).simd_cast();
        v.store_at(dp);
    }
);

convert_slice_fns!(
    /// Narrows `f64` to `f32` via the 2-register gather cast.
    f64_to_f32_chunk, simd_f64_to_f32, par_simd_f64_to_f32, simd_f64_to_f32_into,
    f64 => f32, step 8,
    |sp, dp| {
        let v: F32x8 = (F64x4::load(sp), F64x4::load(sp.add(4))).simd_cast();
        v.store_at(dp);
    }
);

convert_slice_fns!(
    /// Narrows `i32` to `i16` with saturation via the 2-register gather cast.
    i32_to_i16_chunk, simd_i32_to_i16, par_simd_i32_to_i16, simd_i32_to_i16_into,
    i32 => i16, step 16,
    |sp, dp| {
        let v: I16x16 = (I32x8::load(sp), I32x8::load(sp.add(8))).simd_cast();
        v.store_at(dp);
    }
);

convert_slice_fns!(
    /// Widens `u16` to `u32`; both register halves go through offset casts.
    u16_to_u32_chunk, simd_u16_to_u32, par_simd_u16_to_u32, simd_u16_to_u32_into,
    u16 => u32, step 16,
    |sp, dp| {
        let v = U16x16::load(sp);
        let low: U32x8 = v.simd_cast_offset::<0>();
        let high: U32x8 = v.simd_cast_offset::<1>();
        low.store_at(dp);
        high.store_at(dp.add(8));
    }
);

convert_slice_fns!(
    /// Converts `u32` to `f64` exactly; all register quarters go through
    /// offset casts.
    u32_to_f64_chunk, simd_u32_to_f64, par_simd_u32_to_f64, simd_u32_to_f64_into,
    u32 => f64, step 8,
    |sp, dp| {
        let v = U32x8::load(sp);
        let low: F64x4 = v.simd_cast_offset::<0>();
        let high: F64x4 = v.simd_cast_offset::<1>();
        low.store_at(dp);
        high.store_at(dp.add(4));
    }
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::slice::scalar_convert;

    #[test]
    fn test_simd_matches_scalar_with_tail() {
        // 21 elements: two full registers plus a 5-element tail.
        let input: Vec<f32> = (0..21).map(|i| i as f32 * 2.3 - 20.0).collect();
        let simd = simd_f32_to_i32(&input);
        let scalar: Vec<i32> = scalar_convert(&input);
        assert_eq!(simd, scalar);
    }

    #[test]
    fn test_narrowing_slice_saturates() {
        let mut input = vec![0i32; 20];
        input[0] = 50_000;
        input[1] = -50_000;
        input[17] = 123;
        let out = simd_i32_to_i16(&input);
        assert_eq!(out[0], i16::MAX);
        assert_eq!(out[1], i16::MIN);
        assert_eq!(out[17], 123);
    }

    #[test]
    fn test_widening_slice() {
        let input: Vec<u16> = (0..37).map(|i| (i * 1771) as u16).collect();
        let out = simd_u16_to_u32(&input);
        let expected: Vec<u32> = input.iter().map(|&v| v as u32).collect();
        assert_eq!(out, expected);
    }

    #[test]
    fn test_u32_to_f64_slice_large_values() {
        let input = vec![0x8000_0001u32, u32::MAX, 0, 1, 2, 3, 4, 5, 6];
        let out = simd_u32_to_f64(&input);
        let expected: Vec<f64> = input.iter().map(|&v| v as f64).collect();
        assert_eq!(out, expected);
    }

    #[test]
    fn test_par_matches_simd() {
        let input: Vec<f64> = (0..50_000).map(|i| i as f64 * 0.37 - 9_000.0).collect();
        assert_eq!(par_simd_f64_to_f32(&input), simd_f64_to_f32(&input));
    }
}
