//! SSE4.1 slice conversion.
//!
//! Converts whole slices through the 128-bit cast engine: full registers in
//! a tight loop, a scalar tail for the remainder, and a rayon tier that
//! fans fixed-size chunks out across threads for inputs too large for the
//! cache hierarchy. The per-chunk kernels are exactly the register casts of
//! this backend; nothing here re-derives conversion semantics.

use rayon::prelude::*;

use crate::error::{length_mismatch, Result};
use crate::simd::scalar::Scalar;
use crate::simd::sse::{F32x4, F64x2, I16x8, I32x4, U16x8, U32x4};
use crate::simd::traits::{SimdCast, SimdCastOffset};
use crate::utils::alloc_uninit_vec;
use crate::PARALLEL_CHUNK_SIZE;

/// SSE memory alignment for output allocations, in bytes.
pub(crate) const SSE_ALIGNMENT: usize = 16;

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
            let mut out = alloc_uninit_vec::<$dst>(a.len(), SSE_ALIGNMENT);
            $kernel(a, &mut out);
            out
        }

        /// Multi-threaded variant: fixed-size chunks are converted on the
        /// rayon pool. Worth it only for inputs past the parallel threshold.
        pub fn $par_name(a: &[$src]) -> Vec<$dst> {
            let mut out = alloc_uninit_vec::<$dst>(a.len(), SSE_ALIGNMENT);
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
    /// Converts `f32` to `i32`, truncating toward zero, 4 lanes per step.
    f32_to_i32_chunk, simd_f32_to_i32, par_simd_f32_to_i32, simd_f32_to_i32_into,
    f32 => i32, step 4,
    |sp, dp| {
        let v: I32x4 = F32x4::load(sp).simd_cast();
        v.store_at(dp);
    }
);

convert_slice_fns!(
    /// Converts `i32` to `f32`, round to nearest, 4 lanes per step.
    i32_to_f32_chunk, simd_i32_to_f32, par_simd_i32_to_f32, simd_i32_to_f32_into,
    i32 => f32, step 4,
    |sp, dp| {
        let v: F32x4 = I32x4::load(sp).simd_cast();
        v.store_at(dp);
    }
);

convert_slice_fns!(
    /// Narrows `f64` to `f32` via the 2-register gather cast.
    f64_to_f32_chunk, simd_f64_to_f32, par_simd_f64_to_f32, simd_f64_to_f32_into,
    f64 => f32, step 4,
    |sp, dp| {
        let v: F32x4 = (F64x2::load(sp), F64x2::load(sp.add(2))).simd_cast();
        v.store_at(dp);
    }
);

convert_slice_fns!(
    /// Narrows `i32` to `i16` with saturation via the 2-register gather cast.
    i32_to_i16_chunk, simd_i32_to_i16, par_simd_i32_to_i16, simd_i32_to_i16_into,
    i32 => i16, step 8,
    |sp, dp| {
        let v: I16x8 = (I32x4::load(sp), I32x4::load(sp.add(4))).simd_cast();
        v.store_at(dp);
    }
);

convert_slice_fns!(
    /// Widens `u16` to `u32`; both register halves go through offset casts.
    u16_to_u32_chunk, simd_u16_to_u32, par_simd_u16_to_u32, simd_u16_to_u32_into,
    u16 => u32, step 8,
    |sp, dp| {
        let v = U16x8::load(sp);
        let low: U32x4 = v.simd_cast_offset::<0>();
        let high: U32x4 = v.simd_cast_offset::<1>();
        low.store_at(dp);
        high.store_at(dp.add(4));
    }
);

convert_slice_fns!(
    /// Converts `u32` to `f64` exactly; both register halves go through
    /// offset casts.
    u32_to_f64_chunk, simd_u32_to_f64, par_simd_u32_to_f64, simd_u32_to_f64_into,
    u32 => f64, step 4,
    |sp, dp| {
        let v = U32x4::load(sp);
        let low: F64x2 = v.simd_cast_offset::<0>();
        let high: F64x2 = v.simd_cast_offset::<1>();
        low.store_at(dp);
        high.store_at(dp.add(2));
    }
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::slice::scalar_convert;

    #[test]
    fn test_simd_matches_scalar_with_tail() {
        // 11 elements: two full registers plus a 3-element tail.
        let input: Vec<f32> = (0..11).map(|i| i as f32 * 1.7 - 8.0).collect();
        let simd = simd_f32_to_i32(&input);
        let scalar: Vec<i32> = scalar_convert(&input);
        assert_eq!(simd, scalar);
    }

    #[test]
    fn test_narrowing_slice_saturates() {
        let input = vec![0i32, 40_000, -40_000, 7, 1, 2, 3, 4, 100_000];
        let out = simd_i32_to_i16(&input);
        assert_eq!(out, vec![0, i16::MAX, i16::MIN, 7, 1, 2, 3, 4, i16::MAX]);
    }

    #[test]
    fn test_widening_slice() {
        let input = vec![0xFFFFu16, 0, 1, 2, 3, 4, 5, 6, 7, 8];
        let out = simd_u16_to_u32(&input);
        assert_eq!(out, vec![0xFFFF, 0, 1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_u32_to_f64_slice_large_values() {
        let input = vec![0x8000_0001u32, u32::MAX, 0, 1, 2];
        let out = simd_u32_to_f64(&input);
        assert_eq!(
            out,
            vec![2_147_483_649.0, 4_294_967_295.0, 0.0, 1.0, 2.0]
        );
    }

    #[test]
    fn test_into_length_mismatch() {
        let mut out = [0i32; 3];
        assert!(simd_f32_to_i32_into(&[1.0, 2.0], &mut out).is_err());
    }

    #[test]
    fn test_par_matches_simd() {
        let input: Vec<i32> = (0..10_000).map(|i| i * 37 - 5_000).collect();
        assert_eq!(par_simd_i32_to_f32(&input), simd_i32_to_f32(&input));
    }
}
