//! Primitive per-lane conversions between element types, 256-bit registers.
//!
//! Mirrors the 128-bit table at double the width. The 256-bit integer packs
//! operate per 128-bit half, so every pack is followed by a 64-bit lane
//! permute that restores ascending lane order.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// f32 lanes to i32 lanes, truncating toward zero.
#[inline(always)]
pub(crate) fn cvt_f32_i32(v: __m256) -> __m256i {
    unsafe { _mm256_cvttps_epi32(v) }
}

/// 4 f64 lanes to 4 i32 lanes (a 128-bit result), truncating toward zero.
#[inline(always)]
pub(crate) fn cvt_f64_i32(v: __m256d) -> __m128i {
    unsafe { _mm256_cvttpd_epi32(v) }
}

/// 8 i16 lanes sign-extended to 8 i32 lanes.
#[inline(always)]
pub(crate) fn cvt_i16_i32(v: __m128i) -> __m256i {
    unsafe { _mm256_cvtepi16_epi32(v) }
}

/// 8 u16 lanes zero-extended to 8 u32 lanes.
#[inline(always)]
pub(crate) fn cvt_u16_i32(v: __m128i) -> __m256i {
    unsafe { _mm256_cvtepu16_epi32(v) }
}

/// f32 lanes to u32 lanes, truncating toward zero. Same bias-and-correct
/// scheme as the 128-bit version: inputs at or above 2^31 convert shifted
/// and get the top bit restored, a compare/blend selects per lane.
#[inline(always)]
pub(crate) fn cvt_f32_u32(v: __m256) -> __m256i {
    unsafe {
        let two_pow_31 = _mm256_set1_ps(2_147_483_648.0);
        let plain = _mm256_cvttps_epi32(v);
        let biased = _mm256_add_epi32(
            _mm256_cvttps_epi32(_mm256_sub_ps(v, two_pow_31)),
            _mm256_set1_epi32(i32::MIN),
        );
        let use_biased = _mm256_castps_si256(_mm256_cmp_ps::<_CMP_GE_OQ>(v, two_pow_31));
        _mm256_blendv_epi8(plain, biased, use_biased)
    }
}

/// 4 f64 lanes to 4 u32 lanes (a 128-bit result), truncating toward zero.
/// Floor before the bias subtraction, as in the 128-bit version.
#[inline(always)]
pub(crate) fn cvt_f64_u32(v: __m256d) -> __m128i {
    unsafe {
        let shifted = _mm256_sub_pd(_mm256_floor_pd(v), _mm256_set1_pd(2_147_483_648.0));
        _mm_xor_si128(_mm256_cvttpd_epi32(shifted), _mm_set1_epi32(i32::MIN))
    }
}

/// 4 f64 lanes narrowed to 4 f32 lanes (a 128-bit result).
#[inline(always)]
pub(crate) fn cvt_f64_f32(v: __m256d) -> __m128 {
    unsafe { _mm256_cvtpd_ps(v) }
}

/// i32 lanes to f32 lanes, round to nearest.
#[inline(always)]
pub(crate) fn cvt_i32_f32(v: __m256i) -> __m256 {
    unsafe { _mm256_cvtepi32_ps(v) }
}

/// u32 lanes to f32 lanes, round to nearest. The two-part split keeps the
/// rounding decision on the low 9 bits of the true value; see the 128-bit
/// version for the full derivation.
#[inline(always)]
pub(crate) fn cvt_u32_f32(v: __m256i) -> __m256 {
    unsafe {
        let plain = _mm256_cvtepi32_ps(v);
        let high_part =
            _mm256_cvtepi32_ps(_mm256_and_si256(v, _mm256_set1_epi32(0x7fff_fe00)));
        let low_part =
            _mm256_cvtepi32_ps(_mm256_and_si256(v, _mm256_set1_epi32(0x0000_01ff)));
        let biased = _mm256_add_ps(
            high_part,
            _mm256_add_ps(_mm256_set1_ps(2_147_483_648.0), low_part),
        );
        let msb_set = _mm256_castsi256_ps(_mm256_cmpgt_epi32(_mm256_setzero_si256(), v));
        _mm256_blendv_ps(plain, biased, msb_set)
    }
}

/// 4 f32 lanes widened to 4 f64 lanes.
#[inline(always)]
pub(crate) fn cvt_f32_f64(v: __m128) -> __m256d {
    unsafe { _mm256_cvtps_pd(v) }
}

/// 4 i32 lanes converted to 4 f64 lanes (exact).
#[inline(always)]
pub(crate) fn cvt_i32_f64(v: __m128i) -> __m256d {
    unsafe { _mm256_cvtepi32_pd(v) }
}

/// 4 u32 lanes converted to 4 f64 lanes (exact), via the MSB flip.
#[inline(always)]
pub(crate) fn cvt_u32_f64(v: __m128i) -> __m256d {
    unsafe {
        _mm256_add_pd(
            _mm256_cvtepi32_pd(_mm_xor_si128(v, _mm_set1_epi32(i32::MIN))),
            _mm256_set1_pd(2_147_483_648.0),
        )
    }
}

// Restores ascending lane order after a per-half 256-bit pack: the packed
// quarters come out as [a.lo, b.lo, a.hi, b.hi] and the permute swaps the
// middle two.
#[inline(always)]
fn fix_pack_order(v: __m256i) -> __m256i {
    unsafe { _mm256_permute4x64_epi64::<0b1101_1000>(v) }
}

/// Two registers of i32 lanes packed to one register of i16 lanes, signed
/// saturating, ascending lane order.
#[inline(always)]
pub(crate) fn pack_i32_i16(a: __m256i, b: __m256i) -> __m256i {
    unsafe { fix_pack_order(_mm256_packs_epi32(a, b)) }
}

/// Two registers of i32 lanes packed to one register of u16 lanes, unsigned
/// saturating, ascending lane order.
#[inline(always)]
pub(crate) fn pack_i32_u16(a: __m256i, b: __m256i) -> __m256i {
    unsafe { fix_pack_order(_mm256_packus_epi32(a, b)) }
}

/// Two registers of u32 lanes packed to one register of i16 lanes. Unsigned
/// min before the signed pack, as in the 128-bit version.
#[inline(always)]
pub(crate) fn pack_u32_i16(a: __m256i, b: __m256i) -> __m256i {
    unsafe {
        let limit = _mm256_set1_epi32(i16::MAX as i32);
        fix_pack_order(_mm256_packs_epi32(
            _mm256_min_epu32(a, limit),
            _mm256_min_epu32(b, limit),
        ))
    }
}

/// Two registers of u32 lanes packed to one register of u16 lanes.
#[inline(always)]
pub(crate) fn pack_u32_u16(a: __m256i, b: __m256i) -> __m256i {
    unsafe {
        let limit = _mm256_set1_epi32(u16::MAX as i32);
        fix_pack_order(_mm256_packus_epi32(
            _mm256_min_epu32(a, limit),
            _mm256_min_epu32(b, limit),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::avx2::{F32x8, F64x4, I16x16, I32x8, U32x8};
    use crate::simd::sse::{F32x4, I32x4, U32x4};

    #[test]
    fn test_truncation_toward_zero() {
        let v = F32x8::from_array([1.9, -1.9, 2.5, -2.5, 0.1, -0.1, 100.7, -100.7]);
        let out = I32x8::from_raw(cvt_f32_i32(v.elements));
        assert_eq!(out.to_array(), [1, -1, 2, -2, 0, 0, 100, -100]);
    }

    #[test]
    fn test_f64_to_u32_all_four_lanes() {
        let v = F64x4::from_array([5.5, 3_000_000_000.7, 0.0, 4_294_967_295.0]);
        let out = U32x4::from_raw(cvt_f64_u32(v.elements));
        assert_eq!(out.to_array(), [5, 3_000_000_000, 0, u32::MAX]);
    }

    #[test]
    fn test_u32_to_f32_rounding_boundary() {
        let inputs = [
            0xC000_0080u32,
            0xC000_0081,
            0xC000_017F,
            0xC000_0180,
            0x8000_0001,
            u32::MAX,
            0,
            1,
        ];
        let v = U32x8::from_array(inputs);
        let out = F32x8::from_raw(cvt_u32_f32(v.elements)).to_array();
        let expected = inputs.map(|value| value as f32);
        assert_eq!(out, expected);
    }

    #[test]
    fn test_f32_to_u32_bias() {
        let v = F32x8::from_array([
            0.0,
            3.5,
            2_147_483_648.0,
            4_294_967_040.0,
            1.0,
            2.0,
            3.0,
            4.0,
        ]);
        let out = U32x8::from_raw(cvt_f32_u32(v.elements));
        assert_eq!(
            out.to_array(),
            [0, 3, 0x8000_0000, 4_294_967_040, 1, 2, 3, 4]
        );
    }

    #[test]
    fn test_pack_restores_lane_order() {
        let a = I32x8::from_array([0, 1, 2, 3, 4, 5, 6, 7]);
        let b = I32x8::from_array([8, 9, 10, 11, 12, 13, 14, 15]);
        let packed = I16x16::from_raw(pack_i32_i16(a.elements, b.elements));
        assert_eq!(
            packed.to_array(),
            [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]
        );
    }

    #[test]
    fn test_pack_saturates() {
        let a = I32x8::from_array([40_000, -40_000, 7, -7, 0, 1, -1, 2]);
        let packed = I16x16::from_raw(pack_i32_i16(a.elements, a.elements));
        assert_eq!(
            &packed.to_array()[..8],
            &[i16::MAX, i16::MIN, 7, -7, 0, 1, -1, 2]
        );
    }

    #[test]
    fn test_widening_conversions() {
        let v = F32x4::from_array([1.5, 2.5, 3.5, 4.5]);
        let wide = F64x4::from_raw(cvt_f32_f64(v.elements));
        assert_eq!(wide.to_array(), [1.5, 2.5, 3.5, 4.5]);

        let u = U32x4::from_array([0x8000_0001, u32::MAX, 0, 1]);
        let as_f64 = F64x4::from_raw(cvt_u32_f64(u.elements));
        assert_eq!(
            as_f64.to_array(),
            [2_147_483_649.0, 4_294_967_295.0, 0.0, 1.0]
        );

        let s = I32x4::from_array([-1, i32::MIN, i32::MAX, 0]);
        let sd = F64x4::from_raw(cvt_i32_f64(s.elements));
        assert_eq!(
            sd.to_array(),
            [-1.0, i32::MIN as f64, i32::MAX as f64, 0.0]
        );
    }
}
