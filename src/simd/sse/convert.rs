//! Primitive per-lane conversions between element types, 128-bit registers.
//!
//! These are the leaf operations every cast composes: one hardware convert,
//! or the shortest correct sequence where the hardware has no direct
//! instruction. Unsigned 32-bit sources need special care throughout because
//! the signed convert instructions would misread the most significant bit.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// f32 lanes to i32 lanes, truncating toward zero.
#[inline(always)]
pub(crate) fn cvt_f32_i32(v: __m128) -> __m128i {
    unsafe { _mm_cvttps_epi32(v) }
}

/// f64 lanes to i32 lanes, truncating toward zero. The two results land in
/// the low lanes, the high lanes are zero.
#[inline(always)]
pub(crate) fn cvt_f64_i32(v: __m128d) -> __m128i {
    unsafe { _mm_cvttpd_epi32(v) }
}

/// Low 4 i16 lanes sign-extended to i32 lanes.
#[inline(always)]
pub(crate) fn cvt_i16_i32(v: __m128i) -> __m128i {
    unsafe { _mm_cvtepi16_epi32(v) }
}

/// Low 4 u16 lanes zero-extended to u32 lanes.
#[inline(always)]
pub(crate) fn cvt_u16_i32(v: __m128i) -> __m128i {
    unsafe { _mm_cvtepu16_epi32(v) }
}

/// f32 lanes to u32 lanes, truncating toward zero.
///
/// The hardware truncate instruction is signed-only. Inputs at or above 2^31
/// are shifted down by 2^31 before the convert and the result's top bit is
/// restored with an xor; a compare/blend selects between the plain and the
/// biased path per lane.
#[inline(always)]
pub(crate) fn cvt_f32_u32(v: __m128) -> __m128i {
    unsafe {
        let two_pow_31 = _mm_set1_ps(2_147_483_648.0);
        let plain = _mm_cvttps_epi32(v);
        let biased = _mm_xor_si128(
            _mm_cvttps_epi32(_mm_sub_ps(v, two_pow_31)),
            _mm_set1_epi32(i32::MIN),
        );
        let use_biased = _mm_cmpge_ps(v, two_pow_31);
        _mm_castps_si128(_mm_blendv_ps(
            _mm_castsi128_ps(plain),
            _mm_castsi128_ps(biased),
            use_biased,
        ))
    }
}

/// f64 lanes to u32 lanes, truncating toward zero; results in the low lanes.
///
/// Flooring before the bias subtraction matters: truncating the biased value
/// would round toward zero of the *shifted* number, which rounds the wrong
/// way for non-integral inputs below 2^31.
#[inline(always)]
pub(crate) fn cvt_f64_u32(v: __m128d) -> __m128i {
    unsafe {
        let shifted = _mm_sub_pd(_mm_floor_pd(v), _mm_set1_pd(2_147_483_648.0));
        _mm_xor_si128(
            _mm_cvttpd_epi32(shifted),
            _mm_setr_epi32(i32::MIN, i32::MIN, 0, 0),
        )
    }
}

/// f64 lanes narrowed to f32 lanes; results in the low lanes, high lanes
/// zero. IEEE overflow produces infinities, no saturation applies.
#[inline(always)]
pub(crate) fn cvt_f64_f32(v: __m128d) -> __m128 {
    unsafe { _mm_cvtpd_ps(v) }
}

/// i32 lanes to f32 lanes, round to nearest.
#[inline(always)]
pub(crate) fn cvt_i32_f32(v: __m128i) -> __m128 {
    unsafe { _mm_cvtepi32_ps(v) }
}

/// u32 lanes to f32 lanes, round to nearest.
///
/// The signed convert instruction would read the MSB as a sign. Clearing the
/// MSB and adding float(2^31) afterwards is not enough either: the rounding
/// decision for a 32-bit value sits in its low 9 bits once the 24-bit
/// mantissa is full, and the plain masked convert would decide on the wrong
/// bits. Splitting the value as (v & 0x7fff_fe00) + (2^31 + (v & 0x1ff))
/// keeps both partial converts exact, so the single rounding happens in the
/// final addition, on the true value.
#[inline(always)]
pub(crate) fn cvt_u32_f32(v: __m128i) -> __m128 {
    unsafe {
        let plain = _mm_cvtepi32_ps(v);
        let high_part = _mm_cvtepi32_ps(_mm_and_si128(v, _mm_set1_epi32(0x7fff_fe00)));
        let low_part = _mm_cvtepi32_ps(_mm_and_si128(v, _mm_set1_epi32(0x0000_01ff)));
        let biased = _mm_add_ps(
            high_part,
            _mm_add_ps(_mm_set1_ps(2_147_483_648.0), low_part),
        );
        let msb_set = _mm_castsi128_ps(_mm_cmplt_epi32(v, _mm_setzero_si128()));
        _mm_blendv_ps(plain, biased, msb_set)
    }
}

/// Low 2 f32 lanes widened to f64 lanes.
#[inline(always)]
pub(crate) fn cvt_f32_f64(v: __m128) -> __m128d {
    unsafe { _mm_cvtps_pd(v) }
}

/// Low 2 i32 lanes converted to f64 lanes (exact).
#[inline(always)]
pub(crate) fn cvt_i32_f64(v: __m128i) -> __m128d {
    unsafe { _mm_cvtepi32_pd(v) }
}

/// Low 2 u32 lanes converted to f64 lanes (exact).
///
/// Flipping the MSB maps u32 onto the signed range shifted by 2^31; the
/// signed convert is exact, and adding 2^31.0 (also exact in f64) restores
/// the value.
#[inline(always)]
pub(crate) fn cvt_u32_f64(v: __m128i) -> __m128d {
    unsafe {
        _mm_add_pd(
            _mm_cvtepi32_pd(_mm_xor_si128(v, _mm_set1_epi32(i32::MIN))),
            _mm_set1_pd(2_147_483_648.0),
        )
    }
}

/// Two registers of i32 lanes packed to one register of i16 lanes, signed
/// saturating: out-of-range values clamp to i16::MIN / i16::MAX.
#[inline(always)]
pub(crate) fn pack_i32_i16(a: __m128i, b: __m128i) -> __m128i {
    unsafe { _mm_packs_epi32(a, b) }
}

/// Two registers of i32 lanes packed to one register of u16 lanes, unsigned
/// saturating: negative values clamp to 0, values above u16::MAX to 0xFFFF.
#[inline(always)]
pub(crate) fn pack_i32_u16(a: __m128i, b: __m128i) -> __m128i {
    unsafe { _mm_packus_epi32(a, b) }
}

/// Two registers of u32 lanes packed to one register of i16 lanes,
/// saturating at i16::MAX. The unsigned min must run before the signed pack,
/// otherwise sources above i32::MAX would be read as negative and clamp low.
#[inline(always)]
pub(crate) fn pack_u32_i16(a: __m128i, b: __m128i) -> __m128i {
    unsafe {
        let limit = _mm_set1_epi32(i16::MAX as i32);
        _mm_packs_epi32(_mm_min_epu32(a, limit), _mm_min_epu32(b, limit))
    }
}

/// Two registers of u32 lanes packed to one register of u16 lanes,
/// saturating at u16::MAX. Same unsigned-min-first reasoning as
/// [`pack_u32_i16`].
#[inline(always)]
pub(crate) fn pack_u32_u16(a: __m128i, b: __m128i) -> __m128i {
    unsafe {
        let limit = _mm_set1_epi32(u16::MAX as i32);
        _mm_packus_epi32(_mm_min_epu32(a, limit), _mm_min_epu32(b, limit))
    }
}
