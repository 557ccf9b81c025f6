//! Narrowing-conversion saturation tests.
//!
//! Narrowing integer casts clamp to the destination type's extremes on
//! every path: 128-bit, 256-bit and the scalar bridge must all agree.
#![cfg(sse)]

use lanecast::simd::scalar::Scalar;
use lanecast::simd::sse::{F32x4, I16x8, I32x4, U16x8, U32x4};
use lanecast::SimdCast;

#[test]
fn test_i32_to_i16_clamps_not_wraps() {
    let x = I32x4::from_array([
        i16::MAX as i32 + 1,
        i16::MIN as i32 - 1,
        i32::MAX,
        i32::MIN,
    ]);
    let packed: I16x8 = x.simd_cast();
    assert_eq!(&packed.to_array()[..4], &[i16::MAX, i16::MIN, i16::MAX, i16::MIN]);
}

#[test]
fn test_u32_to_u16_clamps_high() {
    let x = U32x4::from_array([0x1_0000, u32::MAX, 0xFFFF, 0]);
    let packed: U16x8 = x.simd_cast();
    assert_eq!(&packed.to_array()[..4], &[0xFFFF, 0xFFFF, 0xFFFF, 0]);
}

#[test]
fn test_u32_to_i16_never_wraps_negative() {
    // Sources above i32::MAX would read as negative in a naive signed pack
    // and clamp to i16::MIN instead of i16::MAX.
    let x = U32x4::from_array([0x8000_0000, u32::MAX, 40_000, 7]);
    let packed: I16x8 = x.simd_cast();
    assert_eq!(&packed.to_array()[..4], &[i16::MAX, i16::MAX, i16::MAX, 7]);
}

#[test]
fn test_f32_to_i16_saturates_through_truncation() {
    let x = F32x4::from_array([1e5, -1e5, 1.9, -1.9]);
    let packed: I16x8 = x.simd_cast();
    assert_eq!(&packed.to_array()[..4], &[i16::MAX, i16::MIN, 1, -1]);
}

#[test]
fn test_f32_to_u16_clamps_negative_to_zero() {
    let x = F32x4::from_array([-1.0, -1e9, 0.0, 65_535.0]);
    let packed: U16x8 = x.simd_cast();
    assert_eq!(&packed.to_array()[..4], &[0, 0, 0, 0xFFFF]);
}

#[test]
fn test_scalar_bridge_agrees_with_vector_path() {
    let values = [
        i16::MAX as i32 + 1,
        i16::MIN as i32 - 1,
        0,
        -1,
    ];
    let vector: I16x8 = I32x4::from_array(values).simd_cast();
    for (lane, &value) in vector.to_array().iter().take(4).zip(values.iter()) {
        let scalar: Scalar<i16> = Scalar::new(value).simd_cast();
        assert_eq!(*lane, scalar.value(), "divergence for input {value}");
    }
}

#[cfg(avx2)]
mod avx2 {
    use lanecast::simd::avx2::{I16x16, I32x8, U16x16, U32x8};
    use lanecast::SimdCast;

    #[test]
    fn test_wide_i32_to_i16_clamps() {
        let a = I32x8::from_array([40_000, -40_000, 1, 2, 3, 4, 5, 6]);
        let b = I32x8::from_array([7, 8, 9, 10, 11, 12, i32::MAX, i32::MIN]);
        let packed: I16x16 = (a, b).simd_cast();
        let out = packed.to_array();
        assert_eq!(out[0], i16::MAX);
        assert_eq!(out[1], i16::MIN);
        assert_eq!(out[14], i16::MAX);
        assert_eq!(out[15], i16::MIN);
    }

    #[test]
    fn test_wide_u32_to_u16_clamps() {
        let a = U32x8::from_array([u32::MAX, 0x1_0000, 0xFFFF, 0, 1, 2, 3, 4]);
        let b = U32x8::from_array([5, 6, 7, 8, 9, 10, 11, 0x8000_0000]);
        let packed: U16x16 = (a, b).simd_cast();
        let out = packed.to_array();
        assert_eq!(&out[..4], &[0xFFFF, 0xFFFF, 0xFFFF, 0]);
        assert_eq!(out[15], 0xFFFF);
    }
}
