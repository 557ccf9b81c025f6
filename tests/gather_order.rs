//! Index-mapping tests for multi-register gather casts.
//!
//! Lane `i` of source register `k` must land in destination lane
//! `k * src_lanes + i` for every arity and type combination - cross-register
//! interleaving is the most likely defect class in pack/permute sequences,
//! so the mapping is checked exhaustively with distinct lane values.
#![cfg(sse)]

use lanecast::simd::scalar::Scalar;
use lanecast::simd::sse::{F32x4, F64x2, I16x8, I32x4, U16x8, U32x4};
use lanecast::SimdCast;

#[test]
fn test_two_f64x2_to_f32x4() {
    let out: F32x4 = (F64x2::from_array([1.0, 2.0]), F64x2::from_array([3.0, 4.0])).simd_cast();
    assert_eq!(out.to_array(), [1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_two_f64x2_to_i32x4_and_u32x4() {
    let a = F64x2::from_array([10.0, 11.0]);
    let b = F64x2::from_array([12.0, 13.0]);
    let signed: I32x4 = (a, b).simd_cast();
    assert_eq!(signed.to_array(), [10, 11, 12, 13]);
    let unsigned: U32x4 = (a, b).simd_cast();
    assert_eq!(unsigned.to_array(), [10, 11, 12, 13]);
}

#[test]
fn test_two_registers_to_sixteen_bit_lanes() {
    let signed: I16x8 =
        (I32x4::from_array([0, 1, 2, 3]), I32x4::from_array([4, 5, 6, 7])).simd_cast();
    assert_eq!(signed.to_array(), [0, 1, 2, 3, 4, 5, 6, 7]);

    let unsigned: U16x8 =
        (U32x4::from_array([8, 9, 10, 11]), U32x4::from_array([12, 13, 14, 15])).simd_cast();
    assert_eq!(unsigned.to_array(), [8, 9, 10, 11, 12, 13, 14, 15]);

    let floats: I16x8 = (
        F32x4::from_array([20.0, 21.0, 22.0, 23.0]),
        F32x4::from_array([24.0, 25.0, 26.0, 27.0]),
    )
        .simd_cast();
    assert_eq!(floats.to_array(), [20, 21, 22, 23, 24, 25, 26, 27]);
}

#[test]
fn test_four_f64x2_exact_order() {
    // The spec example: [1,2],[3,4],[5,6],[7,8] -> [1..8], not interleaved,
    // not reversed.
    let a = F64x2::from_array([1.0, 2.0]);
    let b = F64x2::from_array([3.0, 4.0]);
    let c = F64x2::from_array([5.0, 6.0]);
    let d = F64x2::from_array([7.0, 8.0]);
    let out: I16x8 = (a, b, c, d).simd_cast();
    assert_eq!(out.to_array(), [1, 2, 3, 4, 5, 6, 7, 8]);

    // The free-function form names the destination explicitly.
    let again = lanecast::simd_cast::<I16x8, _>((a, b, c, d));
    assert_eq!(again.to_array(), out.to_array());
}

#[test]
fn test_scalar_gather_exhaustive_index_map() {
    let scalars: [Scalar<i32>; 8] = core::array::from_fn(|i| Scalar::new(100 + i as i32));
    let out: I16x8 = scalars.simd_cast();
    assert_eq!(out.to_array(), core::array::from_fn(|i| 100 + i as i16));
}

#[cfg(avx2)]
mod avx2 {
    use lanecast::simd::avx2::{F32x8, F64x4, I16x16, I32x8, U16x16, U32x8};
    use lanecast::simd::scalar::Scalar;
    use lanecast::simd::sse::{F64x2, I32x4};
    use lanecast::SimdCast;

    #[test]
    fn test_two_i32x8_exhaustive_index_map() {
        let a = I32x8::from_array(core::array::from_fn(|i| i as i32));
        let b = I32x8::from_array(core::array::from_fn(|i| (i + 8) as i32));
        let out: I16x16 = (a, b).simd_cast();
        assert_eq!(out.to_array(), core::array::from_fn(|i| i as i16));
    }

    #[test]
    fn test_two_u32x8_to_u16x16() {
        let a = U32x8::from_array(core::array::from_fn(|i| (i * 3) as u32));
        let b = U32x8::from_array(core::array::from_fn(|i| ((i + 8) * 3) as u32));
        let out: U16x16 = (a, b).simd_cast();
        assert_eq!(out.to_array(), core::array::from_fn(|i| (i * 3) as u16));
    }

    #[test]
    fn test_two_f32x8_to_i16x16() {
        let a = F32x8::from_array(core::array::from_fn(|i| i as f32));
        let b = F32x8::from_array(core::array::from_fn(|i| (i + 8) as f32));
        let out: I16x16 = (a, b).simd_cast();
        assert_eq!(out.to_array(), core::array::from_fn(|i| i as i16));
    }

    #[test]
    fn test_four_f64x4_exact_order() {
        let regs: [F64x4; 4] =
            core::array::from_fn(|k| F64x4::from_array(core::array::from_fn(|i| (k * 4 + i) as f64)));
        let out: I16x16 = (regs[0], regs[1], regs[2], regs[3]).simd_cast();
        assert_eq!(out.to_array(), core::array::from_fn(|i| i as i16));
    }

    #[test]
    fn test_four_i32x4_into_wide_register() {
        let regs: [I32x4; 4] =
            core::array::from_fn(|k| I32x4::from_array(core::array::from_fn(|i| (k * 4 + i) as i32)));
        let out: I16x16 = (regs[0], regs[1], regs[2], regs[3]).simd_cast();
        assert_eq!(out.to_array(), core::array::from_fn(|i| i as i16));
    }

    #[test]
    fn test_eight_f64x2_exact_order() {
        let regs: [F64x2; 8] = core::array::from_fn(|k| {
            F64x2::from_array([(k * 2) as f64, (k * 2 + 1) as f64])
        });
        let out: U16x16 = (
            regs[0], regs[1], regs[2], regs[3], regs[4], regs[5], regs[6], regs[7],
        )
            .simd_cast();
        assert_eq!(out.to_array(), core::array::from_fn(|i| i as u16));
    }

    #[test]
    fn test_sixteen_scalars_exact_order() {
        let scalars: [Scalar<f64>; 16] = core::array::from_fn(|i| Scalar::new(i as f64));
        let out: I16x16 = scalars.simd_cast();
        assert_eq!(out.to_array(), core::array::from_fn(|i| i as i16));
    }
}
