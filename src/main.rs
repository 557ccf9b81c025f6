//! Worked example for the cast engine: register casts, gathers, offset
//! selection and the slice API, on whichever register width the build
//! selected. Doubles as a quick smoke test of the public surface.

use lanecast::simd::scalar::Scalar;
use lanecast::SimdCast;

#[cfg(sse)]
fn sse_demo() {
    use lanecast::simd::sse::{F64x2, I16x8, I32x4, U32x4};
    use lanecast::SimdCastOffset;

    println!("--- 128-bit casts ---");

    let x = I32x4::from_array([40_000, -40_000, 7, -7]);
    let narrowed: I16x8 = x.simd_cast();
    println!("{:?} -> i16 (saturating): {:?}", x.to_array(), narrowed.to_array());

    let a = F64x2::from_array([1.0, 2.0]);
    let b = F64x2::from_array([3.0, 4.0]);
    let c = F64x2::from_array([5.0, 6.0]);
    let d = F64x2::from_array([7.0, 8.0]);
    let gathered: I16x8 = (a, b, c, d).simd_cast();
    println!("4x f64x2 -> i16x8: {:?}", gathered.to_array());

    let u = U32x4::from_array([1, 2, 0x8000_0001, u32::MAX]);
    let high: F64x2 = u.simd_cast_offset::<1>();
    println!("u32 lanes 2..4 -> f64: {:?}", high.to_array());
}

#[cfg(avx2)]
fn avx2_demo() {
    use lanecast::simd::avx2::slice::{simd_f32_to_i32, simd_i32_to_i16};
    use lanecast::simd::avx2::{I16x16, I32x8};

    println!("--- 256-bit casts ---");

    let wide = I32x8::from_array([0, 1, 2, 3, 4, 5, 6, 7]);
    let packed: I16x16 = wide.simd_cast();
    println!("i32x8 -> i16x16: {:?}", packed.to_array());

    let floats: Vec<f32> = (0..12).map(|i| i as f32 * 1.5 - 8.0).collect();
    println!("slice f32 -> i32: {:?}", simd_f32_to_i32(&floats));

    let ints: Vec<i32> = vec![1, 2, 70_000, -70_000, 5, 6];
    println!("slice i32 -> i16 (saturating): {:?}", simd_i32_to_i16(&ints));
}

fn scalar_demo() {
    println!("--- scalar bridge ---");

    let truncated: Scalar<i32> = Scalar::new(-2.9f64).simd_cast();
    println!("f64 -2.9 -> i32: {}", truncated.value());

    let biased: Scalar<f64> = Scalar::new(0x8000_0001u32).simd_cast();
    println!("u32 0x80000001 -> f64: {}", biased.value());
}

fn main() {
    scalar_demo();

    #[cfg(sse)]
    sse_demo();

    #[cfg(avx2)]
    avx2_demo();

    #[cfg(fallback)]
    println!("(no SIMD register width available on this build host)");
}
