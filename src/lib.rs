//! # lanecast
//!
//! A SIMD register representation-conversion engine.
//!
//! lanecast converts between typed vector registers of different element
//! types (`f64`, `f32`, `i32`, `u32`, `i16`, `u16`), different register
//! widths (128-bit SSE, 256-bit AVX2, and the degenerate one-lane scalar
//! representation) and different lane counts, selecting the correct sequence
//! of hardware convert/pack/unpack/shuffle instructions for every supported
//! combination at build time.
//!
//! The dispatch is entirely static: every legal (source, destination,
//! lane-offset) combination is a trait implementation, every illegal one is a
//! compile error. There is no runtime descriptor lookup and no fallback path
//! that could silently produce a wrong bit pattern.
//!
//! # Register model
//!
//! | Width    | Types                                                |
//! |----------|------------------------------------------------------|
//! | 128-bit  | `F32x4`, `F64x2`, `I32x4`, `U32x4`, `I16x8`, `U16x8` |
//! | 256-bit  | `F32x8`, `F64x4`, `I32x8`, `U32x8`, `I16x16`, `U16x16` |
//! | scalar   | `Scalar<T>` (one lane)                               |
//!
//! Masks (`M64x2`, `M32x4`, … and `ScalarMask`) mirror the same geometry with
//! all-ones/all-zeros lanes and have their own, entirely separate cast paths.
//!
//! The available widths are detected by the build script and exposed through
//! the `sse` / `avx2` / `fallback` cfg flags; the selection is immutable at
//! run time.
//!
//! # Usage
//!
//! ```rust
//! # #[cfg(sse)]
//! # {
//! use lanecast::simd::sse::{F64x2, I16x8, I32x4};
//! use lanecast::SimdCast;
//!
//! // One register, element type change:
//! let x = I32x4::from_array([1, 2, 3, 4]);
//! let halves: I16x8 = x.simd_cast();
//!
//! // Four registers gathered into one, lane order preserved:
//! let a = F64x2::from_array([1.0, 2.0]);
//! let b = F64x2::from_array([3.0, 4.0]);
//! let c = F64x2::from_array([5.0, 6.0]);
//! let d = F64x2::from_array([7.0, 8.0]);
//! let packed: I16x8 = (a, b, c, d).simd_cast();
//! assert_eq!(packed.to_array(), [1, 2, 3, 4, 5, 6, 7, 8]);
//! # }
//! ```
//!
//! # Numeric contract
//!
//! - Float to integer conversion truncates toward zero (the hardware
//!   convert-with-truncation behavior).
//! - Narrowing integer conversion saturates: out-of-range values clamp to the
//!   destination type's extremes on every path, vector and scalar alike.
//! - `u32` to floating point goes through a bias-and-correct sequence so that
//!   values above `i32::MAX` are not misread as negative.

pub mod error;
pub mod simd;
pub(crate) mod utils;

pub use simd::{simd_cast, SimdCast, SimdCastOffset};

/// Minimum slice length before the slice-conversion helpers switch from the
/// scalar loop to the register loop. Below this, loop overhead dominates.
pub const SIMD_THRESHOLD: usize = 64;

/// Minimum slice length before the slice-conversion helpers fan out across
/// threads. Parallelism only pays off once the input no longer fits the
/// faster cache levels.
pub const PARALLEL_SIMD_THRESHOLD: usize = 262_144;

/// Number of elements each rayon task converts at a time.
pub const PARALLEL_CHUNK_SIZE: usize = 16_384;
