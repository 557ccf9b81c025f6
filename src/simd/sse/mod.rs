//! 128-bit (SSE4.1) backend.
//!
//! This module carries the 128-bit half of the cast engine: the register
//! wrappers, the primitive per-lane conversions, the cast dispatch table and
//! the mask cast table. It is compiled whenever the build script detects
//! SSE4.1 (the `sse` cfg flag), which is also implied by the AVX2 tier -
//! the 256-bit routines decompose into these 128-bit operations.
//!
//! # Available types
//!
//! - Value registers: [`F32x4`], [`F64x2`], [`I32x4`], [`U32x4`], [`I16x8`],
//!   [`U16x8`]
//! - Masks: [`M64x2`], [`M32x4`], [`M16x8`]
//!
//! # Usage
//!
//! ```rust
//! use lanecast::simd::sse::{F32x4, I32x4};
//! use lanecast::SimdCast;
//!
//! let x = F32x4::from_array([1.9, -1.9, 2.5, -2.5]);
//! let truncated: I32x4 = x.simd_cast();
//! assert_eq!(truncated.to_array(), [1, -1, 2, -2]);
//! ```

mod cast;
pub(crate) mod convert;
mod mask;
mod registers;
pub mod slice;

pub use mask::{M16x8, M32x4, M64x2};
pub use registers::{F32x4, F64x2, I16x8, I32x4, U16x8, U32x4};
