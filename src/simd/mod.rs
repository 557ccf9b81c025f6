//! SIMD register types and the cast dispatch tables.
//!
//! Each submodule implements one register width:
//!
//! - [`scalar`] - the degenerate one-lane representation, always compiled.
//!   It is the fallback when no SIMD registers are available and the bridge
//!   for lane-granular operations.
//! - `sse` - 128-bit registers (requires SSE4.1, `sse` cfg flag).
//! - `avx2` - 256-bit registers (requires AVX2, `avx2` cfg flag). Compiled
//!   together with `sse`: the 256-bit cast routines decompose into 128-bit
//!   operations.
//!
//! The cast surface itself lives in [`traits`]: [`SimdCast`] for casts
//! without a lane offset (single registers, register tuples, scalar arrays)
//! and [`SimdCastOffset`] for sub-register extraction.

#[cfg(avx2)]
pub mod avx2;

#[cfg(sse)]
pub mod sse;

pub mod scalar;

pub mod slice;

pub mod traits;

pub use traits::{simd_cast, SimdCast, SimdCastOffset};
