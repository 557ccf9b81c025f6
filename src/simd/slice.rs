//! Backend-independent slice conversion helpers.
//!
//! The scalar tier of the slice API: one lane at a time through the
//! [`Scalar`] bridge, so every element takes exactly the numeric contract of
//! the register paths. The `sse`/`avx2` backends provide the register-loop
//! and parallel tiers for the same element pairs.

use crate::error::{length_mismatch, Result};
use crate::simd::scalar::Scalar;
use crate::simd::traits::SimdCast;

/// Converts a slice element by element.
pub fn scalar_convert<S, D>(a: &[S]) -> Vec<D>
where
    S: Copy,
    D: Copy,
    Scalar<S>: SimdCast<Scalar<D>>,
{
    a.iter()
        .map(|&value| Scalar::new(value).simd_cast().value())
        .collect()
}

/// Converts a slice element by element into a caller-provided buffer.
///
/// # Errors
///
/// Returns [`CastError::LengthMismatch`](crate::error::CastError) when the
/// buffer length differs from the input length.
pub fn scalar_convert_into<S, D>(a: &[S], out: &mut [D]) -> Result<()>
where
    S: Copy,
    D: Copy,
    Scalar<S>: SimdCast<Scalar<D>>,
{
    if a.len() != out.len() {
        return Err(length_mismatch(a.len(), out.len()));
    }
    for (slot, &value) in out.iter_mut().zip(a) {
        *slot = Scalar::new(value).simd_cast().value();
    }
    Ok(())
}
