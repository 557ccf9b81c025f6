//! The one-lane scalar representation.
//!
//! [`Scalar<T>`] is the degenerate vector used when no SIMD registers are
//! available and as the bridge for lane-granular casts. It carries exactly
//! one lane; casting between scalar representations applies the same numeric
//! contract as the register paths:
//!
//! - float to integer truncates toward zero,
//! - narrowing integer conversion saturates at the destination extremes,
//! - same-size sign changes reinterpret the bit pattern,
//! - widening sign- or zero-extends according to the source signedness.
//!
//! [`ScalarMask`] is the one-lane boolean analogue. Value and mask casts
//! never share an implementation.

use crate::simd::traits::SimdCast;

/// A vector with exactly one lane.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Scalar<T> {
    pub(crate) value: T,
}

impl<T: Copy> Scalar<T> {
    /// Wraps a value as a one-lane vector.
    #[inline(always)]
    pub fn new(value: T) -> Self {
        Self { value }
    }

    /// Returns the lane value.
    #[inline(always)]
    pub fn value(self) -> T {
        self.value
    }
}

impl<T: Copy + num::Zero> Scalar<T> {
    /// The scalar zero of the lane type.
    #[inline(always)]
    pub fn zero() -> Self {
        Self { value: T::zero() }
    }
}

impl<T: Copy> From<T> for Scalar<T> {
    #[inline(always)]
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

/// A mask with exactly one lane.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScalarMask {
    pub(crate) value: bool,
}

impl ScalarMask {
    /// Wraps a truth value as a one-lane mask.
    #[inline(always)]
    pub fn new(value: bool) -> Self {
        Self { value }
    }

    /// Returns the lane's truth value.
    #[inline(always)]
    pub fn value(self) -> bool {
        self.value
    }
}

impl From<bool> for ScalarMask {
    #[inline(always)]
    fn from(value: bool) -> Self {
        Self::new(value)
    }
}

impl SimdCast<ScalarMask> for ScalarMask {
    #[inline(always)]
    fn simd_cast(self) -> ScalarMask {
        self
    }
}

// The scalar-to-scalar conversion table. Each entry is the lane-granular
// contract the register paths must agree with.
macro_rules! impl_scalar_cast {
    ($($src:ty => $dst:ty, |$v:ident| $conv:expr;)*) => {$(
        impl SimdCast<Scalar<$dst>> for Scalar<$src> {
            #[inline(always)]
            fn simd_cast(self) -> Scalar<$dst> {
                let $v = self.value;
                Scalar::new($conv)
            }
        }
    )*};
}

impl_scalar_cast! {
    // identity
    f64 => f64, |v| v;
    f32 => f32, |v| v;
    i32 => i32, |v| v;
    u32 => u32, |v| v;
    i16 => i16, |v| v;
    u16 => u16, |v| v;

    // to f64
    f32 => f64, |v| v as f64;
    i32 => f64, |v| v as f64;
    u32 => f64, |v| v as f64;
    i16 => f64, |v| v as f64;
    u16 => f64, |v| v as f64;

    // to f32
    f64 => f32, |v| v as f32;
    i32 => f32, |v| v as f32;
    u32 => f32, |v| v as f32;
    i16 => f32, |v| v as f32;
    u16 => f32, |v| v as f32;

    // to i32 (float sources truncate toward zero)
    f64 => i32, |v| v as i32;
    f32 => i32, |v| v as i32;
    u32 => i32, |v| v as i32;
    i16 => i32, |v| v as i32;
    u16 => i32, |v| v as i32;

    // to u32
    f64 => u32, |v| v as u32;
    f32 => u32, |v| v as u32;
    i32 => u32, |v| v as u32;
    i16 => u32, |v| v as i32 as u32;
    u16 => u32, |v| v as u32;

    // to i16 (narrowing saturates, same-size reinterprets)
    f64 => i16, |v| (v as i32).clamp(i16::MIN as i32, i16::MAX as i32) as i16;
    f32 => i16, |v| (v as i32).clamp(i16::MIN as i32, i16::MAX as i32) as i16;
    i32 => i16, |v| v.clamp(i16::MIN as i32, i16::MAX as i32) as i16;
    u32 => i16, |v| v.min(i16::MAX as u32) as i16;
    u16 => i16, |v| v as i16;

    // to u16 (narrowing saturates, same-size reinterprets)
    f64 => u16, |v| (v as i32).clamp(0, u16::MAX as i32) as u16;
    f32 => u16, |v| (v as i32).clamp(0, u16::MAX as i32) as u16;
    i32 => u16, |v| v.clamp(0, u16::MAX as i32) as u16;
    u32 => u16, |v| v.min(u16::MAX as u32) as u16;
    i16 => u16, |v| v as u16;
}
