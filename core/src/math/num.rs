//! Scalar types the value types are generic over.
//!
//! [`Scalar`] covers the arithmetic shared by all three precisions, `f64`,
//! `f32` and `i32`. [`Float`] adds what needs division, square roots, or
//! IEEE special values, and is implemented only for the two float types.

use core::fmt::Debug;
use core::ops::{Add, Div, Mul, Neg, Sub};

/// Trait for the component type of points, vectors, and boxes.
pub trait Scalar:
    Copy
    + Default
    + Debug
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// The additive identity.
    const ZERO: Self;
    /// The multiplicative identity.
    const ONE: Self;

    /// Returns the lesser of `self` and `other`.
    ///
    /// For floats, if one argument is NaN, the other is returned.
    fn min(self, other: Self) -> Self;

    /// Returns the greater of `self` and `other`.
    ///
    /// For floats, if one argument is NaN, the other is returned.
    fn max(self, other: Self) -> Self;

    /// Returns the absolute value of `self`.
    fn abs(self) -> Self;

    /// Returns a bit pattern identifying `self` exactly.
    ///
    /// Values that compare equal with `==` have the same key; in particular,
    /// negative zero has the same key as positive zero. All NaNs share one
    /// key, even though they never compare equal.
    fn key(self) -> u64;
}

/// Trait for floating-point scalars.
pub trait Float: Scalar {
    /// Not a number.
    const NAN: Self;
    /// Positive infinity.
    const INFINITY: Self;
    /// The library-wide sentinel marking an open upper bound of a ray
    /// interval. Its negation marks an open lower bound.
    ///
    /// These are not legitimate hit distances.
    const EXTREME: Self;
    /// Absolute tolerance used to decide whether a value is "already" zero
    /// or one, or whether a basis is orthonormal.
    const TOLERANCE: Self;
    /// A matrix is invertible iff `|det| ≥ DET_EPSILON`.
    const DET_EPSILON: Self;

    /// Returns the square root of `self`.
    fn sqrt(self) -> Self;

    /// Returns `1 / self`.
    fn recip(self) -> Self;

    /// Returns whether `self` is NaN.
    fn is_nan(self) -> bool;

    /// Returns whether `self` is positive or negative infinity.
    fn is_infinite(self) -> bool;

    /// Returns whether `self` is neither infinite nor NaN.
    fn is_finite(self) -> bool {
        !self.is_nan() && !self.is_infinite()
    }

    /// Converts an `f64` into `Self`, rounding if necessary.
    fn from_f64(x: f64) -> Self;

    /// Converts `self` into an `f64`.
    fn to_f64(self) -> f64;

    /// Returns the sine of `self` (in radians).
    #[cfg(feature = "fp")]
    fn sin(self) -> Self;

    /// Returns the cosine of `self` (in radians).
    #[cfg(feature = "fp")]
    fn cos(self) -> Self;

    /// Returns the arccosine of `self`, in radians.
    #[cfg(feature = "fp")]
    fn acos(self) -> Self;

    /// Returns the four-quadrant arctangent of `self` and `x`, in radians.
    #[cfg(feature = "fp")]
    fn atan2(self, x: Self) -> Self;
}

impl Scalar for f64 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;

    #[inline]
    fn min(self, other: Self) -> Self {
        f64::min(self, other)
    }
    #[inline]
    fn max(self, other: Self) -> Self {
        f64::max(self, other)
    }
    #[inline]
    fn abs(self) -> Self {
        f64::from_bits(self.to_bits() & !(1 << 63))
    }
    #[inline]
    fn key(self) -> u64 {
        if self.is_nan() {
            f64::NAN.to_bits()
        } else if self == 0.0 {
            0
        } else {
            self.to_bits()
        }
    }
}

impl Scalar for f32 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;

    #[inline]
    fn min(self, other: Self) -> Self {
        f32::min(self, other)
    }
    #[inline]
    fn max(self, other: Self) -> Self {
        f32::max(self, other)
    }
    #[inline]
    fn abs(self) -> Self {
        f32::from_bits(self.to_bits() & !(1 << 31))
    }
    #[inline]
    fn key(self) -> u64 {
        if self.is_nan() {
            f32::NAN.to_bits().into()
        } else if self == 0.0 {
            0
        } else {
            self.to_bits().into()
        }
    }
}

impl Scalar for i32 {
    const ZERO: Self = 0;
    const ONE: Self = 1;

    #[inline]
    fn min(self, other: Self) -> Self {
        Ord::min(self, other)
    }
    #[inline]
    fn max(self, other: Self) -> Self {
        Ord::max(self, other)
    }
    #[inline]
    fn abs(self) -> Self {
        i32::abs(self)
    }
    #[inline]
    fn key(self) -> u64 {
        self as u32 as u64
    }
}

impl Float for f64 {
    const NAN: Self = f64::NAN;
    const INFINITY: Self = f64::INFINITY;
    const EXTREME: Self = f64::MAX;
    const TOLERANCE: Self = 1e-12;
    const DET_EPSILON: Self = 1e-12;

    #[inline]
    fn sqrt(self) -> Self {
        super::float::f64::sqrt(self)
    }
    #[inline]
    fn recip(self) -> Self {
        1.0 / self
    }
    #[inline]
    fn is_nan(self) -> bool {
        f64::is_nan(self)
    }
    #[inline]
    fn is_infinite(self) -> bool {
        f64::is_infinite(self)
    }
    #[inline]
    fn from_f64(x: f64) -> Self {
        x
    }
    #[inline]
    fn to_f64(self) -> f64 {
        self
    }
    #[cfg(feature = "fp")]
    #[inline]
    fn sin(self) -> Self {
        super::float::f64::sin(self)
    }
    #[cfg(feature = "fp")]
    #[inline]
    fn cos(self) -> Self {
        super::float::f64::cos(self)
    }
    #[cfg(feature = "fp")]
    #[inline]
    fn acos(self) -> Self {
        super::float::f64::acos(self)
    }
    #[cfg(feature = "fp")]
    #[inline]
    fn atan2(self, x: Self) -> Self {
        super::float::f64::atan2(self, x)
    }
}

impl Float for f32 {
    const NAN: Self = f32::NAN;
    const INFINITY: Self = f32::INFINITY;
    const EXTREME: Self = f32::MAX;
    const TOLERANCE: Self = 1e-6;
    const DET_EPSILON: Self = 1e-12;

    #[inline]
    fn sqrt(self) -> Self {
        super::float::f32::sqrt(self)
    }
    #[inline]
    fn recip(self) -> Self {
        1.0 / self
    }
    #[inline]
    fn is_nan(self) -> bool {
        f32::is_nan(self)
    }
    #[inline]
    fn is_infinite(self) -> bool {
        f32::is_infinite(self)
    }
    #[inline]
    fn from_f64(x: f64) -> Self {
        x as f32
    }
    #[inline]
    fn to_f64(self) -> f64 {
        self.into()
    }
    #[cfg(feature = "fp")]
    #[inline]
    fn sin(self) -> Self {
        super::float::f32::sin(self)
    }
    #[cfg(feature = "fp")]
    #[inline]
    fn cos(self) -> Self {
        super::float::f32::cos(self)
    }
    #[cfg(feature = "fp")]
    #[inline]
    fn acos(self) -> Self {
        super::float::f32::acos(self)
    }
    #[cfg(feature = "fp")]
    #[inline]
    fn atan2(self, x: Self) -> Self {
        super::float::f32::atan2(self, x)
    }
}
