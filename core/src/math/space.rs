//! Types and traits for representing linear (vector) and affine spaces.

use core::fmt::{self, Debug, Formatter};
use core::marker::PhantomData;

use super::num::Scalar;

/// Trait for types representing elements of an affine space.
///
/// An affine space has no distinguished origin: two points can be
/// subtracted to yield a displacement, and a displacement can be added to a
/// point, but two points cannot be meaningfully added together.
pub trait Affine: Sized {
    /// The type of the space that `Self` is the element of.
    type Space;
    /// The (signed) difference of two values of `Self`.
    ///
    /// `Diff` must have the same dimension as `Self`.
    type Diff: Linear;

    /// The dimension of `Self`.
    const DIM: usize;

    /// Adds `diff` to `self` component-wise.
    ///
    /// `add` is commutative and associative.
    fn add(&self, diff: &Self::Diff) -> Self;

    /// Subtracts `other` from `self`, returning the (signed) difference.
    ///
    /// `sub` is anti-commutative: `v.sub(w) == w.sub(v).neg()`.
    fn sub(&self, other: &Self) -> Self::Diff;
}

/// Trait for types representing elements of a linear space (vector space).
///
/// A `Linear` type is a type that is `Affine` and
/// additionally satisfies the following conditions:
///
/// * The difference type [`Diff`][Affine::Diff] is equal to `Self`
/// * The type has an additive identity, returned by the [`zero`][Self::zero] method
/// * Every value has an additive inverse, returned by the [`neg`][Self::neg] method
pub trait Linear: Affine<Diff = Self> {
    /// The scalar type associated with `Self`
    type Scalar: Sized;

    /// Returns the additive identity of `Self`.
    fn zero() -> Self;

    /// Returns the additive inverse of `self`.
    fn neg(&self) -> Self;

    /// Multiplies all components of `self` by `scalar`.
    ///
    /// `mul` is commutative and associative, and distributes over
    /// `add` and `sub` (up to rounding errors).
    fn mul(&self, scalar: Self::Scalar) -> Self;
}

/// Tag type for real vector spaces (Euclidean spaces) of dimension `DIM`.
/// For example, the type `Real<3>` corresponds to ℝ³.
///
/// The `Basis` parameter distinguishes between different coordinate
/// systems of the same dimension, such as object space and world space.
#[derive(Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Real<const DIM: usize, Basis = ()>(PhantomData<Basis>);

impl<const DIM: usize, B: Debug + Default> Debug for Real<DIM, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        const DIMS: [&str; 5] = ["⁰", "¹", "²", "³", "⁴"];
        f.write_str("ℝ")?;
        match DIMS.get(DIM) {
            Some(d) => f.write_str(d)?,
            None => write!(f, "^{DIM}")?,
        }
        write!(f, "<{:?}>", B::default())
    }
}

macro_rules! impl_scalar_space {
    ($($t:ty)*) => {$(
        impl Affine for $t {
            type Space = ();
            type Diff = Self;
            const DIM: usize = 1;

            #[inline]
            fn add(&self, other: &Self) -> Self {
                *self + *other
            }
            #[inline]
            fn sub(&self, other: &Self) -> Self {
                *self - *other
            }
        }

        impl Linear for $t {
            type Scalar = Self;

            #[inline]
            fn zero() -> Self {
                <$t as Scalar>::ZERO
            }
            #[inline]
            fn neg(&self) -> Self {
                -*self
            }
            #[inline]
            fn mul(&self, scalar: Self) -> Self {
                *self * scalar
            }
        }
    )*};
}

impl_scalar_space!(f64 f32 i32);

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::*;

    #[test]
    fn scalar_affine() {
        assert_eq!(Affine::add(&1.5, &2.0), 3.5);
        assert_eq!(Affine::sub(&1, &3), -2);
        assert_eq!(Linear::mul(&2.0f32, 4.0), 8.0);
        assert_eq!(<f64 as Linear>::zero(), 0.0);
    }

    #[test]
    fn real_debug() {
        assert_eq!(format!("{:?}", Real::<3>::default()), "ℝ³<()>");
        assert_eq!(format!("{:?}", Real::<7>::default()), "ℝ^7<()>");
    }
}
