//! Linear algebra and other useful mathematics.
//!
//! Includes [vectors][self::vec], [points][point], [quaternions][quat],
//! [matrices][mat] and [orthonormal bases][basis], as well as
//! [pseudo-random sampling][rand] and utilities such as approximate equality
//! comparisons.
//!
//! This library is more strongly typed than many other similar math libraries.
//! Points and vectors are distinct types, because a transform treats them
//! differently: a point is translated, a vector is not. Both are further
//! tagged with the *basis* they are expressed in, and values in different
//! bases cannot be mixed without explicit conversion (transformation).
//! Matrices, similarly, are tagged by both source and destination basis, and
//! can only be applied to matching points and vectors.

pub use {
    approx::ApproxEq,
    basis::Basis,
    mat::{
        Apply, Mat3, Mat4, Matrix, look_at, rotate_from_basis, scale,
        translate,
    },
    num::{Float, Scalar},
    point::{Point, Point2, Point3, Point4, pt2, pt3, pt4},
    quat::Quat,
    space::{Affine, Linear},
    vec::{Vec2, Vec3, Vec4, Vector, splat, vec2, vec3, vec4},
};
#[cfg(feature = "fp")]
pub use mat::{rotate, rotate_x, rotate_y, rotate_z};

/// Implements an operator trait in terms of an op-assign trait.
macro_rules! impl_op {
    ($trait:ident :: $method:ident, $self:ident, $rhs:ty, $op:tt) => {
        impl<Sc, Sp, const N: usize> $trait<$rhs> for $self<[Sc; N], Sp>
        where
            Sc: $crate::math::num::Scalar,
        {
            type Output = Self;
            #[inline]
            fn $method(mut self, rhs: $rhs) -> Self {
                self $op rhs; self
            }
        }
    };
}

pub mod approx;
pub mod basis;
pub mod float;
pub mod mat;
pub mod num;
pub mod point;
pub mod quat;
pub mod rand;
pub mod space;
pub mod vec;
