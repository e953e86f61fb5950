//! Quaternions for representing rotations.

use core::fmt::{self, Debug, Formatter};
use core::ops::Mul;

use crate::math::approx::ApproxEq;
use crate::math::num::{Float, Scalar};
use crate::math::vec::{vec3, Vec3};

/// A quaternion `w + xi + yj + zk`, stored as `[x, y, z, w]`.
///
/// Unit quaternions represent rotations in 3D space. See
/// [`Mat3::from_quat`][crate::math::mat::Mat3] and friends for conversions
/// to and from rotation matrices.
#[derive(Copy, Clone, PartialEq)]
#[repr(transparent)]
pub struct Quat<Sc = f64>(pub [Sc; 4]);

impl<Sc> Quat<Sc> {
    /// Returns a new quaternion with the given components.
    #[inline]
    pub const fn new(x: Sc, y: Sc, z: Sc, w: Sc) -> Self {
        Self([x, y, z, w])
    }
}

impl<Sc: Copy> Quat<Sc> {
    #[inline]
    pub fn x(&self) -> Sc {
        self.0[0]
    }
    #[inline]
    pub fn y(&self) -> Sc {
        self.0[1]
    }
    #[inline]
    pub fn z(&self) -> Sc {
        self.0[2]
    }
    #[inline]
    pub fn w(&self) -> Sc {
        self.0[3]
    }

    /// Returns the vector (imaginary) part of `self`.
    #[inline]
    pub fn xyz<B>(&self) -> Vec3<Sc, B> {
        vec3(self.x(), self.y(), self.z())
    }
}

impl<Sc: Float> Quat<Sc> {
    /// Returns the identity rotation.
    #[inline]
    pub fn identity() -> Self {
        Self::new(Sc::ZERO, Sc::ZERO, Sc::ZERO, Sc::ONE)
    }

    /// Returns a rotation by `angle` radians about `axis`.
    ///
    /// `axis` need not be normalized.
    #[cfg(feature = "fp")]
    pub fn from_axis_angle<B>(axis: &Vec3<Sc, B>, angle: Sc) -> Self {
        let half = angle / (Sc::ONE + Sc::ONE);
        let [x, y, z] = (axis.normalize() * half.sin()).0;
        Self::new(x, y, z, half.cos())
    }

    /// Returns the four-dimensional dot product of `self` and `other`.
    #[inline]
    pub fn dot(&self, other: &Self) -> Sc {
        let [a, b, c, d] = self.0;
        let [e, f, g, h] = other.0;
        a * e + b * f + c * g + d * h
    }

    /// Returns the norm of `self`.
    #[inline]
    pub fn len(&self) -> Sc {
        self.dot(self).sqrt()
    }

    /// Returns `self` scaled to unit norm.
    #[must_use]
    pub fn normalize(&self) -> Self {
        let r = self.len().recip();
        Self(self.0.map(|c| c * r))
    }

    /// Returns the conjugate of `self`, the inverse rotation if `self`
    /// is a unit quaternion.
    #[inline]
    pub fn conjugate(&self) -> Self {
        let [x, y, z, w] = self.0;
        Self::new(-x, -y, -z, w)
    }

    /// Rotates `v` by `self`, assumed to be a unit quaternion.
    ///
    /// # Examples
    /// ```
    /// use rayform_core::assert_approx_eq;
    /// use rayform_core::math::{vec3, Quat, Vec3};
    ///
    /// let q = Quat::<f64>::from_axis_angle::<()>(
    ///     &vec3(0.0, 0.0, 1.0),
    ///     core::f64::consts::FRAC_PI_2,
    /// );
    /// let v: Vec3 = q.rotate(&vec3(1.0, 0.0, 0.0));
    /// assert_approx_eq!(v, vec3(0.0, 1.0, 0.0));
    /// ```
    pub fn rotate<B>(&self, v: &Vec3<Sc, B>) -> Vec3<Sc, B> {
        let two = Sc::ONE + Sc::ONE;
        let u: Vec3<Sc, B> = self.xyz();
        let t = u.cross(v) * two;
        *v + t * self.w() + u.cross(&t)
    }
}

impl<Sc: Scalar> Mul for Quat<Sc> {
    type Output = Self;

    /// Returns the Hamilton product of `self` and `rhs`; the result
    /// rotates first by `rhs`, then by `self`.
    fn mul(self, rhs: Self) -> Self {
        let [x1, y1, z1, w1] = self.0;
        let [x2, y2, z2, w2] = rhs.0;
        Self::new(
            w1 * x2 + x1 * w2 + y1 * z2 - z1 * y2,
            w1 * y2 - x1 * z2 + y1 * w2 + z1 * x2,
            w1 * z2 + x1 * y2 - y1 * x2 + z1 * w2,
            w1 * w2 - x1 * x2 - y1 * y2 - z1 * z2,
        )
    }
}

impl<Sc: Float> Default for Quat<Sc> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<Sc: Debug> Debug for Quat<Sc> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("Quat")?;
        Debug::fmt(&self.0, f)
    }
}

impl<Sc: ApproxEq> ApproxEq<Self, Sc> for Quat<Sc> {
    fn approx_eq_eps(&self, other: &Self, eps: &Sc) -> bool {
        self.0.approx_eq_eps(&other.0, eps)
    }
    fn relative_epsilon() -> Sc {
        Sc::relative_epsilon()
    }
}

impl<Sc> From<[Sc; 4]> for Quat<Sc> {
    #[inline]
    fn from(xyzw: [Sc; 4]) -> Self {
        Self(xyzw)
    }
}
