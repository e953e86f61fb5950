//! Basic geometric primitives.

use crate::math::approx::ApproxEq;
use crate::math::space::{Affine, Linear};

/// A ray, or a half line, composed of an initial point and a direction vector.
///
/// The direction need not be normalized. The point at parameter `t` is
/// `origin + t * dir`; if the direction is a unit vector, `t` is also the
/// distance from the origin.
///
/// # Examples
/// ```
/// use rayform_core::geom::Ray;
/// use rayform_core::math::{pt3, vec3, Point3};
///
/// let r: Ray<Point3> = Ray(pt3(1.0, 0.0, 0.0), vec3(0.0, 2.0, 0.0));
/// assert_eq!(r.at(1.5), pt3(1.0, 3.0, 0.0));
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Ray<T: Affine>(pub T, pub T::Diff);

impl<T: Affine> Ray<T> {
    /// Returns the initial point of `self`.
    #[inline]
    pub fn origin(&self) -> &T {
        &self.0
    }

    /// Returns the direction vector of `self`.
    #[inline]
    pub fn dir(&self) -> &T::Diff {
        &self.1
    }

    /// Returns the point at parameter `t` along `self`.
    #[inline]
    pub fn at(&self, t: <T::Diff as Linear>::Scalar) -> T {
        self.0.add(&self.1.mul(t))
    }
}

impl<T, E> ApproxEq<Self, E> for Ray<T>
where
    T: Affine + ApproxEq<T, E>,
    T::Diff: ApproxEq<T::Diff, E>,
{
    fn approx_eq_eps(&self, other: &Self, eps: &E) -> bool {
        self.0.approx_eq_eps(&other.0, eps) && self.1.approx_eq_eps(&other.1, eps)
    }
    fn relative_epsilon() -> E {
        T::relative_epsilon()
    }
}

#[cfg(test)]
mod tests {
    use crate::assert_approx_eq;
    use crate::math::point::{pt2, pt3, Point2i, Point3};
    use crate::math::vec::{vec2, vec3};

    use super::*;

    #[test]
    fn point_at_parameter() {
        let r: Ray<Point3> = Ray(pt3(0.0, 1.0, 2.0), vec3(1.0, -1.0, 0.5));
        assert_eq!(r.at(0.0), *r.origin());
        assert_eq!(r.at(2.0), pt3(2.0, -1.0, 3.0));
        assert_eq!(r.at(-1.0), pt3(-1.0, 2.0, 1.5));
        assert_eq!(*r.dir(), vec3(1.0, -1.0, 0.5));
    }

    #[test]
    fn integer_ray() {
        let r: Ray<Point2i> = Ray(pt2(1, 1), vec2(2, -1));
        assert_eq!(r.at(3), pt2(7, -2));
    }

    #[test]
    fn approx_eq() {
        let r: Ray<Point3> = Ray(pt3(0.1 + 0.2, 0.0, 0.0), vec3(1.0, 0.0, 0.0));
        assert_approx_eq!(r, Ray(pt3(0.3, 0.0, 0.0), vec3(1.0, 0.0, 0.0)));
    }
}
