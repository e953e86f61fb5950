//! Intersection queries between geometric objects.

use rf::geom::Ray;
use rf::math::num::Float;
use rf::math::point::Point3;
use rf::math::Scalar;

use crate::bbox::BBox;

/// Trait for computing the intersection of `self` and a `T`.
pub trait Intersect<T> {
    type Output;

    /// Returns the intersection of `self` and `other`.
    fn intersect(&self, other: &T) -> Self::Output;
}

/// The parameter and position of the nearest hit, if any.
pub type RayHit<Sc, B> = Option<(Sc, Point3<Sc, B>)>;

impl<Sc: Float, B> Intersect<BBox<Sc, B>> for Ray<Point3<Sc, B>> {
    type Output = RayHit<Sc, B>;

    /// Intersects `self` with a bounding box.
    ///
    /// Returns the nearest hit in front of the ray origin, and the point
    /// where it occurs. See [`BBox::intersect`] for details.
    ///
    /// # Examples
    /// ```
    /// use rf::geom::Ray;
    /// use rf::math::{pt3, vec3, Point3};
    /// use rayform_geom::{BBox, Intersect};
    ///
    /// let b: BBox = BBox::new(pt3(0.0, 0.0, 0.0), pt3(1.0, 1.0, 1.0));
    /// let r: Ray<Point3> = Ray(pt3(0.5, 0.5, -5.0), vec3(0.0, 0.0, 1.0));
    /// assert_eq!(r.intersect(&b), Some((5.0, pt3(0.5, 0.5, 0.0))));
    /// ```
    fn intersect(&self, bbox: &BBox<Sc, B>) -> Self::Output {
        let t = bbox.intersect(self, Sc::ZERO, Sc::EXTREME)?;
        Some((t, self.at(t)))
    }
}

impl<Sc: Scalar, B> Intersect<Self> for BBox<Sc, B> {
    type Output = Option<Self>;

    /// Returns the box shared by `self` and `other`, if they overlap.
    ///
    /// Boxes touching at a face give a degenerate, flat result.
    fn intersect(&self, other: &Self) -> Self::Output {
        self.overlaps(other).then(|| {
            BBox::new(self.min().max(&other.min()), self.max().min(&other.max()))
        })
    }
}

#[cfg(test)]
mod tests {
    use rf::math::point::pt3;
    use rf::math::vec::vec3;

    use crate::bbox::BBoxi;

    use super::*;

    #[test]
    fn ray_hits_front_face() {
        let b: BBox = BBox::new(pt3(-1.0, -1.0, -1.0), pt3(1.0, 1.0, 1.0));
        let r: Ray<Point3> = Ray(pt3(0.0, 0.0, 4.0), vec3(0.0, 0.0, -0.5));
        assert_eq!(r.intersect(&b), Some((6.0, pt3(0.0, 0.0, 1.0))));
    }

    #[test]
    fn ray_behind_origin_misses() {
        let b: BBox = BBox::new(pt3(-1.0, -1.0, -1.0), pt3(1.0, 1.0, 1.0));
        let r: Ray<Point3> = Ray(pt3(0.0, 0.0, 4.0), vec3(0.0, 0.0, 1.0));
        assert_eq!(r.intersect(&b), None);
    }

    #[test]
    fn box_overlap() {
        let a: BBoxi = BBox::new(pt3(0, 0, 0), pt3(4, 4, 4));
        let b: BBoxi = BBox::new(pt3(2, -1, 3), pt3(6, 1, 8));
        let i = a.intersect(&b).unwrap();
        assert_eq!(i.min(), pt3(2, 0, 3));
        assert_eq!(i.max(), pt3(4, 1, 4));

        let c: BBoxi = BBox::new(pt3(5, 5, 5), pt3(6, 6, 6));
        assert_eq!(a.intersect(&c), None);
    }
}
