//! Axis-aligned bounding boxes.

use core::fmt::{self, Debug, Formatter};
use core::ops::ControlFlow;

use rf::geom::Ray;
use rf::math::mat::{Apply, Mat4, RealToReal};
use rf::math::num::{Float, Scalar};
use rf::math::point::{Point3, pt3};
use rf::math::vec::{Vec3, splat};
use rf::math::ApproxEq;
use rf::util::check;
use rf::util::intern::Intern;
use rf::util::visit::{Part, Visit, Visitor};
use rf::Result;

/// An axis-aligned bounding box in 3-space.
///
/// Always satisfies `min ≤ max` componentwise, unless the box was
/// [shrunk][Self::expand] past its center.
///
/// # Examples
/// ```
/// use rf::math::{pt3, Point3};
/// use rayform_geom::BBox;
///
/// // Any two opposite corners, in any order
/// let b: BBox = BBox::new(pt3(1.0, 0.0, 1.0), pt3(0.0, 1.0, 0.0));
/// assert_eq!(b.min(), pt3(0.0, 0.0, 0.0));
/// assert_eq!(b.max(), pt3(1.0, 1.0, 1.0));
/// assert!(b.contains(&pt3(0.5, 1.0, 0.0)));
/// ```
pub struct BBox<Sc = f64, B = ()> {
    min: Point3<Sc, B>,
    max: Point3<Sc, B>,
}

/// A bounding box with `f32` components.
pub type BBoxf<B = ()> = BBox<f32, B>;
/// A bounding box with `i32` components.
pub type BBoxi<B = ()> = BBox<i32, B>;

impl<Sc: Scalar, B> BBox<Sc, B> {
    /// Returns the smallest box containing both `a` and `b`.
    #[inline]
    pub fn new(a: Point3<Sc, B>, b: Point3<Sc, B>) -> Self {
        Self { min: a.min(&b), max: a.max(&b) }
    }

    /// Returns the smallest box containing every point in `pts`.
    ///
    /// A single point gives a degenerate box with `min == max`.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`][rf::Error::InvalidArgument] if `pts` is
    /// empty.
    ///
    /// # Examples
    /// ```
    /// use rf::math::{pt3, Point3};
    /// use rayform_geom::BBox;
    ///
    /// let pts: [Point3; 3] =
    ///     [pt3(1.0, 2.0, 3.0), pt3(-1.0, 0.0, 5.0), pt3(0.0, 4.0, 0.0)];
    /// let b = BBox::from_points(pts).unwrap();
    /// assert_eq!(b.min(), pt3(-1.0, 0.0, 0.0));
    /// assert_eq!(b.max(), pt3(1.0, 4.0, 5.0));
    ///
    /// let none: [Point3; 0] = [];
    /// assert!(BBox::from_points(none).is_err());
    /// ```
    pub fn from_points(
        pts: impl IntoIterator<Item = Point3<Sc, B>>,
    ) -> Result<Self> {
        let mut pts = pts.into_iter();
        let first = check::non_empty(&mut pts, "no points to bound")?;
        let init = Self { min: first, max: first };
        Ok(pts.fold(init, |b, p| b.union_point(&p)))
    }

    /// Returns the minimum corner of `self`.
    #[inline]
    pub fn min(&self) -> Point3<Sc, B> {
        self.min
    }

    /// Returns the maximum corner of `self`.
    #[inline]
    pub fn max(&self) -> Point3<Sc, B> {
        self.max
    }

    /// Returns the smallest box containing both `self` and `other`.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(&other.min),
            max: self.max.max(&other.max),
        }
    }

    /// Returns the smallest box containing both `self` and `p`.
    pub fn union_point(&self, p: &Point3<Sc, B>) -> Self {
        Self { min: self.min.min(p), max: self.max.max(p) }
    }

    /// Returns `self` grown by `delta` in every direction.
    ///
    /// A negative `delta` shrinks the box instead. The caller must ensure
    /// that the box does not become inverted.
    pub fn expand(&self, delta: Sc) -> Self {
        let d: Vec3<Sc, B> = splat(delta);
        Self { min: self.min - d, max: self.max + d }
    }

    /// Returns whether `p` lies in `self`, boundary included.
    pub fn contains(&self, p: &Point3<Sc, B>) -> bool {
        (0..3).all(|i| self.min[i] <= p[i] && p[i] <= self.max[i])
    }

    /// Returns whether `self` and `other` have at least one point in
    /// common. Boxes touching at a face, edge, or corner overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        (0..3).all(|i| {
            self.min[i] <= other.max[i] && other.min[i] <= self.max[i]
        })
    }

    /// Returns the point in `self` closest to `p`.
    ///
    /// Points inside the box are returned unchanged.
    pub fn closest_point(&self, p: &Point3<Sc, B>) -> Point3<Sc, B> {
        p.max(&self.min).min(&self.max)
    }

    /// Returns the vector from the minimum to the maximum corner.
    #[inline]
    pub fn extents(&self) -> Vec3<Sc, B> {
        self.max - self.min
    }

    /// Returns the eight corners of `self`.
    ///
    /// The corner at index `i` takes its x, y, and z coordinate from the
    /// maximum corner if bit 0, 1, or 2 of `i` is set, respectively, and
    /// from the minimum corner otherwise.
    pub fn corners(&self) -> [Point3<Sc, B>; 8] {
        let (l, u) = (&self.min, &self.max);
        core::array::from_fn(|i| {
            let pick = |axis: usize| {
                if i & (1 << axis) == 0 { l[axis] } else { u[axis] }
            };
            pt3(pick(0), pick(1), pick(2))
        })
    }

    /// Returns the smallest box containing `self` transformed by `m`.
    ///
    /// Only the affine part of `m` is used. The result is generally larger
    /// than the transformed box itself, unless `m` maps axes onto axes.
    pub fn transform<D>(
        &self,
        m: &Mat4<Sc, RealToReal<3, B, D>>,
    ) -> BBox<Sc, D> {
        let [first, rest @ ..] = self.corners().map(|c| m.apply(&c));
        let init = BBox { min: first, max: first };
        rest.iter().fold(init, |b, p| b.union_point(p))
    }
}

impl<Sc: Float, B> BBox<Sc, B> {
    /// Returns the center point of `self`.
    pub fn center(&self) -> Point3<Sc, B> {
        let half = Sc::from_f64(0.5);
        self.min.zip_map(self.max, |l, u| (l + u) * half)
    }

    /// Intersects `ray` with `self` using the slab test.
    ///
    /// Returns the parameter of the entry point if it lies strictly within
    /// `(t_min, t_max)`, otherwise that of the exit point if it does,
    /// otherwise `None`. For a ray starting inside the box, the result is
    /// therefore the exit point.
    ///
    /// Direction components may be zero; the resulting infinities are
    /// handled by the min/max reductions.
    ///
    /// # Examples
    /// ```
    /// use rf::geom::Ray;
    /// use rf::math::{pt3, vec3, Point3};
    /// use rayform_geom::BBox;
    ///
    /// let b: BBox = BBox::new(pt3(0.0, 0.0, 0.0), pt3(1.0, 1.0, 1.0));
    /// let r: Ray<Point3> = Ray(pt3(0.5, 0.5, -5.0), vec3(0.0, 0.0, 1.0));
    ///
    /// assert_eq!(b.intersect(&r, 0.0, 1000.0), Some(5.0));
    /// assert_eq!(r.at(5.0), pt3(0.5, 0.5, 0.0));
    ///
    /// // Interval ends before the box
    /// assert_eq!(b.intersect(&r, 0.0, 4.0), None);
    /// ```
    pub fn intersect(
        &self,
        ray: &Ray<Point3<Sc, B>>,
        t_min: Sc,
        t_max: Sc,
    ) -> Option<Sc> {
        let Ray(o, d) = ray;
        let inv = d.map(Float::recip);

        let (mut t0, mut t1) = (-Sc::INFINITY, Sc::INFINITY);
        for i in 0..3 {
            let near = (self.min[i] - o[i]) * inv[i];
            let far = (self.max[i] - o[i]) * inv[i];
            t0 = t0.max(near.min(far));
            t1 = t1.min(near.max(far));
        }
        if t0 > t1 {
            return None;
        }
        let within = |t: Sc| t_min < t && t < t_max;
        if within(t0) {
            Some(t0)
        } else if within(t1) {
            Some(t1)
        } else {
            None
        }
    }
}

//
// Trait impls
//

impl<Sc: Copy, B> Copy for BBox<Sc, B> {}

impl<Sc: Copy, B> Clone for BBox<Sc, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Sc: PartialEq, B> PartialEq for BBox<Sc, B> {
    fn eq(&self, other: &Self) -> bool {
        self.min == other.min && self.max == other.max
    }
}

impl<Sc: Eq, B> Eq for BBox<Sc, B> {}

impl<Sc: Debug, B> Debug for BBox<Sc, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("BBox")
            .field("min", &self.min.0)
            .field("max", &self.max.0)
            .finish()
    }
}

impl<Sc: ApproxEq, B> ApproxEq<Self, Sc> for BBox<Sc, B> {
    fn approx_eq_eps(&self, other: &Self, eps: &Sc) -> bool {
        self.min.approx_eq_eps(&other.min, eps)
            && self.max.approx_eq_eps(&other.max, eps)
    }
    fn relative_epsilon() -> Sc {
        Sc::relative_epsilon()
    }
}

impl<Sc: Scalar, B> Intern for BBox<Sc, B> {
    type Key = ([u64; 3], [u64; 3]);

    fn key(&self) -> Self::Key {
        (self.min.key(), self.max.key())
    }
}

impl<Sc, B> Visit<Sc> for BBox<Sc, B> {
    fn visit(&self, f: &mut Visitor<'_, Sc>) -> ControlFlow<()> {
        f("min", Part::Point(&self.min.0))?;
        f("max", Part::Point(&self.max.0))
    }
}
