//! Points in real and integer affine spaces.

use core::array;
use core::fmt::{self, Debug, Formatter};
use core::marker::PhantomData as Pd;
use core::ops::{Add, AddAssign, Index, Sub, SubAssign};

use crate::error::Result;
use crate::math::approx::ApproxEq;
use crate::math::num::{Float, Scalar};
use crate::math::space::{Affine, Real};
use crate::math::vec::Vector;
use crate::util::check;

/// A position in an affine space.
///
/// Unlike a [`Vector`], a point is affected by the translation part of a
/// transform. Subtracting two points yields a vector; adding a vector to a
/// point yields another point. Points cannot be added together.
#[repr(transparent)]
pub struct Point<Repr, Space = ()>(pub Repr, Pd<Space>);

/// A 2-point with `f64` components by default.
pub type Point2<Sc = f64, Basis = ()> = Point<[Sc; 2], Real<2, Basis>>;
/// A 3-point with `f64` components by default.
pub type Point3<Sc = f64, Basis = ()> = Point<[Sc; 3], Real<3, Basis>>;
/// A 4-point with `f64` components by default.
pub type Point4<Sc = f64, Basis = ()> = Point<[Sc; 4], Real<4, Basis>>;

/// A 2-point with `f32` components.
pub type Point2f<Basis = ()> = Point2<f32, Basis>;
/// A 3-point with `f32` components.
pub type Point3f<Basis = ()> = Point3<f32, Basis>;
/// A 2-point with `i32` components.
pub type Point2i<Basis = ()> = Point2<i32, Basis>;
/// A 3-point with `i32` components.
pub type Point3i<Basis = ()> = Point3<i32, Basis>;

/// Returns a real 2-point with `x` and `y` components.
pub const fn pt2<Sc, B>(x: Sc, y: Sc) -> Point2<Sc, B> {
    Point([x, y], Pd)
}
/// Returns a real 3-point with `x`, `y`, and `z` components.
pub const fn pt3<Sc, B>(x: Sc, y: Sc, z: Sc) -> Point3<Sc, B> {
    Point([x, y, z], Pd)
}
/// Returns a real 4-point with `x`, `y`, `z`, and `w` components.
pub const fn pt4<Sc, B>(x: Sc, y: Sc, z: Sc, w: Sc) -> Point4<Sc, B> {
    Point([x, y, z, w], Pd)
}

impl<R, Sp> Point<R, Sp> {
    #[inline]
    pub const fn new(repr: R) -> Self {
        Self(repr, Pd)
    }

    /// Returns a point with the same components as `self`
    /// but in a different space.
    #[inline]
    pub fn to<S>(self) -> Point<R, S> {
        Point(self.0, Pd)
    }
}

impl<Sc: Scalar, Sp, const N: usize> Point<[Sc; N], Sp> {
    /// Returns the origin of the space.
    #[inline]
    pub fn origin() -> Self {
        Self([Sc::ZERO; N], Pd)
    }

    /// Returns the component at `i`, or an error if `i` is out of range.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`][crate::Error::InvalidArgument]
    /// if `i >= N`.
    pub fn get(&self, i: usize) -> Result<Sc> {
        check::index(i, N, "point component index out of range")?;
        Ok(self.0[i])
    }

    #[inline]
    pub fn map<T>(self, mut f: impl FnMut(Sc) -> T) -> Point<[T; N], Sp> {
        Point(array::from_fn(|i| f(self.0[i])), Pd)
    }

    #[inline]
    pub fn zip_map<T>(
        self,
        other: Self,
        mut f: impl FnMut(Sc, Sc) -> T,
    ) -> Point<[T; N], Sp> {
        Point(array::from_fn(|i| f(self.0[i], other.0[i])), Pd)
    }

    /// Returns the component-wise minimum of `self` and `other`.
    #[inline]
    pub fn min(&self, other: &Self) -> Self {
        self.zip_map(*other, Scalar::min)
    }

    /// Returns the component-wise maximum of `self` and `other`.
    #[inline]
    pub fn max(&self, other: &Self) -> Self {
        self.zip_map(*other, Scalar::max)
    }

    /// Returns the vector from the origin to `self`.
    #[inline]
    pub fn to_vec(self) -> Vector<[Sc; N], Sp> {
        Vector::new(self.0)
    }

    /// Returns the squared Euclidean distance between `self` and `other`.
    #[inline]
    pub fn distance_sqr(&self, other: &Self) -> Sc {
        Affine::sub(self, other).len_sqr()
    }
}

impl<Sc: Float, Sp, const N: usize> Point<[Sc; N], Sp> {
    /// Returns the Euclidean distance between `self` and `other`.
    ///
    /// # Examples
    /// ```
    /// use rayform_core::math::{pt2, Point2};
    ///
    /// let p: Point2 = pt2(1.0, 1.0);
    /// assert_eq!(p.distance(&pt2(4.0, 5.0)), 5.0);
    /// ```
    #[inline]
    pub fn distance(&self, other: &Self) -> Sc {
        Affine::sub(self, other).len()
    }
}

impl<Sc: Copy, B> Point2<Sc, B> {
    /// Returns the x component of `self`.
    #[inline]
    pub fn x(&self) -> Sc {
        self.0[0]
    }
    /// Returns the y component of `self`.
    #[inline]
    pub fn y(&self) -> Sc {
        self.0[1]
    }
}

impl<Sc: Copy, B> Point3<Sc, B> {
    /// Returns the x component of `self`.
    #[inline]
    pub fn x(&self) -> Sc {
        self.0[0]
    }
    /// Returns the y component of `self`.
    #[inline]
    pub fn y(&self) -> Sc {
        self.0[1]
    }
    /// Returns the z component of `self`.
    #[inline]
    pub fn z(&self) -> Sc {
        self.0[2]
    }
}

impl<Sc: Copy, B> Point4<Sc, B> {
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
}

//
// Local trait impls
//

impl<Sc: Scalar, Sp, const N: usize> Affine for Point<[Sc; N], Sp> {
    type Space = Sp;
    type Diff = Vector<[Sc; N], Sp>;
    const DIM: usize = N;

    #[inline]
    fn add(&self, other: &Self::Diff) -> Self {
        Self(array::from_fn(|i| self.0[i] + other.0[i]), Pd)
    }
    #[inline]
    fn sub(&self, other: &Self) -> Self::Diff {
        Vector::new(array::from_fn(|i| self.0[i] - other.0[i]))
    }
}

impl<Sc: ApproxEq, Sp, const N: usize> ApproxEq<Self, Sc>
    for Point<[Sc; N], Sp>
{
    fn approx_eq_eps(&self, other: &Self, eps: &Sc) -> bool {
        self.0.approx_eq_eps(&other.0, eps)
    }
    fn relative_epsilon() -> Sc {
        Sc::relative_epsilon()
    }
}

//
// Foreign trait impls
//

// Manual impls of Copy, Clone, Eq, and PartialEq to avoid
// superfluous where S: Trait bound

impl<R: Copy, S> Copy for Point<R, S> {}

impl<R: Clone, S> Clone for Point<R, S> {
    fn clone(&self) -> Self {
        Self(self.0.clone(), Pd)
    }
}

impl<R: Default, S> Default for Point<R, S> {
    fn default() -> Self {
        Self(R::default(), Pd)
    }
}

impl<R: Debug, Sp: Debug + Default> Debug for Point<R, Sp> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Point<{:?}>", Sp::default())?;
        Debug::fmt(&self.0, f)
    }
}

impl<R: Eq, S> Eq for Point<R, S> {}

impl<R: PartialEq, S> PartialEq for Point<R, S> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<R, Sp> From<R> for Point<R, Sp> {
    #[inline]
    fn from(repr: R) -> Self {
        Self(repr, Pd)
    }
}

impl<Sc, Sp, const N: usize> Index<usize> for Point<[Sc; N], Sp> {
    type Output = Sc;

    /// Returns the component at index `i`.
    ///
    /// # Panics
    /// If `i >= N`. See [`Point::get`] for a non-panicking version.
    #[inline]
    fn index(&self, i: usize) -> &Sc {
        &self.0[i]
    }
}

impl<Sc: Scalar, Sp, const N: usize> AddAssign<Vector<[Sc; N], Sp>>
    for Point<[Sc; N], Sp>
{
    #[inline]
    fn add_assign(&mut self, rhs: Vector<[Sc; N], Sp>) {
        *self = Affine::add(&*self, &rhs);
    }
}

impl<Sc: Scalar, Sp, const N: usize> SubAssign<Vector<[Sc; N], Sp>>
    for Point<[Sc; N], Sp>
{
    #[inline]
    fn sub_assign(&mut self, rhs: Vector<[Sc; N], Sp>) {
        *self = Affine::add(&*self, &-rhs);
    }
}

impl<Sc: Scalar, Sp, const N: usize> Add<Vector<[Sc; N], Sp>>
    for Point<[Sc; N], Sp>
{
    type Output = Self;

    #[inline]
    fn add(self, rhs: Vector<[Sc; N], Sp>) -> Self {
        Affine::add(&self, &rhs)
    }
}

impl<Sc: Scalar, Sp, const N: usize> Sub<Vector<[Sc; N], Sp>>
    for Point<[Sc; N], Sp>
{
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Vector<[Sc; N], Sp>) -> Self {
        Affine::add(&self, &-rhs)
    }
}

impl<Sc: Scalar, Sp, const N: usize> Sub for Point<[Sc; N], Sp> {
    type Output = Vector<[Sc; N], Sp>;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Affine::sub(&self, &rhs)
    }
}
