//! Real and integer vectors.

use core::array;
use core::fmt::{self, Debug, Formatter};
use core::marker::PhantomData as Pd;
use core::ops::{
    Add, AddAssign, Div, DivAssign, Index, Mul, MulAssign, Neg, Sub,
    SubAssign,
};

use crate::error::Result;
use crate::math::approx::ApproxEq;
use crate::math::num::{Float, Scalar};
use crate::math::point::Point;
use crate::math::space::{Affine, Linear, Real};
use crate::util::check;

/// A generic vector type.
///
/// `Repr` is the representation of the components, in practice an array
/// `[Sc; N]`; `Space` is a tag type identifying the vector space, and thus
/// the dimension and basis, of the vector. Vectors in different spaces
/// cannot be mixed without an explicit conversion.
#[repr(transparent)]
pub struct Vector<Repr, Space = ()>(pub Repr, Pd<Space>);

/// A 2-vector with `f64` components by default.
pub type Vec2<Sc = f64, Basis = ()> = Vector<[Sc; 2], Real<2, Basis>>;
/// A 3-vector with `f64` components by default.
pub type Vec3<Sc = f64, Basis = ()> = Vector<[Sc; 3], Real<3, Basis>>;
/// A 4-vector with `f64` components by default.
pub type Vec4<Sc = f64, Basis = ()> = Vector<[Sc; 4], Real<4, Basis>>;

/// A 2-vector with `f32` components.
pub type Vec2f<Basis = ()> = Vec2<f32, Basis>;
/// A 3-vector with `f32` components.
pub type Vec3f<Basis = ()> = Vec3<f32, Basis>;
/// A 2-vector with `i32` components.
pub type Vec2i<Basis = ()> = Vec2<i32, Basis>;
/// A 3-vector with `i32` components.
pub type Vec3i<Basis = ()> = Vec3<i32, Basis>;

/// Returns a real 2-vector with components `x` and `y`.
#[inline]
pub const fn vec2<Sc, B>(x: Sc, y: Sc) -> Vec2<Sc, B> {
    Vector([x, y], Pd)
}

/// Returns a real 3-vector with components `x`, `y`, and `z`.
#[inline]
pub const fn vec3<Sc, B>(x: Sc, y: Sc, z: Sc) -> Vec3<Sc, B> {
    Vector([x, y, z], Pd)
}

/// Returns a real 4-vector with components `x`, `y`, `z`, and `w`.
#[inline]
pub const fn vec4<Sc, B>(x: Sc, y: Sc, z: Sc, w: Sc) -> Vec4<Sc, B> {
    Vector([x, y, z, w], Pd)
}

/// Returns a vector with all components equal to `s`.
#[inline]
pub fn splat<Sc: Copy, Sp, const N: usize>(s: Sc) -> Vector<[Sc; N], Sp> {
    Vector([s; N], Pd)
}

//
// Inherent impls
//

impl<R, Sp> Vector<R, Sp> {
    /// Returns a new vector with representation `repr`.
    #[inline]
    pub const fn new(repr: R) -> Self {
        Self(repr, Pd)
    }

    /// Returns a vector with the same components as `self`
    /// but in a different space.
    ///
    /// This is a type-level conversion only; the components are unchanged.
    #[inline]
    pub fn to<S>(self) -> Vector<R, S> {
        Vector(self.0, Pd)
    }
}

impl<Sc: Scalar, Sp, const N: usize> Vector<[Sc; N], Sp> {
    /// Returns the zero vector.
    #[inline]
    pub fn zero() -> Self {
        splat(Sc::ZERO)
    }

    /// Returns the component at `i`, or an error if `i` is out of range.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`][crate::Error::InvalidArgument]
    /// if `i >= N`.
    pub fn get(&self, i: usize) -> Result<Sc> {
        check::index(i, N, "vector component index out of range")?;
        Ok(self.0[i])
    }

    /// Returns a vector whose components are `f` applied to the
    /// components of `self`.
    #[inline]
    pub fn map<T>(self, mut f: impl FnMut(Sc) -> T) -> Vector<[T; N], Sp> {
        Vector(array::from_fn(|i| f(self.0[i])), Pd)
    }

    /// Returns a vector whose components are `f` applied pairwise to the
    /// components of `self` and `other`.
    #[inline]
    pub fn zip_map<T>(
        self,
        other: Self,
        mut f: impl FnMut(Sc, Sc) -> T,
    ) -> Vector<[T; N], Sp> {
        Vector(array::from_fn(|i| f(self.0[i], other.0[i])), Pd)
    }

    /// Returns the dot product of `self` and `other`.
    #[inline]
    pub fn dot(&self, other: &Self) -> Sc {
        let mut res = Sc::ZERO;
        for i in 0..N {
            res = res + self.0[i] * other.0[i];
        }
        res
    }

    /// Returns the length of `self`, squared.
    #[inline]
    pub fn len_sqr(&self) -> Sc {
        self.dot(self)
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

    /// Converts `self` into a point with the same components.
    #[inline]
    pub fn to_pt(self) -> Point<[Sc; N], Sp> {
        Point::new(self.0)
    }
}

impl<Sc: Float, Sp, const N: usize> Vector<[Sc; N], Sp> {
    /// Returns the length (magnitude) of `self`.
    #[inline]
    pub fn len(&self) -> Sc {
        self.len_sqr().sqrt()
    }

    /// Returns `self` scaled to unit length.
    ///
    /// The result is NaN if `self` is the zero vector.
    ///
    /// # Examples
    /// ```
    /// use rayform_core::assert_approx_eq;
    /// use rayform_core::math::{vec3, Vec3};
    ///
    /// let v: Vec3 = vec3(3.0, 0.0, 4.0);
    /// assert_approx_eq!(v.normalize(), vec3(0.6, 0.0, 0.8));
    /// ```
    #[inline]
    #[must_use]
    pub fn normalize(&self) -> Self {
        *self * self.len().recip()
    }

    /// Returns whether `self` has unit length, within tolerance.
    #[inline]
    pub fn is_unit(&self) -> bool {
        (self.len_sqr() - Sc::ONE).abs() <= Sc::TOLERANCE.sqrt()
    }

    /// Returns the scalar projection of `self` onto `other`
    /// (the length of the component of `self` parallel to `other`),
    /// in units of the length of `other`.
    #[inline]
    pub fn scalar_project(&self, other: &Self) -> Sc {
        self.dot(other) / other.len_sqr()
    }

    /// Returns the vector projection of `self` onto `other`
    /// (the component of `self` parallel to `other`).
    #[inline]
    pub fn vector_project(&self, other: &Self) -> Self {
        *other * self.scalar_project(other)
    }

    /// Returns the component of `self` orthogonal to `other`.
    #[inline]
    pub fn reject(&self, other: &Self) -> Self {
        *self - self.vector_project(other)
    }
}

impl<Sc: Copy, B> Vec2<Sc, B> {
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

impl<Sc: Scalar, B> Vec2<Sc, B> {
    /// Returns the perpendicular dot product of `self` and `other`, the
    /// z component of their cross product when embedded in 3D.
    #[inline]
    pub fn perp_dot(&self, other: Self) -> Sc {
        self.x() * other.y() - self.y() * other.x()
    }
}

impl<Sc: Copy, B> Vec3<Sc, B> {
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

impl<Sc: Scalar, B> Vec3<Sc, B> {
    /// Returns the cross product of `self` and `other`.
    ///
    /// The result is orthogonal to both inputs and follows the right-hand
    /// rule.
    ///
    /// # Examples
    /// ```
    /// use rayform_core::math::{vec3, Vec3};
    ///
    /// let x: Vec3 = vec3(1.0, 0.0, 0.0);
    /// assert_eq!(x.cross(&vec3(0.0, 1.0, 0.0)), vec3(0.0, 0.0, 1.0));
    /// ```
    pub fn cross(&self, other: &Self) -> Self {
        let [a, b, c] = self.0;
        let [d, e, f] = other.0;
        vec3(b * f - c * e, c * d - a * f, a * e - b * d)
    }

    /// Returns a 4-vector with `self` as its xyz and `w` as its w component.
    #[inline]
    pub fn to_homog(self, w: Sc) -> Vec4<Sc, B> {
        let [x, y, z] = self.0;
        vec4(x, y, z, w)
    }
}

impl<Sc: Copy, B> Vec4<Sc, B> {
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
    /// Returns the w component of `self`.
    #[inline]
    pub fn w(&self) -> Sc {
        self.0[3]
    }
}

//
// Local trait impls
//

impl<Sc: Scalar, Sp, const N: usize> Affine for Vector<[Sc; N], Sp> {
    type Space = Sp;
    type Diff = Self;
    const DIM: usize = N;

    #[inline]
    fn add(&self, other: &Self) -> Self {
        self.zip_map(*other, |a, b| a + b)
    }
    #[inline]
    fn sub(&self, other: &Self) -> Self {
        self.zip_map(*other, |a, b| a - b)
    }
}

impl<Sc: Scalar, Sp, const N: usize> Linear for Vector<[Sc; N], Sp> {
    type Scalar = Sc;

    #[inline]
    fn zero() -> Self {
        splat(Sc::ZERO)
    }
    #[inline]
    fn neg(&self) -> Self {
        self.map(|a| -a)
    }
    #[inline]
    fn mul(&self, scalar: Sc) -> Self {
        self.map(|a| a * scalar)
    }
}

impl<Sc, Sp, const N: usize> ApproxEq<Self, Sc> for Vector<[Sc; N], Sp>
where
    Sc: ApproxEq,
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
// superfluous where Sp: Trait bound

impl<R: Copy, Sp> Copy for Vector<R, Sp> {}

impl<R: Clone, Sp> Clone for Vector<R, Sp> {
    fn clone(&self) -> Self {
        Self(self.0.clone(), Pd)
    }
}

impl<R: Default, Sp> Default for Vector<R, Sp> {
    fn default() -> Self {
        Self(R::default(), Pd)
    }
}

impl<R: Eq, Sp> Eq for Vector<R, Sp> {}

impl<R: PartialEq, Sp> PartialEq for Vector<R, Sp> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<R: Debug, Sp: Debug + Default> Debug for Vector<R, Sp> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Vec<{:?}>", Sp::default())?;
        Debug::fmt(&self.0, f)
    }
}

impl<R, Sp> From<R> for Vector<R, Sp> {
    #[inline]
    fn from(repr: R) -> Self {
        Self(repr, Pd)
    }
}

impl<Sc, Sp, const N: usize> Index<usize> for Vector<[Sc; N], Sp> {
    type Output = Sc;

    /// Returns the component at index `i`.
    ///
    /// # Panics
    /// If `i >= N`. See [`Vector::get`] for a non-panicking version.
    #[inline]
    fn index(&self, i: usize) -> &Sc {
        &self.0[i]
    }
}

impl<Sc: Scalar, Sp, const N: usize> AddAssign for Vector<[Sc; N], Sp> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = Affine::add(&*self, &rhs);
    }
}

impl<Sc: Scalar, Sp, const N: usize> SubAssign for Vector<[Sc; N], Sp> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = Affine::sub(&*self, &rhs);
    }
}

impl<Sc: Scalar, Sp, const N: usize> MulAssign<Sc> for Vector<[Sc; N], Sp> {
    #[inline]
    fn mul_assign(&mut self, rhs: Sc) {
        *self = Linear::mul(&*self, rhs);
    }
}

impl<Sc: Scalar, Sp, const N: usize> DivAssign<Sc> for Vector<[Sc; N], Sp> {
    #[inline]
    fn div_assign(&mut self, rhs: Sc) {
        *self = self.map(|a| a / rhs);
    }
}

impl<Sc: Scalar, Sp, const N: usize> Neg for Vector<[Sc; N], Sp> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Linear::neg(&self)
    }
}

impl_op!(Add::add, Vector, Self, +=);
impl_op!(Sub::sub, Vector, Self, -=);
impl_op!(Mul::mul, Vector, Sc, *=);
impl_op!(Div::div, Vector, Sc, /=);

macro_rules! impl_scalar_mul {
    ($($t:ty)*) => {$(
        impl<Sp, const N: usize> Mul<Vector<[$t; N], Sp>> for $t {
            type Output = Vector<[$t; N], Sp>;

            /// Multiplies all components of `rhs` by `self`.
            #[inline]
            fn mul(self, rhs: Vector<[$t; N], Sp>) -> Self::Output {
                rhs * self
            }
        }
    )*};
}

impl_scalar_mul!(f64 f32 i32);
