//! Matrices and linear and affine transforms.
//!
//! Matrices are stored in row-major order and tagged with the [`LinearMap`]
//! they represent, in practice a [`RealToReal`] map from a source basis to a
//! destination basis. The type system then ensures that a matrix is only
//! ever applied to points and vectors in its source basis, and that two
//! matrices are composed only if the destination of one is the source of
//! the other.
//!
//! A 4×4 matrix tagged `RealToReal<3, ..>` is an affine (or projective)
//! transform of 3-space in homogeneous coordinates. A 3×3 matrix tagged
//! `RealToReal<3, ..>` is a linear transform of 3-space, and one tagged
//! `RealToReal<2, ..>` an affine transform of the plane.

use core::array;
use core::fmt::{self, Debug, Formatter};
use core::marker::PhantomData as Pd;
use core::ops::Mul;

use crate::error::{Error, Result};
use crate::geom::Ray;
use crate::math::approx::ApproxEq;
use crate::math::basis::Basis;
use crate::math::num::{Float, Scalar};
use crate::math::point::{Point2, Point3, pt2, pt3};
use crate::math::quat::Quat;
use crate::math::space::Real;
use crate::math::vec::{Vec2, Vec3, Vec4, vec2, vec3, vec4};
use crate::util::check;

/// A linear map between two vector spaces.
pub trait LinearMap {
    /// The domain of the map.
    type Source;
    /// The codomain of the map.
    type Dest;
}

/// Trait for applying a transform to a value.
pub trait Apply<T> {
    /// The type of the transformed value.
    type Output;

    /// Applies `self` to `t`.
    fn apply(&self, t: &T) -> Self::Output;
}

/// Tag type for maps from `Real<DIM, Src>` to `Real<DIM, Dst>`.
pub struct RealToReal<const DIM: usize, Src = (), Dst = ()>(Pd<(Src, Dst)>);

impl<const DIM: usize, S, D> LinearMap for RealToReal<DIM, S, D> {
    type Source = Real<DIM, S>;
    type Dest = Real<DIM, D>;
}

/// A generic matrix type.
#[repr(transparent)]
pub struct Matrix<Repr, Map>(pub Repr, Pd<Map>);

/// A 3×3 matrix with `f64` elements by default.
pub type Mat3<Sc = f64, Map = RealToReal<3>> = Matrix<[[Sc; 3]; 3], Map>;
/// A 4×4 matrix with `f64` elements by default.
pub type Mat4<Sc = f64, Map = RealToReal<3>> = Matrix<[[Sc; 4]; 4], Map>;

//
// Inherent impls
//

impl<Sc, Map, const N: usize> Matrix<[[Sc; N]; N], Map> {
    /// Returns a matrix with the given rows.
    #[inline]
    pub const fn new(rows: [[Sc; N]; N]) -> Self {
        Self(rows, Pd)
    }

    /// Returns a matrix with the given rows.
    #[inline]
    pub const fn from_rows(rows: [[Sc; N]; N]) -> Self {
        Self::new(rows)
    }

    /// Returns a reference to the elements of `self`, row by row.
    #[inline]
    pub fn repr(&self) -> &[[Sc; N]; N] {
        &self.0
    }

    /// Returns the same matrix retagged with a different map.
    #[inline]
    pub fn to<M>(self) -> Matrix<[[Sc; N]; N], M> {
        Matrix(self.0, Pd)
    }
}

impl<Sc: Scalar, Map, const N: usize> Matrix<[[Sc; N]; N], Map> {
    /// Returns the identity matrix.
    pub fn identity() -> Self {
        Self::new(array::from_fn(|i| {
            array::from_fn(|j| if i == j { Sc::ONE } else { Sc::ZERO })
        }))
    }

    /// Returns a matrix with the given columns.
    pub fn from_cols(cols: [[Sc; N]; N]) -> Self {
        Self::new(array::from_fn(|i| array::from_fn(|j| cols[j][i])))
    }

    /// Returns the row at zero-based index `i`.
    ///
    /// # Panics
    /// If `i >= N`.
    #[inline]
    pub fn row(&self, i: usize) -> [Sc; N] {
        self.0[i]
    }

    /// Returns the column at zero-based index `j`.
    ///
    /// # Panics
    /// If `j >= N`.
    #[inline]
    pub fn col(&self, j: usize) -> [Sc; N] {
        array::from_fn(|i| self.0[i][j])
    }

    /// Returns the element at `row` and `col`, both **one-based**.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if either index is zero or greater than `N`.
    ///
    /// # Examples
    /// ```
    /// use rayform_core::math::Mat3;
    ///
    /// let m: Mat3 = Mat3::identity();
    /// assert_eq!(m.get(1, 1), Ok(1.0));
    /// assert_eq!(m.get(3, 1), Ok(0.0));
    /// assert!(m.get(0, 1).is_err());
    /// assert!(m.get(1, 4).is_err());
    /// ```
    pub fn get(&self, row: usize, col: usize) -> Result<Sc> {
        check::index(row.wrapping_sub(1), N, "matrix row out of range")?;
        check::index(col.wrapping_sub(1), N, "matrix column out of range")?;
        Ok(self.0[row - 1][col - 1])
    }

    fn mul_els(&self, other: &[[Sc; N]; N]) -> [[Sc; N]; N] {
        array::from_fn(|i| {
            array::from_fn(|j| {
                let mut s = Sc::ZERO;
                for k in 0..N {
                    s = s + self.0[i][k] * other[k][j];
                }
                s
            })
        })
    }
}

impl<Sc, const N: usize, const DIM: usize, S, D>
    Matrix<[[Sc; N]; N], RealToReal<DIM, S, D>>
where
    Sc: Scalar,
{
    /// Returns the composite transform `self ∘ other`, which applies
    /// `other` first, then `self`.
    pub fn compose<I>(
        &self,
        other: &Matrix<[[Sc; N]; N], RealToReal<DIM, I, S>>,
    ) -> Matrix<[[Sc; N]; N], RealToReal<DIM, I, D>> {
        Matrix(self.mul_els(&other.0), Pd)
    }

    /// Returns the composite transform `other ∘ self`, which applies
    /// `self` first, then `other`.
    pub fn then<E>(
        &self,
        other: &Matrix<[[Sc; N]; N], RealToReal<DIM, D, E>>,
    ) -> Matrix<[[Sc; N]; N], RealToReal<DIM, S, E>> {
        other.compose(self)
    }

    /// Returns the transpose of `self`.
    ///
    /// The transpose of the inverse of a transform is the transform for
    /// surface normals, so the transpose is tagged as mapping the
    /// destination basis back to the source.
    pub fn transpose(&self) -> Matrix<[[Sc; N]; N], RealToReal<DIM, D, S>> {
        Matrix(array::from_fn(|i| self.col(i)), Pd)
    }
}

impl<Sc: Scalar, Map> Mat3<Sc, Map> {
    /// Returns the determinant of `self`.
    pub fn determinant(&self) -> Sc {
        let [[a, b, c], [d, e, f], [g, h, i]] = self.0;
        a * (e * i - f * h) - b * (d * i - f * g) + c * (d * h - e * g)
    }
}

impl<Sc: Float, Map> Mat3<Sc, Map> {
    /// Returns whether `self` has an inverse, that is, whether the
    /// magnitude of its determinant is at least [`Float::DET_EPSILON`].
    #[inline]
    pub fn is_invertible(&self) -> bool {
        is_invertible_det(self.determinant())
    }
}

impl<Sc: Float, const DIM: usize, S, D> Mat3<Sc, RealToReal<DIM, S, D>> {
    /// Returns the inverse of `self`.
    ///
    /// # Errors
    /// [`Error::NotInvertible`] if `|det| < DET_EPSILON`.
    pub fn inverse(&self) -> Result<Mat3<Sc, RealToReal<DIM, D, S>>> {
        let det = check_det(self.determinant())?;
        let [[a, b, c], [d, e, f], [g, h, i]] = self.0;
        let r = det.recip();
        Ok(Matrix::new([
            [(e * i - f * h) * r, (c * h - b * i) * r, (b * f - c * e) * r],
            [(f * g - d * i) * r, (a * i - c * g) * r, (c * d - a * f) * r],
            [(d * h - e * g) * r, (b * g - a * h) * r, (a * e - b * d) * r],
        ]))
    }
}

impl<Sc: Float, S, D> Mat3<Sc, RealToReal<3, S, D>> {
    /// Returns the rotation matrix corresponding to the unit quaternion `q`.
    pub fn from_quat(q: &Quat<Sc>) -> Self {
        let [x, y, z, w] = q.0;
        let two = Sc::ONE + Sc::ONE;
        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (xw, yw, zw) = (x * w, y * w, z * w);
        Self::new([
            [
                Sc::ONE - two * (yy + zz),
                two * (xy - zw),
                two * (xz + yw),
            ],
            [
                two * (xy + zw),
                Sc::ONE - two * (xx + zz),
                two * (yz - xw),
            ],
            [
                two * (xz - yw),
                two * (yz + xw),
                Sc::ONE - two * (xx + yy),
            ],
        ])
    }

    /// Returns the unit quaternion corresponding to the rotation `self`.
    ///
    /// The branch is chosen by the largest of the trace and the diagonal
    /// elements, so the divisor is always well away from zero.
    pub fn to_quat(&self) -> Quat<Sc> {
        let [[m00, m01, m02], [m10, m11, m12], [m20, m21, m22]] = self.0;
        let one = Sc::ONE;
        let two = one + one;
        let four = two + two;

        let trace = m00 + m11 + m22;
        if trace > Sc::ZERO {
            let s = (trace + one).sqrt() * two;
            let (x, y, z) = ((m21 - m12) / s, (m02 - m20) / s, (m10 - m01) / s);
            Quat::new(x, y, z, s / four)
        } else if m00 > m11 && m00 > m22 {
            let s = (one + m00 - m11 - m22).sqrt() * two;
            let (y, z, w) = ((m01 + m10) / s, (m02 + m20) / s, (m21 - m12) / s);
            Quat::new(s / four, y, z, w)
        } else if m11 > m22 {
            let s = (one + m11 - m00 - m22).sqrt() * two;
            let (x, z, w) = ((m01 + m10) / s, (m12 + m21) / s, (m02 - m20) / s);
            Quat::new(x, s / four, z, w)
        } else {
            let s = (one + m22 - m00 - m11).sqrt() * two;
            let (x, y, w) = ((m02 + m20) / s, (m12 + m21) / s, (m10 - m01) / s);
            Quat::new(x, y, s / four, w)
        }
    }

    /// Returns the matrix whose columns are the `u`, `v`, and `w` axes of
    /// `basis`, in that order.
    pub fn from_basis<B>(basis: &Basis<Sc, B>) -> Self {
        let (u, v, w) = (basis.u.0, basis.v.0, basis.w.0);
        Self::from_cols([u, v, w])
    }
}

impl<Sc: Scalar, Map> Mat4<Sc, Map> {
    /// Returns the determinant of `self`.
    ///
    /// Computed by Laplace expansion along the first two rows, as the sum of
    /// products of the 2×2 minors of rows 1–2 with the complementary minors
    /// of rows 3–4.
    pub fn determinant(&self) -> Sc {
        let (s, c) = self.minors();
        det_from_minors(&s, &c)
    }

    /// Returns the six 2×2 minors of the top two and the bottom two rows.
    fn minors(&self) -> ([Sc; 6], [Sc; 6]) {
        let pairs = |r: [Sc; 4], s: [Sc; 4]| {
            [
                r[0] * s[1] - r[1] * s[0],
                r[0] * s[2] - r[2] * s[0],
                r[0] * s[3] - r[3] * s[0],
                r[1] * s[2] - r[2] * s[1],
                r[1] * s[3] - r[3] * s[1],
                r[2] * s[3] - r[3] * s[2],
            ]
        };
        (pairs(self.0[0], self.0[1]), pairs(self.0[2], self.0[3]))
    }
}

impl<Sc: Float, Map> Mat4<Sc, Map> {
    /// Returns whether `self` has an inverse, that is, whether the
    /// magnitude of its determinant is at least [`Float::DET_EPSILON`].
    #[inline]
    pub fn is_invertible(&self) -> bool {
        is_invertible_det(self.determinant())
    }
}

impl<Sc: Float, const DIM: usize, S, D> Mat4<Sc, RealToReal<DIM, S, D>> {
    /// Returns the inverse of `self`.
    ///
    /// Computed in closed form as the adjugate divided by the determinant,
    /// reusing the 2×2 minors of the determinant computation.
    ///
    /// # Errors
    /// [`Error::NotInvertible`] if `|det| < DET_EPSILON`.
    ///
    /// # Examples
    /// ```
    /// use rayform_core::assert_approx_eq;
    /// use rayform_core::math::{translate, vec3, Mat4};
    ///
    /// let m: Mat4 = translate(vec3(1.0, 2.0, 3.0));
    /// let inv = m.inverse().unwrap();
    /// let expected: Mat4 = translate(vec3(-1.0, -2.0, -3.0));
    /// assert_approx_eq!(inv, expected);
    ///
    /// let singular: Mat4 = Mat4::new([[0.0; 4]; 4]);
    /// assert!(singular.inverse().is_err());
    /// ```
    pub fn inverse(&self) -> Result<Mat4<Sc, RealToReal<DIM, D, S>>> {
        let (s, c) = self.minors();
        let det = check_det(det_from_minors(&s, &c))?;
        let r = det.recip();
        let [
            [m00, m01, m02, m03],
            [m10, m11, m12, m13],
            [m20, m21, m22, m23],
            [m30, m31, m32, m33],
        ] = self.0;

        Ok(Matrix::new([
            [
                (m11 * c[5] - m12 * c[4] + m13 * c[3]) * r,
                (-m01 * c[5] + m02 * c[4] - m03 * c[3]) * r,
                (m31 * s[5] - m32 * s[4] + m33 * s[3]) * r,
                (-m21 * s[5] + m22 * s[4] - m23 * s[3]) * r,
            ],
            [
                (-m10 * c[5] + m12 * c[2] - m13 * c[1]) * r,
                (m00 * c[5] - m02 * c[2] + m03 * c[1]) * r,
                (-m30 * s[5] + m32 * s[2] - m33 * s[1]) * r,
                (m20 * s[5] - m22 * s[2] + m23 * s[1]) * r,
            ],
            [
                (m10 * c[4] - m11 * c[2] + m13 * c[0]) * r,
                (-m00 * c[4] + m01 * c[2] - m03 * c[0]) * r,
                (m30 * s[4] - m31 * s[2] + m33 * s[0]) * r,
                (-m20 * s[4] + m21 * s[2] - m23 * s[0]) * r,
            ],
            [
                (-m10 * c[3] + m11 * c[1] - m12 * c[0]) * r,
                (m00 * c[3] - m01 * c[1] + m02 * c[0]) * r,
                (-m30 * s[3] + m31 * s[1] - m32 * s[0]) * r,
                (m20 * s[3] - m21 * s[1] + m22 * s[0]) * r,
            ],
        ]))
    }
}

impl<Sc: Float, S, D> Mat4<Sc, RealToReal<3, S, D>> {
    /// Applies `self` to `p` as a homogeneous point, including the bottom
    /// row, and divides the result by its w component.
    ///
    /// The division is skipped if w is already one or is zero, within
    /// [`Float::TOLERANCE`]; in the latter case the result is a point at
    /// infinity and its xyz components are returned as is.
    pub fn apply_and_divide(&self, p: &Point3<Sc, S>) -> Point3<Sc, D> {
        let [x, y, z, w] = self.apply(&p.to_vec().to_homog(Sc::ONE)).0;
        if (w - Sc::ONE).abs() <= Sc::TOLERANCE || w.abs() <= Sc::TOLERANCE {
            pt3(x, y, z)
        } else {
            let r = w.recip();
            pt3(x * r, y * r, z * r)
        }
    }

    /// Applies the transpose of the linear (upper-left 3×3) part of `self`
    /// to `v`.
    ///
    /// To transform a surface normal by a transform `M`, call this on the
    /// *inverse* of `M`. Normals transformed this way stay perpendicular to
    /// the transformed surface even if `M` contains non-uniform scaling.
    ///
    /// # Examples
    /// ```
    /// use rayform_core::assert_approx_eq;
    /// use rayform_core::math::{scale, vec3, Apply, Mat4, Vec3};
    ///
    /// let m: Mat4 = scale(vec3(2.0, 1.0, 1.0));
    /// let tangent: Vec3 = vec3(1.0, -1.0, 0.0);
    /// let normal: Vec3 = vec3(1.0, 1.0, 0.0);
    ///
    /// let t = m.apply(&tangent);
    /// let n = m.inverse().unwrap().apply_transpose(&normal);
    /// assert_approx_eq!(t.dot(&n), 0.0);
    /// ```
    pub fn apply_transpose(&self, v: &Vec3<Sc, D>) -> Vec3<Sc, S> {
        let m = &self.0;
        let [x, y, z] = v.0;
        vec3(
            m[0][0] * x + m[1][0] * y + m[2][0] * z,
            m[0][1] * x + m[1][1] * y + m[2][1] * z,
            m[0][2] * x + m[1][2] * y + m[2][2] * z,
        )
    }

    /// Reprojects a ray parameter from the source space to the destination
    /// space of `self`.
    ///
    /// Finds the point at `t` along `old`, transforms it by `self`, and
    /// returns its distance from the origin of `new`, which should be `old`
    /// transformed by `self`. The two parameters differ whenever `self`
    /// scales the direction of `old`, in particular non-uniformly.
    ///
    /// Returns `t` unchanged if it is NaN, infinite, zero, or either of
    /// `±Float::EXTREME`; these mark open interval bounds rather than hits.
    pub fn transform_t(
        &self,
        old: &Ray<Point3<Sc, S>>,
        new: &Ray<Point3<Sc, D>>,
        t: Sc,
    ) -> Sc {
        if t.is_nan()
            || t.is_infinite()
            || t == Sc::ZERO
            || t == Sc::EXTREME
            || t == -Sc::EXTREME
        {
            return t;
        }
        self.apply_and_divide(&old.at(t)).distance(&new.0)
    }

    /// Returns the rotation matrix corresponding to the unit quaternion `q`.
    pub fn from_quat(q: &Quat<Sc>) -> Self {
        Mat3::<Sc, RealToReal<3, S, D>>::from_quat(q).to_affine()
    }

    /// Returns the unit quaternion corresponding to the rotation part of
    /// `self`.
    pub fn to_quat(&self) -> Quat<Sc> {
        self.linear().to_quat()
    }

    /// Returns the rotation matrix whose columns are the axes of `basis`.
    pub fn from_basis<B>(basis: &Basis<Sc, B>) -> Self {
        Mat3::<Sc, RealToReal<3, S, D>>::from_basis(basis).to_affine()
    }
}

impl<Sc: Scalar, S, D> Mat4<Sc, RealToReal<3, S, D>> {
    /// Returns the upper-left 3×3 block of `self`.
    pub fn linear(&self) -> Mat3<Sc, RealToReal<3, S, D>> {
        let m = &self.0;
        Matrix::new(array::from_fn(|i| [m[i][0], m[i][1], m[i][2]]))
    }
}

impl<Sc: Scalar, S, D> Mat3<Sc, RealToReal<3, S, D>> {
    /// Returns a 4×4 affine matrix with `self` as its linear part and
    /// no translation.
    pub fn to_affine(&self) -> Mat4<Sc, RealToReal<3, S, D>> {
        let (o, l) = (Sc::ZERO, Sc::ONE);
        let [r0, r1, r2] = self.0;
        Matrix::new([
            [r0[0], r0[1], r0[2], o],
            [r1[0], r1[1], r1[2], o],
            [r2[0], r2[1], r2[2], o],
            [o, o, o, l],
        ])
    }
}

/// Sums the products of complementary 2×2 minors as returned by
/// [`Mat4::minors`].
fn det_from_minors<Sc: Scalar>(s: &[Sc; 6], c: &[Sc; 6]) -> Sc {
    s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1]
        + s[5] * c[0]
}

fn is_invertible_det<Sc: Float>(det: Sc) -> bool {
    det.abs() >= Sc::DET_EPSILON
}

fn check_det<Sc: Float>(det: Sc) -> Result<Sc> {
    if is_invertible_det(det) {
        Ok(det)
    } else {
        log::debug!("cannot invert matrix with determinant {det:?}");
        Err(Error::NotInvertible { det: det.to_f64() })
    }
}

//
// Apply impls
//

impl<Sc: Scalar, S, D> Apply<Vec4<Sc, S>> for Mat4<Sc, RealToReal<3, S, D>> {
    type Output = Vec4<Sc, D>;

    /// Multiplies the homogeneous 4-vector `v` by `self`.
    fn apply(&self, v: &Vec4<Sc, S>) -> Vec4<Sc, D> {
        let [a, b, c, d] = self.0.map(|row| Vec4::<Sc, S>::new(row).dot(v));
        vec4(a, b, c, d)
    }
}

impl<Sc: Scalar, S, D> Apply<Point3<Sc, S>> for Mat4<Sc, RealToReal<3, S, D>> {
    type Output = Point3<Sc, D>;

    /// Applies the affine part of `self` to `p`.
    ///
    /// The bottom row is ignored; see [`Mat4::apply_and_divide`] for a
    /// projective version.
    fn apply(&self, p: &Point3<Sc, S>) -> Point3<Sc, D> {
        let m = &self.0;
        let [x, y, z] = p.0;
        let row = |i: usize| m[i][0] * x + m[i][1] * y + m[i][2] * z + m[i][3];
        pt3(row(0), row(1), row(2))
    }
}

impl<Sc: Scalar, S, D> Apply<Vec3<Sc, S>> for Mat4<Sc, RealToReal<3, S, D>> {
    type Output = Vec3<Sc, D>;

    /// Applies the linear part of `self` to `v`.
    fn apply(&self, v: &Vec3<Sc, S>) -> Vec3<Sc, D> {
        self.linear().apply(v)
    }
}

impl<Sc: Float, S, D> Apply<Ray<Point3<Sc, S>>>
    for Mat4<Sc, RealToReal<3, S, D>>
{
    type Output = Ray<Point3<Sc, D>>;

    /// Transforms the origin of `ray` by [`Mat4::apply_and_divide`] and the
    /// direction by the linear part of `self`.
    ///
    /// The direction is not renormalized; in general the parameter values of
    /// the transformed ray differ from those of the original. See
    /// [`Mat4::transform_t`].
    fn apply(&self, ray: &Ray<Point3<Sc, S>>) -> Ray<Point3<Sc, D>> {
        Ray(self.apply_and_divide(&ray.0), self.apply(&ray.1))
    }
}

impl<Sc: Scalar, S, D> Apply<Vec3<Sc, S>> for Mat3<Sc, RealToReal<3, S, D>> {
    type Output = Vec3<Sc, D>;

    fn apply(&self, v: &Vec3<Sc, S>) -> Vec3<Sc, D> {
        let [a, b, c] = self.0.map(|row| Vec3::<Sc, S>::new(row).dot(v));
        vec3(a, b, c)
    }
}

impl<Sc: Scalar, S, D> Apply<Point3<Sc, S>> for Mat3<Sc, RealToReal<3, S, D>> {
    type Output = Point3<Sc, D>;

    /// Applies `self` to `p` as a linear map fixing the origin.
    fn apply(&self, p: &Point3<Sc, S>) -> Point3<Sc, D> {
        self.apply(&p.to_vec()).to_pt()
    }
}

impl<Sc: Scalar, S, D> Apply<Vec2<Sc, S>> for Mat3<Sc, RealToReal<2, S, D>> {
    type Output = Vec2<Sc, D>;

    /// Applies the linear (upper-left 2×2) part of `self` to `v`.
    fn apply(&self, v: &Vec2<Sc, S>) -> Vec2<Sc, D> {
        let m = &self.0;
        let [x, y] = v.0;
        vec2(m[0][0] * x + m[0][1] * y, m[1][0] * x + m[1][1] * y)
    }
}

impl<Sc: Scalar, S, D> Apply<Point2<Sc, S>> for Mat3<Sc, RealToReal<2, S, D>> {
    type Output = Point2<Sc, D>;

    /// Applies the affine part of `self` to `p`. The bottom row is ignored.
    fn apply(&self, p: &Point2<Sc, S>) -> Point2<Sc, D> {
        let m = &self.0;
        let [x, y] = p.0;
        pt2(
            m[0][0] * x + m[0][1] * y + m[0][2],
            m[1][0] * x + m[1][1] * y + m[1][2],
        )
    }
}

//
// Free functions
//

/// Returns a matrix applying the scaling `s`.
pub fn scale<Sc: Scalar>(s: Vec3<Sc>) -> Mat4<Sc> {
    let (o, l) = (Sc::ZERO, Sc::ONE);
    let [x, y, z] = s.0;
    Matrix::new([
        [x, o, o, o], //
        [o, y, o, o],
        [o, o, z, o],
        [o, o, o, l],
    ])
}

/// Returns a matrix applying the translation `t`.
pub fn translate<Sc: Scalar>(t: Vec3<Sc>) -> Mat4<Sc> {
    let (o, l) = (Sc::ZERO, Sc::ONE);
    let [x, y, z] = t.0;
    Matrix::new([
        [l, o, o, x], //
        [o, l, o, y],
        [o, o, l, z],
        [o, o, o, l],
    ])
}

/// Returns a matrix applying the planar translation `t`.
pub fn translate2<Sc: Scalar>(t: Vec2<Sc>) -> Mat3<Sc, RealToReal<2>> {
    let (o, l) = (Sc::ZERO, Sc::ONE);
    let [x, y] = t.0;
    Matrix::new([
        [l, o, x], //
        [o, l, y],
        [o, o, l],
    ])
}

/// Returns a matrix applying a rotation about the x axis by `a` radians,
/// turning the y axis towards the z axis.
#[cfg(feature = "fp")]
pub fn rotate_x<Sc: Float>(a: Sc) -> Mat4<Sc> {
    let (o, l, s, c) = (Sc::ZERO, Sc::ONE, a.sin(), a.cos());
    Matrix::new([
        [l, o, o, o], //
        [o, c, -s, o],
        [o, s, c, o],
        [o, o, o, l],
    ])
}

/// Returns a matrix applying a rotation about the y axis by `a` radians,
/// turning the z axis towards the x axis.
#[cfg(feature = "fp")]
pub fn rotate_y<Sc: Float>(a: Sc) -> Mat4<Sc> {
    let (o, l, s, c) = (Sc::ZERO, Sc::ONE, a.sin(), a.cos());
    Matrix::new([
        [c, o, s, o], //
        [o, l, o, o],
        [-s, o, c, o],
        [o, o, o, l],
    ])
}

/// Returns a matrix applying a rotation about the z axis by `a` radians,
/// turning the x axis towards the y axis.
#[cfg(feature = "fp")]
pub fn rotate_z<Sc: Float>(a: Sc) -> Mat4<Sc> {
    let (o, l, s, c) = (Sc::ZERO, Sc::ONE, a.sin(), a.cos());
    Matrix::new([
        [c, -s, o, o], //
        [s, c, o, o],
        [o, o, l, o],
        [o, o, o, l],
    ])
}

/// Returns a matrix applying a rotation by `a` radians about `axis`.
#[cfg(feature = "fp")]
pub fn rotate<Sc: Float>(axis: Vec3<Sc>, a: Sc) -> Mat4<Sc> {
    Mat4::from_quat(&Quat::from_axis_angle(&axis, a))
}

/// Returns a rotation matrix whose columns are the orthonormalized `u`, `v`,
/// and `w` axes built from `w` and `v`.
///
/// `v` is made orthogonal to `w` by Gram–Schmidt, and `u` is `v × w`.
/// The matrix maps the coordinate axes x, y, z onto u, v, w.
///
/// # Examples
/// ```
/// use rayform_core::assert_approx_eq;
/// use rayform_core::math::{rotate_from_basis, vec3, Apply, Vec3};
///
/// let m = rotate_from_basis(vec3(1.0, 0.0, 0.0), vec3(0.0, 1.0, 1.0));
/// let z: Vec3 = vec3(0.0, 0.0, 1.0);
/// assert_approx_eq!(m.apply(&z), vec3(1.0, 0.0, 0.0));
/// ```
pub fn rotate_from_basis<Sc: Float>(w: Vec3<Sc>, v: Vec3<Sc>) -> Mat4<Sc> {
    Mat4::from_basis(&Basis::from_wv(&w, &v))
}

/// Returns a rotation matrix whose columns are `u`, `v`, and `w`.
///
/// The vectors are used as is; they should be orthonormal.
pub fn rotate_from_basis3<Sc: Float>(
    w: Vec3<Sc>,
    v: Vec3<Sc>,
    u: Vec3<Sc>,
) -> Mat4<Sc> {
    Mat3::<Sc>::from_cols([u.0, v.0, w.0]).to_affine()
}

/// Returns a view transform for a camera at `eye` looking at `target`.
///
/// The camera looks down the negative w (z) axis of its own space; `up` is
/// made orthogonal to the viewing direction to get the v (y) axis.
/// The eye maps to the origin.
pub fn look_at<Sc: Float>(
    eye: Point3<Sc>,
    target: Point3<Sc>,
    up: Vec3<Sc>,
) -> Mat4<Sc> {
    let f = (target - eye).normalize();
    let Basis { w, v, u } = Basis::from_wv(&-f, &up);
    let e = eye.to_vec();
    Matrix::new([
        [u.x(), u.y(), u.z(), -u.dot(&e)],
        [v.x(), v.y(), v.z(), -v.dot(&e)],
        [w.x(), w.y(), w.z(), -w.dot(&e)],
        [Sc::ZERO, Sc::ZERO, Sc::ZERO, Sc::ONE],
    ])
}

//
// Foreign trait impls
//

impl<Sc, const N: usize, const DIM: usize, S, I, D>
    Mul<Matrix<[[Sc; N]; N], RealToReal<DIM, I, S>>>
    for Matrix<[[Sc; N]; N], RealToReal<DIM, S, D>>
where
    Sc: Scalar,
{
    type Output = Matrix<[[Sc; N]; N], RealToReal<DIM, I, D>>;

    /// Returns `self.compose(&rhs)`.
    fn mul(
        self,
        rhs: Matrix<[[Sc; N]; N], RealToReal<DIM, I, S>>,
    ) -> Self::Output {
        self.compose(&rhs)
    }
}

impl<R: Copy, M> Copy for Matrix<R, M> {}

impl<R: Clone, M> Clone for Matrix<R, M> {
    fn clone(&self) -> Self {
        Self(self.0.clone(), Pd)
    }
}

impl<R: PartialEq, M> PartialEq for Matrix<R, M> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<Sc: Debug, M: Debug + Default, const N: usize> Debug
    for Matrix<[[Sc; N]; N], M>
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Matrix<{:?}>[", M::default())?;
        for i in 0..N {
            writeln!(f, "    {:6.2?}", self.0[i])?;
        }
        write!(f, "]")
    }
}

impl<const DIM: usize, S, D> Default for RealToReal<DIM, S, D> {
    fn default() -> Self {
        Self(Pd)
    }
}

impl<const DIM: usize, S, D> Debug for RealToReal<DIM, S, D>
where
    S: Debug + Default,
    D: Debug + Default,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (s, d) = (Real::<DIM, S>::default(), Real::<DIM, D>::default());
        write!(f, "{s:?}→{d:?}")
    }
}

impl<const N: usize, Sc, M> From<[[Sc; N]; N]> for Matrix<[[Sc; N]; N], M> {
    fn from(rows: [[Sc; N]; N]) -> Self {
        Self(rows, Pd)
    }
}

impl<Sc: ApproxEq, Map, const N: usize> ApproxEq<Self, Sc>
    for Matrix<[[Sc; N]; N], Map>
{
    fn approx_eq_eps(&self, other: &Self, eps: &Sc) -> bool {
        self.0.approx_eq_eps(&other.0, eps)
    }
    fn relative_epsilon() -> Sc {
        Sc::relative_epsilon()
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use crate::assert_approx_eq;
    use crate::math::point::Point3f;
    use crate::math::vec::Vec3f;

    use super::*;

    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
    struct Obj;
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
    struct World;

    const SAMPLE: [[f64; 4]; 4] = [
        [2.0, 0.0, 1.0, 3.0],
        [1.0, 3.0, 0.0, -1.0],
        [0.0, 1.0, 4.0, 2.0],
        [0.0, 0.0, 0.0, 1.0],
    ];

    #[test]
    fn matrix_debug() {
        let m: Mat4 = [
            [0.0, 1.0, 2.0, 3.0],
            [10.0, 11.0, 12.0, 13.0],
            [20.0, 21.0, 22.0, 23.0],
            [30.0, 31.0, 32.0, 33.0],
        ]
        .into();

        let expected = r#"Matrix<ℝ³<()>→ℝ³<()>>[
    [  0.00,   1.00,   2.00,   3.00]
    [ 10.00,  11.00,  12.00,  13.00]
    [ 20.00,  21.00,  22.00,  23.00]
    [ 30.00,  31.00,  32.00,  33.00]
]"#;
        assert_eq!(format!("{m:?}"), expected);
    }

    #[test]
    fn one_based_access() {
        let m: Mat4 = SAMPLE.into();
        assert_eq!(m.get(1, 4), Ok(3.0));
        assert_eq!(m.get(2, 1), Ok(1.0));
        assert!(matches!(m.get(5, 1), Err(Error::InvalidArgument(_))));
        assert!(matches!(m.get(1, 0), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn rows_cols_transpose() {
        let m: Mat3 = Mat3::from_rows([
            [1.0, 2.0, 3.0],
            [4.0, 5.0, 6.0],
            [7.0, 8.0, 9.0],
        ]);
        assert_eq!(m.row(1), [4.0, 5.0, 6.0]);
        assert_eq!(m.col(1), [2.0, 5.0, 8.0]);
        assert_eq!(m.transpose().row(0), [1.0, 4.0, 7.0]);
        let cols: Mat3 = Mat3::from_cols(m.0);
        assert_eq!(cols, m.transpose());
    }

    #[test]
    fn identity_determinant_and_inverse() {
        let id: Mat4 = Mat4::identity();
        assert_eq!(id.determinant(), 1.0);
        assert_eq!(id.inverse(), Ok(id));

        let id: Mat3 = Mat3::identity();
        assert_eq!(id.determinant(), 1.0);
        assert_eq!(id.inverse(), Ok(id));
    }

    #[test]
    fn determinant_4x4() {
        let m: Mat4 = SAMPLE.into();
        // Block triangular; equals the upper-left 3x3 determinant
        assert_eq!(m.determinant(), 25.0);
        assert_eq!(m.linear().determinant(), 25.0);
        assert_eq!(scale(vec3(2.0, 3.0, -1.0)).determinant(), -6.0);
    }

    #[test]
    fn inverse_of_inverse_4x4() {
        let m: Mat4 = SAMPLE.into();
        let inv = m.inverse().unwrap();
        assert_approx_eq!(inv.compose(&m), Mat4::identity());
        assert_approx_eq!(m.compose(&inv), Mat4::identity());
        assert_approx_eq!(inv.inverse().unwrap(), m);
    }

    #[test]
    fn inverse_3x3() {
        let m: Mat3 = Mat3::new([
            [2.0, 0.0, 1.0],
            [1.0, 3.0, 0.0],
            [0.0, 1.0, 4.0],
        ]);
        let inv = m.inverse().unwrap();
        assert_approx_eq!(inv * m, Mat3::identity());
    }

    #[test]
    fn is_invertible_agrees_with_inverse_near_threshold() {
        for s in [1e-3, 2e-4, 1e-4, 5e-5, 1e-5] {
            let m: Mat4 = scale(vec3(s, s, s));
            assert_eq!(m.is_invertible(), m.inverse().is_ok(), "scale {s}");

            let m3: Mat3 = m.linear();
            assert_eq!(m3.is_invertible(), m3.inverse().is_ok(), "scale {s}");
        }
        let big: Mat4 = scale(vec3(1e-3, 1e-3, 1e-3));
        assert!(big.is_invertible());
        let tiny: Mat4 = scale(vec3(1e-5, 1e-5, 1e-5));
        assert!(!tiny.is_invertible());
    }

    #[test]
    fn singular_matrix_is_rejected() {
        let m: Mat4 = Mat4::new([
            [1.0, 2.0, 3.0, 4.0],
            [2.0, 4.0, 6.0, 8.0],
            [0.0, 1.0, 0.0, 1.0],
            [1.0, 0.0, 1.0, 0.0],
        ]);
        assert!(!m.is_invertible());
        assert_eq!(m.inverse(), Err(Error::NotInvertible { det: 0.0 }));

        let tiny: Mat4 = scale(vec3(1e-5, 1e-5, 1e-5));
        assert!(!tiny.is_invertible());
        assert!(tiny.inverse().is_err());
    }

    #[test]
    fn compose_applies_rhs_first() {
        let t: Mat4<f64, RealToReal<3, Obj, World>> =
            translate(vec3(1.0, 0.0, 0.0)).to();
        let s: Mat4<f64, RealToReal<3, Obj, Obj>> =
            scale(vec3(2.0, 2.0, 2.0)).to();
        let p: Point3<f64, Obj> = pt3(1.0, 1.0, 1.0);

        assert_eq!(t.compose(&s).apply(&p), pt3(3.0, 2.0, 2.0));
        assert_eq!(s.then(&t).apply(&p), pt3(3.0, 2.0, 2.0));
        assert_eq!((t * s).apply(&p), pt3(3.0, 2.0, 2.0));
    }

    #[test]
    fn points_translate_vectors_do_not() {
        let m: Mat4 = translate(vec3(1.0, 2.0, 3.0));
        let p: Point3 = pt3(0.0, 5.0, -3.0);
        let v: Vec3 = vec3(0.0, 5.0, -3.0);
        assert_eq!(m.apply(&p), pt3(1.0, 7.0, 0.0));
        assert_eq!(m.apply(&v), v);
    }

    #[test]
    fn scale_point_and_vector() {
        let m: Mat4f = scale(vec3(1.0, -2.0, 3.0));
        let p: Point3f = pt3(0.0, 4.0, -3.0);
        let v: Vec3f = vec3(0.0, 4.0, -3.0);
        assert_eq!(m.apply(&p), pt3(0.0, -8.0, -9.0));
        assert_eq!(m.apply(&v), vec3(0.0, -8.0, -9.0));
    }

    type Mat4f = Mat4<f32>;

    #[test]
    fn apply_and_divide_projects() {
        // Maps w to z, like a perspective projection
        let m: Mat4 = Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
        ]);
        let p = m.apply_and_divide(&pt3(2.0, 4.0, 2.0));
        assert_eq!(p, pt3(1.0, 2.0, 1.0));
        // w = 0, no division
        let p = m.apply_and_divide(&pt3(2.0, 4.0, 0.0));
        assert_eq!(p, pt3(2.0, 4.0, 0.0));

        let t: Mat4 = translate(vec3(1.0, 1.0, 1.0));
        let p = t.apply_and_divide(&pt3(1.0, 2.0, 3.0));
        assert_eq!(p, pt3(2.0, 3.0, 4.0));
    }

    #[test]
    fn normals_use_inverse_transpose() {
        let m: Mat4 = scale(vec3(1.0, 4.0, 1.0));
        let n: Vec3 = vec3(0.0, 1.0, 1.0);
        let t: Vec3 = vec3(0.0, 1.0, -1.0);
        assert_eq!(n.dot(&t), 0.0);

        let n2 = m.inverse().unwrap().apply_transpose(&n);
        let t2 = m.apply(&t);
        assert_approx_eq!(n2.dot(&t2), 0.0);
        assert_approx_eq!(n2, vec3(0.0, 0.25, 1.0));
    }

    #[test]
    fn ray_transform() {
        let m: Mat4 = translate(vec3(0.0, 0.0, 5.0))
            .compose(&scale(vec3(2.0, 2.0, 2.0)));
        let r: Ray<Point3> = Ray(pt3(1.0, 0.0, 0.0), vec3(0.0, 1.0, 0.0));
        let Ray(o, d) = m.apply(&r);
        assert_eq!(o, pt3(2.0, 0.0, 5.0));
        assert_eq!(d, vec3(0.0, 2.0, 0.0));
    }

    #[test]
    fn transform_t_passes_sentinels_through() {
        let m: Mat4 = scale(vec3(2.0, 3.0, 4.0));
        let old: Ray<Point3> = Ray(pt3(0.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0));
        let new = m.apply(&old);
        for t in [0.0, f64::INFINITY, f64::NEG_INFINITY, f64::MAX, -f64::MAX] {
            assert_eq!(m.transform_t(&old, &new, t), t);
        }
        assert!(m.transform_t(&old, &new, f64::NAN).is_nan());
    }

    #[test]
    fn transform_t_reprojects_under_scale() {
        let m: Mat4 = translate(vec3(1.0, 1.0, 1.0))
            .compose(&scale(vec3(1.0, 3.0, 1.0)));
        let old: Ray<Point3> = Ray(pt3(0.0, 0.0, 0.0), vec3(0.0, 1.0, 0.0));
        let new = m.apply(&old);
        assert_approx_eq!(m.transform_t(&old, &new, 2.0), 6.0);
        assert_approx_eq!(m.transform_t(&old, &new, 0.5), 1.5);

        // With a unit direction in the new space, t is preserved
        let id: Mat4 = Mat4::identity();
        assert_approx_eq!(id.transform_t(&old, &old, 7.25), 7.25);
    }

    #[test]
    fn quat_round_trip_all_branches() {
        let qs: [Quat; 4] = [
            Quat::new(0.1, 0.2, 0.3, 0.9),
            Quat::new(0.9, 0.1, -0.2, 0.1),
            Quat::new(0.1, -0.9, 0.2, 0.1),
            Quat::new(-0.2, 0.1, 0.9, -0.1),
        ];
        for q in qs.map(|q| q.normalize()) {
            let m: Mat3 = Mat3::from_quat(&q);
            let q2 = m.to_quat();
            // q and -q represent the same rotation
            let q2 = if q2.dot(&q) < 0.0 {
                Quat(q2.0.map(|c| -c))
            } else {
                q2
            };
            assert_approx_eq!(q2, q, eps = 1e-9);
            assert_approx_eq!(m.determinant(), 1.0, eps = 1e-9);
        }
    }

    #[test]
    fn quat_matrix_agree_on_rotation() {
        let q: Quat = Quat::new(0.3, -0.5, 0.1, 0.8).normalize();
        let v: Vec3 = vec3(1.0, 2.0, 3.0);
        let m: Mat4 = Mat4::from_quat(&q);
        assert_approx_eq!(m.apply(&v), q.rotate(&v));
        assert_approx_eq!(m.to_quat(), q, eps = 1e-9);
    }

    #[cfg(feature = "fp")]
    #[test]
    fn axis_rotations() {
        use core::f64::consts::FRAC_PI_2;
        let x: Vec3 = vec3(1.0, 0.0, 0.0);
        let y: Vec3 = vec3(0.0, 1.0, 0.0);
        let z: Vec3 = vec3(0.0, 0.0, 1.0);
        assert_approx_eq!(rotate_x(FRAC_PI_2).apply(&y), z);
        assert_approx_eq!(rotate_y(FRAC_PI_2).apply(&z), x);
        assert_approx_eq!(rotate_z(FRAC_PI_2).apply(&x), y);
        assert_approx_eq!(rotate(z, FRAC_PI_2), rotate_z(FRAC_PI_2));
    }

    #[test]
    fn rotate_from_basis_orthogonalizes() {
        let m = rotate_from_basis(vec3(0.0, 0.0, 2.0), vec3(0.0, 1.0, 1.0));
        assert_approx_eq!(m, Mat4::identity());

        let m = rotate_from_basis(vec3(1.0, 0.0, 0.0), vec3(0.0, 1.0, 0.0));
        let x: Vec3 = vec3(1.0, 0.0, 0.0);
        // u = v × w = y × x = -z
        assert_approx_eq!(m.apply(&x), vec3(0.0, 0.0, -1.0));
        assert_approx_eq!(m.determinant(), 1.0);

        let m3 = rotate_from_basis3(
            vec3(1.0, 0.0, 0.0),
            vec3(0.0, 1.0, 0.0),
            vec3(0.0, 0.0, -1.0),
        );
        assert_approx_eq!(m3, m);
    }

    #[test]
    fn look_at_maps_eye_to_origin() {
        let eye: Point3 = pt3(1.0, 2.0, 3.0);
        let target: Point3 = pt3(1.0, 2.0, -7.0);
        let m = look_at(eye, target, vec3(0.0, 1.0, 0.0));
        assert_approx_eq!(m.apply(&eye), pt3(0.0, 0.0, 0.0));
        assert_approx_eq!(m.apply(&target), pt3(0.0, 0.0, -10.0));
        assert_approx_eq!(m.apply(&pt3(1.0, 3.0, 3.0)), pt3(0.0, 1.0, 0.0));
    }

    #[test]
    fn affine_2d() {
        let m: Mat3<f64, RealToReal<2>> = translate2(vec2(1.0, -1.0));
        let p: Point2 = pt2(2.0, 3.0);
        let v: Vec2 = vec2(2.0, 3.0);
        assert_eq!(m.apply(&p), pt2(3.0, 2.0));
        assert_eq!(m.apply(&v), v);
        assert_eq!(m.inverse().unwrap().apply(&pt2(3.0, 2.0)), p);
    }

    #[test]
    fn basis_to_matrix() {
        let b: Basis =
            Basis::from_wv(&vec3(0.0, 0.0, 1.0), &vec3(0.0, 1.0, 0.0));
        let m: Mat3 = Mat3::from_basis(&b);
        assert_eq!(m, Mat3::identity());
    }
}
