//! Orthonormal bases.

use core::fmt::{self, Debug, Formatter};

use crate::error::{Error, Result};
use crate::math::approx::ApproxEq;
use crate::math::mat::{Mat3, RealToReal};
use crate::math::num::Float;
use crate::math::quat::Quat;
use crate::math::vec::{vec3, Vec3};

/// An orthonormal basis of 3-space.
///
/// The axes are named `u`, `v`, and `w` by convention; `w` is usually the
/// "forward" or "normal" direction the basis is built around. The basis is
/// right-handed: `u × v = w`.
pub struct Basis<Sc = f64, B = ()> {
    pub w: Vec3<Sc, B>,
    pub v: Vec3<Sc, B>,
    pub u: Vec3<Sc, B>,
}

impl<Sc: Float, B> Basis<Sc, B> {
    /// Returns a basis with the given axes.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if the axes are not unit length and
    /// pairwise orthogonal, within tolerance.
    pub fn new(
        w: Vec3<Sc, B>,
        v: Vec3<Sc, B>,
        u: Vec3<Sc, B>,
    ) -> Result<Self> {
        if !(w.is_unit() && v.is_unit() && u.is_unit()) {
            return Err(Error::InvalidArgument("basis axis is not unit length"));
        }
        let tol = Sc::TOLERANCE.sqrt();
        let ortho = |a: &Vec3<Sc, B>, b: &Vec3<Sc, B>| a.dot(b).abs() <= tol;
        if !(ortho(&w, &v) && ortho(&w, &u) && ortho(&v, &u)) {
            return Err(Error::InvalidArgument("basis axes are not orthogonal"));
        }
        Ok(Self { w, v, u })
    }

    /// Returns a basis with `w` parallel to the given vector and `v`, `u`
    /// chosen arbitrarily.
    pub fn from_w(w: &Vec3<Sc, B>) -> Self {
        let w = w.normalize();
        let helper = if w.x().abs() > Sc::from_f64(0.9) {
            vec3(Sc::ZERO, Sc::ONE, Sc::ZERO)
        } else {
            vec3(Sc::ONE, Sc::ZERO, Sc::ZERO)
        };
        Self::from_wv(&w, &helper)
    }

    /// Returns a basis with `w` parallel to the first given vector and `v`
    /// in the plane spanned by the two vectors.
    ///
    /// `v` is made orthogonal to `w` by the Gram–Schmidt process, and
    /// `u = v × w`. The result is undefined (NaN) if the two vectors are
    /// parallel or either is zero.
    ///
    /// # Examples
    /// ```
    /// use rayform_core::assert_approx_eq;
    /// use rayform_core::math::{vec3, Basis};
    ///
    /// let w = vec3(0.0, 0.0, 3.0);
    /// let b: Basis = Basis::from_wv(&w, &vec3(0.0, 1.0, 1.0));
    /// assert_approx_eq!(b.v, vec3(0.0, 1.0, 0.0));
    /// assert_approx_eq!(b.u, vec3(1.0, 0.0, 0.0));
    /// ```
    pub fn from_wv(w: &Vec3<Sc, B>, v: &Vec3<Sc, B>) -> Self {
        let w = w.normalize();
        let v = v.reject(&w).normalize();
        let u = v.cross(&w);
        Self { w, v, u }
    }

    /// Returns the basis formed by the columns `u`, `v`, `w` of `m`.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if `m` is not orthonormal.
    pub fn from_mat<S, D>(m: &Mat3<Sc, RealToReal<3, S, D>>) -> Result<Self> {
        let [u, v, w] = [0, 1, 2].map(|j| Vec3::new(m.col(j)));
        Self::new(w, v, u)
    }

    /// Returns the basis rotated from the standard basis by `q`.
    pub fn from_quat(q: &Quat<Sc>) -> Self {
        let m: Mat3<Sc> = Mat3::from_quat(q);
        let [u, v, w] = [0, 1, 2].map(|j| Vec3::new(m.col(j)));
        Self { w, v, u }
    }

    /// Returns the quaternion rotating the standard basis to `self`.
    pub fn to_quat(&self) -> Quat<Sc> {
        let m: Mat3<Sc> = Mat3::from_basis(self);
        m.to_quat()
    }

    /// Returns the coordinates of `a` relative to `self`, as (u, v, w).
    #[inline]
    pub fn to_local(&self, a: &Vec3<Sc, B>) -> Vec3<Sc, B> {
        vec3(a.dot(&self.u), a.dot(&self.v), a.dot(&self.w))
    }

    /// Returns the vector whose coordinates relative to `self` are `a`.
    #[inline]
    pub fn from_local(&self, a: &Vec3<Sc, B>) -> Vec3<Sc, B> {
        self.u * a.x() + self.v * a.y() + self.w * a.z()
    }
}

impl<Sc: Float, B> Default for Basis<Sc, B> {
    /// Returns the standard basis, `u = x`, `v = y`, `w = z`.
    fn default() -> Self {
        let (o, l) = (Sc::ZERO, Sc::ONE);
        Self {
            w: vec3(o, o, l),
            v: vec3(o, l, o),
            u: vec3(l, o, o),
        }
    }
}

impl<Sc: Copy, B> Copy for Basis<Sc, B> {}

impl<Sc: Copy, B> Clone for Basis<Sc, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Sc: PartialEq, B> PartialEq for Basis<Sc, B> {
    fn eq(&self, other: &Self) -> bool {
        self.w == other.w && self.v == other.v && self.u == other.u
    }
}

impl<Sc: Debug, B: Debug + Default> Debug for Basis<Sc, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Basis")
            .field("w", &self.w)
            .field("v", &self.v)
            .field("u", &self.u)
            .finish()
    }
}

impl<Sc: ApproxEq, B> ApproxEq<Self, Sc> for Basis<Sc, B> {
    fn approx_eq_eps(&self, other: &Self, eps: &Sc) -> bool {
        self.w.approx_eq_eps(&other.w, eps)
            && self.v.approx_eq_eps(&other.v, eps)
            && self.u.approx_eq_eps(&other.u, eps)
    }
    fn relative_epsilon() -> Sc {
        Sc::relative_epsilon()
    }
}

#[cfg(test)]
mod tests {
    use crate::assert_approx_eq;

    use super::*;

    fn assert_orthonormal(b: &Basis) {
        assert!(b.w.is_unit() && b.v.is_unit() && b.u.is_unit());
        assert_approx_eq!(b.w.dot(&b.v), 0.0);
        assert_approx_eq!(b.w.dot(&b.u), 0.0);
        assert_approx_eq!(b.u.dot(&b.v), 0.0);
        assert_approx_eq!(b.u.cross(&b.v), b.w);
    }

    #[test]
    fn from_wv_is_orthonormal() {
        let w: Vec3 = vec3(1.0, 2.0, 3.0);
        let b = Basis::from_wv(&w, &vec3(-1.0, 0.5, 2.0));
        assert_orthonormal(&b);
        assert_approx_eq!(b.w, w.normalize());
    }

    #[test]
    fn from_w_is_orthonormal() {
        let ws: [Vec3; 3] =
            [vec3(1.0, 0.0, 0.0), vec3(0.0, -3.0, 0.0), vec3(1.0, 1.0, 1.0)];
        for w in ws {
            assert_orthonormal(&Basis::from_w(&w));
        }
    }

    #[test]
    fn new_validates() {
        let Basis { w, v, u }: Basis = Basis::default();
        assert_eq!(Basis::new(w, v, u), Ok(Basis::default()));
        assert!(matches!(
            Basis::new(w, v, u * 2.0),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            Basis::new(w, v, (u + v).normalize()),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn local_coordinates() {
        let (y, z): (Vec3, Vec3) = (vec3(0.0, 1.0, 0.0), vec3(0.0, 0.0, 1.0));
        let b = Basis::from_wv(&y, &z);
        let a = vec3(1.0, 2.0, 3.0);
        let l = b.to_local(&a);
        // u = v × w = z × y = -x
        assert_approx_eq!(l, vec3(-1.0, 3.0, 2.0));
        assert_approx_eq!(b.from_local(&l), a);
    }

    #[test]
    fn quat_round_trip() {
        let (w, v): (Vec3, Vec3) = (vec3(1.0, 1.0, 0.0), vec3(0.0, 0.0, 1.0));
        let b = Basis::from_wv(&w, &v);
        let q = b.to_quat();
        assert_approx_eq!(q.len(), 1.0);
        let b2: Basis = Basis::from_quat(&q);
        assert_approx_eq!(b2, b, eps = 1e-9);
    }

    #[test]
    fn from_mat() {
        let m: Mat3 = Mat3::identity();
        let b: Result<Basis> = Basis::from_mat(&m);
        assert_eq!(b, Ok(Basis::default()));

        let m: Mat3 = Mat3::new([
            [1.0, 1.0, 0.0], //
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ]);
        let b: Result<Basis> = Basis::from_mat(&m);
        assert!(b.is_err());
    }
}
