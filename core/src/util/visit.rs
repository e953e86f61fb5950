//! Enumerating the parts of composite values.
//!
//! A [`Visit`] implementation calls a callback once for each direct part of
//! a value, in a fixed order, passing the name of the part and the part
//! itself. The callback can stop the enumeration early by returning
//! [`ControlFlow::Break`].
//!
//! The orders are:
//!
//! | Type           | Parts                                     |
//! |----------------|-------------------------------------------|
//! | point, vector  | components `x`, `y`, `z`, `w`             |
//! | quaternion     | components `x`, `y`, `z`, `w`             |
//! | matrix         | elements `m11`, `m12`, … in row-major order |
//! | ray            | point `origin`, vector `dir`              |
//! | basis          | vectors `w`, `v`, `u`                     |

use core::iter::zip;
use core::ops::ControlFlow::{self, Continue};

use crate::geom::Ray;
use crate::math::basis::Basis;
use crate::math::mat::Matrix;
use crate::math::point::Point;
use crate::math::quat::Quat;
use crate::math::vec::Vector;

/// A direct part of a composite value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Part<'a, Sc> {
    /// A single component.
    Scalar(Sc),
    /// The components of a point.
    Point(&'a [Sc]),
    /// The components of a vector.
    Vector(&'a [Sc]),
}

/// Callback type accepted by [`Visit::visit`].
pub type Visitor<'v, Sc> =
    dyn FnMut(&'static str, Part<'_, Sc>) -> ControlFlow<()> + 'v;

/// Trait for values whose parts can be enumerated.
pub trait Visit<Sc> {
    /// Calls `f` with the name and value of each part of `self`, in order,
    /// until `f` returns `Break`.
    ///
    /// Returns `Break` if `f` did, `Continue` otherwise.
    ///
    /// # Examples
    /// ```
    /// use core::ops::ControlFlow::{Break, Continue};
    /// use rayform_core::math::{vec3, Vec3};
    /// use rayform_core::util::visit::{Part, Visit};
    ///
    /// let v: Vec3 = vec3(1.0, 2.0, 3.0);
    /// let mut seen = vec![];
    /// let res = v.visit(&mut |name, part| {
    ///     seen.push(name);
    ///     if part == Part::Scalar(2.0) { Break(()) } else { Continue(()) }
    /// });
    /// assert_eq!(res, Break(()));
    /// assert_eq!(seen, ["x", "y"]);
    /// ```
    fn visit(&self, f: &mut Visitor<'_, Sc>) -> ControlFlow<()>;
}

const COMPONENTS: [&str; 4] = ["x", "y", "z", "w"];

const ELEMENTS: [[&str; 4]; 4] = [
    ["m11", "m12", "m13", "m14"],
    ["m21", "m22", "m23", "m24"],
    ["m31", "m32", "m33", "m34"],
    ["m41", "m42", "m43", "m44"],
];

fn visit_scalars<Sc: Copy>(
    names: &[&'static str],
    vals: &[Sc],
    f: &mut Visitor<'_, Sc>,
) -> ControlFlow<()> {
    for (&n, &v) in zip(names, vals) {
        f(n, Part::Scalar(v))?;
    }
    Continue(())
}

macro_rules! impl_visit {
    ($($n:literal)*) => {$(
        impl<Sc: Copy, Sp> Visit<Sc> for Vector<[Sc; $n], Sp> {
            fn visit(&self, f: &mut Visitor<'_, Sc>) -> ControlFlow<()> {
                visit_scalars(&COMPONENTS[..$n], &self.0, f)
            }
        }

        impl<Sc: Copy, Sp> Visit<Sc> for Point<[Sc; $n], Sp> {
            fn visit(&self, f: &mut Visitor<'_, Sc>) -> ControlFlow<()> {
                visit_scalars(&COMPONENTS[..$n], &self.0, f)
            }
        }
    )*};
}

impl_visit!(2 3 4);

impl<Sc: Copy, M> Visit<Sc> for Matrix<[[Sc; 3]; 3], M> {
    fn visit(&self, f: &mut Visitor<'_, Sc>) -> ControlFlow<()> {
        for (names, row) in zip(&ELEMENTS, &self.0) {
            visit_scalars(&names[..3], row, f)?;
        }
        Continue(())
    }
}

impl<Sc: Copy, M> Visit<Sc> for Matrix<[[Sc; 4]; 4], M> {
    fn visit(&self, f: &mut Visitor<'_, Sc>) -> ControlFlow<()> {
        for (names, row) in zip(&ELEMENTS, &self.0) {
            visit_scalars(names, row, f)?;
        }
        Continue(())
    }
}

impl<Sc: Copy> Visit<Sc> for Quat<Sc> {
    fn visit(&self, f: &mut Visitor<'_, Sc>) -> ControlFlow<()> {
        visit_scalars(&COMPONENTS, &self.0, f)
    }
}

impl<Sc, Sp, const N: usize> Visit<Sc> for Ray<Point<[Sc; N], Sp>>
where
    Sc: crate::math::num::Scalar,
{
    fn visit(&self, f: &mut Visitor<'_, Sc>) -> ControlFlow<()> {
        f("origin", Part::Point(&self.0.0))?;
        f("dir", Part::Vector(&self.1.0))
    }
}

impl<Sc, B> Visit<Sc> for Basis<Sc, B> {
    fn visit(&self, f: &mut Visitor<'_, Sc>) -> ControlFlow<()> {
        f("w", Part::Vector(&self.w.0))?;
        f("v", Part::Vector(&self.v.0))?;
        f("u", Part::Vector(&self.u.0))
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;
    use core::ops::ControlFlow::Break;

    use crate::math::mat::{Mat3, Mat4};
    use crate::math::point::{pt2, pt3, Point2i, Point3};
    use crate::math::vec::{vec3, Vec3};

    use super::*;

    fn names<Sc>(v: &impl Visit<Sc>) -> Vec<&'static str> {
        let mut res = Vec::new();
        let flow = v.visit(&mut |n, _| {
            res.push(n);
            Continue(())
        });
        assert_eq!(flow, Continue(()));
        res
    }

    #[test]
    fn point_components_in_order() {
        let p: Point2i = pt2(3, 4);
        let mut parts = Vec::new();
        let _ = p.visit(&mut |n, part| {
            if let Part::Scalar(s) = part {
                parts.push((n, s));
            }
            Continue(())
        });
        assert_eq!(parts, [("x", 3), ("y", 4)]);
    }

    #[test]
    fn matrix_elements_row_major() {
        let m: Mat3 = Mat3::new([
            [1.0, 2.0, 3.0], //
            [4.0, 5.0, 6.0],
            [7.0, 8.0, 9.0],
        ]);
        let mut vals = Vec::new();
        let _ = m.visit(&mut |_, part| {
            if let Part::Scalar(s) = part {
                vals.push(s);
            }
            Continue(())
        });
        assert_eq!(vals, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        assert_eq!(names(&m)[..4], ["m11", "m12", "m13", "m21"]);

        let m: Mat4 = Mat4::identity();
        let ns = names(&m);
        assert_eq!(ns.len(), 16);
        assert_eq!(ns[15], "m44");
    }

    #[test]
    fn ray_origin_then_direction() {
        let r: Ray<Point3> = Ray(pt3(1.0, 2.0, 3.0), vec3(0.0, 0.0, 1.0));
        let mut parts = Vec::new();
        let _ = r.visit(&mut |n, part| {
            // Parts borrow from the ray only for the duration of the call
            let owned = match part {
                Part::Point(cs) => ("point", cs.to_vec()),
                Part::Vector(cs) => ("vector", cs.to_vec()),
                Part::Scalar(s) => ("scalar", vec![s]),
            };
            parts.push((n, owned));
            Continue(())
        });
        assert_eq!(
            parts,
            [
                ("origin", ("point", vec![1.0, 2.0, 3.0])),
                ("dir", ("vector", vec![0.0, 0.0, 1.0])),
            ]
        );
    }

    #[test]
    fn basis_and_quat_order() {
        let b: Basis = Basis::default();
        assert_eq!(names(&b), ["w", "v", "u"]);
        let q: Quat = Quat::identity();
        assert_eq!(names(&q), ["x", "y", "z", "w"]);
    }

    #[test]
    fn break_stops_immediately() {
        let v: Vec3 = vec3(1.0, 2.0, 3.0);
        let mut count = 0;
        let res = v.visit(&mut |_, _| {
            count += 1;
            Break(())
        });
        assert_eq!(res, Break(()));
        assert_eq!(count, 1);

        let m: Mat4 = Mat4::identity();
        let mut count = 0;
        let res = m.visit(&mut |n, _| {
            count += 1;
            if n == "m21" { Break(()) } else { Continue(()) }
        });
        assert_eq!(res, Break(()));
        assert_eq!(count, 5);
    }
}
