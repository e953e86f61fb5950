//! Core functionality of the `rayform` geometry kernel.
//!
//! Includes a math library with points, vectors, quaternions, matrices and
//! orthonormal bases; rays; a canonicalization cache for deduplicating equal
//! values; and a few supporting utilities such as sampling distributions and
//! a visitor protocol for introspecting composite values.
//!
//! Every value type is generic over its scalar. Three instantiations are
//! provided: `f64` (the default), `f32`, and `i32`. Integer points, vectors
//! and boxes support the arithmetic and containment queries; anything that
//! needs division or square roots requires a floating-point scalar.
//!
//! # Crate features
//!
//! * `std`:
//!   Uses the floating-point functions of the standard library. Enabled by
//!   default.
//!
//! * `libm`:
//!   Provides software implementations of floating-point functions via the
//!   [libm](https://crates.io/crates/libm) crate.
//!
//! * `fp`:
//!   Implied by both of the above. Makes available items requiring
//!   trigonometric functions, such as rotation matrices. Without it, square
//!   roots are still available through a fallback implementation.
//!
//! If `std` is disabled, the crate only depends on `alloc`.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;
extern crate core;

pub mod error;
pub mod geom;
pub mod math;
pub mod util;

pub use error::{Error, Result};

pub mod prelude {
    #[cfg(feature = "fp")]
    pub use crate::math::mat::{rotate_x, rotate_y, rotate_z};
    pub use crate::math::{
        approx::ApproxEq,
        basis::Basis,
        mat::{
            look_at, rotate_from_basis, scale, translate, Apply, Mat3, Mat4,
            Matrix,
        },
        num::{Float, Scalar},
        point::{pt2, pt3, Point2, Point3},
        quat::Quat,
        space::{Affine, Linear},
        vec::{vec2, vec3, Vec2, Vec3, Vector},
    };

    pub use crate::geom::Ray;

    pub use crate::util::intern::{Intern, Interner};
    pub use crate::util::visit::{Part, Visit};
}
