//! Spatial queries and binary encoding for the `rayform` geometry kernel.
//!
//! Builds on the value types of [`rayform_core`][rf] with
//!
//! * [axis-aligned bounding boxes][bbox] and the ray/box slab test,
//! * the [`Intersect`][isect::Intersect] trait tying queries together, and
//! * a fixed-layout, big-endian [binary encoding][io] of every value type.

#![no_std]

extern crate alloc;
extern crate core;
#[cfg(feature = "std")]
extern crate std;

pub mod bbox;
pub mod io;
pub mod isect;

pub use bbox::BBox;
pub use isect::Intersect;
