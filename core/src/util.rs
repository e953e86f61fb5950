//! Various utility types and functions.

pub mod check;
pub mod intern;
pub mod visit;
