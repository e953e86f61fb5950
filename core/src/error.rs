//! Errors reported by fallible kernel operations.
//!
//! Numeric edge cases such as division by zero are *not* errors; they flow
//! through as IEEE infinities and NaNs. The variants here cover the few
//! places where an operation cannot produce a meaningful value at all.

/// Error returned by fallible operations in this crate.
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// A required collection was empty, an index was out of range, or an
    /// argument was otherwise outside the domain of the operation.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A required value was absent.
    #[error("required value is absent: {0}")]
    NullArgument(&'static str),

    /// The determinant of a matrix was too close to zero to invert it.
    #[error("matrix is not invertible: |det| = {det:e}")]
    NotInvertible {
        /// The determinant of the rejected matrix.
        det: f64,
    },
}

/// Result type with [`Error`] as the error type.
pub type Result<T> = core::result::Result<T, Error>;
