//! Floating-point compatibility API.
//!
//! Most floating-point functions are unavailable in `no_std`. This module
//! provides the missing functions using the `libm` crate if the feature is
//! enabled. As a fallback, it also implements the square root even if no
//! fp feature is enabled, as it is needed for normalizing vectors.
//!
//! The modules [`f32`] and [`f64`] resolve to whichever backend is active;
//! with `std` they are aliases of the primitive types themselves, so that
//! `f64::sqrt(x)` calls the inherent method.

#[cfg(feature = "libm")]
pub mod libm {
    pub use ::libm::sqrtf as sqrt;

    pub use ::libm::cosf as cos;
    pub use ::libm::sinf as sin;
    pub use ::libm::tanf as tan;

    pub use ::libm::acosf as acos;
    pub use ::libm::asinf as asin;
    pub use ::libm::atan2f as atan2;
}

#[cfg(feature = "libm")]
pub mod libm64 {
    pub use ::libm::sqrt;

    pub use ::libm::cos;
    pub use ::libm::sin;
    pub use ::libm::tan;

    pub use ::libm::acos;
    pub use ::libm::asin;
    pub use ::libm::atan2;
}

pub mod fallback {
    /// Returns the approximate square root of `x`.
    ///
    /// Returns NaN for negative `x`, zero for zero, and infinity for
    /// infinity.
    #[inline]
    pub fn sqrt(x: f32) -> f32 {
        if !(x > 0.0) || x == f32::INFINITY {
            return if x == 0.0 || x == f32::INFINITY { x } else { f32::NAN };
        }
        let y = x * super::fast_recip_sqrt(x);
        // Two rounds of Newton's method
        let y = 0.5 * (y + x / y);
        0.5 * (y + x / y)
    }
}

pub mod fallback64 {
    /// Returns the approximate square root of `x`.
    ///
    /// Returns NaN for negative `x`, zero for zero, and infinity for
    /// infinity.
    #[inline]
    pub fn sqrt(x: f64) -> f64 {
        if !(x > 0.0) || x == f64::INFINITY {
            return if x == 0.0 || x == f64::INFINITY { x } else { f64::NAN };
        }
        const MAGIC: u64 = 0x5fe6_eb50_c7b5_37a9;
        let mut r = f64::from_bits(MAGIC.wrapping_sub(x.to_bits() >> 1));
        // Each round roughly doubles the number of correct bits
        for _ in 0..4 {
            r = r * (1.5 - 0.5 * x * r * r);
        }
        let y = x * r;
        0.5 * (y + x / y)
    }
}

/// Returns a fast approximation of the reciprocal square root of a number.
#[inline]
pub fn fast_recip_sqrt(x: core::primitive::f32) -> core::primitive::f32 {
    // https://en.wikipedia.org/wiki/Fast_inverse_square_root
    const MAGIC: u32 = 0x5f37_5a86;
    let y = core::primitive::f32::from_bits(
        MAGIC.saturating_sub(x.to_bits() >> 1),
    );
    // A round of Newton's method
    y * (1.5 - 0.5 * x * y * y)
}

#[cfg(feature = "std")]
#[allow(non_camel_case_types)]
pub type f32 = core::primitive::f32;
#[cfg(feature = "std")]
#[allow(non_camel_case_types)]
pub type f64 = core::primitive::f64;

#[cfg(all(feature = "libm", not(feature = "std")))]
pub use self::libm as f32;
#[cfg(all(feature = "libm", not(feature = "std")))]
pub use self::libm64 as f64;

#[cfg(not(feature = "fp"))]
pub use self::fallback as f32;
#[cfg(not(feature = "fp"))]
pub use self::fallback64 as f64;
