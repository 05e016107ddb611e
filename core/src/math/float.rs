//! Floating-point compatibility API.
//!
//! Some floating-point functions are unavailable in `no_std`. This module
//! provides the ones this crate needs using either the `libm` or the
//! `micromath` crate, depending on which feature is enabled. As a fallback,
//! it also implements them in plain arithmetic if neither is enabled.

#[cfg(feature = "libm")]
pub mod libm {
    pub use libm::{fabsf as abs, floorf as floor};
}

#[cfg(feature = "mm")]
pub mod mm {
    use micromath::F32Ext as mm;

    #[inline]
    pub fn abs(x: f32) -> f32 {
        mm::abs(x)
    }
    #[inline]
    pub fn floor(x: f32) -> f32 {
        mm::floor(x)
    }
}

pub mod fallback {
    /// Returns the absolute value of `x`.
    #[inline]
    pub fn abs(x: f32) -> f32 {
        f32::from_bits(x.to_bits() & !(1 << 31))
    }
    /// Returns the largest integer less than or equal to `x`.
    ///
    /// Only valid for inputs whose magnitude fits in an `i64`.
    #[inline]
    pub fn floor(x: f32) -> f32 {
        let t = x as i64 as f32;
        t - (t > x) as i64 as f32
    }
}

#[cfg(feature = "std")]
#[allow(non_camel_case_types)]
pub type f32 = core::primitive::f32;

#[cfg(all(feature = "libm", not(feature = "std")))]
pub use libm as f32;

#[cfg(all(feature = "mm", not(feature = "std"), not(feature = "libm")))]
pub use mm as f32;

#[cfg(not(any(feature = "std", feature = "libm", feature = "mm")))]
pub use fallback as f32;

#[cfg(test)]
mod tests {
    use super::fallback;

    #[test]
    fn fallback_abs() {
        assert_eq!(fallback::abs(1.25), 1.25);
        assert_eq!(fallback::abs(-1.25), 1.25);
        assert_eq!(fallback::abs(-0.0), 0.0);
        assert_eq!(fallback::abs(f32::NEG_INFINITY), f32::INFINITY);
    }

    #[test]
    fn fallback_floor() {
        assert_eq!(fallback::floor(1.5), 1.0);
        assert_eq!(fallback::floor(0.99), 0.0);
        assert_eq!(fallback::floor(-0.0), 0.0);
        assert_eq!(fallback::floor(-1.1), -2.0);
        assert_eq!(fallback::floor(-2.0), -2.0);
        assert_eq!(fallback::floor(64.0), 64.0);
    }

    #[test]
    fn selected_functions() {
        assert_eq!(super::f32::abs(-1.25), 1.25);
        assert_eq!(super::f32::floor(-1.1), -2.0);
        assert_eq!(super::f32::floor(-2.0), -2.0);
    }

    #[cfg(feature = "libm")]
    #[test]
    fn libm_functions() {
        assert_eq!(super::libm::abs(-1.25), 1.25);
        assert_eq!(super::libm::floor(-1.1), -2.0);
    }

    #[cfg(feature = "mm")]
    #[test]
    fn mm_functions() {
        assert_eq!(super::mm::abs(-1.25), 1.25);
        assert_eq!(super::mm::floor(-1.1), -2.0);
    }
}
