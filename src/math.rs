//! Scalar interpolation helpers.

/// Linearly interpolates between `a` and `b`.
///
/// `alpha = 0` returns `a`, `alpha = 1` returns `b`. Values outside `[0, 1]`
/// extrapolate.
///
/// # Examples
///
/// ```
/// use tripwire::math::lerp;
///
/// assert_eq!(lerp(0.5, 0.75, 0.5), 0.625);
/// ```
#[inline]
pub fn lerp(a: f64, b: f64, alpha: f64) -> f64 {
    a + (b - a) * alpha
}

/// Inverse of [`lerp`]: the `alpha` at which the segment `a -> b` reaches `value`.
///
/// The caller must guarantee `a != b`.
///
/// # Examples
///
/// ```
/// use tripwire::math::unlerp;
///
/// assert_eq!(unlerp(1.0, 0.0, 0.5), 0.5);
/// ```
#[inline]
pub fn unlerp(a: f64, b: f64, value: f64) -> f64 {
    debug_assert!(a != b, "unlerp on a flat segment");
    (value - a) / (b - a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp(2.0, 4.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 4.0, 1.0), 4.0);
        assert_eq!(lerp(2.0, 4.0, 0.25), 2.5);
    }

    #[test]
    fn test_unlerp_inverts_lerp() {
        for alpha in [0.0, 0.1, 0.5, 0.9] {
            let value = lerp(-1.0, 3.0, alpha);
            assert!((unlerp(-1.0, 3.0, value) - alpha).abs() < 1e-12);
        }
    }

    #[test]
    fn test_unlerp_descending_segment() {
        assert_eq!(unlerp(1.0, 0.0, 0.25), 0.75);
    }
}
