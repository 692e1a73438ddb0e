//! Interpolation helpers:
//! - lerp_f64 (scalar)
//! - segment_fraction (progress of a time through a keyframe segment)
//! - lerp_components (component-wise blend of shape state)

/// Linear interpolation of scalars. `t` is not clamped.
#[inline]
pub fn lerp_f64(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// How far `t` lies through `[t0, t1]`, as `1 - (t1 - t) / (t1 - t0)`.
/// Callers handle the degenerate `t0 == t1` segment before asking.
#[inline]
pub fn segment_fraction(t0: f64, t1: f64, t: f64) -> f64 {
    1.0 - (t1 - t) / (t1 - t0)
}

#[inline]
pub fn lerp_components<const N: usize>(a: [f64; N], b: [f64; N], t: f64) -> [f64; N] {
    std::array::from_fn(|i| lerp_f64(a[i], b[i], t))
}
