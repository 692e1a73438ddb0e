//! Motion interpolation.
//!
//! A [`Motion`] is the segment between two keyframes of one shape. Sampling it
//! blends every numeric field (x, y, width, height, red, green, blue, theta)
//! independently and linearly; key and variant come from the end keyframe.

pub mod functions;

use crate::error::{AnimationError, Result};
use crate::keyframe::Keyframe;
use crate::shape::Shape;

use functions::{lerp_components, segment_fraction};

/// Two keyframes bounding a segment, ordered by time.
#[derive(Clone, Debug, PartialEq)]
pub struct Motion {
    start: Keyframe,
    end: Keyframe,
}

impl Motion {
    /// Fails with `InvalidRange` when `start` lies after `end`.
    pub fn new(start: Keyframe, end: Keyframe) -> Result<Self> {
        check_order(&start, &end)?;
        Ok(Self { start, end })
    }

    #[inline]
    pub fn start(&self) -> &Keyframe {
        &self.start
    }

    #[inline]
    pub fn end(&self) -> &Keyframe {
        &self.end
    }

    /// `(start time, end time)`.
    pub fn interval(&self) -> (f64, f64) {
        (self.start.time(), self.end.time())
    }

    pub fn into_frames(self) -> (Keyframe, Keyframe) {
        (self.start, self.end)
    }

    /// Shape state at time `t`; see [`interpolate`].
    pub fn shape_at(&self, t: f64) -> Shape {
        interpolate(&self.start, &self.end, t)
    }
}

pub(crate) fn check_order(start: &Keyframe, end: &Keyframe) -> Result<()> {
    if start.time() > end.time() {
        return Err(AnimationError::InvalidRange {
            start: start.time(),
            end: end.time(),
        });
    }
    Ok(())
}

/// Linearly interpolated shape between `f1` and `f2` at time `t`.
///
/// Expects `f1.time() <= f2.time()` and `t` within that interval; the fraction is
/// not clamped. A zero-length segment yields `f2`'s shape.
pub fn interpolate(f1: &Keyframe, f2: &Keyframe, t: f64) -> Shape {
    let (t0, t1) = (f1.time(), f2.time());
    // `a + (b - a) * 1` can be off by an ulp; the end of a segment is its end keyframe.
    if t1 == t0 || t == t1 {
        return f2.shape().clone();
    }
    let frac = segment_fraction(t0, t1, t);
    let target = f2.shape();
    let values = lerp_components(f1.shape().components(), target.components(), frac);
    Shape::from_parts(target.key().to_string(), target.kind(), values)
}
