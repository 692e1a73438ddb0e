//! Keyframes: a shape state pinned to a time.

use serde::{Deserialize, Serialize};

use crate::error::{AnimationError, Result};
use crate::shape::{Shape, ShapeKind};

/// A single keyframe. Time is finite and non-negative.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    time: f64,
    shape: Shape,
}

impl Keyframe {
    /// Fails with `InvalidTime` for negative or non-finite times. `-0.0` is stored as `0.0`.
    pub fn new(time: f64, shape: Shape) -> Result<Self> {
        check_time(time)?;
        let time = if time == 0.0 { 0.0 } else { time };
        Ok(Self { time, shape })
    }

    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn into_shape(self) -> Shape {
        self.shape
    }

    /// Same time, different shape state.
    pub(crate) fn with_shape(&self, shape: Shape) -> Self {
        Self {
            time: self.time,
            shape,
        }
    }

    /// Raw tuple view of this keyframe.
    pub fn to_spec(&self) -> FrameSpec {
        let s = &self.shape;
        FrameSpec {
            time: self.time,
            x: s.x(),
            y: s.y(),
            width: s.width(),
            height: s.height(),
            red: s.red(),
            green: s.green(),
            blue: s.blue(),
            theta: s.theta(),
        }
    }
}

pub(crate) fn check_time(time: f64) -> Result<()> {
    if time.is_finite() && time >= 0.0 {
        Ok(())
    } else {
        Err(AnimationError::InvalidTime { time })
    }
}

/// Unkeyed keyframe tuple `(t, x, y, w, h, r, g, b[, theta])` as it appears in
/// animation files and JSON documents. Turned into a [`Keyframe`] once the owning
/// shape's key and variant are known.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameSpec {
    pub time: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    #[serde(default)]
    pub theta: f64,
}

impl FrameSpec {
    /// Tuple without rotation.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        time: f64,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        red: f64,
        green: f64,
        blue: f64,
    ) -> Self {
        Self {
            time,
            x,
            y,
            width,
            height,
            red,
            green,
            blue,
            theta: 0.0,
        }
    }

    pub fn rotated(self, theta: f64) -> Self {
        Self { theta, ..self }
    }

    /// Build a validated keyframe for the shape `key` of variant `kind`.
    pub fn to_keyframe(&self, key: &str, kind: ShapeKind) -> Result<Keyframe> {
        let shape = Shape::builder(key, kind)
            .position(self.x, self.y)
            .size(self.width, self.height)
            .color(self.red, self.green, self.blue)
            .rotation(self.theta)
            .build()?;
        Keyframe::new(self.time, shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_time_rejected() {
        let shape = Shape::new("r", ShapeKind::Rectangle);
        assert!(matches!(
            Keyframe::new(-1.0, shape.clone()),
            Err(AnimationError::InvalidTime { .. })
        ));
        assert!(Keyframe::new(f64::INFINITY, shape.clone()).is_err());
        assert!(Keyframe::new(0.0, shape).is_ok());
    }

    #[test]
    fn negative_zero_is_stored_as_zero() {
        let k = Keyframe::new(-0.0, Shape::new("r", ShapeKind::Rectangle)).unwrap();
        assert_eq!(k.time(), 0.0);
        assert!(k.time().is_sign_positive());
    }

    #[test]
    fn spec_to_keyframe_and_back() {
        let spec = FrameSpec::new(3.0, 1.0, 2.0, 10.0, 20.0, 255.0, 128.0, 0.0).rotated(90.0);
        let k = spec.to_keyframe("e", ShapeKind::Ellipse).unwrap();
        assert_eq!(k.time(), 3.0);
        assert_eq!(k.shape().key(), "e");
        assert_eq!(k.shape().kind(), ShapeKind::Ellipse);
        assert_eq!(k.to_spec(), spec);
    }

    #[test]
    fn spec_with_bad_color_fails() {
        let spec = FrameSpec::new(0.0, 0.0, 0.0, 1.0, 1.0, 300.0, 0.0, 0.0);
        assert!(matches!(
            spec.to_keyframe("r", ShapeKind::Rectangle),
            Err(AnimationError::InvalidColor { .. })
        ));
    }
}
