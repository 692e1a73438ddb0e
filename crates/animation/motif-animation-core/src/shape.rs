//! Shape values: a keyed, typed snapshot of geometry and color.
//!
//! A [`Shape`] is plain data. It is never mutated in place; the `with_*` helpers
//! and [`ShapeBuilder`] produce new values and enforce the value invariants
//! (non-negative size, color channels within `[0, 255]`, finite numbers).

use serde::{Deserialize, Serialize};

use crate::error::{AnimationError, Result};

/// Upper bound of every color channel.
pub const MAX_CHANNEL: f64 = 255.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
}

impl ShapeKind {
    /// Parse a variant name as it appears in animation files (`rectangle`, `Ellipse`, ...).
    pub fn parse(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "rectangle" => Ok(ShapeKind::Rectangle),
            "ellipse" => Ok(ShapeKind::Ellipse),
            _ => Err(AnimationError::UnsupportedVariant {
                name: name.to_string(),
            }),
        }
    }

    /// Display name used in canonical text headers.
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Ellipse => "Ellipse",
        }
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A shape at one point in time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    key: String,
    kind: ShapeKind,
    /// Top-left corner.
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    red: f64,
    green: f64,
    blue: f64,
    /// Rotation in degrees about the shape's center.
    theta: f64,
}

impl Shape {
    /// A shape at the origin with zero size, black, unrotated.
    pub fn new(key: impl Into<String>, kind: ShapeKind) -> Self {
        Self {
            key: key.into(),
            kind,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            red: 0.0,
            green: 0.0,
            blue: 0.0,
            theta: 0.0,
        }
    }

    pub fn builder(key: impl Into<String>, kind: ShapeKind) -> ShapeBuilder {
        ShapeBuilder {
            shape: Shape::new(key, kind),
        }
    }

    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[inline]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[inline]
    pub fn red(&self) -> f64 {
        self.red
    }

    #[inline]
    pub fn green(&self) -> f64 {
        self.green
    }

    #[inline]
    pub fn blue(&self) -> f64 {
        self.blue
    }

    #[inline]
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Color as `[r, g, b]`.
    #[inline]
    pub fn color(&self) -> [f64; 3] {
        [self.red, self.green, self.blue]
    }

    /// Center point, the pivot for rotation.
    pub fn center(&self) -> [f64; 2] {
        [self.x + self.width / 2.0, self.y + self.height / 2.0]
    }

    /// Copy of this shape carrying a different rotation.
    pub fn with_rotation(&self, theta: f64) -> Result<Self> {
        finite("theta", theta)?;
        Ok(Self {
            theta,
            ..self.clone()
        })
    }

    /// Copy of this shape under another key (same variant and state).
    pub fn with_key(&self, key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..self.clone()
        }
    }

    /// Check every value invariant; used when shapes arrive through deserialization.
    pub fn validate(&self) -> Result<()> {
        finite("x", self.x)?;
        finite("y", self.y)?;
        non_negative("width", self.width)?;
        non_negative("height", self.height)?;
        channel("red", self.red)?;
        channel("green", self.green)?;
        channel("blue", self.blue)?;
        finite("theta", self.theta)
    }

    /// Assemble a shape from already-validated parts. Interpolation between two
    /// valid shapes stays valid for fractions in `[0, 1]`.
    pub(crate) fn from_parts(key: String, kind: ShapeKind, v: [f64; 8]) -> Self {
        Self {
            key,
            kind,
            x: v[0],
            y: v[1],
            width: v[2],
            height: v[3],
            red: v[4],
            green: v[5],
            blue: v[6],
            theta: v[7],
        }
    }

    /// Numeric fields in interpolation order: x, y, width, height, red, green, blue, theta.
    pub(crate) fn components(&self) -> [f64; 8] {
        [
            self.x,
            self.y,
            self.width,
            self.height,
            self.red,
            self.green,
            self.blue,
            self.theta,
        ]
    }
}

/// Staged constructor for [`Shape`]; validation happens in [`ShapeBuilder::build`].
#[derive(Clone, Debug)]
pub struct ShapeBuilder {
    shape: Shape,
}

impl ShapeBuilder {
    pub fn position(mut self, x: f64, y: f64) -> Self {
        self.shape.x = x;
        self.shape.y = y;
        self
    }

    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.shape.width = width;
        self.shape.height = height;
        self
    }

    pub fn color(mut self, red: f64, green: f64, blue: f64) -> Self {
        self.shape.red = red;
        self.shape.green = green;
        self.shape.blue = blue;
        self
    }

    pub fn rotation(mut self, theta: f64) -> Self {
        self.shape.theta = theta;
        self
    }

    pub fn build(self) -> Result<Shape> {
        self.shape.validate()?;
        Ok(self.shape)
    }
}

fn finite(field: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AnimationError::InvalidGeometry {
            field: field.to_string(),
            value,
        })
    }
}

fn non_negative(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(AnimationError::InvalidGeometry {
            field: field.to_string(),
            value,
        })
    }
}

fn channel(name: &str, value: f64) -> Result<()> {
    if (0.0..=MAX_CHANNEL).contains(&value) {
        Ok(())
    } else {
        Err(AnimationError::InvalidColor {
            channel: name.to_string(),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_shape_is_zeroed() {
        let s = Shape::new("r", ShapeKind::Rectangle);
        assert_eq!(s.key(), "r");
        assert_eq!(s.kind(), ShapeKind::Rectangle);
        assert_eq!(s.components(), [0.0; 8]);
    }

    #[test]
    fn builder_validates_size_and_color() {
        let err = Shape::builder("r", ShapeKind::Rectangle)
            .size(-1.0, 4.0)
            .build()
            .unwrap_err();
        assert!(matches!(err, AnimationError::InvalidGeometry { ref field, .. } if field == "width"));

        let err = Shape::builder("r", ShapeKind::Rectangle)
            .color(0.0, 256.0, 0.0)
            .build()
            .unwrap_err();
        assert!(matches!(err, AnimationError::InvalidColor { ref channel, .. } if channel == "green"));

        let err = Shape::builder("r", ShapeKind::Ellipse)
            .position(f64::NAN, 0.0)
            .build()
            .unwrap_err();
        assert!(matches!(err, AnimationError::InvalidGeometry { .. }));
    }

    #[test]
    fn with_rotation_produces_new_value() {
        let s = Shape::builder("e", ShapeKind::Ellipse)
            .position(1.0, 2.0)
            .size(3.0, 4.0)
            .color(5.0, 6.0, 7.0)
            .build()
            .unwrap();
        let r = s.with_rotation(45.0).unwrap();
        assert_eq!(s.theta(), 0.0);
        assert_eq!(r.theta(), 45.0);
        assert_eq!(r.color(), s.color());
        assert_eq!(r.center(), [2.5, 4.0]);
    }

    #[test]
    fn kind_parsing() {
        assert_eq!(ShapeKind::parse("rectangle").unwrap(), ShapeKind::Rectangle);
        assert_eq!(ShapeKind::parse("Ellipse").unwrap(), ShapeKind::Ellipse);
        assert!(matches!(
            ShapeKind::parse("triangle"),
            Err(AnimationError::UnsupportedVariant { .. })
        ));
    }
}
