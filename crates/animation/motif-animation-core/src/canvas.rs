//! Canvas bounds shared by every shape of a store.

use serde::{Deserialize, Serialize};

use crate::error::{AnimationError, Result};

/// Coordinate-space bounding box. Width and height are always positive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Canvas {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl Canvas {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Result<Self> {
        let canvas = Self {
            x,
            y,
            width,
            height,
        };
        canvas.validate()?;
        Ok(canvas)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(AnimationError::InvalidBounds {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            width: 500,
            height: 500,
        }
    }
}
