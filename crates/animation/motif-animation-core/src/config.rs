//! Core configuration for motif-animation-core.

use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::error::{AnimationError, Result};

/// Defaults for new stores, playback speed and edit history depth.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Canvas given to stores and builders that don't set their own bounds.
    pub canvas: Canvas,
    /// Playhead speed.
    pub ticks_per_second: u32,
    /// Maximum number of undo snapshots kept; the oldest is dropped first.
    /// `None` keeps every snapshot.
    pub history_limit: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            ticks_per_second: 1,
            history_limit: None,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        self.canvas.validate()?;
        if self.ticks_per_second == 0 {
            return Err(AnimationError::InvalidSpeed {
                ticks_per_second: 0,
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON config; missing fields take their defaults.
    pub fn from_json(s: &str) -> Result<Self> {
        let cfg: Config = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }
}
