//! Playhead: tick-driven playback position over a store's `[0, end_time]`.
//!
//! Pure state machine. A host timer calls [`Playhead::advance`] once per
//! [`Playhead::tick_interval`] and renders [`Playhead::frame`].

use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{AnimationError, Result};
use crate::shape::Shape;
use crate::store::AnimationStore;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    Run,
    Pause,
    Rewind,
}

impl PlaybackState {
    /// Ticks moved per advance.
    #[inline]
    pub fn direction(self) -> f64 {
        match self {
            PlaybackState::Run => 1.0,
            PlaybackState::Pause => 0.0,
            PlaybackState::Rewind => -1.0,
        }
    }
}

/// What happens when the playhead leaves `[0, end_time]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndBehavior {
    /// Stay on the nearest end.
    Hold,
    /// Stop showing anything.
    Hide,
    /// Wrap around to the other end.
    Loop,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Playhead {
    time: f64,
    state: PlaybackState,
    end: EndBehavior,
    ticks_per_second: u32,
    visible: bool,
}

impl Playhead {
    pub fn new(ticks_per_second: u32) -> Result<Self> {
        check_speed(ticks_per_second)?;
        Ok(Self {
            time: 0.0,
            state: PlaybackState::Run,
            end: EndBehavior::Hold,
            ticks_per_second,
            visible: true,
        })
    }

    pub fn from_config(cfg: &Config) -> Result<Self> {
        Self::new(cfg.ticks_per_second)
    }

    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[inline]
    pub fn end_behavior(&self) -> EndBehavior {
        self.end
    }

    #[inline]
    pub fn ticks_per_second(&self) -> u32 {
        self.ticks_per_second
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn play(&mut self) {
        self.state = PlaybackState::Run;
    }

    pub fn pause(&mut self) {
        self.state = PlaybackState::Pause;
    }

    pub fn rewind(&mut self) {
        self.state = PlaybackState::Rewind;
    }

    /// Back to time 0, running forward.
    pub fn restart(&mut self) {
        self.time = 0.0;
        self.state = PlaybackState::Run;
        self.visible = true;
    }

    pub fn set_end_behavior(&mut self, end: EndBehavior) {
        self.end = end;
    }

    /// Switch between `Loop` and `Hold`; returns the new behavior.
    pub fn toggle_loop(&mut self) -> EndBehavior {
        self.end = if self.end == EndBehavior::Loop {
            EndBehavior::Hold
        } else {
            EndBehavior::Loop
        };
        self.end
    }

    pub fn set_speed(&mut self, ticks_per_second: u32) -> Result<()> {
        check_speed(ticks_per_second)?;
        self.ticks_per_second = ticks_per_second;
        Ok(())
    }

    /// Wall-clock time between ticks.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.ticks_per_second))
    }

    /// Jump to `time` and pause there.
    pub fn seek(&mut self, time: f64, end_time: f64) -> Result<()> {
        if !(time >= 0.0 && time <= end_time) {
            return Err(AnimationError::OutOfRange {
                time,
                end: end_time,
            });
        }
        self.time = time;
        self.state = PlaybackState::Pause;
        self.visible = true;
        Ok(())
    }

    /// Move one tick in the current direction, then apply the end behavior if
    /// the playhead left `[0, end_time]`. Returns the new time.
    pub fn advance(&mut self, end_time: f64) -> f64 {
        if !self.visible {
            return self.time;
        }
        self.time += self.state.direction();
        let before_start = self.time < 0.0;
        if before_start || self.time > end_time {
            match self.end {
                EndBehavior::Hold => {
                    self.time = if before_start { 0.0 } else { end_time };
                }
                EndBehavior::Loop => {
                    self.time = if before_start { end_time } else { 0.0 };
                }
                EndBehavior::Hide => {
                    self.visible = false;
                }
            }
            debug!("playhead reached an end ({:?}) -> {}", self.end, self.time);
        }
        self.time
    }

    /// Shapes to draw at the current time; empty once hidden.
    pub fn frame(&self, store: &AnimationStore) -> Result<Vec<Shape>> {
        if !self.visible {
            return Ok(Vec::new());
        }
        store.shapes_at(self.time)
    }
}

fn check_speed(ticks_per_second: u32) -> Result<()> {
    if ticks_per_second == 0 {
        return Err(AnimationError::InvalidSpeed { ticks_per_second });
    }
    Ok(())
}
