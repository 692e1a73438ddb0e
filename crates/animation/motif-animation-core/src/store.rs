//! AnimationStore: the shapes of an animation and their keyframe timelines.
//!
//! Methods:
//! - add_shape, remove_shape (declarations, insertion-ordered)
//! - add_keyframe, remove_keyframe, replace_keyframe, add_motion, remove_motion
//! - shapes_at (interpolated frame), end_time, make_copy, validate
//!
//! Every mutation validates fully before touching state, so a failed call leaves
//! the store exactly as it was.

use indexmap::IndexMap;
use log::{debug, trace};

use crate::canvas::Canvas;
use crate::error::{AnimationError, Result};
use crate::interp::check_order;
use crate::keyframe::Keyframe;
use crate::shape::Shape;
use crate::timeline::Timeline;

/// Declaration of one shape plus its timeline.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeEntry {
    declaration: Shape,
    timeline: Timeline,
}

impl ShapeEntry {
    #[inline]
    pub fn declaration(&self) -> &Shape {
        &self.declaration
    }

    #[inline]
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }
}

#[derive(Clone, Debug, Default)]
pub struct AnimationStore {
    /// Keyed by shape key; insertion order is enumeration and output order.
    shapes: IndexMap<String, ShapeEntry>,
    canvas: Canvas,
}

/// Equal when canvas, shapes, shape order and every keyframe agree.
impl PartialEq for AnimationStore {
    fn eq(&self, other: &Self) -> bool {
        self.canvas == other.canvas
            && self.shapes.len() == other.shapes.len()
            && self
                .shapes
                .iter()
                .zip(other.shapes.iter())
                .all(|(a, b)| a == b)
    }
}

impl AnimationStore {
    /// Empty store on the default canvas.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_canvas(canvas: Canvas) -> Self {
        Self {
            shapes: IndexMap::new(),
            canvas,
        }
    }

    #[inline]
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn set_canvas(&mut self, canvas: Canvas) -> Result<()> {
        canvas.validate()?;
        self.canvas = canvas;
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.shapes.contains_key(key)
    }

    /// Declared shapes in insertion order.
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.values().map(|e| &e.declaration)
    }

    /// `(key, entry)` pairs in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &ShapeEntry)> {
        self.shapes.iter().map(|(k, e)| (k.as_str(), e))
    }

    pub fn entry(&self, key: &str) -> Option<&ShapeEntry> {
        self.shapes.get(key)
    }

    pub fn declaration(&self, key: &str) -> Option<&Shape> {
        self.shapes.get(key).map(|e| &e.declaration)
    }

    pub fn timeline(&self, key: &str) -> Option<&Timeline> {
        self.shapes.get(key).map(|e| &e.timeline)
    }

    /// Every keyframe of every shape, shapes in insertion order, frames in time order.
    pub fn keyframes(&self) -> impl Iterator<Item = &Keyframe> {
        self.shapes.values().flat_map(|e| e.timeline.iter())
    }

    /// Total number of keyframes across all timelines.
    pub fn keyframe_count(&self) -> usize {
        self.shapes.values().map(|e| e.timeline.len()).sum()
    }

    fn entry_ref(&self, key: &str) -> Result<&ShapeEntry> {
        self.shapes.get(key).ok_or_else(|| unknown(key))
    }

    fn entry_mut(&mut self, key: &str) -> Result<&mut ShapeEntry> {
        self.shapes.get_mut(key).ok_or_else(|| unknown(key))
    }

    /// Declare a shape with an empty timeline, appended at the end of the order.
    pub fn add_shape(&mut self, shape: Shape) -> Result<()> {
        if self.shapes.contains_key(shape.key()) {
            return Err(AnimationError::DuplicateKey {
                key: shape.key().to_string(),
            });
        }
        check_key(shape.key())?;
        shape.validate()?;
        debug!("add shape '{}' ({})", shape.key(), shape.kind());
        self.shapes.insert(
            shape.key().to_string(),
            ShapeEntry {
                declaration: shape,
                timeline: Timeline::new(),
            },
        );
        Ok(())
    }

    /// Remove a shape and its whole timeline; later shapes keep their relative order.
    pub fn remove_shape(&mut self, key: &str) -> Result<ShapeEntry> {
        let entry = self.shapes.shift_remove(key).ok_or_else(|| unknown(key))?;
        debug!(
            "remove shape '{}' with {} keyframes",
            key,
            entry.timeline.len()
        );
        Ok(entry)
    }

    /// Keyframes must have a valid time and carry the timeline's key and declared
    /// variant. Deserialized keyframes reach this without `Keyframe::new`.
    fn check_frame(entry: &ShapeEntry, key: &str, frame: &Keyframe) -> Result<()> {
        crate::keyframe::check_time(frame.time())?;
        let shape = frame.shape();
        if shape.key() != key || shape.kind() != entry.declaration.kind() {
            return Err(AnimationError::ShapeMismatch {
                key: key.to_string(),
                found: format!("{} {}", shape.key(), shape.kind()),
            });
        }
        shape.validate()
    }

    /// Insert a keyframe. Fails with `TimeConflict` if the time is already taken.
    pub fn add_keyframe(&mut self, key: &str, frame: Keyframe) -> Result<()> {
        let entry = self.entry_mut(key)?;
        Self::check_frame(entry, key, &frame)?;
        let time = frame.time();
        entry.timeline.insert(frame).map_err(|_| AnimationError::TimeConflict {
            key: key.to_string(),
            time,
        })?;
        debug!("add keyframe '{}' @ {}", key, time);
        Ok(())
    }

    /// Remove the keyframe with `frame`'s time.
    pub fn remove_keyframe(&mut self, key: &str, frame: &Keyframe) -> Result<Keyframe> {
        self.remove_keyframe_at(key, frame.time())
    }

    pub fn remove_keyframe_at(&mut self, key: &str, time: f64) -> Result<Keyframe> {
        let entry = self.entry_mut(key)?;
        let removed = entry
            .timeline
            .remove(time)
            .ok_or_else(|| AnimationError::NotFound {
                key: key.to_string(),
                time,
            })?;
        debug!("remove keyframe '{}' @ {}", key, time);
        Ok(removed)
    }

    /// Swap the keyframe at `time` for `frame` (which may carry a different time).
    /// Returns the keyframe that was replaced.
    pub fn replace_keyframe(&mut self, key: &str, time: f64, frame: Keyframe) -> Result<Keyframe> {
        let entry = self.entry_mut(key)?;
        Self::check_frame(entry, key, &frame)?;
        if !entry.timeline.contains_time(time) {
            return Err(AnimationError::NotFound {
                key: key.to_string(),
                time,
            });
        }
        if frame.time() != time && entry.timeline.contains_time(frame.time()) {
            return Err(AnimationError::TimeConflict {
                key: key.to_string(),
                time: frame.time(),
            });
        }
        let new_time = frame.time();
        let old = entry
            .timeline
            .remove(time)
            .ok_or_else(|| AnimationError::NotFound {
                key: key.to_string(),
                time,
            })?;
        if let Err(frame) = entry.timeline.insert(frame) {
            let _ = entry.timeline.insert(old);
            return Err(AnimationError::TimeConflict {
                key: key.to_string(),
                time: frame.time(),
            });
        }
        debug!("replace keyframe '{}' @ {} -> @ {}", key, time, new_time);
        Ok(old)
    }

    /// Add both endpoints of a motion as one step.
    ///
    /// An endpoint identical to a keyframe already on the timeline is shared with
    /// it (this is how consecutive motions `a -> b`, `b -> c` chain); a different
    /// state at an occupied time fails with `TimeConflict`.
    pub fn add_motion(&mut self, key: &str, start: Keyframe, end: Keyframe) -> Result<()> {
        let entry = self.entry_mut(key)?;
        check_order(&start, &end)?;
        Self::check_frame(entry, key, &start)?;
        Self::check_frame(entry, key, &end)?;
        if start.time() == end.time() && start != end {
            return Err(AnimationError::TimeConflict {
                key: key.to_string(),
                time: end.time(),
            });
        }
        for frame in [&start, &end] {
            if let Some(existing) = entry.timeline.get(frame.time()) {
                if existing != frame {
                    return Err(AnimationError::TimeConflict {
                        key: key.to_string(),
                        time: frame.time(),
                    });
                }
            }
        }
        let (t0, t1) = (start.time(), end.time());
        // Shared or coincident endpoints are already present; insert ignores them.
        let _ = entry.timeline.insert(start);
        let _ = entry.timeline.insert(end);
        debug!("add motion '{}' {} -> {}", key, t0, t1);
        Ok(())
    }

    /// Remove whichever endpoints of a motion are present. Fails with `NotFound`
    /// only when neither is.
    pub fn remove_motion(&mut self, key: &str, start: &Keyframe, end: &Keyframe) -> Result<()> {
        let entry = self.entry_mut(key)?;
        let has_start = entry.timeline.contains_time(start.time());
        let has_end = entry.timeline.contains_time(end.time());
        if !has_start && !has_end {
            return Err(AnimationError::NotFound {
                key: key.to_string(),
                time: start.time(),
            });
        }
        entry.timeline.remove(start.time());
        entry.timeline.remove(end.time());
        debug!(
            "remove motion '{}' {} -> {}",
            key,
            start.time(),
            end.time()
        );
        Ok(())
    }

    /// Latest keyframe time over all timelines, or 0 when there are none.
    pub fn end_time(&self) -> f64 {
        self.shapes
            .values()
            .filter_map(|e| e.timeline.end_time())
            .fold(0.0, f64::max)
    }

    /// Interpolated shapes at `time`, in insertion order.
    ///
    /// Shapes whose timeline doesn't span `time` are left out. Fails with
    /// `OutOfRange` for negative times and times past [`end_time`](Self::end_time).
    pub fn shapes_at(&self, time: f64) -> Result<Vec<Shape>> {
        let end = self.end_time();
        if !(time >= 0.0 && time <= end) {
            return Err(AnimationError::OutOfRange { time, end });
        }
        let out: Vec<Shape> = self
            .shapes
            .values()
            .filter_map(|e| e.timeline.sample(time))
            .collect();
        trace!("sampled {} of {} shapes @ {}", out.len(), self.len(), time);
        Ok(out)
    }

    /// Interpolated state of one shape at `time`, `None` if its timeline doesn't span it.
    pub fn shape_at(&self, key: &str, time: f64) -> Result<Option<Shape>> {
        Ok(self.entry_ref(key)?.timeline.sample(time))
    }

    /// Fully independent copy: no state is shared with `self`.
    pub fn make_copy(&self) -> Self {
        self.clone()
    }

    /// Re-check every store invariant.
    pub fn validate(&self) -> Result<()> {
        self.canvas.validate()?;
        for (key, entry) in &self.shapes {
            check_key(key)?;
            if entry.declaration.key() != key {
                return Err(AnimationError::ShapeMismatch {
                    key: key.clone(),
                    found: entry.declaration.key().to_string(),
                });
            }
            entry.declaration.validate()?;
            for frame in &entry.timeline {
                Self::check_frame(entry, key, frame)?;
            }
            if !entry.timeline.is_ordered() {
                // Report the first offending pair.
                if let Some((_, b)) = entry
                    .timeline
                    .segments()
                    .find(|(a, b)| a.time() >= b.time())
                {
                    return Err(AnimationError::TimeConflict {
                        key: key.clone(),
                        time: b.time(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Keys are single tokens in animation text: non-empty, no whitespace, no `#`.
fn check_key(key: &str) -> Result<()> {
    if key.is_empty() || key.chars().any(|c| c.is_whitespace() || c == '#') {
        return Err(AnimationError::InvalidKey {
            key: key.to_string(),
        });
    }
    Ok(())
}

fn unknown(key: &str) -> AnimationError {
    AnimationError::UnknownKey {
        key: key.to_string(),
    }
}
