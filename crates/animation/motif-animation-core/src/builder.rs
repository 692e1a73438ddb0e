//! Staged construction of an [`AnimationStore`] from raw declarations.
//!
//! Each step is validated as it is made, against the same rules the store
//! enforces for direct mutation; [`AnimationBuilder::build`] re-checks the whole
//! result before handing it out.

use log::debug;

use crate::canvas::Canvas;
use crate::config::Config;
use crate::error::{AnimationError, Result};
use crate::keyframe::FrameSpec;
use crate::shape::{Shape, ShapeKind};
use crate::store::AnimationStore;

#[derive(Debug, Default)]
pub struct AnimationBuilder {
    store: AnimationStore,
}

impl AnimationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder starting from the configured default canvas.
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            store: AnimationStore::with_canvas(cfg.canvas),
        }
    }

    /// Store built so far.
    pub fn peek(&self) -> &AnimationStore {
        &self.store
    }

    pub fn set_bounds(&mut self, x: i32, y: i32, width: i32, height: i32) -> Result<&mut Self> {
        self.store.set_canvas(Canvas::new(x, y, width, height)?)?;
        Ok(self)
    }

    /// Declare a shape by name and variant name (`rectangle` or `ellipse`) at the
    /// default geometry, with an empty timeline.
    pub fn declare_shape(&mut self, name: &str, variant: &str) -> Result<&mut Self> {
        if self.store.contains(name) {
            return Err(AnimationError::DuplicateKey {
                key: name.to_string(),
            });
        }
        let kind = ShapeKind::parse(variant)?;
        self.store.add_shape(Shape::new(name, kind))?;
        Ok(self)
    }

    fn kind_of(&self, name: &str) -> Result<ShapeKind> {
        self.store
            .declaration(name)
            .map(Shape::kind)
            .ok_or_else(|| AnimationError::UnknownKey {
                key: name.to_string(),
            })
    }

    /// Add one keyframe for a declared shape. An occupied time is a `TimeConflict`.
    pub fn add_keyframe(&mut self, name: &str, frame: FrameSpec) -> Result<&mut Self> {
        let kind = self.kind_of(name)?;
        let keyframe = frame.to_keyframe(name, kind)?;
        self.store.add_keyframe(name, keyframe)?;
        Ok(self)
    }

    /// Add a motion `from -> to`. Endpoints identical to existing keyframes are shared.
    pub fn add_motion(&mut self, name: &str, from: FrameSpec, to: FrameSpec) -> Result<&mut Self> {
        if from.time > to.time {
            return Err(AnimationError::InvalidRange {
                start: from.time,
                end: to.time,
            });
        }
        let kind = self.kind_of(name)?;
        let start = from.to_keyframe(name, kind)?;
        let end = to.to_keyframe(name, kind)?;
        self.store.add_motion(name, start, end)?;
        Ok(self)
    }

    /// Replace the keyframe at `time` with a copy rotated to `theta` degrees.
    pub fn rotate_keyframe(&mut self, name: &str, time: f64, theta: f64) -> Result<&mut Self> {
        let timeline = self
            .store
            .timeline(name)
            .ok_or_else(|| AnimationError::UnknownKey {
                key: name.to_string(),
            })?;
        let current = timeline.get(time).ok_or_else(|| AnimationError::NotFound {
            key: name.to_string(),
            time,
        })?;
        let rotated = current.with_shape(current.shape().with_rotation(theta)?);
        self.store.replace_keyframe(name, time, rotated)?;
        Ok(self)
    }

    /// Finish, returning the invariant-checked store.
    pub fn build(self) -> Result<AnimationStore> {
        self.store.validate()?;
        debug!(
            "built animation: {} shapes, {} keyframes, end time {}",
            self.store.len(),
            self.store.keyframe_count(),
            self.store.end_time()
        );
        Ok(self.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(t: f64, x: f64) -> FrameSpec {
        FrameSpec::new(t, x, 0.0, 10.0, 10.0, 0.0, 0.0, 0.0)
    }

    #[test]
    fn declare_rejects_duplicates_and_unknown_variants() {
        let mut b = AnimationBuilder::new();
        b.declare_shape("r", "rectangle").unwrap();
        assert!(matches!(
            b.declare_shape("r", "ellipse"),
            Err(AnimationError::DuplicateKey { .. })
        ));
        assert!(matches!(
            b.declare_shape("t", "triangle"),
            Err(AnimationError::UnsupportedVariant { .. })
        ));
        let store = b.build().unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.declaration("r").unwrap().kind(), ShapeKind::Rectangle);
    }

    #[test]
    fn declare_rejects_names_text_cannot_hold() {
        let mut b = AnimationBuilder::new();
        for name in ["", "my shape", "r#1"] {
            assert!(matches!(
                b.declare_shape(name, "rectangle"),
                Err(AnimationError::InvalidKey { .. })
            ));
        }
        assert!(b.build().unwrap().is_empty());
    }

    #[test]
    fn negative_zero_time_conflicts_with_zero() {
        let mut b = AnimationBuilder::new();
        b.declare_shape("r", "rectangle").unwrap();
        b.add_keyframe("r", spec(0.0, 1.0)).unwrap();
        assert!(matches!(
            b.add_keyframe("r", spec(-0.0, 2.0)),
            Err(AnimationError::TimeConflict { .. })
        ));
        let store = b.build().unwrap();
        assert_eq!(store.timeline("r").unwrap().len(), 1);
    }

    #[test]
    fn bounds_validated() {
        let mut b = AnimationBuilder::new();
        assert!(matches!(
            b.set_bounds(0, 0, 0, 100),
            Err(AnimationError::InvalidBounds { .. })
        ));
        b.set_bounds(200, 70, 360, 360).unwrap();
        let store = b.build().unwrap();
        assert_eq!(store.canvas().x(), 200);
        assert_eq!(store.canvas().height(), 360);
    }

    #[test]
    fn keyframes_use_declared_variant() {
        let mut b = AnimationBuilder::new();
        b.declare_shape("e", "ellipse")
            .unwrap()
            .add_keyframe("e", spec(1.0, 5.0))
            .unwrap();
        assert!(matches!(
            b.add_keyframe("missing", spec(1.0, 5.0)),
            Err(AnimationError::UnknownKey { .. })
        ));
        assert!(matches!(
            b.add_keyframe("e", spec(1.0, 6.0)),
            Err(AnimationError::TimeConflict { .. })
        ));
        let store = b.build().unwrap();
        let frame = &store.timeline("e").unwrap().frames()[0];
        assert_eq!(frame.shape().kind(), ShapeKind::Ellipse);
        assert_eq!(frame.shape().x(), 5.0);
    }

    #[test]
    fn chained_motions() {
        let mut b = AnimationBuilder::new();
        b.declare_shape("r", "rectangle").unwrap();
        b.add_motion("r", spec(1.0, 0.0), spec(10.0, 90.0)).unwrap();
        b.add_motion("r", spec(10.0, 90.0), spec(50.0, 0.0)).unwrap();
        assert!(matches!(
            b.add_motion("r", spec(60.0, 0.0), spec(55.0, 0.0)),
            Err(AnimationError::InvalidRange { .. })
        ));
        let store = b.build().unwrap();
        assert_eq!(store.timeline("r").unwrap().len(), 3);
        assert_eq!(store.end_time(), 50.0);
    }

    #[test]
    fn rotate_replaces_keyframe() {
        let mut b = AnimationBuilder::new();
        b.declare_shape("r", "rectangle").unwrap();
        b.add_keyframe("r", spec(2.0, 7.0)).unwrap();
        assert!(matches!(
            b.rotate_keyframe("r", 3.0, 45.0),
            Err(AnimationError::NotFound { .. })
        ));
        assert!(matches!(
            b.rotate_keyframe("q", 2.0, 45.0),
            Err(AnimationError::UnknownKey { .. })
        ));
        b.rotate_keyframe("r", 2.0, 45.0).unwrap();
        let store = b.build().unwrap();
        let tl = store.timeline("r").unwrap();
        assert_eq!(tl.len(), 1);
        let s = tl.get(2.0).unwrap().shape();
        assert_eq!(s.theta(), 45.0);
        assert_eq!(s.x(), 7.0);
    }

    #[test]
    fn invalid_tuple_values_rejected() {
        let mut b = AnimationBuilder::new();
        b.declare_shape("r", "rectangle").unwrap();
        let neg_width = FrameSpec::new(0.0, 0.0, 0.0, -1.0, 1.0, 0.0, 0.0, 0.0);
        assert!(matches!(
            b.add_keyframe("r", neg_width),
            Err(AnimationError::InvalidGeometry { .. })
        ));
        let bad_time = FrameSpec::new(-2.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0);
        assert!(matches!(
            b.add_keyframe("r", bad_time),
            Err(AnimationError::InvalidTime { .. })
        ));
        assert!(b.peek().timeline("r").unwrap().is_empty());
    }
}
