//! Motif Animation Core
//!
//! Keyframe animation of rectangles and ellipses on a canvas: shape timelines,
//! linear motion interpolation, a keyed store with whole-scene sampling, a
//! validating builder, snapshot undo/redo, and text/JSON readers and writers.
//! No rendering or timers live here; hosts drive a [`Playhead`] and draw the
//! shapes it returns.

pub mod builder;
pub mod canvas;
pub mod config;
pub mod error;
pub mod history;
pub mod interp;
pub mod keyframe;
pub mod playback;
pub mod shape;
pub mod store;
pub mod stored;
pub mod text;
pub mod timeline;

// Re-exports for consumers (views, exporters, controllers)
pub use builder::AnimationBuilder;
pub use canvas::Canvas;
pub use config::Config;
pub use error::{AnimationError, HistoryDirection, Result};
pub use history::{EditHistory, Editor};
pub use interp::{interpolate, Motion};
pub use keyframe::{FrameSpec, Keyframe};
pub use playback::{EndBehavior, PlaybackState, Playhead};
pub use shape::{Shape, ShapeBuilder, ShapeKind, MAX_CHANNEL};
pub use store::{AnimationStore, ShapeEntry};
pub use stored::{parse_stored_animation_json, StoredAnimation, StoredShape};
pub use text::{parse_animation_text, parse_animation_text_with};
pub use timeline::Timeline;
