//! Stored animations: the JSON document form of a whole store.
//!
//! Import never trusts the document. It is replayed step by step through
//! [`AnimationBuilder`], so every store invariant is checked on the way in.

use serde::{Deserialize, Serialize};

use crate::builder::AnimationBuilder;
use crate::canvas::Canvas;
use crate::error::Result;
use crate::keyframe::FrameSpec;
use crate::shape::ShapeKind;
use crate::store::AnimationStore;

/// JSON document form of a whole store.
///
/// ```json
/// {
///   "canvas": { "x": 0, "y": 0, "width": 500, "height": 500 },
///   "shapes": [
///     { "name": "r", "kind": "rectangle",
///       "keyframes": [ { "time": 0, "x": 0, "y": 0, "width": 10, "height": 10,
///                        "red": 255, "green": 0, "blue": 0 } ] }
///   ]
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoredAnimation {
    #[serde(default)]
    pub canvas: Canvas,
    /// Insertion order of the store.
    #[serde(default)]
    pub shapes: Vec<StoredShape>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoredShape {
    pub name: String,
    pub kind: ShapeKind,
    #[serde(default)]
    pub keyframes: Vec<FrameSpec>,
}

impl AnimationStore {
    pub fn to_stored(&self) -> StoredAnimation {
        StoredAnimation {
            canvas: *self.canvas(),
            shapes: self
                .entries()
                .map(|(key, entry)| StoredShape {
                    name: key.to_string(),
                    kind: entry.declaration().kind(),
                    keyframes: entry.timeline().iter().map(|k| k.to_spec()).collect(),
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_stored())?)
    }
}

impl StoredAnimation {
    /// Replay the document through [`AnimationBuilder`]; the JSON is not trusted.
    pub fn into_store(self) -> Result<AnimationStore> {
        let mut builder = AnimationBuilder::new();
        builder.set_bounds(
            self.canvas.x(),
            self.canvas.y(),
            self.canvas.width(),
            self.canvas.height(),
        )?;
        for shape in &self.shapes {
            builder.declare_shape(&shape.name, shape.kind.name())?;
            for frame in &shape.keyframes {
                builder.add_keyframe(&shape.name, *frame)?;
            }
        }
        builder.build()
    }
}

/// Parse a stored-animation JSON document into a validated store.
pub fn parse_stored_animation_json(s: &str) -> Result<AnimationStore> {
    let doc: StoredAnimation = serde_json::from_str(s)?;
    doc.into_store()
}
