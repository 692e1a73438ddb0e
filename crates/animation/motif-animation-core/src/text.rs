//! Line-oriented animation text.
//!
//! Writer: the canonical layout consumed by text/SVG exporters. One block per
//! shape in insertion order, a `Shape KEY Kind` header followed by one `motion`
//! line per adjacent keyframe pair, blocks separated by a blank line, no
//! trailing newline.
//!
//! Reader: the same directives plus `canvas` and `rotate`, fed through
//! [`AnimationBuilder`] so every line is validated like a builder call.
//!
//! ```text
//! canvas 200 70 360 360
//! shape R rectangle
//! motion R 1  200 200 50 100 255 0 0   10 200 200 50 100 255 0 0
//! rotate R 10 45
//! ```

use crate::builder::AnimationBuilder;
use crate::error::{AnimationError, Result};
use crate::keyframe::{FrameSpec, Keyframe};
use crate::store::AnimationStore;

impl AnimationStore {
    /// Deterministic text rendering of every shape and motion.
    pub fn to_canonical_text(&self) -> String {
        let blocks: Vec<String> = self
            .entries()
            .map(|(key, entry)| {
                let mut lines = vec![format!("Shape {} {}", key, entry.declaration().kind())];
                lines.extend(
                    entry
                        .timeline()
                        .segments()
                        .map(|(a, b)| motion_line(key, a, b)),
                );
                lines.join("\n")
            })
            .collect();
        blocks.join("\n\n")
    }
}

/// `motion KEY <state a> <state b>`; rotations are printed only when either end has one.
fn motion_line(key: &str, a: &Keyframe, b: &Keyframe) -> String {
    let rotated = a.shape().theta() != 0.0 || b.shape().theta() != 0.0;
    format!(
        "motion {} {} {}",
        key,
        state_fields(a, rotated),
        state_fields(b, rotated)
    )
}

fn state_fields(frame: &Keyframe, rotated: bool) -> String {
    let spec = frame.to_spec();
    let mut fields = vec![
        spec.time,
        spec.x,
        spec.y,
        spec.width,
        spec.height,
        spec.red,
        spec.green,
        spec.blue,
    ];
    if rotated {
        fields.push(spec.theta);
    }
    fields
        .into_iter()
        .map(format_number)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Shortest round-trip form, always with a fractional part (`10.0`, `127.5`).
fn format_number(v: f64) -> String {
    format!("{v:?}")
}

/// Parse animation text into a validated store on the default canvas.
pub fn parse_animation_text(src: &str) -> Result<AnimationStore> {
    parse_animation_text_with(src, AnimationBuilder::new())
}

/// Parse animation text into `builder` (e.g. one created from a [`crate::Config`]).
pub fn parse_animation_text_with(src: &str, mut builder: AnimationBuilder) -> Result<AnimationStore> {
    for (idx, raw) in src.lines().enumerate() {
        let line = idx + 1;
        let content = match raw.find('#') {
            Some(i) => &raw[..i],
            None => raw,
        };
        let mut tokens = content.split_whitespace();
        let Some(directive) = tokens.next() else {
            continue;
        };
        let args: Vec<&str> = tokens.collect();
        match directive.to_ascii_lowercase().as_str() {
            "canvas" => {
                expect_arity(line, "canvas", &args, &[4])?;
                let n: Vec<i32> = args
                    .iter()
                    .map(|a| parse_token(line, a))
                    .collect::<Result<_>>()?;
                builder.set_bounds(n[0], n[1], n[2], n[3])?;
            }
            "shape" => {
                expect_arity(line, "shape", &args, &[2])?;
                builder.declare_shape(args[0], args[1])?;
            }
            "motion" => {
                expect_arity(line, "motion", &args, &[17, 19])?;
                let nums: Vec<f64> = args[1..]
                    .iter()
                    .map(|a| parse_token(line, a))
                    .collect::<Result<_>>()?;
                let (from, to) = nums.split_at(nums.len() / 2);
                builder.add_motion(args[0], frame_spec(from), frame_spec(to))?;
            }
            "rotate" => {
                expect_arity(line, "rotate", &args, &[3])?;
                let time: f64 = parse_token(line, args[1])?;
                let theta: f64 = parse_token(line, args[2])?;
                builder.rotate_keyframe(args[0], time, theta)?;
            }
            other => {
                return Err(AnimationError::Parse {
                    line,
                    reason: format!("unknown directive '{other}'"),
                })
            }
        }
    }
    builder.build()
}

/// `[t, x, y, w, h, r, g, b]` or the same followed by theta.
fn frame_spec(v: &[f64]) -> FrameSpec {
    let spec = FrameSpec::new(v[0], v[1], v[2], v[3], v[4], v[5], v[6], v[7]);
    match v.get(8) {
        Some(theta) => spec.rotated(*theta),
        None => spec,
    }
}

fn expect_arity(line: usize, directive: &str, args: &[&str], allowed: &[usize]) -> Result<()> {
    if allowed.contains(&args.len()) {
        return Ok(());
    }
    let expected: Vec<String> = allowed.iter().map(|n| n.to_string()).collect();
    Err(AnimationError::Parse {
        line,
        reason: format!(
            "'{directive}' takes {} arguments, got {}",
            expected.join(" or "),
            args.len()
        ),
    })
}

fn parse_token<T: std::str::FromStr>(line: usize, token: &str) -> Result<T> {
    token.parse().map_err(|_| AnimationError::Parse {
        line,
        reason: format!("invalid number '{token}'"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{Shape, ShapeKind};

    const SMALL: &str = "\
# two shapes
canvas 200 70 360 360
shape R rectangle
shape C ellipse
motion R 1 200 200 50 100 255 0 0    10 200 200 50 100 255 0 0
motion R 10 200 200 50 100 255 0 0   50 300 300 50 100 255 0 0
motion C 6 440 70 120 60 0 0 255     20 440 70 120 60 0 0 255
";

    #[test]
    fn parses_directives() {
        let store = parse_animation_text(SMALL).unwrap();
        assert_eq!(store.canvas().x(), 200);
        assert_eq!(store.len(), 2);
        assert_eq!(store.timeline("R").unwrap().len(), 3);
        assert_eq!(store.declaration("C").unwrap().kind(), ShapeKind::Ellipse);
        assert_eq!(store.end_time(), 50.0);
    }

    #[test]
    fn canonical_layout() {
        let store = parse_animation_text(SMALL).unwrap();
        let expected = "\
Shape R Rectangle
motion R 1.0 200.0 200.0 50.0 100.0 255.0 0.0 0.0 10.0 200.0 200.0 50.0 100.0 255.0 0.0 0.0
motion R 10.0 200.0 200.0 50.0 100.0 255.0 0.0 0.0 50.0 300.0 300.0 50.0 100.0 255.0 0.0 0.0

Shape C Ellipse
motion C 6.0 440.0 70.0 120.0 60.0 0.0 0.0 255.0 20.0 440.0 70.0 120.0 60.0 0.0 0.0 255.0";
        assert_eq!(store.to_canonical_text(), expected);
    }

    #[test]
    fn headers_only_for_short_timelines() {
        let mut store = AnimationStore::new();
        store.add_shape(Shape::new("a", ShapeKind::Rectangle)).unwrap();
        store.add_shape(Shape::new("b", ShapeKind::Ellipse)).unwrap();
        store
            .add_keyframe("b", Keyframe::new(3.0, Shape::new("b", ShapeKind::Ellipse)).unwrap())
            .unwrap();
        assert_eq!(store.to_canonical_text(), "Shape a Rectangle\n\nShape b Ellipse");
        assert_eq!(AnimationStore::new().to_canonical_text(), "");
    }

    #[test]
    fn rotation_round_trips() {
        let src = "\
shape R rectangle
motion R 0 0 0 10 10 0 0 0  10 10 0 10 10 0 0 0
motion R 10 10 0 10 10 0 0 0  20 20 0 10 10 0 0 0
rotate R 10 30
";
        let store = parse_animation_text(src).unwrap();
        let text = store.to_canonical_text();
        assert!(text.contains("motion R 0.0 0.0 0.0 10.0 10.0 0.0 0.0 0.0 0.0 10.0"));
        let reread = parse_animation_text(&text).unwrap();
        assert_eq!(reread, store);
    }

    #[test]
    fn parse_errors_carry_line_numbers() {
        let err = parse_animation_text("shape R rectangle\nmotion R 1 2 3\n").unwrap_err();
        assert!(matches!(err, AnimationError::Parse { line: 2, .. }));

        let err = parse_animation_text("\n\nspin R 10").unwrap_err();
        assert!(matches!(err, AnimationError::Parse { line: 3, .. }));

        let err = parse_animation_text("canvas 0 0 ten 10").unwrap_err();
        assert!(matches!(err, AnimationError::Parse { line: 1, .. }));
    }

    #[test]
    fn builder_errors_pass_through() {
        let err = parse_animation_text("motion R 1 0 0 0 0 0 0 0 2 0 0 0 0 0 0 0").unwrap_err();
        assert!(matches!(err, AnimationError::UnknownKey { .. }));
        let err = parse_animation_text("shape R hexagon").unwrap_err();
        assert!(matches!(err, AnimationError::UnsupportedVariant { .. }));
    }
}
