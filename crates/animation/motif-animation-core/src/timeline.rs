//! Per-shape keyframe timeline.
//!
//! Model:
//! - Keyframes are kept sorted ascending by time and no two share a time.
//! - Insertion finds its slot by binary search and refuses an occupied time, so the
//!   order never has to be repaired after the fact.
//! - Sampling looks for the segment `[k(i), k(i+1)]` that contains the query time.
//!   There is no extrapolation before the first or after the last keyframe.

use crate::interp::interpolate;
use crate::keyframe::Keyframe;
use crate::shape::Shape;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Timeline {
    frames: Vec<Keyframe>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn frames(&self) -> &[Keyframe] {
        &self.frames
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Keyframe> {
        self.frames.iter()
    }

    /// Time of the last keyframe.
    pub fn end_time(&self) -> Option<f64> {
        self.frames.last().map(Keyframe::time)
    }

    /// Time of the first keyframe.
    pub fn start_time(&self) -> Option<f64> {
        self.frames.first().map(Keyframe::time)
    }

    /// Numeric comparison, so `-0.0` and `0.0` are the same time. Stored times
    /// are finite; a NaN query finds nothing.
    fn search(&self, time: f64) -> Result<usize, usize> {
        self.frames.binary_search_by(|k| {
            k.time()
                .partial_cmp(&time)
                .unwrap_or(std::cmp::Ordering::Greater)
        })
    }

    pub fn get(&self, time: f64) -> Option<&Keyframe> {
        self.search(time).ok().map(|i| &self.frames[i])
    }

    #[inline]
    pub fn contains_time(&self, time: f64) -> bool {
        self.search(time).is_ok()
    }

    /// Insert keeping time order. Hands the frame back if its time is taken.
    pub fn insert(&mut self, frame: Keyframe) -> Result<usize, Keyframe> {
        match self.search(frame.time()) {
            Ok(_) => Err(frame),
            Err(i) => {
                self.frames.insert(i, frame);
                Ok(i)
            }
        }
    }

    /// Remove the keyframe at `time`, if any.
    pub fn remove(&mut self, time: f64) -> Option<Keyframe> {
        self.search(time).ok().map(|i| self.frames.remove(i))
    }

    /// Adjacent keyframe pairs in time order; `n` keyframes give `n - 1` pairs.
    pub fn segments(&self) -> impl Iterator<Item = (&Keyframe, &Keyframe)> {
        self.frames.windows(2).map(|w| (&w[0], &w[1]))
    }

    /// Keyframes bracketing `t` (`k0.time <= t <= k1.time`).
    ///
    /// Edge cases:
    /// - `t` before the first or after the last keyframe: `None`.
    /// - `t` exactly on the last keyframe: the final segment, or `(k, k)` for a
    ///   single-keyframe timeline.
    pub fn bracket(&self, t: f64) -> Option<(&Keyframe, &Keyframe)> {
        let n = self.frames.len();
        // Number of keyframes at or before t.
        let idx = self.frames.partition_point(|k| k.time() <= t);
        if idx == 0 {
            return None;
        }
        if idx < n {
            return Some((&self.frames[idx - 1], &self.frames[idx]));
        }
        let last = &self.frames[n - 1];
        if last.time() != t {
            return None;
        }
        if n == 1 {
            Some((last, last))
        } else {
            Some((&self.frames[n - 2], last))
        }
    }

    /// Interpolated shape at `t`, or `None` outside the timeline's span.
    pub fn sample(&self, t: f64) -> Option<Shape> {
        self.bracket(t).map(|(a, b)| interpolate(a, b, t))
    }

    /// Strictly ascending times.
    pub fn is_ordered(&self) -> bool {
        self.frames.windows(2).all(|w| w[0].time() < w[1].time())
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a Keyframe;
    type IntoIter = std::slice::Iter<'a, Keyframe>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}
