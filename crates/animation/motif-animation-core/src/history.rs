//! Linear undo/redo over whole-store snapshots.
//!
//! Protocol for an edit:
//! 1. [`EditHistory::checkpoint`] pushes a copy of the live store onto `past` and
//!    sets the redo stack aside.
//! 2. The edit runs against the live store.
//! 3. On success [`EditHistory::commit`] drops the old redo stack (a fresh edit
//!    invalidates redo); on failure [`EditHistory::rollback`] pops the snapshot
//!    and restores the redo stack, so `past` only holds states that existed.
//!
//! [`EditHistory::apply`] runs all three steps; [`Editor`] wraps a store and its
//! history behind the store's mutation API.

use std::collections::VecDeque;

use log::debug;

use crate::canvas::Canvas;
use crate::config::Config;
use crate::error::{AnimationError, HistoryDirection, Result};
use crate::keyframe::Keyframe;
use crate::shape::Shape;
use crate::store::{AnimationStore, ShapeEntry};

/// Redo stack set aside by a speculative snapshot.
#[must_use = "a checkpoint must be committed or rolled back"]
#[derive(Debug)]
pub struct Checkpoint {
    future: Vec<AnimationStore>,
}

#[derive(Clone, Debug, Default)]
pub struct EditHistory {
    past: VecDeque<AnimationStore>,
    future: Vec<AnimationStore>,
    limit: Option<usize>,
}

impl EditHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// History keeping at most `limit` undo snapshots.
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    #[inline]
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    #[inline]
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    #[inline]
    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    #[inline]
    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }

    /// Snapshot `live` ahead of an edit.
    pub fn checkpoint(&mut self, live: &AnimationStore) -> Checkpoint {
        self.past.push_back(live.make_copy());
        debug!("history: snapshot pushed (depth {})", self.past.len());
        Checkpoint {
            future: std::mem::take(&mut self.future),
        }
    }

    /// Keep the snapshot; the redo branch is gone.
    pub fn commit(&mut self, checkpoint: Checkpoint) {
        drop(checkpoint.future);
        self.trim();
    }

    /// Discard the snapshot taken by `checkpoint` and restore the redo stack.
    /// Returns the snapshot, i.e. the store as it was before the edit.
    pub fn rollback(&mut self, checkpoint: Checkpoint) -> Option<AnimationStore> {
        self.future = checkpoint.future;
        let snapshot = self.past.pop_back();
        debug!("history: snapshot rolled back (depth {})", self.past.len());
        snapshot
    }

    /// Run `edit` against `live` as one undoable step. On error `live` and the
    /// history are restored to their state before the call.
    pub fn apply<T, F>(&mut self, live: &mut AnimationStore, edit: F) -> Result<T>
    where
        F: FnOnce(&mut AnimationStore) -> Result<T>,
    {
        let checkpoint = self.checkpoint(live);
        match edit(live) {
            Ok(value) => {
                self.commit(checkpoint);
                Ok(value)
            }
            Err(err) => {
                if let Some(snapshot) = self.rollback(checkpoint) {
                    *live = snapshot;
                }
                Err(err)
            }
        }
    }

    /// Step back to the most recent snapshot; the current store moves to redo.
    pub fn undo(&mut self, live: &mut AnimationStore) -> Result<()> {
        let previous = self.past.pop_back().ok_or(AnimationError::NoHistory {
            direction: HistoryDirection::Undo,
        })?;
        self.future.push(std::mem::replace(live, previous));
        debug!(
            "history: undo (past {}, future {})",
            self.past.len(),
            self.future.len()
        );
        Ok(())
    }

    /// Re-apply the most recently undone state; the current store moves to undo.
    pub fn redo(&mut self, live: &mut AnimationStore) -> Result<()> {
        let next = self.future.pop().ok_or(AnimationError::NoHistory {
            direction: HistoryDirection::Redo,
        })?;
        self.past.push_back(std::mem::replace(live, next));
        self.trim();
        debug!(
            "history: redo (past {}, future {})",
            self.past.len(),
            self.future.len()
        );
        Ok(())
    }

    fn trim(&mut self) {
        if let Some(limit) = self.limit {
            while self.past.len() > limit {
                self.past.pop_front();
            }
        }
    }
}

/// A live store plus its edit history. Every mutation is one undoable step.
#[derive(Clone, Debug, Default)]
pub struct Editor {
    store: AnimationStore,
    history: EditHistory,
}

impl Editor {
    pub fn new(store: AnimationStore) -> Self {
        Self {
            store,
            history: EditHistory::new(),
        }
    }

    /// Empty store on the configured canvas, history capped per config.
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            store: AnimationStore::with_canvas(cfg.canvas),
            history: EditHistory::with_limit(cfg.history_limit),
        }
    }

    pub fn with_history(store: AnimationStore, history: EditHistory) -> Self {
        Self { store, history }
    }

    #[inline]
    pub fn store(&self) -> &AnimationStore {
        &self.store
    }

    #[inline]
    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    pub fn into_store(self) -> AnimationStore {
        self.store
    }

    pub fn add_shape(&mut self, shape: Shape) -> Result<()> {
        self.history.apply(&mut self.store, |s| s.add_shape(shape))
    }

    pub fn remove_shape(&mut self, key: &str) -> Result<ShapeEntry> {
        self.history.apply(&mut self.store, |s| s.remove_shape(key))
    }

    pub fn add_keyframe(&mut self, key: &str, frame: Keyframe) -> Result<()> {
        self.history
            .apply(&mut self.store, |s| s.add_keyframe(key, frame))
    }

    pub fn remove_keyframe(&mut self, key: &str, frame: &Keyframe) -> Result<Keyframe> {
        self.history
            .apply(&mut self.store, |s| s.remove_keyframe(key, frame))
    }

    /// Modify the keyframe at `time` into `frame` as a single step.
    pub fn replace_keyframe(&mut self, key: &str, time: f64, frame: Keyframe) -> Result<Keyframe> {
        self.history
            .apply(&mut self.store, |s| s.replace_keyframe(key, time, frame))
    }

    pub fn add_motion(&mut self, key: &str, start: Keyframe, end: Keyframe) -> Result<()> {
        self.history
            .apply(&mut self.store, |s| s.add_motion(key, start, end))
    }

    pub fn remove_motion(&mut self, key: &str, start: &Keyframe, end: &Keyframe) -> Result<()> {
        self.history
            .apply(&mut self.store, |s| s.remove_motion(key, start, end))
    }

    pub fn set_canvas(&mut self, canvas: Canvas) -> Result<()> {
        self.history.apply(&mut self.store, |s| s.set_canvas(canvas))
    }

    /// Replace the whole store (e.g. after reading a file) as one undoable step.
    pub fn load(&mut self, store: AnimationStore) -> Result<()> {
        store.validate()?;
        self.history.apply(&mut self.store, |s| {
            *s = store;
            Ok(())
        })
    }

    pub fn undo(&mut self) -> Result<()> {
        self.history.undo(&mut self.store)
    }

    pub fn redo(&mut self) -> Result<()> {
        self.history.redo(&mut self.store)
    }

    #[inline]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[inline]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}
