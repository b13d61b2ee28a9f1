//! Stroke store with bounded undo/redo history.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};

/// Maximum number of undo states to keep.
pub const UNDO_LIMIT: usize = 50;

/// A committed freehand stroke: a polyline in world coordinates with one color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Points in world space, in drawing order.
    pub points: Vec<Point>,
    /// Any CSS color token.
    pub color: String,
}

impl Stroke {
    pub fn new(points: Vec<Point>, color: impl Into<String>) -> Self {
        Self {
            points,
            color: color.into(),
        }
    }

    /// Copy of this stroke shifted by `delta`.
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            points: self.points.iter().map(|&p| p + delta).collect(),
            color: self.color.clone(),
        }
    }

    fn translate(&mut self, delta: Vec2) {
        for point in &mut self.points {
            *point += delta;
        }
    }
}

/// A snapshot of the store for undo/redo.
type Snapshot = Vec<Stroke>;

/// The ordered collection of committed strokes.
///
/// All mutations go through [`record_and_apply`](Self::record_and_apply) (or
/// a helper built on it), so every edit can be undone. Both history stacks
/// hold at most `limit` snapshots; the oldest is evicted first.
#[derive(Debug, Clone)]
pub struct StrokeDocument {
    strokes: Vec<Stroke>,
    undo_stack: VecDeque<Snapshot>,
    redo_stack: VecDeque<Snapshot>,
    limit: usize,
}

impl Default for StrokeDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl StrokeDocument {
    /// Create an empty document with the default history limit.
    pub fn new() -> Self {
        Self::with_limit(UNDO_LIMIT)
    }

    /// Create an empty document keeping at most `limit` history entries per stack.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            strokes: Vec::new(),
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            limit: limit.max(1),
        }
    }

    fn push_bounded(stack: &mut VecDeque<Snapshot>, snapshot: Snapshot, limit: usize) {
        stack.push_back(snapshot);
        while stack.len() > limit {
            stack.pop_front();
        }
    }

    /// Record the current strokes as an undo entry, clear redo and replace
    /// the strokes with `new_strokes`.
    pub fn record_and_apply(&mut self, new_strokes: Vec<Stroke>) {
        let previous = std::mem::replace(&mut self.strokes, new_strokes);
        Self::push_bounded(&mut self.undo_stack, previous, self.limit);
        self.redo_stack.clear();
    }

    /// Undo the last change.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.undo_stack.pop_back() else {
            return false;
        };
        let current = std::mem::replace(&mut self.strokes, snapshot);
        Self::push_bounded(&mut self.redo_stack, current, self.limit);
        true
    }

    /// Redo the last undone change.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.redo_stack.pop_back() else {
            return false;
        };
        let current = std::mem::replace(&mut self.strokes, snapshot);
        Self::push_bounded(&mut self.undo_stack, current, self.limit);
        true
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// The most recent undo entry, if any.
    pub fn last_undo_entry(&self) -> Option<&[Stroke]> {
        self.undo_stack.back().map(Vec::as_slice)
    }

    /// Append a stroke as one undoable step. Empty strokes are ignored.
    pub fn commit_stroke(&mut self, stroke: Stroke) -> bool {
        if stroke.points.is_empty() {
            return false;
        }
        let mut next = self.strokes.clone();
        next.push(stroke);
        self.record_and_apply(next);
        true
    }

    /// Remove the strokes at `indices` as one undoable step.
    /// Returns false (and records nothing) if no index refers to a stroke.
    pub fn remove_indices(&mut self, indices: &BTreeSet<usize>) -> bool {
        if !indices.iter().any(|&i| i < self.strokes.len()) {
            return false;
        }
        let next = self
            .strokes
            .iter()
            .enumerate()
            .filter(|(i, _)| !indices.contains(i))
            .map(|(_, s)| s.clone())
            .collect();
        self.record_and_apply(next);
        true
    }

    /// Remove every stroke as one undoable step. No-op on an empty store.
    pub fn clear(&mut self) -> bool {
        if self.strokes.is_empty() {
            return false;
        }
        self.record_and_apply(Vec::new());
        true
    }

    /// Translate the strokes at `indices` as one new undoable step.
    pub fn translate_indices(&mut self, indices: &BTreeSet<usize>, delta: Vec2) {
        let next = self
            .strokes
            .iter()
            .enumerate()
            .map(|(i, s)| if indices.contains(&i) { s.translated(delta) } else { s.clone() })
            .collect();
        self.record_and_apply(next);
    }

    /// Translate the strokes at `indices` in place, folding the change into
    /// the history entry already recorded for the ongoing gesture.
    ///
    /// Callers must have recorded that entry first (see
    /// [`translate_indices`](Self::translate_indices)).
    pub fn translate_recorded(&mut self, indices: &BTreeSet<usize>, delta: Vec2) {
        debug_assert!(self.can_undo(), "translate_recorded without a recorded entry");
        for &i in indices {
            if let Some(stroke) = self.strokes.get_mut(i) {
                stroke.translate(delta);
            }
        }
    }

    /// All strokes, back to front.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn get(&self, index: usize) -> Option<&Stroke> {
        self.strokes.get(index)
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Get the number of strokes.
    pub fn len(&self) -> usize {
        self.strokes.len()
    }
}
