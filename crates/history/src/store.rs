//! History store: the present document plus the past and future stacks.

use std::collections::VecDeque;

use serde_json::{Map, Value};
use tracing::trace;

use crate::config::DEFAULT_LIMIT;
use crate::record::HistoryRecord;

/// The document a store holds before anything has been loaded.
pub fn empty_marker() -> Value {
    Value::Object(Map::new())
}

/// True if `doc` is the [`empty_marker`].
pub fn is_empty_marker(doc: &Value) -> bool {
    matches!(doc, Value::Object(map) if map.is_empty())
}

/// Holds the live document and the replayable diffs around it.
///
/// `past` is ordered most-recent-last and capped at `limit`; `future` is
/// ordered most-recent-first and unbounded.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    present: Value,
    past: VecDeque<HistoryRecord>,
    future: VecDeque<HistoryRecord>,
    limit: usize,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

impl HistoryStore {
    pub fn new(limit: usize) -> Self {
        Self {
            present: empty_marker(),
            past: VecDeque::with_capacity(limit.min(DEFAULT_LIMIT)),
            future: VecDeque::new(),
            limit,
        }
    }

    pub fn present(&self) -> &Value {
        &self.present
    }

    /// Replaces the present document, returning the previous one.
    pub fn set_present(&mut self, doc: Value) -> Value {
        std::mem::replace(&mut self.present, doc)
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    /// Past records, oldest first.
    pub fn past(&self) -> impl Iterator<Item = &HistoryRecord> {
        self.past.iter()
    }

    /// Future records, next-to-redo first.
    pub fn future(&self) -> impl Iterator<Item = &HistoryRecord> {
        self.future.iter()
    }

    /// Appends `record` to the past, evicting the oldest record when full.
    /// Empty records are ignored.
    pub fn add_past(&mut self, record: HistoryRecord) {
        if record.is_empty() || self.limit == 0 {
            return;
        }
        while self.past.len() >= self.limit {
            if let Some(evicted) = self.past.pop_front() {
                trace!(action = %evicted.action_tag, "evicted oldest history record");
            }
        }
        self.past.push_back(record);
    }

    /// Pushes `record` onto the front of the future. Empty records are ignored.
    pub fn add_future(&mut self, record: HistoryRecord) {
        if record.is_empty() {
            return;
        }
        self.future.push_front(record);
    }

    /// Most recent past record.
    pub fn last(&self) -> Option<&HistoryRecord> {
        self.past.back()
    }

    pub fn pop(&mut self) -> Option<HistoryRecord> {
        self.past.pop_back()
    }

    /// Most recent future record.
    pub fn next(&self) -> Option<&HistoryRecord> {
        self.future.front()
    }

    pub fn shift(&mut self) -> Option<HistoryRecord> {
        self.future.pop_front()
    }

    /// Overwrites the most recent past record. No-op when the past is empty
    /// or `record` is empty.
    pub fn replace_last(&mut self, record: HistoryRecord) {
        if record.is_empty() {
            return;
        }
        if let Some(last) = self.past.back_mut() {
            *last = record;
        }
    }

    pub fn clear_future(&mut self) {
        self.future.clear();
    }

    /// Resets the present to the empty marker and drops both stacks.
    pub fn clear(&mut self) {
        self.present = empty_marker();
        self.past.clear();
        self.future.clear();
    }

    /// True iff nothing is loaded and there is no history.
    pub fn is_empty(&self) -> bool {
        is_empty_marker(&self.present) && self.past.is_empty() && self.future.is_empty()
    }
}
