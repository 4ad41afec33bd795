//! The history-aware reducer wrapper.
//!
//! [`HistoryReducer::dispatch`] routes every action through one of four paths:
//!
//! - `UNDO` replays the inverse patches of the most recent past record and
//!   moves that record to the future.
//! - `REDO` replays the forward patches of the next future record and moves
//!   it back to the past.
//! - An unregistered action runs the domain reducer and leaves history alone.
//! - A registered action runs the domain reducer on a draft, diffs the
//!   result, clears the future and either pushes a new record or merges into
//!   the last one when the edit repeats the previous one within the debounce
//!   window.

use serde_json::Value;
use tracing::{debug, trace};

use patch_history_patch::{apply_patches, apply_patches_owned, diff, is_similar, produce, Produced};

use crate::action::{Action, REDO, UNDO};
use crate::clock::{Clock, SystemClock};
use crate::config::HistoryConfig;
use crate::record::HistoryRecord;
use crate::registry::UndoActionRegistry;
use crate::store::{is_empty_marker, HistoryStore};

/// A domain reducer: mutates a draft document in response to an action.
pub trait Reducer {
    type Error;

    fn reduce(&mut self, draft: &mut Value, action: &Action) -> Result<(), Self::Error>;
}

impl<F, E> Reducer for F
where
    F: FnMut(&mut Value, &Action) -> Result<(), E>,
{
    type Error = E;

    fn reduce(&mut self, draft: &mut Value, action: &Action) -> Result<(), E> {
        self(draft, action)
    }
}

/// Wraps a domain reducer with undo/redo history.
pub struct HistoryReducer<R, C = SystemClock> {
    store: HistoryStore,
    registry: UndoActionRegistry,
    reducer: R,
    clock: C,
    config: HistoryConfig,
}

impl<R: Reducer> HistoryReducer<R, SystemClock> {
    pub fn new(reducer: R, config: HistoryConfig) -> Self {
        Self::with_clock(reducer, SystemClock, config)
    }
}

impl<R: Reducer, C: Clock> HistoryReducer<R, C> {
    pub fn with_clock(reducer: R, clock: C, config: HistoryConfig) -> Self {
        Self {
            store: HistoryStore::new(config.limit),
            registry: UndoActionRegistry::new(),
            reducer,
            clock,
            config,
        }
    }

    pub fn store(&self) -> &HistoryStore {
        &self.store
    }

    pub fn registry(&self) -> &UndoActionRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut UndoActionRegistry {
        &mut self.registry
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    pub fn present(&self) -> &Value {
        self.store.present()
    }

    /// Replaces the present document and discards all history.
    pub fn load(&mut self, doc: Value) {
        self.store.clear();
        self.store.set_present(doc);
    }

    /// Applies `action` and returns the resulting document.
    ///
    /// Errors from the domain reducer are returned unchanged; the present
    /// document and history are left as they were.
    pub fn dispatch(&mut self, action: &Action) -> Result<&Value, R::Error> {
        match action.action_type.as_str() {
            UNDO => {
                self.undo();
            }
            REDO => {
                self.redo();
            }
            tag if !self.registry.has(tag) => {
                trace!(action = tag, "action not registered, bypassing history");
                let mut draft = self.store.present().clone();
                self.reducer.reduce(&mut draft, action)?;
                self.store.set_present(draft);
            }
            _ => self.record(action)?,
        }
        Ok(self.store.present())
    }

    /// Steps back one record. Returns false if there was nothing to undo.
    ///
    /// # Panics
    ///
    /// Panics if the record's inverse patches no longer apply to the present
    /// document.
    pub fn undo(&mut self) -> bool {
        if is_empty_marker(self.store.present()) {
            trace!("undo ignored, nothing loaded");
            return false;
        }
        let Some(last) = self.store.last() else {
            trace!("undo ignored, past is empty");
            return false;
        };
        let doc = apply_patches(self.store.present(), &last.inverse_patches);
        self.store.set_present(doc);
        if let Some(record) = self.store.pop() {
            debug!(action = %record.action_tag, past = self.store.past_len(), "undo");
            self.store.add_future(record);
        }
        true
    }

    /// Re-applies the most recently undone record. Returns false if there was
    /// nothing to redo.
    ///
    /// # Panics
    ///
    /// Panics if the record's patches no longer apply to the present document.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.store.next() else {
            trace!("redo ignored, future is empty");
            return false;
        };
        if self.store.limit() == 0 {
            trace!("redo ignored, past cannot hold records");
            return false;
        }
        let doc = apply_patches(self.store.present(), &next.patches);
        self.store.set_present(doc);
        if let Some(record) = self.store.shift() {
            debug!(action = %record.action_tag, future = self.store.future_len(), "redo");
            self.store.add_past(record);
        }
        true
    }

    fn record(&mut self, action: &Action) -> Result<(), R::Error> {
        let reducer = &mut self.reducer;
        let produced = produce(self.store.present(), |draft| reducer.reduce(draft, action))?;
        if produced.is_unchanged() {
            trace!(action = %action.action_type, "action produced no changes");
            return Ok(());
        }
        let Produced { doc, patches, inverse_patches } = produced;
        let record = HistoryRecord::new(
            patches,
            inverse_patches,
            action.action_type.clone(),
            self.clock.now(),
        );
        let previous = self.store.set_present(doc);
        self.store.clear_future();

        if self.should_merge(&record) {
            self.merge(previous, record);
        } else {
            debug!(
                action = %record.action_tag,
                patches = record.patches.len(),
                past = self.store.past_len() + 1,
                "recorded history entry"
            );
            self.store.add_past(record);
        }
        Ok(())
    }

    fn should_merge(&self, record: &HistoryRecord) -> bool {
        let Some(last) = self.store.last() else {
            return false;
        };
        last.action_tag == record.action_tag
            && is_similar(&last.last_tick, &record.patches)
            && record.created_at.saturating_sub(last.created_at) < self.config.debounce_ms
    }

    /// Folds `record` into the last past record. The merged record spans from
    /// the document before the last record to the current present, so one
    /// undo reverts the whole burst.
    fn merge(&mut self, previous: Value, record: HistoryRecord) {
        let Some(last) = self.store.last() else {
            self.store.add_past(record);
            return;
        };
        let base = apply_patches_owned(previous, &last.inverse_patches);
        let (patches, inverse_patches) = diff(&base, self.store.present());
        if patches.is_empty() {
            debug!(action = %record.action_tag, "merged edits cancel out, dropping record");
            self.store.pop();
            return;
        }
        debug!(action = %record.action_tag, patches = patches.len(), "merged into last history entry");
        self.store.replace_last(
            HistoryRecord::new(patches, inverse_patches, record.action_tag, record.created_at)
                .with_last_tick(record.patches),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use patch_history_patch::Patch;
    use serde_json::json;
    use std::convert::Infallible;
    use std::time::Duration;

    fn set_title(draft: &mut Value, action: &Action) -> Result<(), Infallible> {
        if action.action_type == "doc/title" {
            draft["title"] = action.payload.clone();
        }
        Ok(())
    }

    fn reducer() -> (HistoryReducer<fn(&mut Value, &Action) -> Result<(), Infallible>, ManualClock>, ManualClock) {
        let clock = ManualClock::new(0);
        let mut history = HistoryReducer::with_clock(
            set_title as fn(&mut Value, &Action) -> Result<(), Infallible>,
            clock.clone(),
            HistoryConfig::default(),
        );
        history.registry_mut().add(["doc/title"]);
        history.load(json!({"title": "a"}));
        (history, clock)
    }

    #[test]
    fn registered_edit_is_recorded() {
        let (mut history, _) = reducer();
        let doc = history.dispatch(&Action::new("doc/title", json!("b"))).unwrap();
        assert_eq!(doc, &json!({"title": "b"}));
        assert_eq!(history.store().past_len(), 1);
        assert_eq!(history.store().last().unwrap().action_tag, "doc/title");
    }

    #[test]
    fn no_change_is_not_recorded() {
        let (mut history, _) = reducer();
        history.dispatch(&Action::new("doc/title", json!("a"))).unwrap();
        assert_eq!(history.store().past_len(), 0);
    }

    #[test]
    fn undo_on_unloaded_store_is_noop() {
        let mut history = HistoryReducer::new(set_title, HistoryConfig::default());
        assert!(!history.undo());
        assert!(!history.redo());
        assert!(history.store().is_empty());
    }

    #[test]
    fn merge_back_to_start_drops_record() {
        let (mut history, clock) = reducer();
        history.dispatch(&Action::new("doc/title", json!("b"))).unwrap();
        clock.advance(Duration::from_millis(100));
        history.dispatch(&Action::new("doc/title", json!("a"))).unwrap();
        assert_eq!(history.store().past_len(), 0);
        assert_eq!(history.present(), &json!({"title": "a"}));
    }

    #[test]
    fn merge_compares_against_the_latest_edit() {
        let (mut history, clock) = reducer();
        history.dispatch(&Action::new("doc/title", json!("b"))).unwrap();
        clock.advance(Duration::from_millis(100));
        history.dispatch(&Action::new("doc/title", json!("c"))).unwrap();

        let last = history.store().last().unwrap();
        assert_eq!(last.created_at, 100);
        assert_eq!(last.last_tick, vec![Patch::replace(vec!["title".into()], json!("c"))]);
        assert_eq!(last.inverse_patches, vec![Patch::replace(vec!["title".into()], json!("a"))]);
    }

    #[test]
    fn redo_with_zero_limit_keeps_the_record() {
        let clock = ManualClock::new(0);
        let mut history = HistoryReducer::with_clock(
            set_title as fn(&mut Value, &Action) -> Result<(), Infallible>,
            clock,
            HistoryConfig::default().with_limit(0),
        );
        history.load(json!({"title": "a"}));
        history.store.add_future(HistoryRecord::new(
            vec![Patch::replace(vec!["title".into()], json!("b"))],
            vec![Patch::replace(vec!["title".into()], json!("a"))],
            "doc/title",
            0,
        ));

        assert!(!history.redo());
        assert_eq!(history.store().future_len(), 1);
        assert_eq!(history.present(), &json!({"title": "a"}));
    }

    #[test]
    fn reducer_error_leaves_state_untouched() {
        let mut history = HistoryReducer::new(
            |draft: &mut Value, _: &Action| {
                draft["half"] = json!(true);
                Err::<(), _>("boom")
            },
            HistoryConfig::default(),
        );
        history.registry_mut().add(["doc/edit"]);
        history.load(json!({"a": 1}));
        assert_eq!(history.dispatch(&Action::of("doc/edit")), Err("boom"));
        assert_eq!(history.dispatch(&Action::of("ui/other")), Err("boom"));
        assert_eq!(history.present(), &json!({"a": 1}));
        assert_eq!(history.store().past_len(), 0);
    }

    #[test]
    #[should_panic(expected = "patch set does not apply")]
    fn undo_after_shape_divergence_panics() {
        let mut history = HistoryReducer::new(
            |draft: &mut Value, action: &Action| {
                match action.action_type.as_str() {
                    "doc/set" => draft["nested"] = json!({"x": 1}),
                    _ => *draft = json!({"other": true}),
                }
                Ok::<(), Infallible>(())
            },
            HistoryConfig::default(),
        );
        history.registry_mut().add(["doc/set"]);
        history.load(json!({"nested": {"x": 0}}));
        history.dispatch(&Action::of("doc/set")).unwrap();
        // Unregistered action rewrites the document behind history's back.
        history.dispatch(&Action::of("ui/reset")).unwrap();
        history.undo();
    }
}
