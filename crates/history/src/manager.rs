//! The public undo/redo facade used by edit-triggering code.

use serde_json::Value;

use crate::action::Action;
use crate::clock::{Clock, SystemClock};
use crate::config::HistoryConfig;
use crate::reducer::{HistoryReducer, Reducer};
use crate::registry::UndoActionRegistry;
use crate::store::HistoryStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryEventKind {
    Undo,
    Redo,
}

/// Emitted to subscribers after every successful undo or redo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEvent {
    pub kind: HistoryEventKind,
    /// Tag of the record that was undone or redone.
    pub action_tag: String,
    pub can_undo: bool,
    pub can_redo: bool,
}

/// Handle returned by [`HistoryManager::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&HistoryEvent) + Send>;

/// Owns a [`HistoryReducer`] and notifies observers when history moves.
pub struct HistoryManager<R, C = SystemClock> {
    history: HistoryReducer<R, C>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl<R: Reducer> HistoryManager<R, SystemClock> {
    pub fn new(reducer: R, config: HistoryConfig) -> Self {
        Self::from_reducer(HistoryReducer::new(reducer, config))
    }
}

impl<R: Reducer, C: Clock> HistoryManager<R, C> {
    pub fn with_clock(reducer: R, clock: C, config: HistoryConfig) -> Self {
        Self::from_reducer(HistoryReducer::with_clock(reducer, clock, config))
    }

    pub fn from_reducer(history: HistoryReducer<R, C>) -> Self {
        Self { history, observers: Vec::new(), next_subscription: 0 }
    }

    /// Registers action types as undoable.
    pub fn register<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.history.registry_mut().add(tags);
    }

    pub fn registry(&self) -> &UndoActionRegistry {
        self.history.registry()
    }

    pub fn registry_mut(&mut self) -> &mut UndoActionRegistry {
        self.history.registry_mut()
    }

    pub fn store(&self) -> &HistoryStore {
        self.history.store()
    }

    pub fn present(&self) -> &Value {
        self.history.present()
    }

    /// Loads the initial document, discarding any history.
    pub fn load(&mut self, doc: Value) {
        self.history.load(doc);
    }

    /// Drops the document and all history.
    pub fn reset(&mut self) {
        self.history.load(crate::store::empty_marker());
    }

    /// Dispatches `action`. `UNDO` and `REDO` notify subscribers like
    /// [`undo`](Self::undo) and [`redo`](Self::redo) do.
    pub fn dispatch(&mut self, action: &Action) -> Result<&Value, R::Error> {
        if action.is_undo() {
            self.undo();
        } else if action.is_redo() {
            self.redo();
        } else {
            self.history.dispatch(action)?;
        }
        Ok(self.history.present())
    }

    /// Steps back one record. Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        if !self.history.undo() {
            return false;
        }
        let tag = self.history.store().next().map(|r| r.action_tag.clone());
        self.notify(HistoryEventKind::Undo, tag.unwrap_or_default());
        true
    }

    /// Re-applies the most recently undone record. Returns false if there was
    /// nothing to redo.
    pub fn redo(&mut self) -> bool {
        if !self.history.redo() {
            return false;
        }
        let tag = self.history.store().last().map(|r| r.action_tag.clone());
        self.notify(HistoryEventKind::Redo, tag.unwrap_or_default());
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.store().past_len() > 0
    }

    pub fn can_redo(&self) -> bool {
        self.history.store().future_len() > 0
    }

    /// Calls `observer` after every successful undo or redo.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&HistoryEvent) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes a subscription. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    fn notify(&mut self, kind: HistoryEventKind, action_tag: String) {
        if self.observers.is_empty() {
            return;
        }
        let event = HistoryEvent {
            kind,
            action_tag,
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        };
        for (_, observer) in &mut self.observers {
            observer(&event);
        }
    }
}
