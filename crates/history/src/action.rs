//! Dispatched actions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Action type that steps one record back through history.
pub const UNDO: &str = "@@history/UNDO";

/// Action type that re-applies the most recently undone record.
pub const REDO: &str = "@@history/REDO";

/// A `{ type, payload }` value dispatched by the host. The history engine
/// only looks at `action_type`; `payload` is for the domain reducer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub action_type: String,
    #[serde(default)]
    pub payload: Value,
}

impl Action {
    pub fn new(action_type: impl Into<String>, payload: Value) -> Self {
        Self { action_type: action_type.into(), payload }
    }

    /// An action with a `null` payload.
    pub fn of(action_type: impl Into<String>) -> Self {
        Self::new(action_type, Value::Null)
    }

    pub fn undo() -> Self {
        Self::of(UNDO)
    }

    pub fn redo() -> Self {
        Self::of(REDO)
    }

    pub fn is_undo(&self) -> bool {
        self.action_type == UNDO
    }

    pub fn is_redo(&self) -> bool {
        self.action_type == REDO
    }
}
