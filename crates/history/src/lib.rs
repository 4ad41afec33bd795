//! Patch-based undo/redo history for JSON documents.
//!
//! A [`HistoryManager`] wraps a domain [`Reducer`]. Actions whose type is in
//! the [`UndoActionRegistry`] are run against a draft of the present
//! document, diffed into forward and inverse patch sets, and stored as
//! [`HistoryRecord`]s; `UNDO` and `REDO` replay those patches. Rapid repeats
//! of the same edit on the same entity coalesce into one record.
//!
//! # Example
//!
//! ```
//! use patch_history::{Action, HistoryConfig, HistoryManager};
//! use serde_json::{json, Value};
//!
//! let mut history = HistoryManager::new(
//!     |draft: &mut Value, action: &Action| {
//!         if action.action_type == "widget/move" {
//!             draft["widgets"]["a"]["x"] = action.payload.clone();
//!         }
//!         Ok::<(), std::convert::Infallible>(())
//!     },
//!     HistoryConfig::default(),
//! );
//! history.register(["widget/move"]);
//! history.load(json!({"widgets": {"a": {"x": 0}}}));
//!
//! history.dispatch(&Action::new("widget/move", json!(10))).unwrap();
//! assert!(history.can_undo());
//!
//! history.undo();
//! assert_eq!(history.present(), &json!({"widgets": {"a": {"x": 0}}}));
//! assert!(history.can_redo());
//! ```

pub mod action;
pub mod clock;
pub mod config;
pub mod manager;
pub mod record;
pub mod reducer;
pub mod registry;
pub mod store;

pub use action::{Action, REDO, UNDO};
pub use clock::{Clock, ManualClock, SystemClock, Timestamp};
pub use config::{HistoryConfig, DEFAULT_DEBOUNCE_MS, DEFAULT_LIMIT};
pub use manager::{HistoryEvent, HistoryEventKind, HistoryManager, SubscriptionId};
pub use record::HistoryRecord;
pub use reducer::{HistoryReducer, Reducer};
pub use registry::UndoActionRegistry;
pub use store::{empty_marker, is_empty_marker, HistoryStore};

pub use patch_history_patch as patch;
pub use patch_history_pointer as pointer;
