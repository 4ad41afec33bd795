#![allow(dead_code)]

use std::convert::Infallible;
use std::time::Duration;

use patch_history::{Action, HistoryConfig, HistoryManager, ManualClock};
use serde_json::{json, Value};

pub const MOVE: &str = "widget/move";
pub const ADD_ITEM: &str = "list/add-item";
pub const SELECT: &str = "ui/select";

pub type EditorReducer = fn(&mut Value, &Action) -> Result<(), Infallible>;
pub type Editor = HistoryManager<EditorReducer, ManualClock>;

/// A tiny editor document reducer: widgets keyed by id, a list of items,
/// and a transient selection that is never undoable.
pub fn editor_reducer(draft: &mut Value, action: &Action) -> Result<(), Infallible> {
    let payload = &action.payload;
    match action.action_type.as_str() {
        MOVE => {
            let id = payload["id"].as_str().unwrap_or_default();
            for axis in ["x", "y"] {
                if let Some(v) = payload.get(axis) {
                    draft["widgets"][id][axis] = v.clone();
                }
            }
        }
        ADD_ITEM => {
            if let Some(items) = draft["items"].as_array_mut() {
                items.push(payload.clone());
            }
        }
        SELECT => {
            draft["selection"] = payload.clone();
        }
        _ => {}
    }
    Ok(())
}

pub fn initial_doc() -> Value {
    json!({
        "widgets": {
            "widgetA": {"x": 0},
            "widgetB": {"x": 100},
            "widgetC": {"x": 0, "y": 0}
        },
        "items": [],
        "selection": null
    })
}

pub fn editor(config: HistoryConfig) -> (Editor, ManualClock) {
    let clock = ManualClock::new(1_000_000);
    let mut editor = HistoryManager::with_clock(
        editor_reducer as EditorReducer,
        clock.clone(),
        config,
    );
    editor.register([MOVE, ADD_ITEM]);
    editor.load(initial_doc());
    (editor, clock)
}

pub fn move_to(id: &str, x: i64) -> Action {
    Action::new(MOVE, json!({"id": id, "x": x}))
}

pub fn move_axis(id: &str, axis: &str, v: i64) -> Action {
    let mut payload = json!({"id": id});
    payload[axis] = json!(v);
    Action::new(MOVE, payload)
}

pub fn x_of(editor: &Editor, id: &str) -> Value {
    editor.present()["widgets"][id]["x"].clone()
}

pub fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}
