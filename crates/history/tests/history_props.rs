mod common;

use common::ms;
use patch_history::{Action, HistoryConfig, HistoryManager, ManualClock};
use proptest::prelude::*;
use serde_json::{json, Value};
use std::convert::Infallible;

fn fields_reducer(draft: &mut Value, action: &Action) -> Result<(), Infallible> {
    let p = &action.payload;
    match action.action_type.as_str() {
        "field/set" => {
            let key = p["key"].as_str().unwrap_or_default();
            draft["fields"][key] = p["value"].clone();
        }
        "field/remove" => {
            if let Some(fields) = draft["fields"].as_object_mut() {
                fields.remove(p["key"].as_str().unwrap_or_default());
            }
        }
        "list/push" => {
            if let Some(list) = draft["list"].as_array_mut() {
                list.push(p.clone());
            }
        }
        "list/pop" => {
            if let Some(list) = draft["list"].as_array_mut() {
                list.pop();
            }
        }
        _ => {}
    }
    Ok(())
}

fn arb_action() -> impl Strategy<Value = Action> {
    let key = prop::sample::select(vec!["a", "b", "c"]);
    let value = prop_oneof![
        (0i64..5).prop_map(|n| json!(n)),
        "[xy]{0,2}".prop_map(Value::String),
        Just(json!({"nested": [1, 2]})),
    ];
    prop_oneof![
        (key.clone(), value.clone())
            .prop_map(|(k, v)| Action::new("field/set", json!({"key": k, "value": v}))),
        key.prop_map(|k| Action::new("field/remove", json!({"key": k}))),
        value.prop_map(|v| Action::new("list/push", v)),
        Just(Action::of("list/pop")),
    ]
}

proptest! {
    #[test]
    fn undo_all_restores_initial_and_redo_all_restores_final(
        steps in prop::collection::vec((arb_action(), 0u64..1_000), 0..40)
    ) {
        let clock = ManualClock::new(0);
        let mut history = HistoryManager::with_clock(
            fields_reducer as fn(&mut Value, &Action) -> Result<(), Infallible>,
            clock.clone(),
            HistoryConfig::default(),
        );
        history.register(["field/set", "field/remove", "list/push", "list/pop"]);
        let initial = json!({"fields": {}, "list": []});
        history.load(initial.clone());

        for (action, gap) in &steps {
            history.dispatch(action).unwrap();
            clock.advance(ms(*gap));
        }
        let last = history.present().clone();
        let past = history.store().past_len();
        prop_assert!(past <= steps.len());

        while history.undo() {}
        prop_assert_eq!(history.present(), &initial);
        prop_assert_eq!(history.store().future_len(), past);

        while history.redo() {}
        prop_assert_eq!(history.present(), &last);
        prop_assert_eq!(history.store().past_len(), past);
    }
}
