//! Test suite for the Web and headless browsers.

#![cfg(target_arch = "wasm32")]

extern crate wasm_bindgen_test;
use serde::Serialize;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

use mecha_core::interface::{UnitSnapshot, UpgradePreview, Warning};

wasm_bindgen_test_configure!(run_in_browser);

fn js<T: Serialize>(value: &T) -> JsValue {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap()
}

fn battle_log() -> JsValue {
    js(&serde_json::json!([
        {"turn": 1, "actor_id": "A", "action_type": "MOVE", "message": "",
         "position_snapshot": {"x": 5.0, "y": 0.0, "z": 0.0}},
        {"turn": 1, "actor_id": "A", "action_type": "ATTACK", "target_id": "B", "message": "",
         "position_snapshot": {"x": 5.0, "y": 0.0, "z": 0.0}},
        {"turn": 1, "actor_id": "B", "action_type": "DAMAGE", "damage": 30, "message": "",
         "position_snapshot": {"x": 50.0, "y": 0.0, "z": 0.0}},
        {"turn": 2, "actor_id": "A", "action_type": "ATTACK", "target_id": "B", "damage": 20,
         "message": "クリティカルヒット！"}
    ]))
}

fn unit(id: &str) -> JsValue {
    js(&serde_json::json!({
        "id": id,
        "name": id,
        "max_hp": 100,
        "max_en": 100,
        "position": {"x": 0.0, "y": 0.0, "z": 0.0},
        "weapons": [{"id": "mg", "power": 10, "max_ammo": 2, "en_cost": 45}]
    }))
}

#[wasm_bindgen_test]
fn replay_snapshot_through_js() {
    let replay = mecha_core::Replay::new(battle_log());
    assert_eq!(replay.last_turn(), 2);

    let b: UnitSnapshot =
        serde_wasm_bindgen::from_value(replay.snapshot("B", unit("B"), 2)).unwrap();
    assert_eq!(b.hp(), 50);

    let a: UnitSnapshot =
        serde_wasm_bindgen::from_value(replay.snapshot("A", unit("A"), 2)).unwrap();
    assert_eq!(a.ammo("mg"), Some(0));
    assert!(a.has_warning(Warning::Ammo));
    assert!(a.has_warning(Warning::Energy));
}

#[wasm_bindgen_test]
fn malformed_logs_fall_back_to_the_initial_state() {
    let snapshot = mecha_core::reconstruct_snapshot("A", unit("A"), JsValue::from_str("oops"), 3);
    let snapshot: UnitSnapshot = serde_wasm_bindgen::from_value(snapshot).unwrap();
    assert_eq!(snapshot.hp(), 100);
}

#[wasm_bindgen_test]
fn upgrade_preview_through_js() {
    let suit = js(&serde_json::json!({"max_hp": 0, "armor": 0, "mobility": 1.0}));
    let preview: UpgradePreview =
        serde_wasm_bindgen::from_value(mecha_core::upgrade_preview("hp", suit, 2, 1000.0))
            .unwrap();
    assert_eq!(preview.total_cost, 102);
    assert_eq!(preview.final_value, 20.0);
    assert!(mecha_core::upgrade_preview("luck", JsValue::NULL, 1, 0.0).is_null());
}

#[wasm_bindgen_test]
fn total_pending_cost_through_js() {
    let suit = js(&serde_json::json!({"max_hp": 0, "armor": 10, "mobility": 1.0}));
    let pending = js(&serde_json::json!({"hp": 2, "armor": 0, "luck": 3}));
    assert_eq!(mecha_core::total_pending_cost(suit, pending), 102.0);
    assert_eq!(
        mecha_core::total_pending_cost(JsValue::NULL, JsValue::NULL),
        0.0
    );
}

#[wasm_bindgen_test]
fn rank_and_cost_helpers() {
    assert_eq!(mecha_core::rank_of("hp", 1200.0), "B");
    assert_eq!(mecha_core::rank_of("unknown", 1200.0), "C");
    assert_eq!(mecha_core::step_cost("hp", 0.0), 50.0);
    assert_eq!(mecha_core::max_affordable_steps("hp", 0.0, 102.0), 2);
    assert_eq!(mecha_core::clamp_pending_steps(-3.0, 4), 0);
    assert_eq!(mecha_core::diff_text(0.0), "±0");
}

#[wasm_bindgen_test]
fn replay_from_json_text() {
    let replay = mecha_core::Replay::from_json(
        r#"[{"turn": 4, "actor_id": "A", "action_type": "ATTACK", "target_id": "B", "damage": 15, "message": ""}]"#,
    );
    assert_eq!(replay.last_turn(), 4);
    assert_eq!(mecha_core::Replay::from_json("not json").last_turn(), 0);
}
