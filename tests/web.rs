//! Browser-side smoke tests for the wasm-bindgen surface.
//!
//! Run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use arbor_layout::{compute_tree_layout, compute_tree_positions};
use serde::Serialize;
use serde_json::{Value, json};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn to_js(value: &Value) -> JsValue {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap()
}

fn position(result: &Value, slot: usize) -> (f64, f64) {
    let position = &result["nodes"][slot]["position"];
    (
        position["x"].as_f64().unwrap_or(f64::NAN),
        position["y"].as_f64().unwrap_or(f64::NAN),
    )
}

fn layout(nodes: JsValue, options: JsValue) -> Value {
    let output = compute_tree_layout(nodes, options)
        .unwrap_or_else(|_| panic!("computeTreeLayout threw"));
    serde_wasm_bindgen::from_value(output).unwrap()
}

fn sample_nodes() -> JsValue {
    to_js(&json!([
        { "id": "r", "children": ["a", "b"], "label": "Root" },
        { "id": "a" },
        { "id": "b" }
    ]))
}

#[wasm_bindgen_test]
fn compute_tree_layout_with_default_options() {
    let result = layout(sample_nodes(), JsValue::UNDEFINED);

    assert_eq!(result["root"], json!("r"));
    assert_eq!(position(&result, 0), (25.0, 0.0));
    assert_eq!(result["nodes"][0]["payload"]["label"], json!("Root"));
    assert_eq!(result["nodes"][0]["subtreeIds"], json!(["a", "b"]));
    assert_eq!(result["edges"].as_array().map(Vec::len), Some(2));
}

#[wasm_bindgen_test]
fn compute_tree_layout_horizontal() {
    let options = to_js(&json!({ "horizontal": true, "minimalColumnDistance": 40 }));
    let result = layout(sample_nodes(), options);

    assert_eq!(result["orientation"], json!("horizontal"));
    assert_eq!(position(&result, 2), (100.0, 40.0));
}

#[wasm_bindgen_test]
fn compute_tree_positions_flat() {
    let positions = compute_tree_positions(sample_nodes(), JsValue::NULL)
        .unwrap_or_else(|_| panic!("computeTreePositions threw"));
    assert_eq!(positions.to_vec(), vec![25.0, 0.0, 0.0, 100.0, 50.0, 100.0]);
}

#[wasm_bindgen_test]
fn unknown_root_throws() {
    let options = to_js(&json!({ "rootId": "missing" }));
    assert!(compute_tree_layout(sample_nodes(), options).is_err());
}
