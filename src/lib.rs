//! Arbor Layout - tidy tree layout for rooted trees.
//!
//! Computes planar positions for every node of an ordered rooted tree:
//! nodes sit in bands by depth, sibling subtrees keep a minimum gap at every
//! depth they share, and parents are centered over their children. The same
//! input and options always produce the same output.
//!
//! The crate compiles to WebAssembly and exposes a JavaScript-friendly API
//! via wasm-bindgen, and is equally usable as a plain Rust library.
//!
//! # Architecture
//!
//! - `tree`: input records and the arena-backed rooted tree
//! - `layout`: the tidy tree passes, options, orientation and results
//! - `error`: the error type shared by all stages

use js_sys::Float32Array;
use serde::Serialize;
use wasm_bindgen::prelude::*;

pub mod error;
pub mod layout;
pub mod tree;

pub use error::LayoutError;
pub use layout::{
    LayoutOptions, LayoutResult, NodePlacement, Orientation, Position, PositionedNode,
    TidyTreeLayout, TreeEdge, compute_layout,
};
pub use tree::{DropReason, DroppedReference, NodeRecord};

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn parse_input(
    nodes: JsValue,
    options: JsValue,
) -> Result<(Vec<NodeRecord>, LayoutOptions), JsError> {
    let records: Vec<NodeRecord> =
        serde_wasm_bindgen::from_value(nodes).map_err(|e| JsError::new(&e.to_string()))?;
    let options: LayoutOptions = if options.is_undefined() || options.is_null() {
        LayoutOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options).map_err(|e| JsError::new(&e.to_string()))?
    };
    Ok((records, options))
}

fn run(records: &[NodeRecord], options: &LayoutOptions) -> Result<LayoutResult, JsError> {
    let result = compute_layout(records, options)?;
    for dropped in result.dropped_references() {
        web_sys::console::warn_1(&JsValue::from_str(&format!(
            "tree layout: dropped child reference {} -> {} ({:?})",
            dropped.parent, dropped.child, dropped.reason
        )));
    }
    Ok(result)
}

/// Compute a tidy tree layout.
///
/// Takes an array of node records `{ id, children, ...payload }` and an
/// optional options object `{ rootId, horizontal, minimalColumnDistance,
/// minimalRowDistance }`. Returns `{ root, orientation, nodes, edges,
/// droppedReferences }` where `nodes` follows the input order and each entry
/// carries `position`, `placement`, `subtreeIds` and the caller payload.
///
/// Throws when no unique root can be resolved or an option is out of range.
#[wasm_bindgen(js_name = computeTreeLayout)]
pub fn compute_tree_layout(nodes: JsValue, options: JsValue) -> Result<JsValue, JsError> {
    let (records, options) = parse_input(nodes, options)?;
    let result = run(&records, &options)?;

    result
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsError::new(&e.to_string()))
}

/// Compute a tidy tree layout and return only the positions.
///
/// Returns a Float32Array `[x0, y0, x1, y1, ...]` in input order; nodes not
/// reachable from the root get NaN.
#[wasm_bindgen(js_name = computeTreePositions)]
pub fn compute_tree_positions(nodes: JsValue, options: JsValue) -> Result<Float32Array, JsError> {
    let (records, options) = parse_input(nodes, options)?;
    let result = run(&records, &options)?;

    Ok(Float32Array::from(&result.positions_flat()[..]))
}
