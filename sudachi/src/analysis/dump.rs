/*
 *  Copyright (c) 2021 Works Applications Co., Ltd.
 *
 *  Licensed under the Apache License, Version 2.0 (the "License");
 *  you may not use this file except in compliance with the License.
 *  You may obtain a copy of the License at
 *
 *      http://www.apache.org/licenses/LICENSE-2.0
 *
 *   Unless required by applicable law or agreed to in writing, software
 *  distributed under the License is distributed on an "AS IS" BASIS,
 *  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *  See the License for the specific language governing permissions and
 *  limitations under the License.
 */

//! JSON serialization of a [`Lattice`], for the `dumpInternalStructures`
//! debug operation.
//!
//! BOS and EOS are synthetic and carry no surface text, so they are left
//! out of `nodes`; every other candidate node ending at every boundary is
//! included, whether or not it ended up on the best path.

use serde_json::{json, Value};

use crate::analysis::inner::{Node, NodeIdx};
use crate::analysis::lattice::Lattice;
use crate::analysis::node::{LatticeNode, RightId};
use crate::input_text::InputBuffer;

fn node_surface(node: &Node, input: &InputBuffer) -> String {
    if node.is_oov() {
        input.curr_slice_c(node.char_range()).to_owned()
    } else {
        input.orig_slice_c(node.char_range()).to_owned()
    }
}

fn node_to_json(node: &Node, total_cost: i32, connected: bool, input: &InputBuffer) -> Value {
    let surface = node_surface(node, input);
    json!({
        "begin": node.begin(),
        "end": node.end(),
        "wordId": node.word_id().as_raw(),
        "surface": surface,
        "dictionaryId": node.word_id().dic(),
        "isOOV": node.is_oov(),
        "leftId": node.left_id(),
        "rightId": node.right_id(),
        "cost": node.cost(),
        "totalCost": if connected { Value::from(total_cost) } else { Value::Null },
        "isConnectedToBOS": connected,
    })
}

/// Produces the lattice-dump JSON object described by the dictionary format
/// specification: `{text, nodes[], bestPath[]}`. `best_path` is the list of
/// `NodeIdx` returned by [`Lattice::fill_top_path`] (still end-to-begin
/// order; this function does not reverse it, matching the debug intent of
/// showing exactly what the Viterbi pass walked).
pub fn dump_lattice_json(
    lattice: &Lattice,
    best_path: &[NodeIdx],
    text: &str,
    input: &InputBuffer,
) -> Value {
    let mut nodes = Vec::new();
    for boundary in 0..lattice.size() {
        for (index, node) in lattice.nodes_at(boundary).iter().enumerate() {
            if node.is_special_node() {
                continue;
            }
            let total_cost = lattice.total_cost_at(boundary, index);
            let connected = total_cost != i32::MAX;
            nodes.push(node_to_json(node, total_cost, connected, input));
        }
    }

    let best_path: Vec<Value> = best_path
        .iter()
        .filter_map(|idx| {
            let node = lattice.node_at(idx.clone());
            if node.is_special_node() {
                None
            } else {
                let total_cost = lattice.total_cost_at(idx.end() as usize, idx.index() as usize);
                let connected = total_cost != i32::MAX;
                Some(node_to_json(node, total_cost, connected, input))
            }
        })
        .collect();

    json!({
        "text": text,
        "nodes": nodes,
        "bestPath": best_path,
    })
}
