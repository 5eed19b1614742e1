//! The dataflow fixpoint engine (spec §4.2).

use std::collections::VecDeque;

use keel_entity::EntityRef;
use keel_ir::{BlockId, CfGraph, ControlFlowGraph, Local};

use crate::lattice::{self, merge_vector, merge_vector_in_place, Status, StatusVector};

/// `result[block][local]` = status at the **end** of `block`, after the
/// fixpoint has converged.
pub struct FixpointResult {
    result: Vec<StatusVector>,
}

impl FixpointResult {
    pub fn status_at_block_end(&self, block: BlockId, local: Local) -> Status {
        self.result[block.index()]
            .get(local.index())
            .copied()
            .unwrap_or(Status::Unvisited)
    }

    fn end_vector(&self, block: BlockId) -> &StatusVector {
        &self.result[block.index()]
    }
}

/// Compute the in-status of `block`: the entry-block initialization for the
/// entry block, or the merge of every predecessor's end-of-block status
/// otherwise (spec §4.2 step 1). Shared between the fixpoint loop itself
/// and the undefined-use pass (spec §4.7), which needs the same
/// in-status to start its instruction-by-instruction walk.
pub fn block_in_status(
    graph: &CfGraph,
    cfg: &ControlFlowGraph,
    result: &FixpointResult,
    block: BlockId,
) -> StatusVector {
    if block == graph.entry_block() {
        lattice::entry_in_status(graph)
    } else {
        let n = graph.local_slot_count();
        let mut temp = vec![Status::Unvisited; n];
        for &pred in cfg.predecessors(block) {
            temp = merge_vector(&temp, result.end_vector(pred));
        }
        temp
    }
}

/// Run the monotone dataflow fixpoint over `graph` (spec §4.2).
pub fn run(graph: &CfGraph, cfg: &ControlFlowGraph) -> FixpointResult {
    let n = graph.local_slot_count();
    let mut result = FixpointResult {
        result: vec![vec![Status::Unvisited; n]; graph.block_count()],
    };

    let mut worklist: VecDeque<BlockId> = VecDeque::new();
    worklist.push_back(graph.entry_block());
    let mut iterations = 0u64;

    while let Some(block) = worklist.pop_front() {
        iterations += 1;
        let mut temp = block_in_status(graph, cfg, &result, block);
        for inst in &graph.block(block).instructions {
            lattice::step(&mut temp, graph, inst);
        }

        let changed = merge_vector_in_place(&mut result.result[block.index()], &temp);
        if changed && block != graph.end_block {
            for succ in graph.block(block).successors() {
                worklist.push_back(succ);
            }
        }
    }

    log::trace!(
        "fixpoint converged for '{}' after {} block visits ({} blocks, {} locals)",
        graph.signature.name,
        iterations,
        graph.block_count(),
        n
    );

    result
}
