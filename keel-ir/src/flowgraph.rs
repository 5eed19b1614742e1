//! Predecessor/successor queries over a `CfGraph`, computed on demand.
//!
//! Mirrors `cranelift-codegen`'s `flowgraph.rs`: successors are already
//! explicit on each block's `Branch`, so the only derived structure that is
//! worth caching is the predecessor list, which every block needs to look
//! up during the dataflow merge step (spec §4.2).

use keel_entity::SecondaryMap;

use crate::entities::BlockId;
use crate::function::CfGraph;

#[derive(Clone, Default)]
struct CfgNode {
    predecessors: Vec<BlockId>,
}

/// A computed, read-only view of a `CfGraph`'s edges.
///
/// Callers recompute this after any pass that rewires branches or removes
/// blocks (branch folding, unreachable-block removal); it is never mutated
/// in place, unlike the teacher's incrementally-updatable version, because
/// every pass here either replaces the whole graph's reachable set or the
/// branch targets of a handful of blocks and a full recompute is cheap at
/// the scale (<=100 blocks) spec §8 calls out.
pub struct ControlFlowGraph {
    data: SecondaryMap<BlockId, CfgNode>,
}

impl ControlFlowGraph {
    pub fn compute(func: &CfGraph) -> Self {
        let mut data: SecondaryMap<BlockId, CfgNode> = SecondaryMap::new();
        for block in func.block_ids() {
            for succ in func.block(block).successors() {
                data[succ].predecessors.push(block);
            }
        }
        Self { data }
    }

    pub fn predecessors(&self, block: BlockId) -> &[BlockId] {
        &self.data[block].predecessors
    }
}
