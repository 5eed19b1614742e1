//! Unreachable-block removal and grouped "this code will never run"
//! warnings (spec §4.4).

use std::collections::{HashMap, HashSet};

use keel_diag::DiagnosticSink;
use keel_entity::EntityRef;
use keel_ir::{BlockId, CfGraph};

use crate::dsu::UnionFind;

fn compute_reachable(graph: &CfGraph) -> HashSet<BlockId> {
    let mut reachable = HashSet::new();
    let mut stack = vec![graph.entry_block()];
    reachable.insert(graph.entry_block());
    while let Some(b) = stack.pop() {
        for succ in graph.block(b).successors() {
            if reachable.insert(succ) {
                stack.push(succ);
            }
        }
    }
    reachable
}

/// Remove every block unreachable from the entry, emitting one grouped
/// warning per connected component of the unreachable subgraph, then
/// compact the block list. `end_block` is always retained (spec §4.4),
/// even if the traversal found it unreachable.
pub fn remove_unreachable_blocks(graph: &mut CfGraph, sink: &mut impl DiagnosticSink) {
    let reachable = compute_reachable(graph);
    let unreachable: Vec<BlockId> = graph
        .block_ids()
        .filter(|b| !reachable.contains(b))
        .collect();
    if unreachable.is_empty() {
        return;
    }

    let mut uf = UnionFind::new(graph.block_count());
    for &b in &unreachable {
        for succ in graph.block(b).successors() {
            if !reachable.contains(&succ) {
                uf.union(b.index(), succ.index());
            }
        }
    }

    let mut groups: HashMap<usize, Vec<BlockId>> = HashMap::new();
    for &b in &unreachable {
        groups.entry(uf.find(b.index())).or_default().push(b);
    }

    let mut warned_lines: HashSet<u32> = HashSet::new();
    // Stable iteration order (group members are already in block order, and
    // we pick groups by their lowest-indexed member) so warning order is
    // deterministic across runs.
    let mut group_keys: Vec<usize> = groups.keys().copied().collect();
    group_keys.sort_by_key(|k| groups[k].iter().map(|b| b.index()).min().unwrap());

    for key in group_keys {
        let blocks = &groups[&key];
        let earliest = blocks
            .iter()
            .flat_map(|&b| graph.block(b).instructions.iter())
            .filter(|inst| !inst.hide_unreachable_warning)
            .map(|inst| &inst.location)
            .min();
        if let Some(loc) = earliest {
            if warned_lines.insert(loc.line) {
                sink.warning(loc.clone(), "this code will never run");
            }
        }
    }

    log::debug!(
        "removing {} unreachable block(s) in '{}'",
        unreachable.len(),
        graph.signature.name
    );

    let keep: HashSet<BlockId> = graph
        .block_ids()
        .filter(|b| reachable.contains(b) || *b == graph.end_block)
        .collect();
    compact_blocks(graph, &keep);
}

fn compact_blocks(graph: &mut CfGraph, keep: &HashSet<BlockId>) {
    let mut mapping: HashMap<BlockId, BlockId> = HashMap::new();
    let mut new_blocks = Vec::with_capacity(keep.len());
    for old in graph.block_ids() {
        if keep.contains(&old) {
            let new_id = BlockId::new(new_blocks.len());
            mapping.insert(old, new_id);
            new_blocks.push(std::mem::take(graph.block_mut(old)));
        }
    }
    for block in new_blocks.iter_mut() {
        if let Some(branch) = block.branch.as_mut() {
            branch.iftrue = mapping[&branch.iftrue];
            branch.iffalse = mapping[&branch.iffalse];
        }
    }
    graph.end_block = mapping[&graph.end_block];
    graph.all_blocks = new_blocks;
    debug_assert_eq!(graph.entry_block(), BlockId::new(0));
}
