//! Branch folding via variable-status dataflow (spec §4.3).

use keel_ir::CfGraph;

use crate::fixpoint::FixpointResult;
use crate::lattice::Status;

/// Fold every branch whose condition is known constant at the end of its
/// block into an unconditional jump. Never deletes a block — that is
/// `unreachable::remove_unreachable_blocks`'s job (spec §4.3: "No block
/// deletion here; that is the next pass's job.").
pub fn fold_branches(graph: &mut CfGraph, fixpoint: &FixpointResult) {
    let end = graph.end_block;
    let mut folded = 0u32;

    for block in graph.block_ids() {
        if block == end {
            continue;
        }
        let (var, iftrue, iffalse) = {
            let b = graph.block(block);
            let branch = b
                .branch
                .as_ref()
                .expect("non-end block must end in a branch (spec §3)");
            (branch.var, branch.iftrue, branch.iffalse)
        };
        if iftrue == iffalse {
            continue;
        }

        match fixpoint.status_at_block_end(block, var) {
            Status::True => {
                graph.block_mut(block).branch.as_mut().unwrap().iffalse = iftrue;
                folded += 1;
            }
            Status::False => {
                graph.block_mut(block).branch.as_mut().unwrap().iftrue = iffalse;
                folded += 1;
            }
            _ => {}
        }
    }

    if folded > 0 {
        log::debug!(
            "folded {} constant branch(es) in '{}'",
            folded,
            graph.signature.name
        );
    }
}
