//! Missing-return diagnosis (spec §4.5).

use keel_diag::DiagnosticSink;
use keel_ir::CfGraph;

use crate::fixpoint::FixpointResult;
use crate::lattice::Status;

/// Only applies when the function declares a return type. Reads the status
/// of the `return` slot at the end of `end_block` from a fixpoint computed
/// **after** branch folding and unreachable-block removal have both run.
/// Unreachable-block removal compacts the block list and renumbers every
/// surviving `BlockId` (`unreachable::compact_blocks`), so a fixpoint
/// computed on the pre-removal graph is stale in two ways: its indices no
/// longer line up with the current `all_blocks`, and its merged values
/// still include contributions from edges (e.g. a folded-away branch to a
/// block that never set `return`) that no longer exist. The caller
/// (`simplify::simplify`) is responsible for recomputing the fixpoint on
/// the already-folded, already-compacted graph before calling this.
pub fn diagnose_missing_return(
    graph: &CfGraph,
    fixpoint: &FixpointResult,
    sink: &mut impl DiagnosticSink,
) {
    let Some(return_type) = graph.signature.return_type.clone() else {
        return;
    };
    let Some(return_slot) = graph.return_slot else {
        debug_assert!(
            false,
            "a value-returning signature must have a return slot (spec §3)"
        );
        return;
    };

    match fixpoint.status_at_block_end(graph.end_block, return_slot) {
        Status::PossiblyUndefined => sink.warning(
            graph.signature.return_type_location.clone(),
            format!(
                "function '{}' doesn't seem to return a value in all cases",
                graph.signature.name
            ),
        ),
        Status::Undefined => sink.error(
            graph.signature.return_type_location.clone(),
            format!(
                "function '{}' must return a value, because it is defined with '-> {}'",
                graph.signature.name, return_type
            ),
        ),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixpoint;
    use keel_diag::CollectingSink;
    use keel_ir::{
        CfInstruction, Constant, ControlFlowGraph, LocalVariable, Location, Signature, Type,
    };

    fn sig(ret: Type) -> Signature {
        Signature {
            name: "f".into(),
            params: vec![],
            return_type: Some(ret),
            return_type_location: Location::new("t.c", 1),
        }
    }

    /// `def f(b: bool) -> int: if b: return 1` (spec §8 scenario 3).
    #[test]
    fn possibly_missing_return_warns() {
        let mut g = CfGraph::new(sig(Type::SignedInt(32)));
        let ret = g.add_return_slot(Type::SignedInt(32));
        let b = g.add_local(LocalVariable::new("b", Type::Bool, true));
        let then_b = g.push_block();
        let end = g.push_block();
        g.end_block = end;

        g.block_mut(g.entry_block()).set_conditional(b, then_b, end);
        g.block_mut(then_b).instructions.push(CfInstruction::constant(
            ret,
            Constant::Integer {
                value: 1,
                width: 32,
                signed: true,
            },
            Location::new("t.c", 1),
        ));
        g.block_mut(then_b).set_jump(b, end);

        let cfg = ControlFlowGraph::compute(&g);
        let fp = fixpoint::run(&g, &cfg);
        let mut sink = CollectingSink::new();
        diagnose_missing_return(&g, &fp, &mut sink);

        assert_eq!(sink.warnings().count(), 1);
        assert!(sink
            .warnings()
            .next()
            .unwrap()
            .message
            .contains("doesn't seem to return a value in all cases"));
        assert!(!sink.had_error());
    }

    /// `def f() -> int: pass` (spec §8 scenario 4).
    #[test]
    fn definitely_missing_return_errors() {
        let mut g = CfGraph::new(sig(Type::SignedInt(32)));
        let _ret = g.add_return_slot(Type::SignedInt(32));
        let end = g.push_block();
        g.end_block = end;
        let dummy = g.add_local(LocalVariable::new("", Type::Bool, false));
        g.block_mut(g.entry_block()).set_jump(dummy, end);

        let cfg = ControlFlowGraph::compute(&g);
        let fp = fixpoint::run(&g, &cfg);
        let mut sink = CollectingSink::new();
        diagnose_missing_return(&g, &fp, &mut sink);

        assert!(sink.had_error());
        assert!(sink
            .errors()
            .next()
            .unwrap()
            .message
            .contains("must return a value"));
    }

    #[test]
    fn returning_on_every_path_is_silent() {
        let mut g = CfGraph::new(sig(Type::SignedInt(32)));
        let ret = g.add_return_slot(Type::SignedInt(32));
        g.block_mut(g.entry_block()).instructions.push(CfInstruction::constant(
            ret,
            Constant::Integer {
                value: 0,
                width: 32,
                signed: true,
            },
            Location::new("t.c", 2),
        ));

        let cfg = ControlFlowGraph::compute(&g);
        let fp = fixpoint::run(&g, &cfg);
        let mut sink = CollectingSink::new();
        diagnose_missing_return(&g, &fp, &mut sink);
        assert_eq!(sink.diagnostics.len(), 0);
    }
}
