//! Pass orchestration (spec §4.8).

use keel_diag::DiagnosticSink;
use keel_ir::{CfGraph, CfGraphFile, ControlFlowGraph};

use crate::{branch_fold, dead_locals, fixpoint, missing_return, undefined_use, unreachable};

/// Run the full simplification and diagnostic pipeline over one function,
/// in the fixed order spec §4.8 requires:
///
/// 1. branch-folding fixpoint + rewrite
/// 2. unreachable-block removal (+ grouped warnings)
/// 3. missing-return check
/// 4. dead-local elimination
/// 5. undefined-use diagnostics
///
/// A hard error reported during step 3 stops the remaining steps for this
/// function (spec §7: "the first hard error terminates compilation of the
/// translation unit").
pub fn simplify(graph: &mut CfGraph, sink: &mut impl DiagnosticSink) {
    let cfg = ControlFlowGraph::compute(graph);
    let fixpoint = fixpoint::run(graph, &cfg);

    branch_fold::fold_branches(graph, &fixpoint);
    unreachable::remove_unreachable_blocks(graph, sink);

    // `remove_unreachable_blocks` compacts `all_blocks`, renumbering every
    // surviving `BlockId` from scratch — the fixpoint above was computed
    // against the old numbering (and the old, unfolded edge set), so it is
    // stale for both its block indices and its merged values. Recompute
    // fresh before the missing-return check reads `end_block`'s status.
    let cfg = ControlFlowGraph::compute(graph);
    let fixpoint = fixpoint::run(graph, &cfg);
    missing_return::diagnose_missing_return(graph, &fixpoint, sink);

    if sink.had_error() {
        return;
    }

    dead_locals::eliminate_dead_locals(graph);
    undefined_use::diagnose_undefined_use(graph, sink);
}

/// Apply `simplify` to every function in a translation unit. Graphs may be
/// processed in any order (spec §5); we go in declaration order and stop at
/// the first hard error, matching "the first hard error terminates
/// compilation of the translation unit" (spec §7) rather than continuing to
/// accumulate unrelated diagnostics from functions compilation will never
/// reach.
pub fn simplify_file(file: &mut CfGraphFile, sink: &mut impl DiagnosticSink) {
    for graph in &mut file.graphs {
        simplify(graph, sink);
        if sink.had_error() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keel_diag::CollectingSink;
    use keel_ir::{CfInstruction, Constant, LocalVariable, Location, Signature, Type};

    fn sig(ret: Option<Type>) -> Signature {
        Signature {
            name: "f".into(),
            params: vec![],
            return_type: ret,
            return_type_location: Location::new("t.c", 1),
        }
    }

    /// Full pipeline on spec §8 scenario 1: the else-branch disappears and
    /// exactly one warning is reported, with nothing left referencing the
    /// removed block.
    #[test]
    fn end_to_end_constant_true_if() {
        let mut g = CfGraph::new(sig(None));
        let cond = g.add_local(LocalVariable::new("", Type::Bool, false));
        let then_b = g.push_block();
        let else_b = g.push_block();
        let end = g.push_block();
        g.end_block = end;

        g.block_mut(g.entry_block()).instructions.push(CfInstruction::constant(
            cond,
            Constant::Bool(true),
            Location::new("t.c", 1),
        ));
        g.block_mut(g.entry_block()).set_conditional(cond, then_b, else_b);
        g.block_mut(then_b).set_jump(cond, end);
        g.block_mut(else_b).instructions.push(CfInstruction::new(
            keel_ir::InstKind::Other { name: "call" },
            vec![],
            None,
            Location::new("t.c", 6),
        ));
        g.block_mut(else_b).set_jump(cond, end);

        let mut sink = CollectingSink::new();
        simplify(&mut g, &mut sink);

        assert_eq!(sink.warnings().count(), 1);
        assert!(!sink.had_error());
        assert_eq!(g.block_count(), 3);
        let branch = g.block(g.entry_block()).branch.as_ref().unwrap();
        assert!(branch.is_unconditional());
    }

    /// Idempotence (spec §8): simplifying an already-simplified graph a
    /// second time must not add further warnings or structural changes.
    #[test]
    fn simplify_is_idempotent() {
        let mut g = CfGraph::new(sig(None));
        let cond = g.add_local(LocalVariable::new("", Type::Bool, false));
        let then_b = g.push_block();
        let else_b = g.push_block();
        let end = g.push_block();
        g.end_block = end;
        g.block_mut(g.entry_block()).instructions.push(CfInstruction::constant(
            cond,
            Constant::Bool(true),
            Location::new("t.c", 1),
        ));
        g.block_mut(g.entry_block()).set_conditional(cond, then_b, else_b);
        g.block_mut(then_b).set_jump(cond, end);
        g.block_mut(else_b).set_jump(cond, end);

        let mut sink = CollectingSink::new();
        simplify(&mut g, &mut sink);
        let blocks_after_first = g.block_count();
        let warnings_after_first = sink.diagnostics.len();

        simplify(&mut g, &mut sink);
        assert_eq!(g.block_count(), blocks_after_first);
        assert_eq!(sink.diagnostics.len(), warnings_after_first);
    }

    /// A hard error on one function stops the whole translation unit
    /// (spec §7): a second function is never simplified.
    #[test]
    fn hard_error_stops_remaining_functions_in_file() {
        let mut bad = CfGraph::new(sig(Some(Type::SignedInt(32))));
        let _ret = bad.add_return_slot(Type::SignedInt(32));
        let end = bad.push_block();
        bad.end_block = end;
        let dummy = bad.add_local(LocalVariable::new("", Type::Bool, false));
        bad.block_mut(bad.entry_block()).set_jump(dummy, end);

        let mut untouched = CfGraph::new(sig(None));
        // This function has an obviously foldable constant-true branch; if
        // it ran, it would shrink from 3 blocks to fewer.
        let cond = untouched.add_local(LocalVariable::new("", Type::Bool, false));
        let then_b = untouched.push_block();
        let else_b = untouched.push_block();
        let uend = untouched.push_block();
        untouched.end_block = uend;
        untouched
            .block_mut(untouched.entry_block())
            .instructions
            .push(CfInstruction::constant(cond, Constant::Bool(true), Location::new("t.c", 1)));
        untouched
            .block_mut(untouched.entry_block())
            .set_conditional(cond, then_b, else_b);
        untouched.block_mut(then_b).set_jump(cond, uend);
        untouched.block_mut(else_b).set_jump(cond, uend);

        let mut file = CfGraphFile::new(vec![bad, untouched]);
        let mut sink = CollectingSink::new();
        simplify_file(&mut file, &mut sink);

        assert!(sink.had_error());
        assert_eq!(file.graphs[1].block_count(), 3, "second function must be untouched");
    }

    /// `def f() -> int: if True: return 1 else: pass` — the folded-away
    /// `else` branch never assigned `return`, but since its edge is no
    /// longer live after folding+removal, the only surviving path to
    /// `end_block` passes through the `then` branch, which always sets
    /// `return` first. Must not report a missing-return error against a
    /// stale, pre-removal fixpoint.
    #[test]
    fn missing_return_check_uses_post_removal_fixpoint() {
        let mut g = CfGraph::new(sig(Some(Type::SignedInt(32))));
        let ret = g.add_return_slot(Type::SignedInt(32));
        let cond = g.add_local(LocalVariable::new("", Type::Bool, false));
        let then_b = g.push_block();
        let else_b = g.push_block();
        let end = g.push_block();
        g.end_block = end;

        g.block_mut(g.entry_block()).instructions.push(CfInstruction::constant(
            cond,
            Constant::Bool(true),
            Location::new("t.c", 1),
        ));
        g.block_mut(g.entry_block()).set_conditional(cond, then_b, else_b);
        g.block_mut(then_b).instructions.push(CfInstruction::constant(
            ret,
            Constant::Integer { value: 1, width: 32, signed: true },
            Location::new("t.c", 2),
        ));
        g.block_mut(then_b).set_jump(cond, end);
        // `else_b` never assigns `return` — if its now-dead edge still fed
        // the missing-return check, this would spuriously error.
        g.block_mut(else_b).set_jump(cond, end);

        let mut sink = CollectingSink::new();
        simplify(&mut g, &mut sink);

        assert!(!sink.had_error(), "a provably-always-returning function must not error");
        assert_eq!(sink.errors().count(), 0);
    }
}
