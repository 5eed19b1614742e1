//! Use-of-undefined-variable diagnostics (spec §4.7).

use keel_diag::DiagnosticSink;
use keel_entity::EntityRef;
use keel_ir::{CfGraph, ControlFlowGraph};

use crate::fixpoint::{self, block_in_status};
use crate::lattice::{self, Status};

/// Rerun the fixpoint (branch folding and unreachable-block removal may
/// have changed the graph since the first run) and walk every instruction
/// in block order, reporting each read of a possibly- or definitely-
/// undefined *named* local. Compiler-synthesized temporaries (empty name)
/// are never the subject of a diagnostic (spec §4.7).
pub fn diagnose_undefined_use(graph: &CfGraph, sink: &mut impl DiagnosticSink) {
    let cfg = ControlFlowGraph::compute(graph);
    let result = fixpoint::run(graph, &cfg);

    for block in graph.block_ids() {
        let mut temp = block_in_status(graph, &cfg, &result, block);
        for inst in &graph.block(block).instructions {
            for &operand in &inst.operands {
                let Some(var) = graph.get_local(operand) else {
                    continue;
                };
                if !var.is_named() {
                    continue;
                }
                match temp[operand.index()] {
                    Status::PossiblyUndefined => sink.warning(
                        inst.location.clone(),
                        format!("the value of '{}' may be undefined", var.name),
                    ),
                    Status::Undefined => sink.warning(
                        inst.location.clone(),
                        format!("the value of '{}' is undefined", var.name),
                    ),
                    _ => {}
                }
            }
            lattice::step(&mut temp, graph, inst);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keel_diag::CollectingSink;
    use keel_ir::{CfInstruction, InstKind, LocalVariable, Location, Signature, Type};

    fn sig() -> Signature {
        Signature {
            name: "f".into(),
            params: vec![],
            return_type: None,
            return_type_location: Location::new("t.c", 1),
        }
    }

    /// `let x: int; printf("%d", x)` (spec §8 scenario 2).
    #[test]
    fn reading_an_undefined_local_warns() {
        let mut g = CfGraph::new(sig());
        let x = g.add_local(LocalVariable::new("x", Type::SignedInt(32), false));
        g.block_mut(g.entry_block()).instructions.push(
            CfInstruction::new(
                InstKind::Other { name: "call" },
                vec![x],
                None,
                Location::new("t.c", 2),
            ),
        );

        let mut sink = CollectingSink::new();
        diagnose_undefined_use(&g, &mut sink);

        assert_eq!(sink.warnings().count(), 1);
        assert!(sink
            .warnings()
            .next()
            .unwrap()
            .message
            .contains("the value of 'x' is undefined"));
        assert!(!sink.had_error());
    }

    /// `let x: int = 0; scanf("%d", &x); printf("%d", x)` (spec §8 scenario
    /// 5): address-of disables the analysis for `x`.
    #[test]
    fn address_taken_variable_is_not_flagged() {
        let mut g = CfGraph::new(sig());
        let x = g.add_local(LocalVariable::new("x", Type::SignedInt(32), false));
        let ptr = g.add_local(LocalVariable::new("", Type::Pointer(Box::new(Type::SignedInt(32))), false));

        let entry = g.entry_block();
        g.block_mut(entry).instructions.push(CfInstruction::constant(
            x,
            keel_ir::Constant::Integer {
                value: 0,
                width: 32,
                signed: true,
            },
            Location::new("t.c", 1),
        ));
        g.block_mut(entry)
            .instructions
            .push(CfInstruction::address_of_local_var(ptr, x, Location::new("t.c", 2)));
        g.block_mut(entry).instructions.push(CfInstruction::new(
            InstKind::Other { name: "call" },
            vec![ptr],
            None,
            Location::new("t.c", 2),
        ));
        g.block_mut(entry).instructions.push(CfInstruction::new(
            InstKind::Other { name: "call" },
            vec![x],
            None,
            Location::new("t.c", 3),
        ));

        let mut sink = CollectingSink::new();
        diagnose_undefined_use(&g, &mut sink);
        assert_eq!(sink.diagnostics.len(), 0);
    }

    #[test]
    fn unnamed_temporary_is_never_reported() {
        let mut g = CfGraph::new(sig());
        let tmp = g.add_local(LocalVariable::new("", Type::SignedInt(32), false));
        g.block_mut(g.entry_block()).instructions.push(CfInstruction::new(
            InstKind::Other { name: "call" },
            vec![tmp],
            None,
            Location::new("t.c", 9),
        ));
        let mut sink = CollectingSink::new();
        diagnose_undefined_use(&g, &mut sink);
        assert_eq!(sink.diagnostics.len(), 0);
    }
}
