//! Dead-local elimination (spec §4.6).

use keel_entity::EntityRef;
use keel_ir::{CfGraph, Local};

/// Remove every local that is neither an argument nor named as a
/// `destvar`/operand/branch condition anywhere in the graph. Arguments are
/// always retained (spec §4.6); identity of survivors is untouched since
/// removal only tombstones the slot (`CfGraph::remove_local`).
pub fn eliminate_dead_locals(graph: &mut CfGraph) {
    let mut used = vec![false; graph.local_slot_count()];
    for block in graph.block_ids() {
        let b = graph.block(block);
        for inst in &b.instructions {
            if let Some(d) = inst.destvar {
                used[d.index()] = true;
            }
            for op in &inst.operands {
                used[op.index()] = true;
            }
        }
        if let Some(branch) = &b.branch {
            used[branch.var.index()] = true;
        }
    }

    let dead: Vec<Local> = graph
        .locals()
        .filter(|(l, var)| !var.is_argument && !used[l.index()])
        .map(|(l, _)| l)
        .collect();

    if !dead.is_empty() {
        log::debug!(
            "removing {} dead local(s) in '{}'",
            dead.len(),
            graph.signature.name
        );
    }
    for local in dead {
        graph.remove_local(local);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keel_ir::{CfInstruction, Constant, LocalVariable, Location, Signature, Type};

    fn sig() -> Signature {
        Signature {
            name: "f".into(),
            params: vec![],
            return_type: None,
            return_type_location: Location::new("t.c", 1),
        }
    }

    #[test]
    fn unused_local_is_removed_but_argument_is_kept() {
        let mut g = CfGraph::new(sig());
        let arg = g.add_local(LocalVariable::new("a", Type::SignedInt(32), true));
        let unused = g.add_local(LocalVariable::new("dead", Type::SignedInt(32), false));
        let used = g.add_local(LocalVariable::new("live", Type::SignedInt(32), false));
        g.block_mut(g.entry_block())
            .instructions
            .push(CfInstruction::varcpy(used, arg, Location::new("t.c", 2)));

        eliminate_dead_locals(&mut g);

        assert!(g.get_local(arg).is_some());
        assert!(g.get_local(used).is_some());
        assert!(g.get_local(unused).is_none());
    }

    #[test]
    fn branch_variable_is_not_removed() {
        let mut g = CfGraph::new(sig());
        let cond = g.add_local(LocalVariable::new("", Type::Bool, false));
        let end = g.push_block();
        g.end_block = end;
        g.block_mut(g.entry_block())
            .instructions
            .push(CfInstruction::constant(
                cond,
                Constant::Bool(true),
                Location::new("t.c", 1),
            ));
        g.block_mut(g.entry_block()).set_conditional(cond, end, end);

        eliminate_dead_locals(&mut g);
        assert!(g.get_local(cond).is_some());
    }
}
