//! A developer-facing pretty printer for `BackendFunction`/`BackendModule`,
//! in the same spirit as `keel_ir`'s — not the out-of-scope textual IR
//! printer (spec §1), just something a failing test or `log::trace!` can
//! show without hand-rolling a dump.

use std::fmt;

use keel_entity::EntityRef;

use crate::function::BackendFunction;
use crate::instruction::{Inst, Terminator};
use crate::module::BackendModule;

impl fmt::Display for BackendModule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for func in &self.functions {
            write!(f, "{}", func)?;
        }
        Ok(())
    }
}

impl fmt::Display for BackendFunction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let ret = self
            .return_type
            .map(|t| t.to_string())
            .unwrap_or_else(|| "void".into());
        writeln!(f, "fn {}(...) -> {} {{", self.name, ret)?;
        for block in self.block_ids() {
            let marker = if block == self.entry_block { " (entry)" } else { "" };
            writeln!(f, "  block{}{}:", block.index(), marker)?;
            let data = &self.blocks[block];
            for (result, inst) in &data.instructions {
                let dest = result
                    .map(|v| format!("v{} := ", v.index()))
                    .unwrap_or_default();
                writeln!(f, "    {}{}", dest, describe(inst))?;
            }
            match &data.terminator {
                Some(Terminator::Jump(b)) => writeln!(f, "    jump block{}", b.index())?,
                Some(Terminator::Branch { cond, if_true, if_false }) => writeln!(
                    f,
                    "    branch v{} ? block{} : block{}",
                    cond.index(),
                    if_true.index(),
                    if_false.index()
                )?,
                Some(Terminator::Return(Some(v))) => writeln!(f, "    return v{}", v.index())?,
                Some(Terminator::Return(None)) => writeln!(f, "    return")?,
                Some(Terminator::Unreachable) => writeln!(f, "    unreachable")?,
                None => writeln!(f, "    <unterminated>")?,
            }
        }
        writeln!(f, "}}")
    }
}

fn describe(inst: &Inst) -> String {
    match inst {
        Inst::StackAddr { slot } => format!("stack_addr ss{}", slot.index()),
        Inst::Load { ptr, ty } => format!("load.{} v{}", ty, ptr.index()),
        Inst::Store { ptr, value } => format!("store v{}, v{}", value.index(), ptr.index()),
        Inst::Iconst { ty, value } => format!("iconst.{} {}", ty, value),
        Inst::Bconst { value } => format!("bconst {}", value),
        Inst::Param { index } => format!("param {}", index),
        Inst::Opaque { name, args, .. } => format!(
            "{}({})",
            name,
            args.iter().map(|a| format!("v{}", a.index())).collect::<Vec<_>>().join(", ")
        ),
    }
}
