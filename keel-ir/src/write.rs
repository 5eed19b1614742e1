//! A one-directional, developer-facing pretty printer for `CfGraph`.
//!
//! This is *not* the out-of-scope textual IR printer from spec §1 (that one
//! round-trips through a parser for verbose compiler logs); this `Display`
//! impl exists only so a failing test or a `log::trace!` can show a graph
//! without hand-rolling a debug dump, the way the teacher's IR entities get
//! throwaway `Display` impls for the same reason.

use std::fmt;

use crate::function::CfGraph;
use crate::instruction::InstKind;

impl fmt::Display for CfGraph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "function {}:", self.signature.name)?;
        for block in self.block_ids() {
            let marker = if block == self.end_block { " (end)" } else { "" };
            writeln!(f, "block{}{}:", block, marker)?;
            for inst in &self.block(block).instructions {
                let dest = inst
                    .destvar
                    .map(|d| format!("{} := ", d))
                    .unwrap_or_default();
                let args = inst
                    .operands
                    .iter()
                    .map(|o| o.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                let payload = match &inst.kind {
                    InstKind::Constant(c) => format!(" {}", c),
                    _ => String::new(),
                };
                writeln!(
                    f,
                    "    {}{}({}){}",
                    dest,
                    inst.kind.mnemonic(),
                    args,
                    payload
                )?;
            }
            match &self.block(block).branch {
                None => writeln!(f, "    <terminal>")?,
                Some(b) if b.is_unconditional() => {
                    writeln!(f, "    jump block{}", b.iftrue)?
                }
                Some(b) => writeln!(
                    f,
                    "    branch {} ? block{} : block{}",
                    b.var, b.iftrue, b.iffalse
                )?,
            }
        }
        Ok(())
    }
}
