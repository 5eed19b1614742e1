//! `CfBlock` (spec §3).

use crate::entities::{BlockId, Local};
use crate::instruction::CfInstruction;

/// The terminator of a non-`end_block` block: a conditional branch on
/// `var`, which collapses to an unconditional jump when `iftrue == iffalse`
/// (spec §3's "Unconditional jumps are represented by `iftrue == iffalse`").
///
/// Modeled as `Option<Branch>` rather than the spec's "both successors
/// null for the end block" sentinel: `None` *is* the end block, with no
/// second null-check required to tell the two apart. The observable
/// semantics spec §9's open question permits either representation for are
/// unchanged.
#[derive(Clone, Debug)]
pub struct Branch {
    pub var: Local,
    pub iftrue: BlockId,
    pub iffalse: BlockId,
}

impl Branch {
    pub fn is_unconditional(&self) -> bool {
        self.iftrue == self.iffalse
    }
}

/// A basic block: a straight-line instruction sequence ending in a
/// conditional branch, an unconditional jump, or (for `end_block`) nothing.
#[derive(Clone, Debug, Default)]
pub struct CfBlock {
    pub instructions: Vec<CfInstruction>,
    pub branch: Option<Branch>,
}

impl CfBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make this block end in an unconditional jump to `target`.
    pub fn set_jump(&mut self, var: Local, target: BlockId) {
        self.branch = Some(Branch {
            var,
            iftrue: target,
            iffalse: target,
        });
    }

    /// Make this block end in a two-way conditional branch.
    pub fn set_conditional(&mut self, var: Local, iftrue: BlockId, iffalse: BlockId) {
        self.branch = Some(Branch {
            var,
            iftrue,
            iffalse,
        });
    }

    /// The successor block ids of this block, deduplicated only when the
    /// branch is unconditional (a two-way branch to the same block on both
    /// sides is reported once; to the same block via the *same* edge field
    /// it is never reported twice).
    pub fn successors(&self) -> Vec<BlockId> {
        match &self.branch {
            None => vec![],
            Some(b) if b.is_unconditional() => vec![b.iftrue],
            Some(b) => vec![b.iftrue, b.iffalse],
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.branch.is_none()
    }
}
