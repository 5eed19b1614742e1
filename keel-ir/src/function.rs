//! `CfGraph` and `CfGraphFile` (spec §3).

use keel_entity::EntityRef;

use crate::block::CfBlock;
use crate::entities::{BlockId, Local};
use crate::location::Location;
use crate::types::Type;

/// `{ name, type, is_argument }` (spec §3). A local's `name` may be empty
/// for a compiler-synthesized temporary; such locals are never the subject
/// of an undefined-use diagnostic (spec §4.7).
#[derive(Clone, Debug)]
pub struct LocalVariable {
    pub name: String,
    pub ty: Type,
    pub is_argument: bool,
}

impl LocalVariable {
    pub fn new(name: impl Into<String>, ty: Type, is_argument: bool) -> Self {
        Self {
            name: name.into(),
            ty,
            is_argument,
        }
    }

    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }
}

/// A function's signature, kept on the graph so diagnostics can name the
/// function and point at its declared return type (spec §4.5).
#[derive(Clone, Debug)]
pub struct Signature {
    pub name: String,
    pub params: Vec<Type>,
    pub return_type: Option<Type>,
    /// Where the `-> T` annotation (or its absence) sits, for the
    /// missing-return warning/error location.
    pub return_type_location: Location,
}

/// A function body as a control-flow graph of basic blocks.
///
/// Ownership (spec §3, §5): a `CfGraph` exclusively owns its blocks,
/// instructions, and locals. Nothing here is heap-allocated behind a
/// separate owning handle; everything lives in the two `Vec`s below and is
/// addressed by the `Local`/`BlockId` indices from `entities.rs`.
pub struct CfGraph {
    pub signature: Signature,
    /// Indexed by `Local`. `None` marks a local removed by dead-local
    /// elimination (spec §4.6) — the slot stays so every other `Local`'s
    /// index is untouched, matching "no renumbering of remaining locals".
    locals: Vec<Option<LocalVariable>>,
    /// The local holding the function's return value, or `None` if the
    /// function returns nothing. Spec §9's open question resolves to this
    /// dedicated field rather than a string-keyed `"return"` lookup — see
    /// DESIGN.md.
    pub return_slot: Option<Local>,
    pub all_blocks: Vec<CfBlock>,
    pub end_block: BlockId,
}

impl CfGraph {
    /// Start a new graph with a single entry block that is also the end
    /// block (the common case for a trivial body; callers needing more
    /// blocks call `push_block` before wiring up branches).
    pub fn new(signature: Signature) -> Self {
        let mut all_blocks = Vec::new();
        all_blocks.push(CfBlock::new());
        Self {
            signature,
            locals: Vec::new(),
            return_slot: None,
            all_blocks,
            end_block: BlockId::new(0),
        }
    }

    /// Declare a new local and return its stable reference. Arguments must
    /// be declared before any non-argument local so that "arguments appear
    /// first in declaration order" (spec §3) holds by construction.
    pub fn add_local(&mut self, var: LocalVariable) -> Local {
        debug_assert!(
            !var.is_argument || self.locals.iter().flatten().all(|l| l.is_argument),
            "arguments must be declared before locals"
        );
        let id = Local::new(self.locals.len());
        self.locals.push(Some(var));
        id
    }

    /// Declare the `return` slot and remember it on the graph.
    pub fn add_return_slot(&mut self, ty: Type) -> Local {
        let id = self.add_local(LocalVariable::new("return", ty, false));
        self.return_slot = Some(id);
        id
    }

    pub fn get_local(&self, local: Local) -> Option<&LocalVariable> {
        self.locals.get(local.index()).and_then(|o| o.as_ref())
    }

    /// Every local slot that still holds a variable, in declaration order.
    pub fn locals(&self) -> impl Iterator<Item = (Local, &LocalVariable)> {
        self.locals
            .iter()
            .enumerate()
            .filter_map(|(i, o)| o.as_ref().map(|v| (Local::new(i), v)))
    }

    /// The number of local slots ever allocated, including removed ones —
    /// the size dataflow status vectors must have (spec §4.2).
    pub fn local_slot_count(&self) -> usize {
        self.locals.len()
    }

    /// Remove a local (spec §4.6: dead-local elimination). Arguments are
    /// never removed; callers are expected to have already checked that.
    pub fn remove_local(&mut self, local: Local) {
        debug_assert!(
            self.get_local(local).map_or(false, |l| !l.is_argument),
            "arguments are always retained"
        );
        if let Some(slot) = self.locals.get_mut(local.index()) {
            *slot = None;
        }
    }

    pub fn push_block(&mut self) -> BlockId {
        let id = BlockId::new(self.all_blocks.len());
        self.all_blocks.push(CfBlock::new());
        id
    }

    pub fn block(&self, id: BlockId) -> &CfBlock {
        &self.all_blocks[id.index()]
    }

    pub fn block_mut(&mut self, id: BlockId) -> &mut CfBlock {
        &mut self.all_blocks[id.index()]
    }

    pub fn entry_block(&self) -> BlockId {
        BlockId::new(0)
    }

    pub fn block_count(&self) -> usize {
        self.all_blocks.len()
    }

    pub fn block_ids(&self) -> impl Iterator<Item = BlockId> {
        (0..self.all_blocks.len()).map(BlockId::new)
    }
}

/// A whole translation unit's worth of simplified-or-not function graphs.
pub struct CfGraphFile {
    pub graphs: Vec<CfGraph>,
}

impl CfGraphFile {
    pub fn new(graphs: Vec<CfGraph>) -> Self {
        Self { graphs }
    }
}
