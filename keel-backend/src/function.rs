//! `BackendFunction`: a minimal SSA-style function body (spec §4.9).

use keel_entity::{EntityRef, PrimaryMap};

use crate::entities::{BackendBlock, BackendValue, StackSlot};
use crate::instruction::{Inst, Terminator};
use crate::types::BackendType;

/// Size and alignment of one stack slot, in bytes. Alignment always equals
/// size, rounded up to the next power of two — plenty for the scalar locals
/// this contract lowers (no structs, no over-aligned types in scope here).
#[derive(Clone, Copy, Debug)]
pub struct StackSlotData {
    pub size: u32,
}

impl StackSlotData {
    pub fn new(size: u32) -> Self {
        Self { size: size.max(1) }
    }
}

#[derive(Default)]
pub struct BackendBlockData {
    pub instructions: Vec<(Option<BackendValue>, Inst)>,
    pub terminator: Option<Terminator>,
}

/// One function, lowered from a single `CfGraph` (spec §4.9).
pub struct BackendFunction {
    pub name: String,
    pub params: Vec<BackendType>,
    pub return_type: Option<BackendType>,
    pub stack_slots: PrimaryMap<StackSlot, StackSlotData>,
    pub values: PrimaryMap<BackendValue, BackendType>,
    pub blocks: PrimaryMap<BackendBlock, BackendBlockData>,
    pub entry_block: BackendBlock,
}

impl BackendFunction {
    pub fn new(name: impl Into<String>, params: Vec<BackendType>, return_type: Option<BackendType>) -> Self {
        let mut blocks = PrimaryMap::new();
        let entry_block = blocks.push(BackendBlockData::default());
        Self {
            name: name.into(),
            params,
            return_type,
            stack_slots: PrimaryMap::new(),
            values: PrimaryMap::new(),
            blocks,
            entry_block,
        }
    }

    pub fn create_stack_slot(&mut self, size: u32) -> StackSlot {
        self.stack_slots.push(StackSlotData::new(size))
    }

    pub fn create_block(&mut self) -> BackendBlock {
        self.blocks.push(BackendBlockData::default())
    }

    fn make_value(&mut self, ty: BackendType) -> BackendValue {
        self.values.push(ty)
    }

    /// Append `inst` to `block`, allocating a result value of type
    /// `result_ty` if one is given.
    pub fn push_inst(
        &mut self,
        block: BackendBlock,
        inst: Inst,
        result_ty: Option<BackendType>,
    ) -> Option<BackendValue> {
        let result = result_ty.map(|ty| self.make_value(ty));
        self.blocks[block].instructions.push((result, inst));
        result
    }

    pub fn set_terminator(&mut self, block: BackendBlock, terminator: Terminator) {
        debug_assert!(
            self.blocks[block].terminator.is_none(),
            "block terminated twice"
        );
        self.blocks[block].terminator = Some(terminator);
    }

    pub fn value_type(&self, value: BackendValue) -> BackendType {
        self.values[value]
    }

    pub fn block_ids(&self) -> impl Iterator<Item = BackendBlock> + '_ {
        (0..self.blocks.len()).map(BackendBlock::new)
    }
}
