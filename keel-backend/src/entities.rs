//! Entity references into a `BackendFunction` (spec §4.9).
//!
//! Mirrors `keel_ir::entities` one level down the pipeline: the backend IR
//! is itself arena-addressed rather than pointer-linked, matching the
//! teacher's `Value`/`Block`/`StackSlot` entities
//! (`cranelift-codegen/src/ir/entities.rs`, `ir/stackslot.rs`).

use keel_entity::entity_impl;

/// An SSA value produced by a backend instruction.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BackendValue(u32);
entity_impl!(BackendValue);

/// A basic block in the lowered function.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BackendBlock(u32);
entity_impl!(BackendBlock);

/// A stack slot backing one source-level local variable (spec §4.9: "Each
/// local variable becomes a stack slot (alloca) in the function's entry
/// block").
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct StackSlot(u32);
entity_impl!(StackSlot);
