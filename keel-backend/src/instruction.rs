//! Backend instructions and block terminators (spec §4.9).
//!
//! A deliberately small instruction set: just enough to express the
//! lowering rules the contract enumerates (stack-slot addresses, loads,
//! stores, integer/boolean constants, and an escape hatch for whatever the
//! real backend's instruction selector does with calls, arithmetic, and
//! field access). Everything past that — register allocation, ISA
//! selection, object emission — is the external backend's job (spec §1,
//! §6), not this crate's.

use crate::entities::{BackendValue, StackSlot};
use crate::types::BackendType;

/// A single SSA-style instruction. Each variant that produces a value is
/// paired with the `BackendValue` it defines by the caller (`BackendBlock`
/// stores them as `(BackendValue, Inst)` pairs); instructions with no result
/// (`Store`) are not.
#[derive(Clone, Debug)]
pub enum Inst {
    /// The address of a stack slot — used both to seed the pointer a
    /// load/store targets and, directly, as the result of
    /// `ADDRESS_OF_LOCAL_VAR` (spec §4.9: "yield the slot address directly;
    /// no load").
    StackAddr { slot: StackSlot },
    /// Load `ty` through a pointer value.
    Load { ptr: BackendValue, ty: BackendType },
    /// Store a value through a pointer value.
    Store { ptr: BackendValue, value: BackendValue },
    /// An integer constant of the given width.
    Iconst { ty: BackendType, value: i128 },
    /// A 1-bit boolean constant.
    Bconst { value: bool },
    /// The function's `index`-th incoming parameter, read once in the entry
    /// block and immediately stored into that parameter's stack slot (spec
    /// §4.9: "Arguments are stored into their slots on entry").
    Param { index: u32 },
    /// Anything the middle-end left as `InstKind::Other`: calls, arithmetic,
    /// field access, and so on. The backend's instruction selector decides
    /// what machine code this becomes; this crate only threads the operand
    /// values through and, if the instruction has a destvar, reserves a
    /// result value for it.
    Opaque {
        name: &'static str,
        args: Vec<BackendValue>,
        has_result: bool,
    },
}

/// How a block ends.
#[derive(Clone, Debug)]
pub enum Terminator {
    /// Unconditional jump (spec §4.9: "unconditional jumps ... become
    /// `br`").
    Jump(crate::entities::BackendBlock),
    /// Two-way conditional branch.
    Branch {
        cond: BackendValue,
        if_true: crate::entities::BackendBlock,
        if_false: crate::entities::BackendBlock,
    },
    /// Return a value, or nothing for a void-returning function.
    Return(Option<BackendValue>),
    /// A returning function's end block turned out to be reachable without
    /// an explicit return. Simplification is required to have already
    /// reported a hard error for any program that can really do this (spec
    /// §4.9); this terminator only exists so lowering always has something
    /// well-formed to emit instead of panicking on a bug upstream.
    Unreachable,
}
