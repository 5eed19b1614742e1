//! Lowering contract between the simplified CFG middle-end and an external
//! backend (spec §4.9, §6).
//!
//! This crate does not itself verify, optimize, or emit object code — that
//! is the real backend's job. It only builds the small SSA-style module
//! the lowering rules describe: stack-slot allocas for every local,
//! load/store for reads/writes, and lazily-created blocks for branch
//! targets.

mod entities;
mod function;
mod instruction;
mod lower;
mod module;
mod types;
mod write;

pub use entities::{BackendBlock, BackendValue, StackSlot};
pub use function::{BackendBlockData, BackendFunction, StackSlotData};
pub use instruction::{Inst, Terminator};
pub use lower::{lower_file, lower_graph};
pub use module::BackendModule;
pub use types::BackendType;
