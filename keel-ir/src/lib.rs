//! The CFG IR data model (spec §3): locations, types, constants, local
//! variables, instructions, blocks, and whole function graphs, plus a
//! derived control-flow-edge view used by the dataflow engine.

mod block;
mod constant;
mod entities;
mod flowgraph;
mod function;
mod instruction;
mod location;
mod types;
mod write;

pub use block::{Branch, CfBlock};
pub use constant::Constant;
pub use entities::{BlockId, Local};
pub use flowgraph::ControlFlowGraph;
pub use function::{CfGraph, CfGraphFile, LocalVariable, Signature};
pub use instruction::{CfInstruction, InstKind};
pub use location::Location;
pub use types::Type;
