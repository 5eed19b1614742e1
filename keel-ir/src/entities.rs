//! Opaque references into a `CfGraph`'s local-variable and block storage.
//!
//! Instructions refer to locals and blocks by these dense `u32` indices
//! rather than by pointer, matching the teacher's `Block`/`Value`/`Inst`
//! entity references (`cranelift-codegen/src/ir/entities.rs`) and the
//! design note in spec §9 ("Use an arena/vector of blocks with stable
//! indices; cross-references are indices, not owning handles").

use keel_entity::entity_impl;

/// A reference to a local variable owned by a `CfGraph`.
///
/// Stays stable across every pass in this crate, including dead-local
/// elimination (spec §4.6 explicitly forbids renumbering survivors).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Local(u32);
entity_impl!(Local);

/// A reference to a block within a `CfGraph`'s block list.
///
/// Stable everywhere *except* across `remove_unreachable_blocks`, which
/// compacts the backing vector (spec §4.4, §9). Nothing in this crate holds
/// a `BlockId` across that call.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockId(u32);
entity_impl!(BlockId);
