//! The CFG simplification and diagnostic engine (spec §4): a small,
//! real static-analysis framework running a monotone dataflow analysis over
//! variable *definedness* and *boolean constant* lattices, then using the
//! fixpoint to fold branches, prune unreachable code, diagnose missing
//! returns, drop dead locals, and flag reads of undefined values.

mod branch_fold;
mod dead_locals;
mod dsu;
mod fixpoint;
mod lattice;
mod missing_return;
mod simplify;
mod undefined_use;
mod unreachable;

pub use fixpoint::{block_in_status, FixpointResult};
pub use lattice::{merge, merge_vector, step, Status, StatusVector};
pub use simplify::{simplify, simplify_file};

// Exposed for callers (e.g. a future incremental driver) that want to run
// an individual pass rather than the whole pipeline.
pub use branch_fold::fold_branches;
pub use dead_locals::eliminate_dead_locals;
pub use missing_return::diagnose_missing_return;
pub use undefined_use::diagnose_undefined_use;
pub use unreachable::remove_unreachable_blocks;
