//! The 7-point variable-status lattice and its transfer function (spec §4.1).
//!
//! Modeled as a plain tagged enum with an exhaustive `merge`, per the
//! teacher's design note (spec §9): "Lattice as a tagged variant with a
//! total `merge` function — not an inheritance hierarchy." Adding an eighth
//! status would force every `match` below to be revisited by the compiler.

use keel_entity::EntityRef;
use keel_ir::{CfGraph, CfInstruction, InstKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    /// No information yet. Bottom for `merge`.
    Unvisited,
    /// Boolean variable known to hold `true`.
    True,
    /// Boolean variable known to hold `false`.
    False,
    /// Holds some non-garbage value, specific value unknown.
    Defined,
    /// May hold garbage on some incoming path.
    PossiblyUndefined,
    /// Definitely holds garbage on every incoming path.
    Undefined,
    /// Address has been taken; value may change at arbitrary points.
    Unpredictable,
}

/// The dataflow join. Must satisfy `merge(a, Unvisited) == a`, and be
/// idempotent, commutative, and associative (spec §8's lattice laws).
pub fn merge(a: Status, b: Status) -> Status {
    use Status::*;

    match (a, b) {
        (Unvisited, x) | (x, Unvisited) => x,
        (Unpredictable, _) | (_, Unpredictable) => Unpredictable,
        (Undefined, Undefined) => Undefined,
        (x, y) if is_undefinedish(x) || is_undefinedish(y) => PossiblyUndefined,
        (True, True) => True,
        (False, False) => False,
        _ => Defined,
    }
}

fn is_undefinedish(s: Status) -> bool {
    matches!(s, Status::Undefined | Status::PossiblyUndefined)
}

/// A per-local status vector, indexed by `Local::index()`.
pub type StatusVector = Vec<Status>;

pub fn merge_vector(a: &StatusVector, b: &StatusVector) -> StatusVector {
    a.iter().zip(b.iter()).map(|(&x, &y)| merge(x, y)).collect()
}

/// `dst[v] := merge(dst[v], src[v])` for every `v`; returns whether any
/// entry actually changed, which is what drives fixpoint worklist
/// re-enqueuing (spec §4.2 step 3).
pub fn merge_vector_in_place(dst: &mut StatusVector, src: &StatusVector) -> bool {
    let mut changed = false;
    for (d, &s) in dst.iter_mut().zip(src.iter()) {
        let merged = merge(*d, s);
        if merged != *d {
            *d = merged;
            changed = true;
        }
    }
    changed
}

/// The dataflow transfer function (spec §4.1). Applies the effect of a
/// single instruction to `status` in place.
pub fn step(status: &mut StatusVector, graph: &CfGraph, inst: &CfInstruction) {
    let Some(dest) = inst.destvar else { return };
    if status[dest.index()] == Status::Unpredictable {
        return;
    }

    match &inst.kind {
        InstKind::Varcpy => {
            let src = inst.operands[0];
            let src_status = status[src.index()];
            status[dest.index()] = if src_status == Status::Unpredictable {
                Status::Defined
            } else {
                src_status
            };
        }
        InstKind::AddressOfLocalVar => {
            let taken = inst.operands[0];
            status[taken.index()] = Status::Unpredictable;
            status[dest.index()] = Status::Defined;
        }
        InstKind::Constant(c) => {
            status[dest.index()] = match c.as_bool() {
                Some(true) => Status::True,
                Some(false) => Status::False,
                None => Status::Defined,
            };
        }
        InstKind::Other { .. } => {
            status[dest.index()] = Status::Defined;
        }
    }
    let _ = graph;
}

/// The in-status of the entry block's locals, before any instruction runs:
/// `Defined` for arguments, `Undefined` for everything else (spec §4.2).
pub fn entry_in_status(graph: &CfGraph) -> StatusVector {
    let mut v = vec![Status::Undefined; graph.local_slot_count()];
    for (local, var) in graph.locals() {
        if var.is_argument {
            v[local.index()] = Status::Defined;
        }
    }
    v
}
