//! AST→low-level-SSA-IR lowering (spec §4.9).
//!
//! The CFG middle-end has already run (spec §4.8); this module's only job
//! is the mechanical translation the contract spells out. Every local
//! becomes a stack slot and every read/write of it becomes an explicit
//! load/store — there is no register promotion here, matching "reads lower
//! to load, writes to store" literally rather than anticipating the real
//! backend's own mem2reg-equivalent pass.

use std::collections::{HashMap, HashSet, VecDeque};

use keel_entity::EntityRef;
use keel_ir::{BlockId, CfGraph, CfGraphFile, Constant, InstKind, Local};

use crate::entities::{BackendBlock, StackSlot};
use crate::function::BackendFunction;
use crate::instruction::{Inst, Terminator};
use crate::module::BackendModule;
use crate::types::BackendType;

/// Name convention for the one middle-end `Other` instruction this contract
/// treats specially: a load through a pointer local (spec §4.9: "Pointer
/// dereference reads: load through the pointer"). Every other `Other`
/// mnemonic lowers opaquely — see `Inst::Opaque`.
const DEREF_MNEMONIC: &str = "deref";

fn byte_size(ty: &keel_ir::Type) -> u32 {
    match ty.width_bits() {
        Some(bits) => ((bits + 7) / 8).max(1),
        None => 8, // pointer or opaque named type: one machine word
    }
}

/// Lower every function in a translation unit (spec §6: "the lowering step
/// returns a backend module object").
pub fn lower_file(file: &CfGraphFile) -> BackendModule {
    let mut module = BackendModule::new();
    for graph in &file.graphs {
        module.functions.push(lower_graph(graph));
    }
    module
}

/// Lower one simplified `CfGraph` to a `BackendFunction`.
pub fn lower_graph(graph: &CfGraph) -> BackendFunction {
    let params = graph.signature.params.iter().map(BackendType::lower).collect();
    let return_type = graph.signature.return_type.as_ref().map(BackendType::lower);
    let mut func = BackendFunction::new(graph.signature.name.clone(), params, return_type);

    let mut slots: Vec<Option<StackSlot>> = vec![None; graph.local_slot_count()];
    for (local, var) in graph.locals() {
        slots[local.index()] = Some(func.create_stack_slot(byte_size(&var.ty)));
    }

    let mut block_map: HashMap<BlockId, BackendBlock> = HashMap::new();
    block_map.insert(graph.entry_block(), func.entry_block);
    let mut queue: VecDeque<BlockId> = VecDeque::new();
    queue.push_back(graph.entry_block());
    let mut lowered: HashSet<BlockId> = HashSet::new();

    while let Some(cf_block) = queue.pop_front() {
        if !lowered.insert(cf_block) {
            continue;
        }
        let backend_block = block_map[&cf_block];

        if cf_block == graph.entry_block() {
            lower_prologue(graph, &mut func, backend_block, &slots);
        }

        for inst in &graph.block(cf_block).instructions {
            lower_instruction(graph, &mut func, backend_block, &slots, inst);
        }

        let terminator = match &graph.block(cf_block).branch {
            None => lower_return(graph, &mut func, backend_block, &slots),
            Some(branch) if branch.is_unconditional() => {
                let target = get_or_create_block(branch.iftrue, &mut block_map, &mut func, &mut queue);
                Terminator::Jump(target)
            }
            Some(branch) => {
                let ty = BackendType::lower(&graph.get_local(branch.var).expect("branch var exists").ty);
                let addr = func
                    .push_inst(backend_block, Inst::StackAddr { slot: slots[branch.var.index()].unwrap() }, Some(BackendType::Ptr))
                    .unwrap();
                let cond = func.push_inst(backend_block, Inst::Load { ptr: addr, ty }, Some(ty)).unwrap();
                let if_true = get_or_create_block(branch.iftrue, &mut block_map, &mut func, &mut queue);
                let if_false = get_or_create_block(branch.iffalse, &mut block_map, &mut func, &mut queue);
                Terminator::Branch { cond, if_true, if_false }
            }
        };
        func.set_terminator(backend_block, terminator);
    }

    func
}

fn get_or_create_block(
    target: BlockId,
    block_map: &mut HashMap<BlockId, BackendBlock>,
    func: &mut BackendFunction,
    queue: &mut VecDeque<BlockId>,
) -> BackendBlock {
    *block_map.entry(target).or_insert_with(|| {
        let b = func.create_block();
        queue.push_back(target);
        b
    })
}

fn lower_prologue(graph: &CfGraph, func: &mut BackendFunction, entry: BackendBlock, slots: &[Option<StackSlot>]) {
    for (index, (local, var)) in graph.locals().filter(|(_, v)| v.is_argument).enumerate() {
        let ty = BackendType::lower(&var.ty);
        let param = func
            .push_inst(entry, Inst::Param { index: index as u32 }, Some(ty))
            .unwrap();
        let addr = func
            .push_inst(entry, Inst::StackAddr { slot: slots[local.index()].unwrap() }, Some(BackendType::Ptr))
            .unwrap();
        func.push_inst(entry, Inst::Store { ptr: addr, value: param }, None);
    }
}

fn lower_instruction(
    graph: &CfGraph,
    func: &mut BackendFunction,
    block: BackendBlock,
    slots: &[Option<StackSlot>],
    inst: &keel_ir::CfInstruction,
) {
    match &inst.kind {
        InstKind::Varcpy => {
            let src = inst.operands[0];
            let dest = inst.destvar.expect("varcpy defines a destvar");
            let ty = BackendType::lower(&graph.get_local(dest).expect("dest local exists").ty);
            let val = load_local(func, block, slots, src, ty);
            store_local(func, block, slots, dest, val);
        }
        InstKind::AddressOfLocalVar => {
            let src = inst.operands[0];
            let dest = inst.destvar.expect("address_of_local_var defines a destvar");
            let addr = func
                .push_inst(block, Inst::StackAddr { slot: slots[src.index()].unwrap() }, Some(BackendType::Ptr))
                .unwrap();
            store_local(func, block, slots, dest, addr);
        }
        InstKind::Constant(c) => {
            let dest = inst.destvar.expect("constant defines a destvar");
            let ty = BackendType::lower(&graph.get_local(dest).expect("dest local exists").ty);
            let val = match c {
                Constant::Bool(b) => func.push_inst(block, Inst::Bconst { value: *b }, Some(ty)).unwrap(),
                Constant::Integer { value, .. } => {
                    func.push_inst(block, Inst::Iconst { ty, value: *value }, Some(ty)).unwrap()
                }
            };
            store_local(func, block, slots, dest, val);
        }
        InstKind::Other { name } if *name == DEREF_MNEMONIC => {
            let ptr_local = inst.operands[0];
            let dest = inst.destvar.expect("dereference defines a destvar");
            let ty = BackendType::lower(&graph.get_local(dest).expect("dest local exists").ty);
            let ptr = load_local(func, block, slots, ptr_local, BackendType::Ptr);
            let val = func.push_inst(block, Inst::Load { ptr, ty }, Some(ty)).unwrap();
            store_local(func, block, slots, dest, val);
        }
        InstKind::Other { name } => {
            let args = inst
                .operands
                .iter()
                .map(|&op| {
                    let ty = BackendType::lower(&graph.get_local(op).expect("operand local exists").ty);
                    load_local(func, block, slots, op, ty)
                })
                .collect();
            let result_ty = inst
                .destvar
                .map(|d| BackendType::lower(&graph.get_local(d).expect("dest local exists").ty));
            let result = func.push_inst(
                block,
                Inst::Opaque { name: *name, args, has_result: result_ty.is_some() },
                result_ty,
            );
            if let (Some(dest), Some(val)) = (inst.destvar, result) {
                store_local(func, block, slots, dest, val);
            }
        }
    }
}

fn load_local(
    func: &mut BackendFunction,
    block: BackendBlock,
    slots: &[Option<StackSlot>],
    local: Local,
    ty: BackendType,
) -> crate::entities::BackendValue {
    let addr = func
        .push_inst(block, Inst::StackAddr { slot: slots[local.index()].unwrap() }, Some(BackendType::Ptr))
        .unwrap();
    func.push_inst(block, Inst::Load { ptr: addr, ty }, Some(ty)).unwrap()
}

fn store_local(
    func: &mut BackendFunction,
    block: BackendBlock,
    slots: &[Option<StackSlot>],
    local: Local,
    value: crate::entities::BackendValue,
) {
    let addr = func
        .push_inst(block, Inst::StackAddr { slot: slots[local.index()].unwrap() }, Some(BackendType::Ptr))
        .unwrap();
    func.push_inst(block, Inst::Store { ptr: addr, value }, None);
}

/// The end block's terminator (spec §4.9): void return for a function with
/// no return type; otherwise load the return slot and return its value, or
/// fall back to `unreachable` if that slot was never materialized (which
/// simplification's missing-return check is required to have already
/// turned into a hard error for any function that could really reach here
/// without one — see `missing_return` in `keel-analysis`).
fn lower_return(
    graph: &CfGraph,
    func: &mut BackendFunction,
    block: BackendBlock,
    slots: &[Option<StackSlot>],
) -> Terminator {
    let Some(return_type) = graph.signature.return_type.as_ref() else {
        return Terminator::Return(None);
    };
    let ty = BackendType::lower(return_type);
    match graph.return_slot.filter(|l| slots[l.index()].is_some()) {
        Some(ret_local) => {
            let val = load_local(func, block, slots, ret_local, ty);
            Terminator::Return(Some(val))
        }
        None => Terminator::Unreachable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keel_ir::{CfInstruction, LocalVariable, Location, Signature, Type};

    fn sig(ret: Option<Type>) -> Signature {
        Signature {
            name: "f".into(),
            params: vec![],
            return_type: ret,
            return_type_location: Location::new("t.c", 1),
        }
    }

    #[test]
    fn void_function_returns_void() {
        let g = CfGraph::new(sig(None));
        let func = lower_graph(&g);
        let term = func.blocks[func.entry_block].terminator.as_ref().unwrap();
        assert!(matches!(term, Terminator::Return(None)));
    }

    #[test]
    fn returning_function_loads_its_return_slot() {
        let mut g = CfGraph::new(sig(Some(Type::SignedInt(32))));
        let ret = g.add_return_slot(Type::SignedInt(32));
        g.block_mut(g.entry_block()).instructions.push(CfInstruction::constant(
            ret,
            keel_ir::Constant::Integer { value: 0, width: 32, signed: true },
            Location::new("t.c", 2),
        ));

        let func = lower_graph(&g);
        let term = func.blocks[func.entry_block].terminator.as_ref().unwrap();
        assert!(matches!(term, Terminator::Return(Some(_))));
    }

    #[test]
    fn argument_is_stored_into_its_slot_on_entry() {
        let mut g = CfGraph::new(sig(None));
        g.add_local(LocalVariable::new("a", Type::SignedInt(32), true));
        let func = lower_graph(&g);
        let entry_insts = &func.blocks[func.entry_block].instructions;
        assert!(entry_insts.iter().any(|(_, i)| matches!(i, Inst::Param { index: 0 })));
        assert!(entry_insts.iter().any(|(_, i)| matches!(i, Inst::Store { .. })));
    }

    #[test]
    fn conditional_branch_targets_are_created_lazily() {
        let mut g = CfGraph::new(sig(None));
        let cond = g.add_local(LocalVariable::new("c", Type::Bool, true));
        let then_b = g.push_block();
        let else_b = g.push_block();
        let end = g.push_block();
        g.end_block = end;
        g.block_mut(g.entry_block()).set_conditional(cond, then_b, else_b);
        g.block_mut(then_b).set_jump(cond, end);
        g.block_mut(else_b).set_jump(cond, end);

        let func = lower_graph(&g);
        // entry + then + else + end
        assert_eq!(func.blocks.len(), 4);
        let term = func.blocks[func.entry_block].terminator.as_ref().unwrap();
        assert!(matches!(term, Terminator::Branch { .. }));
    }

    #[test]
    fn unconditional_jump_becomes_jump_terminator() {
        let mut g = CfGraph::new(sig(None));
        let dummy = g.add_local(LocalVariable::new("", Type::Bool, false));
        let end = g.push_block();
        g.end_block = end;
        g.block_mut(g.entry_block()).set_jump(dummy, end);

        let func = lower_graph(&g);
        let term = func.blocks[func.entry_block].terminator.as_ref().unwrap();
        assert!(matches!(term, Terminator::Jump(_)));
    }

    #[test]
    fn address_of_local_var_yields_slot_address_directly() {
        let mut g = CfGraph::new(sig(None));
        let x = g.add_local(LocalVariable::new("x", Type::SignedInt(32), false));
        let ptr = g.add_local(LocalVariable::new(
            "p",
            Type::Pointer(Box::new(Type::SignedInt(32))),
            false,
        ));
        g.block_mut(g.entry_block())
            .instructions
            .push(CfInstruction::address_of_local_var(ptr, x, Location::new("t.c", 1)));

        let func = lower_graph(&g);
        let entry_insts = &func.blocks[func.entry_block].instructions;
        // exactly one StackAddr feeding straight into the Store for `ptr`,
        // with no Load in between.
        let loads = entry_insts.iter().filter(|(_, i)| matches!(i, Inst::Load { .. })).count();
        assert_eq!(loads, 0);
    }
}
