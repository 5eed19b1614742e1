//! `CfInstruction` and its `kind`s (spec §3).

use crate::constant::Constant;
use crate::entities::Local;
use crate::location::Location;

/// The operation an instruction performs, restricted to the kinds the
/// dataflow engine (§4.1) and the lowering contract (§4.9) treat specially.
/// Everything else collapses into `Other`, which for analysis purposes just
/// defines `destvar` and uses every operand — exactly spec §3's "Other
/// kinds (calls, arithmetic, field access, ...): for dataflow purposes they
/// simply *define* `destvar` (status DEFINED) and *use* all `operands`."
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InstKind {
    /// `destvar := operands[0]`.
    Varcpy,
    /// `destvar := &operands[0]`. Taints `operands[0]` to `UNPREDICTABLE`.
    AddressOfLocalVar,
    /// `destvar := data.constant`.
    Constant(Constant),
    /// Any other opcode: calls, arithmetic, field access, loads through a
    /// pointer, and so on. `name` is purely cosmetic (used by the pretty
    /// printer and by backend lowering to pick an instruction shape); the
    /// dataflow engine never inspects it.
    Other { name: &'static str },
}

impl InstKind {
    pub fn mnemonic(&self) -> &'static str {
        match self {
            InstKind::Varcpy => "varcpy",
            InstKind::AddressOfLocalVar => "address_of_local_var",
            InstKind::Constant(_) => "constant",
            InstKind::Other { name } => name,
        }
    }
}

/// One instruction in a `CfBlock`.
///
/// Invariant (spec §3): if `destvar` is present, the instruction defines it;
/// every entry in `operands` is a read-use.
#[derive(Clone, Debug)]
pub struct CfInstruction {
    pub kind: InstKind,
    pub operands: Vec<Local>,
    pub destvar: Option<Local>,
    pub location: Location,
    /// Suppresses the "this code will never run" warning when this
    /// instruction is the first one in an unreachable block — used for
    /// compiler-inserted epilogue code (spec §3).
    pub hide_unreachable_warning: bool,
}

impl CfInstruction {
    pub fn new(kind: InstKind, operands: Vec<Local>, destvar: Option<Local>, location: Location) -> Self {
        Self {
            kind,
            operands,
            destvar,
            location,
            hide_unreachable_warning: false,
        }
    }

    /// Builder-style setter, used by compiler-inserted epilogue code (e.g. an
    /// implicit `return` after a `main` function body) that must not trigger
    /// an unreachable-code warning on its own.
    pub fn hiding_unreachable_warning(mut self) -> Self {
        self.hide_unreachable_warning = true;
        self
    }

    pub fn varcpy(dest: Local, src: Local, location: Location) -> Self {
        Self::new(InstKind::Varcpy, vec![src], Some(dest), location)
    }

    pub fn address_of_local_var(dest: Local, src: Local, location: Location) -> Self {
        Self::new(InstKind::AddressOfLocalVar, vec![src], Some(dest), location)
    }

    pub fn constant(dest: Local, value: Constant, location: Location) -> Self {
        Self::new(InstKind::Constant(value), vec![], Some(dest), location)
    }
}
