//! The backend's scalar type set (spec §4.9).
//!
//! Deliberately smaller than `keel_ir::Type`: the backend never sees a
//! `Named` class/enum type (those are lowered to their underlying
//! representation upstream of this contract, which is out of scope here —
//! §1) and has no use for a `Type`/`BackendType` distinction beyond bit
//! width and pointer-vs-scalar.

use std::fmt;

use keel_ir::Type;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendType {
    I1,
    Int(u32),
    Ptr,
}

impl BackendType {
    /// Lower a middle-end `Type` to its backend representation. Integers
    /// keep their declared width; booleans become `I1`; pointers and named
    /// types (opaque to this crate) become the generic pointer type (spec
    /// §4.9: "integers are 32-bit unless otherwise typed; booleans are
    /// 1-bit" describes constants without a declared type, not locals,
    /// which always carry one).
    pub fn lower(ty: &Type) -> Self {
        match ty {
            Type::Bool => BackendType::I1,
            Type::SignedInt(w) | Type::UnsignedInt(w) => BackendType::Int(*w),
            Type::Pointer(_) | Type::Named(_) => BackendType::Ptr,
        }
    }
}

impl fmt::Display for BackendType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BackendType::I1 => write!(f, "i1"),
            BackendType::Int(w) => write!(f, "i{}", w),
            BackendType::Ptr => write!(f, "ptr"),
        }
    }
}
