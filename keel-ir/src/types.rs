//! The `Type` tagged variant (spec §3 DATA MODEL).

use std::fmt;

/// A type as seen by the middle-end. Equality is structural, matching the
/// spec's "Equality is structural" note.
///
/// `Named` stands in for the broader compiler's class/enum references,
/// which live in typechecker-owned tables out of this crate's scope (§1);
/// the middle-end only ever needs to know such a type exists and compare it
/// by name, never to inspect its fields.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    Pointer(Box<Type>),
    SignedInt(u32),
    UnsignedInt(u32),
    Bool,
    Named(String),
}

impl Type {
    /// Width in bits, for the types that have one. Booleans are 1-bit
    /// per spec §3; pointers and named types have no scalar width here.
    pub fn width_bits(&self) -> Option<u32> {
        match self {
            Type::Bool => Some(1),
            Type::SignedInt(w) | Type::UnsignedInt(w) => Some(*w),
            Type::Pointer(_) | Type::Named(_) => None,
        }
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Type::Bool)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Type::Pointer(inner) => write!(f, "*{}", inner),
            Type::SignedInt(w) => write!(f, "i{}", w),
            Type::UnsignedInt(w) => write!(f, "u{}", w),
            Type::Bool => write!(f, "bool"),
            Type::Named(name) => write!(f, "{}", name),
        }
    }
}
