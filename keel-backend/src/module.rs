//! `BackendModule`: the object handed to the external backend (spec §6,
//! "the lowering step returns a backend module object that is subsequently
//! verified, optionally optimized ..., and written to an object file").

use crate::function::BackendFunction;

#[derive(Default)]
pub struct BackendModule {
    pub functions: Vec<BackendFunction>,
}

impl BackendModule {
    pub fn new() -> Self {
        Self::default()
    }
}
