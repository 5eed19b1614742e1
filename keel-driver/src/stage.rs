//! Trait seams for the pipeline stages this crate does not own (spec §6:
//! tokenizer/parser/typechecker/CFG-builder are "not in core scope"; object
//! emission, backend optimization, and linking are "external"). The driver
//! is written against these traits rather than concrete implementations,
//! the same way the teacher keeps its own compiler backend pluggable behind
//! a trait object instead of hard-wiring one ISA (`TargetIsa` in
//! `cranelift-codegen/src/isa/mod.rs`).

use std::path::Path;

use anyhow::{bail, Result};

use keel_ir::CfGraphFile;

use crate::options::Options;

/// Everything upstream of simplification: tokenizing, parsing,
/// typechecking, and AST→CFG construction (spec §6's "From
/// parser/typechecker" input boundary).
pub trait Frontend {
    fn build_cfg(&self, source: &Path, opts: &Options) -> Result<CfGraphFile>;
}

/// Everything downstream of lowering: verifying the backend module,
/// running its own optimization pipeline at `opts.opt_level`, and writing
/// an object file (spec §6's "To backend" boundary).
pub trait ObjectBackend {
    fn emit_object(&self, module: &keel_backend::BackendModule, opts: &Options) -> Result<()>;
}

/// Invokes the system linker on the object file the backend just wrote
/// (spec §6: "the driver writes a temporary object file per source file and
/// invokes the system linker").
pub trait Linker {
    fn link(&self, object: &Path, opts: &Options) -> Result<()>;
}

/// Stand-ins used until a real frontend/backend/linker is wired in. Every
/// method reports its own absence rather than panicking, so the driver
/// loop's error handling is exercised even with nothing real plugged in.
pub struct UnimplementedFrontend;
pub struct UnimplementedBackend;
pub struct UnimplementedLinker;

impl Frontend for UnimplementedFrontend {
    fn build_cfg(&self, _source: &Path, _opts: &Options) -> Result<CfGraphFile> {
        bail!("no frontend configured: tokenizing/parsing/typechecking is outside this crate's scope");
    }
}

impl ObjectBackend for UnimplementedBackend {
    fn emit_object(&self, _module: &keel_backend::BackendModule, _opts: &Options) -> Result<()> {
        bail!("no object backend configured: verification, optimization, and object emission are outside this crate's scope");
    }
}

impl Linker for UnimplementedLinker {
    fn link(&self, _object: &Path, _opts: &Options) -> Result<()> {
        bail!("no linker configured");
    }
}
