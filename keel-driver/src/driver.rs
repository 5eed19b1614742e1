//! Top-level pipeline: frontend → simplify → lower → backend → link (spec
//! §4.8, §6).

use anyhow::{Context, Result};

use keel_backend::lower_file;
use keel_diag::{DiagnosticSink, ProcessExitSink};

use crate::options::Options;
use crate::stage::{Frontend, Linker, ObjectBackend};

/// Run the whole compilation for `opts.input`. Returns the process exit
/// code (spec §6: "Exit codes: 0 success, non-zero on diagnostics-
/// terminated or linker/runtime failure").
pub fn run(
    opts: &Options,
    frontend: &dyn Frontend,
    backend: &dyn ObjectBackend,
    linker: &dyn Linker,
) -> Result<i32> {
    log::info!("compiling {}", opts.input.display());

    let mut file = frontend
        .build_cfg(&opts.input, opts)
        .with_context(|| format!("failed to build CFG for {}", opts.input.display()))?;

    if opts.tokenize_only || opts.parse_only {
        log::info!("stopping early: --tokenize-only/--parse-only (frontend-only mode)");
        return Ok(0);
    }

    // `ProcessExitSink::error` aborts the process itself (spec §7); reaching
    // the line after `simplify_file` means no hard error was reported.
    let mut sink = ProcessExitSink::default();
    keel_analysis::simplify_file(&mut file, &mut sink);
    debug_assert!(!sink.had_error(), "ProcessExitSink::error always exits before returning");

    let module = lower_file(&file);
    backend
        .emit_object(&module, opts)
        .with_context(|| format!("backend failed to emit {}", opts.output.display()))?;

    linker
        .link(&opts.output, opts)
        .with_context(|| "linking failed".to_string())?;

    Ok(0)
}
