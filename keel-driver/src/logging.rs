//! Logger setup, wired to the `-v`/`-vv` verbosity flags (spec §6).
//!
//! `0` verbose flags: warnings only. One `-v`: `info` and the pass-level
//! `debug!` instrumentation in `keel-analysis`/`keel-backend`. Two or more:
//! `trace`, which also turns on the fixpoint engine's per-iteration logging
//! (`keel_analysis::fixpoint::run`).
pub fn init(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}
