//! Command-line surface (spec §6: "the compiler driver accepts a single
//! source file plus flags ...").

use std::path::PathBuf;

use clap::Parser;

use crate::options::OptLevel;

#[derive(Parser, Debug)]
#[command(name = "keel", about = "Compile a single source file to an object file")]
pub struct Cli {
    /// Source file to compile.
    pub input: PathBuf,

    /// Output object file path. Defaults to the input path with its
    /// extension replaced by `.o`.
    #[arg(short = 'o')]
    pub output: Option<PathBuf>,

    /// Optimization level, `-O0` through `-O3` (default `-O1`).
    #[arg(short = 'O', allow_hyphen_values = false)]
    pub opt_level: Option<OptLevel>,

    /// Increase diagnostic verbosity; repeatable (`-v`, `-vv`).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Stop after tokenizing and print the token stream.
    #[arg(long)]
    pub tokenize_only: bool,

    /// Stop after parsing and print the AST.
    #[arg(long)]
    pub parse_only: bool,

    /// Extra flags forwarded verbatim to the system linker.
    #[arg(long)]
    pub linker_flags: Option<String>,

    /// Rewrite the source file's expected-output comments to match actual
    /// output (test-suite maintenance flag).
    #[arg(long)]
    pub update: bool,
}
