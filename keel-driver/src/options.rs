//! Resolved, immutable compiler options (spec §5: "the global command-line
//! options struct ... read-only during core execution").

use std::path::PathBuf;
use std::str::FromStr;

use crate::cli::Cli;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum OptLevel {
    O0,
    O1,
    O2,
    O3,
}

/// Parses the digit glued onto `-O` (`-O0` .. `-O3`), not a bare enum name —
/// matching the gcc/clang convention the spec's flag list is written in
/// (spec §6: "`-O0..-O3`").
impl FromStr for OptLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0" => Ok(OptLevel::O0),
            "1" => Ok(OptLevel::O1),
            "2" => Ok(OptLevel::O2),
            "3" => Ok(OptLevel::O3),
            other => Err(format!("invalid optimization level '-O{other}' (expected 0-3)")),
        }
    }
}

/// Built once from parsed CLI arguments and never mutated afterward; every
/// pass and the driver loop take `&Options` (spec §5).
#[derive(Debug)]
pub struct Options {
    pub input: PathBuf,
    pub output: PathBuf,
    pub opt_level: OptLevel,
    pub verbosity: u8,
    pub tokenize_only: bool,
    pub parse_only: bool,
    pub linker_flags: Option<String>,
    pub update: bool,
}

impl Options {
    pub fn from_cli(cli: Cli) -> Self {
        let output = cli.output.unwrap_or_else(|| default_output_path(&cli.input));
        Self {
            input: cli.input,
            output,
            opt_level: cli.opt_level.unwrap_or(OptLevel::O1),
            verbosity: cli.verbose,
            tokenize_only: cli.tokenize_only,
            parse_only: cli.parse_only,
            linker_flags: cli.linker_flags,
            update: cli.update,
        }
    }
}

fn default_output_path(input: &std::path::Path) -> PathBuf {
    input.with_extension("o")
}
