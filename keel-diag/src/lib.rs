//! The diagnostic sink (spec §6, §7).
//!
//! Two outcomes: a [`Severity::Warning`] prints and execution continues; a
//! [`Severity::Error`] prints and the translation unit's compilation stops.
//! At the driver level that means `std::process::exit`, via
//! [`ProcessExitSink`]; for library/test use, [`CollectingSink`] records the
//! same [`Diagnostic`] values without tearing down the process, matching the
//! open design note in spec §9 ("Replaceable with a returned error sum type
//! for library use").

use std::fmt;

use keel_ir::Location;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub severity: Severity,
    pub location: Location,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}: {}", self.location, self.severity, self.message)
    }
}

/// Receives diagnostics as the middle-end finds them.
///
/// No structured error value ever flows back up through a `Result` (spec
/// §6): control flow for a hard error is handled entirely inside the sink.
pub trait DiagnosticSink {
    fn warning(&mut self, location: Location, message: impl Into<String>);
    fn error(&mut self, location: Location, message: impl Into<String>);
    /// Has a hard error been reported since this sink was created (or since
    /// the last `clear_error`, for sinks that support resetting)? Pass
    /// orchestration (`keel-analysis::simplify`) polls this to stop running
    /// further passes on a function once compilation of it is doomed,
    /// mirroring "the first hard error terminates compilation" (spec §7).
    fn had_error(&self) -> bool;
}

/// The driver-facing sink: prints immediately, and aborts the process with
/// a non-zero status on the first error (spec §6, §7).
#[derive(Default)]
pub struct ProcessExitSink {
    had_error: bool,
}

impl DiagnosticSink for ProcessExitSink {
    fn warning(&mut self, location: Location, message: impl Into<String>) {
        let d = Diagnostic {
            severity: Severity::Warning,
            location,
            message: message.into(),
        };
        eprintln!("{}", d);
    }

    fn error(&mut self, location: Location, message: impl Into<String>) {
        let d = Diagnostic {
            severity: Severity::Error,
            location,
            message: message.into(),
        };
        eprintln!("{}", d);
        self.had_error = true;
        std::process::exit(1);
    }

    fn had_error(&self) -> bool {
        self.had_error
    }
}

/// A sink for library embedding and tests: records every diagnostic instead
/// of printing or exiting.
#[derive(Default)]
pub struct CollectingSink {
    pub diagnostics: Vec<Diagnostic>,
    had_error: bool,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }
}

impl DiagnosticSink for CollectingSink {
    fn warning(&mut self, location: Location, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            severity: Severity::Warning,
            location,
            message: message.into(),
        });
    }

    fn error(&mut self, location: Location, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            severity: Severity::Error,
            location,
            message: message.into(),
        });
        self.had_error = true;
    }

    fn had_error(&self) -> bool {
        self.had_error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collecting_sink_tracks_error_state() {
        let mut sink = CollectingSink::new();
        assert!(!sink.had_error());
        sink.warning(Location::new("a.c", 1), "unused import 'x'");
        assert!(!sink.had_error());
        sink.error(Location::new("a.c", 2), "must return a value");
        assert!(sink.had_error());
        assert_eq!(sink.warnings().count(), 1);
        assert_eq!(sink.errors().count(), 1);
    }

    #[test]
    fn diagnostic_display_matches_sink_format() {
        let d = Diagnostic {
            severity: Severity::Warning,
            location: Location::new("a.c", 7),
            message: "this code will never run".into(),
        };
        assert_eq!(format!("{}", d), "a.c:7: warning: this code will never run");
    }
}
