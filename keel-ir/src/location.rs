//! Source locations attached to AST nodes and CFG instructions.
//!
//! Used only for diagnostics; the core analyses never branch on a
//! `Location`'s contents.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

/// `(filename, lineno)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Location {
    file: Rc<str>,
    pub line: u32,
}

impl Location {
    /// Build a location from a filename and a 1-based line number.
    pub fn new(file: impl Into<Rc<str>>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// The source file this location points into.
    pub fn file(&self) -> &str {
        &self.file
    }
}

/// Locations order by line within the same file; this is what the grouped
/// unreachable-block warning (spec §4.4, "earliest source location") and the
/// line-level dedup rely on.
impl PartialOrd for Location {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Location {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line.cmp(&other.line)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}
