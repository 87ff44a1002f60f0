//! Deferred advisory diagnostics.
//!
//! Warnings describe suspicious but legal structure (renumbered node
//! blocks, isolated nodes, a missing bias fan-out). They never stop the
//! parse: the log is append-only while parsing runs and is drained exactly
//! once afterwards, so a script either fails with a single fatal error or
//! succeeds with the full ordered list of advisories.

use std::fmt;

/// A single advisory finding, tagged with the position that was current
/// when it was raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// 1-based line number
    pub line: usize,
    /// Characters accepted on that line so far (0 directly after a newline)
    pub column: usize,
    /// Human-readable description
    pub message: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Line {:>3} Col {:>3} : {}",
            self.line, self.column, self.message
        )
    }
}

/// Append-only collection of warnings raised during one parse invocation.
#[derive(Debug, Default)]
pub struct WarningLog {
    entries: Vec<Warning>,
}

impl WarningLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning at the given position.
    pub fn push(&mut self, line: usize, column: usize, message: impl Into<String>) {
        self.entries.push(Warning {
            line,
            column,
            message: message.into(),
        });
    }

    /// Number of warnings recorded so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drain the log, yielding the warnings in the order they were raised.
    pub fn into_warnings(self) -> Vec<Warning> {
        self.entries
    }
}
