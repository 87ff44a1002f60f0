//! Error types for the nnet topology builder.
//!
//! This module provides a unified error type [`NnetError`] covering every
//! fatal condition the script front end can hit: malformed literals,
//! grammar violations, and the semantic checks applied to recognized
//! statements. Fatal errors carry the 1-based line and the column that
//! were current when the error was raised; they terminate the parse
//! immediately and no partial network is returned.
//!
//! Advisory (non-fatal) findings are not errors; see [`crate::diag`].

use thiserror::Error;

/// Result type alias using [`NnetError`].
pub type Result<T> = std::result::Result<T, NnetError>;

/// Unified error type for all nnet operations.
#[derive(Error, Debug)]
pub enum NnetError {
    /// Malformed numeric or literal token
    #[error("Line {line} Col {column}: {message}")]
    Lexical {
        line: usize,
        column: usize,
        message: String,
    },

    /// Grammar violation inside a recognized statement or section
    #[error("Line {line} Col {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// A name did not match any entry of a fixed enumeration
    #[error("Line {line} Col {column}: expected the name of an {kind} function: {expected}")]
    UnknownName {
        line: usize,
        column: usize,
        kind: &'static str,
        expected: String,
    },

    /// A Connect statement referenced a node with a negative index
    #[error("Line {line} Col {column}: Connect statement contains a negative node id")]
    NegativeNodeId { line: usize, column: usize },

    /// A Connect statement named the bias node as a destination
    #[error("Line {line} Col {column}: Connect statement names the bias node as a destination")]
    BiasAsDestination { line: usize, column: usize },

    /// A Connect statement referenced a node that does not exist yet
    #[error("Line {line} Col {column}: Connect statement contains node index {index} but the network has {node_count} nodes")]
    NodeIndexOutOfRange {
        line: usize,
        column: usize,
        index: i64,
        node_count: usize,
    },

    /// A second node definition section was found
    #[error("Line {line} Col {column}: only one node definition section is allowed per script")]
    DuplicateNodeSection { line: usize, column: usize },

    /// A connections section was found before any nodes were defined
    #[error("Line {line} Col {column}: found 'StartConnections' before 'StartNodes'; nodes cannot be connected before they are defined")]
    ConnectionsBeforeNodes { line: usize, column: usize },

    /// The parser reached a state its own dispatch rules rule out
    #[error("Line {line} Col {column}: internal parser error: {message}")]
    Internal {
        line: usize,
        column: usize,
        message: String,
    },

    /// Error opening or reading the script file
    #[error("failed to read script file '{path}': {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl NnetError {
    /// Create a lexical error
    pub fn lexical(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::Lexical {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a syntax error
    pub fn syntax(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create an internal-consistency error
    pub fn internal(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::Internal {
            line,
            column,
            message: message.into(),
        }
    }
}
