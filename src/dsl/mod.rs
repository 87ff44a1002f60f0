//! DSL front end for neural network topology scripts.
//!
//! This module reads an imperative topology-construction language and
//! incrementally builds a [`crate::network::Network`] as statements are
//! recognized. The front end is scannerless: statement recognizers work
//! directly on a bounded lookahead character stream, so there is no
//! separate token stream to keep in sync with the builder.
//!
//! # Grammar Overview
//!
//! ```text
//! script        = section*
//! section       = nodeSection | connSection
//! nodeSection   = "StartNodes" createStmt+ "EndNodes"
//! createStmt    = ("CreateInput" | "CreateHidden" | "CreateOutput")
//!                 "(" INT "," ACCUM "," ACTIV ["," INT] ")"
//! connSection   = "StartConnections" connectStmt+ "EndConnections"
//! connectStmt   = "Connect" "(" spanOrInt "," spanOrInt "," weightSpec ")"
//! spanOrInt     = INT | "{" INT INT "}"
//! weightSpec    = FLOAT | "Randomize" | "[" FLOAT* "]"
//!
//! INT           = ['+'|'-'] digit+
//! FLOAT         = ['+'|'-'] digit+ '.' digit+ [('e'|'E') ['+'|'-'] digit+]
//! ```
//!
//! Whitespace and comments (`#` to end of line) may appear between any
//! two tokens. `ACCUM` and `ACTIV` are fixed name enumerations
//! ([`crate::network::Accumulator`], [`crate::network::Activation`])
//! resolved at parse time; an unrecognized name is fatal.
//!
//! # Statements
//!
//! | Statement | Effect |
//! |-----------|--------|
//! | `CreateInput(n, accum, activ)` | append `n` input nodes after the existing inputs |
//! | `CreateHidden(n, accum, activ)` | append `n` hidden nodes after the existing hidden nodes |
//! | `CreateOutput(n, accum, activ)` | append `n` output nodes at the end |
//! | `Connect(a, b, w)` | one synapse per pairing of span `a` with span `b` |
//!
//! Parallel activations (those operating across a unit group, e.g.
//! `SOFTMAX`) take the group width as a fourth `Create*` argument. A
//! `Connect` weight spec is a single float applied uniformly, the keyword
//! `Randomize`, or a `[...]` matrix with exactly one value per pairing in
//! row-major order (first span outer).
//!
//! The node definition section may appear at most once, must create at
//! least one node, and must precede every connections section. Node
//! index 0 is the implicit bias node; it may source connections but never
//! receive them.
//!
//! # Example
//!
//! ```text
//! # XOR-ish topology
//! StartNodes
//!   CreateInput(2, LINEAR, ID)
//!   CreateHidden(2, LINEAR, TANH)
//!   CreateOutput(1, LINEAR, TANH)
//! EndNodes
//! StartConnections
//!   Connect(0, {3 5}, 1.0)          # bias fan-out
//!   Connect({1 2}, {3 4}, Randomize)
//!   Connect({3 4}, 5, [0.5 -0.5])
//! EndConnections
//! ```

mod lexer;
mod parser;
mod stream;

pub use parser::{Parsed, Parser};
pub use stream::SourceStream;

use std::io::Read;

use crate::error::Result;
use crate::network::WeightSource;

/// Parse a topology script from a string.
pub fn parse(input: &str) -> Result<Parsed> {
    parse_reader(input.as_bytes())
}

/// Parse a topology script from any reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<Parsed> {
    Parser::new(reader).parse()
}

/// Parse a topology script, drawing `Randomize` weights from the given
/// source.
pub fn parse_reader_with<R: Read, W: WeightSource>(reader: R, weights: W) -> Result<Parsed> {
    Parser::with_weights(reader, weights).parse()
}

/// Parse a topology script file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path) -> Result<Parsed> {
    let file = std::fs::File::open(path).map_err(|e| crate::error::NnetError::FileRead {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_reader(std::io::BufReader::new(file))
}
