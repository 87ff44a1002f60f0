//! Recursive-descent grammar over the topology script.
//!
//! Every statement recognizer follows the same shape: peek for the
//! distinguishing leading keyword and return `false` without consuming
//! anything if it is absent, so the caller can try alternatives; once the
//! keyword is accepted, every subsequent violation is fatal. There is no
//! speculative backtracking mid-statement.

use std::io::Read;

use super::stream::SourceStream;
use crate::diag::{Warning, WarningLog};
use crate::error::{NnetError, Result};
use crate::network::{
    validate_topology, Accumulator, Activation, Network, NodeId, UniformWeights, WeightSource,
};

/// Result of a successful parse: the finished network plus the advisory
/// warnings accumulated along the way, in the order they were raised.
#[derive(Debug)]
pub struct Parsed {
    /// The constructed network graph
    pub network: Network,
    /// Deferred warnings, drained from the log exactly once
    pub warnings: Vec<Warning>,
}

/// Parser state for one invocation: the lookahead stream, the deferred
/// warning log, the network under construction, and the weight source
/// consulted by `Randomize` connect statements.
///
/// A parser is single-use: [`Parser::parse`] consumes it and yields the
/// finished [`Parsed`] value or the first fatal error. The reader and any
/// transient buffers are released on every exit path.
pub struct Parser<R: Read, W: WeightSource> {
    pub(super) stream: SourceStream<R>,
    pub(super) warnings: WarningLog,
    net: Network,
    weights: W,
}

/// Which node-creation keyword opened the current statement.
enum CreateKind {
    Input,
    Hidden,
    Output,
}

/// How a Connect statement specifies its weights.
enum WeightSpec {
    Uniform(f64),
    Randomize,
    Matrix(Vec<f64>),
}

impl<R: Read> Parser<R, UniformWeights> {
    /// Create a parser over `reader` with the default uniform weight
    /// source.
    pub fn new(reader: R) -> Self {
        Self::with_weights(reader, UniformWeights::default())
    }
}

impl<R: Read, W: WeightSource> Parser<R, W> {
    /// Create a parser over `reader` drawing randomized weights from
    /// `weights`.
    pub fn with_weights(reader: R, weights: W) -> Self {
        Self {
            stream: SourceStream::new(reader),
            warnings: WarningLog::new(),
            net: Network::new(),
            weights,
        }
    }

    /// Top-level driver: alternate between node and connection sections
    /// until the stream holds neither section keyword. Anything after the
    /// last section is left unconsumed.
    pub fn parse(mut self) -> Result<Parsed> {
        self.skip_to_next();
        if self.stream.token_available("StartNodes") == 0
            && self.stream.token_available("StartConnections") == 0
        {
            return Err(self.syntax("expected 'StartNodes' or 'StartConnections'"));
        }
        while self.stream.token_available("StartNodes") > 0
            || self.stream.token_available("StartConnections") > 0
        {
            if !self.read_node_section()? && !self.read_connections_section()? {
                return Err(
                    self.internal("a section keyword was available but no section reader took it")
                );
            }
            self.skip_to_next();
        }
        Ok(Parsed {
            network: self.net,
            warnings: self.warnings.into_warnings(),
        })
    }

    /// `StartNodes createStmt+ EndNodes`. Allowed at most once per parse.
    fn read_node_section(&mut self) -> Result<bool> {
        self.skip_to_next();
        if self.stream.accept_token("StartNodes") == 0 {
            return Ok(false);
        }
        if !self.net.is_empty() {
            return Err(NnetError::DuplicateNodeSection {
                line: self.stream.line(),
                column: self.stream.column(),
            });
        }
        if !self.read_create_node_stmt()? {
            return Err(self.syntax(
                "no node definitions found; expected 'CreateInput', 'CreateHidden' or 'CreateOutput'",
            ));
        }
        while self.read_create_node_stmt()? {}
        self.skip_to_next();
        if self.stream.accept_token("EndNodes") == 0 {
            return Err(self.syntax("expected 'EndNodes' terminator after the node definition section"));
        }
        if self.net.is_empty() {
            return Err(self.syntax("no nodes created"));
        }
        Ok(true)
    }

    /// `StartConnections connectStmt+ EndConnections`, followed by the
    /// advisory topology validation pass.
    fn read_connections_section(&mut self) -> Result<bool> {
        self.skip_to_next();
        if self.stream.accept_token("StartConnections") == 0 {
            return Ok(false);
        }
        if self.net.is_empty() {
            return Err(NnetError::ConnectionsBeforeNodes {
                line: self.stream.line(),
                column: self.stream.column(),
            });
        }
        self.skip_to_next();
        if !self.read_connect_stmt()? {
            return Err(self.syntax("no 'Connect' statement found"));
        }
        while self.read_connect_stmt()? {}
        self.skip_to_next();
        if self.stream.accept_token("EndConnections") == 0 {
            return Err(
                self.syntax("expected a 'Connect' statement or the 'EndConnections' terminator")
            );
        }
        if self.net.synapse_count() == 0 {
            return Err(self.syntax("no connections created"));
        }
        for finding in validate_topology(&self.net) {
            self.warn(finding);
        }
        Ok(true)
    }

    /// `CreateInput|CreateHidden|CreateOutput ( count , accum , activ
    /// [, width] )`. The width argument is required exactly when the
    /// activation is parallel.
    fn read_create_node_stmt(&mut self) -> Result<bool> {
        self.skip_to_next();
        let kind = if self.stream.accept_token("CreateInput") > 0 {
            CreateKind::Input
        } else if self.stream.accept_token("CreateHidden") > 0 {
            CreateKind::Hidden
        } else if self.stream.accept_token("CreateOutput") > 0 {
            CreateKind::Output
        } else {
            return Ok(false);
        };
        self.skip_to_next();
        if self.stream.accept_token("(") == 0 {
            return Err(self.syntax("expected '(' after the node creation keyword"));
        }
        self.skip_to_next();
        if !self.number_available() {
            return Err(
                self.syntax("the first argument of a node creation statement must be an integer")
            );
        }
        let count = self.read_integer()?;
        if count <= 0 {
            return Err(self.syntax("cannot create fewer than one node"));
        }
        self.expect_comma()?;
        let accumulator = self.read_accumulator_name()?;
        self.expect_comma()?;
        let activation = self.read_activation_name()?;
        let mut unit_width = 1;
        if activation.is_parallel() {
            self.skip_to_next();
            if self.stream.accept_token(",") == 0 {
                return Err(self.syntax(
                    "expected ','; parallel activation functions take the unit width in nodes as a fourth argument",
                ));
            }
            self.skip_to_next();
            if !self.number_available() {
                return Err(self.syntax("expected an integer unit width"));
            }
            unit_width = self.read_integer()?;
            if unit_width <= 0 {
                return Err(self.syntax("unit width must be at least one node"));
            }
        }
        self.skip_to_next();
        if self.stream.accept_token(")") == 0 {
            return Err(self.syntax("expected ')' at the end of a node creation statement"));
        }

        let count = count as usize;
        let width = unit_width as usize;
        match kind {
            CreateKind::Input => {
                let block = self.net.add_input_nodes(count, accumulator, activation, width);
                if let Some((low, high)) = block.renumbered {
                    self.warn(format!(
                        "new input nodes are numbered {} to {}; existing hidden and output nodes have been renumbered {} to {}",
                        block.first, block.last, low, high
                    ));
                }
            }
            CreateKind::Hidden => {
                let block = self.net.add_hidden_nodes(count, accumulator, activation, width);
                if let Some((low, high)) = block.renumbered {
                    self.warn(format!(
                        "new hidden nodes are numbered {} to {}; existing output nodes have been renumbered {} to {}",
                        block.first, block.last, low, high
                    ));
                }
            }
            CreateKind::Output => {
                self.net.add_output_nodes(count, accumulator, activation, width);
            }
        }
        Ok(true)
    }

    /// `Connect ( spanOrInt , spanOrInt , weightSpec )`. Appends one
    /// synapse per pairing in the cross product of the two spans, first
    /// span outer, second span inner.
    fn read_connect_stmt(&mut self) -> Result<bool> {
        self.skip_to_next();
        if self.stream.accept_token("Connect") == 0 {
            return Ok(false);
        }
        self.skip_to_next();
        if self.stream.accept_token("(") == 0 {
            return Err(self.syntax("expected '(' after 'Connect'"));
        }
        let (first_low, first_high) = self.read_span_or_int()?;
        self.expect_comma()?;
        let (second_low, second_high) = self.read_span_or_int()?;
        self.expect_comma()?;
        self.skip_to_next();
        let spec = if self.number_available() {
            WeightSpec::Uniform(self.read_float()?)
        } else if self.stream.accept_token("Randomize") > 0 {
            WeightSpec::Randomize
        } else if self.stream.token_available("[") > 0 {
            let rows = (first_high - first_low + 1) as usize;
            let cols = (second_high - second_low + 1) as usize;
            match self.read_weight_matrix(rows.saturating_mul(cols))? {
                Some(weights) => WeightSpec::Matrix(weights),
                None => return Err(self.internal("matrix lookahead and matrix reader disagree")),
            }
        } else {
            return Err(self.syntax("expected a floating-point value, 'Randomize', or '['"));
        };
        self.skip_to_next();
        if self.stream.accept_token(")") == 0 {
            return Err(self.syntax("expected ')' at the end of a Connect statement"));
        }

        if first_low < 0 || second_low < 0 {
            return Err(NnetError::NegativeNodeId {
                line: self.stream.line(),
                column: self.stream.column(),
            });
        }
        if second_low == 0 {
            return Err(NnetError::BiasAsDestination {
                line: self.stream.line(),
                column: self.stream.column(),
            });
        }
        let node_count = self.net.node_count();
        if first_high >= node_count as i64 || second_high >= node_count as i64 {
            return Err(NnetError::NodeIndexOutOfRange {
                line: self.stream.line(),
                column: self.stream.column(),
                index: first_high.max(second_high),
                node_count,
            });
        }

        let cols = (second_high - second_low + 1) as usize;
        for (i, source) in (first_low..=first_high).enumerate() {
            for (j, dest) in (second_low..=second_high).enumerate() {
                let weight = match &spec {
                    WeightSpec::Uniform(w) => *w,
                    WeightSpec::Randomize => self.weights.next_weight(),
                    WeightSpec::Matrix(m) => m[i * cols + j],
                };
                self.net
                    .add_synapse(NodeId(source as usize), NodeId(dest as usize), weight);
            }
        }
        Ok(true)
    }

    /// Either a `{low high}` span or a single integer treated as a span
    /// of one.
    fn read_span_or_int(&mut self) -> Result<(i64, i64)> {
        self.skip_to_next();
        if self.stream.token_available("{") > 0 {
            match self.read_int_span()? {
                Some(span) => Ok(span),
                None => Err(self.internal("span lookahead and span reader disagree")),
            }
        } else if self.number_available() {
            let id = self.read_integer()?;
            Ok((id, id))
        } else {
            Err(self.syntax("expected an integer or '{'"))
        }
    }

    fn expect_comma(&mut self) -> Result<()> {
        self.skip_to_next();
        if self.stream.accept_token(",") == 0 {
            return Err(self.syntax("expected ',' between arguments"));
        }
        self.skip_to_next();
        Ok(())
    }

    /// Match the next token against the accumulator enumeration.
    fn read_accumulator_name(&mut self) -> Result<Accumulator> {
        for accumulator in Accumulator::ALL {
            if self.stream.accept_token(accumulator.token()) > 0 {
                return Ok(accumulator);
            }
        }
        Err(self.unknown_name("accumulator", Accumulator::ALL.iter().map(|a| a.token())))
    }

    /// Match the next token against the activation enumeration.
    fn read_activation_name(&mut self) -> Result<Activation> {
        for activation in Activation::ALL {
            if self.stream.accept_token(activation.token()) > 0 {
                return Ok(activation);
            }
        }
        Err(self.unknown_name("activation", Activation::ALL.iter().map(|a| a.token())))
    }

    fn unknown_name<'a>(
        &self,
        kind: &'static str,
        names: impl Iterator<Item = &'a str>,
    ) -> NnetError {
        NnetError::UnknownName {
            line: self.stream.line(),
            column: self.stream.column(),
            kind,
            expected: names.collect::<Vec<_>>().join(" "),
        }
    }

    /// Record an advisory warning at the current position.
    fn warn(&mut self, message: impl Into<String>) {
        self.warnings
            .push(self.stream.line(), self.stream.column(), message);
    }

    pub(crate) fn lexical(&self, message: impl Into<String>) -> NnetError {
        NnetError::lexical(self.stream.line(), self.stream.column(), message)
    }

    pub(crate) fn syntax(&self, message: impl Into<String>) -> NnetError {
        NnetError::syntax(self.stream.line(), self.stream.column(), message)
    }

    pub(crate) fn internal(&self, message: impl Into<String>) -> NnetError {
        NnetError::internal(self.stream.line(), self.stream.column(), message)
    }
}
