//! Core types for the network graph.

use std::fmt;

/// A node index in the network.
/// Node 0 is always the bias node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The bias node (always index 0).
    pub const BIAS: NodeId = NodeId(0);

    /// Check if this is the bias node.
    pub fn is_bias(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_bias() {
            write!(f, "BIAS")
        } else {
            write!(f, "N{}", self.0)
        }
    }
}

/// Logical role of a node, derived from its position and the network's
/// category counts. Categories are never stored per node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeCategory {
    Bias,
    Input,
    Hidden,
    Output,
}

impl fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeCategory::Bias => "bias",
            NodeCategory::Input => "input",
            NodeCategory::Hidden => "hidden",
            NodeCategory::Output => "output",
        };
        write!(f, "{name}")
    }
}

/// Per-node function combining incoming weighted signals before the
/// activation function is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accumulator {
    Linear,
    Legendre,
    Laguerre,
    Fourier,
}

impl Accumulator {
    /// All accumulators, in token-matching order.
    pub const ALL: [Accumulator; 4] = [
        Accumulator::Linear,
        Accumulator::Legendre,
        Accumulator::Laguerre,
        Accumulator::Fourier,
    ];

    /// The script keyword naming this accumulator.
    pub fn token(&self) -> &'static str {
        match self {
            Accumulator::Linear => "LINEAR",
            Accumulator::Legendre => "LEGENDRE",
            Accumulator::Laguerre => "LAGUERRE",
            Accumulator::Fourier => "FOURIER",
        }
    }
}

/// Activation (transfer) function mapping a node's accumulated input to
/// its output signal. The variants at the tail are parallel: they operate
/// across a fixed-width group of nodes rather than one node at a time and
/// therefore require a unit width at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Tanh,
    ExpSigned,
    Exp,
    Softsign,
    Ramp,
    Softramp,
    Id,
    Pol1,
    Pol2,
    Softmax,
    Maxpool,
}

impl Activation {
    /// All activations, in token-matching order. `EXP_SIGNED` precedes
    /// `EXP` so the longer token wins the literal match; the parallel
    /// variants sit at the tail.
    pub const ALL: [Activation; 11] = [
        Activation::Tanh,
        Activation::ExpSigned,
        Activation::Exp,
        Activation::Softsign,
        Activation::Ramp,
        Activation::Softramp,
        Activation::Id,
        Activation::Pol1,
        Activation::Pol2,
        Activation::Softmax,
        Activation::Maxpool,
    ];

    /// The script keyword naming this activation.
    pub fn token(&self) -> &'static str {
        match self {
            Activation::Tanh => "TANH",
            Activation::ExpSigned => "EXP_SIGNED",
            Activation::Exp => "EXP",
            Activation::Softsign => "SOFTSIGN",
            Activation::Ramp => "RAMP",
            Activation::Softramp => "SOFTRAMP",
            Activation::Id => "ID",
            Activation::Pol1 => "POL1",
            Activation::Pol2 => "POL2",
            Activation::Softmax => "SOFTMAX",
            Activation::Maxpool => "MAXPOOL",
        }
    }

    /// True for activations computed across a unit group rather than a
    /// single node. These require an explicit unit width in node-creation
    /// statements.
    pub fn is_parallel(&self) -> bool {
        matches!(self, Activation::Softmax | Activation::Maxpool)
    }
}

/// A directed, weighted edge from a source node to a destination node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Synapse {
    pub source: NodeId,
    pub dest: NodeId,
    pub weight: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exp_signed_precedes_exp_in_match_order() {
        let signed = Activation::ALL
            .iter()
            .position(|a| *a == Activation::ExpSigned);
        let plain = Activation::ALL.iter().position(|a| *a == Activation::Exp);
        assert!(signed < plain);
    }

    #[test]
    fn parallel_activations_sit_at_the_tail() {
        let first_parallel = Activation::ALL
            .iter()
            .position(|a| a.is_parallel())
            .expect("at least one parallel activation");
        assert!(Activation::ALL[first_parallel..]
            .iter()
            .all(|a| a.is_parallel()));
    }

    #[test]
    fn bias_node_display() {
        assert_eq!(NodeId::BIAS.to_string(), "BIAS");
        assert_eq!(NodeId(3).to_string(), "N3");
        assert!(NodeId(0).is_bias());
        assert!(!NodeId(1).is_bias());
    }
}
