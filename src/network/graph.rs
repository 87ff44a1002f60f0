//! The network graph under construction.
//!
//! [`Network`] is the single mutable target of a parse: the grammar layer
//! appends node blocks and synapses as statements are recognized, and the
//! finished value is handed to downstream consumers unchanged. Node
//! indices form a dense range `[0, node_count)` with the bias node at
//! index 0, input nodes at the low end, output nodes at the high end, and
//! hidden nodes in between. Inserting a block anywhere but the end shifts
//! every higher-indexed node upward; that shift is one explicit splice
//! operation that also remaps recorded synapse endpoints, so arrays
//! parallel to node index never drift apart.

use std::fmt;

use super::types::{Accumulator, Activation, NodeCategory, NodeId, Synapse};

/// Attributes of a single node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub accumulator: Accumulator,
    pub activation: Activation,
    /// Width of the unit group for parallel activations; 1 otherwise.
    pub unit_width: usize,
}

/// The index range populated by one append operation, plus the range of
/// pre-existing nodes that were renumbered to make room (if any).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeBlock {
    /// Index of the first node in the new block
    pub first: usize,
    /// Index of the last node in the new block
    pub last: usize,
    /// Inclusive index range of nodes shifted upward by the insertion
    pub renumbered: Option<(usize, usize)>,
}

/// A neural network graph: categorized nodes plus weighted directed
/// synapses.
#[derive(Debug, Default)]
pub struct Network {
    nodes: Vec<Node>,
    input_count: usize,
    output_count: usize,
    synapses: Vec<Synapse>,
}

impl Network {
    /// Create an empty network. The bias node springs into existence with
    /// the first node append.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of nodes, bias included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// True before any node has been created.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of input nodes.
    pub fn input_count(&self) -> usize {
        self.input_count
    }

    /// Number of output nodes.
    pub fn output_count(&self) -> usize {
        self.output_count
    }

    /// Number of hidden nodes, derived from the totals.
    pub fn hidden_count(&self) -> usize {
        if self.nodes.is_empty() {
            0
        } else {
            self.nodes.len() - self.input_count - self.output_count - 1
        }
    }

    /// Attributes of one node, if it exists.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// All nodes in index order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All synapses in creation order.
    pub fn synapses(&self) -> &[Synapse] {
        &self.synapses
    }

    /// Number of synapses created so far.
    pub fn synapse_count(&self) -> usize {
        self.synapses.len()
    }

    /// Logical category of a node index. Inputs occupy `1..=input_count`,
    /// outputs the top `output_count` indices, hidden nodes the middle.
    pub fn category(&self, id: NodeId) -> NodeCategory {
        if id.is_bias() {
            NodeCategory::Bias
        } else if id.0 <= self.input_count {
            NodeCategory::Input
        } else if id.0 >= self.nodes.len() - self.output_count {
            NodeCategory::Output
        } else {
            NodeCategory::Hidden
        }
    }

    /// Append `count` input nodes after the existing inputs. Hidden and
    /// output nodes already present shift upward by `count`; the returned
    /// block reports both ranges so the caller can raise the renumbering
    /// advisory.
    pub fn add_input_nodes(
        &mut self,
        count: usize,
        accumulator: Accumulator,
        activation: Activation,
        unit_width: usize,
    ) -> NodeBlock {
        self.ensure_bias();
        let displaced = self.hidden_count() + self.output_count;
        let at = 1 + self.input_count;
        self.insert_block(
            at,
            count,
            Node {
                accumulator,
                activation,
                unit_width,
            },
        );
        self.input_count += count;
        NodeBlock {
            first: at,
            last: at + count - 1,
            renumbered: (displaced > 0).then(|| (self.input_count + 1, self.nodes.len() - 1)),
        }
    }

    /// Append `count` hidden nodes after the existing hidden nodes.
    /// Output nodes already present shift upward by `count`.
    pub fn add_hidden_nodes(
        &mut self,
        count: usize,
        accumulator: Accumulator,
        activation: Activation,
        unit_width: usize,
    ) -> NodeBlock {
        self.ensure_bias();
        let at = self.nodes.len() - self.output_count;
        self.insert_block(
            at,
            count,
            Node {
                accumulator,
                activation,
                unit_width,
            },
        );
        NodeBlock {
            first: at,
            last: at + count - 1,
            renumbered: (self.output_count > 0)
                .then(|| (self.nodes.len() - self.output_count, self.nodes.len() - 1)),
        }
    }

    /// Append `count` output nodes at the end. Never renumbers.
    pub fn add_output_nodes(
        &mut self,
        count: usize,
        accumulator: Accumulator,
        activation: Activation,
        unit_width: usize,
    ) -> NodeBlock {
        self.ensure_bias();
        let at = self.nodes.len();
        self.insert_block(
            at,
            count,
            Node {
                accumulator,
                activation,
                unit_width,
            },
        );
        self.output_count += count;
        NodeBlock {
            first: at,
            last: at + count - 1,
            renumbered: None,
        }
    }

    /// Record a synapse. Duplicate and parallel edges between the same
    /// pair are legal; their effect is additive and left to the consumer.
    pub fn add_synapse(&mut self, source: NodeId, dest: NodeId, weight: f64) {
        self.synapses.push(Synapse {
            source,
            dest,
            weight,
        });
    }

    fn ensure_bias(&mut self) {
        if self.nodes.is_empty() {
            self.nodes.push(Node {
                accumulator: Accumulator::Linear,
                activation: Activation::Id,
                unit_width: 1,
            });
        }
    }

    /// Splice `count` copies of `node` in at index `at`. Every node at or
    /// above `at` shifts up by `count`, and synapse endpoints follow so
    /// they keep naming the same logical nodes.
    fn insert_block(&mut self, at: usize, count: usize, node: Node) {
        self.nodes
            .splice(at..at, std::iter::repeat(node).take(count));
        for synapse in &mut self.synapses {
            if synapse.source.0 >= at {
                synapse.source.0 += count;
            }
            if synapse.dest.0 >= at {
                synapse.dest.0 += count;
            }
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} nodes created. Node 0 is a bias node.", self.node_count())?;
        if self.input_count > 0 {
            writeln!(f, "Nodes {{1 {}}} are input nodes.", self.input_count)?;
        }
        if self.hidden_count() > 0 {
            writeln!(
                f,
                "Nodes {{{} {}}} are hidden nodes.",
                self.input_count + 1,
                self.node_count() - 1 - self.output_count
            )?;
        }
        if self.output_count > 0 {
            writeln!(
                f,
                "Nodes {{{} {}}} are output nodes.",
                self.node_count() - self.output_count,
                self.node_count() - 1
            )?;
        }
        for (index, node) in self.nodes.iter().enumerate().skip(1) {
            writeln!(
                f,
                "  N{}: {}, accum {}, transfer {}, width {}",
                index,
                self.category(NodeId(index)),
                node.accumulator.token(),
                node.activation.token(),
                node.unit_width
            )?;
        }
        writeln!(f, "{} connections created.", self.synapse_count())?;
        for (index, synapse) in self.synapses.iter().enumerate() {
            writeln!(
                f,
                "  #{}: {} -({:.3})-> {}",
                index, synapse.source, synapse.weight, synapse.dest
            )?;
        }
        Ok(())
    }
}
