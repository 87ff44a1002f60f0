//! Post-construction structural checks.
//!
//! The validator runs after a connections section closes. Its findings
//! are advisory only: a network that is connected-but-suspicious (no bias
//! fan-out, nodes that never send or never receive) still builds.

use super::graph::Network;
use super::types::{NodeCategory, NodeId};

/// Scan the synapse list for suspicious but legal structure.
///
/// Returns the findings as plain messages; the caller decides where to
/// report them (the parser appends them to its warning log at the
/// position active when the section closed).
pub fn validate_topology(net: &Network) -> Vec<String> {
    let mut findings = Vec::new();

    if !net.synapses().iter().any(|s| s.source.is_bias()) {
        findings.push(
            "are you sure you wanted to define a network with no bias connections \
             (connections with source 0)?"
                .to_string(),
        );
    }

    // every node but the bias and the outputs should send something
    for index in 1..net.node_count() {
        let id = NodeId(index);
        let category = net.category(id);
        if category == NodeCategory::Output {
            continue;
        }
        if !net.synapses().iter().any(|s| s.source == id) {
            findings.push(match category {
                NodeCategory::Input => {
                    format!("node {index} is an input node but does not send any signals")
                }
                _ => format!("node {index} is a hidden node that does not send any signals"),
            });
        }
    }

    // every node but the bias and the inputs should receive something
    for index in 1..net.node_count() {
        let id = NodeId(index);
        let category = net.category(id);
        if category == NodeCategory::Input {
            continue;
        }
        if !net.synapses().iter().any(|s| s.dest == id) {
            findings.push(match category {
                NodeCategory::Output => {
                    format!("node {index} is an output node but does not receive any signals")
                }
                _ => format!("node {index} is a hidden node that does not receive any signals"),
            });
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::types::{Accumulator, Activation};

    fn layered(inputs: usize, hidden: usize, outputs: usize) -> Network {
        let mut net = Network::new();
        if inputs > 0 {
            net.add_input_nodes(inputs, Accumulator::Linear, Activation::Id, 1);
        }
        if hidden > 0 {
            net.add_hidden_nodes(hidden, Accumulator::Linear, Activation::Tanh, 1);
        }
        if outputs > 0 {
            net.add_output_nodes(outputs, Accumulator::Linear, Activation::Id, 1);
        }
        net
    }

    #[test]
    fn fully_wired_network_with_bias_is_silent() {
        let mut net = layered(1, 1, 1);
        net.add_synapse(NodeId::BIAS, NodeId(2), 0.1);
        net.add_synapse(NodeId(1), NodeId(2), 0.5);
        net.add_synapse(NodeId(2), NodeId(3), 0.5);
        assert!(validate_topology(&net).is_empty());
    }

    #[test]
    fn missing_bias_fanout_is_reported() {
        let mut net = layered(1, 0, 1);
        net.add_synapse(NodeId(1), NodeId(2), 0.5);
        let findings = validate_topology(&net);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].contains("no bias connections"));
    }

    #[test]
    fn isolated_hidden_node_reported_in_both_directions() {
        let mut net = layered(1, 1, 1);
        net.add_synapse(NodeId::BIAS, NodeId(3), 0.1);
        net.add_synapse(NodeId(1), NodeId(3), 0.5);
        let findings = validate_topology(&net);
        assert_eq!(findings.len(), 2);
        assert!(findings[0].contains("node 2 is a hidden node that does not send"));
        assert!(findings[1].contains("node 2 is a hidden node that does not receive"));
    }

    #[test]
    fn silent_input_and_deaf_output_use_their_own_wording() {
        let mut net = layered(2, 0, 2);
        net.add_synapse(NodeId::BIAS, NodeId(3), 0.1);
        net.add_synapse(NodeId(1), NodeId(3), 0.5);
        let findings = validate_topology(&net);
        assert_eq!(findings.len(), 2);
        assert!(findings[0].contains("node 2 is an input node but does not send"));
        assert!(findings[1].contains("node 4 is an output node but does not receive"));
    }
}
