//! Network graph representation, construction, and validation.
//!
//! This module owns the target of a parse: the [`Network`] the grammar
//! layer builds statement by statement, the category and function-tag
//! types attached to nodes, the advisory topology validator, and the
//! weight source used by randomized connections.

mod graph;
mod random;
mod types;
mod validate;

pub use graph::{Network, Node, NodeBlock};
pub use random::{UniformWeights, WeightSource, DEFAULT_WEIGHT_MAX, DEFAULT_WEIGHT_MIN};
pub use types::{Accumulator, Activation, NodeCategory, NodeId, Synapse};
pub use validate::validate_topology;
