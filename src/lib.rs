//! # Nnet Core
//!
//! A script-driven neural network topology builder.
//!
//! This library provides:
//! - A custom DSL for describing network topologies (node creation,
//!   ranged connection statements, inline weight matrices)
//! - An incrementally built network graph with a bias node, categorized
//!   node blocks, and weighted directed synapses
//! - A post-construction structural validator that emits advisory
//!   warnings without rejecting the network
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`dsl`] - Lookahead stream, lexical primitives, and the
//!   recursive-descent grammar for the topology language
//! - [`network`] - Network graph representation, builder operations,
//!   weight sources, and topology validation
//! - [`diag`] - Deferred advisory warnings, flushed once after a
//!   successful parse
//! - [`error`] - Fatal error taxonomy with source positions
//!
//! ## Usage
//!
//! ```
//! use nnet_core::dsl;
//!
//! let script = "
//! StartNodes
//!   CreateInput(2, LINEAR, ID)
//!   CreateOutput(1, LINEAR, TANH)
//! EndNodes
//! StartConnections
//!   Connect({1 2}, 3, 0.5)
//! EndConnections
//! ";
//! let parsed = dsl::parse(script).unwrap();
//! assert_eq!(parsed.network.node_count(), 4);
//! assert_eq!(parsed.network.synapse_count(), 2);
//! ```
//!
//! ## Error model
//!
//! Failures split into two tiers. Grammar and semantic violations are
//! fatal: the parse stops at the first one with a located message and no
//! partial network is returned. Structural suspicions (renumbered node
//! blocks, isolated nodes, a missing bias fan-out) are advisory: they
//! accumulate during the parse and come back alongside the finished
//! network, never blocking construction.

pub mod diag;
pub mod dsl;
pub mod error;
pub mod network;

// Re-export main types for convenience
pub use diag::Warning;
pub use dsl::{parse, Parsed};
pub use error::{NnetError, Result};
pub use network::Network;
