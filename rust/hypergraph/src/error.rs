// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for hypergraph operations.

use crate::model::NodeId;

/// Result type alias for hypergraph operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or validating a hypergraph.
///
/// Failing to find a match is never an error: matching reports `false` or
/// `None`. These variants cover construction mistakes and broken invariants.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A hyperedge must connect at least two nodes.
    #[error("hyperedge needs at least 2 nodes, got {arity}")]
    DegenerateHyperEdge { arity: usize },

    /// A hyperedge lists the same node twice.
    #[error("hyperedge lists node {node} more than once")]
    RepeatedNode { node: NodeId },

    /// A referenced node was not found in the store.
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    /// A live hyperedge references a node missing from the node set.
    #[error("hyperedge {edge} references missing node {node}")]
    DanglingReference { edge: String, node: NodeId },

    /// The incidence index disagrees with the hyperedge set.
    #[error("incidence index out of sync: {0}")]
    IndexMismatch(String),

    /// Two live hyperedges share the same tag and node set.
    #[error("duplicate hyperedge: {0}")]
    DuplicateHyperEdge(String),
}
