// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Arena-based storage for the mesh hypergraph.
//!
//! The [`Hypergraph`] owns every live node and hyperedge. Entries sit in slot
//! maps with generational keys; three derived indices sit beside them:
//!
//! - label → node key, so node identity is resolved by label in O(1);
//! - edge signature (tag + node set) → edge key, which gives the store *set*
//!   semantics for hyperedges;
//! - node label → incident hyperedge keys (the incidence index behind
//!   [`Hypergraph::neighbors_of`]).
//!
//! ## Iteration order
//!
//! Every entry carries a sequence number assigned on first insertion.
//! [`Hypergraph::nodes`] and [`Hypergraph::hyperedges`] iterate in that order,
//! so "first match" during pattern search means "earliest inserted" and is
//! reproducible from run to run.

use std::collections::BTreeMap;

use rustc_hash::{FxHashMap, FxHashSet};
use slotmap::SlotMap;

use crate::keys::*;
use crate::model::{EdgeSignature, HyperEdge, Node, NodeId};

#[derive(Debug, Clone)]
pub(crate) struct NodeSlot {
    pub(crate) node: Node,
    pub(crate) seq: u64,
}

#[derive(Debug, Clone)]
pub(crate) struct EdgeSlot {
    pub(crate) edge: HyperEdge,
    pub(crate) seq: u64,
}

/// Node and hyperedge totals, as reported by [`Hypergraph::counts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeCount {
    /// Number of nodes.
    pub normal: usize,
    /// Number of hyperedges.
    pub hyper: usize,
}

/// The mesh hypergraph: nodes, hyperedges and their incidence index.
///
/// # Example
///
/// ```
/// use meshgram_hypergraph::{HyperEdge, Hypergraph, Node, BOUNDARY};
///
/// let mut graph = Hypergraph::new();
/// let a = Node::new("v0", 0.0, 0.0);
/// let b = Node::new("v1", 4.0, 0.0);
/// graph.add_hyperedge(HyperEdge::edge(a, b, false, BOUNDARY));
///
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.hyperedge_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Hypergraph {
    // Entity storage
    pub(crate) nodes: SlotMap<NodeKey, NodeSlot>,
    pub(crate) edges: SlotMap<EdgeKey, EdgeSlot>,

    // Insertion order: sequence number → key
    pub(crate) node_order: BTreeMap<u64, NodeKey>,
    pub(crate) edge_order: BTreeMap<u64, EdgeKey>,

    // Identity lookups
    pub(crate) node_by_id: FxHashMap<NodeId, NodeKey>,
    pub(crate) edge_by_signature: FxHashMap<EdgeSignature, EdgeKey>,

    // Incidence: node → hyperedges using it
    pub(crate) incidence: FxHashMap<NodeId, FxHashSet<EdgeKey>>,

    pub(crate) next_seq: u64,
}

impl Hypergraph {
    /// Creates an empty hypergraph.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            edges: SlotMap::with_key(),
            node_order: BTreeMap::new(),
            edge_order: BTreeMap::new(),
            node_by_id: FxHashMap::default(),
            edge_by_signature: FxHashMap::default(),
            incidence: FxHashMap::default(),
            next_seq: 0,
        }
    }

    // --- Node access ---

    /// Returns the number of live nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Iterates over live nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.node_order
            .values()
            .filter_map(move |&key| self.nodes.get(key).map(|slot| &slot.node))
    }

    /// Returns the node with the given label.
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        let key = *self.node_by_id.get(id)?;
        self.nodes.get(key).map(|slot| &slot.node)
    }

    /// Returns the slot key of a node label.
    pub fn node_key(&self, id: &NodeId) -> Option<NodeKey> {
        self.node_by_id.get(id).copied()
    }

    /// Returns `true` if a node with this label is live.
    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.node_by_id.contains_key(id)
    }

    /// Returns `true` if the node is live and flagged as hanging.
    pub fn is_hanging(&self, id: &NodeId) -> bool {
        self.node(id).is_some_and(|n| n.hanging)
    }

    // --- Hyperedge access ---

    /// Returns the number of live hyperedges.
    pub fn hyperedge_count(&self) -> usize {
        self.edges.len()
    }

    /// Iterates over live hyperedges in insertion order.
    pub fn hyperedges(&self) -> impl Iterator<Item = &HyperEdge> + '_ {
        self.hyperedges_with_keys().map(|(_, edge)| edge)
    }

    /// Iterates over `(key, hyperedge)` pairs in insertion order.
    pub fn hyperedges_with_keys(&self) -> impl Iterator<Item = (EdgeKey, &HyperEdge)> + '_ {
        self.edge_order
            .values()
            .filter_map(move |&key| self.edges.get(key).map(|slot| (key, &slot.edge)))
    }

    /// Returns the hyperedge stored under `key`.
    pub fn hyperedge(&self, key: EdgeKey) -> Option<&HyperEdge> {
        self.edges.get(key).map(|slot| &slot.edge)
    }

    /// Returns the live hyperedge value-equal (tag + node set) to `edge`.
    pub fn find_hyperedge(&self, edge: &HyperEdge) -> Option<&HyperEdge> {
        self.edge_key(edge).and_then(|key| self.hyperedge(key))
    }

    /// Returns the key of the live hyperedge value-equal to `edge`.
    pub fn edge_key(&self, edge: &HyperEdge) -> Option<EdgeKey> {
        self.edge_by_signature.get(&edge.signature()).copied()
    }

    /// Returns `true` if a value-equal hyperedge is live.
    pub fn contains_hyperedge(&self, edge: &HyperEdge) -> bool {
        self.edge_by_signature.contains_key(&edge.signature())
    }

    /// Iterates over live hyperedges with the given tag, in insertion order.
    pub fn hyperedges_with_tag(&self, tag: HyperTag) -> impl Iterator<Item = &HyperEdge> + '_ {
        self.hyperedges().filter(move |e| e.tag == tag)
    }

    // --- Summary ---

    /// Returns node and hyperedge totals.
    pub fn counts(&self) -> NodeCount {
        NodeCount {
            normal: self.node_count(),
            hyper: self.hyperedge_count(),
        }
    }

    /// Returns `true` if the graph has neither nodes nor hyperedges.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Number of live nodes flagged as hanging.
    pub fn hanging_count(&self) -> usize {
        self.nodes().filter(|n| n.hanging).count()
    }

    // --- Index helpers ---

    pub(crate) fn take_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// Register that a hyperedge uses a node.
    pub(crate) fn link_node_edge(&mut self, node: &NodeId, edge: EdgeKey) {
        self.incidence.entry(node.clone()).or_default().insert(edge);
    }

    /// Drop the incidence entry of a node for a hyperedge.
    pub(crate) fn unlink_node_edge(&mut self, node: &NodeId, edge: EdgeKey) {
        if let Some(set) = self.incidence.get_mut(node) {
            set.remove(&edge);
            if set.is_empty() {
                self.incidence.remove(node);
            }
        }
    }

    /// Sorts hyperedge keys by insertion order.
    pub(crate) fn sort_edge_keys(&self, keys: &mut [EdgeKey]) {
        keys.sort_by_key(|&k| self.edges.get(k).map_or(u64::MAX, |slot| slot.seq));
    }
}

impl Default for Hypergraph {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Hypergraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Hypergraph: {} nodes, {} hyperedges",
            self.node_count(),
            self.hyperedge_count()
        )?;
        for node in self.nodes() {
            writeln!(f, "  {}", node)?;
        }
        for edge in self.hyperedges() {
            writeln!(f, "  {}", edge)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BOUNDARY;

    #[test]
    fn new_graph_is_empty() {
        let graph = Hypergraph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.counts(), NodeCount { normal: 0, hyper: 0 });
        assert_eq!(graph.nodes().count(), 0);
        assert_eq!(graph.hyperedges().count(), 0);
    }

    #[test]
    fn default_creates_empty() {
        let graph = Hypergraph::default();
        assert_eq!(graph.node_count(), 0);
    }

    #[test]
    fn lookups_by_label() {
        let mut graph = Hypergraph::new();
        graph.add_node(Node::hanging("h", 1.0, 2.0));

        let id = NodeId::new("h");
        assert!(graph.contains_node(&id));
        assert!(graph.is_hanging(&id));
        assert_eq!(graph.node(&id).unwrap().y(), 2.0);
        assert!(graph.node_key(&id).is_some());
        assert!(!graph.contains_node(&NodeId::new("missing")));
        assert_eq!(graph.hanging_count(), 1);
    }

    #[test]
    fn display_lists_entries() {
        let mut graph = Hypergraph::new();
        graph.add_hyperedge(HyperEdge::edge(
            Node::new("a", 0.0, 0.0),
            Node::new("b", 1.0, 0.0),
            true,
            BOUNDARY,
        ));
        let text = graph.to_string();
        assert!(text.starts_with("Hypergraph: 2 nodes, 1 hyperedges"));
        assert!(text.contains("E[a, b] R=1 B=1"));
    }

    #[test]
    fn tag_filter() {
        let mut graph = Hypergraph::new();
        let a = Node::new("a", 0.0, 0.0);
        let b = Node::new("b", 1.0, 0.0);
        let c = Node::new("c", 1.0, 1.0);
        let d = Node::new("d", 0.0, 1.0);
        graph.add_hyperedge(HyperEdge::edge(a.clone(), b.clone(), false, BOUNDARY));
        graph.add_hyperedge(
            HyperEdge::new(vec![a, b, c, d], HyperTag::Quad, false, 0).unwrap(),
        );

        assert_eq!(graph.hyperedges_with_tag(HyperTag::Edge).count(), 1);
        assert_eq!(graph.hyperedges_with_tag(HyperTag::Quad).count(), 1);
        assert_eq!(graph.hyperedges_with_tag(HyperTag::Hexagon).count(), 0);
    }
}
