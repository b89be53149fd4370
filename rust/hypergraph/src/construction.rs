// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mutation of the hypergraph store.
//!
//! Every mutation keeps the node set, the hyperedge set and the incidence
//! index consistent with each other. Removals are idempotent: removing an
//! absent entry is a silent no-op.

use smallvec::SmallVec;

use crate::graph::{EdgeSlot, Hypergraph, NodeSlot};
use crate::keys::*;
use crate::model::{HyperEdge, Node, NodeId};

impl Hypergraph {
    /// Adds a node, or replaces the attributes of the node with the same label.
    ///
    /// A replaced node keeps its original position in iteration order.
    pub fn add_node(&mut self, node: Node) -> NodeKey {
        if let Some(&key) = self.node_by_id.get(&node.id) {
            if let Some(slot) = self.nodes.get_mut(key) {
                slot.node = node;
            }
            return key;
        }

        let seq = self.take_seq();
        let id = node.id.clone();
        let key = self.nodes.insert(NodeSlot { node, seq });
        self.node_order.insert(seq, key);
        self.node_by_id.insert(id, key);
        key
    }

    /// Adds a hyperedge and any of its nodes that are not yet present.
    ///
    /// The store has set semantics: if a value-equal hyperedge (same tag and
    /// node set) is already live, nothing changes and its key is returned.
    /// Nodes already present are not updated from the hyperedge's copies.
    pub fn add_hyperedge(&mut self, edge: HyperEdge) -> EdgeKey {
        for node in edge.nodes() {
            if !self.contains_node(&node.id) {
                self.add_node(node.clone());
            }
        }

        let signature = edge.signature();
        if let Some(&existing) = self.edge_by_signature.get(&signature) {
            tracing::trace!(edge = %edge, "value-equal hyperedge already live, keeping it");
            return existing;
        }

        let ids = signature.nodes.clone();
        let seq = self.take_seq();
        let key = self.edges.insert(EdgeSlot { edge, seq });
        self.edge_order.insert(seq, key);
        self.edge_by_signature.insert(signature, key);
        for id in &ids {
            self.link_node_edge(id, key);
        }
        key
    }

    /// Removes the live hyperedge value-equal to `edge` and returns it.
    ///
    /// Returns `None` (and changes nothing) if no such hyperedge is live.
    pub fn remove_hyperedge(&mut self, edge: &HyperEdge) -> Option<HyperEdge> {
        let key = self.edge_by_signature.remove(&edge.signature())?;
        self.remove_edge_slot(key)
    }

    /// Removes the hyperedge stored under `key`.
    pub fn remove_hyperedge_by_key(&mut self, key: EdgeKey) -> Option<HyperEdge> {
        let signature = self.edges.get(key)?.edge.signature();
        self.edge_by_signature.remove(&signature);
        self.remove_edge_slot(key)
    }

    fn remove_edge_slot(&mut self, key: EdgeKey) -> Option<HyperEdge> {
        let slot = self.edges.remove(key)?;
        self.edge_order.remove(&slot.seq);
        let ids: SmallVec<[NodeId; 8]> = slot.edge.node_ids().cloned().collect();
        for id in &ids {
            self.unlink_node_edge(id, key);
        }
        Some(slot.edge)
    }

    /// Removes a node and returns it.
    ///
    /// Incident hyperedges are **not** removed; the caller is responsible for
    /// removing them first. Returns `None` if the node is absent.
    pub fn remove_node(&mut self, id: &NodeId) -> Option<Node> {
        let key = self.node_by_id.remove(id)?;
        let slot = self.nodes.remove(key)?;
        self.node_order.remove(&slot.seq);

        if let Some(incident) = self.incidence.get(id) {
            tracing::warn!(
                node = %id,
                incident = incident.len(),
                "removed a node that live hyperedges still reference"
            );
        }
        Some(slot.node)
    }

    /// Copies every node, then every hyperedge, of `fragment` into `self`.
    ///
    /// Nodes are merged first so a fragment can update node attributes (for
    /// example clearing the hanging flag) before its hyperedges land.
    pub fn merge(&mut self, fragment: &Hypergraph) {
        for node in fragment.nodes() {
            self.add_node(node.clone());
        }
        for edge in fragment.hyperedges() {
            self.add_hyperedge(edge.clone());
        }
    }
}
