// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Label lookups and consistency checks.

use crate::error::{Error, Result};
use crate::graph::Hypergraph;
use crate::model::{HyperEdge, Node, NodeId};

impl Hypergraph {
    /// Returns the node with the given label.
    pub fn get_node_by_label(&self, label: &str) -> Option<&Node> {
        self.node(&NodeId::new(label))
    }

    /// Returns the node with the given label, or [`Error::NodeNotFound`].
    pub fn require_node(&self, id: &NodeId) -> Result<&Node> {
        self.node(id).ok_or_else(|| Error::NodeNotFound(id.clone()))
    }

    /// Returns the first live hyperedge whose textual label equals `label`.
    ///
    /// Labels follow the stored node order (`"E_v0_v1"`), so the same edge
    /// written the other way round is not found.
    pub fn get_hyperedge_by_label(&self, label: &str) -> Option<&HyperEdge> {
        self.hyperedges().find(|e| e.label() == label)
    }

    /// Checks the store's structural invariants.
    ///
    /// - every node referenced by a live hyperedge is live;
    /// - every hyperedge has at least two distinct nodes;
    /// - no two live hyperedges share tag and node set;
    /// - the incidence index lists exactly the live incidences;
    /// - the insertion-order maps cover every live entry.
    pub fn validate(&self) -> Result<()> {
        for (key, edge) in self.hyperedges_with_keys() {
            if edge.arity() < 2 {
                return Err(Error::DegenerateHyperEdge {
                    arity: edge.arity(),
                });
            }
            if edge.signature().nodes.len() < edge.arity() {
                let ids = edge.node_ids().collect::<Vec<_>>();
                if let Some(node) = ids.iter().enumerate().find_map(|(i, id)| ids[..i].contains(id).then_some(*id)) {
                    return Err(Error::RepeatedNode { node: node.clone() });
                }
            }

            for id in edge.node_ids() {
                if !self.contains_node(id) {
                    return Err(Error::DanglingReference {
                        edge: edge.label(),
                        node: id.clone(),
                    });
                }
                let linked = self
                    .incidence
                    .get(id)
                    .is_some_and(|set| set.contains(&key));
                if !linked {
                    return Err(Error::IndexMismatch(format!(
                        "{} missing from incidence of {}",
                        edge.label(),
                        id
                    )));
                }
            }

            match self.edge_by_signature.get(&edge.signature()) {
                Some(&indexed) if indexed == key => {}
                Some(_) => return Err(Error::DuplicateHyperEdge(edge.label())),
                None => {
                    return Err(Error::IndexMismatch(format!(
                        "{} missing from signature index",
                        edge.label()
                    )))
                }
            }
        }

        if self.edge_by_signature.len() != self.edges.len() {
            return Err(Error::IndexMismatch(format!(
                "signature index holds {} entries for {} hyperedges",
                self.edge_by_signature.len(),
                self.edges.len()
            )));
        }

        for (id, keys) in &self.incidence {
            for &key in keys {
                let ok = self.hyperedge(key).is_some_and(|e| e.contains(id));
                if !ok {
                    return Err(Error::IndexMismatch(format!(
                        "stale incidence entry for {}",
                        id
                    )));
                }
            }
        }

        if self.node_order.len() != self.nodes.len() || self.edge_order.len() != self.edges.len() {
            return Err(Error::IndexMismatch("insertion order out of sync".into()));
        }
        if self.node_by_id.len() != self.nodes.len() {
            return Err(Error::IndexMismatch("node label index out of sync".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::HyperTag;
    use crate::model::BOUNDARY;

    fn triangle_fan() -> Hypergraph {
        let mut graph = Hypergraph::new();
        let a = Node::new("a", 0.0, 0.0);
        let b = Node::new("b", 2.0, 0.0);
        let c = Node::new("c", 2.0, 2.0);
        let d = Node::new("d", 0.0, 2.0);
        graph.add_hyperedge(HyperEdge::edge(a.clone(), b.clone(), false, BOUNDARY));
        graph.add_hyperedge(HyperEdge::edge(b.clone(), c.clone(), false, BOUNDARY));
        graph.add_hyperedge(HyperEdge::new(vec![a, b, c, d], HyperTag::Quad, false, 0).unwrap());
        graph
    }

    #[test]
    fn lookup_by_label() {
        let graph = triangle_fan();
        assert_eq!(graph.get_node_by_label("c").unwrap().x(), 2.0);
        assert!(graph.get_node_by_label("z").is_none());

        assert!(graph.get_hyperedge_by_label("E_a_b").is_some());
        assert!(graph.get_hyperedge_by_label("E_b_a").is_none());
        assert!(graph.get_hyperedge_by_label("Q_a_b_c_d").is_some());
    }

    #[test]
    fn require_node_reports_missing_label() {
        let graph = triangle_fan();
        assert!(graph.require_node(&NodeId::new("a")).is_ok());
        match graph.require_node(&NodeId::new("z")) {
            Err(Error::NodeNotFound(id)) => assert_eq!(id.as_str(), "z"),
            other => panic!("expected NodeNotFound, got {:?}", other),
        }
    }

    #[test]
    fn consistent_store_validates() {
        let mut graph = triangle_fan();
        assert!(graph.validate().is_ok());

        let ab = graph.get_hyperedge_by_label("E_a_b").unwrap().clone();
        graph.remove_hyperedge(&ab);
        assert!(graph.validate().is_ok());
    }

    #[test]
    fn dangling_reference_is_reported() {
        let mut graph = triangle_fan();
        graph.remove_node(&NodeId::new("d"));

        match graph.validate() {
            Err(Error::DanglingReference { node, .. }) => assert_eq!(node.as_str(), "d"),
            other => panic!("expected dangling reference, got {:?}", other),
        }
    }

    #[test]
    fn edge_loop_is_reported() {
        let mut graph = triangle_fan();
        let a = graph.get_node_by_label("a").unwrap().clone();
        graph.add_hyperedge(HyperEdge::edge(a.clone(), a, false, BOUNDARY));

        match graph.validate() {
            Err(Error::RepeatedNode { node }) => assert_eq!(node.as_str(), "a"),
            other => panic!("expected repeated node, got {:?}", other),
        }
    }

    #[test]
    fn corrupted_incidence_is_reported() {
        let mut graph = triangle_fan();
        graph.incidence.clear();
        assert!(matches!(graph.validate(), Err(Error::IndexMismatch(_))));
    }
}
