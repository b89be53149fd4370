// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Incidence queries backed by the node → hyperedge index.
//!
//! All results are returned in insertion order so callers that pick "the
//! first" candidate stay deterministic.

use rustc_hash::FxHashSet;

use crate::graph::Hypergraph;
use crate::keys::*;
use crate::model::{HyperEdge, Node, NodeId};

impl Hypergraph {
    /// Returns the keys of hyperedges incident to a node, in insertion order.
    pub fn incident_keys(&self, id: &NodeId) -> Vec<EdgeKey> {
        let mut keys: Vec<EdgeKey> = self
            .incidence
            .get(id)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default();
        self.sort_edge_keys(&mut keys);
        keys
    }

    /// Returns the hyperedges incident to a node, in insertion order.
    pub fn neighbors_of(&self, id: &NodeId) -> Vec<&HyperEdge> {
        self.incident_keys(id)
            .into_iter()
            .filter_map(|k| self.hyperedge(k))
            .collect()
    }

    /// Returns the hyperedges with `tag` that contain both `a` and `b`.
    pub fn edges_between(&self, a: &NodeId, b: &NodeId, tag: HyperTag) -> Vec<&HyperEdge> {
        self.neighbors_of(a)
            .into_iter()
            .filter(|e| e.tag == tag && e.contains(b))
            .collect()
    }

    /// Returns `true` if some hyperedge with `tag` contains both `a` and `b`.
    pub fn connected_by(&self, a: &NodeId, b: &NodeId, tag: HyperTag) -> bool {
        match self.incidence.get(a) {
            Some(keys) => keys.iter().any(|&k| {
                self.hyperedge(k)
                    .is_some_and(|e| e.tag == tag && e.contains(b))
            }),
            None => false,
        }
    }

    /// Returns the distinct nodes sharing a hyperedge of `tag` with `id`.
    ///
    /// Nodes are resolved against the store, so attributes such as the hanging
    /// flag are current. Order follows the incident hyperedges' insertion
    /// order, then their node tuples.
    pub fn adjacent_via(&self, id: &NodeId, tag: HyperTag) -> Vec<&Node> {
        let mut seen: FxHashSet<&NodeId> = FxHashSet::default();
        let mut result = Vec::new();

        for edge in self.neighbors_of(id) {
            if edge.tag != tag {
                continue;
            }
            for other in edge.node_ids() {
                if other == id || !seen.insert(other) {
                    continue;
                }
                if let Some(node) = self.node(other) {
                    result.push(node);
                }
            }
        }

        result
    }

    /// Returns the hyperedges whose whole node set lies inside `ids`.
    ///
    /// Candidates are gathered through the incidence index, so the cost is
    /// proportional to the neighbourhood of `ids`, not to the graph size.
    pub fn enclosed_hyperedges(&self, ids: &FxHashSet<NodeId>) -> Vec<&HyperEdge> {
        let mut keys: Vec<EdgeKey> = Vec::new();
        let mut seen: FxHashSet<EdgeKey> = FxHashSet::default();

        for id in ids {
            let Some(incident) = self.incidence.get(id) else {
                continue;
            };
            for &key in incident {
                if !seen.insert(key) {
                    continue;
                }
                let enclosed = self
                    .hyperedge(key)
                    .is_some_and(|e| e.node_ids().all(|n| ids.contains(n)));
                if enclosed {
                    keys.push(key);
                }
            }
        }

        self.sort_edge_keys(&mut keys);
        keys.into_iter().filter_map(|k| self.hyperedge(k)).collect()
    }

    /// Builds the sub-hypergraph induced by a set of nodes.
    ///
    /// The result holds the given nodes (resolved against the store when they
    /// are live, otherwise taken as passed) and a copy of every hyperedge whose
    /// node set is contained in them.
    pub fn induced_subgraph(&self, nodes: &[Node]) -> Hypergraph {
        let mut sub = Hypergraph::new();
        let mut ids: FxHashSet<NodeId> = FxHashSet::default();

        for node in nodes {
            let live = self.node(&node.id).unwrap_or(node);
            sub.add_node(live.clone());
            ids.insert(node.id.clone());
        }

        for edge in self.enclosed_hyperedges(&ids) {
            sub.add_hyperedge(edge.clone());
        }

        sub
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BOUNDARY, SHARED};

    /// Square a-b-c-d with its four edges and a quad element, plus a pendant
    /// edge c-e outside the square.
    fn make_square(graph: &mut Hypergraph) -> [Node; 5] {
        let a = Node::new("a", 0.0, 0.0);
        let b = Node::new("b", 1.0, 0.0);
        let c = Node::new("c", 1.0, 1.0);
        let d = Node::new("d", 0.0, 1.0);
        let e = Node::new("e", 2.0, 1.0);

        graph.add_hyperedge(HyperEdge::edge(a.clone(), b.clone(), false, BOUNDARY));
        graph.add_hyperedge(HyperEdge::edge(b.clone(), c.clone(), false, BOUNDARY));
        graph.add_hyperedge(HyperEdge::edge(c.clone(), d.clone(), false, BOUNDARY));
        graph.add_hyperedge(HyperEdge::edge(d.clone(), a.clone(), false, BOUNDARY));
        graph.add_hyperedge(
            HyperEdge::new(
                vec![a.clone(), b.clone(), c.clone(), d.clone()],
                HyperTag::Quad,
                false,
                0,
            )
            .unwrap(),
        );
        graph.add_hyperedge(HyperEdge::edge(c.clone(), e.clone(), false, SHARED));

        [a, b, c, d, e]
    }

    #[test]
    fn neighbors_returns_incident_in_order() {
        let mut graph = Hypergraph::new();
        let [a, ..] = make_square(&mut graph);

        let labels: Vec<String> = graph.neighbors_of(&a.id).into_iter().map(HyperEdge::label).collect();
        assert_eq!(labels, vec!["E_a_b", "E_d_a", "Q_a_b_c_d"]);
    }

    #[test]
    fn neighbors_of_unknown_node_is_empty() {
        let graph = Hypergraph::new();
        assert!(graph.neighbors_of(&NodeId::new("x")).is_empty());
    }

    #[test]
    fn edges_between_filters_by_tag() {
        let mut graph = Hypergraph::new();
        let [a, b, c, ..] = make_square(&mut graph);

        assert_eq!(graph.edges_between(&a.id, &b.id, HyperTag::Edge).len(), 1);
        assert_eq!(graph.edges_between(&a.id, &c.id, HyperTag::Edge).len(), 0);
        assert_eq!(graph.edges_between(&a.id, &c.id, HyperTag::Quad).len(), 1);
        assert!(graph.connected_by(&a.id, &b.id, HyperTag::Edge));
        assert!(!graph.connected_by(&a.id, &c.id, HyperTag::Edge));
    }

    #[test]
    fn adjacent_via_edges() {
        let mut graph = Hypergraph::new();
        let [_, _, c, ..] = make_square(&mut graph);

        let labels: Vec<&str> = graph
            .adjacent_via(&c.id, HyperTag::Edge)
            .into_iter()
            .map(Node::label)
            .collect();
        assert_eq!(labels, vec!["b", "d", "e"]);
    }

    #[test]
    fn induced_subgraph_excludes_outside_edges() {
        let mut graph = Hypergraph::new();
        let [a, b, c, d, _] = make_square(&mut graph);

        let sub = graph.induced_subgraph(&[a, b, c, d]);
        assert_eq!(sub.node_count(), 4);
        // 4 sides + the quad; the pendant c-e edge is not enclosed.
        assert_eq!(sub.hyperedge_count(), 5);
        assert!(sub.validate().is_ok());
    }

    #[test]
    fn induced_subgraph_of_single_edge() {
        let mut graph = Hypergraph::new();
        let [a, b, ..] = make_square(&mut graph);

        let sub = graph.induced_subgraph(&[a, b]);
        assert_eq!(sub.node_count(), 2);
        assert_eq!(sub.hyperedge_count(), 1);
        assert_eq!(sub.hyperedges().next().unwrap().label(), "E_a_b");
    }
}
