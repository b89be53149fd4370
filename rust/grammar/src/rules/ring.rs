// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Intact-ring check shared by the mark and propagate rules.

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use meshgram_hypergraph::{HyperEdge, HyperTag, Hypergraph, NodeId};

/// Returns the bounding `E` edges of `element` if they form an intact ring.
///
/// The ring is intact when the element has exactly `arity` distinct corners,
/// exactly `arity` two-node `E` edges are enclosed by those corners, every
/// corner has degree 2 in them and they form a single cycle. Edges come back
/// in insertion order.
pub(crate) fn intact_ring<'g>(graph: &'g Hypergraph, element: &HyperEdge) -> Option<Vec<&'g HyperEdge>> {
    let arity = element.tag.element_arity()?;

    let corners: FxHashSet<NodeId> = element.node_ids().cloned().collect();
    if corners.len() != arity {
        return None;
    }

    let ring: Vec<&HyperEdge> = graph
        .enclosed_hyperedges(&corners)
        .into_iter()
        .filter(|e| e.tag == HyperTag::Edge)
        .collect();
    if ring.len() != arity || ring.iter().any(|e| e.arity() != 2) {
        tracing::trace!(element = %element, edges = ring.len(), "ring edge count mismatch");
        return None;
    }

    let mut adjacency: FxHashMap<&NodeId, SmallVec<[&NodeId; 2]>> = FxHashMap::default();
    for edge in &ring {
        let ends: SmallVec<[&NodeId; 2]> = edge.node_ids().collect();
        adjacency.entry(ends[0]).or_default().push(ends[1]);
        adjacency.entry(ends[1]).or_default().push(ends[0]);
    }
    if adjacency.len() != arity || adjacency.values().any(|n| n.len() != 2) {
        tracing::trace!(element = %element, "ring corner degree is not 2");
        return None;
    }

    // Degree 2 everywhere means a union of cycles; one cycle iff connected.
    let start = adjacency.keys().next().copied()?;
    let mut visited: FxHashSet<&NodeId> = FxHashSet::default();
    let mut stack = vec![start];
    while let Some(id) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }
        if let Some(next) = adjacency.get(id) {
            stack.extend(next.iter().copied().filter(|n| !visited.contains(n)));
        }
    }
    if visited.len() != arity {
        tracing::trace!(element = %element, "ring is split into several cycles");
        return None;
    }

    Some(ring)
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshgram_hypergraph::{Node, BOUNDARY};

    fn square_with_edges(pairs: &[(usize, usize)]) -> (Hypergraph, HyperEdge) {
        let nodes = [
            Node::new("a", 0.0, 0.0),
            Node::new("b", 1.0, 0.0),
            Node::new("c", 1.0, 1.0),
            Node::new("d", 0.0, 1.0),
        ];
        let mut graph = Hypergraph::new();
        for &(i, j) in pairs {
            graph.add_hyperedge(HyperEdge::edge(nodes[i].clone(), nodes[j].clone(), false, BOUNDARY));
        }
        let quad = HyperEdge::new(nodes.to_vec(), HyperTag::Quad, false, 0).unwrap();
        graph.add_hyperedge(quad.clone());
        (graph, quad)
    }

    #[test]
    fn complete_ring_is_found() {
        let (graph, quad) = square_with_edges(&[(0, 1), (1, 2), (2, 3), (3, 0)]);
        let ring = intact_ring(&graph, &quad).unwrap();
        assert_eq!(ring.len(), 4);
    }

    #[test]
    fn missing_side_is_rejected() {
        let (graph, quad) = square_with_edges(&[(0, 1), (1, 2), (2, 3)]);
        assert!(intact_ring(&graph, &quad).is_none());
    }

    #[test]
    fn diagonal_instead_of_side_is_rejected() {
        // Four edges, but a-c replaces d-a: degrees are not all 2.
        let (graph, quad) = square_with_edges(&[(0, 1), (1, 2), (2, 3), (0, 2)]);
        assert!(intact_ring(&graph, &quad).is_none());
    }

    #[test]
    fn two_cycles_are_rejected() {
        // Hexagon corners covered by two triangles: six edges, degree 2
        // everywhere, but not a single ring.
        let nodes: Vec<Node> = (0..6).map(|i| Node::new(format!("v{i}"), i as f64, 0.0)).collect();
        let mut graph = Hypergraph::new();
        for (i, j) in [(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)] {
            graph.add_hyperedge(HyperEdge::edge(nodes[i].clone(), nodes[j].clone(), false, BOUNDARY));
        }
        let hexagon = HyperEdge::new(nodes, HyperTag::Hexagon, false, 0).unwrap();
        graph.add_hyperedge(hexagon.clone());

        assert!(intact_ring(&graph, &hexagon).is_none());
    }

    #[test]
    fn edges_are_not_elements() {
        let (graph, _) = square_with_edges(&[(0, 1), (1, 2), (2, 3), (3, 0)]);
        let edge = graph.hyperedges_with_tag(HyperTag::Edge).next().unwrap();
        assert!(intact_ring(&graph, edge).is_none());
    }
}
