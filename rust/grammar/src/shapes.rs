// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Canonical left-hand shapes and the structural comparison used to check a
//! sub-hypergraph against them.
//!
//! The comparison is a signature check (node count, hanging count, the
//! multiset of `(tag, arity, R, B)` over hyperedges and the node-degree
//! multiset). That separates all the fixed shapes of the rule family from one
//! another; it is not a general isomorphism test.

use meshgram_hypergraph::{
    regular_polygon, HyperEdge, HyperTag, Hypergraph, Node, Point, BOUNDARY, SHARED,
};

use crate::error::Result;
use crate::rules::split::midpoint_label;

/// Structural fingerprint of a hypergraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeSignature {
    pub nodes: usize,
    pub hanging: usize,
    pub hyperedges: Vec<(HyperTag, usize, bool, i32)>,
    pub degrees: Vec<usize>,
}

impl ShapeSignature {
    pub fn of(graph: &Hypergraph) -> Self {
        let mut hyperedges: Vec<(HyperTag, usize, bool, i32)> = graph
            .hyperedges()
            .map(|e| (e.tag, e.signature().nodes.len(), e.r, e.b))
            .collect();
        hyperedges.sort();

        let mut degrees: Vec<usize> = graph
            .nodes()
            .map(|n| graph.neighbors_of(&n.id).len())
            .collect();
        degrees.sort_unstable();

        Self {
            nodes: graph.node_count(),
            hanging: graph.hanging_count(),
            hyperedges,
            degrees,
        }
    }
}

fn polygon_corners(arity: usize) -> Vec<Node> {
    regular_polygon(arity, Point::default(), 1.0)
        .into_iter()
        .enumerate()
        .map(|(i, p)| Node::new(format!("v{i}"), p.x, p.y))
        .collect()
}

/// An element with an unsplit boundary ring: edges R=0/B=1, element R=`marked`.
pub(crate) fn element_with_ring(element: HyperTag, marked: bool) -> Result<Hypergraph> {
    let arity = element.element_arity().unwrap_or(0);
    let corners = polygon_corners(arity);

    let mut graph = Hypergraph::new();
    for i in 0..arity {
        graph.add_hyperedge(HyperEdge::edge(
            corners[i].clone(),
            corners[(i + 1) % arity].clone(),
            false,
            BOUNDARY,
        ));
    }
    graph.add_hyperedge(HyperEdge::new(corners, element, marked, SHARED)?);
    Ok(graph)
}

/// A single marked edge carrying boundary payload `b`.
pub(crate) fn marked_edge(b: i32) -> Hypergraph {
    let mut graph = Hypergraph::new();
    graph.add_hyperedge(HyperEdge::edge(
        Node::new("v0", 0.0, 0.0),
        Node::new("v1", 1.0, 0.0),
        true,
        b,
    ));
    graph
}

/// A marked element whose sides are each split by a hanging midpoint.
pub(crate) fn element_with_split_sides(element: HyperTag) -> Result<Hypergraph> {
    let arity = element.element_arity().unwrap_or(0);
    let corners = polygon_corners(arity);

    let mut graph = Hypergraph::new();
    for i in 0..arity {
        let a = &corners[i];
        let b = &corners[(i + 1) % arity];
        let m = a.position.midpoint(&b.position);
        let h = Node::hanging(midpoint_label(&a.id, &b.id), m.x, m.y);
        graph.add_hyperedge(HyperEdge::edge(a.clone(), h.clone(), false, BOUNDARY));
        graph.add_hyperedge(HyperEdge::edge(h, b.clone(), false, BOUNDARY));
    }
    graph.add_hyperedge(HyperEdge::new(corners, element, true, SHARED)?);
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_shape_counts() {
        let graph = element_with_ring(HyperTag::Pentagon, false).unwrap();
        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.hyperedge_count(), 6);
        assert!(graph.validate().is_ok());
    }

    #[test]
    fn split_sides_shape_counts() {
        let graph = element_with_split_sides(HyperTag::Hexagon).unwrap();
        assert_eq!(graph.node_count(), 12);
        assert_eq!(graph.hanging_count(), 6);
        assert_eq!(graph.hyperedge_count(), 13);
    }

    #[test]
    fn signature_distinguishes_mark_state() {
        let unmarked = ShapeSignature::of(&element_with_ring(HyperTag::Quad, false).unwrap());
        let marked = ShapeSignature::of(&element_with_ring(HyperTag::Quad, true).unwrap());
        assert_ne!(unmarked, marked);
        assert_eq!(unmarked.degrees, vec![3, 3, 3, 3]);
    }

    #[test]
    fn signature_ignores_labels_and_order() {
        let mut a = Hypergraph::new();
        a.add_hyperedge(HyperEdge::edge(Node::new("x", 0.0, 0.0), Node::new("y", 1.0, 0.0), true, BOUNDARY));
        let b = marked_edge(BOUNDARY);
        assert_eq!(ShapeSignature::of(&a), ShapeSignature::of(&b));
        assert_ne!(ShapeSignature::of(&a), ShapeSignature::of(&marked_edge(SHARED)));
    }
}
