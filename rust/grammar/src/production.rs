// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The production contract: left-hand shape, match finding and right-hand
//! rewrite, over a closed set of rule kinds.
//!
//! Productions hold no mutable state. A production finds its first match in
//! store insertion order, so repeated runs over equal inputs make the same
//! choices.

use meshgram_hypergraph::{HyperEdge, HyperTag, Hypergraph, BOUNDARY, SHARED};

use crate::error::Result;
use crate::rules::{mark, propagate, refine, split};
use crate::shapes::{self, ShapeSignature};

/// Which edges a split production targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// Edges on the mesh boundary (B=1).
    Boundary,
    /// Internal edges shared by two elements (B=0).
    Shared,
}

impl EdgeKind {
    /// B value of edges of this kind.
    pub fn payload(&self) -> i32 {
        match self {
            EdgeKind::Boundary => BOUNDARY,
            EdgeKind::Shared => SHARED,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::Boundary => "boundary",
            EdgeKind::Shared => "shared",
        }
    }
}

/// A rewrite rule of the refinement grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Production {
    /// Element R 0→1, given an intact ring of bounding edges.
    Mark { element: HyperTag },
    /// Every bounding edge of a marked element to R=1.
    Propagate { element: HyperTag },
    /// Marked edge → two unmarked halves through a hanging midpoint.
    Split { kind: EdgeKind },
    /// Marked element with all sides split → fan of quads around a center.
    Refine { element: HyperTag },
}

impl Production {
    /// Stable name, e.g. `"mark-hexagon"` or `"split-boundary-edge"`.
    pub fn name(&self) -> String {
        match self {
            Production::Mark { element } => format!("mark-{}", element.name()),
            Production::Propagate { element } => format!("propagate-{}", element.name()),
            Production::Split { kind } => format!("split-{}-edge", kind.as_str()),
            Production::Refine { element } => format!("refine-{}", element.name()),
        }
    }

    /// One-line human readable summary of the rewrite.
    pub fn description(&self) -> String {
        match self {
            Production::Mark { element } => format!("mark {} for refinement", element.name()),
            Production::Propagate { element } => {
                format!("propagate refinement mark to {} edges", element.name())
            }
            Production::Split { kind } => format!("split marked {} edge", kind.as_str()),
            Production::Refine { element } => format!("break {} into quads", element.name()),
        }
    }

    /// A canonical example of the left-hand side, on a unit regular polygon.
    pub fn left_shape(&self) -> Result<Hypergraph> {
        match *self {
            Production::Mark { element } => shapes::element_with_ring(element, false),
            Production::Propagate { element } => shapes::element_with_ring(element, true),
            Production::Split { kind } => Ok(shapes::marked_edge(kind.payload())),
            Production::Refine { element } => shapes::element_with_split_sides(element),
        }
    }

    /// Tests one live hyperedge as the anchor of a match.
    fn match_at(&self, graph: &Hypergraph, candidate: &HyperEdge) -> Option<HyperEdge> {
        match *self {
            Production::Mark { element } => mark::match_at(graph, candidate, element),
            Production::Propagate { element } => propagate::match_at(graph, candidate, element),
            Production::Split { kind } => split::match_at(candidate, kind),
            Production::Refine { element } => refine::match_at(graph, candidate, element),
        }
    }

    /// Returns `true` if the production has a match in `graph`.
    pub fn can_apply(&self, graph: &Hypergraph) -> bool {
        self.find_match(graph).is_some()
    }

    /// Returns the anchor of the first match, in insertion order.
    ///
    /// The anchor is a hyperedge whose node set spans the match: the matched
    /// edge or element itself, or for refinement a synthetic hyperedge over
    /// the element's corners and side midpoints.
    pub fn find_match(&self, graph: &Hypergraph) -> Option<HyperEdge> {
        graph.hyperedges().find_map(|e| self.match_at(graph, e))
    }

    /// Returns the anchors of every match, in insertion order.
    pub fn find_all_matches(&self, graph: &Hypergraph) -> Vec<HyperEdge> {
        graph
            .hyperedges()
            .filter_map(|e| self.match_at(graph, e))
            .collect()
    }

    /// Computes the replacement for a matched sub-hypergraph.
    ///
    /// Pure: `matched` is only read. `level` is the refinement level the
    /// caller is working at; the rules produce the same fragment for any
    /// level. Returns [`crate::Error::RewriteFailed`] if `matched` does not contain
    /// the left-hand side.
    pub fn apply_rhs(&self, matched: &Hypergraph, level: u32) -> Result<Hypergraph> {
        tracing::trace!(production = %self, level, "building right-hand side");
        match *self {
            Production::Mark { element } => mark::rewrite(matched, self, element),
            Production::Propagate { element } => propagate::rewrite(matched, self, element),
            Production::Split { kind } => split::rewrite(matched, self, kind),
            Production::Refine { element } => refine::rewrite(matched, self, element),
        }
    }

    /// Returns `true` if `subgraph` is structurally identical to the
    /// canonical left-hand shape (see [`ShapeSignature`]).
    pub fn matches_left_shape(&self, subgraph: &Hypergraph) -> bool {
        match self.left_shape() {
            Ok(shape) => ShapeSignature::of(&shape) == ShapeSignature::of(subgraph),
            Err(_) => false,
        }
    }

    /// Every production of the grammar, grouped by kind.
    pub fn all() -> Vec<Production> {
        let mut all = Vec::new();
        all.extend(HyperTag::ELEMENTS.map(|element| Production::Mark { element }));
        all.extend(HyperTag::ELEMENTS.map(|element| Production::Propagate { element }));
        all.push(Production::Split { kind: EdgeKind::Boundary });
        all.push(Production::Split { kind: EdgeKind::Shared });
        all.extend(HyperTag::ELEMENTS.map(|element| Production::Refine { element }));
        all
    }
}

impl std::fmt::Display for Production {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use meshgram_hypergraph::Node;

    #[test]
    fn names_are_stable() {
        assert_eq!(Production::Mark { element: HyperTag::Hexagon }.name(), "mark-hexagon");
        assert_eq!(Production::Propagate { element: HyperTag::Quad }.name(), "propagate-quad");
        assert_eq!(
            Production::Split { kind: EdgeKind::Boundary }.to_string(),
            "split-boundary-edge"
        );
        assert_eq!(Production::Split { kind: EdgeKind::Shared }.name(), "split-shared-edge");
        assert_eq!(Production::Refine { element: HyperTag::Heptagon }.name(), "refine-heptagon");
    }

    #[test]
    fn all_lists_fourteen_productions() {
        let all = Production::all();
        assert_eq!(all.len(), 14);
        let mut names: Vec<String> = all.iter().map(Production::name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 14);
    }

    #[test]
    fn every_production_matches_its_left_shape() {
        for production in Production::all() {
            let shape = production.left_shape().unwrap();
            assert!(production.can_apply(&shape), "{} does not apply to its shape", production);
            assert!(production.matches_left_shape(&shape));

            let anchor = production.find_match(&shape).unwrap();
            let induced = shape.induced_subgraph(anchor.nodes());
            assert!(production.matches_left_shape(&induced), "{}", production);
        }
    }

    #[test]
    fn shapes_do_not_cross_match() {
        let mark = Production::Mark { element: HyperTag::Hexagon };
        let propagate = Production::Propagate { element: HyperTag::Hexagon };
        let refine = Production::Refine { element: HyperTag::Hexagon };

        let mark_shape = mark.left_shape().unwrap();
        assert!(!propagate.can_apply(&mark_shape));
        assert!(!refine.can_apply(&mark_shape));
        assert!(!propagate.matches_left_shape(&mark_shape));

        // Element kinds do not mix.
        let quad_mark = Production::Mark { element: HyperTag::Quad };
        assert!(!quad_mark.can_apply(&mark_shape));
    }

    #[test]
    fn split_kind_filters_on_boundary_payload() {
        let boundary = Production::Split { kind: EdgeKind::Boundary };
        let shared = Production::Split { kind: EdgeKind::Shared };
        let shape = boundary.left_shape().unwrap();
        assert!(boundary.can_apply(&shape));
        assert!(!shared.can_apply(&shape));
    }

    #[test]
    fn apply_rhs_does_not_touch_input() {
        let production = Production::Split { kind: EdgeKind::Boundary };
        let shape = production.left_shape().unwrap();
        let before = shape.to_string();

        let fragment = production.apply_rhs(&shape, 0).unwrap();
        assert_eq!(shape.to_string(), before);
        assert_eq!(fragment.node_count(), 3);
        assert_eq!(fragment.hyperedge_count(), 2);
    }

    #[test]
    fn apply_rhs_rejects_foreign_subgraph() {
        let production = Production::Refine { element: HyperTag::Hexagon };
        let mut graph = Hypergraph::new();
        graph.add_node(Node::new("lonely", 0.0, 0.0));

        match production.apply_rhs(&graph, 0) {
            Err(Error::RewriteFailed { production, .. }) => assert_eq!(production, "refine-hexagon"),
            other => panic!("expected RewriteFailed, got {:?}", other.map(|g| g.to_string())),
        }
    }

    #[test]
    fn find_all_matches_in_insertion_order() {
        let production = Production::Split { kind: EdgeKind::Boundary };
        let mut graph = Hypergraph::new();
        for (a, b) in [("b", "c"), ("a", "b"), ("c", "d")] {
            graph.add_hyperedge(HyperEdge::edge(
                Node::new(a, 0.0, 0.0),
                Node::new(b, 1.0, 0.0),
                true,
                BOUNDARY,
            ));
        }
        let labels: Vec<String> = production
            .find_all_matches(&graph)
            .iter()
            .map(HyperEdge::label)
            .collect();
        assert_eq!(labels, vec!["E_b_c", "E_a_b", "E_c_d"]);
        assert_eq!(production.find_match(&graph).unwrap().label(), "E_b_c");
    }
}
