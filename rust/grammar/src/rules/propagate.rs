// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Propagate: push a marked element's R=1 onto every bounding edge.

use meshgram_hypergraph::{HyperEdge, HyperTag, Hypergraph};

use super::ring::intact_ring;
use super::{copy_nodes, left_side_missing};
use crate::error::Result;
use crate::production::Production;

/// Anchor: a marked element whose intact ring still has an R=0 edge.
///
/// Requiring one unmarked edge makes the rule stop once everything is marked.
pub(crate) fn match_at(graph: &Hypergraph, candidate: &HyperEdge, element: HyperTag) -> Option<HyperEdge> {
    if candidate.tag != element || !candidate.r {
        return None;
    }
    let ring = intact_ring(graph, candidate)?;
    if ring.iter().all(|e| e.r) {
        return None;
    }
    Some(candidate.clone())
}

/// Element unchanged, every enclosed `E` edge set to R=1 with its B kept.
pub(crate) fn rewrite(matched: &Hypergraph, production: &Production, element: HyperTag) -> Result<Hypergraph> {
    matched
        .hyperedges()
        .find_map(|e| match_at(matched, e, element))
        .ok_or_else(|| left_side_missing(production))?;

    let mut fragment = copy_nodes(matched);
    for edge in matched.hyperedges() {
        if edge.tag == HyperTag::Edge {
            fragment.add_hyperedge(edge.with_flags(true, edge.b));
        } else {
            fragment.add_hyperedge(edge.clone());
        }
    }
    Ok(fragment)
}
