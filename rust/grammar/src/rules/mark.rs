// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mark: schedule an unmarked element with an intact ring for refinement.

use meshgram_hypergraph::{HyperEdge, HyperTag, Hypergraph};

use super::ring::intact_ring;
use super::{copy_nodes, left_side_missing};
use crate::error::Result;
use crate::production::Production;

/// Anchor: the element itself, when tagged `element`, R=0 and ring intact.
pub(crate) fn match_at(graph: &Hypergraph, candidate: &HyperEdge, element: HyperTag) -> Option<HyperEdge> {
    if candidate.tag != element || candidate.r {
        return None;
    }
    intact_ring(graph, candidate)?;
    Some(candidate.clone())
}

/// Same sub-hypergraph with the element's R flipped to 1.
pub(crate) fn rewrite(matched: &Hypergraph, production: &Production, element: HyperTag) -> Result<Hypergraph> {
    let anchor = matched
        .hyperedges()
        .find_map(|e| match_at(matched, e, element))
        .ok_or_else(|| left_side_missing(production))?;

    let mut fragment = copy_nodes(matched);
    for edge in matched.hyperedges() {
        if edge.same_state(&anchor) {
            fragment.add_hyperedge(edge.with_flags(true, edge.b));
        } else {
            fragment.add_hyperedge(edge.clone());
        }
    }
    Ok(fragment)
}
