// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Split: replace a marked edge by two halves through a hanging midpoint.

use meshgram_hypergraph::{HyperEdge, HyperTag, Hypergraph, Node, NodeId};

use super::{copy_nodes, left_side_missing};
use crate::error::Result;
use crate::production::{EdgeKind, Production};

/// Anchor: an `E` edge with R=1 whose B equals the kind's payload.
pub(crate) fn match_at(candidate: &HyperEdge, kind: EdgeKind) -> Option<HyperEdge> {
    let is_match = candidate.tag == HyperTag::Edge
        && candidate.arity() == 2
        && candidate.r
        && candidate.b == kind.payload();
    is_match.then(|| candidate.clone())
}

/// Label of the node inserted in the middle of `a`–`b`, independent of order.
pub fn midpoint_label(a: &NodeId, b: &NodeId) -> NodeId {
    let (first, second) = if a <= b { (a, b) } else { (b, a) };
    NodeId::from(format!("h_{}_{}", first, second))
}

/// Both endpoints, a new hanging node at the exact midpoint, and two R=0
/// halves carrying the original B.
pub(crate) fn rewrite(matched: &Hypergraph, production: &Production, kind: EdgeKind) -> Result<Hypergraph> {
    let anchor = matched
        .hyperedges()
        .find_map(|e| match_at(e, kind))
        .ok_or_else(|| left_side_missing(production))?;

    let (a, b) = match anchor.nodes() {
        [a, b] => (a, b),
        _ => return Err(left_side_missing(production)),
    };
    let middle = a.position.midpoint(&b.position);
    let h = Node::hanging(midpoint_label(&a.id, &b.id), middle.x, middle.y);

    let mut fragment = copy_nodes(matched);
    fragment.add_node(h.clone());
    for edge in matched.hyperedges() {
        if edge.same_state(&anchor) {
            continue;
        }
        fragment.add_hyperedge(edge.clone());
    }
    fragment.add_hyperedge(HyperEdge::edge(a.clone(), h.clone(), false, anchor.b));
    fragment.add_hyperedge(HyperEdge::edge(h, b.clone(), false, anchor.b));
    Ok(fragment)
}
