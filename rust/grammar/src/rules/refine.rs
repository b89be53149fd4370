// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Refine: replace a marked element whose sides are all split by a fan of
//! quads around a new center node.
//!
//! The element's node tuple carries no usable cyclic order, so corners are
//! sorted by angle around their centroid before sides are paired up. A side
//! `(c_i, c_i+1)` is split when exactly one node is joined by `E` edges to
//! both corners *and* lies between them geometrically, and no `E` edge joins
//! the corners directly any more.

use meshgram_hypergraph::{
    centroid, is_between, sort_by_angle, HyperEdge, HyperTag, Hypergraph, Node, NodeId,
    GEOMETRIC_TOLERANCE, SHARED,
};

use super::{copy_nodes, left_side_missing};
use crate::error::Result;
use crate::production::Production;

/// A located refinement: the element, its corners in angular order and the
/// midpoint of each side `(corners[i], corners[i + 1])`.
struct Split {
    element: HyperEdge,
    corners: Vec<Node>,
    mids: Vec<Node>,
}

impl Split {
    /// Synthetic anchor spanning corners and midpoints, so that the induced
    /// sub-hypergraph contains every half edge of the element's sides.
    fn anchor(&self) -> Option<HyperEdge> {
        let nodes = self.corners.iter().chain(self.mids.iter()).cloned();
        HyperEdge::new(nodes, self.element.tag, self.element.r, self.element.b).ok()
    }
}

fn locate(graph: &Hypergraph, candidate: &HyperEdge, element: HyperTag) -> Option<Split> {
    if candidate.tag != element || !candidate.r {
        return None;
    }
    let arity = element.element_arity()?;

    let mut corners: Vec<Node> = candidate
        .node_ids()
        .map(|id| graph.node(id).cloned())
        .collect::<Option<_>>()?;
    corners.sort_by(|a, b| a.id.cmp(&b.id));
    corners.dedup();
    if corners.len() != arity {
        return None;
    }

    let center = centroid(corners.iter().map(|c| &c.position))?;
    sort_by_angle(&mut corners, &center, |n| n.position);

    let mut mids = Vec::with_capacity(arity);
    for i in 0..arity {
        let a = &corners[i];
        let b = &corners[(i + 1) % arity];
        match side_midpoint(graph, a, b, &corners) {
            Some(mid) => mids.push(mid.clone()),
            None => {
                tracing::trace!(element = %candidate, from = %a.id, to = %b.id, "side not split");
                return None;
            }
        }
    }

    Some(Split {
        element: candidate.clone(),
        corners,
        mids,
    })
}

/// The unique midpoint of side `a`–`b`, if the side is split.
fn side_midpoint<'g>(graph: &'g Hypergraph, a: &Node, b: &Node, corners: &[Node]) -> Option<&'g Node> {
    if graph.connected_by(&a.id, &b.id, HyperTag::Edge) {
        return None;
    }

    let mut found = None;
    for m in graph.adjacent_via(&a.id, HyperTag::Edge) {
        if corners.contains(m) || !graph.connected_by(&m.id, &b.id, HyperTag::Edge) {
            continue;
        }
        if !is_between(&a.position, &m.position, &b.position, GEOMETRIC_TOLERANCE) {
            continue;
        }
        if found.is_some() {
            return None;
        }
        found = Some(m);
    }
    found
}

/// Label of the center node: corner labels in angular order.
fn center_label(corners: &[Node]) -> NodeId {
    let mut label = String::from("c");
    for corner in corners {
        label.push('_');
        label.push_str(corner.label());
    }
    NodeId::from(label)
}

pub(crate) fn match_at(graph: &Hypergraph, candidate: &HyperEdge, element: HyperTag) -> Option<HyperEdge> {
    locate(graph, candidate, element)?.anchor()
}

/// Corners, absorbed midpoints (hanging cleared), a center node at the corner
/// centroid, the side halves with their own R/B, `E` spokes center–midpoint
/// (R=0, B=0) and one R=0 quad `(center, h_prev, corner, h_next)` per corner.
/// The element itself is dropped.
///
/// Every midpoint leaves with `hanging` cleared, shared sides included. The
/// rewrite sees only this element's corners and midpoints, so it cannot tell
/// whether the element across a shared side is still unrefined. The flag is
/// therefore a record of absorption into some refined element; refine itself
/// never reads it, and the neighbour still finds its midpoint by connectivity.
pub(crate) fn rewrite(matched: &Hypergraph, production: &Production, element: HyperTag) -> Result<Hypergraph> {
    let split = matched
        .hyperedges()
        .find_map(|e| locate(matched, e, element))
        .ok_or_else(|| left_side_missing(production))?;

    let n = split.corners.len();
    let position = centroid(split.corners.iter().map(|c| &c.position))
        .ok_or_else(|| left_side_missing(production))?;
    let center = Node::new(center_label(&split.corners), position.x, position.y);
    let mids: Vec<Node> = split.mids.iter().map(|m| m.with_hanging(false)).collect();

    let mut fragment = copy_nodes(matched);
    for mid in &mids {
        fragment.add_node(mid.clone());
    }
    fragment.add_node(center.clone());

    for edge in matched.hyperedges() {
        if edge.same_state(&split.element) {
            continue;
        }
        fragment.add_hyperedge(edge.clone());
    }

    for mid in &mids {
        fragment.add_hyperedge(HyperEdge::edge(center.clone(), mid.clone(), false, SHARED));
    }

    for i in 0..n {
        let h_prev = &mids[(i + n - 1) % n];
        let h_next = &mids[i];
        let quad = HyperEdge::new(
            [center.clone(), h_prev.clone(), split.corners[i].clone(), h_next.clone()],
            HyperTag::Quad,
            false,
            split.element.b,
        )?;
        fragment.add_hyperedge(quad);
    }

    Ok(fragment)
}
