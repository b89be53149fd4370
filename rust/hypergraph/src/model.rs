// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types of the hypergraph: node identities, nodes and hyperedges.
//!
//! ## Equality
//!
//! A [`Node`] is identified by its label alone: two nodes with the same label
//! are the same node wherever they appear, regardless of coordinates.
//!
//! A [`HyperEdge`] compares equal to another when the tags match and the
//! *sets* of node labels match. The stored node tuple order is not part of
//! equality, so it cannot be trusted for cyclic adjacency: rules that need the
//! ring order of an element recover it geometrically (angular sort).

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::keys::HyperTag;

/// Boundary payload of an internal edge shared by two elements.
pub const SHARED: i32 = 0;

/// Boundary payload of an edge on the mesh boundary.
pub const BOUNDARY: i32 = 1;

/// Stable identity of a node: its label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(Arc<str>);

impl NodeId {
    pub fn new(label: impl AsRef<str>) -> Self {
        Self(Arc::from(label.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for NodeId {
    fn from(label: String) -> Self {
        Self(Arc::from(label))
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A mesh vertex.
///
/// `hanging` is set on nodes created in the middle of a split edge and cleared
/// once a refined element absorbs them as corners of its sub-elements.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub position: Point,
    pub hanging: bool,
}

impl Node {
    /// Creates a regular (non-hanging) node.
    pub fn new(label: impl Into<NodeId>, x: f64, y: f64) -> Self {
        Self {
            id: label.into(),
            position: Point::new(x, y),
            hanging: false,
        }
    }

    /// Creates a hanging node.
    pub fn hanging(label: impl Into<NodeId>, x: f64, y: f64) -> Self {
        Self {
            hanging: true,
            ..Self::new(label, x, y)
        }
    }

    /// Returns a copy with the hanging flag replaced.
    pub fn with_hanging(&self, hanging: bool) -> Self {
        Self {
            hanging,
            ..self.clone()
        }
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    pub fn label(&self) -> &str {
        self.id.as_str()
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.id, self.position)?;
        if self.hanging {
            f.write_str(" hanging")?;
        }
        Ok(())
    }
}

/// Node tuple of a hyperedge. Mesh edges have 2 nodes and elements up to 7,
/// which fits inline for everything but the largest matches.
pub type NodeTuple = SmallVec<[Node; 8]>;

/// Order-independent identity of a hyperedge: tag plus sorted node labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdgeSignature {
    pub tag: HyperTag,
    pub nodes: SmallVec<[NodeId; 8]>,
}

/// A labeled relation over two or more nodes: a mesh edge or a mesh element.
///
/// `r` is the refinement flag (R=1 means scheduled for split/refinement).
/// `b` is the boundary payload: [`BOUNDARY`] for boundary edges, [`SHARED`]
/// for internal edges, otherwise an opaque integer carried through rewrites.
#[derive(Debug, Clone)]
pub struct HyperEdge {
    nodes: NodeTuple,
    pub tag: HyperTag,
    pub r: bool,
    pub b: i32,
}

impl HyperEdge {
    /// Creates a hyperedge.
    ///
    /// Returns [`Error::DegenerateHyperEdge`] when given fewer than two nodes
    /// and [`Error::RepeatedNode`] when a label occurs twice.
    pub fn new<I>(nodes: I, tag: HyperTag, r: bool, b: i32) -> Result<Self>
    where
        I: IntoIterator<Item = Node>,
    {
        let nodes: NodeTuple = nodes.into_iter().collect();
        if nodes.len() < 2 {
            return Err(Error::DegenerateHyperEdge { arity: nodes.len() });
        }
        if let Some(node) = nodes.iter().enumerate().find_map(|(i, n)| nodes[..i].contains(n).then_some(n)) {
            return Err(Error::RepeatedNode { node: node.id.clone() });
        }
        Ok(Self { nodes, tag, r, b })
    }

    /// Creates a mesh edge between two nodes.
    ///
    /// Cannot fail. The endpoints must differ; a loop `a`–`a` is reported by
    /// [`Hypergraph::validate`](crate::Hypergraph::validate).
    pub fn edge(a: Node, b: Node, r: bool, boundary: i32) -> Self {
        let mut nodes = NodeTuple::new();
        nodes.push(a);
        nodes.push(b);
        Self {
            nodes,
            tag: HyperTag::Edge,
            r,
            b: boundary,
        }
    }

    /// Node tuple in storage order. Do not rely on it for ring adjacency.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Labels of the incident nodes in storage order.
    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> + '_ {
        self.nodes.iter().map(|n| &n.id)
    }

    /// Number of incident nodes.
    pub fn arity(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the node label is incident to this hyperedge.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.iter().any(|n| &n.id == id)
    }

    /// Returns the node with the given label, if incident.
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    /// For a two-node hyperedge, returns the endpoint opposite to `id`.
    pub fn other_end(&self, id: &NodeId) -> Option<&Node> {
        match self.nodes.as_slice() {
            [a, b] if &a.id == id => Some(b),
            [a, b] if &b.id == id => Some(a),
            _ => None,
        }
    }

    /// Returns a copy with new flags and the same nodes and tag.
    pub fn with_flags(&self, r: bool, b: i32) -> Self {
        Self {
            nodes: self.nodes.clone(),
            tag: self.tag,
            r,
            b,
        }
    }

    /// Order-independent identity used for equality and store lookups.
    pub fn signature(&self) -> EdgeSignature {
        let mut nodes: SmallVec<[NodeId; 8]> = self.nodes.iter().map(|n| n.id.clone()).collect();
        nodes.sort();
        nodes.dedup();
        EdgeSignature {
            tag: self.tag,
            nodes,
        }
    }

    /// Value equality including flags: same tag, same node set, same R and B.
    pub fn same_state(&self, other: &HyperEdge) -> bool {
        self == other && self.r == other.r && self.b == other.b
    }

    /// Textual label `"{tag}_{n1}_{n2}..."` in storage order.
    pub fn label(&self) -> String {
        let mut label = String::from(self.tag.as_str());
        for node in &self.nodes {
            label.push('_');
            label.push_str(node.label());
        }
        label
    }
}

impl PartialEq for HyperEdge {
    fn eq(&self, other: &Self) -> bool {
        self.signature() == other.signature()
    }
}

impl Eq for HyperEdge {}

impl Hash for HyperEdge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.signature().hash(state);
    }
}

impl std::fmt::Display for HyperEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[", self.tag)?;
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(node.label())?;
        }
        write!(f, "] R={} B={}", u8::from(self.r), self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    fn n(label: &str) -> Node {
        Node::new(label, 0.0, 0.0)
    }

    #[test]
    fn hyperedge_rejects_fewer_than_two_nodes() {
        let err = HyperEdge::new(Vec::new(), HyperTag::Edge, false, BOUNDARY).unwrap_err();
        assert!(matches!(err, Error::DegenerateHyperEdge { arity: 0 }));

        let err = HyperEdge::new(vec![n("a")], HyperTag::Edge, false, BOUNDARY).unwrap_err();
        assert!(matches!(err, Error::DegenerateHyperEdge { arity: 1 }));

        assert!(HyperEdge::new(vec![n("a"), n("b")], HyperTag::Edge, false, BOUNDARY).is_ok());
    }

    #[test]
    fn hyperedge_rejects_repeated_nodes() {
        let err = HyperEdge::new(vec![n("a"), n("a")], HyperTag::Edge, false, BOUNDARY).unwrap_err();
        assert!(matches!(err, Error::RepeatedNode { ref node } if node.as_str() == "a"));

        let quad = vec![n("a"), n("b"), n("c"), n("b")];
        let err = HyperEdge::new(quad, HyperTag::Quad, false, 0).unwrap_err();
        assert!(matches!(err, Error::RepeatedNode { ref node } if node.as_str() == "b"));
    }

    #[test]
    fn node_identity_is_label_only() {
        let a = Node::new("v1", 0.0, 0.0);
        let b = Node::hanging("v1", 5.0, 5.0);
        assert_eq!(a, b);
        assert_ne!(a, Node::new("v2", 0.0, 0.0));
    }

    #[test]
    fn hyperedge_equality_ignores_node_order_and_flags() {
        let e1 = HyperEdge::new(vec![n("a"), n("b"), n("c")], HyperTag::Quad, false, 0).unwrap();
        let e2 = HyperEdge::new(vec![n("c"), n("a"), n("b")], HyperTag::Quad, true, 1).unwrap();
        assert_eq!(e1, e2);
        assert!(!e1.same_state(&e2));

        let mut set = FxHashSet::default();
        set.insert(e1.clone());
        assert!(set.contains(&e2));
    }

    #[test]
    fn hyperedge_equality_respects_tag() {
        let e1 = HyperEdge::edge(n("a"), n("b"), false, BOUNDARY);
        let e2 = HyperEdge::new(vec![n("a"), n("b")], HyperTag::Quad, false, BOUNDARY).unwrap();
        assert_ne!(e1, e2);
    }

    #[test]
    fn label_follows_storage_order() {
        let e = HyperEdge::edge(n("v2"), n("v1"), true, BOUNDARY);
        assert_eq!(e.label(), "E_v2_v1");
        assert_eq!(e.to_string(), "E[v2, v1] R=1 B=1");
    }

    #[test]
    fn other_end_of_edge() {
        let e = HyperEdge::edge(n("a"), n("b"), false, SHARED);
        assert_eq!(e.other_end(&NodeId::new("a")).map(Node::label), Some("b"));
        assert_eq!(e.other_end(&NodeId::new("b")).map(Node::label), Some("a"));
        assert!(e.other_end(&NodeId::new("c")).is_none());
    }
}
