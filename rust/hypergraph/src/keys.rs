// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Store keys and hyperedge type tags.
//!
//! Nodes and hyperedges live in slot maps inside a [`Hypergraph`] and get
//! generational keys that stay valid after unrelated removals. Keys are local
//! to one store: moving data between stores (e.g. merging a rewrite fragment)
//! always goes through node labels, never through keys.
//!
//! [`Hypergraph`]: crate::Hypergraph

use slotmap::new_key_type;

new_key_type! {
    /// Key for a node slot.
    pub struct NodeKey;

    /// Key for a hyperedge slot.
    pub struct EdgeKey;
}

/// Type tag of a hyperedge.
///
/// `Edge` is a mesh edge between two corners. The remaining variants are mesh
/// elements (faces), distinguished by their declared number of corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HyperTag {
    Edge,
    Quad,
    Pentagon,
    Hexagon,
    Heptagon,
}

impl HyperTag {
    /// All element tags, smallest arity first.
    pub const ELEMENTS: [HyperTag; 4] = [
        HyperTag::Quad,
        HyperTag::Pentagon,
        HyperTag::Hexagon,
        HyperTag::Heptagon,
    ];

    /// Returns the short grammar symbol of the tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            HyperTag::Edge => "E",
            HyperTag::Quad => "Q",
            HyperTag::Pentagon => "P",
            HyperTag::Hexagon => "S",
            HyperTag::Heptagon => "T",
        }
    }

    /// Human readable name, used in production names.
    pub fn name(&self) -> &'static str {
        match self {
            HyperTag::Edge => "edge",
            HyperTag::Quad => "quad",
            HyperTag::Pentagon => "pentagon",
            HyperTag::Hexagon => "hexagon",
            HyperTag::Heptagon => "heptagon",
        }
    }

    /// Returns `true` for mesh edges.
    pub fn is_edge(&self) -> bool {
        matches!(self, HyperTag::Edge)
    }

    /// Returns `true` for mesh elements.
    pub fn is_element(&self) -> bool {
        !self.is_edge()
    }

    /// Declared corner count of an element tag, `None` for edges.
    pub fn element_arity(&self) -> Option<usize> {
        match self {
            HyperTag::Edge => None,
            HyperTag::Quad => Some(4),
            HyperTag::Pentagon => Some(5),
            HyperTag::Hexagon => Some(6),
            HyperTag::Heptagon => Some(7),
        }
    }

    /// Element tag for a corner count.
    pub fn element_for_arity(arity: usize) -> Option<HyperTag> {
        Self::ELEMENTS
            .into_iter()
            .find(|tag| tag.element_arity() == Some(arity))
    }
}

impl std::fmt::Display for HyperTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
