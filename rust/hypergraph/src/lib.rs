// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Meshgram Hypergraph
//!
//! Attributed hypergraph store for 2D mesh refinement.
//!
//! Mesh corners are [`Node`]s; mesh edges and mesh elements (quads,
//! pentagons, hexagons, heptagons) are [`HyperEdge`]s over two or more nodes,
//! each carrying a type tag, a refinement flag `r` and a boundary payload `b`.
//! The [`Hypergraph`] keeps them in slot-map arenas together with an incidence
//! index, so neighbourhood queries and induced sub-hypergraphs are local
//! operations.
//!
//! Rewrite rules operating on the store live in the `meshgram-grammar` crate.

pub mod construction;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod keys;
pub mod model;
pub mod query;
pub mod traversal;

pub use error::{Error, Result};
pub use geometry::{
    centroid, is_between, regular_polygon, sort_by_angle, Point, GEOMETRIC_TOLERANCE,
};
pub use graph::{Hypergraph, NodeCount};
pub use keys::{EdgeKey, HyperTag, NodeKey};
pub use model::{EdgeSignature, HyperEdge, Node, NodeId, NodeTuple, BOUNDARY, SHARED};
