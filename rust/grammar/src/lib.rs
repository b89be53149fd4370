// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Meshgram Grammar
//!
//! Rewrite rules for hierarchical refinement of 2D meshes stored as a
//! [`meshgram_hypergraph::Hypergraph`].
//!
//! The grammar has four rule kinds, each parameterized by element type
//! (quad, pentagon, hexagon, heptagon) or edge kind:
//!
//! | Rule | Effect |
//! |------|--------|
//! | mark | element R 0→1, if its ring of edges is intact |
//! | propagate | all edges of a marked element to R=1 |
//! | split | marked edge → two halves through a hanging midpoint |
//! | refine | marked element with all sides split → quads around a center |
//!
//! A [`RewriteEngine`] applies one production at a time; callers loop to a
//! fixpoint. Productions are looked up by name in a [`ProductionRegistry`].
//!
//! ```
//! use meshgram_grammar::{ProductionRegistry, RewriteEngine};
//!
//! let registry = ProductionRegistry::standard();
//! let split = registry.get("split-boundary-edge").unwrap();
//! let mut graph = split.left_shape().unwrap();
//!
//! let engine = RewriteEngine::new();
//! assert_eq!(engine.apply(&mut graph, split).unwrap(), 1);
//! assert_eq!(graph.node_count(), 3);
//! ```

pub mod engine;
pub mod error;
pub mod production;
pub mod registry;
mod rules;
pub mod shapes;

pub use engine::RewriteEngine;
pub use error::{Error, Result};
pub use production::{EdgeKind, Production};
pub use registry::ProductionRegistry;
pub use rules::split::midpoint_label;
pub use shapes::ShapeSignature;
