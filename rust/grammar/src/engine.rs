// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Single-step rewriting of a hypergraph with a production.

use meshgram_hypergraph::Hypergraph;

use crate::error::Result;
use crate::production::Production;

/// Applies productions to a hypergraph, one rewrite per call.
///
/// A rewrite:
/// 1. finds the first match of the production (none: returns `Ok(0)`);
/// 2. extracts the sub-hypergraph induced by the anchor's nodes;
/// 3. asks the production for the replacement fragment;
/// 4. removes every hyperedge of the induced sub-hypergraph that is still
///    live with the same R and B;
/// 5. merges the fragment's nodes, then its hyperedges.
///
/// The replacement is computed before the store is touched, so a production
/// that fails to build it leaves the hypergraph exactly as it was. Hyperedges
/// outside the induced sub-hypergraph are never modified.
#[derive(Debug, Clone, Copy, Default)]
pub struct RewriteEngine {
    level: u32,
}

impl RewriteEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine passing `level` to every right-hand side it builds.
    pub fn with_level(level: u32) -> Self {
        Self { level }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Performs at most one rewrite and returns how many were done (0 or 1).
    pub fn apply(&self, graph: &mut Hypergraph, production: &Production) -> Result<usize> {
        let Some(anchor) = production.find_match(graph) else {
            tracing::trace!(production = %production, "no match");
            return Ok(0);
        };

        let span = tracing::debug_span!(
            "rewrite",
            production = %production,
            anchor = %anchor.label(),
            level = self.level
        );
        let _guard = span.enter();

        let matched = graph.induced_subgraph(anchor.nodes());
        let replacement = production.apply_rhs(&matched, self.level)?;

        let mut removed = 0usize;
        for edge in matched.hyperedges() {
            let live = graph.find_hyperedge(edge).is_some_and(|e| e.same_state(edge));
            if live && graph.remove_hyperedge(edge).is_some() {
                removed += 1;
            }
        }
        graph.merge(&replacement);

        tracing::debug!(
            removed,
            added = replacement.hyperedge_count(),
            nodes = graph.node_count(),
            hyperedges = graph.hyperedge_count(),
            "rewrite applied"
        );
        Ok(1)
    }

    /// Applies `production` until it no longer matches and returns the number
    /// of rewrites performed.
    pub fn apply_exhaustively(&self, graph: &mut Hypergraph, production: &Production) -> Result<usize> {
        let mut count = 0;
        while self.apply(graph, production)? == 1 {
            count += 1;
        }
        Ok(count)
    }
}
