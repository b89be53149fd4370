// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Matching and rewriting for each production kind.
//!
//! Every rule exposes `match_at`, which tests one live hyperedge as a
//! candidate and returns the anchor, and `rewrite`, which locates the same
//! pattern again inside the matched sub-hypergraph and builds the replacement
//! fragment. `rewrite` never mutates its input.

pub(crate) mod mark;
pub(crate) mod propagate;
pub(crate) mod refine;
pub(crate) mod ring;
pub(crate) mod split;

use meshgram_hypergraph::Hypergraph;

use crate::error::Error;
use crate::production::Production;

/// New fragment holding a copy of every node of `matched`.
pub(crate) fn copy_nodes(matched: &Hypergraph) -> Hypergraph {
    let mut fragment = Hypergraph::new();
    for node in matched.nodes() {
        fragment.add_node(node.clone());
    }
    fragment
}

pub(crate) fn left_side_missing(production: &Production) -> Error {
    Error::RewriteFailed {
        production: production.name(),
        reason: "matched sub-hypergraph does not contain the left-hand side".to_string(),
    }
}
