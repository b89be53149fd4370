// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for productions and the rewrite engine.

/// Result type alias for grammar operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while rewriting.
///
/// A production that finds no match is not an error; the engine reports `0`
/// rewrites instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error from the hypergraph store or model.
    #[error(transparent)]
    Core(#[from] meshgram_hypergraph::Error),

    /// No production is registered under this name.
    #[error("unknown production: {0}")]
    UnknownProduction(String),

    /// A production matched but could not build its replacement.
    ///
    /// The store is left untouched when this is returned.
    #[error("production {production} failed to rewrite: {reason}")]
    RewriteFailed { production: String, reason: String },
}
