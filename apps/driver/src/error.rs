// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the derivation driver.

use thiserror::Error;

/// Driver error types.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Missing value for {0}")]
    MissingValue(String),

    #[error("Invalid value for {option}: {value}")]
    InvalidValue { option: String, value: String },

    #[error("Unsupported polygon: {0} sides (expected 4 to 7)")]
    UnsupportedSides(usize),

    #[error("Radius must be positive and finite, got {0}")]
    InvalidRadius(f64),

    #[error("Unknown report format: {0} (expected text or json)")]
    UnknownReportFormat(String),

    #[error("Rewrite error: {0}")]
    Grammar(#[from] meshgram_grammar::Error),

    #[error("Store error: {0}")]
    Store(#[from] meshgram_hypergraph::Error),

    #[error("Report serialization error: {0}")]
    Report(#[from] serde_json::Error),
}
