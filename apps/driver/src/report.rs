// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Step log of a derivation. Holds counts only, never the mesh itself.

use std::fmt::Write as _;

use meshgram_hypergraph::{HyperTag, Hypergraph};
use serde::Serialize;

use crate::error::DriverError;

/// Store totals after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepCounts {
    pub nodes: usize,
    pub hyperedges: usize,
    pub hanging: usize,
    pub elements: usize,
}

impl StepCounts {
    pub fn of(graph: &Hypergraph) -> Self {
        Self {
            nodes: graph.node_count(),
            hyperedges: graph.hyperedge_count(),
            hanging: graph.hanging_count(),
            elements: graph.hyperedges().filter(|e| e.tag.is_element()).count(),
        }
    }
}

/// One entry of the derivation log. Step 0 is the initial mesh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivationStep {
    pub step: usize,
    pub production: String,
    pub description: String,
    pub counts: StepCounts,
}

/// Summary of a finished derivation.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub element: String,
    pub sides: usize,
    pub steps: Vec<DerivationStep>,
    pub quads: usize,
}

impl Report {
    pub fn new(element: HyperTag, steps: Vec<DerivationStep>, graph: &Hypergraph) -> Self {
        Self {
            element: element.name().to_string(),
            sides: element.element_arity().unwrap_or(0),
            steps,
            quads: graph.hyperedges_with_tag(HyperTag::Quad).count(),
        }
    }

    /// Number of rewrites applied (the initial step excluded).
    pub fn rewrites(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn to_json(&self) -> Result<String, DriverError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== Derivation of a {} ({} sides) ===", self.element, self.sides);
        for step in &self.steps {
            let _ = writeln!(
                out,
                "[{:>3}] {:<22} {:<40} nodes={:<4} hyperedges={:<4} hanging={}",
                step.step,
                step.production,
                step.description,
                step.counts.nodes,
                step.counts.hyperedges,
                step.counts.hanging
            );
        }
        let _ = writeln!(out, "{} rewrites, {} quads", self.rewrites(), self.quads);
        out
    }
}
