// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The canonical derivation: build a regular polygon, mark it, propagate the
//! mark, split every marked edge and break the element into quads.

use meshgram_grammar::{ProductionRegistry, RewriteEngine};
use meshgram_hypergraph::{regular_polygon, HyperEdge, HyperTag, Hypergraph, Node, BOUNDARY, SHARED};

use crate::config::Config;
use crate::error::DriverError;
use crate::report::{DerivationStep, StepCounts};

/// How often a phase applies its production.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    Once,
    UntilFixpoint,
}

/// One phase of a derivation plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phase {
    pub production: String,
    pub repeat: Repeat,
}

impl Phase {
    fn new(production: impl Into<String>, repeat: Repeat) -> Self {
        Self {
            production: production.into(),
            repeat,
        }
    }
}

/// Phases refining a single element of type `element`.
pub fn refinement_plan(element: HyperTag) -> Vec<Phase> {
    vec![
        Phase::new(format!("mark-{}", element.name()), Repeat::Once),
        Phase::new(format!("propagate-{}", element.name()), Repeat::Once),
        Phase::new("split-boundary-edge", Repeat::UntilFixpoint),
        Phase::new("split-shared-edge", Repeat::UntilFixpoint),
        Phase::new(format!("refine-{}", element.name()), Repeat::UntilFixpoint),
    ]
}

/// Regular polygon with corners `v0..`, boundary edges (R=0, B=1) and one
/// unmarked element (R=0, B=0).
pub fn initial_polygon(config: &Config) -> Result<(Hypergraph, HyperTag), DriverError> {
    let element =
        HyperTag::element_for_arity(config.sides).ok_or(DriverError::UnsupportedSides(config.sides))?;

    let corners: Vec<Node> = regular_polygon(config.sides, config.center, config.radius)
        .into_iter()
        .enumerate()
        .map(|(i, p)| Node::new(format!("v{i}"), p.x, p.y))
        .collect();

    let mut graph = Hypergraph::new();
    for node in &corners {
        graph.add_node(node.clone());
    }
    for i in 0..corners.len() {
        let next = (i + 1) % corners.len();
        graph.add_hyperedge(HyperEdge::edge(
            corners[i].clone(),
            corners[next].clone(),
            false,
            BOUNDARY,
        ));
    }
    graph.add_hyperedge(HyperEdge::new(corners, element, false, SHARED)?);

    Ok((graph, element))
}

/// Outcome of a derivation.
#[derive(Debug)]
pub struct Derivation {
    pub graph: Hypergraph,
    pub element: HyperTag,
    pub steps: Vec<DerivationStep>,
    /// Copy of the store after each step, aligned with `steps`; empty unless
    /// snapshots are enabled.
    pub snapshots: Vec<Hypergraph>,
}

impl Derivation {
    fn record(&mut self, production: &str, description: String, keep_snapshot: bool) {
        let step = DerivationStep {
            step: self.steps.len(),
            production: production.to_string(),
            description,
            counts: StepCounts::of(&self.graph),
        };
        tracing::info!(
            step = step.step,
            production = %step.production,
            nodes = step.counts.nodes,
            hyperedges = step.counts.hyperedges,
            hanging = step.counts.hanging,
            "step recorded"
        );
        self.steps.push(step);
        if keep_snapshot {
            self.snapshots.push(self.graph.clone());
        }
    }
}

/// Runs the refinement plan for the configured polygon.
pub fn run(config: &Config, registry: &ProductionRegistry) -> Result<Derivation, DriverError> {
    config.validate()?;
    let (graph, element) = initial_polygon(config)?;

    let mut derivation = Derivation {
        graph,
        element,
        steps: Vec::new(),
        snapshots: Vec::new(),
    };
    derivation.record(
        "initial",
        format!("regular {} with radius {}", element.name(), config.radius),
        config.snapshots,
    );

    let engine = RewriteEngine::new();
    for phase in refinement_plan(element) {
        let production = registry.get(&phase.production)?;
        let mut applied = 0usize;
        loop {
            if engine.apply(&mut derivation.graph, production)? == 0 {
                break;
            }
            applied += 1;
            derivation.record(&phase.production, production.description(), config.snapshots);
            if phase.repeat == Repeat::Once {
                break;
            }
        }
        tracing::debug!(production = %phase.production, applied, "phase finished");
    }

    derivation.graph.validate()?;
    Ok(derivation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use meshgram_hypergraph::Point;

    #[test]
    fn initial_hexagon_layout() {
        let (graph, element) = initial_polygon(&Config::default()).unwrap();
        assert_eq!(element, HyperTag::Hexagon);
        assert_eq!(graph.node_count(), 6);
        assert_eq!(graph.hyperedge_count(), 7);

        let v0 = graph.get_node_by_label("v0").unwrap();
        assert_relative_eq!(v0.x(), 10.0);
        assert_relative_eq!(v0.y(), 0.0);

        for edge in graph.hyperedges_with_tag(HyperTag::Edge) {
            assert!(!edge.r);
            assert_eq!(edge.b, BOUNDARY);
        }
        let hexagon = graph.hyperedges_with_tag(HyperTag::Hexagon).next().unwrap();
        assert!(!hexagon.r);
        assert_eq!(hexagon.b, SHARED);
    }

    #[test]
    fn hexagon_run_records_every_rewrite() {
        let registry = ProductionRegistry::standard();
        let derivation = run(&Config::default(), &registry).unwrap();

        let productions: Vec<&str> = derivation.steps.iter().map(|s| s.production.as_str()).collect();
        assert_eq!(productions[0], "initial");
        assert_eq!(productions[1], "mark-hexagon");
        assert_eq!(productions[2], "propagate-hexagon");
        assert_eq!(productions[3..9], ["split-boundary-edge"; 6]);
        assert_eq!(productions[9], "refine-hexagon");
        assert_eq!(productions.len(), 10);

        let last = derivation.steps.last().unwrap().counts;
        assert_eq!(last.nodes, 13);
        assert_eq!(last.hyperedges, 24);
        assert_eq!(last.hanging, 0);
        assert_eq!(last.elements, 6);

        // Hanging nodes accumulate while splitting.
        assert_eq!(derivation.steps[8].counts.hanging, 6);
        assert!(derivation.snapshots.is_empty());
    }

    #[test]
    fn snapshots_follow_steps() {
        let config = Config {
            sides: 4,
            snapshots: true,
            center: Point::new(5.0, -5.0),
            ..Config::default()
        };
        let derivation = run(&config, &ProductionRegistry::standard()).unwrap();

        assert_eq!(derivation.snapshots.len(), derivation.steps.len());
        for (snapshot, step) in derivation.snapshots.iter().zip(&derivation.steps) {
            assert_eq!(StepCounts::of(snapshot), step.counts);
        }
        assert_eq!(derivation.snapshots[0].node_count(), 4);
    }

    #[test]
    fn empty_registry_is_an_error() {
        let result = run(&Config::default(), &ProductionRegistry::new());
        assert!(matches!(
            result,
            Err(DriverError::Grammar(meshgram_grammar::Error::UnknownProduction(_)))
        ));
    }

    #[test]
    fn unsupported_polygon_is_rejected() {
        let config = Config {
            sides: 8,
            ..Config::default()
        };
        assert!(matches!(
            run(&config, &ProductionRegistry::standard()),
            Err(DriverError::UnsupportedSides(8))
        ));
    }
}
