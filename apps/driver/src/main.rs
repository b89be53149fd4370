// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Meshgram - runs the mesh refinement grammar on a regular polygon.
//!
//! Usage:
//!   meshgram [--sides N] [--radius R] [--center X Y] [--snapshots]
//!            [--log-json] [--report text|json]
//!
//! Every option can also be set through `MESHGRAM_*` environment variables;
//! options win over the environment.

use anyhow::Context;
use meshgram_grammar::ProductionRegistry;

mod config;
mod driver;
mod error;
mod report;

use config::{Config, ReportFormat};
use report::Report;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut config = Config::from_env();
    if !config.apply_args(&args).context("invalid command line")? {
        print_usage();
        return Ok(());
    }

    init_logging(config.log_json);

    tracing::info!(
        sides = config.sides,
        radius = config.radius,
        center = %config.center,
        snapshots = config.snapshots,
        "Starting derivation"
    );

    let registry = ProductionRegistry::standard();
    let derivation = driver::run(&config, &registry).context("derivation failed")?;

    tracing::info!(
        steps = derivation.steps.len(),
        snapshots = derivation.snapshots.len(),
        nodes = derivation.graph.node_count(),
        hyperedges = derivation.graph.hyperedge_count(),
        "Derivation finished"
    );

    let report = Report::new(derivation.element, derivation.steps, &derivation.graph);
    match config.report {
        ReportFormat::Text => print!("{}", report.to_text()),
        ReportFormat::Json => println!("{}", report.to_json()?),
    }

    Ok(())
}

/// Logs go to stderr so the report on stdout stays machine readable.
fn init_logging(json: bool) {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info,meshgram=debug".into());

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn print_usage() {
    eprintln!("Meshgram - hypergraph grammar for 2D mesh refinement");
    eprintln!();
    eprintln!("Usage: meshgram [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --sides <N>         Corners of the initial polygon, 4 to 7 (default: 6)");
    eprintln!("  --radius <R>        Circumradius (default: 10)");
    eprintln!("  --center <X> <Y>    Polygon center (default: 0 0)");
    eprintln!("  --snapshots         Keep a copy of the mesh after every step");
    eprintln!("  --log-json          Emit logs as JSON lines");
    eprintln!("  --report <FORMAT>   Step report format: text or json (default: text)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  MESHGRAM_SIDES, MESHGRAM_RADIUS, MESHGRAM_CENTER_X, MESHGRAM_CENTER_Y,");
    eprintln!("  MESHGRAM_SNAPSHOTS, MESHGRAM_LOG_JSON, MESHGRAM_REPORT, RUST_LOG");
}
