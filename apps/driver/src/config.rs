// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Driver configuration loaded from environment variables, then overridden
//! by command-line options.

use std::str::FromStr;

use meshgram_hypergraph::{HyperTag, Point};

use crate::error::DriverError;

/// Output format of the step report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = DriverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(DriverError::UnknownReportFormat(other.to_string())),
        }
    }
}

/// Driver configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Corners of the initial polygon (4 to 7).
    pub sides: usize,
    /// Circumradius of the initial polygon.
    pub radius: f64,
    /// Center of the initial polygon.
    pub center: Point,
    /// Keep a full copy of the hypergraph after every step.
    pub snapshots: bool,
    /// Emit logs as JSON lines.
    pub log_json: bool,
    /// Step report format.
    pub report: ReportFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sides: 6,
            radius: 10.0,
            center: Point::new(0.0, 0.0),
            snapshots: false,
            log_json: false,
            report: ReportFormat::Text,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through a variable lookup. Unparsable values fall
    /// back to the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            sides: lookup("MESHGRAM_SIDES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.sides),
            radius: lookup("MESHGRAM_RADIUS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.radius),
            center: Point::new(
                lookup("MESHGRAM_CENTER_X")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.center.x),
                lookup("MESHGRAM_CENTER_Y")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.center.y),
            ),
            snapshots: lookup("MESHGRAM_SNAPSHOTS")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.snapshots),
            log_json: lookup("MESHGRAM_LOG_JSON")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.log_json),
            report: lookup("MESHGRAM_REPORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.report),
        }
    }

    /// Apply command-line options (program name excluded).
    ///
    /// Returns `Ok(false)` when help was requested.
    pub fn apply_args(&mut self, args: &[String]) -> Result<bool, DriverError> {
        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--help" | "-h" => return Ok(false),
                "--sides" => {
                    self.sides = parse_value(args, &mut i, "--sides")?;
                }
                "--radius" => {
                    self.radius = parse_value(args, &mut i, "--radius")?;
                }
                "--center" => {
                    let x = parse_value(args, &mut i, "--center")?;
                    let y = parse_value(args, &mut i, "--center")?;
                    self.center = Point::new(x, y);
                }
                "--snapshots" => {
                    self.snapshots = true;
                }
                "--log-json" => {
                    self.log_json = true;
                }
                "--report" => {
                    let value = next_value(args, &mut i, "--report")?;
                    self.report = value.parse()?;
                }
                other => return Err(DriverError::UnknownOption(other.to_string())),
            }
            i += 1;
        }
        Ok(true)
    }

    /// Checks the ranges the derivation supports.
    pub fn validate(&self) -> Result<(), DriverError> {
        if HyperTag::element_for_arity(self.sides).is_none() {
            return Err(DriverError::UnsupportedSides(self.sides));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(DriverError::InvalidRadius(self.radius));
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

/// Advances `i` and returns the argument there, the value of `option`.
fn next_value<'a>(args: &'a [String], i: &mut usize, option: &str) -> Result<&'a str, DriverError> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| DriverError::MissingValue(option.to_string()))
}

fn parse_value<T: FromStr>(args: &[String], i: &mut usize, option: &str) -> Result<T, DriverError> {
    let value = next_value(args, i, option)?;
    value.parse().map_err(|_| DriverError::InvalidValue {
        option: option.to_string(),
        value: value.to_string(),
    })
}
