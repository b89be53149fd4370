// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 2D geometry primitives used by the matching rules.
//!
//! Geometric equality is always tolerance based and never decides node
//! identity; identity is the node label (see [`crate::model::Node`]).

use nalgebra::Point2;

/// Tolerance for the collinearity/midpoint test used when matching split sides.
pub const GEOMETRIC_TOLERANCE: f64 = 1e-4;

/// An immutable 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_nalgebra(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    pub fn from_nalgebra(p: &Point2<f64>) -> Self {
        Self { x: p.x, y: p.y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        (other.to_nalgebra() - self.to_nalgebra()).norm()
    }

    /// Exact midpoint of the segment `self`–`other`.
    ///
    /// Computed per coordinate as `(a + b) / 2` so that midpoints of integer
    /// coordinates are exact.
    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Angle of `self` seen from `center`, in `(-π, π]`.
    pub fn angle_from(&self, center: &Point) -> f64 {
        (self.y - center.y).atan2(self.x - center.x)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Triangle-equality test: `m` lies on the segment `a`–`b` within `eps`.
///
/// Checks `|d(a,m) + d(m,b) - d(a,b)| < eps`. A point off the segment, or on
/// the supporting line but outside the segment, makes the left sum longer.
pub fn is_between(a: &Point, m: &Point, b: &Point, eps: f64) -> bool {
    let detour = a.distance_to(m) + m.distance_to(b);
    (detour - a.distance_to(b)).abs() < eps
}

/// Arithmetic mean of a set of points, `None` when empty.
pub fn centroid<'a, I>(points: I) -> Option<Point>
where
    I: IntoIterator<Item = &'a Point>,
{
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut count = 0usize;

    for p in points {
        sum_x += p.x;
        sum_y += p.y;
        count += 1;
    }

    if count == 0 {
        return None;
    }

    let n = count as f64;
    Some(Point::new(sum_x / n, sum_y / n))
}

/// Sorts items counter-clockwise by the angle of their position around `center`.
///
/// The sort is stable, so items at the same angle keep their relative order.
pub fn sort_by_angle<T, F>(items: &mut [T], center: &Point, position: F)
where
    F: Fn(&T) -> Point,
{
    items.sort_by(|a, b| {
        let angle_a = position(a).angle_from(center);
        let angle_b = position(b).angle_from(center);
        angle_a.total_cmp(&angle_b)
    });
}

/// Corners of a regular polygon inscribed in a circle, counter-clockwise from
/// angle zero.
pub fn regular_polygon(sides: usize, center: Point, radius: f64) -> Vec<Point> {
    (0..sides)
        .map(|i| {
            let angle = 2.0 * std::f64::consts::PI * i as f64 / sides as f64;
            Point::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            )
        })
        .collect()
}
