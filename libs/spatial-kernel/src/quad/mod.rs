//! # Quadrilateral Reconstruction
//!
//! Recovers a convex quadrilateral from four segments drawn in no
//! particular order.
//!
//! ## Algorithm
//!
//! 1. Intersect every segment with every other one, snap the hits to
//!    `rounding_decimals` places and de-duplicate them, keeping the order in
//!    which they were first found
//! 2. Slide a window of four over those points
//! 3. Sort each window counter-clockwise by `atan2` around its centroid
//! 4. Accept the first window with no three collinear points (sine of the
//!    angle between their edges below `collinear_epsilon`) whose interior
//!    angles add up to 360°
//! 5. Report its shoelace area
//!
//! Finding nothing is an ordinary `Ok(None)`.
//!
//! ## Example
//!
//! ```rust
//! use spatial_kernel::{Line, QuadrilateralReconstructor, Vector3};
//!
//! // Edges overshoot their corners, as hand-drawn strokes do.
//! let lines = [
//!     Line::new(Vector3::from_xy(-0.5, 0.0), Vector3::from_xy(2.5, 0.0)),
//!     Line::new(Vector3::from_xy(2.0, -0.5), Vector3::from_xy(2.0, 1.5)),
//!     Line::new(Vector3::from_xy(2.5, 1.0), Vector3::from_xy(-0.5, 1.0)),
//!     Line::new(Vector3::from_xy(0.0, 1.5), Vector3::from_xy(0.0, -0.5)),
//! ];
//! let quad = QuadrilateralReconstructor::default()
//!     .reconstruct(&lines)
//!     .unwrap()
//!     .expect("rectangle");
//! assert!((quad.area() - 2.0).abs() < 1e-3);
//! ```


use config::constants::QUADRILATERAL_CORNERS;
use serde::{Deserialize, Serialize};

use crate::core::line::{cross_2d, Line};
use crate::core::vec3::Vector3;
use crate::error::{KernelError, KernelResult};
use crate::precision::PrecisionConfig;

// =============================================================================
// QUADRILATERAL
// =============================================================================

/// An accepted quadrilateral: corners counter-clockwise around the
/// centroid, starting from the smallest `atan2` angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quadrilateral {
    corners: [Vector3; 4],
    area: f64,
}

impl Quadrilateral {
    /// Corners in winding order.
    #[inline]
    pub fn corners(&self) -> &[Vector3; 4] {
        &self.corners
    }

    /// Shoelace area.
    #[inline]
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Sum of the four edge lengths.
    pub fn perimeter(&self) -> f64 {
        self.edges().iter().map(Line::length).sum()
    }

    /// The four edges, corner `i` to corner `i + 1`.
    pub fn edges(&self) -> [Line; 4] {
        std::array::from_fn(|i| Line::new(self.corners[i], self.corners[(i + 1) % 4]))
    }

    /// How many edges lie on one of `lines`.
    ///
    /// Four means every side of the quadrilateral was actually drawn.
    pub fn supported_edges(&self, lines: &[Line], epsilon: f64) -> usize {
        self.edges()
            .iter()
            .filter(|edge| lines.iter().any(|line| edge.overlaps(line, epsilon)))
            .count()
    }
}

// =============================================================================
// RECONSTRUCTOR
// =============================================================================

/// Four segments in, at most one quadrilateral out.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct QuadrilateralReconstructor {
    precision: PrecisionConfig,
}

impl QuadrilateralReconstructor {
    /// Reconstructor with custom tolerances.
    pub fn new(precision: PrecisionConfig) -> KernelResult<Self> {
        precision.validate()?;
        Ok(Self { precision })
    }

    /// Active tolerances.
    #[inline]
    pub fn precision(&self) -> &PrecisionConfig {
        &self.precision
    }

    /// Searches `lines` for a convex quadrilateral.
    ///
    /// ## Errors
    ///
    /// - `SegmentCount` unless exactly four lines are given
    /// - `NonFiniteInput` when an endpoint is NaN or infinite
    pub fn reconstruct(&self, lines: &[Line]) -> KernelResult<Option<Quadrilateral>> {
        if lines.len() != QUADRILATERAL_CORNERS {
            return Err(KernelError::SegmentCount {
                expected: QUADRILATERAL_CORNERS,
                found: lines.len(),
            });
        }
        if let Some(index) = lines.iter().position(|line| !line.is_finite()) {
            return Err(KernelError::non_finite(format!("segment {index}")));
        }

        let points = self.intersection_points(lines);
        log::debug!("Found {} distinct intersection points", points.len());

        for (offset, window) in points.windows(QUADRILATERAL_CORNERS).enumerate() {
            let corners = sort_around_centroid([window[0], window[1], window[2], window[3]]);

            if self.has_collinear_triple(&corners) {
                log::debug!("Window {offset} rejected: three corners are collinear");
                continue;
            }
            let angle_sum = interior_angle_sum(&corners);
            if (angle_sum - 360.0).abs() >= self.precision.angle_sum_tolerance {
                log::debug!("Window {offset} rejected: angles sum to {angle_sum}");
                continue;
            }

            let area = shoelace_area(&corners);
            log::debug!("Window {offset} accepted: area {area}");
            return Ok(Some(Quadrilateral { corners, area }));
        }

        log::debug!("No valid quadrilateral");
        Ok(None)
    }

    /// Distinct snapped intersection points, in first-seen order.
    pub fn intersection_points(&self, lines: &[Line]) -> Vec<Vector3> {
        let mut points: Vec<Vector3> = Vec::new();
        for line in lines {
            for point in line.intersections_with(lines, &self.precision) {
                // Snapped points compare exactly.
                if !points.contains(&point) {
                    points.push(point);
                }
            }
        }
        points
    }

    fn has_collinear_triple(&self, corners: &[Vector3; 4]) -> bool {
        let epsilon = self.precision.collinear_epsilon;
        (0..4).any(|i| {
            (i + 1..4).any(|j| {
                (j + 1..4).any(|k| {
                    let (p1, p2, p3) = (corners[i], corners[j], corners[k]);
                    let (e1, e2) = (p2.sub(p1), p3.sub(p2));
                    // |e1 × e2| = |e1||e2| sin θ, so the test is on the angle alone.
                    e1.cross(e2).magnitude() < epsilon * e1.magnitude() * e2.magnitude()
                })
            })
        })
    }
}

/// Sorts by `atan2(y - cy, x - cx)` ascending, i.e. counter-clockwise
/// starting from the negative x axis.
fn sort_around_centroid(mut points: [Vector3; 4]) -> [Vector3; 4] {
    let centroid = points
        .iter()
        .fold(Vector3::ZERO, |acc, p| acc.add(*p))
        .divide(points.len() as f64);
    let angle = |p: &Vector3| (p.y - centroid.y).atan2(p.x - centroid.x);
    points.sort_by(|a, b| angle(a).total_cmp(&angle(b)));
    points
}

/// Sum of the unsigned angles at each corner, wrapping around.
fn interior_angle_sum(corners: &[Vector3; 4]) -> f64 {
    (0..4)
        .map(|i| {
            let p1 = corners[i];
            let p2 = corners[(i + 1) % 4];
            let p3 = corners[(i + 2) % 4];
            p1.sub(p2).angle(p3.sub(p2))
        })
        .sum()
}

/// `0.5 * |Σ (xᵢ·yᵢ₊₁ − yᵢ·xᵢ₊₁)|`
fn shoelace_area(corners: &[Vector3; 4]) -> f64 {
    let twice_signed: f64 = (0..4)
        .map(|i| cross_2d(Vector3::ZERO, corners[i], corners[(i + 1) % 4]))
        .sum();
    0.5 * twice_signed.abs()
}
