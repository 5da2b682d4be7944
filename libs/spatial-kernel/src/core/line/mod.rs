//! # Line
//!
//! Finite segment in the `z = 0` plane. Intersection tests read only `x`
//! and `y`; intersection points always come back with `z = 0`.

use config::constants::{round_to_decimals, SEGMENT_PARALLEL_EPSILON};
use serde::{Deserialize, Serialize};

use crate::core::vec3::Vector3;
use crate::precision::PrecisionConfig;

/// A drawn segment from `start` to `end`.
///
/// # Examples
/// ```
/// use spatial_kernel::{Line, Vector3};
/// let a = Line::new(Vector3::from_xy(0.0, 0.0), Vector3::from_xy(2.0, 2.0));
/// let b = Line::new(Vector3::from_xy(0.0, 2.0), Vector3::from_xy(2.0, 0.0));
/// let hit = a.intersection(&b).expect("diagonals cross");
/// assert!(hit.approx_eq(Vector3::from_xy(1.0, 1.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Line {
    /// Where the segment begins
    pub start: Vector3,
    /// Where the segment ends
    pub end: Vector3,
}

impl Line {
    /// Creates a segment.
    #[inline]
    pub const fn new(start: Vector3, end: Vector3) -> Self {
        Self { start, end }
    }

    /// `end - start`.
    #[inline]
    pub fn direction(&self) -> Vector3 {
        self.end.sub(self.start)
    }

    /// Segment length.
    #[inline]
    pub fn length(&self) -> f64 {
        self.direction().magnitude()
    }

    /// `true` when both endpoints are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.start.is_finite() && self.end.is_finite()
    }

    /// Intersection with `other`, using [`SEGMENT_PARALLEL_EPSILON`].
    pub fn intersection(&self, other: &Line) -> Option<Vector3> {
        self.intersection_eps(other, SEGMENT_PARALLEL_EPSILON)
    }

    /// Parametric segment/segment intersection.
    ///
    /// Solves `A + t(B - A) = C + u(D - C)` in the xy-plane. Returns `None`
    /// when `|denominator| < parallel_epsilon` (parallel or coincident) or
    /// when either parameter falls outside `[0, 1]`. Endpoints touching
    /// count as an intersection.
    pub fn intersection_eps(&self, other: &Line, parallel_epsilon: f64) -> Option<Vector3> {
        let (a, b) = (self.start, self.end);
        let (c, d) = (other.start, other.end);

        let denominator = (a.x - b.x) * (c.y - d.y) - (a.y - b.y) * (c.x - d.x);
        if denominator.abs() < parallel_epsilon {
            return None;
        }

        let t = ((a.x - c.x) * (c.y - d.y) - (a.y - c.y) * (c.x - d.x)) / denominator;
        let u = ((a.x - c.x) * (a.y - b.y) - (a.y - c.y) * (a.x - b.x)) / denominator;

        if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
            return None;
        }
        Some(Vector3::from_xy(a.x + t * (b.x - a.x), a.y + t * (b.y - a.y)))
    }

    /// Every intersection of `self` with `lines`, snapped to
    /// `precision.rounding_decimals` places.
    ///
    /// Entries equal to `self` are skipped. Order follows `lines`; duplicates
    /// are kept.
    pub fn intersections_with(&self, lines: &[Line], precision: &PrecisionConfig) -> Vec<Vector3> {
        lines
            .iter()
            .filter(|other| *other != self)
            .filter_map(|other| self.intersection_eps(other, precision.parallel_epsilon))
            .map(|point| snap(point, precision.rounding_decimals))
            .collect()
    }

    /// `true` when the two directions are parallel: the magnitude of their
    /// cross product is below `epsilon`.
    pub fn is_collinear_with(&self, other: &Line, epsilon: f64) -> bool {
        self.direction().cross(other.direction()).magnitude() < epsilon
    }

    /// `true` when `point` lies on the segment: on its supporting line and
    /// inside its bounding box.
    pub fn contains_point(&self, point: Vector3, epsilon: f64) -> bool {
        let (a, b) = (self.start, self.end);
        if cross_2d(a, b, point).abs() >= epsilon {
            return false;
        }
        a.x.min(b.x) - epsilon <= point.x
            && point.x <= a.x.max(b.x) + epsilon
            && a.y.min(b.y) - epsilon <= point.y
            && point.y <= a.y.max(b.y) + epsilon
    }

    /// `true` when `self` is parallel to `other` and both of its endpoints
    /// lie on `other`.
    pub fn overlaps(&self, other: &Line, epsilon: f64) -> bool {
        self.is_collinear_with(other, epsilon)
            && other.contains_point(self.start, epsilon)
            && other.contains_point(self.end, epsilon)
    }
}

/// z-component of `(b - a) × (c - a)`.
#[inline]
pub(crate) fn cross_2d(a: Vector3, b: Vector3, c: Vector3) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

fn snap(point: Vector3, decimals: u32) -> Vector3 {
    Vector3::new(
        round_to_decimals(point.x, decimals),
        round_to_decimals(point.y, decimals),
        round_to_decimals(point.z, decimals),
    )
}
