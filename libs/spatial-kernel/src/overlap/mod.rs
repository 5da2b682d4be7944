//! # Solid Overlap
//!
//! Point-in-solid classification by ray parity, and the two-solid overlap
//! test built on it.
//!
//! ## Algorithm
//!
//! For every sample point a ray is cast along a fixed direction against
//! every plane of a [`Surface`]. A plane hit counts as a crossing when the
//! hit lies in front of the origin (`t >= epsilon`) and inside the plane's
//! triangle (area equivalence). Hits at the same ray parameter, as on an
//! edge shared by two triangles, merge into one crossing. An odd crossing
//! count means the point is inside the solid.
//!
//! ```text
//! sample ──ray──▶ plane₀  plane₁ … planeₙ
//!                  hit?    hit?     hit?
//!                  in △?   in △?    in △?
//!             distinct t: crossings % 2 == 1 ⇒ inside
//! ```
//!
//! Samples are independent, so classification fans out over rayon once the
//! sample count reaches `PARALLEL_SAMPLE_THRESHOLD`. Results are collected
//! in input order either way.
//!
//! ## Example
//!
//! ```rust
//! use spatial_kernel::{SampleGrid, SolidOverlapDetector, Surface, TriangleMesh, Vector3};
//!
//! let a = Surface::from_mesh(&TriangleMesh::cuboid(Vector3::ZERO, Vector3::ONE));
//! let b = Surface::from_mesh(&TriangleMesh::cuboid(
//!     Vector3::new(0.5, 0.0, 0.0),
//!     Vector3::new(1.5, 1.0, 1.0),
//! ));
//! let grid = SampleGrid::new(Vector3::new(0.1, 0.2, 0.15), 5, 0.25).unwrap();
//!
//! let report = SolidOverlapDetector::default().detect_grid(&a, &b, &grid).unwrap();
//! assert!(report.is_colliding());
//! ```

mod grid;
mod mesh;

#[cfg(test)]
mod tests;

pub use grid::SampleGrid;
pub use mesh::{Surface, TriangleMesh};

use config::constants::{ConfigError, DEFAULT_RAY_DIRECTION, PARALLEL_SAMPLE_THRESHOLD};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::vec3::Vector3;
use crate::error::{KernelError, KernelResult};
use crate::precision::PrecisionConfig;

// =============================================================================
// REPORT
// =============================================================================

/// Outcome of a two-solid overlap test.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OverlapReport {
    /// Samples inside the first solid, in sample order
    pub inside_a: Vec<Vector3>,
    /// Samples inside the second solid, in sample order
    pub inside_b: Vec<Vector3>,
    /// Samples inside both solids, in sample order
    pub overlap: Vec<Vector3>,
}

impl OverlapReport {
    /// `true` when at least one sample is inside both solids.
    #[inline]
    pub fn is_colliding(&self) -> bool {
        !self.overlap.is_empty()
    }
}

// =============================================================================
// DETECTOR
// =============================================================================

/// Ray-parity overlap detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidOverlapDetector {
    ray_direction: Vector3,
    precision: PrecisionConfig,
    parallel: bool,
}

impl Default for SolidOverlapDetector {
    fn default() -> Self {
        Self {
            ray_direction: Vector3::from(DEFAULT_RAY_DIRECTION),
            precision: PrecisionConfig::default(),
            parallel: true,
        }
    }
}

impl SolidOverlapDetector {
    /// Detector casting along +Z with default tolerances.
    pub fn new() -> Self {
        Self::default()
    }

    /// Casts along `direction` instead. The direction is normalized.
    ///
    /// ## Errors
    ///
    /// `Config(ZeroDirection)` when `direction` has no usable length.
    pub fn with_ray_direction(mut self, direction: Vector3) -> KernelResult<Self> {
        if !direction.is_finite() {
            return Err(KernelError::non_finite("ray direction"));
        }
        let direction = direction.normalized();
        if direction == Vector3::ZERO {
            return Err(ConfigError::ZeroDirection.into());
        }
        self.ray_direction = direction;
        Ok(self)
    }

    /// Uses `precision` for ray and containment tolerances.
    pub fn with_precision(mut self, precision: PrecisionConfig) -> KernelResult<Self> {
        precision.validate()?;
        self.precision = precision;
        Ok(self)
    }

    /// Enables or disables the rayon path.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Unit ray direction.
    #[inline]
    pub fn ray_direction(&self) -> Vector3 {
        self.ray_direction
    }

    /// Active tolerances.
    #[inline]
    pub fn precision(&self) -> &PrecisionConfig {
        &self.precision
    }

    /// Number of distinct surface crossings along the ray from `point`.
    ///
    /// Triangle hits whose ray parameters lie within `epsilon` of each other
    /// are one crossing: a ray through an edge or vertex shared by several
    /// triangles passes the surface once.
    pub fn crossing_count(&self, surface: &Surface, point: Vector3) -> usize {
        let epsilon = self.precision.epsilon;
        let mut hits: Vec<f64> = surface
            .planes()
            .iter()
            .filter_map(|plane| plane.triangle_raycast(point, self.ray_direction, epsilon))
            .collect();
        hits.sort_by(f64::total_cmp);
        hits.dedup_by(|later, kept| *later - *kept <= epsilon);
        hits.len()
    }

    /// `true` when the crossing count from `point` is odd.
    #[inline]
    pub fn contains(&self, surface: &Surface, point: Vector3) -> bool {
        self.crossing_count(surface, point) % 2 == 1
    }

    /// Samples of `points` inside `surface`, in input order.
    ///
    /// ## Errors
    ///
    /// `NonFiniteInput` when a point or plane is not finite.
    pub fn classify(&self, surface: &Surface, points: &[Vector3]) -> KernelResult<Vec<Vector3>> {
        validate_surface(surface, "surface")?;
        validate_points(points)?;
        let flags = self.inside_flags(surface, points);
        Ok(select(points, &flags))
    }

    /// Classifies `samples` against both surfaces and intersects the
    /// results.
    ///
    /// Each sample is tested once per surface; it belongs to the overlap
    /// when both tests report it inside.
    ///
    /// ## Errors
    ///
    /// `NonFiniteInput` when a sample or plane is not finite.
    pub fn detect(
        &self,
        a: &Surface,
        b: &Surface,
        samples: &[Vector3],
    ) -> KernelResult<OverlapReport> {
        validate_surface(a, "surface a")?;
        validate_surface(b, "surface b")?;
        validate_points(samples)?;

        let flags_a = self.inside_flags(a, samples);
        let flags_b = self.inside_flags(b, samples);
        let both: Vec<bool> = flags_a
            .iter()
            .zip(&flags_b)
            .map(|(in_a, in_b)| *in_a && *in_b)
            .collect();

        let report = OverlapReport {
            inside_a: select(samples, &flags_a),
            inside_b: select(samples, &flags_b),
            overlap: select(samples, &both),
        };

        log::debug!(
            "Overlap test: {} samples, {} inside a ({} planes), {} inside b ({} planes), {} shared",
            samples.len(),
            report.inside_a.len(),
            a.len(),
            report.inside_b.len(),
            b.len(),
            report.overlap.len()
        );
        if report.is_colliding() {
            log::debug!("Solids overlap");
        }

        Ok(report)
    }

    /// [`SolidOverlapDetector::detect`] over the points of `grid`.
    pub fn detect_grid(
        &self,
        a: &Surface,
        b: &Surface,
        grid: &SampleGrid,
    ) -> KernelResult<OverlapReport> {
        self.detect(a, b, &grid.points())
    }

    fn inside_flags(&self, surface: &Surface, points: &[Vector3]) -> Vec<bool> {
        if self.parallel && points.len() >= PARALLEL_SAMPLE_THRESHOLD {
            log::trace!("Classifying {} samples on the rayon pool", points.len());
            points
                .par_iter()
                .map(|p| self.contains(surface, *p))
                .collect()
        } else {
            points.iter().map(|p| self.contains(surface, *p)).collect()
        }
    }
}

fn select(points: &[Vector3], flags: &[bool]) -> Vec<Vector3> {
    points
        .iter()
        .zip(flags)
        .filter_map(|(p, inside)| inside.then_some(*p))
        .collect()
}

fn validate_points(points: &[Vector3]) -> KernelResult<()> {
    match points.iter().position(|p| !p.is_finite()) {
        Some(index) => Err(KernelError::non_finite(format!("sample {index}"))),
        None => Ok(()),
    }
}

fn validate_surface(surface: &Surface, name: &str) -> KernelResult<()> {
    match surface.first_non_finite() {
        Some(index) => Err(KernelError::non_finite(format!("{name} plane {index}"))),
        None => Ok(()),
    }
}
