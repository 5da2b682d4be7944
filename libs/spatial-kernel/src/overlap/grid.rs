//! # Sample Grid
//!
//! Cubic lattice of candidate points for the overlap test.

use config::constants::{ConfigError, DEFAULT_GRID_SIZE, DEFAULT_GRID_SPACING, MAX_GRID_SAMPLES};
use serde::{Deserialize, Serialize};

use crate::core::vec3::Vector3;
use crate::error::{KernelError, KernelResult};

/// `size³` points at `origin + (i, j, k) * spacing` for `i, j, k in
/// 0..size`.
///
/// ## Example
///
/// ```rust
/// use spatial_kernel::{SampleGrid, Vector3};
///
/// let grid = SampleGrid::new(Vector3::ZERO, 3, 0.5).unwrap();
/// assert_eq!(grid.len(), 27);
/// assert_eq!(grid.points().last(), Some(&Vector3::new(1.0, 1.0, 1.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleGrid {
    origin: Vector3,
    size: usize,
    spacing: f64,
}

impl Default for SampleGrid {
    fn default() -> Self {
        Self {
            origin: Vector3::ZERO,
            size: DEFAULT_GRID_SIZE,
            spacing: DEFAULT_GRID_SPACING,
        }
    }
}

impl SampleGrid {
    /// Creates a grid.
    ///
    /// ## Errors
    ///
    /// - `NonFiniteInput` for a non-finite origin
    /// - `Config(InvalidSpacing)` when `spacing` is not positive and finite
    /// - `Config(TooManySamples)` when `size³` exceeds `MAX_GRID_SAMPLES`
    pub fn new(origin: Vector3, size: usize, spacing: f64) -> KernelResult<Self> {
        if !origin.is_finite() {
            return Err(KernelError::non_finite("grid origin"));
        }
        if spacing <= 0.0 || !spacing.is_finite() {
            return Err(ConfigError::InvalidSpacing(spacing).into());
        }
        match size.checked_pow(3) {
            Some(samples) if samples <= MAX_GRID_SAMPLES => {}
            Some(samples) => return Err(ConfigError::TooManySamples(samples).into()),
            None => return Err(ConfigError::TooManySamples(usize::MAX).into()),
        }
        Ok(Self {
            origin,
            size,
            spacing,
        })
    }

    /// First sample.
    #[inline]
    pub fn origin(&self) -> Vector3 {
        self.origin
    }

    /// Samples per axis.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Distance between neighbouring samples.
    #[inline]
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Total number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.size * self.size * self.size
    }

    /// `true` when `size` is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// All samples, `x` outermost and `z` innermost.
    pub fn points(&self) -> Vec<Vector3> {
        let mut points = Vec::with_capacity(self.len());
        for i in 0..self.size {
            for j in 0..self.size {
                for k in 0..self.size {
                    let step = Vector3::new(i as f64, j as f64, k as f64).scale(self.spacing);
                    points.push(self.origin.add(step));
                }
            }
        }
        points
    }
}
