//! # Configuration Constants
//!
//! Centralized constants for the spatial kernel. All tolerances, rounding
//! precisions and sampling defaults are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Interpolation**: Thresholds used by quaternion blending
//! - **Reconstruction**: Segment intersection and quadrilateral acceptance
//! - **Sampling**: Ray direction and grid defaults for the overlap test

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for vector and plane comparisons.
///
/// Two vectors are considered equal when their squared distance is below
/// `EPSILON * EPSILON`. Normalizing a vector whose magnitude does not exceed
/// this value yields the zero vector.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-6));
/// ```
pub const EPSILON: f64 = 1e-5;

/// Epsilon for quaternion equality and normalization.
///
/// Two quaternions compare equal when their dot product exceeds
/// `1.0 - QUATERNION_EPSILON`.
///
/// # Example
///
/// ```rust
/// use config::constants::{EPSILON, QUATERNION_EPSILON};
/// assert!(QUATERNION_EPSILON < EPSILON);
/// ```
pub const QUATERNION_EPSILON: f64 = 1e-6;

// =============================================================================
// INTERPOLATION CONSTANTS
// =============================================================================

/// Dot product above which spherical interpolation falls back to a linear
/// blend.
///
/// Near this value the half angle between the quaternions is so small that
/// `1 / sin(halfAngle)` becomes unstable.
///
/// # Example
///
/// ```rust
/// use config::constants::SLERP_LINEAR_THRESHOLD;
/// assert!(SLERP_LINEAR_THRESHOLD < 1.0);
/// ```
pub const SLERP_LINEAR_THRESHOLD: f64 = 0.99;

// =============================================================================
// RECONSTRUCTION CONSTANTS
// =============================================================================

/// Denominator magnitude below which two segments are treated as parallel.
///
/// # Example
///
/// ```rust
/// use config::constants::SEGMENT_PARALLEL_EPSILON;
///
/// let denominator: f64 = 0.00001;
/// assert!(denominator.abs() < SEGMENT_PARALLEL_EPSILON);
/// ```
pub const SEGMENT_PARALLEL_EPSILON: f64 = 1e-4;

/// Sine of the angle between two edges below which their three points
/// count as collinear.
pub const COLLINEAR_EPSILON: f64 = 1e-5;

/// Allowed deviation, in degrees, of the interior angle sum of a candidate
/// quadrilateral from 360°.
///
/// # Example
///
/// ```rust
/// use config::constants::ANGLE_SUM_TOLERANCE_DEGREES;
///
/// let sum: f64 = 359.999;
/// assert!((sum - 360.0).abs() < ANGLE_SUM_TOLERANCE_DEGREES);
/// ```
pub const ANGLE_SUM_TOLERANCE_DEGREES: f64 = 1e-2;

/// Decimal places kept when snapping segment intersection points.
pub const INTERSECTION_DECIMALS: u32 = 3;

/// Number of segments, and corners, of a reconstructed quadrilateral.
pub const QUADRILATERAL_CORNERS: usize = 4;

// =============================================================================
// SAMPLING CONSTANTS
// =============================================================================

/// Direction of the rays cast from every sample point (world +Z).
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_RAY_DIRECTION;
/// assert_eq!(DEFAULT_RAY_DIRECTION, [0.0, 0.0, 1.0]);
/// ```
pub const DEFAULT_RAY_DIRECTION: [f64; 3] = [0.0, 0.0, 1.0];

/// Default number of samples along each axis of the point grid.
pub const DEFAULT_GRID_SIZE: usize = 10;

/// Default distance between neighbouring grid samples.
pub const DEFAULT_GRID_SPACING: f64 = 0.25;

/// Upper bound on the number of samples a single grid may hold.
///
/// The overlap test is `samples × triangles`, so this keeps a careless grid
/// size from turning into an effectively unbounded computation.
///
/// # Example
///
/// ```rust
/// use config::constants::{DEFAULT_GRID_SIZE, MAX_GRID_SAMPLES};
/// assert!(DEFAULT_GRID_SIZE.pow(3) <= MAX_GRID_SAMPLES);
/// ```
pub const MAX_GRID_SAMPLES: usize = 8_000_000;

/// Sample count from which point classification switches to the rayon
/// thread pool.
pub const PARALLEL_SAMPLE_THRESHOLD: usize = 512;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-6));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

/// Rounds `value` to `decimals` decimal places, half away from zero.
///
/// # Example
///
/// ```rust
/// use config::constants::round_to_decimals;
///
/// assert_eq!(round_to_decimals(1.23456, 3), 1.235);
/// assert_eq!(round_to_decimals(-0.0004, 3), 0.0);
/// ```
#[inline]
pub fn round_to_decimals(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let rounded = (value * factor).round() / factor;
    // Collapse -0.0 so snapped points hash and compare identically.
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

// =============================================================================
// GLOBAL CONFIG
// =============================================================================

/// Immutable snapshot of the tolerances shared between crates.
///
/// # Examples
/// ```
/// use config::constants::GlobalConfig;
/// let config = GlobalConfig::default();
/// assert!(config.tolerance > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalConfig {
    /// Numeric tolerance propagated into geometry kernels.
    pub tolerance: f64,
    /// Decimal places used when snapping intersection points.
    pub rounding_decimals: u32,
}

impl GlobalConfig {
    /// Builds a configuration enforcing strict validation of the supplied
    /// tolerance and rounding precision.
    ///
    /// # Examples
    /// ```
    /// use config::constants::GlobalConfig;
    /// let cfg = GlobalConfig::new(1.0e-6, 4).expect("valid config");
    /// assert_eq!(cfg.rounding_decimals, 4);
    /// ```
    pub fn new(tolerance: f64, rounding_decimals: u32) -> Result<Self, ConfigError> {
        if tolerance <= 0.0 || !tolerance.is_finite() {
            return Err(ConfigError::InvalidTolerance(tolerance));
        }
        if rounding_decimals > MAX_ROUNDING_DECIMALS {
            return Err(ConfigError::InvalidDecimals(rounding_decimals));
        }
        Ok(Self {
            tolerance,
            rounding_decimals,
        })
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            tolerance: EPSILON,
            rounding_decimals: INTERSECTION_DECIMALS,
        }
    }
}

/// Largest rounding precision that still leaves headroom in an `f64`
/// mantissa for typical world coordinates.
pub const MAX_ROUNDING_DECIMALS: u32 = 12;

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Raised when a tolerance is zero, negative or not finite.
    InvalidTolerance(f64),
    /// Raised when the rounding precision exceeds [`MAX_ROUNDING_DECIMALS`].
    InvalidDecimals(u32),
    /// Raised when a direction vector has no length.
    ZeroDirection,
    /// Raised when a grid spacing is zero, negative or not finite.
    InvalidSpacing(f64),
    /// Raised when a sample grid would exceed [`MAX_GRID_SAMPLES`].
    TooManySamples(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTolerance(value) => {
                write!(f, "tolerance must be positive and finite: {value}")
            }
            ConfigError::InvalidDecimals(value) => {
                write!(
                    f,
                    "rounding_decimals must be <= {MAX_ROUNDING_DECIMALS}: {value}"
                )
            }
            ConfigError::ZeroDirection => write!(f, "direction must be non-zero"),
            ConfigError::InvalidSpacing(value) => {
                write!(f, "grid spacing must be positive and finite: {value}")
            }
            ConfigError::TooManySamples(count) => {
                write!(f, "grid of {count} samples exceeds {MAX_GRID_SAMPLES}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
