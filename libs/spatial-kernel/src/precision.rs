//! Precision configuration for the spatial queries.
//!
//! Bundles the tolerances used by the overlap detector and the quadrilateral
//! reconstructor. The shared tolerance and rounding precision come from a
//! validated [`GlobalConfig`]; the remaining tolerances from the `config`
//! crate's constants.

use config::constants::{
    GlobalConfig, ANGLE_SUM_TOLERANCE_DEGREES, COLLINEAR_EPSILON, SEGMENT_PARALLEL_EPSILON,
};

use crate::error::KernelResult;

/// Precision configuration for geometric queries.
///
/// # Examples
/// ```
/// use spatial_kernel::PrecisionConfig;
/// let precision = PrecisionConfig::default();
/// assert!(precision.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PrecisionConfig {
    /// Tolerance for ray/plane denominators, ray parameters and
    /// triangle-area comparisons
    pub epsilon: f64,
    /// Denominator below which two segments count as parallel
    pub parallel_epsilon: f64,
    /// Sine of the edge angle below which three points are collinear
    pub collinear_epsilon: f64,
    /// Allowed deviation of a quadrilateral's angle sum from 360 degrees
    pub angle_sum_tolerance: f64,
    /// Decimal places kept on snapped intersection points
    pub rounding_decimals: u32,
}

impl Default for PrecisionConfig {
    fn default() -> Self {
        Self::from(GlobalConfig::default())
    }
}

impl From<GlobalConfig> for PrecisionConfig {
    fn from(global: GlobalConfig) -> Self {
        Self {
            epsilon: global.tolerance,
            parallel_epsilon: SEGMENT_PARALLEL_EPSILON,
            collinear_epsilon: COLLINEAR_EPSILON,
            angle_sum_tolerance: ANGLE_SUM_TOLERANCE_DEGREES,
            rounding_decimals: global.rounding_decimals,
        }
    }
}

impl PrecisionConfig {
    /// Creates a configuration from an explicit tolerance and rounding
    /// precision, validated by [`GlobalConfig::new`].
    ///
    /// # Examples
    /// ```
    /// use spatial_kernel::PrecisionConfig;
    /// let precision = PrecisionConfig::new(1.0e-6, 4).unwrap();
    /// assert_eq!(precision.rounding_decimals, 4);
    /// assert!(PrecisionConfig::new(0.0, 4).is_err());
    /// ```
    pub fn new(tolerance: f64, rounding_decimals: u32) -> KernelResult<Self> {
        Ok(GlobalConfig::new(tolerance, rounding_decimals)?.into())
    }

    /// Creates a high-precision configuration
    pub fn high_precision() -> Self {
        Self {
            epsilon: 1e-9,
            parallel_epsilon: 1e-9,
            collinear_epsilon: 1e-9,
            angle_sum_tolerance: 1e-6,
            rounding_decimals: 6,
        }
    }

    /// Creates a fast, lower-precision configuration
    pub fn fast() -> Self {
        Self {
            epsilon: 1e-3,
            parallel_epsilon: 1e-3,
            collinear_epsilon: 1e-3,
            angle_sum_tolerance: 0.1,
            rounding_decimals: 2,
        }
    }

    /// Checks every tolerance is positive and finite and the rounding
    /// precision is within range.
    ///
    /// # Examples
    /// ```
    /// use spatial_kernel::PrecisionConfig;
    /// let broken = PrecisionConfig { epsilon: -1.0, ..PrecisionConfig::default() };
    /// assert!(broken.validate().is_err());
    /// ```
    pub fn validate(&self) -> KernelResult<()> {
        for tolerance in [
            self.epsilon,
            self.parallel_epsilon,
            self.collinear_epsilon,
            self.angle_sum_tolerance,
        ] {
            GlobalConfig::new(tolerance, self.rounding_decimals)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::KernelError;
    use config::constants::{ConfigError, EPSILON, INTERSECTION_DECIMALS};

    #[test]
    fn test_precision_config_default() {
        let config = PrecisionConfig::default();
        assert_eq!(config.epsilon, EPSILON);
        assert_eq!(config.parallel_epsilon, SEGMENT_PARALLEL_EPSILON);
        assert_eq!(config.rounding_decimals, INTERSECTION_DECIMALS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_precision_config_high() {
        let config = PrecisionConfig::high_precision();
        assert_eq!(config.epsilon, 1e-9);
        assert_eq!(config.rounding_decimals, 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_precision_config_fast() {
        let config = PrecisionConfig::fast();
        assert_eq!(config.epsilon, 1e-3);
        assert_eq!(config.rounding_decimals, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_precision_config_new_delegates_to_global() {
        let config = PrecisionConfig::new(1e-7, 5).unwrap();
        assert_eq!(config.epsilon, 1e-7);
        assert_eq!(config.rounding_decimals, 5);
        assert_eq!(config.collinear_epsilon, COLLINEAR_EPSILON);

        assert_eq!(
            PrecisionConfig::new(-1.0, 3),
            Err(KernelError::Config(ConfigError::InvalidTolerance(-1.0)))
        );
        assert_eq!(
            PrecisionConfig::new(1e-6, 40),
            Err(KernelError::Config(ConfigError::InvalidDecimals(40)))
        );
        assert_eq!(
            PrecisionConfig::from(GlobalConfig::default()),
            PrecisionConfig::default()
        );
    }

    #[test]
    fn test_validate_rejects_nan_and_large_decimals() {
        let nan = PrecisionConfig {
            angle_sum_tolerance: f64::NAN,
            ..PrecisionConfig::default()
        };
        assert!(matches!(
            nan.validate(),
            Err(KernelError::Config(ConfigError::InvalidTolerance(_)))
        ));

        let decimals = PrecisionConfig {
            rounding_decimals: 99,
            ..PrecisionConfig::default()
        };
        assert_eq!(
            decimals.validate(),
            Err(KernelError::Config(ConfigError::InvalidDecimals(99)))
        );
    }
}
