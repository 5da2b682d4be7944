//! # Error Types
//!
//! Error types for kernel operations.
//!
//! ## Error Policy
//!
//! - Degenerate geometry is NOT an error: zero-length normalization, singular
//!   matrix inversion, parallel segments and zero-area triangles return
//!   well-defined sentinels (zero vector, zero matrix, `None`)
//! - Misuse that the caller can check for up front (index out of range,
//!   wrong segment count, non-finite input at an algorithm boundary) is
//!   reported explicitly through [`KernelError`]
//! - "No quadrilateral found" is a normal `Ok(None)` outcome

use config::constants::ConfigError;
use thiserror::Error;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur during kernel operations.
///
/// ## Example
///
/// ```rust
/// use spatial_kernel::{KernelError, Matrix4};
///
/// match Matrix4::identity().get(4, 0) {
///     Ok(value) => println!("m[4][0] = {value}"),
///     Err(KernelError::MatrixIndexOutOfRange { row, col }) => {
///         eprintln!("no element at ({row}, {col})")
///     }
///     Err(e) => eprintln!("Other error: {e}"),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KernelError {
    /// Flat component index outside `0..len`.
    #[error("Index {index} out of range (len {len})")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of addressable components
        len: usize,
    },

    /// Matrix `(row, column)` pair outside `0..4`.
    #[error("Matrix index ({row}, {col}) out of range")]
    MatrixIndexOutOfRange {
        /// Requested row
        row: usize,
        /// Requested column
        col: usize,
    },

    /// An algorithm received NaN or infinite coordinates.
    ///
    /// Contains a description of the offending input.
    #[error("Non-finite input: {context}")]
    NonFiniteInput {
        /// Which input carried the non-finite value
        context: String,
    },

    /// Reconstruction requires exactly four segments.
    #[error("Expected {expected} segments, got {found}")]
    SegmentCount {
        /// Required number of segments
        expected: usize,
        /// Number of segments supplied
        found: usize,
    },

    /// Mesh buffers do not describe a triangle list.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// Invalid tolerance or sampling configuration.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl KernelError {
    /// Creates a non-finite input error.
    pub fn non_finite(context: impl Into<String>) -> Self {
        Self::NonFiniteInput {
            context: context.into(),
        }
    }

    /// Creates an invalid mesh error.
    pub fn invalid_mesh(message: impl Into<String>) -> Self {
        Self::InvalidMesh(message.into())
    }
}

// =============================================================================
// RESULT TYPE ALIAS
// =============================================================================

/// Result type alias for kernel operations.
///
/// ## Example
///
/// ```rust
/// use spatial_kernel::error::KernelResult;
/// use spatial_kernel::Quaternion;
///
/// fn third_component(q: Quaternion) -> KernelResult<f64> {
///     q.get(2)
/// }
/// # assert!(third_component(Quaternion::IDENTITY).is_ok());
/// ```
pub type KernelResult<T> = Result<T, KernelError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Test error display messages.
    #[test]
    fn test_error_display() {
        let index_err = KernelError::IndexOutOfRange { index: 16, len: 16 };
        assert!(index_err.to_string().contains("16"));

        let count_err = KernelError::SegmentCount {
            expected: 4,
            found: 3,
        };
        assert!(count_err.to_string().contains('4'));
        assert!(count_err.to_string().contains('3'));

        let input_err = KernelError::non_finite("segment 2 start");
        assert!(input_err.to_string().contains("segment 2 start"));
    }

    #[test]
    fn test_config_error_converts() {
        let err: KernelError = ConfigError::ZeroDirection.into();
        assert!(matches!(err, KernelError::Config(ConfigError::ZeroDirection)));
    }

    /// Test error types are Send + Sync for use across rayon workers.
    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<KernelError>();
    }
}
