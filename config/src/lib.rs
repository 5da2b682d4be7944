//! # Config Crate
//!
//! Centralized tolerances and defaults for the spatial kernel.
//! Every epsilon, rounding precision and sampling default used by the
//! vector math, the overlap detector and the quadrilateral reconstructor is
//! defined here so the crates agree on one set of numbers.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{EPSILON, INTERSECTION_DECIMALS, round_to_decimals};
//!
//! // Anything below EPSILON counts as zero
//! let value: f64 = 0.000001; // 1e-6, smaller than EPSILON (1e-5)
//! let is_zero = value.abs() < EPSILON;
//! assert!(is_zero);
//!
//! // Intersection points are snapped to a fixed number of decimals
//! assert_eq!(round_to_decimals(0.33349, INTERSECTION_DECIMALS), 0.333);
//! ```
//!
//! ## Conventions
//!
//! - Tolerances are absolute and expressed in world units unless the name
//!   says otherwise (`*_DEGREES`, `*_DECIMALS`)
//! - No host-engine specific values; the kernel runs headless

pub mod constants;
