//! Spatial kernel: 3D math primitives and two spatial queries built on them.
//!
//! The crate is headless and host-agnostic. A caller (input capture,
//! rendering, scene wiring) hands in raw points, meshes or segments and gets
//! back plain values: inside-point sets, overlap flags, areas.
//!
//! ## Modules
//!
//! - [`core`]: `Vector3`, `Vector4`, `Quaternion`, `Matrix4`, `Plane`, `Line`
//! - [`overlap`]: ray-parity containment of sample points in two solids
//! - [`quad`]: convex quadrilateral recovery from four drawn segments
//! - [`interop`]: conversions to and from `glam`
//!
//! ## Example
//!
//! ```rust
//! use spatial_kernel::{Line, QuadrilateralReconstructor, Vector3};
//!
//! let lines = [
//!     Line::new(Vector3::from_xy(0.0, 0.0), Vector3::from_xy(1.0, 0.0)),
//!     Line::new(Vector3::from_xy(1.0, 0.0), Vector3::from_xy(1.0, 1.0)),
//!     Line::new(Vector3::from_xy(1.0, 1.0), Vector3::from_xy(0.0, 1.0)),
//!     Line::new(Vector3::from_xy(0.0, 1.0), Vector3::from_xy(0.0, 0.0)),
//! ];
//! let quad = QuadrilateralReconstructor::default()
//!     .reconstruct(&lines)
//!     .unwrap()
//!     .expect("unit square");
//! assert!((quad.area() - 1.0).abs() < 1e-3);
//! ```

pub mod core;
pub mod error;
pub mod interop;
pub mod overlap;
pub mod precision;
pub mod quad;

pub use self::core::*;
pub use error::{KernelError, KernelResult};
pub use overlap::{OverlapReport, SampleGrid, SolidOverlapDetector, Surface, TriangleMesh};
pub use precision::PrecisionConfig;
pub use quad::{Quadrilateral, QuadrilateralReconstructor};
