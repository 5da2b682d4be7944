//! Core value types of the kernel.
//!
//! Includes the vector, quaternion and matrix math plus the plane and line
//! primitives the spatial queries are built from.

pub mod line;
pub mod matrix;
pub mod plane;
pub mod quaternion;
pub mod vec3;
pub mod vec4;

pub use line::Line;
pub use matrix::{AffineTransform, Matrix4};
pub use plane::{Plane, Triangle};
pub use quaternion::Quaternion;
pub use vec3::Vector3;
pub use vec4::Vector4;
