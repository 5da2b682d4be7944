//! # glam Interop
//!
//! Lossless conversions between the kernel's value types and their `glam`
//! double-precision counterparts. Both sides store column-major `f64`, so
//! every conversion is a plain copy.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use spatial_kernel::Vector3;
//!
//! let v: DVec3 = Vector3::new(1.0, 2.0, 3.0).into();
//! assert_eq!(Vector3::from(v * 2.0), Vector3::new(2.0, 4.0, 6.0));
//! ```

use glam::{DMat4, DQuat, DVec3, DVec4};

use crate::core::matrix::Matrix4;
use crate::core::quaternion::Quaternion;
use crate::core::vec3::Vector3;
use crate::core::vec4::Vector4;

impl From<DVec3> for Vector3 {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vector3> for DVec3 {
    fn from(v: Vector3) -> Self {
        DVec3::new(v.x, v.y, v.z)
    }
}

impl From<DVec4> for Vector4 {
    fn from(v: DVec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

impl From<Vector4> for DVec4 {
    fn from(v: Vector4) -> Self {
        DVec4::new(v.x, v.y, v.z, v.w)
    }
}

impl From<DQuat> for Quaternion {
    fn from(q: DQuat) -> Self {
        Self::new(q.x, q.y, q.z, q.w)
    }
}

impl From<Quaternion> for DQuat {
    fn from(q: Quaternion) -> Self {
        DQuat::from_xyzw(q.x, q.y, q.z, q.w)
    }
}

impl From<DMat4> for Matrix4 {
    fn from(m: DMat4) -> Self {
        Self::from_cols_array(m.to_cols_array())
    }
}

impl From<Matrix4> for DMat4 {
    fn from(m: Matrix4) -> Self {
        DMat4::from_cols_array(&m.to_cols_array())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Cross-checks against glam as a reference implementation.

    #[test]
    fn cross_product_matches_glam() {
        let a = Vector3::new(1.0, -2.0, 0.5);
        let b = Vector3::new(3.0, 0.25, -1.0);
        let expected = DVec3::from(a).cross(DVec3::from(b));
        assert!(a.cross(b).approx_eq_eps(expected.into(), 1e-12));
    }

    #[test]
    fn angle_axis_matches_glam() {
        let axis = Vector3::new(0.3, -0.4, 0.8).normalized();
        let q = Quaternion::angle_axis(72.0, axis);
        let reference = DQuat::from_axis_angle(axis.into(), 72f64.to_radians());
        assert!(q.approx_eq(reference.into()));
    }

    #[test]
    fn hamilton_product_matches_glam() {
        let a = Quaternion::euler(10.0, 20.0, 30.0);
        let b = Quaternion::euler(-45.0, 5.0, 60.0);
        let reference = DQuat::from(a) * DQuat::from(b);
        assert!((a * b).approx_eq(reference.into()));
    }

    #[test]
    fn point_rotation_matches_glam() {
        let q = Quaternion::euler(33.0, -12.0, 81.0);
        let p = Vector3::new(2.0, -1.0, 0.5);
        let reference = DQuat::from(q) * DVec3::from(p);
        assert!((q * p).approx_eq_eps(reference.into(), 1e-9));
    }

    #[test]
    fn trs_matches_glam() {
        let t = Vector3::new(1.0, -2.0, 3.0);
        let r = Quaternion::euler(15.0, 40.0, -70.0);
        let s = Vector3::new(2.0, 0.5, 1.5);
        let ours = Matrix4::trs(t, r, s);
        let reference = DMat4::from_scale_rotation_translation(s.into(), r.into(), t.into());
        assert!(ours.approx_eq(&reference.into(), 1e-9));
    }

    #[test]
    fn inverse_and_determinant_match_glam() {
        let m = Matrix4::from_cols_array([
            2.0, 1.0, 0.0, 0.5, //
            -1.0, 3.0, 2.0, 0.0, //
            0.0, 1.0, 4.0, -2.0, //
            5.0, -2.0, 1.0, 1.0,
        ]);
        let reference = DMat4::from(m);
        assert!((m.determinant() - reference.determinant()).abs() < 1e-9);
        assert!(m.inverse().approx_eq(&reference.inverse().into(), 1e-9));
    }

    #[test]
    fn matrix_vector_product_matches_glam() {
        let m = Matrix4::trs(
            Vector3::new(0.5, 0.0, -1.0),
            Quaternion::angle_axis(30.0, Vector3::RIGHT),
            Vector3::ONE,
        );
        let v = Vector4::new(1.0, 2.0, 3.0, 1.0);
        let reference = Vector4::from(DMat4::from(m) * DVec4::from(v));
        assert!((m * v - reference).magnitude() < 1e-12);
    }

    #[test]
    fn round_trips_are_lossless() {
        let m = Matrix4::from_cols_array(std::array::from_fn(|i| i as f64 * 0.5));
        assert_eq!(Matrix4::from(DMat4::from(m)), m);
        let q = Quaternion::new(0.1, 0.2, 0.3, 0.4);
        assert_eq!(Quaternion::from(DQuat::from(q)), q);
    }
}
