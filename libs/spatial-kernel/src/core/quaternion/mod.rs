//! # Quaternion
//!
//! Rotation representation `(x, y, z, w)` where `w` is the real part.
//!
//! ## Unit Quaternions
//!
//! Composition, point rotation, inversion and the interpolation family all
//! assume a unit-length quaternion. Only the constructors that are defined
//! in terms of an angle (`angle_axis`, `euler`, `look_rotation`, ...) and
//! the interpolators produce normalized results; `Quaternion::new` stores
//! what it is given.
//!
//! ## Equality
//!
//! `==` is structural. [`Quaternion::approx_eq`] compares by dot product
//! (`dot > 1 - QUATERNION_EPSILON`), so `q` and `-q` compare unequal even
//! though they describe the same rotation. Use [`Quaternion::angle`] when the
//! question is "same orientation?".

use std::fmt;
use std::ops::{Index, Mul, Neg};

use config::constants::{EPSILON, QUATERNION_EPSILON, SLERP_LINEAR_THRESHOLD};
use serde::{Deserialize, Serialize};

use crate::core::vec3::Vector3;
use crate::error::{KernelError, KernelResult};

/// A rotation quaternion.
///
/// # Examples
/// ```
/// use spatial_kernel::{Quaternion, Vector3};
/// let quarter_turn = Quaternion::angle_axis(90.0, Vector3::UP);
/// let rotated = quarter_turn * Vector3::FORWARD;
/// assert!(rotated.approx_eq(Vector3::RIGHT));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    /// Imaginary i component
    pub x: f64,
    /// Imaginary j component
    pub y: f64,
    /// Imaginary k component
    pub z: f64,
    /// Real component
    pub w: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    /// No rotation: `(0, 0, 0, 1)`.
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Creates a quaternion from raw components. No normalization.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Creates a quaternion from an imaginary part and a real part.
    #[inline]
    pub const fn from_vector(xyz: Vector3, w: f64) -> Self {
        Self::new(xyz.x, xyz.y, xyz.z, w)
    }

    /// Imaginary part.
    #[inline]
    pub const fn xyz(self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Components as `[x, y, z, w]`.
    #[inline]
    pub const fn to_array(self) -> [f64; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Component at `index` (`0..4`), or `IndexOutOfRange`.
    pub fn get(&self, index: usize) -> KernelResult<f64> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.z),
            3 => Ok(self.w),
            _ => Err(KernelError::IndexOutOfRange { index, len: 4 }),
        }
    }

    // =========================================================================
    // CONSTRUCTION
    // =========================================================================

    /// Rotation of `angle` degrees around `axis`.
    ///
    /// The axis is normalized first; a zero axis yields a pure `w` term.
    pub fn angle_axis(angle: f64, axis: Vector3) -> Self {
        let half = angle.to_radians() * 0.5;
        let (sin, cos) = half.sin_cos();
        Self::from_vector(axis.normalized().scale(sin), cos)
    }

    /// Rotation of `radians` around `axis`.
    pub fn axis_angle(axis: Vector3, radians: f64) -> Self {
        Self::angle_axis(radians.to_degrees(), axis)
    }

    /// Rotation from Euler angles in degrees.
    ///
    /// The per-axis rotations are composed as `qy * qx * qz`: Z is applied
    /// first, then X, then Y.
    ///
    /// # Examples
    /// ```
    /// use spatial_kernel::{Quaternion, Vector3};
    /// let yaw = Quaternion::euler(0.0, 90.0, 0.0);
    /// assert!((yaw * Vector3::FORWARD).approx_eq(Vector3::RIGHT));
    /// ```
    pub fn euler(x: f64, y: f64, z: f64) -> Self {
        let qx = Self::angle_axis(x, Vector3::RIGHT);
        let qy = Self::angle_axis(y, Vector3::UP);
        let qz = Self::angle_axis(z, Vector3::FORWARD);
        qy.multiply(qx).multiply(qz)
    }

    /// [`Quaternion::euler`] taking the angles as a vector.
    pub fn from_euler(angles: Vector3) -> Self {
        Self::euler(angles.x, angles.y, angles.z)
    }

    /// Shortest rotation taking `from` onto `to`.
    ///
    /// Parallel inputs give the identity. Anti-parallel inputs have no unique
    /// shortest arc; a half turn about an axis perpendicular to `from` is
    /// returned.
    pub fn from_to_rotation(from: Vector3, to: Vector3) -> Self {
        let axis = from.cross(to).normalized();
        let angle = from.angle(to);
        if axis != Vector3::ZERO {
            return Self::angle_axis(angle, axis);
        }
        if angle < 90.0 {
            return Self::IDENTITY;
        }
        let mut perpendicular = from.cross(Vector3::RIGHT).normalized();
        if perpendicular == Vector3::ZERO {
            perpendicular = from.cross(Vector3::UP).normalized();
        }
        Self::angle_axis(180.0, perpendicular)
    }

    /// Rotation whose +Z axis points along `forward`, keeping +Y towards
    /// world up.
    pub fn look_rotation(forward: Vector3) -> Self {
        Self::look_rotation_with_up(forward, Vector3::UP)
    }

    /// Rotation whose +Z axis points along `forward` and whose +Y axis lies
    /// in the plane spanned by `forward` and `up`.
    ///
    /// Builds the orthonormal basis `(right, up', forward)` and extracts the
    /// quaternion from the resulting rotation matrix, branching on whichever
    /// of the trace, `m00`, `m11` or `m22` dominates.
    ///
    /// A zero `forward` yields the identity. When `forward` is parallel to
    /// `up` the basis is undefined and the shortest rotation from +Z is
    /// returned instead.
    pub fn look_rotation_with_up(forward: Vector3, up: Vector3) -> Self {
        let forward = forward.normalized();
        if forward == Vector3::ZERO {
            return Self::IDENTITY;
        }
        let right = up.cross(forward).normalized();
        if right == Vector3::ZERO {
            return Self::from_to_rotation(Vector3::FORWARD, forward);
        }
        let up = forward.cross(right);

        // Rows are the basis vectors, i.e. the transpose of the rotation.
        let (m00, m01, m02) = (right.x, right.y, right.z);
        let (m10, m11, m12) = (up.x, up.y, up.z);
        let (m20, m21, m22) = (forward.x, forward.y, forward.z);

        let trace = m00 + m11 + m22;
        if trace > 0.0 {
            let root = (trace + 1.0).sqrt();
            let inv = 0.5 / root;
            return Self::new((m12 - m21) * inv, (m20 - m02) * inv, (m01 - m10) * inv, root * 0.5);
        }
        if m00 >= m11 && m00 >= m22 {
            let root = (1.0 + m00 - m11 - m22).sqrt();
            let inv = 0.5 / root;
            return Self::new(0.5 * root, (m01 + m10) * inv, (m02 + m20) * inv, (m12 - m21) * inv);
        }
        if m11 > m22 {
            let root = (1.0 + m11 - m00 - m22).sqrt();
            let inv = 0.5 / root;
            return Self::new((m10 + m01) * inv, 0.5 * root, (m21 + m12) * inv, (m20 - m02) * inv);
        }
        let root = (1.0 + m22 - m00 - m11).sqrt();
        let inv = 0.5 / root;
        Self::new((m20 + m02) * inv, (m21 + m12) * inv, 0.5 * root, (m01 - m10) * inv)
    }

    // =========================================================================
    // METRICS
    // =========================================================================

    /// 4D dot product.
    #[inline]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Length of the quaternion as a 4D vector.
    #[inline]
    pub fn magnitude(self) -> f64 {
        self.sqr_magnitude().sqrt()
    }

    /// Squared length.
    #[inline]
    pub fn sqr_magnitude(self) -> f64 {
        self.dot(self)
    }

    /// Unit quaternion with the same orientation, or the identity when the
    /// magnitude is below `QUATERNION_EPSILON`.
    pub fn normalized(self) -> Self {
        let magnitude = self.magnitude();
        if magnitude < QUATERNION_EPSILON {
            return Self::IDENTITY;
        }
        Self::new(
            self.x / magnitude,
            self.y / magnitude,
            self.z / magnitude,
            self.w / magnitude,
        )
    }

    /// Angle in degrees between two orientations.
    ///
    /// Uses `|dot|`, so `q` and `-q` are 0° apart.
    pub fn angle(self, other: Self) -> f64 {
        let dot = self.dot(other);
        if Self::is_equal_using_dot(dot) {
            return 0.0;
        }
        (dot.abs().min(1.0)).acos() * 2.0 * (180.0 / std::f64::consts::PI)
    }

    /// `true` when the dot product exceeds `1 - QUATERNION_EPSILON`.
    ///
    /// Sign-sensitive: `q.approx_eq(-q)` is `false`.
    #[inline]
    pub fn approx_eq(self, other: Self) -> bool {
        Self::is_equal_using_dot(self.dot(other))
    }

    #[inline]
    fn is_equal_using_dot(dot: f64) -> bool {
        dot > 1.0 - QUATERNION_EPSILON
    }

    /// `true` when no component is NaN or infinite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }

    // =========================================================================
    // ALGEBRA
    // =========================================================================

    /// Hamilton product `self * rhs`: applies `rhs` first, then `self`.
    ///
    /// Not commutative.
    pub fn multiply(self, rhs: Self) -> Self {
        Self::new(
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y + self.y * rhs.w + self.z * rhs.x - self.x * rhs.z,
            self.w * rhs.z + self.z * rhs.w + self.x * rhs.y - self.y * rhs.x,
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        )
    }

    /// Inverse of a unit quaternion (the conjugate).
    #[inline]
    pub fn inverse(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Rotates `point` with the sandwich product `q * p * q⁻¹`.
    pub fn rotate_point(self, point: Vector3) -> Vector3 {
        let p = Self::from_vector(point, 0.0);
        self.multiply(p).multiply(self.inverse()).xyz()
    }

    // =========================================================================
    // INTERPOLATION
    // =========================================================================

    /// Normalized linear blend with `t` clamped to `[0, 1]`.
    pub fn lerp(a: Self, b: Self, t: f64) -> Self {
        Self::lerp_unclamped(a, b, t.clamp(0.0, 1.0))
    }

    /// Normalized linear blend. `b` is negated when `dot(a, b) < 0` so the
    /// blend follows the shorter arc.
    pub fn lerp_unclamped(a: Self, b: Self, t: f64) -> Self {
        let b = if a.dot(b) >= 0.0 { b } else { -b };
        let left = 1.0 - t;
        Self::new(
            left * a.x + t * b.x,
            left * a.y + t * b.y,
            left * a.z + t * b.z,
            left * a.w + t * b.w,
        )
        .normalized()
    }

    /// Spherical interpolation with `t` clamped to `[0, 1]`.
    ///
    /// # Examples
    /// ```
    /// use spatial_kernel::{Quaternion, Vector3};
    /// let a = Quaternion::IDENTITY;
    /// let b = Quaternion::angle_axis(90.0, Vector3::UP);
    /// let halfway = Quaternion::slerp(a, b, 0.5);
    /// assert!((halfway.angle(a) - 45.0).abs() < 1e-6);
    /// ```
    pub fn slerp(a: Self, b: Self, t: f64) -> Self {
        Self::slerp_unclamped(a, b, t.clamp(0.0, 1.0))
    }

    /// Spherical interpolation along the shorter arc.
    ///
    /// When `dot(a, b) >= SLERP_LINEAR_THRESHOLD` the half angle is too small
    /// for `1 / sin(halfAngle)` to be stable and a linear blend is used.
    pub fn slerp_unclamped(a: Self, b: Self, t: f64) -> Self {
        if a.sqr_magnitude() == 0.0 {
            return if b.sqr_magnitude() == 0.0 { Self::IDENTITY } else { b };
        }
        if b.sqr_magnitude() == 0.0 {
            return a;
        }

        let mut dot = a.dot(b);
        if dot >= 1.0 || dot <= -1.0 {
            return a;
        }
        let mut b = b;
        if dot < 0.0 {
            b = -b;
            dot = -dot;
        }

        let (blend_a, blend_b) = if dot < SLERP_LINEAR_THRESHOLD {
            let half_angle = dot.acos();
            let inv_sin = 1.0 / half_angle.sin();
            (
                (half_angle * (1.0 - t)).sin() * inv_sin,
                (half_angle * t).sin() * inv_sin,
            )
        } else {
            (1.0 - t, t)
        };

        let result = Self::from_vector(
            a.xyz().scale(blend_a).add(b.xyz().scale(blend_b)),
            blend_a * a.w + blend_b * b.w,
        );
        if result.sqr_magnitude() > 0.0 {
            result.normalized()
        } else {
            Self::IDENTITY
        }
    }

    /// Rotates `from` towards `to` by at most `max_degrees_delta`.
    pub fn rotate_towards(from: Self, to: Self, max_degrees_delta: f64) -> Self {
        let angle = from.angle(to);
        if angle == 0.0 {
            return to;
        }
        Self::slerp_unclamped(from, to, (max_degrees_delta / angle).min(1.0))
    }

    // =========================================================================
    // DECOMPOSITION
    // =========================================================================

    /// Euler angles in degrees, each in `[-180, 180]`.
    ///
    /// Uses the roll/pitch/yaw extraction, which inverts the composition
    /// `qz * qy * qx` (X applied first). The pitch term is written as
    /// `2·atan2(√(1+s), √(1−s)) − π/2` rather than `asin(s)` so it stays
    /// well defined at ±90°.
    pub fn to_euler_angles(self) -> Vector3 {
        let Self { x, y, z, w } = self;

        let sin_x = 2.0 * (w * x + y * z);
        let cos_x = 1.0 - 2.0 * (x * x + y * y);
        let angle_x = sin_x.atan2(cos_x);

        let s = 2.0 * (w * y - x * z);
        let sin_y = (1.0 + s).max(0.0).sqrt();
        let cos_y = (1.0 - s).max(0.0).sqrt();
        let angle_y = 2.0 * sin_y.atan2(cos_y) - std::f64::consts::FRAC_PI_2;

        let sin_z = 2.0 * (w * z + x * y);
        let cos_z = 1.0 - 2.0 * (y * y + z * z);
        let angle_z = sin_z.atan2(cos_z);

        Vector3::new(angle_x.to_degrees(), angle_y.to_degrees(), angle_z.to_degrees())
    }

    /// Angle in degrees and unit rotation axis.
    ///
    /// A null rotation reports the X axis.
    pub fn to_angle_axis(self) -> (f64, Vector3) {
        let w = self.w.clamp(-1.0, 1.0);
        let angle = 2.0 * w.acos();
        let sin_half = (1.0 - w * w).sqrt();
        let axis = if sin_half > EPSILON * 10.0 {
            self.xyz().divide(sin_half)
        } else {
            Vector3::RIGHT
        };
        (angle.to_degrees(), axis)
    }
}

impl From<[f64; 4]> for Quaternion {
    fn from([x, y, z, w]: [f64; 4]) -> Self {
        Self::new(x, y, z, w)
    }
}

impl Index<usize> for Quaternion {
    type Output = f64;

    /// # Panics
    ///
    /// Panics when `index >= 4`.
    #[allow(clippy::panic)]
    fn index(&self, index: usize) -> &f64 {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            3 => &self.w,
            _ => panic!("Quaternion index {index} out of range"),
        }
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1}, {:.1}, {:.1})", self.x, self.y, self.z, self.w)
    }
}

// =============================================================================
// OPERATORS
// =============================================================================

impl Mul for Quaternion {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.multiply(rhs)
    }
}

impl Mul<Vector3> for Quaternion {
    type Output = Vector3;
    fn mul(self, rhs: Vector3) -> Vector3 {
        self.rotate_point(rhs)
    }
}

impl Neg for Quaternion {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}
