//! Three-component `f64` vector shared across kernel modules.
//!
//! `Vector3` is an immutable value type: every operation returns a new
//! vector. The named methods are the contract; the `std::ops` impls at the
//! bottom of this file are thin sugar over them.
//!
//! Equality comes in two flavours. `==` is structural (bit-for-bit
//! component equality, as derived). Numerical closeness is asked for
//! explicitly through [`Vector3::approx_eq`], which treats two vectors as
//! equal when their squared distance is below `EPSILON²`.

use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use config::constants::{approx_zero, EPSILON};
use serde::{Deserialize, Serialize};

/// A 3D vector or point.
///
/// # Examples
/// ```
/// use spatial_kernel::Vector3;
/// let v = Vector3::new(3.0, 4.0, 0.0);
/// assert_eq!(v.magnitude(), 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
    /// Z component
    pub z: f64,
}

impl Vector3 {
    /// `(0, 0, 0)`
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// `(1, 1, 1)`
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);
    /// `(0, 0, 1)`
    pub const FORWARD: Self = Self::new(0.0, 0.0, 1.0);
    /// `(0, 0, -1)`
    pub const BACK: Self = Self::new(0.0, 0.0, -1.0);
    /// `(1, 0, 0)`
    pub const RIGHT: Self = Self::new(1.0, 0.0, 0.0);
    /// `(-1, 0, 0)`
    pub const LEFT: Self = Self::new(-1.0, 0.0, 0.0);
    /// `(0, 1, 0)`
    pub const UP: Self = Self::new(0.0, 1.0, 0.0);
    /// `(0, -1, 0)`
    pub const DOWN: Self = Self::new(0.0, -1.0, 0.0);
    /// All components `+∞`
    pub const POSITIVE_INFINITY: Self = Self::splat(f64::INFINITY);
    /// All components `-∞`
    pub const NEGATIVE_INFINITY: Self = Self::splat(f64::NEG_INFINITY);

    /// Creates a vector from its components.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Creates a point on the `z = 0` plane.
    #[inline]
    pub const fn from_xy(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Creates a vector with all three components set to `value`.
    #[inline]
    pub const fn splat(value: f64) -> Self {
        Self::new(value, value, value)
    }

    /// Returns a copy with the x component replaced.
    #[inline]
    pub const fn with_x(self, x: f64) -> Self {
        Self { x, ..self }
    }

    /// Returns a copy with the y component replaced.
    #[inline]
    pub const fn with_y(self, y: f64) -> Self {
        Self { y, ..self }
    }

    /// Returns a copy with the z component replaced.
    #[inline]
    pub const fn with_z(self, z: f64) -> Self {
        Self { z, ..self }
    }

    /// Components as `[x, y, z]`.
    #[inline]
    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    // =========================================================================
    // ALGEBRA
    // =========================================================================

    /// Component-wise sum.
    #[inline]
    pub fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    /// Component-wise difference `self - other`.
    #[inline]
    pub fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    /// Vector pointing the opposite way.
    #[inline]
    pub fn negate(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }

    /// Multiplies every component by `scalar`.
    #[inline]
    pub fn scale(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }

    /// Divides every component by `scalar`.
    ///
    /// Dividing by zero follows IEEE-754 and yields infinities or NaN.
    #[inline]
    pub fn divide(self, scalar: f64) -> Self {
        Self::new(self.x / scalar, self.y / scalar, self.z / scalar)
    }

    /// Component-wise product.
    #[inline]
    pub fn scale_by(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }

    /// Dot product.
    #[inline]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Right-handed cross product.
    ///
    /// # Examples
    /// ```
    /// use spatial_kernel::Vector3;
    /// assert_eq!(Vector3::RIGHT.cross(Vector3::UP), Vector3::FORWARD);
    /// ```
    #[inline]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            -(self.x * other.z - self.z * other.x),
            self.x * other.y - self.y * other.x,
        )
    }

    // =========================================================================
    // METRICS
    // =========================================================================

    /// Euclidean length.
    #[inline]
    pub fn magnitude(self) -> f64 {
        self.sqr_magnitude().sqrt()
    }

    /// Squared length.
    #[inline]
    pub fn sqr_magnitude(self) -> f64 {
        self.dot(self)
    }

    /// Distance between two points.
    #[inline]
    pub fn distance(self, other: Self) -> f64 {
        self.sub(other).magnitude()
    }

    /// Unit vector with the same direction.
    ///
    /// Vectors whose magnitude does not exceed `EPSILON` normalize to
    /// [`Vector3::ZERO`].
    ///
    /// # Examples
    /// ```
    /// use spatial_kernel::Vector3;
    /// assert_eq!(Vector3::new(0.0, 0.0, 5.0).normalized(), Vector3::FORWARD);
    /// assert_eq!(Vector3::new(1e-7, 0.0, 0.0).normalized(), Vector3::ZERO);
    /// ```
    pub fn normalized(self) -> Self {
        let magnitude = self.magnitude();
        if magnitude > EPSILON {
            self.divide(magnitude)
        } else {
            Self::ZERO
        }
    }

    /// Unsigned angle between two vectors, in degrees.
    ///
    /// Computed as `acos(dot(â, b̂))`, so the result is in `[0, 180]`. A zero
    /// vector normalizes to zero and therefore reports 90°.
    ///
    /// # Examples
    /// ```
    /// use spatial_kernel::Vector3;
    /// let angle = Vector3::RIGHT.angle(Vector3::UP);
    /// assert!((angle - 90.0).abs() < 1e-9);
    /// ```
    pub fn angle(self, other: Self) -> f64 {
        let cosine = self.normalized().dot(other.normalized()).clamp(-1.0, 1.0);
        cosine.acos().to_degrees()
    }

    /// Shortens the vector to `max_length` when it is longer.
    pub fn clamp_magnitude(self, max_length: f64) -> Self {
        if self.magnitude() > max_length {
            self.normalized().scale(max_length)
        } else {
            self
        }
    }

    // =========================================================================
    // INTERPOLATION
    // =========================================================================

    /// Linear interpolation with `t` clamped to `[0, 1]`.
    #[inline]
    pub fn lerp(self, target: Self, t: f64) -> Self {
        self.lerp_unclamped(target, t.clamp(0.0, 1.0))
    }

    /// Linear interpolation that extrapolates for `t` outside `[0, 1]`.
    #[inline]
    pub fn lerp_unclamped(self, target: Self, t: f64) -> Self {
        self.add(target.sub(self).scale(t))
    }

    /// Component-wise minimum.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self::new(
            if self.x < other.x { self.x } else { other.x },
            if self.y < other.y { self.y } else { other.y },
            if self.z < other.z { self.z } else { other.z },
        )
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self::new(
            if self.x > other.x { self.x } else { other.x },
            if self.y > other.y { self.y } else { other.y },
            if self.z > other.z { self.z } else { other.z },
        )
    }

    // =========================================================================
    // PROJECTION
    // =========================================================================

    /// Projection of `self` onto the direction `on_normal`.
    ///
    /// Returns [`Vector3::ZERO`] when `dot(n, n) < EPSILON`.
    pub fn project(self, on_normal: Self) -> Self {
        let sqr_magnitude = on_normal.dot(on_normal);
        if approx_zero(sqr_magnitude) {
            return Self::ZERO;
        }
        on_normal.scale(self.dot(on_normal) / sqr_magnitude)
    }

    /// Reflection of `self` off a surface with unit normal `normal`.
    ///
    /// # Examples
    /// ```
    /// use spatial_kernel::Vector3;
    /// let bounced = Vector3::new(1.0, -1.0, 0.0).reflect(Vector3::UP);
    /// assert_eq!(bounced, Vector3::new(1.0, 1.0, 0.0));
    /// ```
    #[inline]
    pub fn reflect(self, normal: Self) -> Self {
        self.sub(normal.scale(2.0 * self.dot(normal)))
    }

    // =========================================================================
    // COMPARISON
    // =========================================================================

    /// `true` when the squared distance is below `EPSILON²`.
    #[inline]
    pub fn approx_eq(self, other: Self) -> bool {
        self.approx_eq_eps(other, EPSILON)
    }

    /// `true` when the squared distance is below `epsilon²`.
    #[inline]
    pub fn approx_eq_eps(self, other: Self, epsilon: f64) -> bool {
        self.sub(other).sqr_magnitude() < epsilon * epsilon
    }

    /// `true` when no component is NaN or infinite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Vector3> for [f64; 3] {
    fn from(v: Vector3) -> Self {
        v.to_array()
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

// =============================================================================
// OPERATORS
// =============================================================================

impl Add for Vector3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Vector3::add(self, rhs)
    }
}

impl Sub for Vector3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Vector3::sub(self, rhs)
    }
}

impl Neg for Vector3 {
    type Output = Self;
    fn neg(self) -> Self {
        self.negate()
    }
}

impl Mul<f64> for Vector3 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}

impl Mul<Vector3> for f64 {
    type Output = Vector3;
    fn mul(self, rhs: Vector3) -> Vector3 {
        rhs.scale(self)
    }
}

impl Div<f64> for Vector3 {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        self.divide(rhs)
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = Vector3::add(*self, rhs);
    }
}

impl SubAssign for Vector3 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = Vector3::sub(*self, rhs);
    }
}

impl MulAssign<f64> for Vector3 {
    fn mul_assign(&mut self, rhs: f64) {
        *self = self.scale(rhs);
    }
}

impl DivAssign<f64> for Vector3 {
    fn div_assign(&mut self, rhs: f64) {
        *self = self.divide(rhs);
    }
}
