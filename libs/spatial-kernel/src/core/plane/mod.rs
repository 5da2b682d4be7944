//! # Plane
//!
//! Oriented plane `dot(n, p) + d = 0` with a unit normal, optionally carrying
//! the triangle it was built from.
//!
//! The triangle is what the overlap detector needs: a ray hit on the
//! infinite plane only counts when it also lands inside the triangle.
//!
//! ## Degenerate Planes
//!
//! Collinear points or a zero normal produce a plane whose normal is
//! [`Vector3::ZERO`]. Such a plane is reported by [`Plane::is_degenerate`];
//! its distance queries return `d` for every point and its ray casts never
//! hit.

use serde::{Deserialize, Serialize};

use crate::core::vec3::Vector3;

// =============================================================================
// TRIANGLE
// =============================================================================

/// Three points in space, wound `a → b → c`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    /// First vertex
    pub a: Vector3,
    /// Second vertex
    pub b: Vector3,
    /// Third vertex
    pub c: Vector3,
}

impl Triangle {
    /// Creates a triangle from its vertices.
    #[inline]
    pub const fn new(a: Vector3, b: Vector3, c: Vector3) -> Self {
        Self { a, b, c }
    }

    /// Unit normal following the right-hand rule over `a → b → c`, or zero
    /// for a degenerate triangle.
    #[inline]
    pub fn normal(&self) -> Vector3 {
        self.b.sub(self.a).cross(self.c.sub(self.a)).normalized()
    }

    /// Surface area.
    #[inline]
    pub fn area(&self) -> f64 {
        Self::area_of(self.a, self.b, self.c)
    }

    #[inline]
    fn area_of(a: Vector3, b: Vector3, c: Vector3) -> f64 {
        b.sub(a).cross(c.sub(a)).magnitude() * 0.5
    }

    /// Area-equivalence containment test for a point on the triangle's
    /// plane.
    ///
    /// The point is inside when the three sub-triangles it forms with the
    /// edges add up to the triangle's own area. The comparison uses
    /// `epsilon * max(1, area)` so large triangles keep a relative
    /// tolerance. Points on an edge count as inside.
    ///
    /// # Examples
    /// ```
    /// use spatial_kernel::{Triangle, Vector3};
    /// let t = Triangle::new(Vector3::ZERO, Vector3::RIGHT, Vector3::UP);
    /// assert!(t.contains_point(Vector3::new(0.25, 0.25, 0.0), 1e-5));
    /// assert!(!t.contains_point(Vector3::new(1.0, 1.0, 0.0), 1e-5));
    /// ```
    pub fn contains_point(&self, point: Vector3, epsilon: f64) -> bool {
        let area = self.area();
        let sum = Self::area_of(point, self.a, self.b)
            + Self::area_of(point, self.b, self.c)
            + Self::area_of(point, self.c, self.a);
        (sum - area).abs() < epsilon * area.max(1.0)
    }

    /// Same triangle with `b` and `c` swapped, so the normal flips.
    #[inline]
    pub const fn reversed(&self) -> Self {
        Self::new(self.a, self.c, self.b)
    }

    /// Triangle moved by `offset`.
    #[inline]
    pub fn translated(&self, offset: Vector3) -> Self {
        Self::new(self.a.add(offset), self.b.add(offset), self.c.add(offset))
    }

    /// `true` when every vertex is finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.a.is_finite() && self.b.is_finite() && self.c.is_finite()
    }
}

// =============================================================================
// PLANE
// =============================================================================

/// An oriented plane.
///
/// # Examples
/// ```
/// use spatial_kernel::{Plane, Vector3};
/// let plane = Plane::from_normal_and_point(Vector3::RIGHT, Vector3::ZERO);
/// assert!(plane.get_side(Vector3::new(5.0, 0.0, 0.0)));
/// assert!(!plane.get_side(Vector3::new(-5.0, 0.0, 0.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    normal: Vector3,
    distance: f64,
    triangle: Option<Triangle>,
}

impl Plane {
    /// Plane with normal `normal` through `point`.
    pub fn from_normal_and_point(normal: Vector3, point: Vector3) -> Self {
        let normal = normal.normalized();
        Self {
            normal,
            distance: -normal.dot(point),
            triangle: None,
        }
    }

    /// Plane with normal `normal` at signed distance `distance`.
    pub fn from_normal_and_distance(normal: Vector3, distance: f64) -> Self {
        Self {
            normal: normal.normalized(),
            distance,
            triangle: None,
        }
    }

    /// Plane through three points, keeping them as its triangle.
    ///
    /// The winding `a → b → c` picks the positive side.
    pub fn from_points(a: Vector3, b: Vector3, c: Vector3) -> Self {
        Self::from_triangle(Triangle::new(a, b, c))
    }

    /// Plane containing `triangle`.
    pub fn from_triangle(triangle: Triangle) -> Self {
        let normal = triangle.normal();
        Self {
            normal,
            distance: -normal.dot(triangle.a),
            triangle: Some(triangle),
        }
    }

    /// Unit normal.
    #[inline]
    pub fn normal(&self) -> Vector3 {
        self.normal
    }

    /// Signed distance term `d`.
    #[inline]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// The defining triangle, when built from points.
    #[inline]
    pub fn triangle(&self) -> Option<&Triangle> {
        self.triangle.as_ref()
    }

    /// `true` when the normal is zero (collinear points or zero normal).
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.normal == Vector3::ZERO
    }

    /// Same plane facing the other way. A defining triangle is kept with
    /// its winding reversed.
    pub fn flipped(&self) -> Self {
        Self {
            normal: self.normal.negate(),
            distance: -self.distance,
            triangle: self.triangle.map(|t| t.reversed()),
        }
    }

    /// Plane moved by `offset`.
    ///
    /// Only the component of `offset` along the normal changes `d`; the
    /// defining triangle moves by the full offset.
    pub fn translated(&self, offset: Vector3) -> Self {
        Self {
            normal: self.normal,
            distance: self.distance - self.normal.dot(offset),
            triangle: self.triangle.map(|t| t.translated(offset)),
        }
    }

    /// Signed distance from `point`: positive on the normal's side.
    #[inline]
    pub fn distance_to_point(&self, point: Vector3) -> f64 {
        self.normal.dot(point) + self.distance
    }

    /// Orthogonal projection of `point` onto the plane.
    pub fn closest_point(&self, point: Vector3) -> Vector3 {
        point.sub(self.normal.scale(self.distance_to_point(point)))
    }

    /// `true` when `point` is strictly on the positive side.
    #[inline]
    pub fn get_side(&self, point: Vector3) -> bool {
        self.distance_to_point(point) > 0.0
    }

    /// `true` when both points are on the positive side, or both are on the
    /// plane or behind it.
    pub fn same_side(&self, p0: Vector3, p1: Vector3) -> bool {
        let d0 = self.distance_to_point(p0);
        let d1 = self.distance_to_point(p1);
        (d0 > 0.0 && d1 > 0.0) || (d0 <= 0.0 && d1 <= 0.0)
    }

    /// Ray parameter `t` of the hit `origin + direction * t`.
    ///
    /// Returns `None` when the ray is parallel to the plane
    /// (`|dot(n, direction)| <= epsilon`) or the hit lies behind, or too
    /// close to, the origin (`t < epsilon`).
    pub fn raycast(&self, origin: Vector3, direction: Vector3, epsilon: f64) -> Option<f64> {
        let denominator = self.normal.dot(direction);
        if denominator.abs() <= epsilon {
            return None;
        }
        let t = -self.distance_to_point(origin) / denominator;
        (t >= epsilon).then_some(t)
    }

    /// Hit point of [`Plane::raycast`].
    pub fn ray_intersection(
        &self,
        origin: Vector3,
        direction: Vector3,
        epsilon: f64,
    ) -> Option<Vector3> {
        self.raycast(origin, direction, epsilon)
            .map(|t| origin.add(direction.scale(t)))
    }

    /// Ray parameter of a hit inside the defining triangle.
    ///
    /// Planes without a triangle never report a hit.
    pub fn triangle_raycast(
        &self,
        origin: Vector3,
        direction: Vector3,
        epsilon: f64,
    ) -> Option<f64> {
        let triangle = self.triangle.as_ref()?;
        let t = self.raycast(origin, direction, epsilon)?;
        triangle
            .contains_point(origin.add(direction.scale(t)), epsilon)
            .then_some(t)
    }

    /// `true` when the ray hits the plane inside its defining triangle.
    pub fn ray_crosses_triangle(&self, origin: Vector3, direction: Vector3, epsilon: f64) -> bool {
        self.triangle_raycast(origin, direction, epsilon).is_some()
    }
}

#[cfg(test)]
mod tests;
