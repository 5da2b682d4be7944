//! Tests for `Plane` and `Triangle`.

use super::*;
use approx::assert_abs_diff_eq;
use config::constants::EPSILON;

fn unit_right_triangle() -> Triangle {
    Triangle::new(Vector3::ZERO, Vector3::RIGHT, Vector3::UP)
}

// =============================================================================
// CONSTRUCTION
// =============================================================================

#[test]
fn normal_is_always_unit() {
    let plane = Plane::from_normal_and_point(Vector3::new(0.0, 0.0, 7.0), Vector3::ZERO);
    assert_eq!(plane.normal(), Vector3::FORWARD);

    let plane = Plane::from_normal_and_distance(Vector3::new(3.0, 4.0, 0.0), 2.0);
    assert_abs_diff_eq!(plane.normal().magnitude(), 1.0, epsilon = 1e-12);
    assert_eq!(plane.distance(), 2.0);
}

#[test]
fn from_point_sets_distance() {
    let plane = Plane::from_normal_and_point(Vector3::UP, Vector3::new(4.0, 3.0, -1.0));
    assert_eq!(plane.distance(), -3.0);
    assert!(plane.triangle().is_none());
}

#[test]
fn winding_picks_positive_side() {
    let ccw = Plane::from_points(Vector3::ZERO, Vector3::RIGHT, Vector3::UP);
    assert!(ccw.normal().approx_eq(Vector3::FORWARD));
    assert_eq!(ccw.triangle(), Some(&unit_right_triangle()));

    let cw = Plane::from_points(Vector3::ZERO, Vector3::UP, Vector3::RIGHT);
    assert!(cw.normal().approx_eq(Vector3::BACK));
}

#[test]
fn collinear_points_are_degenerate() {
    let plane = Plane::from_points(
        Vector3::ZERO,
        Vector3::new(1.0, 1.0, 1.0),
        Vector3::new(2.0, 2.0, 2.0),
    );
    assert!(plane.is_degenerate());
    assert_eq!(plane.raycast(Vector3::ZERO, Vector3::FORWARD, EPSILON), None);
}

// =============================================================================
// QUERIES
// =============================================================================

#[test]
fn side_of_x_plane() {
    let plane = Plane::from_normal_and_point(Vector3::RIGHT, Vector3::ZERO);
    assert!(plane.get_side(Vector3::new(5.0, 0.0, 0.0)));
    assert!(!plane.get_side(Vector3::new(-5.0, 0.0, 0.0)));
    assert!(!plane.get_side(Vector3::ZERO));
}

#[test]
fn same_side_groups_on_plane_with_negative() {
    let plane = Plane::from_normal_and_point(Vector3::UP, Vector3::ZERO);
    assert!(plane.same_side(Vector3::new(0.0, 1.0, 0.0), Vector3::new(3.0, 2.0, 1.0)));
    assert!(plane.same_side(Vector3::ZERO, Vector3::new(0.0, -2.0, 0.0)));
    assert!(!plane.same_side(Vector3::new(0.0, 1.0, 0.0), Vector3::ZERO));
}

#[test]
fn distance_and_closest_point() {
    let plane = Plane::from_normal_and_point(Vector3::UP, Vector3::new(0.0, 2.0, 0.0));
    let p = Vector3::new(3.0, 7.0, -1.0);
    assert_eq!(plane.distance_to_point(p), 5.0);
    let closest = plane.closest_point(p);
    assert_eq!(closest, Vector3::new(3.0, 2.0, -1.0));
    assert_abs_diff_eq!(plane.distance_to_point(closest), 0.0, epsilon = 1e-12);
}

#[test]
fn flipped_negates_everything() {
    let plane = Plane::from_points(Vector3::ZERO, Vector3::RIGHT, Vector3::UP)
        .translated(Vector3::new(0.0, 0.0, 2.0));
    let flipped = plane.flipped();
    assert_eq!(flipped.normal(), plane.normal().negate());
    assert_eq!(flipped.distance(), -plane.distance());

    let p = Vector3::new(0.3, 0.3, 5.0);
    assert_abs_diff_eq!(flipped.distance_to_point(p), -plane.distance_to_point(p));
    let triangle = flipped.triangle().copied().unwrap_or(unit_right_triangle());
    assert!(triangle.normal().approx_eq(flipped.normal()));
}

#[test]
fn translated_moves_plane_along_offset() {
    let plane = Plane::from_normal_and_point(Vector3::FORWARD, Vector3::ZERO);
    let moved = plane.translated(Vector3::new(4.0, -1.0, 3.0));
    assert_eq!(moved.distance(), -3.0);
    assert_abs_diff_eq!(moved.distance_to_point(Vector3::new(0.0, 0.0, 3.0)), 0.0);

    let with_triangle = Plane::from_points(Vector3::ZERO, Vector3::RIGHT, Vector3::UP);
    let moved = with_triangle.translated(Vector3::new(0.0, 0.0, 2.0));
    let triangle = moved.triangle().copied().unwrap_or(unit_right_triangle());
    assert_abs_diff_eq!(moved.distance_to_point(triangle.a), 0.0);
    assert_abs_diff_eq!(moved.distance_to_point(triangle.c), 0.0);
}

// =============================================================================
// RAY CASTS
// =============================================================================

#[test]
fn raycast_hits_plane_in_front() {
    let plane = Plane::from_normal_and_point(Vector3::FORWARD, Vector3::new(0.0, 0.0, 4.0));
    let t = plane.raycast(Vector3::new(1.0, 1.0, 1.0), Vector3::FORWARD, EPSILON);
    assert_eq!(t, Some(3.0));

    // Orientation of the normal does not matter for the hit itself.
    let t = plane.flipped().raycast(Vector3::new(1.0, 1.0, 1.0), Vector3::FORWARD, EPSILON);
    assert_eq!(t, Some(3.0));
}

#[test]
fn raycast_ignores_hits_behind_origin() {
    let plane = Plane::from_normal_and_point(Vector3::FORWARD, Vector3::ZERO);
    assert_eq!(plane.raycast(Vector3::new(0.0, 0.0, 1.0), Vector3::FORWARD, EPSILON), None);
    assert_eq!(plane.raycast(Vector3::ZERO, Vector3::FORWARD, EPSILON), None);
}

#[test]
fn raycast_parallel_ray_misses() {
    let plane = Plane::from_normal_and_point(Vector3::RIGHT, Vector3::ZERO);
    assert_eq!(plane.raycast(Vector3::new(-1.0, 0.0, 0.0), Vector3::FORWARD, EPSILON), None);
}

#[test]
fn ray_crosses_triangle_only_inside() {
    let plane = Plane::from_points(
        Vector3::new(0.0, 0.0, 2.0),
        Vector3::new(1.0, 0.0, 2.0),
        Vector3::new(0.0, 1.0, 2.0),
    );
    assert!(plane.ray_crosses_triangle(Vector3::new(0.2, 0.2, 0.0), Vector3::FORWARD, EPSILON));
    assert!(!plane.ray_crosses_triangle(Vector3::new(0.8, 0.8, 0.0), Vector3::FORWARD, EPSILON));

    let bare = Plane::from_normal_and_point(Vector3::FORWARD, Vector3::new(0.0, 0.0, 2.0));
    assert!(!bare.ray_crosses_triangle(Vector3::ZERO, Vector3::FORWARD, EPSILON));
}

#[test]
fn triangle_raycast_reports_hit_parameter() {
    let plane = Plane::from_points(
        Vector3::new(0.0, 0.0, 2.0),
        Vector3::new(1.0, 0.0, 2.0),
        Vector3::new(0.0, 1.0, 2.0),
    );
    let origin = Vector3::new(0.5, 0.5, 0.5);
    // On the hypotenuse: still a hit.
    let t = plane.triangle_raycast(origin, Vector3::FORWARD, EPSILON);
    assert_abs_diff_eq!(t.unwrap(), 1.5, epsilon = 1e-12);
    assert_eq!(
        plane.triangle_raycast(Vector3::new(0.9, 0.9, 0.5), Vector3::FORWARD, EPSILON),
        None
    );
}

// =============================================================================
// TRIANGLE
// =============================================================================

#[test]
fn triangle_area_and_normal() {
    let t = unit_right_triangle();
    assert_eq!(t.area(), 0.5);
    assert!(t.normal().approx_eq(Vector3::FORWARD));
    assert!(t.reversed().normal().approx_eq(Vector3::BACK));
}

#[test]
fn triangle_contains_vertices_and_edges() {
    let t = unit_right_triangle();
    assert!(t.contains_point(Vector3::ZERO, EPSILON));
    assert!(t.contains_point(Vector3::new(0.5, 0.5, 0.0), EPSILON));
    assert!(t.contains_point(Vector3::new(0.5, 0.0, 0.0), EPSILON));
    assert!(!t.contains_point(Vector3::new(-0.1, 0.5, 0.0), EPSILON));
}

#[test]
fn large_triangle_uses_relative_tolerance() {
    let t = Triangle::new(
        Vector3::ZERO,
        Vector3::new(1000.0, 0.0, 0.0),
        Vector3::new(0.0, 1000.0, 0.0),
    );
    assert!(t.contains_point(Vector3::new(333.3, 333.3, 0.0), EPSILON));
    assert!(!t.contains_point(Vector3::new(600.0, 600.0, 0.0), EPSILON));
}

#[test]
fn plane_serializes() {
    let plane = Plane::from_points(Vector3::ZERO, Vector3::RIGHT, Vector3::UP);
    let json = serde_json::to_string(&plane).unwrap();
    let back: Plane = serde_json::from_str(&json).unwrap();
    assert_eq!(back, plane);
}
