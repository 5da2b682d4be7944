//! Tests for the overlap detector, meshes and sample grids.

use super::*;
use crate::core::matrix::Matrix4;
use crate::core::plane::Plane;
use crate::core::quaternion::Quaternion;

fn unit_cube() -> Surface {
    Surface::from_mesh(&TriangleMesh::cuboid(Vector3::ZERO, Vector3::ONE))
}

fn shifted_cube() -> Surface {
    Surface::from_mesh(&TriangleMesh::cuboid(
        Vector3::new(0.5, 0.0, 0.0),
        Vector3::new(1.5, 1.0, 1.0),
    ))
}

fn test_grid() -> SampleGrid {
    SampleGrid::new(Vector3::new(0.1, 0.2, 0.15), 5, 0.25).unwrap()
}

// =============================================================================
// MESH
// =============================================================================

#[test]
fn cuboid_faces_point_outward() {
    let mesh = TriangleMesh::cuboid(Vector3::ZERO, Vector3::ONE);
    let center = Vector3::splat(0.5);
    for triangle in mesh.triangles() {
        let plane = Plane::from_triangle(triangle);
        assert!(!plane.get_side(center), "inward face {triangle:?}");
    }
}

#[test]
fn mesh_validation() {
    let vertices = vec![Vector3::ZERO, Vector3::RIGHT, Vector3::UP];
    assert!(TriangleMesh::new(vertices.clone(), vec![0, 1, 2]).is_ok());
    assert!(matches!(
        TriangleMesh::new(vertices.clone(), vec![0, 1]),
        Err(KernelError::InvalidMesh(_))
    ));
    assert!(matches!(
        TriangleMesh::new(vertices, vec![0, 1, 3]),
        Err(KernelError::InvalidMesh(_))
    ));
    assert!(matches!(
        TriangleMesh::new(vec![Vector3::splat(f64::NAN)], vec![]),
        Err(KernelError::NonFiniteInput { .. })
    ));
}

#[test]
fn transformed_mesh_moves_bounds() {
    let mesh = TriangleMesh::cuboid(Vector3::ZERO, Vector3::ONE);
    let moved = mesh.transformed(&Matrix4::translate(Vector3::new(2.0, 0.0, -1.0)));
    assert_eq!(
        moved.bounding_box(),
        Some((Vector3::new(2.0, 0.0, -1.0), Vector3::new(3.0, 1.0, 0.0)))
    );
    assert_eq!(moved.indices(), mesh.indices());
    assert_eq!(TriangleMesh::default().bounding_box(), None);
}

#[test]
fn surface_has_plane_per_triangle() {
    let surface = unit_cube();
    assert_eq!(surface.len(), 12);
    assert!(surface.planes().iter().all(|p| p.triangle().is_some()));
    assert!(Surface::default().is_empty());
}

// =============================================================================
// GRID
// =============================================================================

#[test]
fn grid_order_is_x_then_y_then_z() {
    let grid = SampleGrid::new(Vector3::ZERO, 2, 1.0).unwrap();
    let points = grid.points();
    assert_eq!(points.len(), 8);
    assert_eq!(points[0], Vector3::ZERO);
    assert_eq!(points[1], Vector3::new(0.0, 0.0, 1.0));
    assert_eq!(points[2], Vector3::new(0.0, 1.0, 0.0));
    assert_eq!(points[4], Vector3::new(1.0, 0.0, 0.0));
}

#[test]
fn grid_validation() {
    assert!(matches!(
        SampleGrid::new(Vector3::ZERO, 4, 0.0),
        Err(KernelError::Config(ConfigError::InvalidSpacing(_)))
    ));
    assert!(matches!(
        SampleGrid::new(Vector3::ZERO, 1_000, 0.1),
        Err(KernelError::Config(ConfigError::TooManySamples(_)))
    ));
    assert!(matches!(
        SampleGrid::new(Vector3::splat(f64::INFINITY), 4, 0.1),
        Err(KernelError::NonFiniteInput { .. })
    ));
    assert!(SampleGrid::new(Vector3::ZERO, 0, 0.1).is_ok_and(|g| g.is_empty()));
    assert_eq!(SampleGrid::default().len(), 1_000);
}

// =============================================================================
// CLASSIFICATION
// =============================================================================

#[test]
fn center_of_cube_is_inside() {
    let detector = SolidOverlapDetector::new();
    let surface = unit_cube();
    // The ray leaves through the top face's shared diagonal.
    let center = Vector3::splat(0.5);
    assert_eq!(detector.crossing_count(&surface, center), 1);
    assert!(detector.contains(&surface, center));
    assert!(detector.contains(&surface, Vector3::new(0.3, 0.6, 0.5)));
}

#[test]
fn shared_edges_and_vertices_cross_once() {
    let detector = SolidOverlapDetector::new();
    let surface = unit_cube();
    // Below the cube, on the bottom and top diagonals: two crossings.
    assert_eq!(detector.crossing_count(&surface, Vector3::new(0.25, 0.25, -1.0)), 2);
    // Diagonally out through the corner shared by six triangles.
    let corner_ray = SolidOverlapDetector::new()
        .with_ray_direction(Vector3::ONE)
        .unwrap();
    assert!(corner_ray.contains(&surface, Vector3::splat(0.5)));
}

#[test]
fn grid_on_face_diagonals_is_fully_inside() {
    let detector = SolidOverlapDetector::new();
    let grid = SampleGrid::new(Vector3::splat(0.25), 3, 0.25).unwrap();
    let inside = detector.classify(&unit_cube(), &grid.points()).unwrap();
    assert_eq!(inside.len(), 27);

    let grid = SampleGrid::new(Vector3::splat(0.125), 4, 0.25).unwrap();
    let inside = detector.classify(&unit_cube(), &grid.points()).unwrap();
    assert_eq!(inside.len(), 64);
}

#[test]
fn points_around_cube_are_outside() {
    let detector = SolidOverlapDetector::new();
    let surface = unit_cube();
    // Below: ray crosses bottom and top.
    assert_eq!(detector.crossing_count(&surface, Vector3::new(0.3, 0.6, -1.0)), 2);
    // Above and beside: no crossings.
    assert_eq!(detector.crossing_count(&surface, Vector3::new(0.3, 0.6, 2.0)), 0);
    assert_eq!(detector.crossing_count(&surface, Vector3::new(1.3, 0.6, 0.5)), 0);
}

#[test]
fn classify_keeps_input_order() {
    let detector = SolidOverlapDetector::new();
    let points = [
        Vector3::new(0.9, 0.3, 0.4),
        Vector3::new(5.0, 5.0, 5.0),
        Vector3::new(0.2, 0.7, 0.6),
    ];
    let inside = detector.classify(&unit_cube(), &points).unwrap();
    assert_eq!(inside, vec![points[0], points[2]]);
}

#[test]
fn classify_rejects_non_finite_samples() {
    let detector = SolidOverlapDetector::new();
    let points = [Vector3::ZERO, Vector3::new(f64::NAN, 0.0, 0.0)];
    assert_eq!(
        detector.classify(&unit_cube(), &points),
        Err(KernelError::non_finite("sample 1"))
    );
}

#[test]
fn grid_inside_unit_cube() {
    let detector = SolidOverlapDetector::new();
    let inside = detector.classify(&unit_cube(), &test_grid().points()).unwrap();
    assert_eq!(inside.len(), 64);
}

#[test]
fn other_ray_direction_agrees() {
    let detector = SolidOverlapDetector::new()
        .with_ray_direction(Vector3::new(1.0, 0.0, 0.0))
        .unwrap();
    let inside = detector.classify(&unit_cube(), &test_grid().points()).unwrap();
    assert_eq!(inside.len(), 64);
}

#[test]
fn zero_ray_direction_is_rejected() {
    assert_eq!(
        SolidOverlapDetector::new().with_ray_direction(Vector3::ZERO),
        Err(KernelError::Config(ConfigError::ZeroDirection))
    );
}

// =============================================================================
// OVERLAP
// =============================================================================

#[test]
fn shifted_cubes_share_half_their_samples() {
    let report = SolidOverlapDetector::new()
        .detect_grid(&unit_cube(), &shifted_cube(), &test_grid())
        .unwrap();
    assert_eq!(report.inside_a.len(), 64);
    assert_eq!(report.inside_b.len(), 48);
    assert_eq!(report.overlap.len(), 32);
    assert!(report.is_colliding());
    assert!(report.overlap.iter().all(|p| p.x > 0.5 && p.x < 1.0));
}

#[test]
fn solid_overlaps_itself_at_its_center() {
    let surface = unit_cube();
    let report = SolidOverlapDetector::new()
        .detect(&surface, &surface, &[Vector3::splat(0.5)])
        .unwrap();
    assert!(report.is_colliding());
    assert_eq!(report.overlap, vec![Vector3::splat(0.5)]);
}

#[test]
fn separated_cubes_do_not_collide() {
    let far = Surface::from_mesh(&TriangleMesh::cuboid(
        Vector3::new(3.0, 3.0, 3.0),
        Vector3::new(4.0, 4.0, 4.0),
    ));
    let report = SolidOverlapDetector::new()
        .detect_grid(&unit_cube(), &far, &test_grid())
        .unwrap();
    assert!(!report.is_colliding());
    assert!(report.inside_b.is_empty());
}

#[test]
fn rotated_mesh_is_classified_in_world_space() {
    // Quarter turn about Z around the cube's own center leaves it in place.
    let center = Vector3::splat(0.5);
    let transform = Matrix4::translate(center)
        * Matrix4::rotate(Quaternion::angle_axis(90.0, Vector3::FORWARD))
        * Matrix4::translate(center.negate());
    let mesh = TriangleMesh::cuboid(Vector3::ZERO, Vector3::ONE).transformed(&transform);
    let inside = SolidOverlapDetector::new()
        .classify(&Surface::from_mesh(&mesh), &test_grid().points())
        .unwrap();
    assert_eq!(inside.len(), 64);
}

#[test]
fn parallel_and_sequential_paths_agree() {
    let grid = SampleGrid::new(Vector3::new(-0.43, -0.37, -0.41), 10, 0.2).unwrap();
    assert!(grid.len() >= PARALLEL_SAMPLE_THRESHOLD);

    let parallel = SolidOverlapDetector::new()
        .detect_grid(&unit_cube(), &shifted_cube(), &grid)
        .unwrap();
    let sequential = SolidOverlapDetector::new()
        .with_parallel(false)
        .detect_grid(&unit_cube(), &shifted_cube(), &grid)
        .unwrap();
    assert_eq!(parallel, sequential);
    assert!(parallel.is_colliding());
}

#[test]
fn non_finite_surface_is_rejected() {
    let broken = Surface::from_planes(vec![Plane::from_points(
        Vector3::ZERO,
        Vector3::new(f64::NAN, 0.0, 0.0),
        Vector3::UP,
    )]);
    let result = SolidOverlapDetector::new().detect(&unit_cube(), &broken, &[Vector3::ZERO]);
    assert!(matches!(result, Err(KernelError::NonFiniteInput { .. })));
}
