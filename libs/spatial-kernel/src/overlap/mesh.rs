//! # Triangle Meshes and Surfaces
//!
//! - `TriangleMesh` - indexed triangle list handed over by the host
//! - `Surface` - one [`Plane`] per mesh triangle, the form the overlap
//!   detector casts rays against

use serde::{Deserialize, Serialize};

use crate::core::matrix::Matrix4;
use crate::core::plane::{Plane, Triangle};
use crate::core::vec3::Vector3;
use crate::error::{KernelError, KernelResult};

// =============================================================================
// TRIANGLE MESH
// =============================================================================

/// Indexed triangle list: every three entries of `indices` form one
/// triangle.
///
/// ## Example
///
/// ```rust
/// use spatial_kernel::{TriangleMesh, Vector3};
///
/// let cube = TriangleMesh::cuboid(Vector3::ZERO, Vector3::ONE);
/// assert_eq!(cube.vertex_count(), 8);
/// assert_eq!(cube.triangle_count(), 12);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TriangleMesh {
    vertices: Vec<Vector3>,
    indices: Vec<u32>,
}

impl TriangleMesh {
    /// Creates a mesh after checking the buffers.
    ///
    /// ## Errors
    ///
    /// - `InvalidMesh` when `indices.len()` is not a multiple of 3 or an
    ///   index points past the vertex buffer
    /// - `NonFiniteInput` when a vertex has a NaN or infinite coordinate
    pub fn new(vertices: Vec<Vector3>, indices: Vec<u32>) -> KernelResult<Self> {
        if indices.len() % 3 != 0 {
            return Err(KernelError::invalid_mesh(format!(
                "index count {} is not a multiple of 3",
                indices.len()
            )));
        }
        if let Some(bad) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(KernelError::invalid_mesh(format!(
                "index {bad} out of bounds for {} vertices",
                vertices.len()
            )));
        }
        if let Some(position) = vertices.iter().position(|v| !v.is_finite()) {
            return Err(KernelError::non_finite(format!("mesh vertex {position}")));
        }
        Ok(Self { vertices, indices })
    }

    /// Axis-aligned box spanning `min` to `max`, 12 outward-wound
    /// triangles.
    ///
    /// Vertex ordering:
    /// - 0..4: bottom ring (`z = min.z`), counter-clockwise from `min`
    /// - 4..8: top ring (`z = max.z`), same order
    pub fn cuboid(min: Vector3, max: Vector3) -> Self {
        let vertices = vec![
            Vector3::new(min.x, min.y, min.z), // 0
            Vector3::new(max.x, min.y, min.z), // 1
            Vector3::new(max.x, max.y, min.z), // 2
            Vector3::new(min.x, max.y, min.z), // 3
            Vector3::new(min.x, min.y, max.z), // 4
            Vector3::new(max.x, min.y, max.z), // 5
            Vector3::new(max.x, max.y, max.z), // 6
            Vector3::new(min.x, max.y, max.z), // 7
        ];

        #[rustfmt::skip]
        let indices = vec![
            0, 2, 1,  0, 3, 2, // bottom
            4, 5, 6,  4, 6, 7, // top
            0, 1, 5,  0, 5, 4, // front (y = min)
            2, 3, 7,  2, 7, 6, // back (y = max)
            3, 0, 4,  3, 4, 7, // left (x = min)
            1, 2, 6,  1, 6, 5, // right (x = max)
        ];

        Self { vertices, indices }
    }

    /// Vertex positions.
    #[inline]
    pub fn vertices(&self) -> &[Vector3] {
        &self.vertices
    }

    /// Triangle indices, three per triangle.
    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterates the triangles in index order.
    ///
    /// Triangles referencing a missing vertex are skipped; only a
    /// deserialized mesh can contain them.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.indices.chunks_exact(3).filter_map(|tri| {
            let vertex = |i: u32| self.vertices.get(i as usize).copied();
            Some(Triangle::new(vertex(tri[0])?, vertex(tri[1])?, vertex(tri[2])?))
        })
    }

    /// Mesh with every vertex mapped through `transform` (as a point).
    ///
    /// This is how a host places a local-space mesh in the world before
    /// building its [`Surface`].
    pub fn transformed(&self, transform: &Matrix4) -> Self {
        Self {
            vertices: self
                .vertices
                .iter()
                .map(|v| transform.multiply_point3x4(*v))
                .collect(),
            indices: self.indices.clone(),
        }
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` for an empty mesh.
    pub fn bounding_box(&self) -> Option<(Vector3, Vector3)> {
        let first = *self.vertices.first()?;
        Some(
            self.vertices
                .iter()
                .fold((first, first), |(lo, hi), v| (lo.min(*v), hi.max(*v))),
        )
    }
}

// =============================================================================
// SURFACE
// =============================================================================

/// Closed polyhedral surface as an ordered list of triangle planes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Surface {
    planes: Vec<Plane>,
}

impl Surface {
    /// Wraps a list of planes. Planes without a triangle are kept but never
    /// register a ray crossing.
    pub fn from_planes(planes: Vec<Plane>) -> Self {
        Self { planes }
    }

    /// One plane per mesh triangle, in index order.
    pub fn from_mesh(mesh: &TriangleMesh) -> Self {
        Self {
            planes: mesh.triangles().map(Plane::from_triangle).collect(),
        }
    }

    /// The planes.
    #[inline]
    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    /// Number of planes.
    #[inline]
    pub fn len(&self) -> usize {
        self.planes.len()
    }

    /// `true` when the surface has no planes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.planes.is_empty()
    }

    /// Index of the first plane with a non-finite normal, distance or
    /// triangle vertex.
    pub(crate) fn first_non_finite(&self) -> Option<usize> {
        self.planes.iter().position(|plane| {
            !plane.normal().is_finite()
                || !plane.distance().is_finite()
                || plane.triangle().is_some_and(|t| !t.is_finite())
        })
    }
}

impl From<&TriangleMesh> for Surface {
    fn from(mesh: &TriangleMesh) -> Self {
        Self::from_mesh(mesh)
    }
}
