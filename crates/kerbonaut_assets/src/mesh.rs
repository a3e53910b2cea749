//! # Mesh
//!
//! A validated triangle mesh assembled from the four geometry arrays.
//!
//! ## Invariants
//!
//! - `uvs` is empty or has one entry per vertex
//! - `normals` has one entry per vertex (recomputed when not supplied)
//! - `indices.len()` is a multiple of three and every index addresses a vertex
//! - `bounds` encloses every vertex

use kerbonaut_shared::{Bounds, Vec2, Vec3};

use crate::geometry::{GeometryError, GeometryResult};

/// Triangle mesh ready to hand to the host.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    name: String,
    vertices: Vec<Vec3>,
    uvs: Vec<Vec2>,
    normals: Vec<Vec3>,
    indices: Vec<u32>,
    bounds: Bounds,
}

impl Mesh {
    /// Assembles and validates a mesh.
    ///
    /// `normals` of `None` recomputes smooth normals from the triangles.
    ///
    /// # Errors
    ///
    /// Returns error if the UV or normal count disagrees with the vertex
    /// count, or if the index list is not whole in-range triangles.
    pub fn new(
        name: impl Into<String>,
        vertices: Vec<Vec3>,
        uvs: Vec<Vec2>,
        normals: Option<Vec<Vec3>>,
        indices: Vec<i32>,
    ) -> GeometryResult<Self> {
        let name = name.into();

        if !uvs.is_empty() && uvs.len() != vertices.len() {
            return Err(GeometryError::UvMismatch {
                mesh: name,
                vertices: vertices.len(),
                uvs: uvs.len(),
            });
        }

        if indices.len() % 3 != 0 {
            return Err(GeometryError::PartialTriangle {
                mesh: name,
                indices: indices.len(),
            });
        }

        let indices = indices
            .into_iter()
            .map(|i| {
                u32::try_from(i)
                    .ok()
                    .filter(|&u| (u as usize) < vertices.len())
                    .ok_or(i)
            })
            .collect::<Result<Vec<u32>, i32>>()
            .map_err(|index| GeometryError::IndexOutOfRange {
                mesh: name.clone(),
                index,
                vertices: vertices.len(),
            })?;

        let normals = match normals {
            Some(normals) if normals.len() != vertices.len() => {
                return Err(GeometryError::NormalMismatch {
                    mesh: name,
                    vertices: vertices.len(),
                    normals: normals.len(),
                });
            }
            Some(normals) => normals,
            None => compute_normals(&vertices, &indices),
        };

        let bounds = Bounds::from_points(&vertices);

        Ok(Self {
            name,
            vertices,
            uvs,
            normals,
            indices,
            bounds,
        })
    }

    /// Mesh name (file stem).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Vertex positions.
    #[must_use]
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Texture coordinates. Empty when the mesh has none.
    #[must_use]
    pub fn uvs(&self) -> &[Vec2] {
        &self.uvs
    }

    /// Per-vertex normals.
    #[must_use]
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Triangle list indices.
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Axis-aligned bounds of the vertices.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex positions as raw bytes, for upload.
    #[must_use]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Normals as raw bytes, for upload.
    #[must_use]
    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    /// Indices as raw bytes, for upload.
    #[must_use]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Smooth normals: each vertex gets the normalized sum of the (area-weighted)
/// normals of the faces using it. Unused vertices point up.
fn compute_normals(vertices: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut sums = vec![Vec3::ZERO; vertices.len()];

    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let face = (vertices[b] - vertices[a]).cross(vertices[c] - vertices[a]);
        sums[a] += face;
        sums[b] += face;
        sums[c] += face;
    }

    sums.into_iter().map(|n| n.normalize_or(Vec3::Y)).collect()
}
