//! # Mesh Data Structure
//!
//! Renderable triangle mesh: positions, UVs, indexed triangles and the
//! material runs partitioning the index buffer. All buffers are `f32`;
//! the consumer contract is GPU vertex data.

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// A contiguous range of the index buffer sharing one material.
///
/// `first_index` and `index_count` are in index elements (3 per
/// triangle); `material` is a local index into the owning mesh node's
/// material list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialRun {
    pub first_index: usize,
    pub index_count: usize,
    pub material: usize,
}

/// A triangle mesh with material-run grouping.
///
/// # Example
///
/// ```rust
/// use glam::{Vec2, Vec3};
/// use rwx_mesh::Mesh;
///
/// let mut mesh = Mesh::new();
/// mesh.add_vertex(Vec3::new(0.0, 0.0, 0.0), Vec2::ZERO);
/// mesh.add_vertex(Vec3::new(1.0, 0.0, 0.0), Vec2::new(1.0, 0.0));
/// mesh.add_vertex(Vec3::new(0.0, 1.0, 0.0), Vec2::new(0.0, 1.0));
/// mesh.add_triangle(0, 1, 2);
/// assert_eq!(mesh.triangle_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    /// Triangle indices, 3 per face.
    pub triangles: Vec<[u32; 3]>,
    /// Material runs partitioning the index buffer, in commit order.
    pub runs: Vec<MaterialRun>,
    /// Area-weighted vertex normals; empty until computed.
    pub normals: Vec<Vec3>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count),
            uvs: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
            runs: Vec::new(),
            normals: Vec::new(),
        }
    }

    /// Appends a vertex and returns its index.
    pub fn add_vertex(&mut self, position: Vec3, uv: Vec2) -> u32 {
        self.positions.push(position);
        self.uvs.push(uv);
        (self.positions.len() - 1) as u32
    }

    /// Appends a triangle.
    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.triangles.push([a, b, c]);
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.triangles.len() * 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Declares a single material run spanning the whole index buffer.
    ///
    /// Uniformity contract for primitive builders: every mesh carries at
    /// least one run even when only one material is in play.
    pub fn set_single_run(&mut self) {
        self.runs = vec![MaterialRun {
            first_index: 0,
            index_count: self.index_count(),
            material: 0,
        }];
    }

    /// Recomputes area-weighted vertex normals from the triangle faces.
    ///
    /// Triangles referencing out-of-range indices are ignored.
    pub fn compute_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.positions.len()];
        for tri in &self.triangles {
            let [a, b, c] = tri.map(|i| i as usize);
            if a >= self.positions.len() || b >= self.positions.len() || c >= self.positions.len() {
                continue;
            }
            // Cross product length is proportional to face area, which
            // gives the weighting for free
            let face = (self.positions[b] - self.positions[a])
                .cross(self.positions[c] - self.positions[a]);
            normals[a] += face;
            normals[b] += face;
            normals[c] += face;
        }
        for n in &mut normals {
            *n = n.normalize_or_zero();
        }
        self.normals = normals;
    }

    /// Axis-aligned bounding box of the vertex positions.
    pub fn bounding_box(&self) -> (Vec3, Vec3) {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for p in &self.positions {
            min = min.min(*p);
            max = max.max(*p);
        }
        (min, max)
    }

    /// Bakes a transform into the vertex positions.
    ///
    /// Normals are recomputed afterwards when they were present, since a
    /// non-uniform transform invalidates them.
    pub fn apply_transform(&mut self, transform: &Mat4) {
        for p in &mut self.positions {
            *p = transform.transform_point3(*p);
        }
        if !self.normals.is_empty() {
            self.compute_normals();
        }
    }
}
