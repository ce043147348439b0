//! # Geometry Buffer
//!
//! Incremental accumulation of one clump's geometry. Faces arrive
//! interleaved with material switches; the buffer groups consecutive
//! faces sharing a material into runs so the finished mesh can be drawn
//! with one call per run.

use glam::{Vec2, Vec3};
use log::warn;

use crate::mesh::{MaterialRun, Mesh};

/// Accumulates vertices and faces for the clump currently being built.
///
/// Material identity is a local index supplied by the caller; the buffer
/// only cares about when it changes. Faces referencing out-of-range
/// vertex indices are dropped with a warning rather than poisoning the
/// mesh.
#[derive(Debug, Default)]
pub struct GeometryBuffer {
    positions: Vec<Vec3>,
    uvs: Vec<Vec2>,
    triangles: Vec<[u32; 3]>,
    runs: Vec<MaterialRun>,
    /// Material local index of the open run, if any face has landed yet.
    current_material: Option<usize>,
    /// Index-buffer offset where the open run starts.
    run_first_index: usize,
    /// Faces accumulated in the open run.
    run_face_count: usize,
}

impl GeometryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.triangles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Appends a vertex (already in clump space) and returns its index.
    pub fn add_vertex(&mut self, position: Vec3, uv: Vec2) -> u32 {
        self.positions.push(position);
        self.uvs.push(uv);
        (self.positions.len() - 1) as u32
    }

    /// Position of a previously added vertex, if in range.
    pub fn position(&self, index: u32) -> Option<Vec3> {
        self.positions.get(index as usize).copied()
    }

    /// All vertex positions accumulated so far.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// UV of a previously added vertex, if in range.
    pub fn uv(&self, index: u32) -> Option<Vec2> {
        self.uvs.get(index as usize).copied()
    }

    /// Declares the material for subsequent faces.
    ///
    /// Returns `true` when this closed a run, which is the caller's cue
    /// to commit the materials used so far.
    pub fn switch_material(&mut self, material: usize) -> bool {
        if self.current_material == Some(material) {
            return false;
        }
        let flushed = self.flush_run();
        self.current_material = Some(material);
        flushed
    }

    /// Appends a triangle under the current material.
    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        let limit = self.positions.len() as u32;
        if a >= limit || b >= limit || c >= limit {
            warn!(
                "Dropping triangle with out-of-range vertex index ({}, {}, {}) of {}",
                a, b, c, limit
            );
            return;
        }
        self.triangles.push([a, b, c]);
        self.run_face_count += 1;
    }

    /// Appends a quad as two triangles sharing the (a, c) diagonal.
    pub fn add_quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.add_triangle(a, b, c);
        self.add_triangle(a, c, d);
    }

    /// Appends a batch of pre-built triangles.
    pub fn add_triangles(&mut self, triangles: &[[u32; 3]]) {
        for &[a, b, c] in triangles {
            self.add_triangle(a, b, c);
        }
    }

    fn flush_run(&mut self) -> bool {
        if self.run_face_count == 0 {
            return false;
        }
        // A face can only land after switch_material, so the unwrap-free
        // default of 0 is unreachable in practice
        let material = self.current_material.unwrap_or(0);
        let index_count = self.run_face_count * 3;
        self.runs.push(MaterialRun { first_index: self.run_first_index, index_count, material });
        self.run_first_index += index_count;
        self.run_face_count = 0;
        true
    }

    /// Closes the buffer and produces the finished mesh.
    ///
    /// Returns `None` when no face was ever added; stray vertices alone
    /// do not make a mesh. The buffer resets to empty either way.
    pub fn finalize(&mut self) -> Option<Mesh> {
        self.flush_run();
        let buffer = std::mem::take(self);
        if buffer.runs.is_empty() {
            return None;
        }
        let mut mesh = Mesh {
            positions: buffer.positions,
            uvs: buffer.uvs,
            triangles: buffer.triangles,
            runs: buffer.runs,
            normals: Vec::new(),
        };
        mesh.compute_normals();
        Some(mesh)
    }
}
