//! # Flatten/Merge Pass
//!
//! Walks a finished group tree, bakes the accumulated transforms into
//! world-space vertex positions and concatenates every mesh passing the
//! caller's filter into one buffer. Material runs, material handles and
//! tag tables are remapped by running offsets so the merged mesh stays
//! index-consistent.

use glam::Mat4;
use rwx_material::MaterialHandle;
use rwx_mesh::{MaterialRun, Mesh};
use std::collections::HashMap;

use crate::graph::{Group, MeshNode, Node};

struct MergeState<'f> {
    mesh: Mesh,
    materials: Vec<MaterialHandle>,
    tagged: HashMap<u32, Vec<usize>>,
    filter: &'f dyn Fn(&MeshNode) -> bool,
}

impl MergeState<'_> {
    fn absorb(&mut self, node: &MeshNode, transform: &Mat4) {
        let vertex_offset = self.mesh.vertex_count() as u32;
        let index_offset = self.mesh.index_count();
        let material_offset = self.materials.len();

        for (position, uv) in node.mesh.positions.iter().zip(&node.mesh.uvs) {
            self.mesh.add_vertex(transform.transform_point3(*position), *uv);
        }
        for tri in &node.mesh.triangles {
            self.mesh.triangles.push(tri.map(|i| i + vertex_offset));
        }
        for run in &node.mesh.runs {
            self.mesh.runs.push(MaterialRun {
                first_index: run.first_index + index_offset,
                index_count: run.index_count,
                material: run.material + material_offset,
            });
        }
        for (&tag, ids) in &node.tagged {
            let merged = self.tagged.entry(tag).or_default();
            merged.extend(ids.iter().map(|id| id + material_offset));
        }
        self.materials.extend_from_slice(&node.materials);
    }

    fn visit(&mut self, group: &Group, parent: &Mat4) {
        let accumulated = *parent * group.transform;
        for child in &group.children {
            match child {
                Node::Mesh(node) if (self.filter)(node) => {
                    let local = accumulated * node.transform;
                    self.absorb(node, &local);
                }
                Node::Group(child_group) => self.visit(child_group, &accumulated),
                // Filtered-out meshes and line sets do not merge
                _ => {}
            }
        }
    }
}

/// Merges a group tree into a single world-space mesh node.
///
/// `filter` decides which mesh nodes participate; line sets never do.
/// The merged mesh carries recomputed normals and an identity transform.
pub fn flatten_group(root: &Group, filter: impl Fn(&MeshNode) -> bool) -> MeshNode {
    let mut state = MergeState {
        mesh: Mesh::new(),
        materials: Vec::new(),
        tagged: HashMap::new(),
        filter: &filter,
    };
    state.visit(root, &Mat4::IDENTITY);
    state.mesh.compute_normals();

    MeshNode {
        transform: Mat4::IDENTITY,
        mesh: state.mesh,
        materials: state.materials,
        tagged: state.tagged,
    }
}
