//! # Scene Graph
//!
//! The node model delivered to the caller. Groups nest arbitrarily and
//! own a local transform; mesh nodes carry their geometry already baked
//! into parent-local space, so most node transforms stay identity (the
//! exceptions being prototype instances and the unit-scaled root).
//!
//! `Clone` on a group is a deep copy of the whole subtree, which is what
//! prototype instancing relies on.

use glam::{Mat4, Vec3};
use rwx_material::MaterialHandle;
use rwx_mesh::Mesh;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A mesh attached to the graph, with its per-mesh material bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshNode {
    pub transform: Mat4,
    pub mesh: Mesh,
    /// Manager handles indexed by the mesh's material-local indices.
    pub materials: Vec<MaterialHandle>,
    /// Face tag → local material indices stamped with that tag.
    pub tagged: HashMap<u32, Vec<usize>>,
}

/// Line segments synthesized from wireframe-sampled quads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSet {
    pub segments: Vec<[Vec3; 2]>,
    /// Packed 24-bit RGB line color, taken from the material active at
    /// synthesis time.
    pub color: u32,
}

/// One child of a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Group(Group),
    Mesh(MeshNode),
    Lines(LineSet),
}

/// A clump scope materialized as a scene node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub transform: Mat4,
    /// Group-level tag attribute, distinct from per-face material tags.
    pub tag: Option<u32>,
    pub children: Vec<Node>,
}

impl Default for Group {
    fn default() -> Self {
        Self::new()
    }
}

impl Group {
    pub fn new() -> Self {
        Self { transform: Mat4::IDENTITY, tag: None, children: Vec::new() }
    }

    pub fn add_child(&mut self, node: Node) {
        self.children.push(node);
    }

    /// Mesh nodes directly owned by this group.
    pub fn meshes(&self) -> impl Iterator<Item = &MeshNode> {
        self.children.iter().filter_map(|child| match child {
            Node::Mesh(mesh) => Some(mesh),
            _ => None,
        })
    }

    /// Child groups directly owned by this group.
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.children.iter().filter_map(|child| match child {
            Node::Group(group) => Some(group),
            _ => None,
        })
    }

    /// Total mesh count across the whole subtree.
    pub fn mesh_count(&self) -> usize {
        self.meshes().count() + self.groups().map(Group::mesh_count).sum::<usize>()
    }
}
