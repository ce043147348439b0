//! Axis-aligned box primitive.

use glam::{Vec2, Vec3};

use crate::mesh::Mesh;

/// Corner-shared index layout of the six faces, two triangles each.
const BLOCK_TRIANGLES: [[u32; 3]; 12] = [
    [0, 3, 1],
    [1, 3, 2],
    [0, 4, 3],
    [3, 4, 7],
    [3, 6, 2],
    [3, 7, 6],
    [6, 7, 5],
    [5, 7, 4],
    [1, 5, 0],
    [0, 5, 4],
    [2, 5, 1],
    [6, 5, 2],
];

/// Builds a box centered on the origin.
///
/// Eight shared corner vertices rather than 24 split ones; the UV layout
/// wraps a single texture tile around the shape the way the legacy
/// format expects.
pub fn create_block(width: f32, height: f32, depth: f32) -> Mesh {
    let (w, h, d) = (width / 2.0, height / 2.0, depth / 2.0);

    let positions = [
        Vec3::new(-w, h, -d),
        Vec3::new(w, h, -d),
        Vec3::new(w, h, d),
        Vec3::new(-w, h, d),
        Vec3::new(-w, -h, -d),
        Vec3::new(w, -h, -d),
        Vec3::new(w, -h, d),
        Vec3::new(-w, -h, d),
    ];
    let uvs = [
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(0.0, 1.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(0.0, 1.0),
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 0.0),
    ];

    let mut mesh = Mesh::with_capacity(8, 12);
    for (p, uv) in positions.into_iter().zip(uvs) {
        mesh.add_vertex(p, uv);
    }
    mesh.triangles.extend_from_slice(&BLOCK_TRIANGLES);
    mesh.set_single_run();
    mesh.compute_normals();
    mesh
}
