//! Cone, cylinder and disc primitives, all built from vertex circles.

use glam::{Vec2, Vec3};

use crate::mesh::Mesh;
use crate::primitives::circle::make_vertex_circle;

/// Builds an open cone with its base ring at height 0.
///
/// Returns `None` when the side count is too low for a closed base.
pub fn create_cone(height: f32, radius: f32, sides: i32) -> Option<Mesh> {
    let n = u32::try_from(sides).ok().filter(|&n| n >= 3)?;

    let (positions, uvs) = make_vertex_circle(0.0, radius, n, None).ok()?;
    let mut mesh = Mesh::with_capacity(n as usize + 1, n as usize);
    for (p, uv) in positions.into_iter().zip(uvs) {
        mesh.add_vertex(p, uv);
    }
    let apex = mesh.add_vertex(Vec3::new(0.0, height, 0.0), Vec2::new(0.5, 0.5));

    // Fan from the apex down to the base ring
    for i in 0..n {
        mesh.add_triangle(apex, i, (i + 1) % n);
    }

    mesh.set_single_run();
    mesh.compute_normals();
    Some(mesh)
}

/// Builds an open-ended cylinder (or truncated cone when the radii
/// differ) between heights 0 and `height`.
pub fn create_cylinder(
    height: f32,
    radius_bottom: f32,
    radius_top: f32,
    sides: i32,
) -> Option<Mesh> {
    let n = u32::try_from(sides).ok().filter(|&n| n >= 3)?;

    let (bottom_pos, bottom_uv) = make_vertex_circle(0.0, radius_bottom, n, Some(1.0)).ok()?;
    let (top_pos, top_uv) = make_vertex_circle(height, radius_top, n, Some(0.0)).ok()?;

    let mut mesh = Mesh::with_capacity(n as usize * 2, n as usize * 2);
    for (p, uv) in bottom_pos.into_iter().zip(bottom_uv) {
        mesh.add_vertex(p, uv);
    }
    for (p, uv) in top_pos.into_iter().zip(top_uv) {
        mesh.add_vertex(p, uv);
    }

    // Weave quads between the two rings, two triangles per side
    let first_top = n;
    for i in 0..n {
        let next = (i + 1) % n;
        mesh.add_triangle(first_top + i, i, next);
        mesh.add_triangle(first_top + i, next, first_top + next);
    }

    mesh.set_single_run();
    mesh.compute_normals();
    Some(mesh)
}

/// Builds a flat disc at height `height`.
pub fn create_disc(height: f32, radius: f32, sides: i32) -> Option<Mesh> {
    let n = u32::try_from(sides).ok().filter(|&n| n >= 3)?;

    let (positions, uvs) = make_vertex_circle(height, radius, n, None).ok()?;
    let mut mesh = Mesh::with_capacity(n as usize, n as usize - 1);
    for (p, uv) in positions.into_iter().zip(uvs) {
        mesh.add_vertex(p, uv);
    }

    // Fan anchored at the first ring vertex
    for i in 1..n {
        mesh.add_triangle(0, i, (i + 1) % n);
    }

    mesh.set_single_run();
    mesh.compute_normals();
    Some(mesh)
}
