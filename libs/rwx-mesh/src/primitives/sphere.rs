//! Hemisphere and sphere primitives.
//!
//! Both are latitude-band constructions over the shared vertex circle:
//! stacked rings woven with quads, capped by pole vertices and fans.
//! Density `n` maps to `n * 4` sides per ring, matching the tessellation
//! the legacy format implies.

use std::f32::consts::{FRAC_PI_2, PI};

use config::constants::MIN_SPHERE_DENSITY;
use glam::{Vec2, Vec3};

use crate::mesh::Mesh;
use crate::primitives::circle::make_vertex_circle;

/// Weaves one band of quads between two same-sized rings.
fn weave_band(mesh: &mut Mesh, previous_first: u32, current_first: u32, sides: u32) {
    for i in 0..sides {
        let next = (i + 1) % sides;
        mesh.add_triangle(current_first + i, previous_first + i, previous_first + next);
        mesh.add_triangle(current_first + i, previous_first + next, current_first + next);
    }
}

/// Builds the upper half of a sphere, base ring at height 0.
///
/// Returns `None` when the density is too low to form any band.
pub fn create_hemisphere(radius: f32, density: i32) -> Option<Mesh> {
    let n = u32::try_from(density).ok().filter(|&n| n >= MIN_SPHERE_DENSITY)?;

    let nb_sides = n * 4;
    let nb_segments = n;
    let delta = FRAC_PI_2 / nb_segments as f32;

    let mut mesh = Mesh::new();
    let (positions, uvs) = make_vertex_circle(0.0, radius, nb_sides, Some(1.0)).ok()?;
    for (p, uv) in positions.into_iter().zip(uvs) {
        mesh.add_vertex(p, uv);
    }

    let mut previous_first = 0;
    for band in 1..nb_segments {
        let current_first = previous_first + nb_sides;
        let lift = (delta * band as f32).sin();
        let (positions, uvs) = make_vertex_circle(
            lift * radius,
            (delta * band as f32).cos() * radius,
            nb_sides,
            Some(lift),
        )
        .ok()?;
        for (p, uv) in positions.into_iter().zip(uvs) {
            mesh.add_vertex(p, uv);
        }
        weave_band(&mut mesh, previous_first, current_first, nb_sides);
        previous_first = current_first;
    }

    // Cap with the pole vertex and a fan over the last ring
    let pole = mesh.add_vertex(Vec3::new(0.0, radius, 0.0), Vec2::new(0.5, 0.0));
    for i in 0..nb_sides {
        mesh.add_triangle(pole, previous_first + i, previous_first + (i + 1) % nb_sides);
    }

    mesh.set_single_run();
    mesh.compute_normals();
    Some(mesh)
}

/// Builds a full sphere centered on the origin.
pub fn create_sphere(radius: f32, density: i32) -> Option<Mesh> {
    let n = u32::try_from(density).ok().filter(|&n| n >= MIN_SPHERE_DENSITY)?;

    let nb_sides = n * 4;
    let nb_segments = n * 2;

    let mut mesh = Mesh::new();
    let south = mesh.add_vertex(Vec3::new(0.0, -radius, 0.0), Vec2::new(0.5, 1.0));

    // Interior rings between the two poles
    let mut previous_first = None;
    for ring in 1..nb_segments {
        let t = ring as f32 / nb_segments as f32;
        let latitude = PI * t - FRAC_PI_2;
        let (positions, uvs) = make_vertex_circle(
            latitude.sin() * radius,
            latitude.cos() * radius,
            nb_sides,
            Some(1.0 - t),
        )
        .ok()?;
        let current_first = mesh.vertex_count() as u32;
        for (p, uv) in positions.into_iter().zip(uvs) {
            mesh.add_vertex(p, uv);
        }
        match previous_first {
            None => {
                for i in 0..nb_sides {
                    mesh.add_triangle(
                        current_first + i,
                        south,
                        current_first + (i + 1) % nb_sides,
                    );
                }
            }
            Some(previous) => weave_band(&mut mesh, previous, current_first, nb_sides),
        }
        previous_first = Some(current_first);
    }

    let last_ring = previous_first?;
    let north = mesh.add_vertex(Vec3::new(0.0, radius, 0.0), Vec2::new(0.5, 0.0));
    for i in 0..nb_sides {
        mesh.add_triangle(north, last_ring + i, last_ring + (i + 1) % nb_sides);
    }

    mesh.set_single_run();
    mesh.compute_normals();
    Some(mesh)
}
