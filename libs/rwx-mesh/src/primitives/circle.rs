//! Shared vertex-circle builder for the round primitives.

use std::f32::consts::TAU;

use config::constants::MIN_CIRCLE_SIDES;
use glam::{Vec2, Vec3};

use crate::error::MeshError;

/// Builds one ring of vertices at height `height`.
///
/// Vertices wind counter-clockwise seen from above (negated Z keeps the
/// outward face orientation). UVs are a planar polar projection unless
/// `fixed_v` pins the ring to one row of the texture, which the sphere
/// and hemisphere builders use for their latitude bands.
pub fn make_vertex_circle(
    height: f32,
    radius: f32,
    sides: u32,
    fixed_v: Option<f32>,
) -> Result<(Vec<Vec3>, Vec<Vec2>), MeshError> {
    if sides < MIN_CIRCLE_SIDES {
        return Err(MeshError::degenerate(format!(
            "a circle needs at least {MIN_CIRCLE_SIDES} sides, got {sides}"
        )));
    }

    let mut positions = Vec::with_capacity(sides as usize);
    let mut uvs = Vec::with_capacity(sides as usize);
    for i in 0..sides {
        let angle = TAU * i as f32 / sides as f32;
        let (sin, cos) = angle.sin_cos();
        positions.push(Vec3::new(radius * cos, height, -radius * sin));
        let uv = match fixed_v {
            Some(v) => Vec2::new(i as f32 / sides as f32, v),
            None => Vec2::new((cos + 1.0) / 2.0, (sin + 1.0) / 2.0),
        };
        uvs.push(uv);
    }
    Ok((positions, uvs))
}
