//! # Polygon Triangulation
//!
//! Planar polygon loops are projected into their best-fit plane and ear
//! cut. When the projection is unusable (near-zero normal) or the ear
//! cutter returns garbage, a triangle fan from the first loop vertex is
//! used instead so the face never silently disappears.

use config::constants::EPSILON;
use glam::{Quat, Vec3};
use log::warn;

/// Result of triangulating one polygon loop.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangulationOutcome {
    /// Triangles in terms of the caller's vertex indices.
    pub triangles: Vec<[u32; 3]>,
    /// Whether the fan fallback was taken.
    pub used_fallback: bool,
}

/// Triangulates a closed polygon loop.
///
/// `loop_indices` reference into `positions`; the returned triangles use
/// the same index space. Loops with fewer than three vertices produce
/// nothing. `force_fallback` skips the ear cutter entirely, which the
/// loader exposes as a compatibility switch for malformed assets.
pub fn triangulate_loop(
    positions: &[Vec3],
    loop_indices: &[u32],
    force_fallback: bool,
) -> TriangulationOutcome {
    if loop_indices.len() < 3 {
        return TriangulationOutcome { triangles: Vec::new(), used_fallback: false };
    }
    if loop_indices.len() == 3 {
        return TriangulationOutcome {
            triangles: vec![[loop_indices[0], loop_indices[1], loop_indices[2]]],
            used_fallback: false,
        };
    }
    if force_fallback {
        return TriangulationOutcome { triangles: fan(loop_indices), used_fallback: true };
    }

    let points: Vec<Vec3> = loop_indices
        .iter()
        .filter_map(|&i| positions.get(i as usize).copied())
        .collect();
    if points.len() != loop_indices.len() {
        warn!("Polygon references out-of-range vertices, falling back to fan");
        return TriangulationOutcome { triangles: fan(loop_indices), used_fallback: true };
    }

    let normal = newell_normal(&points);
    if normal.length_squared() <= EPSILON {
        // Collinear or fully degenerate loop; no plane to project onto
        return TriangulationOutcome { triangles: fan(loop_indices), used_fallback: true };
    }
    let normal = normal.normalize();

    // Build an orthonormal basis in the polygon plane and project
    let rotation = Quat::from_rotation_arc(Vec3::Z, normal);
    let x_axis = rotation * Vec3::X;
    let y_axis = x_axis.cross(normal).normalize();

    let centroid = points.iter().copied().sum::<Vec3>() / points.len() as f32;
    let mut flat = Vec::with_capacity(points.len() * 2);
    for p in &points {
        let d = *p - centroid;
        flat.push(f64::from(d.dot(x_axis)));
        flat.push(f64::from(d.dot(y_axis)));
    }

    match earcutr::earcut(&flat, &[], 2) {
        Ok(ears) if !ears.is_empty() && ears.len() % 3 == 0 => {
            let triangles = ears
                .chunks_exact(3)
                .map(|t| [loop_indices[t[0]], loop_indices[t[1]], loop_indices[t[2]]])
                .collect();
            TriangulationOutcome { triangles, used_fallback: false }
        }
        Ok(_) => {
            warn!("Ear cutting produced no triangles, falling back to fan");
            TriangulationOutcome { triangles: fan(loop_indices), used_fallback: true }
        }
        Err(err) => {
            warn!("Ear cutting failed ({err:?}), falling back to fan");
            TriangulationOutcome { triangles: fan(loop_indices), used_fallback: true }
        }
    }
}

/// Triangle fan anchored at the first loop vertex.
fn fan(loop_indices: &[u32]) -> Vec<[u32; 3]> {
    (1..loop_indices.len() - 1)
        .map(|i| [loop_indices[0], loop_indices[i], loop_indices[i + 1]])
        .collect()
}

/// Newell's method for the area-weighted polygon normal.
fn newell_normal(points: &[Vec3]) -> Vec3 {
    let mut normal = Vec3::ZERO;
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        normal.x += (a.y - b.y) * (a.z + b.z);
        normal.y += (a.z - b.z) * (a.x + b.x);
        normal.z += (a.x - b.x) * (a.y + b.y);
    }
    normal
}
