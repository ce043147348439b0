//! # Wireframe Extraction
//!
//! Wireframe-sampled geometry is rendered as line segments rather than
//! filled faces. Quads are the interesting case: the two triangles a
//! quad splits into introduce a diagonal that should only be visible
//! when the quad is genuinely non-planar.

use glam::Vec3;

/// Maximum normal divergence (radians) below which a quad's diagonal is
/// treated as an artifact of triangulation and omitted.
const PLANAR_TOLERANCE: f32 = 0.017_5; // about one degree

/// Extracts the outline segments of a quad.
///
/// Always yields the four outer edges; the (corner 0, corner 2)
/// diagonal is added only when the two halves of the quad face
/// measurably different directions.
pub fn quad_outline(corners: [Vec3; 4]) -> Vec<[Vec3; 2]> {
    let [a, b, c, d] = corners;
    let mut segments = vec![[a, b], [b, c], [c, d], [d, a]];

    let n1 = (b - a).cross(c - a);
    let n2 = (c - a).cross(d - a);
    if let (Some(n1), Some(n2)) = (n1.try_normalize(), n2.try_normalize()) {
        let angle = n1.dot(n2).clamp(-1.0, 1.0).acos();
        if angle > PLANAR_TOLERANCE {
            segments.push([a, c]);
        }
    }
    segments
}
