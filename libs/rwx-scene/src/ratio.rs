//! # Sign Aspect-Ratio Inference
//!
//! Sign-tagged faces carry a texture meant to be redrawn at the face's
//! aspect ratio. The face is assumed to contain a right angle with UVs
//! reasonably aligned to it; the ratio is derived from the two legs
//! adjacent to that angle, normalized by the UV footprint.

use config::constants::EPSILON;
use glam::{Vec2, Vec3};

/// Which face statement produced a sign face.
///
/// Triangle runs and quad runs carry independent ratio hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceKind {
    Triangle,
    Quad,
}

/// Cached first-of-run ratios, one per face kind.
///
/// The first ratio computed in a consecutive run of same-kind sign faces
/// is reused for the rest of the run so slightly disagreeing faces do
/// not flicker; a non-sign face of the same kind ends the run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RatioHints {
    triangle: Option<f32>,
    quad: Option<f32>,
}

impl RatioHints {
    fn slot(&mut self, kind: FaceKind) -> &mut Option<f32> {
        match kind {
            FaceKind::Triangle => &mut self.triangle,
            FaceKind::Quad => &mut self.quad,
        }
    }

    /// Ratio to apply for a sign face, computing it only at run start.
    pub fn sign_face(&mut self, kind: FaceKind, compute: impl FnOnce() -> f32) -> f32 {
        let slot = self.slot(kind);
        match *slot {
            Some(hint) => hint,
            None => {
                let ratio = compute();
                *slot = Some(ratio);
                ratio
            }
        }
    }

    /// A non-sign face of this kind ends the current run.
    pub fn interrupt(&mut self, kind: FaceKind) {
        *self.slot(kind) = None;
    }
}

/// Aspect ratio of a right-angled sign face.
///
/// The right-angle corner is the one not on the longest edge (the
/// hypotenuse), found by squared-distance comparison. Which leg is the
/// width and which the height is disambiguated by checking on which side
/// of the UV-range midpoint each endpoint's U falls. Degenerate UV spans
/// yield the neutral ratio 1.0.
pub fn sign_ratio(points: [Vec3; 3], uvs: [Vec2; 3]) -> f32 {
    let [a_pos, b_pos, c_pos] = points;
    let [a_uv, b_uv, c_uv] = uvs;

    let max_u = a_uv.x.max(b_uv.x).max(c_uv.x);
    let min_u = a_uv.x.min(b_uv.x).min(c_uv.x);
    let max_v = a_uv.y.max(b_uv.y).max(c_uv.y);
    let min_v = a_uv.y.min(b_uv.y).min(c_uv.y);
    if max_u - min_u <= EPSILON || max_v - min_v <= EPSILON {
        return 1.0;
    }
    let mid_u = (max_u + min_u) / 2.0;
    let scale_u = 1.0 / (max_u - min_u);
    let scale_v = 1.0 / (max_v - min_v);

    // Start from the guess that (a, b) is the hypotenuse and c the right
    // angle, then correct against the two other candidates
    let mut corner = c_pos;
    let mut corner_uv = c_uv;
    let mut hyp_ends = [a_pos, b_pos];
    let mut hyp_end_uvs = [a_uv, b_uv];
    let mut sqr_hyp = a_pos.distance_squared(b_pos);

    let ac = a_pos.distance_squared(c_pos);
    if ac > sqr_hyp {
        sqr_hyp = ac;
        corner = b_pos;
        corner_uv = b_uv;
        hyp_ends = [a_pos, c_pos];
        hyp_end_uvs = [a_uv, c_uv];
    }

    let bc = b_pos.distance_squared(c_pos);
    if bc > sqr_hyp {
        corner = a_pos;
        corner_uv = a_uv;
        hyp_ends = [b_pos, c_pos];
        hyp_end_uvs = [b_uv, c_uv];
    }

    // A hypotenuse endpoint is furthest on U or furthest on V, never
    // both; peeking at one side of the UV midpoint settles which is which
    let mut width = 1.0;
    let mut height = 1.0;
    if corner_uv.x < mid_u {
        if hyp_end_uvs[0].x > mid_u {
            width = corner.distance(hyp_ends[0]);
            height = corner.distance(hyp_ends[1]);
        } else {
            width = corner.distance(hyp_ends[1]);
            height = corner.distance(hyp_ends[0]);
        }
    } else if corner_uv.x > mid_u {
        if hyp_end_uvs[0].x < mid_u {
            width = corner.distance(hyp_ends[0]);
            height = corner.distance(hyp_ends[1]);
        } else {
            width = corner.distance(hyp_ends[1]);
            height = corner.distance(hyp_ends[0]);
        }
    }

    (width * scale_u) / (height * scale_v)
}
