//! # Parametric Primitives
//!
//! Builders for the fixed-shape statements. Each returns a standalone
//! [`Mesh`](crate::Mesh) in local space with UVs, computed normals and a
//! single material run; the caller bakes the active transform in and
//! merges the result into the surrounding clump.
//!
//! Side and density counts below the format minimums yield `None`; a
//! statement that cannot produce sane geometry is skipped, not an error.

mod block;
mod circle;
mod cylinder;
mod sphere;

pub use block::create_block;
pub use circle::make_vertex_circle;
pub use cylinder::{create_cone, create_cylinder, create_disc};
pub use sphere::{create_hemisphere, create_sphere};
