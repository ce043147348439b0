//! # RWX Mesh
//!
//! Geometry construction for the RWX loading pipeline.
//!
//! ## Architecture
//!
//! ```text
//! GeometryBuffer (per-clump accumulation, material runs)
//!       ↓
//! Mesh (positions, uvs, indexed triangles, runs, normals)
//! ```
//!
//! Primitive builders and the polygon triangulator are pure functions:
//! they know nothing about parser state beyond the parameters they are
//! handed. Every primitive mesh declares exactly one material run
//! spanning its whole index buffer so downstream merge logic can treat
//! all meshes identically regardless of origin.

pub mod buffer;
pub mod error;
pub mod mesh;
pub mod primitives;
pub mod triangulate;
pub mod wireframe;

pub use buffer::GeometryBuffer;
pub use error::MeshError;
pub use mesh::{MaterialRun, Mesh};
pub use triangulate::{triangulate_loop, TriangulationOutcome};
pub use wireframe::quad_outline;

#[cfg(test)]
mod tests;
