//! # RWX Material
//!
//! Material model and tracking for the RWX loading pipeline.
//!
//! ## Architecture
//!
//! ```text
//! RwxMaterial (value type, canonical signature)
//!       ↓
//! MaterialTracker (per-mesh local indices, commit watermark, tag table)
//!       ↓
//! MaterialManager (global signature dedup → RendererMaterial descriptors,
//!                  async texture dispatch)
//! ```
//!
//! Two materials with equal signatures must resolve to the same renderer
//! descriptor from one manager; that invariant drives both the global
//! deduplication and the per-mesh material-run grouping.

pub mod descriptor;
pub mod manager;
pub mod material;
pub mod resolver;
pub mod tracker;

pub use descriptor::{RendererMaterial, SideMode, TextureColorSpace, TextureRef};
pub use manager::{ManagerOptions, MaterialEntry, MaterialHandle, MaterialManager, PendingTexture, TextureSlot};
pub use material::{
    GeometrySampling, LightSampling, MaterialMode, RwxMaterial, TextureAddressMode, TextureMode,
};
pub use resolver::{
    AnimationState, NullResolver, TextureError, TextureFuture, TextureHandle, TextureResolver,
};
pub use tracker::MaterialTracker;

#[cfg(test)]
mod tests;
