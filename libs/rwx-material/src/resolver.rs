//! # Texture Resolution Contract
//!
//! The pipeline never decodes images itself; it hands name resolution to
//! an external resolver and collects the pending futures. Each future
//! settles once image decoding (and, for archive-packaged masks, archive
//! extraction) completes. A rejected future never invalidates geometry:
//! the affected material simply renders without that texture.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Boxed future yielded by a texture resolver dispatch.
pub type TextureFuture = Pin<Box<dyn Future<Output = Result<TextureHandle, TextureError>> + Send>>;

/// Opaque handle to a decoded image usable as a 2D texture.
///
/// The loader only ever inspects the dimensions, to recognize vertically
/// stacked animation strips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureHandle {
    /// Resolver-scoped identifier of the decoded image.
    pub id: u64,
    pub width: u32,
    pub height: u32,
}

/// Errors surfaced by texture resolution.
///
/// These are fail-soft by contract: the join over pending futures must
/// tolerate rejections and still deliver the scene graph.
#[derive(Debug, Error)]
pub enum TextureError {
    #[error("texture not found: {path}")]
    NotFound { path: String },
    #[error("failed to decode {path}: {message}")]
    Decode { path: String, message: String },
    #[error("no entry matching {name} in archive {path}")]
    ArchiveEntryMissing { path: String, name: String },
}

/// External collaborator resolving texture and mask names to decoded
/// images.
///
/// Mask resolution is handed the configured archive extension; when the
/// extension names an archive, the resolver extracts the single bitmap
/// whose basename matches case-insensitively, otherwise it loads the file
/// directly.
pub trait TextureResolver: Send + Sync {
    /// Asynchronously resolves `<folder>/<name>.<extension>`.
    fn resolve_texture(&self, folder: &str, name: &str, extension: &str) -> TextureFuture;

    /// Asynchronously resolves a mask image, possibly from inside an
    /// archive at `<folder>/<name>.<extension>`.
    fn resolve_mask(&self, folder: &str, name: &str, extension: &str) -> TextureFuture;
}

/// Resolver that rejects every request.
///
/// Used when textures are disabled and as a stand-in under test; the
/// pipeline must behave identically apart from the missing images.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullResolver;

impl TextureResolver for NullResolver {
    fn resolve_texture(&self, folder: &str, name: &str, extension: &str) -> TextureFuture {
        let path = format!("{folder}/{name}.{extension}");
        Box::pin(async move { Err(TextureError::NotFound { path }) })
    }

    fn resolve_mask(&self, folder: &str, name: &str, extension: &str) -> TextureFuture {
        let path = format!("{folder}/{name}.{extension}");
        Box::pin(async move { Err(TextureError::NotFound { path }) })
    }
}

// =============================================================================
// ANIMATED TEXTURE STRIPS
// =============================================================================

/// Frame-stepping state for a vertically stacked animation strip.
///
/// An image whose height is an integer multiple of its width (>1) holds
/// `height / width` frames stacked top to bottom; stepping advances a
/// vertical UV offset by one frame height per call, wrapping around.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationState {
    /// Number of stacked frames.
    pub frame_count: u32,
    /// UV-space height of one frame (`1 / frame_count`).
    pub frame_height: f32,
    /// Current frame index.
    pub step: u32,
    /// Vertical UV offset selecting the current frame.
    pub offset_y: f32,
}

impl AnimationState {
    /// Detects an animation strip from image dimensions.
    ///
    /// Returns `None` for square or non-multiple images.
    pub fn from_image(image: &TextureHandle) -> Option<Self> {
        if image.width == 0 || image.height == image.width || image.height % image.width != 0 {
            return None;
        }
        let frame_count = image.height / image.width;
        let frame_height = 1.0 / frame_count as f32;
        Some(Self {
            frame_count,
            frame_height,
            step: 0,
            // The first frame sits at the top of the strip
            offset_y: 1.0 - frame_height,
        })
    }

    /// Steps to the next frame, wrapping past the last one.
    pub fn advance_frame(&mut self) {
        self.step = (self.step + 1) % self.frame_count;
        self.offset_y = (1.0 - self.frame_height) - self.step as f32 * self.frame_height;
    }
}
