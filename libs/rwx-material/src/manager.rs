//! # Material Manager
//!
//! Process-scoped deduplication of materials by canonical signature into
//! renderer descriptors. The manager is the single source of truth for
//! renderer-native materials across one parse, or across several parses
//! when the caller shares one instance (single-writer access assumed; the
//! manager is not internally lock-protected).

use crate::descriptor::{RendererMaterial, TextureColorSpace};
use crate::material::RwxMaterial;
use crate::resolver::{AnimationState, NullResolver, TextureFuture, TextureHandle, TextureResolver};
use config::constants::{DEFAULT_ALPHA_TEST, DEFAULT_MASK_EXTENSION, DEFAULT_TEXTURE_EXTENSION};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Index of a deduplicated material within one manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialHandle(pub usize);

/// Which texture slot a pending resolution feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextureSlot {
    Base,
    Mask,
}

/// A dispatched, not-yet-settled texture resolution.
pub struct PendingTexture {
    pub material: MaterialHandle,
    pub slot: TextureSlot,
    pub future: TextureFuture,
}

/// Attached, resolved texture with optional animation strip state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureBinding {
    pub image: TextureHandle,
    pub animation: Option<AnimationState>,
}

/// One deduplicated material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialEntry {
    pub signature: String,
    /// Deep-copied snapshot of the source material state.
    pub source: RwxMaterial,
    pub descriptor: RendererMaterial,
    pub base_texture: Option<TextureBinding>,
    pub mask_texture: Option<TextureBinding>,
}

/// Configuration of descriptor derivation and texture dispatch.
#[derive(Debug, Clone)]
pub struct ManagerOptions {
    /// Folder handed to the resolver for every request.
    pub folder: String,
    /// Extension used when a texture name does not embed one.
    pub texture_extension: String,
    /// Extension of mask archives (or plain mask files).
    pub mask_extension: String,
    /// Derive unlit (basic) materials instead of lit ones.
    pub unlit: bool,
    pub color_space: TextureColorSpace,
    /// When false, no resolver dispatch happens at all.
    pub enable_textures: bool,
    pub alpha_test: f32,
    pub force_filtering: bool,
}

impl Default for ManagerOptions {
    fn default() -> Self {
        Self {
            folder: String::new(),
            texture_extension: DEFAULT_TEXTURE_EXTENSION.to_string(),
            mask_extension: DEFAULT_MASK_EXTENSION.to_string(),
            unlit: false,
            color_space: TextureColorSpace::Srgb,
            enable_textures: true,
            alpha_test: DEFAULT_ALPHA_TEST,
            force_filtering: true,
        }
    }
}

/// Signature-keyed store of renderer materials.
pub struct MaterialManager {
    options: ManagerOptions,
    resolver: Arc<dyn TextureResolver>,
    by_signature: HashMap<String, MaterialHandle>,
    entries: Vec<MaterialEntry>,
    pending: Vec<PendingTexture>,
}

impl Default for MaterialManager {
    fn default() -> Self {
        Self::new(ManagerOptions::default(), Arc::new(NullResolver))
    }
}

impl MaterialManager {
    pub fn new(options: ManagerOptions, resolver: Arc<dyn TextureResolver>) -> Self {
        Self {
            options,
            resolver,
            by_signature: HashMap::new(),
            entries: Vec::new(),
            pending: Vec::new(),
        }
    }

    pub fn options(&self) -> &ManagerOptions {
        &self.options
    }

    /// Idempotent upsert keyed by signature.
    ///
    /// The first registration of a signature derives the renderer
    /// descriptor and dispatches texture/mask resolution; subsequent calls
    /// with an equal signature return the existing handle untouched.
    pub fn add_material(&mut self, material: &RwxMaterial) -> MaterialHandle {
        let signature = material.signature();
        self.add_material_with_signature(material, &signature)
    }

    /// Same as [`add_material`](Self::add_material) with a precomputed
    /// signature, sparing a reformat when the caller already has it.
    pub fn add_material_with_signature(
        &mut self,
        material: &RwxMaterial,
        signature: &str,
    ) -> MaterialHandle {
        if let Some(&handle) = self.by_signature.get(signature) {
            return handle;
        }

        let descriptor = RendererMaterial::from_rwx(
            material,
            signature,
            &self.options.texture_extension,
            &self.options.mask_extension,
            self.options.unlit,
            self.options.color_space,
            self.options.alpha_test,
            self.options.force_filtering,
        );

        let handle = MaterialHandle(self.entries.len());
        if self.options.enable_textures {
            self.dispatch_textures(handle, &descriptor);
        }
        self.entries.push(MaterialEntry {
            signature: signature.to_string(),
            source: material.clone(),
            descriptor,
            base_texture: None,
            mask_texture: None,
        });
        self.by_signature.insert(signature.to_string(), handle);
        handle
    }

    fn dispatch_textures(&mut self, handle: MaterialHandle, descriptor: &RendererMaterial) {
        if let Some(texture) = &descriptor.texture {
            let future =
                self.resolver
                    .resolve_texture(&self.options.folder, &texture.name, &texture.extension);
            self.pending.push(PendingTexture {
                material: handle,
                slot: TextureSlot::Base,
                future,
            });
        }
        if let Some(mask) = &descriptor.mask {
            let future =
                self.resolver
                    .resolve_mask(&self.options.folder, &mask.name, &mask.extension);
            self.pending.push(PendingTexture {
                material: handle,
                slot: TextureSlot::Mask,
                future,
            });
        }
    }

    pub fn handle_for_signature(&self, signature: &str) -> Option<MaterialHandle> {
        self.by_signature.get(signature).copied()
    }

    pub fn entry(&self, handle: MaterialHandle) -> &MaterialEntry {
        &self.entries[handle.0]
    }

    pub fn descriptor(&self, handle: MaterialHandle) -> &RendererMaterial {
        &self.entries[handle.0].descriptor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drains the futures dispatched since the last call.
    ///
    /// The parse context collects these so the caller can join them
    /// (deferred delivery) or let them settle in place (eager delivery).
    pub fn take_pending(&mut self) -> Vec<PendingTexture> {
        std::mem::take(&mut self.pending)
    }

    /// Attaches a resolved image to a material slot, detecting animation
    /// strips from the image dimensions.
    pub fn attach_texture(&mut self, handle: MaterialHandle, slot: TextureSlot, image: TextureHandle) {
        let binding = TextureBinding {
            animation: AnimationState::from_image(&image),
            image,
        };
        let entry = &mut self.entries[handle.0];
        match slot {
            TextureSlot::Base => entry.base_texture = Some(binding),
            TextureSlot::Mask => entry.mask_texture = Some(binding),
        }
    }

    /// Steps every animated texture strip one frame forward.
    pub fn advance_texture_frames(&mut self) {
        for entry in &mut self.entries {
            for binding in [&mut entry.base_texture, &mut entry.mask_texture].into_iter().flatten() {
                if let Some(animation) = &mut binding.animation {
                    animation.advance_frame();
                }
            }
        }
    }
}
