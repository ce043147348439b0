//! # Renderer Material Descriptors
//!
//! Engine-agnostic description of a renderer-native material, derived
//! once per distinct signature. The consuming engine maps these fields
//! onto its own material objects; this crate never talks to a GPU.

use crate::material::{GeometrySampling, LightSampling, MaterialMode, RwxMaterial, TextureAddressMode, TextureMode};
use config::constants::DEFAULT_SHININESS;
use serde::{Deserialize, Serialize};

/// Which sides of a face the renderer should draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SideMode {
    Front,
    Double,
}

/// Color space interpretation of source colors and textures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextureColorSpace {
    /// Perceptual (sRGB) encoding; colors are linearized before delivery.
    Srgb,
    Linear,
}

/// Reference to a texture the resolver was asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureRef {
    pub name: String,
    pub extension: String,
}

/// Renderer-native material description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RendererMaterial {
    /// Canonical signature this descriptor was derived from.
    pub name: String,
    pub side: SideMode,
    pub visible: bool,
    pub wireframe: bool,
    pub flat_shading: bool,
    /// Skip lighting entirely (basic/unlit material).
    pub unlit: bool,
    /// Linear-space base color; ignored by engines once a texture is set.
    pub color: [f32; 3],
    pub opacity: f32,
    pub transparent: bool,
    /// Grayscale specular reflectance.
    pub specular: f32,
    /// Grayscale emissive term.
    pub emissive: f32,
    pub shininess: f32,
    /// Alpha-test threshold, present when a mask is in play.
    pub alpha_test: Option<f32>,
    pub address_mode: TextureAddressMode,
    /// Bilinear filtering requested for the texture.
    pub filtering: bool,
    pub collision: bool,
    /// Aspect-ratio hint carried over from sign-face inference.
    pub ratio: f32,
    pub texture: Option<TextureRef>,
    pub mask: Option<TextureRef>,
}

impl RendererMaterial {
    /// Derives a descriptor from an RWX material snapshot.
    ///
    /// `default_texture_extension` applies when the texture name does not
    /// embed its own; `unlit` selects a basic (unshaded) material and
    /// `force_filtering` keeps bilinear filtering on regardless of the
    /// FILTER texture mode.
    pub fn from_rwx(
        material: &RwxMaterial,
        signature: &str,
        default_texture_extension: &str,
        mask_extension: &str,
        unlit: bool,
        color_space: TextureColorSpace,
        alpha_test: f32,
        force_filtering: bool,
    ) -> Self {
        let (side, visible) = match material.material_mode {
            MaterialMode::None => (SideMode::Front, false),
            MaterialMode::Null => (SideMode::Front, true),
            MaterialMode::Double => (SideMode::Double, true),
        };

        // Point clouds are drawn as wireframe until a dedicated path exists
        let wireframe = material.geometry_sampling != GeometrySampling::Solid;
        let flat_shading = material.light_sampling == LightSampling::Facet;

        // Grayscale assumption for specular/emissive: no channel information
        // in the source format, so a white light is the safe default
        let specular = (material.surface[2] * 255.0).trunc() / 255.0;
        let emissive = material.surface[1].trunc();

        let color = match color_space {
            TextureColorSpace::Srgb => [
                srgb_to_linear(material.color[0]),
                srgb_to_linear(material.color[1]),
                srgb_to_linear(material.color[2]),
            ],
            TextureColorSpace::Linear => material.color,
        };

        let texture = material.texture_basename_and_extension().map(|(base, ext)| TextureRef {
            name: base.to_string(),
            extension: ext.unwrap_or(default_texture_extension).to_string(),
        });
        let mask = material.mask.as_deref().map(|name| TextureRef {
            name: name.to_string(),
            extension: mask_extension.to_string(),
        });

        let transparent = material.opacity < 1.0 || mask.is_some();
        let alpha_test = mask.is_some().then_some(alpha_test);
        let filtering = force_filtering || material.has_texture_mode(TextureMode::Filter);

        Self {
            name: signature.to_string(),
            side,
            visible,
            wireframe,
            flat_shading,
            unlit,
            color,
            opacity: material.opacity,
            transparent,
            specular,
            emissive,
            shininess: DEFAULT_SHININESS,
            alpha_test,
            address_mode: material.texture_address_mode,
            filtering,
            collision: material.collision,
            ratio: material.ratio,
            texture,
            mask,
        }
    }
}

/// Converts one sRGB-encoded channel to linear space.
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
