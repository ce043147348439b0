//! # RWX Material Value Type
//!
//! Mutable material state edited by parser statements, with a canonical
//! string signature used as the deduplication and equality key.

use serde::{Deserialize, Serialize};
use std::fmt::Write;

// =============================================================================
// SAMPLING AND MODE ENUMS
// =============================================================================

/// Light sampling mode of a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LightSampling {
    /// One normal per face, flat shading.
    Facet,
    /// Interpolated vertex normals, smooth shading.
    Vertex,
}

impl LightSampling {
    /// Legacy numeric code used in the canonical signature.
    pub fn code(self) -> u8 {
        match self {
            LightSampling::Facet => 1,
            LightSampling::Vertex => 2,
        }
    }
}

/// Geometry sampling mode of a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometrySampling {
    PointCloud,
    Wireframe,
    Solid,
}

impl GeometrySampling {
    pub fn code(self) -> u8 {
        match self {
            GeometrySampling::PointCloud => 1,
            GeometrySampling::Wireframe => 2,
            GeometrySampling::Solid => 3,
        }
    }
}

/// Texture mode flags; a material can enable several at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TextureMode {
    Lit,
    Foreshorten,
    Filter,
}

impl TextureMode {
    pub fn code(self) -> u8 {
        match self {
            TextureMode::Lit => 1,
            TextureMode::Foreshorten => 2,
            TextureMode::Filter => 3,
        }
    }
}

/// Face visibility mode of a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialMode {
    /// Faces are not rendered at all.
    None,
    /// Only the front side of each face is rendered.
    Null,
    /// Both sides of each face are rendered.
    Double,
}

impl MaterialMode {
    pub fn code(self) -> u8 {
        match self {
            MaterialMode::None => 0,
            MaterialMode::Null => 1,
            MaterialMode::Double => 2,
        }
    }
}

/// Texture coordinate addressing outside the [0, 1] range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextureAddressMode {
    Wrap,
    Mirror,
    Clamp,
}

impl TextureAddressMode {
    pub fn code(self) -> u8 {
        match self {
            TextureAddressMode::Wrap => 0,
            TextureAddressMode::Mirror => 1,
            TextureAddressMode::Clamp => 2,
        }
    }
}

// =============================================================================
// MATERIAL
// =============================================================================

/// Mutable RWX material state.
///
/// Statements edit one current instance in place; every face append
/// snapshots it through its signature. `Clone` performs a deep copy, so a
/// committed snapshot is never retroactively altered by later statements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RwxMaterial {
    /// Red, green, blue in [0, 1].
    pub color: [f32; 3],
    /// Ambience, diffusion, specularity.
    pub surface: [f32; 3],
    pub opacity: f32,
    pub light_sampling: LightSampling,
    pub geometry_sampling: GeometrySampling,
    /// Kept sorted and deduplicated so the signature is canonical.
    texture_modes: Vec<TextureMode>,
    pub material_mode: MaterialMode,
    /// Texture base name, possibly with an embedded explicit extension.
    pub texture: Option<String>,
    /// Mask base name.
    pub mask: Option<String>,
    pub texture_address_mode: TextureAddressMode,
    pub collision: bool,
    /// Transient annotation for the current face run.
    pub tag: u32,
    /// Transient aspect-ratio hint for sign textures.
    pub ratio: f32,
}

impl Default for RwxMaterial {
    fn default() -> Self {
        Self {
            color: [0.0, 0.0, 0.0],
            surface: [0.0, 0.0, 0.0],
            opacity: 1.0,
            light_sampling: LightSampling::Facet,
            geometry_sampling: GeometrySampling::Solid,
            texture_modes: vec![TextureMode::Lit],
            material_mode: MaterialMode::Null,
            texture: None,
            mask: None,
            texture_address_mode: TextureAddressMode::Wrap,
            collision: true,
            tag: 0,
            ratio: 1.0,
        }
    }
}

impl RwxMaterial {
    /// Currently enabled texture modes, in canonical order.
    pub fn texture_modes(&self) -> &[TextureMode] {
        &self.texture_modes
    }

    /// Replaces the texture mode set wholesale.
    pub fn set_texture_modes(&mut self, modes: Vec<TextureMode>) {
        self.texture_modes = modes;
        self.normalize_texture_modes();
    }

    /// Enables a texture mode if not already present.
    pub fn add_texture_mode(&mut self, mode: TextureMode) {
        self.texture_modes.push(mode);
        self.normalize_texture_modes();
    }

    /// Disables a texture mode.
    pub fn remove_texture_mode(&mut self, mode: TextureMode) {
        self.texture_modes.retain(|m| *m != mode);
    }

    pub fn has_texture_mode(&self, mode: TextureMode) -> bool {
        self.texture_modes.contains(&mode)
    }

    fn normalize_texture_modes(&mut self) {
        self.texture_modes.sort();
        self.texture_modes.dedup();
    }

    /// Splits the texture name into a base name and its embedded extension,
    /// if the statement specified one explicitly.
    pub fn texture_basename_and_extension(&self) -> Option<(&str, Option<&str>)> {
        let name = self.texture.as_deref()?;
        match name.rsplit_once('.') {
            Some((base, ext)) if !base.is_empty() && !ext.is_empty() => Some((base, Some(ext))),
            _ => Some((name, None)),
        }
    }

    /// Packs the color into a 24-bit RGB value.
    pub fn color_hex(&self) -> u32 {
        let r = (self.color[0] * 255.0).trunc() as u32;
        let g = (self.color[1] * 255.0).trunc() as u32;
        let b = (self.color[2] * 255.0).trunc() as u32;
        (r << 16) + (g << 8) + b
    }

    /// Canonical signature of the full material state.
    ///
    /// Deterministic concatenation of every field with fixed numeric
    /// formatting: 3 decimals for color/surface/opacity, legacy integer
    /// codes for the enums, 2 decimals for the ratio. Equal signatures
    /// must map to the same renderer material.
    pub fn signature(&self) -> String {
        let mut sig = String::with_capacity(96);
        for c in self.color {
            let _ = write!(sig, "{c:.3}");
        }
        sig.push('_');
        for s in self.surface {
            let _ = write!(sig, "{s:.3}");
        }
        let _ = write!(
            sig,
            "_{:.3}_{}_{}_",
            self.opacity,
            self.light_sampling.code(),
            self.geometry_sampling.code()
        );
        for tm in &self.texture_modes {
            let _ = write!(sig, "{}", tm.code());
        }
        let _ = write!(
            sig,
            "_{}_{}_{}_{}_{}_{}_{:.2}",
            self.material_mode.code(),
            self.texture_address_mode.code(),
            self.texture.as_deref().unwrap_or(""),
            self.mask.as_deref().unwrap_or(""),
            self.collision,
            self.tag,
            self.ratio
        );
        sig
    }
}
