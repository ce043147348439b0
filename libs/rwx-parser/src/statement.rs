//! # Statement Recognition
//!
//! A closed enum of every statement the format defines, and a single
//! tokenize-then-match dispatcher over it. Keywords are matched
//! case-insensitively on the first field of the line; operand parsing is
//! shared between statements through the lexer utilities.

use crate::lexer::{fields, parse_floats, parse_indices, parse_trailing_tag, strip_comment};
use glam::Vec3;
use rwx_material::{
    GeometrySampling, LightSampling, MaterialMode, TextureAddressMode, TextureMode,
};
use serde::{Deserialize, Serialize};

/// Root-level axis alignment metadata.
///
/// Passed through as scene metadata; the geometry math never consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AxisAlignment {
    #[default]
    None,
    ZOrientX,
    ZOrientY,
    Xyz,
}

/// One recognized RWX statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    ClumpBegin,
    ClumpEnd,
    TransformBegin,
    TransformEnd,
    ProtoBegin { name: String },
    ProtoEnd,
    ProtoInstance { name: String },
    Vertex { position: Vec3, uv: Option<[f32; 2]> },
    Triangle { indices: [u32; 3], tag: Option<u32> },
    Quad { indices: [u32; 4], tag: Option<u32> },
    /// Loop indices already reversed relative to declaration order; the
    /// format's polygon winding is normalized this way.
    Polygon { indices: Vec<u32>, tag: Option<u32> },
    Color { color: [f32; 3] },
    Opacity { opacity: f32 },
    Surface { surface: [f32; 3] },
    Ambient { value: f32 },
    Diffuse { value: f32 },
    Specular { value: f32 },
    MaterialMode { mode: MaterialMode },
    Collision { enabled: bool },
    LightSampling { mode: LightSampling },
    GeometrySampling { mode: GeometrySampling },
    /// Wholesale replacement of the texture-mode set (empty for `null`).
    TextureModes { modes: Vec<TextureMode> },
    AddTextureMode { mode: TextureMode },
    RemoveTextureMode { mode: TextureMode },
    TextureAddressMode { mode: TextureAddressMode },
    Texture { name: Option<String>, mask: Option<String> },
    AxisAlignment { alignment: AxisAlignment },
    /// Standalone group tag, distinct from the per-face material tag.
    Tag { tag: u32 },
    Identity,
    Transform { matrix: [f32; 16] },
    Translate { offset: Vec3 },
    Scale { factors: Vec3 },
    Rotate { axis: [f32; 3], angle: f32 },
    Block { width: f32, height: f32, depth: f32 },
    Cone { height: f32, radius: f32, sides: i32 },
    Cylinder { height: f32, radius_bottom: f32, radius_top: f32, sides: i32 },
    Disc { height: f32, radius: f32, sides: i32 },
    Hemisphere { radius: f32, density: i32 },
    Sphere { radius: f32, density: i32 },
}

/// Recognizes one line of source text.
///
/// Returns `None` for empty lines, comments, unknown keywords and
/// malformed operand lists alike; none of these are errors at this
/// layer.
pub fn parse_line(line: &str) -> Option<Statement> {
    let line = strip_comment(line);
    let fields = fields(line);
    let (&keyword, args) = fields.split_first()?;
    let keyword = keyword.to_ascii_lowercase();

    match keyword.as_str() {
        "clumpbegin" => Some(Statement::ClumpBegin),
        "clumpend" => Some(Statement::ClumpEnd),
        "transformbegin" => Some(Statement::TransformBegin),
        "transformend" => Some(Statement::TransformEnd),
        "protobegin" => Some(Statement::ProtoBegin { name: args.first()?.to_string() }),
        "protoend" => Some(Statement::ProtoEnd),
        "protoinstance" => Some(Statement::ProtoInstance { name: args.first()?.to_string() }),
        "vertex" | "vertexext" => parse_vertex(args),
        "triangle" | "triangleext" => {
            let indices = parse_indices::<3>(args)?;
            let tag = parse_trailing_tag(&args[3..])?;
            Some(Statement::Triangle { indices, tag })
        }
        "quad" | "quadext" => {
            let indices = parse_indices::<4>(args)?;
            let tag = parse_trailing_tag(&args[4..])?;
            Some(Statement::Quad { indices, tag })
        }
        "polygon" | "polygonext" => parse_polygon(args),
        "color" => Some(Statement::Color { color: parse_floats::<3>(args)? }),
        "opacity" => Some(Statement::Opacity { opacity: parse_floats::<1>(args)?[0] }),
        "surface" => Some(Statement::Surface { surface: parse_floats::<3>(args)? }),
        "ambient" => Some(Statement::Ambient { value: parse_floats::<1>(args)?[0] }),
        "diffuse" => Some(Statement::Diffuse { value: parse_floats::<1>(args)?[0] }),
        "specular" => Some(Statement::Specular { value: parse_floats::<1>(args)?[0] }),
        "materialmode" | "materialmodes" | "addmaterialmode" => {
            let mode = match args.first()?.to_ascii_lowercase().as_str() {
                "none" => MaterialMode::None,
                "null" => MaterialMode::Null,
                "double" => MaterialMode::Double,
                _ => return None,
            };
            Some(Statement::MaterialMode { mode })
        }
        "collision" => {
            let enabled = match args.first()?.to_ascii_lowercase().as_str() {
                "on" => true,
                "off" => false,
                _ => return None,
            };
            Some(Statement::Collision { enabled })
        }
        "lightsampling" => {
            let mode = match args.first()?.to_ascii_lowercase().as_str() {
                "facet" => LightSampling::Facet,
                "vertex" => LightSampling::Vertex,
                _ => return None,
            };
            Some(Statement::LightSampling { mode })
        }
        "geometrysampling" => {
            let mode = match args.first()?.to_ascii_lowercase().as_str() {
                "pointcloud" => GeometrySampling::PointCloud,
                "wireframe" => GeometrySampling::Wireframe,
                "solid" => GeometrySampling::Solid,
                _ => return None,
            };
            Some(Statement::GeometrySampling { mode })
        }
        "texturemodes" => parse_texture_modes(args),
        "addtexturemode" => Some(Statement::AddTextureMode { mode: texture_mode(args.first()?)? }),
        "removetexturemode" => {
            Some(Statement::RemoveTextureMode { mode: texture_mode(args.first()?)? })
        }
        "textureaddressmode" => {
            let mode = match args.first()?.to_ascii_lowercase().as_str() {
                "wrap" => TextureAddressMode::Wrap,
                "mirror" => TextureAddressMode::Mirror,
                "clamp" => TextureAddressMode::Clamp,
                _ => return None,
            };
            Some(Statement::TextureAddressMode { mode })
        }
        "texture" => parse_texture(args),
        "axisalignment" => {
            let alignment = match args.first()?.to_ascii_lowercase().as_str() {
                "none" => AxisAlignment::None,
                "zorientx" => AxisAlignment::ZOrientX,
                "zorienty" => AxisAlignment::ZOrientY,
                "xyz" => AxisAlignment::Xyz,
                _ => return None,
            };
            Some(Statement::AxisAlignment { alignment })
        }
        "tag" => Some(Statement::Tag { tag: args.first()?.parse().ok()? }),
        "identity" => Some(Statement::Identity),
        "transform" => parse_transform(args),
        "translate" => {
            let [x, y, z] = parse_floats::<3>(args)?;
            Some(Statement::Translate { offset: Vec3::new(x, y, z) })
        }
        "scale" => {
            let [x, y, z] = parse_floats::<3>(args)?;
            Some(Statement::Scale { factors: Vec3::new(x, y, z) })
        }
        "rotate" => {
            let [x, y, z, angle] = parse_floats::<4>(args)?;
            Some(Statement::Rotate { axis: [x, y, z], angle })
        }
        "block" => {
            let [width, height, depth] = parse_floats::<3>(args)?;
            Some(Statement::Block { width, height, depth })
        }
        "cone" => {
            let [height, radius] = parse_floats::<2>(args)?;
            let sides = args.get(2)?.parse().ok()?;
            Some(Statement::Cone { height, radius, sides })
        }
        "cylinder" => {
            let [height, radius_bottom, radius_top] = parse_floats::<3>(args)?;
            let sides = args.get(3)?.parse().ok()?;
            Some(Statement::Cylinder { height, radius_bottom, radius_top, sides })
        }
        "disc" => {
            let [height, radius] = parse_floats::<2>(args)?;
            let sides = args.get(2)?.parse().ok()?;
            Some(Statement::Disc { height, radius, sides })
        }
        "hemisphere" => {
            let [radius] = parse_floats::<1>(args)?;
            let density = args.get(1)?.parse().ok()?;
            Some(Statement::Hemisphere { radius, density })
        }
        "sphere" => {
            let [radius] = parse_floats::<1>(args)?;
            let density = args.get(1)?.parse().ok()?;
            Some(Statement::Sphere { radius, density })
        }
        _ => None,
    }
}

fn parse_vertex(args: &[&str]) -> Option<Statement> {
    let [x, y, z] = parse_floats::<3>(args)?;
    let uv = match args.get(3) {
        Some(word) if word.eq_ignore_ascii_case("uv") => Some(parse_floats::<2>(&args[4..])?),
        _ => None,
    };
    Some(Statement::Vertex { position: Vec3::new(x, y, z), uv })
}

fn parse_polygon(args: &[&str]) -> Option<Statement> {
    let count: usize = args.first()?.parse().ok()?;
    if count < 3 || args.len() < 1 + count {
        return None;
    }
    // Reverse the declared loop to normalize the winding direction
    let mut indices = Vec::with_capacity(count);
    for arg in &args[1..=count] {
        let one_based: u32 = arg.parse().ok()?;
        indices.insert(0, one_based.checked_sub(1)?);
    }
    let tag = parse_trailing_tag(&args[1 + count..])?;
    Some(Statement::Polygon { indices, tag })
}

fn parse_texture(args: &[&str]) -> Option<Statement> {
    let name = args.first()?.to_ascii_lowercase();
    let name = (name != "null").then_some(name);
    let mask = match args.get(1) {
        Some(word) if word.eq_ignore_ascii_case("mask") => Some(args.get(2)?.to_string()),
        _ => None,
    };
    Some(Statement::Texture { name, mask })
}

fn parse_texture_modes(args: &[&str]) -> Option<Statement> {
    if args.first().is_some_and(|a| a.eq_ignore_ascii_case("null")) {
        return Some(Statement::TextureModes { modes: Vec::new() });
    }
    let mut modes = Vec::with_capacity(args.len());
    for arg in args {
        modes.push(texture_mode(arg)?);
    }
    Some(Statement::TextureModes { modes })
}

fn parse_transform(args: &[&str]) -> Option<Statement> {
    let mut matrix = parse_floats::<16>(args)?;
    // The legacy client treats a zero in the last homogeneous element as 1;
    // fixed parsing rule, not a general matrix correction
    if matrix[15] == 0.0 {
        matrix[15] = 1.0;
    }
    Some(Statement::Transform { matrix })
}

fn texture_mode(word: &str) -> Option<TextureMode> {
    match word.to_ascii_lowercase().as_str() {
        "lit" => Some(TextureMode::Lit),
        "foreshorten" => Some(TextureMode::Foreshorten),
        "filter" => Some(TextureMode::Filter),
        _ => None,
    }
}
