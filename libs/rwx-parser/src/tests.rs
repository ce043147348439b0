//! # Parser Tests

use crate::lexer::strip_comment;
use crate::statement::{parse_line, AxisAlignment, Statement};
use glam::Vec3;
use rwx_material::{GeometrySampling, LightSampling, MaterialMode, TextureMode};

#[test]
fn test_comment_stripping() {
    assert_eq!(strip_comment("vertex 1 2 3 # corner"), "vertex 1 2 3 ");
    assert_eq!(strip_comment("# whole line"), "");
    // The #! escape keeps directives intact
    assert_eq!(strip_comment("#!signature foo"), "#!signature foo");
    assert_eq!(strip_comment("color 1 0 0 #! keep # drop"), "color 1 0 0 #! keep ");
}

#[test]
fn test_keywords_are_case_insensitive() {
    assert_eq!(parse_line("CLUMPBEGIN"), Some(Statement::ClumpBegin));
    assert_eq!(parse_line("ClumpEnd"), Some(Statement::ClumpEnd));
    assert_eq!(parse_line("  TransformBegin  "), Some(Statement::TransformBegin));
}

#[test]
fn test_tabs_and_whitespace_tolerated() {
    assert_eq!(
        parse_line("\tvertex\t1  2\t3"),
        Some(Statement::Vertex { position: Vec3::new(1.0, 2.0, 3.0), uv: None })
    );
}

#[test]
fn test_unknown_lines_are_skipped() {
    assert_eq!(parse_line(""), None);
    assert_eq!(parse_line("modelbegin"), None);
    assert_eq!(parse_line("# comment only"), None);
}

#[test]
fn test_malformed_operands_are_skipped() {
    assert_eq!(parse_line("color 1 0"), None);
    assert_eq!(parse_line("color red green blue"), None);
    assert_eq!(parse_line("triangle 1 2"), None);
    assert_eq!(parse_line("transform 1 2 3"), None);
}

#[test]
fn test_vertex_with_uv() {
    let stmt = parse_line("vertexext 0.5 -1 2e1 UV 0.25 0.75");
    assert_eq!(
        stmt,
        Some(Statement::Vertex {
            position: Vec3::new(0.5, -1.0, 20.0),
            uv: Some([0.25, 0.75]),
        })
    );
}

#[test]
fn test_face_indices_are_zero_based() {
    assert_eq!(
        parse_line("triangle 1 2 3"),
        Some(Statement::Triangle { indices: [0, 1, 2], tag: None })
    );
    assert_eq!(
        parse_line("quad 1 2 3 4 tag 100"),
        Some(Statement::Quad { indices: [0, 1, 2, 3], tag: Some(100) })
    );
}

#[test]
fn test_zero_index_is_rejected() {
    // The text format is one-based; a literal 0 has no valid meaning
    assert_eq!(parse_line("triangle 0 1 2"), None);
}

#[test]
fn test_polygon_indices_are_reversed() {
    let stmt = parse_line("polygon 4 1 2 3 4");
    assert_eq!(stmt, Some(Statement::Polygon { indices: vec![3, 2, 1, 0], tag: None }));

    let stmt = parse_line("polygon 3 5 6 7 tag 2");
    assert_eq!(stmt, Some(Statement::Polygon { indices: vec![6, 5, 4], tag: Some(2) }));
}

#[test]
fn test_polygon_with_too_few_indices() {
    assert_eq!(parse_line("polygon 5 1 2 3"), None);
    assert_eq!(parse_line("polygon 2 1 2"), None);
}

#[test]
fn test_texture_statement() {
    assert_eq!(
        parse_line("texture BRICK1"),
        Some(Statement::Texture { name: Some("brick1".to_string()), mask: None })
    );
    assert_eq!(
        parse_line("texture null"),
        Some(Statement::Texture { name: None, mask: None })
    );
    assert_eq!(
        parse_line("texture fence mask fencem"),
        Some(Statement::Texture {
            name: Some("fence".to_string()),
            mask: Some("fencem".to_string()),
        })
    );
    // An embedded extension travels with the name
    assert_eq!(
        parse_line("texture sign.png"),
        Some(Statement::Texture { name: Some("sign.png".to_string()), mask: None })
    );
}

#[test]
fn test_material_statements() {
    assert_eq!(
        parse_line("materialmode double"),
        Some(Statement::MaterialMode { mode: MaterialMode::Double })
    );
    assert_eq!(
        parse_line("addmaterialmode none"),
        Some(Statement::MaterialMode { mode: MaterialMode::None })
    );
    assert_eq!(
        parse_line("lightsampling VERTEX"),
        Some(Statement::LightSampling { mode: LightSampling::Vertex })
    );
    assert_eq!(
        parse_line("geometrysampling wireframe"),
        Some(Statement::GeometrySampling { mode: GeometrySampling::Wireframe })
    );
    assert_eq!(parse_line("collision off"), Some(Statement::Collision { enabled: false }));
    assert_eq!(parse_line("collision maybe"), None);
}

#[test]
fn test_texture_mode_statements() {
    assert_eq!(
        parse_line("texturemodes lit filter"),
        Some(Statement::TextureModes { modes: vec![TextureMode::Lit, TextureMode::Filter] })
    );
    assert_eq!(parse_line("texturemodes null"), Some(Statement::TextureModes { modes: vec![] }));
    assert_eq!(
        parse_line("removetexturemode foreshorten"),
        Some(Statement::RemoveTextureMode { mode: TextureMode::Foreshorten })
    );
}

#[test]
fn test_transform_last_element_override() {
    let line = "transform 1 0 0 0 0 1 0 0 0 0 1 0 0 0 0 0";
    if let Some(Statement::Transform { matrix }) = parse_line(line) {
        assert_eq!(matrix[15], 1.0);
    } else {
        panic!("expected Transform statement");
    }

    let line = "transform 1 0 0 0 0 1 0 0 0 0 1 0 0 0 0 2";
    if let Some(Statement::Transform { matrix }) = parse_line(line) {
        assert_eq!(matrix[15], 2.0);
    } else {
        panic!("expected Transform statement");
    }
}

#[test]
fn test_rotate_and_scale() {
    assert_eq!(
        parse_line("rotate 1 0 0 90"),
        Some(Statement::Rotate { axis: [1.0, 0.0, 0.0], angle: 90.0 })
    );
    assert_eq!(
        parse_line("scale 2 2 2"),
        Some(Statement::Scale { factors: Vec3::splat(2.0) })
    );
}

#[test]
fn test_primitive_statements() {
    assert_eq!(
        parse_line("block 1 2 3"),
        Some(Statement::Block { width: 1.0, height: 2.0, depth: 3.0 })
    );
    assert_eq!(
        parse_line("cylinder 2 0.5 0.5 12"),
        Some(Statement::Cylinder {
            height: 2.0,
            radius_bottom: 0.5,
            radius_top: 0.5,
            sides: 12,
        })
    );
    assert_eq!(parse_line("sphere 1 4"), Some(Statement::Sphere { radius: 1.0, density: 4 }));
    // A negative side count still parses; the geometry layer skips it
    assert_eq!(
        parse_line("cone 1 1 -2"),
        Some(Statement::Cone { height: 1.0, radius: 1.0, sides: -2 })
    );
}

#[test]
fn test_proto_and_metadata_statements() {
    assert_eq!(
        parse_line("protobegin wheel"),
        Some(Statement::ProtoBegin { name: "wheel".to_string() })
    );
    assert_eq!(
        parse_line("protoinstance wheel"),
        Some(Statement::ProtoInstance { name: "wheel".to_string() })
    );
    assert_eq!(
        parse_line("axisalignment zorientx"),
        Some(Statement::AxisAlignment { alignment: AxisAlignment::ZOrientX })
    );
    assert_eq!(parse_line("tag 200"), Some(Statement::Tag { tag: 200 }));
}

#[test]
fn test_trailing_comment_on_statement() {
    assert_eq!(
        parse_line("opacity 0.5 # half transparent"),
        Some(Statement::Opacity { opacity: 0.5 })
    );
}
