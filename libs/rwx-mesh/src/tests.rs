//! # Mesh Tests

use approx::assert_relative_eq;
use glam::{Mat4, Vec2, Vec3};

use crate::buffer::GeometryBuffer;
use crate::primitives::{
    create_block, create_cone, create_cylinder, create_disc, create_hemisphere, create_sphere,
    make_vertex_circle,
};
use crate::triangulate::triangulate_loop;
use crate::wireframe::quad_outline;
use crate::MaterialRun;

// =============================================================================
// Geometry buffer
// =============================================================================

#[test]
fn test_buffer_groups_faces_into_runs() {
    let mut buffer = GeometryBuffer::new();
    for i in 0..4 {
        buffer.add_vertex(Vec3::new(i as f32, 0.0, 0.0), Vec2::ZERO);
    }

    assert!(!buffer.switch_material(0), "first switch has nothing to flush");
    buffer.add_triangle(0, 1, 2);
    buffer.add_triangle(1, 2, 3);
    assert!(buffer.switch_material(1), "material change closes the open run");
    buffer.add_triangle(0, 2, 3);

    let mesh = buffer.finalize().expect("mesh with faces");
    assert_eq!(
        mesh.runs,
        vec![
            MaterialRun { first_index: 0, index_count: 6, material: 0 },
            MaterialRun { first_index: 6, index_count: 3, material: 1 },
        ]
    );
    assert_eq!(mesh.triangle_count(), 3);
    assert_eq!(mesh.normals.len(), mesh.vertex_count());
}

#[test]
fn test_buffer_repeated_switch_is_a_no_op() {
    let mut buffer = GeometryBuffer::new();
    for i in 0..3 {
        buffer.add_vertex(Vec3::new(i as f32, 0.0, 0.0), Vec2::ZERO);
    }
    buffer.switch_material(2);
    buffer.add_triangle(0, 1, 2);
    assert!(!buffer.switch_material(2));

    let mesh = buffer.finalize().unwrap();
    assert_eq!(mesh.runs.len(), 1);
    assert_eq!(mesh.runs[0].material, 2);
}

#[test]
fn test_buffer_without_faces_finalizes_to_none() {
    let mut buffer = GeometryBuffer::new();
    buffer.add_vertex(Vec3::ONE, Vec2::ZERO);
    buffer.switch_material(0);
    assert!(buffer.finalize().is_none());
}

#[test]
fn test_buffer_drops_out_of_range_faces() {
    let mut buffer = GeometryBuffer::new();
    buffer.add_vertex(Vec3::ZERO, Vec2::ZERO);
    buffer.add_vertex(Vec3::X, Vec2::ZERO);
    buffer.add_vertex(Vec3::Y, Vec2::ZERO);
    buffer.switch_material(0);
    buffer.add_triangle(0, 1, 9);
    buffer.add_triangle(0, 1, 2);

    let mesh = buffer.finalize().unwrap();
    assert_eq!(mesh.triangle_count(), 1);
    assert_eq!(mesh.runs[0].index_count, 3);
}

#[test]
fn test_buffer_resets_after_finalize() {
    let mut buffer = GeometryBuffer::new();
    buffer.add_vertex(Vec3::ZERO, Vec2::ZERO);
    buffer.add_vertex(Vec3::X, Vec2::ZERO);
    buffer.add_vertex(Vec3::Y, Vec2::ZERO);
    buffer.switch_material(5);
    buffer.add_triangle(0, 1, 2);
    buffer.finalize().unwrap();

    assert_eq!(buffer.vertex_count(), 0);
    assert!(buffer.finalize().is_none());
}

// =============================================================================
// Mesh transforms and normals
// =============================================================================

#[test]
fn test_apply_transform_bakes_positions() {
    let mut mesh = create_block(1.0, 1.0, 1.0);
    mesh.apply_transform(&Mat4::from_scale(Vec3::splat(10.0)));
    let (min, max) = mesh.bounding_box();
    assert_relative_eq!(min.x, -5.0, epsilon = 1e-5);
    assert_relative_eq!(max.y, 5.0, epsilon = 1e-5);
}

#[test]
fn test_normals_point_outward_on_a_block() {
    let mesh = create_block(2.0, 2.0, 2.0);
    for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
        // Corner normals of a symmetric box point away from the center
        assert!(p.normalize().dot(*n) > 0.0);
    }
}

// =============================================================================
// Primitives
// =============================================================================

#[test]
fn test_vertex_circle_layout() {
    let (positions, uvs) = make_vertex_circle(2.0, 1.0, 4, None).unwrap();
    assert_eq!(positions.len(), 4);
    assert_relative_eq!(positions[0].x, 1.0, epsilon = 1e-6);
    assert_relative_eq!(positions[0].y, 2.0, epsilon = 1e-6);
    // Winding goes through -Z first
    assert_relative_eq!(positions[1].z, -1.0, epsilon = 1e-6);
    assert_relative_eq!(uvs[0].x, 1.0, epsilon = 1e-6);
    assert_relative_eq!(uvs[0].y, 0.5, epsilon = 1e-6);
}

#[test]
fn test_vertex_circle_fixed_v() {
    let (_, uvs) = make_vertex_circle(0.0, 1.0, 8, Some(0.25)).unwrap();
    for (i, uv) in uvs.iter().enumerate() {
        assert_relative_eq!(uv.x, i as f32 / 8.0, epsilon = 1e-6);
        assert_relative_eq!(uv.y, 0.25, epsilon = 1e-6);
    }
}

#[test]
fn test_vertex_circle_rejects_degenerate_side_count() {
    assert!(make_vertex_circle(0.0, 1.0, 2, None).is_err());
}

#[test]
fn test_block_shape() {
    let mesh = create_block(2.0, 4.0, 6.0);
    assert_eq!(mesh.vertex_count(), 8);
    assert_eq!(mesh.triangle_count(), 12);
    assert_eq!(mesh.runs, vec![MaterialRun { first_index: 0, index_count: 36, material: 0 }]);
    let (min, max) = mesh.bounding_box();
    assert_eq!(min, Vec3::new(-1.0, -2.0, -3.0));
    assert_eq!(max, Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn test_cone_counts() {
    let mesh = create_cone(2.0, 1.0, 8).unwrap();
    assert_eq!(mesh.vertex_count(), 9);
    assert_eq!(mesh.triangle_count(), 8);
    // Apex sits at the requested height
    assert_relative_eq!(mesh.positions[8].y, 2.0, epsilon = 1e-6);
}

#[test]
fn test_cylinder_counts_and_uv_rows() {
    let mesh = create_cylinder(3.0, 1.0, 0.5, 6).unwrap();
    assert_eq!(mesh.vertex_count(), 12);
    assert_eq!(mesh.triangle_count(), 12);
    // Bottom ring maps to the bottom texture row, top ring to the top
    assert_relative_eq!(mesh.uvs[0].y, 1.0, epsilon = 1e-6);
    assert_relative_eq!(mesh.uvs[6].y, 0.0, epsilon = 1e-6);
    assert_relative_eq!(mesh.positions[6].y, 3.0, epsilon = 1e-6);
}

#[test]
fn test_disc_counts() {
    let mesh = create_disc(1.0, 2.0, 5).unwrap();
    assert_eq!(mesh.vertex_count(), 5);
    assert_eq!(mesh.triangle_count(), 4);
    for p in &mesh.positions {
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-6);
    }
}

#[test]
fn test_primitives_skip_degenerate_parameters() {
    assert!(create_cone(1.0, 1.0, 2).is_none());
    assert!(create_cone(1.0, 1.0, -4).is_none());
    assert!(create_cylinder(1.0, 1.0, 1.0, 0).is_none());
    assert!(create_disc(0.0, 1.0, 2).is_none());
    assert!(create_hemisphere(1.0, 1).is_none());
    assert!(create_sphere(1.0, -2).is_none());
}

#[test]
fn test_hemisphere_counts() {
    let n = 2;
    let nb_sides = n * 4;
    let mesh = create_hemisphere(1.0, n as i32).unwrap();
    // n rings of nb_sides vertices plus the pole
    assert_eq!(mesh.vertex_count(), (n * nb_sides + 1) as usize);
    // n - 1 woven bands plus the polar fan
    assert_eq!(mesh.triangle_count(), ((n - 1) * nb_sides * 2 + nb_sides) as usize);
    let (min, max) = mesh.bounding_box();
    assert_relative_eq!(min.y, 0.0, epsilon = 1e-6);
    assert_relative_eq!(max.y, 1.0, epsilon = 1e-6);
}

#[test]
fn test_sphere_counts_and_radius() {
    let n = 2u32;
    let nb_sides = n * 4;
    let nb_segments = n * 2;
    let mesh = create_sphere(2.0, n as i32).unwrap();
    assert_eq!(mesh.vertex_count(), ((nb_segments - 1) * nb_sides + 2) as usize);
    assert_eq!(
        mesh.triangle_count(),
        ((nb_segments - 2) * nb_sides * 2 + nb_sides * 2) as usize
    );
    for p in &mesh.positions {
        assert_relative_eq!(p.length(), 2.0, epsilon = 1e-5);
    }
}

// =============================================================================
// Triangulation
// =============================================================================

#[test]
fn test_triangulate_triangle_passthrough() {
    let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
    let outcome = triangulate_loop(&positions, &[0, 1, 2], false);
    assert_eq!(outcome.triangles, vec![[0, 1, 2]]);
    assert!(!outcome.used_fallback);
}

#[test]
fn test_triangulate_planar_quad() {
    let positions = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
    ];
    let outcome = triangulate_loop(&positions, &[0, 1, 2, 3], false);
    assert_eq!(outcome.triangles.len(), 2);
    assert!(!outcome.used_fallback);
    // Every source index is used
    let mut seen: Vec<u32> = outcome.triangles.iter().flatten().copied().collect();
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen, vec![0, 1, 2, 3]);
}

#[test]
fn test_triangulate_concave_polygon() {
    // L-shape in the XZ plane
    let positions = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(2.0, 0.0, 1.0),
        Vec3::new(1.0, 0.0, 1.0),
        Vec3::new(1.0, 0.0, 2.0),
        Vec3::new(0.0, 0.0, 2.0),
    ];
    let outcome = triangulate_loop(&positions, &[0, 1, 2, 3, 4, 5], false);
    assert_eq!(outcome.triangles.len(), 4);
    assert!(!outcome.used_fallback);
}

#[test]
fn test_triangulate_collinear_loop_uses_fan() {
    let positions = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(3.0, 0.0, 0.0),
    ];
    let outcome = triangulate_loop(&positions, &[0, 1, 2, 3], false);
    assert!(outcome.used_fallback);
    assert_eq!(outcome.triangles, vec![[0, 1, 2], [0, 2, 3]]);
}

#[test]
fn test_triangulate_forced_fallback() {
    let positions = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
    ];
    let outcome = triangulate_loop(&positions, &[0, 1, 2, 3], true);
    assert!(outcome.used_fallback);
    assert_eq!(outcome.triangles, vec![[0, 1, 2], [0, 2, 3]]);
}

#[test]
fn test_triangulate_short_loop_is_empty() {
    let positions = vec![Vec3::ZERO, Vec3::X];
    let outcome = triangulate_loop(&positions, &[0, 1], false);
    assert!(outcome.triangles.is_empty());
}

// =============================================================================
// Wireframe
// =============================================================================

#[test]
fn test_planar_quad_outline_has_no_diagonal() {
    let segments = quad_outline([
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
    ]);
    assert_eq!(segments.len(), 4);
}

#[test]
fn test_bent_quad_outline_keeps_diagonal() {
    let segments = quad_outline([
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(1.0, 1.0, 0.5),
        Vec3::new(0.0, 1.0, 0.0),
    ]);
    assert_eq!(segments.len(), 5);
    assert_eq!(segments[4], [Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 0.5)]);
}
