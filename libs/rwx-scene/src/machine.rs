//! # Parser State Machine
//!
//! One [`ParseContext`] per parse: the clump/transform/prototype stacks,
//! the open geometry buffer, the material tracker and the prototype
//! table. Statements are applied one at a time; each handler touches
//! only the sub-state it owns, and scope transitions keep the group,
//! transform and material stacks in lock-step.
//!
//! Vertices are baked through the final transform (the product of the
//! clump transform stack and the current matrix) at append time, so mesh
//! nodes come out in parent-local space with identity transforms.

use config::constants::{SIGN_TAG, UNIT_SCALE};
use glam::{Mat4, Vec2, Vec3};
use log::{debug, warn};
use rwx_material::{
    GeometrySampling, LightSampling, MaterialManager, MaterialTracker, TextureMode,
};
use rwx_mesh::{primitives, quad_outline, triangulate_loop, GeometryBuffer, Mesh};
use rwx_parser::{AxisAlignment, Statement};
use std::collections::HashMap;

use crate::error::LoadError;
use crate::graph::{Group, LineSet, MeshNode, Node};
use crate::ratio::{sign_ratio, FaceKind, RatioHints};

/// Behavior switches threaded through from the loader configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct MachineOptions {
    /// Skip the quality triangulator and always fan-clip polygons.
    pub force_fallback_triangulator: bool,
    /// Log recoverable oddities at warn level instead of debug.
    pub verbose_warnings: bool,
}

/// Context saved around a prototype definition.
struct ProtoSave {
    name: String,
    transform: Mat4,
}

/// All mutable state of one parse.
pub struct ParseContext<'a> {
    manager: &'a mut MaterialManager,
    options: MachineOptions,

    /// Group under construction on top; the root sits at the bottom.
    group_stack: Vec<Group>,
    /// Parent clump transforms; their product prefixes the current matrix.
    transform_stack: Vec<Mat4>,
    /// Explicit `transformbegin` save slots, independent of clump depth.
    transform_saves: Vec<Mat4>,
    current_transform: Mat4,

    buffer: GeometryBuffer,
    tracker: MaterialTracker,
    hints: RatioHints,

    prototypes: HashMap<String, Group>,
    proto_save: Option<ProtoSave>,

    axis_alignment: AxisAlignment,
}

impl<'a> ParseContext<'a> {
    pub fn new(manager: &'a mut MaterialManager, options: MachineOptions) -> Self {
        let mut context = Self {
            manager,
            options,
            group_stack: vec![Group::new()],
            transform_stack: Vec::new(),
            transform_saves: Vec::new(),
            current_transform: Mat4::IDENTITY,
            buffer: GeometryBuffer::new(),
            tracker: MaterialTracker::new(),
            hints: RatioHints::default(),
            prototypes: HashMap::new(),
            proto_save: None,
            axis_alignment: AxisAlignment::None,
        };
        context.pin_forced_filter();
        context
    }

    /// FILTER stays in the texture-mode set whenever filtering is forced;
    /// this keeps the mode set (and so the signature) honest about what
    /// the renderer will do.
    fn pin_forced_filter(&mut self) {
        if self.manager.options().force_filtering {
            self.tracker.current_mut().add_texture_mode(TextureMode::Filter);
        }
    }

    fn report(&self, message: &str) {
        if self.options.verbose_warnings {
            warn!("{message}");
        } else {
            debug!("{message}");
        }
    }

    fn current_group_mut(&mut self) -> &mut Group {
        // The stack is seeded with the root and never fully drained
        self.group_stack.last_mut().unwrap_or_else(|| unreachable!("root group always present"))
    }

    /// Product of the clump transform stack and the current matrix.
    fn final_transform(&self) -> Mat4 {
        self.transform_stack.iter().fold(Mat4::IDENTITY, |acc, m| acc * *m)
            * self.current_transform
    }

    // =========================================================================
    // Mesh flushing
    // =========================================================================

    /// Materializes the open buffer into a mesh node on the current group.
    ///
    /// No-op when no face has been accumulated; stray vertices are
    /// discarded with the buffer either way on the next scope transition.
    fn finish_mesh(&mut self) {
        if let Some(mesh) = self.buffer.finalize() {
            self.tracker.commit_materials();
            let materials = self.tracker.committed_materials().to_vec();
            let tagged = self.tracker.take_tagged();
            self.current_group_mut().add_child(Node::Mesh(MeshNode {
                transform: Mat4::IDENTITY,
                mesh,
                materials,
                tagged,
            }));
            // Transient per-face annotations do not leak into the next mesh
            let current = self.tracker.current_mut();
            current.tag = 0;
            current.ratio = 1.0;
        }
        self.hints = RatioHints::default();
    }

    /// Declares the current material on the buffer, committing locals
    /// whenever a run closes.
    fn sync_material(&mut self) {
        let id = self.tracker.current_material_id(self.manager);
        if self.buffer.switch_material(id) {
            self.tracker.commit_materials();
        }
    }

    // =========================================================================
    // Faces
    // =========================================================================

    fn face_corner(&self, index: u32) -> Option<(Vec3, Vec2)> {
        Some((self.buffer.position(index)?, self.buffer.uv(index)?))
    }

    /// Applies sign-ratio inference and the per-face tag, returning
    /// whether a tag needs resetting afterwards.
    fn begin_face(&mut self, kind: FaceKind, indices: &[u32; 3], tag: Option<u32>) -> bool {
        match tag {
            Some(tag) => {
                if tag == SIGN_TAG {
                    if let (Some((a, a_uv)), Some((b, b_uv)), Some((c, c_uv))) = (
                        self.face_corner(indices[0]),
                        self.face_corner(indices[1]),
                        self.face_corner(indices[2]),
                    ) {
                        let ratio = self
                            .hints
                            .sign_face(kind, || sign_ratio([a, b, c], [a_uv, b_uv, c_uv]));
                        self.tracker.current_mut().ratio = ratio;
                    }
                } else {
                    self.hints.interrupt(kind);
                }
                self.tracker.current_mut().tag = tag;
                let id = self.tracker.current_material_id(self.manager);
                self.tracker.record_tag(tag, id);
                true
            }
            None => {
                self.hints.interrupt(kind);
                false
            }
        }
    }

    fn end_face(&mut self) {
        let current = self.tracker.current_mut();
        current.tag = 0;
        current.ratio = 1.0;
    }

    fn handle_triangle(&mut self, indices: [u32; 3], tag: Option<u32>) {
        let tagged = self.begin_face(FaceKind::Triangle, &indices, tag);
        self.sync_material();
        self.buffer.add_triangle(indices[0], indices[1], indices[2]);
        if tagged {
            self.end_face();
        }
    }

    fn handle_quad(&mut self, indices: [u32; 4], tag: Option<u32>) {
        let tagged = self.begin_face(FaceKind::Quad, &[indices[0], indices[1], indices[2]], tag);
        self.sync_material();

        if self.tracker.current().geometry_sampling == GeometrySampling::Wireframe {
            // Wireframe quads become outer-edge line segments attached as
            // their own node; they never enter the triangle buffer
            let corners = [
                self.buffer.position(indices[0]),
                self.buffer.position(indices[1]),
                self.buffer.position(indices[2]),
                self.buffer.position(indices[3]),
            ];
            if let [Some(a), Some(b), Some(c), Some(d)] = corners {
                let segments = quad_outline([a, b, c, d]);
                let color = self.tracker.current().color_hex();
                self.current_group_mut().add_child(Node::Lines(LineSet { segments, color }));
            } else {
                self.report("Dropping wireframe quad with out-of-range vertex index");
            }
        } else {
            self.buffer.add_quad(indices[0], indices[1], indices[2], indices[3]);
        }

        if tagged {
            self.end_face();
        }
    }

    fn handle_polygon(&mut self, indices: &[u32], tag: Option<u32>) {
        let tagged = match tag {
            Some(tag) => {
                self.tracker.current_mut().tag = tag;
                let id = self.tracker.current_material_id(self.manager);
                self.tracker.record_tag(tag, id);
                true
            }
            None => false,
        };

        // Polygons are always facet-shaded regardless of the declared
        // sampling; the override lasts only for this face
        let saved_sampling = self.tracker.current().light_sampling;
        self.tracker.current_mut().light_sampling = LightSampling::Facet;
        self.sync_material();

        let outcome = triangulate_loop(
            self.buffer.positions(),
            indices,
            self.options.force_fallback_triangulator,
        );
        if outcome.used_fallback {
            self.report("Polygon triangulation fell back to fan clipping");
        }
        self.buffer.add_triangles(&outcome.triangles);

        self.tracker.current_mut().light_sampling = saved_sampling;
        if tagged {
            self.end_face();
        }
    }

    // =========================================================================
    // Primitives
    // =========================================================================

    /// Attaches a primitive mesh transformed by the final transform, under
    /// the current material.
    fn attach_primitive(&mut self, mesh: Option<Mesh>) {
        let Some(mut mesh) = mesh else {
            self.report("Skipping primitive with degenerate parameters");
            return;
        };
        mesh.apply_transform(&self.final_transform());
        let handle = self.tracker.current_material_handle(self.manager);
        self.current_group_mut().add_child(Node::Mesh(MeshNode {
            transform: Mat4::IDENTITY,
            mesh,
            materials: vec![handle],
            tagged: HashMap::new(),
        }));
    }

    // =========================================================================
    // Scope transitions
    // =========================================================================

    fn handle_clump_begin(&mut self) {
        self.finish_mesh();
        self.group_stack.push(Group::new());
        self.transform_stack.push(self.current_transform);
        self.current_transform = Mat4::IDENTITY;
        self.tracker.push_scope();
    }

    fn handle_clump_end(&mut self) {
        if self.group_stack.len() <= 1 + usize::from(self.proto_save.is_some()) {
            self.report("Ignoring clumpend without a matching clumpbegin");
            return;
        }
        self.finish_mesh();
        self.current_transform = self.transform_stack.pop().unwrap_or(Mat4::IDENTITY);
        let group = self.group_stack.pop().unwrap_or_else(Group::new);
        self.current_group_mut().add_child(Node::Group(group));
        self.tracker.pop_scope();
    }

    fn handle_proto_begin(&mut self, name: &str) {
        if self.proto_save.is_some() {
            self.report("Ignoring nested protobegin");
            return;
        }
        self.finish_mesh();
        self.proto_save = Some(ProtoSave { name: name.to_string(), transform: self.current_transform });
        self.group_stack.push(Group::new());
        self.current_transform = Mat4::IDENTITY;
        self.tracker.push_proto_scope();
        self.pin_forced_filter();
    }

    fn handle_proto_end(&mut self) {
        let Some(save) = self.proto_save.take() else {
            self.report("Ignoring protoend without a matching protobegin");
            return;
        };
        self.finish_mesh();
        let group = self.group_stack.pop().unwrap_or_else(Group::new);
        // Last definition wins; redefinition is not an error
        self.prototypes.insert(save.name, group);
        self.current_transform = save.transform;
        self.tracker.pop_scope();
    }

    fn handle_proto_instance(&mut self, name: &str) -> Result<(), LoadError> {
        let Some(template) = self.prototypes.get(name) else {
            return Err(LoadError::UnknownPrototype { name: name.to_string() });
        };
        // Deep clone; the instance must not alias the template's buffers
        let mut instance = template.clone();
        instance.transform = self.final_transform() * instance.transform;
        self.current_group_mut().add_child(Node::Group(instance));
        Ok(())
    }

    // =========================================================================
    // Statement dispatch
    // =========================================================================

    pub fn apply(&mut self, statement: &Statement) -> Result<(), LoadError> {
        match statement {
            Statement::ClumpBegin => self.handle_clump_begin(),
            Statement::ClumpEnd => self.handle_clump_end(),
            Statement::TransformBegin => self.transform_saves.push(self.current_transform),
            Statement::TransformEnd => {
                self.current_transform = self.transform_saves.pop().unwrap_or(Mat4::IDENTITY);
            }
            Statement::ProtoBegin { name } => self.handle_proto_begin(name),
            Statement::ProtoEnd => self.handle_proto_end(),
            Statement::ProtoInstance { name } => self.handle_proto_instance(name)?,

            Statement::Vertex { position, uv } => {
                let baked = self.final_transform().transform_point3(*position);
                // The format's V axis is flipped relative to the renderer's
                let uv = uv.map_or(Vec2::ZERO, |[u, v]| Vec2::new(u, 1.0 - v));
                self.buffer.add_vertex(baked, uv);
            }
            Statement::Triangle { indices, tag } => self.handle_triangle(*indices, *tag),
            Statement::Quad { indices, tag } => self.handle_quad(*indices, *tag),
            Statement::Polygon { indices, tag } => self.handle_polygon(indices, *tag),

            Statement::Color { color } => self.tracker.current_mut().color = *color,
            Statement::Opacity { opacity } => self.tracker.current_mut().opacity = *opacity,
            Statement::Surface { surface } => self.tracker.current_mut().surface = *surface,
            Statement::Ambient { value } => self.tracker.current_mut().surface[0] = *value,
            Statement::Diffuse { value } => self.tracker.current_mut().surface[1] = *value,
            Statement::Specular { value } => self.tracker.current_mut().surface[2] = *value,
            Statement::MaterialMode { mode } => self.tracker.current_mut().material_mode = *mode,
            Statement::Collision { enabled } => self.tracker.current_mut().collision = *enabled,
            Statement::LightSampling { mode } => self.tracker.current_mut().light_sampling = *mode,
            Statement::GeometrySampling { mode } => {
                self.tracker.current_mut().geometry_sampling = *mode;
            }
            Statement::TextureModes { modes } => {
                self.tracker.current_mut().set_texture_modes(modes.clone());
                self.pin_forced_filter();
            }
            Statement::AddTextureMode { mode } => self.tracker.current_mut().add_texture_mode(*mode),
            Statement::RemoveTextureMode { mode } => {
                let pinned =
                    *mode == TextureMode::Filter && self.manager.options().force_filtering;
                if !pinned {
                    self.tracker.current_mut().remove_texture_mode(*mode);
                }
            }
            Statement::TextureAddressMode { mode } => {
                self.tracker.current_mut().texture_address_mode = *mode;
            }
            Statement::Texture { name, mask } => {
                let current = self.tracker.current_mut();
                current.texture = name.clone();
                current.mask = mask.clone();
            }

            Statement::AxisAlignment { alignment } => self.axis_alignment = *alignment,
            Statement::Tag { tag } => self.current_group_mut().tag = Some(*tag),

            Statement::Identity => self.current_transform = Mat4::IDENTITY,
            Statement::Transform { matrix } => {
                self.current_transform = Mat4::from_cols_array(matrix);
            }
            Statement::Translate { offset } => {
                self.current_transform *= Mat4::from_translation(*offset);
            }
            Statement::Scale { factors } => {
                self.current_transform *= Mat4::from_scale(*factors);
            }
            Statement::Rotate { axis, angle } => {
                // Axis components are per-axis angle multipliers, not a
                // normalized axis; a zero component applies no rotation
                if axis[0] != 0.0 {
                    self.current_transform *=
                        Mat4::from_rotation_x((axis[0] * angle).to_radians());
                }
                if axis[1] != 0.0 {
                    self.current_transform *=
                        Mat4::from_rotation_y((axis[1] * angle).to_radians());
                }
                if axis[2] != 0.0 {
                    self.current_transform *=
                        Mat4::from_rotation_z((axis[2] * angle).to_radians());
                }
            }

            Statement::Block { width, height, depth } => {
                self.attach_primitive(Some(primitives::create_block(*width, *height, *depth)));
            }
            Statement::Cone { height, radius, sides } => {
                self.attach_primitive(primitives::create_cone(*height, *radius, *sides));
            }
            Statement::Cylinder { height, radius_bottom, radius_top, sides } => {
                self.attach_primitive(primitives::create_cylinder(
                    *height,
                    *radius_bottom,
                    *radius_top,
                    *sides,
                ));
            }
            Statement::Disc { height, radius, sides } => {
                self.attach_primitive(primitives::create_disc(*height, *radius, *sides));
            }
            Statement::Hemisphere { radius, density } => {
                self.attach_primitive(primitives::create_hemisphere(*radius, *density));
            }
            Statement::Sphere { radius, density } => {
                self.attach_primitive(primitives::create_sphere(*radius, *density));
            }
        }
        Ok(())
    }

    /// Closes the parse: flushes the pending mesh, unwinds any dangling
    /// scopes, applies the unit scale to the root and returns it.
    pub fn finish(mut self) -> (Group, AxisAlignment) {
        if self.proto_save.is_some() {
            self.report("Source ended inside a prototype definition");
            self.handle_proto_end();
        }
        self.finish_mesh();
        while self.group_stack.len() > 1 {
            self.report("Source ended inside an unclosed clump");
            self.handle_clump_end();
            self.finish_mesh();
        }

        let mut root = self.group_stack.pop().unwrap_or_else(Group::new);
        // The format's native unit is a tenth of the target world unit
        root.transform = Mat4::from_scale(Vec3::splat(UNIT_SCALE)) * root.transform;
        (root, self.axis_alignment)
    }
}
