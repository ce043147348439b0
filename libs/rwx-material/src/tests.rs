//! # Material Tests

use crate::descriptor::SideMode;
use crate::manager::{ManagerOptions, MaterialManager, TextureSlot};
use crate::material::{MaterialMode, RwxMaterial, TextureMode};
use crate::resolver::{AnimationState, TextureHandle};
use crate::tracker::MaterialTracker;
use std::sync::Arc;

fn manager() -> MaterialManager {
    MaterialManager::default()
}

#[test]
fn test_signature_is_deterministic() {
    let a = RwxMaterial::default();
    let b = RwxMaterial::default();
    assert_eq!(a.signature(), b.signature());
}

#[test]
fn test_signature_changes_with_any_field() {
    let base = RwxMaterial::default();
    let mut m = base.clone();
    m.color = [1.0, 0.0, 0.0];
    assert_ne!(base.signature(), m.signature());

    let mut m = base.clone();
    m.opacity = 0.5;
    assert_ne!(base.signature(), m.signature());

    let mut m = base.clone();
    m.tag = 100;
    assert_ne!(base.signature(), m.signature());

    let mut m = base.clone();
    m.ratio = 2.0;
    assert_ne!(base.signature(), m.signature());
}

#[test]
fn test_texture_modes_are_canonical() {
    let mut m = RwxMaterial::default();
    m.set_texture_modes(vec![TextureMode::Filter, TextureMode::Lit, TextureMode::Filter]);
    assert_eq!(m.texture_modes(), &[TextureMode::Lit, TextureMode::Filter]);

    let mut other = RwxMaterial::default();
    other.set_texture_modes(vec![TextureMode::Lit, TextureMode::Filter]);
    assert_eq!(m.signature(), other.signature());
}

#[test]
fn test_embedded_texture_extension() {
    let mut m = RwxMaterial::default();
    m.texture = Some("sign.png".to_string());
    assert_eq!(m.texture_basename_and_extension(), Some(("sign", Some("png"))));

    m.texture = Some("brick".to_string());
    assert_eq!(m.texture_basename_and_extension(), Some(("brick", None)));
}

#[test]
fn test_manager_dedup_by_signature() {
    let mut mgr = manager();
    let mut m = RwxMaterial::default();
    m.color = [0.25, 0.5, 0.75];

    let first = mgr.add_material(&m);
    let second = mgr.add_material(&m.clone());
    assert_eq!(first, second);
    assert_eq!(mgr.len(), 1);

    m.opacity = 0.5;
    let third = mgr.add_material(&m);
    assert_ne!(first, third);
    assert_eq!(mgr.len(), 2);
}

#[test]
fn test_descriptor_material_modes() {
    let mut mgr = manager();
    let mut m = RwxMaterial::default();

    m.material_mode = MaterialMode::Double;
    let h = mgr.add_material(&m);
    assert_eq!(mgr.descriptor(h).side, SideMode::Double);
    assert!(mgr.descriptor(h).visible);

    m.material_mode = MaterialMode::None;
    let h = mgr.add_material(&m);
    assert!(!mgr.descriptor(h).visible);
}

#[test]
fn test_descriptor_extension_override_is_per_material() {
    let mut mgr = manager();
    let mut m = RwxMaterial::default();
    m.texture = Some("sign.png".to_string());
    let with_ext = mgr.add_material(&m);

    m.texture = Some("brick".to_string());
    let without_ext = mgr.add_material(&m);

    let t = mgr.descriptor(with_ext).texture.as_ref().unwrap();
    assert_eq!((t.name.as_str(), t.extension.as_str()), ("sign", "png"));
    let t = mgr.descriptor(without_ext).texture.as_ref().unwrap();
    assert_eq!((t.name.as_str(), t.extension.as_str()), ("brick", "jpg"));
}

#[test]
fn test_mask_implies_alpha_test_and_transparency() {
    let mut mgr = manager();
    let mut m = RwxMaterial::default();
    m.texture = Some("fence".to_string());
    m.mask = Some("fencem".to_string());
    let h = mgr.add_material(&m);
    let d = mgr.descriptor(h);
    assert!(d.transparent);
    assert_eq!(d.alpha_test, Some(0.2));
    assert_eq!(d.mask.as_ref().unwrap().extension, "zip");
}

#[test]
fn test_disabled_textures_dispatch_nothing() {
    let options = ManagerOptions {
        enable_textures: false,
        ..ManagerOptions::default()
    };
    let mut mgr = MaterialManager::new(options, Arc::new(crate::resolver::NullResolver));
    let mut m = RwxMaterial::default();
    m.texture = Some("brick".to_string());
    mgr.add_material(&m);
    assert!(mgr.take_pending().is_empty());
}

#[test]
fn test_pending_futures_reject_softly() {
    let mut mgr = manager();
    let mut m = RwxMaterial::default();
    m.texture = Some("brick".to_string());
    let h = mgr.add_material(&m);

    let pending = mgr.take_pending();
    assert_eq!(pending.len(), 1);
    for p in pending {
        // NullResolver rejects; the material and manager stay usable
        assert!(pollster::block_on(p.future).is_err());
    }
    assert!(mgr.entry(h).base_texture.is_none());
}

#[test]
fn test_attach_texture_detects_animation_strip() {
    let mut mgr = manager();
    let mut m = RwxMaterial::default();
    m.texture = Some("water".to_string());
    let h = mgr.add_material(&m);

    let strip = TextureHandle { id: 1, width: 64, height: 256 };
    mgr.attach_texture(h, TextureSlot::Base, strip);
    let binding = mgr.entry(h).base_texture.as_ref().unwrap();
    let animation = binding.animation.unwrap();
    assert_eq!(animation.frame_count, 4);
    assert_eq!(animation.offset_y, 0.75);

    mgr.advance_texture_frames();
    let animation = mgr.entry(h).base_texture.as_ref().unwrap().animation.unwrap();
    assert_eq!(animation.step, 1);
    assert_eq!(animation.offset_y, 0.5);
}

#[test]
fn test_square_image_is_not_animated() {
    let image = TextureHandle { id: 2, width: 128, height: 128 };
    assert!(AnimationState::from_image(&image).is_none());
    let image = TextureHandle { id: 3, width: 128, height: 192 };
    assert!(AnimationState::from_image(&image).is_none());
}

#[test]
fn test_animation_wraps_around() {
    let image = TextureHandle { id: 4, width: 32, height: 64 };
    let mut animation = AnimationState::from_image(&image).unwrap();
    assert_eq!(animation.frame_count, 2);
    animation.advance_frame();
    assert_eq!(animation.step, 1);
    animation.advance_frame();
    assert_eq!(animation.step, 0);
    assert_eq!(animation.offset_y, 0.5);
}

// =============================================================================
// TRACKER TESTS
// =============================================================================

#[test]
fn test_tracker_id_is_idempotent() {
    let mut mgr = manager();
    let mut tracker = MaterialTracker::new();

    let first = tracker.current_material_id(&mut mgr);
    let second = tracker.current_material_id(&mut mgr);
    assert_eq!(first, second);
    assert_eq!(tracker.local_len(), 1);
}

#[test]
fn test_tracker_assigns_sequential_ids() {
    let mut mgr = manager();
    let mut tracker = MaterialTracker::new();

    assert_eq!(tracker.current_material_id(&mut mgr), 0);
    tracker.current_mut().color = [1.0, 0.0, 0.0];
    assert_eq!(tracker.current_material_id(&mut mgr), 1);
    // Switching back to an already-seen signature reuses its index
    tracker.current_mut().color = [0.0, 0.0, 0.0];
    assert_eq!(tracker.current_material_id(&mut mgr), 0);
    assert_eq!(tracker.local_len(), 2);
}

#[test]
fn test_commit_watermark() {
    let mut mgr = manager();
    let mut tracker = MaterialTracker::new();

    tracker.current_material_id(&mut mgr);
    tracker.current_mut().color = [1.0, 0.0, 0.0];
    tracker.current_material_id(&mut mgr);
    // Referenced but never flushed: nothing is committed yet
    assert!(tracker.committed_materials().is_empty());

    tracker.commit_materials();
    assert_eq!(tracker.committed_materials().len(), tracker.local_len());
}

#[test]
fn test_tag_side_table_dedups_pairs() {
    let mut mgr = manager();
    let mut tracker = MaterialTracker::new();

    let id = tracker.current_material_id(&mut mgr);
    tracker.record_tag(100, id);
    tracker.record_tag(100, id);
    tracker.record_tag(7, id);

    let tagged = tracker.take_tagged();
    assert_eq!(tagged[&100], vec![id]);
    assert_eq!(tagged[&7], vec![id]);
    assert!(tracker.take_tagged().is_empty());
}

#[test]
fn test_scope_push_pop_restores_parent() {
    let mut mgr = manager();
    let mut tracker = MaterialTracker::new();

    tracker.current_mut().color = [0.5, 0.5, 0.5];
    let outer_signature = tracker.current().signature();
    tracker.current_material_id(&mut mgr);
    tracker.commit_materials();

    tracker.push_scope();
    // The child inherits the parent's current material
    assert_eq!(tracker.current().signature(), outer_signature);
    assert_eq!(tracker.local_len(), 0);
    tracker.current_mut().color = [0.0, 1.0, 0.0];
    tracker.current_material_id(&mut mgr);

    tracker.pop_scope();
    assert_eq!(tracker.current().signature(), outer_signature);
    assert_eq!(tracker.local_len(), 1);
    assert_eq!(tracker.committed_materials().len(), 1);
}

#[test]
fn test_proto_scope_starts_pristine() {
    let mut mgr = manager();
    let mut tracker = MaterialTracker::new();

    tracker.current_mut().color = [0.5, 0.5, 0.5];
    tracker.push_proto_scope();
    assert_eq!(tracker.current(), &RwxMaterial::default());
    tracker.pop_scope();
    assert_eq!(tracker.current().color, [0.5, 0.5, 0.5]);
}

#[test]
fn test_signature_handle_bijection() {
    let mut mgr = manager();
    let mut a = RwxMaterial::default();
    a.color = [0.1, 0.2, 0.3];
    let mut b = RwxMaterial::default();
    b.color = [0.1, 0.2, 0.3];

    assert_eq!(a.signature(), b.signature());
    assert_eq!(mgr.add_material(&a), mgr.add_material(&b));

    b.surface = [0.1, 0.0, 0.0];
    assert_ne!(a.signature(), b.signature());
    assert_ne!(mgr.add_material(&a), mgr.add_material(&b));

    // Lookup by signature returns the registered handle, or nothing
    assert_eq!(mgr.handle_for_signature(&a.signature()), Some(mgr.add_material(&a)));
    assert_eq!(mgr.handle_for_signature("no-such-signature"), None);
}
