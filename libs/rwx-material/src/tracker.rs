//! # Per-Mesh Material Tracker
//!
//! Scoped to one mesh-building context: assigns local sequential indices
//! to the materials a mesh actually references, separates committed
//! materials from merely-referenced ones with a watermark, and records
//! which local indices were active under which face tag. Scopes are
//! saved and restored with a stack matching clump nesting.

use crate::manager::{MaterialHandle, MaterialManager};
use crate::material::RwxMaterial;
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct TrackerScope {
    current: RwxMaterial,
    local_ids: HashMap<String, usize>,
    locals: Vec<MaterialHandle>,
    committed: usize,
    tagged: HashMap<u32, Vec<usize>>,
}

/// Local material bookkeeping for the mesh under construction.
#[derive(Debug, Clone, Default)]
pub struct MaterialTracker {
    /// The mutable material edited by statements.
    current: RwxMaterial,
    /// Signature → local index of materials referenced so far.
    local_ids: HashMap<String, usize>,
    /// Local index → manager handle, in registration order.
    locals: Vec<MaterialHandle>,
    /// Watermark: locals below this index are baked into flushed runs.
    committed: usize,
    /// Face tag → local indices ever active under that tag.
    tagged: HashMap<u32, Vec<usize>>,
    stack: Vec<TrackerScope>,
}

impl MaterialTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &RwxMaterial {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut RwxMaterial {
        &mut self.current
    }

    /// Local index of the current material within this mesh scope.
    ///
    /// Registers the signature on first sight (appending to the local
    /// list and upserting into the manager); idempotent for an unchanged
    /// signature.
    pub fn current_material_id(&mut self, manager: &mut MaterialManager) -> usize {
        let signature = self.current.signature();
        if let Some(&id) = self.local_ids.get(&signature) {
            return id;
        }
        let handle = manager.add_material_with_signature(&self.current, &signature);
        let id = self.locals.len();
        self.locals.push(handle);
        self.local_ids.insert(signature, id);
        id
    }

    /// Manager handle of the current material, registered locally as a
    /// side effect.
    pub fn current_material_handle(&mut self, manager: &mut MaterialManager) -> MaterialHandle {
        let id = self.current_material_id(manager);
        self.locals[id]
    }

    /// Moves the committed watermark up to the full local list.
    ///
    /// Called whenever a material run is flushed into geometry; materials
    /// merely referenced without an intervening flush stay uncommitted.
    pub fn commit_materials(&mut self) {
        self.committed = self.locals.len();
    }

    /// Handles of materials baked into flushed geometry runs, in local
    /// index order.
    pub fn committed_materials(&self) -> &[MaterialHandle] {
        &self.locals[..self.committed]
    }

    /// Records that `local_id` was active under `tag`, once per pair.
    pub fn record_tag(&mut self, tag: u32, local_id: usize) {
        let ids = self.tagged.entry(tag).or_default();
        if !ids.contains(&local_id) {
            ids.push(local_id);
        }
    }

    /// Drains the tag side-table for attachment to a finished mesh.
    pub fn take_tagged(&mut self) -> HashMap<u32, Vec<usize>> {
        std::mem::take(&mut self.tagged)
    }

    /// Enters a nested clump scope.
    ///
    /// The parent's current material and local bookkeeping are saved; the
    /// child starts with a copy of the current material and a fresh local
    /// list.
    pub fn push_scope(&mut self) {
        self.stack.push(TrackerScope {
            current: self.current.clone(),
            local_ids: std::mem::take(&mut self.local_ids),
            locals: std::mem::take(&mut self.locals),
            committed: std::mem::replace(&mut self.committed, 0),
            tagged: std::mem::take(&mut self.tagged),
        });
    }

    /// Enters a prototype-definition scope.
    ///
    /// Like [`push_scope`](Self::push_scope) but the definition starts
    /// from a pristine default material rather than inheriting the
    /// enclosing state.
    pub fn push_proto_scope(&mut self) {
        self.push_scope();
        self.current = RwxMaterial::default();
    }

    /// Leaves a nested scope, restoring the parent's current material and
    /// local bookkeeping exactly as they were on entry.
    pub fn pop_scope(&mut self) {
        if let Some(scope) = self.stack.pop() {
            self.current = scope.current;
            self.local_ids = scope.local_ids;
            self.locals = scope.locals;
            self.committed = scope.committed;
            self.tagged = scope.tagged;
        } else {
            *self = Self::new();
        }
    }

    /// Number of locally referenced materials (committed or not).
    pub fn local_len(&self) -> usize {
        self.locals.len()
    }
}
