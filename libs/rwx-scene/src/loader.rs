//! # Loader Entry Point
//!
//! `RwxLoader` carries the configuration surface, the resource fetcher
//! seam and the material manager, and drives the parse. The returned
//! [`RwxObject`] owns the finished graph plus the texture futures
//! collected during parsing, so the caller chooses between eager
//! delivery and joining the futures first.

use log::warn;
use rwx_material::{
    ManagerOptions, MaterialManager, NullResolver, PendingTexture, TextureColorSpace,
    TextureResolver,
};
use rwx_parser::{parse_line, AxisAlignment};
use std::sync::Arc;

use crate::error::{FetchError, LoadError};
use crate::graph::{Group, MeshNode};
use crate::machine::{MachineOptions, ParseContext};

/// Synchronous retrieval of source text by name.
pub trait ResourceFetcher {
    fn fetch(&self, path: &str) -> Result<String, FetchError>;
}

/// Filesystem-backed fetcher.
#[derive(Debug, Default)]
pub struct FileFetcher;

impl ResourceFetcher for FileFetcher {
    fn fetch(&self, path: &str) -> Result<String, FetchError> {
        std::fs::read_to_string(path).map_err(|err| FetchError::new(path, err.to_string()))
    }
}

/// A loaded object: the scene graph and its pending texture work.
pub struct RwxObject {
    pub root: Group,
    pub axis_alignment: AxisAlignment,
    /// Single merged mesh, present when flattening was requested.
    pub flattened: Option<MeshNode>,
    /// Texture futures dispatched during this parse, not yet settled.
    pub pending: Vec<PendingTexture>,
}

impl RwxObject {
    /// Awaits every collected texture future, attaching resolved images
    /// to the manager's materials.
    ///
    /// Rejections are tolerated: the affected material simply renders
    /// without that texture. Returns the number of textures attached.
    pub async fn wait_textures(&mut self, manager: &mut MaterialManager) -> usize {
        let mut attached = 0;
        for pending in self.pending.drain(..) {
            match pending.future.await {
                Ok(image) => {
                    manager.attach_texture(pending.material, pending.slot, image);
                    attached += 1;
                }
                Err(err) => warn!("Texture resolution failed: {err}"),
            }
        }
        attached
    }
}

/// Builder-style loader for RWX source text.
///
/// # Example
///
/// ```rust,no_run
/// use rwx_scene::RwxLoader;
///
/// let mut loader = RwxLoader::new()
///     .with_base_path("models")
///     .with_resource_path("textures")
///     .with_flatten(true);
/// let object = loader.load("chair.rwx")?;
/// # Ok::<(), rwx_scene::LoadError>(())
/// ```
pub struct RwxLoader {
    base_path: String,
    resource_path: String,
    texture_extension: String,
    mask_extension: String,
    wait_full_load: bool,
    flatten: bool,
    use_unlit_material: bool,
    texture_color_space: TextureColorSpace,
    enable_textures: bool,
    force_fallback_triangulator: bool,
    verbose_warnings: bool,
    alpha_test: f32,
    force_texture_filtering: bool,
    resolver: Arc<dyn TextureResolver>,
    fetcher: Box<dyn ResourceFetcher>,
    /// Created on first use unless supplied by the caller; kept across
    /// loads so deduplication spans every parse through this loader.
    manager: Option<MaterialManager>,
}

impl Default for RwxLoader {
    fn default() -> Self {
        let manager_defaults = ManagerOptions::default();
        Self {
            base_path: String::new(),
            resource_path: String::new(),
            texture_extension: manager_defaults.texture_extension,
            mask_extension: manager_defaults.mask_extension,
            wait_full_load: false,
            flatten: false,
            use_unlit_material: false,
            texture_color_space: TextureColorSpace::Srgb,
            enable_textures: true,
            force_fallback_triangulator: false,
            verbose_warnings: false,
            alpha_test: manager_defaults.alpha_test,
            force_texture_filtering: true,
            resolver: Arc::new(NullResolver),
            fetcher: Box::new(FileFetcher),
            manager: None,
        }
    }
}

impl RwxLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_path(mut self, path: impl Into<String>) -> Self {
        self.base_path = path.into();
        self
    }

    pub fn with_resource_path(mut self, path: impl Into<String>) -> Self {
        self.resource_path = path.into();
        self
    }

    pub fn with_texture_extension(mut self, extension: impl Into<String>) -> Self {
        self.texture_extension = extension.into();
        self
    }

    pub fn with_mask_extension(mut self, extension: impl Into<String>) -> Self {
        self.mask_extension = extension.into();
        self
    }

    /// Join all texture futures before returning from `parse`/`load`.
    pub fn with_wait_full_load(mut self, wait: bool) -> Self {
        self.wait_full_load = wait;
        self
    }

    /// Deliver a single merged mesh alongside the graph.
    pub fn with_flatten(mut self, flatten: bool) -> Self {
        self.flatten = flatten;
        self
    }

    pub fn with_unlit_material(mut self, unlit: bool) -> Self {
        self.use_unlit_material = unlit;
        self
    }

    pub fn with_texture_color_space(mut self, color_space: TextureColorSpace) -> Self {
        self.texture_color_space = color_space;
        self
    }

    pub fn with_textures_enabled(mut self, enabled: bool) -> Self {
        self.enable_textures = enabled;
        self
    }

    pub fn with_forced_fallback_triangulator(mut self, forced: bool) -> Self {
        self.force_fallback_triangulator = forced;
        self
    }

    pub fn with_verbose_warnings(mut self, verbose: bool) -> Self {
        self.verbose_warnings = verbose;
        self
    }

    pub fn with_alpha_test(mut self, threshold: f32) -> Self {
        self.alpha_test = threshold;
        self
    }

    pub fn with_forced_texture_filtering(mut self, forced: bool) -> Self {
        self.force_texture_filtering = forced;
        self
    }

    pub fn with_texture_resolver(mut self, resolver: Arc<dyn TextureResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_fetcher(mut self, fetcher: Box<dyn ResourceFetcher>) -> Self {
        self.fetcher = fetcher;
        self
    }

    /// Supplies a shared manager, extending its deduplication across
    /// every parse this loader (and any other sharer) performs.
    pub fn with_material_manager(mut self, manager: MaterialManager) -> Self {
        self.manager = Some(manager);
        self
    }

    /// The manager backing handles returned in parsed objects.
    pub fn material_manager(&mut self) -> &mut MaterialManager {
        if self.manager.is_none() {
            self.manager = Some(self.build_manager());
        }
        // Populated just above when absent
        self.manager.get_or_insert_with(MaterialManager::default)
    }

    fn build_manager(&self) -> MaterialManager {
        MaterialManager::new(
            ManagerOptions {
                folder: self.resource_path.clone(),
                texture_extension: self.texture_extension.clone(),
                mask_extension: self.mask_extension.clone(),
                unlit: self.use_unlit_material,
                color_space: self.texture_color_space,
                enable_textures: self.enable_textures,
                alpha_test: self.alpha_test,
                force_filtering: self.force_texture_filtering,
            },
            Arc::clone(&self.resolver),
        )
    }

    /// Fetches and parses a named object.
    pub fn load(&mut self, name: &str) -> Result<RwxObject, LoadError> {
        let path = if self.base_path.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", self.base_path, name)
        };
        let text = self.fetcher.fetch(&path)?;
        self.parse(&text)
    }

    /// Parses source text into a scene graph.
    ///
    /// Delivery is eager unless `wait_full_load` was requested, in which
    /// case the collected texture futures are joined before returning.
    pub fn parse(&mut self, text: &str) -> Result<RwxObject, LoadError> {
        let machine_options = MachineOptions {
            force_fallback_triangulator: self.force_fallback_triangulator,
            verbose_warnings: self.verbose_warnings,
        };
        let flatten = self.flatten;
        let wait = self.wait_full_load;

        let mut manager = self.manager.take().unwrap_or_else(|| self.build_manager());
        let mut context = ParseContext::new(&mut manager, machine_options);
        let result = (|| {
            for line in text.lines() {
                if let Some(statement) = parse_line(line) {
                    context.apply(&statement)?;
                }
            }
            Ok(context.finish())
        })();

        let outcome = match result {
            Ok((root, axis_alignment)) => {
                let flattened = flatten.then(|| crate::flatten::flatten_group(&root, |_| true));
                let mut object = RwxObject {
                    root,
                    axis_alignment,
                    flattened,
                    pending: manager.take_pending(),
                };
                if wait {
                    pollster::block_on(object.wait_textures(&mut manager));
                }
                Ok(object)
            }
            // No partial graph on a fatal parse error
            Err(err) => Err(err),
        };
        self.manager = Some(manager);
        outcome
    }
}
