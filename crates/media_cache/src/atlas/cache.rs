//! Lazily loaded texture atlas cache
//!
//! Holds at most one [`Atlas`]. The descriptor is read on first use, kept
//! until [`AtlasCache::release_atlas`], and read again on the next query
//! after a release.

use std::rc::Rc;
use std::sync::Arc;

use super::{Atlas, Texture};
use crate::assets::{Asset, AssetProvider};
use crate::config::MediaConfig;
use crate::MediaError;

/// Cache owning the application's texture atlas
pub struct AtlasCache {
    provider: Rc<dyn AssetProvider>,
    descriptor_name: String,
    atlas: Option<Atlas>,
}

impl AtlasCache {
    /// Create an unloaded cache reading `descriptor_name` from `provider`
    pub fn new<S: Into<String>>(provider: Rc<dyn AssetProvider>, descriptor_name: S) -> Self {
        Self {
            provider,
            descriptor_name: descriptor_name.into(),
            atlas: None,
        }
    }

    /// Create an unloaded cache using the configured descriptor name
    pub fn from_config(provider: Rc<dyn AssetProvider>, config: &MediaConfig) -> Self {
        Self::new(provider, config.atlas_descriptor_name.clone())
    }

    /// Load the atlas unless one is already held
    ///
    /// # Errors
    /// - `ResourceLoad` if the descriptor is missing or unreadable
    /// - `ResourceDecode` if the descriptor is malformed
    ///
    /// On error the cache stays unloaded, so a later call tries again.
    pub fn ensure_atlas_loaded(&mut self) -> Result<(), MediaError> {
        if self.atlas.is_some() {
            return Ok(());
        }

        let name = self.descriptor_name.as_str();
        let bytes = self
            .provider
            .load_descriptor(name)
            .map_err(|e| MediaError::from_asset(name, e))?;
        let atlas = Atlas::from_bytes(&bytes).map_err(|e| MediaError::from_asset(name, e))?;

        log::info!(
            "Loaded texture atlas '{}' ({} textures, image '{}')",
            name,
            atlas.len(),
            atlas.image_path()
        );
        self.atlas = Some(atlas);
        Ok(())
    }

    /// Drop the held atlas; the next query loads it again
    pub fn release_atlas(&mut self) {
        if self.atlas.take().is_some() {
            log::info!("Released texture atlas '{}'", self.descriptor_name);
        }
    }

    /// Whether an atlas is currently held
    pub fn is_loaded(&self) -> bool {
        self.atlas.is_some()
    }

    /// The held atlas, without triggering a load
    pub fn atlas(&self) -> Option<&Atlas> {
        self.atlas.as_ref()
    }

    /// Descriptor this cache loads
    pub fn descriptor_name(&self) -> &str {
        &self.descriptor_name
    }

    /// Texture with exactly this name
    ///
    /// Loads the atlas first if needed. Returns `None` when no such texture
    /// exists, and also when the atlas could not be loaded.
    pub fn texture_by_name(&mut self, name: &str) -> Option<Arc<Texture>> {
        self.loaded_atlas()?.texture_named(name).cloned()
    }

    /// Textures whose name starts with `prefix`, in natural name order
    ///
    /// Loads the atlas first if needed.
    ///
    /// # Returns
    /// - `None` if the atlas could not be loaded
    /// - `Some(vec![])` if the atlas is loaded but nothing matches
    pub fn textures_with_prefix(&mut self, prefix: &str) -> Option<Vec<Arc<Texture>>> {
        Some(self.loaded_atlas()?.textures_with_prefix(prefix))
    }

    /// Every texture name in the atlas, loading it first if needed
    pub fn texture_names(&mut self) -> Option<Vec<String>> {
        Some(self.loaded_atlas()?.names().map(str::to_string).collect())
    }

    /// Ensure the atlas is loaded, logging instead of returning a failure
    fn loaded_atlas(&mut self) -> Option<&Atlas> {
        if let Err(e) = self.ensure_atlas_loaded() {
            log::warn!("Texture atlas unavailable: {}", e);
            return None;
        }
        self.atlas.as_ref()
    }
}
