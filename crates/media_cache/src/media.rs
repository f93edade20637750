//! Host-side assembly of the caches
//!
//! The host builds one [`Media`] at startup, hands `&mut` access to
//! whatever needs sprites or sounds, and calls [`Media::release_all`] (or
//! drops it) at shutdown.

use std::rc::Rc;

use crate::assets::{AssetProvider, FsAssetProvider};
use crate::atlas::AtlasCache;
use crate::audio::backend::SharedBackend;
use crate::audio::SoundLibrary;
use crate::config::MediaConfig;
use crate::MediaError;

/// The application's atlas cache and sound library, sharing one asset provider
pub struct Media {
    config: MediaConfig,
    atlas: AtlasCache,
    sounds: SoundLibrary,
}

impl Media {
    /// Create unloaded caches reading from the configured search paths
    pub fn new(config: MediaConfig, backend: SharedBackend) -> Self {
        let provider = FsAssetProvider::with_search_paths(config.search_paths.iter().cloned());
        Self::with_provider(config, Rc::new(provider), backend)
    }

    /// Create unloaded caches reading from a custom provider
    pub fn with_provider(config: MediaConfig, provider: Rc<dyn AssetProvider>, backend: SharedBackend) -> Self {
        log::info!(
            "Creating media caches (atlas '{}', *.{} sounds under '{}')",
            config.atlas_descriptor_name,
            config.audio_extension,
            config.sound_directory
        );
        let atlas = AtlasCache::from_config(Rc::clone(&provider), &config);
        let sounds = SoundLibrary::new(provider, backend, &config);
        Self { config, atlas, sounds }
    }

    /// The configuration the caches were built from
    pub fn config(&self) -> &MediaConfig {
        &self.config
    }

    /// The texture atlas cache
    pub fn atlas(&mut self) -> &mut AtlasCache {
        &mut self.atlas
    }

    /// The sound library
    pub fn sounds(&mut self) -> &mut SoundLibrary {
        &mut self.sounds
    }

    /// Load both caches up front instead of on first use
    ///
    /// Both loads are attempted; the atlas error wins if both fail.
    pub fn preload(&mut self) -> Result<(), MediaError> {
        let atlas = self.atlas.ensure_atlas_loaded();
        let sounds = self.sounds.ensure_library_loaded();
        atlas.and(sounds)
    }

    /// Release both caches; later queries load them again
    pub fn release_all(&mut self) {
        self.atlas.release_atlas();
        self.sounds.release_library();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::backend::{AudioBackend, NullBackend};
    use crate::testing::{atlas_xml, caf_bytes, MemoryProvider};
    use std::cell::RefCell;

    fn media() -> (Rc<MemoryProvider>, Rc<RefCell<NullBackend>>, Media) {
        let provider = Rc::new(
            MemoryProvider::new()
                .with_file("atlas.xml", atlas_xml(&["ship", "rock_1", "rock_2"]))
                .with_file("sfx/boom.caf", caf_bytes()),
        );
        let backend = Rc::new(RefCell::new(NullBackend::new()));
        let shared_provider: Rc<dyn AssetProvider> = provider.clone();
        let shared_backend: SharedBackend = backend.clone();
        let media = Media::with_provider(MediaConfig::default(), shared_provider, shared_backend);
        (provider, backend, media)
    }

    #[test]
    fn test_caches_share_provider_and_load_lazily() {
        let (provider, backend, mut media) = media();
        assert!(!media.atlas().is_loaded());
        assert!(!media.sounds().is_loaded());

        assert_eq!(media.atlas().textures_with_prefix("rock").map(|t| t.len()), Some(2));
        assert_eq!(provider.descriptor_loads(), 1);
        assert_eq!(provider.enumerations(), 0);

        media.sounds().play("sfx/boom.caf").unwrap();
        assert_eq!(provider.enumerations(), 1);
        assert_eq!(backend.borrow().voices_started(), 1);
    }

    #[test]
    fn test_preload_and_release_all() {
        let (provider, backend, mut media) = media();
        media.preload().unwrap();
        assert!(media.atlas().is_loaded());
        assert!(media.sounds().contains("sfx/boom.caf"));

        media.release_all();
        assert!(!media.atlas().is_loaded());
        assert!(!media.sounds().is_loaded());
        assert!(!backend.borrow().is_running());

        media.preload().unwrap();
        assert_eq!(provider.descriptor_loads(), 2);
        assert_eq!(provider.enumerations(), 2);
    }

    #[test]
    fn test_preload_reports_missing_atlas_but_loads_sounds() {
        let provider = Rc::new(MemoryProvider::new().with_file("boom.caf", caf_bytes()));
        let shared_provider: Rc<dyn AssetProvider> = provider.clone();
        let backend: SharedBackend = Rc::new(RefCell::new(NullBackend::new()));
        let mut media = Media::with_provider(MediaConfig::default(), shared_provider, backend);

        let err = media.preload().unwrap_err();
        assert!(err.is_load_failure());
        assert!(media.sounds().is_loaded());
        assert_eq!(media.config().atlas_descriptor_name, "atlas.xml");
    }
}
