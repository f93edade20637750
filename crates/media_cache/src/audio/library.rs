//! Sound library
//!
//! Name -> clip cache built by scanning the bundle once. Requests for clips
//! the scan did not find fall back to loading them straight from the asset
//! provider; those loads are never cached.

use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use super::backend::{PlaybackSettings, SharedBackend};
use super::{SoundChannel, SoundResource};
use crate::assets::{canonical_path, AssetProvider};
use crate::config::MediaConfig;
use crate::MediaError;

/// Lazily scanned cache of sound clips
///
/// Keys are canonical paths relative to the asset root (see
/// [`canonical_path`]); lookups canonicalize the requested name the same way.
pub struct SoundLibrary {
    provider: Rc<dyn AssetProvider>,
    backend: SharedBackend,
    /// Directory scanned for clips
    sound_directory: String,
    /// Extension a file needs to be preloaded
    extension: String,
    /// `None` until the first scan and after a release
    sounds: Option<HashMap<String, Arc<SoundResource>>>,
}

impl SoundLibrary {
    /// Create an unloaded library
    pub fn new(provider: Rc<dyn AssetProvider>, backend: SharedBackend, config: &MediaConfig) -> Self {
        Self {
            provider,
            backend,
            sound_directory: canonical_path(&config.sound_directory),
            extension: config.audio_extension.trim_start_matches('.').to_string(),
            sounds: None,
        }
    }

    /// Start audio and scan the bundle unless already done
    ///
    /// A scan that found nothing still counts as loaded. Files that cannot
    /// be read or decoded are skipped.
    ///
    /// # Errors
    /// - `Audio` if the backend cannot be started; the library stays unloaded
    pub fn ensure_library_loaded(&mut self) -> Result<(), MediaError> {
        if self.sounds.is_some() {
            return Ok(());
        }

        self.backend.borrow_mut().start()?;
        let sounds = self.scan();
        log::info!(
            "Sound library loaded {} clip(s) from '{}'",
            sounds.len(),
            self.sound_directory
        );
        self.sounds = Some(sounds);
        Ok(())
    }

    /// Preload every matching file below the sound directory
    fn scan(&self) -> HashMap<String, Arc<SoundResource>> {
        let mut sounds = HashMap::new();

        let entries = match self.provider.enumerate(&self.sound_directory) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Could not scan '{}' for sounds: {}", self.sound_directory, e);
                return sounds;
            }
        };

        for entry in entries.iter().filter(|e| e.has_extension(&self.extension)) {
            let sound = self
                .provider
                .load_file(&entry.path)
                .and_then(|bytes| SoundResource::from_file(entry.path.as_str(), &bytes));
            match sound {
                Ok(sound) => {
                    log::debug!("Preloaded sound '{}'", entry.path);
                    sounds.insert(entry.path.clone(), Arc::new(sound));
                }
                Err(e) => log::debug!("Skipping sound '{}': {}", entry.path, e),
            }
        }

        sounds
    }

    /// Drop every cached clip and stop the audio backend
    pub fn release_library(&mut self) {
        if self.sounds.take().is_some() {
            self.backend.borrow_mut().shutdown();
            log::info!("Released sound library");
        }
    }

    /// Whether the library has been scanned and not released since
    pub fn is_loaded(&self) -> bool {
        self.sounds.is_some()
    }

    /// Whether `name` is cached (no scan is triggered)
    pub fn contains(&self, name: &str) -> bool {
        self.sounds
            .as_ref()
            .is_some_and(|sounds| sounds.contains_key(&canonical_path(name)))
    }

    /// Number of cached clips (0 when not loaded)
    pub fn len(&self) -> usize {
        self.sounds.as_ref().map_or(0, HashMap::len)
    }

    /// Whether no clips are cached
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names of the cached clips, sorted
    pub fn sound_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .sounds
            .iter()
            .flat_map(|sounds| sounds.keys().cloned())
            .collect();
        names.sort();
        names
    }

    /// The backend voices are played on
    pub fn backend(&self) -> &SharedBackend {
        &self.backend
    }

    /// Play a clip once, without handing out a handle
    ///
    /// Cached clips play straight away. Unknown names are loaded from the
    /// asset provider, played, and discarded.
    ///
    /// # Errors
    /// - `ResourceLoad` / `ResourceDecode` if an uncached clip cannot be loaded
    /// - `Audio` if the backend cannot be started
    ///
    /// Playback problems after the clip is resolved are logged, not returned.
    pub fn play(&mut self, name: &str) -> Result<(), MediaError> {
        let sound = self.resolve(name)?;

        let mut backend = self.backend.borrow_mut();
        backend.update();
        if let Err(e) = backend.play(&sound, PlaybackSettings::default()) {
            log::warn!("Could not play '{}': {}", sound.name(), e);
        }
        Ok(())
    }

    /// Create a playback channel for a clip
    ///
    /// Same lookup as [`play`](Self::play); an uncached clip is loaded again
    /// on every call.
    ///
    /// # Errors
    /// - `ResourceLoad` / `ResourceDecode` if an uncached clip cannot be loaded
    /// - `Audio` if the backend cannot be started
    pub fn channel(&mut self, name: &str) -> Result<SoundChannel, MediaError> {
        let sound = self.resolve(name)?;
        Ok(SoundChannel::new(sound, Rc::clone(&self.backend)))
    }

    /// Cached clip for `name`, or a fresh uncached load
    fn resolve(&mut self, name: &str) -> Result<Arc<SoundResource>, MediaError> {
        self.ensure_library_loaded()?;

        let key = canonical_path(name);
        if let Some(sound) = self.sounds.as_ref().and_then(|sounds| sounds.get(&key)) {
            return Ok(Arc::clone(sound));
        }

        // Sound was not preloaded
        log::debug!("Sound '{}' not cached, loading directly", key);
        let bytes = self
            .provider
            .load_file(&key)
            .map_err(|e| MediaError::from_asset(name, e))?;
        let sound = SoundResource::from_file(key, &bytes).map_err(|e| MediaError::from_asset(name, e))?;
        Ok(Arc::new(sound))
    }
}

impl Drop for SoundLibrary {
    fn drop(&mut self) {
        self.release_library();
    }
}
