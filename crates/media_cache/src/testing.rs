//! Shared test doubles
//!
//! An in-memory asset provider that counts every call, plus helpers for
//! building descriptor and clip bytes.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use crate::assets::{canonical_path, AssetEntry, AssetError, AssetProvider};
use crate::audio::backend::{AudioBackend, PlaybackSettings, SoundHandle};
use crate::audio::{AudioError, SoundResource};

/// Asset provider over an in-memory file map
#[derive(Default)]
pub struct MemoryProvider {
    files: RefCell<BTreeMap<String, Vec<u8>>>,
    descriptor_loads: Cell<usize>,
    file_loads: Cell<usize>,
    enumerations: Cell<usize>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: &str, bytes: Vec<u8>) -> Self {
        self.insert(path, bytes);
        self
    }

    pub fn insert(&self, path: &str, bytes: Vec<u8>) {
        self.files.borrow_mut().insert(canonical_path(path), bytes);
    }

    pub fn remove(&self, path: &str) {
        self.files.borrow_mut().remove(&canonical_path(path));
    }

    pub fn descriptor_loads(&self) -> usize {
        self.descriptor_loads.get()
    }

    pub fn file_loads(&self) -> usize {
        self.file_loads.get()
    }

    pub fn enumerations(&self) -> usize {
        self.enumerations.get()
    }

    fn read(&self, path: &str) -> Result<Vec<u8>, AssetError> {
        self.files
            .borrow()
            .get(&canonical_path(path))
            .cloned()
            .ok_or_else(|| AssetError::NotFound(path.to_string()))
    }
}

impl AssetProvider for MemoryProvider {
    fn load_descriptor(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        self.descriptor_loads.set(self.descriptor_loads.get() + 1);
        self.read(name)
    }

    fn enumerate(&self, directory: &str) -> Result<Vec<AssetEntry>, AssetError> {
        self.enumerations.set(self.enumerations.get() + 1);
        let directory = canonical_path(directory);
        let prefix = if directory.is_empty() {
            String::new()
        } else {
            format!("{}/", directory)
        };
        Ok(self
            .files
            .borrow()
            .keys()
            .filter(|path| path.starts_with(&prefix))
            .map(|path| AssetEntry::new(path))
            .collect())
    }

    fn load_file(&self, path: &str) -> Result<Vec<u8>, AssetError> {
        self.file_loads.set(self.file_loads.get() + 1);
        self.read(path)
    }
}

/// Backend whose audio device never comes up
pub struct FailingBackend;

impl AudioBackend for FailingBackend {
    fn start(&mut self) -> Result<(), AudioError> {
        Err(AudioError::BackendInitFailed("no audio device".to_string()))
    }

    fn shutdown(&mut self) {}

    fn is_running(&self) -> bool {
        false
    }

    fn update(&mut self) {}

    fn stop_all(&mut self) {}

    fn play(&mut self, _sound: &SoundResource, _settings: PlaybackSettings) -> Result<SoundHandle, AudioError> {
        Err(AudioError::BackendNotInitialized)
    }

    fn pause(&mut self, _handle: SoundHandle) -> Result<(), AudioError> {
        Err(AudioError::InvalidHandle)
    }

    fn resume(&mut self, _handle: SoundHandle) -> Result<(), AudioError> {
        Err(AudioError::InvalidHandle)
    }

    fn stop(&mut self, _handle: SoundHandle) -> Result<(), AudioError> {
        Ok(())
    }

    fn set_volume(&mut self, _handle: SoundHandle, _volume: f32) -> Result<(), AudioError> {
        Err(AudioError::InvalidHandle)
    }

    fn get_volume(&self, _handle: SoundHandle) -> Result<f32, AudioError> {
        Err(AudioError::InvalidHandle)
    }

    fn is_playing(&self, _handle: SoundHandle) -> bool {
        false
    }
}

/// Minimal bytes accepted as a CAF clip
pub fn caf_bytes() -> Vec<u8> {
    b"caff\x00\x01\x00\x00desc".to_vec()
}

/// Descriptor with one 16x16 sub-texture per name
pub fn atlas_xml(names: &[&str]) -> Vec<u8> {
    let mut xml = String::from("<?xml version=\"1.0\"?>\n<TextureAtlas imagePath=\"atlas.png\">\n");
    for (i, name) in names.iter().enumerate() {
        xml.push_str(&format!(
            "  <SubTexture name=\"{}\" x=\"{}\" y=\"0\" width=\"16\" height=\"16\"/>\n",
            name,
            i * 16
        ));
    }
    xml.push_str("</TextureAtlas>\n");
    xml.into_bytes()
}
