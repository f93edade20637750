//! Silent audio backend
//!
//! Accepts every request without producing sound. Used on headless hosts
//! and builds without the `rodio` feature. Voices behave like real ones
//! except that a non-looping voice finishes at the next [`AudioBackend::update`].

use std::collections::HashMap;

use super::{AudioBackend, PlaybackSettings, SoundHandle};
use crate::audio::{AudioError, SoundResource};

#[derive(Debug, Clone)]
struct Voice {
    sound_name: String,
    volume: f32,
    looping: bool,
    paused: bool,
}

/// Backend that plays nothing
#[derive(Debug, Default)]
pub struct NullBackend {
    voices: HashMap<SoundHandle, Voice>,
    next_id: u32,
    running: bool,
    started: usize,
}

impl NullBackend {
    /// Create a stopped backend
    pub fn new() -> Self {
        Self::default()
    }

    fn next_handle(&mut self) -> SoundHandle {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        SoundHandle::new(id, 0)
    }

    fn voice_mut(&mut self, handle: SoundHandle) -> Result<&mut Voice, AudioError> {
        self.voices.get_mut(&handle).ok_or(AudioError::InvalidHandle)
    }

    /// Number of live voices
    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    /// Total number of voices started since creation
    pub fn voices_started(&self) -> usize {
        self.started
    }

    /// Name of the sound a voice is playing
    pub fn sound_name(&self, handle: SoundHandle) -> Option<&str> {
        self.voices.get(&handle).map(|voice| voice.sound_name.as_str())
    }
}

impl AudioBackend for NullBackend {
    fn start(&mut self) -> Result<(), AudioError> {
        if !self.running {
            self.running = true;
            log::info!("Null audio backend started");
        }
        Ok(())
    }

    fn shutdown(&mut self) {
        if !self.running {
            return;
        }
        self.stop_all();
        self.running = false;
        log::info!("Null audio backend shutdown");
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn update(&mut self) {
        self.voices.retain(|_handle, voice| voice.looping || voice.paused);
    }

    fn stop_all(&mut self) {
        self.voices.clear();
    }

    fn play(&mut self, sound: &SoundResource, settings: PlaybackSettings) -> Result<SoundHandle, AudioError> {
        if !self.running {
            return Err(AudioError::BackendNotInitialized);
        }
        let handle = self.next_handle();
        self.voices.insert(
            handle,
            Voice {
                sound_name: sound.name().to_string(),
                volume: settings.volume,
                looping: settings.looping,
                paused: false,
            },
        );
        self.started += 1;
        Ok(handle)
    }

    fn pause(&mut self, handle: SoundHandle) -> Result<(), AudioError> {
        self.voice_mut(handle)?.paused = true;
        Ok(())
    }

    fn resume(&mut self, handle: SoundHandle) -> Result<(), AudioError> {
        self.voice_mut(handle)?.paused = false;
        Ok(())
    }

    fn stop(&mut self, handle: SoundHandle) -> Result<(), AudioError> {
        self.voices.remove(&handle);
        Ok(())
    }

    fn set_volume(&mut self, handle: SoundHandle, volume: f32) -> Result<(), AudioError> {
        self.voice_mut(handle)?.volume = volume;
        Ok(())
    }

    fn get_volume(&self, handle: SoundHandle) -> Result<f32, AudioError> {
        self.voices
            .get(&handle)
            .map(|voice| voice.volume)
            .ok_or(AudioError::InvalidHandle)
    }

    fn is_playing(&self, handle: SoundHandle) -> bool {
        self.voices.get(&handle).is_some_and(|voice| !voice.paused)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioFormat;

    fn sound() -> SoundResource {
        SoundResource::new("boom.caf", b"caff".to_vec(), AudioFormat::Caf)
    }

    #[test]
    fn test_playback_without_start() {
        let mut backend = NullBackend::new();
        let result = backend.play(&sound(), PlaybackSettings::default());
        assert!(matches!(result, Err(AudioError::BackendNotInitialized)));
    }

    #[test]
    fn test_voice_lifecycle() {
        let mut backend = NullBackend::new();
        backend.start().unwrap();

        let handle = backend.play(&sound(), PlaybackSettings::default()).unwrap();
        assert!(backend.is_playing(handle));
        assert_eq!(backend.sound_name(handle), Some("boom.caf"));

        backend.pause(handle).unwrap();
        assert!(!backend.is_playing(handle));
        backend.update();
        assert_eq!(backend.active_voices(), 1, "paused voices survive update");

        backend.resume(handle).unwrap();
        backend.update();
        assert_eq!(backend.active_voices(), 0, "one-shot voices finish at update");
        assert!(matches!(backend.pause(handle), Err(AudioError::InvalidHandle)));
        assert!(backend.stop(handle).is_ok());
    }

    #[test]
    fn test_looping_voice_and_volume() {
        let mut backend = NullBackend::new();
        backend.start().unwrap();

        let settings = PlaybackSettings { volume: 0.25, looping: true };
        let handle = backend.play(&sound(), settings).unwrap();
        backend.update();
        assert!(backend.is_playing(handle));
        assert_eq!(backend.get_volume(handle).unwrap(), 0.25);

        backend.set_volume(handle, 0.5).unwrap();
        assert_eq!(backend.get_volume(handle).unwrap(), 0.5);

        backend.shutdown();
        assert!(!backend.is_running());
        assert_eq!(backend.active_voices(), 0);
        assert_eq!(backend.voices_started(), 1);
    }
}
