//! Rodio audio backend implementation
//!
//! Uses the Rodio library for cross-platform audio playback.
//! Rodio is pure Rust and supports WAV, OGG Vorbis, MP3, and FLAC formats.
//!
//! Rodio cannot decode CAF or AIFF containers. Those clips are refused with
//! [`AudioError::PlaybackFailed`] before a sink is created; a bundle that
//! ships `.caf` clips needs `audio_extension` pointed at a format listed
//! above, or another backend.
//!
//! # Example
//!
//! ```no_run
//! use media_cache::assets::Asset;
//! use media_cache::audio::SoundResource;
//! use media_cache::audio::backend::{AudioBackend, PlaybackSettings, RodioBackend};
//!
//! let mut backend = RodioBackend::new();
//! backend.start().unwrap();
//!
//! let bytes = std::fs::read("resources/explosion.wav").unwrap();
//! let sound = SoundResource::from_bytes(&bytes).unwrap();
//! let handle = backend.play(&sound, PlaybackSettings::default()).unwrap();
//!
//! backend.set_volume(handle, 0.5).unwrap();
//! backend.update(); // Removes finished sounds
//! backend.shutdown();
//! ```

use super::{AudioBackend, PlaybackSettings, SoundHandle};
use crate::audio::{AudioError, AudioFormat, SoundResource};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::collections::HashMap;
use std::io::Cursor;

/// Rodio-based audio backend
pub struct RodioBackend {
    /// Audio output stream (must be kept alive)
    _output_stream: Option<OutputStream>,
    /// Output stream handle for creating sinks
    stream_handle: Option<OutputStreamHandle>,
    /// Active sound sinks
    active_sounds: HashMap<SoundHandle, Sink>,
    /// Next sound ID for handle generation
    next_id: u32,
}

impl RodioBackend {
    /// Create a new, stopped Rodio backend
    pub fn new() -> Self {
        Self {
            _output_stream: None,
            stream_handle: None,
            active_sounds: HashMap::new(),
            next_id: 0,
        }
    }

    /// Generate a new sound handle
    fn next_handle(&mut self) -> SoundHandle {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        SoundHandle::new(id, 0)
    }

    fn sink(&self, handle: SoundHandle) -> Result<&Sink, AudioError> {
        self.active_sounds.get(&handle).ok_or(AudioError::InvalidHandle)
    }
}

impl AudioBackend for RodioBackend {
    fn start(&mut self) -> Result<(), AudioError> {
        if self.stream_handle.is_some() {
            return Ok(());
        }

        // Create output stream
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| AudioError::BackendInitFailed(format!("Failed to create audio output: {}", e)))?;

        self._output_stream = Some(stream);
        self.stream_handle = Some(stream_handle);

        log::info!("Rodio audio backend initialized");
        Ok(())
    }

    fn shutdown(&mut self) {
        if self.stream_handle.is_none() {
            return;
        }

        self.stop_all();

        // Drop stream handle and output
        self.stream_handle = None;
        self._output_stream = None;

        log::info!("Rodio audio backend shutdown");
    }

    fn is_running(&self) -> bool {
        self.stream_handle.is_some()
    }

    fn update(&mut self) {
        // Remove finished sounds
        self.active_sounds.retain(|_handle, sink| !sink.empty());
    }

    fn stop_all(&mut self) {
        for (_handle, sink) in self.active_sounds.drain() {
            sink.stop();
        }
    }

    fn play(&mut self, sound: &SoundResource, settings: PlaybackSettings) -> Result<SoundHandle, AudioError> {
        if matches!(sound.format(), AudioFormat::Caf | AudioFormat::Aiff) {
            return Err(AudioError::PlaybackFailed(format!(
                "'{}': {:?} clips are not supported by rodio",
                sound.name(),
                sound.format()
            )));
        }

        let stream_handle = self.stream_handle.as_ref()
            .ok_or(AudioError::BackendNotInitialized)?;

        let sink = Sink::try_new(stream_handle)
            .map_err(|e| AudioError::PlaybackFailed(format!("Failed to create sink: {}", e)))?;

        let source = Decoder::new(Cursor::new(sound.shared_data()))
            .map_err(|e| AudioError::PlaybackFailed(format!("Failed to decode '{}': {}", sound.name(), e)))?;

        sink.set_volume(settings.volume);
        if settings.looping {
            sink.append(source.repeat_infinite());
        } else {
            sink.append(source);
        }

        let handle = self.next_handle();
        self.active_sounds.insert(handle, sink);
        Ok(handle)
    }

    fn pause(&mut self, handle: SoundHandle) -> Result<(), AudioError> {
        self.sink(handle)?.pause();
        Ok(())
    }

    fn resume(&mut self, handle: SoundHandle) -> Result<(), AudioError> {
        self.sink(handle)?.play();
        Ok(())
    }

    fn stop(&mut self, handle: SoundHandle) -> Result<(), AudioError> {
        if let Some(sink) = self.active_sounds.remove(&handle) {
            sink.stop();
        }
        Ok(())
    }

    fn set_volume(&mut self, handle: SoundHandle, volume: f32) -> Result<(), AudioError> {
        self.sink(handle)?.set_volume(volume);
        Ok(())
    }

    fn get_volume(&self, handle: SoundHandle) -> Result<f32, AudioError> {
        Ok(self.sink(handle)?.volume())
    }

    fn is_playing(&self, handle: SoundHandle) -> bool {
        self.active_sounds.get(&handle)
            .is_some_and(|sink| !sink.is_paused() && !sink.empty())
    }
}

impl Default for RodioBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RodioBackend {
    fn drop(&mut self) {
        self.shutdown();
    }
}
