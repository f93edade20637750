//! Audio backend implementations
//!
//! Platform-independent abstraction over audio playback libraries.

pub mod null_backend;
#[cfg(feature = "rodio")]
pub mod rodio_backend;

pub use null_backend::NullBackend;
#[cfg(feature = "rodio")]
pub use rodio_backend::RodioBackend;

use std::cell::RefCell;
use std::rc::Rc;

use crate::audio::{AudioError, SoundResource};

/// Backend shared between the sound library and the channels it hands out
///
/// Single-threaded, like the backends themselves.
pub type SharedBackend = Rc<RefCell<dyn AudioBackend>>;

/// Sound handle for tracking active sounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundHandle {
    /// Unique identifier for the sound
    pub id: u32,
    /// Generation counter for handle validation
    pub generation: u32,
}

impl SoundHandle {
    /// Create a new sound handle
    pub const fn new(id: u32, generation: u32) -> Self {
        Self { id, generation }
    }
}

/// How a voice should be started
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSettings {
    /// Volume level (0.0 = silent, 1.0 = full volume)
    pub volume: f32,
    /// Restart from the beginning when the clip ends
    pub looping: bool,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            volume: 1.0,
            looping: false,
        }
    }
}

/// Audio backend trait for platform abstraction
///
/// # Threading
/// NOT Send + Sync: the caches that drive it are single-threaded.
pub trait AudioBackend {
    /// Start the audio subsystem
    ///
    /// Starting an already running backend succeeds without doing anything.
    fn start(&mut self) -> Result<(), AudioError>;

    /// Stop every voice and shut the audio subsystem down
    fn shutdown(&mut self);

    /// Check if backend is running
    fn is_running(&self) -> bool;

    /// Update the backend (cleanup finished sounds, etc.)
    fn update(&mut self);

    /// Stop all playing sounds
    fn stop_all(&mut self);

    /// Start a new voice playing `sound`
    fn play(&mut self, sound: &SoundResource, settings: PlaybackSettings) -> Result<SoundHandle, AudioError>;

    /// Pause a playing sound
    fn pause(&mut self, handle: SoundHandle) -> Result<(), AudioError>;

    /// Resume a paused sound
    fn resume(&mut self, handle: SoundHandle) -> Result<(), AudioError>;

    /// Stop a sound; succeeds for handles that are already gone
    fn stop(&mut self, handle: SoundHandle) -> Result<(), AudioError>;

    /// Set volume of a sound
    fn set_volume(&mut self, handle: SoundHandle, volume: f32) -> Result<(), AudioError>;

    /// Get volume of a sound
    fn get_volume(&self, handle: SoundHandle) -> Result<f32, AudioError>;

    /// Check if a sound is playing (started, not paused, not finished)
    fn is_playing(&self, handle: SoundHandle) -> bool;
}

/// Create the default audio backend for the build
///
/// Real playback with the `rodio` feature, a silent backend otherwise. The
/// backend is returned stopped; the sound library starts it on first use.
pub fn create_backend() -> SharedBackend {
    #[cfg(feature = "rodio")]
    {
        Rc::new(RefCell::new(RodioBackend::new()))
    }
    #[cfg(not(feature = "rodio"))]
    {
        Rc::new(RefCell::new(NullBackend::new()))
    }
}
