//! Audio system
//!
//! - [`SoundResource`]: an encoded clip read from the bundle
//! - [`SoundLibrary`]: lazily scanned name -> clip cache with fallback loads
//! - [`SoundChannel`]: caller-owned playback handle for one clip
//! - [`backend`]: the playback engine seam

pub mod asset;
pub mod backend;
pub mod channel;
pub mod library;

pub use asset::{AudioFormat, SoundResource};
pub use backend::{SoundHandle, PlaybackSettings};
pub use channel::SoundChannel;
pub use library::SoundLibrary;

use thiserror::Error;

/// Audio playback errors
#[derive(Error, Debug)]
pub enum AudioError {
    /// Backend has not been started
    #[error("Audio backend not initialized")]
    BackendNotInitialized,

    /// Backend could not be started
    #[error("Audio backend initialization failed: {0}")]
    BackendInitFailed(String),

    /// Sound could not be played
    #[error("Playback failed: {0}")]
    PlaybackFailed(String),

    /// Handle does not refer to an active sound
    #[error("Invalid sound handle")]
    InvalidHandle,
}
