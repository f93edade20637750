//! Sound channels
//!
//! A channel is a caller-owned playback handle for one clip. Several
//! channels can play the same clip independently; each owns at most one
//! backend voice at a time and stops it when dropped.

use std::sync::Arc;

use super::backend::{PlaybackSettings, SharedBackend, SoundHandle};
use super::{AudioError, SoundResource};

/// Independent playback instance of a sound
pub struct SoundChannel {
    sound: Arc<SoundResource>,
    backend: SharedBackend,
    /// Voice currently owned by this channel
    voice: Option<SoundHandle>,
    paused: bool,
    volume: f32,
    looping: bool,
}

impl SoundChannel {
    pub(crate) fn new(sound: Arc<SoundResource>, backend: SharedBackend) -> Self {
        Self {
            sound,
            backend,
            voice: None,
            paused: false,
            volume: 1.0,
            looping: false,
        }
    }

    /// The clip this channel plays
    pub fn sound(&self) -> &SoundResource {
        &self.sound
    }

    /// Start or resume playback
    ///
    /// A paused channel resumes where it stopped; a playing channel is left
    /// alone; a stopped or finished channel starts again from the beginning.
    pub fn play(&mut self) -> Result<(), AudioError> {
        let mut backend = self.backend.borrow_mut();

        if let Some(voice) = self.voice {
            if self.paused {
                match backend.resume(voice) {
                    Ok(()) => {
                        self.paused = false;
                        return Ok(());
                    }
                    // The backend dropped the voice while paused (e.g. on shutdown)
                    Err(AudioError::InvalidHandle) => {}
                    Err(e) => return Err(e),
                }
            } else if backend.is_playing(voice) {
                return Ok(());
            }
            backend.stop(voice)?;
            self.voice = None;
            self.paused = false;
        }

        let settings = PlaybackSettings {
            volume: self.volume,
            looping: self.looping,
        };
        self.voice = Some(backend.play(&self.sound, settings)?);
        self.paused = false;
        Ok(())
    }

    /// Pause playback; does nothing if the channel is not playing
    pub fn pause(&mut self) -> Result<(), AudioError> {
        let Some(voice) = self.voice else {
            return Ok(());
        };
        let mut backend = self.backend.borrow_mut();
        if !self.paused && backend.is_playing(voice) {
            backend.pause(voice)?;
            self.paused = true;
        }
        Ok(())
    }

    /// Stop playback; the next [`play`](Self::play) starts from the beginning
    pub fn stop(&mut self) {
        if let Some(voice) = self.voice.take() {
            if let Err(e) = self.backend.borrow_mut().stop(voice) {
                log::debug!("Stopping '{}' failed: {}", self.sound.name(), e);
            }
        }
        self.paused = false;
    }

    /// Whether the channel's voice is audible right now
    pub fn is_playing(&self) -> bool {
        self.voice
            .is_some_and(|voice| self.backend.borrow().is_playing(voice))
    }

    /// Whether the channel is paused
    pub fn is_paused(&self) -> bool {
        self.voice.is_some() && self.paused
    }

    /// Current volume
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Set the volume (negative values are treated as 0.0)
    ///
    /// Applies to the running voice, if any, and to later plays.
    pub fn set_volume(&mut self, volume: f32) -> Result<(), AudioError> {
        self.volume = volume.max(0.0);
        if let Some(voice) = self.voice {
            let mut backend = self.backend.borrow_mut();
            match backend.set_volume(voice, self.volume) {
                // The voice finished on its own
                Err(AudioError::InvalidHandle) => self.voice = None,
                other => other?,
            }
        }
        Ok(())
    }

    /// Whether playback loops
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Loop the clip; takes effect the next time playback starts
    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }
}

impl Drop for SoundChannel {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for SoundChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundChannel")
            .field("sound", &self.sound.name())
            .field("voice", &self.voice)
            .field("paused", &self.paused)
            .field("volume", &self.volume)
            .field("looping", &self.looping)
            .finish()
    }
}
