//! Sound clip asset
//!
//! A [`SoundResource`] keeps the encoded file bytes; the playback backend
//! decodes them each time a voice starts. Loading only checks that the bytes
//! look like a known audio container.

use std::sync::Arc;

use crate::assets::{Asset, AssetError};

/// Encoded sound clip
#[derive(Debug, Clone)]
pub struct SoundResource {
    /// Name the clip was loaded under
    name: String,
    /// Raw audio file data (encoded format)
    data: Arc<[u8]>,
    /// Container format detected from the data
    format: AudioFormat,
}

/// Supported audio formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    /// Core Audio Format
    Caf,
    /// WAV uncompressed
    Wav,
    /// OGG Vorbis compressed
    Ogg,
    /// MP3 compressed
    Mp3,
    /// FLAC lossless
    Flac,
    /// AIFF uncompressed
    Aiff,
    /// Unknown format
    Unknown,
}

impl SoundResource {
    /// Create a sound from bytes whose format is already known
    pub fn new<S: Into<String>>(name: S, data: Vec<u8>, format: AudioFormat) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
            format,
        }
    }

    /// Validate file bytes and wrap them as a named sound
    ///
    /// # Errors
    /// - `InvalidData` if `bytes` is empty
    /// - `UnsupportedFormat` if the container is not recognized
    pub fn from_file<S: Into<String>>(name: S, bytes: &[u8]) -> Result<Self, AssetError> {
        let mut sound = Self::from_bytes(bytes)?;
        sound.name = name.into();
        Ok(sound)
    }

    /// Name the clip was loaded under
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the raw audio data
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Shared handle to the raw audio data
    pub fn shared_data(&self) -> Arc<[u8]> {
        Arc::clone(&self.data)
    }

    /// Detected container format
    pub fn format(&self) -> AudioFormat {
        self.format
    }

    /// Detect audio format from magic bytes
    fn detect_format(bytes: &[u8]) -> AudioFormat {
        if bytes.len() < 4 {
            return AudioFormat::Unknown;
        }

        match &bytes[0..4] {
            b"caff" => AudioFormat::Caf,
            b"RIFF" => AudioFormat::Wav,
            b"OggS" => AudioFormat::Ogg,
            b"fLaC" => AudioFormat::Flac,
            b"FORM" => AudioFormat::Aiff,
            // MP3 can start with ID3 tag or frame sync
            [0xFF, 0xFB | 0xFA | 0xF3 | 0xF2, _, _] => AudioFormat::Mp3,
            [b'I', b'D', b'3', _] => AudioFormat::Mp3,
            _ => AudioFormat::Unknown,
        }
    }
}

impl Asset for SoundResource {
    fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError>
    where
        Self: Sized,
    {
        if bytes.is_empty() {
            return Err(AssetError::InvalidData("Empty audio file".to_string()));
        }

        let format = Self::detect_format(bytes);
        if format == AudioFormat::Unknown {
            return Err(AssetError::UnsupportedFormat("Unknown audio format".to_string()));
        }

        // Decoding happens in the backend when a voice starts
        Ok(Self::new(String::new(), bytes.to_vec(), format))
    }
}
