//! Cache-level error type
//!
//! Failures a caller sees when it asks for one specific resource: the
//! atlas descriptor, or a sound that has to be loaded on the fallback path.

use crate::assets::AssetError;
use crate::audio::AudioError;
use thiserror::Error;

/// Errors surfaced by the atlas cache and the sound library
#[derive(Error, Debug)]
pub enum MediaError {
    /// The resource is missing or could not be read
    #[error("Failed to load resource '{name}': {source}")]
    ResourceLoad {
        /// Name the caller asked for
        name: String,
        /// Underlying asset error
        #[source]
        source: AssetError,
    },

    /// The resource was read but its bytes are malformed
    #[error("Failed to decode resource '{name}': {source}")]
    ResourceDecode {
        /// Name the caller asked for
        name: String,
        /// Underlying asset error
        #[source]
        source: AssetError,
    },

    /// The audio subsystem could not be started
    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),
}

impl MediaError {
    /// Wrap an asset error, classifying it as a load or a decode failure
    pub(crate) fn from_asset(name: &str, source: AssetError) -> Self {
        let name = name.to_string();
        if source.is_decode_failure() {
            Self::ResourceDecode { name, source }
        } else {
            Self::ResourceLoad { name, source }
        }
    }

    /// Whether the resource was missing or unreadable
    pub fn is_load_failure(&self) -> bool {
        matches!(self, Self::ResourceLoad { .. })
    }

    /// Whether the resource bytes were malformed
    pub fn is_decode_failure(&self) -> bool {
        matches!(self, Self::ResourceDecode { .. })
    }
}
