//! # Media Cache
//!
//! Lazily loaded resource caches for 2D games: one texture atlas and one
//! library of sound clips, both read from bundled assets.
//!
//! ## Features
//!
//! - **Atlas Cache**: exact-name and prefix sub-texture lookups over a
//!   Sparrow-style `TextureAtlas` descriptor
//! - **Sound Library**: directory scan preloading, fire-and-forget playback,
//!   playback channels, uncached fallback loads
//! - **Pluggable Collaborators**: asset access through [`assets::AssetProvider`],
//!   playback through [`audio::backend::AudioBackend`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use media_cache::prelude::*;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! fn main() -> Result<(), MediaError> {
//!     let backend: SharedBackend = Rc::new(RefCell::new(NullBackend::new()));
//!     let mut media = Media::new(MediaConfig::default(), backend);
//!
//!     if let Some(frames) = media.atlas().textures_with_prefix("explosion_") {
//!         println!("{} explosion frames", frames.len());
//!     }
//!     media.sounds().play("boom.caf")?;
//!
//!     media.release_all();
//!     Ok(())
//! }
//! ```
//!
//! ## Threading
//!
//! The caches are single-threaded: every lazy-initializing operation takes
//! `&mut self`, and the provider and backend are shared through `Rc`. A host
//! that needs the caches on several threads must wrap each one in its own
//! mutex.

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod assets;
pub mod atlas;
pub mod audio;

mod error;
mod media;

#[cfg(test)]
mod testing;

pub use error::MediaError;
pub use media::Media;

/// Common imports for cache users
pub mod prelude {
    pub use crate::{
        Media, MediaError,
        assets::{AssetProvider, AssetError, FsAssetProvider},
        atlas::{Atlas, AtlasCache, Texture, Rectangle},
        audio::{
            AudioError, SoundChannel, SoundLibrary, SoundResource,
            backend::{AudioBackend, NullBackend, SharedBackend},
        },
        config::{Config, MediaConfig},
    };
}
