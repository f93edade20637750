//! Texture atlas system
//!
//! Parses `TextureAtlas` descriptors and caches the single atlas a game
//! draws its sprites from.

pub mod cache;
pub mod descriptor;
pub mod texture_atlas;

pub use cache::AtlasCache;
pub use descriptor::{AtlasData, AtlasParser, SubTextureData};
pub use texture_atlas::{Atlas, Rectangle, Texture};
