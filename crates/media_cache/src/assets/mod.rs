//! Asset access
//!
//! The caches never touch the file system directly. Every read goes through
//! an [`AssetProvider`], which hands out raw bytes; turning those bytes into
//! an atlas or a sound clip is the job of the [`Asset`] implementations.

pub mod fs_provider;

pub use fs_provider::FsAssetProvider;

use std::path::Path;
use thiserror::Error;

/// Asset trait for loadable resources
pub trait Asset: Send + Sync + 'static {
    /// Load asset from raw bytes
    fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> where Self: Sized;
}

/// One file reported by [`AssetProvider::enumerate`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetEntry {
    /// Canonical path relative to the provider root (see [`canonical_path`])
    pub path: String,
    /// Lower-cased file extension without the dot, if any
    pub extension: Option<String>,
}

impl AssetEntry {
    /// Build an entry from any relative path, canonicalizing it
    pub fn new(path: &str) -> Self {
        let path = canonical_path(path);
        let extension = Path::new(&path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        Self { path, extension }
    }

    /// Whether the entry's extension matches `extension` (case-insensitive)
    pub fn has_extension(&self, extension: &str) -> bool {
        self.extension
            .as_deref()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension.trim_start_matches('.')))
    }
}

/// Read-only access to bundled assets
///
/// Paths are relative to the provider's root and use `/` as separator.
pub trait AssetProvider {
    /// Load the descriptor resource with a well-known name
    fn load_descriptor(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        self.load_file(name)
    }

    /// Recursively list every file below `directory` ("" = the root)
    ///
    /// A directory that does not exist yields an empty list.
    fn enumerate(&self, directory: &str) -> Result<Vec<AssetEntry>, AssetError>;

    /// Load the bytes of one file
    fn load_file(&self, path: &str) -> Result<Vec<u8>, AssetError>;
}

/// Normalize an asset path to the form used as cache key
///
/// Backslashes become `/`; empty and `.` segments are dropped, which also
/// strips leading `./` and `/`. `..` segments are kept so providers can
/// reject them.
pub fn canonical_path(path: &str) -> String {
    path.split(|c| c == '/' || c == '\\')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset not found
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// Path leaves the asset root or is otherwise unusable
    #[error("Invalid asset path: {0}")]
    InvalidPath(String),

    /// Invalid asset data
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Unsupported asset format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// IO error during asset loading
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AssetError {
    /// Whether the bytes were present but malformed
    pub fn is_decode_failure(&self) -> bool {
        matches!(self, Self::InvalidData(_) | Self::UnsupportedFormat(_))
    }
}
