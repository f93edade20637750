//! File-system asset provider
//!
//! Serves assets from one or more search paths, the first path holding a
//! file wins. Directory scans walk every search path and merge the results.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{canonical_path, AssetEntry, AssetError, AssetProvider};

/// Asset provider backed by directories on disk
#[derive(Debug, Clone)]
pub struct FsAssetProvider {
    search_paths: Vec<PathBuf>,
}

impl FsAssetProvider {
    /// Create a provider rooted at a single directory
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            search_paths: vec![root.into()],
        }
    }

    /// Create a provider over several search paths, tried in order
    pub fn with_search_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            search_paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// The configured search paths
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Canonicalize a relative asset path, refusing anything that escapes the root
    fn relative(path: &str) -> Result<String, AssetError> {
        let canonical = canonical_path(path);
        // Drive prefixes ("C:") would replace the root when joined
        if canonical.split('/').any(|segment| segment == ".." || segment.contains(':'))
            || Path::new(&canonical).has_root()
        {
            return Err(AssetError::InvalidPath(path.to_string()));
        }
        Ok(canonical)
    }

    /// Find the first search path that holds `relative` as a file
    fn locate(&self, relative: &str) -> Option<PathBuf> {
        self.search_paths
            .iter()
            .map(|root| root.join(relative))
            .find(|candidate| candidate.is_file())
    }

    fn walk(root: &Path, directory: &str, found: &mut BTreeMap<String, AssetEntry>) {
        let start = root.join(directory);
        if !start.is_dir() {
            return;
        }

        for entry in WalkDir::new(&start)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
        {
            let Ok(rel_path) = entry.path().strip_prefix(root) else {
                continue;
            };
            let asset = AssetEntry::new(&rel_path.to_string_lossy());
            found.entry(asset.path.clone()).or_insert(asset);
        }
    }
}

impl AssetProvider for FsAssetProvider {
    fn enumerate(&self, directory: &str) -> Result<Vec<AssetEntry>, AssetError> {
        let directory = Self::relative(directory)?;
        let mut found = BTreeMap::new();
        for root in &self.search_paths {
            Self::walk(root, &directory, &mut found);
        }
        log::debug!("Enumerated {} file(s) under '{}'", found.len(), directory);
        Ok(found.into_values().collect())
    }

    fn load_file(&self, path: &str) -> Result<Vec<u8>, AssetError> {
        let relative = Self::relative(path)?;
        if relative.is_empty() {
            return Err(AssetError::InvalidPath(path.to_string()));
        }

        let full_path = self
            .locate(&relative)
            .ok_or_else(|| AssetError::NotFound(path.to_string()))?;

        fs::read(&full_path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => AssetError::NotFound(path.to_string()),
            _ => AssetError::IoError(e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(root: &Path, relative: &str, contents: &[u8]) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_enumerate_is_recursive_and_relative_to_root() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "boom.caf", b"caff");
        write(dir.path(), "sfx/ui/click.CAF", b"caff");
        write(dir.path(), "atlas.xml", b"<TextureAtlas/>");

        let provider = FsAssetProvider::new(dir.path());
        let entries = provider.enumerate("").unwrap();
        let paths: Vec<&str> = entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["atlas.xml", "boom.caf", "sfx/ui/click.CAF"]);
        assert_eq!(entries[2].extension.as_deref(), Some("caf"));

        let sfx = provider.enumerate("./sfx").unwrap();
        assert_eq!(sfx.len(), 1);
        assert_eq!(sfx[0].path, "sfx/ui/click.CAF");
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FsAssetProvider::new(dir.path().join("nowhere"));
        assert!(provider.enumerate("").unwrap().is_empty());
    }

    #[test]
    fn test_search_paths_first_match_wins() {
        let base = tempfile::tempdir().unwrap();
        let dlc = tempfile::tempdir().unwrap();
        write(base.path(), "boom.caf", b"base");
        write(dlc.path(), "boom.caf", b"dlc");
        write(dlc.path(), "extra.caf", b"extra");

        let provider = FsAssetProvider::with_search_paths([dlc.path(), base.path()]);
        assert_eq!(provider.load_file("boom.caf").unwrap(), b"dlc");
        assert_eq!(provider.load_file("./extra.caf").unwrap(), b"extra");
        assert_eq!(provider.enumerate("").unwrap().len(), 2);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FsAssetProvider::new(dir.path());
        assert!(matches!(provider.load_file("missing.caf"), Err(AssetError::NotFound(_))));
        assert!(matches!(provider.load_descriptor("atlas.xml"), Err(AssetError::NotFound(_))));
    }

    #[test]
    fn test_escaping_paths_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FsAssetProvider::new(dir.path());
        assert!(matches!(provider.load_file("../etc/passwd"), Err(AssetError::InvalidPath(_))));
        assert!(matches!(provider.load_file("C:\\secret.caf"), Err(AssetError::InvalidPath(_))));
        assert!(matches!(provider.load_file("sfx/c:boom.caf"), Err(AssetError::InvalidPath(_))));
        assert!(matches!(provider.enumerate("D:"), Err(AssetError::InvalidPath(_))));
        assert!(matches!(provider.enumerate("sfx/../.."), Err(AssetError::InvalidPath(_))));
        assert!(matches!(provider.load_file(""), Err(AssetError::InvalidPath(_))));
    }
}
