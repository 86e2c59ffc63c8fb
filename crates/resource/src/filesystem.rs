//! Reads template assets from a directory on disk.
//!
//! Asset identifiers are relative paths below the template directory.
//! Identifiers that would resolve outside of it are reported as missing.

use labelgrid_traits::{ResourceError, ResourceProvider, SharedResourceData};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// A resource provider rooted at a template directory.
#[derive(Debug)]
pub struct FilesystemResourceProvider {
    root: PathBuf,
    /// Canonical form of `root`, when it exists at construction time.
    canonical_root: Option<PathBuf>,
}

impl FilesystemResourceProvider {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();
        let canonical_root = root.canonicalize().ok();
        Self {
            root,
            canonical_root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves an asset identifier, or `None` if it leaves the template directory.
    fn resolve(&self, asset: &str) -> Option<PathBuf> {
        let relative = Path::new(asset);
        if relative.is_absolute()
            || relative
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            return None;
        }

        let joined = self.root.join(relative);
        match (joined.canonicalize(), &self.canonical_root) {
            (Ok(resolved), Some(root)) if resolved.starts_with(root) => Some(resolved),
            // A symlink pointing out of the directory.
            (Ok(_), Some(_)) => None,
            _ => Some(joined),
        }
    }
}

impl ResourceProvider for FilesystemResourceProvider {
    fn load(&self, asset: &str) -> Result<SharedResourceData, ResourceError> {
        let path = self.resolve(asset).ok_or_else(|| {
            log::warn!("Rejected template asset outside {}: {}", self.root.display(), asset);
            ResourceError::NotFound(format!("{} (outside template directory)", asset))
        })?;

        log::debug!("Loading template asset {}", path.display());
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Arc::new(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ResourceError::NotFound(asset.to_string()))
            }
            Err(e) => Err(ResourceError::LoadFailed {
                path: asset.to_string(),
                message: e.to_string(),
            }),
        }
    }

    fn exists(&self, asset: &str) -> bool {
        self.resolve(asset).is_some_and(|p| p.is_file())
    }

    fn name(&self) -> &'static str {
        "filesystem"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_loads_template_asset_as_text() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("horizontal.xml"), "<document/>").unwrap();

        let provider = FilesystemResourceProvider::new(dir.path());
        assert!(provider.exists("horizontal.xml"));
        assert_eq!(provider.load_text("horizontal.xml").unwrap(), "<document/>");
    }

    #[test]
    fn test_missing_asset_is_not_found() {
        let dir = tempdir().unwrap();
        let provider = FilesystemResourceProvider::new(dir.path());
        assert!(matches!(provider.load("mini.xml"), Err(ResourceError::NotFound(_))));
        assert!(!provider.exists("mini.xml"));
    }

    #[test]
    fn test_directories_are_not_assets() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("kinds")).unwrap();
        let provider = FilesystemResourceProvider::new(dir.path());
        assert!(!provider.exists("kinds"));
    }

    #[test]
    fn test_rejects_paths_leaving_the_directory() {
        let dir = tempdir().unwrap();
        let provider = FilesystemResourceProvider::new(dir.path());

        for asset in ["../secret.xml", "kinds/../../secret.xml", "/etc/passwd", ".."] {
            assert!(provider.load(asset).is_err(), "{asset} should be rejected");
            assert!(!provider.exists(asset));
        }
    }

    #[test]
    fn test_nested_assets_resolve() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("kinds")).unwrap();
        fs::write(dir.path().join("kinds").join("double.xml"), b"<document/>").unwrap();

        let provider = FilesystemResourceProvider::new(dir.path());
        assert_eq!(&*provider.load("kinds/double.xml").unwrap(), b"<document/>");
    }
}
