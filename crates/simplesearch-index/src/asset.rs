//! Loading of the companion search script.

use std::{
    future::Future,
    io,
    path::{Path, PathBuf},
};

use tracing::debug;

/// Path of the script shipped with this crate.
pub const BUNDLED_SCRIPT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/asset/simple-search.min.js");

/// Source of the companion script bytes.
///
/// Loading completes exactly once, with the bytes or an I/O error.
pub trait AssetLoader {
    /// Read the script.
    fn load(&self) -> impl Future<Output = io::Result<Vec<u8>>> + Send;

    /// Human-readable description of the source, used in errors.
    fn describe(&self) -> String;
}

/// Reads the script from the file system.
#[derive(Debug, Clone)]
pub struct FsAssetLoader {
    path: PathBuf,
}

impl FsAssetLoader {
    /// Load from the given path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the script bundled with this crate.
    #[must_use]
    pub fn bundled() -> Self {
        Self::new(BUNDLED_SCRIPT)
    }

    /// The file this loader reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FsAssetLoader {
    fn default() -> Self {
        Self::bundled()
    }
}

impl AssetLoader for FsAssetLoader {
    fn load(&self) -> impl Future<Output = io::Result<Vec<u8>>> + Send {
        let path = self.path.clone();
        async move {
            debug!(path = %path.display(), "reading search script");
            tokio::fs::read(&path).await
        }
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
