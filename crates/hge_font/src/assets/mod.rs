//! Asset loading
//!
//! The font subsystem never touches the filesystem directly. Descriptor and
//! bitmap bytes come from a [`ResourceLoader`], so hosts can serve them from
//! disk, archives or memory.

pub mod image_loader;

pub use image_loader::ImageData;

use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

/// Source of raw resource bytes
pub trait ResourceLoader {
    /// Load the full contents of a resource
    ///
    /// Returns [`AssetError::NotFound`] when no resource exists under `path`.
    fn load(&self, path: &str) -> Result<Vec<u8>, AssetError>;
}

impl<T: ResourceLoader + ?Sized> ResourceLoader for &T {
    fn load(&self, path: &str) -> Result<Vec<u8>, AssetError> {
        (**self).load(path)
    }
}

/// Loads resources from disk through an ordered list of search paths
#[derive(Debug, Clone, Default)]
pub struct FileResourceLoader {
    search_paths: Vec<PathBuf>,
}

impl FileResourceLoader {
    /// Create a loader that tries each search path in order
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self { search_paths }
    }

    fn resolve(&self, path: &str) -> Option<PathBuf> {
        for search_path in &self.search_paths {
            let candidate = search_path.join(path);
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        // If not found in search paths, try as given
        let raw = PathBuf::from(path);
        raw.is_file().then_some(raw)
    }
}

impl ResourceLoader for FileResourceLoader {
    fn load(&self, path: &str) -> Result<Vec<u8>, AssetError> {
        let file_path = self
            .resolve(path)
            .ok_or_else(|| AssetError::NotFound(path.to_string()))?;

        log::debug!("Loading resource {} from {:?}", path, file_path);
        Ok(std::fs::read(&file_path)?)
    }
}

/// In-memory resource store, useful for tests and embedded assets
#[derive(Debug, Clone, Default)]
pub struct MemoryResourceLoader {
    resources: HashMap<String, Vec<u8>>,
}

impl MemoryResourceLoader {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a resource
    pub fn insert(&mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.resources.insert(path.into(), bytes.into());
    }

    /// Builder-style variant of [`insert`](Self::insert)
    #[must_use]
    pub fn with(mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(path, bytes);
        self
    }
}

impl ResourceLoader for MemoryResourceLoader {
    fn load(&self, path: &str) -> Result<Vec<u8>, AssetError> {
        self.resources
            .get(path)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(path.to_string()))
    }
}

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset not found
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// Failed to load asset
    #[error("Failed to load asset: {0}")]
    LoadFailed(String),

    /// Invalid asset data
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Failed to write an output image
    #[error("Failed to write asset: {0}")]
    WriteFailed(String),

    /// IO error during asset loading
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
