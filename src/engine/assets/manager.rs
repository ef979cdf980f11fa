// Central asset management system

use super::{AssetError, AssetId, AssetLoader, AssetType};
use image::RgbaImage;
use log::{debug, info};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Central asset manager for the game
///
/// Decodes every image once and hands out shared references, so both
/// fighters and the background can hold on to their frames without copying.
pub struct AssetManager {
    loader: AssetLoader,

    /// Decoded images
    images: HashMap<AssetId, Arc<RgbaImage>>,

    /// Path to ID mapping for images
    image_paths: HashMap<String, AssetId>,
}

impl AssetManager {
    pub fn new<P: AsRef<Path>>(asset_path: P) -> Self {
        Self {
            loader: AssetLoader::new(asset_path),
            images: HashMap::new(),
            image_paths: HashMap::new(),
        }
    }

    /// Load and decode an image, returning the cached copy when it was
    /// loaded before
    pub fn load_image(&mut self, name: &str) -> Result<Arc<RgbaImage>, AssetError> {
        if let Some(image) = self.get_image(name) {
            return Ok(image);
        }

        let bytes = self.loader.load_bytes(AssetType::Image, name)?;
        let image = image::load_from_memory(&bytes)
            .map_err(|source| AssetError::Decode {
                name: name.to_string(),
                source,
            })?
            .to_rgba8();

        debug!("Loaded image {} ({}x{})", name, image.width(), image.height());
        Ok(self.insert_image(name, image))
    }

    /// Load a horizontally mirrored sprite sheet. When `name` does not exist
    /// on disk it is derived by flipping `mirror_of`.
    pub fn load_mirrored(
        &mut self,
        name: &str,
        mirror_of: &str,
    ) -> Result<Arc<RgbaImage>, AssetError> {
        match self.load_image(name) {
            Ok(image) => Ok(image),
            Err(AssetError::NotFound(_)) => {
                let source = self.load_image(mirror_of)?;
                let flipped = image::imageops::flip_horizontal(source.as_ref());
                info!("Derived {} by mirroring {}", name, mirror_of);
                Ok(self.insert_image(name, flipped))
            }
            Err(e) => Err(e),
        }
    }

    /// Store an already decoded image under `name`, replacing any previous one
    pub fn insert_image(&mut self, name: &str, image: RgbaImage) -> Arc<RgbaImage> {
        let id = AssetId::from_path(name);
        let image = Arc::new(image);
        self.images.insert(id, image.clone());
        self.image_paths.insert(name.to_string(), id);
        image
    }

    pub fn get_image(&self, name: &str) -> Option<Arc<RgbaImage>> {
        self.image_paths
            .get(name)
            .and_then(|id| self.images.get(id))
            .cloned()
    }

    #[cfg(test)]
    pub fn asset_exists(&self, name: &str) -> bool {
        self.image_paths.contains_key(name) || self.loader.exists(AssetType::Image, name)
    }

    /// Get statistics about loaded assets
    pub fn stats(&self) -> AssetStats {
        AssetStats {
            image_count: self.images.len(),
        }
    }

    pub fn loader(&self) -> &AssetLoader {
        &self.loader
    }
}

/// Statistics about loaded assets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetStats {
    pub image_count: usize,
}
