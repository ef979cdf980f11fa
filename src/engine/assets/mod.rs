// Asset management system
//
// Loads sprite images from disk once and caches them for the fighters,
// the background and the HUD.

mod handle;
mod loader;
mod manager;

pub use handle::AssetId;
pub use loader::{AssetLoader, AssetType};
pub use manager::{AssetManager, AssetStats};

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to decode image {name}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
