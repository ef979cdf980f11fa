// Loaded art shared by every round: both fighters' sprite sets and the
// background. Loaded once at startup and cloned into each new round.

use std::sync::Arc;

use glam::Vec2;
use image::RgbaImage;
use log::{info, warn};

use crate::engine::assets::AssetManager;
use crate::game::characters::{SpriteSet, SpriteSetConfig};
use crate::game::config::ArenaConfig;
use crate::game::sprite::Sprite;

#[derive(Debug, Clone)]
pub struct Roster {
    pub player: SpriteSet,
    pub enemy: SpriteSet,
    pub background: Option<Arc<RgbaImage>>,
}

impl Roster {
    /// Load every strip the two fighters use. Missing files are logged and
    /// leave the affected sprite invisible.
    pub fn load(assets: &mut AssetManager, arena: &ArenaConfig) -> Self {
        let player = SpriteSet::load(assets, &SpriteSetConfig::PLAYER);
        let enemy = SpriteSet::load(assets, &SpriteSetConfig::ENEMY);

        let background = arena.background.and_then(|name| match assets.load_image(name) {
            Ok(image) => Some(image),
            Err(e) => {
                warn!("Background {} unavailable: {}", name, e);
                None
            }
        });

        info!("Roster loaded: {} images cached", assets.stats().image_count);

        Self {
            player,
            enemy,
            background,
        }
    }

    /// Frame counts only; used when no art is available
    pub fn blank() -> Self {
        Self {
            player: SpriteSet::blank(&SpriteSetConfig::PLAYER),
            enemy: SpriteSet::blank(&SpriteSetConfig::ENEMY),
            background: None,
        }
    }

    /// Single-frame sprite covering the canvas from the top-left corner
    pub fn background_sprite(&self) -> Sprite {
        Sprite::new(Vec2::ZERO, self.background.clone(), 1)
    }
}
