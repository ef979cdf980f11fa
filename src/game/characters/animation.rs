// Sprite sheets of a fighter's four animations

use std::sync::Arc;

use image::RgbaImage;
use log::warn;

use super::state::AnimationState;
use crate::engine::assets::AssetManager;

/// Where one animation's strips live and how many frames they hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationConfig {
    /// Strip facing the fighter's spawn direction
    pub image: &'static str,
    /// Mirrored strip; derived from `image` when the file is missing
    pub flipped_image: &'static str,
    pub frames: usize,
}

/// Image configuration for all four animations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteSetConfig {
    pub idle: AnimationConfig,
    pub attack: AnimationConfig,
    pub take_hit: AnimationConfig,
    pub die: AnimationConfig,
}

impl SpriteSetConfig {
    pub const PLAYER: SpriteSetConfig = SpriteSetConfig {
        idle: AnimationConfig {
            image: "player/idle.png",
            flipped_image: "player/idle-flipped.png",
            frames: 6,
        },
        attack: AnimationConfig {
            image: "player/attack-1.png",
            flipped_image: "player/attack-1-flipped.png",
            frames: 8,
        },
        take_hit: AnimationConfig {
            image: "player/take-hit.png",
            flipped_image: "player/take-hit-flipped.png",
            frames: 4,
        },
        die: AnimationConfig {
            image: "player/death.png",
            flipped_image: "player/death-flipped.png",
            frames: 7,
        },
    };

    pub const ENEMY: SpriteSetConfig = SpriteSetConfig {
        idle: AnimationConfig {
            image: "enemy/idle.png",
            flipped_image: "enemy/idle-flipped.png",
            frames: 8,
        },
        attack: AnimationConfig {
            image: "enemy/attack-1.png",
            flipped_image: "enemy/attack-1-flipped.png",
            frames: 8,
        },
        take_hit: AnimationConfig {
            image: "enemy/take-hit.png",
            flipped_image: "enemy/take-hit-flipped.png",
            frames: 4,
        },
        die: AnimationConfig {
            image: "enemy/death.png",
            flipped_image: "enemy/death-flipped.png",
            frames: 5,
        },
    };

    pub fn get(&self, state: AnimationState) -> &AnimationConfig {
        match state {
            AnimationState::Idle => &self.idle,
            AnimationState::Attack => &self.attack,
            AnimationState::TakeHit => &self.take_hit,
            AnimationState::Die => &self.die,
        }
    }
}

/// One loaded animation: normal and mirrored strip plus frame count
#[derive(Debug, Clone)]
pub struct AnimationStrip {
    pub image: Option<Arc<RgbaImage>>,
    pub flipped_image: Option<Arc<RgbaImage>>,
    pub frames: usize,
}

impl AnimationStrip {
    fn blank(frames: usize) -> Self {
        Self {
            image: None,
            flipped_image: None,
            frames,
        }
    }

    /// Load both strips. Missing files leave the strip without an image,
    /// which draws nothing.
    fn load(assets: &mut AssetManager, config: &AnimationConfig) -> Self {
        let image = match assets.load_image(config.image) {
            Ok(image) => Some(image),
            Err(e) => {
                warn!("Sprite {} unavailable: {}", config.image, e);
                None
            }
        };
        let flipped_image = match image {
            Some(_) => match assets.load_mirrored(config.flipped_image, config.image) {
                Ok(image) => Some(image),
                Err(e) => {
                    warn!("Sprite {} unavailable: {}", config.flipped_image, e);
                    None
                }
            },
            None => None,
        };

        Self {
            image,
            flipped_image,
            frames: config.frames,
        }
    }

    /// The strip to draw; `flipped` picks the mirrored copy
    pub fn image(&self, flipped: bool) -> Option<Arc<RgbaImage>> {
        if flipped {
            self.flipped_image.clone()
        } else {
            self.image.clone()
        }
    }
}

/// A fighter's loaded animations, immutable after loading
#[derive(Debug, Clone)]
pub struct SpriteSet {
    idle: AnimationStrip,
    attack: AnimationStrip,
    take_hit: AnimationStrip,
    die: AnimationStrip,
}

impl SpriteSet {
    pub fn load(assets: &mut AssetManager, config: &SpriteSetConfig) -> Self {
        Self {
            idle: AnimationStrip::load(assets, &config.idle),
            attack: AnimationStrip::load(assets, &config.attack),
            take_hit: AnimationStrip::load(assets, &config.take_hit),
            die: AnimationStrip::load(assets, &config.die),
        }
    }

    /// Frame counts only, no images
    pub fn blank(config: &SpriteSetConfig) -> Self {
        Self {
            idle: AnimationStrip::blank(config.idle.frames),
            attack: AnimationStrip::blank(config.attack.frames),
            take_hit: AnimationStrip::blank(config.take_hit.frames),
            die: AnimationStrip::blank(config.die.frames),
        }
    }

    pub fn strip(&self, state: AnimationState) -> &AnimationStrip {
        match state {
            AnimationState::Idle => &self.idle,
            AnimationState::Attack => &self.attack,
            AnimationState::TakeHit => &self.take_hit,
            AnimationState::Die => &self.die,
        }
    }

    pub fn frames(&self, state: AnimationState) -> usize {
        self.strip(state).frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_counts() {
        let player = SpriteSet::blank(&SpriteSetConfig::PLAYER);
        assert_eq!(player.frames(AnimationState::Idle), 6);
        assert_eq!(player.frames(AnimationState::Attack), 8);
        assert_eq!(player.frames(AnimationState::TakeHit), 4);
        assert_eq!(player.frames(AnimationState::Die), 7);

        let enemy = SpriteSet::blank(&SpriteSetConfig::ENEMY);
        assert_eq!(enemy.frames(AnimationState::Idle), 8);
        assert_eq!(enemy.frames(AnimationState::Die), 5);
    }

    #[test]
    fn test_config_lookup() {
        let config = SpriteSetConfig::PLAYER;
        assert_eq!(config.get(AnimationState::Die).image, "player/death.png");
        assert_eq!(
            config.get(AnimationState::Attack).flipped_image,
            "player/attack-1-flipped.png"
        );
    }

    #[test]
    fn test_missing_assets_load_blank() {
        let mut assets = AssetManager::new("/definitely/not/here");
        let set = SpriteSet::load(&mut assets, &SpriteSetConfig::ENEMY);

        let idle = set.strip(AnimationState::Idle);
        assert!(idle.image(false).is_none());
        assert!(idle.image(true).is_none());
        assert_eq!(idle.frames, 8);
    }

    #[test]
    fn test_strip_picks_mirrored_image() {
        let normal = Arc::new(RgbaImage::new(2, 1));
        let flipped = Arc::new(RgbaImage::new(2, 1));
        let strip = AnimationStrip {
            image: Some(normal.clone()),
            flipped_image: Some(flipped.clone()),
            frames: 2,
        };

        assert!(Arc::ptr_eq(&strip.image(false).unwrap(), &normal));
        assert!(Arc::ptr_eq(&strip.image(true).unwrap(), &flipped));
    }
}
