// Fighter configuration presets
//
// Both fighters share the same combat numbers; they differ in key
// bindings, sprites and where they start.

use std::time::Duration;

use glam::Vec2;

use super::animation::SpriteSetConfig;
use crate::engine::input::KeyBindings;
use crate::game::config::BASE_ARENA;
use crate::game::sprite::DEFAULT_HELD_FRAMES;

/// Per-tick movement numbers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsConstants {
    /// Added to vertical velocity every tick while airborne
    pub gravity: f32,
    /// Horizontal velocity while a move key is held
    pub move_speed: f32,
    /// Upward velocity of a jump
    pub jump_velocity: f32,
}

pub const BASE_PHYSICS: PhysicsConstants = PhysicsConstants {
    gravity: 0.6,
    move_speed: 5.0,
    jump_velocity: 15.0,
};

impl Default for PhysicsConstants {
    fn default() -> Self {
        BASE_PHYSICS
    }
}

/// Horizontal direction a fighter looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}


/// How damage is taken off the health pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageMode {
    /// Deduct the whole amount at once
    Immediate,
    /// Deduct one point per `step`, driven by the loop's scheduler
    Incremental { step: Duration },
}

/// Reach of a fighter's attack
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackBoxConfig {
    /// Horizontal distance from the body; mirrored when facing left
    pub offset: Vec2,
    pub size: Vec2,
}

/// Everything needed to build a fighter
#[derive(Debug, Clone, PartialEq)]
pub struct FighterConfig {
    pub name: &'static str,
    /// Top-left of the body at spawn
    pub position: Vec2,
    pub velocity: Vec2,
    /// Body width and height
    pub size: Vec2,
    pub key_bindings: KeyBindings,
    /// Facing at spawn; the sprite images face this way
    pub facing: Facing,
    pub attack_box: AttackBoxConfig,
    pub sprites: SpriteSetConfig,
    pub scale: f32,
    /// Sprite draw offset from the body position
    pub offset: Vec2,
    /// On-sprite health bar position relative to the body
    pub health_bar_offset: Vec2,
    /// Draw the on-sprite health bar and numeric readout
    pub show_health_bar: bool,
    pub held_frames: u32,
    pub damage: i32,
    pub health: i32,
    pub damage_mode: DamageMode,
    pub physics: PhysicsConstants,
}

/// Body size shared by both fighters
pub const FIGHTER_SIZE: Vec2 = Vec2::new(100.0, 150.0);
pub const DEFAULT_HEALTH: i32 = 100;
pub const DEFAULT_DAMAGE: i32 = 20;
/// Step of the incremental health drain
pub const DRAIN_STEP: Duration = Duration::from_millis(20);

impl FighterConfig {
    /// Left fighter, keyboard left hand
    pub fn player() -> Self {
        let width = BASE_ARENA.width as f32;
        Self {
            name: "player",
            position: Vec2::new(width / 4.0, 0.0),
            velocity: Vec2::ZERO,
            size: FIGHTER_SIZE,
            key_bindings: KeyBindings::PLAYER,
            facing: Facing::Right,
            attack_box: AttackBoxConfig {
                offset: Vec2::new(70.0, 0.0),
                size: Vec2::new(150.0, 80.0),
            },
            sprites: SpriteSetConfig::PLAYER,
            scale: 2.5,
            offset: Vec2::new(215.0, 157.0),
            health_bar_offset: Vec2::new(0.0, -30.0),
            show_health_bar: false,
            held_frames: DEFAULT_HELD_FRAMES,
            damage: DEFAULT_DAMAGE,
            health: DEFAULT_HEALTH,
            damage_mode: DamageMode::Immediate,
            physics: BASE_PHYSICS,
        }
    }

    /// Right fighter, arrow keys
    pub fn enemy() -> Self {
        let width = BASE_ARENA.width as f32;
        Self {
            name: "enemy",
            position: Vec2::new(width / 4.0 * 3.0, 0.0),
            key_bindings: KeyBindings::ENEMY,
            facing: Facing::Left,
            attack_box: AttackBoxConfig {
                offset: Vec2::new(50.0, 0.0),
                size: Vec2::new(150.0, 80.0),
            },
            sprites: SpriteSetConfig::ENEMY,
            offset: Vec2::new(215.0, 172.0),
            ..Self::player()
        }
    }

    /// Switch to the turn-based flavour: visible health drain and an
    /// on-sprite health bar
    pub fn for_duel(mut self) -> Self {
        self.damage_mode = DamageMode::Incremental { step: DRAIN_STEP };
        self.show_health_bar = true;
        self
    }
}

impl Default for FighterConfig {
    fn default() -> Self {
        Self::player()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_physics() {
        let physics = PhysicsConstants::default();
        assert_eq!(physics.gravity, 0.6);
        assert_eq!(physics.move_speed, 5.0);
        assert_eq!(physics.jump_velocity, 15.0);
    }

    #[test]
    fn test_fighters_share_combat_numbers() {
        let player = FighterConfig::player();
        let enemy = FighterConfig::enemy();

        assert_eq!(player.health, enemy.health);
        assert_eq!(player.damage, enemy.damage);
        assert_eq!(player.size, enemy.size);
        assert_eq!(player.damage_mode, DamageMode::Immediate);
    }

    #[test]
    fn test_fighters_face_each_other() {
        let player = FighterConfig::player();
        let enemy = FighterConfig::enemy();

        assert!(player.position.x < enemy.position.x);
        assert_eq!(player.facing, Facing::Right);
        assert_eq!(enemy.facing, Facing::Left);
        assert_ne!(player.key_bindings, enemy.key_bindings);
    }

    #[test]
    fn test_duel_flavour() {
        let config = FighterConfig::enemy().for_duel();
        assert_eq!(config.damage_mode, DamageMode::Incremental { step: DRAIN_STEP });
        assert!(config.show_health_bar);
        assert_eq!(config.name, "enemy");
    }
}
