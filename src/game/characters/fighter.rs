// Fighter: an animated sprite plus combat state

use glam::Vec2;
use log::{debug, info};

use super::animation::SpriteSet;
use super::state::{AnimationState, FighterStateMachine, Transition};
use super::stats::{DamageMode, Facing, FighterConfig};
use crate::core::Rect;
use crate::engine::input::{FighterAction, FighterIntent};
use crate::engine::physics::{Body, PhysicsWorld};
use crate::engine::renderer::{Canvas, Color, TextAlign};
use crate::game::sprite::Sprite;

const HEALTH_BAR_HEIGHT: f32 = 12.0;
const HEALTH_BAR_RADIUS: f32 = 4.0;

/// The two fighters of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FighterId {
    Player,
    Enemy,
}

impl FighterId {
    pub const ALL: [FighterId; 2] = [FighterId::Player, FighterId::Enemy];

    pub fn index(&self) -> usize {
        match self {
            FighterId::Player => 0,
            FighterId::Enemy => 1,
        }
    }

    pub fn opponent(&self) -> Self {
        match self {
            FighterId::Player => FighterId::Enemy,
            FighterId::Enemy => FighterId::Player,
        }
    }
}

/// Progress of an incremental health drain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainProgress {
    Draining { remaining: i32 },
    Finished,
}

/// A combat entity with health, an animation state and a physics body
#[derive(Debug)]
pub struct Fighter {
    id: FighterId,
    config: FighterConfig,
    sprites: SpriteSet,
    sprite: Sprite,
    body: Body,
    state: FighterStateMachine,
    intent: FighterIntent,
    facing: Facing,
    is_attacking: bool,
    health: i32,
    /// Damage not yet drained (incremental mode)
    pending_damage: i32,
    /// Set once the last death frame has been drawn
    is_dead: bool,
    attack_box: Rect,
}

impl Fighter {
    pub fn new(id: FighterId, config: FighterConfig, sprites: SpriteSet) -> Self {
        let idle = sprites.strip(AnimationState::Idle);
        let sprite = Sprite::new(config.position, idle.image(false), idle.frames)
            .with_scale(config.scale)
            .with_offset(config.offset)
            .with_held_frames(config.held_frames);
        let body = Body::new(config.position, config.velocity, config.size);

        let mut fighter = Self {
            id,
            facing: config.facing,
            health: config.health,
            config,
            sprites,
            sprite,
            body,
            state: FighterStateMachine::new(),
            intent: FighterIntent::default(),
            is_attacking: false,
            pending_damage: 0,
            is_dead: false,
            attack_box: Rect::default(),
        };
        fighter.attack_box = fighter.compute_attack_box();
        fighter
    }

    pub fn id(&self) -> FighterId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.config.name
    }

    pub fn config(&self) -> &FighterConfig {
        &self.config
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    /// Health as a percentage of the starting health
    pub fn health_percent(&self) -> f32 {
        if self.config.health <= 0 {
            return 0.0;
        }
        self.health as f32 / self.config.health as f32 * 100.0
    }

    pub fn damage(&self) -> i32 {
        self.config.damage
    }

    pub fn state(&self) -> AnimationState {
        self.state.state()
    }

    pub fn current_frame(&self) -> usize {
        self.sprite.current_frame()
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    /// Whether the mirrored strips are in use
    pub fn is_flipped(&self) -> bool {
        self.facing != self.config.facing
    }

    pub fn is_attacking(&self) -> bool {
        self.is_attacking
    }

    pub fn is_dying(&self) -> bool {
        self.health <= 0
    }

    pub fn is_dead(&self) -> bool {
        self.is_dead
    }

    #[cfg(test)]
    pub fn is_draining(&self) -> bool {
        self.pending_damage > 0
    }

    pub fn intent(&self) -> &FighterIntent {
        &self.intent
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    /// Move the body; the attack box follows immediately
    #[cfg(test)]
    pub fn set_position(&mut self, position: Vec2) {
        self.body.position = position;
        self.attack_box = self.compute_attack_box();
    }

    pub fn bounds(&self) -> Rect {
        self.body.bounds()
    }

    /// Reach of the attack as of the last update
    pub fn attack_box(&self) -> Rect {
        self.attack_box
    }

    /// The single attack frame on which a hit can connect: ceil(frames / 2)
    pub fn attack_hit_frame(&self) -> usize {
        (self.sprites.frames(AnimationState::Attack) + 1) / 2
    }

    /// Whether the attack animation shows its connecting frame
    pub fn is_at_hit_frame(&self) -> bool {
        self.state() == AnimationState::Attack && self.current_frame() == self.attack_hit_frame()
    }

    /// Attacking and on the connecting frame
    pub fn can_land_hit(&self) -> bool {
        self.is_attacking && self.is_at_hit_frame()
    }

    /// The swing is spent, hit or miss
    pub fn end_attack(&mut self) {
        self.is_attacking = false;
    }

    /// Ask the state machine for `target` and switch strips when it is
    /// entered
    fn enter(&mut self, target: AnimationState) -> bool {
        let transition =
            self.state
                .request(target, self.sprite.current_frame(), self.sprite.frames());

        match transition {
            Transition::Entered { state, entry_frame } => {
                let strip = self.sprites.strip(state);
                self.sprite
                    .set_animation(strip.image(self.is_flipped()), strip.frames, true);
                self.sprite.set_frame(entry_frame);
                if state != AnimationState::Attack {
                    self.is_attacking = false;
                }
                debug!("{} -> {}", self.config.name, state.animation_name());
                true
            }
            Transition::Unchanged | Transition::Blocked => false,
        }
    }

    /// Start a swing. No-op while dying or dead, or while another one-shot
    /// still holds the fighter.
    pub fn attack(&mut self) -> bool {
        if self.is_dying() || self.is_dead {
            return false;
        }
        if self.enter(AnimationState::Attack) {
            self.is_attacking = true;
            true
        } else {
            false
        }
    }

    /// Take `damage`. Immediate mode deducts it now; incremental mode queues
    /// it for `drain_step`. Health never drops below zero.
    pub fn take_hit(&mut self, damage: i32) {
        let damage = damage.max(0);
        match self.config.damage_mode {
            DamageMode::Immediate => {
                self.health = (self.health - damage).max(0);
                debug!("{} takes {} damage, health {}", self.config.name, damage, self.health);
                self.resolve_hit();
            }
            DamageMode::Incremental { .. } => {
                self.pending_damage += damage;
            }
        }
    }

    /// Drain one health point of queued damage. When the drain concludes
    /// the hit is resolved into `TakeHit` or `Die`.
    pub fn drain_step(&mut self) -> DrainProgress {
        if self.pending_damage <= 0 {
            return DrainProgress::Finished;
        }

        self.health = (self.health - 1).max(0);
        self.pending_damage -= 1;

        if self.pending_damage == 0 || self.health == 0 {
            self.pending_damage = 0;
            self.resolve_hit();
            DrainProgress::Finished
        } else {
            DrainProgress::Draining {
                remaining: self.pending_damage,
            }
        }
    }

    fn resolve_hit(&mut self) {
        if self.is_dying() {
            if self.enter(AnimationState::Die) {
                info!("{} is dying", self.config.name);
            }
        } else {
            self.enter(AnimationState::TakeHit);
        }
    }

    /// Turn towards `facing`. Dying and dead fighters keep their facing.
    pub fn set_facing(&mut self, facing: Facing) {
        if self.is_dying() || self.is_dead || facing == self.facing {
            return;
        }
        self.facing = facing;
        let strip = self.sprites.strip(self.state());
        self.sprite.set_image(strip.image(self.is_flipped()));
        self.attack_box = self.compute_attack_box();
    }

    /// Apply a routed key event: held keys update the intent, the attack
    /// key swings on press
    pub fn handle_action(&mut self, action: FighterAction, pressed: bool) {
        match action {
            FighterAction::Attack => {
                if pressed {
                    self.attack();
                }
            }
            _ => {
                self.intent.set(action, pressed);
            }
        }
    }

    /// Forget every held key (input detached)
    pub fn release_input(&mut self) {
        self.intent.reset();
    }

    /// Turn the held keys into velocity. Jumping needs solid ground.
    pub fn apply_intent(&mut self, world: &PhysicsWorld) {
        let physics = self.config.physics;
        self.body.velocity.x = self.intent.horizontal() * physics.move_speed;

        if self.intent.jump && world.is_grounded(&self.body) {
            self.body.velocity.y = -physics.jump_velocity;
        }
    }

    fn compute_attack_box(&self) -> Rect {
        let position = self.body.position;
        let attack_box = self.config.attack_box;
        let x = match self.facing {
            Facing::Right => position.x + attack_box.offset.x,
            Facing::Left => position.x - self.config.size.x - attack_box.offset.x,
        };
        Rect::new(
            x,
            position.y + self.config.size.y / 3.0 + attack_box.offset.y,
            attack_box.size.x,
            attack_box.size.y,
        )
    }

    /// Draw the current frame (and the health bar when configured)
    pub fn draw(&mut self, canvas: &mut dyn Canvas) {
        self.sprite.position = self.body.position;
        self.sprite.draw(canvas);
        if self.config.show_health_bar {
            self.draw_health_bar(canvas);
        }
    }

    fn draw_health_bar(&self, canvas: &mut dyn Canvas) {
        let origin = self.body.position + self.config.health_bar_offset;
        let width = self.config.size.x;
        let frame = Rect::new(origin.x, origin.y, width, HEALTH_BAR_HEIGHT);

        canvas.fill_round_rect(frame, HEALTH_BAR_RADIUS, Color::GREY);
        let fill = Rect::new(
            origin.x,
            origin.y,
            width * self.health_percent() / 100.0,
            HEALTH_BAR_HEIGHT,
        );
        if fill.width > 0.0 {
            canvas.fill_round_rect(fill, HEALTH_BAR_RADIUS, Color::GREEN);
        }
        canvas.stroke_round_rect(frame, HEALTH_BAR_RADIUS, 1.0, Color::WHITE);
        canvas.fill_text(
            &self.health.to_string(),
            Vec2::new(origin.x + width / 2.0, origin.y - 14.0),
            10.0,
            TextAlign::Center,
            Color::WHITE,
        );
    }

    /// Per-tick update: draw, mark dead after the last death frame, settle
    /// into idle when allowed, animate, integrate and recompute the attack
    /// box. Without a world the fighter stays where it is.
    pub fn update(&mut self, canvas: &mut dyn Canvas, world: Option<&PhysicsWorld>) {
        self.draw(canvas);

        if self.state() == AnimationState::Die && self.sprite.is_last_frame() && !self.is_dead {
            self.is_dead = true;
            info!("{} is dead", self.config.name);
        }

        self.enter(AnimationState::Idle);

        if !self.is_dead {
            self.sprite.animate_frames();
        }

        if let Some(world) = world {
            world.integrate(&mut self.body);
        }
        self.attack_box = self.compute_attack_box();
    }
}
