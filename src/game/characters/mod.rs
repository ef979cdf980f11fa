// Fighter system
//
// Everything related to the two fighters:
// - Fighter entity: sprite, body and combat state
// - Configuration presets and physics numbers
// - State machine over the four animations
// - Sprite sheets per animation

pub mod animation;
pub mod fighter;
pub mod state;
pub mod stats;

// Re-export commonly used types
pub use animation::{SpriteSet, SpriteSetConfig};
pub use fighter::{DrainProgress, Fighter, FighterId};
pub use state::{AnimationState, FighterStateMachine, Transition};
pub use stats::{DamageMode, Facing, FighterConfig, PhysicsConstants};
