// Input handling system
//
// - `action`: fighter and UI actions, default UI bindings
// - `config`: binding tables and per-fighter key bindings
// - `intent`: held-key state of one fighter
// - `router`: subscriptions owned by the game loop, routing keys by fighter

pub mod action;
pub mod config;
pub mod intent;
pub mod router;

// Re-export commonly used types
pub use action::{FighterAction, InputSource, UiAction};
pub use config::{InputConfig, KeyBindings};
pub use intent::FighterIntent;
pub use router::{InputRouter, Routed, SubscriptionId};
