// Game layer: fighters, the two game variants and their display

pub mod arena;
pub mod characters;
pub mod config;
pub mod duel;
pub mod hud;
pub mod roster;
pub mod session;
pub mod sprite;

pub use arena::{Match, MatchOutcome, TickStatus};
pub use config::{GameMode, GameSettings};
pub use duel::Duel;
pub use roster::Roster;
pub use session::Session;
