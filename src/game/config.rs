// Arena and session configuration

use std::path::PathBuf;
use std::time::Duration;

use crate::engine::renderer::Color;

/// Environment variable overriding the asset root
pub const ASSETS_ENV: &str = "RUSTED_DUEL_ASSETS";
/// Environment variable selecting the game mode (`arena` or `duel`)
pub const MODE_ENV: &str = "RUSTED_DUEL_MODE";
/// Environment variable enabling the collision overlay at start
pub const DEBUG_ENV: &str = "RUSTED_DUEL_DEBUG";

const DEFAULT_ASSET_ROOT: &str = "assets";

/// Fixed properties of the arena and of a round
#[derive(Debug, Clone, PartialEq)]
pub struct ArenaConfig {
    /// Logical canvas size in pixels
    pub width: u32,
    pub height: u32,
    /// Distance from the bottom of the canvas to the ground line
    pub ground_offset: f32,
    /// Round length in timer units
    pub round_seconds: u32,
    /// Time between two timer units
    pub timer_step: Duration,
    /// Delay between a knockout and the game-over modal
    pub game_over_delay: Duration,
    /// Duration of the health-bar transition after a hit
    pub health_tween: Duration,
    /// Wash painted over the background, under the fighters
    pub overlay: Color,
    /// Background image, relative to the image directory
    pub background: Option<&'static str>,
}

pub const BASE_ARENA: ArenaConfig = ArenaConfig {
    width: 1024,
    height: 576,
    ground_offset: 96.0,
    round_seconds: 60,
    timer_step: Duration::from_secs(1),
    game_over_delay: Duration::from_secs(3),
    health_tween: Duration::from_millis(500),
    overlay: Color::OVERLAY,
    background: Some("background.png"),
};

impl ArenaConfig {
    /// Y coordinate the fighters stand on
    pub fn ground_y(&self) -> f32 {
        self.height as f32 - self.ground_offset
    }

    pub fn width_f32(&self) -> f32 {
        self.width as f32
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        BASE_ARENA
    }
}

/// Which variant of the game runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameMode {
    /// Real-time brawl with physics and a round timer
    #[default]
    Arena,
    /// Turn-based duel driven by a menu
    Duel,
}

impl GameMode {
    /// Parse a mode name; unknown names yield `None`
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "arena" | "match" => Some(Self::Arena),
            "duel" | "turn" | "turns" => Some(Self::Duel),
            _ => None,
        }
    }
}

/// Settings resolved at startup
#[derive(Debug, Clone)]
pub struct GameSettings {
    pub asset_root: PathBuf,
    pub mode: GameMode,
    pub debug: bool,
    pub arena: ArenaConfig,
}

impl GameSettings {
    /// Read the settings from the process environment
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var(ASSETS_ENV).ok(),
            std::env::var(MODE_ENV).ok(),
            std::env::var(DEBUG_ENV).ok(),
        )
    }

    fn from_vars(assets: Option<String>, mode: Option<String>, debug: Option<String>) -> Self {
        let mode = match mode {
            Some(name) => GameMode::parse(&name).unwrap_or_else(|| {
                log::warn!("Unknown game mode '{}', falling back to arena", name);
                GameMode::Arena
            }),
            None => GameMode::Arena,
        };

        Self {
            asset_root: assets
                .filter(|path| !path.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSET_ROOT)),
            mode,
            debug: matches!(debug.as_deref(), Some("1") | Some("true")),
            arena: ArenaConfig::default(),
        }
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self::from_vars(None, None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_line() {
        let arena = ArenaConfig::default();
        assert_eq!(arena.ground_y(), 480.0);
        assert_eq!(arena.width_f32(), 1024.0);
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(GameMode::parse("duel"), Some(GameMode::Duel));
        assert_eq!(GameMode::parse(" Arena "), Some(GameMode::Arena));
        assert_eq!(GameMode::parse("chess"), None);
    }

    #[test]
    fn test_defaults() {
        let settings = GameSettings::default();
        assert_eq!(settings.asset_root, PathBuf::from("assets"));
        assert_eq!(settings.mode, GameMode::Arena);
        assert!(!settings.debug);
    }

    #[test]
    fn test_overrides() {
        let settings = GameSettings::from_vars(
            Some("/srv/duel".to_string()),
            Some("duel".to_string()),
            Some("1".to_string()),
        );
        assert_eq!(settings.asset_root, PathBuf::from("/srv/duel"));
        assert_eq!(settings.mode, GameMode::Duel);
        assert!(settings.debug);
    }

    #[test]
    fn test_unknown_mode_falls_back() {
        let settings = GameSettings::from_vars(None, Some("chess".to_string()), None);
        assert_eq!(settings.mode, GameMode::Arena);
    }
}
