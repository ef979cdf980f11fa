// Input configuration and remapping system

use super::action::{FighterAction, InputSource};
use std::collections::HashMap;
use std::hash::Hash;
use winit::keyboard::KeyCode;

/// Maps input sources (keys) to actions of type `A`. A key drives at most
/// one action; several keys may share an action.
#[derive(Debug, Clone)]
pub struct InputConfig<A> {
    bindings: HashMap<InputSource, A>,
}

impl<A: Copy + Eq + Hash> InputConfig<A> {
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Create a configuration from a list of bindings
    pub fn from_bindings(bindings: Vec<(InputSource, A)>) -> Self {
        let mut config = Self::new();
        for (source, action) in bindings {
            config.bind(source, action);
        }
        config
    }

    /// Bind an input source to an action, replacing its previous action
    pub fn bind(&mut self, source: InputSource, action: A) {
        if let Some(previous) = self.bindings.insert(source, action) {
            if previous != action {
                log::debug!("Rebinding {:?}", source);
            }
        }
    }

    /// Get the action bound to an input source
    pub fn get_action(&self, source: InputSource) -> Option<A> {
        self.bindings.get(&source).copied()
    }
}

impl<A: Copy + Eq + Hash> Default for InputConfig<A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-fighter key binding table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    pub left: KeyCode,
    pub right: KeyCode,
    pub jump: KeyCode,
    pub attack: KeyCode,
}

impl KeyBindings {
    /// Left-hand side of the keyboard
    pub const PLAYER: KeyBindings = KeyBindings {
        left: KeyCode::KeyA,
        right: KeyCode::KeyD,
        jump: KeyCode::KeyW,
        attack: KeyCode::Space,
    };

    /// Arrow keys
    pub const ENEMY: KeyBindings = KeyBindings {
        left: KeyCode::ArrowLeft,
        right: KeyCode::ArrowRight,
        jump: KeyCode::ArrowUp,
        attack: KeyCode::ArrowDown,
    };

    /// Build the lookup table used by the input router
    pub fn to_config(&self) -> InputConfig<FighterAction> {
        InputConfig::from_bindings(vec![
            (InputSource::key(self.left), FighterAction::MoveLeft),
            (InputSource::key(self.right), FighterAction::MoveRight),
            (InputSource::key(self.jump), FighterAction::Jump),
            (InputSource::key(self.attack), FighterAction::Attack),
        ])
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::PLAYER
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::action::UiAction;

    #[test]
    fn test_bind_action() {
        let mut config = InputConfig::new();
        let source = InputSource::key(KeyCode::KeyA);
        config.bind(source, FighterAction::MoveLeft);

        assert_eq!(config.get_action(source), Some(FighterAction::MoveLeft));
        assert_eq!(config.get_action(InputSource::key(KeyCode::KeyD)), None);
    }

    #[test]
    fn test_rebind_source() {
        let mut config = InputConfig::new();
        let source = InputSource::key(KeyCode::KeyA);

        config.bind(source, FighterAction::MoveLeft);
        config.bind(source, FighterAction::MoveRight);

        assert_eq!(config.get_action(source), Some(FighterAction::MoveRight));
        assert_eq!(config.bindings.len(), 1);
    }

    #[test]
    fn test_keys_can_share_an_action() {
        let a = InputSource::key(KeyCode::Enter);
        let b = InputSource::key(KeyCode::NumpadEnter);
        let config = InputConfig::from_bindings(vec![(a, UiAction::Confirm), (b, UiAction::Confirm)]);

        assert_eq!(config.get_action(a), Some(UiAction::Confirm));
        assert_eq!(config.get_action(b), Some(UiAction::Confirm));
    }

    #[test]
    fn test_key_bindings_table() {
        let config = KeyBindings::ENEMY.to_config();
        assert_eq!(config.bindings.len(), 4);
        assert_eq!(
            config.get_action(InputSource::key(KeyCode::ArrowDown)),
            Some(FighterAction::Attack)
        );
        assert_eq!(config.get_action(InputSource::key(KeyCode::KeyA)), None);
    }

    #[test]
    fn test_player_and_enemy_do_not_share_keys() {
        let player = KeyBindings::PLAYER.to_config();
        for (source, _) in KeyBindings::ENEMY.to_config().bindings {
            assert_eq!(player.get_action(source), None);
        }
    }
}
