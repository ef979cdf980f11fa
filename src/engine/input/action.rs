// Game action definitions and mappings

use winit::keyboard::KeyCode;

/// Actions a fighter reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FighterAction {
    // Movement
    MoveLeft,
    MoveRight,
    Jump,

    Attack,
}

/// Actions of the menus and the game-over modal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiAction {
    /// Enter: modal button, open the fight menu
    Confirm,
    /// Escape: back out of the fight menu
    Back,
    /// Digit keys 1-4: one of the four duel attack buttons
    AttackButton(usize),
    ToggleDebug,
}

/// A physical input the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
}

impl InputSource {
    /// Create a keyboard input source
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }
}

/// Bindings that are active whenever a menu or the modal is on screen
pub fn ui_bindings() -> Vec<(InputSource, UiAction)> {
    vec![
        (InputSource::key(KeyCode::Enter), UiAction::Confirm),
        (InputSource::key(KeyCode::Escape), UiAction::Back),
        (InputSource::key(KeyCode::Digit1), UiAction::AttackButton(0)),
        (InputSource::key(KeyCode::Digit2), UiAction::AttackButton(1)),
        (InputSource::key(KeyCode::Digit3), UiAction::AttackButton(2)),
        (InputSource::key(KeyCode::Digit4), UiAction::AttackButton(3)),
        (InputSource::key(KeyCode::F1), UiAction::ToggleDebug),
        // Note: Pause (P) is handled in main.rs so it works while paused
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_source_keyboard_creation() {
        let source = InputSource::key(KeyCode::KeyA);
        assert_eq!(source, InputSource::Keyboard(KeyCode::KeyA));
    }

    #[test]
    fn test_ui_bindings_cover_four_attack_buttons() {
        let buttons = ui_bindings()
            .into_iter()
            .filter(|(_, action)| matches!(action, UiAction::AttackButton(_)))
            .count();
        assert_eq!(buttons, 4);
    }

    #[test]
    fn test_no_duplicate_inputs_in_ui() {
        let mut seen_sources = std::collections::HashSet::new();
        for (source, _) in ui_bindings() {
            assert!(
                seen_sources.insert(source),
                "Duplicate input source found in UI bindings"
            );
        }
    }
}
